pub mod domain;
pub mod ingest;
pub mod solver;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_MAX_SPENDING: f64 = 500.0;
    pub const DEFAULT_CSV_DELIMITER: u8 = b',';
    pub const DEFAULT_CSV_ENCODING: &str = "utf-8";
    pub const DEFAULT_MAX_EXHAUSTIVE_SHARES: usize = 25;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub max_spending: f64,
        pub csv_delimiter: u8,
        pub csv_encoding: String,
        pub max_exhaustive_shares: usize,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                max_spending: DEFAULT_MAX_SPENDING,
                csv_delimiter: DEFAULT_CSV_DELIMITER,
                csv_encoding: DEFAULT_CSV_ENCODING.to_string(),
                max_exhaustive_shares: DEFAULT_MAX_EXHAUSTIVE_SHARES,
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        /// Same as `from_env`, but reads variables through `lookup` so callers can
        /// supply their own environment.
        pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
        where
            F: Fn(&str) -> Option<String>,
        {
            let mut out = Self::default();

            if let Some(s) = non_empty(lookup("ALGOINVEST_MAX_SPENDING")) {
                out.max_spending = s
                    .parse::<f64>()
                    .with_context(|| format!("ALGOINVEST_MAX_SPENDING is not a number: {s}"))?;
            }

            if let Some(s) = non_empty(lookup("ALGOINVEST_CSV_DELIMITER")) {
                out.csv_delimiter = parse_delimiter(&s).context("ALGOINVEST_CSV_DELIMITER")?;
            }

            if let Some(s) = non_empty(lookup("ALGOINVEST_CSV_ENCODING")) {
                out.csv_encoding = s;
            }

            if let Some(s) = non_empty(lookup("ALGOINVEST_MAX_EXHAUSTIVE_SHARES")) {
                out.max_exhaustive_shares = s.parse::<usize>().with_context(|| {
                    format!("ALGOINVEST_MAX_EXHAUSTIVE_SHARES is not a count: {s}")
                })?;
            }

            out.sentry_dsn = non_empty(lookup("SENTRY_DSN"));

            Ok(out)
        }
    }

    /// Accepts a single ASCII character, or the escapes `\t` and `tab`.
    pub fn parse_delimiter(s: &str) -> anyhow::Result<u8> {
        if matches!(s, "\\t" | "tab") {
            return Ok(b'\t');
        }
        let bytes = s.as_bytes();
        anyhow::ensure!(
            bytes.len() == 1 && bytes[0].is_ascii(),
            "delimiter must be a single ASCII character (got {s:?})"
        );
        Ok(bytes[0])
    }

    fn non_empty(v: Option<String>) -> Option<String> {
        v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
    }

}
