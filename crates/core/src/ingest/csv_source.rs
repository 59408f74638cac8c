use crate::config::Settings;
use crate::domain::{Share, ShareRejection};
use crate::ingest::{LoadedShares, ShareSource};
use anyhow::{Context, Result};
use encoding_rs::Encoding;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub encoding: &'static Encoding,
    pub max_spending: f64,
}

impl CsvOptions {
    pub fn new(delimiter: u8, encoding_label: &str, max_spending: f64) -> Result<Self> {
        Ok(Self {
            delimiter,
            encoding: resolve_encoding(encoding_label)?,
            max_spending,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.csv_delimiter,
            &settings.csv_encoding,
            settings.max_spending,
        )
    }
}

/// Reads `name, price, profit_rate` rows from a delimited file.
#[derive(Debug, Clone)]
pub struct CsvShareSource {
    path: PathBuf,
    options: CsvOptions,
}

impl CsvShareSource {
    pub fn new(path: impl Into<PathBuf>, options: CsvOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ShareSource for CsvShareSource {
    fn source_name(&self) -> &'static str {
        "csv_file"
    }

    fn load(&self) -> Result<LoadedShares> {
        let file = std::fs::File::open(&self.path)
            .with_context(|| format!("failed to open share file {}", self.path.display()))?;
        let loaded = read_shares(file, &self.options)
            .with_context(|| format!("failed to read share file {}", self.path.display()))?;

        tracing::info!(
            path = %self.path.display(),
            loaded = loaded.shares.len(),
            skipped = loaded.skipped,
            "loaded shares"
        );
        Ok(loaded)
    }
}

/// Decodes `reader` with the configured encoding and parses every row.
///
/// Only I/O failures are errors; rows that do not form a valid [`Share`] are
/// skipped and counted.
pub fn read_shares<R: Read>(mut reader: R, options: &CsvOptions) -> Result<LoadedShares> {
    let mut raw = Vec::new();
    reader
        .read_to_end(&mut raw)
        .context("read share records failed")?;

    let (text, used, had_errors) = options.encoding.decode(&raw);
    if had_errors {
        tracing::warn!(
            encoding = used.name(),
            "input contained byte sequences invalid for the encoding; replaced"
        );
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(text.as_bytes());

    let mut out = LoadedShares::default();
    for (idx, result) in csv_reader.records().enumerate() {
        let row = idx + 1;
        let record = match result {
            Ok(r) => r,
            Err(err) => {
                tracing::debug!(row, error = %err, "skipping unreadable record");
                out.skipped += 1;
                continue;
            }
        };

        match parse_record(&record, options.max_spending) {
            Ok(share) => out.shares.push(share),
            Err(reason) => {
                tracing::debug!(row, %reason, "skipping record");
                out.skipped += 1;
            }
        }
    }

    Ok(out)
}

fn parse_record(record: &csv::StringRecord, max_spending: f64) -> Result<Share, ShareRejection> {
    let name = record
        .get(0)
        .ok_or(ShareRejection::MissingField("name"))?
        .trim();
    let price = parse_num(record.get(1), "price")?;
    let profit_rate = parse_num(record.get(2), "profit_rate")?;
    Share::try_new(name, price, profit_rate, max_spending)
}

fn parse_num(field: Option<&str>, name: &'static str) -> Result<f64, ShareRejection> {
    let raw = field.ok_or(ShareRejection::MissingField(name))?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ShareRejection::NotANumber {
            field: name,
            raw: raw.to_string(),
        })
}

fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .with_context(|| format!("unknown text encoding label: {label:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(delimiter: u8) -> CsvOptions {
        CsvOptions::new(delimiter, "utf-8", 500.0).unwrap()
    }

    #[test]
    fn parses_valid_rows_and_skips_header() {
        let input = b"name,price,profit\nShare-A,100,10\nShare-B,200.5,5.5\n";
        let loaded = read_shares(&input[..], &options(b',')).unwrap();
        assert_eq!(loaded.shares.len(), 2);
        assert_eq!(loaded.skipped, 1);
        assert_eq!(loaded.shares[1].name, "Share-B");
        assert_eq!(loaded.shares[1].price, 200.5);
        assert_eq!(loaded.shares[1].profit_rate, 5.5);
    }

    #[test]
    fn drops_rows_violating_share_invariants() {
        let input = b"Zero,0,10\nNoRate,10,0\nNeg,-5,10\nTooDear,500.01,10\nOk,500,1\nNan,NaN,3\n";
        let loaded = read_shares(&input[..], &options(b',')).unwrap();
        assert_eq!(loaded.shares.len(), 1);
        assert_eq!(loaded.shares[0].name, "Ok");
        assert_eq!(loaded.skipped, 5);
    }

    #[test]
    fn drops_short_and_non_numeric_rows() {
        let input = b"OnlyName\nA,abc,10\nB,10,\nC, 20 , 5 ,extra\n";
        let loaded = read_shares(&input[..], &options(b',')).unwrap();
        assert_eq!(loaded.shares.len(), 1);
        assert_eq!(loaded.shares[0].name, "C");
        assert_eq!(loaded.shares[0].price, 20.0);
        assert_eq!(loaded.skipped, 3);
    }

    #[test]
    fn honours_configured_delimiter() {
        let input = b"name;price;profit\nShare-X;12.5;40\n";
        let loaded = read_shares(&input[..], &options(b';')).unwrap();
        assert_eq!(loaded.shares.len(), 1);
        assert_eq!(loaded.shares[0].profit, 5.0);
    }

    #[test]
    fn decodes_legacy_encodings() {
        let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode("Société,10,10\n");
        let opts = CsvOptions::new(b',', "windows-1252", 500.0).unwrap();
        let loaded = read_shares(&bytes[..], &opts).unwrap();
        assert_eq!(loaded.shares[0].name, "Société");
    }

    #[test]
    fn strips_utf8_bom() {
        let input = b"\xEF\xBB\xBFA,10,10\n";
        let loaded = read_shares(&input[..], &options(b',')).unwrap();
        assert_eq!(loaded.shares[0].name, "A");
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let loaded = read_shares(&b""[..], &options(b',')).unwrap();
        assert!(loaded.shares.is_empty());
        assert_eq!(loaded.skipped, 0);
    }

    #[test]
    fn unknown_encoding_label_is_rejected() {
        assert!(CsvOptions::new(b',', "klingon-8", 500.0).is_err());
    }

    #[test]
    fn missing_file_is_a_resource_error() {
        let source = CsvShareSource::new("/definitely/not/here.csv", options(b','));
        let err = source.load().unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.csv"));
    }

    #[test]
    fn loads_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "algoinvest_csv_source_{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, "A,100,10\nB,200,5\nC,50,20\n").unwrap();
        let loaded = CsvShareSource::new(&path, options(b',')).load().unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.shares.len(), 3);
        assert_eq!(loaded.shares[2].name, "C");
    }
}
