pub mod csv_source;

use crate::domain::Share;

/// Outcome of loading: the valid shares plus how many records were dropped.
#[derive(Debug, Clone, Default)]
pub struct LoadedShares {
    pub shares: Vec<Share>,
    pub skipped: usize,
}

pub trait ShareSource {
    fn source_name(&self) -> &'static str;

    /// Reads every record, keeping the valid ones. Malformed records are
    /// counted in `skipped`; only resource failures are returned as errors.
    fn load(&self) -> anyhow::Result<LoadedShares>;
}
