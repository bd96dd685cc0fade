//! Offline scoring input: campaign and ad group report exports in CSV form.

mod normalizer;
mod parser;

use crate::ads::rows::collapse_ad_group_rows;
use crate::ads::{AdGroup, Campaign};
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read report export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid report CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: '{value}' is not a valid {column}")]
    Field {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("line {line}: {column} is required")]
    Missing { line: u64, column: &'static str },
}

pub struct ReportImporter;

impl ReportImporter {
    pub fn campaigns_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Campaign>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::campaigns_from_reader(file)
    }

    pub fn campaigns_from_reader<R: Read>(reader: R) -> Result<Vec<Campaign>, ImportError> {
        parser::parse_campaigns(reader)
    }

    pub fn ad_groups_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<AdGroup>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::ad_groups_from_reader(file)
    }

    /// Rows repeating an ad group id (per-ad exports) are merged into one record.
    pub fn ad_groups_from_reader<R: Read>(reader: R) -> Result<Vec<AdGroup>, ImportError> {
        Ok(collapse_ad_group_rows(parser::parse_ad_groups(reader)?))
    }
}
