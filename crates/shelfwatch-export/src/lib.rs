//! Persistence of scraped categories as CSV files.

pub mod csv_file;

use thiserror::Error;

pub use csv_file::{output_file_name, write_category_csv, write_records, FILE_STAMP_FORMAT};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
