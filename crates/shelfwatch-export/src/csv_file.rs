use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use shelfwatch_core::{ProductRecord, RunMode};

use crate::ExportError;

/// `strftime` pattern for the timestamp part of an output file name.
pub const FILE_STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

const RECORD_COLUMNS: [&str; 6] = [
    "Name",
    "Packaging",
    "PromotionLabel",
    "PromotionValidity",
    "CapturedAt",
    "SourceUrl",
];

/// `{slug}_{YYYY-MM-DD_HH-MM-SS}.csv`
#[must_use]
pub fn output_file_name(slug: &str, stamp: NaiveDateTime) -> String {
    format!("{slug}_{}.csv", stamp.format(FILE_STAMP_FORMAT))
}

/// Writes a header row and one row per record to `writer`.
///
/// The leading `Category` column is only emitted when `mode` includes it.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if serialization or the underlying write fails.
pub fn write_records<W: Write>(
    writer: W,
    mode: RunMode,
    records: &[ProductRecord],
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    let with_category = mode.includes_category();

    if with_category {
        csv.write_field("Category")?;
    }
    csv.write_record(RECORD_COLUMNS)?;

    for record in records {
        let captured_at = record.captured_at_display();
        if with_category {
            csv.write_field(&record.category)?;
        }
        csv.write_record([
            record.name.as_str(),
            record.packaging.as_str(),
            record.promotion_label.as_str(),
            record.promotion_validity.as_str(),
            captured_at.as_str(),
            record.source_url.as_str(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Writes `records` to `{dir}/{slug}_{stamp}.csv`, creating `dir` if needed.
///
/// An empty `records` slice still produces a header-only file, so every
/// category that ran leaves an artifact.
///
/// # Errors
///
/// Returns [`ExportError`] if the directory or file cannot be created or
/// written.
pub fn write_category_csv(
    dir: &Path,
    slug: &str,
    mode: RunMode,
    records: &[ProductRecord],
    stamp: NaiveDateTime,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.display().to_string(),
        source,
    })?;

    let path = dir.join(output_file_name(slug, stamp));
    let file = std::fs::File::create(&path)?;
    write_records(std::io::BufWriter::new(file), mode, records)?;

    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "data saved"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 3)
            .unwrap()
    }

    #[test]
    fn file_name_uses_slug_and_zero_padded_stamp() {
        assert_eq!(
            output_file_name("warzywa", stamp()),
            "warzywa_2024-03-09_07-05-03.csv"
        );
    }

    #[test]
    fn header_only_when_no_records() {
        let mut buf = Vec::new();
        write_records(&mut buf, RunMode::Single, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Name,Packaging,PromotionLabel,PromotionValidity,CapturedAt,SourceUrl\n"
        );
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let mut record = ProductRecord::placeholder("", stamp());
        record.name = "Ser żółty, plastry".to_string();

        let mut buf = Vec::new();
        write_records(&mut buf, RunMode::Single, &[record]).unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert!(out.contains("\"Ser żółty, plastry\""), "got: {out}");
    }
}
