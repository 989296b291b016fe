//! JSON artifacts: file naming and atomic writing.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::types::{HansardRecord, InquiryRecord};

/// Input file name without its final `.json` extension.
///
/// `sitting-1.pdf.json` becomes `sitting-1.pdf`.
#[must_use]
pub fn source_stem(source: &Path) -> String {
    let name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    match name.strip_suffix(".json") {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => name,
    }
}

/// `<stem>.json`
#[must_use]
pub fn hansard_file_name(source: &Path) -> String {
    format!("{}.json", source_stem(source))
}

/// `<stem>.<number>.json`, or `<stem>.unnumbered-<position>.json` without a number.
///
/// `position` is the record's 1-based position within its source document.
#[must_use]
pub fn inquiry_file_name(source: &Path, number: Option<u32>, position: usize) -> String {
    let stem = source_stem(source);
    match number {
        Some(number) => format!("{stem}.{number}.json"),
        None => format!("{stem}.unnumbered-{position}.json"),
    }
}

/// `<stem>.<number>-<position>.json`, for a number already used earlier in the
/// same source document.
#[must_use]
pub fn duplicate_inquiry_file_name(source: &Path, number: u32, position: usize) -> String {
    format!("{}.{number}-{position}.json", source_stem(source))
}

/// Serialize `value` as indented JSON into `dir/file_name`.
///
/// Writes to a hidden temp file, syncs it, then renames it into place, so a
/// reader never sees a partial document.
pub fn write_json<T: Serialize>(dir: &Path, file_name: &str, value: &T) -> Result<PathBuf> {
    let output_file = dir.join(file_name);
    let temp_file = dir.join(format!(".{file_name}.tmp"));

    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    #[cfg(target_os = "windows")]
    if output_file.exists() {
        fs::remove_file(&output_file)?;
    }

    fs::rename(&temp_file, &output_file)?;

    Ok(output_file)
}

/// Write a transcript record next to its siblings in `dir`.
pub fn save_hansard(record: &HansardRecord, source: &Path, dir: &Path) -> Result<PathBuf> {
    write_json(dir, &hansard_file_name(source), record)
}

/// Write every inquiry record of one source document into `dir`.
///
/// A number seen earlier in the same document gets a position suffix, so no
/// record replaces another.
pub fn save_inquiries(
    records: &[InquiryRecord],
    source: &Path,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut written = Vec::with_capacity(records.len());

    for (idx, record) in records.iter().enumerate() {
        let position = idx + 1;
        let file_name = match record.number {
            Some(number) if !seen.insert(number) => {
                tracing::warn!(
                    source = %source.display(),
                    number,
                    position,
                    "Duplicate inquiry number"
                );
                duplicate_inquiry_file_name(source, number, position)
            }
            number => inquiry_file_name(source, number, position),
        };
        written.push(write_json(dir, &file_name, record)?);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Meta;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_file_names() {
        let source = Path::new("data/2024/session-1/hansard-extract/sitting-1.pdf.json");

        assert_eq!(source_stem(source), "sitting-1.pdf");
        assert_eq!(hansard_file_name(source), "sitting-1.pdf.json");
        assert_eq!(
            inquiry_file_name(source, Some(12), 1),
            "sitting-1.pdf.12.json"
        );
        assert_eq!(
            inquiry_file_name(source, None, 3),
            "sitting-1.pdf.unnumbered-3.json"
        );
        assert_eq!(source_stem(Path::new("plain")), "plain");
    }

    #[test]
    fn test_save_hansard() {
        let dir = tempdir().unwrap();
        let record = HansardRecord::new(Meta::new("a.pdf.json", 2024, 1, "selangor"));

        let path = save_hansard(&record, Path::new("a.pdf.json"), dir.path()).unwrap();

        assert_eq!(path, dir.path().join("a.pdf.json"));
        let written: HansardRecord =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, record);

        // No temp file left behind.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_inquiries() {
        let dir = tempdir().unwrap();
        let meta = Meta::new("q.pdf.json", 2024, 1, "selangor");
        let mut first = InquiryRecord::new(meta.clone(), true);
        first.number = Some(7);
        let second = InquiryRecord::new(meta, false);

        let paths = save_inquiries(&[first, second], Path::new("q.pdf.json"), dir.path()).unwrap();

        assert_eq!(
            paths,
            vec![
                dir.path().join("q.pdf.7.json"),
                dir.path().join("q.pdf.unnumbered-2.json"),
            ]
        );
    }

    #[test]
    fn test_save_inquiries_duplicate_numbers() {
        let dir = tempdir().unwrap();
        let meta = Meta::new("q.pdf.json", 2024, 1, "selangor");
        let mut first = InquiryRecord::new(meta.clone(), true);
        first.number = Some(4);
        first.title = Some("Pertama".to_string());
        let mut second = InquiryRecord::new(meta, true);
        second.number = Some(4);
        second.title = Some("Kedua".to_string());

        let paths = save_inquiries(&[first, second], Path::new("q.pdf.json"), dir.path()).unwrap();

        assert_eq!(
            paths,
            vec![dir.path().join("q.pdf.4.json"), dir.path().join("q.pdf.4-2.json")]
        );
        let kept: InquiryRecord =
            serde_json::from_str(&fs::read_to_string(&paths[0]).unwrap()).unwrap();
        assert_eq!(kept.title.as_deref(), Some("Pertama"));
    }
}
