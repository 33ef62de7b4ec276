//! Reads the five dump documents of a directory into a [`RawDataset`]

use anyhow::{Context, Result};
use dumpspace_core::{EntityKind, RawDataset};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Dump document per category
pub const DUMP_FILES: [(EntityKind, &str); 5] = [
    (EntityKind::Class, "ClassesInfo.json"),
    (EntityKind::Struct, "StructsInfo.json"),
    (EntityKind::Function, "FunctionsInfo.json"),
    (EntityKind::Enum, "EnumsInfo.json"),
    (EntityKind::Offset, "OffsetsInfo.json"),
];

/// Load every dump document found in `dir`
///
/// A missing document leaves its category empty. A document that is not
/// valid JSON, or has no record array, is an error.
pub fn load_dump_dir(dir: &Path) -> Result<RawDataset> {
    if !dir.is_dir() {
        anyhow::bail!("dump directory {} does not exist", dir.display());
    }

    let mut raw = RawDataset::new();
    let mut found = 0;
    for (kind, file_name) in DUMP_FILES {
        let path = dir.join(file_name);
        if !path.exists() {
            warn!(file = %path.display(), "Dump document missing, {} list stays empty", kind);
            continue;
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let document: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("{} is not valid JSON", path.display()))?;
        raw.set_document(kind, document)
            .with_context(|| format!("unexpected layout in {}", path.display()))?;
        debug!(file = file_name, records = raw.records(kind).len(), "Read dump document");
        found += 1;
    }

    if found == 0 {
        anyhow::bail!("no dump documents found in {}", dir.display());
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_loads_present_documents() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("ClassesInfo.json"),
            r#"{"data": [{"UObject": [{"__MDKClassSize": 40}]}, {"AActor": []}]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("OffsetsInfo.json"),
            r#"[["OFFSET_GOBJECTS", "0x10"]]"#,
        )
        .unwrap();

        let raw = load_dump_dir(dir.path()).unwrap();
        assert_eq!(raw.records(EntityKind::Class).len(), 2);
        assert_eq!(raw.records(EntityKind::Offset).len(), 1);
        assert!(raw.records(EntityKind::Function).is_empty());
        assert_eq!(raw.total_records(), 3);
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_dump_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("no dump documents"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("EnumsInfo.json"), "{ not json").unwrap();
        let err = load_dump_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("EnumsInfo.json"));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_dump_dir(&dir.path().join("nope")).is_err());
    }
}
