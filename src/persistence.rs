// File: src/persistence.rs
use crate::config::EngineConfig;
use crate::core::dictionary::PinyinDictionary;
use crate::core::engine::MorseEngine;
use crate::core::morse::MorseTable;
use crate::error::{EngineError, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::NamedTempFile;

/// Bumped whenever the layout of the snapshot changes.
const SNAPSHOT_VERSION: u32 = 2;

/// Size and modification time of one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStamp {
    path: PathBuf,
    len: u64,
    modified: Option<SystemTime>,
}

impl SourceStamp {
    pub fn of(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

/// The source files a snapshot was built from. `morse` is `None` when the
/// built-in table was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSources {
    morse: Option<SourceStamp>,
    dictionary: SourceStamp,
}

impl SnapshotSources {
    /// Stamps the sources named by `config` as they are on disk right now.
    pub fn of(config: &EngineConfig) -> Result<Self> {
        Ok(Self {
            morse: config.morse_table.as_deref().map(SourceStamp::of).transpose()?,
            dictionary: SourceStamp::of(&config.pinyin_dictionary)?,
        })
    }
}

/// The raw table contents. Both tables are rebuilt through their checked
/// constructors on load, and the reverse index is derived again.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    sources: SnapshotSources,
    morse: Vec<(char, String)>,
    dictionary: Vec<(char, Vec<String>)>,
}

pub fn save_to_disk(engine: &MorseEngine, sources: &SnapshotSources, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        sources: sources.clone(),
        morse: engine.morse().iter().map(|(c, p)| (c, p.to_string())).collect(),
        dictionary: engine
            .dictionary()
            .iter()
            .map(|(c, readings)| (c, readings.to_vec()))
            .collect(),
    };

    // Write next to the target and rename, so readers never see half a file.
    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        bincode::serialize_into(&mut writer, &snapshot)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;
    info!("saved table snapshot to {}", path.display());
    Ok(())
}

/// Loads a snapshot. When `expected` is given, a snapshot stamped with other
/// sources is rejected as stale.
pub fn load_from_disk(path: &Path, expected: Option<&SnapshotSources>) -> Result<MorseEngine> {
    let reader = BufReader::new(File::open(path)?);
    let snapshot: Snapshot = bincode::deserialize_from(reader)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(Box::new(bincode::ErrorKind::Custom(format!(
            "snapshot version {} is not supported (expected {SNAPSHOT_VERSION})",
            snapshot.version
        )))
        .into());
    }
    if expected.is_some_and(|sources| *sources != snapshot.sources) {
        return Err(EngineError::StaleSnapshot(path.to_path_buf()));
    }
    debug!(
        "snapshot {} holds {} Morse symbols and {} characters",
        path.display(),
        snapshot.morse.len(),
        snapshot.dictionary.len()
    );

    let morse = MorseTable::from_pairs(snapshot.morse.iter().map(|(c, p)| (c.to_string(), p)))?;
    let mut dictionary = PinyinDictionary::new();
    for (character, readings) in snapshot.dictionary {
        dictionary.insert(character, readings);
    }
    if dictionary.is_empty() {
        return Err(EngineError::EmptyTable("Pinyin dictionary"));
    }
    Ok(MorseEngine::new(morse, dictionary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> MorseEngine {
        let dictionary = PinyinDictionary::from_json_str(r#"{ "你": "nǐ", "好": "hǎo" }"#).unwrap();
        MorseEngine::new(MorseTable::international(), dictionary)
    }

    fn sources(dir: &Path, dictionary: &str) -> SnapshotSources {
        let path = dir.join("pinyin.json");
        fs::write(&path, dictionary).unwrap();
        let config = EngineConfig {
            pinyin_dictionary: path,
            ..EngineConfig::default()
        };
        SnapshotSources::of(&config).unwrap()
    }

    fn write_raw(path: &Path, snapshot: &Snapshot) {
        let file = File::create(path).unwrap();
        bincode::serialize_into(BufWriter::new(file), snapshot).unwrap();
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tables.bin");
        let sources = sources(dir.path(), r#"{ "你": "nǐ", "好": "hǎo" }"#);
        let original = engine();
        save_to_disk(&original, &sources, &path).unwrap();

        let loaded = load_from_disk(&path, Some(&sources)).unwrap();
        assert_eq!(loaded.encode("你好"), original.encode("你好"));
        assert_eq!(loaded.decode("-. .. ...--"), original.decode("-. .. ...--"));
        assert_eq!(loaded.dictionary().len(), 2);
        assert_eq!(loaded.morse().len(), original.morse().len());
    }

    #[test]
    fn test_dictionary_order_survives() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.bin");
        let sources = sources(dir.path(), "{}");
        let dictionary =
            PinyinDictionary::from_json_str(r#"{ "是": "shì", "世": "shì", "好": "hǎo,hào" }"#).unwrap();
        let original = MorseEngine::new(MorseTable::international(), dictionary);
        save_to_disk(&original, &sources, &path).unwrap();

        let loaded = load_from_disk(&path, None).unwrap();
        let characters: String = loaded.dictionary().iter().map(|(c, _)| c).collect();
        assert_eq!(characters, "是世好");
        assert_eq!(loaded.guess_chinese("shì"), Some('是'));
        assert_eq!(loaded.dictionary().readings('好').unwrap(), ["hǎo", "hào"]);
    }

    #[test]
    fn test_changed_sources_make_the_snapshot_stale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.bin");
        let before = sources(dir.path(), r#"{ "你": "nǐ" }"#);
        save_to_disk(&engine(), &before, &path).unwrap();

        let after = sources(dir.path(), r#"{ "拟": "nǐ", "你": "nǐ" }"#);
        assert_ne!(before, after);
        assert!(matches!(
            load_from_disk(&path, Some(&after)),
            Err(EngineError::StaleSnapshot(p)) if p == path
        ));
        // without a reference the snapshot is taken as-is
        assert!(load_from_disk(&path, None).is_ok());
    }

    #[test]
    fn test_tables_are_revalidated_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.bin");
        let sources = sources(dir.path(), "{}");

        write_raw(
            &path,
            &Snapshot {
                version: SNAPSHOT_VERSION,
                sources: sources.clone(),
                morse: vec![('A', ".-".into()), ('B', ".-".into())],
                dictionary: vec![('你', vec!["nǐ".into()])],
            },
        );
        assert!(matches!(load_from_disk(&path, None), Err(EngineError::DuplicateMorse(_))));

        write_raw(
            &path,
            &Snapshot {
                version: SNAPSHOT_VERSION,
                sources: sources.clone(),
                morse: vec![('A', ".-".into())],
                dictionary: vec![('你', vec!["  ".into()])],
            },
        );
        assert!(matches!(load_from_disk(&path, None), Err(EngineError::EmptyTable(_))));

        // a repeated character keeps a single entry holding the last readings
        write_raw(
            &path,
            &Snapshot {
                version: SNAPSHOT_VERSION,
                sources,
                morse: vec![('A', ".-".into())],
                dictionary: vec![('你', vec!["nǐ".into()]), ('你', vec!["nì".into()])],
            },
        );
        let loaded = load_from_disk(&path, None).unwrap();
        assert_eq!(loaded.dictionary().len(), 1);
        assert_eq!(loaded.dictionary().primary('你'), Some("nì"));
    }

    #[test]
    fn test_load_rejects_other_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.bin");
        write_raw(
            &path,
            &Snapshot {
                version: SNAPSHOT_VERSION + 1,
                sources: sources(dir.path(), "{}"),
                morse: vec![('A', ".-".into())],
                dictionary: vec![('你', vec!["nǐ".into()])],
            },
        );
        assert!(matches!(load_from_disk(&path, None), Err(EngineError::Snapshot(_))));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.bin");
        fs::write(&path, b"not a snapshot").unwrap();
        assert!(matches!(load_from_disk(&path, None), Err(EngineError::Snapshot(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_from_disk(&dir.path().join("missing.bin"), None);
        assert!(matches!(result, Err(EngineError::Io(_))));
    }
}
