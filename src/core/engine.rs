use crate::config::EngineConfig;
use crate::core::converter::{PinyinResolver, TextToMorseEncoder};
use crate::core::decoder::MorseToTextDecoder;
use crate::core::dictionary::{PinyinDictionary, ReversePinyinIndex};
use crate::core::morse::MorseTable;
use crate::core::tone::ToneCodec;
use crate::core::types::Decoded;
use crate::error::Result;
use crate::persistence::{load_from_disk, save_to_disk, SnapshotSources};
use log::{info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// The engine owns every table. Build it once and hand out references; nothing
// is mutated after construction, so it can be shared across threads freely.
pub struct MorseEngine {
    morse: MorseTable,
    dictionary: PinyinDictionary,
    index: ReversePinyinIndex,
    tones: ToneCodec,
}

impl MorseEngine {
    /// Takes ownership of the loaded tables and derives the reverse index.
    pub fn new(morse: MorseTable, dictionary: PinyinDictionary) -> Self {
        let index = ReversePinyinIndex::build(&dictionary);
        info!(
            "engine ready: {} Morse symbols, {} characters, {} readings",
            morse.len(),
            dictionary.len(),
            index.len()
        );
        Self {
            morse,
            dictionary,
            index,
            tones: ToneCodec::new(),
        }
    }

    /// Loads the Morse table, then the dictionary, from the configured sources.
    pub fn from_sources(config: &EngineConfig) -> Result<Self> {
        let morse = match &config.morse_table {
            Some(path) => {
                info!("loading Morse table from {}", path.display());
                MorseTable::from_json_reader(BufReader::new(File::open(path)?))?
            }
            None => MorseTable::international(),
        };
        info!("loading Pinyin dictionary from {}", config.pinyin_dictionary.display());
        let dictionary =
            PinyinDictionary::from_json_reader(BufReader::new(File::open(&config.pinyin_dictionary)?))?;
        Ok(Self::new(morse, dictionary))
    }

    /// Prefers the configured snapshot while its sources are unchanged; otherwise
    /// reads the sources and refreshes the snapshot. When the sources cannot be
    /// inspected the snapshot is used as-is. A snapshot that cannot be written is
    /// only logged.
    pub fn from_snapshot_or_sources(config: &EngineConfig) -> Result<Self> {
        let Some(snapshot) = &config.snapshot else {
            return Self::from_sources(config);
        };

        let current = match SnapshotSources::of(config) {
            Ok(sources) => Some(sources),
            Err(e) => {
                warn!("cannot inspect table sources ({e}); trusting snapshot {}", snapshot.display());
                None
            }
        };
        match load_from_disk(snapshot, current.as_ref()) {
            Ok(engine) => {
                info!("loaded tables from snapshot {}", snapshot.display());
                return Ok(engine);
            }
            Err(e) => warn!("snapshot {} unusable ({e}); reading sources", snapshot.display()),
        }

        let engine = Self::from_sources(config)?;
        let saved = current
            .map_or_else(|| SnapshotSources::of(config), Ok)
            .and_then(|sources| engine.save_snapshot(snapshot, &sources));
        if let Err(e) = saved {
            warn!("could not write snapshot {}: {e}", snapshot.display());
        }
        Ok(engine)
    }

    pub fn save_snapshot(&self, path: &Path, sources: &SnapshotSources) -> Result<()> {
        save_to_disk(self, sources, path)
    }

    pub fn encoder(&self) -> TextToMorseEncoder<'_> {
        TextToMorseEncoder::new(&self.morse, &self.dictionary, self.tones)
    }

    pub fn decoder(&self) -> MorseToTextDecoder<'_> {
        MorseToTextDecoder::new(&self.morse, &self.index, self.tones)
    }

    pub fn resolver(&self) -> PinyinResolver<'_> {
        PinyinResolver::new(&self.dictionary, self.tones)
    }

    pub fn encode(&self, text: &str) -> String {
        self.encoder().encode(text)
    }

    pub fn decode(&self, morse: &str) -> Decoded {
        self.decoder().decode(morse)
    }

    pub fn guess_chinese(&self, word: &str) -> Option<char> {
        self.index.guess_chinese(word)
    }

    pub fn morse(&self) -> &MorseTable {
        &self.morse
    }

    pub fn dictionary(&self) -> &PinyinDictionary {
        &self.dictionary
    }

    pub fn index(&self) -> &ReversePinyinIndex {
        &self.index
    }

    pub fn tones(&self) -> ToneCodec {
        self.tones
    }
}
