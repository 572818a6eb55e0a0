// File: src/core/dictionary.rs
use crate::error::{EngineError, Result};
use log::{debug, trace, warn};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;

/// Character -> ordered readings (tone-marked Pinyin). The first reading is the
/// primary one used for encoding. Entries keep the order of the data source.
#[derive(Debug, Clone, Default)]
pub struct PinyinDictionary {
    entries: Vec<(char, Vec<String>)>,
    positions: HashMap<char, usize>,
}

impl PinyinDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the readings of `character`. Blank readings are dropped;
    /// a character left with none is not stored. Replacing keeps the original
    /// position.
    pub fn insert<I, S>(&mut self, character: char, readings: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let readings: Vec<String> = readings
            .into_iter()
            .map(|r| r.as_ref().trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        if readings.is_empty() {
            return false;
        }

        if let Some(&idx) = self.positions.get(&character) {
            self.entries[idx].1 = readings;
        } else {
            self.positions.insert(character, self.entries.len());
            self.entries.push((character, readings));
        }
        true
    }

    /// Parses a JSON object mapping each character to its readings, either as a
    /// comma-separated string (`"háng,xíng"`) or an array of strings.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let source: SourceEntries = serde_json::from_reader(reader)?;
        Self::from_source(source)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let source: SourceEntries = serde_json::from_str(json)?;
        Self::from_source(source)
    }

    fn from_source(source: SourceEntries) -> Result<Self> {
        let mut dictionary = Self::new();
        for (key, readings) in source.0 {
            let mut chars = key.chars();
            let character = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    warn!("skipping dictionary key {key:?}: not a single character");
                    continue;
                }
            };
            if dictionary.positions.contains_key(&character) {
                warn!("dictionary key {key:?} appears more than once; keeping the last readings");
            }
            if !dictionary.insert(character, readings.into_list()) {
                warn!("skipping dictionary key {key:?}: no readings");
            }
        }

        if dictionary.is_empty() {
            return Err(EngineError::EmptyTable("Pinyin dictionary"));
        }
        debug!("parsed {} dictionary characters", dictionary.len());
        Ok(dictionary)
    }

    pub fn readings(&self, character: char) -> Option<&[String]> {
        self.positions
            .get(&character)
            .map(|&idx| self.entries[idx].1.as_slice())
    }

    pub fn primary(&self, character: char) -> Option<&str> {
        self.readings(character)
            .and_then(|readings| readings.first())
            .map(String::as_str)
    }

    /// Entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &[String])> {
        self.entries.iter().map(|(c, r)| (*c, r.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Readings {
    Joined(String),
    List(Vec<String>),
}

impl Readings {
    fn into_list(self) -> Vec<String> {
        match self {
            Readings::Joined(joined) => joined.split(',').map(str::to_string).collect(),
            Readings::List(list) => list,
        }
    }
}

/// The JSON object as written, in document order. A plain `HashMap` would lose
/// the order that decides which character wins a shared reading.
struct SourceEntries(Vec<(String, Readings)>);

impl<'de> Deserialize<'de> for SourceEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = SourceEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping characters to Pinyin readings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, readings)) = map.next_entry::<String, Readings>()? {
                    entries.push((key, readings));
                }
                Ok(SourceEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Reading -> characters sharing it, in dictionary order. The first character
/// is the canonical guess; no frequency ranking is applied.
#[derive(Debug, Clone, Default)]
pub struct ReversePinyinIndex {
    by_reading: HashMap<String, Vec<char>>,
}

impl ReversePinyinIndex {
    pub fn build(dictionary: &PinyinDictionary) -> Self {
        let mut by_reading: HashMap<String, Vec<char>> = HashMap::new();
        for (character, readings) in dictionary.iter() {
            for reading in readings {
                by_reading.entry(reading.clone()).or_default().push(character);
            }
        }
        debug!("reverse index holds {} readings", by_reading.len());
        Self { by_reading }
    }

    /// All characters read as `reading`, in dictionary order.
    pub fn candidates(&self, reading: &str) -> &[char] {
        self.by_reading
            .get(reading)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Best guess for a decoded, tone-marked syllable in any letter case.
    pub fn guess_chinese(&self, word: &str) -> Option<char> {
        let key = word.to_lowercase();
        let guess = self.candidates(&key).first().copied();
        trace!("guess for {key:?}: {guess:?}");
        guess
    }

    pub fn len(&self) -> usize {
        self.by_reading.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_reading.is_empty()
    }
}
