// File: src/core/morse.rs
use crate::error::{EngineError, Result};
use std::collections::HashMap;
use std::io::Read;

/// One-to-one mapping between a symbol (letter, digit, punctuation) and its
/// dot-dash pattern. Symbols are stored uppercase.
#[derive(Debug, Clone)]
pub struct MorseTable {
    patterns: HashMap<char, String>,
    symbols: HashMap<String, char>,
}

impl MorseTable {
    /// Builds a table from (symbol, pattern) pairs, rejecting malformed or
    /// repeated entries in either direction.
    pub fn from_pairs<I, S, P>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, P)>,
        S: AsRef<str>,
        P: AsRef<str>,
    {
        let mut patterns = HashMap::new();
        let mut symbols = HashMap::new();

        for (symbol, pattern) in pairs {
            let (symbol, pattern) = (symbol.as_ref(), pattern.as_ref().trim());
            let invalid = |reason: &'static str| EngineError::InvalidMorseEntry {
                symbol: symbol.to_string(),
                pattern: pattern.to_string(),
                reason,
            };

            let mut chars = symbol.chars();
            let c = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(invalid("symbol must be a single character")),
            };
            if c.is_whitespace() {
                return Err(invalid("symbol must not be whitespace"));
            }
            if pattern.is_empty() || !pattern.chars().all(|p| p == '.' || p == '-') {
                return Err(invalid("pattern must be a non-empty run of '.' and '-'"));
            }

            let upper = uppercase(c);
            if patterns.insert(upper, pattern.to_string()).is_some() {
                return Err(EngineError::DuplicateMorse(upper.to_string()));
            }
            if symbols.insert(pattern.to_string(), upper).is_some() {
                return Err(EngineError::DuplicateMorse(pattern.to_string()));
            }
        }

        if patterns.is_empty() {
            return Err(EngineError::EmptyTable("Morse table"));
        }
        Ok(Self { patterns, symbols })
    }

    /// Parses a JSON object of the form `{ "A": ".-", "B": "-...", ... }`.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_reader(reader)?;
        Self::from_pairs(raw)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;
        Self::from_pairs(raw)
    }

    /// The standard international table: letters, digits and common punctuation.
    pub fn international() -> Self {
        const TABLE: &[(&str, &str)] = &[
            // Letters
            ("A", ".-"), ("B", "-..."), ("C", "-.-."), ("D", "-.."), ("E", "."),
            ("F", "..-."), ("G", "--."), ("H", "...."), ("I", ".."), ("J", ".---"),
            ("K", "-.-"), ("L", ".-.."), ("M", "--"), ("N", "-."), ("O", "---"),
            ("P", ".--."), ("Q", "--.-"), ("R", ".-."), ("S", "..."), ("T", "-"),
            ("U", "..-"), ("V", "...-"), ("W", ".--"), ("X", "-..-"), ("Y", "-.--"),
            ("Z", "--.."),
            // Numbers
            ("0", "-----"), ("1", ".----"), ("2", "..---"), ("3", "...--"), ("4", "....-"),
            ("5", "....."), ("6", "-...."), ("7", "--..."), ("8", "---.."), ("9", "----."),
            // Punctuation
            (".", ".-.-.-"), (",", "--..--"), ("?", "..--.."), ("'", ".----."),
            ("!", "-.-.--"), ("/", "-..-."), ("(", "-.--."), (")", "-.--.-"),
            ("&", ".-..."), (":", "---..."), (";", "-.-.-."), ("=", "-...-"),
            ("+", ".-.-."), ("-", "-....-"), ("_", "..--.-"), ("\"", ".-..-."),
            ("$", "...-..-"), ("@", ".--.-."),
        ];
        Self::from_pairs(TABLE.iter().copied())
            .unwrap_or_else(|e| unreachable!("built-in Morse table is valid: {e}"))
    }

    /// Pattern for a symbol, case-insensitively.
    pub fn pattern(&self, symbol: char) -> Option<&str> {
        self.patterns.get(&uppercase(symbol)).map(String::as_str)
    }

    /// Uppercase symbol for a pattern.
    pub fn symbol(&self, pattern: &str) -> Option<char> {
        self.symbols.get(pattern).copied()
    }

    /// (symbol, pattern) pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.patterns.iter().map(|(c, p)| (*c, p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Single-character uppercase; characters that uppercase to several (`ß`) stay as they are.
fn uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_lookup() {
        let table = MorseTable::international();
        assert_eq!(table.pattern('S'), Some("..."));
        assert_eq!(table.pattern('o'), Some("---"));
        assert_eq!(table.pattern('3'), Some("...--"));
        assert_eq!(table.symbol(".-"), Some('A'));
        assert_eq!(table.symbol("...--"), Some('3'));
        assert_eq!(table.pattern('中'), None);
        assert_eq!(table.pattern('ß'), None);
        assert_eq!(table.symbol("........"), None);
    }

    #[test]
    fn test_both_directions_agree() {
        let table = MorseTable::international();
        for c in ('A'..='Z').chain('0'..='9') {
            let pattern = table.pattern(c).unwrap();
            assert_eq!(table.symbol(pattern), Some(c));
        }
    }

    #[test]
    fn test_iter_rebuilds_the_same_table() {
        let table = MorseTable::international();
        let pairs: Vec<(String, String)> =
            table.iter().map(|(c, p)| (c.to_string(), p.to_string())).collect();
        let rebuilt = MorseTable::from_pairs(pairs).unwrap();
        assert_eq!(rebuilt.len(), table.len());
        assert_eq!(rebuilt.symbol("...--"), Some('3'));
    }

    #[test]
    fn test_from_json() {
        let table = MorseTable::from_json_str(r#"{ "a": ".-", "B": "-..." }"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.pattern('A'), Some(".-"));
        assert_eq!(table.symbol("-..."), Some('B'));
    }

    #[test]
    fn test_rejects_duplicate_pattern() {
        let err = MorseTable::from_pairs([("A", ".-"), ("B", ".-")]).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateMorse(p) if p == ".-"));
    }

    #[test]
    fn test_rejects_case_duplicate_symbol() {
        let err = MorseTable::from_pairs([("a", ".-"), ("A", "-...")]).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateMorse(s) if s == "A"));
    }

    #[test]
    fn test_rejects_malformed_entries() {
        assert!(matches!(
            MorseTable::from_pairs([("AB", ".-")]),
            Err(EngineError::InvalidMorseEntry { .. })
        ));
        assert!(matches!(
            MorseTable::from_pairs([("A", ".x-")]),
            Err(EngineError::InvalidMorseEntry { .. })
        ));
        assert!(matches!(
            MorseTable::from_pairs(Vec::<(&str, &str)>::new()),
            Err(EngineError::EmptyTable(_))
        ));
    }
}
