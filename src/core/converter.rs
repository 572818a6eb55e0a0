// File: src/core/converter.rs
use crate::core::dictionary::PinyinDictionary;
use crate::core::morse::MorseTable;
use crate::core::tone::ToneCodec;
use crate::core::types::{is_chinese, WORD_SEPARATOR};

/// Maps a single input character to the text that gets keyed: the primary
/// reading (numeral tones) for Chinese characters, the character itself otherwise.
pub struct PinyinResolver<'a> {
    dictionary: &'a PinyinDictionary,
    tones: ToneCodec,
}

impl<'a> PinyinResolver<'a> {
    pub fn new(dictionary: &'a PinyinDictionary, tones: ToneCodec) -> Self {
        Self { dictionary, tones }
    }

    pub fn resolve(&self, c: char) -> String {
        if is_chinese(c) {
            if let Some(reading) = self.dictionary.primary(c) {
                return self.tones.to_numeral(reading);
            }
        }
        c.to_string()
    }
}

/// Text to Morse. Patterns are separated by single spaces, words by ` / `.
pub struct TextToMorseEncoder<'a> {
    resolver: PinyinResolver<'a>,
    morse: &'a MorseTable,
}

impl<'a> TextToMorseEncoder<'a> {
    pub fn new(morse: &'a MorseTable, dictionary: &'a PinyinDictionary, tones: ToneCodec) -> Self {
        Self {
            resolver: PinyinResolver::new(dictionary, tones),
            morse,
        }
    }

    /// Encodes a full text. Characters without a pattern are dropped.
    pub fn encode(&self, text: &str) -> String {
        let mut result = String::new();
        let mut last_char: Option<char> = None;

        for c in text.chars() {
            match c {
                '\r' => continue,
                '\n' => {
                    push_separator(&mut result);
                    trim_trailing_spaces(&mut result);
                    result.push('\n');
                }
                c if c.is_whitespace() => push_separator(&mut result),
                c => {
                    // each Chinese character is its own word
                    if is_chinese(c) && last_char.is_some_and(is_chinese) {
                        push_separator(&mut result);
                    }
                    for letter in self.resolver.resolve(c).chars() {
                        if let Some(pattern) = self.morse.pattern(letter) {
                            result.push_str(pattern);
                            result.push(' ');
                        }
                    }
                }
            }
            last_char = Some(c);
        }

        result.trim().to_string()
    }
}

fn push_separator(result: &mut String) {
    trim_trailing_spaces(result);
    result.push(' ');
    result.push(WORD_SEPARATOR);
    result.push(' ');
}

fn trim_trailing_spaces(result: &mut String) {
    let len = result.trim_end_matches(' ').len();
    result.truncate(len);
}
