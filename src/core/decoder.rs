// File: src/core/decoder.rs
use crate::core::dictionary::ReversePinyinIndex;
use crate::core::morse::MorseTable;
use crate::core::tone::ToneCodec;
use crate::core::types::{Decoded, Guess, WORD_SEPARATOR};

/// Where a word decoder stands with respect to tone recombination.
///
/// Morse carries `ǐ` as the two letters `I`, `3`, so a digit can only ever
/// modify the letter written just before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneState {
    /// The next symbol is written as-is.
    AwaitingLetter,
    /// The last letter written is a tone vowel, possibly already toned; a
    /// following `1`..=`4` (re)places the tone mark on it.
    AwaitingToneDigit { vowel: char },
}

/// Decodes the letters of a single Morse word, one symbol at a time.
#[derive(Debug, Clone)]
pub struct WordDecoder {
    tones: ToneCodec,
    state: ToneState,
    word: String,
}

impl WordDecoder {
    pub fn new(tones: ToneCodec) -> Self {
        Self {
            tones,
            state: ToneState::AwaitingLetter,
            word: String::new(),
        }
    }

    pub fn state(&self) -> ToneState {
        self.state
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    /// Feeds one decoded letter (as stored in the Morse table).
    pub fn push(&mut self, letter: char) {
        if let ToneState::AwaitingToneDigit { vowel } = self.state {
            if let Some(marked) = self.tones.combine(vowel.to_ascii_lowercase(), letter) {
                // the vowel stays pending, so a further digit re-tones it
                self.word.pop();
                self.word.push(marked);
                return;
            }
        }

        let first_of_word = self.word.is_empty();
        self.word.push(if first_of_word { upper(letter) } else { lower(letter) });
        self.state = if self.tones.is_tone_vowel(letter) {
            ToneState::AwaitingToneDigit { vowel: letter }
        } else {
            ToneState::AwaitingLetter
        };
    }

    pub fn finish(self) -> String {
        self.word
    }
}

/// Morse to text, with a best guess of the Chinese character behind each word.
pub struct MorseToTextDecoder<'a> {
    morse: &'a MorseTable,
    index: &'a ReversePinyinIndex,
    tones: ToneCodec,
}

impl<'a> MorseToTextDecoder<'a> {
    pub fn new(morse: &'a MorseTable, index: &'a ReversePinyinIndex, tones: ToneCodec) -> Self {
        Self { morse, index, tones }
    }

    pub fn decode(&self, morse: &str) -> Decoded {
        let mut lines = Vec::new();
        let mut guesses = Vec::new();

        for line in morse.split('\n') {
            let mut words = Vec::new();
            for symbols in line.split(WORD_SEPARATOR) {
                let word = self.decode_word(symbols);
                if word.is_empty() {
                    continue;
                }
                if let Some(character) = self.index.guess_chinese(&word) {
                    guesses.push(Guess {
                        reading: word.to_lowercase(),
                        word: word.clone(),
                        character,
                    });
                }
                words.push(word);
            }
            lines.push(words.join(" "));
        }

        Decoded {
            text: lines.join("\n"),
            guesses,
        }
    }

    /// Decodes one whitespace-separated run of patterns. Unknown patterns are skipped.
    pub fn decode_word(&self, symbols: &str) -> String {
        let mut decoder = WordDecoder::new(self.tones);
        for letter in symbols.split_whitespace().filter_map(|s| self.morse.symbol(s)) {
            decoder.push(letter);
        }
        decoder.finish()
    }
}

fn upper(c: char) -> char {
    let mut it = c.to_uppercase();
    match (it.next(), it.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn lower(c: char) -> char {
    let mut it = c.to_lowercase();
    match (it.next(), it.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}
