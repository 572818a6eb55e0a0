// src/core/types.rs
use std::fmt;

/// Word boundary token in Morse text.
pub const WORD_SEPARATOR: char = '/';

/// Range treated as Chinese characters (CJK Unified Ideographs, base block).
pub const CHINESE_RANGE: std::ops::RangeInclusive<char> = '\u{4e00}'..='\u{9fa5}';

pub fn is_chinese(c: char) -> bool {
    CHINESE_RANGE.contains(&c)
}

/// True when `text` looks like Morse: only dots, dashes, spaces, separators
/// and line breaks, with at least one dot or dash.
pub fn is_morse_code(text: &str) -> bool {
    let text = text.trim();
    text.contains(['.', '-'])
        && text
            .chars()
            .all(|c| matches!(c, '.' | '-' | ' ' | '\n' | '\r' | WORD_SEPARATOR))
}

/// A decoded romanized word and the character it most likely came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess {
    /// The word as it appears in the decoded text, e.g. `Nǐ`.
    pub word: String,
    /// The lowercase reading that was looked up, e.g. `nǐ`.
    pub reading: String,
    pub character: char,
}

/// Result of decoding Morse text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Reconstructed text: first letter of every word uppercase, tone marks restored.
    pub text: String,
    /// One entry per decoded word that matched a dictionary reading.
    pub guesses: Vec<Guess>,
}

impl Decoded {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.guesses.is_empty()
    }
}

/// Renders the text followed, when there are guesses, by the annotated block.
impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.guesses.is_empty() {
            return f.write_str(&self.text);
        }
        write!(f, "{}\n\n汉字猜测结果：", self.text.trim())?;
        for guess in &self.guesses {
            write!(f, "\n{}（猜测为：{}）", guess.word, guess.character)?;
        }
        Ok(())
    }
}
