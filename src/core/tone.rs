// File: src/core/tone.rs

/// Converts between tone-marked Pinyin vowels and the vowel + digit form that
/// Morse can carry (`ǐ` <=> `i3`). `ü` is written `v` in numeral form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToneCodec;

impl ToneCodec {
    pub fn new() -> Self {
        Self
    }

    /// Replaces every tone-marked vowel with its base vowel and tone digit.
    /// The toneless `ü` becomes a bare `v`.
    pub fn to_numeral(&self, syllable: &str) -> String {
        let mut result = String::with_capacity(syllable.len() + 2);
        for c in syllable.chars() {
            match self.split(c) {
                Some((vowel, Some(tone))) => {
                    result.push(vowel);
                    result.push(tone);
                }
                Some((vowel, None)) => result.push(vowel),
                None => result.push(c),
            }
        }
        result
    }

    /// Folds `vowel + digit` pairs back into tone-marked vowels.
    /// One left-to-right pass with a single character of lookahead.
    pub fn to_diacritic(&self, syllable: &str) -> String {
        let mut result = String::with_capacity(syllable.len());
        let mut chars = syllable.chars().peekable();

        while let Some(c) = chars.next() {
            if let Some(&next_c) = chars.peek() {
                if let Some(marked) = self.combine(c, next_c) {
                    result.push(marked);
                    chars.next();
                    continue;
                }
            }
            result.push(c);
        }

        result
    }

    /// Combines a lowercase base vowel with a tone digit `1`..=`4`.
    pub fn combine(&self, vowel: char, tone: char) -> Option<char> {
        match (vowel, tone) {
            ('a', '1') => Some('ā'), ('a', '2') => Some('á'), ('a', '3') => Some('ǎ'), ('a', '4') => Some('à'),
            ('e', '1') => Some('ē'), ('e', '2') => Some('é'), ('e', '3') => Some('ě'), ('e', '4') => Some('è'),
            ('i', '1') => Some('ī'), ('i', '2') => Some('í'), ('i', '3') => Some('ǐ'), ('i', '4') => Some('ì'),
            ('o', '1') => Some('ō'), ('o', '2') => Some('ó'), ('o', '3') => Some('ǒ'), ('o', '4') => Some('ò'),
            ('u', '1') => Some('ū'), ('u', '2') => Some('ú'), ('u', '3') => Some('ǔ'), ('u', '4') => Some('ù'),
            ('v', '1') => Some('ǖ'), ('v', '2') => Some('ǘ'), ('v', '3') => Some('ǚ'), ('v', '4') => Some('ǜ'),
            _ => None,
        }
    }

    /// True for the six base vowels that can take a tone digit (`ü` as `v`).
    pub fn is_tone_vowel(&self, c: char) -> bool {
        matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'v')
    }

    fn split(&self, c: char) -> Option<(char, Option<char>)> {
        let pair = match c {
            'ā' => ('a', '1'), 'á' => ('a', '2'), 'ǎ' => ('a', '3'), 'à' => ('a', '4'),
            'ē' => ('e', '1'), 'é' => ('e', '2'), 'ě' => ('e', '3'), 'è' => ('e', '4'),
            'ī' => ('i', '1'), 'í' => ('i', '2'), 'ǐ' => ('i', '3'), 'ì' => ('i', '4'),
            'ō' => ('o', '1'), 'ó' => ('o', '2'), 'ǒ' => ('o', '3'), 'ò' => ('o', '4'),
            'ū' => ('u', '1'), 'ú' => ('u', '2'), 'ǔ' => ('u', '3'), 'ù' => ('u', '4'),
            'ǖ' => ('v', '1'), 'ǘ' => ('v', '2'), 'ǚ' => ('v', '3'), 'ǜ' => ('v', '4'),
            'ü' => return Some(('v', None)),
            _ => return None,
        };
        Some((pair.0, Some(pair.1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_numeral() {
        let codec = ToneCodec::new();
        assert_eq!(codec.to_numeral("nǐ"), "ni3");
        assert_eq!(codec.to_numeral("hǎo"), "ha3o");
        assert_eq!(codec.to_numeral("lǜ"), "lv4");
        assert_eq!(codec.to_numeral("lü"), "lv");
        assert_eq!(codec.to_numeral("ma"), "ma");
    }

    #[test]
    fn test_to_diacritic() {
        let codec = ToneCodec::new();
        assert_eq!(codec.to_diacritic("ni3"), "nǐ");
        assert_eq!(codec.to_diacritic("zho1ng"), "zhōng");
        assert_eq!(codec.to_diacritic("lv4"), "lǜ");
        // digit without a vowel in front stays literal
        assert_eq!(codec.to_diacritic("n3"), "n3");
        assert_eq!(codec.to_diacritic("a5"), "a5");
        assert_eq!(codec.to_diacritic("a"), "a");
    }

    #[test]
    fn test_no_backtracking() {
        let codec = ToneCodec::new();
        // "a1" is consumed first; the trailing "2" has no vowel before it
        assert_eq!(codec.to_diacritic("a12"), "ā2");
        assert_eq!(codec.to_diacritic("ia3"), "iǎ");
    }

    #[test]
    fn test_toned_round_trip() {
        let codec = ToneCodec::new();
        for syllable in ["zhōng", "guó", "nǚ", "ài", "xiǎng", "shuǐ", "ēn"] {
            let numeral = codec.to_numeral(syllable);
            assert_eq!(codec.to_diacritic(&numeral), syllable, "via {numeral}");
        }
    }

    #[test]
    fn test_toneless_umlaut_is_one_way() {
        let codec = ToneCodec::new();
        let numeral = codec.to_numeral("lüè");
        assert_eq!(numeral, "lve4");
        assert_eq!(codec.to_diacritic(&numeral), "lvè");
    }

    #[test]
    fn test_combine() {
        let codec = ToneCodec::new();
        assert_eq!(codec.combine('i', '3'), Some('ǐ'));
        assert_eq!(codec.combine('I', '3'), None);
        assert_eq!(codec.combine('v', '1'), Some('ǖ'));
        assert_eq!(codec.combine('n', '3'), None);
        assert_eq!(codec.combine('a', '0'), None);
        assert!(codec.is_tone_vowel('V'));
        assert!(!codec.is_tone_vowel('N'));
    }
}
