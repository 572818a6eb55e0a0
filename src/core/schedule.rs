// File: src/core/schedule.rs
use crate::config::TimingConfig;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Dot,
    Dash,
}

/// One keyed tone, relative to the start of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub element: Element,
    pub start: Duration,
    pub duration: Duration,
}

/// When the key goes down and for how long, for a whole Morse message.
/// Produces no audio; a sound backend plays these events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyingSchedule {
    pub tones: Vec<Tone>,
    pub total: Duration,
}

impl KeyingSchedule {
    /// Every dot or dash is followed by one element gap; every space adds a
    /// letter gap. Separators and line breaks add nothing on their own, the
    /// spaces around ` / ` already make the word gap.
    pub fn plan(morse: &str, timing: &TimingConfig) -> Self {
        let mut tones = Vec::new();
        let mut clock = Duration::ZERO;

        for c in morse.chars() {
            let (element, duration) = match c {
                '.' => (Element::Dot, timing.dot()),
                '-' => (Element::Dash, timing.dash()),
                ' ' => {
                    clock += timing.letter_gap();
                    continue;
                }
                _ => continue,
            };
            tones.push(Tone { element, start: clock, duration });
            clock += duration + timing.element_gap();
        }

        Self { tones, total: clock }
    }

    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_single_letter() {
        let schedule = KeyingSchedule::plan(".-", &TimingConfig::default());
        assert_eq!(
            schedule.tones,
            vec![
                Tone { element: Element::Dot, start: ms(0), duration: ms(100) },
                Tone { element: Element::Dash, start: ms(200), duration: ms(300) },
            ]
        );
        assert_eq!(schedule.total, ms(600));
    }

    #[test]
    fn test_gaps() {
        let timing = TimingConfig { dot_ms: 50 };
        // dot + gap, letter gap, dot + gap
        assert_eq!(KeyingSchedule::plan(". .", &timing).total, ms(50 + 50 + 150 + 50 + 50));
        // two spaces around the separator
        let word = KeyingSchedule::plan(". / .", &timing);
        assert_eq!(word.total, ms(100 + 300 + 100));
        assert_eq!(word.tones[1].start, ms(400));
    }

    #[test]
    fn test_empty() {
        let schedule = KeyingSchedule::plan("", &TimingConfig::default());
        assert!(schedule.is_empty());
        assert_eq!(schedule.total, Duration::ZERO);
        assert!(KeyingSchedule::plan("/\n", &TimingConfig::default()).is_empty());
    }
}
