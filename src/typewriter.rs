// src/typewriter.rs
//
// Typewriter loop state machine.
//
// The session advances one step per `tick()` and reports the delay to
// wait before the next tick. The web layer renders `text()` after each
// tick and owns the actual timer handle.

/// Tick timing in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterConfig {
    /// Delay before the very first tick.
    pub start_ms: u32,

    /// Delay between typed characters.
    pub type_ms: u32,

    /// Delay between deleted characters.
    pub delete_ms: u32,

    /// Hold with the full phrase on screen.
    pub hold_full_ms: u32,

    /// Hold with an empty line before the next phrase.
    pub hold_empty_ms: u32,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            start_ms: 280,
            type_ms: 90,
            delete_ms: 45,
            hold_full_ms: 1500,
            hold_empty_ms: 480,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    HoldFull,
    Deleting,
    HoldEmpty,
}

/// One run of the typewriter loop.
///
/// Created on start, replaced wholesale on stop or preference change.
/// A full cycle of a phrase of N characters is exactly N typing ticks,
/// one hold tick, N deleting ticks, and one hold tick.
#[derive(Debug)]
pub struct TypewriterSession {
    phrases: Vec<String>,
    config: TypewriterConfig,
    phrase: usize,
    chars: usize,
    phase: Phase,
}

impl TypewriterSession {
    /// Returns `None` for an empty phrase list; there is nothing to
    /// animate.
    pub fn new(phrases: Vec<String>, config: TypewriterConfig) -> Option<Self> {
        if phrases.is_empty() || phrases.iter().all(|p| p.is_empty()) {
            return None;
        }
        Some(Self {
            phrases,
            config,
            phrase: 0,
            chars: 0,
            phase: Phase::Typing,
        })
    }

    fn current(&self) -> &str {
        &self.phrases[self.phrase]
    }

    fn current_len(&self) -> usize {
        self.current().chars().count()
    }

    /// Currently displayed text: the first `chars` characters of the
    /// current phrase.
    pub fn text(&self) -> String {
        self.current().chars().take(self.chars).collect()
    }

    /// Advance one step and return the delay until the next tick, in
    /// milliseconds.
    pub fn tick(&mut self) -> u32 {
        match self.phase {
            Phase::Typing => {
                self.chars = (self.chars + 1).min(self.current_len());
                if self.chars == self.current_len() {
                    self.phase = Phase::HoldFull;
                    self.config.hold_full_ms
                } else {
                    self.config.type_ms
                }
            }

            // Pause tick: the hold delay has elapsed, switch direction.
            Phase::HoldFull => {
                self.phase = Phase::Deleting;
                self.config.delete_ms
            }

            Phase::Deleting => {
                self.chars = self.chars.saturating_sub(1);
                if self.chars == 0 {
                    self.phase = Phase::HoldEmpty;
                    self.config.hold_empty_ms
                } else {
                    self.config.delete_ms
                }
            }

            // Pause tick: advance to the next phrase, wrapping.
            Phase::HoldEmpty => {
                self.phrase = (self.phrase + 1) % self.phrases.len();
                self.phase = Phase::Typing;
                self.config.type_ms
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(phrases: &[&str]) -> TypewriterSession {
        TypewriterSession::new(
            phrases.iter().map(|p| p.to_string()).collect(),
            TypewriterConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_phrase_list_is_rejected() {
        assert!(TypewriterSession::new(vec![], TypewriterConfig::default()).is_none());
        assert!(
            TypewriterSession::new(vec![String::new()], TypewriterConfig::default()).is_none()
        );
    }

    #[test]
    fn test_types_then_deletes_one_phrase() {
        let mut s = session(&["hey"]);
        let config = TypewriterConfig::default();

        // Three typing ticks; the last one schedules the full hold
        assert_eq!(s.tick(), config.type_ms);
        assert_eq!(s.text(), "h");
        assert_eq!(s.tick(), config.type_ms);
        assert_eq!(s.text(), "he");
        assert_eq!(s.tick(), config.hold_full_ms);
        assert_eq!(s.text(), "hey");

        // Pause tick, no character change
        assert_eq!(s.tick(), config.delete_ms);
        assert_eq!(s.text(), "hey");

        // Three deleting ticks; the last one schedules the empty hold
        assert_eq!(s.tick(), config.delete_ms);
        assert_eq!(s.text(), "he");
        assert_eq!(s.tick(), config.delete_ms);
        assert_eq!(s.text(), "h");
        assert_eq!(s.tick(), config.hold_empty_ms);
        assert_eq!(s.text(), "");

        // Pause tick wraps back to the same (only) phrase
        assert_eq!(s.tick(), config.type_ms);
        assert_eq!(s.text(), "");
    }

    #[test]
    fn test_full_cycle_is_2n_plus_2_ticks() {
        let phrase = "engineer";
        let n = phrase.chars().count();
        let mut s = session(&[phrase, "x"]);

        let mut ticks = 0;
        // Run until the next phrase starts typing
        loop {
            s.tick();
            ticks += 1;
            if s.phase == Phase::Typing && s.phrase == 1 {
                break;
            }
        }
        assert_eq!(ticks, 2 * n + 2);
    }

    #[test]
    fn test_cycles_phrases_in_order_and_wraps() {
        let mut s = session(&["ab", "cd", "ef"]);
        let mut seen = Vec::new();

        for _ in 0..3 {
            // Type to full
            while s.phase == Phase::Typing {
                s.tick();
            }
            seen.push(s.text());
            // Drain the rest of the cycle
            while s.phase != Phase::Typing {
                s.tick();
            }
        }
        assert_eq!(seen, vec!["ab", "cd", "ef"]);

        while s.phase == Phase::Typing {
            s.tick();
        }
        assert_eq!(s.text(), "ab");
    }

    #[test]
    fn test_multibyte_phrases_count_characters() {
        let mut s = session(&["héllo"]);
        for _ in 0..5 {
            s.tick();
        }
        assert_eq!(s.text(), "héllo");
        assert_eq!(s.phase, Phase::HoldFull);
    }
}
