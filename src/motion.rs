// src/motion.rs

/// The user's animation preference, derived from the host accessibility
/// setting.
///
/// This is a process-wide signal: every controller reads it at
/// initialization and reacts when it changes. It carries no other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPreference {
    /// No stated preference; animations run normally.
    #[default]
    NoPreference,

    /// The user asked for minimal animation. Controllers must force
    /// static end-states and must not schedule timer or frame work.
    Reduce,
}

impl MotionPreference {
    /// Build from a raw media-query match flag.
    pub fn from_matches(matches: bool) -> Self {
        if matches {
            MotionPreference::Reduce
        } else {
            MotionPreference::NoPreference
        }
    }

    #[inline]
    pub fn is_reduced(self) -> bool {
        self == MotionPreference::Reduce
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_matches() {
        assert!(MotionPreference::from_matches(true).is_reduced());
        assert!(!MotionPreference::from_matches(false).is_reduced());
        assert_eq!(MotionPreference::default(), MotionPreference::NoPreference);
    }
}
