//! Engine configuration.
//!
//! Thresholds are captured once in an [`EngineConfig`] at the boundary so
//! the path and progress cores stay pure; nothing inside them reads the
//! environment.

use crate::concept::DEFAULT_QUIZ_PASSING_SCORE;

/// Mastery score a prerequisite must reach before its dependents unlock.
pub const DEFAULT_MASTERY_THRESHOLD: u8 = 75;

/// Tunable thresholds shared by the unlock gate and the planner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Minimum prerequisite mastery (0–100) required to unlock a dependent.
    pub mastery_threshold: u8,
    /// Passing score applied to quizzes whose concept does not override it.
    pub default_quiz_passing_score: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mastery_threshold: DEFAULT_MASTERY_THRESHOLD,
            default_quiz_passing_score: DEFAULT_QUIZ_PASSING_SCORE,
        }
    }
}

impl EngineConfig {
    /// Resolves configuration from the environment, falling back to defaults.
    ///
    /// Reads `LEARNPATH_MASTERY_THRESHOLD` (0–100). A `.env` file is honored
    /// when present. Unparsable values are logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut config = Self::default();
        if let Ok(raw) = std::env::var("LEARNPATH_MASTERY_THRESHOLD") {
            match raw.parse::<u8>() {
                Ok(v) if v <= 100 => config.mastery_threshold = v,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        "ignoring LEARNPATH_MASTERY_THRESHOLD: expected an integer in 0..=100"
                    );
                }
            }
        }
        config
    }

    #[must_use]
    pub fn with_mastery_threshold(mut self, threshold: u8) -> Self {
        self.mastery_threshold = threshold.min(100);
        self
    }
}
