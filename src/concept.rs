//! The [`Concept`] type: the smallest unit of learnable material.
//!
//! Concepts are authored externally and are immutable for the duration of a
//! computation. Each carries a bounded complexity score, an estimated
//! learning time, and the list of concepts that must be mastered before it
//! unlocks.
//!
//! # Examples
//!
//! ```rust
//! use learnpath::concept::Concept;
//!
//! let c = Concept::new("borrowing", "Borrowing & References", 3, 2.5)
//!     .with_prerequisites(["ownership"])
//!     .fundamental();
//!
//! assert_eq!(c.complexity, 3);
//! assert!(c.is_fundamental);
//! assert_eq!(c.prerequisites.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::types::ConceptId;

/// Bounds for the authored complexity scale.
pub const COMPLEXITY_MIN: u8 = 1;
pub const COMPLEXITY_MAX: u8 = 5;

/// Default quiz passing score applied when authors do not override it.
pub const DEFAULT_QUIZ_PASSING_SCORE: u8 = 70;

/// The smallest unit of learnable material.
///
/// A concept's prerequisites reference other concepts by id; the prerequisite
/// relation across a whole catalog must form a DAG, which
/// [`ConceptGraphBuilder::compile`](crate::graph::ConceptGraphBuilder::compile)
/// enforces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    /// Stable identifier, unique within a catalog.
    pub id: ConceptId,
    /// Human-readable title; the final tie-break key during path ranking.
    pub title: String,
    /// Authored difficulty on a bounded 1–5 scale.
    pub complexity: u8,
    /// Estimated learning time in hours.
    pub estimated_hours: f32,
    /// Concepts that must be mastered before this one unlocks.
    #[serde(default)]
    pub prerequisites: Vec<ConceptId>,
    /// Marks entry-point material with no conceptual dependencies of note.
    #[serde(default)]
    pub is_fundamental: bool,
    /// Score required to pass this concept's quiz (0–100).
    #[serde(default = "default_passing_score")]
    pub quiz_passing_score: u8,
}

fn default_passing_score() -> u8 {
    DEFAULT_QUIZ_PASSING_SCORE
}

impl Concept {
    /// Creates a concept with no prerequisites.
    ///
    /// Complexity is clamped into the authored 1–5 scale rather than
    /// rejected; malformed authored data should degrade, not abort a whole
    /// catalog load.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use learnpath::concept::Concept;
    ///
    /// let c = Concept::new("intro", "Introduction", 9, 1.0);
    /// assert_eq!(c.complexity, 5); // clamped
    /// ```
    #[must_use]
    pub fn new(
        id: impl Into<ConceptId>,
        title: impl Into<String>,
        complexity: u8,
        estimated_hours: f32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            complexity: complexity.clamp(COMPLEXITY_MIN, COMPLEXITY_MAX),
            estimated_hours,
            prerequisites: Vec::new(),
            is_fundamental: false,
            quiz_passing_score: DEFAULT_QUIZ_PASSING_SCORE,
        }
    }

    /// Replaces the prerequisite list, deduplicating while preserving the
    /// authored order.
    #[must_use]
    pub fn with_prerequisites<I, T>(mut self, prereqs: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ConceptId>,
    {
        self.prerequisites.clear();
        for p in prereqs {
            let p = p.into();
            if !self.prerequisites.contains(&p) {
                self.prerequisites.push(p);
            }
        }
        self
    }

    /// Marks this concept as fundamental (entry-point material).
    #[must_use]
    pub fn fundamental(mut self) -> Self {
        self.is_fundamental = true;
        self
    }

    /// Overrides the quiz passing score (clamped to 100).
    #[must_use]
    pub fn with_passing_score(mut self, score: u8) -> Self {
        self.quiz_passing_score = score.min(100);
        self
    }

    /// Returns `true` if this concept has no prerequisites.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.prerequisites.is_empty()
    }
}
