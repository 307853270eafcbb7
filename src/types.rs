//! Core identifier and enumeration types for the learnpath engine.
//!
//! This module defines the fundamental types used throughout the engine for
//! identifying concepts, topics, and courses, plus the caller-supplied
//! enumerations that parameterize path generation. These are the core domain
//! concepts that define what a learning graph *is*.
//!
//! # Key Types
//!
//! - [`ConceptId`], [`TopicId`], [`CourseId`]: stable string identifiers for
//!   authored content
//! - [`SkillLevel`]: the caller's self-reported proficiency bucket
//! - [`TimeAvailability`]: the caller's self-reported weekly study budget
//!
//! # Examples
//!
//! ```rust
//! use learnpath::types::{ConceptId, SkillLevel, TimeAvailability};
//!
//! let id: ConceptId = "ownership-basics".into();
//! assert_eq!(id.as_str(), "ownership-basics");
//!
//! // Level distance drives course ranking
//! assert_eq!(SkillLevel::Beginner.distance(SkillLevel::Advanced), 2);
//!
//! // The weekly-hours table converts total effort into a duration
//! assert_eq!(TimeAvailability::Moderate.weekly_hours(), 7.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a learning concept.
///
/// Concept ids are authored externally and treated as opaque strings; the
/// engine never parses them. They key every adjacency structure and every
/// per-user progress record, so they derive `Hash` and `Ord` (the latter is
/// also the final tie-break key when two concepts are otherwise
/// indistinguishable).
///
/// # Examples
///
/// ```rust
/// use learnpath::types::ConceptId;
///
/// let a = ConceptId::new("variables");
/// let b: ConceptId = "variables".into();
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptId(String);

impl ConceptId {
    /// Creates a concept id from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the underlying string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ConceptId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ConceptId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Stable identifier for a topic (an ordered group of concepts in a course).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TopicId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Stable identifier for a course (the unit of enrollment).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CourseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Self-reported proficiency bucket supplied with a path request.
///
/// Courses carry a `SkillLevel` too; the planner ranks candidate courses by
/// the absolute distance between the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    /// Numeric rank used for distance computations (1 = beginner).
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            SkillLevel::Beginner => 1,
            SkillLevel::Intermediate => 2,
            SkillLevel::Advanced => 3,
            SkillLevel::Expert => 4,
        }
    }

    /// Absolute rank distance between two levels.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use learnpath::types::SkillLevel;
    ///
    /// assert_eq!(SkillLevel::Expert.distance(SkillLevel::Beginner), 3);
    /// assert_eq!(SkillLevel::Advanced.distance(SkillLevel::Advanced), 0);
    /// ```
    #[must_use]
    pub fn distance(self, other: SkillLevel) -> u8 {
        self.rank().abs_diff(other.rank())
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beginner => write!(f, "beginner"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Advanced => write!(f, "advanced"),
            Self::Expert => write!(f, "expert"),
        }
    }
}

/// Self-reported weekly study budget supplied with a path request.
///
/// The mapping from bucket to hours is a fixed table; it feeds the
/// `ceil(total_hours / weekly_hours)` duration estimate on study plans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeAvailability {
    /// A couple of evenings a month.
    Minimal,
    /// Around one hour on most days.
    Moderate,
    /// A steady couple of hours a day.
    Substantial,
    /// Full-time study.
    Intensive,
}

impl TimeAvailability {
    /// Fixed weekly-hours table keyed by bucket.
    #[must_use]
    pub fn weekly_hours(self) -> f32 {
        match self {
            TimeAvailability::Minimal => 3.0,
            TimeAvailability::Moderate => 7.0,
            TimeAvailability::Substantial => 14.0,
            TimeAvailability::Intensive => 25.0,
        }
    }
}

impl fmt::Display for TimeAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimal => write!(f, "minimal"),
            Self::Moderate => write!(f, "moderate"),
            Self::Substantial => write!(f, "substantial"),
            Self::Intensive => write!(f, "intensive"),
        }
    }
}
