//! Courses and topics: the enrollment-facing grouping of concepts.
//!
//! A [`Topic`] is an ordered sequence of concept ids inside one course; a
//! [`Course`] is an ordered sequence of topics plus the metadata the planner
//! ranks on (level, rating, category, tags). Neither stores progress;
//! aggregated mastery lives in per-user progress documents and is always
//! derived from the concepts.

use serde::{Deserialize, Serialize};

use crate::graph::ConceptGraph;
use crate::types::{ConceptId, CourseId, SkillLevel, TopicId};

/// An ordered group of concepts within one course.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    /// Concept ids in authored presentation order.
    pub concepts: Vec<ConceptId>,
}

impl Topic {
    #[must_use]
    pub fn new(id: impl Into<TopicId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            concepts: Vec::new(),
        }
    }

    /// Appends concepts in authored order, skipping duplicates.
    #[must_use]
    pub fn with_concepts<I, T>(mut self, concepts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ConceptId>,
    {
        for c in concepts {
            let c = c.into();
            if !self.concepts.contains(&c) {
                self.concepts.push(c);
            }
        }
        self
    }
}

/// An ordered group of topics; the unit of enrollment.
///
/// # Examples
///
/// ```rust
/// use learnpath::course::{Course, Topic};
/// use learnpath::types::SkillLevel;
///
/// let course = Course::new("rust-101", "Rust Fundamentals", SkillLevel::Beginner)
///     .with_category("programming")
///     .with_tags(["rust", "systems"])
///     .with_rating(4.6)
///     .with_topic(Topic::new("t1", "Basics").with_concepts(["variables", "functions"]));
///
/// assert_eq!(course.concept_ids().count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Target proficiency level; ranked against the caller's level.
    pub level: SkillLevel,
    /// Average learner rating (0.0–5.0), the planner's secondary rank key.
    #[serde(default)]
    pub rating: f32,
    /// Topics in authored presentation order.
    #[serde(default)]
    pub topics: Vec<Topic>,
}

impl Course {
    #[must_use]
    pub fn new(id: impl Into<CourseId>, title: impl Into<String>, level: SkillLevel) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: String::new(),
            tags: Vec::new(),
            level,
            rating: 0.0,
            topics: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = rating.clamp(0.0, 5.0);
        self
    }

    #[must_use]
    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topics.push(topic);
        self
    }

    /// All concept ids across topics, in authored order.
    pub fn concept_ids(&self) -> impl Iterator<Item = &ConceptId> {
        self.topics.iter().flat_map(|t| t.concepts.iter())
    }

    /// Total estimated hours across every concept the course contains.
    ///
    /// Concepts missing from the graph contribute nothing; catalog/graph
    /// consistency is checked where the course is registered, not here.
    #[must_use]
    pub fn total_hours(&self, graph: &ConceptGraph) -> f32 {
        self.concept_ids()
            .filter_map(|id| graph.concept(id).ok())
            .map(|c| c.estimated_hours)
            .sum()
    }

    /// Case-insensitive keyword match over title, category, and tags.
    #[must_use]
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        self.title.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

/// Insertion-ordered collection of courses.
///
/// Iteration order is the registration order, so rankings that fall back to
/// "catalog order" stay reproducible across runs.
#[derive(Clone, Debug, Default)]
pub struct CourseCatalog {
    courses: rustc_hash::FxHashMap<CourseId, Course>,
    order: Vec<CourseId>,
}

impl CourseCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a course. Re-registering an id replaces the course but
    /// keeps its original position.
    #[must_use]
    pub fn with_course(mut self, course: Course) -> Self {
        if !self.courses.contains_key(&course.id) {
            self.order.push(course.id.clone());
        }
        self.courses.insert(course.id.clone(), course);
        self
    }

    #[must_use]
    pub fn get(&self, id: &CourseId) -> Option<&Course> {
        self.courses.get(id)
    }

    /// Courses in registration order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.order.iter().filter_map(|id| self.courses.get(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
