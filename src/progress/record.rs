//! Per-user progress records and the per-course progress document.

use chrono::{DateTime, Utc};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{ConceptId, CourseId};

/// Stored lifecycle of one user's interaction with one concept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConceptStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// The three sub-activities a concept requires for completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    DescriptionRead,
    VideoWatched,
    QuizPassed,
}

impl ActivityKind {
    /// Every activity, in the order completion is usually reached.
    pub const ALL: [ActivityKind; 3] = [
        ActivityKind::DescriptionRead,
        ActivityKind::VideoWatched,
        ActivityKind::QuizPassed,
    ];
}

/// One user's progress on one concept.
///
/// Created at the first interaction and only ever updated afterwards;
/// status transitions are derived from the activity flags, never set
/// directly by callers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptProgress {
    pub status: ConceptStatus,
    /// 0–100 mastery metric; quiz submissions keep the best score.
    pub mastery_score: u8,
    pub seconds_spent: u64,
    /// Quiz attempts, passed or not.
    pub attempts: u32,
    pub description_read: bool,
    pub video_watched: bool,
    pub quiz_passed: bool,
    #[serde(default)]
    pub last_activity_at: Option<DateTime<Utc>>,
}

impl ConceptProgress {
    /// Number of satisfied sub-activities (0–3).
    #[must_use]
    pub fn activities_done(&self) -> usize {
        usize::from(self.description_read)
            + usize::from(self.video_watched)
            + usize::from(self.quiz_passed)
    }

    /// Whether a given sub-activity is satisfied.
    #[must_use]
    pub fn activity_done(&self, kind: ActivityKind) -> bool {
        match kind {
            ActivityKind::DescriptionRead => self.description_read,
            ActivityKind::VideoWatched => self.video_watched,
            ActivityKind::QuizPassed => self.quiz_passed,
        }
    }

    /// Per-concept progress percentage, derived from the status lifecycle:
    /// not started → 0, in progress → 50, completed → 100. This is the
    /// figure course-level aggregation averages.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        if self.is_completed() {
            100.0
        } else if self.activities_done() > 0 || self.attempts > 0 || self.seconds_spent > 0 {
            50.0
        } else {
            0.0
        }
    }

    /// True once all three sub-activities are satisfied.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.description_read && self.video_watched && self.quiz_passed
    }

    /// Re-derives `status` from the activity evidence.
    pub(super) fn refresh_status(&mut self) {
        self.status = if self.is_completed() {
            ConceptStatus::Completed
        } else if self.activities_done() > 0 || self.attempts > 0 || self.seconds_spent > 0 {
            ConceptStatus::InProgress
        } else {
            ConceptStatus::NotStarted
        };
    }
}

/// A user's per-concept progress map: the one mutable input to the gate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressSnapshot {
    records: FxHashMap<ConceptId, ConceptProgress>,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for a concept, if the user has interacted with it.
    #[must_use]
    pub fn record(&self, id: &ConceptId) -> Option<&ConceptProgress> {
        self.records.get(id)
    }

    /// The record for a concept, created empty at first access.
    pub fn record_mut(&mut self, id: &ConceptId) -> &mut ConceptProgress {
        self.records.entry(id.clone()).or_default()
    }

    /// Mastery score for a concept; untouched concepts score 0.
    #[must_use]
    pub fn mastery_score(&self, id: &ConceptId) -> u8 {
        self.records.get(id).map_or(0, |r| r.mastery_score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConceptId, &ConceptProgress)> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Aggregated lifecycle of one user's enrollment in one course.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// The per-(user, course) progress document.
///
/// Everything above the concept records is derived: `overall_progress`,
/// `status`, and the timestamps are recomputed whenever a contained
/// concept's progress changes, never mutated independently. The `version`
/// field supports optimistic concurrency at the persistence boundary, and
/// `applied_events` makes event replay idempotent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub user_id: String,
    pub course_id: CourseId,
    /// Optimistic-concurrency version; bumped by the store on every save.
    #[serde(default)]
    pub version: u64,
    /// Arithmetic mean of per-concept progress percentages (0–100).
    #[serde(default)]
    pub overall_progress: f64,
    #[serde(default)]
    pub status: CourseStatus,
    /// Set once, on the first transition away from 0% progress.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// Set once, when progress first reaches 100%.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub concepts: ProgressSnapshot,
    /// Ids of events already folded into this document.
    #[serde(default)]
    pub applied_events: FxHashSet<Uuid>,
}

impl CourseProgress {
    /// Creates an empty document for a (user, course) pair.
    #[must_use]
    pub fn new(user_id: impl Into<String>, course_id: impl Into<CourseId>) -> Self {
        Self {
            user_id: user_id.into(),
            course_id: course_id.into(),
            version: 0,
            overall_progress: 0.0,
            status: CourseStatus::NotStarted,
            started_at: None,
            completed_at: None,
            updated_at: None,
            concepts: ProgressSnapshot::new(),
            applied_events: FxHashSet::default(),
        }
    }
}
