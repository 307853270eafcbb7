//! Event-sourced progress updates.
//!
//! Each progress action is an immutable [`ProgressEvent`]; the current
//! document state is a pure reduction over the event log. Reduction is
//! idempotent: an event already folded into a document (tracked by id) is
//! skipped, so at-least-once delivery and full-log replay both converge on
//! the same state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::ProgressError;
use super::record::CourseProgress;
use super::rollup::recompute_rollup;
use crate::config::EngineConfig;
use crate::course::Course;
use crate::graph::ConceptGraph;
use crate::types::ConceptId;

/// What happened, in wire-compatible form.
///
/// Serializes with an `action` tag matching the external progress-update
/// request shape (`mark_description_read`, `mark_video_watched`,
/// `quiz_submit`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ProgressEventKind {
    MarkDescriptionRead,
    MarkVideoWatched,
    QuizSubmit { score: u8 },
}

/// An immutable progress action against one concept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    /// Unique event id; the reduction's idempotency key.
    pub id: Uuid,
    pub concept_id: ConceptId,
    pub occurred_at: DateTime<Utc>,
    /// Optional study time to attribute to the concept.
    #[serde(default)]
    pub seconds_spent: u64,
    #[serde(flatten)]
    pub kind: ProgressEventKind,
}

impl ProgressEvent {
    fn new(concept_id: impl Into<ConceptId>, kind: ProgressEventKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            concept_id: concept_id.into(),
            occurred_at: Utc::now(),
            seconds_spent: 0,
            kind,
        }
    }

    /// The user read the concept's description.
    #[must_use]
    pub fn description_read(concept_id: impl Into<ConceptId>) -> Self {
        Self::new(concept_id, ProgressEventKind::MarkDescriptionRead)
    }

    /// The user watched the concept's video.
    #[must_use]
    pub fn video_watched(concept_id: impl Into<ConceptId>) -> Self {
        Self::new(concept_id, ProgressEventKind::MarkVideoWatched)
    }

    /// The user submitted the concept's quiz with the given score (0–100).
    #[must_use]
    pub fn quiz_submitted(concept_id: impl Into<ConceptId>, score: u8) -> Self {
        Self::new(
            concept_id,
            ProgressEventKind::QuizSubmit {
                score: score.min(100),
            },
        )
    }

    /// Attributes study time to the event.
    #[must_use]
    pub fn with_seconds_spent(mut self, seconds: u64) -> Self {
        self.seconds_spent = seconds;
        self
    }
}

/// Folds one event into a progress document and recomputes the roll-up.
///
/// Returns `Ok(false)` when the event was already applied (idempotent
/// replay); the document is untouched in that case.
///
/// # Errors
///
/// - [`ProgressError::UnknownConcept`] if the concept is not in the graph
/// - [`ProgressError::ConceptNotInCourse`] if it is not part of the
///   document's course
/// - [`ProgressError::InvalidTransition`] for a quiz submission before both
///   the description was read and the video watched
pub fn apply_event(
    doc: &mut CourseProgress,
    event: &ProgressEvent,
    course: &Course,
    graph: &ConceptGraph,
    config: &EngineConfig,
) -> Result<bool, ProgressError> {
    if doc.applied_events.contains(&event.id) {
        tracing::debug!(event = %event.id, "skipping already-applied event");
        return Ok(false);
    }

    let concept = graph
        .concept(&event.concept_id)
        .map_err(|_| ProgressError::UnknownConcept {
            id: event.concept_id.clone(),
        })?;
    if !course.concept_ids().any(|c| c == &event.concept_id) {
        return Err(ProgressError::ConceptNotInCourse {
            concept: event.concept_id.clone(),
            course: doc.course_id.clone(),
        });
    }

    // Validate before mutating: a rejected event must leave the document
    // untouched and stay re-submittable once the prerequisites are met.
    if let ProgressEventKind::QuizSubmit { .. } = event.kind {
        let record = doc.concepts.record(&event.concept_id);
        let description_read = record.is_some_and(|r| r.description_read);
        let video_watched = record.is_some_and(|r| r.video_watched);
        if !description_read || !video_watched {
            return Err(ProgressError::InvalidTransition {
                concept: event.concept_id.clone(),
                reason: "quiz submitted before description was read and video watched",
            });
        }
    }

    let passing_score = if concept.quiz_passing_score > 0 {
        concept.quiz_passing_score
    } else {
        config.default_quiz_passing_score
    };

    let record = doc.concepts.record_mut(&event.concept_id);
    match event.kind {
        ProgressEventKind::MarkDescriptionRead => record.description_read = true,
        ProgressEventKind::MarkVideoWatched => record.video_watched = true,
        ProgressEventKind::QuizSubmit { score } => {
            record.attempts += 1;
            record.mastery_score = record.mastery_score.max(score);
            if score >= passing_score {
                record.quiz_passed = true;
            }
        }
    }
    record.seconds_spent += event.seconds_spent;
    record.last_activity_at = Some(match record.last_activity_at {
        Some(prev) => prev.max(event.occurred_at),
        None => event.occurred_at,
    });
    record.refresh_status();

    doc.applied_events.insert(event.id);
    doc.updated_at = Some(match doc.updated_at {
        Some(prev) => prev.max(event.occurred_at),
        None => event.occurred_at,
    });
    recompute_rollup(doc, course);
    Ok(true)
}

/// Reduces a whole event log into a document, in order.
///
/// Stops at the first invalid event; everything applied before it remains
/// applied (each event is an independent action, not part of a batch
/// transaction).
pub fn reduce(
    doc: &mut CourseProgress,
    events: &[ProgressEvent],
    course: &Course,
    graph: &ConceptGraph,
    config: &EngineConfig,
) -> Result<usize, ProgressError> {
    let mut applied = 0;
    for event in events {
        if apply_event(doc, event, course, graph, config)? {
            applied += 1;
        }
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concept::Concept;
    use crate::course::Topic;
    use crate::graph::ConceptGraphBuilder;
    use crate::types::SkillLevel;

    fn fixture() -> (ConceptGraph, Course, EngineConfig) {
        let graph = ConceptGraphBuilder::new()
            .add_concept(Concept::new("a", "A", 1, 1.0).with_passing_score(60))
            .compile()
            .unwrap();
        let course = Course::new("course-1", "Course", SkillLevel::Beginner)
            .with_topic(Topic::new("t", "T").with_concepts(["a"]));
        (graph, course, EngineConfig::default())
    }

    #[test]
    fn test_quiz_before_other_activities_is_invalid() {
        let (graph, course, config) = fixture();
        let mut doc = CourseProgress::new("u", "course-1");
        let err = apply_event(
            &mut doc,
            &ProgressEvent::quiz_submitted("a", 90),
            &course,
            &graph,
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, ProgressError::InvalidTransition { .. }));
        // The rejected event left no trace and stays re-submittable.
        assert!(doc.applied_events.is_empty());
        assert!(doc.concepts.record(&"a".into()).is_none());
    }

    #[test]
    fn test_event_replay_is_idempotent() {
        let (graph, course, config) = fixture();
        let mut doc = CourseProgress::new("u", "course-1");
        let event = ProgressEvent::description_read("a").with_seconds_spent(120);

        assert!(apply_event(&mut doc, &event, &course, &graph, &config).unwrap());
        assert!(!apply_event(&mut doc, &event, &course, &graph, &config).unwrap());

        let record = doc.concepts.record(&"a".into()).unwrap();
        assert_eq!(record.seconds_spent, 120); // not double-counted
    }

    #[test]
    fn test_quiz_keeps_best_score_and_counts_attempts() {
        let (graph, course, config) = fixture();
        let mut doc = CourseProgress::new("u", "course-1");
        reduce(
            &mut doc,
            &[
                ProgressEvent::description_read("a"),
                ProgressEvent::video_watched("a"),
                ProgressEvent::quiz_submitted("a", 40),
                ProgressEvent::quiz_submitted("a", 85),
                ProgressEvent::quiz_submitted("a", 55),
            ],
            &course,
            &graph,
            &config,
        )
        .unwrap();

        let record = doc.concepts.record(&"a".into()).unwrap();
        assert_eq!(record.attempts, 3);
        assert_eq!(record.mastery_score, 85);
        assert!(record.quiz_passed); // passed at 85, a later 55 cannot unpass
        assert!(record.is_completed());
    }

    #[test]
    fn test_failing_quiz_does_not_pass() {
        let (graph, course, config) = fixture();
        let mut doc = CourseProgress::new("u", "course-1");
        reduce(
            &mut doc,
            &[
                ProgressEvent::description_read("a"),
                ProgressEvent::video_watched("a"),
                ProgressEvent::quiz_submitted("a", 59),
            ],
            &course,
            &graph,
            &config,
        )
        .unwrap();
        let record = doc.concepts.record(&"a".into()).unwrap();
        assert!(!record.quiz_passed);
        assert_eq!(record.mastery_score, 59);
    }

    #[test]
    fn test_unknown_concept_rejected() {
        let (graph, course, config) = fixture();
        let mut doc = CourseProgress::new("u", "course-1");
        let err = apply_event(
            &mut doc,
            &ProgressEvent::description_read("ghost"),
            &course,
            &graph,
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, ProgressError::UnknownConcept { .. }));
    }

    #[test]
    fn test_concept_outside_course_rejected() {
        let graph = ConceptGraphBuilder::new()
            .add_concept(Concept::new("a", "A", 1, 1.0))
            .add_concept(Concept::new("other", "Other", 1, 1.0))
            .compile()
            .unwrap();
        let course = Course::new("course-1", "Course", SkillLevel::Beginner)
            .with_topic(Topic::new("t", "T").with_concepts(["a"]));
        let mut doc = CourseProgress::new("u", "course-1");
        let err = apply_event(
            &mut doc,
            &ProgressEvent::description_read("other"),
            &course,
            &graph,
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ProgressError::ConceptNotInCourse { .. }));
    }

    #[test]
    /// Reducing the same full log twice converges on the same document.
    fn test_full_log_replay_converges() {
        let (graph, course, config) = fixture();
        let log = vec![
            ProgressEvent::description_read("a"),
            ProgressEvent::video_watched("a"),
            ProgressEvent::quiz_submitted("a", 80),
        ];

        let mut once = CourseProgress::new("u", "course-1");
        reduce(&mut once, &log, &course, &graph, &config).unwrap();

        let mut twice = once.clone();
        let replayed = reduce(&mut twice, &log, &course, &graph, &config).unwrap();
        assert_eq!(replayed, 0);
        assert_eq!(once, twice);
    }
}
