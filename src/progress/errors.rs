use miette::Diagnostic;
use thiserror::Error;

use crate::types::{ConceptId, CourseId};

/// Errors surfaced while applying progress events or persisting documents.
#[derive(Debug, Error, Diagnostic)]
pub enum ProgressError {
    /// The event references a concept that is not in the graph.
    #[error("unknown concept: {id}")]
    #[diagnostic(code(learnpath::progress::unknown_concept))]
    UnknownConcept { id: ConceptId },

    /// The referenced course is not in the catalog.
    #[error("unknown course: {id}")]
    #[diagnostic(code(learnpath::progress::unknown_course))]
    UnknownCourse { id: CourseId },

    /// The event references a concept outside the course it was sent for.
    #[error("concept {concept} is not part of course {course}")]
    #[diagnostic(
        code(learnpath::progress::concept_not_in_course),
        help("Progress documents are scoped per course; send the event for the owning course.")
    )]
    ConceptNotInCourse {
        concept: ConceptId,
        course: CourseId,
    },

    /// The event is not valid in the concept's current state.
    #[error("invalid transition for concept {concept}: {reason}")]
    #[diagnostic(
        code(learnpath::progress::invalid_transition),
        help("Complete the required sub-activities before submitting this event.")
    )]
    InvalidTransition {
        concept: ConceptId,
        reason: &'static str,
    },

    /// JSON (de)serialization of a persisted document failed.
    #[error("JSON serialization/deserialization failed: {source}")]
    #[diagnostic(
        code(learnpath::progress::serde),
        help("Ensure the JSON structure matches the persisted document shape.")
    )]
    Serde {
        #[source]
        source: serde_json::Error,
    },

    /// A progress write collided with a concurrent update to the same
    /// document.
    #[error("progress document version conflict: expected {expected}, found {actual}")]
    #[diagnostic(
        code(learnpath::progress::concurrency_conflict),
        help("Reload the document and re-apply the update on the fresh version.")
    )]
    ConcurrencyConflict { expected: u64, actual: u64 },
}
