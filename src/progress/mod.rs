//! Per-user progress: records, event-sourced updates, the unlock gate, and
//! bottom-up aggregation.
//!
//! # Model
//!
//! - [`ConceptProgress`]: one user's interaction record for one concept:
//!   sub-activity flags (description read, video watched, quiz passed),
//!   mastery score, attempts, time spent. Created at first interaction,
//!   never deleted.
//! - [`ProgressSnapshot`]: the per-user map of concept records the gate
//!   evaluates against.
//! - [`CourseProgress`]: the per-(user, course) document: a snapshot plus
//!   derived aggregates (`overall_progress`, status, set-once timestamps)
//!   and an optimistic-concurrency version.
//! - [`ProgressEvent`]: an immutable progress action. Current state is a
//!   pure reduction over the event log; replaying a log (or re-delivering an
//!   event) is idempotent because events are deduplicated by id.
//! - [`ProgressGate`]: the pure state machine mapping (graph, snapshot) to
//!   per-concept [`GateState`] values and the sequential-concepts view.
//!
//! # Unlock rule
//!
//! A concept is unlocked iff every prerequisite's mastery score meets the
//! configured threshold, or it has no prerequisites. Completion requires all
//! three sub-activities; any strict subset leaves the concept in progress.
//!
//! # Examples
//!
//! ```rust
//! use learnpath::concept::Concept;
//! use learnpath::config::EngineConfig;
//! use learnpath::graph::ConceptGraphBuilder;
//! use learnpath::progress::{GateState, ProgressGate, ProgressSnapshot};
//!
//! let graph = ConceptGraphBuilder::new()
//!     .add_concept(Concept::new("a", "A", 1, 1.0))
//!     .add_concept(Concept::new("b", "B", 2, 1.0).with_prerequisites(["a"]))
//!     .compile()
//!     .unwrap();
//!
//! let mut snapshot = ProgressSnapshot::default();
//! snapshot.record_mut(&"a".into()).mastery_score = 80;
//!
//! let gate = ProgressGate::new(&graph, EngineConfig::default());
//! assert!(gate.is_unlocked(&snapshot, &"b".into()));
//! assert_eq!(gate.state_of(&snapshot, &"b".into()), GateState::Unlocked);
//! ```

mod errors;
mod events;
mod gate;
mod record;
mod rollup;

pub use errors::ProgressError;
pub use events::{ProgressEvent, ProgressEventKind, apply_event, reduce};
pub use gate::{GateState, ProgressGate, SequentialConcept};
pub use record::{
    ActivityKind, ConceptProgress, ConceptStatus, CourseProgress, CourseStatus, ProgressSnapshot,
};
pub use rollup::{course_overall_progress, recompute_rollup, topic_progress};
