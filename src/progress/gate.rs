//! The mastery-gated unlock state machine.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::ProgressSnapshot;
use crate::config::EngineConfig;
use crate::course::Course;
use crate::graph::ConceptGraph;
use crate::path::{PathError, PathGenerator, TieBreak};
use crate::types::ConceptId;

/// Gate-derived state of a concept for one user.
///
/// Unlike [`ConceptStatus`](super::ConceptStatus) (which records the user's
/// own activity), the gate state also folds in prerequisite mastery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    /// At least one prerequisite is below the mastery threshold.
    Locked,
    /// Accessible, no activity yet.
    Unlocked,
    /// Accessible, some sub-activities satisfied.
    InProgress,
    /// All three sub-activities satisfied.
    Completed,
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locked => write!(f, "locked"),
            Self::Unlocked => write!(f, "unlocked"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// One element of the sequential-concepts view: the course's concepts in
/// topological order, each annotated against the live progress snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequentialConcept {
    pub concept_id: ConceptId,
    pub title: String,
    pub is_unlocked: bool,
    pub state: GateState,
}

/// Pure state machine mapping a user's progress snapshot plus the graph
/// onto lock/unlock/status values.
///
/// The gate borrows an immutable graph and copies its thresholds out of the
/// configuration up front; evaluation never touches anything but its two
/// inputs, so results are reproducible and safe to compute concurrently.
pub struct ProgressGate<'g> {
    graph: &'g ConceptGraph,
    config: EngineConfig,
}

impl<'g> ProgressGate<'g> {
    #[must_use]
    pub fn new(graph: &'g ConceptGraph, config: EngineConfig) -> Self {
        Self { graph, config }
    }

    /// The unlock invariant: `true` iff every prerequisite's mastery score
    /// meets the threshold (vacuously true for concepts without
    /// prerequisites). Unknown ids are locked.
    #[must_use]
    pub fn is_unlocked(&self, snapshot: &ProgressSnapshot, id: &ConceptId) -> bool {
        if !self.graph.contains(id) {
            return false;
        }
        self.graph
            .prerequisites_of(id)
            .iter()
            .all(|prereq| snapshot.mastery_score(prereq) >= self.config.mastery_threshold)
    }

    /// Full gate state for a concept.
    ///
    /// Completion reflects the user's own recorded activity and takes
    /// precedence; the lock only gates concepts the user has not finished.
    #[must_use]
    pub fn state_of(&self, snapshot: &ProgressSnapshot, id: &ConceptId) -> GateState {
        let record = snapshot.record(id);
        if record.is_some_and(|r| r.is_completed()) {
            return GateState::Completed;
        }
        if !self.is_unlocked(snapshot, id) {
            return GateState::Locked;
        }
        if record.is_some_and(|r| r.activities_done() > 0 || r.attempts > 0 || r.seconds_spent > 0)
        {
            GateState::InProgress
        } else {
            GateState::Unlocked
        }
    }

    /// Lock flag used to annotate generated path elements.
    #[must_use]
    pub fn is_locked(&self, snapshot: &ProgressSnapshot, id: &ConceptId) -> bool {
        !self.is_unlocked(snapshot, id)
    }

    /// The sequential-concepts view for a course: every concept across its
    /// topics in canonical topological order, annotated with unlock state.
    ///
    /// The underlying data model supports random access; this view is what
    /// lets a UI present one unlockable concept at a time.
    ///
    /// # Errors
    ///
    /// [`PathError::ConceptNotFound`] if the course references a concept
    /// missing from the graph.
    pub fn sequential_concepts(
        &self,
        course: &Course,
        snapshot: &ProgressSnapshot,
    ) -> Result<Vec<SequentialConcept>, PathError> {
        let goals: Vec<ConceptId> = course.concept_ids().cloned().collect();
        if goals.is_empty() {
            return Ok(Vec::new());
        }

        let ordering = PathGenerator::new(self.graph).order_toward(&goals, TieBreak::Canonical)?;
        let members: FxHashSet<&ConceptId> = course.concept_ids().collect();

        // The ordering covers the goals' full prerequisite closure; the view
        // is scoped to the course's own concepts.
        ordering
            .into_iter()
            .filter(|id| members.contains(id))
            .map(|id| {
                let concept = self
                    .graph
                    .concept(&id)
                    .map_err(|_| PathError::ConceptNotFound { id: id.clone() })?;
                Ok(SequentialConcept {
                    title: concept.title.clone(),
                    is_unlocked: self.is_unlocked(snapshot, &id),
                    state: self.state_of(snapshot, &id),
                    concept_id: id,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concept::Concept;
    use crate::course::Topic;
    use crate::graph::ConceptGraphBuilder;
    use crate::types::SkillLevel;

    /// a -> b -> c chain.
    fn chain() -> ConceptGraph {
        ConceptGraphBuilder::new()
            .add_concepts([
                Concept::new("a", "A", 1, 1.0),
                Concept::new("b", "B", 2, 1.0).with_prerequisites(["a"]),
                Concept::new("c", "C", 3, 1.0).with_prerequisites(["a", "b"]),
            ])
            .compile()
            .unwrap()
    }

    #[test]
    /// Mastering A (≥ 75) unlocks B; C stays locked while B is unmastered.
    fn test_unlock_follows_mastery_threshold() {
        let graph = chain();
        let gate = ProgressGate::new(&graph, EngineConfig::default());
        let mut snapshot = ProgressSnapshot::new();
        snapshot.record_mut(&"a".into()).mastery_score = 80;

        assert!(gate.is_unlocked(&snapshot, &"a".into())); // no prereqs
        assert!(gate.is_unlocked(&snapshot, &"b".into()));
        assert!(!gate.is_unlocked(&snapshot, &"c".into()));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let graph = chain();
        let gate = ProgressGate::new(&graph, EngineConfig::default());
        let mut snapshot = ProgressSnapshot::new();
        snapshot.record_mut(&"a".into()).mastery_score = 75;
        assert!(gate.is_unlocked(&snapshot, &"b".into()));

        snapshot.record_mut(&"a".into()).mastery_score = 74;
        assert!(!gate.is_unlocked(&snapshot, &"b".into()));
    }

    #[test]
    fn test_unknown_concept_is_locked() {
        let graph = chain();
        let gate = ProgressGate::new(&graph, EngineConfig::default());
        assert!(!gate.is_unlocked(&ProgressSnapshot::new(), &"ghost".into()));
        assert_eq!(
            gate.state_of(&ProgressSnapshot::new(), &"ghost".into()),
            GateState::Locked
        );
    }

    #[test]
    /// Completion needs all three sub-activities; any two leave the concept
    /// in progress.
    fn test_completion_requires_all_activities() {
        let graph = chain();
        let gate = ProgressGate::new(&graph, EngineConfig::default());
        let mut snapshot = ProgressSnapshot::new();
        {
            let record = snapshot.record_mut(&"a".into());
            record.description_read = true;
            record.video_watched = true;
        }
        assert_eq!(
            gate.state_of(&snapshot, &"a".into()),
            GateState::InProgress
        );

        snapshot.record_mut(&"a".into()).quiz_passed = true;
        assert_eq!(gate.state_of(&snapshot, &"a".into()), GateState::Completed);
    }

    #[test]
    fn test_untouched_unlocked_concept_reports_unlocked() {
        let graph = chain();
        let gate = ProgressGate::new(&graph, EngineConfig::default());
        assert_eq!(
            gate.state_of(&ProgressSnapshot::new(), &"a".into()),
            GateState::Unlocked
        );
    }

    #[test]
    fn test_sequential_view_orders_and_annotates() {
        let graph = chain();
        let gate = ProgressGate::new(&graph, EngineConfig::default());
        let course = Course::new("course", "Course", SkillLevel::Beginner)
            // Authored order deliberately scrambled; the view re-orders.
            .with_topic(Topic::new("t", "T").with_concepts(["c", "a", "b"]));

        let mut snapshot = ProgressSnapshot::new();
        snapshot.record_mut(&"a".into()).mastery_score = 90;

        let view = gate.sequential_concepts(&course, &snapshot).unwrap();
        let ids: Vec<_> = view.iter().map(|s| s.concept_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(view[0].is_unlocked);
        assert!(view[1].is_unlocked);
        assert!(!view[2].is_unlocked);
    }

    #[test]
    fn test_custom_threshold() {
        let graph = chain();
        let config = EngineConfig::default().with_mastery_threshold(50);
        let gate = ProgressGate::new(&graph, config);
        let mut snapshot = ProgressSnapshot::new();
        snapshot.record_mut(&"a".into()).mastery_score = 55;
        assert!(gate.is_unlocked(&snapshot, &"b".into()));
    }
}
