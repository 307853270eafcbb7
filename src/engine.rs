//! The engine facade: one entry point wiring the graph, the course catalog,
//! and the configuration together, plus the wire-shaped request/response
//! types the (external) API layer serializes.
//!
//! # Examples
//!
//! ```rust
//! use learnpath::concept::Concept;
//! use learnpath::config::EngineConfig;
//! use learnpath::course::CourseCatalog;
//! use learnpath::engine::{LearningPathEngine, PathRequest};
//! use learnpath::graph::ConceptGraphBuilder;
//! use learnpath::progress::ProgressSnapshot;
//! use learnpath::types::{SkillLevel, TimeAvailability};
//!
//! let graph = ConceptGraphBuilder::new()
//!     .add_concept(Concept::new("a", "A", 1, 1.0))
//!     .add_concept(Concept::new("b", "B", 2, 1.0).with_prerequisites(["a"]))
//!     .compile()
//!     .unwrap();
//!
//! let engine = LearningPathEngine::new(graph, CourseCatalog::new(), EngineConfig::default());
//! let request = PathRequest {
//!     goal: String::new(),
//!     concept_id: Some("b".into()),
//!     current_skill_level: SkillLevel::Beginner,
//!     time_available: TimeAvailability::Moderate,
//!     selected_courses: Vec::new(),
//! };
//!
//! let response = engine.generate_path(&request, &ProgressSnapshot::new()).unwrap();
//! assert_eq!(response.best_path.detailed_path.len(), 2);
//! assert!(!response.best_path.detailed_path[0].locked); // "a" has no prereqs
//! ```

use serde::{Deserialize, Serialize};

use crate::concept::Concept;
use crate::config::EngineConfig;
use crate::course::CourseCatalog;
use crate::graph::ConceptGraph;
use crate::path::{CoursePlanner, PathError, PathGenerator, StudyPlan};
use crate::progress::{
    CourseProgress, ProgressError, ProgressEvent, ProgressEventKind, ProgressGate,
    ProgressSnapshot, SequentialConcept, apply_event,
};
use crate::types::{ConceptId, CourseId, SkillLevel, TimeAvailability};

/// A path-generation request, as the API layer deserializes it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRequest {
    /// Free-text goal; consulted only when neither `concept_id` nor
    /// `selected_courses` pins the goals down.
    #[serde(default)]
    pub goal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept_id: Option<ConceptId>,
    pub current_skill_level: SkillLevel,
    pub time_available: TimeAvailability,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_courses: Vec<CourseId>,
}

/// One element of an annotated path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStep {
    pub concept_id: ConceptId,
    pub title: String,
    pub locked: bool,
}

/// A full ordering annotated with per-user lock state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedPath {
    pub detailed_path: Vec<PathStep>,
}

/// The path-generation response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResponse {
    /// Every concept in scope, sorted by id.
    pub concepts: Vec<Concept>,
    /// The canonical ordering, with full concept metadata.
    pub path: Vec<Concept>,
    pub best_path: AnnotatedPath,
    /// All orderings (best first), each annotated.
    pub all_paths: Vec<AnnotatedPath>,
}

/// A progress-update request, as the API layer deserializes it.
///
/// The `action` tag carries the event kind (`mark_description_read`,
/// `mark_video_watched`, `quiz_submit`), flattened alongside the addressing
/// fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressAction {
    pub course_id: CourseId,
    pub concept_id: ConceptId,
    #[serde(default)]
    pub seconds_spent: u64,
    #[serde(flatten)]
    pub kind: ProgressEventKind,
}

impl ProgressAction {
    /// Materializes the action as a fresh event (new id, current time).
    #[must_use]
    pub fn into_event(self) -> ProgressEvent {
        let event = match self.kind {
            ProgressEventKind::MarkDescriptionRead => {
                ProgressEvent::description_read(self.concept_id)
            }
            ProgressEventKind::MarkVideoWatched => ProgressEvent::video_watched(self.concept_id),
            ProgressEventKind::QuizSubmit { score } => {
                ProgressEvent::quiz_submitted(self.concept_id, score)
            }
        };
        event.with_seconds_spent(self.seconds_spent)
    }
}

/// Facade over one graph snapshot, one course catalog, and one
/// configuration.
///
/// All methods take `&self`; the engine holds immutable data only and can be
/// shared freely across concurrent request handlers.
pub struct LearningPathEngine {
    graph: ConceptGraph,
    catalog: CourseCatalog,
    config: EngineConfig,
}

impl LearningPathEngine {
    #[must_use]
    pub fn new(graph: ConceptGraph, catalog: CourseCatalog, config: EngineConfig) -> Self {
        Self {
            graph,
            catalog,
            config,
        }
    }

    #[must_use]
    pub fn graph(&self) -> &ConceptGraph {
        &self.graph
    }

    #[must_use]
    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// The unlock gate over this engine's graph and thresholds.
    #[must_use]
    pub fn gate(&self) -> ProgressGate<'_> {
        ProgressGate::new(&self.graph, self.config)
    }

    /// Generates the canonical path and alternatives for a request,
    /// annotated against the caller's progress snapshot.
    ///
    /// Goal resolution order: explicit `concept_id`, then
    /// `selected_courses` (all their concepts, merged), then keyword match
    /// of `goal` over concept titles.
    ///
    /// # Errors
    ///
    /// Any [`PathError`] from goal resolution or generation.
    pub fn generate_path(
        &self,
        request: &PathRequest,
        snapshot: &ProgressSnapshot,
    ) -> Result<PathResponse, PathError> {
        let goals = self.resolve_goals(request)?;
        tracing::debug!(goals = goals.len(), "resolved path-generation goals");

        let generated = PathGenerator::new(&self.graph).generate(&goals)?;
        let gate = self.gate();

        let best_path = self.annotate(&generated.best, &gate, snapshot)?;
        let mut all_paths = vec![best_path.clone()];
        for alternative in &generated.alternatives {
            all_paths.push(self.annotate(alternative, &gate, snapshot)?);
        }

        Ok(PathResponse {
            concepts: self.resolve_concepts(&generated.scope)?,
            path: self.resolve_concepts(&generated.best)?,
            best_path,
            all_paths,
        })
    }

    /// Builds a course-level study plan for a request.
    ///
    /// Explicitly selected courses win; otherwise candidates come from the
    /// free-text goal.
    pub fn recommend_plan(&self, request: &PathRequest) -> Result<StudyPlan, PathError> {
        let planner = CoursePlanner::new(&self.catalog, &self.graph, self.config);
        if request.selected_courses.is_empty() {
            planner.plan_by_keyword(
                &request.goal,
                request.current_skill_level,
                request.time_available,
            )
        } else {
            planner.plan_for_courses(
                &request.selected_courses,
                request.current_skill_level,
                request.time_available,
            )
        }
    }

    /// Applies one progress action to a per-course document.
    ///
    /// Returns `Ok(false)` for an already-applied event id. The caller is
    /// responsible for addressing the right document (one per user and
    /// course) and for persisting the result.
    ///
    /// # Errors
    ///
    /// [`ProgressError::UnknownCourse`] if the action's course is not in the
    /// catalog, plus any reduction error from
    /// [`apply_event`](crate::progress::apply_event).
    pub fn apply_progress(
        &self,
        doc: &mut CourseProgress,
        action: ProgressAction,
    ) -> Result<bool, ProgressError> {
        let course = self
            .catalog
            .get(&action.course_id)
            .ok_or_else(|| ProgressError::UnknownCourse {
                id: action.course_id.clone(),
            })?;
        let event = action.into_event();
        let changed = apply_event(doc, &event, course, &self.graph, &self.config)?;
        if changed {
            // Impact analysis: these are the concepts whose unlock state may
            // have moved with this update.
            let dependents = self.graph.dependents_of(&event.concept_id);
            if !dependents.is_empty() {
                tracing::debug!(
                    concept = %event.concept_id,
                    dependents = dependents.len(),
                    "progress update may affect dependent unlock states"
                );
            }
        }
        Ok(changed)
    }

    /// The sequential-concepts view for a course.
    ///
    /// # Errors
    ///
    /// [`PathError::CourseNotFound`] for an unknown course, plus any
    /// ordering error from the gate.
    pub fn sequential_concepts(
        &self,
        course_id: &CourseId,
        snapshot: &ProgressSnapshot,
    ) -> Result<Vec<SequentialConcept>, PathError> {
        let course = self
            .catalog
            .get(course_id)
            .ok_or_else(|| PathError::CourseNotFound {
                id: course_id.clone(),
            })?;
        self.gate().sequential_concepts(course, snapshot)
    }

    fn resolve_goals(&self, request: &PathRequest) -> Result<Vec<ConceptId>, PathError> {
        if let Some(concept_id) = &request.concept_id {
            return Ok(vec![concept_id.clone()]);
        }

        if !request.selected_courses.is_empty() {
            let mut goals: Vec<ConceptId> = Vec::new();
            for course_id in &request.selected_courses {
                let course =
                    self.catalog
                        .get(course_id)
                        .ok_or_else(|| PathError::CourseNotFound {
                            id: course_id.clone(),
                        })?;
                for concept in course.concept_ids() {
                    if !goals.contains(concept) {
                        goals.push(concept.clone());
                    }
                }
            }
            if goals.is_empty() {
                return Err(PathError::EmptyGoalSet);
            }
            return Ok(goals);
        }

        let needle = request.goal.trim().to_lowercase();
        if needle.is_empty() {
            return Err(PathError::EmptyGoalSet);
        }
        let mut goals: Vec<ConceptId> = self
            .graph
            .concepts()
            .filter(|c| c.title.to_lowercase().contains(&needle))
            .map(|c| c.id.clone())
            .collect();
        if goals.is_empty() {
            return Err(PathError::GoalNotResolved {
                goal: request.goal.clone(),
            });
        }
        goals.sort();
        Ok(goals)
    }

    fn resolve_concepts(&self, ids: &[ConceptId]) -> Result<Vec<Concept>, PathError> {
        ids.iter()
            .map(|id| {
                self.graph
                    .concept(id)
                    .cloned()
                    .map_err(|_| PathError::ConceptNotFound { id: id.clone() })
            })
            .collect()
    }

    fn annotate(
        &self,
        ordering: &[ConceptId],
        gate: &ProgressGate<'_>,
        snapshot: &ProgressSnapshot,
    ) -> Result<AnnotatedPath, PathError> {
        let detailed_path = ordering
            .iter()
            .map(|id| {
                let concept = self
                    .graph
                    .concept(id)
                    .map_err(|_| PathError::ConceptNotFound { id: id.clone() })?;
                Ok(PathStep {
                    concept_id: id.clone(),
                    title: concept.title.clone(),
                    locked: gate.is_locked(snapshot, id),
                })
            })
            .collect::<Result<Vec<_>, PathError>>()?;
        Ok(AnnotatedPath { detailed_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{Course, Topic};
    use crate::graph::ConceptGraphBuilder;

    fn engine() -> LearningPathEngine {
        let graph = ConceptGraphBuilder::new()
            .add_concepts([
                Concept::new("a", "Variables", 1, 1.0),
                Concept::new("b", "Functions", 2, 2.0).with_prerequisites(["a"]),
                Concept::new("c", "Closures", 3, 3.0).with_prerequisites(["a", "b"]),
            ])
            .compile()
            .unwrap();
        let catalog = CourseCatalog::new().with_course(
            Course::new("course-1", "Course One", SkillLevel::Beginner)
                .with_topic(Topic::new("t", "T").with_concepts(["a", "b", "c"])),
        );
        LearningPathEngine::new(graph, catalog, EngineConfig::default())
    }

    fn request(concept: Option<&str>) -> PathRequest {
        PathRequest {
            goal: String::new(),
            concept_id: concept.map(Into::into),
            current_skill_level: SkillLevel::Beginner,
            time_available: TimeAvailability::Moderate,
            selected_courses: Vec::new(),
        }
    }

    #[test]
    fn test_explicit_concept_goal() {
        let engine = engine();
        let response = engine
            .generate_path(&request(Some("c")), &ProgressSnapshot::new())
            .unwrap();
        let ids: Vec<_> = response
            .best_path
            .detailed_path
            .iter()
            .map(|s| s.concept_id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(response.all_paths[0], response.best_path);
    }

    #[test]
    fn test_goals_from_selected_courses() {
        let engine = engine();
        let mut req = request(None);
        req.selected_courses = vec!["course-1".into()];
        let response = engine
            .generate_path(&req, &ProgressSnapshot::new())
            .unwrap();
        assert_eq!(response.path.len(), 3);
    }

    #[test]
    fn test_keyword_goal_resolution() {
        let engine = engine();
        let mut req = request(None);
        req.goal = "closures".to_string();
        let response = engine
            .generate_path(&req, &ProgressSnapshot::new())
            .unwrap();
        assert_eq!(response.path.last().unwrap().id, "c".into());
    }

    #[test]
    fn test_unresolvable_goal_is_typed() {
        let engine = engine();
        let mut req = request(None);
        req.goal = "quantum knitting".to_string();
        let err = engine
            .generate_path(&req, &ProgressSnapshot::new())
            .unwrap_err();
        assert!(matches!(err, PathError::GoalNotResolved { .. }));
    }

    #[test]
    fn test_lock_annotation_uses_snapshot() {
        let engine = engine();
        let mut snapshot = ProgressSnapshot::new();
        snapshot.record_mut(&"a".into()).mastery_score = 90;

        let response = engine.generate_path(&request(Some("c")), &snapshot).unwrap();
        let locked: Vec<bool> = response
            .best_path
            .detailed_path
            .iter()
            .map(|s| s.locked)
            .collect();
        // a unlocked (no prereqs), b unlocked (a mastered), c locked (b not).
        assert_eq!(locked, vec![false, false, true]);
    }

    #[test]
    fn test_request_wire_shape() {
        let json = r#"{
            "goal": "learn closures",
            "conceptId": "c",
            "currentSkillLevel": "beginner",
            "timeAvailable": "moderate"
        }"#;
        let req: PathRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.concept_id, Some("c".into()));
        assert!(req.selected_courses.is_empty());
    }

    #[test]
    fn test_progress_action_wire_shape() {
        let json = r#"{
            "action": "quiz_submit",
            "score": 88,
            "conceptId": "a",
            "courseId": "course-1"
        }"#;
        let action: ProgressAction = serde_json::from_str(json).unwrap();
        assert_eq!(action.kind, ProgressEventKind::QuizSubmit { score: 88 });
        assert_eq!(action.course_id, "course-1".into());
    }

    #[test]
    fn test_apply_progress_end_to_end() {
        let engine = engine();
        let mut doc = CourseProgress::new("user", "course-1");

        let read = ProgressAction {
            course_id: "course-1".into(),
            concept_id: "a".into(),
            seconds_spent: 60,
            kind: ProgressEventKind::MarkDescriptionRead,
        };
        assert!(engine.apply_progress(&mut doc, read).unwrap());
        assert!(doc.overall_progress > 0.0);

        let unknown_course = ProgressAction {
            course_id: "ghost".into(),
            concept_id: "a".into(),
            seconds_spent: 0,
            kind: ProgressEventKind::MarkVideoWatched,
        };
        assert!(matches!(
            engine.apply_progress(&mut doc, unknown_course),
            Err(ProgressError::UnknownCourse { .. })
        ));
    }

    #[test]
    fn test_sequential_concepts_for_unknown_course() {
        let engine = engine();
        let err = engine
            .sequential_concepts(&"nope".into(), &ProgressSnapshot::new())
            .unwrap_err();
        assert!(matches!(err, PathError::CourseNotFound { .. }));
    }
}
