use miette::Diagnostic;
use thiserror::Error;

use crate::types::{ConceptId, CourseId};

/// Errors surfaced by path generation and course planning.
///
/// All variants are terminal for the request that produced them; the engine
/// never retries and never returns a partially-ordered path.
#[derive(Debug, Error, Diagnostic)]
pub enum PathError {
    /// A requested goal or referenced concept is not in the graph.
    #[error("unknown concept: {id}")]
    #[diagnostic(
        code(learnpath::path::concept_not_found),
        help("Check the goal id against the concept catalog.")
    )]
    ConceptNotFound { id: ConceptId },

    /// A selected course id is not in the catalog.
    #[error("unknown course: {id}")]
    #[diagnostic(code(learnpath::path::course_not_found))]
    CourseNotFound { id: CourseId },

    /// Keyword matching produced no candidate courses.
    #[error("no courses match keyword {keyword:?}")]
    #[diagnostic(
        code(learnpath::path::no_matching_courses),
        help("Broaden the keyword or select courses explicitly.")
    )]
    NoMatchingCourses { keyword: String },

    /// Generation was invoked with no goals at all.
    #[error("no goals to generate a path toward")]
    #[diagnostic(
        code(learnpath::path::empty_goal_set),
        help("Supply a concept id, selected courses, or a goal keyword.")
    )]
    EmptyGoalSet,

    /// A free-text goal matched no concept.
    #[error("goal {goal:?} did not resolve to any concept")]
    #[diagnostic(
        code(learnpath::path::goal_not_resolved),
        help("Broaden the goal text, or target a concept or course directly.")
    )]
    GoalNotResolved { goal: String },

    /// The induced subgraph could not be fully ordered.
    ///
    /// `members` lists every concept left unplaced, sorted by id. A graph
    /// obtained from
    /// [`compile`](crate::graph::ConceptGraphBuilder::compile) cannot
    /// trigger this; the generator still checks so a malformed snapshot
    /// fails loudly instead of looping or silently truncating.
    #[error("prerequisite cycle within requested scope ({} unplaced concept(s))", members.len())]
    #[diagnostic(
        code(learnpath::path::cycle_detected),
        help("The prerequisite data for these concepts forms a cycle; fix the authored graph.")
    )]
    CycleDetected { members: Vec<ConceptId> },
}
