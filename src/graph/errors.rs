use miette::Diagnostic;
use thiserror::Error;

use crate::types::ConceptId;

/// Structural errors surfaced while compiling a concept graph.
///
/// These are authoring-time defects: the catalog itself is malformed and no
/// amount of caller input can make a computation over it meaningful.
#[derive(Debug, Error, Diagnostic)]
pub enum GraphBuildError {
    /// Two concepts were registered under the same id.
    #[error("duplicate concept id: {id}")]
    #[diagnostic(
        code(learnpath::graph::duplicate_concept),
        help("Each concept id must be unique within a catalog; rename or merge the duplicates.")
    )]
    DuplicateConcept { id: ConceptId },

    /// A concept lists a prerequisite that is not in the catalog.
    #[error("concept {concept} references unknown prerequisite {prerequisite}")]
    #[diagnostic(
        code(learnpath::graph::unknown_prerequisite),
        help("Add the missing concept to the catalog or remove the dangling reference.")
    )]
    UnknownPrerequisite {
        concept: ConceptId,
        prerequisite: ConceptId,
    },

    /// The prerequisite relation is not acyclic.
    ///
    /// `members` lists every concept that could not be ordered, sorted by id
    /// for stable output.
    #[error("prerequisite cycle involving {} concept(s): {}", members.len(), display_members(members))]
    #[diagnostic(
        code(learnpath::graph::cycle_detected),
        help("A concept may not (transitively) require itself; break the cycle in the authored data.")
    )]
    CycleDetected { members: Vec<ConceptId> },

    /// No concepts were registered.
    #[error("cannot compile an empty concept graph")]
    #[diagnostic(
        code(learnpath::graph::empty),
        help("Register at least one concept before compiling.")
    )]
    EmptyGraph,
}

/// Lookup errors over a compiled graph.
#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    /// The requested concept id is not in the graph.
    #[error("unknown concept: {id}")]
    #[diagnostic(code(learnpath::graph::unknown_concept))]
    UnknownConcept { id: ConceptId },
}

fn display_members(members: &[ConceptId]) -> String {
    members
        .iter()
        .map(ConceptId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
