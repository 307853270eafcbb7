//! Builder and compile-time validation for concept graphs.

use rustc_hash::FxHashMap;

use super::errors::GraphBuildError;
use super::store::ConceptGraph;
use crate::concept::Concept;
use crate::types::ConceptId;

/// Builder for constructing validated concept graphs with a fluent API.
///
/// Concepts are collected as authored and validated all at once by
/// [`compile`](Self::compile), so a catalog load can register everything
/// before any structural check runs (prerequisites may reference concepts
/// that are added later).
///
/// # Examples
///
/// ```rust
/// use learnpath::concept::Concept;
/// use learnpath::graph::ConceptGraphBuilder;
///
/// let graph = ConceptGraphBuilder::new()
///     .add_concept(Concept::new("vars", "Variables", 1, 1.0).fundamental())
///     .add_concept(Concept::new("funcs", "Functions", 2, 2.0).with_prerequisites(["vars"]))
///     .compile()
///     .unwrap();
///
/// assert_eq!(graph.len(), 2);
/// ```
#[derive(Default)]
pub struct ConceptGraphBuilder {
    concepts: Vec<Concept>,
}

impl ConceptGraphBuilder {
    /// Creates a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            concepts: Vec::new(),
        }
    }

    /// Registers a concept. Duplicate ids are rejected at compile time.
    #[must_use]
    pub fn add_concept(mut self, concept: Concept) -> Self {
        self.concepts.push(concept);
        self
    }

    /// Registers every concept from an iterator.
    #[must_use]
    pub fn add_concepts(mut self, concepts: impl IntoIterator<Item = Concept>) -> Self {
        self.concepts.extend(concepts);
        self
    }

    /// Validates the collected concepts and compiles them into an immutable
    /// [`ConceptGraph`].
    ///
    /// Validation checks, in order:
    ///
    /// 1. The catalog is non-empty.
    /// 2. Concept ids are unique.
    /// 3. Every prerequisite reference resolves to a registered concept.
    /// 4. The prerequisite relation is acyclic (Kahn's algorithm; any
    ///    concept left unplaced is reported in
    ///    [`GraphBuildError::CycleDetected`]).
    ///
    /// # Errors
    ///
    /// Returns the first structural defect found as a [`GraphBuildError`].
    pub fn compile(self) -> Result<ConceptGraph, GraphBuildError> {
        if self.concepts.is_empty() {
            return Err(GraphBuildError::EmptyGraph);
        }

        let mut concepts: FxHashMap<ConceptId, Concept> = FxHashMap::default();
        for concept in self.concepts {
            if concepts.contains_key(&concept.id) {
                return Err(GraphBuildError::DuplicateConcept { id: concept.id });
            }
            concepts.insert(concept.id.clone(), concept);
        }

        for concept in concepts.values() {
            for prereq in &concept.prerequisites {
                if !concepts.contains_key(prereq) {
                    return Err(GraphBuildError::UnknownPrerequisite {
                        concept: concept.id.clone(),
                        prerequisite: prereq.clone(),
                    });
                }
            }
        }

        let mut unplaced = check_acyclic(&concepts);
        if !unplaced.is_empty() {
            unplaced.sort();
            tracing::warn!(members = ?unplaced, "prerequisite cycle detected during compile");
            return Err(GraphBuildError::CycleDetected { members: unplaced });
        }

        tracing::debug!(concepts = concepts.len(), "concept graph compiled");
        Ok(ConceptGraph::from_concepts(concepts))
    }
}

/// Runs Kahn's algorithm over the whole catalog and returns the ids that
/// could not be placed (empty iff the graph is a DAG).
fn check_acyclic(concepts: &FxHashMap<ConceptId, Concept>) -> Vec<ConceptId> {
    let mut in_degree: FxHashMap<&ConceptId, usize> = concepts
        .iter()
        .map(|(id, c)| (id, c.prerequisites.len()))
        .collect();
    let mut dependents: FxHashMap<&ConceptId, Vec<&ConceptId>> = FxHashMap::default();
    for concept in concepts.values() {
        for prereq in &concept.prerequisites {
            dependents.entry(prereq).or_default().push(&concept.id);
        }
    }

    let mut ready: Vec<&ConceptId> = in_degree
        .iter()
        .filter(|(_, deg)| **deg == 0)
        .map(|(id, _)| *id)
        .collect();
    let mut placed = 0usize;

    while let Some(id) = ready.pop() {
        placed += 1;
        if let Some(deps) = dependents.get(id) {
            for dep in deps {
                let deg = in_degree
                    .get_mut(dep)
                    .expect("dependent is a registered concept");
                *deg -= 1;
                if *deg == 0 {
                    ready.push(dep);
                }
            }
        }
    }

    if placed == concepts.len() {
        Vec::new()
    } else {
        in_degree
            .into_iter()
            .filter(|(_, deg)| *deg > 0)
            .map(|(id, _)| id.clone())
            .collect()
    }
}
