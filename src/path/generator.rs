//! Concept-level path generation.

use rustc_hash::{FxHashMap, FxHashSet};

use super::errors::PathError;
use super::ordering::TieBreak;
use crate::graph::ConceptGraph;
use crate::types::ConceptId;

/// The outcome of one generation run: a canonical best ordering plus the
/// alternatives produced under relaxed tie-breaks.
///
/// Every ordering covers exactly the same scope (the prerequisite closure of
/// the goals plus the goals themselves) and every ordering is a valid
/// topological order of that scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedPaths {
    /// Concepts in scope, sorted by id (metadata lookup convenience).
    pub scope: Vec<ConceptId>,
    /// The canonical ordering under [`TieBreak::Canonical`].
    pub best: Vec<ConceptId>,
    /// Distinct orderings under [`TieBreak::ALTERNATIVES`]; duplicates of
    /// `best` (or of each other) are dropped.
    pub alternatives: Vec<Vec<ConceptId>>,
}

impl GeneratedPaths {
    /// All orderings, best first.
    pub fn all(&self) -> impl Iterator<Item = &Vec<ConceptId>> {
        std::iter::once(&self.best).chain(self.alternatives.iter())
    }
}

/// Computes topologically valid, ranked learning paths toward goal concepts.
///
/// The generator is a pure view over a compiled [`ConceptGraph`]; it holds
/// no state between calls and two calls with identical input produce
/// identical output.
pub struct PathGenerator<'g> {
    graph: &'g ConceptGraph,
}

impl<'g> PathGenerator<'g> {
    #[must_use]
    pub fn new(graph: &'g ConceptGraph) -> Self {
        Self { graph }
    }

    /// Generates the canonical path and its alternatives toward `goals`.
    ///
    /// # Errors
    ///
    /// - [`PathError::EmptyGoalSet`] if `goals` is empty
    /// - [`PathError::ConceptNotFound`] if any goal is unknown
    /// - [`PathError::CycleDetected`] if the induced subgraph cannot be
    ///   fully ordered
    pub fn generate(&self, goals: &[ConceptId]) -> Result<GeneratedPaths, PathError> {
        let scope = self.scope_of(goals)?;
        tracing::debug!(goals = goals.len(), scope = scope.len(), "generating paths");

        let best = self.order_scope(&scope, TieBreak::Canonical)?;
        let mut alternatives = Vec::new();
        for tie_break in TieBreak::ALTERNATIVES {
            let ordering = self.order_scope(&scope, tie_break)?;
            if ordering != best && !alternatives.contains(&ordering) {
                alternatives.push(ordering);
            }
        }

        let mut scope: Vec<ConceptId> = scope.into_iter().collect();
        scope.sort();
        Ok(GeneratedPaths {
            scope,
            best,
            alternatives,
        })
    }

    /// Orders the prerequisite closure of `goals` under a single tie-break.
    pub fn order_toward(
        &self,
        goals: &[ConceptId],
        tie_break: TieBreak,
    ) -> Result<Vec<ConceptId>, PathError> {
        let scope = self.scope_of(goals)?;
        self.order_scope(&scope, tie_break)
    }

    /// Resolves `ancestors(goals) ∪ goals`, validating goal existence.
    fn scope_of(&self, goals: &[ConceptId]) -> Result<FxHashSet<ConceptId>, PathError> {
        if goals.is_empty() {
            return Err(PathError::EmptyGoalSet);
        }
        for goal in goals {
            if !self.graph.contains(goal) {
                return Err(PathError::ConceptNotFound { id: goal.clone() });
            }
        }
        let mut scope = self.graph.ancestors_of(goals.iter());
        scope.extend(goals.iter().cloned());
        Ok(scope)
    }

    /// Kahn's algorithm restricted to `scope`, draining the ready set
    /// through the tie-break's total ordering.
    fn order_scope(
        &self,
        scope: &FxHashSet<ConceptId>,
        tie_break: TieBreak,
    ) -> Result<Vec<ConceptId>, PathError> {
        // In-degrees count only edges internal to the scope. Because the
        // scope is prerequisite-closed, every prerequisite of a scoped
        // concept is itself scoped; the filter guards hand-built snapshots.
        let mut in_degree: FxHashMap<&ConceptId, usize> = FxHashMap::default();
        for id in scope {
            let internal = self
                .graph
                .prerequisites_of(id)
                .iter()
                .filter(|p| scope.contains(*p))
                .count();
            in_degree.insert(id, internal);
        }

        let mut ready: Vec<&ConceptId> = in_degree
            .iter()
            .filter(|(_, deg)| **deg == 0)
            .map(|(id, _)| *id)
            .collect();
        let mut ordered: Vec<ConceptId> = Vec::with_capacity(scope.len());

        while !ready.is_empty() {
            // Global minimum across the whole ready set, not just the batch
            // freed this round; the tie-break promise is over every concept
            // whose prerequisites are already placed.
            let next_idx = self.min_ready(&ready, tie_break);
            let id = ready.swap_remove(next_idx);
            ordered.push(id.clone());

            for dependent in self.graph.dependents_of(id) {
                if let Some(deg) = in_degree.get_mut(dependent) {
                    *deg -= 1;
                    if *deg == 0 {
                        ready.push(dependent);
                    }
                }
            }
        }

        if ordered.len() < scope.len() {
            let mut members: Vec<ConceptId> = in_degree
                .into_iter()
                .filter(|(_, deg)| *deg > 0)
                .map(|(id, _)| id.clone())
                .collect();
            members.sort();
            tracing::warn!(unplaced = members.len(), "cycle within requested scope");
            return Err(PathError::CycleDetected { members });
        }
        Ok(ordered)
    }

    fn min_ready(&self, ready: &[&ConceptId], tie_break: TieBreak) -> usize {
        debug_assert!(!ready.is_empty());
        let mut best = 0;
        for idx in 1..ready.len() {
            let candidate = self
                .graph
                .concept(ready[idx])
                .expect("scoped id is registered");
            let current = self
                .graph
                .concept(ready[best])
                .expect("scoped id is registered");
            if tie_break.compare(candidate, current).is_lt() {
                best = idx;
            }
        }
        best
    }
}
