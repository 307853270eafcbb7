//! The compiled, read-only concept graph store.

use rustc_hash::{FxHashMap, FxHashSet};

use super::errors::GraphError;
use crate::concept::Concept;
use crate::types::ConceptId;

static NO_EDGES: [ConceptId; 0] = [];

/// Immutable, validated snapshot of all concepts and prerequisite edges.
///
/// Concepts and edges are held in id-keyed maps rather than linked object
/// references, so reverse lookups and transitive closures are plain map
/// walks and the structure is trivially shareable across threads (`&self`
/// everywhere, no interior mutability).
///
/// A `ConceptGraph` is only obtainable through
/// [`ConceptGraphBuilder::compile`](super::ConceptGraphBuilder::compile), so
/// every instance is known acyclic with fully-resolved references.
#[derive(Clone, Debug)]
pub struct ConceptGraph {
    concepts: FxHashMap<ConceptId, Concept>,
    /// Forward adjacency: concept -> its prerequisites (authored order).
    prerequisites: FxHashMap<ConceptId, Vec<ConceptId>>,
    /// Reverse adjacency: concept -> concepts that require it (sorted by id).
    dependents: FxHashMap<ConceptId, Vec<ConceptId>>,
}

impl ConceptGraph {
    /// Assembles the store from a validated concept map.
    ///
    /// Callers must have verified reference integrity and acyclicity; this
    /// constructor only derives the adjacency indexes.
    pub(super) fn from_concepts(concepts: FxHashMap<ConceptId, Concept>) -> Self {
        let mut prerequisites: FxHashMap<ConceptId, Vec<ConceptId>> = FxHashMap::default();
        let mut dependents: FxHashMap<ConceptId, Vec<ConceptId>> = FxHashMap::default();

        for concept in concepts.values() {
            prerequisites.insert(concept.id.clone(), concept.prerequisites.clone());
            for prereq in &concept.prerequisites {
                dependents
                    .entry(prereq.clone())
                    .or_default()
                    .push(concept.id.clone());
            }
        }
        // Hash-map iteration order leaks into the reverse index; sort it away.
        for deps in dependents.values_mut() {
            deps.sort();
        }

        Self {
            concepts,
            prerequisites,
            dependents,
        }
    }

    /// Looks up a concept by id.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownConcept`] if the id is not registered.
    pub fn concept(&self, id: &ConceptId) -> Result<&Concept, GraphError> {
        self.concepts
            .get(id)
            .ok_or_else(|| GraphError::UnknownConcept { id: id.clone() })
    }

    /// Returns `true` if the id is registered.
    #[must_use]
    pub fn contains(&self, id: &ConceptId) -> bool {
        self.concepts.contains_key(id)
    }

    /// Direct prerequisites of a concept, in authored order.
    ///
    /// Unknown ids yield an empty slice; absence and "no prerequisites" are
    /// deliberately indistinguishable here; existence checks belong to
    /// [`concept`](Self::concept).
    #[must_use]
    pub fn prerequisites_of(&self, id: &ConceptId) -> &[ConceptId] {
        self.prerequisites
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&NO_EDGES)
    }

    /// Direct dependents of a concept (reverse-edge lookup), sorted by id.
    ///
    /// Used for impact analysis: when a concept's mastery changes, these are
    /// the concepts whose unlock state may change with it.
    #[must_use]
    pub fn dependents_of(&self, id: &ConceptId) -> &[ConceptId] {
        self.dependents
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&NO_EDGES)
    }

    /// Every concept transitively required to reach any of `goals`.
    ///
    /// A goal only appears in the result if it is itself a prerequisite of
    /// another goal. Unknown goal ids contribute nothing; callers that need
    /// existence errors check first via [`concept`](Self::concept).
    #[must_use]
    pub fn ancestors_of<'a>(
        &self,
        goals: impl IntoIterator<Item = &'a ConceptId>,
    ) -> FxHashSet<ConceptId> {
        let mut seen: FxHashSet<ConceptId> = FxHashSet::default();
        let mut stack: Vec<&ConceptId> = goals.into_iter().collect();

        while let Some(id) = stack.pop() {
            for prereq in self.prerequisites_of(id) {
                if !seen.contains(prereq) {
                    seen.insert(prereq.clone());
                    stack.push(prereq);
                }
            }
        }
        seen
    }

    /// Number of registered concepts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Iterates over all registered concepts (hash order, not deterministic).
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }

    /// Iterates over all prerequisite edges as `(prerequisite, dependent)`
    /// pairs.
    #[must_use]
    pub fn edges(&self) -> EdgesIter<'_> {
        EdgesIter::new(&self.dependents)
    }
}

/// Iterator over prerequisite edges as `(prerequisite, dependent)` pairs.
pub struct EdgesIter<'a> {
    outer: std::collections::hash_map::Iter<'a, ConceptId, Vec<ConceptId>>,
    current_from: Option<&'a ConceptId>,
    current_targets: std::slice::Iter<'a, ConceptId>,
}

impl<'a> EdgesIter<'a> {
    fn new(edges: &'a FxHashMap<ConceptId, Vec<ConceptId>>) -> Self {
        let mut outer = edges.iter();
        let (current_from, current_targets) = match outer.next() {
            Some((from, targets)) => (Some(from), targets.iter()),
            None => (None, [].iter()),
        };
        Self {
            outer,
            current_from,
            current_targets,
        }
    }
}

impl<'a> Iterator for EdgesIter<'a> {
    type Item = (&'a ConceptId, &'a ConceptId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(to) = self.current_targets.next() {
                return Some((self.current_from.expect("targets imply a source"), to));
            }
            match self.outer.next() {
                Some((from, targets)) => {
                    self.current_from = Some(from);
                    self.current_targets = targets.iter();
                }
                None => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ConceptGraphBuilder;

    fn diamond() -> ConceptGraph {
        // a -> b, a -> c, {b, c} -> d
        ConceptGraphBuilder::new()
            .add_concepts([
                Concept::new("a", "A", 1, 1.0),
                Concept::new("b", "B", 2, 1.0).with_prerequisites(["a"]),
                Concept::new("c", "C", 2, 1.0).with_prerequisites(["a"]),
                Concept::new("d", "D", 3, 1.0).with_prerequisites(["b", "c"]),
            ])
            .compile()
            .unwrap()
    }

    #[test]
    fn test_concept_lookup() {
        let graph = diamond();
        assert_eq!(graph.concept(&"a".into()).unwrap().title, "A");
        assert!(matches!(
            graph.concept(&"zzz".into()),
            Err(GraphError::UnknownConcept { .. })
        ));
    }

    #[test]
    fn test_prerequisites_preserve_authored_order() {
        let graph = diamond();
        assert_eq!(
            graph.prerequisites_of(&"d".into()),
            &["b".into(), "c".into()]
        );
        assert!(graph.prerequisites_of(&"a".into()).is_empty());
        assert!(graph.prerequisites_of(&"unknown".into()).is_empty());
    }

    #[test]
    fn test_dependents_sorted_by_id() {
        let graph = diamond();
        assert_eq!(graph.dependents_of(&"a".into()), &["b".into(), "c".into()]);
        assert!(graph.dependents_of(&"d".into()).is_empty());
    }

    #[test]
    fn test_ancestors_of_single_goal() {
        let graph = diamond();
        let ancestors = graph.ancestors_of([&"d".into()]);
        assert_eq!(ancestors.len(), 3);
        for id in ["a", "b", "c"] {
            assert!(ancestors.contains(&id.into()), "missing ancestor {id}");
        }
        assert!(!ancestors.contains(&"d".into()));
    }

    #[test]
    /// A goal that is itself required by another goal stays in the closure.
    fn test_ancestors_of_overlapping_goals() {
        let graph = diamond();
        let b = ConceptId::new("b");
        let d = ConceptId::new("d");
        let ancestors = graph.ancestors_of([&b, &d]);
        assert!(ancestors.contains(&"a".into()));
        assert!(ancestors.contains(&"b".into())); // required by d
        assert!(ancestors.contains(&"c".into()));
        assert!(!ancestors.contains(&"d".into()));
    }

    #[test]
    fn test_edges_enumerates_every_pair() {
        let graph = diamond();
        let mut edges: Vec<(String, String)> = graph
            .edges()
            .map(|(p, d)| (p.to_string(), d.to_string()))
            .collect();
        edges.sort();
        assert_eq!(
            edges,
            vec![
                ("a".to_string(), "b".to_string()),
                ("a".to_string(), "c".to_string()),
                ("b".to_string(), "d".to_string()),
                ("c".to_string(), "d".to_string()),
            ]
        );
    }
}
