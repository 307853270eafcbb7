use learnpath::graph::ConceptGraph;
use learnpath::types::ConceptId;

/// Asserts that every concept's prerequisites appear earlier in `ordering`.
pub fn assert_topological(graph: &ConceptGraph, ordering: &[ConceptId]) {
    for (idx, id) in ordering.iter().enumerate() {
        for prereq in graph.prerequisites_of(id) {
            let prereq_idx = ordering
                .iter()
                .position(|o| o == prereq)
                .unwrap_or_else(|| panic!("prerequisite {prereq} of {id} missing from ordering"));
            assert!(
                prereq_idx < idx,
                "prerequisite {prereq} (index {prereq_idx}) must precede {id} (index {idx})"
            );
        }
    }
}
