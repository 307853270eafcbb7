use learnpath::concept::Concept;
use learnpath::config::EngineConfig;
use learnpath::course::{Course, CourseCatalog, Topic};
use learnpath::engine::LearningPathEngine;
use learnpath::graph::{ConceptGraph, ConceptGraphBuilder};
use learnpath::types::SkillLevel;

/// A (no prereq), B (prereq [A]), C (prereq [A, B]).
pub fn chain_graph() -> ConceptGraph {
    ConceptGraphBuilder::new()
        .add_concepts([
            Concept::new("a", "A", 1, 1.0).fundamental(),
            Concept::new("b", "B", 2, 2.0).with_prerequisites(["a"]),
            Concept::new("c", "C", 3, 3.0).with_prerequisites(["a", "b"]),
        ])
        .compile()
        .expect("chain fixture is a DAG")
}

/// Diamond: base -> {left, right} -> apex, plus an unrelated island.
pub fn diamond_graph() -> ConceptGraph {
    ConceptGraphBuilder::new()
        .add_concepts([
            Concept::new("base", "Base", 1, 1.0).fundamental(),
            Concept::new("left", "Left", 2, 4.0).with_prerequisites(["base"]),
            Concept::new("right", "Right", 2, 2.0).with_prerequisites(["base"]),
            Concept::new("apex", "Apex", 4, 5.0).with_prerequisites(["left", "right"]),
            Concept::new("island", "Island", 1, 1.0),
        ])
        .compile()
        .expect("diamond fixture is a DAG")
}

/// One-course catalog over the chain graph.
pub fn chain_catalog() -> CourseCatalog {
    CourseCatalog::new().with_course(
        Course::new("course-1", "Foundations", SkillLevel::Beginner)
            .with_category("programming")
            .with_tags(["fundamentals"])
            .with_rating(4.4)
            .with_topic(Topic::new("t1", "Getting Started").with_concepts(["a", "b"]))
            .with_topic(Topic::new("t2", "Going Deeper").with_concepts(["c"])),
    )
}

/// Engine over the chain fixture with default thresholds.
pub fn chain_engine() -> LearningPathEngine {
    LearningPathEngine::new(chain_graph(), chain_catalog(), EngineConfig::default())
}
