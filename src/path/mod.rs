//! Learning-path generation.
//!
//! Two levels of planning live here:
//!
//! - [`PathGenerator`]: concept-level ordering. Restricts the graph to the
//!   prerequisite closure of the requested goals, runs a Kahn-style
//!   topological sort with a deterministic tie-break, and produces one
//!   canonical ordering plus ranked alternatives under relaxed tie-breaks.
//! - [`CoursePlanner`]: course-level planning. Matches candidate courses by
//!   keyword, ranks them by level distance and rating, and lays out study
//!   steps with explicit completion criteria and a duration estimate.
//!
//! Both are pure functions over immutable snapshots; annotating orderings
//! with per-user lock state happens in [`crate::progress`].
//!
//! # Determinism
//!
//! For identical graph and tie-break inputs, generation yields identical
//! output: the ready set is always drained through a total ordering whose
//! final key is the concept id, so no hash-map iteration order can leak into
//! a path.
//!
//! # Examples
//!
//! ```rust
//! use learnpath::concept::Concept;
//! use learnpath::graph::ConceptGraphBuilder;
//! use learnpath::path::PathGenerator;
//!
//! let graph = ConceptGraphBuilder::new()
//!     .add_concept(Concept::new("a", "A", 1, 1.0))
//!     .add_concept(Concept::new("b", "B", 2, 2.0).with_prerequisites(["a"]))
//!     .add_concept(Concept::new("c", "C", 3, 3.0).with_prerequisites(["a", "b"]))
//!     .compile()
//!     .unwrap();
//!
//! let paths = PathGenerator::new(&graph).generate(&["c".into()]).unwrap();
//! let ids: Vec<_> = paths.best.iter().map(|id| id.as_str()).collect();
//! assert_eq!(ids, vec!["a", "b", "c"]);
//! ```

mod errors;
mod generator;
mod ordering;
mod planner;

pub use errors::PathError;
pub use generator::{GeneratedPaths, PathGenerator};
pub use ordering::TieBreak;
pub use planner::{CompletionCriterion, CoursePlanner, PlanStep, StudyPlan};
