//! Concept graph definition, validation, and lookup.
//!
//! This module provides the read-only prerequisite-graph store the rest of
//! the engine computes over. The main entry point is
//! [`ConceptGraphBuilder`], which collects authored [`Concept`]s and
//! compiles them into a validated, immutable [`ConceptGraph`].
//!
//! # Core Concepts
//!
//! - **Concepts**: nodes of the graph, keyed by stable id
//! - **Prerequisite edges**: directed `prerequisite -> dependent` relations,
//!   derived from each concept's authored prerequisite list
//! - **Compilation**: structural validation (duplicates, dangling
//!   references, cycles) and conversion into the lookup-ready store
//!
//! # Quick Start
//!
//! ```rust
//! use learnpath::concept::Concept;
//! use learnpath::graph::ConceptGraphBuilder;
//!
//! let graph = ConceptGraphBuilder::new()
//!     .add_concept(Concept::new("a", "A", 1, 1.0))
//!     .add_concept(Concept::new("b", "B", 2, 1.0).with_prerequisites(["a"]))
//!     .compile()
//!     .unwrap();
//!
//! assert_eq!(graph.prerequisites_of(&"b".into()), &["a".into()]);
//! assert_eq!(graph.dependents_of(&"a".into()), &["b".into()]);
//! ```
//!
//! Cyclic prerequisite data never compiles:
//!
//! ```rust
//! use learnpath::concept::Concept;
//! use learnpath::graph::{ConceptGraphBuilder, GraphBuildError};
//!
//! let err = ConceptGraphBuilder::new()
//!     .add_concept(Concept::new("a", "A", 1, 1.0).with_prerequisites(["b"]))
//!     .add_concept(Concept::new("b", "B", 1, 1.0).with_prerequisites(["a"]))
//!     .compile()
//!     .unwrap_err();
//!
//! assert!(matches!(err, GraphBuildError::CycleDetected { .. }));
//! ```

mod builder;
mod errors;
mod store;

pub use builder::ConceptGraphBuilder;
pub use errors::{GraphBuildError, GraphError};
pub use store::{ConceptGraph, EdgesIter};
