//! # Learnpath: Concept-Prerequisite Graph Engine
//!
//! Learnpath turns a directed graph of learning concepts into validated,
//! deterministically-ordered learning paths, and maintains a mastery-gated
//! unlock state machine that decides, per user, which concepts, topics,
//! and courses are locked, in progress, or completed.
//!
//! ## Core Concepts
//!
//! - **Concepts**: the smallest unit of learnable material, each with
//!   prerequisites, a complexity score, and an estimated learning time
//! - **Graph**: an immutable, compile-validated snapshot of all concepts and
//!   prerequisite edges (cycles and dangling references never compile)
//! - **Paths**: Kahn-style topological orderings restricted to a goal's
//!   prerequisite closure, ranked by a deterministic tie-break
//! - **Gate**: the pure state machine mapping a user's mastery data onto
//!   lock/unlock/completion states, with bottom-up aggregation
//! - **Events**: progress updates as an immutable log; state is a pure,
//!   idempotent reduction over it
//!
//! ## Quick Start
//!
//! ### Building and ordering a graph
//!
//! ```
//! use learnpath::concept::Concept;
//! use learnpath::graph::ConceptGraphBuilder;
//! use learnpath::path::PathGenerator;
//!
//! let graph = ConceptGraphBuilder::new()
//!     .add_concept(Concept::new("vars", "Variables", 1, 1.0).fundamental())
//!     .add_concept(Concept::new("funcs", "Functions", 2, 2.0).with_prerequisites(["vars"]))
//!     .add_concept(Concept::new("closures", "Closures", 3, 3.0).with_prerequisites(["funcs"]))
//!     .compile()?;
//!
//! let paths = PathGenerator::new(&graph).generate(&["closures".into()])?;
//! let titles: Vec<_> = paths.best.iter().map(|id| id.as_str()).collect();
//! assert_eq!(titles, vec!["vars", "funcs", "closures"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Gating on mastery
//!
//! ```
//! use learnpath::concept::Concept;
//! use learnpath::config::EngineConfig;
//! use learnpath::graph::ConceptGraphBuilder;
//! use learnpath::progress::{ProgressGate, ProgressSnapshot};
//!
//! let graph = ConceptGraphBuilder::new()
//!     .add_concept(Concept::new("a", "A", 1, 1.0))
//!     .add_concept(Concept::new("b", "B", 2, 1.0).with_prerequisites(["a"]))
//!     .compile()?;
//!
//! let gate = ProgressGate::new(&graph, EngineConfig::default());
//! let mut snapshot = ProgressSnapshot::new();
//!
//! assert!(!gate.is_unlocked(&snapshot, &"b".into()));
//! snapshot.record_mut(&"a".into()).mastery_score = 80;
//! assert!(gate.is_unlocked(&snapshot, &"b".into()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Event-sourced progress
//!
//! Progress actions are immutable events; documents are reductions over the
//! log, deduplicated by event id so replay and at-least-once delivery are
//! both safe. See [`progress::apply_event`] and [`progress::reduce`].
//!
//! ## Error Handling
//!
//! Every fallible operation returns a typed result: unknown references,
//! cycles, invalid transitions, and write conflicts are all distinct,
//! diagnosable variants. Nothing is thrown, nothing retried internally.
//!
//! ## Module Guide
//!
//! - [`types`] - Identifier newtypes and request enums
//! - [`concept`] / [`course`] - The authored domain model
//! - [`graph`] - Graph building, validation, and lookup
//! - [`path`] - Path generation and course planning
//! - [`progress`] - Records, events, the unlock gate, aggregation
//! - [`engine`] - The facade and wire-shaped request/response types
//! - [`store`] - The persistence seam (async, optimistic versioning)
//! - [`config`] / [`telemetry`] - Thresholds and tracing bootstrap

pub mod concept;
pub mod config;
pub mod course;
pub mod engine;
pub mod graph;
pub mod path;
pub mod progress;
pub mod store;
pub mod telemetry;
pub mod types;
