//! Structural type-shape discovery and unification for sampled data
//!
//! This crate infers a structural type description (a "type shape") from
//! arbitrary sample data and merges the shapes of sibling samples into the
//! single most general shape that safely describes all of them.
//!
//! ## Features
//!
//! - **Discovery** - Map scalars, strings, nested sequences, and key/value
//!   mappings to type shapes
//! - **Unification** - Reduce parallel observations to one shape via a
//!   generality lattice over scalar kinds
//! - **Column transposition** - Infer per-field types for homogeneous
//!   sequences of tuples or records
//! - **String coercion** - Optimistically infer the tightest scalar kind a
//!   string could represent
//! - **Total by design** - Every input has some discoverable shape; when no
//!   generalization applies the result degrades to a heterogeneous tuple
//!
//! ## Example
//!
//! ```rust,ignore
//! use typeshape_core::Discoverer;
//!
//! let discoverer = Discoverer::new();
//!
//! let shape = discoverer.discover_json(
//!     r#"[{"x": 1, "y": "a"}, {"x": 2, "y": "b"}]"#,
//! )?;
//! assert_eq!(shape.to_string(), "2 * {x: int64, y: string}");
//! ```

mod coerce;
pub mod config;
pub mod discover;
pub mod dtype;
pub mod error;
pub mod graph;
pub mod shape;
pub mod unify;

// Re-export commonly used types
pub use config::{DiscoveryConfig, DiscoveryConfigBuilder};
pub use discover::{Discoverer, SampleValue};
pub use dtype::{DType, array_shape};
pub use error::{DiscoverError, GraphError};
pub use graph::{DEFAULT_EDGES, GeneralityGraph};
pub use shape::{DimSize, ScalarKind, TypeShape};
pub use unify::unify;
