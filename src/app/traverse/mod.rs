//! Breadth-first collection traversal
//!
//! This module walks a IIIF collection graph from a root collection URL,
//! collecting the identifiers of every reachable manifest and nested
//! collection. Collections are visited strictly in breadth-first discovery
//! order via an explicit FIFO worklist; a visited set guards against
//! re-fetching a collection referenced by multiple parents.
//!
//! Both Presentation API 3 (`items`) and legacy Presentation API 2
//! (`collections` + `manifests`) collection shapes are handled.
//!
//! # Module Organization
//!
//! - [`types`] - Item normalization and classification
//! - [`engine`] - The traversal loop

pub mod engine;
pub mod types;

pub use engine::{traverse, TraversalResult};
pub use types::{Item, ItemKind};
