//! Doclet data model and query store for symdoc.
//!
//! A *doclet* is one documentation record extracted upstream from source
//! code. This crate owns the typed representation of doclets, the
//! [`DocletStore`] they live in, and the partitioning of the flat doclet
//! collection into the kind buckets the site generator works with.
//!
//! # Architecture
//!
//! Doclets are stored in a flat `Vec<Doclet>` and addressed by index, so
//! the buckets in [`Members`] stay valid across in-place mutation of
//! individual doclets (signatures, ids, attached module exports). Queries
//! are predicate-driven; ordering is applied once via [`SortSpec`] and
//! preserved by every downstream consumer.

mod doclet;
mod members;
mod store;

pub use doclet::{Doclet, Example, Kind, Meta, Param, Return, Scope, TypeExpr};
pub use members::{Members, attach_module_symbols};
pub use store::{DocletStore, SortSpec, SortSpecError};
