//! Page generation orchestrator for symdoc.
//!
//! Drives one generation pass: doclet normalization, link registration,
//! signature and breadcrumb annotation, navigation sidebar compilation,
//! and per-page rendering through an external template engine.
//!
//! # Architecture
//!
//! The pass is single-threaded and phased: the [`symdoc_links::LinkRegistry`]
//! is fully populated for every symbol before the first page renders, so
//! any page can link to any other. Source listings are generated before
//! symbol pages. Failures that affect a single page or link are logged and
//! isolated; only output-directory creation aborts the run.
//!
//! Template rendering and filesystem access are collaborator traits
//! ([`TemplateRenderer`], [`OutputFs`]) so the pass can be exercised
//! end-to-end in tests with fakes.

mod nav;
mod output;
mod publisher;
mod render;
mod signature;
mod sources;
mod tutorial;

pub use output::{FsOutput, OutputError, OutputFs};
pub use publisher::{PublishError, PublishOptions, PublishSummary, Publisher};
pub use render::TemplateRenderer;
pub use tutorial::Tutorial;
