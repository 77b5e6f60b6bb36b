//! Link registry and type expression resolution for symdoc.
//!
//! Every documented symbol is assigned exactly one output URL through the
//! [`LinkRegistry`]; free-text type expressions are rewritten into
//! hyperlinks by the [`TypeLinker`]; `{@link}` tags inside rendered HTML
//! are resolved by [`resolve_doc_links`].
//!
//! # Architecture
//!
//! The registry is the single source of identity for one generation pass:
//! it is populated for all symbols before any page is rendered, and every
//! component that emits a link consults it. An unresolved name is never an
//! error — callers render plain text instead of guessing.

mod html;
mod inline;
mod registry;
mod typeexpr;

pub use html::escape_html;
pub use inline::resolve_doc_links;
pub use registry::{GLOBAL_LONGNAME, LinkRegistry, ancestor_links};
pub use typeexpr::TypeLinker;
