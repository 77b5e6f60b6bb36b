//! Partitioning of the doclet collection into kind buckets.
//!
//! Buckets hold store indices in store order; the configured sort is
//! applied upstream, once, and never re-derived here.

use std::collections::HashMap;

use crate::doclet::{Doclet, Kind};
use crate::store::DocletStore;

/// The doclet collection partitioned by kind.
///
/// Every doclet belongs to at most one primary bucket. Globals collect
/// members, functions, constants and typedefs that have no enclosing
/// symbol, excluding module-export functions (those belong to their
/// module's page).
#[derive(Debug, Default)]
pub struct Members {
    pub classes: Vec<usize>,
    pub externals: Vec<usize>,
    pub events: Vec<usize>,
    pub globals: Vec<usize>,
    pub mixins: Vec<usize>,
    pub modules: Vec<usize>,
    pub namespaces: Vec<usize>,
    pub interfaces: Vec<usize>,
}

impl Members {
    /// Partition the store into kind buckets.
    #[must_use]
    pub fn partition(store: &DocletStore) -> Self {
        Self {
            classes: store.indices(|d| d.kind == Kind::Class),
            externals: store.indices(|d| d.kind == Kind::External),
            events: store.indices(|d| d.kind == Kind::Event),
            globals: store.indices(|d| {
                matches!(
                    d.kind,
                    Kind::Member | Kind::Function | Kind::Constant | Kind::Typedef
                ) && d.memberof.is_none()
                    && !d.is_module_exports()
            }),
            mixins: store.indices(|d| d.kind == Kind::Mixin),
            modules: store.indices(|d| d.kind == Kind::Module),
            namespaces: store.indices(|d| d.kind == Kind::Namespace),
            interfaces: store.indices(|d| d.kind == Kind::Interface),
        }
    }
}

/// Attach module-export symbols to their modules.
///
/// A class or function whose longname exactly equals a module's longname
/// documents that module's direct export. A *copy* of each such doclet is
/// attached to the module's `modules` list when it has a description or is
/// a class (an undescribed function still gets its own standalone page but
/// is suppressed here). The copy's display name is rewritten into the
/// `(require("…"))` call form; originals are never mutated.
pub fn attach_module_symbols(store: &mut DocletStore) {
    let mut exports: HashMap<String, Vec<Doclet>> = HashMap::new();
    for doclet in store.iter() {
        if matches!(doclet.kind, Kind::Class | Kind::Function)
            && let Some(longname) = &doclet.longname
            && longname.starts_with("module:")
        {
            exports.entry(longname.clone()).or_default().push(doclet.clone());
        }
    }

    let module_indices = store.indices(|d| d.kind == Kind::Module);
    for index in module_indices {
        let Some(longname) = store.get(index).and_then(|d| d.longname.clone()) else {
            continue;
        };
        let Some(candidates) = exports.get(&longname) else {
            continue;
        };
        let attached: Vec<Doclet> = candidates
            .iter()
            .filter(|symbol| symbol.has_description() || symbol.kind == Kind::Class)
            .cloned()
            .map(|mut symbol| {
                symbol.name =
                    format!("{}\"))", symbol.name.replacen("module:", "(require(\"", 1));
                symbol
            })
            .collect();
        if let Some(module) = store.get_mut(index) {
            module.modules = attached;
        }
    }
}
