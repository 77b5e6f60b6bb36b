//! The longname-to-URL registry.
//!
//! Owns three allocation maps for one generation pass:
//! - candidate key → output filename (case-insensitive collision handling
//!   with numeric suffixes);
//! - longname → canonical URL (first registration wins, conflicts are
//!   logged and never fatal);
//! - per-file fragment ids (same suffix scheme, whitespace stripped).

use std::collections::{HashMap, HashSet};

use regex::Regex;
use symdoc_model::{Doclet, DocletStore, Scope};

use crate::html::escape_html;

/// Longname used for the synthetic globals page.
pub const GLOBAL_LONGNAME: &str = "global";

/// Assigns and remembers one output URL per canonical symbol name.
pub struct LinkRegistry {
    extension: String,
    /// Candidate key → full filename, so repeat lookups stay stable.
    allocated: HashMap<String, String>,
    /// Lowercased basenames already handed out.
    used_filenames: HashSet<String>,
    longname_to_url: HashMap<String, String>,
    /// Longname → fragment id, once allocated.
    ids: HashMap<String, String>,
    /// Lowercased ids already handed out, per filename.
    used_ids: HashMap<String, HashSet<String>>,
    namespace_re: Regex,
    illegal_re: Regex,
    variation_re: Regex,
    prefix_re: Regex,
}

impl Default for LinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            extension: ".html".to_owned(),
            allocated: HashMap::new(),
            used_filenames: HashSet::new(),
            longname_to_url: HashMap::new(),
            ids: HashMap::new(),
            used_ids: HashMap::new(),
            namespace_re: Regex::new(r"^(module|external|event|package):").unwrap(),
            illegal_re: Regex::new(r#"[\\/?*:|'"<>#]"#).unwrap(),
            variation_re: Regex::new(r"\([\s\S]*\)$").unwrap(),
            prefix_re: Regex::new(r"^(\S+):").unwrap(),
        }
    }

    /// Use a different output file extension (default `.html`).
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Derive a filesystem-safe, collision-free filename for a key.
    ///
    /// The same key always yields the same filename; distinct keys whose
    /// sanitized forms collide (case-insensitively) are disambiguated with
    /// `_1`, `_2`, … suffixes.
    pub fn unique_filename(&mut self, key: &str) -> String {
        if let Some(filename) = self.allocated.get(key) {
            return filename.clone();
        }

        let base = self.sanitize(key);
        let mut candidate = base.clone();
        let mut suffix = 0_u32;
        while self.used_filenames.contains(&candidate.to_lowercase()) {
            suffix += 1;
            candidate = format!("{base}_{suffix}");
        }
        self.used_filenames.insert(candidate.to_lowercase());

        let filename = format!("{candidate}{}", self.extension);
        self.allocated.insert(key.to_owned(), filename.clone());
        filename
    }

    fn sanitize(&self, key: &str) -> String {
        let name = self.namespace_re.replace(key, "$1-");
        let name = self.illegal_re.replace_all(&name, "_");
        let name = name.replace('~', "-");
        let name = self.variation_re.replace(&name, "");
        let name = name.trim_start_matches(['.', '-', '_']);
        if name.is_empty() {
            "_".to_owned()
        } else {
            name.to_owned()
        }
    }

    /// Record the canonical URL for a longname.
    ///
    /// Re-registering the same URL is a no-op; a different URL for an
    /// already-registered longname is logged and the first one wins.
    pub fn register(&mut self, longname: &str, url: &str) {
        if let Some(existing) = self.longname_to_url.get(longname) {
            if existing != url {
                tracing::error!(
                    longname = %longname,
                    existing = %existing,
                    rejected = %url,
                    "Link already registered with a different URL"
                );
            }
            return;
        }
        self.longname_to_url
            .insert(longname.to_owned(), url.to_owned());
    }

    /// Look up the URL for a longname.
    ///
    /// `None` means the name does not belong to a documented symbol and
    /// must be rendered as plain text.
    #[must_use]
    pub fn resolve(&self, longname: &str) -> Option<&str> {
        self.longname_to_url.get(longname).map(String::as_str)
    }

    /// Anchor markup for a longname, or the text unchanged when unknown.
    ///
    /// The text is emitted as given; callers escape it first.
    #[must_use]
    pub fn link_to(&self, longname: &str, text: &str) -> String {
        match self.resolve(longname) {
            Some(url) => format!(r#"<a href="{url}">{text}</a>"#),
            None => text.to_owned(),
        }
    }

    /// Allocate a fragment id for a symbol within a page.
    ///
    /// Whitespace is stripped; collisions within the same file get numeric
    /// suffixes. The id allocated for a longname is remembered.
    pub fn fragment_id(&mut self, filename: &str, longname: &str, candidate: &str) -> String {
        if let Some(id) = self.ids.get(longname) {
            return id.clone();
        }
        if candidate.is_empty() {
            return String::new();
        }

        let base: String = candidate.split_whitespace().collect();
        let used = self.used_ids.entry(filename.to_owned()).or_default();
        let mut id = base.clone();
        let mut suffix = 0_u32;
        while used.contains(&id.to_lowercase()) {
            suffix += 1;
            id = format!("{base}_{suffix}");
        }
        used.insert(id.to_lowercase());
        self.ids.insert(longname.to_owned(), id.clone());
        id
    }

    /// Filename (without fragment) a longname's page lives in, allocating
    /// and registering it when first seen.
    fn filename_for(&mut self, longname: &str) -> String {
        if let Some(url) = self.longname_to_url.get(longname) {
            let filename = url.split('#').next().unwrap_or(url);
            return filename.to_owned();
        }
        let filename = self.unique_filename(longname);
        self.register(longname, &filename);
        filename
    }

    /// Derive the URL for a doclet.
    ///
    /// Container kinds (class, module, namespace, mixin, external,
    /// interface) and module-export symbols get their own file. Everything
    /// else links into its container's file — or the globals page — with a
    /// fragment made of scope punctuation plus the name.
    pub fn create_link(&mut self, doclet: &Doclet) -> String {
        let longname = doclet.longname.as_deref().unwrap_or(&doclet.name);

        // a non-container doclet whose longname carries a container
        // namespace prefix (mistagged input) still gets its own file
        let fake_container = if doclet.kind.is_container() {
            false
        } else {
            self.prefix_re
                .captures(longname)
                .is_some_and(|c| matches!(&c[1], "module" | "external"))
        };

        let (filename, wants_fragment) = if doclet.kind.is_container() || doclet.is_module_exports()
        {
            (self.filename_for(longname), false)
        } else if fake_container {
            let container = doclet.memberof.as_deref().unwrap_or(longname);
            (
                self.filename_for(container),
                doclet.name != longname,
            )
        } else {
            let container = doclet.memberof.as_deref().unwrap_or(GLOBAL_LONGNAME);
            (
                self.filename_for(container),
                doclet.name != longname || doclet.scope == Some(Scope::Global),
            )
        };

        if !wants_fragment {
            return filename;
        }

        let fragment = self.fragment_id(&filename, longname, &format_name_for_link(doclet));
        if fragment.is_empty() {
            filename
        } else {
            format!("{filename}#{fragment}")
        }
    }
}

/// Breadcrumb links for a doclet's ancestors, outermost first.
///
/// Each link shows the ancestor's own scope punctuation before its name;
/// the last link carries the doclet's punctuation as a trailing joiner, so
/// the breadcrumb reads like the fully qualified name.
#[must_use]
pub fn ancestor_links(
    store: &DocletStore,
    registry: &LinkRegistry,
    doclet: &Doclet,
) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = doclet.memberof.clone();
    while let Some(memberof) = current {
        let Some(ancestor) = store.by_longname(&memberof) else {
            break;
        };
        chain.push(ancestor);
        current = ancestor.memberof.clone();
    }
    chain.reverse();

    let mut links: Vec<String> = chain
        .iter()
        .map(|ancestor| {
            let punc = ancestor.scope.map_or("", Scope::punctuation);
            let text = escape_html(&format!("{punc}{}", ancestor.name)).into_owned();
            registry.link_to(
                ancestor.longname.as_deref().unwrap_or(&ancestor.name),
                &text,
            )
        })
        .collect();
    if let Some(last) = links.last_mut() {
        last.push_str(doclet.scope.map_or("", Scope::punctuation));
    }
    links
}

/// Fragment text for a symbol: scope punctuation plus name, except that
/// instance scope stays unprefixed.
fn format_name_for_link(doclet: &Doclet) -> String {
    let punc = doclet.scope.map_or("", Scope::punctuation);
    if punc == "#" {
        doclet.name.clone()
    } else {
        format!("{punc}{}", doclet.name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use symdoc_model::Kind;

    use super::*;

    #[test]
    fn test_unique_filename_sanitizes_punctuation() {
        let mut registry = LinkRegistry::new();
        assert_eq!(
            registry.unique_filename("module:foo/bar~Baz"),
            "module-foo_bar-Baz.html"
        );
    }

    #[test]
    fn test_unique_filename_is_stable_per_key() {
        let mut registry = LinkRegistry::new();
        let first = registry.unique_filename("Widget");
        let second = registry.unique_filename("Widget");
        assert_eq!(first, second);
    }

    #[test]
    fn test_unique_filename_disambiguates_case_collisions() {
        let mut registry = LinkRegistry::new();
        assert_eq!(registry.unique_filename("widget"), "widget.html");
        assert_eq!(registry.unique_filename("Widget"), "Widget_1.html");
        assert_eq!(registry.unique_filename("WIDGET"), "WIDGET_2.html");
        // repeat lookups keep their allocation
        assert_eq!(registry.unique_filename("Widget"), "Widget_1.html");
    }

    #[test]
    fn test_unique_filename_strips_variation_and_leading_dot() {
        let mut registry = LinkRegistry::new();
        assert_eq!(registry.unique_filename("Widget(variant)"), "Widget.html");
        assert_eq!(registry.unique_filename(".hidden"), "hidden.html");
    }

    #[test]
    fn test_unique_filename_empty_becomes_placeholder() {
        let mut registry = LinkRegistry::new();
        assert_eq!(registry.unique_filename("~"), "_.html");
    }

    #[test]
    fn test_register_is_idempotent_and_first_wins() {
        let mut registry = LinkRegistry::new();
        registry.register("Widget", "Widget.html");
        registry.register("Widget", "Widget.html");
        registry.register("Widget", "Other.html");
        assert_eq!(registry.resolve("Widget"), Some("Widget.html"));
    }

    #[test]
    fn test_resolve_unknown_is_none() {
        let registry = LinkRegistry::new();
        assert_eq!(registry.resolve("Nope"), None);
    }

    #[test]
    fn test_link_to_known_and_unknown() {
        let mut registry = LinkRegistry::new();
        registry.register("Widget", "Widget.html");
        assert_eq!(
            registry.link_to("Widget", "Widget"),
            r#"<a href="Widget.html">Widget</a>"#
        );
        assert_eq!(registry.link_to("Gone", "Gone"), "Gone");
    }

    #[test]
    fn test_reserved_index_and_global_do_not_collide() {
        let mut registry = LinkRegistry::new();
        let index = registry.unique_filename("index");
        let global = registry.unique_filename(GLOBAL_LONGNAME);
        registry.register(GLOBAL_LONGNAME, &global);

        // a package really named "index" must not steal the home page
        let package = registry.unique_filename("module:index");
        assert_eq!(index, "index.html");
        assert_ne!(package, index);
        // "index" was never registered as a longname
        assert_eq!(registry.resolve("index"), None);
        assert_eq!(registry.resolve(GLOBAL_LONGNAME), Some("global.html"));
    }

    #[test]
    fn test_fragment_id_unique_within_file() {
        let mut registry = LinkRegistry::new();
        assert_eq!(registry.fragment_id("W.html", "W#run", "run"), "run");
        assert_eq!(registry.fragment_id("W.html", "W.run", "Run"), "Run_1");
        // different file, same candidate
        assert_eq!(registry.fragment_id("X.html", "X#run", "run"), "run");
        // longnames keep their allocation
        assert_eq!(registry.fragment_id("W.html", "W.run", "whatever"), "Run_1");
    }

    #[test]
    fn test_fragment_id_strips_whitespace() {
        let mut registry = LinkRegistry::new();
        assert_eq!(
            registry.fragment_id("W.html", "W#a b", "a b"),
            "ab"
        );
    }

    #[test]
    fn test_create_link_container_gets_own_file() {
        let mut registry = LinkRegistry::new();
        let class = Doclet::new(Kind::Class, "Widget");
        assert_eq!(registry.create_link(&class), "Widget.html");
        assert_eq!(registry.resolve("Widget"), Some("Widget.html"));
    }

    #[test]
    fn test_create_link_instance_member_fragment() {
        let mut registry = LinkRegistry::new();
        let method = Doclet::new(Kind::Function, "run")
            .with_longname("Widget#run")
            .with_memberof("Widget")
            .with_scope(Scope::Instance);
        assert_eq!(registry.create_link(&method), "Widget.html#run");
    }

    #[test]
    fn test_create_link_static_member_fragment_punctuation() {
        let mut registry = LinkRegistry::new();
        let member = Doclet::new(Kind::Member, "count")
            .with_longname("Widget.count")
            .with_memberof("Widget")
            .with_scope(Scope::Static);
        assert_eq!(registry.create_link(&member), "Widget.html#.count");
    }

    #[test]
    fn test_create_link_global_symbol() {
        let mut registry = LinkRegistry::new();
        let global_url = registry.unique_filename(GLOBAL_LONGNAME);
        registry.register(GLOBAL_LONGNAME, &global_url);

        let function = Doclet::new(Kind::Function, "halt").with_scope(Scope::Global);
        assert_eq!(registry.create_link(&function), "global.html#halt");
    }

    #[test]
    fn test_create_link_module_exports_function() {
        let mut registry = LinkRegistry::new();
        let exported = Doclet::new(Kind::Function, "module:once");
        assert_eq!(registry.create_link(&exported), "module-once.html");
    }

    #[test]
    fn test_ancestor_links_walk_memberof_chain() {
        let namespace = Doclet::new(Kind::Namespace, "app");
        let class = Doclet::new(Kind::Class, "Widget")
            .with_longname("app.Widget")
            .with_memberof("app")
            .with_scope(Scope::Static);
        let method = Doclet::new(Kind::Function, "run")
            .with_longname("app.Widget#run")
            .with_memberof("app.Widget")
            .with_scope(Scope::Instance);
        let store = DocletStore::new(vec![namespace, class, method.clone()]);

        let mut registry = LinkRegistry::new();
        for doclet in store.find(|_| true) {
            let url = registry.create_link(doclet);
            if let Some(longname) = &doclet.longname {
                registry.register(longname, &url);
            }
        }

        let links = ancestor_links(&store, &registry, &method);
        assert_eq!(
            links,
            vec![
                r#"<a href="app.html">app</a>"#.to_owned(),
                r#"<a href="app.Widget.html">.Widget</a>#"#.to_owned(),
            ]
        );
    }

    #[test]
    fn test_ancestor_links_empty_without_memberof() {
        let store = DocletStore::new(vec![]);
        let registry = LinkRegistry::new();
        let doclet = Doclet::new(Kind::Class, "Widget");
        assert!(ancestor_links(&store, &registry, &doclet).is_empty());
    }

    #[test]
    fn test_create_link_shares_container_file() {
        let mut registry = LinkRegistry::new();
        let method = Doclet::new(Kind::Function, "run")
            .with_longname("Widget#run")
            .with_memberof("Widget")
            .with_scope(Scope::Instance);
        let class = Doclet::new(Kind::Class, "Widget");

        // member processed before its container still lands in one file
        let method_url = registry.create_link(&method);
        let class_url = registry.create_link(&class);
        assert_eq!(method_url, "Widget.html#run");
        assert_eq!(class_url, "Widget.html");
    }
}
