//! Sidebar assembly.
//!
//! Builds the full navigation HTML once per run: Home link, configured
//! extra links, one tree per kind section in the configured order, then
//! the globals list. Cross-section de-duplication runs through one shared
//! seen-set; modules keep a private one so a module is always listed, and
//! tutorials track their own namespace.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use symdoc_config::Config;
use symdoc_links::LinkRegistry;
use symdoc_model::{Doclet, DocletStore, Kind, Members};
use symdoc_nav::{LinkFn, NavEntry, NavOptions, build_member_nav, render_menu};

use crate::tutorial::TutorialPages;

pub(crate) fn build_nav(
    store: &DocletStore,
    members: &Members,
    tutorial_entries: &[NavEntry],
    tutorial_pages: &TutorialPages,
    registry: &LinkRegistry,
    config: &Config,
    index_url: &str,
) -> String {
    let mut nav = format!(r#"<h2><a href="{index_url}">Home</a></h2>"#);
    for link in &config.menu {
        let mut attrs = format!(r#" href="{}""#, link.href);
        if let Some(class) = &link.class {
            let _ = write!(attrs, r#" class="{class}""#);
        }
        if let Some(target) = &link.target {
            let _ = write!(attrs, r#" target="{target}""#);
        }
        let _ = write!(nav, "<h2><a{attrs}>{}</a></h2>", link.label);
    }

    let details_order = config.details_spec();
    let filter_closure;
    let details_filter: Option<&dyn Fn(&Doclet) -> bool> = match &config.nav_details_filter {
        Some(filter) => {
            filter_closure = move |d: &Doclet| filter.matches(d);
            Some(&filter_closure)
        }
        None => None,
    };
    let options = NavOptions {
        use_longname: config.use_longname_in_nav,
        group_by_path: config.nav_group_by_path,
        details: config.nav_details,
        details_filter,
        details_order: &details_order,
    };

    let linkto = |longname: &str, text: &str| registry.link_to(longname, text);
    let linkto_external = |longname: &str, text: &str| {
        let trimmed = text.strip_prefix('"').unwrap_or(text);
        let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
        registry.link_to(longname, trimmed)
    };
    let linkto_tutorial = |_longname: &str, name: &str| tutorial_pages.link(name);

    let entries = |indices: &[usize]| -> Vec<NavEntry> {
        indices
            .iter()
            .filter_map(|&i| store.get(i))
            .map(NavEntry::from_doclet)
            .collect()
    };
    let skip_empty = config.nav_skip_empty_groups;
    fn section(
        items: &[NavEntry],
        heading: &str,
        seen: &mut HashSet<String>,
        store: &DocletStore,
        link_fn: &LinkFn<'_>,
        detail_link_fn: &LinkFn<'_>,
        options: &NavOptions<'_>,
        skip_empty: bool,
    ) -> String {
        let tree = build_member_nav(items, heading, seen, store, link_fn, detail_link_fn, options);
        render_menu(&tree, skip_empty)
    }

    // sections are always BUILT in canonical order so the shared seen-set
    // marks symbols deterministically; display follows the configured order
    let mut seen = HashSet::new();
    let mut seen_tutorials = HashSet::new();
    let mut module_seen = HashSet::new();
    let mut sections: HashMap<&'static str, String> = HashMap::new();
    sections.insert(
        "Classes",
        section(
            &entries(&members.classes),
            "Classes",
            &mut seen,
            store,
            &linkto,
            &linkto,
            &options,
            skip_empty,
        ),
    );
    sections.insert(
        "Modules",
        section(
            &entries(&members.modules),
            "Modules",
            &mut module_seen,
            store,
            &linkto,
            &linkto,
            &options,
            skip_empty,
        ),
    );
    sections.insert(
        "Externals",
        section(
            &entries(&members.externals),
            "Externals",
            &mut seen,
            store,
            &linkto_external,
            &linkto,
            &options,
            skip_empty,
        ),
    );
    sections.insert(
        "Events",
        section(
            &entries(&members.events),
            "Events",
            &mut seen,
            store,
            &linkto,
            &linkto,
            &options,
            skip_empty,
        ),
    );
    sections.insert(
        "Namespaces",
        section(
            &entries(&members.namespaces),
            "Namespaces",
            &mut seen,
            store,
            &linkto,
            &linkto,
            &options,
            skip_empty,
        ),
    );
    sections.insert(
        "Mixins",
        section(
            &entries(&members.mixins),
            "Mixins",
            &mut seen,
            store,
            &linkto,
            &linkto,
            &options,
            skip_empty,
        ),
    );
    sections.insert(
        "Tutorials",
        section(
            tutorial_entries,
            "Tutorials",
            &mut seen_tutorials,
            store,
            &linkto_tutorial,
            &linkto,
            &options,
            skip_empty,
        ),
    );
    sections.insert(
        "Interfaces",
        section(
            &entries(&members.interfaces),
            "Interfaces",
            &mut seen,
            store,
            &linkto,
            &linkto,
            &options,
            skip_empty,
        ),
    );

    for name in &config.nav_section_order {
        if let Some(html) = sections.get(name.as_str()) {
            nav.push_str(html);
        }
    }

    if !members.globals.is_empty() {
        let mut global_items = String::new();
        for &index in &members.globals {
            let Some(doclet) = store.get(index) else {
                continue;
            };
            let Some(longname) = &doclet.longname else {
                continue;
            };
            if (config.nav_typedefs || doclet.kind != Kind::Typedef) && !seen.contains(longname) {
                let _ = write!(
                    global_items,
                    "<li>{}</li>",
                    registry.link_to(longname, &doclet.name)
                );
            }
            seen.insert(longname.clone());
        }

        if global_items.is_empty() {
            // keep the globals page reachable even when every global was
            // already listed elsewhere
            let _ = write!(nav, "<h3>{}</h3>", registry.link_to("global", "Global"));
        } else {
            let _ = write!(nav, "<h3>Global</h3><ul>{global_items}</ul>");
        }
    }

    nav
}
