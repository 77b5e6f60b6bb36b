//! Navigation tree construction.
//!
//! One tree per sidebar section. Groups are created lazily while items
//! are inserted; a group is keyed by its path segment and headed by the
//! full path-so-far, so two symbols sharing a path prefix nest under the
//! same group.

use std::collections::HashSet;

use regex::Regex;
use symdoc_model::{Doclet, DocletStore, Kind, SortSpec};

/// Link formatter: `(longname, display text) -> markup`.
pub type LinkFn<'a> = dyn Fn(&str, &str) -> String + 'a;

/// Data attributes carried by a rendered item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemData {
    pub kind: Option<String>,
    pub access: Option<String>,
    pub is_async: bool,
}

impl ItemData {
    #[must_use]
    pub fn from_doclet(doclet: &Doclet) -> Self {
        Self {
            kind: Some(doclet.kind.as_str().to_owned()),
            access: doclet.access.clone(),
            is_async: doclet.async_,
        }
    }
}

/// One entry in the rendered tree: a link, optional data attributes, and
/// detail sublists (class-only groups holding member/method links).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuItem {
    pub link: String,
    pub data: Option<ItemData>,
    pub details: Vec<MenuGroup>,
}

/// A node of the navigation tree: a heading, an optional CSS class, child
/// groups keyed by path segment, and direct items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuGroup {
    pub heading: Option<String>,
    pub css_class: Option<String>,
    /// Path segment this group is keyed by under its parent.
    pub key: String,
    pub groups: Vec<MenuGroup>,
    pub items: Vec<MenuItem>,
}

impl MenuGroup {
    #[must_use]
    pub fn with_heading(heading: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            ..Self::default()
        }
    }

    /// Insert an item under the given `/`-separated path, creating
    /// intermediate groups lazily. Empty segments (from stray slashes)
    /// create groups keyed by the empty string rather than failing.
    pub fn insert(&mut self, path: Option<&str>, item: MenuItem) {
        let Some(path) = path else {
            self.items.push(item);
            return;
        };

        let mut current = self;
        let mut slug = String::new();
        for segment in path.split('/') {
            slug.push_str(segment);
            slug.push('/');
            current = current.child(segment, &slug);
        }
        current.items.push(item);
    }

    fn child(&mut self, key: &str, slug: &str) -> &mut MenuGroup {
        if let Some(position) = self.groups.iter().position(|g| g.key == key) {
            return &mut self.groups[position];
        }
        self.groups.push(MenuGroup {
            heading: Some(slug.to_owned()),
            key: key.to_owned(),
            ..MenuGroup::default()
        });
        self.groups.last_mut().expect("group just pushed")
    }
}

/// A symbol (or bare entry) to be placed in the navigation tree.
///
/// Tutorials and other longname-less entries flow through the same
/// builder as doclets, so the builder works on this thin view.
#[derive(Clone, Debug, Default)]
pub struct NavEntry {
    pub name: String,
    pub longname: Option<String>,
    pub data: Option<ItemData>,
}

impl NavEntry {
    #[must_use]
    pub fn from_doclet(doclet: &Doclet) -> Self {
        Self {
            name: doclet.name.clone(),
            longname: doclet.longname.clone(),
            data: Some(ItemData::from_doclet(doclet)),
        }
    }

    /// An entry without a longname: rendered as a bare leaf link.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            longname: None,
            data: None,
        }
    }
}

/// Policy knobs for tree construction.
pub struct NavOptions<'a> {
    /// Display full longnames (minus `module:`/`event:` prefixes).
    pub use_longname: bool,
    /// Group display names containing `/` into nested path groups.
    pub group_by_path: bool,
    /// Expand member/method detail sublists per symbol.
    pub details: bool,
    /// Filter applied to detail doclets.
    pub details_filter: Option<&'a dyn Fn(&Doclet) -> bool>,
    /// Ordering applied to detail doclets.
    pub details_order: &'a SortSpec,
}

/// Compile one kind bucket into a navigation tree.
///
/// Entries without a longname become leaf links at the root regardless of
/// grouping mode. Entries whose longname is already in `seen` are skipped
/// and every processed longname is marked exactly once — this is how a
/// symbol appearing in several buckets is shown only once. Detail links
/// always use `detail_linkto`, even for sections with a specialized item
/// formatter.
pub fn build_member_nav(
    entries: &[NavEntry],
    heading: &str,
    seen: &mut HashSet<String>,
    store: &DocletStore,
    linkto: &LinkFn<'_>,
    detail_linkto: &LinkFn<'_>,
    options: &NavOptions<'_>,
) -> MenuGroup {
    let prefix_re = Regex::new(r"\b(module|event):").unwrap();
    let mut root = MenuGroup::with_heading(heading);

    for entry in entries {
        let Some(longname) = &entry.longname else {
            root.insert(
                None,
                MenuItem {
                    link: linkto("", &entry.name),
                    ..MenuItem::default()
                },
            );
            continue;
        };
        if seen.contains(longname) {
            continue;
        }

        let display = if options.use_longname {
            prefix_re.replace_all(longname, "").into_owned()
        } else {
            entry.name.clone()
        };

        let (path, leaf) = match display.rfind('/') {
            Some(pos) => (
                Some(display[..pos].to_owned()),
                display[pos + 1..].to_owned(),
            ),
            None => (None, display),
        };

        let mut item = MenuItem {
            link: linkto(longname, &leaf),
            data: entry.data.clone(),
            details: Vec::new(),
        };

        if options.details {
            item.details = build_details(store, longname, detail_linkto, options);
        }

        let path = if options.group_by_path { path } else { None };
        root.insert(path.as_deref(), item);
        seen.insert(longname.clone());
    }

    root
}

/// Detail sublists for one symbol: its direct members and methods,
/// filtered and ordered by policy. Empty sublists are omitted entirely.
fn build_details(
    store: &DocletStore,
    longname: &str,
    linkto: &LinkFn<'_>,
    options: &NavOptions<'_>,
) -> Vec<MenuGroup> {
    let mut selection: Vec<&Doclet> = store.find(|d| {
        matches!(d.kind, Kind::Member | Kind::Function)
            && d.memberof.as_deref() == Some(longname)
    });
    if let Some(filter) = options.details_filter {
        selection.retain(|d| filter(d));
    }
    selection.sort_by(|a, b| options.details_order.compare(a, b));

    let sublist = |kind: Kind, css_class: &str| -> Option<MenuGroup> {
        let items: Vec<MenuItem> = selection
            .iter()
            .filter(|d| d.kind == kind)
            .map(|&d| MenuItem {
                link: linkto(d.longname.as_deref().unwrap_or(&d.name), &d.name),
                data: Some(ItemData::from_doclet(d)),
                details: Vec::new(),
            })
            .collect();
        if items.is_empty() {
            return None;
        }
        Some(MenuGroup {
            css_class: Some(css_class.to_owned()),
            items,
            ..MenuGroup::default()
        })
    };

    [
        sublist(Kind::Member, "members"),
        sublist(Kind::Function, "methods"),
    ]
    .into_iter()
    .flatten()
    .collect()
}
