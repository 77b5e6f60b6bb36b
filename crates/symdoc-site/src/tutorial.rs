//! Tutorial tree collaborator.
//!
//! Tutorials arrive pre-parsed: a tree of nodes with titles and HTML
//! bodies. The publisher assigns each node a `tutorial-` namespaced
//! filename and generates one page per node below the root.

use std::collections::HashMap;

use symdoc_links::LinkRegistry;

/// One node of the tutorial tree. The root node is a container only; its
/// descendants become pages.
#[derive(Clone, Debug, Default)]
pub struct Tutorial {
    /// Identifier used in cross-references.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Pre-parsed HTML body.
    pub content: String,
    pub children: Vec<Tutorial>,
}

impl Tutorial {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            content: content.into(),
            children: Vec::new(),
        }
    }

    /// Root container for top-level tutorials.
    #[must_use]
    pub fn root(children: Vec<Tutorial>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Tutorial>) -> Self {
        self.children = children;
        self
    }
}

/// Tutorial name → output filename and title, for link formatting.
pub(crate) struct TutorialPages {
    urls: HashMap<String, String>,
    titles: HashMap<String, String>,
}

impl TutorialPages {
    /// Allocate a filename for every tutorial below the root.
    pub(crate) fn build(root: &Tutorial, registry: &mut LinkRegistry) -> Self {
        let mut pages = Self {
            urls: HashMap::new(),
            titles: HashMap::new(),
        };
        pages.collect(root, registry);
        pages
    }

    fn collect(&mut self, node: &Tutorial, registry: &mut LinkRegistry) {
        for child in &node.children {
            let url = format!("tutorial-{}", registry.unique_filename(&child.name));
            self.urls.insert(child.name.clone(), url);
            self.titles.insert(child.name.clone(), child.title.clone());
            self.collect(child, registry);
        }
    }

    pub(crate) fn url(&self, name: &str) -> Option<&str> {
        self.urls.get(name).map(String::as_str)
    }

    /// Link markup for a tutorial reference. Unknown names render as a
    /// disabled placeholder instead of a dead link.
    pub(crate) fn link(&self, name: &str) -> String {
        match (self.url(name), self.titles.get(name)) {
            (Some(url), Some(title)) => format!(r#"<a href="{url}">{title}</a>"#),
            _ => format!(r#"<em class="disabled">Tutorial: {name}</em>"#),
        }
    }
}
