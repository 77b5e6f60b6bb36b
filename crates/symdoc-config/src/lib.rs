//! Configuration management for symdoc.
//!
//! Parses `symdoc.toml` configuration files with serde into one explicit
//! [`Config`] struct. Every option has a default; the struct is populated
//! once at startup, validated, and passed by reference into the
//! components that need it — there is no dynamic option lookup anywhere
//! in the generator.

use std::path::Path;

use serde::Deserialize;
use symdoc_model::{Doclet, SortSpec, SortSpecError};

/// Section headings the navigation sidebar knows how to build.
pub const NAV_SECTIONS: [&str; 8] = [
    "Classes",
    "Modules",
    "Externals",
    "Events",
    "Namespaces",
    "Mixins",
    "Tutorials",
    "Interfaces",
];

/// Default sidebar section order.
fn default_section_order() -> Vec<String> {
    NAV_SECTIONS.iter().map(|s| (*s).to_owned()).collect()
}

fn default_nav_details_order() -> String {
    "kind, scope desc, name".to_owned()
}

fn default_true() -> bool {
    true
}

/// Quote normalization applied to doclet names before link registration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoveQuotes {
    /// Leave names untouched.
    #[default]
    None,
    /// Strip every single and double quote character.
    All,
    /// Strip one pair of surrounding quotes, if present.
    Trim,
}

/// Allowlists applied to navigation detail sublists.
///
/// A detail doclet is kept when every present list contains the doclet's
/// corresponding field value; doclets missing the field are dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DetailsFilter {
    /// Allowed `access` values (e.g. `["public"]`).
    pub access: Option<Vec<String>>,
    /// Allowed `scope` values (e.g. `["static", "instance"]`).
    pub scope: Option<Vec<String>>,
}

impl DetailsFilter {
    /// True when the doclet passes every configured allowlist.
    #[must_use]
    pub fn matches(&self, doclet: &Doclet) -> bool {
        if let Some(access) = &self.access {
            // absent access means public
            let value = doclet.access.as_deref().unwrap_or("public");
            if !access.iter().any(|a| a == value) {
                return false;
            }
        }
        if let Some(scope) = &self.scope {
            let Some(value) = doclet.scope.map(symdoc_model::Scope::as_str) else {
                return false;
            };
            if !scope.iter().any(|s| s == value) {
                return false;
            }
        }
        true
    }
}

/// An extra sidebar link placed under the Home heading.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MenuLink {
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

/// Generator configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sort the doclet collection before generation.
    pub sort: bool,
    /// Sort specification; defaults depend on `use_longname_in_nav`.
    pub sort_fields: Option<String>,
    /// Show full longnames (minus `module:`/`event:` prefixes) in the nav.
    pub use_longname_in_nav: bool,
    /// Group navigation entries by `/`-separated path segments.
    pub nav_group_by_path: bool,
    /// Expand per-symbol member/method detail sublists in the nav.
    pub nav_details: bool,
    /// Filter applied to detail sublists.
    pub nav_details_filter: Option<DetailsFilter>,
    /// Ordering applied to detail sublists.
    pub nav_details_order: String,
    /// Sidebar section order.
    pub nav_section_order: Vec<String>,
    /// Elide group wrappers that have no direct items.
    pub nav_skip_empty_groups: bool,
    /// Include typedefs in the globals section of the nav.
    pub nav_typedefs: bool,
    /// Display long type names compacted to their trailing segment.
    pub compact_long_types: bool,
    /// Expand short type names to the unique matching longname.
    pub expand_short_types: bool,
    /// Quote normalization for doclet names.
    pub remove_quotes: RemoveQuotes,
    /// Generate pretty-printed source listing pages.
    pub output_source_files: bool,
    /// Extra sidebar links.
    pub menu: Vec<MenuLink>,
    /// Title of the generated home page.
    pub main_page_title: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sort: true,
            sort_fields: None,
            use_longname_in_nav: false,
            nav_group_by_path: false,
            nav_details: true,
            nav_details_filter: None,
            nav_details_order: default_nav_details_order(),
            nav_section_order: default_section_order(),
            nav_skip_empty_groups: true,
            nav_typedefs: false,
            compact_long_types: false,
            expand_short_types: false,
            remove_quotes: RemoveQuotes::None,
            output_source_files: true,
            menu: Vec::new(),
            main_page_title: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Invalid sort specification.
    #[error("invalid sort specification in {field}: {source}")]
    SortSpec {
        field: &'static str,
        #[source]
        source: SortSpecError,
    },
    /// Unknown navigation section name.
    #[error("unknown nav section: {0}")]
    UnknownSection(String),
}

impl Config {
    /// Parse configuration from TOML text and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on parse or validation failure.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on I/O, parse or validation failure.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Validate cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a sort specification names an unknown
    /// field or `nav_section_order` names an unknown section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(fields) = &self.sort_fields {
            SortSpec::parse(fields).map_err(|source| ConfigError::SortSpec {
                field: "sort_fields",
                source,
            })?;
        }
        SortSpec::parse(&self.nav_details_order).map_err(|source| ConfigError::SortSpec {
            field: "nav_details_order",
            source,
        })?;
        for section in &self.nav_section_order {
            if !NAV_SECTIONS.contains(&section.as_str()) {
                return Err(ConfigError::UnknownSection(section.clone()));
            }
        }
        Ok(())
    }

    /// Effective doclet sort specification.
    ///
    /// Falls back to longname ordering when longnames are displayed in the
    /// nav, name ordering otherwise, with version and since tiebreakers.
    #[must_use]
    pub fn sort_spec(&self) -> SortSpec {
        let fields = self.sort_fields.as_deref().unwrap_or(if self.use_longname_in_nav {
            "longname, version, since"
        } else {
            "name, version, since"
        });
        // validated at load time; defaults are known-good
        SortSpec::parse(fields)
            .unwrap_or_else(|_| SortSpec::parse("name, version, since").expect("valid default"))
    }

    /// Effective detail sublist ordering.
    #[must_use]
    pub fn details_spec(&self) -> SortSpec {
        SortSpec::parse(&self.nav_details_order)
            .unwrap_or_else(|_| SortSpec::parse(&default_nav_details_order()).expect("valid default"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use symdoc_model::{Kind, Scope};

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.sort);
        assert!(config.nav_details);
        assert!(config.nav_skip_empty_groups);
        assert!(config.output_source_files);
        assert!(!config.nav_group_by_path);
        assert!(!config.use_longname_in_nav);
        assert_eq!(config.remove_quotes, RemoveQuotes::None);
        assert_eq!(config.nav_section_order.len(), 8);
    }

    #[test]
    fn test_from_toml() {
        let config = Config::from_toml(
            r#"
            nav_group_by_path = true
            use_longname_in_nav = true
            compact_long_types = true
            remove_quotes = "trim"
            nav_section_order = ["Modules", "Classes"]

            [[menu]]
            label = "GitHub"
            href = "https://example.com/repo"
            target = "_blank"
            "#,
        )
        .unwrap();
        assert!(config.nav_group_by_path);
        assert_eq!(config.remove_quotes, RemoveQuotes::Trim);
        assert_eq!(config.nav_section_order, vec!["Modules", "Classes"]);
        assert_eq!(config.menu.len(), 1);
        assert_eq!(config.menu[0].target.as_deref(), Some("_blank"));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = Config::from_toml(r#"nav_section_order = ["Gadgets"]"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSection(s) if s == "Gadgets"));
    }

    #[test]
    fn test_bad_sort_fields_rejected() {
        let err = Config::from_toml(r#"sort_fields = "frobnication""#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::SortSpec {
                field: "sort_fields",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_details_order_rejected() {
        let err = Config::from_toml(r#"nav_details_order = "name upside-down""#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::SortSpec {
                field: "nav_details_order",
                ..
            }
        ));
    }

    #[test]
    fn test_sort_spec_follows_nav_display() {
        let mut config = Config::default();
        let by_name = Doclet::new(Kind::Class, "b").with_longname("a/b");
        let by_longname = Doclet::new(Kind::Class, "a").with_longname("z/a");
        assert_eq!(
            config.sort_spec().compare(&by_name, &by_longname),
            std::cmp::Ordering::Greater
        );

        config.use_longname_in_nav = true;
        assert_eq!(
            config.sort_spec().compare(&by_name, &by_longname),
            std::cmp::Ordering::Less
        );
    }

    #[test]
    fn test_details_filter_access() {
        let filter = DetailsFilter {
            access: Some(vec!["public".to_owned()]),
            scope: None,
        };
        let public = Doclet::new(Kind::Member, "a");
        let mut private = Doclet::new(Kind::Member, "b");
        private.access = Some("private".to_owned());
        assert!(filter.matches(&public));
        assert!(!filter.matches(&private));
    }

    #[test]
    fn test_details_filter_scope() {
        let filter = DetailsFilter {
            access: None,
            scope: Some(vec!["static".to_owned()]),
        };
        let kept = Doclet::new(Kind::Member, "a").with_scope(Scope::Static);
        let dropped = Doclet::new(Kind::Member, "b").with_scope(Scope::Instance);
        let unscoped = Doclet::new(Kind::Member, "c");
        assert!(filter.matches(&kept));
        assert!(!filter.matches(&dropped));
        assert!(!filter.matches(&unscoped));
    }
}
