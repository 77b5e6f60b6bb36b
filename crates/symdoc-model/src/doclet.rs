//! The doclet record and its supporting types.
//!
//! Field semantics follow the upstream extractor's JSON output: a doclet
//! carries the canonical identity (`longname`), containment (`memberof`,
//! `scope`), and the free-text type expressions attached to params and
//! returns. The site generator reads doclets and annotates a small set of
//! presentation fields (`signature`, `attribs`, `id`, `ancestors`,
//! `meta.shortpath`); everything else is treated as read-only input.

use serde::{Deserialize, Serialize};

/// Kind of a documented symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Class,
    Function,
    Module,
    Namespace,
    Mixin,
    External,
    Interface,
    Member,
    Constant,
    Event,
    Typedef,
    File,
    Package,
    /// Synthetic kind for pretty-printed source listing pages.
    Source,
    /// Synthetic kind for the generated home page.
    Mainpage,
    /// Synthetic kind for the globals page.
    Globalobj,
}

impl Kind {
    /// Lowercase name as it appears in extractor output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Function => "function",
            Self::Module => "module",
            Self::Namespace => "namespace",
            Self::Mixin => "mixin",
            Self::External => "external",
            Self::Interface => "interface",
            Self::Member => "member",
            Self::Constant => "constant",
            Self::Event => "event",
            Self::Typedef => "typedef",
            Self::File => "file",
            Self::Package => "package",
            Self::Source => "source",
            Self::Mainpage => "mainpage",
            Self::Globalobj => "globalobj",
        }
    }

    /// True for kinds that get their own output page.
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Self::Class
                | Self::Module
                | Self::Namespace
                | Self::Mixin
                | Self::External
                | Self::Interface
        )
    }
}

/// Scope of a symbol relative to its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Static,
    Instance,
    Inner,
    Global,
}

impl Scope {
    /// Lowercase name as it appears in extractor output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Instance => "instance",
            Self::Inner => "inner",
            Self::Global => "global",
        }
    }

    /// Punctuation joining a container longname to a member name.
    #[must_use]
    pub fn punctuation(self) -> &'static str {
        match self {
            Self::Static => ".",
            Self::Instance => "#",
            Self::Inner => "~",
            Self::Global => "",
        }
    }
}

/// A compound type annotation: one or more type expression strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeExpr {
    #[serde(default)]
    pub names: Vec<String>,
}

impl TypeExpr {
    #[must_use]
    pub fn of(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| (*n).to_owned()).collect(),
        }
    }
}

/// A documented parameter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<TypeExpr>,
    #[serde(default)]
    pub optional: bool,
    /// `Some(true)` nullable, `Some(false)` explicitly non-null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    /// Repeatable (rest) parameter.
    #[serde(default)]
    pub variable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A documented return value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Return {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<TypeExpr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Source location info attached by the extractor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineno: Option<u32>,
    /// Path shortened by the common source prefix; set during publishing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortpath: Option<String>,
}

/// A usage example, split into caption and code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub code: String,
}

/// One documentation record describing one documented symbol.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doclet {
    pub kind: Kind,
    #[serde(default)]
    pub name: String,
    /// Globally unique canonical identifier, e.g. `module:foo.Bar#baz`.
    /// Absent for entries that are not symbols (raw tutorials).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longname: Option<String>,
    /// Longname of the enclosing symbol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memberof: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<TypeExpr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub returns: Vec<Return>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
    /// Cross-reference strings; rewritten into links during publishing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub see: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(rename = "async", default)]
    pub async_: bool,
    #[serde(default)]
    pub readonly: bool,
    /// `Some(true)` nullable, `Some(false)` explicitly non-null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(rename = "virtual", default)]
    pub virtual_: bool,
    #[serde(default)]
    pub hideconstructor: bool,
    #[serde(default)]
    pub undocumented: bool,
    #[serde(default)]
    pub ignore: bool,
    /// Pre-rendered README HTML; only on the synthetic main page doclet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    /// Escaped source text; only on synthetic source listing doclets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    // Presentation fields, filled in during publishing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribs: Option<String>,
    /// Fragment id of this symbol within its page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Ancestor breadcrumb link markup, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<String>,
    /// Module-export copies attached to module doclets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<Doclet>,
}

impl Default for Kind {
    fn default() -> Self {
        Self::Member
    }
}

impl Doclet {
    /// Create a doclet with no longname (a bare entry).
    #[must_use]
    pub fn unnamed(kind: Kind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a doclet whose longname equals its name (a global symbol).
    #[must_use]
    pub fn new(kind: Kind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind,
            longname: Some(name.clone()),
            name,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_longname(mut self, longname: impl Into<String>) -> Self {
        self.longname = Some(longname.into());
        self
    }

    #[must_use]
    pub fn with_memberof(mut self, memberof: impl Into<String>) -> Self {
        self.memberof = Some(memberof.into());
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True when the doclet carries a non-empty description.
    #[must_use]
    pub fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// True for a symbol that *is* a module's export (`module.exports = …`):
    /// its longname equals its name and carries the module prefix.
    #[must_use]
    pub fn is_module_exports(&self) -> bool {
        match &self.longname {
            Some(longname) => longname == &self.name && longname.starts_with("module:"),
            None => false,
        }
    }

    /// Full source path for this doclet, if it has location info.
    #[must_use]
    pub fn source_path(&self) -> Option<String> {
        let meta = self.meta.as_ref()?;
        if meta.filename.is_empty() {
            return None;
        }
        match meta.path.as_deref() {
            Some(path) if !path.is_empty() && path != "null" => {
                Some(format!("{}/{}", path.trim_end_matches('/'), meta.filename))
            }
            _ => Some(meta.filename.clone()),
        }
    }
}
