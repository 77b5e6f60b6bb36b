//! Doclet store with predicate queries and configured ordering.
//!
//! The store owns the flat doclet collection for one generation pass.
//! Consumers address doclets by index so bucket lists stay valid while
//! individual doclets are annotated in place.

use std::cmp::Ordering;

use crate::doclet::{Doclet, Kind, Scope};

/// A parsed sort specification: comma-separated fields, each optionally
/// suffixed with `desc` (e.g. `"kind, scope desc, name"`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SortKey {
    field: Field,
    descending: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Kind,
    Name,
    Longname,
    Scope,
    Access,
    Version,
    Since,
}

/// Error from parsing a sort specification.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SortSpecError {
    #[error("unknown sort field: {0}")]
    UnknownField(String),
    #[error("unknown sort direction: {0}")]
    UnknownDirection(String),
    #[error("empty sort specification")]
    Empty,
}

impl SortSpec {
    /// Parse a comma-separated field list.
    ///
    /// # Errors
    ///
    /// Returns [`SortSpecError`] for unknown fields or directions, or an
    /// empty specification.
    pub fn parse(spec: &str) -> Result<Self, SortSpecError> {
        let mut keys = Vec::new();
        for part in spec.split(',') {
            let mut words = part.split_whitespace();
            let Some(name) = words.next() else { continue };
            let field = match name {
                "kind" => Field::Kind,
                "name" => Field::Name,
                "longname" => Field::Longname,
                "scope" => Field::Scope,
                "access" => Field::Access,
                "version" => Field::Version,
                "since" => Field::Since,
                other => return Err(SortSpecError::UnknownField(other.to_owned())),
            };
            let descending = match words.next() {
                None | Some("asc") => false,
                Some("desc") => true,
                Some(other) => return Err(SortSpecError::UnknownDirection(other.to_owned())),
            };
            keys.push(SortKey { field, descending });
        }
        if keys.is_empty() {
            return Err(SortSpecError::Empty);
        }
        Ok(Self { keys })
    }

    /// Compare two doclets under this specification.
    ///
    /// Missing field values order before present ones; string comparison
    /// otherwise. Ties fall through to the next key.
    #[must_use]
    pub fn compare(&self, a: &Doclet, b: &Doclet) -> Ordering {
        for key in &self.keys {
            let va = field_value(a, key.field);
            let vb = field_value(b, key.field);
            let ord = match (va, vb) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(x), Some(y)) => x.cmp(y),
            };
            let ord = if key.descending { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

fn field_value(doclet: &Doclet, field: Field) -> Option<&str> {
    match field {
        Field::Kind => Some(doclet.kind.as_str()),
        Field::Name => Some(&doclet.name),
        Field::Longname => doclet.longname.as_deref(),
        Field::Scope => doclet.scope.map(Scope::as_str),
        Field::Access => doclet.access.as_deref(),
        Field::Version => doclet.version.as_deref(),
        Field::Since => doclet.since.as_deref(),
    }
}

/// Owned collection of all doclets for one generation pass.
#[derive(Debug, Default)]
pub struct DocletStore {
    doclets: Vec<Doclet>,
}

impl DocletStore {
    #[must_use]
    pub fn new(doclets: Vec<Doclet>) -> Self {
        Self { doclets }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.doclets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.doclets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Doclet> {
        self.doclets.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Doclet> {
        self.doclets.get(index)
    }

    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Doclet> {
        self.doclets.get_mut(index)
    }

    /// Indices of all doclets matching the predicate, in store order.
    pub fn indices(&self, predicate: impl Fn(&Doclet) -> bool) -> Vec<usize> {
        self.doclets
            .iter()
            .enumerate()
            .filter(|(_, d)| predicate(d))
            .map(|(i, _)| i)
            .collect()
    }

    /// All doclets matching the predicate, in store order.
    pub fn find(&self, predicate: impl Fn(&Doclet) -> bool) -> Vec<&Doclet> {
        self.doclets.iter().filter(|d| predicate(d)).collect()
    }

    /// First doclet with the given longname.
    #[must_use]
    pub fn by_longname(&self, longname: &str) -> Option<&Doclet> {
        self.doclets
            .iter()
            .find(|d| d.longname.as_deref() == Some(longname))
    }

    /// Apply a mutation to every doclet.
    pub fn each_mut(&mut self, mut f: impl FnMut(&mut Doclet)) {
        for doclet in &mut self.doclets {
            f(doclet);
        }
    }

    /// Stable sort under the given specification.
    pub fn sort(&mut self, spec: &SortSpec) {
        self.doclets.sort_by(|a, b| spec.compare(a, b));
    }

    /// Drop doclets that should not appear in the generated site:
    /// undocumented records (packages excepted), ignored records, and
    /// members of anonymous scopes.
    pub fn prune(&mut self) {
        self.doclets.retain(|d| {
            if d.ignore {
                return false;
            }
            if d.undocumented && d.kind != Kind::Package {
                return false;
            }
            d.memberof.as_deref() != Some("<anonymous>")
        });
    }
}
