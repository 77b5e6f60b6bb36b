//! Type expression resolution.
//!
//! A type annotation is an arbitrary string that may embed identifiers
//! (`Widget`, `module:widgets/button~Options`) inside union, generic or
//! record syntax (`Array.<Widget>|null`). Tokenization and link rewriting
//! are separate passes: the tokenizer produces spans, the rewriter decides
//! per token whether a known typedef/class/external is being named.

use std::ops::Range;

use regex::Regex;
use symdoc_model::{DocletStore, Kind};

use crate::html::escape_html;
use crate::registry::LinkRegistry;

/// One identifier-shaped span inside a type expression.
#[derive(Debug, PartialEq, Eq)]
struct TypeToken {
    span: Range<usize>,
}

/// Rewrites type expressions into linked, escaped markup.
pub struct TypeLinker<'a> {
    store: &'a DocletStore,
    registry: &'a LinkRegistry,
    /// Display long names compacted to their trailing segment.
    compact: bool,
    /// Expand short names to the unique matching longname.
    expand: bool,
    token_re: Regex,
    tail_re: Regex,
    external_re: Regex,
}

impl<'a> TypeLinker<'a> {
    #[must_use]
    pub fn new(
        store: &'a DocletStore,
        registry: &'a LinkRegistry,
        compact: bool,
        expand: bool,
    ) -> Self {
        Self {
            store,
            registry,
            compact,
            expand,
            token_re: Regex::new(r"(\bmodule:[\w/]+[~#.]\w+\b)|(\b\w+\b)").unwrap(),
            tail_re: Regex::new(r"^.*[.~#](\w+)$").unwrap(),
            external_re: Regex::new(r"^\s*external:(\w+)$").unwrap(),
        }
    }

    /// Replace every token naming a known typedef, class or external with
    /// a link to its page; escape everything else, preserving all
    /// intervening characters.
    #[must_use]
    pub fn resolve(&self, expr: &str) -> String {
        let mut out = String::with_capacity(expr.len());
        let mut last = 0;
        for token in self.tokenize(expr) {
            let name = &expr[token.span.clone()];
            let longname = if self.expand {
                self.expand_short_name(name)
            } else {
                name.to_owned()
            };
            if let Some(link) = self.link_for(&longname) {
                out.push_str(&escape_html(&expr[last..token.span.start]));
                out.push_str(&link);
                last = token.span.end;
            }
            // tokens that resolve to nothing stay in the literal text and
            // are escaped together with it
        }
        out.push_str(&escape_html(&expr[last..]));
        out
    }

    fn tokenize(&self, expr: &str) -> Vec<TypeToken> {
        self.token_re
            .find_iter(expr)
            .map(|m| TypeToken { span: m.range() })
            .collect()
    }

    /// Expand a short name to the longname of the unique typedef, class or
    /// external with that leaf name. Zero or multiple matches keep the
    /// name as-is: a wrong link is worse than no link.
    fn expand_short_name(&self, name: &str) -> String {
        let matches = self.store.find(|d| {
            matches!(d.kind, Kind::Typedef | Kind::Class | Kind::External) && d.name == name
        });
        if matches.len() == 1
            && let Some(longname) = &matches[0].longname
        {
            return longname.clone();
        }
        name.to_owned()
    }

    /// True when exactly one documented typedef, class or external carries
    /// this longname.
    fn type_exists(&self, longname: &str) -> bool {
        self.store
            .find(|d| {
                matches!(d.kind, Kind::Typedef | Kind::Class | Kind::External)
                    && d.longname.as_deref() == Some(longname)
            })
            .len()
            == 1
    }

    fn link_for(&self, longname: &str) -> Option<String> {
        if !self.type_exists(longname) {
            return None;
        }
        let display = escape_html(&self.display_name(longname)).into_owned();
        Some(self.registry.link_to(longname, &display))
    }

    fn display_name(&self, longname: &str) -> String {
        if self.compact {
            self.short_name(longname).to_owned()
        } else {
            longname.to_owned()
        }
    }

    /// Trailing qualified segment of a long type name.
    fn short_name<'n>(&self, name: &'n str) -> &'n str {
        if let Some(captures) = self.tail_re.captures(name) {
            return captures.get(1).map_or(name, |m| m.as_str());
        }
        if let Some(captures) = self.external_re.captures(name) {
            return captures.get(1).map_or(name, |m| m.as_str());
        }
        name
    }
}
