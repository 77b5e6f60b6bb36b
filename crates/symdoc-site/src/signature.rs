//! Signature and attribute markup for symbol pages.
//!
//! Functions and classes get a call signature with parameter markers and
//! linked return types; members get a type annotation; both get an
//! attribute string (`(static) `, `(private, readonly) `, …).

use symdoc_links::{TypeLinker, escape_html};
use symdoc_model::{Doclet, Kind, Param, Return, Scope};

/// True for doclets that display a call or type signature.
pub(crate) fn needs_signature(doclet: &Doclet) -> bool {
    match doclet.kind {
        Kind::Function => true,
        Kind::Class => !doclet.hideconstructor,
        // typedefs that describe functions get a signature too
        Kind::Typedef => doclet
            .type_
            .as_ref()
            .is_some_and(|t| t.names.iter().any(|n| n.eq_ignore_ascii_case("function"))),
        _ => false,
    }
}

fn param_attributes(param: &Param) -> Vec<&'static str> {
    let mut attributes = Vec::new();
    if param.optional {
        attributes.push("opt");
    }
    match param.nullable {
        Some(true) => attributes.push("nullable"),
        Some(false) => attributes.push("non-null"),
        None => {}
    }
    attributes
}

fn update_item_name(param: &Param) -> String {
    let mut name = param.name.clone();
    if param.variable {
        name = format!("&hellip;{name}");
    }
    let attributes = param_attributes(param);
    if attributes.is_empty() {
        name
    } else {
        format!(
            r#"{name}<span class="signature-attributes">{}</span>"#,
            attributes.join(", ")
        )
    }
}

/// Call signature for a function-like doclet: linked parameter list plus
/// return type arrow. Nested parameters (`options.verbose`) are folded
/// into their parent.
pub(crate) fn function_signature(doclet: &Doclet, linker: &TypeLinker<'_>) -> String {
    let params: Vec<String> = doclet
        .params
        .iter()
        .filter(|p| !p.name.is_empty() && !p.name.contains('.'))
        .map(update_item_name)
        .collect();
    let call = format!("({}) ", params.join(", "));

    let mut attribs: Vec<&'static str> = Vec::new();
    for item in &doclet.returns {
        for attrib in return_attribs(item) {
            if !attribs.contains(&attrib) {
                attribs.push(attrib);
            }
        }
    }
    let attribs_text = attribs_string(&attribs);

    let return_types: Vec<String> = doclet
        .returns
        .iter()
        .filter_map(|r| r.type_.as_ref())
        .flat_map(|t| t.names.iter())
        .map(|name| linker.resolve(name))
        .collect();
    let returns_text = if return_types.is_empty() {
        String::new()
    } else {
        format!(" &rarr; {attribs_text}{{{}}}", return_types.join("|"))
    };

    format!(
        r#"<span class="signature">{call}</span><span class="type-signature">{returns_text}</span>"#
    )
}

/// Type annotation appended to a member or constant signature.
pub(crate) fn member_signature(doclet: &Doclet, linker: &TypeLinker<'_>) -> String {
    let types: Vec<String> = doclet
        .type_
        .as_ref()
        .map(|t| t.names.iter().map(|name| linker.resolve(name)).collect())
        .unwrap_or_default();
    let annotation = if types.is_empty() {
        String::new()
    } else {
        format!(" :{}", types.join("|"))
    };
    format!(
        r#"{}<span class="type-signature">{annotation}</span>"#,
        doclet.signature.as_deref().unwrap_or("")
    )
}

fn return_attribs(item: &Return) -> Vec<&'static str> {
    match item.nullable {
        Some(true) => vec!["nullable"],
        Some(false) => vec!["non-null"],
        None => Vec::new(),
    }
}

/// Attributes displayed before a symbol name.
pub(crate) fn attribs_of(doclet: &Doclet) -> Vec<String> {
    let mut attribs = Vec::new();
    if doclet.virtual_ {
        attribs.push("abstract".to_owned());
    }
    if let Some(access) = &doclet.access
        && access != "public"
    {
        attribs.push(access.clone());
    }
    if let Some(scope) = doclet.scope
        && scope != Scope::Instance
        && scope != Scope::Global
        && matches!(doclet.kind, Kind::Function | Kind::Member | Kind::Constant)
    {
        attribs.push(scope.as_str().to_owned());
    }
    if doclet.readonly && doclet.kind == Kind::Member {
        attribs.push("readonly".to_owned());
    }
    if doclet.kind == Kind::Constant {
        attribs.push("constant".to_owned());
    }
    match doclet.nullable {
        Some(true) => attribs.push("nullable".to_owned()),
        Some(false) => attribs.push("non-null".to_owned()),
        None => {}
    }
    attribs
}

fn attribs_string<S: AsRef<str>>(attribs: &[S]) -> String {
    if attribs.is_empty() {
        return String::new();
    }
    let joined = attribs
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");
    escape_html(&format!("({joined}) ")).into_owned()
}

/// Attribute markup stored on the doclet for templates.
pub(crate) fn attribs_markup(doclet: &Doclet) -> String {
    format!(
        r#"<span class="type-signature">{}</span>"#,
        attribs_string(&attribs_of(doclet))
    )
}
