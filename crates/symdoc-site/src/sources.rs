//! Source file path table.
//!
//! Every doclet with location info contributes one source file. Displayed
//! paths are shortened by the longest common directory prefix across all
//! source files, so listings read `widgets/button.js` instead of the
//! machine-specific absolute path.

/// Normalize separators to forward slashes.
fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

fn dirname(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Longest common directory prefix of the given paths, with a trailing
/// slash. A single path yields its own directory; no shared directory
/// yields the empty string.
pub(crate) fn common_prefix(paths: &[String]) -> String {
    let normalized: Vec<String> = paths.iter().map(|p| normalize(p)).collect();
    let mut dirs = normalized.iter().map(|p| dirname(p));

    let Some(first) = dirs.next() else {
        return String::new();
    };
    let mut common: Vec<&str> = first.split('/').collect();
    for dir in dirs {
        let segments: Vec<&str> = dir.split('/').collect();
        let shared = common
            .iter()
            .zip(&segments)
            .take_while(|(a, b)| a == b)
            .count();
        common.truncate(shared);
        if common.is_empty() {
            return String::new();
        }
    }

    if common.iter().all(|s| s.is_empty()) {
        return String::new();
    }
    let mut prefix = common.join("/");
    prefix.push('/');
    prefix
}

/// Shorten one path by stripping the common prefix.
pub(crate) fn shorten(path: &str, prefix: &str) -> String {
    let normalized = normalize(path);
    match normalized.strip_prefix(prefix) {
        Some(rest) => rest.to_owned(),
        None => normalized,
    }
}
