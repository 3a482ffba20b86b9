use crate::models::{FileSet, MergeOutcome};
use similar::TextDiff;
use std::borrow::Cow;

/// Unified diff of one file. `None` on either side means the file does not
/// exist there (creation or deletion).
pub fn generate_diff(filename: &str, old_content: Option<&str>, new_content: Option<&str>) -> String {
    let from = side_header("a", filename, old_content.is_some());
    let to = side_header("b", filename, new_content.is_some());

    let diff = TextDiff::from_lines(old_content.unwrap_or(""), new_content.unwrap_or(""));
    let hunks = diff
        .unified_diff()
        .header(&from, &to)
        .missing_newline_hint(true)
        .to_string();

    // `similar` emits nothing without hunks; an empty file appearing or
    // disappearing still needs its headers.
    let existence_changed = old_content.is_some() != new_content.is_some();
    if hunks.is_empty() && existence_changed {
        format!("--- {}\n+++ {}\n", from, to)
    } else {
        hunks
    }
}

fn side_header(prefix: &str, filename: &str, exists: bool) -> String {
    if !exists {
        return "/dev/null".to_string();
    }
    let path = format!("{}/{}", prefix, filename);
    quote_filename(&path).into_owned()
}

/// Concatenated diffs for every file a merge changed, in change order.
pub fn merge_diff(before: &FileSet, outcome: &MergeOutcome) -> String {
    let mut diffs = String::new();
    for name in &outcome.changed {
        let old = before.get(name);
        let new = outcome.files.get(name);
        if old != new {
            diffs.push_str(&generate_diff(name, old, new));
        }
    }
    diffs
}

fn quote_filename(filename: &str) -> Cow<'_, str> {
    if filename.contains(' ') {
        format!("\"{}\"", filename).into()
    } else {
        filename.into()
    }
}
