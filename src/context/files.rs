use crate::models::{FileSet, format_file_context_xml};
use crate::tokens::estimate_tokens;

pub const PREVIEW_LINES: usize = 5;
const TRUNCATION_MARKER: &str = "\n... [truncated]\n";
const SECTION_SEPARATOR: &str = "---\n";
/// Rough characters-per-token used when cutting the active file down.
const TRUNCATE_CHARS_PER_TOKEN: usize = 3;

/// Renders a bounded snapshot of the project's files for a prompt.
///
/// The active file is included whole when it fits, otherwise truncated
/// (which uses up the whole budget). Remaining files get a short preview
/// each, in collection order, until one does not fit; it and every file
/// after it are only listed by name. The budget is soft: sizes are
/// estimates, not an exact cap.
pub fn build_file_context(files: &FileSet, active_filename: Option<&str>, max_tokens: u32) -> String {
    if max_tokens == 0 {
        return String::new();
    }

    let mut remaining = max_tokens;
    let mut active_section = String::new();

    let active = active_filename.and_then(|name| files.get(name).map(|content| (name, content)));
    if let Some((name, content)) = active {
        let block = format_file_context_xml(name, content);
        let block_tokens = estimate_tokens(&block);
        if block_tokens <= remaining {
            remaining -= block_tokens;
            active_section = block;
        } else {
            active_section = truncate_active_file(name, content, remaining);
            remaining = 0;
        }
    }

    let mut previews = String::new();
    let mut name_only: Vec<&str> = Vec::new();
    for (name, content) in files.iter() {
        if active.is_some_and(|(active_name, _)| active_name == name) {
            continue;
        }
        if !name_only.is_empty() {
            name_only.push(name);
            continue;
        }

        let preview = format_preview(name, content);
        let tokens = estimate_tokens(&preview);
        if tokens <= remaining {
            remaining -= tokens;
            previews.push_str(&preview);
        } else {
            name_only.push(name);
        }
    }

    let mut listing = String::new();
    if !name_only.is_empty() {
        let line = format!("Other files: {}\n", name_only.join(", "));
        if estimate_tokens(&line) <= remaining {
            listing = line;
        }
    }

    let mut output = active_section;
    if !output.is_empty() && !(previews.is_empty() && listing.is_empty()) {
        output.push_str(SECTION_SEPARATOR);
    }
    output.push_str(&previews);
    output.push_str(&listing);
    output
}

fn truncate_active_file(name: &str, content: &str, budget: u32) -> String {
    let overhead = estimate_tokens(&format_file_context_xml(name, TRUNCATION_MARKER));
    let char_budget = budget.saturating_sub(overhead) as usize * TRUNCATE_CHARS_PER_TOKEN;

    let mut truncated: String = content.chars().take(char_budget).collect();
    truncated.push_str(TRUNCATION_MARKER);
    format_file_context_xml(name, &truncated)
}

fn format_preview(name: &str, content: &str) -> String {
    let head: Vec<&str> = content.lines().take(PREVIEW_LINES).collect();
    let mut preview = format!("{} (preview):\n", name);
    for line in head {
        preview.push_str(line);
        preview.push('\n');
    }
    preview
}
