use crate::diffing::similarity::similarity;
use crate::models::{ApplyResult, SearchReplace};

pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;
pub const FAILED_SNIPPET_CHARS: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchOptions {
    /// Minimum average per-line similarity for a fuzzy window match.
    pub fuzzy_threshold: f64,
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchStrategy {
    Exact,
    Whitespace,
    Fuzzy,
}

/// Applies `instructions` in order to `original_content` with default options.
pub fn apply_diff_patch(original_content: &str, instructions: &[SearchReplace]) -> ApplyResult {
    apply_diff_patch_with(original_content, instructions, &PatchOptions::default())
}

/// Applies `instructions` in order, each against the content left by the
/// ones before it. A failed instruction leaves the content untouched and
/// is reported in `failed_snippets`; later instructions still run.
pub fn apply_diff_patch_with(
    original_content: &str,
    instructions: &[SearchReplace],
    options: &PatchOptions,
) -> ApplyResult {
    if instructions.is_empty() {
        return ApplyResult::unchanged(original_content);
    }

    let mut content = original_content.to_string();
    let mut applied_count = 0;
    let mut failed_snippets = Vec::new();

    for (idx, instruction) in instructions.iter().enumerate() {
        match create_patched_content(&content, &instruction.search, &instruction.replace, options)
        {
            Some((patched, strategy)) => {
                tracing::debug!(instruction = idx, ?strategy, "applied search/replace");
                content = patched;
                applied_count += 1;
            }
            None => {
                let snippet = truncate_snippet(&instruction.search);
                tracing::warn!(instruction = idx, search = %snippet, "search block not found");
                failed_snippets.push(snippet);
            }
        }
    }

    let failed_count = failed_snippets.len();
    ApplyResult {
        succeeded: failed_count == 0,
        content,
        applied_count,
        failed_count,
        failed_snippets,
    }
}

fn create_patched_content(
    original: &str,
    search: &str,
    replace: &str,
    options: &PatchOptions,
) -> Option<(String, MatchStrategy)> {
    // Stage 1: Exact match
    if let Some(patched) = try_exact_string_patch(original, search, replace) {
        return Some((patched, MatchStrategy::Exact));
    }

    // Stage 2: Whitespace-normalized line match
    if let Some(patched) = try_whitespace_flexible_patch(original, search, replace) {
        return Some((patched, MatchStrategy::Whitespace));
    }

    // Stage 3: Best fuzzy line window
    try_fuzzy_window_patch(original, search, replace, options.fuzzy_threshold)
        .map(|patched| (patched, MatchStrategy::Fuzzy))
}

fn try_exact_string_patch(original: &str, search: &str, replace: &str) -> Option<String> {
    // Creating a file: nothing to find in nothing.
    if search.is_empty() && original.is_empty() {
        return Some(replace.to_string());
    }

    // An empty needle matches everywhere; it never prepends to existing text.
    if search.is_empty() {
        return None;
    }

    // Only the leftmost occurrence is replaced.
    let idx = original.find(search)?;
    let mut res = String::with_capacity(original.len() - search.len() + replace.len());
    res.push_str(&original[..idx]);
    res.push_str(replace);
    res.push_str(&original[idx + search.len()..]);
    Some(res)
}

fn try_whitespace_flexible_patch(original: &str, search: &str, replace: &str) -> Option<String> {
    let search_lines = normalize_block(search);
    if search_lines.is_empty() {
        return None;
    }

    let lines = split_lines_with_spans(original);
    if search_lines.len() > lines.len() {
        return None;
    }

    let start = (0..=lines.len() - search_lines.len()).find(|&i| {
        lines[i..i + search_lines.len()]
            .iter()
            .zip(&search_lines)
            .all(|(line, wanted)| normalize_line(line.text) == *wanted)
    })?;

    let first = &lines[start];
    let last = &lines[start + search_lines.len() - 1];
    Some(splice(original, first.start, last.end, replace))
}

fn try_fuzzy_window_patch(
    original: &str,
    search: &str,
    replace: &str,
    threshold: f64,
) -> Option<String> {
    let search_lines: Vec<&str> = search.lines().map(str::trim).collect();
    // Blank lines score 1.0 against any blank line.
    if search_lines.iter().all(|l| l.is_empty()) {
        return None;
    }

    let lines = split_lines_with_spans(original);
    if search_lines.len() > lines.len() {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for start in 0..=lines.len() - search_lines.len() {
        let total: f64 = lines[start..start + search_lines.len()]
            .iter()
            .zip(&search_lines)
            .map(|(line, wanted)| similarity(line.text.trim(), wanted))
            .sum();
        let average = total / search_lines.len() as f64;
        if best.is_none_or(|(_, score)| average > score) {
            best = Some((start, average));
        }
    }

    let (start, score) = best?;
    if score < threshold {
        tracing::debug!(score, threshold, "best fuzzy window below threshold");
        return None;
    }

    let first = &lines[start];
    let last = &lines[start + search_lines.len() - 1];
    Some(splice(original, first.start, last.end, replace))
}

/// A line of the original text and its byte span, line terminator excluded.
struct LineSpan<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

fn split_lines_with_spans(text: &str) -> Vec<LineSpan<'_>> {
    let mut spans = Vec::new();
    let mut offset = 0;
    for raw in text.split_inclusive('\n') {
        let body = raw.trim_end_matches(['\n', '\r']);
        spans.push(LineSpan {
            text: body,
            start: offset,
            end: offset + body.len(),
        });
        offset += raw.len();
    }
    spans
}

fn splice(original: &str, start: usize, end: usize, replacement: &str) -> String {
    let mut res = String::with_capacity(original.len() - (end - start) + replacement.len());
    res.push_str(&original[..start]);
    res.push_str(replacement);
    res.push_str(&original[end..]);
    res
}

/// Trims a line and collapses each internal whitespace run to one space.
fn normalize_line(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes every line and drops leading and trailing blank lines.
fn normalize_block(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.split('\n').map(normalize_line).collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|l| l.is_empty()).count();
    lines.drain(..leading);
    lines
}

fn truncate_snippet(search: &str) -> String {
    if search.chars().count() > FAILED_SNIPPET_CHARS {
        let head: String = search.chars().take(FAILED_SNIPPET_CHARS).collect();
        format!("{}...", head)
    } else {
        search.to_string()
    }
}
