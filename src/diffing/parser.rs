use crate::models::{EditBlock, FileSet, ParsedResponse, ResponseKind, SearchReplace};
use regex::Regex;
use std::sync::LazyLock;

static FILE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\[FILE:(?P<name>[^\]]+)\](?P<content>.*?)\[/FILE\]").unwrap()
});

static EDIT_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\[EDIT:(?P<name>[^\]]+)\](?P<body>.*?)\[/EDIT\]").unwrap()
});

// Each section owns the newline that ends it and is lazily optional, so an
// empty SEARCH or REPLACE closes on the very next marker.
static SEARCH_REPLACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)<<<<<<< SEARCH\r?\n(?:(?P<search>.*?)\r?\n)??=======\r?\n(?:(?P<replace>.*?)\r?\n)??>>>>>>> REPLACE",
    )
    .unwrap()
});

static BLOCK_OPENER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(?P<tag>FILE|EDIT):(?P<name>[^\]]+)\]").unwrap());

/// Extracts full-file blocks, edit blocks and commentary from a model reply.
///
/// Model output is untrusted free text: markup that does not match the
/// grammar is left in the commentary and never reported as an error.
pub fn parse_ai_response(text: &str) -> ParsedResponse {
    let mut full_files = FileSet::new();
    for caps in FILE_BLOCK_RE.captures_iter(text) {
        let name = caps["name"].trim();
        let content = caps["content"].trim();
        full_files.insert(name, content);
    }

    let edits: Vec<EditBlock> = EDIT_BLOCK_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let instructions = parse_search_replace_triples(&caps["body"]);
            if instructions.is_empty() {
                return None;
            }
            Some(EditBlock {
                filename: caps["name"].trim().to_string(),
                instructions,
            })
        })
        .collect();

    let commentary = strip_blocks(text).trim().to_string();

    ParsedResponse {
        kind: ResponseKind::classify(!full_files.is_empty(), !edits.is_empty()),
        full_files,
        edits,
        commentary,
    }
}

/// Extracts the `SEARCH`/`REPLACE` triples of one edit body in textual order.
pub fn parse_search_replace_triples(body: &str) -> Vec<SearchReplace> {
    SEARCH_REPLACE_RE
        .captures_iter(body)
        .map(|caps| {
            let section = |name: &str| caps.name(name).map_or("", |m| m.as_str());
            SearchReplace::new(section("search"), section("replace"))
        })
        .collect()
}

/// Names of `[FILE:..]`/`[EDIT:..]` openers that never found their closer.
///
/// Purely diagnostic: `parse_ai_response` treats such markup as commentary
/// either way.
pub fn find_unterminated_blocks(text: &str) -> Vec<String> {
    let residual = strip_blocks(text);
    BLOCK_OPENER_RE
        .captures_iter(&residual)
        .map(|caps| format!("{}:{}", &caps["tag"], caps["name"].trim()))
        .collect()
}

fn strip_blocks(text: &str) -> String {
    let without_files = FILE_BLOCK_RE.replace_all(text, "");
    EDIT_BLOCK_RE.replace_all(&without_files, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triples_allow_multiline_and_empty_replace() {
        let body = "<<<<<<< SEARCH\na\nb\n=======\n\n>>>>>>> REPLACE";
        let triples = parse_search_replace_triples(body);
        assert_eq!(triples, vec![SearchReplace::new("a\nb", "")]);
    }

    #[test]
    fn test_deletion_triple_does_not_swallow_the_next_one() {
        let body = "<<<<<<< SEARCH\nold line\n=======\n>>>>>>> REPLACE\n\
                    <<<<<<< SEARCH\nfoo\n=======\nbar\n>>>>>>> REPLACE";
        assert_eq!(
            parse_search_replace_triples(body),
            vec![
                SearchReplace::new("old line", ""),
                SearchReplace::new("foo", "bar"),
            ]
        );
    }

    #[test]
    fn test_empty_search_section_closes_on_separator() {
        let body = "<<<<<<< SEARCH\n=======\nfresh\n>>>>>>> REPLACE\n\
                    <<<<<<< SEARCH\nx\n=======\ny\n>>>>>>> REPLACE";
        assert_eq!(
            parse_search_replace_triples(body),
            vec![SearchReplace::new("", "fresh"), SearchReplace::new("x", "y")]
        );
    }

    #[test]
    fn test_find_unterminated_blocks_ignores_closed_ones() {
        let text = "[FILE:a.txt]x[/FILE]\n[EDIT:b.txt]\n<<<<<<< SEARCH";
        assert_eq!(find_unterminated_blocks(text), vec!["EDIT:b.txt"]);
    }
}
