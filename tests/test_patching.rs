use codepatch::diffing::patching::{PatchOptions, apply_diff_patch, apply_diff_patch_with};
use codepatch::models::SearchReplace;

fn sr(search: &str, replace: &str) -> SearchReplace {
    SearchReplace::new(search, replace)
}

#[test]
fn test_exact_match_replaces_in_place() {
    let result = apply_diff_patch("abc\ndef", &[sr("def", "xyz")]);

    assert_eq!(result.content, "abc\nxyz");
    assert_eq!(result.applied_count, 1);
    assert_eq!(result.failed_count, 0);
    assert!(result.succeeded);
    assert!(result.failed_snippets.is_empty());
}

#[test]
fn test_exact_match_only_touches_leftmost_occurrence() {
    let result = apply_diff_patch("x = 1\nx = 1\n", &[sr("x = 1", "x = 2")]);
    assert_eq!(result.content, "x = 2\nx = 1\n");
}

#[test]
fn test_whitespace_only_search_is_an_exact_literal_match() {
    let result = apply_diff_patch("a  b", &[sr("  ", " ")]);

    assert!(result.succeeded);
    assert_eq!(result.content, "a b");
    assert_eq!(result.applied_count, 1);
}

#[test]
fn test_empty_instruction_list_is_a_successful_no_op() {
    let result = apply_diff_patch("unchanged", &[]);

    assert!(result.succeeded);
    assert_eq!(result.content, "unchanged");
    assert_eq!(result.applied_count, 0);
    assert_eq!(result.failed_count, 0);
    assert!(result.failed_snippets.is_empty());
}

#[test]
fn test_whitespace_normalized_match_ignores_indentation() {
    // GIVEN code whose indentation and spacing differ from the search text
    let original = "fn main() {\n    let  x = 1;\n    println!(\"{}\", x);\n}\n";
    let search = "let x = 1;\nprintln!(\"{}\", x);";
    let replace = "let x = 2;\nprintln!(\"{}\", x);";

    // WHEN applying
    let result = apply_diff_patch(original, &[sr(search, replace)]);

    // THEN the whole matched run is replaced verbatim, without re-indenting
    assert!(result.succeeded);
    assert_eq!(
        result.content,
        "fn main() {\nlet x = 2;\nprintln!(\"{}\", x);\n}\n"
    );
}

#[test]
fn test_whitespace_match_tolerates_surrounding_blank_lines_in_search() {
    let original = "a\n  b   c\nd";
    let result = apply_diff_patch(original, &[sr("\n\nb c\n\n", "B")]);
    assert_eq!(result.content, "a\nB\nd");
}

#[test]
fn test_fuzzy_match_accepts_single_character_typo() {
    // GIVEN a search block with one character off in a middle line
    let original = "function greet() {\n  const el = document.getElementById(\"output\");\n  if (el) el.textContent = \"Hello!\";\n}\n\ngreet();";
    let search = "function greet() {\n  const el = document.getElementById(\"outpat\");\n  if (el) el.textContent = \"Hello!\";\n}";

    // WHEN applying
    let result = apply_diff_patch(original, &[sr(search, "function greet() {}")]);

    // THEN the best window is replaced and the rest of the file survives
    assert!(result.succeeded);
    assert_eq!(result.content, "function greet() {}\n\ngreet();");
}

#[test]
fn test_fuzzy_match_picks_the_most_similar_window() {
    let original = "alpha = 1\nbeta = 2\nalpha = 10\n";
    let result = apply_diff_patch(original, &[sr("alpha = 100", "gamma = 3")]);
    assert_eq!(result.content, "alpha = 1\nbeta = 2\ngamma = 3\n");
}

#[test]
fn test_dissimilar_search_fails_and_leaves_content() {
    let result = apply_diff_patch("abc\ndef", &[sr("completely unrelated", "x")]);

    assert!(!result.succeeded);
    assert_eq!(result.content, "abc\ndef");
    assert_eq!(result.applied_count, 0);
    assert_eq!(result.failed_count, 1);
    assert_eq!(result.failed_snippets, vec!["completely unrelated".to_string()]);
}

#[test]
fn test_failed_snippet_truncated_to_eighty_chars() {
    let search = "q".repeat(120);

    let result = apply_diff_patch("abc\ndef", &[sr(&search, "x")]);

    assert_eq!(result.failed_snippets, vec![format!("{}...", "q".repeat(80))]);
}

#[test]
fn test_fuzzy_threshold_is_configurable() {
    // Half the characters differ: similarity is exactly 0.5
    let original = "abcdefghij";
    let instruction = [sr("abcdeXXXXX", "patched")];

    let strict = apply_diff_patch(original, &instruction);
    assert!(!strict.succeeded);

    let lenient = apply_diff_patch_with(
        original,
        &instruction,
        &PatchOptions {
            fuzzy_threshold: 0.5,
        },
    );
    assert!(lenient.succeeded);
    assert_eq!(lenient.content, "patched");
}

#[test]
fn test_instructions_apply_against_progressively_mutated_content() {
    // GIVEN a second instruction that targets text introduced by the first
    let original = "one\ntwo\nthree";
    let instructions = [sr("two", "2"), sr("2", "II")];

    // THEN both apply in order
    let result = apply_diff_patch(original, &instructions);
    assert_eq!(result.content, "one\nII\nthree");
    assert_eq!(result.applied_count, 2);
}

#[test]
fn test_instruction_cannot_match_text_removed_by_earlier_one() {
    let original = "one\ntwo\nthree";
    let instructions = [sr("one\n", ""), sr("one", "1")];

    let result = apply_diff_patch(original, &instructions);

    assert_eq!(result.content, "two\nthree");
    assert_eq!(result.applied_count, 1);
    assert_eq!(result.failed_count, 1);
    assert!(!result.succeeded);
    assert_eq!(result.failed_snippets, vec!["one".to_string()]);
}

#[test]
fn test_failures_interleave_with_successes() {
    let original = "a = 1\nb = 2\nc = 3\n";
    let instructions = [
        sr("a = 1", "a = 10"),
        sr("zzzzzzzzzzzz", "nope"),
        sr("c = 3", "c = 30"),
    ];

    let result = apply_diff_patch(original, &instructions);

    assert_eq!(result.content, "a = 10\nb = 2\nc = 30\n");
    assert_eq!(result.applied_count + result.failed_count, instructions.len());
    assert_eq!(result.failed_count, 1);
}

#[test]
fn test_each_call_starts_from_its_own_original() {
    let original = "value";
    let first = apply_diff_patch(original, &[sr("value", "changed")]);
    let second = apply_diff_patch(original, &[sr("value", "other")]);
    assert_eq!(first.content, "changed");
    assert_eq!(second.content, "other");
}
