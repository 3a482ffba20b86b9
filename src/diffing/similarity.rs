/// Inputs longer than this (in characters) skip edit distance and fall back
/// to a per-line comparison, keeping the DP table bounded.
pub const LEVENSHTEIN_MAX_CHARS: usize = 2000;

/// Normalized textual similarity in `[0, 1]`.
///
/// Identical strings score 1 and an empty string against a non-empty one
/// scores 0. Up to [`LEVENSHTEIN_MAX_CHARS`] characters on both sides the
/// score is `1 - levenshtein / max_len`; beyond that it is the share of
/// index-aligned lines that are equal after trimming.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.len() <= LEVENSHTEIN_MAX_CHARS && b_chars.len() <= LEVENSHTEIN_MAX_CHARS {
        let distance = levenshtein_distance(&a_chars, &b_chars);
        let longest = a_chars.len().max(b_chars.len());
        1.0 - distance as f64 / longest as f64
    } else {
        line_match_ratio(a, b)
    }
}

/// Unit-cost insert/delete/substitute distance over characters.
pub fn levenshtein_distance(a: &[char], b: &[char]) -> usize {
    let (m, n) = (a.len(), b.len());

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            let deletion = prev[j] + 1;
            let insertion = curr[j - 1] + 1;
            let substitution = prev[j - 1] + cost;
            curr[j] = deletion.min(insertion).min(substitution);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

fn line_match_ratio(a: &str, b: &str) -> f64 {
    let a_lines: Vec<&str> = a.split('\n').collect();
    let b_lines: Vec<&str> = b.split('\n').collect();

    let matching = a_lines
        .iter()
        .zip(&b_lines)
        .filter(|(x, y)| x.trim() == y.trim())
        .count();

    matching as f64 / a_lines.len().max(b_lines.len()) as f64
}
