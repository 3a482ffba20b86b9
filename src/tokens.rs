/// Characters-per-token for pure Latin text.
const LATIN_CHARS_PER_TOKEN: f64 = 4.0;
/// How much a fully CJK text lowers the characters-per-token ratio.
const CJK_RATIO_DISCOUNT: f64 = 2.0;

fn is_cjk(c: char) -> bool {
    matches!(
        c as u32,
        0x3040..=0x30FF     // Hiragana, Katakana
            | 0x3400..=0x4DBF // CJK Extension A
            | 0x4E00..=0x9FFF // CJK Unified Ideographs
            | 0xAC00..=0xD7AF // Hangul Syllables
            | 0xF900..=0xFAFF // CJK Compatibility Ideographs
    )
}

/// Approximate token count of `text`.
///
/// Latin text is counted at ~4 characters per token; CJK scripts pack more
/// meaning per character, so the ratio slides linearly down to 2 as the
/// share of CJK characters approaches 100%.
pub fn estimate_tokens(text: &str) -> u32 {
    let mut total = 0usize;
    let mut cjk = 0usize;
    for c in text.chars() {
        total += 1;
        if is_cjk(c) {
            cjk += 1;
        }
    }

    if total == 0 {
        return 0;
    }

    let ratio = cjk as f64 / total as f64;
    let chars_per_token = LATIN_CHARS_PER_TOKEN - CJK_RATIO_DISCOUNT * ratio;
    (total as f64 / chars_per_token).ceil() as u32
}

/// Running token estimate for text produced in pieces.
///
/// Characters are tallied as they arrive and the ratio is applied once at
/// the end, so the result equals `estimate_tokens` of the concatenation.
#[derive(Debug, Default, Clone)]
pub struct TokenCounter {
    total_chars: usize,
    cjk_chars: usize,
}

impl TokenCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_str(&mut self, s: &str) {
        for c in s.chars() {
            self.total_chars += 1;
            if is_cjk(c) {
                self.cjk_chars += 1;
            }
        }
    }

    pub fn count(&self) -> u32 {
        if self.total_chars == 0 {
            return 0;
        }
        let ratio = self.cjk_chars as f64 / self.total_chars as f64;
        let chars_per_token = LATIN_CHARS_PER_TOKEN - CJK_RATIO_DISCOUNT * ratio;
        (self.total_chars as f64 / chars_per_token).ceil() as u32
    }
}

impl std::fmt::Write for TokenCounter {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.add_str(s);
        Ok(())
    }
}

/// Sum of the per-message estimates (each message rounds up on its own).
pub fn count_tokens_for_messages(messages: &[&str]) -> u32 {
    messages.iter().map(|m| estimate_tokens(m)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens_empty() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn test_estimate_tokens_ascii_rounds_up() {
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens("abcdefgh"), 2);
    }

    #[test]
    fn test_estimate_tokens_pure_cjk() {
        assert_eq!(estimate_tokens("你好世界"), 2);
        assert_eq!(estimate_tokens("안녕하세요"), 3);
    }

    #[test]
    fn test_counter_matches_estimate_of_concatenation() {
        let mut counter = TokenCounter::new();
        counter.add_str("hello ");
        counter.add_str("世界");
        assert_eq!(counter.count(), estimate_tokens("hello 世界"));
    }
}
