// src/insights.rs
//! Short extractive summary: the first sentences that mention an industry
//! term, or a truncated lead when none do.

const MAX_SENTENCES: usize = 3;
const FALLBACK_CHARS: usize = 300;
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Default)]
pub struct InsightExtractor {
    terms: Vec<String>,
}

impl InsightExtractor {
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Self {
        let terms = terms
            .iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    pub fn extract(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let picked: Vec<&str> = split_sentences(text)
            .into_iter()
            .filter(|s| self.mentions_term(s))
            .take(MAX_SENTENCES)
            .collect();

        if !picked.is_empty() {
            return picked.join(" ");
        }

        let mut out: String = text.chars().take(FALLBACK_CHARS).collect();
        if text.chars().count() > FALLBACK_CHARS {
            out.push_str(ELLIPSIS);
        }
        out
    }

    fn mentions_term(&self, sentence: &str) -> bool {
        let lowered = sentence.to_lowercase();
        self.terms.iter().any(|t| lowered.contains(t.as_str()))
    }
}

/// Split after `.`, `!` or `?` when followed by whitespace. The punctuation
/// stays with its sentence and the whole whitespace run is dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let end = i + c.len_utf8();
        let mut next_start = end;
        while let Some(&(j, w)) = iter.peek() {
            if !w.is_whitespace() {
                break;
            }
            next_start = j + w.len_utf8();
            iter.next();
        }
        if next_start > end {
            out.push(&text[start..end]);
            start = next_start;
        }
    }
    out.push(&text[start..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> InsightExtractor {
        InsightExtractor::new(&["production", "drilling", "billion"])
    }

    #[test]
    fn splits_on_terminal_punctuation_followed_by_space() {
        assert_eq!(
            split_sentences("One. Two!  Three?\nFour"),
            vec!["One.", "Two!", "Three?", "Four"]
        );
        assert_eq!(split_sentences("v1.2 release"), vec!["v1.2 release"]);
        assert_eq!(split_sentences("Ends here. "), vec!["Ends here.", ""]);
    }

    #[test]
    fn keeps_at_most_three_matching_sentences() {
        let text = "Drilling began. Weather was fine. Production rose. \
                    A billion was spent. More drilling planned.";
        assert_eq!(
            extractor().extract(text),
            "Drilling began. Production rose. A billion was spent."
        );
    }

    #[test]
    fn falls_back_to_truncated_lead() {
        let text = "x".repeat(301);
        let out = extractor().extract(&text);
        assert_eq!(out, format!("{}...", "x".repeat(300)));

        let short = "Nothing relevant here";
        assert_eq!(extractor().extract(short), short);
    }

    #[test]
    fn exactly_300_chars_gets_no_ellipsis() {
        let text = "y".repeat(300);
        assert_eq!(extractor().extract(&text), text);
    }

    #[test]
    fn empty_in_empty_out() {
        assert_eq!(extractor().extract(""), "");
    }
}
