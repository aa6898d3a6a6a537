//! Canonicalizes free-text mountain names into stable cache/history keys.
//!
//! "Jirisan (Cheonwangbong)" and "Jirisan" must hit the same cache entry, so
//! bracketed sub-peak qualifiers are stripped, the name is truncated after
//! the terminal mountain marker, and whitespace is collapsed. The function is
//! idempotent: `normalize(normalize(s)) == normalize(s)` for every input.

/// Terminal marker for Korean mountain names. Everything after the first
/// occurrence is a peak or course qualifier.
const HANGUL_MOUNTAIN_MARKER: char = '산';

/// Word-form marker for romanized names. Matched on word boundaries only, so
/// "Jirisan" is untouched.
const WORD_MOUNTAIN_MARKER: &str = "Mountain";

/// Canonicalize a raw place name. Empty input yields the empty string.
pub fn normalize(raw: &str) -> String {
    let stripped = strip_bracketed_spans(raw.trim());
    let truncated = truncate_after_marker(&stripped);
    collapse_whitespace(truncated)
}

/// Remove every balanced `(...)`, `[...]` and `{...}` span. Unterminated
/// openers and bare closers are kept as-is so repeated application cannot
/// remove more text.
fn strip_bracketed_spans(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut open_stack: Vec<(char, usize)> = Vec::new();
    let mut removed = vec![false; chars.len()];

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '(' | '[' | '{' => open_stack.push((c, i)),
            ')' | ']' | '}' => {
                let opener = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                // A closer only consumes a matching opener on top of the
                // stack; otherwise it is literal text.
                if let Some(&(top, start)) = open_stack.last() {
                    if top == opener {
                        open_stack.pop();
                        for flag in &mut removed[start..=i] {
                            *flag = true;
                        }
                    }
                }
            }
            _ => {}
        }
    }

    chars
        .iter()
        .zip(removed.iter())
        .filter(|(_, &r)| !r)
        .map(|(&c, _)| c)
        .collect()
}

/// Truncate immediately after the first mountain marker, if any. The Hangul
/// marker is a single terminal token matched anywhere; the word marker only
/// matches as a standalone word.
fn truncate_after_marker(input: &str) -> &str {
    let hangul_end = input
        .char_indices()
        .find(|&(_, c)| c == HANGUL_MOUNTAIN_MARKER)
        .map(|(i, c)| i + c.len_utf8());

    let word_end = find_word(input, WORD_MOUNTAIN_MARKER).map(|i| i + WORD_MOUNTAIN_MARKER.len());

    match (hangul_end, word_end) {
        (Some(h), Some(w)) => &input[..h.min(w)],
        (Some(h), None) => &input[..h],
        (None, Some(w)) => &input[..w],
        (None, None) => input,
    }
}

/// Byte offset of the first whole-word occurrence of `word` in `input`.
fn find_word(input: &str, word: &str) -> Option<usize> {
    let mut search_from = 0;
    while let Some(rel) = input[search_from..].find(word) {
        let start = search_from + rel;
        let end = start + word.len();
        let boundary_before = start == 0
            || input[..start]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_whitespace());
        let boundary_after = end == input.len()
            || input[end..].chars().next().is_some_and(|c| c.is_whitespace());
        if boundary_before && boundary_after {
            return Some(start);
        }
        search_from = end;
    }
    None
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_parenthetical_qualifier() {
        assert_eq!(normalize("Jirisan (Cheonwangbong)"), "Jirisan");
        assert_eq!(normalize("Mt.X (East Peak)"), "Mt.X");
    }

    #[test]
    fn test_strips_all_bracket_kinds() {
        assert_eq!(normalize("Hallasan [Baeknokdam] {winter}"), "Hallasan");
    }

    #[test]
    fn test_nested_brackets_removed_whole() {
        assert_eq!(normalize("Seoraksan (Daecheongbong (summit))"), "Seoraksan");
    }

    #[test]
    fn test_unterminated_brackets_left_alone() {
        assert_eq!(normalize("Bukhansan (Baegundae"), "Bukhansan (Baegundae");
        assert_eq!(normalize(")Odaesan("), ")Odaesan(");
    }

    #[test]
    fn test_whitespace_collapsed_without_markers() {
        assert_eq!(
            normalize("  Jirisan   National Park  "),
            "Jirisan National Park"
        );
    }

    #[test]
    fn test_word_marker_truncates() {
        assert_eq!(normalize("Halla Mountain Main Peak"), "Halla Mountain");
    }

    #[test]
    fn test_word_marker_requires_word_boundary() {
        // "Mountainside" is not the marker word.
        assert_eq!(normalize("Mountainside Lodge"), "Mountainside Lodge");
    }

    #[test]
    fn test_hangul_marker_truncates() {
        assert_eq!(normalize("지리산 천왕봉"), "지리산");
        assert_eq!(normalize("설악산(대청봉)"), "설악산");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_idempotence() {
        let cases = [
            "",
            "   ",
            "Jirisan (Cheonwangbong)",
            "Bukhansan (Baegundae",
            "Halla Mountain Main Peak",
            "지리산 천왕봉 코스",
            "a (b (c) d) e",
            "((((",
            "()()()",
            "  spaced   out  name  ",
            "Mountainside Lodge",
        ];
        for case in cases {
            let once = normalize(case);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", case);
        }
    }
}
