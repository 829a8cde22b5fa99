use super::names::NameCorrection;

/// One player's recognized score, e.g. `("Alice", "12.5M")`.
///
/// `score` is a decimal number followed by a magnitude suffix (M, B or T).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: String,
}

/// Pairs up the tokens read from one region as `(name, score)`.
///
/// Exactly two tokens form one pair. A longer even-length list is a region
/// holding several stacked rows and is split into consecutive pairs. Odd or
/// single-token lists can't be paired reliably and yield nothing.
pub fn pair_tokens(tokens: &[String]) -> Vec<(String, String)> {
    if tokens.len() < 2 || tokens.len() % 2 != 0 {
        return Vec::new();
    }
    tokens
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}

/// Whether `text` reads as a decimal number.
///
/// Surrounding whitespace is ignored, and single underscores between digits
/// are accepted as separators (`1_000.5`).
fn is_number(text: &str) -> bool {
    let text = text.trim();
    if text.contains('_') {
        let bytes = text.as_bytes();
        let separators_ok = bytes.iter().enumerate().all(|(i, &b)| {
            b != b'_'
                || (i > 0
                    && i + 1 < bytes.len()
                    && bytes[i - 1].is_ascii_digit()
                    && bytes[i + 1].is_ascii_digit())
        });
        return separators_ok && text.replace('_', "").parse::<f64>().is_ok();
    }
    text.parse::<f64>().is_ok()
}

/// Fixes common OCR misreads in a score and validates it.
///
/// Every `O` becomes `0`. Everything but the last character must then parse
/// as a number, otherwise `None`. A trailing `8` is read as `B`, and a
/// trailing `1`, `7` or `t` as `T`. The number text is kept as read, spaces
/// included.
pub fn correct_score(raw: &str) -> Option<String> {
    let value = raw.replace('O', "0");
    let (suffix_at, suffix) = value.char_indices().last()?;
    let number = &value[..suffix_at];
    if !is_number(number) {
        return None;
    }

    let suffix = match suffix {
        '8' => 'B',
        '1' | '7' | 't' => 'T',
        other => other,
    };
    Some(format!("{}{}", number, suffix))
}

/// Turns the token lists of one image into corrected score entries.
///
/// Pairs whose score fails validation are dropped silently.
pub fn parse_regions(token_lists: &[Vec<String>], names: &NameCorrection) -> Vec<ScoreEntry> {
    token_lists
        .iter()
        .flat_map(|tokens| pair_tokens(tokens))
        .filter_map(|(name, raw_score)| {
            let score = correct_score(&raw_score)?;
            Some(ScoreEntry {
                name: names.correct(&name).to_string(),
                score,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pair_two_tokens() {
        let pairs = pair_tokens(&strings(&["Alice", "12.5M"]));
        assert_eq!(pairs, vec![("Alice".to_string(), "12.5M".to_string())]);
    }

    #[test]
    fn test_pair_stacked_rows() {
        let pairs = pair_tokens(&strings(&["Alice", "12.5M", "Bob", "8.3M"]));
        assert_eq!(
            pairs,
            vec![
                ("Alice".to_string(), "12.5M".to_string()),
                ("Bob".to_string(), "8.3M".to_string()),
            ]
        );
    }

    #[test]
    fn test_pair_odd_or_short_lists_dropped() {
        assert!(pair_tokens(&strings(&["Alice", "12.5M", "Bob"])).is_empty());
        assert!(pair_tokens(&strings(&["Alice"])).is_empty());
        assert!(pair_tokens(&[]).is_empty());
    }

    #[test]
    fn test_correct_score_passthrough() {
        assert_eq!(correct_score("12.5M").as_deref(), Some("12.5M"));
        assert_eq!(correct_score("3B").as_deref(), Some("3B"));
    }

    #[test]
    fn test_correct_score_letter_o() {
        assert_eq!(correct_score("1O.5M").as_deref(), Some("10.5M"));
        assert_eq!(correct_score("OO7M").as_deref(), Some("007M"));
    }

    #[test]
    fn test_correct_score_eight_is_billion() {
        assert_eq!(correct_score("4.28").as_deref(), Some("4.2B"));
        assert_eq!(correct_score("108").as_deref(), Some("10B"));
    }

    #[test]
    fn test_correct_score_trillion_lookalikes() {
        assert_eq!(correct_score("1.51").as_deref(), Some("1.5T"));
        assert_eq!(correct_score("2.07").as_deref(), Some("2.0T"));
        assert_eq!(correct_score("9.9t").as_deref(), Some("9.9T"));
    }

    #[test]
    fn test_correct_score_rejects_non_numeric() {
        assert_eq!(correct_score("abcM"), None);
        assert_eq!(correct_score("M"), None);
        assert_eq!(correct_score("5"), None);
        assert_eq!(correct_score(""), None);
        assert_eq!(correct_score("12,5M"), None);
        assert_eq!(correct_score("  M"), None);
    }

    #[test]
    fn test_correct_score_tolerates_spaces() {
        // Tesseract word grouping joins "12.5" and "M" with a space
        assert_eq!(correct_score("12.5 M").as_deref(), Some("12.5 M"));
        assert_eq!(correct_score(" 3.18").as_deref(), Some(" 3.1B"));
    }

    #[test]
    fn test_correct_score_digit_separators() {
        assert_eq!(correct_score("1_000M").as_deref(), Some("1_000M"));
        assert_eq!(correct_score("_1M"), None);
        assert_eq!(correct_score("1__0M"), None);
        assert_eq!(correct_score("1._5M"), None);
    }

    #[test]
    fn test_parse_regions_applies_names_and_drops_bad_pairs() {
        let names = NameCorrection::from_map(HashMap::from([(
            "A1ice".to_string(),
            "Alice".to_string(),
        )]));
        let regions = vec![
            strings(&["A1ice", "12.5M"]),
            strings(&["Bob", "bad"]),
            strings(&["Carol", "1.28", "Dave", "3.O1"]),
            strings(&["Lonely"]),
        ];

        let entries = parse_regions(&regions, &names);

        let got: Vec<(&str, &str)> = entries
            .iter()
            .map(|e| (e.name.as_str(), e.score.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![("Alice", "12.5M"), ("Carol", "1.2B"), ("Dave", "3.0T")]
        );
    }
}
