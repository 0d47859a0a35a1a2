/// Capitalize the first letter of each space-separated word and lower-case
/// the rest. Applying it twice gives the same result as once, except for
/// letters whose upper case is longer than one character (`ß` becomes `SS`).
pub fn title_case(s: &str) -> String {
    s.to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a multi-valued cell. Newlines win over commas when both appear.
/// Items are trimmed and empty items dropped.
pub fn split_list(value: &str) -> Vec<String> {
    let value = value.trim();
    if value.is_empty() {
        return Vec::new();
    }

    let separator = if value.contains('\n') { '\n' } else { ',' };
    value
        .split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Whether a state value names California ("CA" or "California", any case).
pub fn is_california(state: &str) -> bool {
    let state = state.trim();
    state.eq_ignore_ascii_case("ca") || state.eq_ignore_ascii_case("california")
}

/// Distinct values in plain byte order.
pub fn dedup_sorted<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut values: Vec<String> = values.into_iter().collect();
    values.sort();
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("jane DOE"), "Jane Doe");
        assert_eq!(title_case("san luis obispo"), "San Luis Obispo");
        assert_eq!(title_case(""), "");
        // Only spaces delimit words
        assert_eq!(title_case("mary-kate o'neil"), "Mary-kate O'neil");
        assert_eq!(title_case("two  spaces"), "Two  Spaces");
    }

    #[test]
    fn test_title_case_idempotent() {
        for input in ["jane DOE", "PANCHAKARMA therapy", "  padded  ", "a b c", "éLODIE"] {
            let once = title_case(input);
            assert_eq!(title_case(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_title_case_expanding_capital() {
        let once = title_case("ßen");
        assert_eq!(once, "SSen");
        assert_eq!(title_case(&once), "Ssen");
    }

    #[test]
    fn test_split_list_comma() {
        assert_eq!(split_list("Yoga, Nutrition ,, Herbs"), vec!["Yoga", "Nutrition", "Herbs"]);
        assert!(split_list("   ").is_empty());
    }

    #[test]
    fn test_split_list_newline_wins() {
        assert_eq!(
            split_list("Pulse reading, basics\nMarma\n\n"),
            vec!["Pulse reading, basics", "Marma"]
        );
    }

    #[test]
    fn test_is_california() {
        assert!(is_california("CA"));
        assert!(is_california(" california "));
        assert!(is_california("California"));
        assert!(!is_california("OR"));
        assert!(!is_california(""));
    }

    #[test]
    fn test_dedup_sorted() {
        let values = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(dedup_sorted(values), vec!["a", "b"]);
    }
}
