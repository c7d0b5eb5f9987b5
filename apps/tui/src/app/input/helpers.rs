pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Best fuzzy match for `input` among `options`, used by the state-filter
/// quick search. Ties break toward the earlier option.
pub fn best_fuzzy_match<'a>(options: &'a [String], input: &str) -> Option<&'a str> {
    use fuzzy_matcher::skim::SkimMatcherV2;
    use fuzzy_matcher::FuzzyMatcher;

    if input.is_empty() {
        return None;
    }

    let matcher = SkimMatcherV2::default();
    options
        .iter()
        .filter_map(|option| {
            matcher
                .fuzzy_match(option, input)
                .map(|score| (score, option))
        })
        .max_by_key(|(score, _)| *score)
        .map(|(_, option)| option.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_covers_both_edges() {
        assert_eq!(wrap_increment(0, 3), 1);
        assert_eq!(wrap_increment(2, 3), 0);
        assert_eq!(wrap_decrement(0, 3), 2);
        assert_eq!(wrap_decrement(2, 3), 1);
        assert_eq!(wrap_increment(0, 0), 0);
        assert_eq!(wrap_decrement(0, 0), 0);
    }

    #[test]
    fn fuzzy_match_finds_abbreviated_states() {
        let options = vec![
            "Madhya Pradesh".to_string(),
            "Maharashtra".to_string(),
            "Tamil Nadu".to_string(),
        ];
        assert_eq!(best_fuzzy_match(&options, "tn"), Some("Tamil Nadu"));
        assert_eq!(best_fuzzy_match(&options, ""), None);
        assert_eq!(best_fuzzy_match(&options, "zzz"), None);
    }
}
