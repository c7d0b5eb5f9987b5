/// Number formatting for KPI cards and popups. Counts use Indian-system
/// digit grouping (last three digits, then groups of two: 1234567 ->
/// "12,34,567"), matching how the backend reports are read.
pub fn group_count(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut parts = Vec::new();
        let head_bytes = head.as_bytes();
        let mut index = head_bytes.len();
        while index > 0 {
            let start = index.saturating_sub(2);
            parts.push(&head[start..index]);
            index = start;
        }
        parts.reverse();
        format!("{},{}", parts.join(","), tail)
    };

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Percentage with two decimal places, the KPI-card contract for the
/// average-progress figure.
pub fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_counts_are_unchanged() {
        assert_eq!(group_count(0), "0");
        assert_eq!(group_count(42), "42");
        assert_eq!(group_count(999), "999");
    }

    #[test]
    fn counts_group_indian_style() {
        assert_eq!(group_count(1000), "1,000");
        assert_eq!(group_count(100_000), "1,00,000");
        assert_eq!(group_count(1_234_567), "12,34,567");
        assert_eq!(group_count(1_23_45_67_890), "1,23,45,67,890");
    }

    #[test]
    fn negative_counts_keep_the_sign_outside_the_groups() {
        assert_eq!(group_count(-1_234_567), "-12,34,567");
    }

    #[test]
    fn percent_renders_two_decimals() {
        assert_eq!(percent(42.5), "42.50%");
        assert_eq!(percent(0.0), "0.00%");
        assert_eq!(percent(99.999), "100.00%");
    }
}
