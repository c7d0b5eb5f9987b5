#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Students,
    Schools,
    Scholarships,
    Progress,
}

impl Metric {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Schools => "schools",
            Self::Scholarships => "scholarships",
            Self::Progress => "progress",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Students),
            1 => Some(Self::Schools),
            2 => Some(Self::Scholarships),
            3 => Some(Self::Progress),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "students" => Some(Self::Students),
            "schools" => Some(Self::Schools),
            "scholarships" => Some(Self::Scholarships),
            "progress" => Some(Self::Progress),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Students => "Students",
            Self::Schools => "Schools",
            Self::Scholarships => "Scholarships",
            Self::Progress => "Avg Progress",
        }
    }

    pub const ALL: [Self; 4] = [
        Self::Students,
        Self::Schools,
        Self::Scholarships,
        Self::Progress,
    ];
}

/// Filter controls in declaration order. The query builder walks this order,
/// so the data URL and the report-download URL stay byte-identical for the
/// same selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    Year,
    State,
    Scheme,
    Category,
}

impl FilterKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::State => "state",
            Self::Scheme => "scheme",
            Self::Category => "category",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Year),
            1 => Some(Self::State),
            2 => Some(Self::Scheme),
            3 => Some(Self::Category),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Year => "Year",
            Self::State => "State",
            Self::Scheme => "Scheme",
            Self::Category => "Category",
        }
    }

    pub const ALL: [Self; 4] = [Self::Year, Self::State, Self::Scheme, Self::Category];
}

/// Lowercases a status label and turns whitespace runs into hyphens, the
/// styling hook the initiatives table keys row colors off ("On Track" ->
/// "on-track").
pub fn status_slug(status: &str) -> String {
    status
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_round_trips_through_parse() {
        for (index, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(Metric::from_index(index), Some(*metric));
            assert_eq!(Metric::parse(metric.as_str()), Some(*metric));
        }
        assert_eq!(Metric::from_index(4), None);
        assert_eq!(Metric::parse("enrolment"), None);
    }

    #[test]
    fn filter_keys_keep_declaration_order() {
        let names: Vec<&str> = FilterKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["year", "state", "scheme", "category"]);
    }

    #[test]
    fn status_slug_flattens_case_and_whitespace() {
        assert_eq!(status_slug("On Track"), "on-track");
        assert_eq!(status_slug("  At   Risk "), "at-risk");
        assert_eq!(status_slug("Completed"), "completed");
        assert_eq!(status_slug(""), "");
    }
}
