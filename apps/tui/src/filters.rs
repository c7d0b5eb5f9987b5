use crate::domain::FilterKey;

/// Current value of every filter control. `None` means "All" — the key is
/// omitted from the derived query entirely, never sent as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub year: Option<String>,
    pub state: Option<String>,
    pub scheme: Option<String>,
    pub category: Option<String>,
}

impl FilterSet {
    pub fn get(&self, key: FilterKey) -> Option<&str> {
        let value = match key {
            FilterKey::Year => self.year.as_deref(),
            FilterKey::State => self.state.as_deref(),
            FilterKey::Scheme => self.scheme.as_deref(),
            FilterKey::Category => self.category.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, key: FilterKey, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        match key {
            FilterKey::Year => self.year = value,
            FilterKey::State => self.state = value,
            FilterKey::Scheme => self.scheme = value,
            FilterKey::Category => self.category = value,
        }
    }

    /// Builds the canonical query string: non-empty filters only, keys in
    /// declaration order, values percent-encoded. Empty when nothing is
    /// selected (callers decide whether to append a `?`).
    pub fn query_string(&self) -> String {
        let mut pairs = Vec::new();
        for key in FilterKey::ALL {
            if let Some(value) = self.get(key) {
                pairs.push(format!("{}={}", key.as_str(), urlencoding::encode(value)));
            }
        }
        pairs.join("&")
    }

    pub fn is_empty(&self) -> bool {
        FilterKey::ALL.iter().all(|key| self.get(*key).is_none())
    }
}

/// Selectable values for each filter control, fetched once from the meta
/// endpoint. Falls back to a static year list when the endpoint is down so
/// the controls stay usable.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub years: Vec<String>,
    pub states: Vec<String>,
    pub schemes: Vec<String>,
    pub categories: Vec<String>,
}

impl FilterOptions {
    pub fn fallback() -> Self {
        Self {
            years: vec!["2023".to_string(), "2024".to_string(), "2025".to_string()],
            states: Vec::new(),
            schemes: Vec::new(),
            categories: Vec::new(),
        }
    }

    pub fn options_for(&self, key: FilterKey) -> &[String] {
        match key {
            FilterKey::Year => &self.years,
            FilterKey::State => &self.states,
            FilterKey::Scheme => &self.schemes,
            FilterKey::Category => &self.categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_produce_empty_query() {
        let filters = FilterSet::default();
        assert_eq!(filters.query_string(), "");
        assert!(filters.is_empty());
    }

    #[test]
    fn query_omits_absent_and_empty_values() {
        let mut filters = FilterSet::default();
        filters.set(FilterKey::Year, Some("2024".to_string()));
        filters.set(FilterKey::State, Some(String::new()));
        filters.set(FilterKey::Category, Some("Scholarships".to_string()));
        assert_eq!(filters.query_string(), "year=2024&category=Scholarships");
    }

    #[test]
    fn query_keeps_declaration_order_regardless_of_set_order() {
        let mut filters = FilterSet::default();
        filters.set(FilterKey::Category, Some("Infrastructure".to_string()));
        filters.set(FilterKey::Year, Some("2023".to_string()));
        filters.set(FilterKey::Scheme, Some("PM SHRI Schools".to_string()));
        assert_eq!(
            filters.query_string(),
            "year=2023&scheme=PM%20SHRI%20Schools&category=Infrastructure"
        );
    }

    #[test]
    fn clearing_a_filter_removes_its_key() {
        let mut filters = FilterSet::default();
        filters.set(FilterKey::State, Some("Kerala".to_string()));
        assert_eq!(filters.query_string(), "state=Kerala");
        filters.set(FilterKey::State, None);
        assert_eq!(filters.query_string(), "");
    }
}
