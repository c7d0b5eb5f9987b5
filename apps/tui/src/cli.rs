use clap::Parser;

use crate::domain::FilterKey;
use crate::filters::FilterSet;

#[derive(Debug, Parser)]
#[command(name = "edudash-tui", version, about = "Education initiatives dashboard TUI")]
pub struct CliArgs {
    /// Fetch once, print the dashboard and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Override the API base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the bootstrap payload path
    #[arg(long, value_name = "PATH")]
    pub bootstrap: Option<String>,

    /// Preselect the year filter
    #[arg(long)]
    pub year: Option<String>,

    /// Preselect the state filter
    #[arg(long)]
    pub state: Option<String>,

    /// Preselect the scheme filter
    #[arg(long)]
    pub scheme: Option<String>,

    /// Preselect the category filter
    #[arg(long)]
    pub category: Option<String>,

    /// Initial map metric (students, schools, scholarships, progress)
    #[arg(long)]
    pub metric: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("API_BASE_URL", url);
        }
        if let Some(path) = &self.bootstrap {
            std::env::set_var("BOOTSTRAP_PATH", path);
        }
    }

    /// Filters preselected on the command line, empty values dropped the
    /// same way the filter controls drop them.
    pub fn initial_filters(&self) -> FilterSet {
        let mut filters = FilterSet::default();
        filters.set(FilterKey::Year, self.year.clone());
        filters.set(FilterKey::State, self.state.clone());
        filters.set(FilterKey::Scheme, self.scheme.clone());
        filters.set(FilterKey::Category, self.category.clone());
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_filters_build_the_expected_query() {
        let args = CliArgs::parse_from([
            "edudash-tui",
            "--year",
            "2024",
            "--category",
            "Digital Learning",
        ]);
        let filters = args.initial_filters();
        assert_eq!(
            filters.query_string(),
            "year=2024&category=Digital%20Learning"
        );
    }

    #[test]
    fn empty_preset_values_are_dropped() {
        let args = CliArgs::parse_from(["edudash-tui", "--state", ""]);
        assert!(args.initial_filters().is_empty());
    }
}
