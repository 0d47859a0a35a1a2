//! Directory search: narrows the listed professionals by the four filter
//! dimensions of the search form.
//!
//! Dimensions combine with AND; values within a dimension combine with OR.
//! `Non-CA` is a bucket rather than a literal city or state: it matches
//! anyone whose state is not California.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::Professional;
use crate::views::{CA, NON_CA};

/// Values chosen in each filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct FilterSelection {
    #[serde(default)]
    pub speciality: BTreeSet<String>,
    #[serde(default)]
    pub language: BTreeSet<String>,
    #[serde(default)]
    pub city: BTreeSet<String>,
    #[serde(default)]
    pub state: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speciality(mut self, value: &str) -> Self {
        self.speciality.insert(value.to_string());
        self
    }

    pub fn with_language(mut self, value: &str) -> Self {
        self.language.insert(value.to_string());
        self
    }

    pub fn with_city(mut self, value: &str) -> Self {
        self.city.insert(value.to_string());
        self
    }

    pub fn with_state(mut self, value: &str) -> Self {
        self.state.insert(value.to_string());
        self
    }

    /// True when no dimension has a selected value.
    pub fn is_empty(&self) -> bool {
        self.speciality.is_empty()
            && self.language.is_empty()
            && self.city.is_empty()
            && self.state.is_empty()
    }

    pub fn clear(&mut self) {
        self.speciality.clear();
        self.language.clear();
        self.city.clear();
        self.state.clear();
    }
}

fn matches_any(selected: &BTreeSet<String>, values: &[String]) -> bool {
    values.iter().any(|v| selected.contains(v))
}

fn matches_city(selected: &BTreeSet<String>, professional: &Professional) -> bool {
    if selected.contains(NON_CA) {
        let specific_city = selected
            .iter()
            .any(|city| city != NON_CA && *city == professional.city);
        specific_city || !professional.is_california()
    } else {
        selected.contains(&professional.city)
    }
}

fn matches_state(selected: &BTreeSet<String>, professional: &Professional) -> bool {
    let non_ca = selected.contains(NON_CA);
    let ca = selected.contains(CA);
    match (ca, non_ca) {
        (true, true) => true,
        (false, true) => !professional.is_california(),
        (true, false) => professional.is_california(),
        (false, false) => selected.contains(&professional.state),
    }
}

fn matches(selection: &FilterSelection, professional: &Professional) -> bool {
    (selection.speciality.is_empty() || matches_any(&selection.speciality, &professional.speciality))
        && (selection.language.is_empty() || matches_any(&selection.language, &professional.languages))
        && (selection.city.is_empty() || matches_city(&selection.city, professional))
        && (selection.state.is_empty() || matches_state(&selection.state, professional))
}

/// Apply `selection` to `professionals`, keeping source order.
///
/// An empty selection matches nobody: the page only lists members once a
/// search has been made with at least one criterion.
pub fn filter_professionals<'a>(
    professionals: &'a [Professional],
    selection: &FilterSelection,
) -> Vec<&'a Professional> {
    if selection.is_empty() {
        return Vec::new();
    }
    professionals
        .iter()
        .filter(|p| matches(selection, p))
        .collect()
}

/// What the results area should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No search submitted yet; show the prompt.
    NotSearched,
    /// Searched, nothing matched; show "no results" with a reset action.
    NoMatches,
    /// Searched with this many matches.
    Matches(usize),
}

/// Search form state over an already-loaded directory.
#[derive(Debug, Clone)]
pub struct DirectorySearch<'a> {
    professionals: &'a [Professional],
    selection: FilterSelection,
    results: Vec<&'a Professional>,
    has_searched: bool,
}

impl<'a> DirectorySearch<'a> {
    pub fn new(professionals: &'a [Professional]) -> Self {
        Self {
            professionals,
            selection: FilterSelection::default(),
            results: Vec::new(),
            has_searched: false,
        }
    }

    /// Run a search with `selection` and remember it as the current form state.
    pub fn submit(&mut self, selection: FilterSelection) -> &[&'a Professional] {
        self.has_searched = true;
        self.results = filter_professionals(self.professionals, &selection);
        self.selection = selection;
        &self.results
    }

    /// Clear the form, the results and the searched flag.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.results.clear();
        self.has_searched = false;
    }

    /// Reset, then run the caller's hook (e.g. to clear an external form).
    pub fn reset_with<F: FnOnce()>(&mut self, on_reset: F) {
        self.reset();
        on_reset();
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn results(&self) -> &[&'a Professional] {
        &self.results
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn outcome(&self) -> SearchOutcome {
        match (self.has_searched, self.results.len()) {
            (false, _) => SearchOutcome::NotSearched,
            (true, 0) => SearchOutcome::NoMatches,
            (true, n) => SearchOutcome::Matches(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prof(id: &str, city: &str, state: &str, speciality: &[&str], languages: &[&str]) -> Professional {
        Professional {
            id: id.to_string(),
            first_name: id.to_string(),
            last_name: String::new(),
            list_category: "yes".to_string(),
            speciality: speciality.iter().map(|s| s.to_string()).collect(),
            services: Vec::new(),
            languages: languages.iter().map(|s| s.to_string()).collect(),
            city: city.to_string(),
            state: state.to_string(),
            description: String::new(),
            website: String::new(),
            image: String::new(),
            membership_level: String::new(),
            certificates: Vec::new(),
        }
    }

    fn ids(results: &[&Professional]) -> Vec<String> {
        results.iter().map(|p| p.id.clone()).collect()
    }

    fn fresno_and_portland() -> Vec<Professional> {
        vec![
            prof("A", "Fresno", "CA", &["Yoga"], &["English"]),
            prof("B", "Portland", "OR", &["Herbs"], &["English", "Hindi"]),
        ]
    }

    #[test]
    fn test_city_non_ca_returns_only_out_of_state() {
        let pros = fresno_and_portland();
        let sel = FilterSelection::new().with_city("Non-CA");
        assert_eq!(ids(&filter_professionals(&pros, &sel)), vec!["B"]);
    }

    #[test]
    fn test_city_non_ca_plus_specific_city() {
        let pros = vec![
            prof("A", "Fresno", "CA", &[], &[]),
            prof("B", "Portland", "OR", &[], &[]),
            prof("C", "Davis", "CA", &[], &[]),
        ];
        let sel = FilterSelection::new().with_city("Non-CA").with_city("Fresno");
        assert_eq!(ids(&filter_professionals(&pros, &sel)), vec!["A", "B"]);
    }

    #[test]
    fn test_city_exact_match() {
        let pros = fresno_and_portland();
        let sel = FilterSelection::new().with_city("Fresno");
        assert_eq!(ids(&filter_professionals(&pros, &sel)), vec!["A"]);
    }

    #[test]
    fn test_state_ca_and_non_ca_returns_everyone() {
        let pros = fresno_and_portland();
        let sel = FilterSelection::new().with_state("CA").with_state("Non-CA");
        assert_eq!(ids(&filter_professionals(&pros, &sel)), vec!["A", "B"]);
    }

    #[test]
    fn test_state_non_ca_only() {
        let pros = fresno_and_portland();
        let sel = FilterSelection::new().with_state("Non-CA");
        assert_eq!(ids(&filter_professionals(&pros, &sel)), vec!["B"]);
    }

    #[test]
    fn test_state_ca_includes_spelled_out_state() {
        let mut pros = fresno_and_portland();
        pros.push(prof("C", "Oakland", "CALIFORNIA", &[], &[]));
        let sel = FilterSelection::new().with_state("CA");
        assert_eq!(ids(&filter_professionals(&pros, &sel)), vec!["A", "C"]);
    }

    #[test]
    fn test_state_literal_fallback() {
        let pros = fresno_and_portland();
        let sel = FilterSelection::new().with_state("OR");
        assert_eq!(ids(&filter_professionals(&pros, &sel)), vec!["B"]);
    }

    #[test]
    fn test_dimensions_and_values_or() {
        let pros = vec![
            prof("A", "Fresno", "CA", &["Yoga"], &["English"]),
            prof("B", "Portland", "OR", &["Herbs"], &["Hindi"]),
            prof("C", "Davis", "CA", &["Herbs", "Massage"], &["English"]),
        ];
        let sel = FilterSelection::new()
            .with_speciality("Herbs")
            .with_speciality("Yoga")
            .with_language("English");
        assert_eq!(ids(&filter_professionals(&pros, &sel)), vec!["A", "C"]);

        let sel = sel.with_state("CA").with_city("Davis");
        assert_eq!(ids(&filter_professionals(&pros, &sel)), vec!["C"]);
    }

    #[test]
    fn test_empty_selection_matches_nobody() {
        let pros = fresno_and_portland();
        assert!(filter_professionals(&pros, &FilterSelection::new()).is_empty());
    }

    #[test]
    fn test_search_state_distinguishes_unsearched_from_no_results() {
        let pros = fresno_and_portland();
        let mut search = DirectorySearch::new(&pros);
        assert_eq!(search.outcome(), SearchOutcome::NotSearched);
        assert!(search.results().is_empty());

        search.submit(FilterSelection::new());
        assert!(search.has_searched());
        assert!(search.results().is_empty());
        assert_eq!(search.outcome(), SearchOutcome::NoMatches);

        let found = search.submit(FilterSelection::new().with_language("Hindi")).len();
        assert_eq!(found, 1);
        assert_eq!(search.outcome(), SearchOutcome::Matches(1));
    }

    #[test]
    fn test_reset_clears_everything_and_runs_hook() {
        let pros = fresno_and_portland();
        let mut search = DirectorySearch::new(&pros);
        search.submit(FilterSelection::new().with_city("Non-CA"));
        assert_eq!(search.results().len(), 1);

        let mut hook_ran = false;
        search.reset_with(|| hook_ran = true);

        assert!(hook_ran);
        assert!(search.selection().is_empty());
        assert!(search.results().is_empty());
        assert!(!search.has_searched());
        assert_eq!(search.outcome(), SearchOutcome::NotSearched);
    }
}
