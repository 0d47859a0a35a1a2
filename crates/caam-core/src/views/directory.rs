use serde::{Deserialize, Serialize};

use crate::models::Professional;
use crate::utils::dedup_sorted;

/// Synthetic option covering every professional outside California.
pub const NON_CA: &str = "Non-CA";

/// The California option in the state filter.
pub const CA: &str = "CA";

/// Choices offered by the directory search form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct FilterOptions {
    pub specialities: Vec<String>,
    pub languages: Vec<String>,
    /// California cities, sorted, then `Non-CA` when any listed city lies elsewhere.
    pub cities: Vec<String>,
    /// `CA`, then `Non-CA` when anyone practices outside California.
    pub states: Vec<String>,
}

impl FilterOptions {
    pub fn from_professionals(professionals: &[Professional]) -> Self {
        let specialities = dedup_sorted(professionals.iter().flat_map(|p| p.speciality.iter().cloned()));
        let languages = dedup_sorted(professionals.iter().flat_map(|p| p.languages.iter().cloned()));

        let (ca, elsewhere): (Vec<&Professional>, Vec<&Professional>) = professionals
            .iter()
            .filter(|p| !p.city.trim().is_empty())
            .partition(|p| p.is_california());

        let mut cities = dedup_sorted(ca.iter().map(|p| p.city.trim().to_string()));
        if !elsewhere.is_empty() {
            cities.push(NON_CA.to_string());
        }

        let mut states = vec![CA.to_string()];
        if professionals.iter().any(|p| !p.is_california()) {
            states.push(NON_CA.to_string());
        }

        Self {
            specialities,
            languages,
            cities,
            states,
        }
    }
}

/// Everything the directory page needs: listed members and the filter choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DirectoryData {
    pub professionals: Vec<Professional>,
    #[serde(flatten)]
    pub options: FilterOptions,
}

impl DirectoryData {
    pub fn new(professionals: Vec<Professional>) -> Self {
        let options = FilterOptions::from_professionals(&professionals);
        Self {
            professionals,
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prof(id: &str, city: &str, state: &str, speciality: &[&str], languages: &[&str]) -> Professional {
        Professional {
            id: id.to_string(),
            first_name: "Test".to_string(),
            last_name: id.to_string(),
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

    #[test]
    fn test_lists_deduplicated_and_sorted() {
        let pros = vec![
            prof("1", "Fresno", "CA", &["Yoga", "Herbs"], &["English"]),
            prof("2", "Davis", "CA", &["Herbs", "Ayurvedic Cooking"], &["Spanish", "English"]),
        ];
        let options = FilterOptions::from_professionals(&pros);
        assert_eq!(options.specialities, vec!["Ayurvedic Cooking", "Herbs", "Yoga"]);
        assert_eq!(options.languages, vec!["English", "Spanish"]);
        assert_eq!(options.cities, vec!["Davis", "Fresno"]);
        assert_eq!(options.states, vec!["CA"]);
    }

    #[test]
    fn test_non_ca_bucket_added() {
        let pros = vec![
            prof("1", "Fresno", "CA", &[], &[]),
            prof("2", "Portland", "OR", &[], &[]),
            prof("3", "Oakland", "CALIFORNIA", &[], &[]),
        ];
        let options = FilterOptions::from_professionals(&pros);
        assert_eq!(options.cities, vec!["Fresno", "Oakland", "Non-CA"]);
        assert_eq!(options.states, vec!["CA", "Non-CA"]);
    }

    #[test]
    fn test_blank_state_counts_as_non_ca() {
        let pros = vec![prof("1", "", "", &[], &[]), prof("2", "Fresno", "CA", &[], &[])];
        let options = FilterOptions::from_professionals(&pros);
        // No non-CA city, but a non-CA state
        assert_eq!(options.cities, vec!["Fresno"]);
        assert_eq!(options.states, vec!["CA", "Non-CA"]);
    }

    #[test]
    fn test_sort_is_byte_order() {
        let pros = vec![prof("1", "", "CA", &["ayurveda", "Zen", "Éther"], &[])];
        let options = FilterOptions::from_professionals(&pros);
        assert_eq!(options.specialities, vec!["Zen", "ayurveda", "Éther"]);
    }

    #[test]
    fn test_directory_json_flattens_options() {
        let data = DirectoryData::new(vec![prof("1", "Fresno", "CA", &["Yoga"], &[])]);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["professionals"][0]["id"], "1");
        assert_eq!(json["specialities"][0], "Yoga");
        assert_eq!(json["states"][0], "CA");
    }
}
