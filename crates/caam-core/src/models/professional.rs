use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sheets::NormalizedRecord;
use crate::utils::{is_california, split_list, title_case};

/// Value of the `list_og` column that publishes a member in the directory.
const LISTED: &str = "yes";

/// A member practitioner listed in the public directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Professional {
    pub id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "listCategory")]
    pub list_category: String,
    #[serde(default)]
    pub speciality: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub city: String,
    pub state: String,
    pub description: String,
    pub website: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(rename = "membershipLevel", default, skip_serializing_if = "String::is_empty")]
    pub membership_level: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certificates: Vec<String>,
}

fn value(record: &NormalizedRecord, keys: &[&str]) -> String {
    record.get_any(keys).map(str::trim).unwrap_or_default().to_string()
}

fn title_list(record: &NormalizedRecord, key: &str) -> Vec<String> {
    split_list(&value(record, &[key]))
        .iter()
        .map(|item| title_case(item))
        .collect()
}

impl Professional {
    /// Build a professional from a normalized row. The id is taken from the
    /// sheet row, blank rows included, so it is assigned whether or not the
    /// row is later listed.
    pub fn from_record(record: &NormalizedRecord) -> Self {
        Self {
            id: format!("prof-{}", record.source_row),
            first_name: title_case(&value(record, &["firstname", "first_name"])),
            last_name: title_case(&value(record, &["lastname", "last_name"])),
            list_category: value(record, &["list_og"]),
            speciality: title_list(record, "speciality"),
            services: title_list(record, "services"),
            languages: title_list(record, "languages"),
            city: title_case(&value(record, &["city"])),
            state: value(record, &["state"]).to_uppercase(),
            description: value(record, &["description"]),
            website: value(record, &["website"]),
            image: value(record, &["image"]),
            membership_level: value(record, &["membership_level"]),
            certificates: title_list(record, "certificates"),
        }
    }

    /// Listed members have a name and `list_og` set to "yes".
    pub fn is_listed(&self) -> bool {
        let has_name = !self.first_name.is_empty() || !self.last_name.is_empty();
        has_name && self.list_category.trim().eq_ignore_ascii_case(LISTED)
    }

    pub fn is_california(&self) -> bool {
        is_california(&self.state)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// "City, ST" for cards; either half may be missing.
    pub fn location(&self) -> String {
        match (self.city.is_empty(), self.state.is_empty()) {
            (false, false) => format!("{}, {}", self.city, self.state),
            (false, true) => self.city.clone(),
            (true, false) => self.state.clone(),
            (true, true) => String::new(),
        }
    }
}

/// Map rows to professionals and keep only listed members.
///
/// Ids come from the sheet row, so the kept list may skip numbers where
/// blank or unlisted rows were removed.
pub fn map_professionals(records: &[NormalizedRecord]) -> Vec<Professional> {
    let professionals: Vec<Professional> = records
        .iter()
        .map(Professional::from_record)
        .filter(Professional::is_listed)
        .collect();

    debug!(
        rows = records.len(),
        listed = professionals.len(),
        "Mapped directory rows"
    );
    professionals
}
