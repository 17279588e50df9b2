//! Core data types for university records and country summaries.

use serde::{Deserialize, Serialize};

/// One row of a country dataset, exactly as the data provider ships it.
///
/// Most attributes are presentation-formatted strings (`"40,000 (approx)"`,
/// `"No (optional)"`) and are kept verbatim; matching always runs on the raw
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversityProfile {
    pub rank: u32,
    pub university_name: String,
    #[serde(default)]
    pub city: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub popular_english_programs: Vec<String>,
    #[serde(default)]
    pub min_cgpa: String,
    #[serde(default)]
    pub ielts_requirement: String,
    #[serde(default)]
    pub gre_required: String,
    #[serde(default)]
    pub annual_tuition_fee_inr: String,
    #[serde(default)]
    pub estimated_annual_living_cost_inr: String,
    #[serde(default)]
    pub program_duration_years: String,
    #[serde(default)]
    pub avg_starting_salary_inr: String,
    #[serde(default)]
    pub employment_rate: String,
    #[serde(default)]
    pub post_study_work_visa: String,
    #[serde(default)]
    pub visa_risk: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub source: String,
}

/// A dataset row plus the identity fields derived at load time.
///
/// `country` + `slug` address a record; serializes as one flat object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct University {
    #[serde(flatten)]
    pub profile: UniversityProfile,
    pub country: String,
    pub slug: String,
}

impl University {
    /// Attach derived identity to a raw profile.
    pub fn from_profile(profile: UniversityProfile, country: &str) -> Self {
        let slug = crate::slug::slugify(&profile.university_name);
        Self {
            profile,
            country: country.to_string(),
            slug,
        }
    }

    pub fn name(&self) -> &str {
        &self.profile.university_name
    }
}

/// Registry view of one configured country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub code: String,
    pub name: String,
    pub flag: String,
    pub count: usize,
}

/// Errors that can occur in the directory library.
#[derive(thiserror::Error, Debug)]
pub enum DirectoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Unknown country: {0}")]
    UnknownCountry(String),
}

/// Convenience result type.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults_optional_fields() {
        let profile: UniversityProfile =
            serde_json::from_str(r#"{"rank": 3, "university_name": "TU Berlin"}"#).unwrap();
        assert_eq!(profile.rank, 3);
        assert!(profile.city.is_empty());
        assert!(profile.popular_english_programs.is_empty());
    }

    #[test]
    fn test_profile_requires_name() {
        let result = serde_json::from_str::<UniversityProfile>(r#"{"rank": 1, "city": "Berlin"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_university_serializes_flat() {
        let profile: UniversityProfile = serde_json::from_str(
            r#"{"rank": 1, "university_name": "University of Toronto", "type": "Public"}"#,
        )
        .unwrap();
        let uni = University::from_profile(profile, "canada");
        let value = serde_json::to_value(&uni).unwrap();

        assert_eq!(value["university_name"], "University of Toronto");
        assert_eq!(value["type"], "Public");
        assert_eq!(value["country"], "canada");
        assert_eq!(value["slug"], "university-of-toronto");
        assert!(value.get("profile").is_none());
    }

    #[test]
    fn test_extra_source_keys_are_dropped() {
        let profile: UniversityProfile = serde_json::from_str(
            r#"{"rank": 1, "university_name": "TU Munich", "campus_size": "large"}"#,
        )
        .unwrap();
        let value = serde_json::to_value(University::from_profile(profile, "germany")).unwrap();

        assert_eq!(value["university_name"], "TU Munich");
        assert!(value.get("campus_size").is_none());
    }
}
