//! Response bodies for the explore API.

use serde::{Deserialize, Serialize};

use uni_directory::{CountrySummary, University};

/// Successful explore result. Serializes without a tag, so a lookup is
/// `{"university": ..}` and a search is `{"universities": .., "countries": .., "total": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExploreResponse {
    University {
        university: University,
    },
    List {
        universities: Vec<University>,
        countries: Vec<CountrySummary>,
        total: usize,
    },
}

impl ExploreResponse {
    pub fn list(universities: Vec<University>, countries: Vec<CountrySummary>) -> Self {
        let total = universities.len();
        ExploreResponse::List {
            universities,
            countries,
            total,
        }
    }
}

/// Error payload: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
