//! Text search and attribute filters over university records.

use serde::{Deserialize, Serialize};

use crate::types::University;

/// GRE requirement filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GreRequirement {
    Yes,
    No,
}

impl GreRequirement {
    /// Parse a query parameter. Only `"yes"` and `"no"` mean anything;
    /// every other value disables the filter.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            _ => None,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    pub fn matches(self, gre_required: &str) -> bool {
        gre_required.to_lowercase().starts_with(self.prefix())
    }
}

/// Optional attribute filters. All set filters must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub gre_required: Option<GreRequirement>,
    pub visa_risk: Option<String>,
    pub program_keyword: Option<String>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gre(mut self, value: &str) -> Self {
        self.gre_required = GreRequirement::from_param(value);
        self
    }

    pub fn visa_risk(mut self, value: &str) -> Self {
        self.visa_risk = non_empty(value);
        self
    }

    pub fn program(mut self, value: &str) -> Self {
        self.program_keyword = non_empty(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.gre_required.is_none() && self.visa_risk.is_none() && self.program_keyword.is_none()
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Case-insensitive substring match against name, city, or any program.
pub fn matches_query(uni: &University, query: &str) -> bool {
    let q = query.to_lowercase();
    uni.profile.university_name.to_lowercase().contains(&q)
        || uni.profile.city.to_lowercase().contains(&q)
        || has_program(uni, &q)
}

fn has_program(uni: &University, lowered_keyword: &str) -> bool {
    uni.profile
        .popular_english_programs
        .iter()
        .any(|p| p.to_lowercase().contains(lowered_keyword))
}

/// True if `uni` passes every filter that is set.
pub fn matches_filters(uni: &University, filters: &SearchFilters) -> bool {
    if let Some(gre) = filters.gre_required {
        if !gre.matches(&uni.profile.gre_required) {
            return false;
        }
    }
    if let Some(visa) = &filters.visa_risk {
        if uni.profile.visa_risk.to_lowercase() != visa.to_lowercase() {
            return false;
        }
    }
    if let Some(keyword) = &filters.program_keyword {
        if !has_program(uni, &keyword.to_lowercase()) {
            return false;
        }
    }
    true
}

/// Filter `universities` by an optional text query and the attribute
/// filters. Input order is preserved; nothing is sorted or capped.
pub fn filter_universities(
    universities: &[University],
    query: &str,
    filters: &SearchFilters,
) -> Vec<University> {
    universities
        .iter()
        .filter(|u| query.is_empty() || matches_query(u, query))
        .filter(|u| matches_filters(u, filters))
        .cloned()
        .collect()
}
