//! The explore query: single-university lookup or list/search.

use serde::Deserialize;

use uni_directory::{SearchFilters, UniversityDirectory};

use crate::types::{ApiError, ApiResult, ExploreResponse};

/// Raw query parameters, as they arrive on `/api/explore`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExploreParams {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub gre: Option<String>,
    #[serde(default)]
    pub visa: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
}

/// What a set of parameters asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreRequest {
    Lookup {
        country: String,
        slug: String,
    },
    Search {
        country: Option<String>,
        query: String,
        filters: SearchFilters,
    },
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ExploreParams {
    /// Build params from decoded query pairs. The first value of a repeated
    /// key wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "country" => &mut params.country,
                "slug" => &mut params.slug,
                "q" => &mut params.q,
                "gre" => &mut params.gre,
                "visa" => &mut params.visa,
                "program" => &mut params.program,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }

    /// Classify the parameters. Empty values count as absent.
    pub fn request(&self) -> ExploreRequest {
        let country = present(&self.country);

        if let (Some(country), Some(slug)) = (country, present(&self.slug)) {
            return ExploreRequest::Lookup {
                country: country.to_string(),
                slug: slug.to_string(),
            };
        }

        let mut filters = SearchFilters::new();
        if let Some(gre) = present(&self.gre) {
            filters = filters.gre(gre);
        }
        if let Some(visa) = present(&self.visa) {
            filters = filters.visa_risk(visa);
        }
        if let Some(program) = present(&self.program) {
            filters = filters.program(program);
        }

        ExploreRequest::Search {
            country: country.map(str::to_string),
            query: present(&self.q).unwrap_or_default().to_string(),
            filters,
        }
    }
}

/// Run an explore query against the directory.
pub fn explore(directory: &UniversityDirectory, params: &ExploreParams) -> ApiResult<ExploreResponse> {
    match params.request() {
        ExploreRequest::Lookup { country, slug } => {
            let university = directory
                .find_by_slug(&country, &slug)
                .ok_or(ApiError::UniversityNotFound { country, slug })?;
            Ok(ExploreResponse::University { university })
        }
        ExploreRequest::Search {
            country,
            query,
            filters,
        } => {
            let universities = directory.search(country.as_deref(), &query, &filters);
            let countries = directory.countries();
            tracing::debug!(
                "Explore search country={country:?} query={query:?} -> {} results",
                universities.len()
            );
            Ok(ExploreResponse::list(universities, countries))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uni_directory::GreRequirement;

    fn params(pairs: &[(&str, &str)]) -> ExploreParams {
        let map: serde_json::Map<String, serde_json::Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }

    fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_keys_keep_first_value() {
        let params = ExploreParams::from_pairs(owned(&[
            ("q", "toronto"),
            ("slug", "a"),
            ("q", "zzz"),
            ("slug", "b"),
            ("utm_source", "mail"),
        ]));
        assert_eq!(params.q.as_deref(), Some("toronto"));
        assert_eq!(params.slug.as_deref(), Some("a"));
        assert_eq!(params.country, None);
    }

    #[test]
    fn test_repeated_empty_value_still_first() {
        let params = ExploreParams::from_pairs(owned(&[("country", ""), ("country", "canada")]));
        assert_eq!(params.country.as_deref(), Some(""));
        assert!(matches!(params.request(), ExploreRequest::Search { country: None, .. }));
    }

    #[test]
    fn test_country_and_slug_is_lookup() {
        let request = params(&[("country", "canada"), ("slug", "university-of-toronto")]).request();
        assert_eq!(
            request,
            ExploreRequest::Lookup {
                country: "canada".to_string(),
                slug: "university-of-toronto".to_string(),
            }
        );
    }

    #[test]
    fn test_slug_without_country_is_search() {
        let request = params(&[("slug", "university-of-toronto"), ("q", "toronto")]).request();
        assert!(matches!(
            request,
            ExploreRequest::Search { country: None, ref query, .. } if query == "toronto"
        ));
    }

    #[test]
    fn test_empty_params_are_absent() {
        let request = params(&[("country", ""), ("slug", "x"), ("gre", ""), ("visa", "")]).request();
        assert_eq!(
            request,
            ExploreRequest::Search {
                country: None,
                query: String::new(),
                filters: SearchFilters::new(),
            }
        );
    }

    #[test]
    fn test_filters_from_params() {
        let request = params(&[("gre", "no"), ("visa", "Low"), ("program", "data")]).request();
        match request {
            ExploreRequest::Search { filters, .. } => {
                assert_eq!(filters.gre_required, Some(GreRequirement::No));
                assert_eq!(filters.visa_risk.as_deref(), Some("Low"));
                assert_eq!(filters.program_keyword.as_deref(), Some("data"));
            }
            other => panic!("expected search, got {other:?}"),
        }
    }
}
