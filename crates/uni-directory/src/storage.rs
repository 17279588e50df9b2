//! Country dataset reader.
//!
//! A dataset is a JSON array of flat university rows. Reading attaches the
//! derived `country` and `slug` fields; errors are returned as-is and it is
//! up to the caller whether to recover.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::types::{DirectoryResult, University, UniversityProfile};

/// Reader for country dataset files.
pub struct DatasetReader;

impl DatasetReader {
    /// Read a dataset file and tag every row with `country`.
    pub fn read_from_file(path: &Path, country: &str) -> DirectoryResult<Vec<University>> {
        let mut file = std::fs::File::open(path)?;
        Self::read_from(&mut file, country)
    }

    /// Read a dataset from any reader.
    pub fn read_from<R: Read>(reader: &mut R, country: &str) -> DirectoryResult<Vec<University>> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;

        let profiles: Vec<UniversityProfile> = serde_json::from_str(&raw)?;
        let country = country.to_lowercase();

        let universities: Vec<University> = profiles
            .into_iter()
            .map(|p| University::from_profile(p, &country))
            .collect();

        for collision in slug_collisions(&universities) {
            tracing::warn!(
                "Slug collision in {country}: '{}' shadows '{}' as '{}'",
                collision.first,
                collision.shadowed,
                collision.slug
            );
        }

        Ok(universities)
    }
}

/// Two records in one dataset that derive the same slug.
///
/// Lookup always resolves to `first`; `shadowed` is unreachable by slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugCollision {
    pub slug: String,
    pub first: String,
    pub shadowed: String,
}

/// Find every record whose slug repeats an earlier one, in dataset order.
pub fn slug_collisions(universities: &[University]) -> Vec<SlugCollision> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    let mut collisions = Vec::new();

    for uni in universities {
        match seen.get(uni.slug.as_str()) {
            Some(first) => collisions.push(SlugCollision {
                slug: uni.slug.clone(),
                first: first.to_string(),
                shadowed: uni.name().to_string(),
            }),
            None => {
                seen.insert(&uni.slug, uni.name());
            }
        }
    }

    collisions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DirectoryError;

    const CANADA: &str = r#"[
        {"rank": 1, "university_name": "University of Toronto", "city": "Toronto",
         "popular_english_programs": ["Computer Science"], "gre_required": "No (optional)",
         "visa_risk": "Low"},
        {"rank": 2, "university_name": "McGill University", "city": "Montreal",
         "popular_english_programs": ["Data Science"], "gre_required": "Yes, required",
         "visa_risk": "Medium"}
    ]"#;

    #[test]
    fn test_read_attaches_identity() {
        let unis = DatasetReader::read_from(&mut CANADA.as_bytes(), "Canada").unwrap();
        assert_eq!(unis.len(), 2);
        assert_eq!(unis[0].country, "canada");
        assert_eq!(unis[0].slug, "university-of-toronto");
        assert_eq!(unis[1].slug, "mcgill-university");
    }

    #[test]
    fn test_read_preserves_order() {
        let unis = DatasetReader::read_from(&mut CANADA.as_bytes(), "canada").unwrap();
        let ranks: Vec<_> = unis.iter().map(|u| u.profile.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
    }

    #[test]
    fn test_malformed_json() {
        let result = DatasetReader::read_from(&mut "[{\"rank\": 1,".as_bytes(), "canada");
        assert!(matches!(result, Err(DirectoryError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = DatasetReader::read_from_file(&dir.path().join("nope.txt"), "canada");
        assert!(matches!(result, Err(DirectoryError::Io(_))));
    }

    #[test]
    fn test_file_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Canada_uni.txt");
        std::fs::write(&path, CANADA).unwrap();

        let unis = DatasetReader::read_from_file(&path, "canada").unwrap();
        assert_eq!(unis.len(), 2);
    }

    #[test]
    fn test_slug_collisions_reported_in_order() {
        let raw = r#"[
            {"rank": 1, "university_name": "TU Munich"},
            {"rank": 2, "university_name": "TU-Munich"},
            {"rank": 3, "university_name": "LMU Munich"}
        ]"#;
        let unis = DatasetReader::read_from(&mut raw.as_bytes(), "germany").unwrap();
        let collisions = slug_collisions(&unis);

        assert_eq!(
            collisions,
            vec![SlugCollision {
                slug: "tu-munich".to_string(),
                first: "TU Munich".to_string(),
                shadowed: "TU-Munich".to_string(),
            }]
        );
    }
}
