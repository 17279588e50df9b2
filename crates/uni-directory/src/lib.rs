//! University directory — per-country university datasets with caching,
//! search filters, and slug lookup.

pub mod cache;
pub mod catalog;
pub mod directory;
pub mod display;
pub mod search;
pub mod slug;
pub mod storage;
pub mod types;

pub use cache::{Dataset, DatasetCache};
pub use catalog::{CountryCatalog, CountryEntry, DEFAULT_FLAG};
pub use directory::UniversityDirectory;
pub use display::{program_preview, strip_qualifier, VisaRisk};
pub use search::{filter_universities, GreRequirement, SearchFilters};
pub use slug::slugify;
pub use storage::{slug_collisions, DatasetReader, SlugCollision};
pub use types::*;
