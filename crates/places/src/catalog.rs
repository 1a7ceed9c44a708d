//! The fixed table of mock place names and their categories.
//!
//! A name and its category always travel together: the generator picks one
//! entry by index, never a name and a category separately.

use crate::model::PlaceCategory;

/// A place name paired with its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Display name
    pub name: &'static str,
    /// Category tag
    pub category: PlaceCategory,
}

const fn entry(name: &'static str, category: PlaceCategory) -> CatalogEntry {
    CatalogEntry { name, category }
}

/// Every name/category pair the mock generator can produce.
pub const CATALOG: [CatalogEntry; 15] = [
    entry("Starbucks Coffee", PlaceCategory::Cafe),
    entry("McDonald's", PlaceCategory::Restaurant),
    entry("Central Park", PlaceCategory::Park),
    entry("Fitness First", PlaceCategory::Gym),
    entry("City Library", PlaceCategory::Library),
    entry("Westfield Mall", PlaceCategory::Shopping),
    entry("AMC Cinema", PlaceCategory::Entertainment),
    entry("Shell Gas Station", PlaceCategory::Service),
    entry("General Hospital", PlaceCategory::Health),
    entry("Lincoln High School", PlaceCategory::Education),
    entry("Pizza Hut", PlaceCategory::Restaurant),
    entry("Subway", PlaceCategory::Restaurant),
    entry("Bank of America", PlaceCategory::Bank),
    entry("CVS Pharmacy", PlaceCategory::Pharmacy),
    entry("Hilton Hotel", PlaceCategory::Hotel),
];

/// Returns true if `name` and `category` appear together in the catalog.
pub fn is_catalog_pair(name: &str, category: PlaceCategory) -> bool {
    CATALOG
        .iter()
        .any(|entry| entry.name == name && entry.category == category)
}
