use crate::models::SearchableRecord;

/// `needle` must already be lowercased; see [`super::normalize_needle`].
pub fn matches_free_text(record: &SearchableRecord, needle: Option<&str>) -> bool {
    let Some(needle) = needle else {
        return true;
    };

    contains_folded(&record.title, needle)
        || contains_folded(&record.description, needle)
        || contains_folded(&record.freelancer_name, needle)
        || contains_folded(&record.category, needle)
        || record.tags.iter().any(|tag| contains_folded(tag, needle))
}

/// Exact, case-sensitive comparison against the selector value.
pub fn matches_category(record: &SearchableRecord, category: Option<&str>) -> bool {
    category.is_none_or(|category| record.category == category)
}

/// Locations are "Sub-area, City" strings, so a bare sub-area matches.
pub fn matches_location(record: &SearchableRecord, location: Option<&str>) -> bool {
    location.is_none_or(|location| record.location.contains(location))
}

pub fn matches_price(record: &SearchableRecord, min_price: f64, max_price: f64) -> bool {
    record.price >= min_price && record.price <= max_price
}

pub fn matches_rating(record: &SearchableRecord, min_rating: f64) -> bool {
    record.rating >= min_rating
}

pub(crate) fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::{matches_category, matches_free_text, matches_location, matches_price};
    use crate::models::{ListingKind, RecordId, SearchableRecord};

    fn record() -> SearchableRecord {
        SearchableRecord {
            id: RecordId::from("r1"),
            title: "Wedding Photography".to_string(),
            description: "Full day coverage".to_string(),
            freelancer_name: "Abebe Kebede".to_string(),
            category: "Photography".to_string(),
            location: "Bole, Addis Ababa".to_string(),
            tags: vec!["Events".to_string(), "Portrait".to_string()],
            price: 8000.0,
            rating: 4.8,
            kind: ListingKind::Gig,
        }
    }

    #[test]
    fn free_text_checks_every_text_field() {
        let record = record();
        assert!(matches_free_text(&record, None));
        assert!(matches_free_text(&record, Some("wedding")));
        assert!(matches_free_text(&record, Some("coverage")));
        assert!(matches_free_text(&record, Some("kebede")));
        assert!(matches_free_text(&record, Some("portrait")));
        assert!(!matches_free_text(&record, Some("tutor")));
    }

    #[test]
    fn category_is_exact_and_location_is_substring() {
        let record = record();
        assert!(matches_category(&record, Some("Photography")));
        assert!(!matches_category(&record, Some("photography")));
        assert!(!matches_category(&record, Some("Photo")));

        assert!(matches_location(&record, Some("Bole")));
        assert!(matches_location(&record, Some("Addis Ababa")));
        assert!(!matches_location(&record, Some("Piazza")));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let record = record();
        assert!(matches_price(&record, 8000.0, 8000.0));
        assert!(!matches_price(&record, 9000.0, 1000.0));
    }
}
