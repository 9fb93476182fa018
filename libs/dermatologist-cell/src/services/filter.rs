// libs/dermatologist-cell/src/services/filter.rs
//
// Pure filter/sort pipeline over a directory snapshot. No I/O: the snapshot
// comes from the directory service, the filters from the caller, and the
// result is a fresh ordered subset recomputed wholesale on every call.
use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::{AvailabilityMode, Dermatologist, DirectoryFilters, SortKey};
use crate::services::us_states::state_name;

fn state_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Comma, optional whitespace, exactly two letters at a word boundary:
    // the trailing ", ST" of a "City, ST" location.
    PATTERN.get_or_init(|| Regex::new(r",\s*([A-Za-z]{2})\b").unwrap())
}

/// Case-insensitive substring match of `query` against a location, extended
/// with the full region name when the location carries a resolvable
/// two-letter state code. A missing location never matches a non-empty
/// query; an unresolvable code falls back to the raw text. Never fails.
pub fn location_matches(location: Option<&str>, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let raw = location.unwrap_or("");
    let mut searchable = raw.to_lowercase();

    if let Some(captures) = state_code_pattern().captures(raw) {
        if let Some(full_name) = state_name(&captures[1]) {
            searchable.push(' ');
            searchable.push_str(&full_name.to_lowercase());
        }
    }

    searchable.contains(&query.to_lowercase())
}

/// Whether an entry offers remote-only consultation, inferred from keywords
/// in its location field. A missing location counts as in-person.
pub fn is_telehealth(location: Option<&str>) -> bool {
    let loc = location.unwrap_or("").to_lowercase();
    loc.contains("telehealth") || loc.contains("online")
}

fn passes_availability(entry: &Dermatologist, mode: AvailabilityMode) -> bool {
    match mode {
        AvailabilityMode::All => true,
        AvailabilityMode::Telehealth => is_telehealth(entry.location.as_deref()),
        AvailabilityMode::InPerson => !is_telehealth(entry.location.as_deref()),
    }
}

fn compare_by_key(a: &Dermatologist, b: &Dermatologist, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Location => {
            let loc_a = a.location.as_deref().unwrap_or("").to_lowercase();
            let loc_b = b.location.as_deref().unwrap_or("").to_lowercase();
            loc_a.cmp(&loc_b)
        }
    }
}

/// Derive the filtered, sorted view of a directory snapshot. The snapshot is
/// never mutated; ties keep their pre-sort relative order so repeated calls
/// over the same inputs are deterministic.
pub fn apply_filters(directory: &[Dermatologist], filters: &DirectoryFilters) -> Vec<Dermatologist> {
    let query = filters.location.trim().to_lowercase();

    let mut filtered: Vec<Dermatologist> = directory
        .iter()
        .filter(|derm| location_matches(derm.location.as_deref(), &query))
        .filter(|derm| passes_availability(derm, filters.availability))
        .cloned()
        .collect();

    // Vec::sort_by is stable.
    filtered.sort_by(|a, b| compare_by_key(a, b, filters.sort_by));

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn derm(name: &str, location: Option<&str>) -> Dermatologist {
        Dermatologist {
            id: Uuid::new_v4(),
            name: name.to_string(),
            specialty: Some("Dermatology".to_string()),
            email: None,
            phone: None,
            bio: None,
            location: location.map(|l| l.to_string()),
            available: true,
        }
    }

    fn names(view: &[Dermatologist]) -> Vec<&str> {
        view.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(location_matches(Some("Boston, MA"), ""));
        assert!(location_matches(None, ""));
    }

    #[test]
    fn state_code_expands_to_full_name() {
        assert!(location_matches(Some("Boston, MA"), "massachusetts"));
        assert!(location_matches(Some("Boston, MA"), "boston"));
        assert!(location_matches(Some("Boston, MA"), "ma"));
        assert!(!location_matches(Some("Boston, MA"), "california"));
    }

    #[test]
    fn unresolvable_code_falls_back_to_raw_text() {
        assert!(location_matches(Some("Springfield, ZZ"), "springfield"));
        assert!(!location_matches(Some("Springfield, ZZ"), "massachusetts"));
    }

    #[test]
    fn absent_location_never_matches_nonempty_query() {
        assert!(!location_matches(None, "boston"));
        assert!(!location_matches(None, "telehealth"));
    }

    #[test]
    fn telehealth_detected_by_keyword() {
        assert!(is_telehealth(Some("Telehealth")));
        assert!(is_telehealth(Some("Online consultations only")));
        assert!(!is_telehealth(Some("Boston, MA")));
        assert!(!is_telehealth(None));
    }

    #[test]
    fn empty_filters_return_sorted_permutation() {
        let directory = vec![
            derm("Carla", Some("Denver, CO")),
            derm("amy", Some("Boston, MA")),
            derm("Ben", Some("Telehealth")),
        ];

        let view = apply_filters(&directory, &DirectoryFilters::default());

        assert_eq!(view.len(), directory.len());
        assert_eq!(names(&view), vec!["amy", "Ben", "Carla"]);
    }

    #[test]
    fn availability_modes_partition_the_directory() {
        let directory = vec![
            derm("Amy", Some("Boston, MA")),
            derm("Ben", Some("Telehealth")),
            derm("Carla", Some("Online only")),
            derm("Dana", None),
        ];

        let telehealth = apply_filters(
            &directory,
            &DirectoryFilters {
                availability: AvailabilityMode::Telehealth,
                ..Default::default()
            },
        );
        let in_person = apply_filters(
            &directory,
            &DirectoryFilters {
                availability: AvailabilityMode::InPerson,
                ..Default::default()
            },
        );

        assert_eq!(names(&telehealth), vec!["Ben", "Carla"]);
        assert_eq!(names(&in_person), vec!["Amy", "Dana"]);
        assert_eq!(telehealth.len() + in_person.len(), directory.len());
    }

    #[test]
    fn name_sort_is_case_insensitive_and_stable() {
        let first = derm("alex", Some("Austin, TX"));
        let second = derm("Alex", Some("Boston, MA"));
        let directory = vec![first.clone(), second.clone(), derm("Zoe", None)];

        let view = apply_filters(&directory, &DirectoryFilters::default());

        // Equal names keep their pre-sort relative order.
        assert_eq!(view[0].id, first.id);
        assert_eq!(view[1].id, second.id);
        assert_eq!(view[2].name, "Zoe");
    }

    #[test]
    fn location_sort_treats_missing_location_as_empty() {
        let directory = vec![
            derm("Amy", Some("Boston, MA")),
            derm("Ben", None),
            derm("Carla", Some("Austin, TX")),
        ];

        let view = apply_filters(
            &directory,
            &DirectoryFilters {
                sort_by: SortKey::Location,
                ..Default::default()
            },
        );

        assert_eq!(names(&view), vec!["Ben", "Carla", "Amy"]);
    }

    #[test]
    fn query_is_trimmed_before_matching() {
        let directory = vec![derm("Amy", Some("Boston, MA")), derm("Ben", Some("Telehealth"))];

        let view = apply_filters(
            &directory,
            &DirectoryFilters {
                location: "  boston  ".to_string(),
                ..Default::default()
            },
        );

        assert_eq!(names(&view), vec!["Amy"]);
    }

    #[test]
    fn combined_scenario_state_name_and_telehealth() {
        let directory = vec![derm("Amy", Some("Boston, MA")), derm("Ben", Some("Telehealth"))];

        let by_state = apply_filters(
            &directory,
            &DirectoryFilters {
                location: "Massachusetts".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(names(&by_state), vec!["Amy"]);

        let remote = apply_filters(
            &directory,
            &DirectoryFilters {
                availability: AvailabilityMode::Telehealth,
                ..Default::default()
            },
        );
        assert_eq!(names(&remote), vec!["Ben"]);

        let sorted = apply_filters(&directory, &DirectoryFilters::default());
        assert_eq!(names(&sorted), vec!["Amy", "Ben"]);
    }
}
