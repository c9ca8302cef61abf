//! Sort engine - filtering and ordering of the catalog for display
//!
//! Everything here is pure: inputs are borrowed, never reordered in place,
//! and the returned views borrow from the catalog. Sorting is stable, so
//! entries that compare equal keep their catalog order (which is backend
//! enumeration order after a boot fetch, insertion order otherwise).

use std::cmp::Ordering;

use crate::domain::entities::AppItem;
use crate::domain::value_objects::SortCriterion;

/// Keep entries whose name contains `query`, ignoring case
///
/// The query is matched as given, whitespace included. An empty query
/// keeps everything.
pub fn filter<'a, I>(apps: I, query: &str) -> Vec<&'a AppItem>
where
    I: IntoIterator<Item = &'a AppItem>,
{
    let needle = query.to_lowercase();
    apps.into_iter()
        .filter(|app| needle.is_empty() || app.name.to_lowercase().contains(&needle))
        .collect()
}

/// Order entries by `criterion`
pub fn sort<'a, I>(apps: I, criterion: SortCriterion) -> Vec<&'a AppItem>
where
    I: IntoIterator<Item = &'a AppItem>,
{
    let mut view: Vec<&AppItem> = apps.into_iter().collect();
    match criterion {
        SortCriterion::NameAsc => view.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortCriterion::NameDesc => view.sort_by(|a, b| compare_names(&b.name, &a.name)),
        SortCriterion::MostRecentlyUsed => view.sort_by(|a, b| b.recency().cmp(&a.recency())),
        SortCriterion::LeastRecentlyUsed => view.sort_by(|a, b| a.recency().cmp(&b.recency())),
    }
    view
}

/// Filter, then sort
pub fn view<'a>(apps: &'a [AppItem], query: &str, criterion: SortCriterion) -> Vec<&'a AppItem> {
    sort(filter(apps, query), criterion)
}

/// Collation used for display names
///
/// Case-insensitive first; names differing only in case put the lowercase
/// spelling first ("apex" < "Apex" < "apps").
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| {
        a.chars()
            .zip(b.chars())
            .find(|(x, y)| x != y)
            .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => x.cmp(&y),
            })
            .unwrap_or_else(|| a.len().cmp(&b.len()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(id: u64, name: &str) -> AppItem {
        AppItem::new(name, format!("/apps/{}", id)).with_id(id)
    }

    fn ids(view: &[&AppItem]) -> Vec<u64> {
        view.iter().map(|a| a.id).collect()
    }

    #[test]
    fn test_name_ascending_is_case_insensitive_and_stable() {
        let apps = vec![app(1, "Zed"), app(2, "apex"), app(3, "apex")];

        let sorted = sort(&apps, SortCriterion::NameAsc);
        assert_eq!(ids(&sorted), vec![2, 3, 1]);

        let sorted = sort(&apps, SortCriterion::NameDesc);
        assert_eq!(ids(&sorted), vec![1, 2, 3]);
    }

    #[test]
    fn test_lowercase_spelling_sorts_first() {
        assert_eq!(compare_names("apex", "Apex"), Ordering::Less);
        assert_eq!(compare_names("Apex", "apps"), Ordering::Less);
        assert_eq!(compare_names("maps", "maps"), Ordering::Equal);
    }

    #[test]
    fn test_recency_ordering() {
        let apps = vec![
            app(1, "Never"),
            app(2, "Five").with_last_used(5),
            app(3, "Two").with_last_used(2),
        ];

        let mru = sort(&apps, SortCriterion::MostRecentlyUsed);
        assert_eq!(ids(&mru), vec![2, 3, 1]);

        let lru = sort(&apps, SortCriterion::LeastRecentlyUsed);
        assert_eq!(ids(&lru), vec![1, 3, 2]);
    }

    #[test]
    fn test_recency_ties_keep_catalog_order() {
        let apps = vec![app(1, "B"), app(2, "A"), app(3, "C").with_last_used(1)];

        let mru = sort(&apps, SortCriterion::MostRecentlyUsed);
        assert_eq!(ids(&mru), vec![3, 1, 2]);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let apps = vec![app(1, "Maps"), app(2, "Apex"), app(3, "Paper")];

        let hits = filter(&apps, "ap");
        assert_eq!(ids(&hits), vec![1, 2, 3]);

        for criterion in SortCriterion::ALL {
            assert!(view(&apps, "zz", criterion).is_empty());
        }
    }

    #[test]
    fn test_filter_whitespace_is_significant() {
        let apps = vec![app(1, "Maps"), app(2, "Sky Map"), app(3, "Apex")];

        assert_eq!(ids(&filter(&apps, " ")), vec![2]);
        assert!(filter(&apps, "ap ").is_empty());
        assert_eq!(ids(&filter(&apps, "y m")), vec![2]);
        assert_eq!(ids(&filter(&apps, "")), vec![1, 2, 3]);
    }

    #[test]
    fn test_view_filters_then_sorts() {
        let apps = vec![app(1, "Paper"), app(2, "Terminal"), app(3, "Apex")];

        let shown = view(&apps, "P", SortCriterion::NameAsc);
        assert_eq!(ids(&shown), vec![3, 1]);

        let everything = view(&apps, "", SortCriterion::NameAsc);
        assert_eq!(everything.len(), 3);
    }

    #[test]
    fn test_sort_does_not_touch_input() {
        let apps = vec![app(1, "b"), app(2, "a")];
        let _ = sort(&apps, SortCriterion::NameAsc);
        assert_eq!(apps[0].id, 1);
    }
}
