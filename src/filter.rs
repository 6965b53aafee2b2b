// Destination filtering, sorting and pagination

use std::{cmp::Ordering, str::FromStr};

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

use crate::models::Destination;

// Location value meaning "no location filter"
pub const ALL_LOCATIONS: &str = "All";

pub const DEFAULT_PAGE_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-desc")]
    PriceDesc,
    #[serde(rename = "rating-desc")]
    RatingDesc,
}

impl SortOrder {
    // Stable, so equal keys keep their storage order
    pub fn sort(&self, destinations: &mut [Destination]) {
        match self {
            SortOrder::PriceAsc => destinations.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOrder::PriceDesc => destinations.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortOrder::RatingDesc => destinations.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-asc" => Ok(SortOrder::PriceAsc),
            "price-desc" => Ok(SortOrder::PriceDesc),
            "rating-desc" => Ok(SortOrder::RatingDesc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

// Every field is optional and a malformed value deserializes to `None`, so a
// bad filter never turns into an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DestinationFilter {
    #[serde(deserialize_with = "lenient")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub min_price: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub max_price: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub min_rating: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub search: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub sort_by: Option<SortOrder>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl DestinationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn sort_by(mut self, order: SortOrder) -> Self {
        self.sort_by = Some(order);
        self
    }

    pub fn matches(&self, destination: &Destination) -> bool {
        if let Some(location) = self.location.as_deref() {
            if location != ALL_LOCATIONS && destination.location.as_str() != location {
                return false;
            }
        }

        if self.min_price.is_some_and(|min| destination.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| destination.price > max) {
            return false;
        }
        if self.min_rating.is_some_and(|min| destination.rating < min) {
            return false;
        }

        match self.search.as_deref() {
            Some(term) if !term.is_empty() => matches_search(destination, &term.to_lowercase()),
            _ => true,
        }
    }

    // Filters first, then sorts. Always returns fresh copies.
    pub fn apply<'a, I>(&self, destinations: I) -> Vec<Destination>
    where
        I: IntoIterator<Item = &'a Destination>,
    {
        let mut results: Vec<Destination> = destinations
            .into_iter()
            .filter(|d| self.matches(d))
            .cloned()
            .collect();

        if let Some(order) = self.sort_by {
            order.sort(&mut results);
        }

        results
    }
}

fn matches_search(destination: &Destination, needle: &str) -> bool {
    destination.name.to_lowercase().contains(needle)
        || destination.description.to_lowercase().contains(needle)
        || destination
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

// 1-based pages; page 0 is treated as page 1 and a page past the end is empty
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let start = (page - 1).saturating_mul(per_page).min(total_items);
    let end = start.saturating_add(per_page).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total_items,
        total_pages,
    }
}

// Used by tests and the benchmark to check ordering properties
pub fn is_sorted_by(destinations: &[Destination], order: SortOrder) -> bool {
    destinations.windows(2).all(|pair| {
        let ordering = match order {
            SortOrder::PriceAsc => pair[0].price.total_cmp(&pair[1].price),
            SortOrder::PriceDesc => pair[1].price.total_cmp(&pair[0].price),
            SortOrder::RatingDesc => pair[1].rating.total_cmp(&pair[0].rating),
        };
        ordering != Ordering::Greater
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_empty_filter_preserves_catalog_order() {
        let catalog = seed::destinations();
        let results = DestinationFilter::new().apply(&catalog);

        assert_eq!(results, catalog);
    }

    #[test]
    fn test_location_filter_and_all_sentinel() {
        let catalog = seed::destinations();

        let asia = DestinationFilter::new().location("Asia").apply(&catalog);
        assert_eq!(asia.len(), 3);
        assert!(asia.iter().all(|d| d.location.as_str() == "Asia"));

        let all = DestinationFilter::new().location(ALL_LOCATIONS).apply(&catalog);
        assert_eq!(all.len(), catalog.len());

        let unknown = DestinationFilter::new().location("Antarctica").apply(&catalog);
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let catalog = seed::destinations();
        let results = DestinationFilter::new()
            .price_range(Some(950.0), Some(1100.0))
            .apply(&catalog);

        let names: Vec<&str> = results.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Bali, Indonesia",
                "Santorini, Greece",
                "Rio de Janeiro, Brazil",
                "Cape Town, South Africa"
            ]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let catalog = seed::destinations();

        let bali = DestinationFilter::new().search("BALI").apply(&catalog);
        assert_eq!(bali.len(), 1);
        assert_eq!(bali[0].id, "dest-002");

        // tag and description
        let wildlife = DestinationFilter::new().search("wildlife").apply(&catalog);
        assert_eq!(wildlife.len(), 1);
        assert_eq!(wildlife[0].id, "dest-011");

        // description only
        let geysers = DestinationFilter::new().search("geothermal").apply(&catalog);
        assert_eq!(geysers[0].id, "dest-010");

        let empty = DestinationFilter::new().search("").apply(&catalog);
        assert_eq!(empty.len(), catalog.len());
    }

    #[test]
    fn test_every_result_satisfies_every_predicate() {
        let catalog = seed::destinations();
        let filter = DestinationFilter::new()
            .location("Europe")
            .price_range(Some(1000.0), None)
            .min_rating(4.8)
            .search("e")
            .sort_by(SortOrder::PriceDesc);

        let results = filter.apply(&catalog);

        assert!(!results.is_empty());
        for d in &results {
            assert!(filter.matches(d));
            assert!(catalog.contains(d));
        }
        assert!(is_sorted_by(&results, SortOrder::PriceDesc));
    }

    #[test]
    fn test_sort_orders() {
        let catalog = seed::destinations();

        for order in [SortOrder::PriceAsc, SortOrder::PriceDesc, SortOrder::RatingDesc] {
            let results = DestinationFilter::new().sort_by(order).apply(&catalog);
            assert_eq!(results.len(), catalog.len());
            assert!(is_sorted_by(&results, order), "{order:?} not sorted");
        }

        // Bali and Rio share a price; stable sort keeps storage order
        let asc = DestinationFilter::new()
            .sort_by(SortOrder::PriceAsc)
            .apply(&catalog);
        let bali = asc.iter().position(|d| d.id == "dest-002").unwrap();
        let rio = asc.iter().position(|d| d.id == "dest-008").unwrap();
        assert!(bali < rio);
    }

    #[test]
    fn test_malformed_fields_are_ignored() {
        let filter: DestinationFilter = serde_json::from_value(serde_json::json!({
            "location": "Asia",
            "minPrice": "cheap",
            "maxPrice": null,
            "minRating": [4],
            "sortBy": "name-asc"
        }))
        .unwrap();

        assert_eq!(filter.location.as_deref(), Some("Asia"));
        assert_eq!(filter.min_price, None);
        assert_eq!(filter.min_rating, None);
        assert_eq!(filter.sort_by, None);

        let parsed: DestinationFilter =
            serde_json::from_value(serde_json::json!({ "sortBy": "rating-desc" })).unwrap();
        assert_eq!(parsed.sort_by, Some(SortOrder::RatingDesc));
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=14).collect();

        let first = paginate(&items, 1, DEFAULT_PAGE_SIZE);
        assert_eq!(first.items, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(first.total_pages, 3);

        let last = paginate(&items, 3, DEFAULT_PAGE_SIZE);
        assert_eq!(last.items, vec![13, 14]);

        assert!(paginate(&items, 4, DEFAULT_PAGE_SIZE).items.is_empty());
        assert_eq!(paginate(&items, 0, DEFAULT_PAGE_SIZE).page, 1);
        assert_eq!(paginate::<u32>(&[], 1, DEFAULT_PAGE_SIZE).total_pages, 0);
    }
}
