//! Shareable address state: the page, category, sort and search values a
//! user can bookmark, mapped to and from a URL query string.
//!
//! Changing any filter (category, sort key, sort order, search) moves the
//! address back to page 1. A bare page change leaves the filters alone.

use std::fmt;

use catalog_api::{ProductQuery, Query, SortKey, SortOrder, ALL_CATEGORIES};
use url::form_urlencoded;

/// Address keys with a fixed meaning. Any other key is carried through untouched.
const KNOWN_KEYS: [&str; 5] = ["page", "category", "sortBy", "order", "q"];

/// The view state encoded in the address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressState {
    /// 1-based page number.
    pub page: u32,
    /// Category slug, or `"all"`.
    pub category: String,
    pub sort_by: Option<SortKey>,
    pub order: Option<SortOrder>,
    /// Search text. Never `Some("")`.
    pub q: Option<String>,
    extra: Vec<(String, String)>,
}

impl Default for AddressState {
    fn default() -> Self {
        Self {
            page: 1,
            category: ALL_CATEGORIES.to_string(),
            sort_by: None,
            order: None,
            q: None,
            extra: Vec::new(),
        }
    }
}

/// A partial address change. Only fields that are `Some` are applied.
///
/// For `sort_by` and `order`, `Some(None)` clears the value. An empty
/// `category` selects all categories and an empty `q` clears the search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressUpdate {
    pub page: Option<u32>,
    pub category: Option<String>,
    pub sort_by: Option<Option<SortKey>>,
    pub order: Option<Option<SortOrder>>,
    pub q: Option<String>,
}

impl AddressUpdate {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn category(category: &str) -> Self {
        Self {
            category: Some(category.to_string()),
            ..Self::default()
        }
    }

    /// Sets or clears both halves of the sort pair.
    pub fn sort(sort: Option<(SortKey, SortOrder)>) -> Self {
        Self {
            sort_by: Some(sort.map(|(key, _)| key)),
            order: Some(sort.map(|(_, order)| order)),
            ..Self::default()
        }
    }

    pub fn search(q: &str) -> Self {
        Self {
            q: Some(q.to_string()),
            ..Self::default()
        }
    }

    /// True when the update touches a filter and therefore resets the page.
    pub fn changes_filters(&self) -> bool {
        self.category.is_some() || self.sort_by.is_some() || self.order.is_some() || self.q.is_some()
    }
}

/// Identity of one remote listing request. Two addresses with the same key
/// show the same results.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub page: u32,
    pub category: String,
    pub sort_by: Option<SortKey>,
    pub order: Option<SortOrder>,
    pub q: Option<String>,
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "p{}:c{}:s{}:o{}:q{:?}",
            self.page,
            self.category,
            self.sort_by.map(|s| s.as_str()).unwrap_or("-"),
            self.order.map(|o| o.as_str()).unwrap_or("-"),
            self.q.as_deref().unwrap_or(""),
        )
    }
}

/// A filter that differs from the default view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActiveFilter {
    Search(String),
    Category(String),
    Sort(SortKey, SortOrder),
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveFilter::Search(q) => write!(f, "Search: {}", q),
            ActiveFilter::Category(c) => write!(f, "Category: {}", c),
            ActiveFilter::Sort(key, order) => write!(f, "Sort: {} ({})", key, order),
        }
    }
}

impl AddressState {
    /// Reads an address from a query string, with or without the leading `?`.
    ///
    /// Missing or invalid values fall back to their defaults: page 1,
    /// category `"all"`, and no sort or search.
    pub fn parse(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        let mut state = Self::default();
        let mut seen: Vec<String> = Vec::new();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let key = key.into_owned();
            let value = value.into_owned();
            if !KNOWN_KEYS.contains(&key.as_str()) {
                state.extra.push((key, value));
                continue;
            }
            // The first occurrence of a known key wins.
            if seen.contains(&key) {
                continue;
            }
            match key.as_str() {
                "page" => state.page = parse_page(&value),
                "category" if !value.is_empty() => state.category = value,
                "sortBy" => state.sort_by = value.parse().ok(),
                "order" => state.order = value.parse().ok(),
                "q" if !value.is_empty() => state.q = Some(value),
                _ => {}
            }
            seen.push(key);
        }
        state
    }

    /// Serializes the address. `page` and `category` are always written,
    /// unset values are omitted, unknown keys are kept after the known ones.
    pub fn to_query_string(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        out.append_pair("page", &self.page.to_string());
        out.append_pair("category", &self.category);
        if let Some(sort_by) = self.sort_by {
            out.append_pair("sortBy", sort_by.as_str());
        }
        if let Some(order) = self.order {
            out.append_pair("order", order.as_str());
        }
        if let Some(q) = &self.q {
            out.append_pair("q", q);
        }
        for (key, value) in &self.extra {
            out.append_pair(key, value);
        }
        out.finish()
    }

    /// Applies a partial update. Any filter field in the update, even one
    /// set to its current value, resets the page to 1.
    pub fn apply(&mut self, update: AddressUpdate) {
        let resets_page = update.changes_filters();

        if let Some(page) = update.page {
            self.page = page;
        }
        if let Some(category) = update.category {
            self.category = if category.is_empty() {
                ALL_CATEGORIES.to_string()
            } else {
                category
            };
        }
        if let Some(sort_by) = update.sort_by {
            self.sort_by = sort_by;
        }
        if let Some(order) = update.order {
            self.order = order;
        }
        if let Some(q) = update.q {
            self.q = if q.is_empty() { None } else { Some(q) };
        }

        if resets_page {
            self.page = 1;
        }
    }

    /// Returns a copy with `update` applied.
    pub fn with(&self, update: AddressUpdate) -> Self {
        let mut next = self.clone();
        next.apply(update);
        next
    }

    /// The sort pair, only when both halves are set.
    pub fn sort(&self) -> Option<(SortKey, SortOrder)> {
        self.sort_by.zip(self.order)
    }

    /// Builds the remote request for this address.
    pub fn to_product_query(&self, limit: u32) -> ProductQuery {
        let mut query = ProductQuery::default()
            .with_page(self.page)
            .with_limit(limit)
            .with_category(&self.category);
        if let Some(q) = &self.q {
            query = query.with_search(q);
        }
        if let Some(sort_by) = self.sort_by {
            query = query.with_sort_by(sort_by);
        }
        if let Some(order) = self.order {
            query = query.with_order(order);
        }
        query
    }

    pub fn query_key(&self) -> QueryKey {
        QueryKey {
            page: self.page,
            category: self.category.clone(),
            sort_by: self.sort_by,
            order: self.order,
            q: self.q.clone(),
        }
    }

    /// Filters currently narrowing or reordering the listing.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut filters = Vec::new();
        if let Some(q) = &self.q {
            filters.push(ActiveFilter::Search(q.clone()));
        }
        if self.category != ALL_CATEGORIES {
            filters.push(ActiveFilter::Category(self.category.clone()));
        }
        if let Some((key, order)) = self.sort() {
            filters.push(ActiveFilter::Sort(key, order));
        }
        filters
    }

    /// Returns to all categories, default order, and no search.
    pub fn clear_filters(&mut self) {
        self.apply(AddressUpdate {
            category: Some(ALL_CATEGORIES.to_string()),
            sort_by: Some(None),
            order: Some(None),
            q: Some(String::new()),
            ..AddressUpdate::default()
        });
    }
}

fn parse_page(value: &str) -> u32 {
    match value.trim().parse::<u32>() {
        Ok(page) if page > 0 => page,
        _ => 1,
    }
}

#[cfg(test)]
#[path = "address_tests.rs"]
mod tests;
