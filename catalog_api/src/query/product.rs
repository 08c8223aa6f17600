use url::Url;

use super::{common::QueryCommon, Query};

/// Category value meaning "no category filter applied".
pub const ALL_CATEGORIES: &str = "all";

/// One of the three listing endpoint shapes the API exposes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /products`
    List,
    /// `GET /products/category/{slug}`
    Category(String),
    /// `GET /products/search`
    Search,
}

impl Endpoint {
    /// Path segments below the API root. Segments are percent-encoded when
    /// pushed onto a URL, so slugs may contain reserved characters.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::List => vec!["products"],
            Endpoint::Category(slug) => vec!["products", "category", slug.as_str()],
            Endpoint::Search => vec!["products", "search"],
        }
    }
}

/// Request intent for a page of products.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProductQuery {
    pub common: QueryCommon,
    /// Free-text search. Blank values are ignored.
    pub q: Option<String>,
    /// Category slug, or [`ALL_CATEGORIES`].
    pub category: Option<String>,
}

impl Query for ProductQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(q) = self.search_term() {
            url.query_pairs_mut().append_pair("q", q);
        }
        url
    }
}

impl ProductQuery {
    pub fn with_search(mut self, q: &str) -> Self {
        self.q = Some(q.to_string());
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    /// The trimmed search term, if it is non-blank.
    pub fn search_term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// The category filter, unless it is absent or the "all" sentinel.
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }

    /// Picks the endpoint for this query. Search wins over category, and
    /// category wins over the unscoped listing.
    pub fn endpoint(&self) -> Endpoint {
        if self.search_term().is_some() {
            Endpoint::Search
        } else if let Some(category) = self.category_filter() {
            Endpoint::Category(category.to_string())
        } else {
            Endpoint::List
        }
    }

    /// Full request URL under `base`. Returns `None` if `base` cannot carry a path.
    pub fn to_url(&self, base: &Url) -> Option<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(self.endpoint().segments());
        Some(self.add_to_url(&url))
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{ProductQuery, Query, SortKey, SortOrder};

    use super::Endpoint;

    fn base() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    #[test]
    fn test_product_query_urls() {
        insta::assert_snapshot!(
            ProductQuery::default()
                .with_page(1)
                .with_limit(12)
                .with_search("iphone")
                .to_url(&base())
                .unwrap()
                .to_string(),
            @"https://example.com/products/search?limit=12&skip=0&q=iphone"
        );

        insta::assert_snapshot!(
            ProductQuery::default()
                .with_page(2)
                .with_limit(12)
                .with_category("all")
                .with_sort_by(SortKey::Price)
                .with_order(SortOrder::Desc)
                .to_url(&base())
                .unwrap()
                .to_string(),
            @"https://example.com/products?limit=12&skip=12&sortBy=price&order=desc"
        );
    }

    #[test]
    fn blank_search_falls_through_to_category() {
        let query = ProductQuery::default()
            .with_search("   ")
            .with_category("laptops");
        assert_eq!(query.endpoint(), Endpoint::Category("laptops".to_string()));
    }

    #[test]
    fn search_term_is_trimmed() {
        let query = ProductQuery::default().with_search("  red shoes ");
        assert_eq!(query.search_term(), Some("red shoes"));
    }

    #[test]
    fn category_slug_is_path_encoded() {
        let url = ProductQuery::default()
            .with_category("home decor/lamps")
            .to_url(&base())
            .unwrap();
        assert_eq!(url.path(), "/products/category/home%20decor%2Flamps");
    }

    #[test]
    fn empty_category_means_unscoped() {
        let query = ProductQuery::default().with_category("");
        assert_eq!(query.endpoint(), Endpoint::List);
    }
}
