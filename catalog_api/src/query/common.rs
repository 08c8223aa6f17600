//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] paging
//! fields, and the [`SortKey`] / [`SortOrder`] pair.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Trait implemented by query builders. Provides URL serialization and
/// shared builder methods for pagination and sorting.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the page number (1-indexed).
    fn with_page(mut self, page: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = page;
        self
    }

    /// Sets the number of results per page.
    fn with_limit(mut self, limit: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().limit = limit;
        self
    }

    /// Requests a server-side sort key. Only honored by some endpoints.
    fn with_sort_by(mut self, sort_by: SortKey) -> Self
    where
        Self: Sized,
    {
        self.get_common().sort_by = Some(sort_by);
        self
    }

    /// Requests a server-side sort order. Only honored by some endpoints.
    fn with_order(mut self, order: SortOrder) -> Self
    where
        Self: Sized,
    {
        self.get_common().order = Some(order);
        self
    }
}

/// Field a product listing can be sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Title,
    Rating,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Title => "title",
            SortKey::Rating => "rating",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(SortKey::Price),
            "title" => Ok(SortKey::Title),
            "rating" => Ok(SortKey::Rating),
            _ => Err(()),
        }
    }
}

/// Sort direction for product listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest / alphabetically first item first.
    Asc,
    /// Largest / alphabetically last item first.
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(()),
        }
    }
}

/// Fields shared by all listing queries: pagination and the server sort hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QueryCommon {
    /// Page number (1-indexed). Defaults to 1.
    pub page: u32,
    /// Results per page. Defaults to [`DEFAULT_PAGE_SIZE`].
    pub limit: u32,
    /// Server-side sort key, passed through when set.
    pub sort_by: Option<SortKey>,
    /// Server-side sort order, passed through when set.
    pub order: Option<SortOrder>,
}

impl Default for QueryCommon {
    fn default() -> QueryCommon {
        QueryCommon {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            sort_by: None,
            order: None,
        }
    }
}

impl QueryCommon {
    /// Offset of the first item on the requested page.
    pub fn skip(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Both halves of the sort pair, or `None` when either is unset.
    pub fn sort(&self) -> Option<(SortKey, SortOrder)> {
        self.sort_by.zip(self.order)
    }

    /// Appends the paging and sort parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("limit", &self.limit.to_string())
            .append_pair("skip", &self.skip().to_string());
        if let Some(sort_by) = self.sort_by {
            url.query_pairs_mut().append_pair("sortBy", sort_by.as_str());
        };
        if let Some(order) = self.order {
            url.query_pairs_mut().append_pair("order", order.as_str());
        };
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_is_zero_based_offset() {
        let common = QueryCommon {
            page: 3,
            limit: 12,
            ..QueryCommon::default()
        };
        assert_eq!(common.skip(), 24);
    }

    #[test]
    fn skip_for_page_zero_saturates() {
        let common = QueryCommon {
            page: 0,
            ..QueryCommon::default()
        };
        assert_eq!(common.skip(), 0);
    }

    #[test]
    fn sort_requires_both_halves() {
        let mut common = QueryCommon {
            sort_by: Some(SortKey::Price),
            ..QueryCommon::default()
        };
        assert_eq!(common.sort(), None);
        common.order = Some(SortOrder::Desc);
        assert_eq!(common.sort(), Some((SortKey::Price, SortOrder::Desc)));
    }

    #[test]
    fn sort_enums_parse_their_wire_names() {
        assert_eq!("rating".parse::<SortKey>(), Ok(SortKey::Rating));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("Price".parse::<SortKey>().is_err());
        assert!("".parse::<SortOrder>().is_err());
    }
}
