mod common;
pub use self::common::{Query, QueryCommon, SortKey, SortOrder, DEFAULT_PAGE_SIZE};

mod product;
pub use self::product::{Endpoint, ProductQuery, ALL_CATEGORIES};
