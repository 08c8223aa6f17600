mod meta;
pub use self::meta::ProductsResponse;

mod category;
pub use self::category::Category;

mod product;
pub use self::product::{Dimensions, Product, ProductID, ProductMeta, Review};
