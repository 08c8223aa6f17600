//! Product records as returned by `/products`, `/products/{id}` and the
//! search / category listings.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Numeric identifier for a product.
pub type ProductID = u64;

/// Full product record.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique numeric product identifier.
    pub id: ProductID,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Category slug.
    pub category: String,

    /// Listed (undiscounted) price in USD.
    #[serde(deserialize_with = "non_negative_amount")]
    pub price: f64,

    /// Discount in percent, 0 to 100.
    #[serde(
        default,
        deserialize_with = "percentage",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_percentage: Option<f64>,

    /// Average rating, typically 0 to 5.
    #[serde(default)]
    pub rating: f64,

    /// Units in stock.
    #[serde(default)]
    pub stock: u32,

    #[serde(default)]
    pub tags: Vec<String>,

    pub brand: Option<String>,

    pub sku: Option<String>,

    /// Shipping weight, unitless as reported by the API.
    pub weight: Option<f64>,

    pub dimensions: Option<Dimensions>,

    pub warranty_information: Option<String>,

    pub shipping_information: Option<String>,

    /// Free-form availability text. Not always present.
    pub availability_status: Option<String>,

    pub return_policy: Option<String>,

    pub minimum_order_quantity: Option<u32>,

    #[serde(default)]
    pub reviews: Vec<Review>,

    pub meta: Option<ProductMeta>,

    /// Image URLs in display order.
    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub thumbnail: String,
}

/// Physical dimensions. Any side may be missing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
}

/// A customer review attached to a product.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    pub date: DateTime<Utc>,
    pub reviewer_name: String,
    pub reviewer_email: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMeta {
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub barcode: Option<String>,
}

impl Product {
    /// Images for a detail view: the thumbnail first, then the gallery,
    /// with duplicates and blanks removed and order preserved.
    pub fn gallery(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(self.images.len() + 1);
        let candidates = std::iter::once(self.thumbnail.as_str())
            .chain(self.images.iter().map(String::as_str));
        for src in candidates {
            if !src.is_empty() && !out.contains(&src) {
                out.push(src);
            }
        }
        out
    }

    /// Mean of the attached review ratings, if there are any reviews.
    pub fn review_average(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        Some(f64::from(sum) / self.reviews.len() as f64)
    }
}

fn non_negative_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(de::Error::custom(format!(
            "expected a non-negative price, got {}",
            value
        )))
    }
}

fn percentage<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        Some(p) if !(0.0..=100.0).contains(&p) => Err(de::Error::custom(format!(
            "discount percentage out of range: {}",
            p
        ))),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(extra: serde_json::Value) -> serde_json::Value {
        let mut base = serde_json::json!({
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "category": "beauty",
            "price": 9.99,
            "rating": 4.94,
            "stock": 5,
            "thumbnail": "https://cdn.example.com/1/thumbnail.png"
        });
        if let (Some(obj), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                obj.insert(k.clone(), v.clone());
            }
        }
        base
    }

    #[test]
    fn optional_fields_default() {
        let p: Product = serde_json::from_value(minimal(serde_json::json!({}))).unwrap();
        assert_eq!(p.discount_percentage, None);
        assert!(p.images.is_empty());
        assert!(p.reviews.is_empty());
        assert!(p.brand.is_none());
        assert_eq!(p.description, "");
    }

    #[test]
    fn negative_price_is_rejected() {
        let result =
            serde_json::from_value::<Product>(minimal(serde_json::json!({ "price": -1.0 })));
        assert!(result.is_err());
    }

    #[test]
    fn discount_above_hundred_is_rejected() {
        let result = serde_json::from_value::<Product>(minimal(
            serde_json::json!({ "discountPercentage": 120.0 }),
        ));
        assert!(result.is_err());
    }

    #[test]
    fn null_discount_is_none() {
        let p: Product = serde_json::from_value(minimal(
            serde_json::json!({ "discountPercentage": null }),
        ))
        .unwrap();
        assert_eq!(p.discount_percentage, None);
    }

    #[test]
    fn gallery_puts_thumbnail_first_and_dedupes() {
        let p: Product = serde_json::from_value(minimal(serde_json::json!({
            "images": [
                "https://cdn.example.com/1/a.png",
                "https://cdn.example.com/1/thumbnail.png",
                "https://cdn.example.com/1/a.png",
                ""
            ]
        })))
        .unwrap();
        assert_eq!(
            p.gallery(),
            vec![
                "https://cdn.example.com/1/thumbnail.png",
                "https://cdn.example.com/1/a.png",
            ]
        );
    }

    #[test]
    fn review_average_over_attached_reviews() {
        let p: Product = serde_json::from_value(minimal(serde_json::json!({
            "reviews": [
                { "rating": 5, "comment": "Great", "date": "2024-05-23T08:56:21.618Z", "reviewerName": "A" },
                { "rating": 2, "comment": "Meh", "date": "2024-05-23T08:56:21.618Z", "reviewerName": "B" }
            ]
        })))
        .unwrap();
        assert_eq!(p.review_average(), Some(3.5));
    }
}
