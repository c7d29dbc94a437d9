use std::str::FromStr;

use serde::Deserialize;

use stockroom_catalog::{NewProduct, Rating, StockChange};
use stockroom_core::ProductId;

use crate::app::errors;

// -------------------------
// Query DTOs
// -------------------------
//
// Every field arrives as raw text and is parsed here, so malformed input is
// rejected with a JSON error before it reaches the catalog.

#[derive(Debug, Deserialize)]
pub struct ProductIdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockQuery {
    pub id: Option<String>,
    pub stock_change: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddProductQuery {
    pub title: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub rate: Option<String>,
    pub count: Option<String>,
    pub stock: Option<String>,
}

// -------------------------
// Parsing helpers
// -------------------------

pub fn required(name: &str, value: Option<String>) -> Result<String, axum::response::Response> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(errors::invalid_parameter(name, "is required")),
    }
}

pub fn parse_number<T>(name: &str, raw: &str) -> Result<T, axum::response::Response>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| errors::invalid_parameter(name, format!("{raw:?} is not valid ({e})")))
}

fn optional_number<T>(
    name: &str,
    raw: Option<String>,
    default: T,
) -> Result<T, axum::response::Response>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(v) if !v.trim().is_empty() => parse_number(name, &v),
        _ => Ok(default),
    }
}

impl ProductIdQuery {
    pub fn product_id(self) -> Result<ProductId, axum::response::Response> {
        required("id", self.id).map(ProductId::from)
    }
}

impl CategoryQuery {
    pub fn category(self) -> Result<String, axum::response::Response> {
        required("category", self.category)
    }
}

impl UpdateStockQuery {
    pub fn parse(self) -> Result<(ProductId, i64), axum::response::Response> {
        let id = required("id", self.id)?;
        let raw = required("stockChange", self.stock_change)?;
        let delta = parse_number::<i64>("stockChange", &raw)?;
        Ok((ProductId::from(id), delta))
    }
}

impl AddProductQuery {
    /// `title`, `price`, `category` and `stock` are required; the rest default
    /// to empty text or zero. Value ranges are left to `NewProduct::validate`.
    pub fn into_new_product(self) -> Result<NewProduct, axum::response::Response> {
        let title = required("title", self.title)?;
        let category = required("category", self.category)?;
        let price = parse_number::<f64>("price", &required("price", self.price)?)?;
        let stock = parse_number::<u64>("stock", &required("stock", self.stock)?)?;
        let rate = optional_number::<f64>("rate", self.rate, 0.0)?;
        let count = optional_number::<u64>("count", self.count, 0)?;

        Ok(NewProduct {
            title,
            price,
            description: self.description.unwrap_or_default(),
            category,
            image: self.image.unwrap_or_default(),
            rating: Rating { rate, count },
            stock,
        })
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn message(text: impl Into<String>) -> serde_json::Value {
    serde_json::json!({ "message": text.into() })
}

pub fn stock_change_to_json(change: &StockChange) -> serde_json::Value {
    serde_json::json!({
        "message": format!("{} stock updated to {}", change.title, change.stock),
        "product": change.title,
        "newStock": change.stock,
    })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    fn ok<T>(r: Result<T, axum::response::Response>) -> T {
        match r {
            Ok(v) => v,
            Err(res) => panic!("unexpected error response: {}", res.status()),
        }
    }

    fn add_query(pairs: &[(&str, &str)]) -> AddProductQuery {
        let get = |k: &str| {
            pairs
                .iter()
                .find(|(name, _)| *name == k)
                .map(|(_, v)| v.to_string())
        };
        AddProductQuery {
            title: get("title"),
            price: get("price"),
            description: get("description"),
            category: get("category"),
            image: get("image"),
            rate: get("rate"),
            count: get("count"),
            stock: get("stock"),
        }
    }

    #[test]
    fn add_product_query_parses_numbers() {
        let p = ok(add_query(&[
            ("title", "Yellow yarn"),
            ("price", "10.99"),
            ("category", "yarn"),
            ("rate", "3"),
            ("count", "12"),
            ("stock", "12"),
        ])
        .into_new_product());
        assert_eq!(p.price, 10.99);
        assert_eq!(p.rating, Rating { rate: 3.0, count: 12 });
        assert_eq!(p.stock, 12);
        assert_eq!(p.description, "");
    }

    #[test]
    fn add_product_query_rejects_malformed_numbers() {
        let base = [("title", "t"), ("category", "yarn"), ("price", "1")];

        let mut pairs = base.to_vec();
        pairs.push(("stock", "-1"));
        let err = add_query(&pairs).into_new_product().unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let mut pairs = base.to_vec();
        pairs.push(("stock", "3"));
        pairs.push(("count", "many"));
        assert!(add_query(&pairs).into_new_product().is_err());
    }

    #[test]
    fn price_range_is_checked_by_the_catalog() {
        let pairs = [("title", "t"), ("category", "yarn"), ("price", "-2"), ("stock", "1")];
        let p = ok(add_query(&pairs).into_new_product());
        assert!(matches!(
            p.validate(),
            Err(stockroom_core::CatalogError::Validation(_))
        ));
    }

    #[test]
    fn missing_required_parameter_is_rejected() {
        let err = add_query(&[("title", "t"), ("price", "1"), ("stock", "1")])
            .into_new_product()
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let q = UpdateStockQuery {
            id: Some("p1".into()),
            stock_change: None,
        };
        assert!(q.parse().is_err());
    }

    #[test]
    fn update_stock_query_accepts_negative_delta() {
        let q = UpdateStockQuery {
            id: Some("p1".into()),
            stock_change: Some("-3".into()),
        };
        let (id, delta) = ok(q.parse());
        assert_eq!(id.as_str(), "p1");
        assert_eq!(delta, -3);
    }
}
