use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::dto::{self, AddProductQuery, CategoryQuery, ProductIdQuery, UpdateStockQuery};
use crate::app::{errors, AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/all-products", get(list_products))
        .route("/product", get(get_product))
        .route("/categories", get(list_categories))
        .route("/category", get(get_products_by_category))
        .route("/add-product", post(add_product))
        .route("/update-product-stock", post(update_product_stock))
        .route("/remove-product", post(remove_product))
        .route("/add-category", post(add_category))
        .route("/remove-category", post(remove_category))
}

/// Run a service call on the blocking pool.
///
/// The service takes a `std::sync::Mutex` and writes snapshot files while
/// holding it; neither may park an async worker.
async fn blocking<T, F>(services: Arc<AppServices>, f: F) -> Result<T, axum::response::Response>
where
    F: FnOnce(&AppServices) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&services))
        .await
        .map_err(|e| {
            tracing::error!("catalog task failed: {e}");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "catalog task failed",
            )
        })
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match blocking(services, |s| s.list_products()).await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(res) => res,
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<ProductIdQuery>,
) -> axum::response::Response {
    let id = match query.product_id() {
        Ok(v) => v,
        Err(res) => return res,
    };
    match blocking(services, move |s| s.get_product(&id)).await {
        Ok(Ok(product)) => (StatusCode::OK, Json(product)).into_response(),
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(res) => res,
    }
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match blocking(services, |s| s.list_categories()).await {
        Ok(names) => (StatusCode::OK, Json(names)).into_response(),
        Err(res) => res,
    }
}

pub async fn get_products_by_category(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<CategoryQuery>,
) -> axum::response::Response {
    let category = match query.category() {
        Ok(v) => v,
        Err(res) => return res,
    };
    match blocking(services, move |s| s.get_products_by_category(&category)).await {
        Ok(Ok(products)) => (StatusCode::OK, Json(products)).into_response(),
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(res) => res,
    }
}

pub async fn add_product(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<AddProductQuery>,
) -> axum::response::Response {
    let new = match query.into_new_product() {
        Ok(v) => v,
        Err(res) => return res,
    };

    let product = match blocking(services, move |s| s.create_product(new)).await {
        Ok(Ok(p)) => p,
        Ok(Err(e)) => return errors::service_error_to_response(e),
        Err(res) => return res,
    };

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": format!("successfully added {} to the products", product.title),
            "prodId": product.id,
        })),
    )
        .into_response()
}

pub async fn update_product_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<UpdateStockQuery>,
) -> axum::response::Response {
    let (id, delta) = match query.parse() {
        Ok(v) => v,
        Err(res) => return res,
    };
    match blocking(services, move |s| s.update_product_stock(&id, delta)).await {
        Ok(Ok(change)) => {
            (StatusCode::OK, Json(dto::stock_change_to_json(&change))).into_response()
        }
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(res) => res,
    }
}

pub async fn remove_product(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<ProductIdQuery>,
) -> axum::response::Response {
    let id = match query.product_id() {
        Ok(v) => v,
        Err(res) => return res,
    };
    match blocking(services, move |s| s.remove_product(&id)).await {
        Ok(Ok(removed)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": format!("successfully removed {}", removed.title),
                "product": removed,
            })),
        )
            .into_response(),
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(res) => res,
    }
}

pub async fn add_category(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<CategoryQuery>,
) -> axum::response::Response {
    let category = match query.category() {
        Ok(v) => v,
        Err(res) => return res,
    };
    let name = category.clone();
    match blocking(services, move |s| s.add_category(&name)).await {
        Ok(Ok(())) => (
            StatusCode::CREATED,
            Json(dto::message(format!("successfully added the {category} category"))),
        )
            .into_response(),
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(res) => res,
    }
}

pub async fn remove_category(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<CategoryQuery>,
) -> axum::response::Response {
    let category = match query.category() {
        Ok(v) => v,
        Err(res) => return res,
    };
    let name = category.clone();
    match blocking(services, move |s| s.remove_category(&name)).await {
        Ok(Ok(())) => (
            StatusCode::OK,
            Json(dto::message(format!("successfully removed the {category} category"))),
        )
            .into_response(),
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(res) => res,
    }
}
