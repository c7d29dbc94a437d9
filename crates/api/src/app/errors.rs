use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_core::CatalogError;
use stockroom_infra::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Catalog(e) => catalog_error_to_response(e),
        ServiceError::Persistence(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "persistence_error",
            e.to_string(),
        ),
    }
}

pub fn catalog_error_to_response(err: CatalogError) -> axum::response::Response {
    let (status, code) = match &err {
        CatalogError::ProductNotFound(_) => (StatusCode::NOT_FOUND, "product_not_found"),
        CatalogError::CategoryNotFound(_) => (StatusCode::NOT_FOUND, "category_not_found"),
        CatalogError::DuplicateProduct(_) => (StatusCode::CONFLICT, "duplicate_product"),
        CatalogError::CategoryExists(_) => (StatusCode::CONFLICT, "category_exists"),
        CatalogError::CategoryNotEmpty { .. } => (StatusCode::CONFLICT, "category_not_empty"),
        CatalogError::InsufficientStock { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "insufficient_stock")
        }
        CatalogError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
    };
    json_error(status, code, err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn invalid_parameter(name: &str, message: impl std::fmt::Display) -> axum::response::Response {
    json_error(
        StatusCode::BAD_REQUEST,
        "invalid_parameter",
        format!("{name}: {message}"),
    )
}
