//! Router for the storefront API.
//!
//! | Method | Path | Auth |
//! |---|---|---|
//! | GET | `/api/areas` | - |
//! | POST | `/api/areas` | admin |
//! | DELETE | `/api/areas/:id` | admin |
//! | GET | `/api/schemes/:area` | - |
//! | POST | `/api/schemes` | admin |
//! | DELETE | `/api/schemes/:id` | admin |
//! | GET | `/api/products` | - |
//! | POST | `/api/products` | admin |
//! | DELETE | `/api/products/:id` | admin |
//! | POST | `/api/upload` | admin |
//! | GET | `/api/admin/schemes` | admin |
//! | GET | `/api/admin/customers/count` | admin |
//! | GET | `/api/orders` | admin |
//! | POST | `/api/orders` | optional customer |
//! | POST | `/api/orders/bulk` | optional customer |
//! | GET | `/api/orders/mine` | customer |
//! | PUT | `/api/orders/:id/status` | admin |
//! | POST | `/api/auth/admin/login` | - |
//! | POST | `/api/auth/admin/create` | admin |
//! | POST | `/api/auth/customer/register` | - |
//! | POST | `/api/auth/customer/login` | - |
//! | PUT | `/api/auth/customer/profile` | customer |
//!
//! Uploaded files are served under `/uploads`. Anything else is a JSON 404.

use super::state::AppState;
use super::{account, catalog, orders, upload};
use crate::blob::UPLOADS_PREFIX;
use axum::extract::OriginalUri;
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState, upload_dir: &Path) -> Router {
    let api_routes = Router::new()
        // Catalog
        .route("/areas", get(catalog::list_areas).post(catalog::create_area))
        .route("/areas/:id", delete(catalog::delete_area))
        .route("/schemes", post(catalog::create_scheme))
        .route("/schemes/:id", get(catalog::list_schemes_for_area).delete(catalog::delete_scheme))
        .route("/products", get(catalog::list_products).post(catalog::create_product))
        .route("/products/:id", delete(catalog::delete_product))
        .route("/upload", post(upload::upload_image))
        .route("/admin/schemes", get(catalog::list_all_schemes))
        .route("/admin/customers/count", get(account::customer_count))
        // Orders
        .route("/orders", get(orders::list_all_orders).post(orders::place_order))
        .route("/orders/bulk", post(orders::place_bulk_order))
        .route("/orders/mine", get(orders::list_own_orders))
        .route("/orders/:id/status", put(orders::set_order_status))
        // Accounts
        .route("/auth/admin/login", post(account::admin_login))
        .route("/auth/admin/create", post(account::create_admin))
        .route("/auth/customer/register", post(account::register_customer))
        .route("/auth/customer/login", post(account::customer_login))
        .route("/auth/customer/profile", put(account::update_profile));

    Router::new()
        .route("/", get(root))
        .nest("/api", api_routes)
        .nest_service(UPLOADS_PREFIX, ServeDir::new(upload_dir))
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "API is running..."
}

async fn route_not_found(OriginalUri(uri): OriginalUri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Route Not Found", "path": uri.path() })),
    )
}
