//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Storefront page (catalog, cart, trail)
//! GET  /health                 - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart items fragment
//! POST /cart/add               - Add one unit (returns cart fragment, triggers cart-updated)
//! POST /cart/remove            - Remove one unit (returns cart fragment, triggers cart-updated)
//! GET  /cart/count             - Cart count badge (fragment)
//! POST /cart/checkout          - Check out (returns total modal, triggers checkout-complete after swap)
//!
//! # Pointer trail
//! POST /trail                  - Record pointer position (returns trail SVG fragment)
//!
//! # JSON API
//! GET  /api/catalog            - Catalog
//! GET  /api/cart               - Shopper's cart with total
//! ```

pub mod api;
pub mod cart;
pub mod home;
pub mod trail;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/checkout", post(cart::checkout))
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(api::catalog))
        .route("/cart", get(api::cart))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .route("/trail", post(trail::record))
        .nest("/api", api_routes())
}
