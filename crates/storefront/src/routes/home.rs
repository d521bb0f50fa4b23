//! Storefront page route handler.
//!
//! The whole shop is a single page: catalog, cart, total, checkout button
//! and the pointer trail overlay.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use firecracker_core::Product;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::routes::cart::CartView;
use crate::routes::trail::TrailView;
use crate::services::{current_cart, current_trail};
use crate::state::AppState;

/// Catalog entry display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: u32,
    pub name: String,
    pub price: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_u32(),
            name: product.name.clone(),
            price: product.price.to_string(),
        }
    }
}

/// Storefront page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
    pub cart: CartView,
    pub trail: TrailView,
}

/// Display the storefront page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let cart = current_cart(&state, &session).await?;
    let trail = current_trail(&state, &session).await?;

    Ok(HomeTemplate {
        products: state.catalog().iter().map(ProductView::from).collect(),
        cart: CartView::from(&cart),
        trail: TrailView::from(&trail),
    })
}
