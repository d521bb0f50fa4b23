//! JSON API.
//!
//! Read-only views of the catalog and the shopper's cart, for scripts and tests.

use axum::{Json, extract::State};
use firecracker_core::{Cart, CartLine, Catalog, Price};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::services::current_cart;
use crate::state::AppState;

/// A cart line with its computed line total.
#[derive(Debug, Serialize)]
pub struct CartLineJson {
    #[serde(flatten)]
    pub line: CartLine,
    pub line_total: Price,
}

/// The cart with its derived total and item count.
#[derive(Debug, Serialize)]
pub struct CartJson {
    pub lines: Vec<CartLineJson>,
    pub item_count: u32,
    pub total: Price,
}

impl From<Cart> for CartJson {
    fn from(cart: Cart) -> Self {
        let item_count = cart.item_count();
        let total = cart.total();
        let lines = cart
            .lines()
            .iter()
            .map(|line| CartLineJson {
                line_total: line.line_total(),
                line: line.clone(),
            })
            .collect();
        Self {
            lines,
            item_count,
            total,
        }
    }
}

/// List the catalog.
#[instrument(skip(state))]
pub async fn catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.catalog().clone())
}

/// Show the shopper's cart.
#[instrument(skip(state, session))]
pub async fn cart(State(state): State<AppState>, session: Session) -> Result<Json<CartJson>> {
    let cart = current_cart(&state, &session).await?;
    Ok(Json(CartJson::from(cart)))
}
