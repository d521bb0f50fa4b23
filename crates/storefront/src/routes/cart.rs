//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The session only identifies the shopper; the cart itself is held
//! server-side in [`crate::services::ShopperStore`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use firecracker_core::{Cart, CartLine, CartManager, ProductId, Receipt};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::services::{current_cart, with_cart};
use crate::state::AppState;

/// HTMX response header that fires client-side events.
pub const HX_TRIGGER: &str = "HX-Trigger";

/// HTMX response header that fires client-side events once the response
/// has been swapped into the page.
pub const HX_TRIGGER_AFTER_SWAP: &str = "HX-Trigger-After-Swap";

/// Event fired after any cart mutation.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Event fired once the checkout modal is in the page; `static/js/checkout.js`
/// opens it as a blocking modal.
pub const CHECKOUT_COMPLETE_EVENT: &str = "checkout-complete";

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub product_id: u32,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub item_count: u32,
}

/// Checkout confirmation display data.
#[derive(Clone)]
pub struct ReceiptView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub item_count: u32,
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.as_u32(),
            name: line.name.clone(),
            quantity: line.quantity(),
            unit_price: line.unit_price.to_string(),
            line_price: line.line_total().to_string(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

impl From<&Receipt> for ReceiptView {
    fn from(receipt: &Receipt) -> Self {
        Self {
            lines: receipt.lines.iter().map(CartLineView::from).collect(),
            total: receipt.total.to_string(),
            item_count: receipt.item_count,
        }
    }
}

/// Add or remove form data.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub product_id: ProductId,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Checkout confirmation modal fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout_modal.html")]
pub struct CheckoutModalTemplate {
    pub receipt: ReceiptView,
}

fn cart_fragment(cart: &Cart) -> Response {
    (
        AppendHeaders([(HX_TRIGGER, CART_UPDATED_EVENT)]),
        CartItemsTemplate {
            cart: CartView::from(cart),
        },
    )
        .into_response()
}

/// Cart items fragment.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let cart = current_cart(&state, &session).await?;
    Ok(CartItemsTemplate {
        cart: CartView::from(&cart),
    })
}

/// Add one unit of a product (HTMX).
///
/// Returns the refreshed cart fragment and fires `cart-updated`.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartItemForm>,
) -> Result<Response> {
    let product = state.catalog().lookup(form.product_id)?;
    let (_, cart) = with_cart(&state, &session, |manager| manager.add(product)).await?;
    Ok(cart_fragment(&cart))
}

/// Remove one unit of a product (HTMX).
///
/// Removing a product that is not in the cart leaves it unchanged.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartItemForm>,
) -> Result<Response> {
    let product = state.catalog().lookup(form.product_id)?;
    let (removed, cart) =
        with_cart(&state, &session, |manager| manager.remove(product)).await?;
    if removed.is_none() {
        tracing::debug!(product_id = %product.id, "Product not in cart, nothing removed");
    }
    Ok(cart_fragment(&cart))
}

/// Cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let cart = current_cart(&state, &session).await?;
    Ok(CartCountTemplate {
        count: cart.item_count(),
    })
}

/// Check out (HTMX).
///
/// Empties the shopper's cart and returns a modal reporting the final total.
/// The page blocks behind the modal and keeps showing the old cart until the
/// shopper acknowledges it; then the cart panel and badge are refreshed.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let (receipt, _) = with_cart(&state, &session, CartManager::checkout).await?;

    Ok((
        AppendHeaders([(HX_TRIGGER_AFTER_SWAP, CHECKOUT_COMPLETE_EVENT)]),
        CheckoutModalTemplate {
            receipt: ReceiptView::from(&receipt),
        },
    )
        .into_response())
}
