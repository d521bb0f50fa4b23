//! Pointer trail route handler.
//!
//! `static/js/trail.js` posts throttled pointer positions here; the response
//! is the SVG fragment for the trail overlay.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use firecracker_core::{Point, Trail};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::services::record_point;
use crate::state::AppState;

/// Trail display data for templates.
#[derive(Clone)]
pub struct TrailView {
    /// Older positions, drawn as small dots.
    pub points: Vec<Point>,
    /// The newest position, drawn as the cursor.
    pub cursor: Option<Point>,
}

impl From<&Trail> for TrailView {
    fn from(trail: &Trail) -> Self {
        Self {
            points: trail.points().copied().collect(),
            cursor: trail.cursor(),
        }
    }
}

/// Pointer movement form data.
#[derive(Debug, Deserialize)]
pub struct PointerForm {
    pub x: i32,
    pub y: i32,
}

/// Trail overlay fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/trail.html")]
pub struct TrailTemplate {
    pub trail: TrailView,
}

/// Record a pointer position and return the updated trail.
#[instrument(level = "trace", skip(state, session))]
pub async fn record(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PointerForm>,
) -> Result<impl IntoResponse> {
    let trail = record_point(&state, &session, Point::new(form.x, form.y)).await?;

    Ok(TrailTemplate {
        trail: TrailView::from(&trail),
    })
}
