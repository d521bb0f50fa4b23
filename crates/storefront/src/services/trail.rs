//! Pointer trail operations on the shopper's server-side trail.

use firecracker_core::{Point, Trail};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::session::{find_shopper_id, shopper_id};
use crate::services::shoppers::lock;
use crate::state::AppState;

/// Record a pointer position, returning the updated trail.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store cannot be read or
/// written, or `AppError::Internal` if the trail lock is poisoned.
pub async fn record_point(
    state: &AppState,
    session: &Session,
    point: Point,
) -> Result<Trail, AppError> {
    let shopper = shopper_id(session).await?;
    let entry = state.shoppers().trail(shopper);

    let mut trail = lock(&entry)?;
    trail.push(point);
    let updated = trail.clone();
    drop(trail);
    Ok(updated)
}

/// The shopper's current trail; empty if they have none yet.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store cannot be read, or
/// `AppError::Internal` if the trail lock is poisoned.
pub async fn current_trail(state: &AppState, session: &Session) -> Result<Trail, AppError> {
    let Some(shopper) = find_shopper_id(session).await? else {
        return Ok(state.shoppers().empty_trail());
    };
    let Some(entry) = state.shoppers().find_trail(shopper) else {
        return Ok(state.shoppers().empty_trail());
    };
    let trail = lock(&entry)?.clone();
    Ok(trail)
}
