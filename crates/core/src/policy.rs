//! Resource access policy.
//!
//! Applications and user records are visible to their owner and to
//! admins; catalogue mutations require the admin flag. Favorites never
//! need a check here because their endpoints only ever act on the
//! caller's own list.

use petgallery_common::{AppError, AppResult};
use petgallery_db::entities::user;

/// Check whether `actor` may read or delete a resource owned by `owner_id`.
#[must_use]
pub fn can_access_owned(actor: &user::Model, owner_id: &str) -> bool {
    actor.is_admin || actor.id == owner_id
}

/// Require that `actor` owns the resource or is an admin.
pub fn ensure_owner_or_admin(actor: &user::Model, owner_id: &str) -> AppResult<()> {
    if can_access_owned(actor, owner_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden("Not allowed".to_string()))
    }
}

/// Require that `actor` is an admin.
pub fn ensure_admin(actor: &user::Model) -> AppResult<()> {
    if actor.is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin access required".to_string()))
    }
}
