//! Shelter location repository.

use std::sync::Arc;

use crate::entities::{Location, location};
use petgallery_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder,
    sea_query::{Expr, Func},
};

/// Location repository for database operations.
#[derive(Clone)]
pub struct LocationRepository {
    db: Arc<DatabaseConnection>,
}

impl LocationRepository {
    /// Create a new location repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a location by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<location::Model>> {
        Location::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a location by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<location::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Location not found".to_string()))
    }

    /// List all locations, sorted case-insensitively by name.
    pub async fn find_all(&self) -> AppResult<Vec<location::Model>> {
        Location::find()
            .order_by_asc(Expr::expr(Func::lower(Expr::col(location::Column::Name))))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new location.
    pub async fn create(&self, model: location::ActiveModel) -> AppResult<location::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
