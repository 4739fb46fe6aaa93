//! Favorite repository.

use std::sync::Arc;

use crate::entities::{Favorite, favorite, pet};
use petgallery_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Favorite repository for database operations.
#[derive(Clone)]
pub struct FavoriteRepository {
    db: Arc<DatabaseConnection>,
}

impl FavoriteRepository {
    /// Create a new favorite repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the favorite a user holds on a pet, if any.
    pub async fn find_by_user_and_pet(
        &self,
        user_id: &str,
        pet_id: &str,
    ) -> AppResult<Option<favorite::Model>> {
        Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::PetId.eq(pet_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether a user has favorited a pet.
    pub async fn is_favorited(&self, user_id: &str, pet_id: &str) -> AppResult<bool> {
        Ok(self.find_by_user_and_pet(user_id, pet_id).await?.is_some())
    }

    /// Create a new favorite.
    pub async fn create(&self, model: favorite::ActiveModel) -> AppResult<favorite::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a favorite.
    pub async fn delete(&self, favorite: favorite::Model) -> AppResult<()> {
        favorite
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List the pets a user has favorited, most recently favorited first.
    pub async fn find_pets_for_user(&self, user_id: &str) -> AppResult<Vec<pet::Model>> {
        let rows = Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .order_by_desc(favorite::Column::CreatedAt)
            .find_also_related(pet::Entity)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().filter_map(|(_, pet)| pet).collect())
    }

    /// List the IDs of the pets a user has favorited.
    pub async fn find_pet_ids_for_user(&self, user_id: &str) -> AppResult<Vec<String>> {
        Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .select_only()
            .column(favorite::Column::PetId)
            .into_tuple()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
