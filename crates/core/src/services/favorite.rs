//! Favorites ledger.
//!
//! Each user holds at most one favorite per pet. Favorites are strictly
//! per-user; there is no admin view into another user's list.

use petgallery_common::{AppError, AppResult, IdGenerator};
use petgallery_db::{
    entities::{favorite, pet},
    repositories::{FavoriteRepository, PetRepository},
};
use sea_orm::Set;

/// Favorite service for per-user pet bookmarks.
#[derive(Clone)]
pub struct FavoriteService {
    favorite_repo: FavoriteRepository,
    pet_repo: PetRepository,
    id_gen: IdGenerator,
}

impl FavoriteService {
    /// Create a new favorite service.
    #[must_use]
    pub const fn new(favorite_repo: FavoriteRepository, pet_repo: PetRepository) -> Self {
        Self {
            favorite_repo,
            pet_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Add a pet to the user's favorites.
    pub async fn add(&self, user_id: &str, pet_id: &str) -> AppResult<favorite::Model> {
        self.pet_repo.get_by_id(pet_id).await?;

        if self.favorite_repo.is_favorited(user_id, pet_id).await? {
            return Err(AppError::Conflict("Pet already favorited".to_string()));
        }

        let model = favorite::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            pet_id: Set(pet_id.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.favorite_repo.create(model).await
    }

    /// Remove a pet from the user's favorites.
    pub async fn remove(&self, user_id: &str, pet_id: &str) -> AppResult<()> {
        let favorite = self
            .favorite_repo
            .find_by_user_and_pet(user_id, pet_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Favorite not found".to_string()))?;

        self.favorite_repo.delete(favorite).await
    }

    /// Check whether the user has favorited a pet.
    pub async fn is_favorited(&self, user_id: &str, pet_id: &str) -> AppResult<bool> {
        self.favorite_repo.is_favorited(user_id, pet_id).await
    }

    /// List the user's favorited pets, most recent first.
    pub async fn list_pets(&self, user_id: &str) -> AppResult<Vec<pet::Model>> {
        self.favorite_repo.find_pets_for_user(user_id).await
    }

    /// List just the IDs of the user's favorited pets.
    pub async fn list_pet_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        self.favorite_repo.find_pet_ids_for_user(user_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use petgallery_db::entities::pet::PetStatus;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn make_pet(id: &str) -> pet::Model {
        pet::Model {
            id: id.to_string(),
            name: "Luna".to_string(),
            species: "cat".to_string(),
            age: 2,
            description: None,
            photo_url: None,
            location_id: "loc1".to_string(),
            status: PetStatus::Approved,
        }
    }

    fn make_favorite(id: &str, user_id: &str, pet_id: &str) -> favorite::Model {
        favorite::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            pet_id: pet_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn service_with(db: MockDatabase) -> FavoriteService {
        let conn = Arc::new(db.into_connection());
        FavoriteService::new(FavoriteRepository::new(conn.clone()), PetRepository::new(conn))
    }

    #[tokio::test]
    async fn test_add_duplicate_conflicts() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[make_pet("pet1")]])
                .append_query_results([[make_favorite("fav1", "user1", "pet1")]]),
        );

        let result = service.add("user1", "pet1").await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_add_unknown_pet_not_found() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<pet::Model>::new()]),
        );

        let result = service.add("user1", "ghost").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_missing_favorite_not_found() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<favorite::Model>::new()]),
        );

        let result = service.remove("user1", "pet1").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_add_then_check_per_user() {
        let created = make_favorite("fav1", "user1", "pet1");
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[make_pet("pet1")]])
                .append_query_results([Vec::<favorite::Model>::new()])
                .append_query_results([[created.clone()]])
                // user1 sees the favorite; user2 does not.
                .append_query_results([[created]])
                .append_query_results([Vec::<favorite::Model>::new()])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }]),
        );

        let favorite = service.add("user1", "pet1").await.unwrap();
        assert_eq!(favorite.pet_id, "pet1");

        assert!(service.is_favorited("user1", "pet1").await.unwrap());
        assert!(!service.is_favorited("user2", "pet1").await.unwrap());
    }
}
