//! Pet repository.

use std::sync::Arc;

use crate::entities::{Pet, application, favorite, pet};
use petgallery_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

/// Filters for listing pets.
#[derive(Debug, Clone, Default)]
pub struct PetFilter {
    /// Restrict to a listing status.
    pub status: Option<pet::PetStatus>,
    /// Restrict to a species.
    pub species: Option<String>,
    /// Restrict to a shelter location.
    pub location_id: Option<String>,
}

/// Pet repository for database operations.
#[derive(Clone)]
pub struct PetRepository {
    db: Arc<DatabaseConnection>,
}

impl PetRepository {
    /// Create a new pet repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a pet by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<pet::Model>> {
        Pet::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a pet by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<pet::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pet not found".to_string()))
    }

    /// List pets matching the filter, newest first.
    pub async fn find_filtered(&self, filter: &PetFilter) -> AppResult<Vec<pet::Model>> {
        let mut query = Pet::find();

        if let Some(status) = filter.status {
            query = query.filter(pet::Column::Status.eq(status));
        }
        if let Some(species) = &filter.species {
            query = query.filter(pet::Column::Species.eq(species));
        }
        if let Some(location_id) = &filter.location_id {
            query = query.filter(pet::Column::LocationId.eq(location_id));
        }

        query
            .order_by_desc(pet::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new pet.
    pub async fn create(&self, model: pet::ActiveModel) -> AppResult<pet::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a pet.
    pub async fn update(&self, model: pet::ActiveModel) -> AppResult<pet::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a pet together with its applications and favorites.
    pub async fn delete_cascading(&self, id: &str) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        application::Entity::delete_many()
            .filter(application::Column::PetId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        favorite::Entity::delete_many()
            .filter(favorite::Column::PetId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Pet::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::pet::PetStatus;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_pet(id: &str, name: &str, status: PetStatus) -> pet::Model {
        pet::Model {
            id: id.to_string(),
            name: name.to_string(),
            species: "dog".to_string(),
            age: 3,
            description: None,
            photo_url: None,
            location_id: "loc1".to_string(),
            status,
        }
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let pet = create_test_pet("pet1", "Max", PetStatus::Approved);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pet]])
                .into_connection(),
        );

        let repo = PetRepository::new(db);
        let result = repo.find_by_id("pet1").await.unwrap();

        assert_eq!(result.unwrap().name, "Max");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<pet::Model>::new()])
                .into_connection(),
        );

        let repo = PetRepository::new(db);
        let result = repo.get_by_id("nonexistent").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_filtered() {
        let pet = create_test_pet("pet1", "Max", PetStatus::Approved);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pet]])
                .into_connection(),
        );

        let repo = PetRepository::new(db);
        // Built through the public re-export; downstream crates import the
        // filter from `repositories`, not from this module.
        let filter = crate::repositories::PetFilter {
            status: Some(PetStatus::Approved),
            ..crate::repositories::PetFilter::default()
        };
        let result = repo.find_filtered(&filter).await.unwrap();

        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascading() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 3,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );

        let repo = PetRepository::new(db);
        repo.delete_cascading("pet1").await.unwrap();
    }
}
