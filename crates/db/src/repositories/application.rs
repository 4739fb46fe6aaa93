//! Adoption application repository.

use std::sync::Arc;

use crate::entities::{
    Application,
    application::{self, ApplicationStatus},
    pet, user,
};
use petgallery_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use serde::Serialize;

/// An application joined with its applicant and target pet.
///
/// Single-record fetch and listing both produce this exact field set, so
/// the two call sites can never drift apart.
#[derive(Debug, Clone, FromQueryResult, Serialize)]
pub struct ApplicationDetails {
    pub id: String,
    pub user_id: String,
    pub pet_id: String,
    pub message: String,
    pub contact_phone: String,
    pub living_situation: String,
    pub has_other_pets: bool,
    pub other_pets_details: Option<String>,
    pub status: ApplicationStatus,
    pub admin_notes: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::FixedOffset>,
    pub reviewed_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    // Applicant details
    pub user_email: String,
    pub user_name: String,
    // Pet details
    pub pet_name: String,
    pub pet_species: String,
    pub pet_age: i32,
    pub pet_photo_url: Option<String>,
}

/// Aggregate application counts per status.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusCounts {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub total: u64,
}

/// Application repository for database operations.
#[derive(Clone)]
pub struct ApplicationRepository {
    db: Arc<DatabaseConnection>,
}

impl ApplicationRepository {
    /// Create a new application repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an application by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<application::Model>> {
        Application::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an application by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<application::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))
    }

    /// Check whether a user already has a pending application for a pet.
    pub async fn has_pending(&self, user_id: &str, pet_id: &str) -> AppResult<bool> {
        let existing = Application::find()
            .filter(application::Column::UserId.eq(user_id))
            .filter(application::Column::PetId.eq(pet_id))
            .filter(application::Column::Status.eq(ApplicationStatus::Pending))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(existing.is_some())
    }

    /// Create a new application.
    pub async fn create(&self, model: application::ActiveModel) -> AppResult<application::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an application.
    pub async fn update(&self, model: application::ActiveModel) -> AppResult<application::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete an application by ID.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Application::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List applications joined with applicant and pet details, newest
    /// submission first. `user_id` scopes to one applicant; `status`
    /// narrows further.
    pub async fn find_details(
        &self,
        user_id: Option<&str>,
        status: Option<ApplicationStatus>,
    ) -> AppResult<Vec<ApplicationDetails>> {
        let mut query = Self::details_query();

        if let Some(user_id) = user_id {
            query = query.filter(application::Column::UserId.eq(user_id));
        }
        if let Some(status) = status {
            query = query.filter(application::Column::Status.eq(status));
        }

        query
            .order_by_desc(application::Column::SubmittedAt)
            .into_model::<ApplicationDetails>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fetch a single application with applicant and pet details.
    pub async fn find_details_by_id(&self, id: &str) -> AppResult<Option<ApplicationDetails>> {
        Self::details_query()
            .filter(application::Column::Id.eq(id))
            .into_model::<ApplicationDetails>()
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count applications per status.
    pub async fn count_by_status(&self) -> AppResult<StatusCounts> {
        let pending = self.count_with_status(ApplicationStatus::Pending).await?;
        let approved = self.count_with_status(ApplicationStatus::Approved).await?;
        let rejected = self.count_with_status(ApplicationStatus::Rejected).await?;

        Ok(StatusCounts {
            pending,
            approved,
            rejected,
            total: pending + approved + rejected,
        })
    }

    async fn count_with_status(&self, status: ApplicationStatus) -> AppResult<u64> {
        Application::find()
            .filter(application::Column::Status.eq(status))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    fn details_query() -> sea_orm::Select<Application> {
        Application::find()
            .select_only()
            .columns([
                application::Column::Id,
                application::Column::UserId,
                application::Column::PetId,
                application::Column::Message,
                application::Column::ContactPhone,
                application::Column::LivingSituation,
                application::Column::HasOtherPets,
                application::Column::OtherPetsDetails,
                application::Column::Status,
                application::Column::AdminNotes,
                application::Column::SubmittedAt,
                application::Column::ReviewedAt,
            ])
            .column_as(user::Column::Email, "user_email")
            .column_as(user::Column::DisplayName, "user_name")
            .column_as(pet::Column::Name, "pet_name")
            .column_as(pet::Column::Species, "pet_species")
            .column_as(pet::Column::Age, "pet_age")
            .column_as(pet::Column::PhotoUrl, "pet_photo_url")
            .join(JoinType::InnerJoin, application::Relation::User.def())
            .join(JoinType::InnerJoin, application::Relation::Pet.def())
    }
}
