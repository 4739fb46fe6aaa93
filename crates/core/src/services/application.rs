//! Adoption application workflow.
//!
//! Applications start `pending` and are reviewed exactly once: an admin
//! moves them to `approved` or `rejected`, both terminal. A user may hold
//! at most one pending application per pet, but a fresh application may
//! follow a reviewed one.

use petgallery_common::{AppError, AppResult, IdGenerator};
use petgallery_db::{
    entities::{
        application::{self, ApplicationStatus},
        user,
    },
    repositories::{ApplicationDetails, ApplicationRepository, PetRepository, StatusCounts},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::policy;

/// Input for submitting an application.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateApplicationInput {
    pub pet_id: String,
    #[validate(length(min = 50, max = 2000))]
    pub message: String,
    #[validate(length(min = 10, max = 40))]
    pub contact_phone: String,
    #[validate(length(min = 3, max = 50))]
    pub living_situation: String,
    #[serde(default)]
    pub has_other_pets: bool,
    #[validate(length(max = 1000))]
    pub other_pets_details: Option<String>,
}

/// Input for the admin review of an application. Either field may be
/// given alone; notes without a status never touch the workflow state.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewApplicationInput {
    pub status: Option<ApplicationStatus>,
    pub admin_notes: Option<String>,
}

/// Filters for listing applications.
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    /// Admin-only scoping to one applicant.
    pub user_id: Option<String>,
    pub status: Option<ApplicationStatus>,
}

/// Application service for the adoption workflow.
#[derive(Clone)]
pub struct ApplicationService {
    application_repo: ApplicationRepository,
    pet_repo: PetRepository,
    id_gen: IdGenerator,
}

impl ApplicationService {
    /// Create a new application service.
    #[must_use]
    pub const fn new(application_repo: ApplicationRepository, pet_repo: PetRepository) -> Self {
        Self {
            application_repo,
            pet_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Submit an application for a pet.
    ///
    /// The duplicate-pending check reads then writes without a lock; two
    /// simultaneous submissions can both pass it. The review step tolerates
    /// the stray duplicate, so the race is accepted rather than serialized.
    pub async fn create(
        &self,
        actor: &user::Model,
        input: CreateApplicationInput,
    ) -> AppResult<application::Model> {
        input.validate()?;

        self.pet_repo.get_by_id(&input.pet_id).await?;

        if self
            .application_repo
            .has_pending(&actor.id, &input.pet_id)
            .await?
        {
            return Err(AppError::Conflict(
                "You already have a pending application for this pet".to_string(),
            ));
        }

        let model = application::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(actor.id.clone()),
            pet_id: Set(input.pet_id),
            message: Set(input.message),
            contact_phone: Set(input.contact_phone),
            living_situation: Set(input.living_situation),
            has_other_pets: Set(input.has_other_pets),
            other_pets_details: Set(input.other_pets_details),
            status: Set(ApplicationStatus::Pending),
            admin_notes: Set(None),
            submitted_at: Set(chrono::Utc::now().into()),
            reviewed_at: Set(None),
        };

        let app = self.application_repo.create(model).await?;
        tracing::info!(application_id = %app.id, pet_id = %app.pet_id, "application submitted");
        Ok(app)
    }

    /// List applications with applicant and pet details.
    ///
    /// Non-admins always see only their own applications; the `user_id`
    /// filter is honored for admins only.
    pub async fn list(
        &self,
        actor: &user::Model,
        filter: &ApplicationFilter,
    ) -> AppResult<Vec<ApplicationDetails>> {
        let scope = list_scope(actor, filter);
        self.application_repo.find_details(scope, filter.status).await
    }

    /// Fetch one application with details. Owner or admin only.
    pub async fn get(&self, actor: &user::Model, id: &str) -> AppResult<ApplicationDetails> {
        let details = self
            .application_repo
            .find_details_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

        policy::ensure_owner_or_admin(actor, &details.user_id)?;
        Ok(details)
    }

    /// Review an application. Admin only.
    ///
    /// A status change is only valid from `pending`; reviewed applications
    /// refuse further transitions. Notes may be edited at any time.
    pub async fn review(
        &self,
        actor: &user::Model,
        id: &str,
        input: ReviewApplicationInput,
    ) -> AppResult<application::Model> {
        policy::ensure_admin(actor)?;

        let existing = self.application_repo.get_by_id(id).await?;

        let mut model: application::ActiveModel = existing.clone().into();

        if let Some(status) = input.status {
            if status == ApplicationStatus::Pending {
                return Err(AppError::BadRequest(
                    "Applications cannot be moved back to pending".to_string(),
                ));
            }
            if existing.status.is_terminal() {
                return Err(AppError::Conflict(
                    "Application has already been reviewed".to_string(),
                ));
            }
            model.status = Set(status);
            model.reviewed_at = Set(Some(chrono::Utc::now().into()));
        }

        if let Some(notes) = input.admin_notes {
            model.admin_notes = Set(Some(notes));
        }

        let app = self.application_repo.update(model).await?;
        tracing::info!(application_id = %id, status = ?app.status, "application reviewed");
        Ok(app)
    }

    /// Withdraw or remove an application. Owner or admin only.
    pub async fn delete(&self, actor: &user::Model, id: &str) -> AppResult<()> {
        let existing = self.application_repo.get_by_id(id).await?;
        policy::ensure_owner_or_admin(actor, &existing.user_id)?;
        self.application_repo.delete(id).await
    }

    /// Per-status application counts. Admin only.
    pub async fn stats(&self, actor: &user::Model) -> AppResult<StatusCounts> {
        policy::ensure_admin(actor)?;
        self.application_repo.count_by_status().await
    }
}

/// The user scope a listing runs under. Admins may pick any user (or
/// none); everyone else is pinned to their own ID whatever the filter
/// says.
fn list_scope<'a>(actor: &'a user::Model, filter: &'a ApplicationFilter) -> Option<&'a str> {
    if actor.is_admin {
        filter.user_id.as_deref()
    } else {
        Some(actor.id.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use petgallery_db::entities::pet::{self, PetStatus};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn make_user(id: &str, is_admin: bool) -> user::Model {
        user::Model {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            password_hash: "$argon2id$fake".to_string(),
            display_name: "Test".to_string(),
            is_admin,
            created_at: Utc::now().into(),
        }
    }

    fn make_pet(id: &str) -> pet::Model {
        pet::Model {
            id: id.to_string(),
            name: "Max".to_string(),
            species: "dog".to_string(),
            age: 3,
            description: None,
            photo_url: None,
            location_id: "loc1".to_string(),
            status: PetStatus::Approved,
        }
    }

    fn make_application(id: &str, user_id: &str, status: ApplicationStatus) -> application::Model {
        application::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            pet_id: "pet1".to_string(),
            message: "I have a large fenced yard and lots of time for walks.".to_string(),
            contact_phone: "555-123-4567".to_string(),
            living_situation: "house".to_string(),
            has_other_pets: false,
            other_pets_details: None,
            status,
            admin_notes: None,
            submitted_at: Utc::now().into(),
            reviewed_at: None,
        }
    }

    fn service_with(db: MockDatabase) -> ApplicationService {
        let conn = Arc::new(db.into_connection());
        ApplicationService::new(
            ApplicationRepository::new(conn.clone()),
            PetRepository::new(conn),
        )
    }

    fn valid_input() -> CreateApplicationInput {
        CreateApplicationInput {
            pet_id: "pet1".to_string(),
            message: "I have a large fenced yard and lots of time for walks.".to_string(),
            contact_phone: "555-123-4567".to_string(),
            living_situation: "house".to_string(),
            has_other_pets: false,
            other_pets_details: None,
        }
    }

    #[tokio::test]
    async fn test_create_duplicate_pending_conflicts() {
        let pending = make_application("app1", "user1", ApplicationStatus::Pending);
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[make_pet("pet1")]])
                .append_query_results([[pending]]),
        );

        let actor = make_user("user1", false);
        let result = service.create(&actor, valid_input()).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_after_review_is_allowed() {
        // The prior application was reviewed, so the pending lookup is empty
        // and a fresh submission goes through.
        let created = make_application("app2", "user1", ApplicationStatus::Pending);
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[make_pet("pet1")]])
                .append_query_results([Vec::<application::Model>::new()])
                .append_query_results([[created]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }]),
        );

        let actor = make_user("user1", false);
        let app = service.create(&actor, valid_input()).await.unwrap();

        assert_eq!(app.status, ApplicationStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_unknown_pet_not_found() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<pet::Model>::new()]),
        );

        let actor = make_user("user1", false);
        let result = service.create(&actor, valid_input()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_short_message() {
        let service = service_with(MockDatabase::new(DatabaseBackend::Postgres));
        let actor = make_user("user1", false);

        let mut input = valid_input();
        input.message = "too short".to_string();
        let result = service.create(&actor, input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_review_terminal_application_conflicts() {
        let approved = make_application("app1", "user1", ApplicationStatus::Approved);
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[approved]]),
        );

        let admin = make_user("admin", true);
        let result = service
            .review(
                &admin,
                "app1",
                ReviewApplicationInput {
                    status: Some(ApplicationStatus::Rejected),
                    admin_notes: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_review_requires_admin() {
        let service = service_with(MockDatabase::new(DatabaseBackend::Postgres));
        let actor = make_user("user1", false);

        let result = service
            .review(&actor, "app1", ReviewApplicationInput::default())
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_review_rejects_pending_target() {
        let pending = make_application("app1", "user1", ApplicationStatus::Pending);
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[pending]]),
        );

        let admin = make_user("admin", true);
        let result = service
            .review(
                &admin,
                "app1",
                ReviewApplicationInput {
                    status: Some(ApplicationStatus::Pending),
                    admin_notes: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_notes_only_update_on_reviewed_application() {
        let approved = make_application("app1", "user1", ApplicationStatus::Approved);
        let mut updated = approved.clone();
        updated.admin_notes = Some("great home".to_string());

        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[approved]])
                .append_query_results([[updated]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }]),
        );

        let admin = make_user("admin", true);
        let app = service
            .review(
                &admin,
                "app1",
                ReviewApplicationInput {
                    status: None,
                    admin_notes: Some("great home".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(app.admin_notes.as_deref(), Some("great home"));
        assert_eq!(app.status, ApplicationStatus::Approved);
    }

    #[tokio::test]
    async fn test_delete_by_stranger_is_forbidden() {
        let app = make_application("app1", "user1", ApplicationStatus::Pending);
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[app]]),
        );

        let stranger = make_user("user2", false);
        let result = service.delete(&stranger, "app1").await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_stats_requires_admin() {
        let service = service_with(MockDatabase::new(DatabaseBackend::Postgres));
        let actor = make_user("user1", false);

        let result = service.stats(&actor).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_list_scope_pins_non_admins_to_their_own_id() {
        let actor = make_user("user1", false);
        let filter = ApplicationFilter {
            user_id: Some("user2".to_string()),
            status: None,
        };

        assert_eq!(list_scope(&actor, &filter), Some("user1"));
    }

    #[test]
    fn test_list_scope_honors_admin_filter() {
        let admin = make_user("admin", true);
        let filter = ApplicationFilter {
            user_id: Some("user2".to_string()),
            status: None,
        };

        assert_eq!(list_scope(&admin, &filter), Some("user2"));
        assert_eq!(
            list_scope(&admin, &ApplicationFilter::default()),
            None
        );
    }

    fn details_row(user_id: &str) -> std::collections::BTreeMap<&'static str, sea_orm::Value> {
        use sea_orm::Value;

        let now: chrono::DateTime<chrono::FixedOffset> = Utc::now().into();
        maplit::btreemap! {
            "id" => Value::from("app1"),
            "user_id" => Value::from(user_id.to_string()),
            "pet_id" => Value::from("pet1"),
            "message" => Value::from("I have a large fenced yard and lots of time for walks."),
            "contact_phone" => Value::from("555-123-4567"),
            "living_situation" => Value::from("house"),
            "has_other_pets" => Value::from(false),
            "other_pets_details" => Value::String(None),
            "status" => Value::from("pending"),
            "admin_notes" => Value::String(None),
            "submitted_at" => Value::from(now),
            "reviewed_at" => Value::ChronoDateTimeWithTimeZone(None),
            "user_email" => Value::from("a@example.com"),
            "user_name" => Value::from("User A"),
            "pet_name" => Value::from("Max"),
            "pet_species" => Value::from("dog"),
            "pet_age" => Value::from(3),
            "pet_photo_url" => Value::String(None),
        }
    }

    #[tokio::test]
    async fn test_get_by_stranger_is_forbidden() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[details_row("user1")]]),
        );

        let stranger = make_user("user2", false);
        let result = service.get(&stranger, "app1").await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_get_by_admin_succeeds() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[details_row("user1")]]),
        );

        let admin = make_user("admin", true);
        let details = service.get(&admin, "app1").await.unwrap();

        assert_eq!(details.user_id, "user1");
    }
}
