//! User account service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use petgallery_common::{AppError, AppResult, IdGenerator};
use petgallery_db::{entities::user, repositories::UserRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::policy;

/// Input for self-service registration.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 120))]
    pub display_name: String,
}

/// Input for admin user creation; unlike registration it can grant the
/// admin flag.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserInput {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 120))]
    pub display_name: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Input for updating a user. All fields optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserInput {
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub display_name: Option<String>,
    pub is_admin: Option<bool>,
}

/// User service for account management and credential checks.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new non-admin account.
    pub async fn register(&self, input: RegisterInput) -> AppResult<user::Model> {
        input.validate()?;

        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(&input.password)?;
        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            email: Set(input.email),
            password_hash: Set(password_hash),
            display_name: Set(input.display_name),
            is_admin: Set(false),
            created_at: Set(chrono::Utc::now().into()),
        };

        let user = self.user_repo.create(model).await?;
        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Verify credentials, returning the user on success.
    ///
    /// Unknown email and wrong password produce the same error so the
    /// response does not reveal which accounts exist.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized("Invalid email or password".to_string()));
        }

        Ok(user)
    }

    /// Fetch a user by ID, erroring if absent.
    pub async fn get(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }

    /// List all users. Admin only.
    pub async fn list(&self, actor: &user::Model) -> AppResult<Vec<user::Model>> {
        policy::ensure_admin(actor)?;
        self.user_repo.find_all().await
    }

    /// Create a user on behalf of an admin.
    pub async fn create(&self, actor: &user::Model, input: CreateUserInput) -> AppResult<user::Model> {
        policy::ensure_admin(actor)?;
        input.validate()?;

        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(&input.password)?;
        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            email: Set(input.email),
            password_hash: Set(password_hash),
            display_name: Set(input.display_name),
            is_admin: Set(input.is_admin),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.user_repo.create(model).await
    }

    /// Update a user. Owners may edit their own profile; only admins may
    /// edit other users or change the admin flag.
    pub async fn update(
        &self,
        actor: &user::Model,
        id: &str,
        input: UpdateUserInput,
    ) -> AppResult<user::Model> {
        policy::ensure_owner_or_admin(actor, id)?;
        input.validate()?;

        if input.is_admin.is_some() && !actor.is_admin {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        let existing = self.user_repo.get_by_id(id).await?;

        if let Some(email) = &input.email {
            if self.user_repo.email_taken_by_other(email, id).await? {
                return Err(AppError::Conflict("Email already registered".to_string()));
            }
        }

        let mut model: user::ActiveModel = existing.into();
        if let Some(email) = input.email {
            model.email = Set(email);
        }
        if let Some(password) = input.password {
            model.password_hash = Set(hash_password(&password)?);
        }
        if let Some(display_name) = input.display_name {
            model.display_name = Set(display_name);
        }
        if let Some(is_admin) = input.is_admin {
            model.is_admin = Set(is_admin);
        }

        self.user_repo.update(model).await
    }

    /// Delete a user and everything they own. Owner or admin.
    pub async fn delete(&self, actor: &user::Model, id: &str) -> AppResult<()> {
        policy::ensure_owner_or_admin(actor, id)?;
        self.user_repo.get_by_id(id).await?;
        self.user_repo.delete_cascading(id).await?;
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Look up a user by verified federated email, creating the account on
    /// first login. Federated accounts get an unguessable local password.
    pub async fn find_or_create_federated(
        &self,
        email: &str,
        display_name: &str,
    ) -> AppResult<user::Model> {
        if let Some(user) = self.user_repo.find_by_email(email).await? {
            return Ok(user);
        }

        let password_hash = hash_password(&self.id_gen.generate_secret())?;
        let name = if display_name.is_empty() {
            email.to_string()
        } else {
            display_name.to_string()
        };
        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            display_name: Set(name),
            is_admin: Set(false),
            created_at: Set(chrono::Utc::now().into()),
        };

        let user = self.user_repo.create(model).await?;
        tracing::info!(user_id = %user.id, "federated user created");
        Ok(user)
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
