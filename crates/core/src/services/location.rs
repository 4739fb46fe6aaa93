//! Shelter location service.

use petgallery_common::{AppResult, IdGenerator};
use petgallery_db::{entities::location, repositories::LocationRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Input for creating a shelter location.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLocationInput {
    #[validate(length(min = 3, max = 120))]
    pub name: String,
    #[validate(length(min = 3, max = 200))]
    pub address: String,
    #[validate(length(max = 40), custom(function = validate_phone))]
    pub phone: Option<String>,
}

/// A phone number, when given, must carry at least ten digits.
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        return Ok(());
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if digits < 10 {
        return Err(ValidationError::new("phone_too_short"));
    }
    Ok(())
}

/// Location service for shelter sites.
#[derive(Clone)]
pub struct LocationService {
    location_repo: LocationRepository,
    id_gen: IdGenerator,
}

impl LocationService {
    /// Create a new location service.
    #[must_use]
    pub const fn new(location_repo: LocationRepository) -> Self {
        Self {
            location_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List all locations, sorted case-insensitively by name.
    pub async fn list(&self) -> AppResult<Vec<location::Model>> {
        self.location_repo.find_all().await
    }

    /// Fetch a location by ID.
    pub async fn get(&self, id: &str) -> AppResult<location::Model> {
        self.location_repo.get_by_id(id).await
    }

    /// Create a location. A missing phone is stored as an empty string,
    /// never NULL.
    pub async fn create(&self, input: CreateLocationInput) -> AppResult<location::Model> {
        input.validate()?;

        let model = location::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            address: Set(input.address),
            phone: Set(input.phone.unwrap_or_default()),
        };

        self.location_repo.create(model).await
    }
}
