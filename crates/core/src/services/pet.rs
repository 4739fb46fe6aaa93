//! Pet listing service.
//!
//! New submissions start `pending` until an admin approves them. The
//! listing itself is filter-driven; callers choose which statuses they
//! want to see.

use petgallery_common::{AppResult, IdGenerator};
use petgallery_db::{
    entities::{
        pet::{self, PetStatus},
        user,
    },
    repositories::{LocationRepository, PetFilter, PetRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::policy;

/// Input for creating a pet.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePetInput {
    #[validate(length(min = 2, max = 120))]
    pub name: String,
    #[validate(length(min = 2, max = 80))]
    pub species: String,
    #[validate(range(min = 0, max = 50))]
    pub age: i32,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub location_id: String,
}

/// Input for updating a pet. All fields optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePetInput {
    #[validate(length(min = 2, max = 120))]
    pub name: Option<String>,
    #[validate(length(min = 2, max = 80))]
    pub species: Option<String>,
    #[validate(range(min = 0, max = 50))]
    pub age: Option<i32>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub location_id: Option<String>,
    pub status: Option<PetStatus>,
}

/// Query filters accepted by the public listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPetsQuery {
    pub species: Option<String>,
    pub location_id: Option<String>,
    pub status: Option<PetStatus>,
}

/// Pet service for the adoption catalogue.
#[derive(Clone)]
pub struct PetService {
    pet_repo: PetRepository,
    location_repo: LocationRepository,
    id_gen: IdGenerator,
}

impl PetService {
    /// Create a new pet service.
    #[must_use]
    pub const fn new(pet_repo: PetRepository, location_repo: LocationRepository) -> Self {
        Self {
            pet_repo,
            location_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List pets matching the query filters.
    pub async fn list(&self, query: &ListPetsQuery) -> AppResult<Vec<pet::Model>> {
        let filter = PetFilter {
            status: query.status,
            species: query.species.clone(),
            location_id: query.location_id.clone(),
        };
        self.pet_repo.find_filtered(&filter).await
    }

    /// Fetch a pet by ID.
    pub async fn get(&self, id: &str) -> AppResult<pet::Model> {
        self.pet_repo.get_by_id(id).await
    }

    /// Create a pet. Every submission awaits approval.
    pub async fn create(&self, input: CreatePetInput) -> AppResult<pet::Model> {
        input.validate()?;

        self.location_repo.get_by_id(&input.location_id).await?;

        let model = pet::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            species: Set(input.species),
            age: Set(input.age),
            description: Set(input.description),
            photo_url: Set(None),
            location_id: Set(input.location_id),
            status: Set(PetStatus::Pending),
        };

        let pet = self.pet_repo.create(model).await?;
        tracing::info!(pet_id = %pet.id, status = ?pet.status, "pet created");
        Ok(pet)
    }

    /// Update a pet. Admin only.
    pub async fn update(
        &self,
        actor: &user::Model,
        id: &str,
        input: UpdatePetInput,
    ) -> AppResult<pet::Model> {
        policy::ensure_admin(actor)?;
        input.validate()?;

        let existing = self.pet_repo.get_by_id(id).await?;

        if let Some(location_id) = &input.location_id {
            self.location_repo.get_by_id(location_id).await?;
        }

        let mut model: pet::ActiveModel = existing.into();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(species) = input.species {
            model.species = Set(species);
        }
        if let Some(age) = input.age {
            model.age = Set(age);
        }
        if let Some(description) = input.description {
            model.description = Set(Some(description));
        }
        if let Some(location_id) = input.location_id {
            model.location_id = Set(location_id);
        }
        if let Some(status) = input.status {
            model.status = Set(status);
        }

        self.pet_repo.update(model).await
    }

    /// Set the public photo URL for a pet.
    pub async fn attach_photo(&self, id: &str, photo_url: &str) -> AppResult<pet::Model> {
        let existing = self.pet_repo.get_by_id(id).await?;
        let mut model: pet::ActiveModel = existing.into();
        model.photo_url = Set(Some(photo_url.to_string()));

        self.pet_repo.update(model).await
    }

    /// Delete a pet together with its applications and favorites. Admin only.
    pub async fn delete(&self, actor: &user::Model, id: &str) -> AppResult<()> {
        policy::ensure_admin(actor)?;
        self.pet_repo.get_by_id(id).await?;
        self.pet_repo.delete_cascading(id).await?;
        tracing::info!(pet_id = %id, "pet deleted");
        Ok(())
    }
}
