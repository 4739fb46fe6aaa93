//! Adoptable pet entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Pet listing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    /// Newly listed, awaiting admin approval.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved and visible for adoption.
    #[sea_orm(string_value = "approved")]
    Approved,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pet")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    /// Type of animal (dog, cat, ...).
    pub species: String,

    /// Age in years, 0-50.
    pub age: i32,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// URL of the uploaded photo, if any.
    #[sea_orm(nullable)]
    pub photo_url: Option<String>,

    /// Owning shelter location.
    #[sea_orm(indexed)]
    pub location_id: String,

    pub status: PetStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id"
    )]
    Location,

    #[sea_orm(has_many = "super::application::Entity")]
    Applications,

    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorites,
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl Related<super::favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
