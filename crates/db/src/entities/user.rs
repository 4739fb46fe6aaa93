//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Login email, unique and case-sensitive as stored.
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2 password hash, never the plain text.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Display name shown in the UI.
    pub display_name: String,

    /// Admins bypass ownership checks everywhere except favorites.
    #[sea_orm(default_value = false)]
    pub is_admin: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::application::Entity")]
    Applications,

    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorites,
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
