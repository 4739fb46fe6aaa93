//! Adoption application entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Adoption application lifecycle status.
///
/// `Pending` is the only non-terminal state: an application moves to
/// `Approved` or `Rejected` exactly once and never leaves either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl ApplicationStatus {
    /// Whether this status accepts no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "application")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Applicant.
    #[sea_orm(indexed)]
    pub user_id: String,

    /// Pet being applied for.
    #[sea_orm(indexed)]
    pub pet_id: String,

    /// Why the applicant wants to adopt, 50-2000 chars.
    #[sea_orm(column_type = "Text")]
    pub message: String,

    /// Applicant's contact phone, 10-40 chars.
    pub contact_phone: String,

    /// Type of home (house, apartment, ...).
    pub living_situation: String,

    #[sea_orm(default_value = false)]
    pub has_other_pets: bool,

    #[sea_orm(column_type = "Text", nullable)]
    pub other_pets_details: Option<String>,

    pub status: ApplicationStatus,

    /// Reviewer's notes, admin-visible only.
    #[sea_orm(column_type = "Text", nullable)]
    pub admin_notes: Option<String>,

    /// When the application was submitted.
    pub submitted_at: DateTimeWithTimeZone,

    /// When an admin reviewed it; NULL until then.
    #[sea_orm(nullable)]
    pub reviewed_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::pet::Entity",
        from = "Column::PetId",
        to = "super::pet::Column::Id"
    )]
    Pet,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::pet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
