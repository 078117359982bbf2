//! Profile entity (one row per account).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Same as the identity provider's subject id
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Display name
    #[sea_orm(nullable)]
    pub full_name: Option<String>,

    #[sea_orm(nullable)]
    pub username: Option<String>,

    #[sea_orm(nullable)]
    pub avatar_url: Option<String>,

    /// Email address
    #[sea_orm(nullable)]
    pub email: Option<String>,

    /// Is email verified?
    #[sea_orm(default_value = false)]
    pub email_verified: bool,

    /// Outstanding verification token. Non-null implies `email_verification_sent_at` is set.
    #[sea_orm(nullable, indexed)]
    pub email_verification_token: Option<String>,

    #[sea_orm(nullable)]
    pub email_verification_sent_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,

    #[sea_orm(has_many = "super::business::Entity")]
    Business,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::business::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Business.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
