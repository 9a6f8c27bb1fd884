use crate::core::models::{ContextElement, ElementContent};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Context element database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "context_elements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Owning user
    #[sea_orm(indexed)]
    pub user_id: i64,

    pub subject: String,

    #[sea_orm(column_type = "Text")]
    pub task_goal: String,

    #[sea_orm(column_type = "Text")]
    pub ai_role: String,

    #[sea_orm(column_type = "Text")]
    pub my_role: String,

    #[sea_orm(column_type = "Text")]
    pub key_info: String,

    #[sea_orm(column_type = "Text")]
    pub behavior_rule: String,

    #[sea_orm(column_type = "Text")]
    pub delivery_format: String,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,

    /// Set when soft deleted
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

/// Context element entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to the domain element
    pub fn to_domain_element(&self) -> ContextElement {
        ContextElement {
            id: self.id as u64,
            user_id: self.user_id as u64,
            content: ElementContent {
                subject: self.subject.clone(),
                task_goal: self.task_goal.clone(),
                ai_role: self.ai_role.clone(),
                my_role: self.my_role.clone(),
                key_info: self.key_info.clone(),
                behavior_rule: self.behavior_rule.clone(),
                delivery_format: self.delivery_format.clone(),
            },
            created_at: self.created_at.naive_utc().and_utc(),
            updated_at: self.updated_at.naive_utc().and_utc(),
        }
    }
}
