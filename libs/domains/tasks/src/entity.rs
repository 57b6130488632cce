use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{CreateTask, Task, UpdateTask};

/// Row of the `tasks` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub completed: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            completed: model.completed,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl ActiveModel {
    /// New row with a fresh UUIDv7 and both timestamps set to `now`
    pub fn for_insert(input: CreateTask, now: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            id: Set(Uuid::now_v7()),
            title: Set(input.title),
            description: Set(input.description),
            completed: Set(input.completed),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }

    /// Partial update of row `id`: only the fields present in `changes` are written
    pub fn for_update(id: Uuid, changes: UpdateTask, now: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            id: Unchanged(id),
            title: changes.title.map_or(NotSet, Set),
            description: changes.description.map_or(NotSet, Set),
            completed: changes.completed.map_or(NotSet, Set),
            created_at: NotSet,
            updated_at: Set(now.into()),
        }
    }
}
