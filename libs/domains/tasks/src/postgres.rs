use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, IsolationLevel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{CreateTask, Page, Task, TaskFilter, TaskStats, UpdateTask, page_offset},
    repository::TaskRepository,
};

/// [`TaskRepository`] backed by the `tasks` table.
#[derive(Clone)]
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

async fn count_matching<C: ConnectionTrait>(conn: &C, filter: TaskFilter) -> Result<u64, DbErr> {
    let mut query = entity::Entity::find();
    if let Some(completed) = filter.completed {
        query = query.filter(entity::Column::Completed.eq(completed));
    }
    query.count(conn).await
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn insert(&self, input: CreateTask) -> TaskResult<Task> {
        let model = entity::ActiveModel::for_insert(input, Utc::now())
            .insert(&self.db)
            .await?;

        tracing::info!(task_id = %model.id, "Created task");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn update(&self, id: Uuid, changes: UpdateTask) -> TaskResult<Task> {
        // UPDATE ... RETURNING yields no row when the id is unknown.
        let model = entity::ActiveModel::for_update(id, changes, Utc::now())
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => TaskError::NotFound(id),
                other => other.into(),
            })?;

        tracing::info!(task_id = %id, "Updated task");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> TaskResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(task_id = %id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn page(&self, page: u64, per_page: u64) -> TaskResult<Page<Task>> {
        let total = count_matching(&self.db, TaskFilter::all()).await?;
        let offset = page_offset(page, per_page);

        let data = if offset >= total {
            Vec::new()
        } else {
            entity::Entity::find()
                .order_by_asc(entity::Column::CreatedAt)
                .order_by_asc(entity::Column::Id)
                .offset(offset)
                .limit(per_page)
                .all(&self.db)
                .await?
                .into_iter()
                .map(Into::into)
                .collect()
        };

        Ok(Page::new(data, page, per_page, total))
    }

    async fn count_where(&self, filter: TaskFilter) -> TaskResult<u64> {
        Ok(count_matching(&self.db, filter).await?)
    }

    async fn stats(&self) -> TaskResult<TaskStats> {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::RepeatableRead),
                Some(AccessMode::ReadOnly),
            )
            .await?;

        let total = count_matching(&txn, TaskFilter::all()).await?;
        let completed = count_matching(&txn, TaskFilter::completed(true)).await?;
        txn.commit().await?;

        Ok(TaskStats::from_counts(total, completed))
    }
}
