use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Page, Task, TaskFilter, TaskStats, UpdateTask, page_offset};

/// Persistence for tasks.
///
/// Every method returns owned [`Task`] snapshots; callers never hold a
/// reference into the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Store a new task, assigning its id and timestamps
    async fn insert(&self, input: CreateTask) -> TaskResult<Task>;

    async fn find_by_id(&self, id: Uuid) -> TaskResult<Option<Task>>;

    /// Merge the present fields of `changes`; [`TaskError::NotFound`] if absent
    async fn update(&self, id: Uuid, changes: UpdateTask) -> TaskResult<Task>;

    /// `false` when there was nothing to delete
    async fn delete(&self, id: Uuid) -> TaskResult<bool>;

    /// One page in creation order, `page` being 1-based
    async fn page(&self, page: u64, per_page: u64) -> TaskResult<Page<Task>>;

    async fn count_where(&self, filter: TaskFilter) -> TaskResult<u64>;

    /// Counts taken from a single consistent snapshot
    async fn stats(&self) -> TaskResult<TaskStats>;
}

#[derive(Default)]
struct Store {
    next_seq: u64,
    /// Insertion sequence -> task, which is also the listing order
    tasks: BTreeMap<u64, Task>,
    index: HashMap<Uuid, u64>,
}

impl Store {
    fn get_mut(&mut self, id: Uuid) -> Option<&mut Task> {
        let seq = self.index.get(&id)?;
        self.tasks.get_mut(seq)
    }
}

/// In-process store used when no database is configured, and in tests.
#[derive(Clone, Default)]
pub struct InMemoryTaskRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, input: CreateTask) -> TaskResult<Task> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            completed: input.completed,
            created_at: now,
            updated_at: now,
        };

        let mut store = self.store.write().await;
        let seq = store.next_seq;
        store.next_seq += 1;
        store.index.insert(task.id, seq);
        store.tasks.insert(seq, task.clone());

        tracing::info!(task_id = %task.id, "Created task");
        Ok(task)
    }

    async fn find_by_id(&self, id: Uuid) -> TaskResult<Option<Task>> {
        let store = self.store.read().await;
        Ok(store
            .index
            .get(&id)
            .and_then(|seq| store.tasks.get(seq))
            .cloned())
    }

    async fn update(&self, id: Uuid, changes: UpdateTask) -> TaskResult<Task> {
        let mut store = self.store.write().await;
        let task = store.get_mut(id).ok_or(TaskError::NotFound(id))?;

        task.apply_update(changes, Utc::now());

        tracing::info!(task_id = %id, "Updated task");
        Ok(task.clone())
    }

    async fn delete(&self, id: Uuid) -> TaskResult<bool> {
        let mut store = self.store.write().await;
        let Some(seq) = store.index.remove(&id) else {
            return Ok(false);
        };
        store.tasks.remove(&seq);

        tracing::info!(task_id = %id, "Deleted task");
        Ok(true)
    }

    async fn page(&self, page: u64, per_page: u64) -> TaskResult<Page<Task>> {
        let store = self.store.read().await;
        let total = store.tasks.len() as u64;

        let data = store
            .tasks
            .values()
            .skip(page_offset(page, per_page) as usize)
            .take(per_page as usize)
            .cloned()
            .collect();

        Ok(Page::new(data, page, per_page, total))
    }

    async fn count_where(&self, filter: TaskFilter) -> TaskResult<u64> {
        let store = self.store.read().await;
        let count = match filter.completed {
            None => store.tasks.len(),
            Some(completed) => store
                .tasks
                .values()
                .filter(|t| t.completed == completed)
                .count(),
        };
        Ok(count as u64)
    }

    async fn stats(&self) -> TaskResult<TaskStats> {
        let store = self.store.read().await;
        let total = store.tasks.len() as u64;
        let completed = store.tasks.values().filter(|t| t.completed).count() as u64;
        Ok(TaskStats::from_counts(total, completed))
    }
}
