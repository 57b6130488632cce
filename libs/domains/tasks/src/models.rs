use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const TITLE_MAX_LEN: usize = 255;
pub const DESCRIPTION_MAX_LEN: usize = 10_000;

pub const DEFAULT_PER_PAGE: u64 = 10;
pub const MAX_PER_PAGE: u64 = 100;

/// A to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Time-ordered UUIDv7 assigned at creation
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Merge the fields present in `changes` and bump `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the clock does.
    pub fn apply_update(&mut self, changes: UpdateTask, now: DateTime<Utc>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(completed) = changes.completed {
            self.completed = completed;
        }
        self.updated_at = now.max(self.updated_at);
    }
}

/// Body of `POST /tasks`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(custom(function = "validate_title"))]
    #[schema(min_length = 1, max_length = 255, example = "Write the release notes")]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 10000, message = "description must be at most 10000 characters"))]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl CreateTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            completed: false,
        }
    }

    /// Trim the title so stored titles never carry edge whitespace
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self
    }
}

/// Body of `PUT`/`PATCH /tasks/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct UpdateTask {
    #[validate(custom(function = "validate_title"))]
    #[schema(min_length = 1, max_length = 255)]
    pub title: Option<String>,
    #[validate(length(max = 10000, message = "description must be at most 10000 characters"))]
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTask {
    pub fn normalized(mut self) -> Self {
        self.title = self.title.map(|t| t.trim().to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.trim().chars().count();
    if (1..=TITLE_MAX_LEN).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::new("length").with_message(Cow::Borrowed(
            "title must be between 1 and 255 characters",
        )))
    }
}

/// Filter for [`crate::TaskRepository::count_where`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// `None` matches every task
    pub completed: Option<bool>,
}

impl TaskFilter {
    pub fn all() -> Self {
        Self { completed: None }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
        }
    }
}

/// Query string of `GET /tasks`.
///
/// Values that are not integers (`?page=abc`, `?page=`) fall back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number; values below 1 are treated as 1
    #[serde(default, deserialize_with = "lenient_int")]
    pub page: Option<i64>,
    /// Items per page, 1 to 100 (default 10)
    #[serde(default, deserialize_with = "lenient_int")]
    pub per_page: Option<i64>,
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

impl PageQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1) as u64
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
            .map_or(DEFAULT_PER_PAGE, |n| n.clamp(1, MAX_PER_PAGE as i64) as u64)
    }
}

/// One page of results plus the numbers a paginator needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    /// At least 1, even when there are no items
    pub last_page: u64,
    /// 1-based position of the first item on this page
    pub from: Option<u64>,
    /// 1-based position of the last item on this page
    pub to: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, current_page: u64, per_page: u64, total: u64) -> Self {
        let last_page = total.div_ceil(per_page.max(1)).max(1);
        let (from, to) = if data.is_empty() {
            (None, None)
        } else {
            let from = page_offset(current_page, per_page) + 1;
            (Some(from), Some(from + data.len() as u64 - 1))
        };

        Self {
            data,
            current_page,
            per_page,
            total,
            last_page,
            from,
            to,
        }
    }
}

/// Zero-based offset of the first item on the 1-based `page`
pub fn page_offset(page: u64, per_page: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(per_page)
}

/// Aggregate counts; `completed_tasks + pending_tasks == total_tasks`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub pending_tasks: u64,
}

impl TaskStats {
    pub fn from_counts(total: u64, completed: u64) -> Self {
        Self {
            total_tasks: total,
            completed_tasks: completed,
            pending_tasks: total.saturating_sub(completed),
        }
    }
}
