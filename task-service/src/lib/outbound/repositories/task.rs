use async_trait::async_trait;
use cache::ResourceStore;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskTitle;
use crate::task::errors::TaskError;

#[derive(FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = TaskError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Task {
            id: TaskId(row.id),
            title: TaskTitle::new(row.title)?,
            description: row.description,
            completed: row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> TaskError {
    TaskError::DatabaseError(e.to_string())
}

#[async_trait]
impl ResourceStore for PostgresTaskRepository {
    type Id = TaskId;
    type Resource = Task;
    type Draft = CreateTaskCommand;
    type Error = TaskError;

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskError> {
        sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, title, description, completed, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(Task::try_from)
        .transpose()
    }

    async fn find_all(&self) -> Result<Vec<Task>, TaskError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, title, description, completed, created_at, updated_at
            FROM tasks
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn create(&self, draft: CreateTaskCommand) -> Result<Task, TaskError> {
        let task = Task::from_command(draft);

        // Timestamps come back at the column's precision
        sqlx::query_as::<_, TaskRow>(
            r#"
            INSERT INTO tasks (id, title, description, completed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(task.id.0)
        .bind(task.title.as_str())
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)
        .and_then(Task::try_from)
    }

    async fn save(&self, task: Task) -> Result<Task, TaskError> {
        sqlx::query_as::<_, TaskRow>(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, completed = $4, updated_at = $5
            WHERE id = $1
            RETURNING id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(task.id.0)
        .bind(task.title.as_str())
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(Task::try_from)
        .transpose()?
        .ok_or_else(|| TaskError::NotFound(task.id.to_string()))
    }

    async fn delete(&self, id: &TaskId) -> Result<u64, TaskError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected())
    }
}
