//! In-process adapters for the user and task ports.
//!
//! They enforce the same uniqueness and not-found rules as the Postgres
//! repositories, so the HTTP surface behaves identically on top of them.

use std::collections::HashMap;

use async_trait::async_trait;
use cache::ResourceStore;
use tokio::sync::RwLock;

use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::task::errors::TaskError;
use crate::user::errors::UserError;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_unique(users: &HashMap<UserId, User>, candidate: &User) -> Result<(), UserError> {
    for existing in users.values().filter(|u| u.id != candidate.id) {
        if existing.username == candidate.username {
            return Err(UserError::UsernameAlreadyExists(
                candidate.username.as_str().to_string(),
            ));
        }
        if existing.email == candidate.email {
            return Err(UserError::EmailAlreadyExists(
                candidate.email.as_str().to_string(),
            ));
        }
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        check_unique(&users, &user)?;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.username == username)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        check_unique(&users, &user)?;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<HashMap<TaskId, Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceStore for InMemoryTaskRepository {
    type Id = TaskId;
    type Resource = Task;
    type Draft = CreateTaskCommand;
    type Error = TaskError;

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskError> {
        Ok(self.tasks.read().await.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Task>, TaskError> {
        let mut tasks: Vec<Task> = self.tasks.read().await.values().cloned().collect();
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(tasks)
    }

    async fn create(&self, draft: CreateTaskCommand) -> Result<Task, TaskError> {
        let task = Task::from_command(draft);
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn save(&self, task: Task) -> Result<Task, TaskError> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&task.id) {
            Some(existing) => {
                *existing = task.clone();
                Ok(task)
            }
            None => Err(TaskError::NotFound(task.id.to_string())),
        }
    }

    async fn delete(&self, id: &TaskId) -> Result<u64, TaskError> {
        Ok(self.tasks.write().await.remove(id).map_or(0, |_| 1))
    }
}
