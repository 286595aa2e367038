use std::fmt;

use cache::Patch;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::task::errors::TaskIdError;
use crate::task::errors::TaskTitleError;

/// Task resource.
///
/// Serialized to JSON when cached; the cached form must decode back to an
/// equal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: TaskTitle,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Build a new, not yet completed task from a create command.
    pub fn from_command(command: CreateTaskCommand) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            title: command.title,
            description: command.description,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Task unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a task ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TaskIdError> {
        Uuid::parse_str(s)
            .map(TaskId)
            .map_err(|e| TaskIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task title value type
///
/// Non-empty after trimming, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    const MAX_LENGTH: usize = 255;

    /// # Errors
    /// * `Empty` - Title is blank
    /// * `TooLong` - Title longer than 255 characters
    pub fn new(title: String) -> Result<Self, TaskTitleError> {
        let title = title.trim().to_string();
        let length = title.chars().count();
        if length == 0 {
            Err(TaskTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(TaskTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskTitleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(title: TaskTitle) -> Self {
        title.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new task with validated fields
#[derive(Debug, Clone)]
pub struct CreateTaskCommand {
    pub title: TaskTitle,
    pub description: Option<String>,
}

/// Partial task update. Only provided fields are changed.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskCommand {
    pub title: Option<TaskTitle>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl Patch<Task> for UpdateTaskCommand {
    fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        task.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(s: &str) -> TaskTitle {
        TaskTitle::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_title_validation() {
        assert_eq!(title("  Write report ").as_str(), "Write report");
        assert_eq!(TaskTitle::new("   ".to_string()), Err(TaskTitleError::Empty));
        assert_eq!(
            TaskTitle::new("x".repeat(256)),
            Err(TaskTitleError::TooLong {
                max: 255,
                actual: 256
            })
        );
        assert!(TaskTitle::new("x".repeat(255)).is_ok());
    }

    #[test]
    fn test_cached_form_decodes_to_equal_task() {
        let task = Task::from_command(CreateTaskCommand {
            title: title("Test Task"),
            description: Some("details".to_string()),
        });

        let json = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, task);
    }

    #[test]
    fn test_invalid_cached_title_is_rejected() {
        let json = format!(
            r#"{{"id":"{}","title":"","description":null,"completed":false,"created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z"}}"#,
            Uuid::new_v4()
        );
        assert!(serde_json::from_str::<Task>(&json).is_err());
    }

    #[test]
    fn test_patch_applies_only_provided_fields() {
        let mut task = Task::from_command(CreateTaskCommand {
            title: title("Old Task"),
            description: Some("keep me".to_string()),
        });
        let created_at = task.created_at;

        UpdateTaskCommand {
            title: Some(title("Updated Task")),
            description: None,
            completed: Some(true),
        }
        .apply(&mut task);

        assert_eq!(task.title.as_str(), "Updated Task");
        assert_eq!(task.description.as_deref(), Some("keep me"));
        assert!(task.completed);
        assert_eq!(task.created_at, created_at);
        assert!(task.updated_at >= created_at);
    }

    #[test]
    fn test_patch_can_clear_description() {
        let mut task = Task::from_command(CreateTaskCommand {
            title: title("Task"),
            description: Some("drop me".to_string()),
        });

        UpdateTaskCommand {
            description: Some(None),
            ..Default::default()
        }
        .apply(&mut task);

        assert_eq!(task.description, None);
        assert_eq!(task.title.as_str(), "Task");
    }
}
