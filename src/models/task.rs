use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating a task.
///
/// Carries no owner or id field: the owner is always taken from the
/// authenticated caller and the id is generated server-side.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 200 characters; empty titles are rejected.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description for the task.
    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// Full-replacement payload for `PUT /tasks`: every mutable field at once.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskReplace {
    /// Identifier of the task to replace.
    pub id: Uuid,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Two-state completion machine: `false` = pending, `true` = completed.
    pub completion_status: bool,
}

/// Query parameters for `PATCH /tasks/{id}`.
#[derive(Debug, Deserialize)]
pub struct CompletionQuery {
    /// Desired completion state; marking complete is the common case, so the
    /// parameter defaults to `true` when omitted. Both transitions are always
    /// legal.
    #[serde(default = "default_completion_status")]
    pub completion_status: bool,
}

fn default_completion_status() -> bool {
    true
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4), assigned at creation.
    pub id: Uuid,
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    pub description: Option<String>,
    /// Completion state; new tasks start pending (`false`).
    pub completion_status: bool,
    /// Email of the user who owns the task; set at creation, immutable thereafter.
    pub owner_email: String,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` from `TaskInput` and the authenticated owner.
    /// Assigns a fresh UUID, starts pending, and stamps both timestamps.
    pub fn new(input: TaskInput, owner_email: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            completion_status: false,
            owner_email: owner_email.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_task_creation() {
        let input = TaskInput {
            title: "Test Task".to_string(),
            description: Some("Test Description".to_string()),
        };

        let task = Task::new(input, "alice@example.com");
        assert_eq!(task.title, "Test Task");
        assert_eq!(task.owner_email, "alice@example.com");
        assert!(!task.completion_status, "new tasks start pending");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let first = Task::new(
            TaskInput {
                title: "Same title".to_string(),
                description: None,
            },
            "alice@example.com",
        );
        let second = Task::new(
            TaskInput {
                title: "Same title".to_string(),
                description: None,
            },
            "alice@example.com",
        );
        // Identity is decoupled from content: identical titles, distinct ids.
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_task_input_validation() {
        let valid_input = TaskInput {
            title: "Valid Task".to_string(),
            description: Some("Valid Description".to_string()),
        };
        assert!(valid_input.validate().is_ok());

        let empty_title = TaskInput {
            title: "".to_string(),
            description: Some("Valid Description".to_string()),
        };
        assert!(
            empty_title.validate().is_err(),
            "empty titles must be rejected"
        );

        let long_title = TaskInput {
            title: "a".repeat(201),
            description: None,
        };
        assert!(long_title.validate().is_err());

        let long_description = TaskInput {
            title: "Valid title".to_string(),
            description: Some("b".repeat(1001)),
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_task_replace_validation() {
        let valid = TaskReplace {
            id: Uuid::new_v4(),
            title: "Replacement title".to_string(),
            description: None,
            completion_status: true,
        };
        assert!(valid.validate().is_ok());

        let empty_title = TaskReplace {
            id: Uuid::new_v4(),
            title: "".to_string(),
            description: None,
            completion_status: false,
        };
        assert!(empty_title.validate().is_err());
    }

    #[test]
    fn test_completion_query_defaults_to_true() {
        let query: CompletionQuery = serde_json::from_str("{}").unwrap();
        assert!(query.completion_status);

        let query: CompletionQuery =
            serde_json::from_str(r#"{"completion_status": false}"#).unwrap();
        assert!(!query.completion_status);
    }
}
