use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommentId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// A comment embedded in its parent task. The parent is implied by the
/// task that carries it and by the request path used to change it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Task {
    /// Label for the comment toggle of a task row.
    pub fn comment_summary(&self) -> String {
        match self.comments.len() {
            0 => "Add comment".to_string(),
            1 => "1 comment".to_string(),
            n => format!("{n} comments"),
        }
    }
}

/// Body of `POST /tasks` and `PUT /tasks/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskWrite {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Body of `PATCH /tasks/{id}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionPatch {
    pub completed: bool,
}

impl CompletionPatch {
    pub fn toggled(current: bool) -> Self {
        Self {
            completed: !current,
        }
    }
}

/// Body of both comment writes; edits replace the full content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentWrite {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_accepts_backend_shape_with_embedded_comments() {
        let raw = r#"{
            "id": "65f1c0ffee",
            "title": "Write report",
            "description": "quarterly numbers",
            "completed": true,
            "created_at": "2024-03-01T09:30:00.123456",
            "updated_at": "2024-03-02T10:00:00",
            "comments": [
                {"id": "c1", "content": "draft sent", "created_at": "2024-03-01T10:00:00"}
            ]
        }"#;

        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.id, TaskId::from("65f1c0ffee"));
        assert!(task.completed);
        assert_eq!(task.comments.len(), 1);
        assert_eq!(task.comments[0].id.as_str(), "c1");
        assert_eq!(task.comment_summary(), "1 comment");
    }

    #[test]
    fn camel_case_timestamp_and_missing_fields_default() {
        let raw = r#"{"id": "7", "title": "t", "description": "d",
                      "createdAt": "2024-01-01T00:00:00Z"}"#;
        let task: Task = serde_json::from_str(raw).unwrap();

        assert!(!task.completed);
        assert!(task.comments.is_empty());
        assert_eq!(task.created_at.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(task.comment_summary(), "Add comment");
    }

    #[test]
    fn write_bodies_match_the_rest_contract() {
        let body = serde_json::to_value(TaskWrite {
            title: "A".to_string(),
            description: "d".to_string(),
            completed: false,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"title": "A", "description": "d", "completed": false})
        );

        let patch = serde_json::to_value(CompletionPatch::toggled(false)).unwrap();
        assert_eq!(patch, serde_json::json!({"completed": true}));

        let id = serde_json::to_value(TaskId::from("5")).unwrap();
        assert_eq!(id, serde_json::json!("5"));
    }
}
