use anyhow::bail;
use tracing::{debug, info};

use crate::api::TaskApi;
use crate::model::{Task, TaskId, TaskWrite};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(TaskId),
}

/// Form state of the task editor, bound to one task or to none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    mode: EditorMode,
    pub title: String,
    pub description: String,
    completed: bool,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            mode: EditorMode::Create,
            title: String::new(),
            description: String::new(),
            completed: false,
        }
    }
}

impl TaskDraft {
    pub fn for_task(task: Option<&Task>) -> Self {
        match task {
            Some(task) => Self {
                mode: EditorMode::Edit(task.id.clone()),
                title: task.title.clone(),
                description: task.description.clone(),
                completed: task.completed,
            },
            None => Self::default(),
        }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditorMode::Edit(_))
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Completion can only be changed on an existing task.
    pub fn can_toggle_completed(&self) -> bool {
        self.is_editing()
    }

    pub fn set_completed(&mut self, completed: bool) {
        if !self.can_toggle_completed() {
            debug!("ignoring completion change on a new task");
            return;
        }
        self.completed = completed;
    }

    /// Required-field gate: title and description must be non-empty.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.title.is_empty() {
            bail!("title is required");
        }
        if self.description.is_empty() {
            bail!("description is required");
        }
        Ok(())
    }

    pub fn payload(&self) -> TaskWrite {
        TaskWrite {
            title: self.title.clone(),
            description: self.description.clone(),
            completed: self.is_editing() && self.completed,
        }
    }

    /// Sends the create or update request. A draft that fails the
    /// required-field gate sends nothing.
    #[tracing::instrument(skip(self, api), fields(mode = ?self.mode))]
    pub async fn submit<A: TaskApi>(&self, api: &A) -> anyhow::Result<()> {
        self.validate()?;
        let payload = self.payload();

        match &self.mode {
            EditorMode::Create => {
                api.create_task(&payload).await?;
                info!(title = %payload.title, "created task");
            }
            EditorMode::Edit(id) => {
                api.update_task(id, &payload).await?;
                info!(task = %id, completed = payload.completed, "updated task");
            }
        }

        Ok(())
    }
}
