#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

use anyhow::anyhow;
use serde_json::Value;
use taskboard_core::api::TaskApi;
use taskboard_core::model::{
    Comment, CommentId, CommentWrite, CompletionPatch, Task, TaskId, TaskWrite,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// In-memory stand-in for the REST backend. Records every request and
/// fails the ones registered with [`FakeBackend::fail`].
#[derive(Debug, Default)]
pub struct FakeBackend {
    tasks: RefCell<Vec<Task>>,
    next_id: Cell<u64>,
    requests: RefCell<Vec<Recorded>>,
    failing: RefCell<BTreeSet<String>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(specs: &[(&str, &str, bool)]) -> Self {
        let backend = Self::new();
        for (title, description, completed) in specs {
            let id = backend.allocate_id();
            backend.tasks.borrow_mut().push(Task {
                id: TaskId::new(id),
                title: title.to_string(),
                description: description.to_string(),
                completed: *completed,
                created_at: Some("2024-03-01T09:30:00".to_string()),
                updated_at: None,
                comments: vec![],
            });
        }
        backend
    }

    /// Makes every request to `"{METHOD} {path}"` fail.
    pub fn fail(&self, route: &str) {
        self.failing.borrow_mut().insert(route.to_string());
    }

    pub fn heal(&self) {
        self.failing.borrow_mut().clear();
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.borrow().clone()
    }

    /// Requests as `"{METHOD} {path}"`, in order.
    pub fn routes(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|req| format!("{} {}", req.method, req.path))
            .collect()
    }

    pub fn writes(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|req| req.method != "GET")
            .collect()
    }

    pub fn clear_log(&self) {
        self.requests.borrow_mut().clear();
    }

    pub fn stored(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    pub fn stored_task(&self, id: &str) -> Option<Task> {
        self.tasks
            .borrow()
            .iter()
            .find(|task| task.id.as_str() == id)
            .cloned()
    }

    fn allocate_id(&self) -> String {
        let next = self.next_id.get() + 1;
        self.next_id.set(next);
        next.to_string()
    }

    fn record(
        &self,
        method: &'static str,
        path: String,
        body: Option<Value>,
    ) -> anyhow::Result<()> {
        let route = format!("{method} {path}");
        self.requests
            .borrow_mut()
            .push(Recorded { method, path, body });
        if self.failing.borrow().contains(&route) {
            return Err(anyhow!(
                "{route} was rejected: HTTP status server error (500 Internal Server Error)"
            ));
        }
        Ok(())
    }

    fn with_task<R>(&self, id: &TaskId, f: impl FnOnce(&mut Task) -> R) -> anyhow::Result<R> {
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks
            .iter_mut()
            .find(|task| &task.id == id)
            .ok_or_else(|| anyhow!("404 Task not found"))?;
        Ok(f(task))
    }
}

impl TaskApi for FakeBackend {
    async fn list_tasks(&self) -> anyhow::Result<Vec<Task>> {
        self.record("GET", "/tasks".to_string(), None)?;
        Ok(self.stored())
    }

    async fn create_task(&self, body: &TaskWrite) -> anyhow::Result<()> {
        self.record("POST", "/tasks".to_string(), Some(serde_json::to_value(body)?))?;
        let id = self.allocate_id();
        self.tasks.borrow_mut().push(Task {
            id: TaskId::new(id),
            title: body.title.clone(),
            description: body.description.clone(),
            completed: body.completed,
            created_at: Some("2024-03-02T08:00:00".to_string()),
            updated_at: None,
            comments: vec![],
        });
        Ok(())
    }

    async fn update_task(&self, id: &TaskId, body: &TaskWrite) -> anyhow::Result<()> {
        self.record("PUT", format!("/tasks/{id}"), Some(serde_json::to_value(body)?))?;
        self.with_task(id, |task| {
            task.title = body.title.clone();
            task.description = body.description.clone();
            task.completed = body.completed;
        })
    }

    async fn set_completed(&self, id: &TaskId, patch: &CompletionPatch) -> anyhow::Result<()> {
        self.record("PATCH", format!("/tasks/{id}"), Some(serde_json::to_value(patch)?))?;
        self.with_task(id, |task| {
            task.completed = patch.completed;
        })
    }

    async fn delete_task(&self, id: &TaskId) -> anyhow::Result<()> {
        self.record("DELETE", format!("/tasks/{id}"), None)?;
        let mut tasks = self.tasks.borrow_mut();
        let before = tasks.len();
        tasks.retain(|task| &task.id != id);
        if tasks.len() == before {
            return Err(anyhow!("404 Task not found"));
        }
        Ok(())
    }

    async fn add_comment(&self, task_id: &TaskId, body: &CommentWrite) -> anyhow::Result<()> {
        self.record(
            "POST",
            format!("/tasks/{task_id}/comments"),
            Some(serde_json::to_value(body)?),
        )?;
        let comment_id = format!("c{}", self.allocate_id());
        self.with_task(task_id, |task| {
            task.comments.push(Comment {
                id: CommentId::new(comment_id),
                content: body.content.clone(),
                created_at: Some("2024-03-02T08:05:00".to_string()),
            });
        })
    }

    async fn update_comment(
        &self,
        task_id: &TaskId,
        comment_id: &CommentId,
        body: &CommentWrite,
    ) -> anyhow::Result<()> {
        self.record(
            "PUT",
            format!("/tasks/{task_id}/comments/{comment_id}"),
            Some(serde_json::to_value(body)?),
        )?;
        self.with_task(task_id, |task| {
            task.comments
                .iter_mut()
                .find(|c| &c.id == comment_id)
                .map(|c| {
                    c.content = body.content.clone();
                })
        })?
        .ok_or_else(|| anyhow!("404 Comment not found"))
    }

    async fn delete_comment(&self, task_id: &TaskId, comment_id: &CommentId) -> anyhow::Result<()> {
        self.record(
            "DELETE",
            format!("/tasks/{task_id}/comments/{comment_id}"),
            None,
        )?;
        self.with_task(task_id, |task| {
            task.comments.retain(|c| &c.id != comment_id);
        })
    }
}
