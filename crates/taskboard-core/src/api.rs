use anyhow::{Context, anyhow};
use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use tracing::debug;

use crate::config::BackendConfig;
use crate::model::{CommentId, CommentWrite, CompletionPatch, Task, TaskId, TaskWrite};

/// The REST contract of the task backend.
///
/// Every failure (transport, non-2xx status, undecodable body) is
/// reported as one `anyhow::Error`. Write endpoints answer with the
/// updated task, which callers never use: they refetch instead.
#[allow(async_fn_in_trait)]
pub trait TaskApi {
    /// `GET /tasks`
    async fn list_tasks(&self) -> anyhow::Result<Vec<Task>>;

    /// `POST /tasks`
    async fn create_task(&self, body: &TaskWrite) -> anyhow::Result<()>;

    /// `PUT /tasks/{id}`
    async fn update_task(&self, id: &TaskId, body: &TaskWrite) -> anyhow::Result<()>;

    /// `PATCH /tasks/{id}`
    async fn set_completed(&self, id: &TaskId, patch: &CompletionPatch) -> anyhow::Result<()>;

    /// `DELETE /tasks/{id}`
    async fn delete_task(&self, id: &TaskId) -> anyhow::Result<()>;

    /// `POST /tasks/{id}/comments`
    async fn add_comment(&self, task_id: &TaskId, body: &CommentWrite) -> anyhow::Result<()>;

    /// `PUT /tasks/{id}/comments/{comment_id}`
    async fn update_comment(
        &self,
        task_id: &TaskId,
        comment_id: &CommentId,
        body: &CommentWrite,
    ) -> anyhow::Result<()>;

    /// `DELETE /tasks/{id}/comments/{comment_id}`
    async fn delete_comment(&self, task_id: &TaskId, comment_id: &CommentId)
    -> anyhow::Result<()>;
}

impl<T: TaskApi + ?Sized> TaskApi for &T {
    async fn list_tasks(&self) -> anyhow::Result<Vec<Task>> {
        (**self).list_tasks().await
    }

    async fn create_task(&self, body: &TaskWrite) -> anyhow::Result<()> {
        (**self).create_task(body).await
    }

    async fn update_task(&self, id: &TaskId, body: &TaskWrite) -> anyhow::Result<()> {
        (**self).update_task(id, body).await
    }

    async fn set_completed(&self, id: &TaskId, patch: &CompletionPatch) -> anyhow::Result<()> {
        (**self).set_completed(id, patch).await
    }

    async fn delete_task(&self, id: &TaskId) -> anyhow::Result<()> {
        (**self).delete_task(id).await
    }

    async fn add_comment(&self, task_id: &TaskId, body: &CommentWrite) -> anyhow::Result<()> {
        (**self).add_comment(task_id, body).await
    }

    async fn update_comment(
        &self,
        task_id: &TaskId,
        comment_id: &CommentId,
        body: &CommentWrite,
    ) -> anyhow::Result<()> {
        (**self).update_comment(task_id, comment_id, body).await
    }

    async fn delete_comment(
        &self,
        task_id: &TaskId,
        comment_id: &CommentId,
    ) -> anyhow::Result<()> {
        (**self).delete_comment(task_id, comment_id).await
    }
}

/// [`TaskApi`] over HTTP. Runs natively and on wasm32, where reqwest
/// goes through the browser's fetch.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTaskApi {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url().clone(),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("backend url {} cannot carry a path", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn execute(
        &self,
        method: Method,
        segments: &[&str],
        prepare: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> anyhow::Result<reqwest::Response> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "sending request");

        let request = prepare(self.client.request(method.clone(), url.clone()));
        let response = request
            .send()
            .await
            .with_context(|| format!("{method} {} failed", url.path()))?
            .error_for_status()
            .with_context(|| format!("{method} {} was rejected", url.path()))?;

        debug!(
            %method,
            path = url.path(),
            status = %response.status(),
            "request completed"
        );
        Ok(response)
    }

    async fn send_json<B>(&self, method: Method, segments: &[&str], body: &B) -> anyhow::Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute(method, segments, |req| req.json(body))
            .await
            .map(|_| ())
    }

    async fn send_empty(&self, method: Method, segments: &[&str]) -> anyhow::Result<()> {
        self.execute(method, segments, |req| req).await.map(|_| ())
    }
}

impl TaskApi for HttpTaskApi {
    #[tracing::instrument(skip(self))]
    async fn list_tasks(&self) -> anyhow::Result<Vec<Task>> {
        let response = self.execute(Method::GET, &["tasks"], |req| req).await?;
        let tasks: Vec<Task> = response
            .json()
            .await
            .context("failed to decode GET /tasks response")?;
        debug!(count = tasks.len(), "decoded task list");
        Ok(tasks)
    }

    #[tracing::instrument(skip(self, body))]
    async fn create_task(&self, body: &TaskWrite) -> anyhow::Result<()> {
        self.send_json(Method::POST, &["tasks"], body).await
    }

    #[tracing::instrument(skip(self, body), fields(task = %id))]
    async fn update_task(&self, id: &TaskId, body: &TaskWrite) -> anyhow::Result<()> {
        self.send_json(Method::PUT, &["tasks", id.as_str()], body)
            .await
    }

    #[tracing::instrument(skip(self), fields(task = %id))]
    async fn set_completed(&self, id: &TaskId, patch: &CompletionPatch) -> anyhow::Result<()> {
        self.send_json(Method::PATCH, &["tasks", id.as_str()], patch)
            .await
    }

    #[tracing::instrument(skip(self), fields(task = %id))]
    async fn delete_task(&self, id: &TaskId) -> anyhow::Result<()> {
        self.send_empty(Method::DELETE, &["tasks", id.as_str()])
            .await
    }

    #[tracing::instrument(skip(self, body), fields(task = %task_id))]
    async fn add_comment(&self, task_id: &TaskId, body: &CommentWrite) -> anyhow::Result<()> {
        self.send_json(Method::POST, &["tasks", task_id.as_str(), "comments"], body)
            .await
    }

    #[tracing::instrument(skip(self, body), fields(task = %task_id, comment = %comment_id))]
    async fn update_comment(
        &self,
        task_id: &TaskId,
        comment_id: &CommentId,
        body: &CommentWrite,
    ) -> anyhow::Result<()> {
        let segments = ["tasks", task_id.as_str(), "comments", comment_id.as_str()];
        self.send_json(Method::PUT, &segments, body).await
    }

    #[tracing::instrument(skip(self), fields(task = %task_id, comment = %comment_id))]
    async fn delete_comment(
        &self,
        task_id: &TaskId,
        comment_id: &CommentId,
    ) -> anyhow::Result<()> {
        let segments = ["tasks", task_id.as_str(), "comments", comment_id.as_str()];
        self.send_empty(Method::DELETE, &segments).await
    }
}
