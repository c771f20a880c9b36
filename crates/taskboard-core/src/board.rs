use std::cell::Cell;
use std::future::Future;

use tracing::{debug, error, info, warn};

use crate::api::TaskApi;
use crate::editor::TaskDraft;
use crate::filter::{StatusFilter, TaskCounts, TaskQuery, visible_tasks};
use crate::model::{CompletionPatch, Task, TaskId};

/// Delay between a successful delete and the refetch while the row
/// plays its removal state.
pub const DELETE_SETTLE_MS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
}

/// Orders overlapping refetches: only the most recently begun one may
/// replace the snapshot.
#[derive(Debug, Default)]
pub struct RefreshGate {
    latest: Cell<u64>,
}

impl RefreshGate {
    pub fn begin(&self) -> u64 {
        let ticket = self.latest.get().wrapping_add(1);
        self.latest.set(ticket);
        ticket
    }

    pub fn accepts(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refetch {
    Replaced(Vec<Task>),
    Failed,
    /// A newer refetch began while this one was in flight.
    Stale,
}

/// Fetches the task list for `ticket`. The result is dropped when the
/// gate has moved on by the time the response arrives.
#[tracing::instrument(skip(api, gate))]
pub async fn fetch_snapshot<A: TaskApi>(api: &A, gate: &RefreshGate, ticket: u64) -> Refetch {
    let result = api.list_tasks().await;

    if !gate.accepts(ticket) {
        debug!("discarding stale task list");
        return Refetch::Stale;
    }

    match result {
        Ok(tasks) => {
            debug!(count = tasks.len(), "fetched task snapshot");
            Refetch::Replaced(tasks)
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "fetching tasks failed");
            Refetch::Failed
        }
    }
}

/// Flips completion of one task given the state currently shown.
/// Returns whether the backend accepted the change.
#[tracing::instrument(skip(api), fields(task = %id))]
pub async fn toggle_task<A: TaskApi>(api: &A, id: &TaskId, current: bool) -> bool {
    let patch = CompletionPatch::toggled(current);
    if let Err(err) = api.set_completed(id, &patch).await {
        error!(error = %format!("{err:#}"), "updating task failed");
        return false;
    }

    info!(completed = patch.completed, "toggled task completion");
    true
}

/// Deletes one task. When its row is on screen, `on_deleting` marks the
/// row and `settle` is awaited before returning so the removal state can
/// play. Returns whether a refetch should follow.
#[tracing::instrument(skip(api, on_deleting, settle), fields(task = %id))]
pub async fn delete_task_settled<A, D, S, Fut>(
    api: &A,
    id: &TaskId,
    row_rendered: bool,
    on_deleting: D,
    settle: S,
) -> bool
where
    A: TaskApi,
    D: FnOnce(),
    S: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    if let Err(err) = api.delete_task(id).await {
        error!(error = %format!("{err:#}"), "deleting task failed");
        return false;
    }
    info!("deleted task");

    if row_rendered {
        on_deleting();
        settle().await;
    } else {
        debug!("row not rendered, refreshing immediately");
    }
    true
}

/// Deletes `ids` one request at a time, in order. Stops at the first
/// failure and returns how many were deleted before it.
#[tracing::instrument(skip(api, ids), fields(count = ids.len()))]
pub async fn delete_sequentially<A: TaskApi>(
    api: &A,
    ids: &[TaskId],
) -> Result<usize, (usize, anyhow::Error)> {
    for (done, id) in ids.iter().enumerate() {
        if let Err(err) = api.delete_task(id).await {
            return Err((done, err));
        }
        debug!(task = %id, "deleted in batch");
    }
    Ok(ids.len())
}

/// Runs the clear-completed batch. Returns whether a refetch should
/// follow; a failed delete stops the batch and skips it.
pub async fn clear_tasks<A: TaskApi>(api: &A, ids: &[TaskId]) -> bool {
    match delete_sequentially(api, ids).await {
        Ok(deleted) => {
            info!(deleted, "cleared completed tasks");
            true
        }
        Err((deleted, err)) => {
            error!(deleted, error = %format!("{err:#}"), "clearing completed tasks failed");
            false
        }
    }
}

pub fn completed_ids(tasks: &[Task]) -> Vec<TaskId> {
    tasks
        .iter()
        .filter(|task| task.completed)
        .map(|task| task.id.clone())
        .collect()
}

/// Owns the last fetched task snapshot plus the filter and search state.
///
/// Every write goes to the backend and is followed by a full refetch;
/// the snapshot is never edited in place. Failed requests are logged
/// and swallowed; the returned `bool` only says whether the write
/// went through.
#[derive(Debug)]
pub struct TaskBoard<A> {
    api: A,
    tasks: Vec<Task>,
    load_state: LoadState,
    query: TaskQuery,
    gate: RefreshGate,
}

impl<A: TaskApi> TaskBoard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            load_state: LoadState::Loading,
            query: TaskQuery::default(),
            gate: RefreshGate::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn query(&self) -> &TaskQuery {
        &self.query
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.query.status = status;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn visible(&self) -> Vec<&Task> {
        visible_tasks(&self.tasks, &self.query)
    }

    pub fn counts(&self) -> TaskCounts {
        TaskCounts::of(&self.tasks)
    }

    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Replaces the snapshot with the backend's list. On failure the
    /// previous snapshot stays and loading still ends.
    #[tracing::instrument(skip(self))]
    pub async fn refetch(&mut self) -> bool {
        let ticket = self.gate.begin();
        let outcome = fetch_snapshot(&self.api, &self.gate, ticket).await;
        self.load_state = LoadState::Ready;

        match outcome {
            Refetch::Replaced(tasks) => {
                self.tasks = tasks;
                true
            }
            Refetch::Failed | Refetch::Stale => false,
        }
    }

    #[tracing::instrument(skip(self), fields(task = %id))]
    pub async fn toggle_completion(&mut self, id: &TaskId) -> bool {
        let Some(current) = self.find(id).map(|task| task.completed) else {
            warn!("toggle requested for a task outside the snapshot");
            return false;
        };

        if !toggle_task(&self.api, id, current).await {
            return false;
        }
        self.refetch().await;
        true
    }

    /// Deletes one task and refetches right away; there is no rendered
    /// row to settle here.
    pub async fn delete_task(&mut self, id: &TaskId) -> bool {
        if !delete_task_settled(&self.api, id, false, || {}, || std::future::ready(())).await {
            return false;
        }
        self.refetch().await;
        true
    }

    /// Deletes every completed task of the snapshot sequentially, then
    /// refetches once. `confirm` receives the number of completed tasks;
    /// declining sends nothing.
    #[tracing::instrument(skip(self, confirm))]
    pub async fn clear_completed<F>(&mut self, confirm: F) -> bool
    where
        F: FnOnce(usize) -> bool,
    {
        let completed = completed_ids(&self.tasks);

        if !confirm(completed.len()) {
            info!("clear completed canceled");
            return false;
        }

        if !clear_tasks(&self.api, &completed).await {
            return false;
        }
        self.refetch().await;
        true
    }

    /// Submits the editor draft and refetches on success.
    #[tracing::instrument(skip(self, draft))]
    pub async fn save(&mut self, draft: &TaskDraft) -> bool {
        if let Err(err) = draft.submit(&self.api).await {
            error!(error = %format!("{err:#}"), "saving task failed");
            return false;
        }

        self.refetch().await;
        true
    }
}
