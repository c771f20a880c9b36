use anyhow::bail;
use tracing::{debug, error, info};

use crate::api::TaskApi;
use crate::model::{Comment, CommentId, CommentWrite, TaskId};

/// The single comment being edited inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEdit {
    pub comment_id: CommentId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentAction {
    SetDraft(String),
    DraftPosted,
    BeginEdit(Comment),
    SetEditContent(String),
    EditSaved,
    CancelEdit,
}

/// Local state of the comment panel for one task. The comments
/// themselves stay owned by the task snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    task_id: TaskId,
    draft: String,
    editing: Option<CommentEdit>,
}

impl CommentThread {
    pub fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            draft: String::new(),
            editing: None,
        }
    }

    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn editing(&self) -> Option<&CommentEdit> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, comment_id: &CommentId) -> bool {
        self.editing
            .as_ref()
            .is_some_and(|edit| &edit.comment_id == comment_id)
    }

    pub fn apply(&mut self, action: CommentAction) {
        match action {
            CommentAction::SetDraft(text) => {
                self.draft = text;
            }
            CommentAction::DraftPosted => {
                self.draft.clear();
            }
            CommentAction::BeginEdit(comment) => {
                if let Some(previous) = &self.editing
                    && previous.comment_id != comment.id
                {
                    debug!(
                        discarded = %previous.comment_id,
                        next = %comment.id,
                        "switching comment edit target"
                    );
                }
                self.editing = Some(CommentEdit {
                    comment_id: comment.id,
                    content: comment.content,
                });
            }
            CommentAction::SetEditContent(text) => {
                if let Some(edit) = self.editing.as_mut() {
                    edit.content = text;
                }
            }
            CommentAction::EditSaved | CommentAction::CancelEdit => {
                self.editing = None;
            }
        }
    }

    /// Posts the draft, clears it and fires `on_update`. Failures are
    /// logged and leave the draft in place.
    pub async fn submit_draft<A, F>(&mut self, api: &A, on_update: F) -> bool
    where
        A: TaskApi,
        F: FnOnce(),
    {
        match post_comment(api, &self.task_id, &self.draft).await {
            Ok(()) => {
                self.apply(CommentAction::DraftPosted);
                on_update();
                true
            }
            Err(err) => {
                error!(task = %self.task_id, error = %format!("{err:#}"), "adding comment failed");
                false
            }
        }
    }

    /// Replaces the content of the comment in edit mode, leaves edit mode
    /// and fires `on_update`.
    pub async fn save_edit<A, F>(&mut self, api: &A, on_update: F) -> bool
    where
        A: TaskApi,
        F: FnOnce(),
    {
        let Some(edit) = self.editing.clone() else {
            debug!("save requested with no comment in edit mode");
            return false;
        };

        match replace_comment(api, &self.task_id, &edit.comment_id, &edit.content).await {
            Ok(()) => {
                self.apply(CommentAction::EditSaved);
                on_update();
                true
            }
            Err(err) => {
                error!(
                    task = %self.task_id,
                    comment = %edit.comment_id,
                    error = %format!("{err:#}"),
                    "updating comment failed"
                );
                false
            }
        }
    }

    pub async fn delete<A, F>(&self, api: &A, comment_id: &CommentId, on_update: F) -> bool
    where
        A: TaskApi,
        F: FnOnce(),
    {
        match remove_comment(api, &self.task_id, comment_id).await {
            Ok(()) => {
                on_update();
                true
            }
            Err(err) => {
                error!(
                    task = %self.task_id,
                    comment = %comment_id,
                    error = %format!("{err:#}"),
                    "deleting comment failed"
                );
                false
            }
        }
    }
}

#[tracing::instrument(skip(api, content), fields(task = %task_id))]
pub async fn post_comment<A: TaskApi>(
    api: &A,
    task_id: &TaskId,
    content: &str,
) -> anyhow::Result<()> {
    if content.is_empty() {
        bail!("comment content is required");
    }
    api.add_comment(
        task_id,
        &CommentWrite {
            content: content.to_string(),
        },
    )
    .await?;
    info!("added comment");
    Ok(())
}

#[tracing::instrument(skip(api, content), fields(task = %task_id, comment = %comment_id))]
pub async fn replace_comment<A: TaskApi>(
    api: &A,
    task_id: &TaskId,
    comment_id: &CommentId,
    content: &str,
) -> anyhow::Result<()> {
    api.update_comment(
        task_id,
        comment_id,
        &CommentWrite {
            content: content.to_string(),
        },
    )
    .await?;
    info!("updated comment");
    Ok(())
}

#[tracing::instrument(skip(api), fields(task = %task_id, comment = %comment_id))]
pub async fn remove_comment<A: TaskApi>(
    api: &A,
    task_id: &TaskId,
    comment_id: &CommentId,
) -> anyhow::Result<()> {
    api.delete_comment(task_id, comment_id).await?;
    info!("deleted comment");
    Ok(())
}
