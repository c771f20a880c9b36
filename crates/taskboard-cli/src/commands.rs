use std::cell::Cell;
use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail};
use taskboard_core::comments::{CommentAction, CommentThread};
use taskboard_core::editor::TaskDraft;
use taskboard_core::model::{CommentId, TaskId};
use taskboard_core::{TaskApi, TaskBoard};
use tracing::{debug, info};

use crate::cli::{Command, CommentCommand};
use crate::render::Renderer;

const CLEAR_PROMPT: &str = "Are you sure you want to clear all completed tasks?";

/// Runs one command against a board whose snapshot is already loaded.
#[tracing::instrument(skip_all)]
pub async fn dispatch<A: TaskApi>(
    board: &mut TaskBoard<A>,
    renderer: &Renderer,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::List { status, search } => {
            board.set_status_filter(status);
            board.set_search(search);
            renderer.print_task_table(&board.visible(), board.query(), board.counts())
        }
        Command::Show { id } => {
            let task = find_task(board, &id)?;
            renderer.print_task_info(task)
        }
        Command::Add { title, description } => {
            let mut draft = TaskDraft::for_task(None);
            draft.title = title;
            draft.description = description;
            draft.validate()?;
            ensure_applied(board.save(&draft).await, "saving task")
        }
        Command::Edit {
            id,
            title,
            description,
            completed,
        } => {
            let mut draft = TaskDraft::for_task(Some(find_task(board, &id)?));
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(completed) = completed {
                draft.set_completed(completed);
            }
            draft.validate()?;
            ensure_applied(board.save(&draft).await, "saving task")
        }
        Command::Toggle { id } => {
            let id = find_task(board, &id)?.id.clone();
            ensure_applied(board.toggle_completion(&id).await, "updating task")
        }
        Command::Delete { id } => {
            let id = find_task(board, &id)?.id.clone();
            ensure_applied(board.delete_task(&id).await, "deleting task")
        }
        Command::ClearCompleted { yes } => {
            let declined = Cell::new(false);
            let applied = board
                .clear_completed(|count| {
                    if count == 0 {
                        info!("no completed tasks to clear");
                        return true;
                    }
                    let accepted = yes || confirm(&format!("{CLEAR_PROMPT} ({count} tasks)"));
                    declined.set(!accepted);
                    accepted
                })
                .await;
            if declined.get() {
                return Ok(());
            }
            ensure_applied(applied, "clearing completed tasks")
        }
        Command::Comment { action } => dispatch_comment(board, action).await,
    }
}

async fn dispatch_comment<A: TaskApi>(
    board: &mut TaskBoard<A>,
    action: CommentCommand,
) -> anyhow::Result<()> {
    let refresh = Cell::new(false);

    let applied = match action {
        CommentCommand::Add { task_id, content } => {
            let mut thread = CommentThread::new(find_task(board, &task_id)?.id.clone());
            thread.apply(CommentAction::SetDraft(content));
            if thread.draft().is_empty() {
                bail!("comment content is required");
            }
            thread.submit_draft(board.api(), || refresh.set(true)).await
        }
        CommentCommand::Edit {
            task_id,
            comment_id,
            content,
        } => {
            let task = find_task(board, &task_id)?;
            let comment_id = CommentId::new(comment_id);
            let comment = task
                .comments
                .iter()
                .find(|comment| comment.id == comment_id)
                .cloned()
                .ok_or_else(|| anyhow!("task {} has no comment {comment_id}", task.id))?;

            let mut thread = CommentThread::new(task.id.clone());
            thread.apply(CommentAction::BeginEdit(comment));
            thread.apply(CommentAction::SetEditContent(content));
            thread.save_edit(board.api(), || refresh.set(true)).await
        }
        CommentCommand::Delete {
            task_id,
            comment_id,
        } => {
            let thread = CommentThread::new(find_task(board, &task_id)?.id.clone());
            thread
                .delete(board.api(), &CommentId::new(comment_id), || {
                    refresh.set(true)
                })
                .await
        }
    };

    if refresh.get() {
        debug!("comment update signal received, refetching");
        board.refetch().await;
    }
    ensure_applied(applied, "updating comments")
}

fn find_task<'a, A: TaskApi>(
    board: &'a TaskBoard<A>,
    raw_id: &str,
) -> anyhow::Result<&'a taskboard_core::Task> {
    let id = TaskId::new(raw_id.trim());
    board
        .find(&id)
        .ok_or_else(|| anyhow!("no task with id {id}"))
}

fn ensure_applied(applied: bool, action: &str) -> anyhow::Result<()> {
    if applied {
        Ok(())
    } else {
        Err(anyhow!("{action} failed; see the log for the request error"))
    }
}

fn confirm(prompt: &str) -> bool {
    let mut stderr = io::stderr().lock();
    if write!(stderr, "{prompt} [y/N] ").and_then(|()| stderr.flush()).is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    parse_yes(&answer)
}

fn parse_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(parse_yes("y\n"));
        assert!(parse_yes(" YES "));
        assert!(!parse_yes(""));
        assert!(!parse_yes("no"));
        assert!(!parse_yes("yep"));
    }
}
