mod support;

use std::cell::Cell;

use serde_json::json;
use support::FakeBackend;
use taskboard_core::board::TaskBoard;
use taskboard_core::comments::{CommentAction, CommentThread, post_comment};
use taskboard_core::editor::TaskDraft;
use taskboard_core::model::{CommentId, TaskId};

fn backend_with_task_five() -> FakeBackend {
    FakeBackend::with_tasks(&[
        ("one", "1", false),
        ("two", "2", false),
        ("three", "3", false),
        ("four", "4", false),
        ("five", "5", false),
    ])
}

#[tokio::test]
async fn adding_a_comment_posts_clears_input_and_signals() {
    let backend = backend_with_task_five();
    let mut thread = CommentThread::new(TaskId::from("5"));
    thread.apply(CommentAction::SetDraft("hello".to_string()));

    let fired = Cell::new(0);
    assert!(
        thread
            .submit_draft(&backend, || fired.set(fired.get() + 1))
            .await
    );

    let writes = backend.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].method, "POST");
    assert_eq!(writes[0].path, "/tasks/5/comments");
    assert_eq!(writes[0].body, Some(json!({"content": "hello"})));
    assert_eq!(thread.draft(), "");
    assert_eq!(fired.get(), 1);
}

#[tokio::test]
async fn failed_comment_keeps_draft_and_stays_silent() {
    let backend = backend_with_task_five();
    backend.fail("POST /tasks/5/comments");
    let mut thread = CommentThread::new(TaskId::from("5"));
    thread.apply(CommentAction::SetDraft("hello".to_string()));

    let fired = Cell::new(false);
    assert!(!thread.submit_draft(&backend, || fired.set(true)).await);
    assert_eq!(thread.draft(), "hello");
    assert!(!fired.get());
}

#[tokio::test]
async fn empty_comment_is_rejected_before_any_request() {
    let backend = backend_with_task_five();
    let err = post_comment(&backend, &TaskId::from("5"), "")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "comment content is required");
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn edit_and_delete_refresh_the_parent_snapshot() {
    let backend = backend_with_task_five();
    let mut board = TaskBoard::new(&backend);
    board.refetch().await;

    let task_id = TaskId::from("2");
    let mut thread = CommentThread::new(task_id.clone());
    thread.apply(CommentAction::SetDraft("first take".to_string()));

    let refresh = Cell::new(false);
    thread.submit_draft(&backend, || refresh.set(true)).await;
    assert!(refresh.replace(false));
    board.refetch().await;

    let comment = board.find(&task_id).unwrap().comments[0].clone();
    assert_eq!(comment.content, "first take");

    thread.apply(CommentAction::BeginEdit(comment.clone()));
    thread.apply(CommentAction::SetEditContent("second take".to_string()));
    assert!(thread.save_edit(&backend, || refresh.set(true)).await);
    assert!(refresh.replace(false));
    assert!(thread.editing().is_none());

    let edit = backend.writes().pop().unwrap();
    assert_eq!(edit.method, "PUT");
    assert_eq!(edit.path, format!("/tasks/2/comments/{}", comment.id));
    assert_eq!(edit.body, Some(json!({"content": "second take"})));

    board.refetch().await;
    let task = board.find(&task_id).unwrap();
    assert_eq!(task.comments[0].content, "second take");
    assert_eq!(task.comment_summary(), "1 comment");

    assert!(
        thread
            .delete(&backend, &comment.id, || refresh.set(true))
            .await
    );
    assert!(refresh.get());
    board.refetch().await;
    assert!(board.find(&task_id).unwrap().comments.is_empty());
}

#[tokio::test]
async fn saving_without_edit_target_sends_nothing() {
    let backend = backend_with_task_five();
    let mut thread = CommentThread::new(TaskId::from("1"));
    assert!(
        !thread
            .save_edit(&backend, || panic!("no update expected"))
            .await
    );
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn deleting_from_a_missing_task_is_swallowed() {
    let backend = backend_with_task_five();
    let thread = CommentThread::new(TaskId::from("42"));
    let fired = Cell::new(false);

    assert!(
        !thread
            .delete(&backend, &CommentId::from("c1"), || fired.set(true))
            .await
    );
    assert!(!fired.get());
    assert_eq!(backend.writes().len(), 1);
}

#[tokio::test]
async fn editor_gate_blocks_empty_title_before_any_request() {
    let backend = FakeBackend::new();
    let mut draft = TaskDraft::for_task(None);
    draft.description = "has a description".to_string();

    assert!(draft.submit(&backend).await.is_err());
    assert!(backend.requests().is_empty());

    let mut board = TaskBoard::new(&backend);
    assert!(!board.save(&draft).await);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn editing_existing_task_issues_full_update() {
    let backend = FakeBackend::with_tasks(&[("old", "desc", false)]);
    let mut board = TaskBoard::new(&backend);
    board.refetch().await;

    let mut draft = TaskDraft::for_task(board.find(&TaskId::from("1")));
    draft.title = "new".to_string();
    draft.set_completed(true);
    assert!(board.save(&draft).await);

    let put = backend.writes().pop().unwrap();
    assert_eq!(put.method, "PUT");
    assert_eq!(put.path, "/tasks/1");
    assert_eq!(
        put.body,
        Some(json!({"title": "new", "description": "desc", "completed": true}))
    );
    assert!(board.find(&TaskId::from("1")).unwrap().completed);
}
