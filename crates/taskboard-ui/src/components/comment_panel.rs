use std::rc::Rc;

use taskboard_core::comments::{
  CommentAction,
  CommentThread,
  post_comment,
  remove_comment,
  replace_comment
};
use taskboard_core::datetime::display_datetime;
use taskboard_core::{
  Comment,
  CommentId,
  TaskId
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  Reducible,
  TargetCast,
  function_component,
  html,
  use_reducer
};

use crate::api;

/// Hook state wrapper around the thread so actions dispatched from
/// async callbacks always apply to the latest state.
struct ThreadState(CommentThread);

impl Reducible for ThreadState {
  type Action = CommentAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut thread = self.0.clone();
    thread.apply(action);
    Rc::new(Self(thread))
  }
}

#[derive(Properties, PartialEq)]
pub struct CommentPanelProps {
  pub task_id:   TaskId,
  pub comments:  Vec<Comment>,
  /// Fired after every successful comment write.
  pub on_update: Callback<()>
}

#[function_component(CommentPanel)]
pub fn comment_panel(
  props: &CommentPanelProps
) -> Html {
  let thread = {
    let task_id = props.task_id.clone();
    use_reducer(move || {
      ThreadState(CommentThread::new(
        task_id
      ))
    })
  };

  let on_draft_input = {
    let thread = thread.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlTextAreaElement =
          e.target_unchecked_into();
        thread.dispatch(
          CommentAction::SetDraft(
            input.value()
          )
        );
      }
    )
  };

  let on_add = {
    let thread = thread.clone();
    let on_update =
      props.on_update.clone();
    Callback::from(
      move |e: web_sys::SubmitEvent| {
        e.prevent_default();
        let content =
          thread.0.draft().to_string();
        if content.is_empty() {
          return;
        }

        let task_id =
          thread.0.task_id().clone();
        let thread = thread.clone();
        let on_update = on_update.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            match post_comment(
              &api::client(),
              &task_id,
              &content
            )
            .await
            {
              | Ok(()) => {
                thread.dispatch(
                  CommentAction::DraftPosted
                );
                on_update.emit(());
              }
              | Err(err) => {
                tracing::error!(
                  task = %task_id,
                  error = %format!("{err:#}"),
                  "adding comment failed"
                );
              }
            }
          }
        );
      }
    )
  };

  let on_edit_input = {
    let thread = thread.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlTextAreaElement =
          e.target_unchecked_into();
        thread.dispatch(
          CommentAction::SetEditContent(
            input.value()
          )
        );
      }
    )
  };

  let on_save_edit = {
    let thread = thread.clone();
    let on_update =
      props.on_update.clone();
    Callback::from(
      move |_: MouseEvent| {
        let Some(edit) =
          thread.0.editing().cloned()
        else {
          return;
        };

        let task_id =
          thread.0.task_id().clone();
        let thread = thread.clone();
        let on_update = on_update.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            match replace_comment(
              &api::client(),
              &task_id,
              &edit.comment_id,
              &edit.content
            )
            .await
            {
              | Ok(()) => {
                thread.dispatch(
                  CommentAction::EditSaved
                );
                on_update.emit(());
              }
              | Err(err) => {
                tracing::error!(
                  task = %task_id,
                  comment = %edit.comment_id,
                  error = %format!("{err:#}"),
                  "updating comment failed"
                );
              }
            }
          }
        );
      }
    )
  };

  let on_cancel_edit = {
    let thread = thread.clone();
    Callback::from(
      move |_: MouseEvent| {
        thread.dispatch(
          CommentAction::CancelEdit
        )
      }
    )
  };

  let on_begin_edit = {
    let thread = thread.clone();
    Callback::from(
      move |comment: Comment| {
        thread.dispatch(
          CommentAction::BeginEdit(
            comment
          )
        )
      }
    )
  };

  let on_delete = {
    let task_id = props.task_id.clone();
    let on_update =
      props.on_update.clone();
    Callback::from(
      move |comment_id: CommentId| {
        let task_id = task_id.clone();
        let on_update = on_update.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            match remove_comment(
              &api::client(),
              &task_id,
              &comment_id
            )
            .await
            {
              | Ok(()) => on_update.emit(()),
              | Err(err) => {
                tracing::error!(
                  task = %task_id,
                  comment = %comment_id,
                  error = %format!("{err:#}"),
                  "deleting comment failed"
                );
              }
            }
          }
        );
      }
    )
  };

  html! {
      <div class="comments">
          <form class="comment-form" onsubmit={on_add}>
              <textarea
                  required=true
                  value={thread.0.draft().to_string()}
                  placeholder="Add a comment..."
                  oninput={on_draft_input}
              />
              <div class="actions">
                  <button class="btn primary" type="submit">{ "Add Comment" }</button>
              </div>
          </form>
          {
              for props.comments.iter().map(|comment| {
                  let created = display_datetime(comment.created_at.as_deref());
                  if let Some(edit) = thread.0.editing().filter(|edit| edit.comment_id == comment.id) {
                      html! {
                          <div class="comment editing" key={comment.id.as_str().to_string()}>
                              <textarea
                                  value={edit.content.clone()}
                                  oninput={on_edit_input.clone()}
                              />
                              <div class="actions">
                                  <button class="btn primary" onclick={on_save_edit.clone()}>{ "Save" }</button>
                                  <button class="btn" onclick={on_cancel_edit.clone()}>{ "Cancel" }</button>
                              </div>
                          </div>
                      }
                  } else {
                      let on_begin_edit = on_begin_edit.clone();
                      let on_delete = on_delete.clone();
                      let editable = comment.clone();
                      let comment_id = comment.id.clone();
                      html! {
                          <div class="comment" key={comment.id.as_str().to_string()}>
                              <div>{ &comment.content }</div>
                              <div class="meta">{ created }</div>
                              <div class="actions">
                                  <button class="btn" onclick={move |_| on_begin_edit.emit(editable.clone())}>{ "Edit" }</button>
                                  <button class="btn danger" onclick={move |_| on_delete.emit(comment_id.clone())}>{ "Delete" }</button>
                              </div>
                          </div>
                      }
                  }
              })
          }
      </div>
  }
}
