use taskboard_core::datetime::display_date;
use taskboard_core::{
  Task,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

use super::CommentPanel;

/// DOM id of the row rendering `id`.
pub fn row_element_id(
  id: &TaskId
) -> String {
  format!("task-{id}")
}

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub task:                Task,
  pub deleting:            bool,
  pub expanded:            bool,
  pub on_toggle:
    Callback<(TaskId, bool)>,
  pub on_edit:             Callback<Task>,
  pub on_delete:           Callback<TaskId>,
  pub on_toggle_comments:  Callback<TaskId>,
  pub on_comments_updated: Callback<()>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let task = &props.task;
  let id = task.id.clone();

  let class = classes!(
    "task-row",
    task.completed.then_some("completed"),
    props.deleting.then_some("deleting")
  );

  let on_toggle = {
    let on_toggle =
      props.on_toggle.clone();
    let id = id.clone();
    let completed = task.completed;
    // the box follows the snapshot, not the click
    move |e: yew::MouseEvent| {
      e.prevent_default();
      on_toggle
        .emit((id.clone(), completed))
    }
  };
  let on_edit = {
    let on_edit = props.on_edit.clone();
    let task = task.clone();
    move |_: yew::MouseEvent| {
      on_edit.emit(task.clone())
    }
  };
  let on_delete = {
    let on_delete =
      props.on_delete.clone();
    let id = id.clone();
    move |_: yew::MouseEvent| {
      on_delete.emit(id.clone())
    }
  };
  let on_toggle_comments = {
    let on_toggle_comments =
      props.on_toggle_comments.clone();
    let id = id.clone();
    move |_: yew::MouseEvent| {
      on_toggle_comments
        .emit(id.clone())
    }
  };

  let has_description =
    !task.description.trim().is_empty();

  html! {
      <div id={row_element_id(&id)} class={class}>
          <input
              type="checkbox"
              checked={task.completed}
              onclick={on_toggle}
          />
          <div>
              <div class="task-title">{ &task.title }</div>
              {
                  if has_description {
                      html! { <div class="task-subtitle">{ &task.description }</div> }
                  } else {
                      html! {}
                  }
              }
              <div class="meta">
                  { format!("Created {}", display_date(task.created_at.as_deref())) }
              </div>
              <button class="btn" onclick={on_toggle_comments}>
                  { task.comment_summary() }
              </button>
          </div>
          <div class="actions">
              <button class="btn" onclick={on_edit}>{ "Edit" }</button>
              <button class="btn danger" onclick={on_delete}>{ "Delete" }</button>
          </div>
          {
              if props.expanded {
                  html! {
                      <CommentPanel
                          key={id.as_str().to_string()}
                          task_id={id.clone()}
                          comments={task.comments.clone()}
                          on_update={props.on_comments_updated.clone()}
                      />
                  }
              } else {
                  html! {}
              }
          }
      </div>
  }
}
