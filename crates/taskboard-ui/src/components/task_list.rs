use std::collections::BTreeSet;

use taskboard_core::{
  Task,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub tasks:               Vec<Task>,
  pub deleting:            BTreeSet<TaskId>,
  pub expanded:            Option<TaskId>,
  pub on_toggle:
    Callback<(TaskId, bool)>,
  pub on_edit:             Callback<Task>,
  pub on_delete:           Callback<TaskId>,
  pub on_toggle_comments:  Callback<TaskId>,
  pub on_comments_updated: Callback<()>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  html! {
      <div class="list">
          <div class="header">{ format!("Tasks ({})", props.tasks.len()) }</div>
          {
              for props.tasks.iter().cloned().map(|task| {
                  let deleting = props.deleting.contains(&task.id);
                  let expanded = props.expanded.as_ref() == Some(&task.id);
                  let key = task.id.as_str().to_string();
                  html! {
                      <TaskListRow
                          key={key}
                          task={task}
                          deleting={deleting}
                          expanded={expanded}
                          on_toggle={props.on_toggle.clone()}
                          on_edit={props.on_edit.clone()}
                          on_delete={props.on_delete.clone()}
                          on_toggle_comments={props.on_toggle_comments.clone()}
                          on_comments_updated={props.on_comments_updated.clone()}
                      />
                  }
              })
          }
      </div>
  }
}
