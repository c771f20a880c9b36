use taskboard_core::Task;
use taskboard_core::editor::TaskDraft;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  TargetCast,
  function_component,
  html,
  use_effect_with,
  use_state
};

use crate::api;

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  /// The task being edited, or `None` to create one.
  #[prop_or_default]
  pub task:    Option<Task>,
  pub on_save: Callback<()>
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let draft = {
    let task = props.task.clone();
    use_state(move || {
      TaskDraft::for_task(task.as_ref())
    })
  };
  let busy = use_state(|| false);

  {
    let draft = draft.clone();
    use_effect_with(
      props.task.clone(),
      move |task| {
        tracing::debug!(
          task = ?task.as_ref().map(|task| task.id.clone()),
          "rebinding task form"
        );
        draft.set(TaskDraft::for_task(
          task.as_ref()
        ));
        || ()
      }
    );
  }

  let on_title_input = {
    let draft = draft.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        let mut next = (*draft).clone();
        next.title = input.value();
        draft.set(next);
      }
    )
  };

  let on_description_input = {
    let draft = draft.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlTextAreaElement =
          e.target_unchecked_into();
        let mut next = (*draft).clone();
        next.description = input.value();
        draft.set(next);
      }
    )
  };

  let on_completed_change = {
    let draft = draft.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        let mut next = (*draft).clone();
        next.set_completed(input.checked());
        draft.set(next);
      }
    )
  };

  let on_submit = {
    let draft = draft.clone();
    let busy = busy.clone();
    let on_save = props.on_save.clone();
    Callback::from(
      move |e: web_sys::SubmitEvent| {
        e.prevent_default();
        if *busy {
          return;
        }
        if let Err(err) = draft.validate() {
          tracing::debug!(
            error = %err,
            "task form rejected"
          );
          return;
        }

        let submitted = (*draft).clone();
        let draft = draft.clone();
        let busy = busy.clone();
        let on_save = on_save.clone();
        busy.set(true);

        wasm_bindgen_futures::spawn_local(
          async move {
            match submitted
              .submit(&api::client())
              .await
            {
              | Ok(()) => {
                if !submitted.is_editing() {
                  draft.set(
                    TaskDraft::default()
                  );
                }
                on_save.emit(());
              }
              | Err(err) => {
                tracing::error!(
                  error = %format!("{err:#}"),
                  "saving task failed"
                );
              }
            }
            busy.set(false);
          }
        );
      }
    )
  };

  let on_cancel = {
    let on_save = props.on_save.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_save.emit(())
      }
    )
  };

  let editing = draft.is_editing();

  html! {
      <form class="task-form" onsubmit={on_submit}>
          <div class="field">
              <label for="task-title">{ "Title" }</label>
              <input
                  id="task-title"
                  required=true
                  value={draft.title.clone()}
                  placeholder="Task title"
                  oninput={on_title_input}
              />
          </div>
          <div class="field">
              <label for="task-description">{ "Description" }</label>
              <textarea
                  id="task-description"
                  required=true
                  value={draft.description.clone()}
                  placeholder="Task description"
                  oninput={on_description_input}
              />
          </div>
          <div class="field">
              <label>
                  <input
                      type="checkbox"
                      checked={draft.completed()}
                      disabled={!draft.can_toggle_completed()}
                      onchange={on_completed_change}
                  />
                  { " Completed" }
              </label>
          </div>
          <div class="actions">
              <button class="btn primary" type="submit" disabled={*busy}>
                  { if editing { "Update Task" } else { "Add Task" } }
              </button>
              {
                  if editing {
                      html! {
                          <button class="btn" type="button" onclick={on_cancel}>{ "Cancel" }</button>
                      }
                  } else {
                      html! {}
                  }
              }
          </div>
      </form>
  }
}
