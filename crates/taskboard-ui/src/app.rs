use std::collections::BTreeSet;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use taskboard_core::board::{
  DELETE_SETTLE_MS,
  Refetch,
  clear_tasks,
  completed_ids,
  delete_task_settled,
  fetch_snapshot,
  toggle_task
};
use taskboard_core::filter::{
  StatusFilter,
  TaskCounts,
  TaskQuery,
  visible_tasks
};
use taskboard_core::{
  LoadState,
  RefreshGate,
  Task,
  TaskId
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Reducible,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_reducer,
  use_state
};

use crate::api;
use crate::components::{
  EmptyState,
  LoadingIndicator,
  StatsBar,
  TaskFilters,
  TaskForm,
  TaskList,
  row_element_id
};

const CLEAR_COMPLETED_PROMPT: &str =
  "Are you sure you want to clear all \
   completed tasks?";

/// Bumped after every successful write; each bump triggers one refetch.
#[derive(Default, PartialEq)]
struct RefreshTick(u64);

impl Reducible for RefreshTick {
  type Action = ();

  fn reduce(
    self: Rc<Self>,
    _: Self::Action
  ) -> Rc<Self> {
    Rc::new(Self(
      self.0.wrapping_add(1)
    ))
  }
}

fn row_is_rendered(id: &TaskId) -> bool {
  web_sys::window()
    .and_then(|window| {
      window.document()
    })
    .and_then(|document| {
      document.get_element_by_id(
        &row_element_id(id)
      )
    })
    .is_some()
}

fn confirm(message: &str) -> bool {
  web_sys::window()
    .and_then(|window| {
      window
        .confirm_with_message(message)
        .ok()
    })
    .unwrap_or(false)
}

#[function_component(App)]
pub fn app() -> Html {
  let tasks = use_state(Vec::<Task>::new);
  let load_state =
    use_state(|| LoadState::Loading);
  let query =
    use_state(TaskQuery::default);
  let editing =
    use_state(|| None::<Task>);
  let expanded =
    use_state(|| None::<TaskId>);
  let deleting =
    use_state(BTreeSet::<TaskId>::new);
  let refresh =
    use_reducer(RefreshTick::default);
  let gate =
    use_memo((), |_| RefreshGate::default());

  {
    let tasks = tasks.clone();
    let load_state = load_state.clone();
    let deleting = deleting.clone();
    let gate = gate.clone();

    use_effect_with(
      refresh.0,
      move |_| {
        let ticket = gate.begin();

        wasm_bindgen_futures::spawn_local(
          async move {
            tracing::info!(
              ticket,
              "refreshing task list"
            );
            match fetch_snapshot(
              &api::client(),
              &gate,
              ticket
            )
            .await
            {
              | Refetch::Replaced(list) => {
                tasks.set(list);
                deleting
                  .set(BTreeSet::new());
                load_state
                  .set(LoadState::Ready);
              }
              | Refetch::Failed => {
                load_state
                  .set(LoadState::Ready);
              }
              | Refetch::Stale => {}
            }
          }
        );

        || ()
      }
    );
  }

  let on_toggle = {
    let refresh = refresh.dispatcher();
    Callback::from(
      move |(id, completed): (TaskId, bool)| {
        let refresh = refresh.clone();

        wasm_bindgen_futures::spawn_local(
          async move {
            if toggle_task(
              &api::client(),
              &id,
              completed
            )
            .await
            {
              refresh.dispatch(());
            }
          }
        );
      }
    )
  };

  let on_delete = {
    let refresh = refresh.dispatcher();
    let deleting = deleting.clone();
    Callback::from(move |id: TaskId| {
      let refresh = refresh.clone();
      let deleting = deleting.clone();
      let rendered = row_is_rendered(&id);

      wasm_bindgen_futures::spawn_local(
        async move {
          let mark = || {
            let mut next =
              (*deleting).clone();
            next.insert(id.clone());
            deleting.set(next);
          };
          let settle = || {
            TimeoutFuture::new(
              DELETE_SETTLE_MS
            )
          };

          if delete_task_settled(
            &api::client(),
            &id,
            rendered,
            mark,
            settle
          )
          .await
          {
            refresh.dispatch(());
          }
        }
      );
    })
  };

  let on_clear_completed = {
    let tasks = tasks.clone();
    let refresh = refresh.dispatcher();
    Callback::from(
      move |_: MouseEvent| {
        let completed =
          completed_ids(&tasks);

        if !confirm(
          CLEAR_COMPLETED_PROMPT
        ) {
          tracing::info!(
            "clear completed canceled"
          );
          return;
        }

        let refresh = refresh.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            if clear_tasks(
              &api::client(),
              &completed
            )
            .await
            {
              refresh.dispatch(());
            }
          }
        );
      }
    )
  };

  let on_edit = {
    let editing = editing.clone();
    Callback::from(move |task: Task| {
      tracing::debug!(
        task = %task.id,
        "editing task"
      );
      editing.set(Some(task));
    })
  };

  let on_save = {
    let editing = editing.clone();
    let refresh = refresh.dispatcher();
    Callback::from(move |()| {
      editing.set(None);
      refresh.dispatch(());
    })
  };

  let on_toggle_comments = {
    let expanded = expanded.clone();
    Callback::from(move |id: TaskId| {
      let next = if (*expanded).as_ref()
        == Some(&id)
      {
        None
      } else {
        Some(id)
      };
      expanded.set(next);
    })
  };

  let on_comments_updated = {
    let refresh = refresh.dispatcher();
    Callback::from(move |()| {
      refresh.dispatch(())
    })
  };

  let on_status = {
    let query = query.clone();
    Callback::from(
      move |status: StatusFilter| {
        let mut next = (*query).clone();
        next.status = status;
        query.set(next);
      }
    )
  };

  let on_search = {
    let query = query.clone();
    Callback::from(
      move |search: String| {
        let mut next = (*query).clone();
        next.search = search;
        query.set(next);
      }
    )
  };

  let counts = TaskCounts::of(&tasks);
  let visible: Vec<Task> =
    visible_tasks(&tasks, &query)
      .into_iter()
      .cloned()
      .collect();

  let body = if *load_state
    == LoadState::Loading
  {
    html! { <LoadingIndicator /> }
  } else if visible.is_empty() {
    html! { <EmptyState hint={query.empty_hint()} /> }
  } else {
    html! {
        <TaskList
            tasks={visible}
            deleting={(*deleting).clone()}
            expanded={(*expanded).clone()}
            on_toggle={on_toggle}
            on_edit={on_edit}
            on_delete={on_delete}
            on_toggle_comments={on_toggle_comments}
            on_comments_updated={on_comments_updated}
        />
    }
  };

  html! {
      <div class="app">
          <header class="app-header">
              <h1>{ "Task Manager" }</h1>
          </header>
          <main class="layout">
              <section class="panel">
                  <div class="header">
                      { if editing.is_some() { "Edit Task" } else { "Add New Task" } }
                  </div>
                  <TaskForm task={(*editing).clone()} on_save={on_save} />
              </section>
              <section class="panel">
                  <TaskFilters query={(*query).clone()} on_status={on_status} on_search={on_search} />
                  <StatsBar counts={counts} on_clear_completed={on_clear_completed} />
                  { body }
              </section>
          </main>
      </div>
  }
}
