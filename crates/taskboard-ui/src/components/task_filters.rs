use taskboard_core::filter::{
  StatusFilter,
  TaskQuery
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskFiltersProps {
  pub query:     TaskQuery,
  pub on_status: Callback<StatusFilter>,
  pub on_search: Callback<String>
}

#[function_component(TaskFilters)]
pub fn task_filters(
  props: &TaskFiltersProps
) -> Html {
  let on_status_change = {
    let on_status =
      props.on_status.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let select: web_sys::HtmlSelectElement =
          e.target_unchecked_into();
        match select
          .value()
          .parse::<StatusFilter>()
        {
          | Ok(status) => {
            on_status.emit(status)
          }
          | Err(err) => {
            tracing::warn!(
              error = %err,
              "ignoring unknown status filter"
            )
          }
        }
      }
    )
  };

  let on_search_input = {
    let on_search =
      props.on_search.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        on_search.emit(input.value());
      }
    )
  };

  let current = props.query.status;

  html! {
      <div class="filters">
          <div class="field">
              <label>{ "Status" }</label>
              <select onchange={on_status_change}>
                  {
                      for StatusFilter::ALL.iter().map(|status| html! {
                          <option
                              value={status.as_key()}
                              selected={*status == current}
                          >
                              { status.label() }
                          </option>
                      })
                  }
              </select>
          </div>
          <div class="field">
              <label>{ "Search" }</label>
              <input
                  type="search"
                  value={props.query.search.clone()}
                  placeholder="Search tasks"
                  oninput={on_search_input}
              />
          </div>
      </div>
  }
}
