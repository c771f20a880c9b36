use taskboard_core::filter::TaskCounts;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StatsBarProps {
  pub counts:             TaskCounts,
  pub on_clear_completed:
    Callback<MouseEvent>
}

/// Aggregate counts over the whole snapshot, independent of the
/// active filter.
#[function_component(StatsBar)]
pub fn stats_bar(
  props: &StatsBarProps
) -> Html {
  let counts = props.counts;

  html! {
      <div class="stats">
          <span class="badge">{ format!("Total: {}", counts.total) }</span>
          <span class="badge">{ format!("Pending: {}", counts.pending) }</span>
          <span class="badge">{ format!("Completed: {}", counts.completed) }</span>
          {
              if counts.completed > 0 {
                  html! {
                      <button class="btn danger" onclick={props.on_clear_completed.clone()}>
                          { "Clear Completed" }
                      </button>
                  }
              } else {
                  html! {}
              }
          }
      </div>
  }
}
