use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
  pub hint: String
}

#[function_component(EmptyState)]
pub fn empty_state(
  props: &EmptyStateProps
) -> Html {
  html! {
      <div class="empty">
          <div class="header">{ "No tasks found" }</div>
          <div>{ props.hint.clone() }</div>
      </div>
  }
}
