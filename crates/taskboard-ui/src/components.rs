mod comment_panel;
mod empty_state;
mod stats_bar;
mod task_filters;
mod task_form;
mod task_list;
mod task_list_row;

pub use comment_panel::CommentPanel;
pub use empty_state::EmptyState;
pub use stats_bar::StatsBar;
pub use task_filters::TaskFilters;
pub use task_form::TaskForm;
pub use task_list::TaskList;
pub use task_list_row::{
  TaskListRow,
  row_element_id
};
use yew::{
  Html,
  function_component,
  html
};

#[function_component(LoadingIndicator)]
pub fn loading_indicator() -> Html {
  html! {
      <div class="loading">{ "Loading tasks..." }</div>
  }
}
