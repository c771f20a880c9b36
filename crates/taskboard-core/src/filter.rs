use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

use crate::model::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [
        StatusFilter::All,
        StatusFilter::Pending,
        StatusFilter::Completed,
    ];

    pub fn as_key(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Pending => "Pending",
            StatusFilter::Completed => "Completed",
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => !task.completed,
            StatusFilter::Completed => task.completed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for StatusFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        StatusFilter::ALL
            .into_iter()
            .find(|filter| filter.as_key() == key)
            .ok_or_else(|| {
                anyhow!("unknown status filter '{s}', expected all, pending or completed")
            })
    }
}

/// The status filter and free-text search applied over the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskQuery {
    pub status: StatusFilter,
    pub search: String,
}

impl TaskQuery {
    pub fn matches(&self, task: &Task) -> bool {
        if !self.status.matches(task) {
            return false;
        }

        if self.search.is_empty() {
            return true;
        }

        let term = self.search.to_lowercase();
        task.title.to_lowercase().contains(&term)
            || task.description.to_lowercase().contains(&term)
    }

    pub fn is_unfiltered(&self) -> bool {
        self.status == StatusFilter::All && self.search.is_empty()
    }

    /// Hint shown when the visible set is empty.
    pub fn empty_hint(&self) -> String {
        if self.is_unfiltered() {
            return "You don't have any tasks yet. Add one to get started!".to_string();
        }

        let matching = if self.search.is_empty() {
            String::new()
        } else {
            format!(" matching \"{}\"", self.search)
        };
        format!(
            "No {} tasks{matching}. Try changing filters.",
            self.status.as_key()
        )
    }
}

#[tracing::instrument(skip(tasks, query))]
pub fn visible_tasks<'a>(tasks: &'a [Task], query: &TaskQuery) -> Vec<&'a Task> {
    let visible: Vec<&Task> = tasks.iter().filter(|task| query.matches(task)).collect();
    tracing::trace!(
        total = tasks.len(),
        visible = visible.len(),
        status = %query.status,
        "projected visible tasks"
    );
    visible
}

/// Aggregate counts over the unfiltered snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

impl TaskCounts {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total: tasks.len(),
            pending: tasks.len() - completed,
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskId;

    fn task(id: &str, title: &str, description: &str, completed: bool) -> Task {
        Task {
            id: TaskId::from(id),
            title: title.to_string(),
            description: description.to_string(),
            completed,
            created_at: None,
            updated_at: None,
            comments: vec![],
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task("1", "Buy Milk", "from the corner shop", false),
            task("2", "File taxes", "before April", true),
            task("3", "Call mom", "about the MILKshake recipe", true),
            task("4", "Fix bike", "rear brake", false),
        ]
    }

    fn ids(tasks: Vec<&Task>) -> Vec<&str> {
        tasks.into_iter().map(|task| task.id.as_str()).collect()
    }

    #[test]
    fn status_filter_selects_by_completion() {
        let tasks = sample();

        let mut query = TaskQuery::default();
        assert_eq!(ids(visible_tasks(&tasks, &query)), vec!["1", "2", "3", "4"]);

        query.status = StatusFilter::Pending;
        assert_eq!(ids(visible_tasks(&tasks, &query)), vec!["1", "4"]);

        query.status = StatusFilter::Completed;
        assert_eq!(ids(visible_tasks(&tasks, &query)), vec!["2", "3"]);
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let tasks = sample();
        let query = TaskQuery {
            status: StatusFilter::All,
            search: "milk".to_string(),
        };
        assert_eq!(ids(visible_tasks(&tasks, &query)), vec!["1", "3"]);

        let query = TaskQuery {
            status: StatusFilter::Completed,
            search: "MiLk".to_string(),
        };
        assert_eq!(ids(visible_tasks(&tasks, &query)), vec!["3"]);

        let query = TaskQuery {
            status: StatusFilter::All,
            search: "nothing like it".to_string(),
        };
        assert!(visible_tasks(&tasks, &query).is_empty());
    }

    #[test]
    fn counts_ignore_the_active_query() {
        let tasks = sample();
        let counts = TaskCounts::of(&tasks);
        assert_eq!(
            counts,
            TaskCounts {
                total: 4,
                pending: 2,
                completed: 2,
            }
        );

        let narrowed = visible_tasks(
            &tasks,
            &TaskQuery {
                status: StatusFilter::Pending,
                search: "bike".to_string(),
            },
        );
        assert_eq!(narrowed.len(), 1);
        assert_eq!(TaskCounts::of(&tasks), counts);
        assert_eq!(TaskCounts::of(&[]), TaskCounts::default());
    }

    #[test]
    fn parses_filter_keys() {
        assert_eq!(
            "Pending".parse::<StatusFilter>().unwrap(),
            StatusFilter::Pending
        );
        assert_eq!(
            " completed ".parse::<StatusFilter>().unwrap(),
            StatusFilter::Completed
        );
        assert!("done".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn empty_hint_mentions_filter_and_search() {
        assert!(
            TaskQuery::default()
                .empty_hint()
                .starts_with("You don't have any tasks")
        );

        let query = TaskQuery {
            status: StatusFilter::Pending,
            search: "milk".to_string(),
        };
        assert_eq!(
            query.empty_hint(),
            "No pending tasks matching \"milk\". Try changing filters."
        );

        let query = TaskQuery {
            status: StatusFilter::Completed,
            search: String::new(),
        };
        assert_eq!(query.empty_hint(), "No completed tasks. Try changing filters.");
    }
}
