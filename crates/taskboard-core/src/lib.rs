pub mod api;
pub mod board;
pub mod comments;
pub mod config;
pub mod datetime;
pub mod editor;
pub mod filter;
pub mod model;

pub use api::{HttpTaskApi, TaskApi};
pub use board::{LoadState, RefreshGate, TaskBoard};
pub use config::BackendConfig;
pub use model::{Comment, CommentId, Task, TaskId};
