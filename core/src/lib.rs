//! Client core for the task list service.
//!
//! # Overview
//! Keeps a session copy of task lists and the selected list's tasks in sync
//! with the remote store, and turns drag gestures into server-side swaps.
//!
//! # Design
//! - `TaskClient` is stateless: it builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network.
//! - `Gateway` executes those requests over a `Transport` (`UreqTransport`
//!   in production, a scripted double in tests).
//! - `ClientState` owns the lists, the selection and the renderer. It is the
//!   only place local state changes; nothing is global.
//! - `ReorderController` converts a drag into one swap plus one reload.
//! - Rendering and prompting are collaborator traits (`view`); the core
//!   never draws or reads input itself.

pub mod actions;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod reorder;
pub mod state;
pub mod transport;
pub mod types;
pub mod view;

#[cfg(test)]
mod testing;

pub use client::TaskClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use gateway::Gateway;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use reorder::{DropNode, DropOutcome, Ignored, ReorderController};
pub use state::{ClientState, PendingTasks, PendingToggle, Refresh};
pub use transport::{Transport, UreqTransport};
pub use types::{Task, TaskList};
pub use view::{NullRender, Prompt, Render};

/// Build a state model talking to `config.base_url` over HTTP.
pub fn connect<R: Render>(config: &ClientConfig, renderer: R) -> ClientState<UreqTransport, R> {
    let gateway = Gateway::new(TaskClient::new(&config.base_url), UreqTransport::new());
    ClientState::new(gateway, renderer)
}
