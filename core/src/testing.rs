//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::{json, Value};
use uuid::Uuid;

use crate::client::TaskClient;
use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::state::ClientState;
use crate::transport::Transport;
use crate::types::TaskList;
use crate::view::{Prompt, Render};

pub const BASE_URL: &str = "http://tasks.test";

/// Replays queued responses in order and records every request it sees.
/// An exhausted queue answers with a network error.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn respond(&self, status: u16, body: Value) {
        let body = if body.is_null() {
            String::new()
        } else {
            body.to_string()
        };
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        }));
    }

    pub fn respond_empty(&self, status: u16) {
        self.respond(status, Value::Null);
    }

    pub fn fail_network(&self) {
        self.responses
            .borrow_mut()
            .push_back(Err(ApiError::Network("connection refused".to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// `(method, path without base url)` of every recorded request.
    pub fn calls(&self) -> Vec<(HttpMethod, String)> {
        self.requests
            .borrow()
            .iter()
            .map(|r| (r.method, r.path.trim_start_matches(BASE_URL).to_string()))
            .collect()
    }

    pub fn clear(&self) {
        self.requests.borrow_mut().clear();
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_string())))
    }
}

/// Counts renders and keeps the last projection of each view.
#[derive(Default)]
pub struct RecordingRender {
    pub list_renders: usize,
    pub task_renders: usize,
    pub last_lists: Vec<String>,
    pub last_selected: Option<Uuid>,
    pub last_tasks: Option<Vec<(String, bool)>>,
}

impl Render for RecordingRender {
    fn render_lists(&mut self, lists: &[TaskList], selected: Option<Uuid>) {
        self.list_renders += 1;
        self.last_lists = lists.iter().map(|l| l.name.clone()).collect();
        self.last_selected = selected;
    }

    fn render_tasks(&mut self, list: Option<&TaskList>) {
        self.task_renders += 1;
        self.last_tasks = list.map(|l| {
            l.tasks
                .iter()
                .map(|t| (t.description.clone(), t.checked))
                .collect()
        });
    }
}

/// Answers prompts from a queue; an exhausted queue cancels.
#[derive(Default)]
pub struct ScriptedPrompt {
    pub answers: VecDeque<Option<String>>,
    pub confirmations: VecDeque<bool>,
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn answering(answer: &str) -> Self {
        Self {
            answers: VecDeque::from([Some(answer.to_string())]),
            ..Self::default()
        }
    }

    pub fn confirming(confirm: bool) -> Self {
        Self {
            confirmations: VecDeque::from([confirm]),
            ..Self::default()
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, message: &str) -> Option<String> {
        self.asked.push(message.to_string());
        self.answers.pop_front().flatten()
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.confirmations.pop_front().unwrap_or(false)
    }
}

pub type TestState = ClientState<ScriptedTransport, RecordingRender>;

pub fn state() -> TestState {
    ClientState::new(
        Gateway::new(TaskClient::new(BASE_URL), ScriptedTransport::default()),
        RecordingRender::default(),
    )
}

pub fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn list_json(n: u128, name: &str) -> Value {
    json!({ "id": id(n), "name": name })
}

pub fn task_json(n: u128, description: &str, checked: bool) -> Value {
    json!({ "id": id(n), "description": description, "checked": checked })
}

/// A state with lists `[1 "Home", 2 "Work"]`, list 1 selected and loaded
/// with the given tasks. The transport's request log is cleared.
pub fn loaded_state(tasks: Value) -> TestState {
    let mut s = state();
    s.gateway()
        .transport()
        .respond(200, json!([list_json(1, "Home"), list_json(2, "Work")]));
    s.gateway().transport().respond(200, tasks);
    s.load_lists().unwrap();
    s.gateway().transport().clear();
    s
}
