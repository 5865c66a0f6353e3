//! Remote store gateway: `TaskClient` requests executed over a `Transport`.
//!
//! Every operation returns a typed value or an `ApiError`; nothing is retried.
//! The gateway does not guard against swapping tasks of different lists.

use uuid::Uuid;

use crate::client::TaskClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Task, TaskList};

pub struct Gateway<T> {
    client: TaskClient,
    transport: T,
}

impl<T: Transport> Gateway<T> {
    pub fn new(client: TaskClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TaskClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.transport.execute(request)
    }

    pub fn list_all(&self) -> Result<Vec<TaskList>, ApiError> {
        let response = self.execute(&self.client.build_list_all())?;
        self.client.parse_list_all(response)
    }

    pub fn create_list(&self, name: &str) -> Result<TaskList, ApiError> {
        let response = self.execute(&self.client.build_create_list(name)?)?;
        self.client.parse_create_list(response)
    }

    pub fn rename_list(&self, id: Uuid, name: &str) -> Result<TaskList, ApiError> {
        let response = self.execute(&self.client.build_rename_list(id, name)?)?;
        self.client.parse_rename_list(response)
    }

    pub fn delete_list(&self, id: Uuid) -> Result<(), ApiError> {
        let response = self.execute(&self.client.build_delete_list(id))?;
        self.client.parse_delete_list(response)
    }

    pub fn list_tasks(&self, list_id: Uuid) -> Result<Vec<Task>, ApiError> {
        let response = self.execute(&self.client.build_list_tasks(list_id))?;
        self.client.parse_list_tasks(response)
    }

    pub fn create_task(&self, list_id: Uuid, description: &str) -> Result<Task, ApiError> {
        let response = self.execute(&self.client.build_create_task(list_id, description)?)?;
        self.client.parse_create_task(response)
    }

    pub fn toggle_task(&self, task_id: Uuid) -> Result<(), ApiError> {
        let response = self.execute(&self.client.build_toggle_task(task_id))?;
        self.client.parse_toggle_task(response)
    }

    pub fn update_task_description(&self, task_id: Uuid, description: &str) -> Result<Task, ApiError> {
        let request = self.client.build_update_task_description(task_id, description)?;
        let response = self.execute(&request)?;
        self.client.parse_update_task_description(response)
    }

    pub fn swap_task_order(&self, task_id: Uuid, other_id: Uuid) -> Result<(), ApiError> {
        let response = self.execute(&self.client.build_swap_task_order(task_id, other_id)?)?;
        self.client.parse_swap_task_order(response)
    }

    pub fn delete_task(&self, task_id: Uuid) -> Result<(), ApiError> {
        let response = self.execute(&self.client.build_delete_task(task_id))?;
        self.client.parse_delete_task(response)
    }
}
