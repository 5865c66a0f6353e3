//! Stateless HTTP request builder and response parser for the task list API.
//!
//! # Design
//! `TaskClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Executing the round-trip is somebody else's job (see `transport`), which
//! keeps this module deterministic and free of I/O.
//!
//! Status policy: any 2xx is success, 404 is `NotFound`, everything else is
//! `Server`. Bodies of bodiless successes (toggle, swap, delete) are ignored.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ListName, SwapOrder, Task, TaskDescription, TaskList};

#[derive(Debug, Clone)]
pub struct TaskClient {
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ------------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------------

    pub fn build_list_all(&self) -> HttpRequest {
        HttpRequest::bodiless(HttpMethod::Get, format!("{}/api/lists", self.base_url))
    }

    pub fn build_create_list(&self, name: &str) -> Result<HttpRequest, ApiError> {
        if name.is_empty() {
            return Err(ApiError::empty("list name"));
        }
        let body = to_json(&ListName {
            name: name.to_string(),
        })?;
        Ok(HttpRequest::json(
            HttpMethod::Post,
            format!("{}/api/lists", self.base_url),
            body,
        ))
    }

    pub fn build_rename_list(&self, id: Uuid, name: &str) -> Result<HttpRequest, ApiError> {
        if name.is_empty() {
            return Err(ApiError::empty("list name"));
        }
        let body = to_json(&ListName {
            name: name.to_string(),
        })?;
        Ok(HttpRequest::json(
            HttpMethod::Patch,
            format!("{}/api/list/{id}", self.base_url),
            body,
        ))
    }

    pub fn build_delete_list(&self, id: Uuid) -> HttpRequest {
        HttpRequest::bodiless(HttpMethod::Delete, format!("{}/api/list/{id}", self.base_url))
    }

    pub fn parse_list_all(&self, response: HttpResponse) -> Result<Vec<TaskList>, ApiError> {
        from_json(response)
    }

    pub fn parse_create_list(&self, response: HttpResponse) -> Result<TaskList, ApiError> {
        from_json(response)
    }

    pub fn parse_rename_list(&self, response: HttpResponse) -> Result<TaskList, ApiError> {
        from_json(response)
    }

    pub fn parse_delete_list(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    pub fn build_list_tasks(&self, list_id: Uuid) -> HttpRequest {
        HttpRequest::bodiless(
            HttpMethod::Get,
            format!("{}/api/list/{list_id}/tasks", self.base_url),
        )
    }

    pub fn build_create_task(&self, list_id: Uuid, description: &str) -> Result<HttpRequest, ApiError> {
        if description.is_empty() {
            return Err(ApiError::empty("task description"));
        }
        let body = to_json(&TaskDescription {
            description: description.to_string(),
        })?;
        Ok(HttpRequest::json(
            HttpMethod::Post,
            format!("{}/api/list/{list_id}/task", self.base_url),
            body,
        ))
    }

    pub fn build_toggle_task(&self, task_id: Uuid) -> HttpRequest {
        HttpRequest::bodiless(
            HttpMethod::Patch,
            format!("{}/api/task/{task_id}/check", self.base_url),
        )
    }

    pub fn build_update_task_description(
        &self,
        task_id: Uuid,
        description: &str,
    ) -> Result<HttpRequest, ApiError> {
        if description.is_empty() {
            return Err(ApiError::empty("task description"));
        }
        let body = to_json(&TaskDescription {
            description: description.to_string(),
        })?;
        Ok(HttpRequest::json(
            HttpMethod::Patch,
            format!("{}/api/task/{task_id}/description", self.base_url),
            body,
        ))
    }

    /// Build the request exchanging the positions of `task_id` and `other_id`.
    ///
    /// No list-membership check happens here.
    pub fn build_swap_task_order(&self, task_id: Uuid, other_id: Uuid) -> Result<HttpRequest, ApiError> {
        let body = to_json(&SwapOrder {
            task_to_swap_id: other_id,
        })?;
        Ok(HttpRequest::json(
            HttpMethod::Patch,
            format!("{}/api/task/{task_id}/swapOrder", self.base_url),
            body,
        ))
    }

    pub fn build_delete_task(&self, task_id: Uuid) -> HttpRequest {
        HttpRequest::bodiless(HttpMethod::Delete, format!("{}/api/task/{task_id}", self.base_url))
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        from_json(response)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        from_json(response)
    }

    /// The server may echo the task back; the body is deliberately ignored.
    pub fn parse_toggle_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_update_task_description(&self, response: HttpResponse) -> Result<Task, ApiError> {
        from_json(response)
    }

    pub fn parse_swap_task_order(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Server {
        status: response.status,
        body: response.body.clone(),
    })
}

fn from_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn to_json<T: Serialize>(payload: &T) -> Result<String, ApiError> {
    serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TaskClient {
        TaskClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_all_produces_correct_request() {
        let req = client().build_list_all();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/lists");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let client = TaskClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(
            client.build_list_all().path,
            "http://localhost:3000/api/lists"
        );
    }

    #[test]
    fn build_create_list_produces_correct_request() {
        let req = client().build_create_list("Home").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/lists");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "name": "Home" }));
    }

    #[test]
    fn build_create_list_rejects_empty_name() {
        let err = client().build_create_list("").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn build_delete_list_uses_singular_path() {
        let req = client().build_delete_list(Uuid::nil());
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(
            req.path,
            "http://localhost:3000/api/list/00000000-0000-0000-0000-000000000000"
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn build_list_tasks_produces_correct_request() {
        let req = client().build_list_tasks(Uuid::nil());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.path,
            "http://localhost:3000/api/list/00000000-0000-0000-0000-000000000000/tasks"
        );
    }

    #[test]
    fn build_create_task_rejects_empty_description() {
        let err = client().build_create_task(Uuid::nil(), "").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn build_toggle_task_has_no_body() {
        let req = client().build_toggle_task(Uuid::nil());
        assert_eq!(req.method, HttpMethod::Patch);
        assert!(req.path.ends_with("/check"));
        assert!(req.body.is_none());
    }

    #[test]
    fn build_swap_task_order_sends_camel_case_field() {
        let a = Uuid::from_u128(10);
        let b = Uuid::from_u128(20);
        let req = client().build_swap_task_order(a, b).unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.path, format!("http://localhost:3000/api/task/{a}/swapOrder"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "taskToSwapId": b.to_string() }));
    }

    #[test]
    fn parse_list_all_leaves_tasks_unloaded() {
        let lists = client()
            .parse_list_all(response(
                200,
                r#"[{"id":"00000000-0000-0000-0000-000000000001","name":"Home"}]"#,
            ))
            .unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].name, "Home");
        assert!(lists[0].tasks.is_empty());
        assert!(!lists[0].loaded);
    }

    #[test]
    fn parse_create_list_accepts_any_2xx() {
        let list = client()
            .parse_create_list(response(
                201,
                r#"{"id":"00000000-0000-0000-0000-000000000002","name":"Work"}"#,
            ))
            .unwrap();
        assert_eq!(list.name, "Work");
    }

    #[test]
    fn parse_list_tasks_keeps_server_order() {
        let tasks = client()
            .parse_list_tasks(response(
                200,
                r#"[
                    {"id":"00000000-0000-0000-0000-000000000014","description":"b","checked":true},
                    {"id":"00000000-0000-0000-0000-00000000000a","description":"a","checked":false}
                ]"#,
            ))
            .unwrap();
        let descriptions: Vec<_> = tasks.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, ["b", "a"]);
        assert!(tasks[0].checked);
    }

    #[test]
    fn parse_toggle_ignores_body() {
        assert!(client()
            .parse_toggle_task(response(200, r#"{"checked":"whatever"}"#))
            .is_ok());
        assert!(client().parse_toggle_task(response(204, "")).is_ok());
    }

    #[test]
    fn parse_delete_list_not_found() {
        let err = client().parse_delete_list(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_swap_server_error() {
        let err = client()
            .parse_swap_task_order(response(500, "boom"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 500, .. }));
    }

    #[test]
    fn parse_list_tasks_bad_json() {
        let err = client().parse_list_tasks(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TaskClient::new("http://localhost:3000/");
        assert_eq!(client.build_list_all().path, "http://localhost:3000/api/lists");
    }
}
