//! Stateless request builder and response parser for the projects API.
//!
//! # Design
//! `ProjectsClient` holds only the projects endpoint URL and the API token.
//! Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Nothing here performs I/O; `ProjectsService` pairs the two halves with a
//! `Transport`.

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::ServiceConfig;
use crate::error::{ApiError, Result, DEFAULT_NOT_FOUND_DETAIL};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Page, Project};

const PROJECTS_PATH: &str = "/api/projects/";

/// Request builder / response parser for `/api/projects/`.
#[derive(Debug, Clone)]
pub struct ProjectsClient {
    endpoint: String,
    token: String,
}

impl ProjectsClient {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            endpoint: format!("{}{PROJECTS_PATH}", config.host()),
            token: config.token().to_string(),
        }
    }

    /// Absolute URL of the projects collection.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_create(&self, name: &str, description: &str) -> HttpRequest {
        self.json_request(HttpMethod::Post, self.endpoint.clone(), name, description)
    }

    pub fn build_get(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Get, self.project_url(id), None)
    }

    pub fn build_update(&self, id: u64, name: &str, description: &str) -> HttpRequest {
        self.json_request(HttpMethod::Patch, self.project_url(id), name, description)
    }

    pub fn build_delete(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Delete, self.project_url(id), None)
    }

    pub fn build_list(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.endpoint.clone(), None)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Project> {
        check_status(&response, 200)?;
        Project::from_json(&response.body)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Project> {
        check_status(&response, 200)?;
        Project::from_json(&response.body)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Project> {
        check_status(&response, 200)?;
        Project::from_json(&response.body)
    }

    /// `true` only for 204; every other status is an error.
    pub fn parse_delete(&self, response: HttpResponse) -> Result<bool> {
        check_status(&response, 204)?;
        Ok(true)
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Project>> {
        check_status(&response, 200)?;
        let page: Page<Project> = decode(&response.body)?;
        Ok(page.results)
    }

    fn project_url(&self, id: u64) -> String {
        format!("{}{id}/", self.endpoint)
    }

    fn json_request(
        &self,
        method: HttpMethod,
        url: String,
        name: &str,
        description: &str,
    ) -> HttpRequest {
        // A `Value` built from strings always renders.
        let body = json!({ "name": name, "description": description }).to_string();
        self.request(method, url, Some(body))
    }

    fn request(&self, method: HttpMethod, url: String, body: Option<String>) -> HttpRequest {
        let mut headers = vec![
            ("accept".to_string(), "application/json".to_string()),
            ("authorization".to_string(), format!("JWT {}", self.token)),
        ];
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }
}

/// Map a status other than `expected` to the matching `ApiError`.
fn check_status(response: &HttpResponse, expected: u16) -> Result<()> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound {
            detail: not_found_detail(&response.body),
        });
    }
    Err(ApiError::UnexpectedStatus {
        status: response.status,
        body: response.body.clone(),
    })
}

fn not_found_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| DEFAULT_NOT_FOUND_DETAIL.to_string())
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ProjectsClient {
        ProjectsClient::new(&ServiceConfig::new("http://localhost:8000", "123456").unwrap())
    }

    fn project_json(name: &str, description: &str) -> serde_json::Value {
        json!({
            "id": 1,
            "tasks": [7, 6, 5],
            "created_at": "2016-12-07T02:09:28.515319Z",
            "name": name,
            "description": description,
            "permissions": ["delete", "change", "add", "view"]
        })
    }

    fn not_found() -> HttpResponse {
        HttpResponse::new(404, r#"{"detail":"Not Found."}"#)
    }

    #[test]
    fn build_list_produces_correct_request() {
        let req = client().build_list();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8000/api/projects/");
        assert!(req.body.is_none());
        assert_eq!(req.header("authorization"), Some("JWT 123456"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn build_get_targets_project_url() {
        let req = client().build_get(42);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8000/api/projects/42/");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_produces_correct_request() {
        let req = client().build_create("Project One", "Test description");
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:8000/api/projects/");
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"name": "Project One", "description": "Test description"}));
    }

    #[test]
    fn build_update_sends_both_fields() {
        let req = client().build_update(1, "Project Two", "");
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.url, "http://localhost:8000/api/projects/1/");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"name": "Project Two", "description": ""}));
    }

    #[test]
    fn build_create_escapes_text() {
        let name = "Quote \" and \\ backslash";
        let description = "line one\nline two \u{1F6F0}";
        let req = client().build_create(name, description);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], name);
        assert_eq!(body["description"], description);
    }

    #[test]
    fn build_delete_produces_correct_request() {
        let req = client().build_delete(1);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:8000/api/projects/1/");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_create_success() {
        let body = project_json("Project One", "Test description");
        let project = client()
            .parse_create(HttpResponse::new(200, body.to_string()))
            .unwrap();
        assert_eq!(project, Project::from_value(body).unwrap());
    }

    #[test]
    fn parse_create_rejects_201() {
        let body = project_json("Project One", "");
        let err = client()
            .parse_create(HttpResponse::new(201, body.to_string()))
            .unwrap_err();
        assert_eq!(err.to_string(), "Unexpected status code: 201");
    }

    #[test]
    fn parse_get_not_found_uses_detail() {
        let err = client().parse_get(not_found()).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "404 - Not Found.");
    }

    #[test]
    fn not_found_without_detail_falls_back() {
        for body in ["", "<h1>Not Found</h1>", "{}", r#"{"detail": 3}"#] {
            let err = client().parse_get(HttpResponse::new(404, body)).unwrap_err();
            assert_eq!(err.to_string(), "404 - Not found.", "body: {body:?}");
        }
    }

    #[test]
    fn parse_get_bad_json() {
        let err = client()
            .parse_get(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_update_returns_server_representation() {
        let body = project_json("Project Two", "Test description edited");
        let project = client()
            .parse_update(HttpResponse::new(200, body.to_string()))
            .unwrap();
        assert_eq!(project.name(), "Project Two");
        assert_eq!(project.description(), "Test description edited");
    }

    #[test]
    fn parse_update_server_error() {
        let err = client()
            .parse_update(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedStatus { status: 500, ref body } if body == "internal error"));
    }

    #[test]
    fn parse_delete_success() {
        assert!(client().parse_delete(HttpResponse::new(204, "")).unwrap());
    }

    #[test]
    fn parse_delete_only_accepts_204() {
        for status in [200, 202, 300, 500] {
            let err = client()
                .parse_delete(HttpResponse::new(status, "{}"))
                .unwrap_err();
            assert_eq!(err.to_string(), format!("Unexpected status code: {status}"));
        }
    }

    #[test]
    fn parse_delete_not_found() {
        let err = client().parse_delete(not_found()).unwrap_err();
        assert_eq!(err.to_string(), "404 - Not Found.");
    }

    #[test]
    fn parse_list_returns_first_page_in_order() {
        let first = project_json("B", "");
        let mut second = project_json("A", "");
        second["id"] = json!(2);
        let body = json!({
            "count": 3,
            "next": "http://localhost:8000/api/projects/?page=2",
            "previous": null,
            "results": [first.clone(), second.clone()]
        });
        let projects = client()
            .parse_list(HttpResponse::new(200, body.to_string()))
            .unwrap();
        assert_eq!(
            projects,
            vec![Project::from_value(first).unwrap(), Project::from_value(second).unwrap()]
        );
    }

    #[test]
    fn parse_list_accepts_results_without_metadata() {
        let project = project_json("Test", "");
        for body in [
            json!({ "results": [project.clone()] }),
            json!({ "count": null, "results": [project.clone()] }),
        ] {
            let projects = client()
                .parse_list(HttpResponse::new(200, body.to_string()))
                .unwrap();
            assert_eq!(projects, vec![Project::from_value(project.clone()).unwrap()]);
        }
    }

    #[test]
    fn parse_list_requires_envelope() {
        let body = json!([project_json("Test", "")]);
        let err = client()
            .parse_list(HttpResponse::new(200, body.to_string()))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_list_not_found() {
        let err = client().parse_list(not_found()).unwrap_err();
        assert_eq!(err.to_string(), "404 - Not Found.");
    }

    #[test]
    fn trailing_slash_on_host_is_stripped() {
        let config = ServiceConfig::new("http://localhost:8000/", "t").unwrap();
        let client = ProjectsClient::new(&config);
        assert_eq!(client.build_list().url, "http://localhost:8000/api/projects/");
    }
}
