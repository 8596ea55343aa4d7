//! Drives the reqwest adapter against an in-process fake backend.
//!
//! The fake records every request it receives and answers from a table
//! keyed by method and path, so each test can assert on exactly what went
//! over the wire.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Mutex;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use chrono::NaiveDate;
use frontend::TraceId;
use frontend::domain::ports::{ApiError, AuthApi, EmployeesApi, ProjectsApi, TasksApi};
use frontend::domain::{
    Attachment, EmployeeId, LoginCredentials, NewProject, ProjectFields, ProjectId, ProjectQuery,
    Role, TaskId, TaskStatus, TaskUpdate,
};
use frontend::outbound::http::HttpApiClient;
use serde_json::{Value, json};
use url::Url;

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: String,
    path: String,
    query: String,
    authorization: Option<String>,
    trace_id: Option<String>,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl RecordedRequest {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }

    fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Default)]
struct FakeBackend {
    responses: Mutex<HashMap<(String, String), (u16, String)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeBackend {
    fn respond(&self, method: &str, path: &str, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .expect("responses lock")
            .insert((method.to_owned(), path.to_owned()), (status, body.into()));
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    fn only_request(&self) -> RecordedRequest {
        let mut requests = self.requests();
        assert_eq!(requests.len(), 1, "expected one request, got {requests:?}");
        requests.remove(0)
    }
}

fn header(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

async fn record(
    req: HttpRequest,
    body: web::Bytes,
    backend: web::Data<FakeBackend>,
) -> HttpResponse {
    let method = req.method().to_string();
    let path = req.path().to_owned();
    backend
        .requests
        .lock()
        .expect("requests lock")
        .push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            query: req.query_string().to_owned(),
            authorization: header(&req, "authorization"),
            trace_id: header(&req, TraceId::HEADER_NAME),
            content_type: header(&req, "content-type"),
            body: body.to_vec(),
        });
    let answer = backend
        .responses
        .lock()
        .expect("responses lock")
        .get(&(method, path))
        .cloned();
    let Some((status, payload)) = answer else {
        return HttpResponse::NotFound().finish();
    };
    let status = StatusCode::from_u16(status).expect("valid status");
    if payload.is_empty() {
        return HttpResponse::build(status).finish();
    }
    HttpResponse::build(status)
        .content_type("application/json")
        .body(payload)
}

async fn spawn_backend(backend: web::Data<FakeBackend>) -> (Url, ServerHandle) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr = listener.local_addr().expect("listener address");
    let server = HttpServer::new(move || {
        App::new()
            .app_data(backend.clone())
            .default_service(web::to(record))
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .expect("listen")
    .run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    let base = Url::parse(&format!("http://{addr}/api")).expect("base URL");
    (base, handle)
}

async fn harness() -> (HttpApiClient, web::Data<FakeBackend>, ServerHandle) {
    let backend = web::Data::new(FakeBackend::default());
    let (base, handle) = spawn_backend(backend.clone()).await;
    let client = HttpApiClient::new(base, Duration::from_secs(5), false).expect("client builds");
    (client, backend, handle)
}

fn project_fields() -> ProjectFields {
    ProjectFields {
        name: "Apollo".to_owned(),
        customer_company: "NASA".to_owned(),
        executor_company: "Grumman".to_owned(),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
        end_date: NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date"),
        priority: 2,
        manager_id: EmployeeId::new(2),
    }
}

fn project_json(id: i64) -> Value {
    json!({
        "id": id,
        "name": "Apollo",
        "customerCompany": "NASA",
        "executorCompany": "Grumman",
        "startDate": "2024-01-01T00:00:00",
        "endDate": "2024-12-31T00:00:00",
        "priority": 2,
        "managerId": 2,
        "managerFullName": "Pat Manager",
        "employees": [],
        "tasksCount": 0,
        "documents": [],
    })
}

#[actix_rt::test]
async fn login_posts_credentials_and_decodes_session() {
    let (client, backend, server) = harness().await;
    backend.respond(
        "POST",
        "/api/Auth/login",
        200,
        json!({
            "accessToken": "jwt-token",
            "user": {
                "id": 1,
                "email": "dana@example.com",
                "firstName": "Dana",
                "lastName": "Director",
                "role": "Director",
            },
        })
        .to_string(),
    );

    let credentials =
        LoginCredentials::try_from_parts("dana@example.com", "Secret1!").expect("credentials");
    let session = client.login(&credentials).await.expect("login succeeds");

    assert_eq!(session.token(), "jwt-token");
    assert_eq!(session.user().role, Role::Director);
    let request = backend.only_request();
    assert_eq!(request.method, "POST");
    assert_eq!(
        request.json(),
        json!({"email": "dana@example.com", "password": "Secret1!"})
    );
    assert_eq!(request.authorization, None);
    server.stop(true).await;
}

#[actix_rt::test]
async fn requests_carry_bearer_token_trace_id_and_query() {
    let (client, backend, server) = harness().await;
    backend.respond("GET", "/api/Projects", 200, json!([project_json(1)]).to_string());
    let client = client.with_token(Some("jwt-token"));
    let trace_id = TraceId::generate();
    let query = ProjectQuery {
        priority: Some(2),
        sort_by: Some("name".to_owned()),
        ..ProjectQuery::default()
    };

    let projects = TraceId::scope(trace_id, ProjectsApi::list(&client, &query))
        .await
        .expect("list succeeds");

    assert_eq!(projects.len(), 1);
    let request = backend.only_request();
    assert_eq!(request.authorization.as_deref(), Some("Bearer jwt-token"));
    assert_eq!(request.trace_id, Some(trace_id.to_string()));
    assert_eq!(request.query, "priority=2&sortBy=name");
    server.stop(true).await;
}

#[actix_rt::test]
async fn no_content_update_succeeds() {
    let (client, backend, server) = harness().await;
    backend.respond("PUT", "/api/Tasks/4", 204, "");
    let update = TaskUpdate {
        title: "Write docs".to_owned(),
        comment: String::new(),
        priority: 3,
        status: Some(TaskStatus::Done),
        assignee_id: None,
    };

    TasksApi::update(&client, TaskId::new(4), &update)
        .await
        .expect("update succeeds");

    let body = backend.only_request().json();
    assert_eq!(body["status"], "Done");
    assert!(body.get("assigneeId").is_none());
    server.stop(true).await;
}

#[actix_rt::test]
async fn error_detail_reaches_the_caller() {
    let (client, backend, server) = harness().await;
    backend.respond(
        "GET",
        "/api/Projects/9",
        404,
        json!({"title": "Not Found", "detail": "Project not found"}).to_string(),
    );

    let err = ProjectsApi::get(&client, ProjectId::new(9))
        .await
        .expect_err("missing project");

    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.user_message("Failed to load project."), "Project not found");
    server.stop(true).await;
}

#[actix_rt::test]
async fn unparseable_error_body_becomes_empty_object() {
    let (client, backend, server) = harness().await;
    backend.respond("GET", "/api/Employees", 500, "oops");

    let err = EmployeesApi::list(&client).await.expect_err("server error");

    assert_eq!(err.body(), Some(&json!({})));
    assert_eq!(err.to_string(), "API Error: 500 Internal Server Error");
    server.stop(true).await;
}

#[actix_rt::test]
async fn unreachable_backend_is_a_transport_error() {
    let (client, _backend, server) = harness().await;
    server.stop(true).await;

    let err = EmployeesApi::list(&client).await.expect_err("no server");
    assert!(matches!(err, ApiError::Transport { .. }));
}

#[actix_rt::test]
async fn project_without_files_is_sent_as_json() {
    let (client, backend, server) = harness().await;
    backend.respond("POST", "/api/Projects", 201, project_json(5).to_string());
    let project = NewProject {
        fields: project_fields(),
        employee_ids: vec![EmployeeId::new(4), EmployeeId::new(7)],
        files: Vec::new(),
    };

    let created = ProjectsApi::create(&client, &project).await.expect("created");

    assert_eq!(created.id, ProjectId::new(5));
    let request = backend.only_request();
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    let body = request.json();
    assert_eq!(body["employeeIds"], json!([4, 7]));
    assert_eq!(body["startDate"], "2024-01-01T00:00:00.000Z");
    server.stop(true).await;
}

#[actix_rt::test]
async fn project_with_files_is_sent_as_multipart() {
    let (client, backend, server) = harness().await;
    backend.respond("POST", "/api/Projects", 201, project_json(6).to_string());
    let project = NewProject {
        fields: project_fields(),
        employee_ids: vec![EmployeeId::new(4), EmployeeId::new(7)],
        files: vec![Attachment {
            file_name: "brief.txt".to_owned(),
            bytes: b"mission brief".to_vec(),
        }],
    };

    ProjectsApi::create(&client, &project).await.expect("created");

    let request = backend.only_request();
    assert!(
        request
            .content_type
            .as_deref()
            .is_some_and(|value| value.starts_with("multipart/form-data"))
    );
    let text = request.text();
    assert_eq!(text.matches("name=\"employeeIds\"").count(), 2);
    assert!(text.contains("name=\"customerCompany\""));
    assert!(text.contains("filename=\"brief.txt\""));
    assert!(text.contains("mission brief"));
    server.stop(true).await;
}

#[actix_rt::test]
async fn roster_removal_sends_ids_in_delete_body() {
    let (client, backend, server) = harness().await;
    backend.respond("DELETE", "/api/Projects/3/employees", 204, "");

    client
        .remove_employees(ProjectId::new(3), &[EmployeeId::new(2)])
        .await
        .expect("removed");

    let request = backend.only_request();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.json(), json!({"employeeIds": [2]}));
    server.stop(true).await;
}

#[actix_rt::test]
async fn project_roster_decodes_developer_role() {
    let (client, backend, server) = harness().await;
    backend.respond(
        "GET",
        "/api/Employees/project/3",
        200,
        json!([{"id": 4, "fullName": "Ada Lovelace", "role": "Developer"}]).to_string(),
    );

    let roster = EmployeesApi::list_for_project(&client, ProjectId::new(3))
        .await
        .expect("roster");

    assert_eq!(roster.len(), 1);
    assert_eq!(roster.first().map(|member| member.role), Some(Role::Employee));
    server.stop(true).await;
}
