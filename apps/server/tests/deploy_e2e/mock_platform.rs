//! Mock GitHub + Vercel API for E2E tests.
//!
//! Starts an in-process HTTP server answering the handful of REST endpoints
//! the deployer calls, records every call, and lets tests inject failures.

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, get, post, web};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

/// GitHub token the mock accepts.
pub const GITHUB_TOKEN: &str = "gh-good";
/// Vercel token the mock accepts.
pub const VERCEL_TOKEN: &str = "vc-good";

/// Shared state for the mock platform.
#[derive(Default)]
pub struct MockPlatformState {
    /// Repositories by full name.
    pub repos: HashMap<String, Value>,
    /// Vercel projects by name.
    pub projects: HashMap<String, Value>,
    /// Deployment `readyState` by deployment id.
    pub deployments: HashMap<String, String>,
    /// "METHOD path" of every call received.
    pub calls: Vec<String>,
    /// Bodies posted to the project creation endpoint.
    pub created_projects: Vec<Value>,
    /// Bodies posted to the deployment creation endpoint.
    pub created_deployments: Vec<Value>,
    /// Status and message returned for every repository lookup.
    pub repository_failure: Option<(u16, String)>,
    /// Answer project lookups with a 500.
    pub fail_project_lookup: bool,
    /// Reject project creation with a 400.
    pub fail_project_create: bool,
    /// Reject deployment creation with a 400.
    pub fail_deployment_trigger: bool,
    next_deployment: u32,
}

type SharedState = web::Data<Arc<Mutex<MockPlatformState>>>;

fn record(state: &SharedState, req: &HttpRequest) {
    state
        .lock()
        .unwrap()
        .calls
        .push(format!("{} {}", req.method(), req.path()));
}

fn bearer_is(req: &HttpRequest, expected: &str) -> bool {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", expected))
}

fn vercel_error(status: u16, code: &str, message: &str) -> HttpResponse {
    HttpResponse::build(actix_web::http::StatusCode::from_u16(status).unwrap())
        .json(json!({ "error": { "code": code, "message": message } }))
}

#[get("/repos/{owner}/{repo}")]
async fn get_repository(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    state: SharedState,
) -> HttpResponse {
    record(&state, &req);
    if !bearer_is(&req, GITHUB_TOKEN) {
        return HttpResponse::Unauthorized().json(json!({ "message": "Bad credentials" }));
    }

    let (owner, repo) = path.into_inner();
    let state = state.lock().unwrap();
    if let Some((status, message)) = &state.repository_failure {
        return HttpResponse::build(actix_web::http::StatusCode::from_u16(*status).unwrap())
            .json(json!({ "message": message }));
    }
    match state.repos.get(&format!("{}/{}", owner, repo)) {
        Some(body) => HttpResponse::Ok().json(body),
        None => HttpResponse::NotFound().json(json!({ "message": "Not Found" })),
    }
}

#[get("/v9/projects/{name}")]
async fn get_project(req: HttpRequest, path: web::Path<String>, state: SharedState) -> HttpResponse {
    record(&state, &req);
    if !bearer_is(&req, VERCEL_TOKEN) {
        return vercel_error(403, "forbidden", "Not authorized");
    }

    let state = state.lock().unwrap();
    if state.fail_project_lookup {
        return vercel_error(500, "internal_server_error", "Lookup unavailable");
    }
    match state.projects.get(&path.into_inner()) {
        Some(project) => HttpResponse::Ok().json(project),
        None => vercel_error(404, "not_found", "Project not found"),
    }
}

#[post("/v10/projects")]
async fn create_project(req: HttpRequest, body: web::Json<Value>, state: SharedState) -> HttpResponse {
    record(&state, &req);
    if !bearer_is(&req, VERCEL_TOKEN) {
        return vercel_error(403, "forbidden", "Not authorized");
    }

    if state.lock().unwrap().fail_project_create {
        return vercel_error(400, "bad_request", "Project name is already taken");
    }

    let body = body.into_inner();
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let project = json!({
        "id": format!("prj_{}", name),
        "name": name,
        "accountId": "team_mock",
        "createdAt": 1_700_000_000_000_i64,
        "updatedAt": 1_700_000_000_000_i64
    });

    let mut state = state.lock().unwrap();
    state.created_projects.push(body);
    state.projects.insert(name, project.clone());
    HttpResponse::Ok().json(project)
}

#[post("/v13/deployments")]
async fn create_deployment(
    req: HttpRequest,
    body: web::Json<Value>,
    state: SharedState,
) -> HttpResponse {
    record(&state, &req);
    if !bearer_is(&req, VERCEL_TOKEN) {
        return vercel_error(403, "forbidden", "Not authorized");
    }

    let mut state = state.lock().unwrap();
    if state.fail_deployment_trigger {
        return vercel_error(400, "bad_request", "Git repository is not connected");
    }

    let body = body.into_inner();
    state.next_deployment += 1;
    let id = format!("dpl_mock{}", state.next_deployment);
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let project_id = body["project"].as_str().unwrap_or_default().to_string();
    state.created_deployments.push(body);
    state.deployments.insert(id.clone(), "QUEUED".to_string());

    HttpResponse::Ok().json(deployment_json(&id, &name, &project_id, "QUEUED"))
}

#[get("/v13/deployments/{id}")]
async fn get_deployment(req: HttpRequest, path: web::Path<String>, state: SharedState) -> HttpResponse {
    record(&state, &req);
    if !bearer_is(&req, VERCEL_TOKEN) {
        return vercel_error(403, "forbidden", "Not authorized");
    }

    let id = path.into_inner();
    let state = state.lock().unwrap();
    match state.deployments.get(&id) {
        Some(ready_state) => {
            HttpResponse::Ok().json(deployment_json(&id, "acme-site", "prj_acme-site", ready_state))
        }
        None => vercel_error(404, "not_found", "Deployment not found"),
    }
}

fn deployment_json(id: &str, name: &str, project_id: &str, ready_state: &str) -> Value {
    json!({
        "id": id,
        "url": format!("{}-abc123.vercel.app", name),
        "name": name,
        "readyState": ready_state,
        "status": ready_state,
        "createdAt": 1_700_000_000_000_i64,
        "projectId": project_id,
        "inspectorUrl": format!("https://vercel.com/mock/{}/{}", name, id)
    })
}

/// GitHub repository payload as returned by `GET /repos/{owner}/{repo}`.
pub fn repository_json(owner: &str, name: &str, id: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "full_name": format!("{}/{}", owner, name),
        "private": false,
        "default_branch": "main",
        "owner": { "login": owner }
    })
}

/// Mock GitHub + Vercel API server.
pub struct MockPlatform {
    pub base_url: String,
    pub state: Arc<Mutex<MockPlatformState>>,
}

impl MockPlatform {
    /// Start the mock on an ephemeral port with `acme/site` registered.
    pub async fn start() -> Self {
        let mut initial = MockPlatformState::default();
        initial
            .repos
            .insert("acme/site".to_string(), repository_json("acme", "site", 4242));
        let state = Arc::new(Mutex::new(initial));

        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind");
        let port = listener.local_addr().unwrap().port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let state_data = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state_data.clone()))
                .service(get_repository)
                .service(get_project)
                .service(create_project)
                .service(create_deployment)
                .service(get_deployment)
        })
        .workers(1)
        .listen(listener)
        .expect("failed to listen")
        .disable_signals()
        .run();

        // Fire and forget; the server lives until the test's runtime stops
        tokio::spawn(server);

        MockPlatform { base_url, state }
    }

    /// Register an existing Vercel project.
    pub fn add_project(&self, name: &str, id: &str) {
        self.state.lock().unwrap().projects.insert(
            name.to_string(),
            json!({ "id": id, "name": name, "accountId": "team_mock" }),
        );
    }

    /// Register a deployment in the given state.
    pub fn set_deployment_state(&self, id: &str, ready_state: &str) {
        self.state
            .lock()
            .unwrap()
            .deployments
            .insert(id.to_string(), ready_state.to_string());
    }

    /// Answer repository lookups with `status` and GitHub's `message`.
    pub fn fail_repository_lookup(&self, status: u16, message: &str) {
        self.state.lock().unwrap().repository_failure = Some((status, message.to_string()));
    }

    pub fn fail_project_create(&self) {
        self.state.lock().unwrap().fail_project_create = true;
    }

    pub fn fail_project_lookup(&self) {
        self.state.lock().unwrap().fail_project_lookup = true;
    }

    pub fn fail_deployment_trigger(&self) {
        self.state.lock().unwrap().fail_deployment_trigger = true;
    }

    /// Calls received so far, as "METHOD path".
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn created_projects(&self) -> Vec<Value> {
        self.state.lock().unwrap().created_projects.clone()
    }

    pub fn created_deployments(&self) -> Vec<Value> {
        self.state.lock().unwrap().created_deployments.clone()
    }
}
