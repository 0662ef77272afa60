use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};

use workhub_api::app::services::AppServices;
use workhub_infra::{HubConfig, InMemoryHubStore};

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let config = HubConfig::from_lookup(|key| match key {
            "JWT_SECRET" => Some("test-secret".to_string()),
            _ => None,
        })
        .expect("config");
        let services = Arc::new(AppServices::new(Arc::new(InMemoryHubStore::new()), &config));

        // Build app (same router as prod), but bind to an ephemeral port.
        let app = workhub_api::app::build_app(services);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn signup(&self, body: Value) -> reqwest::Response {
        self.client.post(self.url("/signup")).json(&body).send().await.unwrap()
    }

    async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/login"))
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .unwrap()
    }

    async fn token(&self, email: &str, password: &str) -> String {
        let res = self.login(email, password).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        body["access_token"].as_str().unwrap().to_string()
    }

    async fn get(&self, path: &str, token: &str) -> reqwest::Response {
        self.client.get(self.url(path)).bearer_auth(token).send().await.unwrap()
    }

    async fn post(&self, path: &str, token: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn delete(&self, path: &str, token: &str) -> reqwest::Response {
        self.client.delete(self.url(path)).bearer_auth(token).send().await.unwrap()
    }

    /// Owner of a fresh company plus one employee; returns (owner token, employee token, employee id).
    async fn company_with_employee(&self) -> (String, String, String) {
        let res = self
            .signup(json!({
                "email": "boss@acme.test",
                "password": "pw-owner",
                "role": "owner",
                "companyName": "Acme"
            }))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let owner = self.token("boss@acme.test", "pw-owner").await;

        let company: Value = self.get("/api/company", &owner).await.json().await.unwrap();
        let code = company["company_code"].as_str().unwrap().to_ascii_lowercase();

        let res = self
            .signup(json!({
                "email": "worker@acme.test",
                "password": "pw-employee",
                "role": "employee",
                "companyCode": code
            }))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let employee_json: Value = res.json().await.unwrap();
        let employee = self.token("worker@acme.test", "pw-employee").await;

        (owner, employee, employee_json["id"].as_str().unwrap().to_string())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = srv.client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn().await;

    let res = srv.client.get(srv.url("/api/me")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = srv.get("/api/me", "not-a-token").await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signup_login_and_me_round_trip() {
    let srv = TestServer::spawn().await;

    let res = srv
        .signup(json!({
            "email": "  Owner@Example.COM ",
            "password": "secret",
            "role": "owner",
            "companyName": "Example Ltd"
        }))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["email"], "owner@example.com");
    assert_eq!(created["role"], "owner");
    assert!(created.get("hashed_password").is_none());

    let res = srv.login("owner@example.com", "secret").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("set-cookie").is_some());
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["token_type"], "bearer");
    let token = body["access_token"].as_str().unwrap();

    let me: Value = srv.get("/api/me", token).await.json().await.unwrap();
    assert_eq!(me["id"], created["id"]);
    assert_eq!(me["company_id"], created["company_id"]);
}

#[tokio::test]
async fn bad_credentials_are_indistinguishable() {
    let srv = TestServer::spawn().await;
    srv.signup(json!({
        "email": "a@b.test",
        "password": "right",
        "role": "owner",
        "companyName": "AB"
    }))
    .await;

    let wrong_password = srv.login("a@b.test", "wrong").await;
    let unknown_email = srv.login("nobody@b.test", "right").await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let a: Value = wrong_password.json().await.unwrap();
    let b: Value = unknown_email.json().await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn session_cookie_authenticates() {
    let srv = TestServer::spawn().await;
    srv.signup(json!({
        "email": "c@d.test",
        "password": "pw",
        "role": "owner",
        "companyName": "CD"
    }))
    .await;
    let token = srv.token("c@d.test", "pw").await;

    let res = srv
        .client
        .get(srv.url("/api/me"))
        .header("cookie", format!("access_token={token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = srv.client.post(srv.url("/logout")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Logged out");
}

#[tokio::test]
async fn employee_joins_with_lowercase_code_and_is_listed() {
    let srv = TestServer::spawn().await;
    let (owner, employee, employee_id) = srv.company_with_employee().await;

    let list: Value = srv.get("/api/my-employees", &owner).await.json().await.unwrap();
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], employee_id.as_str());

    // Employees see their company but not its join code.
    let company: Value = srv.get("/api/company", &employee).await.json().await.unwrap();
    assert!(company.get("company_code").is_none());

    let res = srv.get("/api/my-employees", &employee).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn employee_is_forbidden_from_owner_actions() {
    let srv = TestServer::spawn().await;
    let (_owner, employee, employee_id) = srv.company_with_employee().await;

    let event = json!({
        "title": "All hands",
        "start_time": "2026-03-01T09:00:00Z",
        "end_time": "2026-03-01T10:00:00Z",
        "calendar_type": "general"
    });
    let res = srv.post("/calendar/general/events", &employee, event).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let income = json!({
        "amount": "120.00",
        "type": "income",
        "category": "Sales",
        "date": "2026-03-01T00:00:00Z"
    });
    let res = srv.post("/api/finance/transactions", &employee, income).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let task = json!({
        "title": "Self-assign",
        "due_date": "2026-03-02T00:00:00Z",
        "assignee_id": employee_id
    });
    let res = srv.post("/api/tasks", &employee, task).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = srv.get("/api/finance/dashboard", &employee).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn personal_events_stay_private() {
    let srv = TestServer::spawn().await;
    let (owner, employee, _) = srv.company_with_employee().await;

    let personal = json!({
        "title": "Dentist",
        "start_time": "2026-03-01T14:00:00Z",
        "end_time": "2026-03-01T15:00:00Z",
        "calendar_type": "personal"
    });
    let res = srv.post("/calendar/general/events", &employee, personal).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let event: Value = res.json().await.unwrap();
    let id = event["id"].as_str().unwrap();

    let feed: Value = srv.get("/calendar/feed", &owner).await.json().await.unwrap();
    assert!(feed["events"].as_array().unwrap().is_empty());

    let res = srv.get(&format!("/events/{id}"), &owner).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = srv.delete(&format!("/events/{id}"), &employee).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn assigned_task_status_flow() {
    let srv = TestServer::spawn().await;
    let (owner, employee, employee_id) = srv.company_with_employee().await;

    let res = srv
        .post(
            "/api/tasks/",
            &owner,
            json!({
                "title": "Stock take",
                "due_date": "2026-03-05T17:00:00Z",
                "assignee_id": employee_id
            }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let task: Value = res.json().await.unwrap();
    assert_eq!(task["status"], "To-Do");
    let id = task["id"].as_str().unwrap();

    let res = srv
        .client
        .put(srv.url(&format!("/api/tasks/{id}")))
        .query(&[("status", "Done")])
        .bearer_auth(&employee)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["status"], "Done");

    let mine: Value = srv.get("/api/tasks", &employee).await.json().await.unwrap();
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let res = srv
        .client
        .put(srv.url("/api/tasks/not-an-id"))
        .query(&[("status", "Done")])
        .bearer_auth(&employee)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn finance_dashboard_and_summary() {
    let srv = TestServer::spawn().await;
    let (owner, employee, _) = srv.company_with_employee().await;

    for (amount, kind, category, date, token) in [
        ("1000.00", "income", "Sales", "2026-02-01T10:00:00Z", &owner),
        ("250.50", "expense", "Rent", "2026-02-03T10:00:00Z", &owner),
        ("49.50", "expense", "Supplies", "2026-02-04T10:00:00Z", &employee),
    ] {
        let res = srv
            .post(
                "/api/finance/transactions",
                token,
                json!({ "amount": amount, "type": kind, "category": category, "date": date }),
            )
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let mine: Value = srv.get("/api/finance/transactions", &employee).await.json().await.unwrap();
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let all: Value = srv.get("/api/finance/transactions", &owner).await.json().await.unwrap();
    assert_eq!(all.as_array().unwrap().len(), 3);

    let dash: Value = srv.get("/api/finance/dashboard", &owner).await.json().await.unwrap();
    assert_eq!(dash["total_income"], "1000.00");
    assert_eq!(dash["total_expense"], "300.00");
    assert_eq!(dash["balance"], "700.00");

    let res = srv
        .get("/api/finance/summary?start_date=2026-02-02&end_date=2026-02-04", &owner)
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = srv
        .get("/api/finance/summary?start_date=2026-02-05&end_date=2026-02-01", &owner)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_amounts_are_bad_requests() {
    let srv = TestServer::spawn().await;
    let (owner, employee, _) = srv.company_with_employee().await;

    for _ in 0..2 {
        let res = srv
            .post(
                "/api/finance/transactions",
                &employee,
                json!({
                    "amount": "50000000000000000000000000000",
                    "type": "expense",
                    "category": "Misc",
                    "date": "2026-02-01T00:00:00Z"
                }),
            )
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    let res = srv.get("/api/finance/dashboard", &owner).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn deleting_a_notebook_removes_its_notes() {
    let srv = TestServer::spawn().await;
    let (owner, employee, _) = srv.company_with_employee().await;

    let res = srv.post("/api/notebooks", &owner, json!({ "name": "Ops" })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let notebook: Value = res.json().await.unwrap();
    let notebook_id = notebook["id"].as_str().unwrap();

    // Notebooks are shared company-wide.
    let res = srv
        .post(
            &format!("/api/notebooks/{notebook_id}/notes"),
            &employee,
            json!({ "title": "Checklist", "content": "- open till" }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let note: Value = res.json().await.unwrap();
    let note_id = note["id"].as_str().unwrap();

    let res = srv
        .client
        .put(srv.url(&format!("/api/notebooks/notes/{note_id}")))
        .bearer_auth(&owner)
        .json(&json!({ "color": "#ffcc00" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["title"], "Checklist");
    assert_eq!(updated["color"], "#ffcc00");

    let res = srv.delete(&format!("/api/notebooks/{notebook_id}"), &owner).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = srv.get(&format!("/api/notebooks/notes/{note_id}"), &owner).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn other_companies_are_invisible() {
    let srv = TestServer::spawn().await;
    let (owner, _, _) = srv.company_with_employee().await;

    srv.signup(json!({
        "email": "rival@other.test",
        "password": "pw",
        "role": "owner",
        "companyName": "Other"
    }))
    .await;
    let rival = srv.token("rival@other.test", "pw").await;

    let notebook: Value = srv
        .post("/api/notebooks", &owner, json!({ "name": "Secrets" }))
        .await
        .json()
        .await
        .unwrap();
    let id = notebook["id"].as_str().unwrap();

    let res = srv.get(&format!("/api/notebooks/{id}"), &rival).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let list: Value = srv.get("/api/notebooks/", &rival).await.json().await.unwrap();
    assert!(list.as_array().unwrap().is_empty());
}
