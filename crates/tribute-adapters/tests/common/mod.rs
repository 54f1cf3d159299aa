#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value};
use tiny_http::{Method, Response, Server, StatusCode};

use tribute_core::{DeceasedInfo, Plan, SignupPayload, Theme, UserInfo};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub body: String,
    pub authorization: Option<String>,
}

pub type CallLog = Arc<Mutex<Vec<RecordedCall>>>;

/// Serves a fixed tribute API on a random port. Handles up to `max_requests` calls.
pub fn spawn_mock_api(max_requests: usize) -> (String, CallLog, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = format!("http://{}", server.server_addr());
    let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&calls);

    let join = thread::spawn(move || {
        for _ in 0..max_requests {
            let mut req = match server.recv() {
                Ok(r) => r,
                Err(_) => break,
            };
            let mut body = String::new();
            let _ = req.as_reader().read_to_string(&mut body);
            let method = req.method().clone();
            let path = req.url().to_owned();
            let authorization = req
                .headers()
                .iter()
                .find(|h| h.field.equiv("Authorization"))
                .map(|h| h.value.as_str().to_owned());
            if let Ok(mut g) = log.lock() {
                g.push(RecordedCall {
                    method: method.to_string(),
                    path: path.clone(),
                    body: body.clone(),
                    authorization,
                });
            }

            let (code, payload) = route(&method, &path, &body);
            let response =
                Response::from_string(payload.to_string()).with_status_code(StatusCode(code));
            let _ = req.respond(response);
        }
    });

    (addr, calls, join)
}

fn route(method: &Method, path: &str, body: &str) -> (u16, Value) {
    match (method, path) {
        (Method::Post, "/auth/register") => {
            let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);
            if parsed.get("email").and_then(Value::as_str) == Some("taken@example.com") {
                (409, json!({ "message": "email already registered" }))
            } else {
                (201, json!({ "redirect": "/dashboard/welcome" }))
            }
        }
        (Method::Post, "/auth/login") => {
            let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);
            if parsed.get("password").and_then(Value::as_str) == Some("secret") {
                (
                    200,
                    json!({
                        "token": "tok-123",
                        "user": {
                            "id": "7",
                            "email": "admin@example.com",
                            "name": "Admin",
                            "role": "admin"
                        }
                    }),
                )
            } else {
                (401, json!({ "message": "invalid credentials" }))
            }
        }
        (Method::Get, "/messages") => (
            200,
            json!([
                {
                    "id": 1,
                    "subject": "Photo upload",
                    "sender_name": "Ana",
                    "sender_email": "ana@example.com",
                    "initial_content": "Gallery will not load",
                    "status": "open",
                    "updated_at": "2024-02-10T09:00:00Z",
                    "date": "2024-02-09"
                },
                {
                    "id": 2,
                    "subject": "Old ticket",
                    "sender_name": "Bo",
                    "sender_email": "bo@example.com",
                    "initial_content": "Thanks!",
                    "status": "archived",
                    "date": "2023-11-01"
                }
            ]),
        ),
        (Method::Patch, "/messages/1/status") => (200, json!({ "ok": true })),
        (Method::Patch, "/messages/404/status") => (404, json!({ "message": "ticket 404" })),
        (Method::Post, "/messages/1/reply") => (201, Value::Null),
        (Method::Post, "/messages/a%2Fb%3Fc%23d/reply") => (201, Value::Null),
        (Method::Post, "/messages/500/reply") => (500, json!({ "error": "store unavailable" })),
        _ => (404, json!({ "error": "not found" })),
    }
}

pub fn sample_payload(email: &str) -> SignupPayload {
    SignupPayload {
        deceased: DeceasedInfo {
            name: "Jane Doe".to_owned(),
            date_of_birth: "1950-01-01".to_owned(),
            date_of_death: "2020-01-01".to_owned(),
            biography: String::new(),
        },
        user: UserInfo {
            first_name: "A".to_owned(),
            last_name: "B".to_owned(),
            email: email.to_owned(),
            phone: "123".to_owned(),
            password: "x".to_owned(),
            confirm_password: "x".to_owned(),
        },
        plan: Plan::Premium,
        theme: Theme::Classic,
    }
}
