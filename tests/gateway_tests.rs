// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Gateway behavior against a scripted local HTTP stub: the single
//! refresh-and-retry cycle, the error taxonomy, and token persistence.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;

use kakeibo::api::{ApiClient, ApiError};
use kakeibo::models::Profile;
use kakeibo::session::SessionStore;

struct StubResponse {
    status: u16,
    reason: &'static str,
    body: &'static str,
    set_cookie: Option<&'static str>,
}

impl StubResponse {
    fn new(status: u16, reason: &'static str, body: &'static str) -> Self {
        StubResponse {
            status,
            reason,
            body,
            set_cookie: None,
        }
    }

    fn with_cookie(mut self, cookie: &'static str) -> Self {
        self.set_cookie = Some(cookie);
        self
    }
}

#[derive(Debug)]
struct Recorded {
    method: String,
    path: String,
    authorization: String,
    cookie: String,
}

/// Serve the scripted responses in order, one connection per request
/// (responses carry `Connection: close`), recording what arrived.
fn serve(responses: Vec<StubResponse>) -> (String, mpsc::Receiver<Recorded>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for response in responses {
            let Ok((stream, _)) = listener.accept() else {
                return;
            };
            answer(stream, response, &tx);
        }
    });
    (format!("http://{}", addr), rx)
}

fn answer(mut stream: TcpStream, response: StubResponse, tx: &mpsc::Sender<Recorded>) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut authorization = String::new();
    let mut cookie = String::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            match name.to_ascii_lowercase().as_str() {
                "authorization" => authorization = value.trim().to_string(),
                "cookie" => cookie = value.trim().to_string(),
                "content-length" => content_length = value.trim().parse().unwrap_or(0),
                _ => {}
            }
        }
    }
    if content_length > 0 {
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).unwrap();
    }
    tx.send(Recorded {
        method,
        path,
        authorization,
        cookie,
    })
    .unwrap();

    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
        response.status,
        response.reason,
        response.body.len()
    );
    if let Some(c) = response.set_cookie {
        head.push_str(&format!("Set-Cookie: {}\r\n", c));
    }
    head.push_str("\r\n");
    stream.write_all(head.as_bytes()).unwrap();
    stream.write_all(response.body.as_bytes()).unwrap();
    stream.flush().unwrap();
}

const PROFILE_JSON: &str = r#"{"name":"Aki","email":"aki@example.com"}"#;

fn client_with_token(base_url: &str, dir: &tempfile::TempDir, token: &str) -> ApiClient {
    let session = SessionStore::at(dir.path().join("session.json"));
    if !token.is_empty() {
        session.store(token, None).unwrap();
    }
    ApiClient::new(base_url, session).unwrap()
}

#[test]
fn success_returns_parsed_json_with_bearer_header() {
    let (url, rx) = serve(vec![StubResponse::new(200, "OK", PROFILE_JSON)]);
    let dir = tempfile::tempdir().unwrap();
    let client = client_with_token(&url, &dir, "tok-1");

    let profile: Profile = client.get("/profile").unwrap();
    assert_eq!(profile.name, "Aki");

    let recorded: Vec<Recorded> = rx.try_iter().collect();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].method, "GET");
    assert_eq!(recorded[0].path, "/profile");
    assert_eq!(recorded[0].authorization, "Bearer tok-1");
}

#[test]
fn absent_token_is_an_empty_bearer_not_an_error() {
    let (url, rx) = serve(vec![StubResponse::new(200, "OK", PROFILE_JSON)]);
    let dir = tempfile::tempdir().unwrap();
    let client = client_with_token(&url, &dir, "");

    let _: Profile = client.get("/profile").unwrap();

    let recorded: Vec<Recorded> = rx.try_iter().collect();
    assert_eq!(recorded[0].authorization, "Bearer");
}

#[test]
fn a_401_triggers_exactly_one_refresh_and_retry() {
    let (url, rx) = serve(vec![
        StubResponse::new(401, "Unauthorized", r#"{"error":"token expired"}"#),
        StubResponse::new(200, "OK", r#"{"accessToken":"fresh-token"}"#),
        StubResponse::new(200, "OK", PROFILE_JSON),
    ]);
    let dir = tempfile::tempdir().unwrap();
    let client = client_with_token(&url, &dir, "stale-token");

    let profile: Profile = client.get("/profile").unwrap();
    assert_eq!(profile.email, "aki@example.com");

    let recorded: Vec<Recorded> = rx.try_iter().collect();
    assert_eq!(recorded.len(), 3);
    assert_eq!(recorded[0].path, "/profile");
    assert_eq!(recorded[0].authorization, "Bearer stale-token");
    assert_eq!(recorded[1].method, "POST");
    assert_eq!(recorded[1].path, "/refresh_access_token");
    assert_eq!(recorded[2].path, "/profile");
    assert_eq!(recorded[2].authorization, "Bearer fresh-token");

    // The refreshed token is persisted for later invocations.
    assert_eq!(client.session().access_token(), "fresh-token");
}

#[test]
fn a_failed_refresh_is_unauthorized_with_no_third_call() {
    let (url, rx) = serve(vec![
        StubResponse::new(401, "Unauthorized", ""),
        StubResponse::new(500, "Internal Server Error", "refresh broke"),
    ]);
    let dir = tempfile::tempdir().unwrap();
    let client = client_with_token(&url, &dir, "stale-token");

    let err = client.get::<Profile>("/profile").unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));

    let recorded: Vec<Recorded> = rx.try_iter().collect();
    assert_eq!(recorded.len(), 2);
    assert_eq!(client.session().access_token(), "stale-token");
}

#[test]
fn a_401_that_survives_the_refresh_is_unauthorized() {
    let (url, rx) = serve(vec![
        StubResponse::new(401, "Unauthorized", ""),
        StubResponse::new(200, "OK", r#"{"accessToken":"fresh-token"}"#),
        StubResponse::new(401, "Unauthorized", ""),
    ]);
    let dir = tempfile::tempdir().unwrap();
    let client = client_with_token(&url, &dir, "stale-token");

    let err = client.get::<Profile>("/profile").unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));

    let recorded: Vec<Recorded> = rx.try_iter().collect();
    assert_eq!(recorded.len(), 3);
}

#[test]
fn other_failures_carry_status_and_body() {
    let (url, _rx) = serve(vec![StubResponse::new(404, "Not Found", "no such route")]);
    let dir = tempfile::tempdir().unwrap();
    let client = client_with_token(&url, &dir, "tok-1");

    let err = client.get::<Profile>("/profile").unwrap_err();
    match err {
        ApiError::RequestFailed { status, body } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(body, "no such route");
        }
        other => panic!("expected RequestFailed, got {:?}", other),
    }
}

#[test]
fn signin_stores_token_and_refresh_cookie() {
    let (url, rx) = serve(vec![
        StubResponse::new(200, "OK", r#"{"accessToken":"tok-1"}"#)
            .with_cookie("refresh_token=abc; HttpOnly; Path=/"),
        StubResponse::new(200, "OK", PROFILE_JSON),
    ]);
    let dir = tempfile::tempdir().unwrap();
    let session = SessionStore::at(dir.path().join("session.json"));
    let client = ApiClient::new(&url, session).unwrap();

    client
        .signin(&kakeibo::models::SigninRequest {
            email: "aki@example.com".into(),
            password: "hunter2".into(),
        })
        .unwrap();
    assert_eq!(client.session().access_token(), "tok-1");
    assert_eq!(
        client.session().refresh_cookie().as_deref(),
        Some("refresh_token=abc")
    );

    // The stored cookie rides along on subsequent calls.
    let _: Profile = client.get("/profile").unwrap();
    let recorded: Vec<Recorded> = rx.try_iter().collect();
    assert_eq!(recorded[1].cookie, "refresh_token=abc");
}

#[test]
fn delete_discards_the_response_body() {
    let (url, rx) = serve(vec![StubResponse::new(200, "OK", "")]);
    let dir = tempfile::tempdir().unwrap();
    let client = client_with_token(&url, &dir, "tok-1");

    client.delete_transaction("t-9").unwrap();

    let recorded: Vec<Recorded> = rx.try_iter().collect();
    assert_eq!(recorded[0].method, "DELETE");
    assert_eq!(recorded[0].path, "/transactions/t-9");
}
