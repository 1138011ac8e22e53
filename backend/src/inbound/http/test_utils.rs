//! Helpers shared by the HTTP handler tests.

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test;
use serde_json::{Value, json};

use super::RPC_PREFIX;

/// Token and user id of a logged-in test user.
pub(crate) struct Session {
    pub(crate) token: String,
    pub(crate) user_id: String,
}

fn authorised(request: test::TestRequest, token: Option<&str>) -> test::TestRequest {
    match token {
        Some(token) => request.insert_header((header::AUTHORIZATION, format!("Bearer {token}"))),
        None => request,
    }
}

pub(crate) async fn call<S>(app: &S, request: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(app, request).await;
    let status = response.status();
    let body: Value = test::read_body_json(response).await;
    (status, body)
}

pub(crate) async fn post<S>(
    app: &S,
    procedure: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri(&format!("{RPC_PREFIX}/{procedure}"))
        .set_json(body);
    call(app, authorised(request, token).to_request()).await
}

pub(crate) async fn get<S>(app: &S, target: &str, token: Option<&str>) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::get().uri(&format!("{RPC_PREFIX}/{target}"));
    call(app, authorised(request, token).to_request()).await
}

pub(crate) async fn register_and_login<S>(
    app: &S,
    username: &str,
    password: &str,
    name: &str,
) -> Session
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = post(
        app,
        "register",
        None,
        json!({ "username": username, "password": password, "name": name }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");

    let (status, body) = post(
        app,
        "login",
        None,
        json!({ "username": username, "password": password }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    Session {
        token: body["token"].as_str().expect("token").to_owned(),
        user_id: body["user"]["id"].as_str().expect("user id").to_owned(),
    }
}
