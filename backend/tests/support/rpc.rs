//! Request helpers for driving the procedure endpoints in-process.

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test;
use serde_json::{Value, json};

use taskboard::inbound::http::RPC_PREFIX;

/// Status and decoded JSON body of one call.
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

fn authorised(request: test::TestRequest, token: Option<&str>) -> test::TestRequest {
    match token {
        Some(token) => request.insert_header((header::AUTHORIZATION, format!("Bearer {token}"))),
        None => request,
    }
}

async fn send<S>(app: &S, request: Request) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(app, request).await;
    let status = response.status();
    let body = test::read_body_json(response).await;
    Reply { status, body }
}

/// Call a mutating procedure.
pub async fn mutate<S>(app: &S, procedure: &str, token: Option<&str>, body: Value) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri(&format!("{RPC_PREFIX}/{procedure}"))
        .set_json(body);
    send(app, authorised(request, token).to_request()).await
}

/// Call a query procedure; `target` may carry a query string.
pub async fn query<S>(app: &S, target: &str, token: Option<&str>) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::get().uri(&format!("{RPC_PREFIX}/{target}"));
    send(app, authorised(request, token).to_request()).await
}

/// Register then log in, returning `(token, user id)`.
pub async fn sign_up<S>(app: &S, username: &str, password: &str, name: &str) -> (String, String)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let registered = mutate(
        app,
        "register",
        None,
        json!({ "username": username, "password": password, "name": name }),
    )
    .await;
    assert_eq!(registered.status, StatusCode::OK, "{}", registered.body);

    let logged_in = mutate(
        app,
        "login",
        None,
        json!({ "username": username, "password": password }),
    )
    .await;
    let token = logged_in.body["token"].as_str().expect("token").to_owned();
    let user_id = logged_in.body["user"]["id"]
        .as_str()
        .expect("user id")
        .to_owned();
    (token, user_id)
}
