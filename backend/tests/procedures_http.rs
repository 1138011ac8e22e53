//! End-to-end walk through the board procedures over HTTP.
//!
//! A single user registers, logs in, builds a list with items, edits and
//! moves it, then tears it down. A second user checks that ownership is
//! enforced and that tokens expire after an hour.

#[path = "support/rpc.rs"]
mod rpc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::json;

use rpc::{mutate, query, sign_up};
use taskboard::domain::ActorPolicy;
use taskboard::test_support::board::{TestBoard, test_app};

#[fixture]
fn board() -> TestBoard {
    TestBoard::default()
}

#[rstest]
#[actix_web::test]
async fn a_user_builds_and_clears_a_board(board: TestBoard) {
    let app = actix_test::init_service(test_app(board.state.clone())).await;

    let registered = mutate(
        &app,
        "register",
        None,
        json!({ "username": "ann", "password": "secret1", "name": "Ann A" }),
    )
    .await;
    assert_eq!(registered.body["message"], "User registered successfully");

    let login = mutate(
        &app,
        "login",
        None,
        json!({ "username": "ann", "password": "secret1" }),
    )
    .await;
    assert_eq!(login.body["message"], "Login successful");
    let token = login.body["token"].as_str().expect("token").to_owned();
    let ann = login.body["user"]["id"].as_str().expect("id").to_owned();

    let list = mutate(
        &app,
        "createList",
        Some(&token),
        json!({ "userId": ann, "name": "Groceries" }),
    )
    .await;
    assert_eq!(list.body["status"], "TODO");
    let list_id = list.body["id"].clone();

    let milk = mutate(
        &app,
        "addItem",
        Some(&token),
        json!({ "listId": list_id, "userId": ann, "name": "Milk", "description": "2L" }),
    )
    .await;
    assert_eq!(milk.body["description"], "2L");
    let milk_id = milk.body["id"].clone();

    let items = query(&app, &format!("getItems?listId={list_id}"), Some(&token)).await;
    assert_eq!(items.body.as_array().map(Vec::len), Some(1));

    let moved = mutate(
        &app,
        "moveListStatus",
        Some(&token),
        json!({ "listId": list_id, "userId": ann, "status": "IN_PROGRESS" }),
    )
    .await;
    assert_eq!(moved.body["status"], "IN_PROGRESS");

    let edited = mutate(
        &app,
        "editItem",
        Some(&token),
        json!({ "itemId": milk_id, "userId": ann, "name": "Oat milk" }),
    )
    .await;
    assert_eq!(edited.body["item"]["name"], "Oat milk");
    assert_eq!(edited.body["item"]["description"], "2L");

    let lists = query(&app, "getLists", Some(&token)).await;
    assert_eq!(lists.body[0]["status"], "IN_PROGRESS");
    assert_eq!(lists.body[0]["items"][0]["name"], "Oat milk");

    let deleted = mutate(
        &app,
        "deleteList",
        Some(&token),
        json!({ "listId": list_id, "userId": ann }),
    )
    .await;
    assert_eq!(deleted.body, json!({ "message": "List deleted successfully" }));

    let lists = query(&app, "getLists", Some(&token)).await;
    assert_eq!(lists.body, json!([]));

    let logout = mutate(&app, "logout", Some(&token), json!({})).await;
    assert_eq!(logout.body, json!({ "message": "Logout successful" }));
}

#[rstest]
#[actix_web::test]
async fn strangers_cannot_touch_another_users_list() {
    let board = TestBoard::new(ActorPolicy::VerifiedIdentity);
    let app = actix_test::init_service(test_app(board.state.clone())).await;
    let (ann_token, ann) = sign_up(&app, "ann", "secret1", "Ann A").await;
    let (bob_token, bob) = sign_up(&app, "bob", "secret2", "Bob B").await;

    let list = mutate(
        &app,
        "createList",
        Some(&ann_token),
        json!({ "userId": ann, "name": "Groceries" }),
    )
    .await;
    let list_id = list.body["id"].clone();

    for (procedure, body) in [
        ("editList", json!({ "listId": list_id, "userId": bob, "name": "Mine" })),
        ("deleteList", json!({ "listId": list_id, "userId": bob })),
        (
            "moveListStatus",
            json!({ "listId": list_id, "userId": ann, "status": "DONE" }),
        ),
    ] {
        let reply = mutate(&app, procedure, Some(&bob_token), body).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(
            reply.body,
            json!({ "error": "List not found or user does not have permission" }),
            "{procedure}"
        );
    }

    let lists = query(&app, "getLists", Some(&ann_token)).await;
    assert_eq!(lists.body[0]["name"], "Groceries");
    assert_eq!(lists.body[0]["status"], "TODO");
}

#[rstest]
#[actix_web::test]
async fn tokens_stop_working_after_an_hour(board: TestBoard) {
    let app = actix_test::init_service(test_app(board.state.clone())).await;
    let (token, _) = sign_up(&app, "ann", "secret1", "Ann A").await;

    board.clock.advance_seconds(3599);
    let reply = query(&app, "getLists", Some(&token)).await;
    assert_eq!(reply.status, StatusCode::OK);

    board.clock.advance_seconds(1);
    let reply = query(&app, "getLists", Some(&token)).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["message"], "Not authenticated");
}
