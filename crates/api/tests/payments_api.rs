//! HTTP-level integration tests for the payment history listing.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, mint_token, post_json};
use sqlx::PgPool;

async fn pay_for_new_parcel(pool: &PgPool, payer: &str, transaction_id: &str) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/parcels",
        serde_json::json!({ "title": "Paid parcel", "email": payer }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/payments",
        serde_json::json!({
            "parcelId": id,
            "email": payer,
            "amount": 99.0,
            "paymentMethod": "card",
            "transactionId": transaction_id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn history_is_admin_only_and_scoped_to_the_callers_email(pool: PgPool) {
    pay_for_new_parcel(&pool, "admin@test.com", "txn_a1").await;
    pay_for_new_parcel(&pool, "admin@test.com", "txn_a2").await;
    pay_for_new_parcel(&pool, "someone-else@test.com", "txn_b1").await;

    let admin_token = mint_token(1, "admin@test.com", "admin");
    let rider_token = mint_token(2, "rider@test.com", "rider");

    // Role gate.
    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/payments?email=admin@test.com",
        &rider_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // An admin may not read someone else's history.
    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/payments?email=someone-else@test.com",
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Missing email parameter.
    let response = get_auth(common::build_test_app(pool.clone()), "/payments", &admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Own history, newest first.
    let response = get_auth(
        common::build_test_app(pool),
        "/payments?email=admin@test.com",
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let transactions: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["transaction_id"].as_str().unwrap())
        .collect();
    assert_eq!(transactions, vec!["txn_a2", "txn_a1"]);
}
