//! Integration tests for profit distribution rounds.

mod common;

use axum::http::StatusCode;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use sqlx::PgPool;

use brickfund_core::roles::{ROLE_ADMIN, ROLE_BUILDER, ROLE_INVESTOR};
use brickfund_core::types::DbId;
use brickfund_db::models::status::{KycStatus, Role};
use brickfund_db::repositories::ReturnRepo;

use common::*;

/// Seed a project with three shareholders at 10/20/70 of 100 shares.
async fn seed_shareholders(pool: &PgPool, builder: DbId) -> (DbId, [DbId; 3]) {
    let project = create_project(
        pool,
        builder,
        ProjectSeed {
            total_value: dec!(10000),
            total_shares: 100,
            min_investment: dec!(100),
            ..ProjectSeed::default()
        },
    )
    .await;

    let a = create_investor(pool, "ravi").await;
    let b = create_investor(pool, "meera").await;
    let c = create_investor(pool, "vikram").await;
    seed_settled_investment(pool, a, project, dec!(1000), 10, "order_a").await;
    seed_settled_investment(pool, b, project, dec!(2000), 20, "order_b").await;
    seed_settled_investment(pool, c, project, dec!(7000), 70, "order_c").await;

    (project, [a, b, c])
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn distribution_credits_pro_rata(pool: PgPool) {
    let builder = create_builder(&pool, "asha").await;
    let (project, [a, b, c]) = seed_shareholders(&pool, builder).await;

    let app = build_test_app(pool.clone());
    let token = token_for(builder, ROLE_BUILDER);

    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project}/distributions"),
        json!({"total_profit": "1000"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(decimal_field(&body, "total_profit"), dec!(1000));
    assert_eq!(decimal_field(&body, "total_credited"), dec!(1000));

    let credits = body["credits"].as_array().unwrap();
    assert_eq!(credits.len(), 3);
    let amount_for = |id: DbId| -> Decimal {
        let entry = credits
            .iter()
            .find(|e| e["investor_id"].as_i64() == Some(id))
            .expect("credit entry for investor");
        decimal_field(entry, "amount")
    };
    assert_eq!(amount_for(a), dec!(100));
    assert_eq!(amount_for(b), dec!(200));
    assert_eq!(amount_for(c), dec!(700));

    // Credits are persisted with the round.
    let distribution_id = body["distribution_id"].as_i64().unwrap();
    let rows = ReturnRepo::list_for_distribution(&pool, distribution_id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn distribution_truncates_sub_cent_remainders(pool: PgPool) {
    let builder = create_builder(&pool, "asha").await;
    let project = create_project(
        &pool,
        builder,
        ProjectSeed {
            total_value: dec!(300),
            total_shares: 3,
            min_investment: dec!(100),
            ..ProjectSeed::default()
        },
    )
    .await;
    for (i, name) in ["ravi", "meera", "vikram"].iter().enumerate() {
        let investor = create_investor(&pool, name).await;
        seed_settled_investment(
            &pool,
            investor,
            project,
            dec!(100),
            1,
            &format!("order_{i}"),
        )
        .await;
    }

    let app = build_test_app(pool.clone());
    let token = token_for(builder, ROLE_BUILDER);

    // 1000 / 3 truncates to 333.33 each; the 0.01 remainder stays with the
    // project instead of being over-credited.
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project}/distributions"),
        json!({"total_profit": "1000"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(decimal_field(&body, "total_credited"), dec!(999.99));
    for entry in body["credits"].as_array().unwrap() {
        assert_eq!(decimal_field(entry, "amount"), dec!(333.33));
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn distribution_requires_owner_or_admin(pool: PgPool) {
    let builder = create_builder(&pool, "asha").await;
    let outsider = create_user(&pool, "sanjay", Role::Builder, KycStatus::Approved).await;
    let (project, _) = seed_shareholders(&pool, builder).await;

    let app = build_test_app(pool.clone());

    // Another builder cannot distribute someone else's project.
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project}/distributions"),
        json!({"total_profit": "1000"}),
        &token_for(outsider, ROLE_BUILDER),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Neither can an investor.
    let investor = create_investor(&pool, "nidhi").await;
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project}/distributions"),
        json!({"total_profit": "1000"}),
        &token_for(investor, ROLE_INVESTOR),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // An admin can.
    let admin = create_user(&pool, "root", Role::Admin, KycStatus::Approved).await;
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project}/distributions"),
        json!({"total_profit": "1000"}),
        &token_for(admin, ROLE_ADMIN),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn distribution_rejects_non_positive_profit(pool: PgPool) {
    let builder = create_builder(&pool, "asha").await;
    let (project, _) = seed_shareholders(&pool, builder).await;

    let app = build_test_app(pool.clone());
    let token = token_for(builder, ROLE_BUILDER);

    for profit in ["0", "-50"] {
        let response = post_json_auth(
            app.clone(),
            &format!("/api/v1/projects/{project}/distributions"),
            json!({"total_profit": profit}),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn distribution_unknown_project_not_found(pool: PgPool) {
    let builder = create_builder(&pool, "asha").await;

    let app = build_test_app(pool.clone());
    let token = token_for(builder, ROLE_BUILDER);

    let response = post_json_auth(
        app,
        "/api/v1/projects/424242/distributions",
        json!({"total_profit": "1000"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn distribution_refuses_overcommitted_share_ledger(pool: PgPool) {
    let builder = create_builder(&pool, "asha").await;
    let project = create_project(
        &pool,
        builder,
        ProjectSeed {
            total_value: dec!(10000),
            total_shares: 100,
            min_investment: dec!(100),
            ..ProjectSeed::default()
        },
    )
    .await;

    // Directly seeded holdings summing past the project's share count.
    // Crediting 130 shares against a denominator of 100 would pay out more
    // than the profit pool.
    let a = create_investor(&pool, "ravi").await;
    let b = create_investor(&pool, "meera").await;
    seed_settled_investment(&pool, a, project, dec!(7000), 70, "order_a").await;
    seed_settled_investment(&pool, b, project, dec!(6000), 60, "order_b").await;

    let app = build_test_app(pool.clone());
    let token = token_for(builder, ROLE_BUILDER);

    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project}/distributions"),
        json!({"total_profit": "1000"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["code"], "INTERNAL_ERROR");

    // Nothing was credited.
    let rounds = ReturnRepo::list_for_project(&pool, project).await.unwrap();
    assert!(rounds.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeated_rounds_credit_independently(pool: PgPool) {
    let builder = create_builder(&pool, "asha").await;
    let (project, _) = seed_shareholders(&pool, builder).await;

    let app = build_test_app(pool.clone());
    let token = token_for(builder, ROLE_BUILDER);

    for _ in 0..2 {
        let response = post_json_auth(
            app.clone(),
            &format!("/api/v1/projects/{project}/distributions"),
            json!({"total_profit": "1000"}),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Two independent rounds, six credit rows in total.
    let distributions = ReturnRepo::list_for_project(&pool, project).await.unwrap();
    assert_eq!(distributions.len(), 2);

    let rows: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM user_returns ur \
         JOIN return_distributions rd ON rd.id = ur.distribution_id \
         WHERE rd.project_id = $1",
    )
    .bind(project)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(rows, 6);
}
