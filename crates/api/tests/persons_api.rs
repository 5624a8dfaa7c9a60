//! HTTP-level integration tests for the `/api/v1/persons` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, create, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

async fn create_person(pool: &PgPool, full_name: &str) -> String {
    let app = common::build_test_app(pool.clone());
    let json = create(app, "/api/v1/persons", json!({ "full_name": full_name })).await;
    json["uuid"].as_str().unwrap().to_string()
}

async fn create_film(pool: &PgPool, title: &str, rating: f64) -> String {
    let app = common::build_test_app(pool.clone());
    let json = create(
        app,
        "/api/v1/films",
        json!({ "title": title, "rating": rating, "type": "movie" }),
    )
    .await;
    json["uuid"].as_str().unwrap().to_string()
}

async fn credit(pool: &PgPool, film: &str, person: &str, role: &str) {
    let app = common::build_test_app(pool.clone());
    create(
        app,
        &format!("/api/v1/films/{film}/persons"),
        json!({ "person_id": person, "role": role }),
    )
    .await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn person_list_is_paginated_envelope(pool: PgPool) {
    for name in ["Ann", "Ben", "Cat"] {
        create_person(&pool, name).await;
    }

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/persons?page_size=2&page_number=1").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
    assert!(json["items"][0]["uuid"].is_string());
    assert!(json["items"][0]["full_name"].is_string());
    assert_eq!(json["total"], 3);
    assert_eq!(json["page"], 1);
    assert_eq!(json["page_size"], 2);
    assert_eq!(json["total_pages"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn person_search_is_case_insensitive(pool: PgPool) {
    create_person(&pool, "Keanu Reeves").await;
    create_person(&pool, "Laurence Fishburne").await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/persons/search?query=keanu").await).await;

    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["full_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Keanu Reeves"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn person_detail_and_films(pool: PgPool) {
    let person = create_person(&pool, "Gene Hackman").await;
    let great = create_film(&pool, "The Conversation", 7.8).await;
    let classic = create_film(&pool, "The French Connection", 7.7).await;
    credit(&pool, &classic, &person, "actor").await;
    credit(&pool, &great, &person, "actor").await;
    credit(&pool, &great, &person, "writer").await;

    let app = common::build_test_app(pool.clone());
    let detail = body_json(get(app, &format!("/api/v1/persons/{person}")).await).await;
    assert_eq!(detail["full_name"], "Gene Hackman");
    assert_eq!(detail["films"].as_array().unwrap().len(), 2);
    assert_eq!(detail["films"][0]["title"], "The Conversation");
    assert_eq!(detail["films"][0]["imdb_rating"], 7.8);

    let app = common::build_test_app(pool.clone());
    let films = body_json(get(app, &format!("/api/v1/persons/{person}/films?page_size=1&page_number=2")).await).await;
    assert_eq!(films[0]["title"], "The French Connection");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/persons/7c9e6679-7425-40de-944b-e07fc1f90ae7/films").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn person_update_and_delete(pool: PgPool) {
    let person = create_person(&pool, "Jon Doe").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &format!("/api/v1/persons/{person}"), json!({ "full_name": "John Doe" })).await;
    assert_eq!(body_json(response).await["full_name"], "John Doe");

    let app = common::build_test_app(pool.clone());
    assert_eq!(
        delete(app, &format!("/api/v1/persons/{person}")).await.status(),
        StatusCode::NO_CONTENT
    );

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/persons/{person}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/persons/bulk-delete", json!({ "ids": [person] })).await;
    assert_eq!(body_json(response).await["deleted"], 0);
}
