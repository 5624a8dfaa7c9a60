//! Integration tests for the generic repository.
//!
//! Exercises `Repo<E>` against a real database:
//! - Create / get / partial update / delete for each entity
//! - Field sanitization on create and update
//! - Filtering, counting and offset pagination
//! - Substring search and LIKE escaping
//! - Bulk delete and cascade of link rows

use chrono::NaiveDate;
use filmcat_core::types::DbId;
use filmcat_db::fields::{FieldMap, Filters, IntoFieldMap};
use filmcat_db::models::film::{CreateFilm, Film, UpdateFilm};
use filmcat_db::models::genre::{CreateGenre, Genre, UpdateGenre};
use filmcat_db::models::person::{CreatePerson, Person};
use filmcat_db::repositories::{LinkRepo, Repo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_film(title: &str, rating: Option<f64>) -> FieldMap {
    CreateFilm {
        title: title.to_string(),
        description: None,
        creation_date: None,
        rating,
        kind: "movie".to_string(),
    }
    .into_field_map()
}

fn new_genre(name: &str) -> FieldMap {
    CreateGenre {
        name: name.to_string(),
        description: None,
    }
    .into_field_map()
}

fn new_person(full_name: &str) -> FieldMap {
    CreatePerson {
        full_name: full_name.to_string(),
    }
    .into_field_map()
}

// ---------------------------------------------------------------------------
// Test: create then get returns every supplied field
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_get_film(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let input = CreateFilm {
        title: "The Matrix".to_string(),
        description: Some("A hacker learns the truth".to_string()),
        creation_date: NaiveDate::from_ymd_opt(1999, 3, 31),
        rating: Some(8.7),
        kind: "movie".to_string(),
    };

    let created = Repo::<Film>::create(&mut conn, &input.clone().into_field_map())
        .await
        .unwrap();
    let fetched = Repo::<Film>::get_by_id(&mut conn, created.id)
        .await
        .unwrap()
        .expect("film should exist");

    assert_eq!(fetched, created);
    assert_eq!(fetched.title, input.title);
    assert_eq!(fetched.description, input.description);
    assert_eq!(fetched.creation_date, input.creation_date);
    assert_eq!(fetched.rating, input.rating);
    assert_eq!(fetched.kind, "movie");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_get_genre_and_person(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();

    let genre = Repo::<Genre>::create(&mut conn, &new_genre("Noir")).await.unwrap();
    let person = Repo::<Person>::create(&mut conn, &new_person("Ann Lee"))
        .await
        .unwrap();

    let genre_back = Repo::<Genre>::get_by_id(&mut conn, genre.id).await.unwrap();
    let person_back = Repo::<Person>::get_by_id(&mut conn, person.id).await.unwrap();

    assert_eq!(genre_back.map(|g| g.name), Some("Noir".to_string()));
    assert_eq!(person_back.map(|p| p.full_name), Some("Ann Lee".to_string()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_missing_returns_none(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let found = Repo::<Genre>::get_by_id(&mut conn, DbId::new_v4()).await.unwrap();
    assert!(found.is_none());
}

// ---------------------------------------------------------------------------
// Test: create drops unknown, managed and wrongly-typed fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_sanitizes_fields(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let forced_id = DbId::new_v4();
    let fields = new_genre("Western")
        .with("id", forced_id)
        .with("not_a_column", "ignored")
        .with("description", 3.5);

    let genre = Repo::<Genre>::create(&mut conn, &fields).await.unwrap();

    assert_ne!(genre.id, forced_id);
    assert_eq!(genre.name, "Western");
    assert_eq!(genre.description, None);
}

// ---------------------------------------------------------------------------
// Test: update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_empty_is_noop(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let film = Repo::<Film>::create(&mut conn, &new_film("Unchanged", Some(6.0)))
        .await
        .unwrap();

    let updated = Repo::<Film>::update(&mut conn, film.id, &UpdateFilm::default().into_field_map())
        .await
        .unwrap()
        .expect("film should exist");

    assert_eq!(updated, film);
    let stored = Repo::<Film>::get_by_id(&mut conn, film.id).await.unwrap();
    assert_eq!(stored, Some(film));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_changes_only_supplied_fields(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let created = Repo::<Genre>::create(
        &mut conn,
        &new_genre("Drama").with("description", "Serious stories"),
    )
    .await
    .unwrap();

    let update = UpdateGenre {
        name: Some("Melodrama".to_string()),
        description: None,
    };
    let updated = Repo::<Genre>::update(&mut conn, created.id, &update.into_field_map())
        .await
        .unwrap()
        .expect("genre should exist");

    assert_eq!(updated.name, "Melodrama");
    assert_eq!(updated.description.as_deref(), Some("Serious stories"));
    assert_eq!(updated.created, created.created);
    assert!(updated.modified >= created.modified);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_returns_none(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let result = Repo::<Person>::update(
        &mut conn,
        DbId::new_v4(),
        &FieldMap::new().with("full_name", "Nobody"),
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Test: delete and bulk delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_then_get_is_none(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let person = Repo::<Person>::create(&mut conn, &new_person("Temp Person"))
        .await
        .unwrap();

    assert!(Repo::<Person>::delete(&mut conn, person.id).await.unwrap());
    assert!(Repo::<Person>::get_by_id(&mut conn, person.id)
        .await
        .unwrap()
        .is_none());
    assert!(!Repo::<Person>::delete(&mut conn, person.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_delete_skips_unknown_ids(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let a = Repo::<Genre>::create(&mut conn, &new_genre("A")).await.unwrap();
    let b = Repo::<Genre>::create(&mut conn, &new_genre("B")).await.unwrap();
    let keep = Repo::<Genre>::create(&mut conn, &new_genre("C")).await.unwrap();

    let deleted = Repo::<Genre>::bulk_delete(&mut conn, &[a.id, b.id, DbId::new_v4()])
        .await
        .unwrap();

    assert_eq!(deleted, 2);
    let remaining = Repo::<Genre>::list(&mut conn, 0, 10, &Filters::new())
        .await
        .unwrap();
    assert_eq!(remaining, vec![keep]);
    assert_eq!(Repo::<Genre>::bulk_delete(&mut conn, &[]).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_film_cascades_links(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let film = Repo::<Film>::create(&mut conn, &new_film("Linked", None)).await.unwrap();
    let genre = Repo::<Genre>::create(&mut conn, &new_genre("Noir")).await.unwrap();
    let person = Repo::<Person>::create(&mut conn, &new_person("Sam")).await.unwrap();
    LinkRepo::link_genre(&mut conn, film.id, genre.id).await.unwrap();
    LinkRepo::link_person(&mut conn, film.id, person.id, "actor")
        .await
        .unwrap();

    assert!(Repo::<Film>::delete(&mut conn, film.id).await.unwrap());

    let links: i64 = sqlx::query_scalar(
        "SELECT (SELECT COUNT(*) FROM content.genre_film_work) \
              + (SELECT COUNT(*) FROM content.person_film_work)",
    )
    .fetch_one(&mut *conn)
    .await
    .unwrap();
    assert_eq!(links, 0);
    // The linked genre and person survive.
    assert!(Repo::<Genre>::get_by_id(&mut conn, genre.id).await.unwrap().is_some());
    assert!(Repo::<Person>::get_by_id(&mut conn, person.id).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Test: list, filters, count, pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_pages_concatenate(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    for (i, rating) in [Some(5.0), None, Some(9.1), Some(5.0), Some(7.3), None, Some(1.2)]
        .into_iter()
        .enumerate()
    {
        Repo::<Film>::create(&mut conn, &new_film(&format!("Film {i}"), rating))
            .await
            .unwrap();
    }
    let no_filters = Filters::new();

    let mut paged = Repo::<Film>::list(&mut conn, 0, 3, &no_filters).await.unwrap();
    paged.extend(Repo::<Film>::list(&mut conn, 3, 4, &no_filters).await.unwrap());
    let whole = Repo::<Film>::list(&mut conn, 0, 7, &no_filters).await.unwrap();

    assert_eq!(paged, whole);
    assert_eq!(whole.len(), 7);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_defaults_to_rating_descending(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    for (title, rating) in [("Low", Some(2.0)), ("Unrated", None), ("High", Some(9.0))] {
        Repo::<Film>::create(&mut conn, &new_film(title, rating)).await.unwrap();
    }

    let titles: Vec<String> = Repo::<Film>::list(&mut conn, 0, 10, &Filters::new())
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.title)
        .collect();

    assert_eq!(titles, vec!["High", "Low", "Unrated"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_and_ignores_unknown_keys(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    Repo::<Genre>::create(&mut conn, &new_genre("Comedy")).await.unwrap();
    Repo::<Genre>::create(&mut conn, &new_genre("Horror")).await.unwrap();

    let by_name = Filters::new().with("name", "Horror");
    let matched = Repo::<Genre>::list(&mut conn, 0, 10, &by_name).await.unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "Horror");
    assert_eq!(Repo::<Genre>::count(&mut conn, &by_name).await.unwrap(), 1);

    let unknown = Filters::new().with("colour", "red");
    let all = Repo::<Genre>::list(&mut conn, 0, 10, &unknown).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(Repo::<Genre>::count(&mut conn, &unknown).await.unwrap(), 2);
}

// ---------------------------------------------------------------------------
// Test: substring search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_by_field_is_case_insensitive(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    Repo::<Film>::create(&mut conn, &new_film("The Matrix", Some(8.7))).await.unwrap();
    Repo::<Film>::create(&mut conn, &new_film("Heat", Some(8.3))).await.unwrap();

    for term in ["matrix", "MATRIX", "Mat"] {
        let found = Repo::<Film>::search_by_field(&mut conn, "title", term, 0, 10)
            .await
            .unwrap();
        assert_eq!(found.len(), 1, "term {term}");
        assert_eq!(found[0].title, "The Matrix");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_by_invalid_field_is_empty(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    Repo::<Film>::create(&mut conn, &new_film("Anything", Some(5.5))).await.unwrap();

    let unknown = Repo::<Film>::search_by_field(&mut conn, "nope", "Any", 0, 10)
        .await
        .unwrap();
    let non_text = Repo::<Film>::search_by_field(&mut conn, "rating", "5", 0, 10)
        .await
        .unwrap();

    assert!(unknown.is_empty());
    assert!(non_text.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_matches_wildcards_literally(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    Repo::<Genre>::create(&mut conn, &new_genre("100% Action")).await.unwrap();
    Repo::<Genre>::create(&mut conn, &new_genre("1000 Action")).await.unwrap();

    let found = Repo::<Genre>::search_by_field(&mut conn, "name", "100%", 0, 10)
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "100% Action");
}
