//! Integration tests for the REST endpoints, driving the full router.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{ids, TestApp, TEST_PASSWORD};
use moviehub::domain::UserRole;

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_register_login_and_me() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({"username": "ripley", "password": TEST_PASSWORD})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "ripley");
    assert_eq!(body["role"], "user");

    let (status, body) = app
        .call(
            Method::POST,
            "/auth/register/",
            None,
            Some(json!({"username": "ripley", "password": TEST_PASSWORD})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "A user with that username already exists.");

    let (status, token) = app
        .call(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({"username": "ripley", "password": TEST_PASSWORD})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(token["token_type"], "Bearer");

    let access_token = token["access_token"].as_str().unwrap();
    let (status, me) = app.get("/auth/me", access_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "ripley");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.account("dallas", UserRole::User).await;

    let (status, body) = app
        .call(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({"username": "dallas", "password": "not-the-password"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_short_password_rejected_on_register() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({"username": "kane", "password": "short"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("password"));
}

// =============================================================================
// Permissions
// =============================================================================

#[tokio::test]
async fn test_users_endpoint_requires_admin() {
    let app = TestApp::new().await;
    let admin = app.account("root", UserRole::Admin).await;
    let alice = app.account("alice", UserRole::User).await;

    let (status, _) = app.call(Method::GET, "/users/", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/users/", "not-a-token").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.get("/users/", &alice.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You do not have permission to perform this action.");

    let (status, body) = app.get("/users/", &admin.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(ids(&body), vec![admin.id as i64, alice.id as i64]);
}

#[tokio::test]
async fn test_genre_changes_are_admin_only() {
    let app = TestApp::new().await;
    let admin = app.account("root", UserRole::Admin).await;
    let alice = app.account("alice", UserRole::User).await;
    let genre = app.genre(&alice.token, "Noir").await;

    let uri = format!("/genres/{}/", genre);
    let (status, _) = app
        .call(Method::PATCH, &uri, Some(&alice.token), Some(json!({"name": "Neo-noir"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .call(Method::PATCH, &uri, Some(&admin.token), Some(json!({"name": "Neo-noir"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Neo-noir");

    let (status, _) = app.call(Method::DELETE, &uri, Some(&alice.token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.call(Method::DELETE, &uri, Some(&admin.token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_only_creator_or_admin_edits_a_movie() {
    let app = TestApp::new().await;
    let admin = app.account("root", UserRole::Admin).await;
    let alice = app.account("alice", UserRole::User).await;
    let bob = app.account("bob", UserRole::User).await;
    let movie = app.movie(&alice.token, "Alien", "1979-05-25", &[]).await;
    let uri = format!("/movies/{}", movie);

    let (status, _) = app
        .call(Method::PATCH, &uri, Some(&bob.token), Some(json!({"title": "Aliens"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .call(Method::PATCH, &uri, Some(&alice.token), Some(json!({"title": "Alien (1979)"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Alien (1979)");
    assert_eq!(body["created_by"], alice.id);

    let (status, _) = app.call(Method::DELETE, &uri, Some(&admin.token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get(&uri, &alice.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Movies
// =============================================================================

#[tokio::test]
async fn test_movie_creator_is_the_caller() {
    let app = TestApp::new().await;
    let admin = app.account("root", UserRole::Admin).await;
    let alice = app.account("alice", UserRole::User).await;
    let drama = app.genre(&alice.token, "Drama").await;

    let (status, body) = app
        .post(
            "/movies/",
            &alice.token,
            json!({
                "title": "Paris, Texas",
                "description": "A drifter resurfaces.",
                "release_date": "1984-05-19",
                "genres": [drama],
                "created_by": admin.id,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["created_by"], alice.id);
    assert_eq!(body["genres"], json!([{"id": drama, "name": "Drama"}]));
}

#[tokio::test]
async fn test_movie_with_unknown_genre_rejected() {
    let app = TestApp::new().await;
    let alice = app.account("alice", UserRole::User).await;

    let (status, body) = app
        .post(
            "/movies",
            &alice.token,
            json!({
                "title": "Ghost",
                "description": "",
                "release_date": "1990-07-13",
                "genres": [404],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid pk \"404\" - object does not exist.");
}

#[tokio::test]
async fn test_filter_by_genre_requires_parameter() {
    let app = TestApp::new().await;
    let alice = app.account("alice", UserRole::User).await;

    for uri in ["/movies/filter_by_genre/", "/movies/filter_by_genre?genre="] {
        let (status, body) = app.get(uri, &alice.token).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Genre parameter is required."}));
    }
}

#[tokio::test]
async fn test_filter_by_genre_matches_substring_once() {
    let app = TestApp::new().await;
    let alice = app.account("alice", UserRole::User).await;
    let action = app.genre(&alice.token, "Action").await;
    let live_action = app.genre(&alice.token, "Live Action").await;
    let drama = app.genre(&alice.token, "Drama").await;

    let heat = app.movie(&alice.token, "Heat", "1995-12-15", &[action, live_action]).await;
    app.movie(&alice.token, "Ikiru", "1952-10-09", &[drama]).await;
    let ran = app.movie(&alice.token, "Ran", "1985-06-01", &[action, drama]).await;

    let (status, body) = app.get("/movies/filter_by_genre/?genre=act", &alice.token).await;
    assert_eq!(status, StatusCode::OK);
    let mut found = ids(&body);
    found.sort();
    assert_eq!(found, vec![heat as i64, ran as i64]);
}

#[tokio::test]
async fn test_add_to_favorites_twice() {
    let app = TestApp::new().await;
    let alice = app.account("alice", UserRole::User).await;
    let movie = app.movie(&alice.token, "Stalker", "1979-05-25", &[]).await;
    let uri = format!("/movies/{}/add_to_favorites/", movie);

    let (status, body) = app.post(&uri, &alice.token, json!({})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"], alice.id);
    assert_eq!(body["movie"], movie);

    let (status, body) = app.post(&uri, &alice.token, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Movie is already in favorites."}));

    let (_, favorites) = app.get("/favorites/", &alice.token).await;
    assert_eq!(favorites["count"], 1);
}

#[tokio::test]
async fn test_add_to_favorites_unknown_movie() {
    let app = TestApp::new().await;
    let alice = app.account("alice", UserRole::User).await;

    let (status, body) = app.post("/movies/999/add_to_favorites", &alice.token, json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found.");
}

// =============================================================================
// Favorites and ratings
// =============================================================================

#[tokio::test]
async fn test_duplicate_favorite_through_favorites_endpoint() {
    let app = TestApp::new().await;
    let alice = app.account("alice", UserRole::User).await;
    let bob = app.account("bob", UserRole::User).await;
    let movie = app.movie(&alice.token, "Solaris", "1972-03-20", &[]).await;

    app.favorite(&alice.token, movie).await;
    let (status, body) = app.post("/favorites/", &alice.token, json!({"movie": movie})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Movie is already in favorites.");

    // Another user may still favorite it, and owns the new row.
    let (status, body) = app
        .post("/favorites/", &bob.token, json!({"movie": movie, "user": alice.id}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"], bob.id);
}

#[tokio::test]
async fn test_only_owner_edits_a_favorite() {
    let app = TestApp::new().await;
    let alice = app.account("alice", UserRole::User).await;
    let bob = app.account("bob", UserRole::User).await;
    let movie = app.movie(&alice.token, "Mirror", "1975-03-07", &[]).await;
    let favorite = app.favorite(&alice.token, movie).await;
    let uri = format!("/favorites/{}/", favorite);

    let (status, _) = app.call(Method::DELETE, &uri, Some(&bob.token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.call(Method::DELETE, &uri, Some(&alice.token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_rating_score_range() {
    let app = TestApp::new().await;
    let alice = app.account("alice", UserRole::User).await;
    let movie = app.movie(&alice.token, "Nostalghia", "1983-05-17", &[]).await;

    for score in [0, 6, -1] {
        let (status, _) = app
            .post("/ratings/", &alice.token, json!({"movie": movie, "score": score}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "score {}", score);
    }

    let rating = app.rate(&alice.token, movie, 5).await;

    let (status, body) = app
        .post("/ratings/", &alice.token, json!({"movie": movie, "score": 3}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "You have already rated this movie.");

    let (status, body) = app
        .call(
            Method::PATCH,
            &format!("/ratings/{}", rating),
            Some(&alice.token),
            Some(json!({"score": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 1);
}

// =============================================================================
// Featured listings
// =============================================================================

#[tokio::test]
async fn test_filtered_movies_applies_every_clause() {
    let app = TestApp::new().await;
    let admin = app.account("root", UserRole::Admin).await;
    let alice = app.account("alice", UserRole::User).await;
    let action = app.genre(&alice.token, "Action").await;
    let adventure = app.genre(&alice.token, "Adventure").await;
    let drama = app.genre(&alice.token, "Drama").await;

    let tenet = app.movie(&alice.token, "Tenet", "2020-08-26", &[action]).await;
    let dune = app.movie(&alice.token, "Dune", "2021-10-22", &[action, adventure]).await;
    app.movie(&alice.token, "Old Adventure", "2019-06-01", &[adventure]).await;
    app.movie(&alice.token, "Minari", "2021-02-12", &[drama]).await;
    app.movie(&admin.token, "Staff Pick", "2022-01-01", &[action]).await;
    app.movie(&alice.token, "New Year", "2020-01-01", &[action]).await;

    let (status, body) = app.get("/filtered-movies/", &alice.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(ids(&body), vec![tenet as i64, dune as i64]);
}

#[tokio::test]
async fn test_filtered_favorites_applies_every_clause() {
    let app = TestApp::new().await;
    let admin = app.account("root", UserRole::Admin).await;
    let alice = app.account("alice", UserRole::User).await;
    let bob = app.account("bob", UserRole::User).await;
    assert_eq!(alice.id, 2);

    let drama = app.genre(&admin.token, "Drama").await;
    let comedy = app.genre(&admin.token, "Comedy").await;
    let quiet = app.movie(&admin.token, "Quiet Drama", "2001-01-01", &[drama]).await;
    let scary = app.movie(&admin.token, "HORROR at Midnight", "2002-01-01", &[drama]).await;
    let funny = app.movie(&admin.token, "Funny Business", "2003-01-01", &[comedy]).await;
    let acclaimed = app.movie(&admin.token, "Acclaimed", "2004-01-01", &[drama]).await;

    let kept_for_user = app.favorite(&alice.token, quiet).await;
    app.favorite(&alice.token, scary).await;
    app.favorite(&alice.token, funny).await;
    app.favorite(&bob.token, quiet).await;
    let kept_for_score = app.favorite(&bob.token, acclaimed).await;

    app.rate(&admin.token, quiet, 4).await;
    app.rate(&admin.token, acclaimed, 5).await;

    let (status, body) = app.get("/filtered-favorites", &bob.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(ids(&body), vec![kept_for_user as i64, kept_for_score as i64]);
}

// =============================================================================
// Pagination and cascades
// =============================================================================

#[tokio::test]
async fn test_pagination_envelope() {
    let app = TestApp::new().await;
    let alice = app.account("alice", UserRole::User).await;
    for n in 0..12 {
        app.genre(&alice.token, &format!("Genre {:02}", n)).await;
    }

    let (status, body) = app.get("/genres/?page=2&page_size=5", &alice.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 12);
    assert_eq!(body["next"], "/genres?page_size=5&page=3");
    assert_eq!(body["previous"], "/genres?page_size=5");
    assert_eq!(body["results"].as_array().unwrap().len(), 5);

    let (_, last) = app.get("/genres?page=3&page_size=5", &alice.token).await;
    assert_eq!(last["next"], serde_json::Value::Null);
    assert_eq!(last["results"].as_array().unwrap().len(), 2);

    let (status, body) = app.get("/genres?page=4&page_size=5", &alice.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Invalid page."}));
}

#[tokio::test]
async fn test_empty_first_page_is_valid() {
    let app = TestApp::new().await;
    let alice = app.account("alice", UserRole::User).await;

    let (status, body) = app.get("/ratings/", &alice.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"count": 0, "next": null, "previous": null, "results": []})
    );
}

#[tokio::test]
async fn test_deleting_user_cascades() {
    let app = TestApp::new().await;
    let admin = app.account("root", UserRole::Admin).await;
    let alice = app.account("alice", UserRole::User).await;
    let bob = app.account("bob", UserRole::User).await;

    let hers = app.movie(&alice.token, "Her Movie", "2010-01-01", &[]).await;
    let his = app.movie(&bob.token, "His Movie", "2011-01-01", &[]).await;
    app.favorite(&bob.token, hers).await;
    app.rate(&bob.token, hers, 4).await;
    let kept = app.favorite(&alice.token, his).await;
    app.rate(&alice.token, his, 3).await;

    let (status, _) = app
        .call(Method::DELETE, &format!("/users/{}/", alice.id), Some(&admin.token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&format!("/movies/{}", hers), &bob.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Her movie took bob's favorite and rating with it; her own rows went too.
    let (_, favorites) = app.get("/favorites", &bob.token).await;
    assert_eq!(favorites["count"], 0);
    let (_, ratings) = app.get("/ratings", &bob.token).await;
    assert_eq!(ratings["count"], 0);
    let (status, _) = app.get(&format!("/favorites/{}", kept), &bob.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Her token no longer resolves to an account.
    let (status, _) = app.get("/movies", &alice.token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deleting_movie_cascades() {
    let app = TestApp::new().await;
    let alice = app.account("alice", UserRole::User).await;
    let movie = app.movie(&alice.token, "Brief", "2015-01-01", &[]).await;
    let favorite = app.favorite(&alice.token, movie).await;
    let rating = app.rate(&alice.token, movie, 2).await;

    let (status, _) = app
        .call(Method::DELETE, &format!("/movies/{}", movie), Some(&alice.token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&format!("/favorites/{}", favorite), &alice.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get(&format!("/ratings/{}", rating), &alice.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_and_docs() {
    let app = TestApp::new().await;

    let (status, body) = app.call(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"]["status"], "healthy");

    let (status, doc) = app.call(Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "MovieHub");
}

#[tokio::test]
async fn test_malformed_id_is_json_bad_request() {
    let app = TestApp::new().await;
    let alice = app.account("alice", UserRole::User).await;

    let (status, body) = app.get("/movies/abc/", &alice.token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("abc"), "{}", body);
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app.call(Method::GET, "/nope/", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found."}));
}
