//! HTTP-level integration tests for talk submission, the reviewer area, the
//! speaker directory and admin talk actions.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_named_user, create_speaker, create_talk, create_user,
    delete_auth, get_auth, login, post_json_auth, ADMIN_ROLE_ID, REVIEWER_ROLE_ID,
};
use opencfp_core::roles::SPEAKER_ROLE_ID;
use opencfp_db::repositories::{FavoriteRepo, TalkMetaRepo, TalkRepo};
use serde_json::json;
use sqlx::PgPool;

/// A speaker with two talks, plus a logged-in reviewer and admin.
struct Fixture {
    speaker_id: i64,
    reviewer_id: i64,
    reviewer_token: String,
    admin_token: String,
    speaker_token: String,
    api_talk: i64,
    php_talk: i64,
}

async fn fixture(pool: &PgPool) -> Fixture {
    let speaker = create_speaker(pool, "speaker@example.com").await;
    let reviewer = create_user(pool, "reviewer@example.com", REVIEWER_ROLE_ID).await;
    create_user(pool, "admin@example.com", ADMIN_ROLE_ID).await;

    let api_talk = create_talk(pool, speaker.id, "One talk to rule them all", "api").await;
    let php_talk = create_talk(pool, speaker.id, "Modern PHP", "php").await;

    Fixture {
        speaker_id: speaker.id,
        reviewer_id: reviewer.id,
        reviewer_token: login(pool, "reviewer@example.com").await,
        admin_token: login(pool, "admin@example.com").await,
        speaker_token: login(pool, "speaker@example.com").await,
        api_talk: api_talk.id,
        php_talk: php_talk.id,
    }
}

fn ids(json: &serde_json::Value) -> Vec<i64> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Speaker submissions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn speaker_submits_and_lists_own_talks(pool: PgPool) {
    let f = fixture(&pool).await;

    let body = json!({
        "title": "<em>Async</em> Rust",
        "description": "Futures all the way down",
        "type": "tutorial",
        "level": "advanced",
        "category": "rust"
    });
    let response =
        post_json_auth(build_test_app(pool.clone()), "/api/v1/talks", body, &f.speaker_token)
            .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Async Rust");
    assert_eq!(json["data"]["type"], "tutorial");
    assert_eq!(json["data"]["user_id"], f.speaker_id);

    let response = get_auth(build_test_app(pool), "/api/v1/talks", &f.speaker_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&body_json(response).await).len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_talk_title_is_rejected(pool: PgPool) {
    let f = fixture(&pool).await;

    let body = json!({
        "title": "<br>",
        "description": "d",
        "type": "regular",
        "level": "entry",
        "category": "api"
    });
    let response = post_json_auth(build_test_app(pool), "/api/v1/talks", body, &f.speaker_token)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn speaker_cannot_use_reviewer_area(pool: PgPool) {
    let f = fixture(&pool).await;

    let response =
        get_auth(build_test_app(pool), "/api/v1/reviewer/talks", &f.speaker_token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reviewer_cannot_select_talks(pool: PgPool) {
    let f = fixture(&pool).await;

    let uri = format!("/api/v1/admin/talks/{}/select", f.api_talk);
    let response = post_json_auth(
        build_test_app(pool),
        &uri,
        json!({ "selected": true }),
        &f.reviewer_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_formats_talks_for_the_reviewer(pool: PgPool) {
    let f = fixture(&pool).await;
    TalkMetaRepo::upsert_rating(&pool, f.api_talk, f.reviewer_id, 1)
        .await
        .unwrap();

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/reviewer/talks?order_by=title&sort=ASC",
        &f.reviewer_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(ids(&json), vec![f.php_talk, f.api_talk]);
    assert_eq!(json["data"][1]["meta"]["rating"], 1);
    assert_eq!(json["data"][0]["meta"]["rating"], 0);
    assert_eq!(json["data"][0]["meta"]["viewed"], false);
    assert!(json["data"][0].get("user").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_sort_options_fall_back_silently(pool: PgPool) {
    let f = fixture(&pool).await;

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/reviewer/talks?order_by=password&sort=sideways",
        &f.reviewer_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&body_json(response).await).len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn column_filter_lists_matching_talks(pool: PgPool) {
    let f = fixture(&pool).await;

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/reviewer/talks?column=category&value=php",
        &f.reviewer_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&body_json(response).await), vec![f.php_talk]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn column_filter_rejects_unknown_column(pool: PgPool) {
    let f = fixture(&pool).await;

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/reviewer/talks?column=user_id&value=1",
        &f.reviewer_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn favorites_filter_uses_own_favorites(pool: PgPool) {
    let f = fixture(&pool).await;
    FavoriteRepo::add(&pool, f.php_talk, f.reviewer_id)
        .await
        .unwrap();

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/reviewer/talks?filter=favorites",
        &f.reviewer_token,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(ids(&json), vec![f.php_talk]);
    assert_eq!(json["data"][0]["favorite"], true);
}

// ---------------------------------------------------------------------------
// Reviewer actions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn viewing_a_talk_marks_it_viewed(pool: PgPool) {
    let f = fixture(&pool).await;

    let uri = format!("/api/v1/reviewer/talks/{}", f.api_talk);
    let response = get_auth(build_test_app(pool.clone()), &uri, &f.reviewer_token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["meta"]["viewed"], true);
    assert_eq!(json["data"]["user"]["first_name"], "Test");

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/reviewer/talks?filter=notviewed",
        &f.reviewer_token,
    )
    .await;
    assert_eq!(ids(&body_json(response).await), vec![f.php_talk]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn viewing_a_missing_talk_returns_404(pool: PgPool) {
    let f = fixture(&pool).await;

    let response =
        get_auth(build_test_app(pool), "/api/v1/reviewer/talks/999999", &f.reviewer_token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rating_is_stored_per_reviewer(pool: PgPool) {
    let f = fixture(&pool).await;

    let uri = format!("/api/v1/reviewer/talks/{}/rate", f.api_talk);
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        json!({ "rating": -1 }),
        &f.reviewer_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["rating"], -1);

    let meta = TalkMetaRepo::find(&pool, f.api_talk, f.reviewer_id)
        .await
        .unwrap()
        .expect("meta row must exist");
    assert_eq!(meta.rating, -1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn out_of_range_rating_returns_400(pool: PgPool) {
    let f = fixture(&pool).await;

    let uri = format!("/api/v1/reviewer/talks/{}/rate", f.api_talk);
    let response =
        post_json_auth(build_test_app(pool), &uri, json!({ "rating": 8 }), &f.reviewer_token)
            .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid rating 8. Must be one of: -1, 0, 1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn favorite_and_unfavorite(pool: PgPool) {
    let f = fixture(&pool).await;
    let uri = format!("/api/v1/reviewer/talks/{}/favorite", f.api_talk);

    for _ in 0..2 {
        let response =
            post_json_auth(build_test_app(pool.clone()), &uri, json!({}), &f.reviewer_token)
                .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
    let favorites = FavoriteRepo::talk_ids_for_admin(&pool, f.reviewer_id, &[f.api_talk])
        .await
        .unwrap();
    assert_eq!(favorites, vec![f.api_talk]);

    let response = delete_auth(build_test_app(pool.clone()), &uri, &f.reviewer_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let favorites = FavoriteRepo::talk_ids_for_admin(&pool, f.reviewer_id, &[f.api_talk])
        .await
        .unwrap();
    assert!(favorites.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_selects_talk(pool: PgPool) {
    let f = fixture(&pool).await;

    let uri = format!("/api/v1/admin/talks/{}/select", f.php_talk);
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        json!({ "selected": true }),
        &f.admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["selected"], true);

    let talk = TalkRepo::find_by_id(&pool, f.php_talk).await.unwrap().unwrap();
    assert!(talk.selected);

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/reviewer/talks?filter=selected",
        &f.admin_token,
    )
    .await;
    assert_eq!(ids(&body_json(response).await), vec![f.php_talk]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_comments_appear_on_talk_view(pool: PgPool) {
    let f = fixture(&pool).await;

    let uri = format!("/api/v1/admin/talks/{}/comments", f.api_talk);
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        json!({ "comment": "<b>Strong</b> abstract" }),
        &f.admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["comment"], "Strong abstract");
    assert_eq!(json["data"]["talk_id"], f.api_talk);

    let uri = format!("/api/v1/reviewer/talks/{}", f.api_talk);
    let response = get_auth(build_test_app(pool), &uri, &f.reviewer_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], f.api_talk);
    assert_eq!(json["data"]["comments"][0]["comment"], "Strong abstract");
    assert_eq!(json["data"]["comments"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_comment_returns_400(pool: PgPool) {
    let f = fixture(&pool).await;

    let uri = format!("/api/v1/admin/talks/{}/comments", f.api_talk);
    let response = post_json_auth(
        build_test_app(pool),
        &uri,
        json!({ "comment": " <p></p> " }),
        &f.admin_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn comment_on_missing_talk_returns_404(pool: PgPool) {
    let f = fixture(&pool).await;

    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/admin/talks/999999/comments",
        json!({ "comment": "Hello" }),
        &f.admin_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reviewer_cannot_comment(pool: PgPool) {
    let f = fixture(&pool).await;

    let uri = format!("/api/v1/admin/talks/{}/comments", f.api_talk);
    let response = post_json_auth(
        build_test_app(pool),
        &uri,
        json!({ "comment": "Hello" }),
        &f.reviewer_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Speaker directory
// ---------------------------------------------------------------------------

async fn seed_speakers(pool: &PgPool) -> (i64, i64) {
    let ada = create_named_user(
        pool,
        "ada@example.com",
        SPEAKER_ROLE_ID,
        "Ada",
        "Lovelace",
        Some("Analytical Engines"),
    )
    .await;
    let grace =
        create_named_user(pool, "grace@example.com", SPEAKER_ROLE_ID, "Grace", "Hopper", None)
            .await;
    (ada.id, grace.id)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn speaker_search_matches_name_and_company(pool: PgPool) {
    let f = fixture(&pool).await;
    let (ada, grace) = seed_speakers(&pool).await;

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/reviewer/speakers?search=hopper",
        &f.reviewer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&body_json(response).await), vec![grace]);

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/reviewer/speakers?search=analytical",
        &f.reviewer_token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(ids(&json), vec![ada]);
    assert!(json["data"][0].get("email").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn speaker_ordering_falls_back_to_first_name(pool: PgPool) {
    let f = fixture(&pool).await;
    let (ada, grace) = seed_speakers(&pool).await;

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/reviewer/speakers?search=a&order_by=password_hash&order=sideways",
        &f.reviewer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&body_json(response).await), vec![ada, grace]);

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/reviewer/speakers?search=a&order_by=last_name&order=ASC",
        &f.reviewer_token,
    )
    .await;
    assert_eq!(ids(&body_json(response).await), vec![grace, ada]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn speaker_profile_includes_talks(pool: PgPool) {
    let f = fixture(&pool).await;

    let uri = format!("/api/v1/reviewer/speakers/{}", f.speaker_id);
    let response = get_auth(build_test_app(pool), &uri, &f.reviewer_token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["speaker"]["id"], f.speaker_id);
    assert_eq!(json["data"]["speaker"]["role"], "speaker");
    assert_eq!(json["data"]["talks"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_speaker_returns_404(pool: PgPool) {
    let f = fixture(&pool).await;

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/reviewer/speakers/999999",
        &f.reviewer_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn speaker_cannot_browse_directory(pool: PgPool) {
    let f = fixture(&pool).await;

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/reviewer/speakers",
        &f.speaker_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
