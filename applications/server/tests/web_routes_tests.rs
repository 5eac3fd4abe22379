/// Human-facing route tests
/// Home scoping, search, forms, ratings, comments and profile URLs
mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::TestApp;
use dottify_core::{CatalogStore, Role, Visibility};
use serde_json::Value;

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .expect("expected a list")
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_home_for_anonymous_lists_albums_and_public_playlists() {
    let app = TestApp::new().await;
    let owner = app.user("owner", &[]).await;
    let album = app.album("Open", None).await;
    let public = app.playlist("Public", &owner, Visibility::Public).await;
    app.playlist("Hidden", &owner, Visibility::Hidden).await;

    let response = app.get("/", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(ids(&response.body["albums"]), vec![album.id]);
    assert_eq!(ids(&response.body["playlists"]), vec![public.id]);
    assert!(response.body["songs"].is_null());
}

#[tokio::test]
async fn test_home_for_artist_lists_only_own_albums() {
    let app = TestApp::new().await;
    let artist = app.user("artist", &[Role::Artist]).await;
    let other = app.user("other", &[Role::Artist]).await;
    let mine = app.album("Mine", Some(&artist)).await;
    app.album("Theirs", Some(&other)).await;
    app.album("Nobody's", None).await;

    let response = app.get("/", Some(&artist)).await;

    assert_eq!(ids(&response.body["albums"]), vec![mine.id]);
    assert!(response.body["playlists"].is_null());
    assert!(response.body["songs"].is_null());
}

#[tokio::test]
async fn test_home_for_plain_user_lists_own_playlists_of_any_visibility() {
    let app = TestApp::new().await;
    let user = app.user("user", &[]).await;
    let other = app.user("other", &[]).await;
    let hidden = app.playlist("Mine, hidden", &user, Visibility::Hidden).await;
    app.playlist("Theirs", &other, Visibility::Public).await;

    let response = app.get("/", Some(&user)).await;

    assert!(response.body["albums"].is_null());
    assert_eq!(ids(&response.body["playlists"]), vec![hidden.id]);
}

#[tokio::test]
async fn test_home_for_admin_lists_everything() {
    let app = TestApp::new().await;
    let admin = app.user("admin", &[Role::Admin]).await;
    let user = app.user("user", &[]).await;
    let album = app.album("Album", None).await;
    let song = app.song(&album, "Track", 200).await;
    let hidden = app.playlist("Hidden", &user, Visibility::Hidden).await;

    let response = app.get("/", Some(&admin)).await;

    assert_eq!(ids(&response.body["albums"]), vec![album.id]);
    assert_eq!(ids(&response.body["playlists"]), vec![hidden.id]);
    assert_eq!(ids(&response.body["songs"]), vec![song.id]);
}

#[tokio::test]
async fn test_search_requires_login() {
    let app = TestApp::new().await;
    app.album("Findable", None).await;

    let response = app.get("/albums/search/?q=find", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let app = TestApp::new().await;
    let user = app.user("user", &[]).await;
    let hit = app.album("Giant Steps", None).await;
    app.album("Blue Train", None).await;

    let response = app.get("/albums/search/?q=STEP", Some(&user)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(ids(&response.body["albums"]), vec![hit.id]);
    assert_eq!(response.body["q"], "STEP");
}

#[tokio::test]
async fn test_blank_search_lists_all_albums() {
    let app = TestApp::new().await;
    let user = app.user("user", &[]).await;
    app.album("One", None).await;
    app.album("Two", None).await;

    let response = app.get("/albums/search/", Some(&user)).await;

    assert_eq!(ids(&response.body["albums"]).len(), 2);
}

#[tokio::test]
async fn test_album_detail_averages() {
    let app = TestApp::new().await;
    let album = app.album("Rated", None).await;
    let now = Utc::now();
    app.rating(&album, "4.0", now - Duration::days(1)).await;
    app.rating(&album, "2.0", now - Duration::days(2)).await;
    app.rating(&album, "1.0", now - Duration::days(60)).await;

    let response = app.get(&format!("/albums/{}/", album.id), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["average_recent_str"], "3.0");
    assert_eq!(response.body["average_alltime_str"], "2.3");
}

#[tokio::test]
async fn test_album_detail_without_ratings_shows_zero() {
    let app = TestApp::new().await;
    let album = app.album("Unrated", None).await;

    let response = app
        .get(&format!("/albums/{}/{}/", album.id, album.slug), None)
        .await;

    assert_eq!(response.body["average_alltime_str"], "0.0");
    assert_eq!(response.body["average_recent_str"], "0.0");
}

#[tokio::test]
async fn test_album_slug_is_not_checked() {
    let app = TestApp::new().await;
    let album = app.album("Real Title", None).await;

    let response = app
        .get(&format!("/albums/{}/anything-at-all/", album.id), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["album"]["title"], "Real Title");
}

#[tokio::test]
async fn test_rating_validation() {
    let app = TestApp::new().await;
    let user = app.user("user", &[]).await;
    let album = app.album("Rated", None).await;
    let uri = format!("/albums/{}/ratings/", album.id);

    for stars in ["5.5", "3.3", "-0.5"] {
        let response = app.post_form(&uri, Some(&user), &[("stars", stars)]).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "stars {stars}");
        assert!(response.body["fields"].get("stars").is_some());
    }

    let response = app.post_form(&uri, Some(&user), &[("stars", "3.5")]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some(format!("/albums/{}/", album.id).as_str()));

    let ratings = app.db.get_ratings_by_album(album.id).await.unwrap();
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0].stars.to_string(), "3.5");
}

#[tokio::test]
async fn test_anonymous_cannot_rate_or_comment() {
    let app = TestApp::new().await;
    let album = app.album("Quiet", None).await;

    let response = app
        .post_form(&format!("/albums/{}/ratings/", album.id), None, &[("stars", "4.0")])
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .post_form(
            &format!("/albums/{}/comments/", album.id),
            None,
            &[("comment_text", "Hello")],
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_comment_shows_author_on_album_page() {
    let app = TestApp::new().await;
    let user = app.user("critic", &[]).await;
    let album = app.album("Discussed", None).await;

    let response = app
        .post_form(
            &format!("/albums/{}/comments/", album.id),
            Some(&user),
            &[("comment_text", "Great record")],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let response = app.get(&format!("/albums/{}/", album.id), None).await;
    let comments = response.body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["comment_text"], "Great record");
}

#[tokio::test]
async fn test_plain_user_cannot_open_album_form() {
    let app = TestApp::new().await;
    let user = app.user("user", &[]).await;

    let response = app.get("/albums/new/", Some(&user)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.get("/albums/new/", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_album_form_lists_format_choices() {
    let app = TestApp::new().await;
    let artist = app.user("artist", &[Role::Artist]).await;

    let response = app.get("/albums/new/", Some(&artist)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["format_choices"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_artist_creates_album_through_form() {
    let app = TestApp::new().await;
    let artist = app.user("artist", &[Role::Artist]).await;

    let response = app
        .post_form(
            "/albums/new/",
            Some(&artist),
            &[
                ("title", "Form Made"),
                ("artist_name", "Artist"),
                ("retail_price", "5.00"),
                ("format", ""),
                ("release_date", "2020-02-02"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let albums = app.db.get_albums_by_owner(artist.profile.id).await.unwrap();
    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0].format, None);
    assert_eq!(
        response.location(),
        Some(format!("/albums/{}/", albums[0].id).as_str())
    );
}

#[tokio::test]
async fn test_artist_cannot_edit_or_delete_another_artists_album() {
    let app = TestApp::new().await;
    let owner = app.user("owner", &[Role::Artist]).await;
    let intruder = app.user("intruder", &[Role::Artist]).await;
    let album = app.album("Guarded", Some(&owner)).await;

    let response = app
        .get(&format!("/albums/{}/edit/", album.id), Some(&intruder))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .post_form(&format!("/albums/{}/delete/", album.id), Some(&intruder), &[])
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(app.db.get_album(album.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_owner_deletes_album_and_its_songs() {
    let app = TestApp::new().await;
    let owner = app.user("owner", &[Role::Artist]).await;
    let album = app.album("Doomed", Some(&owner)).await;
    let song = app.song(&album, "Last Song", 200).await;

    let response = app
        .post_form(&format!("/albums/{}/delete/", album.id), Some(&owner), &[])
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));
    assert!(app.db.get_album(album.id).await.unwrap().is_none());
    assert!(app.db.get_song(song.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_song_form_offers_only_own_albums_to_artist() {
    let app = TestApp::new().await;
    let artist = app.user("artist", &[Role::Artist]).await;
    let other = app.user("other", &[Role::Artist]).await;
    let mine = app.album("Mine", Some(&artist)).await;
    app.album("Theirs", Some(&other)).await;

    let response = app.get("/songs/new/", Some(&artist)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(ids(&response.body["album_choices"]), vec![mine.id]);
}

#[tokio::test]
async fn test_artist_cannot_move_song_to_another_artists_album() {
    let app = TestApp::new().await;
    let artist = app.user("artist", &[Role::Artist]).await;
    let other = app.user("other", &[Role::Artist]).await;
    let mine = app.album("Mine", Some(&artist)).await;
    let theirs = app.album("Theirs", Some(&other)).await;
    let song = app.song(&mine, "Wanderer", 200).await;

    let response = app
        .post_form(
            &format!("/songs/{}/edit/", song.id),
            Some(&artist),
            &[
                ("title", "Wanderer"),
                ("length", "200"),
                ("album", &theirs.id.to_string()),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    let stored = app.db.get_song(song.id).await.unwrap().unwrap();
    assert_eq!(stored.album_id, mine.id);
}

#[tokio::test]
async fn test_song_detail_includes_album() {
    let app = TestApp::new().await;
    let album = app.album("Home", None).await;
    let song = app.song(&album, "Resident", 200).await;

    let response = app.get(&format!("/songs/{}/", song.id), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["album"]["id"], album.id);
    assert_eq!(response.body["song"]["title"], "Resident");
}

#[tokio::test]
async fn test_user_page_redirects_to_canonical_slug() {
    let app = TestApp::new().await;
    let user = app.user("Jane Doe", &[]).await;
    let canonical = format!("/users/{}/jane-doe-display/", user.profile.id);

    let response = app.get(&format!("/users/{}/", user.profile.id), None).await;
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location(), Some(canonical.as_str()));

    let response = app
        .get(&format!("/users/{}/wrong-slug/", user.profile.id), None)
        .await;
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location(), Some(canonical.as_str()));

    let response = app.get(&canonical, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["profile"]["display_name"], "Jane Doe display");
}

#[tokio::test]
async fn test_user_page_hides_private_playlists_from_others() {
    let app = TestApp::new().await;
    let owner = app.user("owner", &[]).await;
    let visitor = app.user("visitor", &[]).await;
    let public = app.playlist("Public", &owner, Visibility::Public).await;
    let hidden = app.playlist("Hidden", &owner, Visibility::Hidden).await;
    let uri = format!("/users/{}/owner-display/", owner.profile.id);

    let response = app.get(&uri, Some(&visitor)).await;
    assert_eq!(ids(&response.body["playlists"]), vec![public.id]);

    let response = app.get(&uri, Some(&owner)).await;
    let mut seen = ids(&response.body["playlists"]);
    seen.sort_unstable();
    assert_eq!(seen, vec![public.id, hidden.id]);
}

#[tokio::test]
async fn test_missing_user_is_404() {
    let app = TestApp::new().await;

    let response = app.get("/users/404/", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
