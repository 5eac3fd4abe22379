//! Common test utilities and fixtures
//!
//! Every test gets its own SQLite file in a temp dir and drives the real
//! router through `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use dottify_core::{
    Album, AlbumFormat, AlbumInput, CatalogStore, CreatePlaylist, CreateRating, Playlist,
    Profile, Role, Song, SongInput, Stars, Visibility,
};
use dottify_server::{
    create_router,
    services::{
        accounts::{self, NewAccount},
        AuthService, Links,
    },
    state::AppState,
};
use dottify_storage::SqliteCatalog;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_PASSWORD: &str = "TestPassword123!";

/// A fully wired application over a throwaway database
pub struct TestApp {
    pub router: Router,
    pub db: Arc<SqliteCatalog>,
    pub auth: Arc<AuthService>,
    _temp_dir: TempDir,
}

/// A registered user and a valid access token for them
pub struct TestUser {
    pub profile: Profile,
    pub token: String,
}

/// Status, headers and parsed JSON body (`Value::Null` when empty)
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let db = Arc::new(
            SqliteCatalog::open(&db_url)
                .await
                .expect("Failed to open catalog"),
        );

        let auth = Arc::new(AuthService::new("test-secret-key".to_string(), 1, 1));
        let links = Arc::new(Links::new("http://testserver", "/media/"));

        let router = create_router(AppState::new(Arc::clone(&db), Arc::clone(&auth), links));

        Self {
            router,
            db,
            auth,
            _temp_dir: temp_dir,
        }
    }

    /// Register a user with the given roles and log them in
    pub async fn user(&self, username: &str, roles: &[Role]) -> TestUser {
        let (account, profile) = accounts::register(
            self.db.as_ref(),
            &self.auth,
            NewAccount {
                username: username.to_string(),
                password: TEST_PASSWORD.to_string(),
                display_name: format!("{username} display"),
                roles: roles.to_vec(),
            },
        )
        .await
        .expect("Failed to register user");

        let token = self
            .auth
            .create_access_token(account.id)
            .expect("Failed to create token");

        TestUser { profile, token }
    }

    pub async fn album(&self, title: &str, owner: Option<&TestUser>) -> Album {
        self.db
            .create_album(
                AlbumInput {
                    title: title.to_string(),
                    artist_name: "Test Artist".to_string(),
                    retail_price: "9.99".parse().expect("price"),
                    format: Some(AlbumFormat::Deluxe),
                    release_date: "2024-01-01".parse().expect("date"),
                    cover_image: None,
                },
                owner.map(|u| u.profile.id),
            )
            .await
            .expect("Failed to create album")
    }

    pub async fn song(&self, album: &Album, title: &str, length: i64) -> Song {
        self.db
            .create_song(SongInput {
                title: title.to_string(),
                length,
                album_id: album.id,
            })
            .await
            .expect("Failed to create song")
    }

    pub async fn playlist(&self, name: &str, owner: &TestUser, visibility: Visibility) -> Playlist {
        self.db
            .create_playlist(CreatePlaylist {
                name: name.to_string(),
                visibility,
                owner_id: owner.profile.id,
            })
            .await
            .expect("Failed to create playlist")
    }

    pub async fn rating(&self, album: &Album, stars: &str, created_at: DateTime<Utc>) {
        dottify_storage::ratings::create_at(
            self.db.pool(),
            CreateRating {
                album_id: album.id,
                stars: stars.parse::<Stars>().expect("stars"),
            },
            created_at,
        )
        .await
        .expect("Failed to create rating");
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, user: Option<&TestUser>) -> TestResponse {
        self.send(request(Method::GET, uri, user).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        user: Option<&TestUser>,
        fields: &[(&str, &str)],
    ) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        self.send(
            request(Method::POST, uri, user)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    pub async fn send_json(
        &self,
        method: Method,
        uri: &str,
        user: Option<&TestUser>,
        body: Value,
    ) -> TestResponse {
        self.send(
            request(method, uri, user)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

fn request(method: Method, uri: &str, user: Option<&TestUser>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match user {
        Some(user) => builder.header(header::AUTHORIZATION, format!("Bearer {}", user.token)),
        None => builder,
    }
}

/// Minimal form encoding for test values
fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            b' ' => "+".to_string(),
            _ => format!("%{b:02X}"),
        })
        .collect()
}
