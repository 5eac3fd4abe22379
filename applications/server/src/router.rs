/// Route table
use crate::{api, middleware, state::AppState, web};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router
///
/// Every route sees the actor resolved by [`middleware::resolve_actor`];
/// whether a route needs a logged-in actor is decided by the catalog
/// service, not by the route table.
pub fn create_router(app_state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/refresh", post(api::auth::refresh))
        // Albums
        .route(
            "/albums/",
            get(api::albums::list_albums).post(api::albums::create_album),
        )
        .route(
            "/albums/:id/",
            get(api::albums::get_album)
                .put(api::albums::update_album)
                .delete(api::albums::delete_album),
        )
        .route(
            "/albums/:id/songs/",
            get(api::album_songs::list_album_songs),
        )
        .route(
            "/albums/:id/songs/:song_id/",
            get(api::album_songs::get_album_song),
        )
        // Songs
        .route(
            "/songs/",
            get(api::songs::list_songs).post(api::songs::create_song),
        )
        .route(
            "/songs/:id/",
            get(api::songs::get_song)
                .put(api::songs::update_song)
                .delete(api::songs::delete_song),
        )
        // Playlists
        .route("/playlists/", get(api::playlists::list_playlists))
        .route("/playlists/:id/", get(api::playlists::get_playlist))
        // Statistics
        .route("/statistics/", get(api::statistics::statistics));

    let web_routes = Router::new()
        .route("/", get(web::home::home))
        .route("/albums/search/", get(web::albums::search))
        .route(
            "/albums/new/",
            get(web::albums::new_form).post(web::albums::create),
        )
        .route("/albums/:id/", get(web::albums::detail))
        .route(
            "/albums/:id/edit/",
            get(web::albums::edit_form).post(web::albums::update),
        )
        .route(
            "/albums/:id/delete/",
            get(web::albums::confirm_delete).post(web::albums::delete),
        )
        .route("/albums/:id/ratings/", post(web::albums::rate))
        .route("/albums/:id/comments/", post(web::albums::comment))
        .route("/albums/:id/:slug/", get(web::albums::detail_with_slug))
        .route(
            "/songs/new/",
            get(web::songs::new_form).post(web::songs::create),
        )
        .route("/songs/:id/", get(web::songs::detail))
        .route(
            "/songs/:id/edit/",
            get(web::songs::edit_form).post(web::songs::update),
        )
        .route(
            "/songs/:id/delete/",
            get(web::songs::confirm_delete).post(web::songs::delete),
        )
        .route("/users/:id/", get(web::users::redirect_to_canonical))
        .route("/users/:id/:slug/", get(web::users::detail));

    Router::new()
        .nest("/api", api_routes)
        .merge(web_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            middleware::resolve_actor,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
