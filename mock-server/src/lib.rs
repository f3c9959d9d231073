//! Stub of the Peloton API for local runs and integration tests.
//!
//! Serves the `auth` and `api` zones with fixture data. Logins are checked
//! against one demo account and issue a uuid session cookie; every `api`
//! route requires that cookie and answers 401 with a JSON error body
//! otherwise, the way the real service does.

pub mod fixtures;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, StatusCode,
    },
    response::{AppendHeaders, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use fixtures::{DEMO_PASSWORD, DEMO_USERNAME, DEMO_USER_ID, RIDE_ID, WORKOUT_IDS};

pub const SESSION_COOKIE: &str = "peloton_session_id";

/// Session id → user id.
pub type Sessions = Arc<RwLock<HashMap<String, String>>>;

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub joins: Option<String>,
    pub limit: Option<usize>,
    pub page: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GraphQuery {
    pub every_n: Option<u32>,
}

pub fn app() -> Router {
    let sessions: Sessions = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/check_session", get(check_session))
        .route("/api/me", get(me))
        .route("/api/user/{user_id}", get(user))
        .route("/api/user/{user_id}/followers", get(followers))
        .route("/api/user/{user_id}/following", get(following))
        .route("/api/user/{user_id}/workouts", get(workouts))
        .route("/api/workout/{workout_id}", get(workout))
        .route(
            "/api/workout/{workout_id}/performance_graph",
            get(performance_graph),
        )
        .route("/api/ride/{ride_id}", get(ride))
        .route(
            "/api/ride/{ride_id}/recent_following_workouts",
            get(ride_friends),
        )
        .route("/api/ride/{ride_id}/details", get(ride_details))
        .with_state(sessions)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock peloton api listening");
    }
    axum::serve(listener, app()).await
}

async fn login(State(sessions): State<Sessions>, Json(input): Json<LoginRequest>) -> Response {
    if input.username_or_email != DEMO_USERNAME || input.password != DEMO_PASSWORD {
        debug!(username = %input.username_or_email, "rejecting login");
        return (
            StatusCode::UNAUTHORIZED,
            Json(fixtures::error_body(401, 3010, "Login failed")),
        )
            .into_response();
    }

    let session_id = Uuid::new_v4().simple().to_string();
    sessions
        .write()
        .await
        .insert(session_id.clone(), DEMO_USER_ID.to_string());

    // The session cookie is deliberately not the first entry.
    let cookies = AppendHeaders([
        (SET_COOKIE, "peloton_platform=web; Path=/; Secure".to_string()),
        (
            SET_COOKIE,
            format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; Secure"),
        ),
    ]);
    let body = json!({
        "user_id": DEMO_USER_ID,
        "session_id": session_id,
        "pubsub_session": {"subscribe_key": "sub-c-demo"}
    });
    (StatusCode::OK, cookies, Json(body)).into_response()
}

async fn check_session(State(sessions): State<Sessions>, headers: HeaderMap) -> Json<Value> {
    match session_user(&sessions, &headers).await {
        Some(user_id) => Json(json!({
            "is_valid": true,
            "user": {"id": user_id, "username": "PowerZoneRider"}
        })),
        None => Json(json!({"is_valid": false})),
    }
}

async fn me(State(sessions): State<Sessions>, headers: HeaderMap) -> Reply {
    let user_id = require_session(&sessions, &headers).await?;
    Ok(Json(fixtures::me(&user_id)))
}

async fn user(
    State(sessions): State<Sessions>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Reply {
    require_session(&sessions, &headers).await?;
    fixtures::user(&user_id).map(Json).ok_or_else(user_not_found)
}

async fn followers(
    State(sessions): State<Sessions>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Reply {
    require_session(&sessions, &headers).await?;
    fixtures::user(&user_id).ok_or_else(user_not_found)?;
    Ok(Json(paginate(fixtures::related_users(&user_id), &query)))
}

async fn following(
    State(sessions): State<Sessions>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Reply {
    require_session(&sessions, &headers).await?;
    fixtures::user(&user_id).ok_or_else(user_not_found)?;
    Ok(Json(paginate(fixtures::related_users(&user_id), &query)))
}

async fn workouts(
    State(sessions): State<Sessions>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Reply {
    require_session(&sessions, &headers).await?;
    fixtures::user(&user_id).ok_or_else(user_not_found)?;
    let with_ride = joins(&query, "ride");
    let items = if user_id == DEMO_USER_ID {
        WORKOUT_IDS
            .iter()
            .map(|id| fixtures::workout(id, &user_id, with_ride, false))
            .collect()
    } else {
        Vec::new()
    };
    Ok(Json(paginate(items, &query)))
}

async fn workout(
    State(sessions): State<Sessions>,
    headers: HeaderMap,
    Path(workout_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Reply {
    require_session(&sessions, &headers).await?;
    if !WORKOUT_IDS.contains(&workout_id.as_str()) {
        return Err(not_found("Workout not found"));
    }
    Ok(Json(fixtures::workout(
        &workout_id,
        DEMO_USER_ID,
        joins(&query, "ride"),
        joins(&query, "user"),
    )))
}

async fn performance_graph(
    State(sessions): State<Sessions>,
    headers: HeaderMap,
    Path(workout_id): Path<String>,
    Query(query): Query<GraphQuery>,
) -> Reply {
    require_session(&sessions, &headers).await?;
    if !WORKOUT_IDS.contains(&workout_id.as_str()) {
        return Err(not_found("Workout not found"));
    }
    Ok(Json(fixtures::performance_graph(query.every_n.unwrap_or(5))))
}

async fn ride(
    State(sessions): State<Sessions>,
    headers: HeaderMap,
    Path(ride_id): Path<String>,
) -> Reply {
    require_session(&sessions, &headers).await?;
    known_ride(&ride_id)?;
    Ok(Json(fixtures::ride()))
}

async fn ride_friends(
    State(sessions): State<Sessions>,
    headers: HeaderMap,
    Path(ride_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Reply {
    require_session(&sessions, &headers).await?;
    known_ride(&ride_id)?;
    let friend_workout = fixtures::workout(
        WORKOUT_IDS[0],
        fixtures::FRIEND_USER_ID,
        false,
        joins(&query, "user"),
    );
    Ok(Json(paginate(vec![friend_workout], &query)))
}

async fn ride_details(
    State(sessions): State<Sessions>,
    headers: HeaderMap,
    Path(ride_id): Path<String>,
) -> Reply {
    require_session(&sessions, &headers).await?;
    known_ride(&ride_id)?;
    Ok(Json(fixtures::ride_details()))
}

/// User id for the session named in the `cookie` header, if it is live.
async fn session_user(sessions: &Sessions, headers: &HeaderMap) -> Option<String> {
    let cookie = headers.get(COOKIE)?.to_str().ok()?;
    let session_id = cookie
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == SESSION_COOKIE)
        .map(|(_, value)| value.trim())?;
    sessions.read().await.get(session_id).cloned()
}

async fn require_session(
    sessions: &Sessions,
    headers: &HeaderMap,
) -> Result<String, (StatusCode, Json<Value>)> {
    session_user(sessions, headers).await.ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(fixtures::error_body(
                401,
                3010,
                "Endpoint requires an authenticated session",
            )),
        )
    })
}

fn known_ride(ride_id: &str) -> Result<(), (StatusCode, Json<Value>)> {
    if ride_id == RIDE_ID {
        Ok(())
    } else {
        Err(not_found("Ride not found"))
    }
}

fn not_found(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(fixtures::error_body(404, 3030, message)),
    )
}

fn user_not_found() -> (StatusCode, Json<Value>) {
    not_found("User not found")
}

fn joins(query: &ListQuery, relation: &str) -> bool {
    query
        .joins
        .as_deref()
        .is_some_and(|joins| joins.split(',').any(|j| j.trim() == relation))
}

/// Page envelope in the remote service's shape. Defaults match the client's.
fn paginate(items: Vec<Value>, query: &ListQuery) -> Value {
    let limit = query.limit.filter(|&n| n > 0).unwrap_or(10);
    let page = query.page.unwrap_or(0);
    let total = items.len();
    // Offsets past the end (including overflowing ones) yield an empty page.
    let offset = page.saturating_mul(limit);
    let data: Vec<Value> = items.into_iter().skip(offset).take(limit).collect();
    json!({
        "data": data,
        "total": total,
        "count": data.len(),
        "page": page,
        "limit": limit,
        "page_count": total.div_ceil(limit),
        "show_previous": page > 0,
        "show_next": offset.saturating_add(limit) < total,
        "sort_by": "-created_at"
    })
}
