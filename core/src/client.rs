//! Request builder and response parser for the Peloton API.
//!
//! # Design
//! `PelotonClient` holds the base URL and the session cookie name and nothing
//! else. Each operation is split into a `build_*` method that turns typed
//! options plus a `&Session` into an `HttpRequest`, and a `parse_*` method
//! that consumes the `HttpResponse`. The network round-trip happens between
//! the two, in a `Transport`.
//!
//! Every authenticated `build_*` checks the session first, so an
//! unauthenticated call fails before a request even exists.
//!
//! Endpoint `parse_*` methods ignore the status code: the remote service
//! reports errors as JSON bodies, which are decoded and handed back as-is.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::{ClientConfig, DEFAULT_SESSION_COOKIE};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::options::{
    resolve_every_n, resolve_joins, resolve_limit, resolve_page, AuthenticateOptions,
    FollowerFollowingOptions, RideDetailsOptions, RideFriendsOptions, RideOptions, UserOptions,
    WorkoutOptions, WorkoutPerformanceGraphOptions, WorkoutsOptions, DEFAULT_RIDE_FRIENDS_JOINS,
    DEFAULT_WORKOUTS_JOINS, DEFAULT_WORKOUT_JOINS,
};
use crate::session::Session;
use crate::types::{
    ApiResponse, Authenticated, FollowerFollowingResponse, LoginResponse, MeResponse,
    RideDetailsResponse, RideFriendsResponse, RideResponse, SessionCheckResponse, UserResponse,
    WorkoutPerformanceGraphResponse, WorkoutResponse, WorkoutsResponse,
};

/// The two path prefixes the remote service is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Auth,
    Api,
}

impl Zone {
    fn prefix(self) -> &'static str {
        match self {
            Zone::Auth => "auth",
            Zone::Api => "api",
        }
    }
}

#[derive(Serialize)]
struct LoginBody<'a> {
    username_or_email: &'a str,
    password: &'a str,
}

/// Synchronous, I/O-free client for the Peloton API.
#[derive(Debug, Clone)]
pub struct PelotonClient {
    base_url: String,
    session_cookie_name: String,
}

impl PelotonClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }

    pub fn with_config(config: &ClientConfig) -> Self {
        Self {
            session_cookie_name: config.session_cookie_name.clone(),
            ..Self::new(&config.base_url)
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session_cookie_name(&self) -> &str {
        &self.session_cookie_name
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    pub fn build_login(
        &self,
        session: &Session,
        options: &AuthenticateOptions,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&LoginBody {
            username_or_email: &options.username,
            password: &options.password,
        })?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.url(Zone::Auth, &["login"], &[])?,
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("User-Agent".to_string(), session.user_agent().to_string()),
            ],
            body: Some(body),
        })
    }

    /// Extract the session cookie and user id from a login response.
    ///
    /// The cookie is located by name among the `set-cookie` entries; its
    /// position is not significant.
    pub fn parse_login(&self, response: HttpResponse) -> Result<Authenticated, ApiError> {
        if !response.is_success() {
            return Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            });
        }
        let cookie = session_cookie(&response, &self.session_cookie_name).ok_or_else(|| {
            ApiError::MissingSessionCookie {
                name: self.session_cookie_name.clone(),
            }
        })?;
        let data: LoginResponse = decode("login", &response)?;
        Ok(Authenticated {
            cookie,
            response: ApiResponse {
                status: response.status,
                headers: response.headers,
                data,
            },
        })
    }

    pub fn build_check_session(&self, session: &Session) -> Result<HttpRequest, ApiError> {
        self.get(session, Zone::Auth, &["check_session"], &[])
    }

    /// The status is returned alongside the body, uninterpreted.
    pub fn parse_check_session(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<SessionCheckResponse>, ApiError> {
        let data = decode("check_session", &response)?;
        Ok(ApiResponse {
            status: response.status,
            headers: response.headers,
            data,
        })
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    pub fn build_me(&self, session: &Session) -> Result<HttpRequest, ApiError> {
        self.get(session, Zone::Api, &["me"], &[])
    }

    pub fn parse_me(&self, response: HttpResponse) -> Result<MeResponse, ApiError> {
        decode("me", &response)
    }

    pub fn build_user(
        &self,
        session: &Session,
        options: &UserOptions,
    ) -> Result<HttpRequest, ApiError> {
        session.verify_logged_in()?;
        let user_id = resolve_user_id(session, options.user_id.as_deref())?;
        self.get(session, Zone::Api, &["user", user_id], &[])
    }

    pub fn parse_user(&self, response: HttpResponse) -> Result<UserResponse, ApiError> {
        decode("user", &response)
    }

    pub fn build_followers(
        &self,
        session: &Session,
        options: &FollowerFollowingOptions,
    ) -> Result<HttpRequest, ApiError> {
        self.build_social(session, options, "followers")
    }

    pub fn parse_followers(
        &self,
        response: HttpResponse,
    ) -> Result<FollowerFollowingResponse, ApiError> {
        decode("followers", &response)
    }

    pub fn build_following(
        &self,
        session: &Session,
        options: &FollowerFollowingOptions,
    ) -> Result<HttpRequest, ApiError> {
        self.build_social(session, options, "following")
    }

    pub fn parse_following(
        &self,
        response: HttpResponse,
    ) -> Result<FollowerFollowingResponse, ApiError> {
        decode("following", &response)
    }

    fn build_social(
        &self,
        session: &Session,
        options: &FollowerFollowingOptions,
        relation: &str,
    ) -> Result<HttpRequest, ApiError> {
        session.verify_logged_in()?;
        let user_id = resolve_user_id(session, options.user_id.as_deref())?;
        let query = [
            ("limit", resolve_limit(options.limit).to_string()),
            ("page", resolve_page(options.page).to_string()),
        ];
        self.get(session, Zone::Api, &["user", user_id, relation], &query)
    }

    // -----------------------------------------------------------------------
    // Workouts
    // -----------------------------------------------------------------------

    pub fn build_workouts(
        &self,
        session: &Session,
        options: &WorkoutsOptions,
    ) -> Result<HttpRequest, ApiError> {
        session.verify_logged_in()?;
        let user_id = resolve_user_id(session, options.user_id.as_deref())?;
        let mut query = vec![
            (
                "joins",
                resolve_joins(options.joins.as_deref(), DEFAULT_WORKOUTS_JOINS).to_string(),
            ),
            ("limit", resolve_limit(options.limit).to_string()),
            ("page", resolve_page(options.page).to_string()),
        ];
        let window = [
            ("from", &options.from),
            ("to", &options.to),
            ("stats_from", &options.stats_from),
            ("stats_to", &options.stats_to),
        ];
        for (key, value) in window {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                query.push((key, value.to_string()));
            }
        }
        self.get(session, Zone::Api, &["user", user_id, "workouts"], &query)
    }

    pub fn parse_workouts(&self, response: HttpResponse) -> Result<WorkoutsResponse, ApiError> {
        decode("workouts", &response)
    }

    pub fn build_workout(
        &self,
        session: &Session,
        options: &WorkoutOptions,
    ) -> Result<HttpRequest, ApiError> {
        session.verify_logged_in()?;
        let workout_id = required("workout_id", &options.workout_id)?;
        let query = [(
            "joins",
            resolve_joins(options.joins.as_deref(), DEFAULT_WORKOUT_JOINS).to_string(),
        )];
        self.get(session, Zone::Api, &["workout", workout_id], &query)
    }

    pub fn parse_workout(&self, response: HttpResponse) -> Result<WorkoutResponse, ApiError> {
        decode("workout", &response)
    }

    pub fn build_workout_performance_graph(
        &self,
        session: &Session,
        options: &WorkoutPerformanceGraphOptions,
    ) -> Result<HttpRequest, ApiError> {
        session.verify_logged_in()?;
        let workout_id = required("workout_id", &options.workout_id)?;
        let query = [("every_n", resolve_every_n(options.every_n).to_string())];
        self.get(
            session,
            Zone::Api,
            &["workout", workout_id, "performance_graph"],
            &query,
        )
    }

    pub fn parse_workout_performance_graph(
        &self,
        response: HttpResponse,
    ) -> Result<WorkoutPerformanceGraphResponse, ApiError> {
        decode("performance_graph", &response)
    }

    // -----------------------------------------------------------------------
    // Rides
    // -----------------------------------------------------------------------

    pub fn build_ride(
        &self,
        session: &Session,
        options: &RideOptions,
    ) -> Result<HttpRequest, ApiError> {
        session.verify_logged_in()?;
        let ride_id = required("ride_id", &options.ride_id)?;
        self.get(session, Zone::Api, &["ride", ride_id], &[])
    }

    pub fn parse_ride(&self, response: HttpResponse) -> Result<RideResponse, ApiError> {
        decode("ride", &response)
    }

    pub fn build_ride_friends(
        &self,
        session: &Session,
        options: &RideFriendsOptions,
    ) -> Result<HttpRequest, ApiError> {
        session.verify_logged_in()?;
        let ride_id = required("ride_id", &options.ride_id)?;
        let query = [
            (
                "joins",
                resolve_joins(options.joins.as_deref(), DEFAULT_RIDE_FRIENDS_JOINS).to_string(),
            ),
            ("limit", resolve_limit(options.limit).to_string()),
            ("page", resolve_page(options.page).to_string()),
        ];
        self.get(
            session,
            Zone::Api,
            &["ride", ride_id, "recent_following_workouts"],
            &query,
        )
    }

    pub fn parse_ride_friends(
        &self,
        response: HttpResponse,
    ) -> Result<RideFriendsResponse, ApiError> {
        decode("ride_friends", &response)
    }

    pub fn build_ride_details(
        &self,
        session: &Session,
        options: &RideDetailsOptions,
    ) -> Result<HttpRequest, ApiError> {
        session.verify_logged_in()?;
        let ride_id = required("ride_id", &options.ride_id)?;
        self.get(session, Zone::Api, &["ride", ride_id, "details"], &[])
    }

    pub fn parse_ride_details(
        &self,
        response: HttpResponse,
    ) -> Result<RideDetailsResponse, ApiError> {
        decode("ride_details", &response)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Authenticated GET carrying the session cookie and user agent.
    fn get(
        &self,
        session: &Session,
        zone: Zone,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<HttpRequest, ApiError> {
        let token = session.verify_logged_in()?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: self.url(zone, segments, query)?,
            headers: vec![
                ("cookie".to_string(), token.to_string()),
                ("User-Agent".to_string(), session.user_agent().to_string()),
            ],
            body: None,
        })
    }

    /// `{base}/{zone}/{segments..}?{query}` with each segment percent-encoded
    /// and the query form-urlencoded.
    fn url(
        &self,
        zone: Zone,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<String, ApiError> {
        let invalid = || ApiError::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .push(zone.prefix())
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.into())
    }
}

fn resolve_user_id<'a>(
    session: &'a Session,
    user_id: Option<&'a str>,
) -> Result<&'a str, ApiError> {
    let user_id = user_id
        .filter(|id| !id.is_empty())
        .or_else(|| session.user_id())
        .ok_or(ApiError::MissingUserId)?;
    path_segment("user_id", user_id)
}

fn required<'a>(name: &'static str, value: &'a str) -> Result<&'a str, ApiError> {
    if value.is_empty() {
        return Err(ApiError::MissingParameter(name));
    }
    path_segment(name, value)
}

/// Dot segments are removed by URL normalization, which would send the
/// request to a different resource.
fn path_segment<'a>(name: &'static str, value: &'a str) -> Result<&'a str, ApiError> {
    if value == "." || value == ".." {
        return Err(ApiError::InvalidParameter {
            name,
            value: value.to_string(),
        });
    }
    Ok(value)
}

/// First `set-cookie` entry whose cookie name matches, as a `name=value` pair
/// ready to send back in a `cookie` header. Entries with an empty value
/// (deletions) are skipped.
fn session_cookie(response: &HttpResponse, name: &str) -> Option<String> {
    response
        .header_values("set-cookie")
        .filter_map(|entry| entry.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(key, value)| format!("{key}={value}"))
}

fn decode<T: DeserializeOwned>(
    endpoint: &'static str,
    response: &HttpResponse,
) -> Result<T, ApiError> {
    if !response.is_success() {
        debug!(
            endpoint,
            status = response.status,
            "decoding non-2xx response body"
        );
    }
    serde_json::from_str(&response.body).map_err(|source| ApiError::Decode { endpoint, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.onepeloton.com";

    fn client() -> PelotonClient {
        PelotonClient::new(BASE)
    }

    fn session() -> Session {
        let mut session = Session::new("test-agent/1.0");
        session.establish("peloton_session_id=s1".to_string(), "42".to_string());
        session
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn login_response(cookies: &[&str], body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: cookies
                .iter()
                .map(|c| ("set-cookie".to_string(), c.to_string()))
                .collect(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_login_posts_credentials_to_auth_zone() {
        let req = client()
            .build_login(&Session::default(), &AuthenticateOptions::new("rider", "pw"))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "https://api.onepeloton.com/auth/login");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert!(req.header("cookie").is_none());
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["username_or_email"], "rider");
        assert_eq!(body["password"], "pw");
    }

    #[test]
    fn parse_login_picks_session_cookie_by_name() {
        let response = login_response(
            &[
                "peloton_platform=web; Path=/",
                "peloton_session_id=abc123; Path=/; HttpOnly; Secure",
            ],
            r#"{"user_id":"42","session_id":"abc123"}"#,
        );
        let auth = client().parse_login(response).unwrap();
        assert_eq!(auth.cookie, "peloton_session_id=abc123");
        assert_eq!(auth.response.data.user_id, "42");
        assert_eq!(auth.response.headers.len(), 2);
    }

    #[test]
    fn parse_login_ignores_cookie_position() {
        let response = login_response(
            &[
                "peloton_session_id=first; Path=/",
                "peloton_platform=web; Path=/",
                "other=x",
            ],
            r#"{"user_id":"42"}"#,
        );
        let auth = client().parse_login(response).unwrap();
        assert_eq!(auth.cookie, "peloton_session_id=first");
    }

    #[test]
    fn parse_login_without_session_cookie_fails() {
        let response = login_response(
            &["peloton_platform=web", "peloton_session_id=; Max-Age=0"],
            r#"{"user_id":"42"}"#,
        );
        let err = client().parse_login(response).unwrap_err();
        assert!(matches!(
            err,
            ApiError::MissingSessionCookie { ref name } if name == "peloton_session_id"
        ));
    }

    #[test]
    fn parse_login_rejected_status_is_http_error() {
        let response = HttpResponse {
            status: 401,
            headers: Vec::new(),
            body: r#"{"status":401,"message":"Login failed"}"#.to_string(),
        };
        let err = client().parse_login(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 401, .. }));
    }

    #[test]
    fn custom_cookie_name_is_honoured() {
        let config = ClientConfig::new(BASE).with_session_cookie_name("sid");
        let response = login_response(&["peloton_session_id=a", "sid=b"], r#"{"user_id":"1"}"#);
        let auth = PelotonClient::with_config(&config).parse_login(response).unwrap();
        assert_eq!(auth.cookie, "sid=b");
    }

    #[test]
    fn authenticated_builds_require_login() {
        let c = client();
        let s = Session::default();
        assert!(matches!(c.build_me(&s), Err(ApiError::Unauthenticated)));
        assert!(matches!(c.build_check_session(&s), Err(ApiError::Unauthenticated)));
        assert!(matches!(
            c.build_user(&s, &UserOptions { user_id: Some("1".into()) }),
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            c.build_workout(&s, &WorkoutOptions::new("")),
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            c.build_ride_details(&s, &RideDetailsOptions::new("r1")),
            Err(ApiError::Unauthenticated)
        ));
    }

    #[test]
    fn get_requests_carry_cookie_and_user_agent() {
        let req = client().build_me(&session()).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://api.onepeloton.com/api/me");
        assert_eq!(req.header("cookie"), Some("peloton_session_id=s1"));
        assert_eq!(req.header("user-agent"), Some("test-agent/1.0"));
        assert!(req.body.is_none());
    }

    #[test]
    fn user_defaults_to_session_user() {
        let req = client().build_user(&session(), &UserOptions::default()).unwrap();
        assert_eq!(req.url, "https://api.onepeloton.com/api/user/42");
        let req = client()
            .build_user(&session(), &UserOptions { user_id: Some("7".into()) })
            .unwrap();
        assert_eq!(req.url, "https://api.onepeloton.com/api/user/7");
    }

    #[test]
    fn user_without_any_id_fails() {
        let mut s = Session::default();
        s.set_token("t");
        let err = client().build_user(&s, &UserOptions::default()).unwrap_err();
        assert!(matches!(err, ApiError::MissingUserId));
    }

    #[test]
    fn followers_and_following_paginate() {
        let c = client();
        let req = c.build_followers(&session(), &FollowerFollowingOptions::default()).unwrap();
        assert_eq!(req.url, "https://api.onepeloton.com/api/user/42/followers?limit=10&page=0");
        let options = FollowerFollowingOptions {
            user_id: Some("9".into()),
            limit: Some(25),
            page: Some(3),
        };
        let req = c.build_following(&session(), &options).unwrap();
        assert_eq!(req.url, "https://api.onepeloton.com/api/user/9/following?limit=25&page=3");
    }

    #[test]
    fn workouts_defaults_and_overrides() {
        let c = client();
        let req = c.build_workouts(&session(), &WorkoutsOptions::default()).unwrap();
        assert_eq!(
            req.url,
            "https://api.onepeloton.com/api/user/42/workouts?joins=ride&limit=10&page=0"
        );
        let options = WorkoutsOptions {
            joins: Some("strength".into()),
            limit: Some(5),
            page: Some(2),
            ..WorkoutsOptions::default()
        };
        let req = c.build_workouts(&session(), &options).unwrap();
        assert!(req.url.ends_with("/api/user/42/workouts?joins=strength&limit=5&page=2"));
    }

    #[test]
    fn workouts_forwards_filter_window() {
        let options = WorkoutsOptions {
            from: Some("2021-01-01T00:00:00".into()),
            stats_to: Some("2021-02-01".into()),
            ..WorkoutsOptions::default()
        };
        let req = client().build_workouts(&session(), &options).unwrap();
        assert!(req.url.ends_with(
            "workouts?joins=ride&limit=10&page=0&from=2021-01-01T00%3A00%3A00&stats_to=2021-02-01"
        ));
    }

    #[test]
    fn workout_joins_user_by_default() {
        let req = client().build_workout(&session(), &WorkoutOptions::new("W1")).unwrap();
        assert_eq!(req.url, "https://api.onepeloton.com/api/workout/W1?joins=user");
    }

    #[test]
    fn workout_requires_id() {
        let err = client().build_workout(&session(), &WorkoutOptions::new("")).unwrap_err();
        assert!(matches!(err, ApiError::MissingParameter("workout_id")));
    }

    #[test]
    fn dot_segment_ids_are_rejected() {
        let c = client();
        let s = session();

        let err = c.build_ride_details(&s, &RideDetailsOptions::new("..")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameter { name: "ride_id", .. }));

        let err = c.build_workout(&s, &WorkoutOptions::new(".")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameter { name: "workout_id", .. }));

        let options = UserOptions {
            user_id: Some("..".into()),
        };
        let err = c.build_user(&s, &options).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameter { name: "user_id", .. }));

        // Dots inside an id are ordinary characters.
        let req = c.build_ride(&s, &RideOptions::new("a..b")).unwrap();
        assert_eq!(req.url, "https://api.onepeloton.com/api/ride/a..b");
    }

    #[test]
    fn performance_graph_sends_every_n() {
        let c = client();
        let req = c
            .build_workout_performance_graph(&session(), &WorkoutPerformanceGraphOptions::new("W1"))
            .unwrap();
        assert_eq!(
            req.url,
            "https://api.onepeloton.com/api/workout/W1/performance_graph?every_n=5"
        );
        let options = WorkoutPerformanceGraphOptions {
            workout_id: "W1".into(),
            every_n: Some(1),
        };
        let req = c.build_workout_performance_graph(&session(), &options).unwrap();
        assert!(req.url.ends_with("performance_graph?every_n=1"));
    }

    #[test]
    fn ride_paths() {
        let c = client();
        let s = session();
        let req = c.build_ride(&s, &RideOptions::new("R1")).unwrap();
        assert_eq!(req.url, "https://api.onepeloton.com/api/ride/R1");
        let req = c.build_ride_details(&s, &RideDetailsOptions::new("R1")).unwrap();
        assert_eq!(req.url, "https://api.onepeloton.com/api/ride/R1/details");
        let req = c.build_ride_friends(&s, &RideFriendsOptions::new("R1")).unwrap();
        assert_eq!(
            req.url,
            "https://api.onepeloton.com/api/ride/R1/recent_following_workouts?joins=user&limit=10&page=0"
        );
    }

    #[test]
    fn path_parameters_are_percent_encoded() {
        let req = client().build_ride(&session(), &RideOptions::new("a/b c")).unwrap();
        assert_eq!(req.url, "https://api.onepeloton.com/api/ride/a%2Fb%20c");
    }

    #[test]
    fn trailing_slash_and_prefix_in_base_url() {
        let req = PelotonClient::new("http://localhost:3000/").build_me(&session()).unwrap();
        assert_eq!(req.url, "http://localhost:3000/api/me");
        let req = PelotonClient::new("http://localhost:3000/proxy")
            .build_check_session(&session())
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/proxy/auth/check_session");
    }

    #[test]
    fn unusable_base_url_is_reported() {
        let err = PelotonClient::new("not a url").build_me(&session()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn parse_passes_non_2xx_bodies_through() {
        let response = HttpResponse {
            status: 403,
            headers: Vec::new(),
            body: r#"{"status":403,"message":"private profile"}"#.to_string(),
        };
        let user = client().parse_user(response).unwrap();
        assert!(user.id.is_none());
        assert_eq!(user.extra["message"], "private profile");
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let err = client().parse_workouts(ok("<html>oops</html>")).unwrap_err();
        assert!(matches!(err, ApiError::Decode { endpoint: "workouts", .. }));
    }

    #[test]
    fn parse_check_session_keeps_status() {
        let response = HttpResponse {
            status: 401,
            headers: Vec::new(),
            body: r#"{"is_valid":false}"#.to_string(),
        };
        let checked = client().parse_check_session(response).unwrap();
        assert_eq!(checked.status, 401);
        assert_eq!(checked.data.is_valid, Some(false));
    }

    #[test]
    fn parse_performance_graph() {
        let body = r#"{
            "duration": 1200,
            "seconds_since_pedaling_start": [0, 5, 10],
            "metrics": [{"display_name": "Output", "slug": "output", "values": [100.0, 120.5, 130.0], "max_value": 130.0}],
            "summaries": [{"display_name": "Total Output", "display_unit": "kj", "value": 183, "slug": "total_output"}]
        }"#;
        let graph = client().parse_workout_performance_graph(ok(body)).unwrap();
        assert_eq!(graph.duration, Some(1200));
        assert_eq!(graph.seconds_since_pedaling_start, vec![0, 5, 10]);
        assert_eq!(graph.metrics[0].values.len(), 3);
        assert_eq!(graph.summaries[0].value, Some(183.0));
    }
}
