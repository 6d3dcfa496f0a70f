use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::sync::Arc;
use uuid::Uuid;
use warp::Filter;
use warp::http::StatusCode;
use warp::reply::{Reply, Response};

use crate::config::Config;
use crate::credentials::{hash_password, verify_credentials};
use crate::error::ApiError;
use crate::sessions::SessionStore;
use puzzle_core::{validate_credentials, validate_new_auto, validate_submission};
use puzzle_persistence::{AutoRepository, UserRepository};
use puzzle_types::{Credentials, ErrorResponse, LevelSubmission, NewAuto, ViewUser};

pub mod config;
pub mod credentials;
pub mod error;
pub mod sessions;

const MAX_BODY_BYTES: u64 = 16 * 1024;

fn with_shared<T: Send + Sync + 'static>(
    value: Arc<T>,
) -> impl Filter<Extract = (Arc<T>,), Error = Infallible> + Clone {
    warp::any().map(move || value.clone())
}

fn json_body<T: DeserializeOwned + Send>() -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

/// Session token carried by the request cookie, if any
fn with_session_token(
    cookie_name: &'static str,
) -> impl Filter<Extract = (Option<String>,), Error = Infallible> + Clone {
    warp::cookie::optional::<String>(cookie_name)
        .map(|token: Option<String>| token.filter(|token| !token.is_empty()))
}

pub fn create_routes(
    config: Config,
    auto_repository: Arc<AutoRepository>,
    user_repository: Arc<UserRepository>,
    sessions: Arc<SessionStore>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let autos = with_shared(auto_repository);
    let users = with_shared(user_repository);
    let session_token = with_session_token(sessions.cookie_name());
    let session_store = with_shared(sessions);

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| "OK");

    // Catalog endpoints
    let create_auto = warp::path!("autos")
        .and(warp::post())
        .and(json_body::<NewAuto>())
        .and(autos.clone())
        .then(handle_create_auto)
        .map(into_reply);

    let list_autos = warp::path!("autos")
        .and(warp::get())
        .and(autos.clone())
        .then(handle_list_autos)
        .map(into_reply);

    let get_auto = warp::path!("autos" / String)
        .and(warp::get())
        .and(autos)
        .then(handle_get_auto)
        .map(into_reply);

    // Account endpoints
    let me = warp::path!("users" / "me")
        .and(warp::get())
        .and(session_token.clone())
        .and(session_store.clone())
        .and(users.clone())
        .then(handle_me)
        .map(into_reply);

    let register = warp::path!("users" / "register")
        .and(warp::post())
        .and(json_body::<Credentials>())
        .and(session_token.clone())
        .and(session_store.clone())
        .and(users.clone())
        .then(handle_register)
        .map(into_reply);

    let login = warp::path!("users" / "login")
        .and(warp::post())
        .and(json_body::<Credentials>())
        .and(session_token.clone())
        .and(session_store.clone())
        .and(users.clone())
        .then(handle_login)
        .map(into_reply);

    let logout = warp::path!("users" / "logout")
        .and(warp::post())
        .and(session_token.clone())
        .and(session_store.clone())
        .then(handle_logout)
        .map(into_reply);

    // Level progress endpoints
    let submit_result = warp::path!("users" / "result")
        .and(warp::post())
        .and(json_body::<LevelSubmission>())
        .and(session_token.clone())
        .and(session_store.clone())
        .and(users.clone())
        .then(handle_submit_result)
        .map(into_reply);

    let my_results = warp::path!("users" / "result")
        .and(warp::get())
        .and(session_token)
        .and(session_store)
        .and(users.clone())
        .then(handle_my_results)
        .map(into_reply);

    let level_leaderboard = warp::path!("users" / "result" / String)
        .and(warp::get())
        .and(users)
        .then(handle_level_leaderboard)
        .map(into_reply);

    // CORS configuration
    let cors = warp::cors()
        .allow_origin(config.cors_origin.as_str())
        .allow_credentials(true)
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    health
        .or(create_auto)
        .or(list_autos)
        .or(get_auto)
        .or(me)
        .or(register)
        .or(login)
        .or(logout)
        .or(submit_result)
        .or(my_results)
        .or(level_leaderboard)
        .recover(handle_rejection)
        .with(cors)
        .with(warp::log("puzzle_arcade"))
}

fn into_reply(result: Result<Response, ApiError>) -> Response {
    result.unwrap_or_else(ApiError::into_response)
}

fn json_with_status<T: serde::Serialize>(value: &T, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(value), status).into_response()
}

fn require_user(sessions: &SessionStore, token: Option<&str>) -> Result<Uuid, ApiError> {
    token
        .and_then(|token| sessions.resolve(token))
        .ok_or(ApiError::Unauthorized)
}

async fn handle_create_auto(
    new_auto: NewAuto,
    auto_repository: Arc<AutoRepository>,
) -> Result<Response, ApiError> {
    validate_new_auto(&new_auto)?;
    let created = auto_repository.create(new_auto).await?;
    Ok(json_with_status(&created, StatusCode::CREATED))
}

async fn handle_list_autos(auto_repository: Arc<AutoRepository>) -> Result<Response, ApiError> {
    let autos = auto_repository.list_all().await?;
    Ok(json_with_status(&autos, StatusCode::OK))
}

async fn handle_get_auto(
    auto_id: String,
    auto_repository: Arc<AutoRepository>,
) -> Result<Response, ApiError> {
    let auto_id = Uuid::parse_str(&auto_id)
        .map_err(|_| ApiError::BadRequest("Invalid auto ID format".to_string()))?;
    let auto = auto_repository.get_by_id(auto_id).await?;
    Ok(json_with_status(&auto, StatusCode::OK))
}

async fn handle_me(
    token: Option<String>,
    sessions: Arc<SessionStore>,
    user_repository: Arc<UserRepository>,
) -> Result<Response, ApiError> {
    let user_id = require_user(&sessions, token.as_deref())?;

    // A session can outlive its account
    let account = user_repository
        .find_by_id(user_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Ok(json_with_status(&ViewUser::from(&account), StatusCode::OK))
}

async fn handle_register(
    credentials: Credentials,
    token: Option<String>,
    sessions: Arc<SessionStore>,
    user_repository: Arc<UserRepository>,
) -> Result<Response, ApiError> {
    validate_credentials(&credentials)?;

    let password_hash = hash_password(&credentials.password)
        .map_err(|err| ApiError::Internal(format!("Password hashing failed: {}", err)))?;
    let account = user_repository
        .create_user(credentials.login.trim(), password_hash)
        .await?;

    if let Some(previous) = token {
        sessions.remove(&previous);
    }
    let token = sessions.create(account.id);

    Ok(warp::reply::with_header(warp::reply(), "set-cookie", sessions.set_cookie(&token)).into_response())
}

async fn handle_login(
    credentials: Credentials,
    token: Option<String>,
    sessions: Arc<SessionStore>,
    user_repository: Arc<UserRepository>,
) -> Result<Response, ApiError> {
    // Any login attempt ends the current session
    if let Some(previous) = token {
        sessions.remove(&previous);
    }

    let verified = verify_credentials(
        &user_repository,
        credentials.login.trim(),
        &credentials.password,
    )
    .await?;

    match verified {
        Some(user_id) => {
            let token = sessions.create(user_id);
            tracing::info!("User {} logged in", user_id);
            Ok(
                warp::reply::with_header(warp::reply(), "set-cookie", sessions.set_cookie(&token))
                    .into_response(),
            )
        }
        None => Ok(warp::reply::with_header(
            ApiError::IncorrectCredentials.into_response(),
            "set-cookie",
            sessions.clear_cookie(),
        )
        .into_response()),
    }
}

async fn handle_logout(
    token: Option<String>,
    sessions: Arc<SessionStore>,
) -> Result<Response, ApiError> {
    if let Some(token) = token {
        sessions.remove(&token);
    }
    Ok(warp::reply::with_header(warp::reply(), "set-cookie", sessions.clear_cookie()).into_response())
}

async fn handle_submit_result(
    submission: LevelSubmission,
    token: Option<String>,
    sessions: Arc<SessionStore>,
    user_repository: Arc<UserRepository>,
) -> Result<Response, ApiError> {
    let user_id = require_user(&sessions, token.as_deref())?;
    validate_submission(&submission)?;

    let results = user_repository
        .upsert_level_result(user_id, &submission)
        .await?;
    Ok(json_with_status(&results, StatusCode::OK))
}

async fn handle_my_results(
    token: Option<String>,
    sessions: Arc<SessionStore>,
    user_repository: Arc<UserRepository>,
) -> Result<Response, ApiError> {
    let user_id = require_user(&sessions, token.as_deref())?;
    let results = user_repository.get_level_results(user_id).await?;
    Ok(json_with_status(&results, StatusCode::OK))
}

async fn handle_level_leaderboard(
    level_name: String,
    user_repository: Arc<UserRepository>,
) -> Result<Response, ApiError> {
    let level_name = percent_decode_str(&level_name)
        .decode_utf8()
        .map_err(|_| ApiError::BadRequest("Level name is not valid UTF-8".to_string()))?;
    let leaderboard = user_repository.get_leaderboard(&level_name).await?;
    Ok(json_with_status(&leaderboard, StatusCode::OK))
}

async fn handle_rejection(err: warp::Rejection) -> Result<Response, warp::Rejection> {
    let (message, status) = if err.is_not_found() {
        ("Not found".to_string(), StatusCode::NOT_FOUND)
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (format!("Invalid request body: {}", e), StatusCode::BAD_REQUEST)
    } else if let Some(e) = err.find::<warp::reject::InvalidHeader>() {
        (format!("Invalid header: {}", e.name()), StatusCode::BAD_REQUEST)
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        ("Request body too large".to_string(), StatusCode::PAYLOAD_TOO_LARGE)
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            "Expected a JSON body".to_string(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            "Method not allowed".to_string(),
            StatusCode::METHOD_NOT_ALLOWED,
        )
    } else {
        return Err(err);
    };

    Ok(json_with_status(&ErrorResponse::new(message), status))
}
