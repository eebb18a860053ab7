use axum::{
    extract::{FromRef, State},
    routing::{get, post, put},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            LoginRequest, LoginResponse, PublicUser, RegisterRequest, RegisterResponse,
            UpdateProfileRequest, UserResponse,
        },
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
        repo::User,
    },
    error::{AppError, FieldViolation},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(get_me))
        .route("/auth/profile", put(update_profile))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// All violations are collected so the client gets the full list at once.
fn validate_registration(payload: &RegisterRequest) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    if payload.name.trim().len() < 3 {
        violations.push(FieldViolation {
            field: "name",
            message: "Name must be at least 3 characters",
        });
    }
    if !is_valid_email(&payload.email) {
        violations.push(FieldViolation {
            field: "email",
            message: "Invalid email",
        });
    }
    if payload.password.len() < 8 {
        violations.push(FieldViolation {
            field: "password",
            message: "Password must be at least 8 characters",
        });
    }
    violations
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let violations = validate_registration(&payload);
    if !violations.is_empty() {
        warn!(count = violations.len(), "registration rejected");
        return Err(AppError::Validation(violations));
    }

    // Exact-match lookup; the stored email is compared case-sensitively.
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::Conflict("User with this email already exists"));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &payload.name, &payload.email, &hash, &payload.location)
        .await?;

    info!(user_id = %user.id, "user registered");
    Ok(Json(RegisterResponse { success: true }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    // Unknown email and wrong password yield the same message so a caller
    // cannot probe which addresses are registered.
    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!("login with unknown email");
            return Err(AppError::Auth("Invalid credentials"));
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(AppError::Auth("Invalid credentials"));
    }

    let keys = JwtKeys::from_ref(&state);
    let auth_token = keys.sign(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        success: true,
        auth_token,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    Ok(Json(UserResponse {
        success: true,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = User::update_profile(&state.db, user_id, &payload)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    info!(user_id = %user.id, "profile updated");
    Ok(Json(UserResponse {
        success: true,
        user: PublicUser::from(user),
    }))
}
