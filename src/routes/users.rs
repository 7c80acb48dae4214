use crate::{
    auth::{
        hash_password, verify_password, AuthenticatedUser, LoginRequest, ProfileUpdate,
        SignupRequest, TokenResponse, TokenService,
    },
    error::AppError,
    models::User,
};
use actix_web::{delete, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Register a new account.
///
/// Validates the email format, display name, and password policy, rejects
/// duplicate emails with 409, and stores the password only as a bcrypt hash.
#[post("/signup")]
pub async fn signup(
    pool: web::Data<PgPool>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    signup_data.validate()?;

    let mut tx = pool.begin().await?;

    // Email is the primary key; check before inserting for a clean 409.
    let existing: Option<(String,)> = sqlx::query_as("SELECT email FROM users WHERE email = $1")
        .bind(&signup_data.email)
        .fetch_optional(&mut *tx)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict(
            "There is already an account associated with this email".into(),
        ));
    }

    let password_hash = hash_password(&signup_data.password)?;

    sqlx::query("INSERT INTO users (email, user_name, password_hash) VALUES ($1, $2, $3)")
        .bind(&signup_data.email)
        .bind(&signup_data.user_name)
        .bind(&password_hash)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    log::info!("new account registered: {}", signup_data.email);

    Ok(HttpResponse::Created().json(json!({
        "msg": "user created successfully"
    })))
}

/// Authenticate a user and issue a bearer token.
///
/// Unknown email and wrong password produce the identical 401 response, so the
/// endpoint cannot be used to enumerate accounts.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    let user: Option<User> = sqlx::query_as(
        "SELECT email, user_name, password_hash, created_at FROM users WHERE email = $1",
    )
    .bind(&login_data.email)
    .fetch_optional(&**pool)
    .await?;

    let user = match user {
        Some(user) if verify_password(&login_data.password, &user.password_hash) => user,
        _ => return Err(AppError::Unauthorized("Invalid credentials".into())),
    };

    let token = tokens.issue(&user.email, &user.user_name)?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        msg: "logged in successfully".into(),
        jwt_token: token,
    }))
}

/// Update the caller's profile: display name and/or password, independently optional.
///
/// An empty payload is a no-op answered with 204. A changed password does not
/// invalidate tokens issued earlier; they stay valid until expiry.
#[put("")]
pub async fn update_profile(
    pool: web::Data<PgPool>,
    caller: AuthenticatedUser,
    update_data: web::Json<ProfileUpdate>,
) -> Result<impl Responder, AppError> {
    update_data.validate()?;

    if update_data.is_empty() {
        return Ok(HttpResponse::NoContent().finish());
    }

    let mut tx = pool.begin().await?;

    if let Some(user_name) = &update_data.user_name {
        sqlx::query("UPDATE users SET user_name = $1 WHERE email = $2")
            .bind(user_name)
            .bind(caller.email())
            .execute(&mut *tx)
            .await?;
    }

    if let Some(password) = &update_data.password {
        let password_hash = hash_password(password)?;
        sqlx::query("UPDATE users SET password_hash = $1 WHERE email = $2")
            .bind(&password_hash)
            .bind(caller.email())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(HttpResponse::Ok().json(json!({
        "msg": "user profile updated successfully"
    })))
}

/// Delete the caller's account.
///
/// Owned tasks are removed in the same transaction; the foreign key to
/// `users.email` never dangles.
#[delete("")]
pub async fn delete_account(
    pool: web::Data<PgPool>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let mut tx = pool.begin().await?;

    let user: Option<(String,)> = sqlx::query_as("SELECT user_name FROM users WHERE email = $1")
        .bind(caller.email())
        .fetch_optional(&mut *tx)
        .await?;

    let (user_name,) = user.ok_or_else(|| AppError::NotFound("User not found".into()))?;

    sqlx::query("DELETE FROM tasks WHERE owner_email = $1")
        .bind(caller.email())
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(caller.email())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    log::info!("account deleted: {}", caller.email());

    Ok(HttpResponse::Ok().json(json!({
        "msg": format!("User '{}' deleted successfully", user_name)
    })))
}
