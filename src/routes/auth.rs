use crate::{
    auth::{
        hash_password, issue_token, verify_password, AuthResponse, Identity, LoginRequest,
        RegisterRequest,
    },
    config::AuthConfig,
    error::AppError,
    models::{UpdateProfile, User, UserResponse},
    response,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

const USER_COLUMNS: &str = "id, full_name, email, password_hash, created_at, updated_at";

/// Register a new account.
///
/// Validates the payload, refuses duplicate emails, stores the bcrypt hash
/// of the password, and returns the created user.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let existing = sqlx::query_as::<_, (i64,)>("SELECT id FROM users WHERE email = $1")
        .bind(&register_data.email)
        .fetch_optional(&**pool)
        .await?;

    if existing.is_some() {
        return Err(AppError::BadRequest("Email already registered".into()));
    }

    let password_hash = hash_password(&register_data.password)?;

    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (full_name, email, password_hash) VALUES ($1, $2, $3) \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(&register_data.full_name)
    .bind(&register_data.email)
    .bind(password_hash)
    .fetch_one(&**pool)
    .await?;

    Ok(response::created(
        "User registered successfully",
        UserResponse::from(user),
    ))
}

/// Authenticate a user.
///
/// Verifies the credentials and returns a signed token plus the user. The
/// token is the only credential the client holds; nothing is stored
/// server-side.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    auth: web::Data<AuthConfig>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(&login_data.email)
    .fetch_optional(&**pool)
    .await?;

    // Same answer for unknown email and wrong password.
    let user = user.ok_or_else(|| AppError::Unauthorized("Invalid credentials".into()))?;

    if !verify_password(&login_data.password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = issue_token(user.id, &user.email, &auth)?;

    Ok(response::ok(
        "Login successful",
        AuthResponse {
            token,
            user: UserResponse::from(user),
        },
    ))
}

/// Current user's profile.
#[get("")]
pub async fn profile(
    pool: web::Data<PgPool>,
    who: Identity,
) -> Result<impl Responder, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(who.user_id)
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(response::ok(
        "Profile retrieved successfully",
        UserResponse::from(user),
    ))
}

/// Update the current user's profile. Absent fields are left unchanged;
/// a changed email is re-checked for uniqueness.
#[put("")]
pub async fn update_profile(
    pool: web::Data<PgPool>,
    who: Identity,
    update: web::Json<UpdateProfile>,
) -> Result<impl Responder, AppError> {
    update.validate()?;

    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(who.user_id)
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let full_name = update.full_name.clone().unwrap_or(user.full_name);

    let email = match &update.email {
        Some(new_email) if *new_email != user.email => {
            let taken = sqlx::query_as::<_, (i64,)>("SELECT id FROM users WHERE email = $1")
                .bind(new_email)
                .fetch_optional(&**pool)
                .await?;
            if taken.is_some() {
                return Err(AppError::BadRequest("Email already registered".into()));
            }
            new_email.clone()
        }
        _ => user.email,
    };

    let password_hash = match &update.password {
        Some(new_password) => hash_password(new_password)?,
        None => user.password_hash,
    };

    let updated = sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET full_name = $1, email = $2, password_hash = $3, updated_at = NOW() \
         WHERE id = $4 RETURNING {USER_COLUMNS}"
    ))
    .bind(full_name)
    .bind(email)
    .bind(password_hash)
    .bind(who.user_id)
    .fetch_one(&**pool)
    .await?;

    Ok(response::ok(
        "Profile updated successfully",
        UserResponse::from(updated),
    ))
}

/// Delete the current user's account.
#[delete("")]
pub async fn delete_account(
    pool: web::Data<PgPool>,
    who: Identity,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(who.user_id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
