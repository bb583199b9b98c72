use actix_web::{get, patch, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{authorize, Identity},
    errors::AppError,
    models::dto::{
        request::{LoginRequest, RegisterUserRequest, UpdateUserRequest},
        response::MessageDto,
    },
    services::LoginOutcome,
};

#[post("/api/users/register")]
async fn register_user(
    state: web::Data<AppState>,
    request: web::Json<RegisterUserRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.register(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

#[post("/api/users/login")]
async fn login_user(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let outcome = state
        .credential_service
        .check_login(&request.username, &request.password)
        .await;

    match outcome {
        LoginOutcome::Success => {
            Ok(HttpResponse::Ok().json(MessageDto::new("User authenticated successfully")))
        }
        LoginOutcome::InvalidCredentials => {
            Err(AppError::Unauthorized("Invalid credentials".to_string()))
        }
        LoginOutcome::LookupError => Err(AppError::ServiceUnavailable(
            "Unable to verify credentials, try again later".to_string(),
        )),
    }
}

#[get("/api/users/{username}")]
async fn get_user(
    state: web::Data<AppState>,
    username: web::Path<String>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    authorize(identity.principal(), &username)
        .into_result("You are not authorized to view this information")?;

    let user = state.user_service.get_user(&username).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[patch("/api/users/{username}")]
async fn update_user(
    state: web::Data<AppState>,
    username: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    authorize(identity.principal(), &username)
        .into_result("You are not authorized to update this information")?;

    state
        .user_service
        .update_user(&username, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(MessageDto::new("User information updated successfully")))
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let db_health = state.user_service.health_check().await;

    let status = if db_health.is_ok() {
        "ready"
    } else {
        "not_ready"
    };

    let response = serde_json::json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "mongodb": if db_health.is_ok() { "ok" } else { "error" }
        }
    });

    if db_health.is_ok() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_ready)
        .service(register_user)
        .service(login_user)
        .service(get_user)
        .service(update_user);
}
