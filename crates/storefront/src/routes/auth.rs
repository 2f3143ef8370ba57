//! Authentication route handlers.
//!
//! Signup, login, logout, profile, and the `is_logged_in` probe. The
//! logged-in identity lives in the session as a
//! [`CurrentUser`](crate::models::CurrentUser).

use axum::{
    Form, Json,
    extract::State,
    response::Redirect,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{OptionalUser, RequireUser};
use crate::models::{CurrentUser, User, session_keys};
use crate::state::AppState;

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Store the logged-in identity in the session.
///
/// The session ID is cycled so a pre-login session cannot be replayed.
async fn establish(session: &Session, user: &User) -> Result<()> {
    session.cycle_id().await?;
    session
        .insert(
            session_keys::CURRENT_USER,
            CurrentUser {
                id: user.id,
                username: user.username.clone(),
                is_staff: user.is_staff,
            },
        )
        .await?;
    Ok(())
}

/// Create an account and log the new user in.
#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Redirect> {
    let user = state
        .auth()
        .signup(&form.username, &form.password, &form.password_confirm)
        .await?;
    establish(&session, &user).await?;
    tracing::info!(user_id = %user.id, "signup successful");
    Ok(Redirect::to("/"))
}

/// Log in with username and password.
#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let user = state.auth().login(&form.username, &form.password).await?;
    establish(&session, &user).await?;
    tracing::info!(user_id = %user.id, "login successful");
    Ok(Redirect::to("/"))
}

/// Log out and return to the index.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(Redirect::to("/"))
}

/// Current user details; redirects to login when anonymous.
#[instrument(skip_all)]
pub async fn profile(RequireUser(user): RequireUser) -> Json<CurrentUser> {
    Json(user)
}

/// Whether the caller is logged in.
#[instrument(skip_all)]
pub async fn is_logged_in(OptionalUser(user): OptionalUser) -> Json<Value> {
    Json(json!({ "is_logged_in": user.is_some() }))
}
