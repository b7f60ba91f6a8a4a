use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::Response;
use axum::Form;
use serde::Deserialize;

use crate::models::EventForm;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::identity::CurrentUser;
use crate::utils::response::{see_other, success};

pub const ALL_PATH: &str = "/event/all";
pub const JOINED_PATH: &str = "/event/joined";

#[derive(Debug, Deserialize)]
pub struct EventIdQuery {
    pub id: i32,
}

pub async fn all(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state.events.all().await?;
    Ok(success(events, "Events retrieved"))
}

pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    query: Result<Query<EventIdQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(bad_query)?;
    state.events.create(&user, query.id).await?;
    Ok(see_other(JOINED_PATH))
}

pub async fn join(
    State(state): State<AppState>,
    user: CurrentUser,
    query: Result<Query<EventIdQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(bad_query)?;
    state.events.join(&user, query.id).await?;
    Ok(see_other(JOINED_PATH))
}

pub async fn joined(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response, AppError> {
    let events = state.events.joined(&user).await?;
    Ok(success(events, "Joined events retrieved"))
}

pub async fn leave(
    State(state): State<AppState>,
    user: CurrentUser,
    query: Result<Query<EventIdQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(bad_query)?;
    state.events.leave(&user, query.id).await?;
    Ok(see_other(ALL_PATH))
}

pub async fn add_form(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Response, AppError> {
    let form = state.events.add_form().await?;
    Ok(success(form, "Event form"))
}

pub async fn add(
    State(state): State<AppState>,
    user: CurrentUser,
    form: Result<Form<EventForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form.map_err(bad_form)?;
    state.events.add(&user, form).await?;
    Ok(see_other(ALL_PATH))
}

pub async fn details(
    State(state): State<AppState>,
    query: Result<Query<EventIdQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(bad_query)?;
    let details = state.events.details(query.id).await?;
    Ok(success(details, "Event details"))
}

pub async fn edit_form(
    State(state): State<AppState>,
    user: CurrentUser,
    query: Result<Query<EventIdQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(bad_query)?;
    let form = state.events.edit_form(&user, query.id).await?;
    Ok(success(form, "Event form"))
}

pub async fn edit(
    State(state): State<AppState>,
    user: CurrentUser,
    query: Result<Query<EventIdQuery>, QueryRejection>,
    form: Result<Form<EventForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(bad_query)?;
    let Form(form) = form.map_err(bad_form)?;
    state.events.edit(&user, query.id, form).await?;
    Ok(see_other(ALL_PATH))
}

fn bad_query(rejection: QueryRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

fn bad_form(rejection: FormRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}
