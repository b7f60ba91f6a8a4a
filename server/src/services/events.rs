use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::models::{
    Event, EventDetails, EventForm, EventFormView, EventInfo, NewEvent, TypeOption,
};
use crate::store::EventStore;
use crate::utils::error::AppError;
use crate::utils::identity::CurrentUser;

/// Listing, signup and editing workflows over an [`EventStore`].
#[derive(Clone)]
pub struct EventService {
    store: Arc<dyn EventStore>,
}

impl EventService {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    pub fn backend_tag(&self) -> &'static str {
        self.store.backend_tag()
    }

    pub async fn all(&self) -> Result<Vec<EventInfo>, AppError> {
        let events = self.store.list_events().await?;
        Ok(events.into_iter().map(EventInfo::from).collect())
    }

    pub async fn joined(&self, user: &CurrentUser) -> Result<Vec<EventInfo>, AppError> {
        let events = self.store.list_joined(user.id).await?;
        Ok(events.into_iter().map(EventInfo::from).collect())
    }

    /// Signs the user up and rejects a second signup.
    pub async fn create(&self, user: &CurrentUser, id: i32) -> Result<(), AppError> {
        if !self.sign_up(user, id).await? {
            return Err(AppError::BadRequest(format!(
                "User has already joined event '{}'",
                id
            )));
        }
        Ok(())
    }

    /// Signs the user up; joining twice is a no-op.
    pub async fn join(&self, user: &CurrentUser, id: i32) -> Result<(), AppError> {
        self.sign_up(user, id).await?;
        Ok(())
    }

    pub async fn leave(&self, user: &CurrentUser, id: i32) -> Result<(), AppError> {
        self.require_event(id).await?;

        if !self.store.remove_participant(id, user.id).await? {
            return Err(AppError::BadRequest(format!(
                "User is not a participant of event '{}'",
                id
            )));
        }

        info!(event_id = id, helper_id = %user.id, "Participant left event");
        Ok(())
    }

    pub async fn add_form(&self) -> Result<EventFormView, AppError> {
        Ok(EventFormView::empty(self.types().await?))
    }

    /// Creates an event owned by `user` and returns its id.
    pub async fn add(&self, user: &CurrentUser, form: EventForm) -> Result<i32, AppError> {
        let types = self.types().await?;
        let validated = match form.validate(&types) {
            Ok(validated) => validated,
            Err(errors) => {
                return Err(AppError::InvalidForm(Box::new(EventFormView::rejected(
                    None, form, types, errors,
                ))))
            }
        };

        self.store.upsert_user(&user.to_user()).await?;
        let event = NewEvent::from_validated(validated, user.id, Utc::now());
        let id = self.store.insert_event(&event).await?;

        info!(event_id = id, organiser_id = %user.id, name = %event.name, "Event created");
        Ok(id)
    }

    pub async fn details(&self, id: i32) -> Result<EventDetails, AppError> {
        self.store
            .describe_event(id)
            .await?
            .map(EventDetails::from)
            .ok_or_else(|| not_found(id))
    }

    pub async fn edit_form(&self, user: &CurrentUser, id: i32) -> Result<EventFormView, AppError> {
        let event = self.require_event(id).await?;

        if !event.is_organised_by(user.id) {
            return Err(AppError::AuthError(format!(
                "Only the organiser can edit event '{}'",
                id
            )));
        }

        Ok(EventFormView::for_event(&event, self.types().await?))
    }

    pub async fn edit(&self, user: &CurrentUser, id: i32, form: EventForm) -> Result<(), AppError> {
        let event = self.require_event(id).await?;

        // The form post answers 400 where the form view answers 401.
        if !event.is_organised_by(user.id) {
            return Err(AppError::BadRequest(format!(
                "Only the organiser can edit event '{}'",
                id
            )));
        }

        let types = self.types().await?;
        let validated = match form.validate(&types) {
            Ok(validated) => validated,
            Err(errors) => {
                return Err(AppError::InvalidForm(Box::new(EventFormView::rejected(
                    Some(id),
                    form,
                    types,
                    errors,
                ))))
            }
        };

        self.store.update_event(id, &validated).await?;
        info!(event_id = id, organiser_id = %user.id, "Event edited");
        Ok(())
    }

    /// Inserts the participation; `false` means the user had already joined.
    async fn sign_up(&self, user: &CurrentUser, id: i32) -> Result<bool, AppError> {
        self.require_event(id).await?;
        self.store.upsert_user(&user.to_user()).await?;

        let added = self.store.add_participant(id, user.id).await?;
        if added {
            info!(event_id = id, helper_id = %user.id, "Participant joined event");
        }
        Ok(added)
    }

    async fn require_event(&self, id: i32) -> Result<Event, AppError> {
        self.store.find_event(id).await?.ok_or_else(|| not_found(id))
    }

    async fn types(&self) -> Result<Vec<TypeOption>, AppError> {
        let types = self.store.list_types().await?;
        Ok(types.into_iter().map(TypeOption::from).collect())
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Event with id '{}' was not found", id))
}
