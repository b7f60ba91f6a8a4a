pub mod event;
pub mod event_type;
pub mod form;
pub mod user;
pub mod views;

pub use event::{Event, EventDescription, EventSummary, NewEvent};
pub use event_type::EventType;
pub use form::{EventForm, FieldErrors, ValidatedEvent};
pub use user::User;
pub use views::{EventDetails, EventFormView, EventInfo, TypeOption};
