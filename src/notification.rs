mod dispatcher;
mod templates;

pub use dispatcher::{DispatchError, DispatchReport, NotificationDispatcher};
pub use templates::{operator_notification, requester_confirmation, NotificationContacts};
