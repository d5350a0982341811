//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_office_store;
mod tracing_notification_dispatcher;

pub use in_memory_office_store::InMemoryOfficeStore;
pub use tracing_notification_dispatcher::TracingNotificationDispatcher;
