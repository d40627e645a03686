//! Notifications

pub mod errors;
pub mod models;
mod repository;
pub mod service;
pub mod sink;

pub use errors::NotificationsServiceError;
pub use service::*;
pub use sink::{MockNotificationSink, NotificationSink, Notifier};
