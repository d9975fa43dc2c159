//! Nutrilink API - backend access for the Nutrilink client.
//!
//! A thin JSON wrapper around the REST backend plus the notification
//! service built on top of it. Every failure converts into a
//! [`nutrilink_feedback::RawFailure`] so callers can classify and present it
//! the same way as any other error.
//!
//! # Example
//!
//! ```rust,no_run
//! use nutrilink_api::{ApiClient, NotificationService, NotificationSource};
//! use nutrilink_core::AppConfig;
//! use nutrilink_feedback::{ErrorPresenter, Toast};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let client = ApiClient::new(&config.api)?.with_token("session-token");
//! let service = NotificationService::new(client, config.notifications.page_size);
//!
//! match service.fetch().await {
//!     Ok(items) => println!("{} notifications", items.len()),
//!     Err(err) => {
//!         let presenter = ErrorPresenter::new(config.general.locale);
//!         presenter.handle(&err.to_raw_failure(), &mut |toast: Toast| {
//!             eprintln!("{}: {}", toast.title, toast.description);
//!         });
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod client;
pub mod error;
pub mod notifications;

// Re-export commonly used types
pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use notifications::{
    Notification, NotificationFeed, NotificationPoller, NotificationService, NotificationSource,
    PollEvent, MIN_POLL_INTERVAL,
};
