//! Push notification delivery.
//!
//! Messages are modelled after the FCM HTTP v1 `Message` resource and sent
//! through a [`PushSender`]. [`FcmClient`] talks to the real provider;
//! [`LoggingSender`] stands in when no credentials are configured.

mod error;
mod fcm;
mod message;
mod sender;

#[cfg(feature = "test-support")]
pub mod test_support;

pub use error::MessagingError;
pub use fcm::FcmClient;
pub use message::{MessageId, PushMessage, PushNotification};
pub use sender::{LoggingSender, PushSender};
