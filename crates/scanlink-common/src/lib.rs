pub mod errors;
pub mod id;
pub mod notifications;
pub mod types;

pub use errors::{ConfigError, ScanlinkError};
pub use id::{new_correlation_id, PairingCode};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
pub use types::{Color, Point, Rect};

pub type Result<T> = std::result::Result<T, ScanlinkError>;
