//! Outbound notifications and input debouncing.

mod bridge;
mod debounce;

pub use bridge::NotificationBridge;
pub use debounce::Debouncer;
