//! Online-set broadcasting.

pub mod broadcaster;

pub use broadcaster::PresenceBroadcaster;
