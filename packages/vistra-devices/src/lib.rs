mod error;
pub mod remote;

pub use error::{Error, Result};
pub use remote::RemoteDeviceDetector;

use std::{future::Future, pin::Pin, time::Duration};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Label returned when classification is unavailable or inconclusive.
pub const UNKNOWN_DEVICE_TYPE: &str = "Unknown";

/// Client interface to the device-classification backend. The backend may be
/// disabled outright, or enabled but still warming up; callers are expected
/// to consult `is_enabled`/`is_ready` and drive `check_initialization`
/// themselves.
pub trait DeviceDetector
where
	Self: Send + Sync,
{
	fn is_enabled(&self) -> bool;

	fn is_ready(&self) -> bool;

	fn classify<'a>(&'a self, user_agent: &'a str) -> BoxFuture<'a, Result<String>>;

	/// Trigger/await one initialization round, bounded by `timeout`. Never
	/// errors; the caller re-checks `is_ready` afterwards.
	fn check_initialization<'a>(&'a self, timeout: Duration) -> BoxFuture<'a, ()>;
}
