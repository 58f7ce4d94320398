use std::{
	collections::HashMap,
	sync::atomic::{AtomicBool, AtomicUsize, Ordering},
	time::Duration,
};

use vistra_devices::{BoxFuture, DeviceDetector, Result, UNKNOWN_DEVICE_TYPE};

/// Deterministic detector for tests: a fixed user-agent → device-type table
/// plus a scripted readiness sequence.
pub struct ScriptedDetector {
	enabled: bool,
	ready: AtomicBool,
	ready_after_checks: Option<usize>,
	checks: AtomicUsize,
	labels: HashMap<String, String>,
}

impl ScriptedDetector {
	pub fn disabled() -> Self {
		Self {
			enabled: false,
			ready: AtomicBool::new(false),
			ready_after_checks: None,
			checks: AtomicUsize::new(0),
			labels: HashMap::new(),
		}
	}

	pub fn ready(labels: HashMap<String, String>) -> Self {
		Self {
			enabled: true,
			ready: AtomicBool::new(true),
			ready_after_checks: None,
			checks: AtomicUsize::new(0),
			labels,
		}
	}

	/// Enabled but cold: becomes ready after `checks` initialization rounds.
	pub fn warming(checks: usize, labels: HashMap<String, String>) -> Self {
		Self {
			enabled: true,
			ready: AtomicBool::new(false),
			ready_after_checks: Some(checks),
			checks: AtomicUsize::new(0),
			labels,
		}
	}

	/// Enabled and never becomes ready, no matter how often it is probed.
	pub fn never_ready() -> Self {
		Self {
			enabled: true,
			ready: AtomicBool::new(false),
			ready_after_checks: None,
			checks: AtomicUsize::new(0),
			labels: HashMap::new(),
		}
	}

	pub fn check_count(&self) -> usize {
		self.checks.load(Ordering::Acquire)
	}
}

impl DeviceDetector for ScriptedDetector {
	fn is_enabled(&self) -> bool {
		self.enabled
	}

	fn is_ready(&self) -> bool {
		self.ready.load(Ordering::Acquire)
	}

	fn classify<'a>(&'a self, user_agent: &'a str) -> BoxFuture<'a, Result<String>> {
		let label = self
			.labels
			.get(user_agent)
			.cloned()
			.unwrap_or_else(|| UNKNOWN_DEVICE_TYPE.to_string());

		Box::pin(async move { Ok(label) })
	}

	fn check_initialization<'a>(&'a self, _timeout: Duration) -> BoxFuture<'a, ()> {
		Box::pin(async move {
			let seen = self.checks.fetch_add(1, Ordering::AcqRel) + 1;

			if let Some(threshold) = self.ready_after_checks
				&& seen >= threshold
			{
				self.ready.store(true, Ordering::Release);
			}
		})
	}
}
