use std::{
	sync::atomic::{AtomicBool, Ordering},
	time::Duration,
};

use reqwest::Client;

use crate::{BoxFuture, DeviceDetector, Error, Result};

#[derive(serde::Deserialize)]
struct ClassifyResponse {
	device_type: String,
}

#[derive(serde::Deserialize)]
struct StatusResponse {
	ready: bool,
}

/// HTTP client for a remote device-classification service. Readiness is
/// probed from the status endpoint and cached; classification itself is one
/// GET per user agent.
pub struct RemoteDeviceDetector {
	cfg: vistra_config::DeviceDetection,
	ready: AtomicBool,
}

impl RemoteDeviceDetector {
	pub fn new(cfg: vistra_config::DeviceDetection) -> Self {
		Self { cfg, ready: AtomicBool::new(false) }
	}

	async fn probe_status(&self, timeout: Duration) -> Result<bool> {
		let client = Client::builder().timeout(timeout).build()?;
		let url = format!("{}/status", self.cfg.api_base);
		let res = client.get(url).send().await?;
		let status: StatusResponse = res
			.error_for_status()?
			.json()
			.await
			.map_err(|err| Error::Decode { message: err.to_string() })?;

		Ok(status.ready)
	}
}

impl DeviceDetector for RemoteDeviceDetector {
	fn is_enabled(&self) -> bool {
		self.cfg.enabled
	}

	fn is_ready(&self) -> bool {
		self.ready.load(Ordering::Acquire)
	}

	fn classify<'a>(&'a self, user_agent: &'a str) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move {
			let client =
				Client::builder().timeout(Duration::from_millis(self.cfg.timeout_ms)).build()?;
			let url = format!("{}/classify", self.cfg.api_base);
			let res = client.get(url).query(&[("user_agent", user_agent)]).send().await?;
			let parsed: ClassifyResponse = res
				.error_for_status()?
				.json()
				.await
				.map_err(|err| Error::Decode { message: err.to_string() })?;

			Ok(parsed.device_type)
		})
	}

	fn check_initialization<'a>(&'a self, timeout: Duration) -> BoxFuture<'a, ()> {
		Box::pin(async move {
			// A failed probe leaves the cached readiness untouched; the
			// caller's retry budget bounds how often this runs.
			if let Ok(ready) = self.probe_status(timeout).await {
				self.ready.store(ready, Ordering::Release);
			}
		})
	}
}
