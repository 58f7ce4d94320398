use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub store: Store,
	pub device_detection: DeviceDetection,
	pub search: Search,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Store {
	pub api_base: String,
	pub api_key: Option<String>,
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DeviceDetection {
	pub enabled: bool,
	pub api_base: String,
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	pub default_page_size: u32,
	pub max_page_size: u32,
}
