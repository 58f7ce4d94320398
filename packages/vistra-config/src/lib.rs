mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, DeviceDetection, Search, Service, Store};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.store.api_base.trim().is_empty() {
		return Err(Error::Validation { message: "store.api_base must be non-empty.".to_string() });
	}
	if cfg.store.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "store.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.device_detection.enabled && cfg.device_detection.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "device_detection.api_base must be non-empty when enabled.".to_string(),
		});
	}
	if cfg.device_detection.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "device_detection.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.default_page_size == 0 {
		return Err(Error::Validation {
			message: "search.default_page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_page_size < cfg.search.default_page_size {
		return Err(Error::Validation {
			message: "search.max_page_size must be at least search.default_page_size.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.store.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.store.api_key = None;
	}
}
