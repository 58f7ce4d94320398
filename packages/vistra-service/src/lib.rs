//! Paged contact search over an external contact store, with per-interaction
//! device classification folded into the results.

pub mod search;

mod error;

pub use error::{Error, Result};
pub use search::{ContactSearchResult, SearchFilters, SearchRequest, SearchResponse};

use std::sync::Arc;

use vistra_devices::DeviceDetector;
use vistra_store::ContactStore;

/// The search entry point. Holds long-lived handles only; store sessions are
/// acquired per call.
pub struct SearchService {
	cfg: vistra_config::Config,
	store: Arc<dyn ContactStore>,
	detector: Arc<dyn DeviceDetector>,
}

impl SearchService {
	pub fn new(
		cfg: vistra_config::Config,
		store: Arc<dyn ContactStore>,
		detector: Arc<dyn DeviceDetector>,
	) -> Self {
		Self { cfg, store, detector }
	}
}
