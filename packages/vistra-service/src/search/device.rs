use std::time::Duration;

use vistra_devices::{DeviceDetector, UNKNOWN_DEVICE_TYPE};
use vistra_domain::Interaction;

const WARMUP_ATTEMPTS: usize = 4;
const WARMUP_TIMEOUT: Duration = Duration::from_millis(300);

/// Classify one user agent, riding out classifier cold start with a bounded
/// number of initialization rounds. A disabled or still-cold classifier
/// yields `"Unknown"` rather than an error.
pub(super) async fn resolve_device_type(detector: &dyn DeviceDetector, user_agent: &str) -> String {
	if !detector.is_enabled() {
		return UNKNOWN_DEVICE_TYPE.to_string();
	}
	if detector.is_ready() {
		return classify_or_unknown(detector, user_agent).await;
	}

	for _ in 0..WARMUP_ATTEMPTS {
		detector.check_initialization(WARMUP_TIMEOUT).await;

		if detector.is_ready() {
			return classify_or_unknown(detector, user_agent).await;
		}
	}

	UNKNOWN_DEVICE_TYPE.to_string()
}

/// Classification is advisory; a transport failure must not fail the page.
async fn classify_or_unknown(detector: &dyn DeviceDetector, user_agent: &str) -> String {
	match detector.classify(user_agent).await {
		Ok(label) => label,
		Err(err) => {
			tracing::warn!(error = %err, "Device classification failed, treating as Unknown.");

			UNKNOWN_DEVICE_TYPE.to_string()
		},
	}
}

/// Keep the interactions whose classified device type is in the requested
/// set. No requested labels means no device constraint.
pub(super) async fn filter_by_device<'a>(
	detector: &dyn DeviceDetector,
	interactions: &'a [Interaction],
	requested: &[String],
) -> Vec<&'a Interaction> {
	if requested.is_empty() {
		return interactions.iter().collect();
	}

	let mut kept = Vec::new();

	for interaction in interactions {
		let device_type = resolve_device_type(detector, &interaction.user_agent).await;

		if requested.iter().any(|label| *label == device_type) {
			kept.push(interaction);
		}
	}

	kept
}
