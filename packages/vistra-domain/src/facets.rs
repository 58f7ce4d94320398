use time::OffsetDateTime;
use uuid::Uuid;

/// Aggregate engagement totals attached to a contact at indexing time.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EngagementMeasures {
	pub total_value: i64,
	pub total_interaction_count: i64,
	#[serde(with = "crate::time_serde")]
	pub most_recent_interaction_start: OffsetDateTime,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct PersonalInformation {
	pub first_name: Option<String>,
	pub middle_name: Option<String>,
	pub last_name: Option<String>,
	pub job_title: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EmailAddress {
	pub smtp_address: String,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct EmailAddressList {
	pub preferred_email: Option<EmailAddress>,
}

/// Per-interaction summaries usable for filtering without loading full
/// interaction bodies.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct InteractionsCache {
	pub entries: Vec<InteractionCacheEntry>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct InteractionCacheEntry {
	pub channel_id: Uuid,
	#[serde(default)]
	pub campaign_ids: Vec<Uuid>,
	#[serde(default)]
	pub outcome_ids: Vec<Uuid>,
	#[serde(default)]
	pub goal_ids: Vec<Uuid>,
}

/// Client network/location info resolved for one interaction.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct IpInfo {
	pub city: Option<String>,
	pub region: Option<String>,
	pub country: Option<String>,
}
