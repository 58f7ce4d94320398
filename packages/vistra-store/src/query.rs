use time::OffsetDateTime;
use uuid::Uuid;

use vistra_domain::Contact;

/// Leaf predicates the store index can answer. Cache-backed conditions match
/// against the contact's interaction summaries, not expanded interaction
/// bodies.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Condition {
	HasAnyInteraction,
	FirstNameEquals(String),
	LastNameEquals(String),
	PreferredEmailEquals(String),
	ChannelIs(Uuid),
	CampaignIs(Uuid),
	OutcomeIs(Uuid),
	GoalIs(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "op", content = "args")]
pub enum Predicate {
	Leaf(Condition),
	All(Vec<Predicate>),
	Any(Vec<Predicate>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ordering {
	MostRecentInteractionDesc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKey {
	Personal,
	Emails,
	EngagementMeasures,
	InteractionsCache,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionFacetKey {
	IpInfo,
	ProfileScores,
	UserAgentInfo,
}

/// Date-range-bounded interaction expansion with companion facets. A `None`
/// limit means unbounded.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InteractionExpand {
	#[serde(with = "vistra_domain::time_serde")]
	pub start_time: OffsetDateTime,
	#[serde(with = "vistra_domain::time_serde")]
	pub end_time: OffsetDateTime,
	pub limit: Option<u32>,
	pub facets: Vec<InteractionFacetKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExpandOptions {
	pub facets: Vec<FacetKey>,
	pub interactions: Option<InteractionExpand>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactQuery {
	pub predicate: Predicate,
	pub ordering: Ordering,
	pub expand: ExpandOptions,
}

impl Condition {
	pub fn matches(&self, contact: &Contact) -> bool {
		match self {
			Self::HasAnyInteraction => contact
				.interactions_cache()
				.map(|cache| !cache.entries.is_empty())
				.unwrap_or(false),
			Self::FirstNameEquals(text) =>
				contact.personal().and_then(|p| p.first_name.as_deref()) == Some(text),
			Self::LastNameEquals(text) =>
				contact.personal().and_then(|p| p.last_name.as_deref()) == Some(text),
			Self::PreferredEmailEquals(text) => contact
				.emails()
				.and_then(|list| list.preferred_email.as_ref())
				.map(|email| email.smtp_address == *text)
				.unwrap_or(false),
			Self::ChannelIs(id) => cache_entry_any(contact, |entry| entry.channel_id == *id),
			Self::CampaignIs(id) => cache_entry_any(contact, |entry| entry.campaign_ids.contains(id)),
			Self::OutcomeIs(id) => cache_entry_any(contact, |entry| entry.outcome_ids.contains(id)),
			Self::GoalIs(id) => cache_entry_any(contact, |entry| entry.goal_ids.contains(id)),
		}
	}
}

impl Predicate {
	/// Local evaluation of the predicate against a fully-loaded contact. An
	/// empty `All` is true; an empty `Any` is false.
	pub fn matches(&self, contact: &Contact) -> bool {
		match self {
			Self::Leaf(condition) => condition.matches(contact),
			Self::All(nodes) => nodes.iter().all(|node| node.matches(contact)),
			Self::Any(nodes) => nodes.iter().any(|node| node.matches(contact)),
		}
	}
}

fn cache_entry_any(
	contact: &Contact,
	check: impl Fn(&vistra_domain::InteractionCacheEntry) -> bool,
) -> bool {
	contact.interactions_cache().map(|cache| cache.entries.iter().any(check)).unwrap_or(false)
}
