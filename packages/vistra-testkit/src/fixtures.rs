use time::OffsetDateTime;
use uuid::Uuid;

use vistra_domain::{
	Contact, ContactIdentifier, EngagementMeasures, Event, EventKind, IdentifierType, Interaction,
	InteractionCacheEntry, InteractionsCache,
};

pub fn ts(unix: i64) -> OffsetDateTime {
	OffsetDateTime::from_unix_timestamp(unix).expect("timestamp in range")
}

pub fn known_identifier() -> ContactIdentifier {
	ContactIdentifier {
		source: "crm".to_string(),
		value: "user".to_string(),
		identifier_type: IdentifierType::Known,
	}
}

pub fn anonymous_identifier() -> ContactIdentifier {
	ContactIdentifier {
		source: "site".to_string(),
		value: "cookie".to_string(),
		identifier_type: IdentifierType::Anonymous,
	}
}

pub fn cache_entry(channel_id: Uuid) -> InteractionCacheEntry {
	InteractionCacheEntry {
		channel_id,
		campaign_ids: Vec::new(),
		outcome_ids: Vec::new(),
		goal_ids: Vec::new(),
	}
}

pub fn interaction(start_unix: i64, user_agent: &str, value: i64, page_views: usize) -> Interaction {
	let start = ts(start_unix);
	let events = (0..page_views)
		.map(|_| Event { kind: EventKind::PageView, timestamp: start })
		.collect();

	Interaction {
		id: Uuid::new_v4(),
		start_time: start,
		end_time: ts(start_unix + 600),
		events,
		engagement_value: value,
		user_agent: user_agent.to_string(),
		ip_info: None,
	}
}

/// A contact with interaction summaries, engagement totals, and expanded
/// interaction bodies listed most-recent-first.
pub fn contact(
	cache_entries: Vec<InteractionCacheEntry>,
	interactions: Vec<Interaction>,
) -> Contact {
	let most_recent = interactions
		.iter()
		.map(|interaction| interaction.start_time)
		.max()
		.unwrap_or_else(|| ts(0));
	let total_value = interactions.iter().map(|interaction| interaction.engagement_value).sum();

	Contact {
		id: Uuid::new_v4(),
		identifiers: vec![anonymous_identifier()],
		personal: None,
		emails: None,
		engagement: Some(EngagementMeasures {
			total_value,
			total_interaction_count: interactions.len() as i64,
			most_recent_interaction_start: most_recent,
		}),
		interactions_cache: Some(InteractionsCache { entries: cache_entries }),
		interactions,
	}
}
