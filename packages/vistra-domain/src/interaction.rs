use time::OffsetDateTime;
use uuid::Uuid;

use crate::facets::IpInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
	PageView,
	Goal,
	Outcome,
	Other,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Event {
	pub kind: EventKind,
	#[serde(with = "crate::time_serde")]
	pub timestamp: OffsetDateTime,
}

/// One recorded visit/session belonging to a contact.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Interaction {
	pub id: Uuid,
	#[serde(with = "crate::time_serde")]
	pub start_time: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub end_time: OffsetDateTime,
	pub events: Vec<Event>,
	pub engagement_value: i64,
	pub user_agent: String,
	pub ip_info: Option<IpInfo>,
}

impl Interaction {
	pub fn page_view_count(&self) -> usize {
		self.events.iter().filter(|event| event.kind == EventKind::PageView).count()
	}
}

#[cfg(test)]
mod tests {
	use time::OffsetDateTime;
	use uuid::Uuid;

	use super::*;

	fn event(kind: EventKind) -> Event {
		Event {
			kind,
			timestamp: OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("timestamp"),
		}
	}

	#[test]
	fn counts_only_page_view_events() {
		let interaction = Interaction {
			id: Uuid::new_v4(),
			start_time: OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("timestamp"),
			end_time: OffsetDateTime::from_unix_timestamp(1_700_000_600).expect("timestamp"),
			events: vec![
				event(EventKind::PageView),
				event(EventKind::Goal),
				event(EventKind::PageView),
				event(EventKind::Other),
			],
			engagement_value: 10,
			user_agent: "agent".to_string(),
			ip_info: None,
		};

		assert_eq!(interaction.page_view_count(), 2);
	}
}
