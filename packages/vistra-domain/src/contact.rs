use uuid::Uuid;

use crate::{
	facets::{EmailAddressList, EngagementMeasures, InteractionsCache, PersonalInformation},
	interaction::Interaction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum IdentifierType {
	Known,
	Anonymous,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ContactIdentifier {
	pub source: String,
	pub value: String,
	pub identifier_type: IdentifierType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum IdentificationLevel {
	Known,
	Anonymous,
}

/// A tracked visitor/person entity. Facets are optional attachments; absence
/// is legitimate data, never an error. Interactions are expanded by the store
/// most-recent-first.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Contact {
	pub id: Uuid,
	#[serde(default)]
	pub identifiers: Vec<ContactIdentifier>,
	pub personal: Option<PersonalInformation>,
	pub emails: Option<EmailAddressList>,
	pub engagement: Option<EngagementMeasures>,
	pub interactions_cache: Option<InteractionsCache>,
	#[serde(default)]
	pub interactions: Vec<Interaction>,
}

impl Contact {
	pub fn personal(&self) -> Option<&PersonalInformation> {
		self.personal.as_ref()
	}

	pub fn emails(&self) -> Option<&EmailAddressList> {
		self.emails.as_ref()
	}

	pub fn engagement_measures(&self) -> Option<&EngagementMeasures> {
		self.engagement.as_ref()
	}

	pub fn interactions_cache(&self) -> Option<&InteractionsCache> {
		self.interactions_cache.as_ref()
	}

	pub fn identification_level(&self) -> IdentificationLevel {
		if self.identifiers.iter().any(|id| id.identifier_type == IdentifierType::Known) {
			IdentificationLevel::Known
		} else {
			IdentificationLevel::Anonymous
		}
	}
}
