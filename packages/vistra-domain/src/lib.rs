pub mod contact;
pub mod facets;
pub mod interaction;
pub mod metrics;
pub mod time_serde;

pub use contact::{Contact, ContactIdentifier, IdentificationLevel, IdentifierType};
pub use facets::{
	EmailAddress, EmailAddressList, EngagementMeasures, InteractionCacheEntry, InteractionsCache,
	IpInfo, PersonalInformation,
};
pub use interaction::{Event, EventKind, Interaction};
pub use metrics::average_value;
