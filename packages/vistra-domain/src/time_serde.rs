//! RFC3339 (de)serialization for interaction and engagement timestamps.

pub mod option;

use serde::{Deserialize, Deserializer, Serializer};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub fn serialize<S>(timestamp: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let text = timestamp.format(&Rfc3339).map_err(serde::ser::Error::custom)?;

	serializer.serialize_str(&text)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	let text = String::deserialize(deserializer)?;

	OffsetDateTime::parse(&text, &Rfc3339).map_err(serde::de::Error::custom)
}
