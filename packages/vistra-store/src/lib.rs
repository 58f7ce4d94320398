mod error;
pub mod query;
pub mod remote;

pub use error::{Error, Result};
pub use query::{
	Condition, ContactQuery, ExpandOptions, FacetKey, InteractionExpand, InteractionFacetKey,
	Ordering, Predicate,
};
pub use remote::RemoteContactStore;

use std::{future::Future, pin::Pin};

use vistra_domain::Contact;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Opaque continuation token for resumable batch retrieval. Absent means
/// "start from the beginning"; the token format belongs to the store that
/// issued it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Bookmark(Vec<u8>);

impl Bookmark {
	pub fn from_bytes(bytes: Vec<u8>) -> Self {
		Self(bytes)
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}
}

/// One batch of contacts plus the total match count across the whole store
/// and the continuation token for the next batch.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ContactBatch {
	pub contacts: Vec<Contact>,
	pub total_count: u64,
	pub bookmark: Option<Bookmark>,
}

/// Connection factory for the contact store. A session is acquired per search
/// call and released by ownership when the caller's frame unwinds, on success
/// or error.
pub trait ContactStore
where
	Self: Send + Sync,
{
	fn open<'a>(&'a self) -> BoxFuture<'a, Result<Box<dyn StoreSession>>>;
}

/// One open store connection. `fetch_batch` performs exactly one logical
/// round-trip; there is no retry at this level.
pub trait StoreSession
where
	Self: Send,
{
	fn fetch_batch<'a>(
		&'a mut self,
		query: &'a ContactQuery,
		bookmark: Option<&'a Bookmark>,
		page_size: u32,
	) -> BoxFuture<'a, Result<ContactBatch>>;
}
