use std::sync::Arc;

use vistra_domain::Contact;
use vistra_store::{
	Bookmark, BoxFuture, ContactBatch, ContactQuery, ContactStore, Error, Ordering, Result,
	StoreSession,
};

/// In-process contact store with the same batch contract as the remote one:
/// predicate evaluation, ordering, offset-encoded bookmarks, and a total
/// match count independent of the page.
pub struct MemoryContactStore {
	contacts: Arc<Vec<Contact>>,
}

struct MemorySession {
	contacts: Arc<Vec<Contact>>,
}

impl MemoryContactStore {
	pub fn new(contacts: Vec<Contact>) -> Self {
		Self { contacts: Arc::new(contacts) }
	}
}

impl ContactStore for MemoryContactStore {
	fn open<'a>(&'a self) -> BoxFuture<'a, Result<Box<dyn StoreSession>>> {
		let contacts = self.contacts.clone();

		Box::pin(async move { Ok(Box::new(MemorySession { contacts }) as Box<dyn StoreSession>) })
	}
}

impl StoreSession for MemorySession {
	fn fetch_batch<'a>(
		&'a mut self,
		query: &'a ContactQuery,
		bookmark: Option<&'a Bookmark>,
		page_size: u32,
	) -> BoxFuture<'a, Result<ContactBatch>> {
		Box::pin(async move {
			let mut matched: Vec<&Contact> = self
				.contacts
				.iter()
				.filter(|contact| query.predicate.matches(contact))
				.collect();

			match query.ordering {
				Ordering::MostRecentInteractionDesc => {
					// Stable sort; contacts without engagement measures sort
					// last.
					matched.sort_by(|a, b| {
						let key_a =
							a.engagement_measures().map(|m| m.most_recent_interaction_start);
						let key_b =
							b.engagement_measures().map(|m| m.most_recent_interaction_start);

						key_b.cmp(&key_a)
					});
				},
			}

			let offset = match bookmark {
				Some(token) => decode_offset(token)?,
				None => 0,
			};
			let total = matched.len() as u64;
			let page: Vec<Contact> = matched
				.into_iter()
				.skip(offset)
				.take(page_size as usize)
				.map(|contact| expand_contact(contact, query))
				.collect();
			let consumed = offset + page.len();
			let bookmark = (consumed < total as usize)
				.then(|| Bookmark::from_bytes((consumed as u64).to_le_bytes().to_vec()));

			Ok(ContactBatch { contacts: page, total_count: total, bookmark })
		})
	}
}

fn decode_offset(bookmark: &Bookmark) -> Result<usize> {
	let bytes: [u8; 8] = bookmark
		.as_bytes()
		.try_into()
		.map_err(|_| Error::InvalidArgument("Bookmark was not issued by this store.".to_string()))?;

	Ok(u64::from_le_bytes(bytes) as usize)
}

/// Interaction bodies are only present when the query asked for expansion,
/// and then only within the requested window.
fn expand_contact(contact: &Contact, query: &ContactQuery) -> Contact {
	let mut expanded = contact.clone();

	match &query.expand.interactions {
		Some(window) => {
			expanded.interactions.retain(|interaction| {
				interaction.start_time >= window.start_time
					&& interaction.start_time <= window.end_time
			});

			if let Some(limit) = window.limit {
				expanded.interactions.truncate(limit as usize);
			}
		},
		None => expanded.interactions.clear(),
	}

	expanded
}
