use std::time::Duration;

use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap},
};

use crate::{
	Bookmark, BoxFuture, ContactBatch, ContactQuery, ContactStore, Error, Result, StoreSession,
};

/// Remote contact store speaking the collection query protocol over HTTP.
/// One session per search call; one POST per batch fetch.
pub struct RemoteContactStore {
	cfg: vistra_config::Store,
}

struct RemoteSession {
	client: Client,
	api_base: String,
	api_key: Option<String>,
}

#[derive(serde::Serialize)]
struct WireRequest<'a> {
	query: &'a ContactQuery,
	bookmark: Option<&'a Bookmark>,
	page_size: u32,
}

#[derive(serde::Deserialize)]
struct WireBatch {
	contacts: Vec<vistra_domain::Contact>,
	total_count: u64,
	bookmark: Option<Bookmark>,
}

impl RemoteContactStore {
	pub fn new(cfg: vistra_config::Store) -> Self {
		Self { cfg }
	}
}

impl ContactStore for RemoteContactStore {
	fn open<'a>(&'a self) -> BoxFuture<'a, Result<Box<dyn StoreSession>>> {
		Box::pin(async move {
			let client =
				Client::builder().timeout(Duration::from_millis(self.cfg.timeout_ms)).build()?;

			Ok(Box::new(RemoteSession {
				client,
				api_base: self.cfg.api_base.clone(),
				api_key: self.cfg.api_key.clone(),
			}) as Box<dyn StoreSession>)
		})
	}
}

impl StoreSession for RemoteSession {
	fn fetch_batch<'a>(
		&'a mut self,
		query: &'a ContactQuery,
		bookmark: Option<&'a Bookmark>,
		page_size: u32,
	) -> BoxFuture<'a, Result<ContactBatch>> {
		Box::pin(async move {
			if page_size == 0 {
				return Err(Error::InvalidArgument(
					"page_size must be greater than zero.".to_string(),
				));
			}

			let url = format!("{}/contacts/query", self.api_base);
			let body = WireRequest { query, bookmark, page_size };
			let res = self
				.client
				.post(url)
				.headers(auth_headers(self.api_key.as_deref()))
				.json(&body)
				.send()
				.await?;
			let batch: WireBatch = res
				.error_for_status()?
				.json()
				.await
				.map_err(|err| Error::Decode { message: err.to_string() })?;

			Ok(ContactBatch {
				contacts: batch.contacts,
				total_count: batch.total_count,
				bookmark: batch.bookmark,
			})
		})
	}
}

fn auth_headers(api_key: Option<&str>) -> HeaderMap {
	let mut headers = HeaderMap::new();

	if let Some(key) = api_key
		&& let Ok(value) = format!("Bearer {key}").parse()
	{
		headers.insert(AUTHORIZATION, value);
	}

	headers
}

#[cfg(test)]
mod tests {
	use crate::{Condition, ExpandOptions, Ordering, Predicate};

	use super::*;

	fn query() -> ContactQuery {
		ContactQuery {
			predicate: Predicate::Leaf(Condition::HasAnyInteraction),
			ordering: Ordering::MostRecentInteractionDesc,
			expand: ExpandOptions { facets: Vec::new(), interactions: None },
		}
	}

	#[tokio::test]
	async fn zero_page_size_is_rejected_before_any_request() {
		let store = RemoteContactStore::new(vistra_config::Store {
			api_base: "http://127.0.0.1:9".to_string(),
			api_key: None,
			timeout_ms: 100,
		});
		let query = query();
		let mut session = store.open().await.expect("session");

		assert!(matches!(
			session.fetch_batch(&query, None, 0).await,
			Err(Error::InvalidArgument(_))
		));
	}

	#[test]
	fn auth_header_is_set_only_with_a_key() {
		assert!(auth_headers(None).is_empty());
		assert_eq!(
			auth_headers(Some("key")).get(AUTHORIZATION).and_then(|value| value.to_str().ok()),
			Some("Bearer key"),
		);
	}
}
