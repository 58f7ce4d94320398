mod assemble;
mod device;
mod query;

use time::OffsetDateTime;
use uuid::Uuid;

use vistra_domain::IdentificationLevel;
use vistra_store::Bookmark;

use crate::{Error, Result, SearchService};

/// One page request. `page_number` is 1-based; page 1 always restarts the
/// scan, so any caller-held bookmark is ignored there.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
	pub page_number: u32,
	/// Falls back to the configured default page size when absent.
	pub page_size: Option<u32>,
	/// Free-text term matched against first name, last name, and preferred
	/// email. Empty or `"*"` means no text constraint.
	#[serde(default, rename = "match")]
	pub match_text: String,
	#[serde(with = "vistra_domain::time_serde")]
	pub from_date: OffsetDateTime,
	#[serde(with = "vistra_domain::time_serde")]
	pub to_date: OffsetDateTime,
	#[serde(default)]
	pub filters: SearchFilters,
	pub bookmark: Option<Bookmark>,
}

/// Structured filters. Within one category the ids are a union; across
/// categories the clauses intersect. Ids are accepted as strings and parsed
/// up front so a malformed id fails the whole request.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SearchFilters {
	#[serde(default)]
	pub channel: Vec<String>,
	#[serde(default)]
	pub campaign: Vec<String>,
	#[serde(default)]
	pub outcome: Vec<String>,
	#[serde(default)]
	pub goal: Vec<String>,
	/// Device-type labels, e.g. `"Mobile"`. Matched against the classifier's
	/// output per interaction.
	#[serde(default)]
	pub device: Vec<String>,
}

/// One flattened result row. Latest-visit fields are only populated when the
/// contact carries engagement measures.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ContactSearchResult {
	pub contact_id: Uuid,
	pub identification_level: IdentificationLevel,
	pub first_name: Option<String>,
	pub middle_name: Option<String>,
	pub surname: Option<String>,
	pub preferred_email: Option<String>,
	pub job_title: Option<String>,
	pub value: i64,
	pub visit_count: i64,
	pub latest_visit_id: Option<Uuid>,
	#[serde(with = "vistra_domain::time_serde::option")]
	pub latest_visit_start_time: Option<OffsetDateTime>,
	#[serde(with = "vistra_domain::time_serde::option")]
	pub latest_visit_end_time: Option<OffsetDateTime>,
	pub latest_visit_page_view_count: Option<u64>,
	pub latest_visit_value: Option<i64>,
	pub value_per_visit: Option<f64>,
	pub latest_visit_city: Option<String>,
	pub latest_visit_country: Option<String>,
	pub latest_visit_region: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
	pub page_number: u32,
	pub page_size: u32,
	/// Matches across the whole store, not the page. Device filtering can
	/// drop rows from `results` without shrinking this count.
	pub total_result_count: u64,
	pub bookmark: Option<Bookmark>,
	pub results: Vec<ContactSearchResult>,
}

impl SearchService {
	/// Run one page of the contact search: build the store query, fetch one
	/// batch over a call-scoped session, classify and filter interactions by
	/// device, and flatten the survivors into result rows.
	pub async fn find(&self, req: SearchRequest) -> Result<SearchResponse> {
		let page_size = req.page_size.unwrap_or(self.cfg.search.default_page_size);

		if req.page_number == 0 {
			return Err(Error::InvalidRequest {
				message: "page_number is 1-based.".to_string(),
			});
		}
		if page_size == 0 {
			return Err(Error::InvalidRequest {
				message: "page_size must be greater than zero.".to_string(),
			});
		}
		if page_size > self.cfg.search.max_page_size {
			return Err(Error::InvalidRequest {
				message: format!(
					"page_size exceeds the maximum of {}.",
					self.cfg.search.max_page_size
				),
			});
		}

		let bookmark = if req.page_number == 1 { None } else { req.bookmark.clone() };
		let query = query::build_query(&req)?;

		tracing::debug!(
			page_number = req.page_number,
			page_size,
			resuming = bookmark.is_some(),
			"Built contact search query."
		);

		let mut session = self.store.open().await?;
		let batch = session.fetch_batch(&query, bookmark.as_ref(), page_size).await?;
		let mut results = Vec::with_capacity(batch.contacts.len());
		let mut dropped = 0_usize;

		for contact in &batch.contacts {
			match assemble::assemble_contact(self.detector.as_ref(), contact, &req.filters.device)
				.await
			{
				Some(row) => results.push(row),
				None => dropped += 1,
			}
		}

		tracing::info!(
			total_result_count = batch.total_count,
			kept = results.len(),
			dropped,
			"Assembled contact search page."
		);

		Ok(SearchResponse {
			page_number: req.page_number,
			page_size,
			total_result_count: batch.total_count,
			bookmark: batch.bookmark,
			results,
		})
	}
}
