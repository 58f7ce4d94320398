use std::{collections::HashMap, sync::Arc};

use uuid::Uuid;

use vistra_service::{SearchFilters, SearchRequest, SearchService};
use vistra_testkit::{MemoryContactStore, ScriptedDetector, fixtures};

fn config() -> vistra_config::Config {
	vistra_config::Config {
		service: vistra_config::Service { log_level: "info".to_string() },
		store: vistra_config::Store {
			api_base: "http://127.0.0.1:8100".to_string(),
			api_key: None,
			timeout_ms: 5_000,
		},
		device_detection: vistra_config::DeviceDetection {
			enabled: true,
			api_base: "http://127.0.0.1:8200".to_string(),
			timeout_ms: 1_000,
		},
		search: vistra_config::Search { default_page_size: 20, max_page_size: 100 },
	}
}

fn labels() -> HashMap<String, String> {
	HashMap::from([
		("iphone-ua".to_string(), "Mobile".to_string()),
		("chrome-ua".to_string(), "Desktop".to_string()),
	])
}

fn service(contacts: Vec<vistra_domain::Contact>, detector: ScriptedDetector) -> SearchService {
	SearchService::new(config(), Arc::new(MemoryContactStore::new(contacts)), Arc::new(detector))
}

fn request(page_number: u32, page_size: u32) -> SearchRequest {
	SearchRequest {
		page_number,
		page_size: Some(page_size),
		match_text: "*".to_string(),
		from_date: fixtures::ts(0),
		to_date: fixtures::ts(10_000_000_000),
		filters: SearchFilters::default(),
		bookmark: None,
	}
}

fn channel_a() -> Uuid {
	Uuid::from_u128(0xA)
}

#[tokio::test]
async fn results_come_back_most_recent_first() {
	let contacts = [1_700_000_000, 1_700_000_500, 1_700_000_200]
		.into_iter()
		.map(|start| {
			fixtures::contact(
				vec![fixtures::cache_entry(channel_a())],
				vec![fixtures::interaction(start, "chrome-ua", 1, 1)],
			)
		})
		.collect();
	let service = service(contacts, ScriptedDetector::ready(labels()));

	let response = service.find(request(1, 10)).await.expect("page");
	let starts: Vec<_> =
		response.results.iter().map(|row| row.latest_visit_start_time.expect("start")).collect();
	let mut sorted = starts.clone();

	sorted.sort_by(|a, b| b.cmp(a));

	assert_eq!(response.results.len(), 3);
	assert_eq!(starts, sorted);
}

#[tokio::test]
async fn category_filters_union_within_and_intersect_across() {
	let channel_b = Uuid::from_u128(0xB);
	let campaign = Uuid::from_u128(0x10);
	let mut entry_b_with_campaign = fixtures::cache_entry(channel_b);

	entry_b_with_campaign.campaign_ids.push(campaign);

	let on_b_with_campaign = fixtures::contact(
		vec![entry_b_with_campaign],
		vec![fixtures::interaction(1_700_000_000, "chrome-ua", 1, 1)],
	);
	let on_a_without_campaign = fixtures::contact(
		vec![fixtures::cache_entry(channel_a())],
		vec![fixtures::interaction(1_700_000_100, "chrome-ua", 1, 1)],
	);
	let expected = on_b_with_campaign.id;
	let service = service(
		vec![on_b_with_campaign, on_a_without_campaign],
		ScriptedDetector::ready(labels()),
	);

	let mut req = request(1, 10);

	// Channel A or B, and the campaign: the A-only contact has no campaign
	// match and must drop out.
	req.filters = SearchFilters {
		channel: vec![channel_a().to_string(), channel_b.to_string()],
		campaign: vec![campaign.to_string()],
		..SearchFilters::default()
	};

	let response = service.find(req).await.expect("page");

	assert_eq!(response.total_result_count, 1);
	assert_eq!(response.results.len(), 1);
	assert_eq!(response.results[0].contact_id, expected);
}

#[tokio::test]
async fn malformed_filter_id_rejects_the_request() {
	let service = service(Vec::new(), ScriptedDetector::ready(labels()));
	let mut req = request(1, 10);

	req.filters.channel = vec!["definitely-not-an-id".to_string()];

	assert!(service.find(req).await.is_err());
}

#[tokio::test]
async fn device_dropped_contacts_still_count_toward_the_total() {
	let mobile = fixtures::contact(
		vec![fixtures::cache_entry(channel_a())],
		vec![fixtures::interaction(1_700_000_000, "iphone-ua", 1, 1)],
	);
	let desktop_only = fixtures::contact(
		vec![fixtures::cache_entry(channel_a())],
		vec![fixtures::interaction(1_700_000_100, "chrome-ua", 1, 1)],
	);
	let expected = mobile.id;
	let service = service(vec![mobile, desktop_only], ScriptedDetector::ready(labels()));
	let mut req = request(1, 10);

	req.filters.device = vec!["Mobile".to_string()];

	let response = service.find(req).await.expect("page");

	// The desktop contact is dropped from the page but remains matched.
	assert_eq!(response.total_result_count, 2);
	assert_eq!(response.results.len(), 1);
	assert_eq!(response.results[0].contact_id, expected);
}

#[tokio::test]
async fn latest_visit_reflects_the_device_filtered_representative() {
	let desktop_newer = fixtures::interaction(1_700_000_600, "chrome-ua", 7, 3);
	let mobile_older = fixtures::interaction(1_700_000_000, "iphone-ua", 4, 2);
	let mobile_id = mobile_older.id;
	let contact = fixtures::contact(
		vec![fixtures::cache_entry(channel_a())],
		vec![desktop_newer, mobile_older],
	);
	let service = service(vec![contact], ScriptedDetector::ready(labels()));
	let mut req = request(1, 10);

	req.filters.device = vec!["Mobile".to_string()];

	let response = service.find(req).await.expect("page");
	let row = &response.results[0];

	assert_eq!(row.latest_visit_id, Some(mobile_id));
	assert_eq!(row.latest_visit_value, Some(4));
	assert_eq!(row.latest_visit_page_view_count, Some(2));
	// Totals still come from the contact-level measures.
	assert_eq!(row.value, 11);
	assert_eq!(row.visit_count, 2);
	assert_eq!(row.value_per_visit, Some(5.5));
}

#[tokio::test]
async fn second_page_continues_without_overlap() {
	let contacts = (0..8)
		.map(|index| {
			fixtures::contact(
				vec![fixtures::cache_entry(channel_a())],
				vec![fixtures::interaction(1_700_000_000 + index * 100, "chrome-ua", 1, 1)],
			)
		})
		.collect();
	let service = service(contacts, ScriptedDetector::ready(labels()));

	let first = service.find(request(1, 5)).await.expect("first page");

	assert_eq!(first.results.len(), 5);
	assert_eq!(first.total_result_count, 8);

	let mut req = request(2, 5);

	req.bookmark = first.bookmark.clone();

	let second = service.find(req).await.expect("second page");
	let first_ids: Vec<_> = first.results.iter().map(|row| row.contact_id).collect();

	assert_eq!(second.results.len(), 3);
	assert_eq!(second.total_result_count, 8);
	assert!(second.results.iter().all(|row| !first_ids.contains(&row.contact_id)));
	assert!(second.bookmark.is_none());
}

#[tokio::test]
async fn page_one_ignores_a_stale_bookmark() {
	let contacts = (0..6)
		.map(|index| {
			fixtures::contact(
				vec![fixtures::cache_entry(channel_a())],
				vec![fixtures::interaction(1_700_000_000 + index * 100, "chrome-ua", 1, 1)],
			)
		})
		.collect();
	let service = service(contacts, ScriptedDetector::ready(labels()));

	let first = service.find(request(1, 3)).await.expect("first page");
	let mut restart = request(1, 3);

	restart.bookmark = first.bookmark.clone();

	let again = service.find(restart).await.expect("restarted page");
	let first_ids: Vec<_> = first.results.iter().map(|row| row.contact_id).collect();
	let again_ids: Vec<_> = again.results.iter().map(|row| row.contact_id).collect();

	assert_eq!(first_ids, again_ids);
}

#[tokio::test]
async fn disabled_detection_treats_every_interaction_as_unknown() {
	let contact = fixtures::contact(
		vec![fixtures::cache_entry(channel_a())],
		vec![fixtures::interaction(1_700_000_000, "iphone-ua", 1, 1)],
	);
	let service = service(vec![contact], ScriptedDetector::disabled());
	let mut req = request(1, 10);

	req.filters.device = vec!["Mobile".to_string()];

	let response = service.find(req).await.expect("page");

	assert_eq!(response.results.len(), 0);
	assert_eq!(response.total_result_count, 1);
}

#[tokio::test]
async fn unknown_filter_matches_when_the_detector_never_warms_up() {
	let contact = fixtures::contact(
		vec![fixtures::cache_entry(channel_a())],
		vec![fixtures::interaction(1_700_000_000, "iphone-ua", 1, 1)],
	);
	let service = service(vec![contact], ScriptedDetector::never_ready());
	let mut req = request(1, 10);

	req.filters.device = vec!["Unknown".to_string()];

	let response = service.find(req).await.expect("page");

	assert_eq!(response.results.len(), 1);
}

#[tokio::test]
async fn text_match_narrows_by_name_or_email() {
	let mut ada = fixtures::contact(
		vec![fixtures::cache_entry(channel_a())],
		vec![fixtures::interaction(1_700_000_000, "chrome-ua", 1, 1)],
	);

	ada.personal = Some(vistra_domain::PersonalInformation {
		first_name: Some("Ada".to_string()),
		middle_name: None,
		last_name: Some("Lovelace".to_string()),
		job_title: None,
	});

	let other = fixtures::contact(
		vec![fixtures::cache_entry(channel_a())],
		vec![fixtures::interaction(1_700_000_100, "chrome-ua", 1, 1)],
	);
	let expected = ada.id;
	let service = service(vec![ada, other], ScriptedDetector::ready(labels()));
	let mut req = request(1, 10);

	req.match_text = "Ada".to_string();

	let response = service.find(req).await.expect("page");

	assert_eq!(response.total_result_count, 1);
	assert_eq!(response.results[0].contact_id, expected);
	assert_eq!(response.results[0].first_name, Some("Ada".to_string()));
}

#[tokio::test]
async fn page_size_bounds_are_enforced() {
	let service = service(Vec::new(), ScriptedDetector::ready(labels()));

	assert!(service.find(request(1, 0)).await.is_err());
	assert!(service.find(request(1, 101)).await.is_err());
	assert!(service.find(request(0, 10)).await.is_err());
}

#[tokio::test]
async fn omitted_page_size_uses_the_configured_default() {
	let contacts = (0..25)
		.map(|index| {
			fixtures::contact(
				vec![fixtures::cache_entry(channel_a())],
				vec![fixtures::interaction(1_700_000_000 + index * 100, "chrome-ua", 1, 1)],
			)
		})
		.collect();
	let service = service(contacts, ScriptedDetector::ready(labels()));
	let mut req = request(1, 10);

	req.page_size = None;

	let response = service.find(req).await.expect("page");

	assert_eq!(response.page_size, 20);
	assert_eq!(response.results.len(), 20);
}

#[test]
fn request_json_uses_the_match_key_and_defaults_the_filters() {
	let req: SearchRequest = serde_json::from_value(serde_json::json!({
		"page_number": 1,
		"page_size": null,
		"match": "ada",
		"from_date": "2023-01-01T00:00:00Z",
		"to_date": "2024-01-01T00:00:00Z",
		"bookmark": null,
	}))
	.expect("request");

	assert_eq!(req.match_text, "ada");
	assert_eq!(req.page_size, None);
	assert!(req.filters.channel.is_empty());
	assert!(req.filters.device.is_empty());

	let json = serde_json::to_value(&req).expect("serialize");

	assert_eq!(json["match"], "ada");
	assert_eq!(json["from_date"], "2023-01-01T00:00:00Z");
}

#[tokio::test]
async fn date_window_bounds_the_expanded_interactions() {
	let in_window = fixtures::interaction(1_700_000_000, "iphone-ua", 2, 1);
	let out_of_window = fixtures::interaction(1_500_000_000, "iphone-ua", 9, 4);
	let in_window_id = in_window.id;
	let contact = fixtures::contact(
		vec![fixtures::cache_entry(channel_a())],
		vec![in_window, out_of_window],
	);
	let service = service(vec![contact], ScriptedDetector::ready(labels()));
	let mut req = request(1, 10);

	req.from_date = fixtures::ts(1_600_000_000);
	req.to_date = fixtures::ts(1_800_000_000);

	let response = service.find(req).await.expect("page");

	assert_eq!(response.results[0].latest_visit_id, Some(in_window_id));
}
