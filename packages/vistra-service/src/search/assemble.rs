use vistra_devices::DeviceDetector;
use vistra_domain::{Contact, EngagementMeasures, Interaction, IpInfo, average_value};

use crate::search::{ContactSearchResult, device};

/// Flatten one contact into a result row, or drop it when the device filter
/// leaves no interaction to represent it. The representative interaction is
/// the most recent surviving one; location comes from the last-listed
/// interaction carrying ip info, filtered or not.
pub(super) async fn assemble_contact(
	detector: &dyn DeviceDetector,
	contact: &Contact,
	device_filters: &[String],
) -> Option<ContactSearchResult> {
	let location =
		contact.interactions.iter().rev().find_map(|interaction| interaction.ip_info.as_ref());
	let filtered = device::filter_by_device(detector, &contact.interactions, device_filters).await;
	let representative = *filtered.first()?;
	let mut row = base_row(contact);

	if let Some(measures) = contact.engagement_measures() {
		populate_latest_visit(&mut row, representative, measures, location);
	}

	Some(row)
}

/// Facet-independent fields. Every facet is optional, so absence maps to
/// `None` or a zero total, never an error.
fn base_row(contact: &Contact) -> ContactSearchResult {
	let personal = contact.personal();
	let measures = contact.engagement_measures();

	ContactSearchResult {
		contact_id: contact.id,
		identification_level: contact.identification_level(),
		first_name: personal.and_then(|p| p.first_name.clone()),
		middle_name: personal.and_then(|p| p.middle_name.clone()),
		surname: personal.and_then(|p| p.last_name.clone()),
		preferred_email: contact
			.emails()
			.and_then(|list| list.preferred_email.as_ref())
			.map(|email| email.smtp_address.clone()),
		job_title: personal.and_then(|p| p.job_title.clone()),
		value: measures.map(|m| m.total_value).unwrap_or(0),
		visit_count: measures.map(|m| m.total_interaction_count).unwrap_or(0),
		latest_visit_id: None,
		latest_visit_start_time: None,
		latest_visit_end_time: None,
		latest_visit_page_view_count: None,
		latest_visit_value: None,
		value_per_visit: None,
		latest_visit_city: None,
		latest_visit_country: None,
		latest_visit_region: None,
	}
}

fn populate_latest_visit(
	row: &mut ContactSearchResult,
	interaction: &Interaction,
	measures: &EngagementMeasures,
	location: Option<&IpInfo>,
) {
	row.latest_visit_id = Some(interaction.id);
	row.latest_visit_start_time = Some(interaction.start_time);
	row.latest_visit_end_time = Some(interaction.end_time);
	row.latest_visit_page_view_count = Some(interaction.page_view_count() as u64);
	row.latest_visit_value = Some(interaction.engagement_value);
	row.value_per_visit =
		Some(average_value(measures.total_value, measures.total_interaction_count));

	if let Some(location) = location {
		row.latest_visit_city = location.city.clone();
		row.latest_visit_country = location.country.clone();
		row.latest_visit_region = location.region.clone();
	}
}
