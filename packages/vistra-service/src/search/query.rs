use uuid::Uuid;

use vistra_store::{
	Condition, ContactQuery, ExpandOptions, FacetKey, InteractionExpand, InteractionFacetKey,
	Ordering, Predicate,
};

use crate::{Error, Result, search::SearchRequest};

/// Translate a search request into the store query. The base clause restricts
/// the scan to contacts with at least one interaction summary; text and
/// category clauses are added on top and AND-ed together.
pub(super) fn build_query(req: &SearchRequest) -> Result<ContactQuery> {
	let mut clauses = vec![Predicate::Leaf(Condition::HasAnyInteraction)];
	let text = req.match_text.trim();

	if !text.is_empty() && text != "*" {
		clauses.push(Predicate::Any(vec![
			Predicate::Leaf(Condition::FirstNameEquals(text.to_string())),
			Predicate::Leaf(Condition::LastNameEquals(text.to_string())),
			Predicate::Leaf(Condition::PreferredEmailEquals(text.to_string())),
		]));
	}

	for (label, ids, condition) in [
		("channel", &req.filters.channel, Condition::ChannelIs as fn(Uuid) -> Condition),
		("campaign", &req.filters.campaign, Condition::CampaignIs),
		("outcome", &req.filters.outcome, Condition::OutcomeIs),
		("goal", &req.filters.goal, Condition::GoalIs),
	] {
		if let Some(clause) = category_clause(label, ids, condition)? {
			clauses.push(clause);
		}
	}

	Ok(ContactQuery {
		predicate: Predicate::All(clauses),
		ordering: Ordering::MostRecentInteractionDesc,
		expand: ExpandOptions {
			facets: vec![FacetKey::EngagementMeasures, FacetKey::Personal, FacetKey::Emails],
			interactions: Some(InteractionExpand {
				start_time: req.from_date,
				end_time: req.to_date,
				limit: None,
				facets: vec![
					InteractionFacetKey::IpInfo,
					InteractionFacetKey::ProfileScores,
					InteractionFacetKey::UserAgentInfo,
				],
			}),
		},
	})
}

/// Ids within one category form a union; an empty category contributes no
/// clause at all. A malformed id fails the request before any store call.
fn category_clause(
	label: &str,
	ids: &[String],
	condition: fn(Uuid) -> Condition,
) -> Result<Option<Predicate>> {
	if ids.is_empty() {
		return Ok(None);
	}

	let mut alternatives = Vec::with_capacity(ids.len());

	for raw in ids {
		let id = Uuid::parse_str(raw).map_err(|_| Error::InvalidRequest {
			message: format!("{label} filter id {raw:?} is not a valid id."),
		})?;

		alternatives.push(Predicate::Leaf(condition(id)));
	}

	Ok(Some(Predicate::Any(alternatives)))
}
