/// Average engagement value per interaction, defined as 0 when the
/// interaction count is 0.
pub fn average_value(total_value: i64, interaction_count: i64) -> f64 {
	if interaction_count == 0 {
		return 0.0;
	}

	total_value as f64 / interaction_count as f64
}
