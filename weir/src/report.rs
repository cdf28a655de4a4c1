//! Renders routing tables for the terminal

use owo_colors::OwoColorize;

use weir_core::{Destination, RingState, RoutingTableId, WeirError};

/// Collapse a ring into runs of consecutive buckets with the same owner
///
/// # Arguments
///
/// * `ring` - The ring to collapse
pub fn runs(ring: &RingState) -> Vec<(u32, u32, &Destination)> {
    let mut runs: Vec<(u32, u32, &Destination)> = Vec::new();
    for (bucket, owner) in &ring.bucket_map {
        match runs.last_mut() {
            // extend the current run if this bucket continues it
            Some((_, end, last)) if *last == owner && *end + 1 == *bucket => *end = *bucket,
            _ => runs.push((*bucket, *bucket, owner)),
        }
    }
    runs
}

/// Render a ring as colored text
///
/// # Arguments
///
/// * `table` - The table this ring is for
/// * `ring` - The ring to render
pub fn ring_state(table: &RoutingTableId, ring: &RingState) -> String {
    let mut out = format!(
        "{} {} ({} buckets)\n",
        "Ring for".bold(),
        table.bright_blue(),
        ring.len()
    );
    if ring.is_empty() {
        out.push_str(&format!("  {}\n", "no destinations are bound".dimmed()));
        return out;
    }
    for (start, end, owner) in runs(ring) {
        out.push_str(&format!("  {start:>6}..={end:<6} -> {}\n", owner.green()));
    }
    out.push_str(&format!("{}\n", "Weights".bold()));
    let total = f64::from(ring.len());
    for (owner, weight) in ring.weights() {
        let share = f64::from(weight) / total * 100.0;
        out.push_str(&format!("  {}: {weight} ({share:.2}%)\n", owner.green()));
    }
    // a ring with gaps can't be routed through correctly
    if !ring.is_dense() {
        out.push_str(&format!("{}\n", "ring is not densely numbered!".bright_red()));
    }
    out
}

/// Render a ring as json
///
/// # Arguments
///
/// * `table` - The table this ring is for
/// * `ring` - The ring to render
pub fn ring_state_json(table: &RoutingTableId, ring: &RingState) -> Result<String, WeirError> {
    let value = serde_json::json!({
        "table": table,
        "ring": ring,
        "weights": ring
            .weights()
            .into_iter()
            .map(|(owner, weight)| (owner.to_string(), weight))
            .collect::<std::collections::BTreeMap<_, _>>(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
