use crate::models::{DerivedSummary, Entry};

pub fn summarize(entries: &[Entry]) -> DerivedSummary {
    let by_date = newest_first(entries);
    let latest = by_date.first().copied();
    let previous = by_date.get(1).copied();

    let ratios: Vec<f64> = entries.iter().filter_map(ratio).collect();
    let average_ratio = if ratios.is_empty() {
        None
    } else {
        Some(ratios.iter().sum::<f64>() / ratios.len() as f64)
    };

    DerivedSummary {
        delta_po4: delta(latest, previous, |entry| entry.po4),
        delta_no3: delta(latest, previous, |entry| entry.no3),
        current_ratio: latest.and_then(ratio),
        average_ratio,
        latest: latest.cloned(),
        previous: previous.cloned(),
    }
}

fn delta(
    latest: Option<&Entry>,
    previous: Option<&Entry>,
    field: impl Fn(&Entry) -> Option<f64>,
) -> Option<f64> {
    Some(field(latest?)? - field(previous?)?)
}

/// NO3:PO4 for one reading. Undefined without both fields or when PO4 is exactly zero.
pub fn ratio(entry: &Entry) -> Option<f64> {
    match (entry.po4, entry.no3) {
        (Some(po4), Some(no3)) if po4 != 0.0 => Some(no3 / po4),
        _ => None,
    }
}

/// Descending by date; equal dates keep their input order.
pub fn newest_first(entries: &[Entry]) -> Vec<&Entry> {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}
