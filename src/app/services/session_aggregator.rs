//! Session aggregation
//!
//! Collapses swing-level records into one record per calendar date. Numeric
//! fields are averaged over the values present; identity and text fields come
//! from the first record of the day.

use std::collections::HashMap;
use tracing::debug;

use crate::app::models::{FieldValue, Record, SessionRecord};
use crate::constants::IDENTITY_FIELDS;

/// Group records by calendar date and average their numeric fields
///
/// Sessions come back ordered by the timestamp of their first record. Records
/// without a date label are left out.
pub fn aggregate_by_session<R: AsRef<Record>>(records: &[R]) -> Vec<SessionRecord> {
    let mut groups: Vec<(&str, Vec<&Record>)> = Vec::new();
    let mut index_by_date: HashMap<&str, usize> = HashMap::new();
    let mut undated = 0usize;

    for record in records.iter().map(AsRef::as_ref) {
        let key = record.date_key();
        if key.is_empty() {
            undated += 1;
            continue;
        }

        let index = *index_by_date.entry(key).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[index].1.push(record);
    }

    if undated > 0 {
        debug!("Skipped {} records without a date label", undated);
    }

    let mut sessions: Vec<SessionRecord> = groups
        .into_iter()
        .map(|(key, members)| build_session(key, &members))
        .collect();

    sessions.sort_by_key(|session| session.record.timestamp);
    sessions
}

fn build_session(date_key: &str, members: &[&Record]) -> SessionRecord {
    let first = members[0];
    let mut record = Record::new(first.timestamp, date_key);

    for name in field_order(members) {
        if let Some(value) = carried_value(name, members) {
            record.insert(name, value);
        } else if let Some(mean) = mean_of(name, members) {
            record.insert(name, FieldValue::Number(mean));
        }
    }

    SessionRecord {
        record,
        swing_count: members.len(),
    }
}

/// Field names across the group, in first-seen order
fn field_order<'a>(members: &[&'a Record]) -> Vec<&'a str> {
    let mut names: Vec<&str> = Vec::new();
    for name in members.iter().flat_map(|record| record.field_names()) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Identity and text fields are copied from the first record that has them
fn carried_value(name: &str, members: &[&Record]) -> Option<FieldValue> {
    let value = members.iter().find_map(|record| record.get(name))?;
    match value {
        FieldValue::Text(_) => Some(value.clone()),
        _ if IDENTITY_FIELDS.contains(&name) => Some(value.clone()),
        _ => None,
    }
}

fn mean_of(name: &str, members: &[&Record]) -> Option<f64> {
    let (sum, count) = members
        .iter()
        .filter_map(|record| record.number(name))
        .filter(|value| value.is_finite())
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));

    (count > 0).then(|| sum / count as f64)
}
