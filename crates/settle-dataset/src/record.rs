//! Normalization of raw activity exports.
//!
//! Activity exports are JSON arrays of flat objects whose keys are the
//! scraped CSS class names of the export page. Several key variants exist for
//! the same field; the first non-empty string wins.

use indexmap::IndexMap;
use log::{debug, info};
use serde_json::{Map, Value};

use crate::{
    activity::{
        Action, ActivityData, ActivityEvent, CLUSTER_COUNT, CLUSTER_LABELS, ClusterId,
        ClusterInfo, Metadata, ProductSummary, assign_cluster,
    },
    error::DatasetError,
    time::parse_hour,
};

const PRODUCT_KEYS: &[&str] = &["hJ7x8b", "product", "source"];
const TITLE_KEYS: &[&str] = &["QTGV3c", "hFYxqd", "title"];
const ACTION_KEYS: &[&str] = &["QTGV3c", "hFYxqd"];
const HREF_KEYS: &[&str] = &["l8sGWb href", "l8sGWb href (2)", "href"];
const TIME_KEYS: &[&str] = &["OXlB7d", "H3Q9vf"];

const UNKNOWN_PRODUCT: &str = "Unknown";

/// Returns the first non-empty string value among `keys`
fn first_str<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| record.get(*key).and_then(Value::as_str))
        .find(|value| !value.is_empty())
}

/// Parses an activity export and normalizes it.
///
/// # Errors
///
/// Returns [`DatasetError`] if the source is not valid JSON, is not an array,
/// or contains a non-object element.
pub fn normalize(source: &str) -> Result<ActivityData, DatasetError> {
    let value: Value = serde_json::from_str(source)?;
    let Value::Array(records) = value else {
        return Err(DatasetError::NotAnArray);
    };
    normalize_records(&records)
}

/// Normalizes already-parsed export records.
///
/// # Errors
///
/// Returns [`DatasetError::NotAnObject`] for the first element that is not a
/// JSON object.
pub fn normalize_records(records: &[Value]) -> Result<ActivityData, DatasetError> {
    let events = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let record = record
                .as_object()
                .ok_or(DatasetError::NotAnObject { index })?;
            Ok(normalize_event(index, record))
        })
        .collect::<Result<Vec<_>, DatasetError>>()?;

    let products = summarize_products(&events);
    let clusters = summarize_clusters(&events);

    let metadata = Metadata {
        total_events: events.len(),
        clusters: clusters.len(),
        products: products.len(),
    };

    info!(
        total_events = metadata.total_events,
        clusters = metadata.clusters,
        products = metadata.products;
        "Activity export normalized"
    );

    Ok(ActivityData {
        metadata,
        clusters,
        products,
        events,
    })
}

fn normalize_event(id: usize, record: &Map<String, Value>) -> ActivityEvent {
    let product = first_str(record, PRODUCT_KEYS)
        .unwrap_or(UNKNOWN_PRODUCT)
        .to_string();
    let title = first_str(record, TITLE_KEYS).unwrap_or_default().to_string();
    let href = first_str(record, HREF_KEYS).unwrap_or_default().to_string();
    let action = Action::from_title(first_str(record, ACTION_KEYS).unwrap_or_default());
    let hour = first_str(record, TIME_KEYS).map(parse_hour).unwrap_or(0);
    let cluster = assign_cluster(&product, action, hour);

    ActivityEvent {
        id,
        product,
        title,
        href,
        action,
        hour,
        cluster,
    }
}

/// Counts events per product, most frequent first. Ties keep first-seen order.
fn summarize_products(events: &[ActivityEvent]) -> Vec<ProductSummary> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for event in events {
        *counts.entry(event.product.as_str()).or_default() += 1;
    }

    let mut products: Vec<ProductSummary> = counts
        .into_iter()
        .map(|(name, count)| ProductSummary {
            name: name.to_string(),
            count,
        })
        .collect();
    products.sort_by(|a, b| b.count.cmp(&a.count));
    products
}

/// Returns the key with the highest count; ties resolve to the first inserted.
fn dominant<K: Clone>(counts: &IndexMap<K, usize>) -> Option<K> {
    counts
        .iter()
        .fold(None, |best: Option<(&K, usize)>, (key, &count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((key, count)),
        })
        .map(|(key, _)| key.clone())
}

fn summarize_clusters(events: &[ActivityEvent]) -> Vec<ClusterInfo> {
    (0..CLUSTER_COUNT)
        .filter_map(|index| {
            let id = index as ClusterId;
            let members: Vec<&ActivityEvent> =
                events.iter().filter(|event| event.cluster == id).collect();
            if members.is_empty() {
                return None;
            }

            let mut products: IndexMap<&str, usize> = IndexMap::new();
            let mut actions: IndexMap<Action, usize> = IndexMap::new();
            let mut hours = [0usize; 24];
            for event in &members {
                *products.entry(event.product.as_str()).or_default() += 1;
                *actions.entry(event.action).or_default() += 1;
                hours[usize::from(event.hour)] += 1;
            }

            // Strictly greater keeps the lowest hour among ties
            let peak_hour = (0u8..24).fold(0u8, |best, hour| {
                if hours[usize::from(hour)] > hours[usize::from(best)] {
                    hour
                } else {
                    best
                }
            });

            let info = ClusterInfo {
                id,
                label: CLUSTER_LABELS[index].to_string(),
                size: members.len(),
                dominant_product: dominant(&products)
                    .unwrap_or(UNKNOWN_PRODUCT)
                    .to_string(),
                dominant_action: dominant(&actions).unwrap_or(Action::Other),
                peak_hour,
            };
            debug!(
                cluster = info.id,
                size = info.size,
                peak_hour = info.peak_hour;
                "Cluster summarized"
            );
            Some(info)
        })
        .collect()
}
