//! Canonical in-memory activity data.
//!
//! [`ActivityData`] is the normalized shape every consumer reads, independent
//! of the export format it was derived from.

use serde::Serialize;

/// What the user did in a single activity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Watched,
    Visited,
    Searched,
    Other,
}

impl Action {
    /// Derives the action from a record title.
    ///
    /// Matching is case-insensitive and checks `watched`, `visited` and
    /// `search` in that order.
    pub fn from_title(title: &str) -> Self {
        let title = title.to_lowercase();
        if title.contains("watched") {
            Action::Watched
        } else if title.contains("visited") {
            Action::Visited
        } else if title.contains("search") {
            Action::Searched
        } else {
            Action::Other
        }
    }
}

/// Behavioral cluster identifier in `0..CLUSTER_COUNT`.
pub type ClusterId = u8;

/// Number of behavioral clusters events are assigned to.
pub const CLUSTER_COUNT: usize = 8;

/// Display labels for the behavioral clusters, indexed by [`ClusterId`].
pub const CLUSTER_LABELS: [&str; CLUSTER_COUNT] = [
    "Evening viewing",
    "Daytime viewing",
    "Search focus",
    "Browsing",
    "Queries",
    "Night owl",
    "Working hours",
    "Off-hours",
];

/// Assigns an event to a behavioral cluster from its product, action and hour.
///
/// Rules are checked in order; the first match wins.
pub fn assign_cluster(product: &str, action: Action, hour: u8) -> ClusterId {
    match (product, action, hour) {
        ("YouTube", _, 20..) => 0,
        ("YouTube", _, _) => 1,
        ("Search", _, _) => 2,
        ("Chrome", _, _) => 3,
        (_, Action::Searched, _) => 4,
        (_, _, 22.. | ..=6) => 5,
        (_, _, 9..=17) => 6,
        _ => 7,
    }
}

/// A single normalized activity record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEvent {
    pub id: usize,
    pub product: String,
    pub title: String,
    pub href: String,
    pub action: Action,
    pub hour: u8,
    pub cluster: ClusterId,
}

/// Summary of one non-empty behavioral cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterInfo {
    pub id: ClusterId,
    pub label: String,
    pub size: usize,
    pub dominant_product: String,
    pub dominant_action: Action,
    pub peak_hour: u8,
}

/// Event count for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    pub total_events: usize,
    pub clusters: usize,
    pub products: usize,
}

/// Normalized activity dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityData {
    pub metadata: Metadata,
    /// Non-empty clusters in id order
    pub clusters: Vec<ClusterInfo>,
    /// Products by descending event count
    pub products: Vec<ProductSummary>,
    pub events: Vec<ActivityEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_title() {
        assert_eq!(Action::from_title("Watched Some Video"), Action::Watched);
        assert_eq!(Action::from_title("Visited example.com"), Action::Visited);
        assert_eq!(Action::from_title("Searched for rust"), Action::Searched);
        assert_eq!(Action::from_title("Google Search"), Action::Searched);
        assert_eq!(Action::from_title("Used Maps"), Action::Other);
        assert_eq!(Action::from_title(""), Action::Other);
    }

    #[test]
    fn test_assign_cluster_rules_in_order() {
        assert_eq!(assign_cluster("YouTube", Action::Watched, 21), 0);
        assert_eq!(assign_cluster("YouTube", Action::Searched, 8), 1);
        assert_eq!(assign_cluster("Search", Action::Other, 23), 2);
        assert_eq!(assign_cluster("Chrome", Action::Visited, 10), 3);
        assert_eq!(assign_cluster("Maps", Action::Searched, 3), 4);
        assert_eq!(assign_cluster("Maps", Action::Other, 23), 5);
        assert_eq!(assign_cluster("Maps", Action::Other, 6), 5);
        assert_eq!(assign_cluster("Maps", Action::Other, 12), 6);
        assert_eq!(assign_cluster("Maps", Action::Other, 7), 7);
        assert_eq!(assign_cluster("Maps", Action::Other, 19), 7);
    }
}
