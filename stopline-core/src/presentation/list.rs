//! Ordered list view of an itinerary.

use crate::{StopId, StopStore};

use super::navigation::NavigationLinkBuilder;

/// One row of the itinerary list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StopRow {
    /// One-based position in the itinerary.
    pub position: usize,
    /// Stop identifier.
    pub id: StopId,
    /// Address as entered.
    pub address: String,
    /// Arrival time as `HH:MM`, when a fresh ETA exists.
    pub eta: Option<String>,
    /// Dwell time label, for example `+5 min`.
    pub dwell: String,
    /// Whether the stop has a coordinate.
    pub resolved: bool,
    /// Whether the user has marked the stop as visited.
    pub visited: bool,
    /// Directions link for the address.
    pub navigation_url: String,
}

/// The itinerary as a list, in stop order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ItineraryView {
    /// Rows in itinerary order.
    pub rows: Vec<StopRow>,
    /// The configured delay per stop, in minutes.
    pub delay_per_stop_minutes: u8,
}

impl ItineraryView {
    /// Render every stop in `store`.
    ///
    /// Stale ETAs, left over from before a reorder or delay change, are
    /// omitted.
    ///
    /// # Examples
    /// ```
    /// use stopline_core::{ItineraryView, NavigationLinkBuilder, StopStore};
    ///
    /// let mut store = StopStore::new();
    /// store.append("Depot", None);
    /// let view = ItineraryView::render(&store, &NavigationLinkBuilder::default());
    /// assert_eq!(view.rows[0].position, 1);
    /// assert_eq!(view.rows[0].eta, None);
    /// ```
    #[must_use]
    pub fn render(store: &StopStore, links: &NavigationLinkBuilder) -> Self {
        let delay = store.delay_per_stop().minutes();
        let rows = store
            .iter()
            .enumerate()
            .map(|(index, stop)| StopRow {
                position: index.saturating_add(1),
                id: stop.id(),
                address: stop.address().to_owned(),
                eta: store
                    .eta(stop.id())
                    .map(|eta| eta.format("%H:%M").to_string()),
                dwell: format!("+{delay} min"),
                resolved: stop.is_resolved(),
                visited: stop.visited(),
                navigation_url: links.directions_to(stop.address()),
            })
            .collect();
        Self {
            rows,
            delay_per_stop_minutes: delay,
        }
    }
}
