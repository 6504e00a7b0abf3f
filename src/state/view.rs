//! View State
//!
//! Everything the dashboard shows, owned by a single value. Handlers mutate
//! it through the transition methods below; loads carry a [`RequestToken`]
//! and are ignored when a newer load or a navigation superseded them.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::generation::{Generation, RequestToken};
use crate::error::ValidationError;
use crate::models::{Area, DateRange, Event, Proposal, Statistics};

/// Visible panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum Panel {
    #[default]
    AreaSelection,
    AreaDashboard(String),
    Uncategorized,
}

/// Client-side status/type filter; an unset predicate matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    pub status: Option<String>,
    pub event_type: Option<String>,
}

impl EventFilter {
    /// Build from raw select values; empty strings mean "all"
    pub fn new(status: Option<&str>, event_type: Option<&str>) -> Self {
        let normalize = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_string);

        Self {
            status: normalize(status),
            event_type: normalize(event_type),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.event_type.is_none()
    }

    /// Exact match on both predicates
    pub fn matches(&self, event: &Event) -> bool {
        let status_match = self.status.as_deref().map_or(true, |s| event.status == s);
        let type_match = self
            .event_type
            .as_deref()
            .map_or(true, |t| event.event_type == t);

        status_match && type_match
    }
}

/// Events matching `filter`, in their original order
pub fn filter_events(events: &[Event], filter: &EventFilter) -> Vec<Event> {
    events.iter().filter(|e| filter.matches(e)).cloned().collect()
}

/// The three collections loaded when entering an area dashboard
#[derive(Debug, Clone, Default)]
pub struct AreaData {
    pub events: Vec<Event>,
    pub statistics: Statistics,
    pub proposals: Vec<Proposal>,
}

/// Event counters shown on the area selection cards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaCounts {
    per_area: HashMap<String, usize>,
    uncategorized: Option<usize>,
}

impl AreaCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, area: impl Into<String>, count: usize) {
        self.per_area.insert(area.into(), count);
    }

    pub fn set_uncategorized(&mut self, count: usize) {
        self.uncategorized = Some(count);
    }

    pub fn get(&self, area: &str) -> Option<usize> {
        self.per_area.get(area).copied()
    }

    pub fn uncategorized(&self) -> Option<usize> {
        self.uncategorized
    }

    /// Overlay fresher counts; areas missing from `other` keep their old value
    pub fn merge(&mut self, other: AreaCounts) {
        self.per_area.extend(other.per_area);
        if other.uncategorized.is_some() {
            self.uncategorized = other.uncategorized;
        }
    }
}

/// Complete dashboard view state
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    panel: Panel,
    areas: Vec<Area>,
    all_events: Vec<Event>,
    filtered_events: Vec<Event>,
    event_filter: EventFilter,
    date_filter: DateRange,
    statistics: Statistics,
    proposals: Vec<Proposal>,
    uncategorized: Vec<Event>,
    counts: AreaCounts,
    last_update: Option<DateTime<Local>>,
    loads: Generation,
    count_loads: Generation,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- accessors ----

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// Area whose dashboard is showing, if any
    pub fn current_area(&self) -> Option<&str> {
        match &self.panel {
            Panel::AreaDashboard(area) => Some(area),
            _ => None,
        }
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn all_events(&self) -> &[Event] {
        &self.all_events
    }

    pub fn filtered_events(&self) -> &[Event] {
        &self.filtered_events
    }

    pub fn event_filter(&self) -> &EventFilter {
        &self.event_filter
    }

    pub fn date_filter(&self) -> DateRange {
        self.date_filter
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn uncategorized(&self) -> &[Event] {
        &self.uncategorized
    }

    pub fn counts(&self) -> &AreaCounts {
        &self.counts
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }

    // ---- transitions ----

    /// Start a panel load (area dashboard or uncategorized list)
    pub fn begin_load(&mut self) -> RequestToken {
        self.loads.next()
    }

    /// Start a counter refresh
    pub fn begin_count(&mut self) -> RequestToken {
        self.count_loads.next()
    }

    /// Back to the area grid; in-flight panel loads become stale
    pub fn show_area_selection(&mut self) {
        self.panel = Panel::AreaSelection;
        self.loads.invalidate();
    }

    /// Install a freshly loaded area dashboard
    ///
    /// Replaces the event list wholesale and clears the status/type filter.
    /// Returns `false` and leaves the state untouched if `token` is stale.
    pub fn apply_area_data(&mut self, token: RequestToken, area: &str, data: AreaData) -> bool {
        if !self.loads.is_current(token) {
            tracing::debug!(area, token = token.value(), "Discarding stale area data");
            return false;
        }

        self.panel = Panel::AreaDashboard(area.to_string());
        self.event_filter = EventFilter::default();
        self.filtered_events = data.events.clone();
        self.all_events = data.events;
        self.statistics = data.statistics;
        self.proposals = data.proposals;
        true
    }

    /// Install the uncategorized event list and switch to its panel
    pub fn apply_uncategorized(&mut self, token: RequestToken, events: Vec<Event>) -> bool {
        if !self.loads.is_current(token) {
            tracing::debug!(token = token.value(), "Discarding stale uncategorized events");
            return false;
        }

        self.panel = Panel::Uncategorized;
        self.uncategorized = events;
        true
    }

    pub fn apply_counts(&mut self, token: RequestToken, counts: AreaCounts) -> bool {
        if !self.count_loads.is_current(token) {
            tracing::debug!(token = token.value(), "Discarding stale counters");
            return false;
        }

        self.counts.merge(counts);
        true
    }

    pub fn set_areas(&mut self, areas: Vec<Area>) {
        self.areas = areas;
    }

    /// Recompute the filtered list from the full list
    pub fn apply_event_filter(&mut self, filter: EventFilter) -> &[Event] {
        self.filtered_events = filter_events(&self.all_events, &filter);
        self.event_filter = filter;
        &self.filtered_events
    }

    /// Store a date filter after checking its bounds
    pub fn set_date_filter(&mut self, range: DateRange) -> Result<(), ValidationError> {
        if let (Some(start), Some(end)) = (range.start, range.end) {
            if start > end {
                return Err(ValidationError::InvalidDateRange { start, end });
            }
        }

        self.date_filter = range;
        Ok(())
    }

    pub fn touch(&mut self, at: DateTime<Local>) {
        self.last_update = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_events() -> Vec<Event> {
        vec![
            Event::new("Audiência A", "Em Andamento").event_type("Audiência Pública"),
            Event::new("Reunião B", "Encerrada").event_type("Reunião Deliberativa"),
            Event::new("Audiência C", "Encerrada").event_type("Audiência Pública"),
            Event::new("Sessão D", "Agendada").event_type("Sessão"),
        ]
    }

    fn dashboard_with(events: Vec<Event>) -> ViewState {
        let mut state = ViewState::new();
        let token = state.begin_load();
        let data = AreaData {
            events,
            ..Default::default()
        };
        assert!(state.apply_area_data(token, "Saúde", data));
        state
    }

    #[test]
    fn test_initial_state() {
        let state = ViewState::new();
        assert_eq!(state.panel(), &Panel::AreaSelection);
        assert_eq!(state.current_area(), None);
        assert!(state.date_filter().is_unset());
        assert!(state.last_update().is_none());
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let mut state = dashboard_with(sample_events());
        let filtered = state.apply_event_filter(EventFilter::new(Some(""), None)).to_vec();
        assert_eq!(filtered, sample_events());
    }

    #[test]
    fn test_filter_requires_both_predicates() {
        let mut state = dashboard_with(sample_events());
        let filter = EventFilter::new(Some("Encerrada"), Some("Audiência Pública"));

        let filtered = state.apply_event_filter(filter.clone()).to_vec();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Audiência C");

        // Same filter again yields the same list
        let again = state.apply_event_filter(filter).to_vec();
        assert_eq!(filtered, again);
        assert!(state.filtered_events().iter().all(|e| state.all_events().contains(e)));
    }

    #[test]
    fn test_filter_is_exact_match() {
        let events = sample_events();
        let filter = EventFilter::new(Some("encerrada"), None);
        assert!(filter_events(&events, &filter).is_empty());
    }

    #[test]
    fn test_area_load_replaces_events_and_resets_filter() {
        let mut state = dashboard_with(sample_events());
        state.apply_event_filter(EventFilter::new(Some("Encerrada"), None));
        assert_eq!(state.filtered_events().len(), 2);

        let token = state.begin_load();
        let data = AreaData {
            events: vec![Event::new("Nova", "Agendada")],
            ..Default::default()
        };
        assert!(state.apply_area_data(token, "Saúde", data));

        assert_eq!(state.all_events().len(), 1);
        assert_eq!(state.filtered_events().len(), 1);
        assert!(state.event_filter().is_empty());
    }

    #[test]
    fn test_navigation_makes_in_flight_load_stale() {
        let mut state = ViewState::new();
        let token = state.begin_load();
        state.show_area_selection();

        let data = AreaData {
            events: sample_events(),
            ..Default::default()
        };
        assert!(!state.apply_area_data(token, "Saúde", data));
        assert_eq!(state.panel(), &Panel::AreaSelection);
        assert!(state.all_events().is_empty());
    }

    #[test]
    fn test_older_load_loses_to_newer() {
        let mut state = ViewState::new();
        let older = state.begin_load();
        let newer = state.begin_load();

        let data = AreaData {
            events: vec![Event::new("B", "Agendada")],
            ..Default::default()
        };
        assert!(state.apply_area_data(newer, "Educação", data));
        assert!(!state.apply_uncategorized(older, vec![Event::new("A", "Agendada")]));
        assert_eq!(state.current_area(), Some("Educação"));
    }

    #[test]
    fn test_back_clears_current_area() {
        let mut state = dashboard_with(sample_events());
        assert_eq!(state.current_area(), Some("Saúde"));
        state.show_area_selection();
        assert_eq!(state.current_area(), None);
    }

    #[test]
    fn test_inverted_date_range_rejected() {
        let mut state = ViewState::new();
        let range = DateRange::parse(Some("2025-05-02"), Some("2025-05-01")).unwrap();
        let err = state.set_date_filter(range).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDateRange { .. }));
        assert!(state.date_filter().is_unset());

        let open_ended = DateRange::parse(Some("2025-05-02"), None).unwrap();
        assert!(state.set_date_filter(open_ended).is_ok());
        assert_eq!(state.date_filter(), open_ended);
    }

    #[test]
    fn test_counts_merge_keeps_failed_areas() {
        let mut state = ViewState::new();

        let mut first = AreaCounts::new();
        first.set("Saúde", 3);
        first.set("Educação", 5);
        first.set_uncategorized(2);
        let token = state.begin_count();
        assert!(state.apply_counts(token, first));

        let mut second = AreaCounts::new();
        second.set("Saúde", 1);
        let token = state.begin_count();
        assert!(state.apply_counts(token, second));

        assert_eq!(state.counts().get("Saúde"), Some(1));
        assert_eq!(state.counts().get("Educação"), Some(5));
        assert_eq!(state.counts().uncategorized(), Some(2));
    }
}
