//! Renderer
//!
//! Pure model → view-model mapping. Nothing here touches the network or the
//! view state; the [`html`] and [`text`] submodules turn the view-models into
//! HTML fragments and terminal output respectively.

pub mod html;
pub mod text;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::form::char_prefix;
use crate::models::{Area, Body, Event, Proposal, Stance, Statistics};
use crate::state::{Panel, ViewState};

/// Placeholder for empty cells
pub const MISSING: &str = "-";
pub const DEFAULT_AREA_DESCRIPTION: &str = "Área técnica do municipalismo";
pub const UNCATEGORIZED_TITLE: &str = "Eventos Não Categorizados";
pub const UNCATEGORIZED_DESCRIPTION: &str = "Eventos que ainda não foram classificados em áreas técnicas";
pub const UNCATEGORIZED_COUNT_ID: &str = "count-uncategorized";
pub const NO_EVENTS_MESSAGE: &str = "Nenhum evento encontrado para o período selecionado.";
pub const LINK_LABEL: &str = "Ver detalhes do evento";
pub const LINK_UNAVAILABLE_LABEL: &str = "Link não disponível";
pub const LINK_UNAVAILABLE_ALERT: &str = "Link não disponível para este evento.";
pub const NOTIFICATION_DEFAULT_AREA: &str = "Não categorizado";

pub const ONGOING_STATUS: &str = "Em Andamento";
pub const COMPLETED_STATUS: &str = "Encerrada";

/// Notes longer than this are cut in table view
pub const NOTE_PREVIEW_CHARS: usize = 50;

/// Link strings the backend uses for "no link"
const NULL_LINKS: [&str; 3] = ["null", "undefined", "None"];

/// CSS class for an event status: lower-cased, spaces → hyphens
pub fn status_class(status: &str) -> String {
    status.to_lowercase().replace(' ', "-")
}

/// DOM id of an area's event counter
pub fn count_element_id(area_name: &str) -> String {
    format!("count-{}", area_name.split_whitespace().collect::<Vec<_>>().join("-"))
}

/// Sanitized event link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventLink {
    Available { href: String },
    Unavailable,
}

impl EventLink {
    pub fn href(&self) -> &str {
        match self {
            EventLink::Available { href } => href,
            EventLink::Unavailable => "#",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventLink::Available { .. } => LINK_LABEL,
            EventLink::Unavailable => LINK_UNAVAILABLE_LABEL,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            EventLink::Available { .. } => "event-link",
            EventLink::Unavailable => "event-link disabled",
        }
    }

    /// Message shown when a disabled link is activated
    pub fn alert(&self) -> Option<&'static str> {
        match self {
            EventLink::Available { .. } => None,
            EventLink::Unavailable => Some(LINK_UNAVAILABLE_ALERT),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, EventLink::Available { .. })
    }
}

/// Validate an event link and make sure it carries a scheme
pub fn sanitize_link(raw: Option<&str>) -> EventLink {
    let link = raw.map(str::trim).unwrap_or_default();

    if link.is_empty() || NULL_LINKS.contains(&link) {
        return EventLink::Unavailable;
    }

    let href = if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else {
        format!("https://{}", link)
    };

    EventLink::Available { href }
}

/// Table-view preview of a proposal note
pub fn note_preview(note: &str) -> String {
    if note.is_empty() {
        MISSING.to_string()
    } else if note.chars().count() > NOTE_PREVIEW_CHARS {
        format!("{}...", char_prefix(note, NOTE_PREVIEW_CHARS))
    } else {
        note.to_string()
    }
}

fn or_missing(value: &str) -> String {
    if value.trim().is_empty() {
        MISSING.to_string()
    } else {
        value.to_string()
    }
}

// ============================================
// View-models
// ============================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaCardView {
    /// Area name; `None` for the uncategorized card
    pub area: Option<String>,
    pub title: String,
    pub description: String,
    pub count_id: String,
    pub count: usize,
}

pub fn area_card(area: &Area, count: Option<usize>) -> AreaCardView {
    let description = area
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(DEFAULT_AREA_DESCRIPTION);

    AreaCardView {
        area: Some(area.name.clone()),
        title: area.name.clone(),
        description: description.to_string(),
        count_id: count_element_id(&area.name),
        count: count.unwrap_or(0),
    }
}

pub fn uncategorized_card(count: Option<usize>) -> AreaCardView {
    AreaCardView {
        area: None,
        title: UNCATEGORIZED_TITLE.to_string(),
        description: UNCATEGORIZED_DESCRIPTION.to_string(),
        count_id: UNCATEGORIZED_COUNT_ID.to_string(),
        count: count.unwrap_or(0),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCardView {
    pub title: String,
    pub status: String,
    pub status_class: String,
    pub start_date: String,
    pub end_date: String,
    pub committee: String,
    pub theme: String,
    pub location: String,
    pub event_type: String,
    pub purpose: Option<String>,
    pub link: EventLink,
}

pub fn event_card(event: &Event) -> EventCardView {
    EventCardView {
        title: event.name.clone(),
        status: event.status.clone(),
        status_class: status_class(&event.status),
        start_date: event.start_date.clone(),
        end_date: event.end_date.clone(),
        committee: or_missing(event.committee.as_deref().unwrap_or_default()),
        theme: event.theme.clone(),
        location: event.location.clone(),
        event_type: event.event_type.clone(),
        purpose: event.purpose.clone().filter(|p| !p.trim().is_empty()),
        link: sanitize_link(event.event_link.as_deref()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProposalRowView {
    pub id: i64,
    pub project_number: String,
    pub summary: String,
    pub originating_chamber: String,
    pub review_form: String,
    pub thematic_axis: String,
    pub status: String,
    pub analysis_applicable: String,
    pub analysis_deadline: String,
    pub analysis_done: String,
    pub has_document: bool,
    pub cnm_position: String,
    pub priority: String,
    pub note_preview: String,
}

pub fn proposal_row(proposal: &Proposal) -> ProposalRowView {
    let f = &proposal.fields;

    ProposalRowView {
        id: proposal.id,
        project_number: or_missing(&f.project_number),
        summary: or_missing(&f.summary),
        originating_chamber: or_missing(&f.originating_chamber),
        review_form: or_missing(&f.review_form),
        thematic_axis: or_missing(&f.thematic_axis),
        status: or_missing(&f.status),
        analysis_applicable: or_missing(&f.analysis_applicable),
        analysis_deadline: or_missing(&f.analysis_deadline),
        analysis_done: or_missing(&f.analysis_done),
        has_document: f
            .analysis_document
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty()),
        cnm_position: or_missing(&f.cnm_position),
        priority: or_missing(&f.priority),
        note_preview: note_preview(&f.note),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsRowView {
    pub body: Body,
    pub label: &'static str,
    pub favorable: u64,
    pub unfavorable: u64,
    pub neutral: u64,
}

pub fn statistics_table(stats: &Statistics) -> Vec<StatisticsRowView> {
    Body::ALL
        .iter()
        .map(|&body| StatisticsRowView {
            body,
            label: body.label(),
            favorable: stats.count(body, Stance::Favorable),
            unfavorable: stats.count(body, Stance::Unfavorable),
            neutral: stats.count(body, Stance::Neutral),
        })
        .collect()
}

/// Headline event counters of an area dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub total: usize,
    pub ongoing: usize,
    pub completed: usize,
}

pub fn dashboard_summary(events: &[Event]) -> EventSummary {
    EventSummary {
        total: events.len(),
        ongoing: events.iter().filter(|e| e.status == ONGOING_STATUS).count(),
        completed: events.iter().filter(|e| e.status == COMPLETED_STATUS).count(),
    }
}

/// New-event notification content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationView {
    pub title: String,
    pub start_date: String,
    pub location: String,
    pub area: String,
}

pub fn notification(event: &Event) -> NotificationView {
    NotificationView {
        title: event.name.clone(),
        start_date: event.start_date.clone(),
        location: event.location.clone(),
        area: event
            .area_tag
            .clone()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| NOTIFICATION_DEFAULT_AREA.to_string()),
    }
}

// ============================================
// Page
// ============================================

/// Content of the visible panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum PanelView {
    AreaSelection {
        cards: Vec<AreaCardView>,
        uncategorized: AreaCardView,
    },
    Dashboard {
        area: String,
        summary: EventSummary,
        statistics: Vec<StatisticsRowView>,
        proposals: Vec<ProposalRowView>,
        events: Vec<EventCardView>,
    },
    Uncategorized {
        events: Vec<EventCardView>,
    },
}

/// Everything needed to redraw the screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub last_update: Option<String>,
    pub panel: PanelView,
}

/// Last-update label, e.g. `"Última atualização: 18/10/2026, 14:03:22"`
pub fn last_update_label(at: DateTime<Local>) -> String {
    format!("Última atualização: {}", at.format("%d/%m/%Y, %H:%M:%S"))
}

/// Map the whole view state onto the visible page
pub fn page(state: &ViewState) -> Page {
    let panel = match state.panel() {
        Panel::AreaSelection => PanelView::AreaSelection {
            cards: state
                .areas()
                .iter()
                .map(|a| area_card(a, state.counts().get(&a.name)))
                .collect(),
            uncategorized: uncategorized_card(state.counts().uncategorized()),
        },
        Panel::AreaDashboard(area) => PanelView::Dashboard {
            area: area.clone(),
            summary: dashboard_summary(state.all_events()),
            statistics: statistics_table(state.statistics()),
            proposals: state.proposals().iter().map(proposal_row).collect(),
            events: state.filtered_events().iter().map(event_card).collect(),
        },
        Panel::Uncategorized => PanelView::Uncategorized {
            events: state.uncategorized().iter().map(event_card).collect(),
        },
    };

    Page {
        last_update: state.last_update().map(last_update_label),
        panel,
    }
}
