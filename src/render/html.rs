//! HTML fragments for the dashboard panels
//!
//! Every interpolated value goes through [`escape`]; the fragment structure
//! and class names match the dashboard stylesheet.

use super::{
    AreaCardView, EventCardView, EventSummary, NotificationView, Page, PanelView, ProposalRowView,
    StatisticsRowView, MISSING, NO_EVENTS_MESSAGE,
};
use crate::models::Body;

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

pub fn area_card(card: &AreaCardView) -> String {
    let (class, data_area) = match &card.area {
        Some(area) => ("area-card", format!(r#" data-area="{}""#, escape(area))),
        None => ("area-card uncategorized", String::new()),
    };

    format!(
        r#"<div class="{class}"{data_area}>
  <h3>{title}</h3>
  <p>{description}</p>
  <div class="event-count"><span id="{count_id}">{count}</span> eventos</div>
</div>"#,
        title = escape(&card.title),
        description = escape(&card.description),
        count_id = escape(&card.count_id),
        count = card.count,
    )
}

pub fn event_card(card: &EventCardView) -> String {
    let mut lines = vec![
        r#"<div class="event-card">"#.to_string(),
        r#"  <div class="event-header">"#.to_string(),
        format!(r#"    <h4 class="event-title">{}</h4>"#, escape(&card.title)),
        format!(
            r#"    <span class="event-status {}">{}</span>"#,
            escape(&card.status_class),
            escape(&card.status)
        ),
        "  </div>".to_string(),
        r#"  <div class="event-details">"#.to_string(),
    ];

    let details = [
        ("Início:", &card.start_date),
        ("Fim:", &card.end_date),
        ("Comissão:", &card.committee),
        ("Tema:", &card.theme),
        ("Local:", &card.location),
        ("Tipo:", &card.event_type),
    ];
    for (label, value) in details {
        let value = if value.is_empty() { MISSING } else { value.as_str() };
        lines.push(format!(
            r#"    <div class="event-detail"><strong>{}</strong> {}</div>"#,
            label,
            escape(value)
        ));
    }
    if let Some(purpose) = &card.purpose {
        lines.push(format!(
            r#"    <div class="event-detail"><strong>Finalidade:</strong> {}</div>"#,
            escape(purpose)
        ));
    }
    lines.push("  </div>".to_string());

    match card.link.alert() {
        None => lines.push(format!(
            r#"  <a href="{}" target="_blank" rel="noopener noreferrer" class="{}">{}</a>"#,
            escape(card.link.href()),
            card.link.css_class(),
            card.link.label()
        )),
        Some(alert) => lines.push(format!(
            r##"  <a href="#" class="{}" aria-disabled="true" title="{alert}" data-alert="{alert}">{}</a>"##,
            card.link.css_class(),
            card.link.label(),
            alert = escape(alert),
        )),
    }
    lines.push("</div>".to_string());
    lines.join("\n")
}

/// Event grid, or the empty-state message
pub fn event_grid(cards: &[EventCardView]) -> String {
    if cards.is_empty() {
        return format!(r#"<p class="no-events">{}</p>"#, NO_EVENTS_MESSAGE);
    }

    let body: Vec<String> = cards.iter().map(event_card).collect();
    format!("<div class=\"events-grid\">\n{}\n</div>", body.join("\n"))
}

pub fn proposal_row(row: &ProposalRowView) -> String {
    let cells = [
        &row.project_number,
        &row.summary,
        &row.originating_chamber,
        &row.review_form,
        &row.thematic_axis,
        &row.status,
        &row.analysis_applicable,
        &row.analysis_deadline,
        &row.analysis_done,
    ];

    let mut html = format!(r#"<tr data-id="{}">"#, row.id);
    for cell in cells {
        html.push_str(&format!("<td>{}</td>", escape(cell)));
    }

    let document = if row.has_document { "📄" } else { MISSING };
    html.push_str(&format!("<td>{}</td>", document));
    html.push_str(&format!("<td>{}</td>", escape(&row.cnm_position)));
    html.push_str(&format!("<td>{}</td>", escape(&row.priority)));
    html.push_str(&format!("<td>{}</td>", escape(&row.note_preview)));
    html.push_str(&format!(
        r#"<td><button class="btn-delete" data-id="{}">Excluir</button></td>"#,
        row.id
    ));
    html.push_str("</tr>");
    html
}

/// Element id prefix of a statistics row
fn stats_id_prefix(body: Body) -> &'static str {
    match body {
        Body::Cnm => "cnm",
        Body::Chamber => "camaraCnm",
        Body::Senate => "senadoCnm",
        Body::Presidency => "presidenciaCnm",
    }
}

pub fn statistics_table(rows: &[StatisticsRowView]) -> String {
    let mut html = String::from(
        "<table class=\"stats-table\">\n<thead><tr><th></th><th>Favorável</th><th>Desfavorável</th><th>Neutro</th></tr></thead>\n<tbody>\n",
    );

    for row in rows {
        let prefix = stats_id_prefix(row.body);
        html.push_str(&format!(
            "<tr><th>{label}</th><td id=\"{p}Favoravel\">{}</td><td id=\"{p}Desfavoravel\">{}</td><td id=\"{p}Neutro\">{}</td></tr>\n",
            row.favorable,
            row.unfavorable,
            row.neutral,
            label = escape(row.label),
            p = prefix,
        ));
    }

    html.push_str("</tbody>\n</table>");
    html
}

pub fn summary(summary: &EventSummary) -> String {
    format!(
        r#"<div class="summary">
  <div class="summary-item"><span id="totalEvents">{}</span> eventos</div>
  <div class="summary-item"><span id="ongoingEvents">{}</span> em andamento</div>
  <div class="summary-item"><span id="completedEvents">{}</span> encerrados</div>
</div>"#,
        summary.total, summary.ongoing, summary.completed
    )
}

pub fn notification(view: &NotificationView) -> String {
    format!(
        r#"<div class="notification">
  <h4>Novo evento</h4>
  <p><strong>{}</strong></p>
  <p>Data: {}</p>
  <p>Local: {}</p>
  <p>Área: {}</p>
</div>"#,
        escape(&view.title),
        escape(&view.start_date),
        escape(&view.location),
        escape(&view.area)
    )
}

/// Full panel markup plus the last-update line
pub fn page(page: &Page) -> String {
    let mut html = String::new();

    match &page.panel {
        PanelView::AreaSelection {
            cards,
            uncategorized,
        } => {
            html.push_str("<section id=\"areaSelection\">\n<div class=\"areas-grid\">\n");
            for card in cards {
                html.push_str(&area_card(card));
                html.push('\n');
            }
            html.push_str(&area_card(uncategorized));
            html.push_str("\n</div>\n</section>");
        }
        PanelView::Dashboard {
            area,
            summary: counters,
            statistics,
            proposals,
            events,
        } => {
            html.push_str(&format!(
                "<section id=\"dashboard\">\n<h2>{}</h2>\n{}\n{}\n",
                escape(area),
                summary(counters),
                statistics_table(statistics)
            ));
            html.push_str("<table class=\"proposals-table\">\n<tbody>\n");
            for row in proposals {
                html.push_str(&proposal_row(row));
                html.push('\n');
            }
            html.push_str("</tbody>\n</table>\n");
            html.push_str(&event_grid(events));
            html.push_str("\n</section>");
        }
        PanelView::Uncategorized { events } => {
            html.push_str("<section id=\"uncategorized\">\n");
            html.push_str(&event_grid(events));
            html.push_str("\n</section>");
        }
    }

    if let Some(last_update) = &page.last_update {
        html.push_str(&format!(
            "\n<div class=\"last-update\">{}</div>",
            escape(last_update)
        ));
    }

    html
}
