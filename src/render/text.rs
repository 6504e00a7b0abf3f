//! Plain-text rendering for terminals

use super::{
    AreaCardView, EventCardView, NotificationView, Page, PanelView, ProposalRowView,
    StatisticsRowView, NO_EVENTS_MESSAGE,
};
use crate::form::char_prefix;

/// Pad or cut `text` to exactly `width` characters
fn cell(text: &str, width: usize) -> String {
    let cut = char_prefix(text, width);
    format!("{:<width$}", cut, width = width)
}

/// Join lines with a trailing newline after each
fn block(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn area_list(cards: &[AreaCardView], uncategorized: &AreaCardView) -> String {
    let mut lines = vec![
        format!("{} | {:>7} | Descrição", cell("Área", 32), "Eventos"),
        "-".repeat(80),
    ];
    for card in cards.iter().chain(std::iter::once(uncategorized)) {
        lines.push(format!(
            "{} | {:>7} | {}",
            cell(&card.title, 32),
            card.count,
            card.description
        ));
    }

    block(lines)
}

pub fn event_card(card: &EventCardView) -> String {
    let mut lines = vec![
        format!("■ {} [{}]", card.title, card.status),
        format!("  Início: {}   Fim: {}", card.start_date, card.end_date),
        format!("  Comissão: {}", card.committee),
        format!("  Tema: {}", card.theme),
        format!("  Local: {}   Tipo: {}", card.location, card.event_type),
    ];
    if let Some(purpose) = &card.purpose {
        lines.push(format!("  Finalidade: {}", purpose));
    }
    match card.link.alert() {
        None => lines.push(format!("  {}: {}", card.link.label(), card.link.href())),
        Some(alert) => lines.push(format!("  {}", alert)),
    }

    block(lines)
}

pub fn event_list(cards: &[EventCardView]) -> String {
    if cards.is_empty() {
        return format!("{}\n", NO_EVENTS_MESSAGE);
    }

    cards.iter().map(event_card).collect::<Vec<_>>().join("\n")
}

pub fn statistics_table(rows: &[StatisticsRowView]) -> String {
    let mut lines = vec![
        format!(
            "{} | {:>10} | {:>12} | {:>7}",
            cell("", 12),
            "Favorável",
            "Desfavorável",
            "Neutro"
        ),
        "-".repeat(50),
    ];
    for row in rows {
        lines.push(format!(
            "{} | {:>10} | {:>12} | {:>7}",
            cell(row.label, 12),
            row.favorable,
            row.unfavorable,
            row.neutral
        ));
    }

    block(lines)
}

pub fn proposal_table(rows: &[ProposalRowView]) -> String {
    if rows.is_empty() {
        return "Nenhuma proposição cadastrada.\n".to_string();
    }

    let mut lines = vec![
        format!(
            "{:>5} | {} | {} | {} | {} | {}",
            "ID",
            cell("Projeto", 16),
            cell("Situação", 16),
            cell("Posição CNM", 12),
            cell("Prioridade", 10),
            "Observação"
        ),
        "-".repeat(100),
    ];
    for row in rows {
        lines.push(format!(
            "{:>5} | {} | {} | {} | {} | {}",
            row.id,
            cell(&row.project_number, 16),
            cell(&row.status, 16),
            cell(&row.cnm_position, 12),
            cell(&row.priority, 10),
            row.note_preview
        ));
    }

    block(lines)
}

pub fn notification(view: &NotificationView) -> String {
    format!(
        "🔔 Novo evento: {}\n   Data: {}\n   Local: {}\n   Área: {}\n",
        view.title, view.start_date, view.location, view.area
    )
}

pub fn page(page: &Page) -> String {
    let mut out = String::new();

    match &page.panel {
        PanelView::AreaSelection {
            cards,
            uncategorized,
        } => {
            out.push_str(&area_list(cards, uncategorized));
        }
        PanelView::Dashboard {
            area,
            summary,
            statistics,
            proposals,
            events,
        } => {
            out.push_str(&format!(
                "=== {} ===\nEventos: {}   Em andamento: {}   Encerrados: {}\n\n",
                area, summary.total, summary.ongoing, summary.completed
            ));
            out.push_str(&statistics_table(statistics));
            out.push('\n');
            out.push_str(&proposal_table(proposals));
            out.push('\n');
            out.push_str(&event_list(events));
        }
        PanelView::Uncategorized { events } => {
            out.push_str(&format!("=== {} ===\n", super::UNCATEGORIZED_TITLE));
            out.push_str(&event_list(events));
        }
    }

    if let Some(last_update) = &page.last_update {
        out.push_str(&format!("\n{}\n", last_update));
    }

    out
}
