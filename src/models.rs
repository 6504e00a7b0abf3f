//! Domain Types
//!
//! Entities exchanged with the agenda backend. The backend speaks Portuguese
//! field names; serde renames map them onto the Rust fields below.
//!
//! The backend serializes SQLite rows directly, so almost any column can come
//! back as `null`. Required text fields decode `null` as an empty string.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Decode `null` (or a missing key, together with `#[serde(default)]`) as `T::default()`
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Technical area (área técnica)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
}

impl Area {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Legislative or committee event (evento)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "nome", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "situacao", default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(rename = "data_inicio", default, deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(rename = "data_fim", default, deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(rename = "comissao", default)]
    pub committee: Option<String>,
    #[serde(rename = "tema", default, deserialize_with = "null_as_default")]
    pub theme: String,
    #[serde(rename = "local_evento", default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(rename = "tipo_evento", default, deserialize_with = "null_as_default")]
    pub event_type: String,
    #[serde(rename = "finalidade", default)]
    pub purpose: Option<String>,
    #[serde(rename = "link_evento", default)]
    pub event_link: Option<String>,
    #[serde(rename = "area_tecnica", default)]
    pub area_tag: Option<String>,
    #[serde(rename = "data_criacao", default)]
    pub created_at: Option<String>,
}

impl Event {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
            ..Default::default()
        }
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.event_link = Some(link.into());
        self
    }

    pub fn area(mut self, area: impl Into<String>) -> Self {
        self.area_tag = Some(area.into());
        self
    }
}

/// Tracked legislative item (proposição)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: i64,
    #[serde(flatten)]
    pub fields: ProposalFields,
}

/// Proposal payload without the server-assigned id
///
/// This is the body of `POST /proposicoes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalFields {
    #[serde(rename = "numero_projeto", default, deserialize_with = "null_as_default")]
    pub project_number: String,
    #[serde(rename = "ementa", default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(rename = "casa_iniciadora", default, deserialize_with = "null_as_default")]
    pub originating_chamber: String,
    #[serde(rename = "forma_apreciacao", default, deserialize_with = "null_as_default")]
    pub review_form: String,
    #[serde(rename = "eixo_tematico", default, deserialize_with = "null_as_default")]
    pub thematic_axis: String,
    #[serde(rename = "situacao", default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(rename = "cabe_analise", default, deserialize_with = "null_as_default")]
    pub analysis_applicable: String,
    #[serde(rename = "prazo_analise", default, deserialize_with = "null_as_default")]
    pub analysis_deadline: String,
    #[serde(rename = "analise_realizada", default, deserialize_with = "null_as_default")]
    pub analysis_done: String,
    #[serde(rename = "documento_analise", default, skip_serializing_if = "Option::is_none")]
    pub analysis_document: Option<String>,
    #[serde(rename = "posicionamento_cnm", default, deserialize_with = "null_as_default")]
    pub cnm_position: String,
    #[serde(rename = "prioridade", default, deserialize_with = "null_as_default")]
    pub priority: String,
    #[serde(rename = "observacao", default, deserialize_with = "null_as_default")]
    pub note: String,
    #[serde(rename = "area_tecnica", default, deserialize_with = "null_as_default")]
    pub technical_area: String,
}

impl Proposal {
    /// Assemble the created proposal from the submitted fields and the id the server assigned
    pub fn from_created(id: i64, fields: ProposalFields) -> Self {
        Self { id, fields }
    }
}

/// Answer to `POST /proposicoes`
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedProposal {
    pub id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Governmental body a stance count refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Cnm,
    Chamber,
    Senate,
    Presidency,
}

impl Body {
    pub const ALL: [Body; 4] = [Body::Cnm, Body::Chamber, Body::Senate, Body::Presidency];

    pub fn label(&self) -> &'static str {
        match self {
            Body::Cnm => "CNM",
            Body::Chamber => "Câmara",
            Body::Senate => "Senado",
            Body::Presidency => "Presidência",
        }
    }
}

/// CNM stance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
    Favorable,
    Unfavorable,
    Neutral,
}

impl Stance {
    pub const ALL: [Stance; 3] = [Stance::Favorable, Stance::Unfavorable, Stance::Neutral];

    pub fn label(&self) -> &'static str {
        match self {
            Stance::Favorable => "Favorável",
            Stance::Unfavorable => "Desfavorável",
            Stance::Neutral => "Neutro",
        }
    }
}

/// Per-area proposal statistics, recomputed server-side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cnm_favoravel: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cnm_desfavoravel: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cnm_neutro: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub camara_cnm_favoravel: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub camara_cnm_desfavoravel: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub camara_cnm_neutro: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub senado_cnm_favoravel: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub senado_cnm_desfavoravel: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub senado_cnm_neutro: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub presidencia_cnm_favoravel: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub presidencia_cnm_desfavoravel: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub presidencia_cnm_neutro: u64,
}

impl Statistics {
    /// Count for one body/stance cell
    pub fn count(&self, body: Body, stance: Stance) -> u64 {
        use Body::*;
        use Stance::*;

        match (body, stance) {
            (Cnm, Favorable) => self.cnm_favoravel,
            (Cnm, Unfavorable) => self.cnm_desfavoravel,
            (Cnm, Neutral) => self.cnm_neutro,
            (Chamber, Favorable) => self.camara_cnm_favoravel,
            (Chamber, Unfavorable) => self.camara_cnm_desfavoravel,
            (Chamber, Neutral) => self.camara_cnm_neutro,
            (Senate, Favorable) => self.senado_cnm_favoravel,
            (Senate, Unfavorable) => self.senado_cnm_desfavoravel,
            (Senate, Neutral) => self.senado_cnm_neutro,
            (Presidency, Favorable) => self.presidencia_cnm_favoravel,
            (Presidency, Unfavorable) => self.presidencia_cnm_desfavoravel,
            (Presidency, Neutral) => self.presidencia_cnm_neutro,
        }
    }
}

/// Backend health report
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
}

/// Calendar date range; each bound is optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Wire format of date bounds (`<input type="date">` values)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Parse optional `YYYY-MM-DD` bounds; empty strings count as unset
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, chrono::ParseError> {
        let parse_bound = |value: Option<&str>| -> Result<Option<NaiveDate>, chrono::ParseError> {
            match value.map(str::trim) {
                None | Some("") => Ok(None),
                Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT).map(Some),
            }
        };

        Ok(Self {
            start: parse_bound(start)?,
            end: parse_bound(end)?,
        })
    }

    pub fn is_unset(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// A range is valid unless both bounds are set and start is after end
    pub fn is_valid(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |d: Option<NaiveDate>| {
            d.map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| "…".to_string())
        };
        write!(f, "{} – {}", bound(self.start), bound(self.end))
    }
}
