//! Endpoint catalog
//!
//! Every backend route the dashboard consumes, rendered to a path plus query
//! string relative to the API base URL. Optional parameters that are absent
//! are left out of the query string entirely.

use crate::models::{DateRange, DATE_FORMAT};
use std::fmt;

/// HTTP method used by an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// Backend routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Health,
    Areas,
    Events { area: String, range: DateRange },
    Uncategorized { range: DateRange },
    NewEvents,
    SearchEvents { term: String },
    Statistics { area: String },
    Proposals { area: String },
    CreateProposal,
    DeleteProposal { id: i64 },
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::CreateProposal => Method::Post,
            Endpoint::DeleteProposal { .. } => Method::Delete,
            _ => Method::Get,
        }
    }

    /// Path without query string
    pub fn path(&self) -> String {
        match self {
            Endpoint::Health => "/health".to_string(),
            Endpoint::Areas => "/areas".to_string(),
            Endpoint::Events { .. } => "/eventos".to_string(),
            Endpoint::Uncategorized { .. } => "/eventos/nao-categorizados".to_string(),
            Endpoint::NewEvents => "/eventos/novos".to_string(),
            Endpoint::SearchEvents { .. } => "/eventos/buscar".to_string(),
            Endpoint::Statistics { .. } => "/estatisticas".to_string(),
            Endpoint::Proposals { .. } | Endpoint::CreateProposal => "/proposicoes".to_string(),
            Endpoint::DeleteProposal { id } => format!("/proposicoes/{}", id),
        }
    }

    /// Query parameters, in wire order, omitting absent ones
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        match self {
            Endpoint::Events { area, range } => {
                params.push(("area", area.clone()));
                push_range(&mut params, range);
            }
            Endpoint::Uncategorized { range } => push_range(&mut params, range),
            Endpoint::SearchEvents { term } => params.push(("termo", term.clone())),
            Endpoint::Statistics { area } | Endpoint::Proposals { area } => {
                params.push(("area", area.clone()));
            }
            _ => {}
        }

        params
    }

    /// Path plus percent-encoded query string
    pub fn path_and_query(&self) -> String {
        let query = self
            .query()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
            .collect::<Vec<_>>()
            .join("&");

        if query.is_empty() {
            self.path()
        } else {
            format!("{}?{}", self.path(), query)
        }
    }

    /// Full URL under the given API base
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path_and_query())
    }
}

fn push_range(params: &mut Vec<(&'static str, String)>, range: &DateRange) {
    if let Some(start) = range.start {
        params.push(("start_date", start.format(DATE_FORMAT).to_string()));
    }
    if let Some(end) = range.end {
        params.push(("end_date", end.format(DATE_FORMAT).to_string()));
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path_and_query())
    }
}
