//! Data Sync
//!
//! Typed access to the agenda REST backend.
//!
//! ## Architecture
//!
//! - **Endpoint**: pure description of each route (method, path, query)
//! - **Transport**: async seam that executes one request; [`HttpTransport`]
//!   is the reqwest implementation
//! - **ApiClient**: typed operations on top of a transport; checks status
//!   codes and decodes JSON bodies
//!
//! Every operation issues exactly one request and never retries. Failures
//! propagate to the caller as [`ClientError`].

mod endpoint;
mod error;
mod http;

#[cfg(test)]
pub(crate) mod fake;

pub use endpoint::{Endpoint, Method};
pub use error::{ClientError, ClientResult};
pub use http::{ClientConfig, HttpTransport, DEFAULT_API_BASE};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::models::{
    Area, CreatedProposal, DateRange, Event, Health, Proposal, ProposalFields, Statistics,
};

/// One request to the backend
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            body: None,
        }
    }

    pub fn with_body(endpoint: Endpoint, body: serde_json::Value) -> Self {
        Self {
            endpoint,
            body: Some(body),
        }
    }
}

/// Raw backend answer
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes requests against the backend
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> ClientResult<ApiResponse>;
}

/// Typed client for the agenda REST API
pub struct ApiClient<T: Transport> {
    transport: T,
}

impl ApiClient<HttpTransport> {
    /// Client over HTTP with the given connection settings
    pub fn http(config: ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Check if the backend is up
    pub async fn health_check(&self) -> ClientResult<Health> {
        self.get(Endpoint::Health).await
    }

    /// All technical areas
    pub async fn list_areas(&self) -> ClientResult<Vec<Area>> {
        self.get(Endpoint::Areas).await
    }

    /// Events of an area, or the uncategorized events when no area is given
    pub async fn list_events(&self, area: Option<&str>, range: &DateRange) -> ClientResult<Vec<Event>> {
        let endpoint = match area {
            Some(area) => Endpoint::Events {
                area: area.to_string(),
                range: *range,
            },
            None => Endpoint::Uncategorized { range: *range },
        };

        self.get(endpoint).await
    }

    /// Events created recently, as reported by the backend
    pub async fn list_new_events(&self) -> ClientResult<Vec<Event>> {
        self.get(Endpoint::NewEvents).await
    }

    /// Free-text event search
    ///
    /// An empty term matches nothing and is answered locally.
    pub async fn search_events(&self, term: &str) -> ClientResult<Vec<Event>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        self.get(Endpoint::SearchEvents {
            term: term.to_string(),
        })
        .await
    }

    pub async fn list_statistics(&self, area: &str) -> ClientResult<Statistics> {
        self.get(Endpoint::Statistics {
            area: area.to_string(),
        })
        .await
    }

    pub async fn list_proposals(&self, area: &str) -> ClientResult<Vec<Proposal>> {
        self.get(Endpoint::Proposals {
            area: area.to_string(),
        })
        .await
    }

    /// Submit a new proposal; the backend assigns the id
    pub async fn create_proposal(&self, fields: ProposalFields) -> ClientResult<Proposal> {
        let body = serde_json::to_value(&fields)?;
        let response = self
            .send(ApiRequest::with_body(Endpoint::CreateProposal, body))
            .await?;
        let created: CreatedProposal = serde_json::from_str(&response.body)?;

        tracing::info!(id = created.id, "Proposal created");
        Ok(Proposal::from_created(created.id, fields))
    }

    pub async fn delete_proposal(&self, id: i64) -> ClientResult<()> {
        self.send(ApiRequest::new(Endpoint::DeleteProposal { id }))
            .await?;

        tracing::info!(id, "Proposal deleted");
        Ok(())
    }

    async fn get<R: DeserializeOwned>(&self, endpoint: Endpoint) -> ClientResult<R> {
        let response = self.send(ApiRequest::new(endpoint)).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Execute a request and reject non-2xx answers
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let endpoint = request.endpoint.to_string();
        tracing::debug!(request = %endpoint, "Sending request");

        let response = self.transport.execute(request).await?;

        if response.is_success() {
            Ok(response)
        } else {
            tracing::warn!(request = %endpoint, status = response.status, "Request rejected");
            Err(ClientError::Status {
                status: response.status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeTransport;
    use super::*;

    #[tokio::test]
    async fn test_list_areas_decodes_body() {
        let transport = FakeTransport::new().respond(
            "/areas",
            r#"[{"nome": "Saúde", "descricao": "Saúde pública"}, {"nome": "Educação", "descricao": null}]"#,
        );
        let client = ApiClient::new(transport);

        let areas = client.list_areas().await.unwrap();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].name, "Saúde");
        assert_eq!(areas[1].description, None);
    }

    #[tokio::test]
    async fn test_list_events_without_area_uses_uncategorized_route() {
        let transport = FakeTransport::new().respond("/eventos/nao-categorizados", "[]");
        let client = ApiClient::new(transport);

        client.list_events(None, &DateRange::default()).await.unwrap();

        assert_eq!(
            client.transport().paths(),
            vec!["/eventos/nao-categorizados".to_string()]
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let transport = FakeTransport::new().fail("/areas", 500);
        let client = ApiClient::new(transport);

        let err = client.list_areas().await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 500 }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let transport = FakeTransport::new().respond("/areas", "<html>oops</html>");
        let client = ApiClient::new(transport);

        let err = client.list_areas().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_create_proposal_uses_returned_id() {
        let transport = FakeTransport::new().respond(
            "/proposicoes",
            r#"{"id": 12, "message": "Proposição adicionada com sucesso"}"#,
        );
        let client = ApiClient::new(transport);

        let fields = ProposalFields {
            project_number: "PL 10/2025".to_string(),
            technical_area: "Saúde".to_string(),
            ..Default::default()
        };
        let proposal = client.create_proposal(fields).await.unwrap();

        assert_eq!(proposal.id, 12);
        assert_eq!(proposal.fields.project_number, "PL 10/2025");

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].endpoint.method(), Method::Post);
        let body = requests[0].body.as_ref().unwrap();
        assert_eq!(body["area_tecnica"], "Saúde");
    }

    #[tokio::test]
    async fn test_empty_search_sends_nothing() {
        let client = ApiClient::new(FakeTransport::new());

        let results = client.search_events("   ").await.unwrap();
        assert!(results.is_empty());
        assert!(client.transport().requests().is_empty());
    }
}
