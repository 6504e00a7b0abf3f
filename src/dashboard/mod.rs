//! Dashboard controller
//!
//! Binds data sync, view state and rendering. Every user action maps to one
//! async handler here. Handlers fetch without holding the state lock, then
//! take a short write lock to apply the result under its request token, and
//! finally ask the presenter to redraw.
//!
//! Failures are logged and reported to the user with a fixed message; the
//! typed error is also returned so callers can decide on exit codes.

mod presenter;

pub use presenter::{LogPresenter, Presenter};

#[cfg(test)]
pub(crate) use presenter::recording::RecordingPresenter;

use chrono::Local;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::client::{ApiClient, ClientError, ClientResult, Transport};
use crate::error::DashboardResult;
use crate::form::ProposalForm;
use crate::models::{Area, DateRange, Event, Proposal};
use crate::render::{self, Page};
use crate::state::{AreaCounts, AreaData, EventFilter, ViewState};

// User-facing messages
pub const LOAD_ERROR: &str = "Erro ao carregar dados. Tente novamente.";
pub const AREA_LOAD_ERROR: &str = "Erro ao carregar dados da área. Tente novamente.";
pub const UNCATEGORIZED_LOAD_ERROR: &str = "Erro ao carregar eventos não categorizados.";
pub const INVALID_DATE_RANGE: &str = "A data de início deve ser anterior à data de fim.";
pub const DATE_FILTER_APPLIED: &str = "Filtro de período aplicado com sucesso!";
pub const REFRESH_SUCCESS: &str = "Dados atualizados com sucesso!";
pub const REFRESH_ERROR: &str = "Erro ao atualizar dados. Tente novamente.";
pub const PROPOSAL_CREATED: &str = "Proposição adicionada com sucesso!";
pub const PROPOSAL_CREATE_ERROR: &str = "Erro ao adicionar proposição. Tente novamente.";
pub const PROPOSAL_DELETE_CONFIRM: &str = "Tem certeza que deseja excluir esta proposição?";
pub const PROPOSAL_DELETED: &str = "Proposição excluída com sucesso!";
pub const PROPOSAL_DELETE_ERROR: &str = "Erro ao excluir proposição. Tente novamente.";

/// Dashboard controller
pub struct Dashboard<T: Transport> {
    client: Arc<ApiClient<T>>,
    state: Arc<RwLock<ViewState>>,
    presenter: Arc<dyn Presenter>,
}

impl<T: Transport> Clone for Dashboard<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            state: Arc::clone(&self.state),
            presenter: Arc::clone(&self.presenter),
        }
    }
}

impl<T: Transport> Dashboard<T> {
    pub fn new(client: ApiClient<T>, presenter: Arc<dyn Presenter>) -> Self {
        Self {
            client: Arc::new(client),
            state: Arc::new(RwLock::new(ViewState::new())),
            presenter,
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Copy of the current view state
    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    pub async fn page(&self) -> Page {
        render::page(&*self.state.read().await)
    }

    pub async fn current_area(&self) -> Option<String> {
        self.state.read().await.current_area().map(str::to_string)
    }

    async fn redraw(&self) {
        let page = self.page().await;
        self.presenter.redraw(&page);
    }

    async fn touch(&self) {
        self.state.write().await.touch(Local::now());
    }

    // ============================================
    // Startup & refresh
    // ============================================

    /// Load areas and counters on startup
    pub async fn initialize(&self) -> DashboardResult<()> {
        tracing::info!("Initializing dashboard");

        if let Err(e) = self.load_areas().await {
            tracing::error!(error = %e, "Failed to initialize dashboard");
            self.presenter.show_error(LOAD_ERROR);
            return Err(e.into());
        }

        self.update_event_counts().await;
        self.touch().await;
        self.redraw().await;
        Ok(())
    }

    /// Fetch the area list into the view state
    pub async fn load_areas(&self) -> ClientResult<Vec<Area>> {
        let areas = self.client.list_areas().await?;
        tracing::debug!(count = areas.len(), "Loaded areas");

        self.state.write().await.set_areas(areas.clone());
        Ok(areas)
    }

    /// Recount events per area and uncategorized, within the active date range
    ///
    /// Counting failures never reach the user: a failed area keeps its
    /// previous counter, a failed area listing only logs.
    pub async fn update_event_counts(&self) {
        let (token, range) = {
            let mut state = self.state.write().await;
            (state.begin_count(), state.date_filter())
        };

        let areas = match self.client.list_areas().await {
            Ok(areas) => areas,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list areas for counters");
                return;
            }
        };

        let mut counts = AreaCounts::new();
        for area in &areas {
            match self.client.list_events(Some(&area.name), &range).await {
                Ok(events) => counts.set(area.name.clone(), events.len()),
                Err(e) => {
                    tracing::debug!(area = %area.name, error = %e, "Skipping area counter");
                }
            }
        }

        match self.client.list_events(None, &range).await {
            Ok(events) => counts.set_uncategorized(events.len()),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping uncategorized counter");
            }
        }

        let applied = self.state.write().await.apply_counts(token, counts);
        if applied {
            self.redraw().await;
        }
    }

    /// Reload everything visible
    pub async fn refresh(&self) -> DashboardResult<()> {
        tracing::info!("Refreshing dashboard");

        let result = async {
            self.load_areas().await?;
            self.update_event_counts().await;

            if let Some(area) = self.current_area().await {
                self.load_area(&area).await?;
            }
            Ok::<(), ClientError>(())
        }
        .await;

        match result {
            Ok(()) => {
                self.touch().await;
                self.presenter.show_success(REFRESH_SUCCESS);
                self.redraw().await;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to refresh dashboard");
                self.presenter.show_error(REFRESH_ERROR);
                Err(e.into())
            }
        }
    }

    // ============================================
    // Navigation
    // ============================================

    /// Open the dashboard of `area`
    pub async fn select_area(&self, area: &str) -> DashboardResult<()> {
        tracing::info!(area = %area, "Selecting area");

        match self.load_area(area).await {
            Ok(_) => {
                self.redraw().await;
                Ok(())
            }
            Err(e) => {
                tracing::error!(area = %area, error = %e, "Failed to load area data");
                self.presenter.show_error(AREA_LOAD_ERROR);
                Err(e.into())
            }
        }
    }

    /// Fetch events, statistics and proposals of `area` concurrently and
    /// install them; returns `false` when a newer load superseded this one
    async fn load_area(&self, area: &str) -> ClientResult<bool> {
        let (token, range) = {
            let mut state = self.state.write().await;
            (state.begin_load(), state.date_filter())
        };

        let (events, statistics, proposals) = tokio::try_join!(
            self.client.list_events(Some(area), &range),
            self.client.list_statistics(area),
            self.client.list_proposals(area),
        )?;

        tracing::debug!(
            area = %area,
            events = events.len(),
            proposals = proposals.len(),
            "Loaded area data"
        );

        let data = AreaData {
            events,
            statistics,
            proposals,
        };
        Ok(self.state.write().await.apply_area_data(token, area, data))
    }

    /// Back to the area grid
    pub async fn back(&self) {
        self.state.write().await.show_area_selection();
        self.redraw().await;
    }

    /// Open the uncategorized event list
    ///
    /// The list is fetched without the active date range.
    pub async fn show_uncategorized(&self) -> DashboardResult<()> {
        let token = self.state.write().await.begin_load();

        match self.client.list_events(None, &DateRange::default()).await {
            Ok(events) => {
                tracing::debug!(count = events.len(), "Loaded uncategorized events");
                if self.state.write().await.apply_uncategorized(token, events) {
                    self.redraw().await;
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load uncategorized events");
                self.presenter.show_error(UNCATEGORIZED_LOAD_ERROR);
                Err(e.into())
            }
        }
    }

    // ============================================
    // Filters
    // ============================================

    /// Status/type filter on the loaded events; no network
    pub async fn filter_events(&self, filter: EventFilter) -> Vec<Event> {
        let filtered = self.state.write().await.apply_event_filter(filter).to_vec();
        self.redraw().await;
        filtered
    }

    /// Store a date filter for later loads without fetching anything
    pub async fn set_date_filter(&self, range: DateRange) -> DashboardResult<()> {
        let stored = self.state.write().await.set_date_filter(range);
        if let Err(e) = stored {
            tracing::warn!(range = %range, "Rejected date filter");
            self.presenter.show_error(INVALID_DATE_RANGE);
            return Err(e.into());
        }
        Ok(())
    }

    /// Server-side date filter for counters and the open area
    pub async fn apply_date_filter(&self, range: DateRange) -> DashboardResult<()> {
        self.set_date_filter(range).await?;

        tracing::info!(range = %range, "Applying date filter");
        self.update_event_counts().await;

        if let Some(area) = self.current_area().await {
            self.select_area(&area).await?;
        }

        self.presenter.show_success(DATE_FILTER_APPLIED);
        Ok(())
    }

    // ============================================
    // Proposals
    // ============================================

    /// Validate the form and create a proposal in the open area
    pub async fn create_proposal(&self, form: &ProposalForm) -> DashboardResult<Proposal> {
        let area = self.current_area().await;

        let fields = match form.submit(area.as_deref()) {
            Ok(fields) => fields,
            Err(e) => {
                tracing::warn!(error = %e, "Proposal form rejected");
                self.presenter.show_error(PROPOSAL_CREATE_ERROR);
                return Err(e.into());
            }
        };

        let proposal = match self.client.create_proposal(fields).await {
            Ok(proposal) => proposal,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create proposal");
                self.presenter.show_error(PROPOSAL_CREATE_ERROR);
                return Err(e.into());
            }
        };

        self.presenter.show_success(PROPOSAL_CREATED);
        self.reload_current_area().await;
        Ok(proposal)
    }

    /// Delete a proposal after the user confirms
    ///
    /// Returns `Ok(false)` when the prompt was declined; nothing is sent then.
    pub async fn delete_proposal(&self, id: i64) -> DashboardResult<bool> {
        if !self.presenter.confirm(PROPOSAL_DELETE_CONFIRM) {
            tracing::debug!(id, "Proposal deletion cancelled");
            return Ok(false);
        }

        if let Err(e) = self.client.delete_proposal(id).await {
            tracing::error!(id, error = %e, "Failed to delete proposal");
            self.presenter.show_error(PROPOSAL_DELETE_ERROR);
            return Err(e.into());
        }

        self.presenter.show_success(PROPOSAL_DELETED);
        self.reload_current_area().await;
        Ok(true)
    }

    async fn reload_current_area(&self) {
        if let Some(area) = self.current_area().await {
            // Errors are already reported by select_area
            let _ = self.select_area(&area).await;
        }
    }

    // ============================================
    // Polling
    // ============================================

    /// Fetch recently created events and notify about each one
    ///
    /// Events are not deduplicated across polls.
    pub async fn check_for_new_events(&self) -> DashboardResult<usize> {
        let events = match self.client.list_new_events().await {
            Ok(events) => events,
            Err(e) => {
                tracing::error!(error = %e, "Failed to check for new events");
                return Err(e.into());
            }
        };

        for event in &events {
            self.presenter.notify(&render::notification(event));
        }

        if !events.is_empty() {
            tracing::info!(count = events.len(), "New events");
        }

        self.touch().await;
        Ok(events.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeTransport;
    use crate::client::Method;
    use crate::error::{DashboardError, ValidationError};
    use crate::state::Panel;

    const SAUDE_EVENTS: &str = r#"[
        {"id": 1, "nome": "Audiência SUS", "situacao": "Em Andamento", "tipo_evento": "Audiência Pública", "area_tecnica": "Saúde"},
        {"id": 2, "nome": "Reunião Vacinas", "situacao": "Encerrada", "tipo_evento": "Reunião", "area_tecnica": "Saúde"},
        {"id": 3, "nome": "Sessão Hospitais", "situacao": "Encerrada", "tipo_evento": "Sessão", "area_tecnica": "Saúde"}
    ]"#;

    const SAUDE_STATS: &str = r#"{"cnm_favoravel": 2, "cnm_neutro": 1}"#;

    const SAUDE_PROPOSALS: &str = r#"[
        {"id": 41, "numero_projeto": "PL 1/2025", "ementa": "Dispõe", "situacao": "Em tramitação", "area_tecnica": "Saúde"}
    ]"#;

    fn saude_transport() -> FakeTransport {
        FakeTransport::new()
            .respond("/areas", r#"[{"nome": "Saúde"}, {"nome": "Educação"}]"#)
            .respond("/eventos", SAUDE_EVENTS)
            .respond("/eventos/nao-categorizados", r#"[{"nome": "Solto", "situacao": "Agendada"}]"#)
            .respond("/estatisticas", SAUDE_STATS)
            .respond("/proposicoes", SAUDE_PROPOSALS)
    }

    fn dashboard(
        transport: FakeTransport,
        answer: bool,
    ) -> (Dashboard<FakeTransport>, Arc<RecordingPresenter>) {
        let presenter = Arc::new(RecordingPresenter::answering(answer));
        let dashboard = Dashboard::new(ApiClient::new(transport), presenter.clone());
        (dashboard, presenter)
    }

    #[tokio::test]
    async fn test_select_area_issues_three_scoped_requests() {
        let (dashboard, presenter) = dashboard(saude_transport(), true);

        dashboard.select_area("Saúde").await.unwrap();

        let transport = dashboard.client().transport();
        assert_eq!(transport.requests().len(), 3);
        assert_eq!(transport.count("/eventos"), 1);
        assert_eq!(transport.count("/estatisticas"), 1);
        assert_eq!(transport.count("/proposicoes"), 1);
        for path in transport.paths() {
            assert!(path.ends_with("?area=Sa%C3%BAde"), "unexpected request {}", path);
        }

        let state = dashboard.snapshot().await;
        assert_eq!(state.panel(), &Panel::AreaDashboard("Saúde".to_string()));
        assert_eq!(state.all_events().len(), 3);
        assert_eq!(state.proposals().len(), 1);

        match presenter.last_page().unwrap().panel {
            render::PanelView::Dashboard { summary, .. } => {
                assert_eq!(summary.total, 3);
                assert_eq!(summary.ongoing, 1);
                assert_eq!(summary.completed, 2);
            }
            other => panic!("unexpected panel {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_select_area_is_all_or_nothing() {
        let transport = saude_transport().fail("/estatisticas", 500);
        let (dashboard, presenter) = dashboard(transport, true);

        let err = dashboard.select_area("Saúde").await.unwrap_err();
        assert!(matches!(err, DashboardError::Network(_)));
        assert_eq!(presenter.errors(), vec![AREA_LOAD_ERROR.to_string()]);

        let state = dashboard.snapshot().await;
        assert_eq!(state.panel(), &Panel::AreaSelection);
        assert!(state.all_events().is_empty());
    }

    #[tokio::test]
    async fn test_filter_events_is_local() {
        let (dashboard, _) = dashboard(saude_transport(), true);
        dashboard.select_area("Saúde").await.unwrap();
        let before = dashboard.client().transport().requests().len();

        let filtered = dashboard
            .filter_events(EventFilter::new(Some("Encerrada"), Some("Sessão")))
            .await;

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Sessão Hospitais");
        assert_eq!(dashboard.client().transport().requests().len(), before);
    }

    #[tokio::test]
    async fn test_inverted_date_range_sends_nothing() {
        let (dashboard, presenter) = dashboard(saude_transport(), true);
        let range = DateRange::parse(Some("2025-03-10"), Some("2025-03-01")).unwrap();

        let err = dashboard.apply_date_filter(range).await.unwrap_err();

        assert!(matches!(err, DashboardError::Validation(_)));
        assert!(dashboard.client().transport().requests().is_empty());
        assert_eq!(presenter.errors(), vec![INVALID_DATE_RANGE.to_string()]);
        assert!(presenter.successes().is_empty());
    }

    #[tokio::test]
    async fn test_preset_date_filter_scopes_first_load() {
        let (dashboard, presenter) = dashboard(saude_transport(), true);
        let range = DateRange::parse(Some("2025-03-01"), Some("2025-03-31")).unwrap();

        dashboard.set_date_filter(range).await.unwrap();
        assert!(dashboard.client().transport().requests().is_empty());

        dashboard.select_area("Saúde").await.unwrap();

        let paths = dashboard.client().transport().paths();
        assert_eq!(paths.len(), 3);
        assert!(paths.contains(
            &"/eventos?area=Sa%C3%BAde&start_date=2025-03-01&end_date=2025-03-31".to_string()
        ));
        assert!(presenter.successes().is_empty());

        let inverted = DateRange::parse(Some("2025-03-10"), Some("2025-03-01")).unwrap();
        assert!(dashboard.set_date_filter(inverted).await.is_err());
        assert_eq!(presenter.errors(), vec![INVALID_DATE_RANGE.to_string()]);
        assert_eq!(dashboard.snapshot().await.date_filter(), range);
    }

    #[tokio::test]
    async fn test_date_filter_reloads_counts_and_area() {
        let (dashboard, presenter) = dashboard(saude_transport(), true);
        dashboard.select_area("Saúde").await.unwrap();
        dashboard
            .filter_events(EventFilter::new(Some("Encerrada"), None))
            .await;

        let range = DateRange::parse(Some("2025-03-01"), Some("2025-03-31")).unwrap();
        dashboard.apply_date_filter(range).await.unwrap();

        let paths = dashboard.client().transport().paths();
        assert!(paths.contains(
            &"/eventos?area=Educa%C3%A7%C3%A3o&start_date=2025-03-01&end_date=2025-03-31".to_string()
        ));
        assert!(paths.contains(
            &"/eventos/nao-categorizados?start_date=2025-03-01&end_date=2025-03-31".to_string()
        ));
        assert!(paths.contains(&"/estatisticas?area=Sa%C3%BAde".to_string()));

        let state = dashboard.snapshot().await;
        assert_eq!(state.date_filter(), range);
        assert!(state.event_filter().is_empty());
        assert_eq!(state.filtered_events().len(), 3);
        assert_eq!(state.counts().get("Saúde"), Some(3));
        assert_eq!(state.counts().uncategorized(), Some(1));
        assert_eq!(presenter.successes(), vec![DATE_FILTER_APPLIED.to_string()]);
    }

    #[tokio::test]
    async fn test_failed_area_counter_is_skipped() {
        let transport = FakeTransport::new()
            .respond("/areas", r#"[{"nome": "Saúde"}]"#)
            .fail("/eventos", 503)
            .respond("/eventos/nao-categorizados", "[]");
        let (dashboard, presenter) = dashboard(transport, true);

        dashboard.update_event_counts().await;

        let state = dashboard.snapshot().await;
        assert_eq!(state.counts().get("Saúde"), None);
        assert_eq!(state.counts().uncategorized(), Some(0));
        assert!(presenter.errors().is_empty());
    }

    #[tokio::test]
    async fn test_delete_declined_sends_nothing() {
        let (dashboard, presenter) = dashboard(saude_transport(), false);
        dashboard.select_area("Saúde").await.unwrap();
        let before = dashboard.client().transport().requests().len();

        let deleted = dashboard.delete_proposal(41).await.unwrap();

        assert!(!deleted);
        assert_eq!(dashboard.client().transport().requests().len(), before);
        assert_eq!(
            presenter.prompts.lock().unwrap().clone(),
            vec![PROPOSAL_DELETE_CONFIRM.to_string()]
        );
    }

    #[tokio::test]
    async fn test_delete_confirmed_refetches_proposals_once() {
        let transport = saude_transport().respond("/proposicoes/41", "{}");
        let (dashboard, presenter) = dashboard(transport, true);
        dashboard.select_area("Saúde").await.unwrap();

        assert!(dashboard.delete_proposal(41).await.unwrap());

        let requests = dashboard.client().transport().requests();
        let after_delete: Vec<_> = requests.iter().skip(3).collect();
        assert_eq!(after_delete[0].endpoint.method(), Method::Delete);
        assert_eq!(after_delete[0].endpoint.path(), "/proposicoes/41");
        assert_eq!(
            after_delete
                .iter()
                .filter(|r| r.endpoint.method() == Method::Delete)
                .count(),
            1
        );
        assert_eq!(
            after_delete
                .iter()
                .filter(|r| r.endpoint.path() == "/proposicoes" && r.endpoint.method() == Method::Get)
                .count(),
            1
        );
        assert_eq!(presenter.successes(), vec![PROPOSAL_DELETED.to_string()]);
    }

    #[tokio::test]
    async fn test_delete_failure_is_reported() {
        let transport = saude_transport().fail("/proposicoes/41", 500);
        let (dashboard, presenter) = dashboard(transport, true);

        assert!(dashboard.delete_proposal(41).await.is_err());
        assert_eq!(presenter.errors(), vec![PROPOSAL_DELETE_ERROR.to_string()]);
    }

    fn filled_form() -> ProposalForm {
        let mut form = ProposalForm {
            project_number: "PL 99/2025".to_string(),
            summary: "Institui".to_string(),
            originating_chamber: "Senado".to_string(),
            review_form: "Plenário".to_string(),
            status: "Em tramitação".to_string(),
            analysis_applicable: "Sim".to_string(),
            analysis_done: "Não".to_string(),
            cnm_position: "NEUTRO".to_string(),
            priority: "Média".to_string(),
            ..Default::default()
        };
        form.note.input(&"n".repeat(1600));
        form
    }

    #[tokio::test]
    async fn test_create_proposal_posts_with_active_area() {
        let transport = saude_transport().respond_to(Method::Post, "/proposicoes", r#"{"id": 77}"#);
        let (dashboard, presenter) = dashboard(transport, true);
        dashboard.select_area("Saúde").await.unwrap();

        let proposal = dashboard.create_proposal(&filled_form()).await.unwrap();
        assert_eq!(proposal.id, 77);
        assert_eq!(proposal.fields.technical_area, "Saúde");

        let requests = dashboard.client().transport().requests();
        let posted = requests
            .iter()
            .find(|r| r.endpoint.method() == Method::Post)
            .unwrap();
        let body = posted.body.as_ref().unwrap();
        assert_eq!(body["area_tecnica"], "Saúde");
        assert_eq!(body["observacao"].as_str().unwrap().chars().count(), 1500);

        // Area data is reloaded after the insert
        assert_eq!(dashboard.client().transport().count("/estatisticas"), 2);
        assert_eq!(presenter.successes(), vec![PROPOSAL_CREATED.to_string()]);
    }

    #[tokio::test]
    async fn test_create_proposal_without_area_sends_nothing() {
        let (dashboard, presenter) = dashboard(saude_transport(), true);

        let err = dashboard.create_proposal(&filled_form()).await.unwrap_err();

        assert!(matches!(
            err,
            DashboardError::Validation(ValidationError::NoActiveArea)
        ));
        assert!(dashboard.client().transport().requests().is_empty());
        assert_eq!(presenter.errors(), vec![PROPOSAL_CREATE_ERROR.to_string()]);
    }

    #[tokio::test]
    async fn test_stale_area_load_is_discarded_after_back() {
        let mut transport = saude_transport();
        let release = transport.hold("/eventos");
        let (dashboard, _) = dashboard(transport, true);

        let loader = dashboard.clone();
        let handle = tokio::spawn(async move { loader.select_area("Saúde").await });

        while dashboard.client().transport().count("/eventos") == 0 {
            tokio::task::yield_now().await;
        }

        dashboard.back().await;
        release.notify_one();
        handle.await.unwrap().unwrap();

        let state = dashboard.snapshot().await;
        assert_eq!(state.panel(), &Panel::AreaSelection);
        assert!(state.all_events().is_empty());
        assert!(state.proposals().is_empty());
    }

    #[tokio::test]
    async fn test_show_uncategorized_ignores_date_filter() {
        let (dashboard, _) = dashboard(saude_transport(), true);
        let range = DateRange::parse(Some("2025-01-01"), None).unwrap();
        dashboard.apply_date_filter(range).await.unwrap();

        dashboard.show_uncategorized().await.unwrap();

        let paths = dashboard.client().transport().paths();
        assert_eq!(paths.last().unwrap(), "/eventos/nao-categorizados");
        let state = dashboard.snapshot().await;
        assert_eq!(state.panel(), &Panel::Uncategorized);
        assert_eq!(state.uncategorized().len(), 1);
    }

    #[tokio::test]
    async fn test_new_events_notify_every_poll() {
        let transport = saude_transport().respond(
            "/eventos/novos",
            r#"[{"nome": "A", "data_inicio": "01/08/2025", "local_evento": "Plenário 1"}, {"nome": "B", "area_tecnica": "Educação"}]"#,
        );
        let (dashboard, presenter) = dashboard(transport, true);

        assert_eq!(dashboard.check_for_new_events().await.unwrap(), 2);
        assert_eq!(dashboard.check_for_new_events().await.unwrap(), 2);

        let notifications = presenter.notifications();
        let titles: Vec<_> = notifications.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "A", "B"]);
        assert_eq!(notifications[0].area, render::NOTIFICATION_DEFAULT_AREA);
        assert_eq!(notifications[1].area, "Educação");
        assert!(dashboard.snapshot().await.last_update().is_some());
    }

    #[tokio::test]
    async fn test_initialize_failure_shows_generic_message() {
        let transport = FakeTransport::new().fail("/areas", 500);
        let (dashboard, presenter) = dashboard(transport, true);

        assert!(dashboard.initialize().await.is_err());
        assert_eq!(presenter.errors(), vec![LOAD_ERROR.to_string()]);
    }

    #[tokio::test]
    async fn test_refresh_reloads_open_area() {
        let (dashboard, presenter) = dashboard(saude_transport(), true);
        dashboard.initialize().await.unwrap();
        dashboard.select_area("Saúde").await.unwrap();
        let before = dashboard.client().transport().count("/proposicoes");

        dashboard.refresh().await.unwrap();

        assert_eq!(dashboard.client().transport().count("/proposicoes"), before + 1);
        assert_eq!(presenter.successes(), vec![REFRESH_SUCCESS.to_string()]);
        assert!(presenter.last_page().unwrap().last_update.is_some());
    }
}
