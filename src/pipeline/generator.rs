use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use crate::config::SettingsStore;
use crate::errors::ReportError;
use crate::models::{ReportData, Risk};
use crate::reporting::{assemble_report, validate_report_target, ReportRenderer};
use crate::session::{AlertStore, SessionProvider, SessionSnapshot};
use crate::templates::{Template, TemplateRegistry};
use super::request::ReportRequest;
use tracing::{debug, error, info, warn};

/// Outcome of a successful generation.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    /// Correlates the log lines of one generation.
    pub run_id: String,
    pub path: PathBuf,
    pub template: String,
    pub alert_count: usize,
    /// Alerts per included risk level.
    pub risk_counts: BTreeMap<Risk, usize>,
    pub display_report: bool,
}

/// Assembled and validated report that has not been rendered yet.
#[derive(Debug, Clone)]
pub struct PreparedReport {
    pub data: ReportData,
    pub template: Template,
    pub target: PathBuf,
}

pub struct ReportGenerator {
    session: Arc<dyn SessionProvider>,
    alerts: Arc<dyn AlertStore>,
    templates: Arc<TemplateRegistry>,
    settings: Arc<dyn SettingsStore>,
    renderer: Arc<dyn ReportRenderer>,
    cancel_token: CancellationToken,
}

impl ReportGenerator {
    pub fn new(
        session: Arc<dyn SessionProvider>,
        alerts: Arc<dyn AlertStore>,
        templates: Arc<TemplateRegistry>,
        settings: Arc<dyn SettingsStore>,
        renderer: Arc<dyn ReportRenderer>,
    ) -> Self {
        Self {
            session,
            alerts,
            templates,
            settings,
            renderer,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Use an external token, e.g. one cancelled on Ctrl-C. Spawned runs get child tokens.
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Snapshot, assemble and validate without writing anything.
    pub async fn prepare(&self, request: &ReportRequest) -> Result<PreparedReport, ReportError> {
        self.prepare_with(request, &self.cancel_token).await
    }

    /// Run the full pipeline on the current task.
    pub async fn generate(&self, request: ReportRequest) -> Result<GeneratedReport, ReportError> {
        self.generate_with(request, &self.cancel_token).await
    }

    /// Run the pipeline on a background task and return a handle to its single result.
    pub fn spawn(self: &Arc<Self>, request: ReportRequest) -> GenerationHandle {
        let (tx, rx) = oneshot::channel();
        let token = self.cancel_token.child_token();
        let generator = Arc::clone(self);
        let task_token = token.clone();

        tokio::spawn(async move {
            let result = generator.generate_with(request, &task_token).await;
            if tx.send(result).is_err() {
                debug!("Generation result discarded, handle dropped");
            }
        });

        GenerationHandle { rx, cancel: token }
    }

    async fn prepare_with(
        &self,
        request: &ReportRequest,
        token: &CancellationToken,
    ) -> Result<PreparedReport, ReportError> {
        check_cancelled(token)?;

        let template = self.templates.resolve(&request.template)?.clone();
        let target = request.target_path(&template);

        let session = Arc::clone(&self.session);
        let alerts = Arc::clone(&self.alerts);
        let header = request.header();
        let criteria = request.criteria();
        let data = tokio::task::spawn_blocking(move || {
            let snapshot = SessionSnapshot::capture(session.as_ref(), alerts.as_ref());
            assemble_report(
                &header,
                &criteria,
                &snapshot.contexts,
                &snapshot.site_tree,
                &snapshot.alert_tree,
            )
        })
        .await
        .map_err(|e| ReportError::Internal(format!("Assembly task failed: {}", e)))?;

        check_cancelled(token)?;

        if let Err(e) = validate_report_target(&target, &data.alert_tree, request.generate_anyway) {
            let class = e.classify();
            warn!(
                path = %target.display(),
                error_type = class.error_type,
                error = %e,
                "Report validation failed"
            );
            return Err(e);
        }

        Ok(PreparedReport { data, template, target })
    }

    async fn generate_with(
        &self,
        request: ReportRequest,
        token: &CancellationToken,
    ) -> Result<GeneratedReport, ReportError> {
        let run_id = uuid::Uuid::new_v4().to_string();
        debug!(run_id = %run_id, template = %request.template, "Report generation started");
        let prepared = self.prepare_with(&request, token).await?;

        check_cancelled(token)?;
        self.persist_settings(&request, &prepared.template);

        // Past this point the request is committed and cancellation is ignored
        let PreparedReport { data, template, target } = prepared;
        if let Err(e) = self.renderer.render(&data, &template, &target).await {
            error!(
                run_id = %run_id,
                template = %template,
                renderer = self.renderer.renderer_name(),
                error = %e,
                "Failed to generate a report"
            );
            return Err(ReportError::GenerationFailed {
                template: template.config_name.clone(),
                message: e.to_string(),
            });
        }

        info!(
            run_id = %run_id,
            path = %target.display(),
            template = %template.config_name,
            alerts = data.alert_count(),
            sites = data.sites.len(),
            "Report generated"
        );

        Ok(GeneratedReport {
            run_id,
            path: target,
            template: template.config_name,
            alert_count: data.alert_count(),
            risk_counts: data.risk_counts(),
            display_report: request.display_report,
        })
    }

    /// Failures are logged and never stop generation.
    fn persist_settings(&self, request: &ReportRequest, template: &Template) {
        if let Err(e) = self.settings.save_settings(&request.to_settings(template)) {
            let err = ReportError::ConfigPersistenceFailed(e.to_string());
            error!(error = %err, "Failed to save Reports configuration");
        }
    }
}

fn check_cancelled(token: &CancellationToken) -> Result<(), ReportError> {
    if token.is_cancelled() {
        return Err(ReportError::Cancelled);
    }
    Ok(())
}

/// Single-shot handle to a spawned generation.
pub struct GenerationHandle {
    rx: oneshot::Receiver<Result<GeneratedReport, ReportError>>,
    cancel: CancellationToken,
}

impl GenerationHandle {
    /// Discard the in-flight request. Has no effect once rendering has started.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub async fn wait(self) -> Result<GeneratedReport, ReportError> {
        self.rx
            .await
            .map_err(|_| ReportError::Internal("Generation task ended without a result".into()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;
    use tempfile::TempDir;
    use crate::config::ReportSettings;
    use crate::db::Database;
    use crate::models::{AlertNode, Context, SiteNode};
    use crate::reporting::JsonPayloadRenderer;

    struct CountingRenderer {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingRenderer {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl ReportRenderer for CountingRenderer {
        async fn render(
            &self,
            _data: &ReportData,
            _template: &Template,
            _target: &Path,
        ) -> Result<(), ReportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ReportError::Internal("template blew up".into()));
            }
            Ok(())
        }

        fn renderer_name(&self) -> &str {
            "counting"
        }
    }

    struct FailingStore;

    impl SettingsStore for FailingStore {
        fn load_settings(&self) -> Result<Option<ReportSettings>, ReportError> {
            Ok(None)
        }

        fn save_settings(&self, _settings: &ReportSettings) -> Result<(), ReportError> {
            Err(ReportError::Database("read-only database".into()))
        }
    }

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            contexts: vec![Context::new("Default Context")],
            site_tree: SiteNode::root()
                .with_child(SiteNode::new("a"))
                .with_child(SiteNode::new("b")),
            alert_tree: AlertNode::root()
                .with_child(
                    AlertNode::category("Remote OS Command Injection")
                        .with_child(AlertNode::alert("Remote OS Command Injection", 3, 4, "a")),
                )
                .with_child(
                    AlertNode::category("Cookie No HttpOnly Flag")
                        .with_child(AlertNode::alert("Cookie No HttpOnly Flag", 1, 0, "b")),
                ),
        }
    }

    fn generator(
        renderer: Arc<dyn ReportRenderer>,
        store: Arc<dyn SettingsStore>,
    ) -> ReportGenerator {
        let session = Arc::new(snapshot());
        ReportGenerator::new(
            session.clone(),
            session,
            Arc::new(TemplateRegistry::builtin()),
            store,
            renderer,
        )
    }

    fn request(dir: &Path) -> ReportRequest {
        ReportRequest {
            report_directory: dir.to_path_buf(),
            name_pattern: "{site}-report".into(),
            ..ReportRequest::from_settings(&ReportSettings::default())
        }
    }

    #[tokio::test]
    async fn test_generate_writes_payload_and_saves_settings() {
        let dir = TempDir::new().unwrap();
        let db = Arc::new(Database::in_memory().unwrap());
        let gen = generator(Arc::new(JsonPayloadRenderer), db.clone());

        let mut req = request(dir.path());
        req.title = "Nightly".into();
        let report = gen.generate(req).await.unwrap();

        assert_eq!(report.path, dir.path().join("-report.json"));
        assert!(report.path.exists());
        // False positives are excluded by default
        assert_eq!(report.alert_count, 1);
        assert_eq!(report.risk_counts.get(&Risk::High), Some(&1));
        assert_eq!(report.risk_counts.get(&Risk::Low), Some(&0));
        assert_eq!(db.load_settings().unwrap().unwrap().title, "Nightly");
    }

    #[tokio::test]
    async fn test_validation_failure_skips_render_and_settings() {
        let dir = TempDir::new().unwrap();
        let renderer = Arc::new(CountingRenderer::new(false));
        let db = Arc::new(Database::in_memory().unwrap());
        let gen = generator(renderer.clone(), db.clone());

        let mut req = request(dir.path());
        req.risks = crate::models::RiskFlags::none();
        let err = gen.generate(req).await.unwrap_err();

        assert!(matches!(err, ReportError::NoAlertsMatched));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
        assert!(db.load_settings().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_generate_anyway_allows_empty_report() {
        let dir = TempDir::new().unwrap();
        let renderer = Arc::new(CountingRenderer::new(false));
        let gen = generator(renderer.clone(), Arc::new(Database::in_memory().unwrap()));

        let mut req = request(dir.path());
        req.sites = vec!["nowhere".into()];
        req.generate_anyway = true;
        let report = gen.generate(req).await.unwrap();
        assert_eq!(report.alert_count, 0);
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_renderer_failure_becomes_generation_failed() {
        let dir = TempDir::new().unwrap();
        let renderer = Arc::new(CountingRenderer::new(true));
        let gen = generator(renderer, Arc::new(Database::in_memory().unwrap()));

        let err = gen.generate(request(dir.path())).await.unwrap_err();
        match err {
            ReportError::GenerationFailed { template, message } => {
                assert_eq!(template, crate::templates::REPORT_DATA_JSON);
                assert!(message.contains("template blew up"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_settings_failure_does_not_block() {
        let dir = TempDir::new().unwrap();
        let renderer = Arc::new(CountingRenderer::new(false));
        let gen = generator(renderer.clone(), Arc::new(FailingStore));

        assert!(gen.generate(request(dir.path())).await.is_ok());
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_template() {
        let dir = TempDir::new().unwrap();
        let gen = generator(Arc::new(JsonPayloadRenderer), Arc::new(FailingStore));
        let mut req = request(dir.path());
        req.template = "Traditional PDF Report".into();
        assert!(matches!(gen.generate(req).await, Err(ReportError::UnknownTemplate(_))));
    }

    #[tokio::test]
    async fn test_unwritable_directory_rejected_before_render() {
        let dir = TempDir::new().unwrap();
        let renderer = Arc::new(CountingRenderer::new(false));
        let gen = generator(renderer.clone(), Arc::new(FailingStore));

        let err = gen.generate(request(&dir.path().join("missing"))).await.unwrap_err();
        assert!(matches!(err, ReportError::DirectoryNotWritable(_)));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_spawned_generation_delivers_result() {
        let dir = TempDir::new().unwrap();
        let gen = Arc::new(generator(Arc::new(JsonPayloadRenderer), Arc::new(FailingStore)));
        let handle = gen.spawn(request(dir.path()));
        let report = handle.wait().await.unwrap();
        assert!(report.path.exists());
        assert!(uuid::Uuid::parse_str(&report.run_id).is_ok());
    }

    #[tokio::test]
    async fn test_external_token_cancels_generation() {
        let dir = TempDir::new().unwrap();
        let renderer = Arc::new(CountingRenderer::new(false));
        let token = CancellationToken::new();
        let gen = Arc::new(
            generator(renderer.clone(), Arc::new(FailingStore)).with_cancel_token(token.clone()),
        );

        token.cancel();
        let result = gen.spawn(request(dir.path())).wait().await;
        assert!(matches!(result, Err(ReportError::Cancelled)));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancelled_generation_has_no_side_effects() {
        let dir = TempDir::new().unwrap();
        let renderer = Arc::new(CountingRenderer::new(false));
        let db = Arc::new(Database::in_memory().unwrap());
        let gen = Arc::new(generator(renderer.clone(), db.clone()));

        let handle = gen.spawn(request(dir.path()));
        handle.cancel();
        assert!(matches!(handle.wait().await, Err(ReportError::Cancelled)));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
        assert!(db.load_settings().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_prepare_does_not_write() {
        let dir = TempDir::new().unwrap();
        let gen = generator(Arc::new(JsonPayloadRenderer), Arc::new(FailingStore));
        let prepared = gen.prepare(&request(dir.path())).await.unwrap();
        assert_eq!(prepared.data.sites, vec!["a", "b"]);
        assert!(!prepared.target.exists());
    }
}
