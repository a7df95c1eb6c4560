use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use console::style;
use crate::cli::commands::GenerateArgs;
use crate::config::{self, ReportSettings, SettingsStore};
use crate::db::Database;
use crate::errors::ReportError;
use crate::models::{ConfidenceFlags, Risk, RiskFlags};
use crate::pipeline::{ReportGenerator, ReportRequest};
use crate::reporting::JsonPayloadRenderer;
use crate::session::SessionSnapshot;
use crate::templates::TemplateRegistry;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub async fn handle_generate(args: GenerateArgs, quiet: bool) -> Result<(), ReportError> {
    let db = Arc::new(Database::new(&args.db)?);
    let settings = load_settings(&args, db.as_ref()).await?;

    let template_dir = args
        .template_dir
        .clone()
        .unwrap_or_else(|| settings.template_directory.clone());
    let templates = Arc::new(TemplateRegistry::load(&PathBuf::from(&template_dir))?);

    let snapshot = Arc::new(SessionSnapshot::load(&PathBuf::from(&args.session)).await?);
    let request = build_request(&args, &settings, template_dir);

    info!(
        template = %request.template,
        sites = request.sites.len(),
        contexts = request.contexts.len(),
        "Generating report"
    );

    let cancel_token = CancellationToken::new();
    let generator = Arc::new(
        ReportGenerator::new(
            snapshot.clone(),
            snapshot,
            templates,
            db,
            Arc::new(JsonPayloadRenderer),
        )
        .with_cancel_token(cancel_token.clone()),
    );

    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, discarding report request");
            cancel_token.cancel();
        }
    });
    let result = generator.spawn(request).wait().await;
    interrupt.abort();
    let report = result?;

    if !quiet {
        println!(
            "{} {} ({} alerts, template {})",
            style("Report written:").green().bold(),
            report.path.display(),
            report.alert_count,
            report.template,
        );
        if !report.risk_counts.is_empty() {
            println!("  {}", format_risk_counts(&report.risk_counts));
        }
        if report.display_report {
            println!("{} {}", style("Open:").cyan(), report.path.display());
        }
    }

    Ok(())
}

/// Most severe first, e.g. "high: 2, medium: 0".
fn format_risk_counts(counts: &BTreeMap<Risk, usize>) -> String {
    counts
        .iter()
        .rev()
        .map(|(risk, count)| format!("{}: {}", risk.as_str(), count))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Settings file if given, otherwise the saved settings, otherwise defaults.
async fn load_settings(
    args: &GenerateArgs,
    store: &dyn SettingsStore,
) -> Result<ReportSettings, ReportError> {
    if let Some(path) = &args.settings {
        return config::parse_settings(&PathBuf::from(path)).await;
    }
    match store.load_settings() {
        Ok(Some(saved)) => Ok(saved),
        Ok(None) => Ok(ReportSettings::default()),
        Err(e) => {
            warn!(error = %e, "Could not read saved settings, using defaults");
            Ok(ReportSettings::default())
        }
    }
}

fn build_request(
    args: &GenerateArgs,
    settings: &ReportSettings,
    template_dir: String,
) -> ReportRequest {
    let mut request = ReportRequest::from_settings(settings);
    request.template_directory = template_dir;

    if let Some(title) = &args.title {
        request.title = title.clone();
    }
    if let Some(description) = &args.description {
        request.description = description.clone();
    }
    if let Some(template) = &args.template {
        request.template = template.clone();
    }
    if let Some(dir) = &args.output_dir {
        request.report_directory = PathBuf::from(dir);
    }
    if let Some(pattern) = &args.name_pattern {
        request.name_pattern = pattern.clone();
    }
    request.report_name = args.name.clone();
    request.focused_site = args.focus_site.clone();
    request.sites = args.sites.clone();
    request.contexts = args.contexts.clone();

    if !args.risks.is_empty() {
        let mut flags = RiskFlags::none();
        for risk in &args.risks {
            flags.set((*risk).into(), true);
        }
        request.risks = flags;
    }
    if !args.confidences.is_empty() {
        let mut flags = ConfidenceFlags::none();
        for confidence in &args.confidences {
            flags.set((*confidence).into(), true);
        }
        request.confidences = flags;
    }

    request.generate_anyway = args.generate_anyway;
    request.display_report = if args.display {
        true
    } else if args.no_display {
        false
    } else {
        settings.display_report
    };
    request
}
