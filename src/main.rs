use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use agency_registry::config::AppConfig;
use agency_registry::error::AppError;
use agency_registry::registration::{
    registration_router, AgencyStatus, NoticeError, NoticePublisher, RegistrationConfig,
    RegistrationGuard, RegistrationId, RegistrationNotice, RegistrationRecord,
    RegistrationRepository, RegistrationSchema, RegistrationService, RegistrationSubmission,
    RegistrationSummary, RepositoryError, SubscriptionOffering, SubscriptionOrder,
    DEFAULT_MAX_ATTACHMENT_BYTES,
};
use agency_registry::telemetry;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: Arc<PrometheusHandle>,
}

#[derive(Parser, Debug)]
#[command(
    name = "Agency Registration Service",
    about = "Run the agency registration service and validate submissions from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Work with registration submissions offline
    Registration {
        #[command(subcommand)]
        command: RegistrationCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Override the configured log level/filter
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum RegistrationCommand {
    /// Validate a submission JSON document and report the outcome
    Check(RegistrationCheckArgs),
}

#[derive(Args, Debug)]
struct RegistrationCheckArgs {
    /// Path to a registration submission JSON document
    #[arg(long)]
    file: PathBuf,
    /// Print the application summary when the submission is accepted
    #[arg(long)]
    summary: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Registration {
            command: RegistrationCommand::Check(args),
        } => run_registration_check(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(log_level) = args.log_level.take() {
        config.telemetry.log_level = log_level;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryRegistrationRepository::default());
    let notices = Arc::new(LogNoticePublisher);
    let service = Arc::new(RegistrationService::new(
        repository,
        notices,
        default_registration_config(config.uploads.max_attachment_bytes),
    ));

    let app = registration_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .layer(Extension(state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        environment = config.environment.label(),
        %addr,
        "agency registration service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_registration_check(args: RegistrationCheckArgs) -> Result<(), AppError> {
    let RegistrationCheckArgs { file, summary } = args;

    let raw = std::fs::read_to_string(&file)?;
    let submission: RegistrationSubmission = serde_json::from_str(&raw)?;

    let config = default_registration_config(DEFAULT_MAX_ATTACHMENT_BYTES);
    let guard = RegistrationGuard::from_schema(
        RegistrationSchema::standard().with_max_attachment_bytes(config.max_attachment_bytes),
    );

    let selections = submission.subscriptions.clone();
    let (profile, order) = guard
        .profile_from_submission(submission)
        .and_then(|profile| {
            let order = SubscriptionOrder::from_selections(&selections, &config.offerings)?;
            Ok((profile, order))
        })?;

    let record = RegistrationRecord {
        profile,
        status: AgencyStatus::Pending,
        order,
    };

    println!("Submission accepted");
    println!(
        "Combined plan {} | total with surcharge {:.2}",
        record.order.combined_plan_id, record.order.total_with_surcharge
    );

    if summary {
        render_summary(&RegistrationSummary::from_record(&record));
    }

    Ok(())
}

/// Subscription catalog and upload limits the binary provisions the service
/// with. Prices are authoritative here; client-supplied prices are ignored.
fn default_registration_config(max_attachment_bytes: u64) -> RegistrationConfig {
    RegistrationConfig {
        offerings: vec![
            SubscriptionOffering {
                id: 1,
                name: "Card Data Access".to_string(),
                price: 100.0,
            },
            SubscriptionOffering {
                id: 2,
                name: "Mobile ID Data Access".to_string(),
                price: 250.0,
            },
            SubscriptionOffering {
                id: 3,
                name: "Identity Verification".to_string(),
                price: 400.0,
            },
        ],
        max_attachment_bytes,
    }
}

#[derive(Default, Clone)]
struct InMemoryRegistrationRepository {
    records: Arc<Mutex<HashMap<RegistrationId, RegistrationRecord>>>,
}

impl RegistrationRepository for InMemoryRegistrationRepository {
    fn insert(&self, record: RegistrationRecord) -> Result<RegistrationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.profile.registration_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.profile.registration_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: RegistrationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.profile.registration_id) {
            guard.insert(record.profile.registration_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &RegistrationId) -> Result<Option<RegistrationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, limit: usize) -> Result<Vec<RegistrationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status == AgencyStatus::Pending)
            .take(limit)
            .cloned()
            .collect())
    }
}

struct LogNoticePublisher;

impl NoticePublisher for LogNoticePublisher {
    fn publish(&self, notice: RegistrationNotice) -> Result<(), NoticeError> {
        info!(
            template = %notice.template,
            registration_id = %notice.registration_id.0,
            "registration notice dispatched"
        );
        Ok(())
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn render_summary(summary: &RegistrationSummary) {
    println!("\n{}", summary.title);

    for row in &summary.rows {
        println!("- {}: {}", row.label, row.value);
    }

    println!("\nSubscriptions");
    for line in &summary.subscriptions {
        println!("- {}: {}", line.name, line.reason);
    }
    println!("Total with surcharge: {:.2}", summary.total_with_surcharge);

    println!("\nDocuments provided");
    for item in &summary.documents {
        let mark = if item.provided { "yes" } else { "missing" };
        println!("- {} ({mark})", item.label);
    }

    println!("\n{} -", summary.declaration_preamble);
    for statement in &summary.declarations {
        println!("- {statement}");
    }
}
