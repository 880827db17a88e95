use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use superpower_assessment::adapters::ai::OpenAIProvider;
use superpower_assessment::adapters::analysis::{FailoverAnalyzer, LlmPersonalityAnalyzer};
use superpower_assessment::adapters::http::{api_router, AppState, CorsPolicy};
use superpower_assessment::adapters::memory::InMemoryEngagementStore;
use superpower_assessment::adapters::postgres::{
    PostgresAnalyticsEventRepository, PostgresAssessmentRepository, PostgresSubscriberRepository,
};
use superpower_assessment::config::{AiConfig, AppConfig, DatabaseConfig};
use superpower_assessment::ports::{
    AIProvider, AnalyticsEventRepository, AssessmentRepository, PersonalityAnalyzer,
    SubscriberRepository,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

struct Repositories {
    assessments: Arc<dyn AssessmentRepository>,
    events: Arc<dyn AnalyticsEventRepository>,
    subscribers: Arc<dyn SubscriberRepository>,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let repositories = connect_repositories(&config.database).await?;
    let (analyzer, provider) = build_analyzer(&config.ai)?;

    let mut state = AppState::new(
        analyzer,
        repositories.assessments,
        repositories.events,
        repositories.subscribers,
    );
    if let Some(provider) = provider {
        state = state.with_ai_provider(provider);
    }

    let origins = config.server.cors_origins_list();
    let cors = if origins.is_empty() {
        CorsPolicy::any()
    } else {
        CorsPolicy::from_origins(origins)
    };

    let app = api_router(state, &cors).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(config.server.request_timeout())),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Superpower assessment API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

async fn connect_repositories(config: &DatabaseConfig) -> Result<Repositories, BoxError> {
    let Some(url) = config.url() else {
        tracing::warn!("No database configured; records are kept in memory only");
        let store = Arc::new(InMemoryEngagementStore::new());
        return Ok(Repositories {
            assessments: store.clone(),
            events: store.clone(),
            subscribers: store,
        });
    };

    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .connect_lazy(url)?;

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(Repositories {
        assessments: Arc::new(PostgresAssessmentRepository::new(pool.clone())),
        events: Arc::new(PostgresAnalyticsEventRepository::new(pool.clone())),
        subscribers: Arc::new(PostgresSubscriberRepository::new(pool)),
    })
}

fn build_analyzer(
    config: &AiConfig,
) -> Result<(Arc<dyn PersonalityAnalyzer>, Option<Arc<dyn AIProvider>>), BoxError> {
    let Some(openai) = config.openai_config() else {
        tracing::warn!("No AI provider configured; every analysis uses the fallback result");
        return Ok((Arc::new(FailoverAnalyzer::fallback_only()), None));
    };

    let provider: Arc<dyn AIProvider> = Arc::new(OpenAIProvider::new(openai)?);
    let llm = LlmPersonalityAnalyzer::new(provider.clone())
        .with_max_tokens(config.max_tokens)
        .with_temperature(config.temperature);
    let analyzer = FailoverAnalyzer::new(Arc::new(llm)).with_timeout(config.timeout());

    tracing::info!(model = %config.model, "AI analysis enabled");
    Ok((Arc::new(analyzer), Some(provider)))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
