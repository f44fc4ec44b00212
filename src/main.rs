//! Gram Sahayak - voice/text assistant for rural users
//!
//! Routes each user turn to general conversation, a weather lookup or a
//! search-augmented answer, and serves the conversation over HTTP.

mod agent;
mod api;
mod config;
mod conversation;
mod llm;
mod replies;
mod runtime;
mod services;
mod state_machine;
mod system_prompt;

use agent::{BranchSet, GeneralBranch, WeatherBranch, WebSearchBranch};
use api::{create_router, AppState};
use config::Config;
use llm::{ChatCompletionsService, LlmService, LoggingService};
use runtime::Orchestrator;
use services::{LlamaGuard, OpenWeatherMap, TavilySearch};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gram_sahayak=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = Config::from_env()?;
    let orchestrator = build_orchestrator(&config);

    let state = AppState::new(orchestrator);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Gram Sahayak server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn chat_model(config: &Config, model: &str) -> Arc<dyn LlmService> {
    let service = ChatCompletionsService::new(&config.groq_api_key, &config.groq_base_url, model);
    Arc::new(LoggingService::new(Arc::new(service)))
}

/// Construct every collaborator once and hand them to the orchestrator
fn build_orchestrator(config: &Config) -> Orchestrator {
    let router = chat_model(config, &config.router_model);
    let generator = chat_model(config, &config.generation_model);

    if config.openweathermap_api_key.is_none() {
        tracing::warn!("OPENWEATHERMAP_API_KEY not set, weather questions will get an apology");
    }

    let branches = BranchSet::new(
        GeneralBranch::new(generator.clone()),
        WebSearchBranch::new(generator, Arc::new(TavilySearch::new(&config.tavily_api_key)))
            .with_max_results(config.search_max_results),
        WeatherBranch::new(
            router.clone(),
            Arc::new(OpenWeatherMap::new(config.openweathermap_api_key.clone())),
        ),
    );

    let orchestrator = Orchestrator::new(router, branches);

    tracing::info!(
        generation_model = %config.generation_model,
        router_model = %config.router_model,
        safety_check = config.safety_check,
        "Orchestrator initialized"
    );

    if config.safety_check {
        let guard = chat_model(config, &config.guard_model);
        orchestrator.with_safety(Arc::new(LlamaGuard::new(guard)))
    } else {
        orchestrator
    }
}
