// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup wiring for each subcommand.

use std::sync::Arc;

use sairen_agent::Agent;
use sairen_config::SairenConfig;
use sairen_context::ReferenceCache;
use sairen_core::SairenError;
use sairen_core::traits::{PluginAdapter, ProviderAdapter};
use sairen_extract::ContentExtractor;
use sairen_gateway::{AppState, ExtractionGate, ServerConfig};
use sairen_memory::ConversationMemory;
use sairen_openai::OpenAiProvider;
use sairen_router::IntentClassifier;
use tracing::info;

use crate::shutdown::shutdown_signal;

/// Runs the gateway until a shutdown signal arrives.
///
/// The completion provider is built first, so a missing API key stops the
/// process before the listener binds. Reference pages are extracted in the
/// background; requests served meanwhile see a partial context.
pub async fn run_serve(config: SairenConfig) -> Result<(), SairenError> {
    let provider: Arc<dyn ProviderAdapter> = Arc::new(OpenAiProvider::new(&config.openai)?);
    let extractor = ContentExtractor::from_config(&config.extract)?;
    let references = ReferenceCache::new();
    let memory = ConversationMemory::from_config(&config.memory);

    {
        let references = references.clone();
        let extractor = extractor.clone();
        let pages = config.references.clone();
        tokio::spawn(async move {
            let stored = references.populate(&pages, &extractor).await;
            info!(stored, configured = pages.len(), "finished loading reference content");
        });
    }

    let provider_name = provider.name().to_string();
    let extractor_name = extractor.fetcher_name().to_string();
    let agent = Agent::new(provider, memory, references.clone(), &config)?;
    let state = AppState::new(
        Arc::new(agent),
        extractor,
        references,
        ExtractionGate::new(config.gateway.extract_concurrency),
    );

    info!(
        agent = %config.agent.name,
        provider = %provider_name,
        model = %config.openai.model,
        fetcher = %extractor_name,
        "starting sairen"
    );
    sairen_gateway::start_server(&ServerConfig::from(&config.gateway), state, shutdown_signal())
        .await?;
    info!("sairen serve shutdown complete");
    Ok(())
}

/// Extracts one page and prints the cleaned text.
pub async fn run_extract(config: &SairenConfig, url: &str) -> Result<(), SairenError> {
    let extractor = ContentExtractor::from_config(&config.extract)?;
    let text = extractor.try_extract(url).await?;
    println!("{text}");
    Ok(())
}

/// Classifies one message and prints the action label.
pub async fn run_classify(config: &SairenConfig, text: &str) -> Result<(), SairenError> {
    let provider = Arc::new(OpenAiProvider::new(&config.openai)?);
    let label = IntentClassifier::new(provider).classify(text).await;
    println!("{label}");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sairen={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
