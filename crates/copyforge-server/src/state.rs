//! Shared application state.

use std::sync::Arc;

use copyforge_core::CopyforgeConfig;
use copyforge_enhance::LsiSuggester;
use copyforge_generate::{
    BackendConfig, GenerationClient, GenerationOptions, HttpGenerationClient,
};
use copyforge_prompt::PromptBuilder;
use copyforge_quality::QualityScorer;
use copyforge_store::SqliteStore;
use copyforge_workflow::{LogNotifier, Notifier, OrderWorkflow, WebhookNotifier};

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: CopyforgeConfig,
    pub store: Arc<SqliteStore>,
    pub workflow: OrderWorkflow,
    pub suggester: LsiSuggester,
    pub scorer: QualityScorer,
}

impl AppState {
    pub fn new(config: CopyforgeConfig, store: SqliteStore) -> anyhow::Result<Self> {
        let store = Arc::new(store);

        // Generation backend from persisted config plus env overrides
        let backend = BackendConfig::load(&config.data_paths.backend_config_file);
        let client: Arc<dyn GenerationClient> = Arc::new(HttpGenerationClient::new(
            backend.base_url.clone(),
            backend.api_key.clone(),
            config.generation_timeout_secs,
        )?);
        let options = GenerationOptions {
            model: backend.model.clone(),
            temperature: backend.temperature,
            max_tokens: backend.max_tokens,
        };

        let notifier: Arc<dyn Notifier> = match std::env::var("COPYFORGE_NOTIFY_WEBHOOK") {
            Ok(url) => Arc::new(WebhookNotifier::new(url)),
            Err(_) => Arc::new(LogNotifier),
        };

        let workflow = OrderWorkflow::new(
            store.clone(),
            store.clone(),
            PromptBuilder::new(store.clone()),
            client.clone(),
            notifier,
        )
        .with_options(options.clone());

        Ok(Self {
            config,
            store,
            workflow,
            suggester: LsiSuggester::with_options(client, options),
            scorer: QualityScorer::new(),
        })
    }
}
