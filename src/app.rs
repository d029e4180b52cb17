use std::sync::{Arc, Mutex};

use actix_web::web;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::application::ContentClient;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::{CredentialResolver, Settings};
use crate::infrastructure::llm_clients::GeminiClient;
use crate::interfaces::http::{add_log, start_server, HttpState};

pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;

    let filter = EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let credentials = CredentialResolver::standard(&settings);
    info!(
        providers = %credentials.provider_names().join(", "),
        model = %settings.llm.model,
        "Credential lookup order"
    );

    let content_client = ContentClient::new(
        Arc::new(GeminiClient::new()?),
        settings.llm.clone(),
        Arc::new(credentials),
    );

    let logs = Arc::new(Mutex::new(Vec::new()));
    add_log(
        &logs,
        "INFO",
        "System",
        &format!(
            "Listening on {}:{} (model={})",
            settings.server.host,
            settings.server.port,
            content_client.model()
        ),
    );
    let state = web::Data::new(HttpState::new(Arc::new(content_client), logs));

    actix_web::rt::System::new().block_on(async move {
        let server = start_server(state, &settings.server).map_err(|err| {
            error!(error = %err, "Failed to bind HTTP server");
            AppError::Configuration(format!(
                "Cannot listen on {}:{}: {}",
                settings.server.host, settings.server.port, err
            ))
        })?;

        info!(host = %settings.server.host, port = settings.server.port, "HTTP server started");
        server
            .await
            .map_err(|err| AppError::Internal(format!("HTTP server stopped: {}", err)))
    })
}
