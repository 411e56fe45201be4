/// skin-gate prediction server
///
/// Accepts a photo as a multipart upload (field `file`) on `POST /predict`
/// and answers with `{"label", "confidence"}`. Images without enough skin or
/// skin texture come back as `{"label": "unknown", "confidence": 0.0}`.
///
/// Run with:
///   SKIN_GATE_MODEL=model/skin_type_model.json cargo run --bin server --release
///
/// Environment:
///   SKIN_GATE_ADDR              bind address (0.0.0.0:5001)
///   SKIN_GATE_MODEL             model JSON (model/skin_type_model.json)
///   SKIN_GATE_CONFIG            pipeline config JSON (built-in defaults)
///   SKIN_GATE_MAX_UPLOAD_BYTES  upload limit (16 MiB)
///   RUST_LOG                    log filter (skin_gate=info,server=info)

mod handlers;
mod routes;
mod settings;
mod state;
mod util;

use std::process::ExitCode;
use std::sync::Arc;

use tiny_http::Server;
use tracing_subscriber::EnvFilter;

use skin_gate::{NetworkClassifier, Pipeline, PipelineConfig};

use settings::Settings;
use state::AppState;

fn load_state(settings: Settings) -> Result<AppState, Box<dyn std::error::Error>> {
    let config = match &settings.config_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading pipeline config");
            PipelineConfig::load_json(path)?
        }
        None => PipelineConfig::default(),
    };
    let classifier = NetworkClassifier::load(&settings.model_path)?;
    let pipeline = Pipeline::new(config, classifier)?;
    Ok(AppState { pipeline, settings })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("skin_gate=info,server=info")),
        )
        .init();

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "invalid settings");
            return ExitCode::FAILURE;
        }
    };
    let addr = settings.addr.clone();

    let state = match load_state(settings) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!(error = %e, "could not start the prediction pipeline");
            return ExitCode::FAILURE;
        }
    };

    let server = match Server::http(&addr) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind HTTP server");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(addr = %addr, "listening");

    // One thread per request; the pipeline is shared read-only.
    for request in server.incoming_requests() {
        let state = Arc::clone(&state);
        std::thread::spawn(move || {
            routes::dispatch(request, state);
        });
    }
    ExitCode::SUCCESS
}
