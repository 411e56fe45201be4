//! Offline companion to the `server` binary.
//!
//!   skin-gate classify <model.json> <image> [--config <config.json>]
//!   skin-gate inspect <image> [--config <config.json>]
//!   skin-gate init-model <out.json> [--hidden <n>] [--config <config.json>]
//!   skin-gate default-config <out.json>

use std::process::ExitCode;

use rand::thread_rng;
use tracing_subscriber::EnvFilter;

use skin_gate::gate::inspect;
use skin_gate::{
    decode_image, ActivationFunction, ModelMetadata, Network, NetworkClassifier, Pipeline,
    PipelineConfig,
};

const USAGE: &str = "\
usage:
  skin-gate classify <model.json> <image> [--config <config.json>]
  skin-gate inspect <image> [--config <config.json>]
  skin-gate init-model <out.json> [--hidden <n>] [--config <config.json>]
  skin-gate default-config <out.json>";

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Positional arguments plus the `--flag value` pairs this tool understands.
struct Args {
    positional: Vec<String>,
    config: Option<String>,
    hidden: Option<usize>,
}

impl Args {
    fn parse(mut raw: impl Iterator<Item = String>) -> Result<Args, String> {
        let mut args = Args { positional: Vec::new(), config: None, hidden: None };
        while let Some(arg) = raw.next() {
            match arg.as_str() {
                "--config" => {
                    args.config = Some(raw.next().ok_or("--config needs a path")?);
                }
                "--hidden" => {
                    let n = raw.next().ok_or("--hidden needs a number")?;
                    args.hidden = Some(n.parse().map_err(|_| format!("--hidden: `{n}` is not a number"))?);
                }
                flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
                _ => args.positional.push(arg),
            }
        }
        Ok(args)
    }

    fn pipeline_config(&self) -> Result<PipelineConfig, skin_gate::ConfigError> {
        match &self.config {
            Some(path) => PipelineConfig::load_json(path),
            None => Ok(PipelineConfig::default()),
        }
    }
}

fn read_image(path: &str, config: &PipelineConfig) -> Result<image::RgbImage, Box<dyn std::error::Error>> {
    let bytes = std::fs::read(path)?;
    Ok(decode_image(&bytes, &config.decode)?)
}

fn classify(args: &Args) -> CliResult {
    let [model, image] = args.positional.as_slice() else {
        return Err(USAGE.into());
    };
    let config = args.pipeline_config()?;
    let pipeline = Pipeline::new(config, NetworkClassifier::load(model)?)?;
    let image = read_image(image, pipeline.config())?;
    let prediction = pipeline.predict_image(&image)?;
    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}

fn inspect_image(args: &Args) -> CliResult {
    let [image] = args.positional.as_slice() else {
        return Err(USAGE.into());
    };
    let config = args.pipeline_config()?;
    let image = read_image(image, &config)?;
    println!("{}", serde_json::to_string_pretty(&inspect(&image, &config))?);
    Ok(())
}

/// Random two-layer network shaped for the configured contract. Its
/// predictions are meaningless; it exists to smoke-test a deployment.
fn init_model(args: &Args) -> CliResult {
    let [out] = args.positional.as_slice() else {
        return Err(USAGE.into());
    };
    let config = args.pipeline_config()?;
    let hidden = args.hidden.unwrap_or(16);
    let inputs = config.model.input_len();

    let mut network = Network::new(
        vec![
            (hidden, inputs, ActivationFunction::ReLU),
            (config.labels.len(), hidden, ActivationFunction::Softmax),
        ],
        &mut thread_rng(),
    );
    network.metadata = Some(ModelMetadata {
        description: Some("randomly initialised skin-type model (untrained)".to_string()),
        input: Some(config.model.clone()),
        output_labels: Some(config.labels.clone()),
    });
    network.save_json(out)?;
    tracing::info!(path = %out, inputs, hidden, outputs = config.labels.len(), "wrote untrained model");
    Ok(())
}

fn default_config(args: &Args) -> CliResult {
    let [out] = args.positional.as_slice() else {
        return Err(USAGE.into());
    };
    PipelineConfig::default().save_json(out)?;
    tracing::info!(path = %out, "wrote default config");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skin_gate=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut raw = std::env::args().skip(1);
    let Some(command) = raw.next() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };
    let args = match Args::parse(raw) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let result = match command.as_str() {
        "classify" => classify(&args),
        "inspect" => inspect_image(&args),
        "init-model" => init_model(&args),
        "default-config" => default_config(&args),
        "-h" | "--help" | "help" => {
            println!("{USAGE}");
            Ok(())
        }
        other => Err(format!("unknown command `{other}`\n{USAGE}").into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
