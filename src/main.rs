//! Image Studio - generate and edit images with hosted Gemini models.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod controller;
mod error;
mod generation;
mod i18n;
mod model;
mod output;
mod params;
mod ports;
mod session;
mod view;

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::{RecordingSession, ServiceContext};
use crate::controller::{StudioController, SubmitOutcome};
use crate::error::{FailureKind, ImageError};
use crate::i18n::{discover_preferences_path, parse_language, Preferences, Translator};
use crate::model::parse_model;
use crate::params::parse_aspect_ratio;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "image_studio=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Returns `Ok(false)` when a generation failed and the localized reason was
/// already printed.
async fn run(cli: Cli) -> Result<bool, ImageError> {
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(ImageError::Config)?;

    let mut preferences = Preferences::load(&discover_preferences_path());
    if let Some(ref code) = cli.lang {
        let language = parse_language(code).map_err(ImageError::InvalidArgument)?;
        if let Err(e) = preferences.set_language(language) {
            tracing::warn!(error = %e, "Failed to persist language preference");
        }
    }

    let model_name = cli.model.as_deref().unwrap_or(&config.defaults.model);
    let model = parse_model(model_name).map_err(ImageError::InvalidArgument)?;
    let ratio_name = cli.aspect_ratio.as_deref().unwrap_or(&config.defaults.aspect_ratio);
    let aspect_ratio = parse_aspect_ratio(ratio_name).map_err(ImageError::InvalidArgument)?;
    tracing::debug!(
        model = model.id(),
        %aspect_ratio,
        language = %preferences.language(),
        "Resolved session defaults"
    );

    let (ctx, recording) = service_context(&config)?;
    let mut controller = StudioController::new(ctx.service, model, aspect_ratio);

    let result = if cli.is_interactive() {
        let input = tokio::io::BufReader::new(tokio::io::stdin());
        let mut out = std::io::stdout();
        session::run(&mut controller, &mut preferences, input, &mut out)
            .await
            .map(|()| true)
            .map_err(ImageError::Io)
    } else {
        one_shot(&cli, &mut controller, preferences.translator()).await
    };

    drop(controller);
    if let Some(session) = recording {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => tracing::warn!(error = %e, "Failed to save cassette"),
        }
    }

    result
}

/// Pick live, recording or replaying adapters from the environment.
fn service_context(
    config: &Config,
) -> Result<(ServiceContext, Option<RecordingSession>), ImageError> {
    let replay_path = std::env::var("IMAGE_STUDIO_REPLAY").ok();
    let is_recording = std::env::var("IMAGE_STUDIO_REC").is_ok_and(|v| v == "true" || v == "1");

    if let Some(ref cassette_path) = replay_path {
        tracing::debug!(cassette = %cassette_path, "Replay mode");
        Ok((ServiceContext::replaying(Path::new(cassette_path))?, None))
    } else if is_recording {
        tracing::debug!("Recording mode enabled");
        let (ctx, session) = ServiceContext::recording(config);
        Ok((ctx, Some(session)))
    } else {
        Ok((ServiceContext::live(config), None))
    }
}

async fn one_shot(
    cli: &Cli,
    controller: &mut StudioController,
    tr: Translator,
) -> Result<bool, ImageError> {
    if let Some(ref image) = cli.image {
        let model = controller.state().model;
        if !model.accepts_reference_image() {
            return Err(ImageError::InvalidArgument(format!(
                "{} does not accept a reference image; use --model nano-banana",
                model.display_name()
            )));
        }
        if !controller.upload(Path::new(image)).await {
            let kind = controller
                .live_notification(Instant::now())
                .unwrap_or(FailureKind::FileReadFailure);
            report(tr, kind.translation_key());
            return Ok(false);
        }
    }

    if let Some(ref prompt) = cli.prompt {
        controller.set_prompt(prompt.as_str());
    }

    let outcome = controller.submit().await;
    if let Some(key) = outcome.failure_key() {
        tracing::debug!(?outcome, "Nothing generated");
        report(tr, key);
        return Ok(false);
    }

    let path = controller.download(cli.output.as_deref().map(Path::new))?;
    eprintln!("{} {}", tr.t("saved_to"), path.display());
    Ok(true)
}

fn report(tr: Translator, key: &str) {
    eprintln!("Error: {}", tr.t(key));
}
