//! Refine command implementation.

use crate::cli::RefineArgs;
use crate::config::{Config, ProviderConfig, ProviderKind};
use crate::error::Result;
use crate::output::Formatter;
use docket_llm::{AnyProvider, OllamaProvider, OpenAiProvider};
use docket_refiner::{BatchDriver, JsonFileSink};
use std::time::Duration;
use tracing::info;

/// Execute the refine command.
pub async fn execute_refine(args: RefineArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let config = apply_overrides(args, config.clone());
    config.validate()?;

    let provider = build_provider(&config.provider)?;
    info!(
        "Using {} provider with model '{}'",
        provider.name(),
        config.provider.model
    );

    let refiner = config.run.refiner;
    let sink = JsonFileSink::new(&config.run.output).pretty(refiner.pretty_output);
    let max_items = refiner.max_items;

    let mut driver = BatchDriver::from_config(provider, sink, refiner)?;
    let report = driver.run(&config.run.input_dir, max_items).await?;

    println!("{}", formatter.format_report(&report, &config.run.output)?);
    Ok(())
}

/// Layer command-line flags over the loaded configuration.
fn apply_overrides(args: RefineArgs, mut config: Config) -> Config {
    if let Some(input_dir) = args.input_dir {
        config.run.input_dir = input_dir;
    }
    if let Some(output) = args.output {
        config.run.output = output;
    }
    if let Some(max_items) = args.max_items {
        config.run.refiner.max_items = max_items;
    }
    if let Some(prompt) = args.prompt {
        config.run.refiner.prompt = prompt.into();
    }
    if let Some(template) = args.template {
        config.run.refiner.template_path = Some(template);
    }
    if let Some(provider) = args.provider {
        config.provider.kind = provider.into();
    }
    if let Some(model) = args.model {
        config.provider.model = model;
    }
    if let Some(temperature) = args.temperature {
        config.provider.temperature = temperature;
    }
    config
}

/// Build the completion provider selected by the configuration.
///
/// The OpenAI provider needs an API key in the environment; Ollama does not.
pub fn build_provider(config: &ProviderConfig) -> Result<AnyProvider> {
    let temperature = config.temperature as f32;

    match config.kind {
        ProviderKind::OpenAi => {
            let mut provider = OpenAiProvider::new(config.api_key()?, &config.model)?
                .with_temperature(temperature)
                .with_timeout(Duration::from_secs(config.timeout_secs))?;
            if let Some(endpoint) = &config.endpoint {
                provider = provider.with_endpoint(endpoint);
            }
            Ok(AnyProvider::OpenAi(provider))
        }
        ProviderKind::Ollama => {
            let endpoint = config
                .endpoint
                .as_deref()
                .unwrap_or(docket_llm::ollama::DEFAULT_ENDPOINT);
            let provider =
                OllamaProvider::new(endpoint, &config.model)?.with_temperature(temperature);
            Ok(AnyProvider::Ollama(provider))
        }
    }
}
