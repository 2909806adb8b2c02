//! Render command implementation.

use crate::cli::RenderArgs;
use crate::config::Config;
use crate::error::Result;
use docket_refiner::{PromptParams, PromptTemplate};

/// Execute the render command.
pub fn execute_render(args: RenderArgs, config: &Config) -> Result<()> {
    println!("{}", render_prompt(&args, config)?);
    Ok(())
}

/// Render the prompt selected by flags, falling back to the configuration.
fn render_prompt(args: &RenderArgs, config: &Config) -> Result<String> {
    let template = match (&args.template, args.prompt) {
        (Some(path), _) => PromptTemplate::from_file(path)?,
        (None, Some(prompt)) => PromptTemplate::for_kind(prompt.into()),
        (None, None) => config.run.refiner.load_template()?,
    };

    Ok(template.render(&PromptParams {
        question: &args.question,
        answer: &args.answer,
    }))
}
