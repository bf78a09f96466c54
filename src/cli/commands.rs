use crate::app::{AppContext, Result};
use crate::config::{Config, RunOverrides, RunPlan};
use crate::domain::RunSummary;

pub fn list_podcasts(config: &Config) {
    for alias in config.aliases() {
        println!("{}", alias);
    }
}

pub async fn grab(
    ctx: &AppContext,
    config: &Config,
    overrides: &RunOverrides,
) -> Result<RunSummary> {
    let plan = RunPlan::resolve(config, overrides);

    for name in &plan.unknown_names {
        tracing::warn!("Unknown podcast requested: {}", name);
        eprintln!("No podcast named {} in the config file", name);
    }

    if plan.podcasts.is_empty() {
        println!("No podcasts to fetch");
        return Ok(RunSummary::default());
    }

    if plan.dry_run {
        println!("Dry run: audio files will not be downloaded");
    }

    let summary = ctx.processor.run(&plan).await?;
    println!("Done. {}", summary);
    Ok(summary)
}
