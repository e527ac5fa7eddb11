//! Parse command - one-shot materials extraction

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::config::AppConfig;
use crate::infrastructure::logging;

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// File containing the build plan; reads stdin when omitted or `-`
    pub file: Option<PathBuf>,

    /// Model to use, overriding `openai.model`
    #[arg(long, short)]
    pub model: Option<String>,
}

/// Extract the materials list for one plan and print it to stdout
pub async fn run(args: ParseArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load()?;
    if let Some(model) = args.model {
        config.openai.model = model;
    }

    logging::init_logging(&config.logging);

    let plan = read_plan(args.file.as_ref())?;
    let parser = crate::create_plan_parser(&config)?
        .context("Missing OPENAI_API_KEY")?;

    let materials = parser.parse(&plan, false).await?;
    println!("{}", serde_json::to_string_pretty(&materials)?);

    Ok(())
}

fn read_plan(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read build plan from {}", path.display())),
        _ => {
            let mut plan = String::new();
            std::io::stdin()
                .read_to_string(&mut plan)
                .context("Failed to read build plan from stdin")?;
            Ok(plan)
        }
    }
}
