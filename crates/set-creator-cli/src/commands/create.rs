use super::create_ui::CreateUI;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use serde_json::json;
use set_creator_config::{Config, PathManager};
use set_creator_core::{CreateOptions, SetCreator};
use std::path::PathBuf;
use std::time::Duration;

pub struct CreateArgs {
    pub pmm_config: Option<PathBuf>,
    pub url: Option<String>,
    pub timeout: u64,
    pub season: bool,
    pub episode: bool,
    pub log_requests: bool,
}

pub async fn run_create(args: CreateArgs, paths: PathManager, output: &Output) -> Result<()> {
    tracing::debug!("Create command started");

    let config_path = args.pmm_config.unwrap_or_else(|| paths.config_file());
    let config = Config::load_from_file(&config_path).map_err(|e| eyre!("{}", e))?;

    let options = CreateOptions {
        url: args.url,
        season: args.season,
        episode: args.episode,
        timeout: Duration::from_secs(args.timeout),
        log_requests: args.log_requests,
        ..CreateOptions::default()
    };
    tracing::info!(
        config = %config_path.display(),
        output_dir = %paths.config_dir().display(),
        season = options.season,
        episode = options.episode,
        timeout_secs = args.timeout,
        "Validating Options"
    );

    let creator = SetCreator::new(config, paths, options);
    let ui = CreateUI::new(output.format() == OutputFormat::Human);
    ui.set_message(format!(
        "Creating sets from {}",
        creator.options().url.as_deref().unwrap_or("(no url)")
    ));

    let result = creator.run().await;
    ui.finish();
    let summary = result
        .map_err(|e| eyre!("{}", e))
        .wrap_err("Metadata set creation failed")?;

    match output.format() {
        OutputFormat::Human => {
            for file in &summary.files {
                output.info(format!("Saved {}", file.display()));
            }
            if !summary.unresolved.is_empty() {
                output.warn(format!(
                    "{} IMDb IDs had no TMDb match: {}",
                    summary.unresolved.len(),
                    summary.unresolved.join(", ")
                ));
            }
            output.success(format!(
                "{} list done: {} movies, {} shows in {:.1}s",
                summary.provider, summary.movies, summary.shows, summary.duration_secs
            ));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let mut value = serde_json::to_value(&summary).wrap_err("Failed to serialize summary")?;
            if let Some(map) = value.as_object_mut() {
                map.insert("success".to_string(), json!(true));
            }
            output.json(&value);
        }
    }

    Ok(())
}
