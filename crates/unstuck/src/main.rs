use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use unstuck_common::{logger, AppConfig};
use unstuck_llm::{CallOutcome, ModelClient, PlanRequest, UnstuckPipeline};

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
            return;
        }
    }
    dotenv::dotenv().ok();
}

#[derive(Parser)]
#[command(name = "unstuck")]
#[command(about = "Life Unstuck AI - turns a problem into a 5-step action plan", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web form server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run the pipeline once and print the answer
    Ask {
        /// Problem description
        #[arg(long, short)]
        text: String,

        /// Optional PNG/JPEG image
        #[arg(long, short)]
        image: Option<PathBuf>,

        /// Legacy category hint (ignored)
        #[arg(long)]
        category: Option<String>,
    },

    /// Verify the configured API key with one test call
    CheckKey,
}

fn build_pipeline(config: &AppConfig) -> Result<UnstuckPipeline> {
    let client = ModelClient::from_config(config)?;
    Ok(UnstuckPipeline::new(Arc::new(client)))
}

async fn serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    // CLI arguments override the environment
    if let Some(host) = host {
        config.server_host = host;
    }
    if let Some(port) = port {
        config.server_port = port;
    }
    config.validate()?;

    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("Life Unstuck starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Text model: {}", config.text_model);
    tracing::info!("  Image model: {}", config.image_model);
    tracing::info!("  API key: {}", if config.has_api_key() { "configured" } else { "missing" });

    let pipeline = build_pipeline(&config)?;

    println!("Server listening on http://{}", config.server_bind_address());

    unstuck_server::start_server(config, pipeline).await?;
    Ok(())
}

async fn ask(config: AppConfig, text: String, image: Option<PathBuf>, category: Option<String>) -> Result<()> {
    logger::setup_console_logging(&config.log_level)?;

    let mut request = PlanRequest::new(text);
    if let Some(path) = image {
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        request = request.with_image(bytes);
    }
    if let Some(category) = category {
        request = request.with_category(category);
    }

    let pipeline = build_pipeline(&config)?;
    let answer = pipeline.run_request(&request).await;

    println!("{}", answer);
    Ok(())
}

async fn check_key(config: AppConfig) -> Result<()> {
    logger::setup_console_logging(&config.log_level)?;

    let client = ModelClient::from_config(&config)?;
    match client.check_key().await {
        CallOutcome::Success(_) => {
            println!("KEY IS VALID & SUPPORTS: {}", config.text_model);
            Ok(())
        }
        CallOutcome::Unconfigured => anyhow::bail!("No API key configured (set GEMINI_API_KEY)"),
        other => anyhow::bail!("Key check failed: {}", other.into_text()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();
    let config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(config, host, port).await?,
        Some(Commands::Ask { text, image, category }) => ask(config, text, image, category).await?,
        Some(Commands::CheckKey) => check_key(config).await?,
        None => serve(config, None, None).await?,
    }

    Ok(())
}
