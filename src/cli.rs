use crate::config;
use crate::dispatcher::Dispatcher;
use crate::handler::{AnalyzeHandler, Outcome};
use crate::logging::*;
use crate::messages::Locale;
use crate::request::ImageFile;
use crate::ui::UiHandles;
use crate::ui::terminal::{JsonRenderer, StaticForm, StatusButton, StderrNotifier};
use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[clap(name = "product-analyzer")]
#[clap(about = "Send a product name or image to the analysis service")]
#[clap(version)]
pub struct Cli {
    /// Analysis endpoint, overrides ANALYZE_ENDPOINT
    #[clap(long, global = true)]
    pub endpoint: Option<String>,

    /// Language of alerts and titles (fa, en), overrides UI_LOCALE
    #[clap(long, global = true)]
    pub locale: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a product by name and/or image
    Analyze(AnalyzeArgs),
    /// Check that the analysis service is up
    Health,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Product name or topic
    #[clap(long, short, default_value = "")]
    pub name: String,

    /// Image file of the product
    #[clap(long, short)]
    pub image: Option<PathBuf>,
}

pub async fn run(cli: Cli) -> Result<ExitCode> {
    if let Some(endpoint) = &cli.endpoint {
        config::set("ANALYZE_ENDPOINT", endpoint);
    }
    if let Some(locale) = &cli.locale {
        config::set("UI_LOCALE", locale);
    }

    match cli.command {
        Commands::Analyze(args) => analyze(args).await,
        Commands::Health => health().await,
    }
}

fn configured_locale() -> Result<Locale> {
    config::get("UI_LOCALE")?.parse()
}

async fn analyze(args: AnalyzeArgs) -> Result<ExitCode> {
    let log = DEFAULT.new(o!("function" => "analyze"));
    // one locale for alerts, labels and titles alike
    let locale = configured_locale()?;

    let image = match &args.image {
        Some(path) => Some(ImageFile::load(path).await?),
        None => None,
    };

    let notifier = Arc::new(StderrNotifier);
    let dispatcher = Dispatcher::from_config(notifier.clone(), locale)?;
    debug!(log, "dispatcher ready"; "endpoint" => %dispatcher.endpoint(), "locale" => %locale);

    let ui = UiHandles {
        form: Arc::new(StaticForm::new(args.name, image)),
        button: Arc::new(StatusButton::stderr(locale.messages().idle_label)),
        notifier,
        renderer: Arc::new(JsonRenderer::stdout()),
    };
    let handler = AnalyzeHandler::new(dispatcher, ui, locale);

    let code = match handler.on_click().await {
        Outcome::Rendered => ExitCode::SUCCESS,
        Outcome::Rejected => ExitCode::from(2),
        Outcome::Failed => ExitCode::FAILURE,
    };
    Ok(code)
}

async fn health() -> Result<ExitCode> {
    let dispatcher = Dispatcher::from_config(Arc::new(StderrNotifier), configured_locale()?)?;
    let status = dispatcher.check_health().await?;
    if !status.is_healthy() {
        bail!("service reports status: {}", status.status);
    }
    println!("{}", status.status);
    Ok(ExitCode::SUCCESS)
}
