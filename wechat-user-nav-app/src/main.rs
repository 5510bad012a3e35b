//! Console front end for the wechat-user screens
//!
//! Reads URLs (or `:reload`, `:back`, `:quit`) from stdin and drives the navigator. Views are
//! printed as text; dialogs ask for confirmation on the same stdin.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wechat_user_nav_app::adapters::{
    BundledTranslations, ConsoleInput, ConsoleViewRenderer, Language, PromptModalPresenter,
};
use wechat_user_nav_app::config::AppConfig;
use wechat_user_nav_app::{AppState, AppStateBuilder};
use wechat_user_nav_core::NavResult;

#[derive(Debug, Parser)]
#[command(name = "wechat-user-nav", version, about)]
struct Args {
    /// Config file (defaults to <config dir>/wechat-user-nav/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides `apiBaseUrl` from the config file
    #[arg(long, env = "WECHAT_USER_NAV_API")]
    api_base_url: Option<String>,

    /// Overrides `language` from the config file (en, zh-cn)
    #[arg(short, long)]
    language: Option<String>,

    /// URL opened before reading input
    #[arg(long, default_value = "/wechat-user")]
    start: String,
}

enum Command<'a> {
    Quit,
    Reload,
    Back,
    Open(&'a str),
}

fn parse_command(line: &str) -> Option<Command<'_>> {
    match line.trim() {
        "" => None,
        ":q" | ":quit" => Some(Command::Quit),
        ":r" | ":reload" => Some(Command::Reload),
        ":b" | ":back" => Some(Command::Back),
        url => Some(Command::Open(url)),
    }
}

fn load_config(args: &Args) -> anyhow::Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::load_default().context("loading default config")?,
    };
    if let Some(base) = &args.api_base_url {
        config.api_base_url.clone_from(base);
    }
    if let Some(language) = &args.language {
        if Language::from_code(language).is_none() {
            anyhow::bail!("unsupported language '{language}'");
        }
        config.language.clone_from(language);
    }
    Ok(config)
}

/// Line printed for a failed command; the notifier only logs it.
fn failure_line<T>(result: &NavResult<T>) -> Option<String> {
    result.as_ref().err().map(|e| format!("! {e}"))
}

async fn report_location(app: &AppState) {
    match app.current_url().await {
        Some(url) => println!("@ {url}"),
        None => println!("@ (nowhere)"),
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    tracing::info!(
        "API {} | language {} | login {:?}",
        config.api_base_url,
        config.language,
        config.login
    );

    let translations = Arc::new(BundledTranslations::new(config.language()));
    let input = Arc::new(ConsoleInput::stdin());

    let app = AppStateBuilder::from_config(&config)
        .translation_loader(translations.clone())
        .view_renderer(Arc::new(ConsoleViewRenderer::new(translations.clone())))
        .modal_presenter(Arc::new(PromptModalPresenter::new(
            Arc::clone(&input),
            translations,
        )))
        .build()
        .context("building app state")?;

    if let Some(line) = failure_line(&app.open_url(&args.start).await) {
        println!("{line}");
    }
    report_location(&app).await;

    while let Some(line) = input.next_line().await.context("reading stdin")? {
        let result = match parse_command(&line) {
            None => continue,
            Some(Command::Quit) => break,
            Some(Command::Reload) => app.reload().await,
            Some(Command::Back) => app.back().await,
            Some(Command::Open(url)) => app.open_url(url).await,
        };
        if let Some(line) = failure_line(&result) {
            println!("{line}");
        }
        report_location(&app).await;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout 用于视图输出，日志写到 stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
