use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    Banner, DirectoryProvider, HttpDirectoryClient, HttpProfileClient, Navigator,
};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use backend_bridge::{commands::BackendCommand, runtime::Backend};
use config::{load_settings, read_token, Settings};
use controller::events::UiEvent;
use ui::{app::spawn_input_reader, render::render_view, DirectoryApp};

#[derive(Parser, Debug)]
#[command(name = "alumni-directory")]
#[command(about = "Browse colleges, their branches and alumni profiles", long_about = None)]
struct Cli {
    /// Settings file; missing is fine.
    #[arg(long, default_value = "directory.toml")]
    config: PathBuf,
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    profile_url: Option<String>,
    #[arg(long)]
    asset_url: Option<String>,
    /// Session token; overrides the token file.
    #[arg(long)]
    token: Option<String>,
    #[arg(long)]
    token_file: Option<PathBuf>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive drill-down (default)
    Browse,
    /// Print one level and exit
    List {
        #[arg(long)]
        college: Option<String>,
        #[arg(long, requires = "college")]
        branch: Option<String>,
        #[arg(long)]
        filter: Option<String>,
    },
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = load_settings(&self.config)?;
        if let Some(v) = &self.api_url {
            settings.directory_api_url = v.clone();
        }
        if let Some(v) = &self.profile_url {
            settings.profile_api_url = v.clone();
        }
        if let Some(v) = &self.asset_url {
            settings.profile_asset_url = v.clone();
        }
        if let Some(v) = &self.token_file {
            settings.token_file = Some(v.clone());
        }
        if let Some(v) = self.timeout_secs {
            settings.request_timeout_secs = Some(v);
        }
        settings.validated()
    }
}

fn http_client(settings: &Settings) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = settings.request_timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().context("failed to build http client")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = cli.settings()?;
    let http = http_client(&settings)?;
    let directory: Arc<dyn DirectoryProvider> = Arc::new(
        HttpDirectoryClient::with_http_client(http.clone(), &settings.directory_api_url)
            .context("invalid directory api url")?,
    );

    match cli.command {
        Some(Command::List {
            college,
            branch,
            filter,
        }) => run_list(directory, college, branch, filter),
        Some(Command::Browse) | None => {
            let token = cli
                .token
                .clone()
                .or_else(|| settings.token_file.as_deref().and_then(read_token));
            let profiles = HttpProfileClient::with_http_client(http, &settings.profile_api_url)
                .context("invalid profile api url")?;
            let backend = Backend {
                directory,
                profiles: Arc::new(profiles),
                asset_base: settings.profile_asset_url.clone(),
            };
            run_browse(backend, token)
        }
    }
}

fn run_browse(backend: Backend, token: Option<String>) -> Result<()> {
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(backend, cmd_rx, ui_tx.clone());
    spawn_input_reader(ui_tx);

    let mut app = DirectoryApp::new(cmd_tx);
    app.start(token);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    app.run(ui_rx, &mut out).context("terminal output failed")
}

fn run_list(
    directory: Arc<dyn DirectoryProvider>,
    college: Option<String>,
    branch: Option<String>,
    filter: Option<String>,
) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build runtime")?;

    runtime.block_on(async move {
        let mut navigator = Navigator::new(directory);
        match (college.as_deref(), branch.as_deref()) {
            (None, _) => navigator.open_colleges().await,
            (Some(college), None) => navigator.select_college(college).await,
            (Some(college), Some(branch)) => {
                navigator.select_college(college).await;
                navigator.select_branch(branch).await?;
            }
        }
        if let Some(filter) = filter.as_deref() {
            navigator.set_filter(filter);
        }

        let view = navigator.view();
        print!("{}", render_view(&view, navigator.controller().filter()));
        if let Some(Banner::Error(message)) = &view.banner {
            bail!("{message}");
        }
        Ok(())
    })
}
