pub mod cli;
pub mod commands;
pub mod config;
pub mod render;

use std::ffi::OsString;

use anyhow::{Context, bail};
use clap::Parser;
use taskboard_core::{HttpTaskApi, TaskBoard};
use tracing::{debug, info};

#[tracing::instrument(skip_all)]
pub async fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = cli::GlobalCli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        "starting taskboard CLI"
    );

    let backend = config::resolve_backend(cli.backend_url.as_deref(), cli.config.as_deref())
        .context("failed to resolve backend url")?;
    debug!(base_url = %backend.base_url(), "resolved backend");

    let mut board = TaskBoard::new(HttpTaskApi::new(&backend));

    if !board.refetch().await {
        bail!("could not load tasks from {}", backend.base_url());
    }

    let renderer = render::Renderer::new();
    commands::dispatch(&mut board, &renderer, cli.command).await
}
