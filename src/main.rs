//! Binary entrypoint for light-swiper.
//!
//! Runs a carousel from a YAML config with a terminal view: slide changes
//! are logged, navigation commands are read from stdin.

use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use light_swiper::Carousel;
use light_swiper::config::{Configuration, Viewport};
use light_swiper::events::{CarouselCommand, ViewUpdate};
use light_swiper::tasks;
use light_swiper::view::ViewModel;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "light-swiper", version, about = "looping image carousel")]
struct Args {
    /// Path to YAML config
    #[arg(value_name = "CONFIG")]
    config: PathBuf,
    /// Viewport width in pixels (overrides `viewport.width`)
    #[arg(long, value_name = "PX", requires = "height")]
    width: Option<u32>,
    /// Viewport height in pixels (overrides `viewport.height`)
    #[arg(long, value_name = "PX", requires = "width")]
    height: Option<u32>,
    /// Stop after this many seconds
    #[arg(long = "run-for", value_name = "SECONDS")]
    run_for: Option<u64>,
    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"))
        .add_directive(
            format!("light_swiper={level}")
                .parse()
                .context("invalid log directive")?,
        );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args {
        config,
        width,
        height,
        run_for,
        verbose,
    } = Args::parse();
    init_tracing(verbose)?;

    let cfg = Configuration::from_yaml_file(&config)
        .with_context(|| format!("failed to load configuration from {}", config.display()))?
        .validated()
        .context("invalid configuration values")?;
    tracing::info!(
        interval = %humantime::format_duration(cfg.interval),
        duration = %humantime::format_duration(cfg.duration),
        autoplay = cfg.autoplay,
        "loaded configuration from {}",
        config.display()
    );

    let host_viewport = width
        .zip(height)
        .map(|(width, height)| Viewport { width, height });
    let resolved = cfg
        .resolve(Vec::new(), host_viewport)
        .context("cannot build carousel")?;
    let view = ViewModel::new(&resolved);
    let carousel = Carousel::new(resolved);

    // Channels (small/bounded)
    let (command_tx, command_rx) = mpsc::channel::<CarouselCommand>(16); // stdin -> Manager
    let (update_tx, update_rx) = mpsc::channel::<ViewUpdate>(16); // Manager -> Viewer

    let cancel = CancellationToken::new();

    // Commands from stdin; Ctrl-D or `quit` on a terminal ends the run.
    {
        let cancel = cancel.clone();
        let interactive = io::stdin().is_terminal();
        std::thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        tracing::warn!("stdin read failed: {err}");
                        break;
                    }
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "quit" || line == "q" {
                    cancel.cancel();
                    return;
                }
                match line.parse::<CarouselCommand>() {
                    Ok(cmd) => {
                        if command_tx.blocking_send(cmd).is_err() {
                            return;
                        }
                    }
                    Err(err) => tracing::warn!("{err}"),
                }
            }
            if interactive {
                tracing::info!("stdin closed; initiating shutdown");
                cancel.cancel();
            } else {
                tracing::debug!("stdin exhausted; autoplay continues");
            }
        });
    }

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            tracing::info!("ctrl-c received; initiating shutdown");
            cancel.cancel();
        });
    }

    if let Some(seconds) = run_for {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(seconds)).await;
            tracing::info!(seconds, "run-for elapsed; initiating shutdown");
            cancel.cancel();
        });
    }

    let mut tasks = JoinSet::new();

    // Manager
    tasks.spawn({
        let cancel = cancel.clone();
        async move {
            tasks::manager::run(carousel, command_rx, update_tx, cancel)
                .await
                .map(|carousel| {
                    tracing::info!(index = carousel.state().index, "carousel stopped");
                })
                .context("manager task failed")
        }
    });

    // Viewer
    tasks.spawn({
        let cancel = cancel.clone();
        async move {
            tasks::viewer::run(view, update_rx, cancel)
                .await
                .map(|_| ())
                .context("viewer task failed")
        }
    });

    // Drain JoinSet (wait for tasks to complete)
    while let Some(res) = tasks.join_next().await {
        match res {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task error: {e:?}"),
            Err(e) => tracing::error!("join error: {e}"),
        }
    }

    Ok(())
}
