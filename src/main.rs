//! route-lanes: follow a location stream and print route events.
//!
//! # Architecture Overview
//!
//! ```text
//!   stdin paths ──▶ Navigator ──▶ service loop ──▶ ReadinessGate
//!                                                        │
//!                                                        ▼
//!                                  TableResolver ◀── LocationWatcher
//!                                        │
//!                                        ▼
//!   stdout JSON ◀── EventBus ◀── RouteSynchronizer
//!                      │                 ▲
//!                      └── ack (route) ──┘
//!
//!   config file ──▶ ConfigWatcher ──▶ service loop ──▶ RouteTable reload
//! ```
//!
//! Each line read from stdin is a location path (prefix excluded) and is
//! resolved on its own. Every emitted event is printed as one JSON line.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use route_lanes::config::ConfigWatcher;
use route_lanes::lifecycle::signals::shutdown_on_ctrl_c;
use route_lanes::lifecycle::startup::{self, Overrides};
use route_lanes::lanes::service;
use route_lanes::{Audience, Route, RouteEvent, Shutdown, TopicFilter};

#[derive(Parser)]
#[command(name = "route-lanes")]
#[command(
    about = "Resolve location paths against a route table and print route events",
    long_about = None
)]
struct Cli {
    /// Route table and options (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Location token prefix (overrides the config file).
    #[arg(long)]
    prefix: Option<String>,

    /// Location resolved at startup (overrides the config file).
    #[arg(long)]
    initial: Option<String>,

    /// Log route resolution and emitted events.
    #[arg(short, long)]
    debug: bool,

    /// Reload the route table when the config file changes.
    #[arg(short, long)]
    watch: bool,
}

#[derive(Serialize)]
struct EventLine<'a> {
    topic: String,
    route: Option<&'a Route>,
}

fn print_event(event: &RouteEvent) {
    let line = EventLine {
        topic: event.topic().to_string(),
        route: event.payload(),
    };
    match serde_json::to_string(&line) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!(error = %e, "Failed to encode event"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = Overrides {
        prefix: cli.prefix,
        initial: cli.initial,
        debug: cli.debug,
    };
    let config = startup::resolve_config(cli.config.as_deref(), &overrides)?;
    let mut lanes = startup::start(&config)?;

    lanes.subscribe(TopicFilter::All, Audience::Root, print_event);

    // Keep the file watcher alive for the whole run.
    let (_config_watcher, config_updates) = match (&cli.config, cli.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let shutdown = Arc::new(Shutdown::new());
    tokio::spawn(shutdown_on_ctrl_c(shutdown.clone()));

    let (navigator, requests) = service::request_channel();
    let stdin_shutdown = shutdown.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if !navigator.navigate(line.trim()) {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
        stdin_shutdown.trigger();
    });

    service::run(lanes, requests, config_updates, shutdown.subscribe()).await;

    tracing::info!("Shutdown complete");
    Ok(())
}
