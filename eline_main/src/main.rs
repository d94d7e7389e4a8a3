// E-Line: Provisioning Point-to-Point Circuits in Software-Defined Networks
// Copyright (C) 2021  The E-Line Authors
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use eline::settings::Settings;
use eline::CircuitManager;

use clap::{Parser, Subcommand};
use log::*;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::net::TcpListener;

mod api;
mod test;

fn main() -> Result<(), Box<dyn Error>> {
    // initialize the env logger
    pretty_env_logger::init();

    // run clap
    let args = CommandLineArguments::parse();
    let settings = args.settings()?;
    let manager = Arc::new(CircuitManager::from_settings(&settings)?);

    // match on the action
    match args.cmd {
        MainCommand::Serve { listen, reconcile_interval } => {
            if let Some(secs) = reconcile_interval.filter(|s| *s > 0) {
                spawn_reconciler(manager.clone(), Duration::from_secs(secs))?;
            }
            let listen = listen.unwrap_or(settings.listen);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(serve(manager, listen))?;
        }
        MainCommand::Reconcile => {
            let report = manager.reconcile()?;
            println!(
                "activated: {}, removed: {}, failed: {}",
                report.activated.len(),
                report.removed.len(),
                report.failed.len()
            );
            for (id, reason) in report.failed.iter() {
                println!("    {}: {}", id, reason);
            }
        }
        MainCommand::List => {
            for circuit in manager.list()? {
                println!("{}", circuit);
            }
        }
    }

    Ok(())
}

async fn serve(manager: Arc<CircuitManager>, listen: String) -> std::io::Result<()> {
    let listener = TcpListener::bind(listen.as_str()).await?;
    info!("HTTP API listening on {}", listener.local_addr()?);
    axum::serve(listener, api::router(manager)).await
}

/// Run a reconciliation pass every `interval` on a separate thread.
fn spawn_reconciler(manager: Arc<CircuitManager>, interval: Duration) -> std::io::Result<()> {
    info!("Reconciling every {} seconds", interval.as_secs());
    thread::Builder::new().name("reconciler".into()).spawn(move || loop {
        thread::sleep(interval);
        match manager.reconcile() {
            Ok(report) if !report.failed.is_empty() => {
                warn!("{} circuits could not be reconciled", report.failed.len())
            }
            Ok(_) => {}
            Err(e) => error!("Reconciliation failed: {}", e),
        }
    })?;
    Ok(())
}

/// Provisioning of point-to-point circuits (E-Lines) on an SDN controller. The settings are read
/// from the JSON file given with `--config`, and can be overwritten with the options below.
#[derive(Parser, Debug)]
#[clap(name = "E-Line (Binary)", author = "The E-Line Authors", version)]
struct CommandLineArguments {
    /// JSON file containing the settings
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,
    /// Base URL of the pathfinder
    #[clap(long)]
    pathfinder_url: Option<String>,
    /// Base URL of the flow manager
    #[clap(long)]
    flow_manager_url: Option<String>,
    /// Directory in which the circuits are stored
    #[clap(short = 'd', long)]
    circuits_path: Option<PathBuf>,
    /// Capacity of links without explicit capacity, in bits per second
    #[clap(long)]
    capacity_ceiling: Option<u64>,
    /// Timeout of every request to the controller, in milliseconds
    #[clap(long)]
    request_timeout_ms: Option<u64>,
    /// Action to perform
    #[clap(subcommand)]
    cmd: MainCommand,
}

impl CommandLineArguments {
    /// Settings from the config file (or the defaults), with the command line options applied
    fn settings(&self) -> Result<Settings, Box<dyn Error>> {
        let mut settings = match self.config.as_ref() {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        if let Some(url) = self.pathfinder_url.as_ref() {
            settings.pathfinder_url = url.clone();
        }
        if let Some(url) = self.flow_manager_url.as_ref() {
            settings.flow_manager_url = url.clone();
        }
        if let Some(path) = self.circuits_path.as_ref() {
            settings.circuits_path = path.clone();
        }
        if let Some(ceiling) = self.capacity_ceiling {
            settings.capacity_ceiling = ceiling;
        }
        if let Some(timeout) = self.request_timeout_ms {
            settings.request_timeout_ms = timeout;
        }
        Ok(settings)
    }
}

#[derive(Subcommand, Debug)]
enum MainCommand {
    /// Serve the HTTP API
    #[clap(name = "serve")]
    Serve {
        /// Address to listen on, like `127.0.0.1:8080`
        #[clap(short = 'l', long)]
        listen: Option<String>,
        /// Seconds between two reconciliation passes. No reconciliation happens if not given.
        #[clap(short = 'r', long)]
        reconcile_interval: Option<u64>,
    },
    /// Retry all pending flow installations and removals once
    #[clap(name = "reconcile")]
    Reconcile,
    /// Print all stored circuits
    #[clap(name = "list")]
    List,
}
