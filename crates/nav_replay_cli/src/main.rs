/*
 * Copyright (C) 2025 Open Source Robotics Foundation
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
*/

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use nav_format::{
    DirectionsRoute, ManeuverModifier, ReplayEvent, events_to_string_json,
    events_to_string_json_pretty,
};
use nav_replay::{ReplayConfig, ReplayRouteMapper};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Simulate driving a route, or pick the lane arrow for a turn lane.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Replay tuning file (.yaml, .yml or .json). Defaults are used for any
    /// missing setting.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify the indications of a turn lane
    Lane {
        /// Lane indications, e.g. "straight+right"
        #[arg(short, long)]
        indications: String,
        /// Modifier of the upcoming maneuver, e.g. "slight right"
        #[arg(short, long, default_value = "")]
        modifier: String,
    },
    /// Replay a precision 6 encoded polyline
    Geometry {
        polyline: String,
    },
    /// Replay a directions route stored as JSON
    Route {
        file: PathBuf,
        /// Use the distance and speed annotations of each leg instead of the
        /// route geometry
        #[arg(long)]
        annotation: bool,
    },
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    match &args.command {
        Command::Lane {
            indications,
            modifier,
        } => {
            if !modifier.is_empty() {
                if let Err(err) = modifier.parse::<ManeuverModifier>() {
                    warn!("{err}");
                }
            }
            let result = nav_turn_lane::classify(indications, modifier);
            print_json(&result, args.pretty)?;
        }
        Command::Geometry { polyline } => {
            let mut mapper = load_mapper(args.config.as_deref())?;
            let events = mapper
                .map_geometry(polyline)
                .context("Failed to replay geometry")?;
            print_events(&events, args.pretty)?;
        }
        Command::Route { file, annotation } => {
            let mut mapper = load_mapper(args.config.as_deref())?;
            let data = std::fs::read(file)
                .with_context(|| format!("Failed to read route file {}", file.display()))?;
            let route = DirectionsRoute::from_bytes_json(&data)
                .with_context(|| format!("Failed to parse route file {}", file.display()))?;
            let events = if *annotation {
                mapper.map_directions_route_leg_annotation(&route)
            } else {
                mapper.map_directions_route_geometry(&route)
            }
            .context("Failed to replay route")?;
            print_events(&events, args.pretty)?;
        }
    }

    Ok(())
}

fn init_logging() {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_default();
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn load_mapper(path: Option<&Path>) -> Result<ReplayRouteMapper> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => ReplayConfig::default(),
    };
    Ok(ReplayRouteMapper::new(config)?)
}

fn load_config(path: &Path) -> Result<ReplayConfig> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    let config = match extension {
        "yaml" | "yml" => ReplayConfig::from_bytes_yaml(&data)?,
        "json" => ReplayConfig::from_bytes_json(&data)?,
        _ => {
            return Err(anyhow!(
                "Unsupported config file extension [{extension}] of {}; use .yaml, .yml or .json",
                path.display()
            ));
        }
    };
    info!("Loaded replay config from {}", path.display());
    Ok(config)
}

fn print_events(events: &[ReplayEvent], pretty: bool) -> Result<()> {
    info!("Produced {} replay events", events.len());
    let text = if pretty {
        events_to_string_json_pretty(events)?
    } else {
        events_to_string_json(events)?
    };
    println!("{text}");
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}
