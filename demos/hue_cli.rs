//! CLI application for controlling Hue lamps.
//!
//! The selected bridge and its username are kept in a small JSON file between
//! runs, so `discover` and `register` only have to be run once.
//!
//! Run with: cargo run --example hue_cli -- --help

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hue_lights_rs::{
    Alert, Brightness, BridgeInfo, Color, Effect, Parameter, Session, SessionStore, Transition,
};

#[derive(Parser)]
#[command(name = "hue-cli")]
#[command(about = "Control Hue lamps from the command line", long_about = None)]
struct Cli {
    /// File holding the selected bridge and its username
    #[arg(short, long, global = true, default_value = "hue_session.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover bridges through the directory service
    Discover,

    /// Use a bridge at a known address instead of discovering it
    Use {
        /// Bridge id
        id: String,
        /// IP address of the bridge
        ip: String,
    },

    /// Select one of the discovered bridges
    Select {
        /// Bridge id
        id: String,
    },

    /// Register with the current bridge (press the link button first)
    Register {
        #[arg(long, default_value = "hue_cli")]
        app: String,
        #[arg(long, default_value = "terminal")]
        device: String,
    },

    /// List all lamps
    Lamps,

    /// List all groups
    Groups,

    /// Turn a lamp on
    On { lamp: String },

    /// Turn a lamp off
    Off { lamp: String },

    /// Set RGB color (0-255 for each component)
    Color {
        lamp: String,
        red: u8,
        green: u8,
        blue: u8,
        /// Transition time in tenths of a second
        #[arg(short, long)]
        transition: Option<u16>,
    },

    /// Set brightness (1-254)
    Brightness {
        lamp: String,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=254))]
        level: u8,
    },

    /// Flash a lamp once
    Blink { lamp: String },

    /// Start or stop the color loop effect
    Loop {
        lamp: String,
        #[arg(long)]
        stop: bool,
    },

    /// Rename a lamp
    Rename { lamp: String, name: String },

    /// Turn every lamp of a group on or off
    Group {
        group: String,
        #[arg(long)]
        off: bool,
    },

    /// Create a group from a list of lamp ids
    CreateGroup { name: String, lamps: Vec<String> },

    /// Delete a group
    DeleteGroup { group: String },

    /// Show session diagnostics
    Diagnostics,
}

/// Slots kept as one JSON object in a file.
struct FileStore {
    path: PathBuf,
    slots: HashMap<String, String>,
}

impl FileStore {
    fn open(path: PathBuf) -> Self {
        let slots = std::fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        FileStore { path, slots }
    }
}

impl SessionStore for FileStore {
    fn load(&self, slot: &str) -> Option<String> {
        self.slots.get(slot).cloned()
    }

    fn save(&mut self, slot: &str, value: String) {
        self.slots.insert(slot.to_string(), value);
        match serde_json::to_string_pretty(&self.slots) {
            Ok(text) => {
                if let Err(e) = std::fs::write(&self.path, text) {
                    eprintln!("Could not write {}: {}", self.path.display(), e);
                }
            }
            Err(e) => eprintln!("Could not encode session: {}", e),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut store = FileStore::open(cli.state.clone());
    let mut session = Session::new()?;
    session.restore_from(&store);

    match cli.command {
        Commands::Discover => {
            println!("Discovering Hue bridges...");
            match session.discover().await {
                Ok(bridges) if bridges.is_empty() => println!("No bridges found."),
                Ok(bridges) => {
                    println!("\nFound {} bridge(s):", bridges.len());
                    for bridge in bridges {
                        println!("  ID: {:20}  IP: {}", bridge.id, bridge.ip_address);
                    }
                }
                Err(e) => eprintln!("Error during discovery: {}", e),
            }
            session.save_to(&mut store)?;
        }

        Commands::Use { id, ip } => {
            session.set_current_bridge(BridgeInfo::new(&id, &ip));
            session.save_to(&mut store)?;
            println!("Using bridge {} at {}", id, ip);
        }

        Commands::Select { id } => {
            if session.select_bridge(&id) {
                session.save_to(&mut store)?;
                println!("Selected bridge {}", id);
            } else {
                eprintln!("Unknown bridge {}. Run discover first.", id);
            }
        }

        Commands::Register { app, device } => match session.register(&app, &device).await {
            Ok(username) => {
                session.save_to(&mut store)?;
                println!("Registered as {}", username);
            }
            Err(e) if e.is_link_button_not_pressed() => {
                eprintln!("Press the link button on the bridge and run register again.")
            }
            Err(e) => eprintln!("Error: {}", e),
        },

        Commands::Lamps => {
            let lamps = session.update_lamps().await?;
            println!("{} lamp(s):", lamps.len());
            for lamp in lamps {
                let state = &lamp.state;
                println!(
                    "  {:3} {:24} {:3} bri {:3} hue {:5} sat {:3}{}",
                    lamp.id(),
                    lamp.name,
                    if state.on { "ON" } else { "OFF" },
                    state.brightness,
                    state.hue,
                    state.saturation,
                    if state.reachable { "" } else { "  (unreachable)" }
                );
            }
        }

        Commands::Groups => {
            let groups = session.update_groups().await?;
            println!("{} group(s):", groups.len());
            for group in groups {
                println!("  {:3} {}", group.id(), group.name());
            }
        }

        Commands::Diagnostics => {
            let diag = session.diagnostics().await;
            println!("\nDiagnostics:\n{}", serde_json::to_string_pretty(&diag)?);
        }

        command => {
            // Everything below needs a registered bridge
            let client = session.client()?;

            let result = match command {
                Commands::On { lamp } => client.set_lamp_state(&lamp, [Parameter::on(true)]).await,
                Commands::Off { lamp } => {
                    client.set_lamp_state(&lamp, [Parameter::on(false)]).await
                }
                Commands::Color {
                    lamp,
                    red,
                    green,
                    blue,
                    transition,
                } => {
                    let extra = transition
                        .map(|ticks| Parameter::transition(Transition::from_ticks(ticks)));
                    client
                        .set_color(&lamp, &Color::rgb(red, green, blue), extra)
                        .await
                }
                Commands::Brightness { lamp, level } => {
                    let brightness = Brightness::saturating(level);
                    client
                        .set_lamp_state(&lamp, [Parameter::brightness(brightness)])
                        .await
                }
                Commands::Blink { lamp } => {
                    client
                        .set_lamp_state(&lamp, [Parameter::alert(Alert::Select)])
                        .await
                }
                Commands::Loop { lamp, stop } => {
                    let effect = if stop { Effect::None } else { Effect::ColorLoop };
                    client
                        .set_lamp_state(&lamp, [Parameter::effect(effect)])
                        .await
                }
                Commands::Rename { lamp, name } => client.set_lamp_name(&lamp, &name).await,
                Commands::Group { group, off } => {
                    client
                        .set_group_state(&group, [Parameter::on(!off)])
                        .await
                }
                Commands::CreateGroup { name, lamps } => {
                    match client.create_group(&name, &lamps).await {
                        Ok(Some(id)) => println!("Created group {}", id),
                        Ok(None) => println!("Group created"),
                        Err(e) => eprintln!("Error: {}", e),
                    }
                    return Ok(());
                }
                Commands::DeleteGroup { group } => client.delete_group(&group).await,
                Commands::Discover
                | Commands::Use { .. }
                | Commands::Select { .. }
                | Commands::Register { .. }
                | Commands::Lamps
                | Commands::Groups
                | Commands::Diagnostics => unreachable!(),
            };

            match result {
                Ok(ack) => {
                    for (address, value) in ack.iter() {
                        println!("  {} = {}", address, value);
                    }
                }
                Err(e) => eprintln!("Error: {}", e),
            }
        }
    }

    Ok(())
}
