//! # hue_lights_rs
//!
//! An async Rust library for controlling Philips Hue lamps through the local
//! bridge's JSON REST interface.
//!
//! The library finds bridges through the public directory service, registers
//! an application with a bridge (the user has to press the bridge's link
//! button), lists lamps and groups and changes their state. The selected
//! bridge and its credential can be serialized and restored between runs.
//!
//! ## Quick Start
//!
//! ```ignore
//! use hue_lights_rs::{Color, MemoryStore, Session};
//!
//! async fn control_lights() -> Result<(), hue_lights_rs::Error> {
//!     let mut store = MemoryStore::new();
//!     let mut session = Session::new()?;
//!
//!     if !session.restore_from(&store) {
//!         session.discover().await?;
//!         // fails with error 101 until the link button is pressed
//!         session.register("my_app", "living room").await?;
//!         session.save_to(&mut store)?;
//!     }
//!
//!     let client = session.client()?;
//!     for lamp in session.update_lamps().await? {
//!         client.set_color(lamp.id(), &Color::rgb(255, 0, 0), []).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Discovery**: Ask the directory service for bridges with [`discover_bridges`]
//! - **Registration**: Obtain a username with [`register`] or [`Session::register`]
//! - **Lamps**: List, read, rename and delete lamps with [`BridgeClient`]
//! - **State changes**: Build requests from [`Parameter`]s such as [`Brightness`] or [`Transition`]
//! - **RGB Colors**: Convert RGB to the bridge's hue/saturation model with [`Color`]
//! - **Groups**: Create, modify and control groups of lamps
//! - **Persistence**: Keep the bridge selection in a [`SessionStore`]
//! - **Background calls**: Run an operation and handle its outcome with [`runtime::dispatch`]
//!
//! ## Errors
//!
//! Every operation returns [`Error`]. Failures coming back from the bridge are
//! either transport errors, API errors reported by the bridge (with a numeric
//! code, see [`LINK_BUTTON_NOT_PRESSED`]) or decode errors.
//!
//! ## Communication
//!
//! The bridge is reached over plain HTTP on the local network at
//! `http://<ip>/api`. This library uses `reqwest` with the tokio runtime.

mod bridge;
mod client;
mod config;
mod discovery;
mod errors;
mod group;
mod history;
pub mod json;
mod keys;
mod lamp;
mod parameter;
mod registration;
mod request;
mod response;
pub mod runtime;
mod session;
mod types;

// Re-export public API
pub use bridge::BridgeInfo;
pub use client::BridgeClient;
pub use config::ClientConfig;
pub use discovery::discover_bridges;
pub use errors::{Error, LINK_BUTTON_NOT_PRESSED};
pub use group::Group;
pub use history::{HistoryEntry, HistorySummary, MessageHistory, MessageType};
pub use lamp::{Lamp, LampState};
pub use parameter::{Parameter, ParameterSet, ParameterValue};
pub use registration::register;
pub use response::Ack;
pub use session::{MemoryStore, Session, SessionState, SessionStore};
pub use types::{Alert, Brightness, Color, ColorMode, Effect, HueSaturation, Transition};
