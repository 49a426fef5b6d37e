//! Discover the Hue bridge on the network and set all of its lamps to red.
//!
//! This example demonstrates:
//! - Discovery of bridges through the directory service
//! - Registration, including waiting for the link button
//! - Setting all lamps of the bridge to red, concurrently
//!
//! Run with: cargo run --example discover_and_set_red

use std::time::Duration;

use futures::future::join_all;
use hue_lights_rs::{Color, Session};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new()?;

    println!("Discovering Hue bridges...");
    let bridges = session.discover().await?;
    if bridges.is_empty() {
        println!("No bridges found on the network.");
        return Ok(());
    }

    println!("Found {} bridge(s):", bridges.len());
    for bridge in bridges {
        println!("  - ID: {}, IP: {}", bridge.id, bridge.ip_address);
    }

    println!("\nRegistering, press the link button on the bridge...");
    loop {
        match session.register("hue_lights_rs", "demo").await {
            Ok(username) => {
                println!("Registered as {username}");
                break;
            }
            Err(e) if e.is_link_button_not_pressed() => {
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let client = session.client()?;
    let lamps = session.update_lamps().await?;
    let red = Color::rgb(255, 0, 0);

    println!("\nSetting {} lamp(s) to red...", lamps.len());
    let results = join_all(
        lamps
            .iter()
            .map(|lamp| client.set_color(lamp.id(), &red, [])),
    )
    .await;

    for (lamp, result) in lamps.iter().zip(results) {
        match result {
            Ok(_) => println!("  ✓ Successfully set {} to red", lamp.name),
            Err(e) => eprintln!("  ✗ Failed to set {} to red: {}", lamp.name, e),
        }
    }

    println!("\nDone!");
    Ok(())
}
