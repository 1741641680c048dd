use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::info;

use parking_guidance::{logging, GuidanceMode, GuidanceSimulator, GuidanceView, SimulatorConfig};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(SimulatorConfig::default_path);
    let config = SimulatorConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    if let Some(destination) = &config.destination {
        info!(
            "Guiding to spot {} ({}, {}) at {}",
            destination.spot, destination.section, destination.floor, destination.parking_name
        );
    }

    let simulator = GuidanceSimulator::new(config)?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    simulator.on_state_change(move |state| {
        let _ = tx.send(*state);
    });

    simulator.start()?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            update = rx.recv() => {
                let Some(state) = update else { break };
                let view = GuidanceView::new(&state, simulator.config());
                println!("{}", serde_json::to_string(&view.state)?);
                info!("{} | {} | {}%", view.step_label, view.instruction, view.progress_percent);
                if state.mode == GuidanceMode::Arrived {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                info!("Interrupted, stopping guidance");
                simulator.stop();
                break;
            }
        }
    }

    Ok(())
}
