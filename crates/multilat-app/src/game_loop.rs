//! Simulation loop thread: steps the engine at its tick cadence and publishes
//! snapshots.
//!
//! The engine moves into the thread and is the only writer. Readers see whole
//! snapshots through `SharedSnapshot`, each built inside a single tick.
//! Commands arrive over an `mpsc` channel and are applied between ticks.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use multilat_core::state::SimSnapshot;
use multilat_sim::SimulationEngine;

use crate::error::{AppError, AppResult};
use crate::state::{LoopCommand, SharedSnapshot, SimHandle};

/// Loop parameters that are not part of the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSettings {
    /// Emit a state report every this many ticks.
    pub report_every_ticks: u64,
    /// Stop on its own after this many ticks.
    pub max_ticks: Option<u64>,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            report_every_ticks: 30,
            max_ticks: None,
        }
    }
}

/// Spawn the simulation loop on its own thread.
pub fn spawn_sim_loop(engine: SimulationEngine, settings: LoopSettings) -> AppResult<SimHandle> {
    let (command_tx, command_rx) = mpsc::channel::<LoopCommand>();
    let latest_snapshot: SharedSnapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("multilat-sim-loop".into())
        .spawn(move || run_sim_loop(engine, command_rx, &shared, settings))
        .map_err(|e| AppError::Thread(format!("failed to spawn simulation thread: {e}")))?;

    Ok(SimHandle {
        command_tx,
        latest_snapshot,
        thread,
    })
}

/// The loop. Runs until `Shutdown`, channel disconnect or `max_ticks`.
fn run_sim_loop(
    mut engine: SimulationEngine,
    command_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<SimSnapshot>>,
    settings: LoopSettings,
) -> SimulationEngine {
    let tick_duration = Duration::from_secs_f64(engine.tick_duration());
    let mut next_tick_time = Instant::now();
    tracing::info!(
        sensors = engine.sensor_count(),
        targets = engine.target_count(),
        tick_ms = tick_duration.as_secs_f64() * 1000.0,
        "simulation loop started"
    );

    loop {
        // 1. Drain pending commands
        loop {
            match command_rx.try_recv() {
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::info!(tick = engine.time().tick, "simulation loop stopped");
                    return engine;
                }
                Ok(command) => apply_command(&mut engine, command),
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick();
        let tick = snapshot.time.tick;
        if tick % settings.report_every_ticks.max(1) == 0 {
            report_state(&snapshot);
        }

        // 3. Publish
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if settings.max_ticks.is_some_and(|max| tick >= max) {
            tracing::info!(tick, "run duration reached");
            return engine;
        }

        // 4. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind: reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

fn apply_command(engine: &mut SimulationEngine, command: LoopCommand) {
    let result = match command {
        LoopCommand::AddRandomSensor {
            detection_radius,
            noise,
        } => engine.add_random_sensor(detection_radius, noise),
        LoopCommand::AddRandomTarget => engine.add_random_target(),
        LoopCommand::Shutdown => return,
    };
    if let Err(e) = result {
        tracing::warn!(error = %e, "command rejected");
    }
}

/// Log the whole simulation state.
pub fn report_state(snapshot: &SimSnapshot) {
    tracing::info!(
        elapsed_secs = snapshot.time.elapsed_secs,
        sensors = snapshot.sensors.len(),
        targets = snapshot.targets.len(),
        localized = snapshot.localized_count(),
        mean_error = snapshot.mean_localization_error().unwrap_or(-1.0),
        "state report"
    );
    for sensor in &snapshot.sensors {
        tracing::debug!(
            sensor_id = %sensor.id,
            position = %sensor.position,
            radius = sensor.detection_radius,
            noise = sensor.noise.label(),
            "sensor"
        );
    }
    for target in &snapshot.targets {
        match &target.fix.estimate.position {
            Some(estimate) => tracing::info!(
                target_id = %target.id,
                position = %target.position,
                estimate = %estimate,
                error = target.fix.localization_error,
                residual = target.fix.estimate.residual_error,
                low_confidence = target.fix.estimate.is_low_confidence(),
                "target"
            ),
            None => tracing::info!(
                target_id = %target.id,
                position = %target.position,
                "target (no estimate)"
            ),
        }
    }
}
