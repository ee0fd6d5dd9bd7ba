//! State shared between the simulation thread and its readers.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use multilat_core::state::SimSnapshot;
use multilat_core::NoiseModel;
use multilat_sim::SimulationEngine;

use crate::error::{AppError, AppResult};

/// Latest published snapshot. `None` until the first tick completes.
pub type SharedSnapshot = Arc<Mutex<Option<SimSnapshot>>>;

/// Commands sent to the simulation thread, applied between ticks.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopCommand {
    AddRandomSensor {
        detection_radius: f64,
        noise: NoiseModel,
    },
    AddRandomTarget,
    /// Stop after the current tick and hand the engine back.
    Shutdown,
}

/// Handle to a running simulation thread.
///
/// Dropping the handle closes the command channel, which also stops the loop.
pub struct SimHandle {
    pub(crate) command_tx: mpsc::Sender<LoopCommand>,
    pub(crate) latest_snapshot: SharedSnapshot,
    pub(crate) thread: JoinHandle<SimulationEngine>,
}

impl SimHandle {
    pub fn send(&self, command: LoopCommand) -> AppResult<()> {
        self.command_tx
            .send(command)
            .map_err(|_| AppError::Thread("simulation loop has stopped".into()))
    }

    /// Clone of the most recently published snapshot.
    pub fn latest(&self) -> Option<SimSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }

    pub fn shared_snapshot(&self) -> SharedSnapshot {
        Arc::clone(&self.latest_snapshot)
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Ask the loop to stop and wait for it, returning the engine.
    pub fn shutdown(self) -> AppResult<SimulationEngine> {
        // The loop may already have exited; joining still returns the engine.
        let _ = self.command_tx.send(LoopCommand::Shutdown);
        self.join()
    }

    /// Wait for the loop to exit on its own.
    pub fn join(self) -> AppResult<SimulationEngine> {
        self.thread
            .join()
            .map_err(|_| AppError::Thread("simulation thread panicked".into()))
    }
}
