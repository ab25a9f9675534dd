//! Game loop thread: runs the simulation engine and emits snapshots.
//!
//! The engine is created inside this thread and never leaves it. Commands
//! arrive via an `mpsc` channel and are drained at each tick boundary.
//! Snapshots go back over a second channel.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, error};

use skyrunner_core::constants::TICK_RATE;
use skyrunner_core::state::GameStateSnapshot;
use skyrunner_sim::engine::{SimConfig, SimulationEngine};
use skyrunner_sim::SimError;

use crate::state::{GameLoopCommand, Pacing};

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Driver-side ends of a running game loop.
pub struct GameLoopHandle {
    pub commands: mpsc::Sender<GameLoopCommand>,
    pub snapshots: mpsc::Receiver<GameStateSnapshot>,
    thread: JoinHandle<Result<u64, SimError>>,
}

impl GameLoopHandle {
    /// Send a command. Returns false once the loop has stopped.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Wait for the thread to finish. Yields the number of ticks it ran,
    /// or the error that stopped it.
    pub fn join(self) -> std::thread::Result<Result<u64, SimError>> {
        drop(self.commands);
        self.thread.join()
    }
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(config: SimConfig, pacing: Pacing) -> std::io::Result<GameLoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let (snap_tx, snap_rx) = mpsc::channel::<GameStateSnapshot>();

    let thread = std::thread::Builder::new()
        .name("skyrunner-game-loop".into())
        .spawn(move || {
            let engine = SimulationEngine::new(config);
            run_game_loop(engine, &cmd_rx, &snap_tx, pacing)
        })?;

    Ok(GameLoopHandle {
        commands: cmd_tx,
        snapshots: snap_rx,
        thread,
    })
}

#[derive(Debug, PartialEq, Eq)]
enum Next {
    Tick,
    Stop,
}

/// Queue every pending input without blocking.
fn drain_pending(engine: &mut SimulationEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> Next {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::Input(event)) => engine.queue_input(event),
            Ok(GameLoopCommand::Advance) => {}
            Ok(GameLoopCommand::Shutdown) => return Next::Stop,
            Err(mpsc::TryRecvError::Empty) => return Next::Tick,
            Err(mpsc::TryRecvError::Disconnected) => return Next::Stop,
        }
    }
}

/// Queue inputs until the driver asks for a tick.
fn wait_for_advance(engine: &mut SimulationEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> Next {
    loop {
        match cmd_rx.recv() {
            Ok(GameLoopCommand::Input(event)) => engine.queue_input(event),
            Ok(GameLoopCommand::Advance) => return Next::Tick,
            Ok(GameLoopCommand::Shutdown) | Err(mpsc::RecvError) => return Next::Stop,
        }
    }
}

/// The game loop. Runs until Shutdown, channel disconnect, or a
/// simulation error. Returns the number of ticks run.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    snap_tx: &mpsc::Sender<GameStateSnapshot>,
    pacing: Pacing,
) -> Result<u64, SimError> {
    let mut next_tick_time = Instant::now();
    let mut ticks = 0;

    loop {
        // 1. Collect input up to this tick boundary
        let next = match pacing {
            Pacing::Realtime => drain_pending(&mut engine, cmd_rx),
            Pacing::Unpaced => wait_for_advance(&mut engine, cmd_rx),
        };
        if let Next::Stop = next {
            debug!(ticks, "game loop stopping");
            return Ok(ticks);
        }

        // 2. Advance one tick
        let snapshot = match engine.tick() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(error = %e, tick = engine.time().tick, "simulation failed");
                return Err(e);
            }
        };
        ticks += 1;

        // 3. Hand the snapshot to the driver
        if snap_tx.send(snapshot).is_err() {
            debug!(ticks, "snapshot receiver gone");
            return Ok(ticks);
        }

        // 4. Sleep until next tick
        if pacing == Pacing::Realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind, reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }
}
