//=========================================================================
// Frame Coordinator
//
// Single background loop that owns the game between host callbacks and
// drives it at a fixed tick rate.
//
// Architecture:
// ```text
//  Host Thread (Ui)                  Coordinator Thread
//  ┌──────────────────────┐          ┌──────────────────────────────┐
//  │ initialized()        │◄─game────│ initializing.send(game)      │
//  │   device.init()      │          │                              │
//  │   game.init(tex)     │──game───►│ initialized.recv()           │
//  │                      │          │                              │
//  │                      │          │ loop select {                │
//  │ input_updated()      │──state──►│   input   → store state      │
//  │                      │          │   ticker  → game.update(ctx) │
//  │ updating()           │◄─game────│   updating.send(game)        │
//  │   device.update(draw)│──game───►│     → updated.recv()         │
//  └──────────────────────┘          │ }                            │
//                                    └──────────────────────────────┘
// ```
//
// All five channels are zero-capacity: every send waits for the matching
// receive. The game value is moved through them, so it is held by exactly
// one thread at any time and the loop body is the only place that
// mutates the `GameContext`.
//
// Shutdown: there are no timeouts. When the host side is dropped, the
// next handoff observes a disconnected channel and the loop returns.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::io;
use std::thread;
use std::time::{Duration, Instant};

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, tick, Receiver, Select, SendError, Sender};
use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::context::GameContext;
use crate::core::game::Game;
use crate::core::input::{InputState, ScreenGeometry};

/// Name of the coordinator thread.
pub const COORDINATOR_THREAD_NAME: &str = "frame-coordinator";

//=== Handoff Channels ====================================================

/// Host-side ends of the rendezvous channels.
pub struct HostHandoff<G> {
    pub(crate) initializing: Receiver<G>,
    pub(crate) initialized: Sender<G>,
    pub(crate) updating: Receiver<G>,
    pub(crate) updated: Sender<G>,
    pub(crate) input: Sender<InputState>,
}

/// Coordinator-side ends of the rendezvous channels.
pub struct LoopHandoff<G> {
    initializing: Sender<G>,
    initialized: Receiver<G>,
    updating: Sender<G>,
    updated: Receiver<G>,
    input: Receiver<InputState>,
}

/// Creates the five unbuffered channels, split by side.
pub fn handoff<G>() -> (HostHandoff<G>, LoopHandoff<G>) {
    let (initializing_tx, initializing_rx) = bounded(0);
    let (initialized_tx, initialized_rx) = bounded(0);
    let (updating_tx, updating_rx) = bounded(0);
    let (updated_tx, updated_rx) = bounded(0);
    let (input_tx, input_rx) = bounded(0);

    let host = HostHandoff {
        initializing: initializing_rx,
        initialized: initialized_tx,
        updating: updating_rx,
        updated: updated_tx,
        input: input_tx,
    };
    let looped = LoopHandoff {
        initializing: initializing_tx,
        initialized: initialized_rx,
        updating: updating_tx,
        updated: updated_rx,
        input: input_rx,
    };
    (host, looped)
}

//=== Ticker ==============================================================

/// Fixed-rate ticker firing `fps` times per second.
///
/// A tick that is not received in time is dropped rather than queued, so
/// a slow update never causes a burst of catch-up updates.
///
/// # Panics
///
/// Panics if `fps == 0`.
pub fn fps_ticker(fps: u32) -> Receiver<Instant> {
    tick(frame_period(fps))
}

/// Tick period for `fps`, in whole nanoseconds.
pub fn frame_period(fps: u32) -> Duration {
    assert!(fps > 0, "FPS must be positive, got {}", fps);
    Duration::from_nanos(1_000_000_000 / fps as u64)
}

//=== FrameCoordinator ====================================================

/// Owns the per-tick context and the coordinator ends of the handoff.
pub struct FrameCoordinator<G> {
    context: GameContext,
    handoff: LoopHandoff<G>,
}

impl<G: Game> FrameCoordinator<G> {
    //--- Construction -----------------------------------------------------

    pub fn new(geometry: &ScreenGeometry, handoff: LoopHandoff<G>) -> Self {
        Self {
            context: GameContext::new(geometry),
            handoff,
        }
    }

    //--- spawn() ----------------------------------------------------------
    //
    // Runs the coordinator on its own named thread. The join handle yields
    // the game back once the host side is gone.
    //
    pub fn spawn(self, game: G, ticker: Receiver<Instant>) -> io::Result<thread::JoinHandle<Option<G>>> {
        thread::Builder::new()
            .name(COORDINATOR_THREAD_NAME.to_string())
            .spawn(move || self.run(game, ticker))
    }

    //--- run() ------------------------------------------------------------
    //
    // Blocks the calling thread:
    //  1. Hands the game to the host for initialization and waits for it
    //  2. Services input, ticks and render requests one at a time
    //  3. Returns when any host channel disconnects
    //
    // Returns `None` only if the host went away while holding the game.
    //
    pub fn run(self, game: G, ticker: Receiver<Instant>) -> Option<G> {
        let Self { mut context, handoff } = self;

        //--- Step 1: Initialization rendezvous ----------------------------
        info!(target: "coordinator", "Waiting for host initialization");
        if let Err(SendError(game)) = handoff.initializing.send(game) {
            warn!(target: "coordinator", "Host disconnected before initialization");
            return Some(game);
        }
        let mut game = match handoff.initialized.recv() {
            Ok(game) => game,
            Err(_) => {
                warn!(target: "coordinator", "Host dropped the game during initialization");
                return None;
            }
        };
        info!(target: "coordinator", "Game initialized, entering dispatch loop");

        //--- Step 2: Dispatch loop ----------------------------------------
        let mut select = Select::new();
        let input_op = select.recv(&handoff.input);
        let tick_op = select.recv(&ticker);
        let render_op = select.send(&handoff.updating);

        let mut ticks: u64 = 0;
        loop {
            let oper = select.select();
            let index = oper.index();

            if index == input_op {
                match oper.recv(&handoff.input) {
                    Ok(state) => {
                        trace!(target: "coordinator", "Input state: {:?}", state);
                        context.set_input_state(state);
                    }
                    Err(_) => break,
                }
            } else if index == tick_op {
                match oper.recv(&ticker) {
                    Ok(_) => {
                        ticks += 1;
                        game.update(&context);
                    }
                    Err(_) => {
                        debug!(target: "coordinator", "Ticker stopped");
                        break;
                    }
                }
            } else {
                debug_assert_eq!(index, render_op);
                if let Err(SendError(returned)) = oper.send(&handoff.updating, game) {
                    game = returned;
                    break;
                }
                game = match handoff.updated.recv() {
                    Ok(game) => game,
                    Err(_) => {
                        warn!(target: "coordinator", "Host dropped the game during a render pass");
                        return None;
                    }
                };
            }
        }

        //--- Step 3: Shutdown ---------------------------------------------
        info!(target: "coordinator", "Host disconnected after {} ticks, coordinator exiting", ticks);
        Some(game)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
