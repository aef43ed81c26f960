//! Player intents and the buffer that carries them.
//!
//! Input sources run on their own thread (a key reader, a script). Turns are
//! queued per player in arrival order and the engine replays the queue
//! through its own validation at the start of a tick, so a rejected turn
//! never displaces an earlier accepted one. Hazard, pause and restart
//! requests are plain atomic flags.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::game::{Direction, PlayerId};

/// A discrete request from an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "kebab-case")]
pub enum Intent {
    /// Turn a snake.
    Steer {
        /// Player being steered.
        player: PlayerId,
        /// Requested heading.
        direction: Direction,
    },
    /// Drop a hazard behind a snake.
    DropHazard {
        /// Player dropping.
        player: PlayerId,
    },
    /// Pause a running game or resume a paused one.
    TogglePause,
    /// Start a new game.
    Restart,
}

/// An intent scheduled for a given tick of a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedIntent {
    /// Tick before which the intent is delivered (1 = before the first tick).
    pub tick: u64,
    /// The intent itself.
    #[serde(flatten)]
    pub intent: Intent,
}

/// Turns kept per player between two ticks; the oldest is dropped beyond it.
pub const MAX_QUEUED_TURNS: usize = 16;

/// Per-player turn queues plus game control flags.
#[derive(Debug, Default)]
pub struct InputBuffer {
    directions: [Mutex<VecDeque<Direction>>; 2],
    hazards: [AtomicBool; 2],
    pause: AtomicBool,
    restart: AtomicBool,
}

fn slot(player: PlayerId) -> Option<usize> {
    match player {
        1 => Some(0),
        2 => Some(1),
        _ => None,
    }
}

impl InputBuffer {
    /// An empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an intent. Unknown players are ignored.
    pub fn push(&self, intent: Intent) {
        match intent {
            Intent::Steer { player, direction } => self.push_direction(player, direction),
            Intent::DropHazard { player } => self.push_hazard(player),
            Intent::TogglePause => self.request_pause_toggle(),
            Intent::Restart => self.request_restart(),
        }
    }

    fn queue(&self, index: usize) -> MutexGuard<'_, VecDeque<Direction>> {
        // A queue of plain values stays usable after a panicking writer
        self.directions[index]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a turn for a player.
    pub fn push_direction(&self, player: PlayerId, direction: Direction) {
        if let Some(i) = slot(player) {
            let mut queue = self.queue(i);
            if queue.len() == MAX_QUEUED_TURNS {
                queue.pop_front();
            }
            queue.push_back(direction);
        }
    }

    /// Flag a hazard drop for a player.
    pub fn push_hazard(&self, player: PlayerId) {
        if let Some(i) = slot(player) {
            self.hazards[i].store(true, Ordering::Release);
        }
    }

    /// Flag a pause toggle. Two toggles between reads cancel out.
    pub fn request_pause_toggle(&self) {
        self.pause.fetch_xor(true, Ordering::AcqRel);
    }

    /// Flag a restart.
    pub fn request_restart(&self) {
        self.restart.store(true, Ordering::Release);
    }

    /// Take a player's queued turns, oldest first.
    pub fn take_directions(&self, player: PlayerId) -> Vec<Direction> {
        slot(player).map_or_else(Vec::new, |i| self.queue(i).drain(..).collect())
    }

    /// Take a player's hazard flag.
    pub fn take_hazard(&self, player: PlayerId) -> bool {
        slot(player).is_some_and(|i| self.hazards[i].swap(false, Ordering::AcqRel))
    }

    /// Take the pause toggle flag.
    pub fn take_pause_toggle(&self) -> bool {
        self.pause.swap(false, Ordering::AcqRel)
    }

    /// Take the restart flag.
    pub fn take_restart(&self) -> bool {
        self.restart.swap(false, Ordering::AcqRel)
    }
}
