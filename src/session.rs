//! Host-driven session: game state plus the two repeating tick tasks
//!
//! The host feeds elapsed wall-clock time into [`Session::pump`]; due spawn
//! and update ticks fire in chronological order. Both tasks are cancelled the
//! moment the game ends and restarted only by a reset.

use crate::config::{ConfigError, GameConfig};
use crate::consts::MAX_CATCH_UP_MS;
use crate::sim::{self, Command, GameEvent, GameState, Snapshot};

/// Which periodic task fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Spawn,
    Update,
}

/// A cancellable fixed-interval task on the session clock
#[derive(Debug, Clone)]
pub struct RepeatingTask {
    interval_ms: u64,
    next_due_ms: u64,
    active: bool,
}

impl RepeatingTask {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            next_due_ms: 0,
            active: false,
        }
    }

    /// Arm the task; the first fire is one interval after `now_ms`
    pub fn start(&mut self, now_ms: u64) {
        self.next_due_ms = now_ms.saturating_add(self.interval_ms);
        self.active = true;
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Time of the next fire, if armed
    pub fn due_at(&self) -> Option<u64> {
        self.active.then_some(self.next_due_ms)
    }

    fn reschedule(&mut self) {
        self.next_due_ms = self.next_due_ms.saturating_add(self.interval_ms);
    }
}

/// Owns the spawn and update tasks and the millisecond clock they run on
#[derive(Debug, Clone)]
pub struct Scheduler {
    now_ms: u64,
    spawn: RepeatingTask,
    update: RepeatingTask,
}

impl Scheduler {
    pub fn new(spawn_interval_ms: u64, update_interval_ms: u64) -> Self {
        Self {
            now_ms: 0,
            spawn: RepeatingTask::new(spawn_interval_ms),
            update: RepeatingTask::new(update_interval_ms),
        }
    }

    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Arm both tasks from the current clock
    pub fn start(&mut self) {
        self.spawn.start(self.now_ms);
        self.update.start(self.now_ms);
    }

    pub fn cancel_all(&mut self) {
        self.spawn.cancel();
        self.update.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.spawn.is_active() || self.update.is_active()
    }

    pub fn task(&self, kind: TaskKind) -> &RepeatingTask {
        match kind {
            TaskKind::Spawn => &self.spawn,
            TaskKind::Update => &self.update,
        }
    }

    /// Earliest task due at or before `until_ms` (spawn wins ties)
    pub fn next_due(&self, until_ms: u64) -> Option<(TaskKind, u64)> {
        let spawn = self
            .spawn
            .due_at()
            .filter(|&t| t <= until_ms)
            .map(|t| (TaskKind::Spawn, t));
        let update = self
            .update
            .due_at()
            .filter(|&t| t <= until_ms)
            .map(|t| (TaskKind::Update, t));

        match (spawn, update) {
            (Some(s), Some(u)) => Some(if u.1 < s.1 { u } else { s }),
            (s, u) => s.or(u),
        }
    }

    /// Move the clock to the task's due time and schedule its next fire
    fn fire(&mut self, kind: TaskKind, at_ms: u64) {
        self.now_ms = at_ms;
        match kind {
            TaskKind::Spawn => self.spawn.reschedule(),
            TaskKind::Update => self.update.reschedule(),
        }
    }

    fn advance_clock(&mut self, to_ms: u64) {
        self.now_ms = self.now_ms.max(to_ms);
    }
}

/// What a single [`Session::pump`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpReport {
    pub spawned: u32,
    pub advanced: u32,
    pub game_over: bool,
}

/// A running game: simulation state driven by its own scheduler
///
/// Spawns, despawns, collisions and resets queue [`GameEvent`]s. Hosts that
/// react to them call [`Session::drain_events`] once per frame; hosts that
/// only read [`Session::snapshot`] may ignore them, since the queue keeps at
/// most `MAX_QUEUED_EVENTS` and drops the oldest beyond that.
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    scheduler: Scheduler,
    disposed: bool,
}

impl Session {
    /// Create a session in `Playing` with both tasks armed
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let scheduler = Scheduler::new(config.spawn_interval_ms, config.update_interval_ms);
        let state = GameState::new(config, seed)?;
        let mut session = Self {
            state,
            scheduler,
            disposed: false,
        };
        session.scheduler.start();
        log::info!("Session started with seed: {}", seed);
        Ok(session)
    }

    /// Feed elapsed host time, firing every tick that falls due
    pub fn pump(&mut self, elapsed_ms: u64) -> PumpReport {
        let mut report = PumpReport::default();
        if self.disposed {
            return report;
        }

        let elapsed_ms = if elapsed_ms > MAX_CATCH_UP_MS {
            log::warn!(
                "Clamping {} ms of elapsed time to {} ms",
                elapsed_ms,
                MAX_CATCH_UP_MS
            );
            MAX_CATCH_UP_MS
        } else {
            elapsed_ms
        };
        let until_ms = self.scheduler.now_ms().saturating_add(elapsed_ms);

        while let Some((kind, due_ms)) = self.scheduler.next_due(until_ms) {
            self.scheduler.fire(kind, due_ms);
            match kind {
                TaskKind::Spawn => {
                    if sim::spawn_obstacle(&mut self.state).is_some() {
                        report.spawned += 1;
                    }
                }
                TaskKind::Update => {
                    sim::advance(&mut self.state);
                    report.advanced += 1;
                }
            }

            if self.state.is_game_over() {
                self.stop_ticking();
                break;
            }
        }
        self.scheduler.advance_clock(until_ms);

        report.game_over = self.state.is_game_over();
        report
    }

    /// Apply player input
    pub fn handle(&mut self, command: Command) {
        if self.disposed {
            return;
        }

        let was_over = self.state.is_game_over();
        sim::apply(&mut self.state, command);

        match (was_over, self.state.is_game_over()) {
            (false, true) => self.stop_ticking(),
            (true, false) => {
                self.scheduler.start();
                log::info!("Tick tasks restarted at {} ms", self.scheduler.now_ms());
            }
            _ => {}
        }
    }

    pub fn move_left(&mut self) {
        self.handle(Command::MoveLeft);
    }

    pub fn move_right(&mut self) {
        self.handle(Command::MoveRight);
    }

    pub fn reset(&mut self) {
        self.handle(Command::Reset);
    }

    /// Tear down: cancel both tasks and ignore all further pumps and input
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.scheduler.cancel_all();
        self.disposed = true;
        log::info!("Session disposed after {} ticks", self.state.time_ticks);
    }

    fn stop_ticking(&mut self) {
        self.scheduler.cancel_all();
        log::debug!("Tick tasks cancelled at {} ms", self.scheduler.now_ms());
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
