/// Game loop driver: fixed-interval descend timer and input command queue
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::state::{Action, GameState, Phase};

/// Commands that can be sent to the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCommand {
    /// Apply a game action
    Action(Action),
    /// Stop the driver's run loop
    Stop,
}

/// Result of a single driver step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// New game state produced by a tick or a command
    State(GameState),
    /// Driver stopped
    Stop,
}

enum Event {
    Tick,
    Command(Option<DriverCommand>),
}

/// Owns the game state and serializes every transition through `step()`.
///
/// Timer ticks and commands are handled one at a time, each producing a whole new
/// snapshot. The descend timer only exists while the game is neither paused nor
/// over; it is dropped on entering those phases and re-armed, one full period
/// out, when play resumes.
pub struct GameDriver {
    config: EngineConfig,
    state: GameState,
    rng: StdRng,
    ticker: Option<Interval>,
    command_rx: flume::Receiver<DriverCommand>,
    command_tx: flume::Sender<DriverCommand>,
    stopped: bool,
}

impl GameDriver {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let state = GameState::new(&mut rng);
        let (command_tx, command_rx) = flume::unbounded();
        tracing::info!(tick_ms = config.tick_interval_ms, seed = ?config.seed, "game driver created");
        Ok(Self {
            config,
            state,
            rng,
            ticker: None,
            command_rx,
            command_tx,
            stopped: false,
        })
    }

    /// Get a sender for sending commands to this driver
    pub fn sender(&self) -> flume::Sender<DriverCommand> {
        self.command_tx.clone()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// True while the descend timer is armed
    pub fn is_timer_running(&self) -> bool {
        self.ticker.is_some()
    }

    fn should_tick(&self) -> bool {
        !self.stopped && !self.state.is_paused() && !self.state.is_game_over()
    }

    // Arm or drop the timer to match the current phase
    fn sync_timer(&mut self) {
        match (self.should_tick(), self.ticker.is_some()) {
            (true, false) => {
                let period = self.config.tick_interval();
                let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.ticker = Some(ticker);
                tracing::debug!("descend timer started");
            }
            (false, true) => {
                self.ticker = None;
                tracing::debug!("descend timer cancelled");
            }
            _ => {}
        }
    }

    /// Wait for the next timer tick or command and apply it.
    ///
    /// Returns when either:
    /// - the timer fired and the active piece descended (returns State)
    /// - a game action was applied (returns State)
    /// - a Stop command was received (returns Stop)
    pub async fn step(&mut self) -> StepResult {
        if self.stopped {
            return StepResult::Stop;
        }
        self.sync_timer();

        let event = match self.ticker.as_mut() {
            Some(ticker) => tokio::select! {
                _ = ticker.tick() => Event::Tick,
                command = self.command_rx.recv_async() => Event::Command(command.ok()),
            },
            None => Event::Command(self.command_rx.recv_async().await.ok()),
        };

        let next = match event {
            Event::Tick => self.state.descend().settle(&mut self.rng),
            Event::Command(Some(DriverCommand::Action(action))) => {
                tracing::trace!(?action, "applying action");
                self.state.apply(action, &mut self.rng)
            }
            Event::Command(Some(DriverCommand::Stop)) | Event::Command(None) => {
                tracing::info!(score = self.state.score(), "game driver stopped");
                self.stopped = true;
                self.sync_timer();
                return StepResult::Stop;
            }
        };

        let (before, after) = (self.state.phase(), next.phase());
        if before != after {
            match after {
                Phase::Paused => tracing::info!("game paused"),
                Phase::Active if before == Phase::Paused => tracing::info!("game resumed"),
                _ => tracing::debug!(?before, ?after, "phase changed"),
            }
        }

        self.state = next;
        self.sync_timer();
        StepResult::State(self.state.clone())
    }
}
