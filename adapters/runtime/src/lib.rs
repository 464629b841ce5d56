#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Single-threaded runtime that drives a High Striker session.
//!
//! [`Minigame`] owns the authoritative session and the pure systems that react
//! to it. Every inbound call becomes a [`Command`], which is applied and then
//! pumped through the systems until no further commands are produced. The
//! resulting events are forwarded, in order, to the bound
//! [`PresentationAdapter`] and to registered [`GameListener`]s.

mod listeners;
mod presentation;
mod summary;

use std::{collections::VecDeque, fmt, time::Duration};

use high_striker_core::{ChargeSnapshot, Command, Event, MinigameConfig, Phase, ResolutionStep};
use high_striker_session::{self as session, query, Session};
use high_striker_system_difficulty::{Difficulty, DifficultyState};
use high_striker_system_outcome::{OutcomeDispatcher, Thresholds};
use high_striker_system_resolution::{Resolution, ResolutionFrame};
use tracing::{debug, warn};

pub use high_striker_session::SessionError;
pub use listeners::{GameListener, SubscriptionId};
pub use presentation::PresentationAdapter;
pub use summary::{AttemptRecord, SessionSummary};

/// Charge-release minigame with its systems, presentation and listeners.
pub struct Minigame {
    session: Session,
    difficulty: Difficulty,
    outcome: OutcomeDispatcher,
    resolution: Resolution,
    presentation: Option<Box<dyn PresentationAdapter>>,
    listeners: listeners::ListenerRegistry,
    summary: SessionSummary,
    missing_presentation_reported: bool,
}

impl Minigame {
    /// Creates an idle minigame using the provided configuration.
    #[must_use]
    pub fn new(config: MinigameConfig) -> Self {
        Self {
            difficulty: Difficulty::from_config(&config),
            resolution: Resolution::new(config.resolution),
            outcome: OutcomeDispatcher::new(Thresholds::from_config(&config)),
            session: Session::new(config),
            presentation: None,
            listeners: listeners::ListenerRegistry::default(),
            summary: SessionSummary::default(),
            missing_presentation_reported: false,
        }
    }

    /// Binds the presentation adapter and returns the minigame.
    #[must_use]
    pub fn with_presentation<P>(mut self, presentation: P) -> Self
    where
        P: PresentationAdapter + 'static,
    {
        self.bind_presentation(presentation);
        self
    }

    /// Replaces the presentation adapter.
    pub fn bind_presentation<P>(&mut self, presentation: P)
    where
        P: PresentationAdapter + 'static,
    {
        self.presentation = Some(Box::new(presentation));
    }

    /// Registers a listener for the current session, or the next one when idle.
    ///
    /// Registrations end automatically once the session completes.
    pub fn subscribe<L>(&mut self, listener: L) -> SubscriptionId
    where
        L: GameListener + 'static,
    {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Removes a listener registration. Returns `false` for unknown handles.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Number of active listener registrations.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Installs the configuration used by the next session.
    pub fn configure(&mut self, config: MinigameConfig) -> Result<(), SessionError> {
        self.submit(Command::Configure { config })
    }

    /// Begins a session. Ignored while a session is already active.
    pub fn start_game(&mut self) -> Result<(), SessionError> {
        if self.presentation.is_none() && !self.missing_presentation_reported {
            warn!("no presentation adapter bound; the minigame will run without visual feedback");
            self.missing_presentation_reported = true;
        }
        self.submit(Command::StartGame)
    }

    /// Terminates the active session. Does nothing when idle.
    pub fn end_game(&mut self) {
        self.pump(Command::EndGame);
    }

    /// Registers a player click.
    pub fn click(&mut self) {
        self.pump(Command::Click);
    }

    /// Opens the charging window without counting a click.
    pub fn begin_round(&mut self) {
        self.pump(Command::BeginRound);
    }

    /// Advances the minigame clock by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.pump(Command::Tick { dt });
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        query::phase(&self.session)
    }

    /// Configuration of the active session, or of the next one when idle.
    #[must_use]
    pub fn config(&self) -> &MinigameConfig {
        query::config(&self.session)
    }

    /// Snapshot of the accumulated charge.
    #[must_use]
    pub fn charge(&self) -> ChargeSnapshot {
        query::charge(&self.session)
    }

    /// Time left in the charging window.
    #[must_use]
    pub fn timer_remaining(&self) -> Duration {
        query::timer_remaining(&self.session)
    }

    /// Number of the current or most recent attempt.
    #[must_use]
    pub fn attempt(&self) -> u32 {
        query::attempt(&self.session)
    }

    /// Failure streak and the gain it grants.
    #[must_use]
    pub fn difficulty(&self) -> DifficultyState {
        self.difficulty.state()
    }

    /// Step of the resolution sequence reported to the session.
    #[must_use]
    pub fn resolution_step(&self) -> Option<ResolutionStep> {
        query::resolution_step(&self.session)
    }

    /// Presentation-ready frame of the resolution sequence, if one is playing.
    #[must_use]
    pub fn resolution_frame(&self) -> Option<ResolutionFrame> {
        self.resolution.frame()
    }

    /// Record of the current or most recent session.
    #[must_use]
    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    fn pump(&mut self, command: Command) {
        if let Err(error) = self.submit(command) {
            warn!(%error, "command rejected");
        }
    }

    fn submit(&mut self, command: Command) -> Result<(), SessionError> {
        let mut pending = VecDeque::from([command]);
        let mut events = Vec::new();
        let mut commands = Vec::new();

        while let Some(command) = pending.pop_front() {
            events.clear();
            session::apply(&mut self.session, command, &mut events)?;
            if events.is_empty() {
                continue;
            }

            self.difficulty.handle(&events, &mut commands);
            self.outcome.handle(&events, &mut commands);
            self.resolution.handle(&events, &mut commands);
            self.dispatch(&events);
            pending.extend(commands.drain(..));
        }

        Ok(())
    }

    fn dispatch(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::GameStarted { .. } => self.summary.clear(),
                Event::PhaseChanged { phase } => {
                    self.present(|presentation| presentation.on_phase_changed(*phase));
                }
                Event::RoundReset { charge, duration } => {
                    self.present(|presentation| presentation.on_round_reset(*charge, *duration));
                }
                Event::RoundStarted { attempt, duration } => {
                    self.present(|presentation| presentation.on_round_started(*attempt, *duration));
                }
                Event::ChargeChanged { charge } => {
                    self.present(|presentation| presentation.on_charge_changed(*charge));
                }
                Event::TimerTicked { remaining } => {
                    self.present(|presentation| presentation.on_timer_tick(*remaining));
                }
                Event::TimerExpired {
                    normalized_charge,
                    click_count,
                } => {
                    self.summary.charging_closed(*click_count);
                    self.present(|presentation| {
                        presentation.on_timer_expired(*normalized_charge, *click_count);
                    });
                }
                Event::ResolutionStepEntered { step } => {
                    self.present(|presentation| presentation.on_resolution_step(*step));
                }
                Event::RoundResolved {
                    attempt,
                    normalized_charge,
                    verdict,
                } => {
                    self.summary
                        .attempt_resolved(*attempt, *normalized_charge, *verdict);
                    self.present(|presentation| {
                        presentation.on_round_resolved(*attempt, *normalized_charge, *verdict);
                    });
                }
                Event::ChargePerClickChanged { charge_per_click } => {
                    debug!(charge_per_click, "click gain adjusted");
                }
                Event::GameWon { .. } => self.listeners.notify_win(),
                Event::RoundFailed { .. } => self.listeners.notify_fail(),
                Event::GameCompleted { reason } => {
                    self.summary.completed(*reason);
                    self.listeners.complete();
                }
                Event::TimeAdvanced { .. } | Event::ResolutionFinished { .. } => {}
            }
        }
    }

    fn present<F>(&mut self, hook: F)
    where
        F: FnOnce(&mut (dyn PresentationAdapter + 'static)),
    {
        if let Some(presentation) = self.presentation.as_deref_mut() {
            hook(presentation);
        }
    }
}

impl fmt::Debug for Minigame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Minigame")
            .field("session", &self.session)
            .field("difficulty", &self.difficulty)
            .field("resolution", &self.resolution)
            .field("presentation", &self.presentation.is_some())
            .field("listeners", &self.listeners)
            .field("summary", &self.summary)
            .finish()
    }
}
