use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};
use tracing::debug;

/// Per-agent vowel label. Positional: "highest label in the inventory + 1",
/// so a freed maximum label is handed out again.
pub type Label = u32;

/// 1-based agent number within a run.
pub type AgentId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum AddOrigin {
    /// Uniformly random articulation.
    Random,
    /// Converged self-talk search towards a heard signal.
    Derived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RemovalCause {
    Discarded,
    Merged,
}

/// Inventory change reported while a game is played.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimEvent {
    VowelAdded {
        agent: AgentId,
        label: Label,
        origin: AddOrigin,
    },
    VowelRemoved {
        agent: AgentId,
        label: Label,
        uses: u32,
        successes: u32,
        cause: RemovalCause,
    },
    VowelsMerged {
        agent: AgentId,
        kept: Label,
        dropped: Label,
        /// Uses of the pair as drawn, before the merge.
        uses: (u32, u32),
        acoustic_distance: f64,
        artic_distance: f64,
        /// Success ratios, present only when both vowels had been used.
        ratios: Option<(f64, f64)>,
    },
}

/// Receives inventory events. Implementations must not assume any
/// particular thread; each run drives its own observer.
pub trait GameObserver {
    fn on_event(&mut self, event: &SimEvent);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl GameObserver for NullObserver {
    fn on_event(&mut self, _event: &SimEvent) {}
}

/// Logs each event at DEBUG with structured fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl GameObserver for TracingObserver {
    fn on_event(&mut self, event: &SimEvent) {
        match *event {
            SimEvent::VowelAdded {
                agent,
                label,
                origin,
            } => debug!(agent, label, origin = %origin, "vowel added"),
            SimEvent::VowelRemoved {
                agent,
                label,
                uses,
                successes,
                cause,
            } => {
                if uses > 0 {
                    let ratio = successes as f64 / uses as f64;
                    debug!(agent, label, uses, successes, ratio, cause = %cause, "vowel removed");
                } else {
                    debug!(agent, label, uses, successes, cause = %cause, "vowel removed");
                }
            }
            SimEvent::VowelsMerged {
                agent,
                kept,
                dropped,
                uses,
                acoustic_distance,
                artic_distance,
                ratios,
            } => debug!(
                agent,
                kept,
                dropped,
                uses_first = uses.0,
                uses_second = uses.1,
                acoustic_distance,
                artic_distance,
                ratios = ?ratios,
                "vowels merged"
            ),
        }
    }
}

/// Keeps every event, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<SimEvent>,
}

impl GameObserver for RecordingObserver {
    fn on_event(&mut self, event: &SimEvent) {
        self.events.push(event.clone());
    }
}

/// Running totals of inventory events.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventTally {
    pub random_additions: u64,
    pub derived_additions: u64,
    pub discards: u64,
    pub merges: u64,
}

impl EventTally {
    pub fn record(&mut self, event: &SimEvent) {
        match event {
            SimEvent::VowelAdded {
                origin: AddOrigin::Random,
                ..
            } => self.random_additions += 1,
            SimEvent::VowelAdded {
                origin: AddOrigin::Derived,
                ..
            } => self.derived_additions += 1,
            SimEvent::VowelRemoved {
                cause: RemovalCause::Discarded,
                ..
            } => self.discards += 1,
            // Counted once through VowelsMerged.
            SimEvent::VowelRemoved {
                cause: RemovalCause::Merged,
                ..
            } => {}
            SimEvent::VowelsMerged { .. } => self.merges += 1,
        }
    }
}

/// Forwards to an inner observer while keeping a tally.
pub struct TallyingObserver<'a> {
    inner: &'a mut dyn GameObserver,
    tally: &'a mut EventTally,
}

impl<'a> TallyingObserver<'a> {
    pub fn new(inner: &'a mut dyn GameObserver, tally: &'a mut EventTally) -> Self {
        Self { inner, tally }
    }
}

impl GameObserver for TallyingObserver<'_> {
    fn on_event(&mut self, event: &SimEvent) {
        self.tally.record(event);
        self.inner.on_event(event);
    }
}
