pub mod runner;

use crate::agent::Agent;
use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::events::{AgentId, EventTally, GameObserver, Label, TallyingObserver};
use crate::snapshot::{self, SnapshotSink};
use fastrand::Rng;
use serde::Serialize;
use tracing::info;

/// Result of one imitation game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    pub producer: AgentId,
    pub perceiver: AgentId,
    pub uttered: Label,
    pub imitated_with: Label,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub run: usize,
    pub rounds: usize,
    pub successes: usize,
    /// Final inventory size of each agent, by agent id.
    pub inventory_sizes: Vec<usize>,
    pub events: EventTally,
}

impl RunSummary {
    pub fn success_rate(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.successes as f64 / self.rounds as f64
        }
    }

    pub fn mean_inventory_size(&self) -> f64 {
        if self.inventory_sizes.is_empty() {
            0.0
        } else {
            self.inventory_sizes.iter().sum::<usize>() as f64 / self.inventory_sizes.len() as f64
        }
    }
}

/// One run of the imitation game over a fixed population.
///
/// `run` consumes the game, so a population goes through initialisation,
/// the iteration loop and finalisation exactly once.
pub struct Game<'a> {
    cfg: &'a SimConfig,
    run: usize,
    agents: Vec<Agent>,
    rng: Rng,
    time: usize,
    successes: usize,
    tally: EventTally,
}

impl<'a> Game<'a> {
    /// `n_agents` empty agents numbered from 1.
    pub fn new(cfg: &'a SimConfig, run: usize, rng: Rng) -> SimResult<Self> {
        let agents = (1..=cfg.game.n_agents as AgentId).map(Agent::new).collect();
        Self::with_agents(cfg, run, rng, agents)
    }

    /// Validates `cfg` and needs at least two agents to form a pair.
    pub fn with_agents(
        cfg: &'a SimConfig,
        run: usize,
        rng: Rng,
        agents: Vec<Agent>,
    ) -> SimResult<Self> {
        cfg.validate()?;
        if agents.len() < 2 {
            return Err(SimError::Config(format!(
                "a game needs at least 2 agents (got {})",
                agents.len()
            )));
        }
        Ok(Self {
            cfg,
            run,
            agents,
            rng,
            time: 0,
            successes: 0,
            tally: EventTally::default(),
        })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Iterations completed so far.
    pub fn time(&self) -> usize {
        self.time
    }

    pub fn tally(&self) -> EventTally {
        self.tally
    }

    /// Two distinct agent indices, uniformly at random; the first produces.
    pub fn sample_pair(&mut self) -> (usize, usize) {
        let n = self.agents.len();
        let producer = self.rng.usize(0..n);
        let mut perceiver = self.rng.usize(0..n - 1);
        if perceiver >= producer {
            perceiver += 1;
        }
        (producer, perceiver)
    }

    /// Plays steps 1-4 between two agents, then lets both clean up, producer
    /// first.
    pub fn play_round(
        &mut self,
        producer: usize,
        perceiver: usize,
        obs: &mut dyn GameObserver,
    ) -> RoundOutcome {
        let Self {
            cfg,
            agents,
            rng,
            tally,
            successes,
            ..
        } = self;
        let cfg: &SimConfig = *cfg;
        let mut obs = TallyingObserver::new(obs, tally);
        let (p, l) = pair_mut(agents, producer, perceiver);

        let utterance = p.step1(cfg, rng, &mut obs);
        let imitation = l.step2(&utterance.signal, cfg, rng, &mut obs);
        let success = p.step3(utterance.label, &imitation.signal, cfg);
        l.step4(success, imitation.label, &utterance.signal, cfg, &mut obs);

        p.maintain(cfg, rng, &mut obs);
        l.maintain(cfg, rng, &mut obs);

        if success {
            *successes += 1;
        }

        RoundOutcome {
            producer: p.id(),
            perceiver: l.id(),
            uttered: utterance.label,
            imitated_with: imitation.label,
            success,
        }
    }

    /// Runs all `n_its` iterations, writing snapshots on schedule.
    pub fn run<S: SnapshotSink + ?Sized>(
        mut self,
        sink: &mut S,
        obs: &mut dyn GameObserver,
    ) -> SimResult<RunSummary> {
        let n_its = self.cfg.game.n_its;
        let store_ivl = self.cfg.game.store_ivl;
        info!(run = self.run, agents = self.agents.len(), n_its, "run started");

        let mut pair = self.sample_pair();
        for time in 1..=n_its {
            self.play_round(pair.0, pair.1, obs);
            self.time = time;

            if snapshot::is_report_time(time, n_its, store_ivl) {
                for record in snapshot::capture(self.run, time, &self.agents) {
                    sink.write(&record)?;
                }
            }

            pair = self.sample_pair();
        }

        let summary = self.finish();
        info!(
            run = summary.run,
            success_rate = summary.success_rate(),
            mean_inventory = summary.mean_inventory_size(),
            "run finished"
        );
        Ok(summary)
    }

    fn finish(self) -> RunSummary {
        RunSummary {
            run: self.run,
            rounds: self.time,
            successes: self.successes,
            inventory_sizes: self.agents.iter().map(Agent::len).collect(),
            events: self.tally,
        }
    }
}

/// Disjoint mutable borrows of two agents.
fn pair_mut(agents: &mut [Agent], a: usize, b: usize) -> (&mut Agent, &mut Agent) {
    assert_ne!(a, b, "an agent cannot play against itself");
    if a < b {
        let (left, right) = agents.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = agents.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
