use super::{Game, RunSummary};
use crate::config::SimConfig;
use crate::error::SimResult;
use crate::events::GameObserver;
use crate::snapshot::{MemorySink, SnapshotRecord, SnapshotSink};
use fastrand::Rng;
use rayon::prelude::*;
use tracing::info;

/// A trait for receiving updates as runs complete.
pub trait ProgressCallback: Send + Sync {
    fn on_run_complete(&self, summary: &RunSummary);
}

/// Ignores progress.
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_run_complete(&self, _summary: &RunSummary) {}
}

/// Drives `n_runs` independent runs, each with a fresh population and its
/// own RNG stream.
pub struct Runner<'a> {
    cfg: &'a SimConfig,
}

impl<'a> Runner<'a> {
    /// Validates the configuration before any agent is created.
    pub fn new(cfg: &'a SimConfig) -> SimResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// RNG for 1-based `run`: `seed + run` when seeded, entropy otherwise.
    pub fn rng_for(&self, run: usize) -> Rng {
        match self.cfg.game.seed {
            Some(s) => Rng::with_seed(s.wrapping_add(run as u64)),
            None => Rng::new(),
        }
    }

    pub fn execute<S, O, CB>(
        &self,
        sink: &mut S,
        observer: O,
        progress: &CB,
    ) -> SimResult<Vec<RunSummary>>
    where
        S: SnapshotSink + ?Sized,
        O: GameObserver + Clone + Send + Sync,
        CB: ProgressCallback,
    {
        let n_runs = self.cfg.game.n_runs;
        info!(
            n_runs,
            parallel = self.cfg.game.parallel_runs,
            seed = ?self.cfg.game.seed,
            "starting simulation"
        );

        let summaries = if self.cfg.game.parallel_runs {
            self.execute_parallel(sink, observer, progress)?
        } else {
            let mut summaries = Vec::with_capacity(n_runs);
            for run in 1..=n_runs {
                let mut obs = observer.clone();
                let game = Game::new(self.cfg, run, self.rng_for(run))?;
                let summary = game.run(sink, &mut obs)?;
                progress.on_run_complete(&summary);
                summaries.push(summary);
            }
            summaries
        };

        sink.flush()?;
        Ok(summaries)
    }

    /// Runs share nothing; rows are buffered per run and handed to the sink
    /// in run order so output matches a serial execution.
    fn execute_parallel<S, O, CB>(
        &self,
        sink: &mut S,
        observer: O,
        progress: &CB,
    ) -> SimResult<Vec<RunSummary>>
    where
        S: SnapshotSink + ?Sized,
        O: GameObserver + Clone + Send + Sync,
        CB: ProgressCallback,
    {
        let results: Vec<(RunSummary, Vec<SnapshotRecord>)> = (1..=self.cfg.game.n_runs)
            .into_par_iter()
            .map(|run| {
                let mut obs = observer.clone();
                let mut buffer = MemorySink::default();
                let game = Game::new(self.cfg, run, self.rng_for(run))?;
                let summary = game.run(&mut buffer, &mut obs)?;
                progress.on_run_complete(&summary);
                Ok((summary, buffer.records))
            })
            .collect::<SimResult<Vec<_>>>()?;

        let mut summaries = Vec::with_capacity(results.len());
        for (summary, records) in results {
            for record in &records {
                sink.write(record)?;
            }
            summaries.push(summary);
        }
        Ok(summaries)
    }
}
