use crate::error::{SimError, SimResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Immutable run-wide parameters. Built once, validated, then shared by
/// reference with every component that needs it.
#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    #[command(flatten)]
    pub game: GameParams,
    #[command(flatten)]
    pub inventory: InventoryParams,
    #[command(flatten)]
    pub acoustics: AcousticParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameParams {
    /// Interactions between agents per run
    #[arg(long, alias = "nIts", default_value_t = 10_000)]
    pub n_its: usize,
    /// Independent runs of the whole game
    #[arg(long, alias = "nRuns", default_value_t = 1)]
    pub n_runs: usize,
    #[arg(long, alias = "nAgents", default_value_t = 5)]
    pub n_agents: usize,
    /// Write every agent's inventory every `store_ivl` iterations (plus the last one)
    #[arg(long, alias = "storeIvl", default_value_t = 100)]
    pub store_ivl: usize,
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
    /// Execute independent runs on the rayon pool
    #[arg(long, default_value_t = false)]
    pub parallel_runs: bool,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            n_its: 10_000,
            n_runs: 1,
            n_agents: 5,
            store_ivl: 100,
            seed: None,
            parallel_runs: false,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InventoryParams {
    /// Success ratio under which a sufficiently used vowel is discarded
    #[arg(long, alias = "discardThresh", default_value_t = 0.7)]
    pub discard_thresh: f64,
    /// Success ratio above which a failed game adds a new vowel
    #[arg(long, alias = "successThresh", default_value_t = 0.5)]
    pub success_thresh: f64,
    #[arg(long, alias = "minUsesDiscard", default_value_t = 5)]
    pub min_uses_discard: u32,
    /// Perceptual distance under which vowels are merged
    #[arg(long, alias = "acousticMergeThresh", default_value_t = 1.0)]
    pub acoustic_merge_thresh: f64,
    /// Articulatory distance under which vowels are merged
    #[arg(long, alias = "articMergeThresh", default_value_t = 0.17)]
    pub artic_merge_thresh: f64,
    #[arg(long, alias = "additionProb", default_value_t = 0.005)]
    pub addition_prob: f64,
    #[arg(long, alias = "cleanUpProb", default_value_t = 1.0)]
    pub clean_up_prob: f64,
}

impl Default for InventoryParams {
    fn default() -> Self {
        Self {
            discard_thresh: 0.7,
            success_thresh: 0.5,
            min_uses_discard: 5,
            acoustic_merge_thresh: 1.0,
            artic_merge_thresh: 0.17,
            addition_prob: 0.005,
            clean_up_prob: 1.0,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AcousticParams {
    /// Relative width of the multiplicative production noise
    #[arg(long, default_value_t = 0.1)]
    pub noise: f64,
    /// Step size in articulatory space for neighbour search
    #[arg(long, alias = "articEps", default_value_t = 0.03)]
    pub artic_eps: f64,
    /// Weight of F2' mismatch against F1 mismatch in perceptual distance
    #[arg(long, alias = "L", default_value_t = 0.3)]
    pub lambda: f64,
}

impl Default for AcousticParams {
    fn default() -> Self {
        Self {
            noise: 0.1,
            artic_eps: 0.03,
            lambda: 0.3,
        }
    }
}

impl SimConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies every option the user typed on the command line over the
    /// values loaded from a parameter file.
    pub fn merge_from_cli(&mut self, cli: &SimConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(game.n_its);
        update_if_present!(game.n_runs);
        update_if_present!(game.n_agents);
        update_if_present!(game.store_ivl);
        update_if_present!(game.seed);
        update_if_present!(game.parallel_runs);

        update_if_present!(inventory.discard_thresh);
        update_if_present!(inventory.success_thresh);
        update_if_present!(inventory.min_uses_discard);
        update_if_present!(inventory.acoustic_merge_thresh);
        update_if_present!(inventory.artic_merge_thresh);
        update_if_present!(inventory.addition_prob);
        update_if_present!(inventory.clean_up_prob);

        update_if_present!(acoustics.noise);
        update_if_present!(acoustics.artic_eps);
        update_if_present!(acoustics.lambda);
    }

    pub fn validate(&self) -> SimResult<()> {
        let g = &self.game;
        if g.n_agents < 2 {
            return Err(config_err(format!(
                "n_agents must be at least 2 (got {})",
                g.n_agents
            )));
        }
        if g.n_its == 0 {
            return Err(config_err("n_its must be at least 1".into()));
        }
        if g.n_runs == 0 {
            return Err(config_err("n_runs must be at least 1".into()));
        }
        if g.store_ivl == 0 {
            return Err(config_err("store_ivl must be at least 1".into()));
        }

        let inv = &self.inventory;
        check_probability("discard_thresh", inv.discard_thresh)?;
        check_probability("success_thresh", inv.success_thresh)?;
        check_probability("addition_prob", inv.addition_prob)?;
        check_probability("clean_up_prob", inv.clean_up_prob)?;
        check_non_negative("acoustic_merge_thresh", inv.acoustic_merge_thresh)?;
        check_non_negative("artic_merge_thresh", inv.artic_merge_thresh)?;

        let ac = &self.acoustics;
        // 1 +/- noise/2 must stay positive so productions keep their sign.
        if !(ac.noise.is_finite() && (0.0..2.0).contains(&ac.noise)) {
            return Err(config_err(format!(
                "noise must lie in [0, 2) (got {})",
                ac.noise
            )));
        }
        if !(ac.artic_eps.is_finite() && ac.artic_eps > 0.0 && ac.artic_eps <= 1.0) {
            return Err(config_err(format!(
                "artic_eps must lie in (0, 1] (got {})",
                ac.artic_eps
            )));
        }
        check_non_negative("lambda", ac.lambda)?;
        Ok(())
    }
}

fn config_err(msg: String) -> SimError {
    SimError::Config(msg)
}

fn check_probability(name: &str, value: f64) -> SimResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(config_err(format!("{} must lie in [0, 1] (got {})", name, value)))
    }
}

fn check_non_negative(name: &str, value: f64) -> SimResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(config_err(format!(
            "{} must be finite and non-negative (got {})",
            name, value
        )))
    }
}
