use super::{Agent, Prototype};
use crate::acoustics::{articulatory_distance, perceptual_distance};
use crate::config::SimConfig;
use crate::events::{GameObserver, Label, RemovalCause, SimEvent};
use fastrand::Rng;
use itertools::Itertools;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceReport {
    /// False when the clean-up draw skipped this pass.
    pub ran: bool,
    pub discarded: usize,
    pub added: bool,
    pub merged: usize,
}

/// Which member of a mergeable pair gives up its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Loser {
    First,
    Second,
}

/// Merge tie-break. Unused vowels lose first (the second one if both are
/// unused); otherwise the lower success ratio loses, the second one on ties.
fn pick_loser(first: &Prototype, second: &Prototype) -> Loser {
    match (first.success_ratio(), second.success_ratio()) {
        (_, None) => Loser::Second,
        (None, Some(_)) => Loser::First,
        (Some(r1), Some(r2)) if r1 < r2 => Loser::First,
        (Some(_), Some(_)) => Loser::Second,
    }
}

impl Agent {
    /// Post-game clean-up: discard, random addition, merge.
    ///
    /// Runs with probability `clean_up_prob`.
    pub fn maintain(
        &mut self,
        cfg: &SimConfig,
        rng: &mut Rng,
        obs: &mut dyn GameObserver,
    ) -> MaintenanceReport {
        let mut report = MaintenanceReport::default();
        if rng.f64() >= cfg.inventory.clean_up_prob {
            return report;
        }
        report.ran = true;

        report.discarded = self.discard_underperformers(cfg, obs);

        if rng.f64() < cfg.inventory.addition_prob {
            self.add_random_vowel(rng, obs);
            report.added = true;
        }

        report.merged = self.merge_close_vowels(cfg, rng, obs);
        report
    }

    /// Removes every vowel used more than `min_uses_discard` times whose
    /// success ratio is below `discard_thresh`. Candidates are collected in
    /// one scan and removed afterwards.
    pub fn discard_underperformers(&mut self, cfg: &SimConfig, obs: &mut dyn GameObserver) -> usize {
        let inv = &cfg.inventory;
        let doomed: Vec<Label> = self
            .iter()
            .filter(|(_, p)| {
                p.uses > inv.min_uses_discard
                    && p.success_ratio().is_some_and(|r| r < inv.discard_thresh)
            })
            .map(|(label, _)| label)
            .collect();

        for &label in &doomed {
            self.remove_vowel(label, RemovalCause::Discarded, obs);
        }
        doomed.len()
    }

    /// All pairs `(a, b)`, `a < b`, that are perceptually or articulatorily
    /// closer than the merge thresholds.
    pub fn merge_candidates(&self, cfg: &SimConfig) -> Vec<(Label, Label)> {
        let inv = &cfg.inventory;
        let lambda = cfg.acoustics.lambda;
        self.inventory
            .iter()
            .tuple_combinations()
            .filter(|((_, a), (_, b))| {
                perceptual_distance(a.vowel.formants(), b.vowel.formants(), lambda)
                    < inv.acoustic_merge_thresh
                    || articulatory_distance(a.vowel.articulation(), b.vowel.articulation())
                        < inv.artic_merge_thresh
            })
            .map(|((&la, _), (&lb, _))| (la, lb))
            .collect()
    }

    /// Merges near-duplicates until none remain.
    ///
    /// Each pass recomputes the candidate pairs, picks one uniformly at
    /// random and folds the loser's counts into the survivor. The inventory
    /// shrinks by one per pass, which bounds the loop.
    pub fn merge_close_vowels(
        &mut self,
        cfg: &SimConfig,
        rng: &mut Rng,
        obs: &mut dyn GameObserver,
    ) -> usize {
        let mut merged = 0;
        loop {
            let candidates = self.merge_candidates(cfg);
            if candidates.is_empty() {
                return merged;
            }
            let (first, second) = candidates[rng.usize(0..candidates.len())];
            self.merge_pair(first, second, cfg, obs);
            merged += 1;
        }
    }

    /// Merges one pair and returns the surviving label.
    pub fn merge_pair(
        &mut self,
        first: Label,
        second: Label,
        cfg: &SimConfig,
        obs: &mut dyn GameObserver,
    ) -> Label {
        let (p1, p2) = match (self.get(first), self.get(second)) {
            (Some(a), Some(b)) => (*a, *b),
            _ => panic!(
                "agent {} cannot merge {} and {}: missing vowel",
                self.id, first, second
            ),
        };

        let (kept, dropped) = match pick_loser(&p1, &p2) {
            Loser::First => (second, first),
            Loser::Second => (first, second),
        };

        let ratios = p1.success_ratio().zip(p2.success_ratio());
        obs.on_event(&SimEvent::VowelsMerged {
            agent: self.id,
            kept,
            dropped,
            uses: (p1.uses, p2.uses),
            acoustic_distance: perceptual_distance(
                p1.vowel.formants(),
                p2.vowel.formants(),
                cfg.acoustics.lambda,
            ),
            artic_distance: articulatory_distance(p1.vowel.articulation(), p2.vowel.articulation()),
            ratios,
        });

        let loser = self.remove_vowel(dropped, RemovalCause::Merged, obs);
        let survivor = self.slot_mut(kept);
        survivor.uses += loser.uses;
        survivor.successes += loser.successes;
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acoustics::Articulation;
    use crate::vowel::Vowel;

    fn proto(uses: u32, successes: u32) -> Prototype {
        Prototype {
            vowel: Vowel::new(Articulation::NEUTRAL),
            uses,
            successes,
        }
    }

    #[test]
    fn test_unused_vowel_loses() {
        assert_eq!(pick_loser(&proto(0, 0), &proto(4, 1)), Loser::First);
        assert_eq!(pick_loser(&proto(4, 1), &proto(0, 0)), Loser::Second);
    }

    #[test]
    fn test_both_unused_drops_second() {
        assert_eq!(pick_loser(&proto(0, 0), &proto(0, 0)), Loser::Second);
    }

    #[test]
    fn test_lower_ratio_loses_and_ties_drop_second() {
        assert_eq!(pick_loser(&proto(10, 2), &proto(10, 9)), Loser::First);
        assert_eq!(pick_loser(&proto(10, 9), &proto(10, 2)), Loser::Second);
        assert_eq!(pick_loser(&proto(4, 2), &proto(2, 1)), Loser::Second);
    }
}
