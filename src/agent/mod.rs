pub mod maintenance;

pub use self::maintenance::MaintenanceReport;

use crate::acoustics::{perceptual_distance, Articulation, Formants};
use crate::config::{AcousticParams, SimConfig};
use crate::error::{SimError, SimResult};
use crate::events::{AddOrigin, AgentId, GameObserver, Label, RemovalCause, SimEvent};
use crate::vowel::Vowel;
use fastrand::Rng;
use std::collections::BTreeMap;

/// An inventory slot: the vowel plus its lifetime use and success counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prototype {
    pub vowel: Vowel,
    pub uses: u32,
    pub successes: u32,
}

impl Prototype {
    pub fn fresh(vowel: Vowel) -> Self {
        Self {
            vowel,
            uses: 0,
            successes: 0,
        }
    }

    /// `successes / uses`, undefined for an unused vowel.
    pub fn success_ratio(&self) -> Option<f64> {
        if self.uses == 0 {
            None
        } else {
            Some(self.successes as f64 / self.uses as f64)
        }
    }
}

/// What the producer sends in step 1: the intended label and the noisy signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Utterance {
    pub label: Label,
    pub signal: Formants,
}

/// What the perceiver sends back in step 2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Imitation {
    /// The perceiver's vowel it judged closest to the utterance.
    pub label: Label,
    pub signal: Formants,
}

/// A member of the population. Vowels and their counters live in one slot
/// keyed by label, so they are created and destroyed together.
#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    inventory: BTreeMap<Label, Prototype>,
}

impl Agent {
    pub fn new(id: AgentId) -> Self {
        Self {
            id,
            inventory: BTreeMap::new(),
        }
    }

    /// Agent with a prepared inventory, labelled 1, 2, ... in order.
    pub fn with_inventory<I>(id: AgentId, prototypes: I) -> SimResult<Self>
    where
        I: IntoIterator<Item = Prototype>,
    {
        let mut agent = Self::new(id);
        for proto in prototypes {
            if proto.successes > proto.uses {
                return Err(SimError::Invariant(format!(
                    "agent {}: {} successes exceed {} uses",
                    id, proto.successes, proto.uses
                )));
            }
            if !proto.vowel.articulation().is_valid() {
                return Err(SimError::Invariant(format!(
                    "agent {}: articulation {:?} outside the unit cube",
                    id,
                    proto.vowel.articulation()
                )));
            }
            let label = agent.next_label();
            agent.inventory.insert(label, proto);
        }
        Ok(agent)
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }

    pub fn get(&self, label: Label) -> Option<&Prototype> {
        self.inventory.get(&label)
    }

    /// Slots in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (Label, &Prototype)> + '_ {
        self.inventory.iter().map(|(&l, p)| (l, p))
    }

    pub fn labels(&self) -> Vec<Label> {
        self.inventory.keys().copied().collect()
    }

    /// Label the next added vowel will receive.
    pub fn next_label(&self) -> Label {
        self.inventory.keys().next_back().map_or(1, |&max| max + 1)
    }

    pub fn add_random_vowel(&mut self, rng: &mut Rng, obs: &mut dyn GameObserver) -> Label {
        let vowel = Vowel::random(rng);
        self.insert(vowel, AddOrigin::Random, obs)
    }

    pub fn add_new_vowel(&mut self, vowel: Vowel, obs: &mut dyn GameObserver) -> Label {
        self.insert(vowel, AddOrigin::Derived, obs)
    }

    fn insert(&mut self, vowel: Vowel, origin: AddOrigin, obs: &mut dyn GameObserver) -> Label {
        let label = self.next_label();
        self.inventory.insert(label, Prototype::fresh(vowel));
        obs.on_event(&SimEvent::VowelAdded {
            agent: self.id,
            label,
            origin,
        });
        label
    }

    /// Removes a vowel together with its counters.
    ///
    /// # Panics
    /// If `label` is not in the inventory.
    pub fn remove_vowel(
        &mut self,
        label: Label,
        cause: RemovalCause,
        obs: &mut dyn GameObserver,
    ) -> Prototype {
        let removed = self.inventory.remove(&label).unwrap_or_else(|| {
            panic!(
                "agent {} cannot remove vowel {}: not in inventory",
                self.id, label
            )
        });
        obs.on_event(&SimEvent::VowelRemoved {
            agent: self.id,
            label,
            uses: removed.uses,
            successes: removed.successes,
            cause,
        });
        removed
    }

    fn slot_mut(&mut self, label: Label) -> &mut Prototype {
        let id = self.id;
        self.inventory
            .get_mut(&label)
            .unwrap_or_else(|| panic!("agent {} has no vowel {}", id, label))
    }

    /// Label of the stored vowel perceptually closest to `signal`. Ties go to
    /// the lowest label.
    pub fn closest(&self, signal: &Formants, lambda: f64) -> Option<Label> {
        let mut best = None;
        let mut min_dist = f64::INFINITY;
        for (&label, proto) in &self.inventory {
            let d = perceptual_distance(proto.vowel.formants(), signal, lambda);
            if d < min_dist {
                min_dist = d;
                best = Some(label);
            }
        }
        best
    }

    /// Step 1 (producer): pick a vowel uniformly at random and utter it.
    pub fn step1(&mut self, cfg: &SimConfig, rng: &mut Rng, obs: &mut dyn GameObserver) -> Utterance {
        if self.is_empty() {
            self.add_random_vowel(rng, obs);
        }

        let idx = rng.usize(0..self.inventory.len());
        let (&label, proto) = self
            .inventory
            .iter_mut()
            .nth(idx)
            .unwrap_or_else(|| panic!("index {} outside a non-empty inventory", idx));
        proto.uses += 1;

        Utterance {
            label,
            signal: proto.vowel.produce(cfg.acoustics.noise, rng),
        }
    }

    /// Step 2 (perceiver): imitate the heard signal with the closest own vowel.
    pub fn step2(
        &mut self,
        heard: &Formants,
        cfg: &SimConfig,
        rng: &mut Rng,
        obs: &mut dyn GameObserver,
    ) -> Imitation {
        if self.is_empty() {
            let vowel = Self::find_phoneme(heard, &cfg.acoustics);
            self.add_new_vowel(vowel, obs);
        }

        let label = self
            .closest(heard, cfg.acoustics.lambda)
            .unwrap_or_else(|| panic!("agent {} has an empty inventory in step 2", self.id));
        let signal = self.inventory[&label]
            .vowel
            .produce(cfg.acoustics.noise, rng);

        Imitation { label, signal }
    }

    /// Step 3 (producer): the game succeeds if the imitation is recognised as
    /// the vowel uttered in step 1.
    pub fn step3(&mut self, uttered: Label, imitation: &Formants, cfg: &SimConfig) -> bool {
        let recognised = self.closest(imitation, cfg.acoustics.lambda);
        if recognised == Some(uttered) {
            self.slot_mut(uttered).successes += 1;
            true
        } else {
            false
        }
    }

    /// Step 4 (perceiver): adapt to the outcome.
    ///
    /// On success the imitating vowel moves towards the original utterance.
    /// On failure a vowel that usually works is kept and a new category is
    /// derived from the utterance; a vowel that usually fails is moved instead.
    pub fn step4(
        &mut self,
        success: bool,
        imitated_with: Label,
        heard: &Formants,
        cfg: &SimConfig,
        obs: &mut dyn GameObserver,
    ) {
        let success_thresh = cfg.inventory.success_thresh;
        let slot = self.slot_mut(imitated_with);
        slot.uses += 1;

        if success {
            slot.vowel.shift_closer(heard, &cfg.acoustics);
            slot.successes += 1;
            return;
        }

        // uses >= 1 after the increment above.
        let ratio = slot.successes as f64 / slot.uses as f64;
        if ratio > success_thresh {
            let vowel = Self::find_phoneme(heard, &cfg.acoustics);
            self.add_new_vowel(vowel, obs);
        } else {
            slot.vowel.shift_closer(heard, &cfg.acoustics);
        }
    }

    /// Self-talk search: hill-climb from schwa towards `target` until no
    /// neighbour is perceptually closer. Deterministic.
    ///
    /// Terminates because every accepted step strictly lowers the distance to
    /// a fixed target, so no articulation is visited twice.
    pub fn find_phoneme(target: &Formants, params: &AcousticParams) -> Vowel {
        let mut vowel = Vowel::new(Articulation::NEUTRAL);
        while vowel.shift_closer(target, params) {}
        vowel
    }
}
