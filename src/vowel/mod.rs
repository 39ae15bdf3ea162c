pub mod neighbors;

pub use self::neighbors::neighbors;

use crate::acoustics::{perceptual_distance, synthesize, Articulation, Formants};
use crate::config::AcousticParams;
use fastrand::Rng;
use serde::{Deserialize, Serialize};

/// A vowel prototype: an articulation and the formants it synthesises to.
///
/// Formants are never edited directly; they always follow the articulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vowel {
    articulation: Articulation,
    formants: Formants,
}

impl Vowel {
    pub fn new(articulation: Articulation) -> Self {
        Self {
            articulation,
            formants: synthesize(&articulation),
        }
    }

    pub fn random(rng: &mut Rng) -> Self {
        Self::new(Articulation::random(rng))
    }

    pub fn articulation(&self) -> &Articulation {
        &self.articulation
    }

    pub fn formants(&self) -> &Formants {
        &self.formants
    }

    /// Formants with independent multiplicative noise, each scaled by a
    /// factor drawn uniformly from `[1 - noise/2, 1 + noise/2]`.
    pub fn produce(&self, noise: f64, rng: &mut Rng) -> Formants {
        Formants(self.formants.0.map(|f| {
            let jitter = noise * (rng.f64() - 0.5);
            f * (1.0 + jitter)
        }))
    }

    /// One hill-climbing step towards `target`.
    ///
    /// Moves to the neighbour with the smallest perceptual distance to the
    /// target if it is strictly closer than the current position. Returns
    /// whether the vowel moved.
    pub fn shift_closer(&mut self, target: &Formants, params: &AcousticParams) -> bool {
        let mut best_dist = perceptual_distance(target, &self.formants, params.lambda);
        let mut best = None;

        for (art, forms) in neighbors(&self.articulation, params.artic_eps) {
            let d = perceptual_distance(target, &forms, params.lambda);
            if d < best_dist {
                best_dist = d;
                best = Some((art, forms));
            }
        }

        match best {
            Some((art, forms)) => {
                self.articulation = art;
                self.formants = forms;
                true
            }
            None => false,
        }
    }
}
