pub mod perception;
pub mod synth;

pub use self::perception::{articulatory_distance, bark, effective_f2, perceptual_distance};
pub use self::synth::synthesize;

use serde::{Deserialize, Serialize};

/// Number of articulatory dimensions (height, backness, rounding).
pub const ARTIC_DIMS: usize = 3;

/// A point in the articulatory cube `[0, 1]^3`.
///
/// Height 1.0 is a close vowel, backness 1.0 a back vowel, rounding 1.0 a
/// fully rounded one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Articulation {
    pub height: f64,
    pub backness: f64,
    pub rounding: f64,
}

impl Articulation {
    /// Schwa, the starting point of every self-talk search.
    pub const NEUTRAL: Articulation = Articulation {
        height: 0.5,
        backness: 0.5,
        rounding: 0.5,
    };

    pub const fn new(height: f64, backness: f64, rounding: f64) -> Self {
        Self {
            height,
            backness,
            rounding,
        }
    }

    pub fn random(rng: &mut fastrand::Rng) -> Self {
        // Draw order is height, backness, rounding.
        let height = rng.f64();
        let backness = rng.f64();
        let rounding = rng.f64();
        Self::new(height, backness, rounding)
    }

    pub fn to_array(self) -> [f64; ARTIC_DIMS] {
        [self.height, self.backness, self.rounding]
    }

    pub fn from_array(v: [f64; ARTIC_DIMS]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    pub fn is_valid(&self) -> bool {
        self.to_array().iter().all(|x| (0.0..=1.0).contains(x))
    }

    /// Rounded to four decimals for reporting.
    pub fn rounded(&self) -> Self {
        let r = |x: f64| (x * 10_000.0).round() / 10_000.0;
        Self::new(r(self.height), r(self.backness), r(self.rounding))
    }
}

/// F1..F4 in Hz.
///
/// Synthesised formants are whole numbers; noisy productions are not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Formants(pub [f64; 4]);

impl Formants {
    pub fn f1(&self) -> f64 {
        self.0[0]
    }
    pub fn f2(&self) -> f64 {
        self.0[1]
    }
    pub fn f3(&self) -> f64 {
        self.0[2]
    }
    pub fn f4(&self) -> f64 {
        self.0[3]
    }

    /// Integer view used by snapshot output.
    pub fn as_hz(&self) -> [u32; 4] {
        self.0.map(|f| f as u32)
    }
}
