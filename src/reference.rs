use crate::acoustics::Articulation;
use crate::vowel::Vowel;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Landmark vowels at the corners and centre of the articulatory cube.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ReferenceVowel {
    I,
    E,
    A,
    O,
    U,
    Schwa,
}

impl ReferenceVowel {
    pub fn articulation(&self) -> Articulation {
        match self {
            Self::I => Articulation::new(1.0, 0.0, 0.0),
            Self::E => Articulation::new(0.5, 0.0, 0.0),
            Self::A => Articulation::new(0.0, 0.5, 0.0),
            Self::O => Articulation::new(0.5, 1.0, 1.0),
            Self::U => Articulation::new(1.0, 1.0, 1.0),
            Self::Schwa => Articulation::NEUTRAL,
        }
    }

    pub fn vowel(&self) -> Vowel {
        Vowel::new(self.articulation())
    }
}

pub fn all_reference_vowels() -> Vec<(ReferenceVowel, Vowel)> {
    ReferenceVowel::iter().map(|r| (r, r.vowel())).collect()
}
