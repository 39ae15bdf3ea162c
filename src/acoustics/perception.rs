use super::{Articulation, Formants};

/// Critical distance (bark) used to decide how F3 and F4 pull on F2'.
const F2_PRIME_C: f64 = 3.5;

/// Hz to bark. Logarithmic above 271.32 Hz, linear below.
#[inline(always)]
pub fn bark(f: f64) -> f64 {
    if f > 271.32 {
        (f / 271.32).ln() / 0.1719 + 2.0
    } else {
        (f - 51.0) / 110.0
    }
}

/// Effective second formant F2' (bark).
///
/// Exactly one of four cases applies for any ordered formant set. Panics if
/// none does, which can only happen for NaN input.
pub fn effective_f2(formants: &Formants) -> f64 {
    let c = F2_PRIME_C;
    let f2 = bark(formants.f2());
    let f3 = bark(formants.f3());
    let f4 = bark(formants.f4());

    let w1 = (c - f3 + f2) / c;
    let w2 = (f4 - 2.0 * f3 + f2) / (f4 - f2);

    if f3 - f2 > c {
        f2
    } else if f3 - f2 <= c && f4 - f2 > c {
        ((2.0 - w1) * f2 + w1 * f3) / 2.0
    } else if f4 - f2 <= c && f3 - f2 < f4 - f3 {
        (w2 * f2 + (2.0 - w2) * f3) / 2.0 - 1.0
    } else if f4 - f2 <= c && f3 - f2 >= f4 - f3 {
        ((2.0 + w2) * f3 - w2 * f4) / 2.0 - 1.0
    } else {
        panic!("no F2' case applies to formants {:?}", formants.0);
    }
}

/// Perceptual distance between two formant sets:
/// `sqrt((F1a - F1b)^2 + lambda * (F2'a - F2'b)^2)` with F1 in bark.
pub fn perceptual_distance(a: &Formants, b: &Formants, lambda: f64) -> f64 {
    let d1 = bark(a.f1()) - bark(b.f1());
    let d2 = effective_f2(a) - effective_f2(b);
    (d1 * d1 + lambda * (d2 * d2)).sqrt()
}

/// Plain Euclidean distance in the articulatory cube.
pub fn articulatory_distance(a: &Articulation, b: &Articulation) -> f64 {
    let dh = a.height - b.height;
    let db = a.backness - b.backness;
    let dr = a.rounding - b.rounding;
    (dh * dh + db * db + dr * dr).sqrt()
}
