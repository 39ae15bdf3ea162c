use crate::acoustics::{synthesize, Articulation, Formants, ARTIC_DIMS};

/// Up to six articulations one `step` away from `art`, each paired with its
/// synthesised formants.
///
/// For every dimension the value is lowered (clamped at 0) unless it already
/// sits at 0, then raised (clamped at 1) unless it already sits at 1. Order
/// is height-, height+, backness-, backness+, rounding-, rounding+.
pub fn neighbors(art: &Articulation, step: f64) -> Vec<(Articulation, Formants)> {
    let base = art.to_array();
    let mut out = Vec::with_capacity(2 * ARTIC_DIMS);

    for dim in 0..ARTIC_DIMS {
        let x = base[dim];
        if x > 0.0 {
            let mut cand = base;
            cand[dim] = if x > step { x - step } else { 0.0 };
            out.push(cand);
        }
        if x < 1.0 {
            let mut cand = base;
            cand[dim] = if x < 1.0 - step { x + step } else { 1.0 };
            out.push(cand);
        }
    }

    out.into_iter()
        .map(|v| {
            let a = Articulation::from_array(v);
            (a, synthesize(&a))
        })
        .collect()
}
