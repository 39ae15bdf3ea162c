use super::{Articulation, Formants};

/// Articulatory synthesizer: maps an articulation onto F1..F4.
///
/// Each formant is a polynomial, quadratic in height and backness, whose
/// coefficients are linear in rounding. Values are truncated to whole Hz.
/// Callers must keep the articulation inside `[0, 1]^3`.
pub fn synthesize(art: &Articulation) -> Formants {
    let h = art.height;
    let b = art.backness;
    let r = art.rounding;
    let hh = h * h;
    let bb = b * b;

    let f1 = ((-392.0 + 392.0 * r) * hh + (596.0 - 668.0 * r) * h + (-146.0 + 166.0 * r)) * bb
        + ((348.0 - 348.0 * r) * hh + (-494.0 + 606.0 * r) * h + (141.0 - 175.0 * r)) * b
        + ((340.0 - 72.0 * r) * hh + (-796.0 + 108.0 * r) * h + (708.0 - 38.0 * r));

    let f2 = ((-1200.0 + 1208.0 * r) * hh + (1320.0 - 1328.0 * r) * h + (118.0 - 158.0 * r)) * bb
        + ((1864.0 - 1488.0 * r) * hh + (-2644.0 + 1510.0 * r) * h + (-561.0 + 221.0 * r)) * b
        + ((-670.0 + 490.0 * r) * hh + (1355.0 - 697.0 * r) * h + (1517.0 - 117.0 * r));

    let f3 = ((604.0 - 604.0 * r) * hh + (1038.0 - 1178.0 * r) * h + (246.0 + 566.0 * r)) * bb
        + ((-1150.0 + 1262.0 * r) * hh + (-1443.0 + 1313.0 * r) * h + (-317.0 - 483.0 * r)) * b
        + ((1130.0 - 836.0 * r) * hh + (-315.0 + 44.0 * r) * h + (2427.0 - 127.0 * r));

    let f4 = ((-1120.0 + 16.0 * r) * hh + (1696.0 - 180.0 * r) * h + (500.0 + 522.0 * r)) * bb
        + ((-140.0 + 240.0 * r) * hh + (-578.0 + 214.0 * r) * h + (-692.0 - 419.0 * r)) * b
        + ((1480.0 - 602.0 * r) * hh + (-1220.0 + 289.0 * r) * h + (3678.0 - 178.0 * r));

    Formants([f1.trunc(), f2.trunc(), f3.trunc(), f4.trunc()])
}
