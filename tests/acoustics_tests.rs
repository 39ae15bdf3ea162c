use rstest::rstest;
use vowelforge::acoustics::{
    articulatory_distance, bark, effective_f2, perceptual_distance, synthesize, Articulation,
    Formants,
};
use vowelforge::agent::Agent;
use vowelforge::config::SimConfig;
use vowelforge::reference::ReferenceVowel;
use vowelforge::vowel::Vowel;

// --- SYNTHESIZER GOLDEN VALUES ---
#[rstest]
#[case(0.5, 0.5, 0.5, [399.0, 1352.0, 2061.0, 3096.0])] // schwa
#[case(1.0, 0.0, 0.0, [252.0, 2202.0, 3242.0, 3938.0])] // i
#[case(0.5, 0.0, 0.0, [395.0, 2027.0, 2552.0, 3438.0])] // e
#[case(0.0, 0.5, 0.0, [742.0, 1266.0, 2330.0, 3457.0])] // a
#[case(0.5, 1.0, 1.0, [399.0, 829.0, 2143.0, 3490.0])] // o
#[case(1.0, 1.0, 1.0, [276.0, 740.0, 2177.0, 3506.0])] // u
#[case(0.0, 0.0, 0.0, [708.0, 1517.0, 2427.0, 3678.0])]
fn test_synthesize_golden(
    #[case] h: f64,
    #[case] b: f64,
    #[case] r: f64,
    #[case] expected: [f64; 4],
) {
    let f = synthesize(&Articulation::new(h, b, r));
    assert_eq!(f.0, expected, "formants for ({}, {}, {})", h, b, r);
}

#[test]
fn test_reference_vowels_match_their_articulations() {
    let schwa = ReferenceVowel::Schwa.vowel();
    assert_eq!(schwa.formants().0, [399.0, 1352.0, 2061.0, 3096.0]);
    assert_eq!("schwa".parse::<ReferenceVowel>().unwrap(), ReferenceVowel::Schwa);
    assert_eq!("U".parse::<ReferenceVowel>().unwrap(), ReferenceVowel::U);
}

// --- BARK ---
#[rstest]
#[case(161.0, 1.0)] // linear branch
#[case(271.32, (271.32 - 51.0) / 110.0)] // boundary stays linear
#[case(1000.0, 9.588460400839)]
fn test_bark(#[case] hz: f64, #[case] expected: f64) {
    assert!((bark(hz) - expected).abs() < 1e-9, "bark({}) = {}", hz, bark(hz));
}

// --- F2' CASES ---
#[rstest]
#[case::gap_above_c(0.0, 0.5, 0.0, 10.96055070754068)]
#[case::f4_far(0.5, 0.5, 0.5, 11.709855360025374)]
#[case::f3_nearer_f2(0.5, 0.0, 0.0, 13.952757057575697)]
#[case::f3_nearer_f4(1.0, 0.0, 0.0, 15.61792781271036)]
fn test_effective_f2_cases(
    #[case] h: f64,
    #[case] b: f64,
    #[case] r: f64,
    #[case] expected: f64,
) {
    let f = synthesize(&Articulation::new(h, b, r));
    assert!(
        (effective_f2(&f) - expected).abs() < 1e-9,
        "F2' = {}",
        effective_f2(&f)
    );
}

#[test]
fn test_wide_f3_gap_uses_f2_directly() {
    let f = synthesize(&Articulation::new(0.0, 0.5, 0.0));
    assert_eq!(effective_f2(&f), bark(f.f2()));
}

// --- DISTANCES ---
#[test]
fn test_identical_vowels_have_zero_distance() {
    let a = Vowel::new(Articulation::new(0.3, 0.7, 0.2));
    let b = a;
    assert_eq!(articulatory_distance(a.articulation(), b.articulation()), 0.0);
    assert_eq!(perceptual_distance(a.formants(), b.formants(), 0.3), 0.0);
}

#[test]
fn test_identical_vowels_are_merge_eligible_by_default() {
    let cfg = SimConfig::default();
    let v = Vowel::new(Articulation::new(0.9, 0.1, 0.4));
    let mut agent = Agent::new(1);
    let mut obs = vowelforge::events::NullObserver;
    agent.add_new_vowel(v, &mut obs);
    agent.add_new_vowel(v, &mut obs);
    assert_eq!(agent.merge_candidates(&cfg), vec![(1, 2)]);
}

#[test]
fn test_lambda_scales_only_the_f2_prime_term() {
    let a = synthesize(&Articulation::new(1.0, 0.0, 0.0));
    let b = synthesize(&Articulation::new(1.0, 1.0, 1.0));
    let d1 = bark(a.f1()) - bark(b.f1());
    assert!((perceptual_distance(&a, &b, 0.0) - d1.abs()).abs() < 1e-12);
    assert!(perceptual_distance(&a, &b, 1.0) > perceptual_distance(&a, &b, 0.3));
}

#[test]
fn test_perceptual_distance_ignores_differences_outside_f1_and_f2_prime() {
    // Same bark F1 and same F2' when F3 is far from F2 (F2' == F2).
    let a = Formants([500.0, 1000.0, 2500.0, 3500.0]);
    let b = Formants([500.0, 1000.0, 2600.0, 3700.0]);
    assert_eq!(perceptual_distance(&a, &b, 0.3), 0.0);
}

#[test]
fn test_articulatory_distance_is_euclidean() {
    let a = Articulation::new(0.0, 0.0, 0.0);
    let b = Articulation::new(1.0, 1.0, 1.0);
    assert!((articulatory_distance(&a, &b) - 3f64.sqrt()).abs() < 1e-12);
}
