use clap::{CommandFactory, FromArgMatches, Parser};
use std::io::Write;
use vowelforge::config::SimConfig;
use vowelforge::error::SimError;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: SimConfig,
}

fn parse(args: &[&str]) -> (SimConfig, clap::ArgMatches) {
    let matches = TestCli::command()
        .try_get_matches_from(std::iter::once("test").chain(args.iter().copied()))
        .unwrap();
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.config, matches)
}

#[test]
fn test_defaults_match_cli_defaults() {
    let (cli, _) = parse(&[]);
    let def = SimConfig::default();
    assert_eq!(cli, def);

    assert_eq!(def.game.n_its, 10_000);
    assert_eq!(def.game.n_agents, 5);
    assert_eq!(def.game.store_ivl, 100);
    assert_eq!(def.inventory.min_uses_discard, 5);
    assert_eq!(def.inventory.artic_merge_thresh, 0.17);
    assert_eq!(def.acoustics.lambda, 0.3);
    assert!(def.validate().is_ok());
}

#[test]
fn test_camel_case_aliases_are_accepted() {
    let (cli, _) = parse(&["--nAgents", "7", "--L", "0.5", "--articEps", "0.01"]);
    assert_eq!(cli.game.n_agents, 7);
    assert_eq!(cli.acoustics.lambda, 0.5);
    assert_eq!(cli.acoustics.artic_eps, 0.01);
}

#[test]
fn test_validate_rejects_bad_values() {
    let cases: Vec<fn(&mut SimConfig)> = vec![
        |c: &mut SimConfig| c.game.n_agents = 1,
        |c: &mut SimConfig| c.game.n_its = 0,
        |c: &mut SimConfig| c.game.store_ivl = 0,
        |c: &mut SimConfig| c.acoustics.noise = 2.0,
        |c: &mut SimConfig| c.acoustics.artic_eps = 0.0,
        |c: &mut SimConfig| c.inventory.addition_prob = 1.5,
        |c: &mut SimConfig| c.inventory.discard_thresh = f64::NAN,
        |c: &mut SimConfig| c.acoustics.lambda = -0.1,
    ];
    for (i, mutate) in cases.into_iter().enumerate() {
        let mut cfg = SimConfig::default();
        mutate(&mut cfg);
        match cfg.validate() {
            Err(SimError::Config(_)) => {}
            other => panic!("case {} should fail validation, got {:?}", i, other),
        }
    }
}

#[test]
fn test_load_partial_params_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "game": {{ "n_agents": 10, "seed": 4 }}, "acoustics": {{ "noise": 0.05 }} }}"#
    )
    .unwrap();

    let cfg = SimConfig::load_from_file(file.path()).unwrap();
    assert_eq!(cfg.game.n_agents, 10);
    assert_eq!(cfg.game.seed, Some(4));
    assert_eq!(cfg.acoustics.noise, 0.05);
    // Missing keys fall back to defaults.
    assert_eq!(cfg.game.n_its, 10_000);
    assert_eq!(cfg.inventory, SimConfig::default().inventory);
}

#[test]
fn test_malformed_params_file_is_a_json_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    assert!(matches!(
        SimConfig::load_from_file(file.path()),
        Err(SimError::Json(_))
    ));
}

#[test]
fn test_missing_params_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        SimConfig::load_from_file(dir.path().join("absent.json")),
        Err(SimError::Io(_))
    ));
}

#[test]
fn test_command_line_overrides_file_values_only_when_typed() {
    let mut from_file = SimConfig::default();
    from_file.game.n_agents = 10;
    from_file.game.n_its = 500;
    from_file.acoustics.noise = 0.2;

    let (cli, matches) = parse(&["--n-its", "42", "--seed", "9"]);
    from_file.merge_from_cli(&cli, &matches);

    assert_eq!(from_file.game.n_its, 42);
    assert_eq!(from_file.game.seed, Some(9));
    // Not typed: the file value survives even though the CLI default differs.
    assert_eq!(from_file.game.n_agents, 10);
    assert_eq!(from_file.acoustics.noise, 0.2);
}
