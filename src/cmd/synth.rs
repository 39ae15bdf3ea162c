use crate::reports;
use clap::Args;
use std::str::FromStr;
use vowelforge::acoustics::Articulation;
use vowelforge::error::{SimError, SimResult};
use vowelforge::reference::{all_reference_vowels, ReferenceVowel};
use vowelforge::vowel::Vowel;

#[derive(Args, Debug, Clone)]
pub struct SynthArgs {
    /// Only show this reference vowel (i, e, a, o, u, schwa)
    #[arg(long)]
    pub vowel: Option<String>,

    /// Synthesise a custom articulation given as "height,backness,rounding"
    #[arg(short, long)]
    pub articulation: Option<String>,
}

pub fn run(args: SynthArgs) -> SimResult<()> {
    let rows: Vec<(String, Vowel)> = if let Some(spec) = &args.articulation {
        let art = parse_articulation(spec)?;
        vec![("custom".to_string(), Vowel::new(art))]
    } else if let Some(name) = &args.vowel {
        let r = ReferenceVowel::from_str(name)
            .map_err(|_| SimError::Config(format!("unknown reference vowel '{}'", name)))?;
        vec![(r.to_string(), r.vowel())]
    } else {
        all_reference_vowels()
            .into_iter()
            .map(|(r, v)| (r.to_string(), v))
            .collect()
    };

    reports::print_formant_table(&rows);
    Ok(())
}

fn parse_articulation(s: &str) -> SimResult<Articulation> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(SimError::Config(format!(
            "--articulation requires 3 values, got {}",
            parts.len()
        )));
    }
    let mut v = [0.0; 3];
    for (slot, p) in v.iter_mut().zip(&parts) {
        *slot = p
            .parse()
            .map_err(|_| SimError::Config(format!("invalid number '{}' in --articulation", p)))?;
    }
    let art = Articulation::from_array(v);
    if !art.is_valid() {
        return Err(SimError::Config(format!(
            "articulation {:?} lies outside [0, 1]",
            v
        )));
    }
    Ok(art)
}
