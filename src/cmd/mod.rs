pub mod run;
pub mod synth;
