pub mod acoustics;
pub mod agent;
pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod reference;
pub mod snapshot;
pub mod vowel;
