//! Review scheduling core: repeat-batch sampling, quiz scoring, session
//! aggregation and the level/interval update engine.

pub mod engine;
pub mod leveling;
pub mod scoring;
pub mod selector;
pub mod session;
