pub mod config;
pub mod consts;
pub mod error;
pub mod evaluator;
pub mod record;
pub mod recorder;
pub mod scorer;
pub mod sequence;
pub mod session;
pub mod simulation;
pub mod stimulus;
// cmd and reports belong to the binary crate (see main.rs).
