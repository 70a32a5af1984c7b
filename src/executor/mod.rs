//! Scenario execution module

mod runner;

pub use runner::ScenarioRunner;
