//! Shopwalk scenario engine
//!
//! Drives a remote storefront UI through scripted user journeys and writes
//! a durable report for every run, pass or fail.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ScenarioRunner                          │
//! │   run(scenario) ── step by step ──▶ DriverSession           │
//! │       │     navigate / type / click / select / read / wait  │
//! │       ├──▶ ScenarioState   (running totals, remembered text)│
//! │       ├──▶ StepLog         (timestamped, append-only trail) │
//! │       └──▶ finalize: close session, emit report             │
//! ├─────────────────────────────────────────────────────────────┤
//! │   Scenario = ordered Vec<Step>                              │
//! │       Step { label, action, expect }                        │
//! │           ├── Navigate { url }                              │
//! │           ├── Type / Click / Select { locator, .. }         │
//! │           ├── WaitVisible { locator, timeout_ms }           │
//! │           ├── ReadText { locator, capture }                 │
//! │           └── Count { locator }                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first failing step aborts the pass; teardown and report emission
//! happen on every exit path. See [`executor::ScenarioRunner::run`].

pub mod driver;
pub mod error;
pub mod executor;
pub mod log;
pub mod money;
pub mod report;
pub mod scenario;
pub mod state;
pub mod wait;
pub mod webdriver;

pub use driver::{DriverError, DriverSession};
pub use error::{EngineError, EngineResult};
pub use executor::{RunResult, RunStatus, ScenarioRunner};
pub use report::{HtmlReport, ReportEmitter};
pub use scenario::{Capture, Expectation, Locator, Scenario, Step, StepAction};
