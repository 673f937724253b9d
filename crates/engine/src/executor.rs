//! Scenario execution: ordered steps, accumulated state, guaranteed teardown

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::driver::DriverSession;
use crate::error::{EngineError, EngineResult};
use crate::log::{LogEntry, StepLog};
use crate::money::Money;
use crate::report::ReportEmitter;
use crate::scenario::{Capture, Expectation, Scenario, Step, StepAction};
use crate::state::ScenarioState;
use crate::wait;

/// How often wait steps re-probe the page
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Terminal outcome of one scenario run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Passed,
    Failed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Passed => write!(f, "PASSED"),
            RunStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Everything a run leaves behind: status, failure message if any, and the
/// full step log up to the point of termination. Created once, at
/// finalization, and handed to the report emitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub scenario: String,
    pub status: RunStatus,
    pub failure: Option<String>,
    pub entries: Vec<LogEntry>,
    pub duration_ms: u64,
}

impl RunResult {
    pub fn passed(&self) -> bool {
        self.status == RunStatus::Passed
    }
}

/// Drives one scenario against a live driver session.
///
/// The runner owns the session for the duration of the run and closes it
/// on every exit path.
pub struct ScenarioRunner<S> {
    session: S,
    poll_interval: Duration,
}

impl<S: DriverSession> ScenarioRunner<S> {
    pub fn new(session: S) -> Self {
        Self {
            session,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the wait-poll interval. Mostly useful to keep tests fast.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Run every step in order, then unconditionally close the session and
    /// emit the report.
    ///
    /// The first failing step (locator miss, wait expiry, assertion
    /// mismatch, backend fault) stops the pass; its message is folded into
    /// the result rather than propagated, so this always returns a
    /// [`RunResult`]. A teardown problem is logged and never masks the run
    /// outcome.
    pub async fn run(mut self, scenario: &Scenario, emitter: &dyn ReportEmitter) -> RunResult {
        let started = Instant::now();
        let mut state = ScenarioState::new();
        let mut log = StepLog::new();
        let mut failure: Option<String> = None;

        debug!("running scenario: {}", scenario.name);

        for step in &scenario.steps {
            match self.execute_step(step, &mut state).await {
                Ok(()) => log.record(step.label.as_str()),
                Err(e) => {
                    let message = e.to_string();
                    log.record(format!("Step \"{}\" failed: {message}", step.label));
                    failure = Some(message);
                    break;
                }
            }
        }

        if let Err(e) = self.session.close().await {
            warn!("failed to close driver session: {e}");
        }

        let status = if failure.is_none() {
            RunStatus::Passed
        } else {
            RunStatus::Failed
        };
        let result = RunResult {
            scenario: scenario.name.clone(),
            status,
            failure,
            entries: log.into_entries(),
            duration_ms: started.elapsed().as_millis() as u64,
        };

        if let Err(e) = emitter.emit(&result) {
            error!("failed to emit report for {}: {e}", scenario.name);
        }

        result
    }

    async fn execute_step(&self, step: &Step, state: &mut ScenarioState) -> EngineResult<()> {
        debug!("executing: {}", step.label);
        let observed = self.perform(&step.action, state).await?;
        if let Some(expect) = &step.expect {
            check_expectation(expect, &observed, state)?;
        }
        Ok(())
    }

    async fn perform(
        &self,
        action: &StepAction,
        state: &mut ScenarioState,
    ) -> EngineResult<Observed> {
        match action {
            StepAction::Navigate { url } => {
                self.session.navigate(url).await?;
                Ok(Observed::None)
            }
            StepAction::Type { locator, text } => {
                self.session.type_text(locator, text).await?;
                Ok(Observed::None)
            }
            StepAction::Click { locator } => {
                self.session.click(locator).await?;
                Ok(Observed::None)
            }
            StepAction::Select { locator, value } => {
                self.session.select_value(locator, value).await?;
                Ok(Observed::None)
            }
            StepAction::WaitVisible { locator, timeout_ms } => {
                let session = &self.session;
                let satisfied = wait::wait_for(
                    || session.is_visible(locator),
                    Duration::from_millis(*timeout_ms),
                    self.poll_interval,
                )
                .await?;
                if satisfied {
                    Ok(Observed::None)
                } else {
                    Err(EngineError::WaitTimeout {
                        what: locator.to_string(),
                        timeout_ms: *timeout_ms,
                    })
                }
            }
            StepAction::ReadText { locator, capture } => {
                let text = self.session.read_text(locator).await?;
                debug!("observed text at {locator}: {text:?}");
                match capture {
                    Some(Capture::Amount { key }) => {
                        let amount = Money::parse(&text)?;
                        state.add_amount(key, amount);
                    }
                    Some(Capture::Text { key }) => state.remember(key, text.clone()),
                    None => {}
                }
                Ok(Observed::Text(text))
            }
            StepAction::Count { locator } => {
                let found = self.session.count(locator).await?;
                debug!("counted {found} element(s) at {locator}");
                Ok(Observed::Count(found))
            }
        }
    }
}

/// Value a step action produced for its expectation to check
enum Observed {
    None,
    Text(String),
    Count(usize),
}

fn check_expectation(
    expect: &Expectation,
    observed: &Observed,
    state: &ScenarioState,
) -> EngineResult<()> {
    match (expect, observed) {
        (Expectation::TextEquals(wanted), Observed::Text(text)) => {
            if text == wanted {
                Ok(())
            } else {
                Err(mismatch(wanted, text))
            }
        }
        (Expectation::TextContains(wanted), Observed::Text(text)) => {
            if text.contains(wanted.as_str()) {
                Ok(())
            } else {
                Err(mismatch(wanted, text))
            }
        }
        (Expectation::MatchesRemembered { key }, Observed::Text(text)) => {
            let wanted = state.recall(key).ok_or_else(|| {
                EngineError::Scenario(format!("nothing remembered under key {key:?}"))
            })?;
            if text == wanted {
                Ok(())
            } else {
                Err(mismatch(wanted, text))
            }
        }
        (Expectation::TotalEquals { key, surcharge }, Observed::Text(text)) => {
            let expected = format!("Total: {}", state.total(key) + *surcharge);
            if text.contains(&expected) {
                Ok(())
            } else {
                Err(mismatch(&expected, text))
            }
        }
        (Expectation::CountEquals(wanted), Observed::Count(found)) => {
            if found == wanted {
                Ok(())
            } else {
                Err(mismatch(&wanted.to_string(), &found.to_string()))
            }
        }
        (other, _) => Err(EngineError::Scenario(format!(
            "step produced no value for its expectation {other:?}"
        ))),
    }
}

fn mismatch(expected: &str, observed: &str) -> EngineError {
    EngineError::AssertionMismatch {
        expected: expected.to_string(),
        observed: observed.to_string(),
    }
}
