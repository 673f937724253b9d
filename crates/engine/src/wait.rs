//! Bounded polling for conditions that become true after a delay

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::time::sleep;

/// Poll `probe` until it reports true or `timeout` elapses.
///
/// Returns `Ok(true)` once the condition holds, `Ok(false)` if the bound
/// expired first. A probe error ends the wait immediately; errors are not
/// retried. The final sleep is clamped so the wait never runs meaningfully
/// past its deadline.
pub async fn wait_for<F, Fut, E>(
    mut probe: F,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<bool, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if probe().await? {
            return Ok(true);
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(false);
        }
        sleep(poll_interval.min(deadline - now)).await;
    }
}
