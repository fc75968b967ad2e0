use log::info;
use std::thread;
use std::time::Duration;

/// Wait between reloads when the results header is missing.
pub const RESULTS_RETRY_DELAY: Duration = Duration::from_secs(15);

/// Wait before moving on after a keyword yields no results.
pub const NO_RESULTS_DELAY: Duration = Duration::from_secs(15);

/// Wait after each scroll so lazy-loaded listings can render.
pub const SCROLL_SETTLE_DELAY: Duration = Duration::from_secs(5);

/// Fixed blocking wait. No jitter: the whole retry policy is
/// fixed-delay / fixed-attempt-count.
pub fn pause(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    info!("Waiting for {} seconds...", delay.as_secs());
    thread::sleep(delay);
}
