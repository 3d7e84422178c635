use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Cancellable fixed-rate timer driving game ticks.
///
/// While stopped, `tick()` never completes, so it can sit in a `select!`
/// next to the other event sources. The first tick arrives one full period
/// after `start`, and late ticks are delayed rather than bunched up.
pub struct Ticker {
    period: Duration,
    interval: Option<Interval>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// (Re)start from now. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    pub fn cancel(&mut self) {
        self.interval = None;
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    const PERIOD: Duration = Duration::from_millis(200);

    #[tokio::test(start_paused = true)]
    async fn test_stopped_ticker_never_fires() {
        let mut ticker = Ticker::new(PERIOD);
        assert!(!ticker.is_running());
        assert!(timeout(Duration::from_secs(5), ticker.tick()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let mut ticker = Ticker::new(PERIOD);
        let begin = Instant::now();
        ticker.start();

        ticker.tick().await;
        assert_eq!(begin.elapsed(), PERIOD);

        ticker.tick().await;
        assert_eq!(begin.elapsed(), PERIOD * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let mut ticker = Ticker::new(PERIOD);
        ticker.start();
        ticker.tick().await;

        ticker.cancel();
        assert!(!ticker.is_running());
        assert!(timeout(PERIOD * 10, ticker.tick()).await.is_err());

        ticker.start();
        assert!(timeout(PERIOD * 2, ticker.tick()).await.is_ok());
    }
}
