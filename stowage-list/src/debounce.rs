//! Debounced search trigger.
//!
//! A [`Debouncer`] is fed every change of a live search input and calls its
//! callback with the trimmed query once the input has been quiet for the
//! configured delay. Only the most recent timer is ever alive.

use crate::lock;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(300);

pub type SearchCallback = Arc<dyn Fn(String) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceOptions {
    pub delay: Duration,
    /// Record the first observed value without firing for it.
    pub skip_initial: bool,
}

impl Default for DebounceOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_SEARCH_DELAY,
            skip_initial: true,
        }
    }
}

impl DebounceOptions {
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_skip_initial(mut self, skip_initial: bool) -> Self {
        self.skip_initial = skip_initial;
        self
    }
}

/// Timer-backed search trigger.
///
/// Timers run as Tokio tasks, so [`observe`](Self::observe) must be called from
/// within a runtime. Dropping the debouncer aborts the outstanding timer.
pub struct Debouncer {
    options: DebounceOptions,
    callback: Arc<Mutex<SearchCallback>>,
    last_seen: Option<String>,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(options: DebounceOptions, callback: SearchCallback) -> Self {
        Self {
            options,
            callback: Arc::new(Mutex::new(callback)),
            last_seen: None,
            pending: None,
        }
    }

    pub fn options(&self) -> DebounceOptions {
        self.options
    }

    /// Swaps the callback. A timer that is already scheduled calls the new one.
    pub fn set_callback(&self, callback: SearchCallback) {
        *lock(&self.callback) = callback;
    }

    /// Changing the options drops the outstanding timer.
    pub fn set_options(&mut self, options: DebounceOptions) {
        if options != self.options {
            self.cancel();
            self.options = options;
        }
    }

    /// Feeds the current input value.
    pub fn observe(&mut self, query: &str) {
        match self.last_seen.as_deref() {
            None => {
                self.last_seen = Some(query.to_string());
                if self.options.skip_initial {
                    return;
                }
            }
            Some(previous) if previous == query => return,
            Some(_) => self.last_seen = Some(query.to_string()),
        }
        self.schedule(query.trim().to_string());
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn schedule(&mut self, query: String) {
        self.cancel();
        let callback = Arc::clone(&self.callback);
        let delay = self.options.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let current = Arc::clone(&*lock(&callback));
            current(query);
        }));
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("options", &self.options)
            .field("last_seen", &self.last_seen)
            .field("pending", &self.is_pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording() -> (SearchCallback, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: SearchCallback = Arc::new(move |query| sink.lock().unwrap().push(query));
        (callback, seen)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_with_latest_query() {
        let (callback, seen) = recording();
        let mut debouncer = Debouncer::new(DebounceOptions::default(), callback);

        debouncer.observe("a");
        debouncer.observe("ab");

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(seen.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*seen.lock().unwrap(), vec!["ab".to_string()]);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_restarts_the_timer() {
        let (callback, seen) = recording();
        let mut debouncer = Debouncer::new(DebounceOptions::default(), callback);
        debouncer.observe("");

        debouncer.observe("д");
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.observe("др");
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.observe("дре");
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(seen.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(*seen.lock().unwrap(), vec!["дре".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_value_fires_without_skip() {
        let (callback, seen) = recording();
        let options = DebounceOptions::default()
            .with_skip_initial(false)
            .with_delay(Duration::from_millis(50));
        let mut debouncer = Debouncer::new(options, callback);

        debouncer.observe("   ");
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(*seen.lock().unwrap(), vec![String::new()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_value_does_not_reschedule() {
        let (callback, seen) = recording();
        let mut debouncer = Debouncer::new(DebounceOptions::default(), callback);
        debouncer.observe("x");
        debouncer.observe("x");
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(seen.lock().unwrap().is_empty());
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_callback_is_used() {
        let (first, first_seen) = recording();
        let (second, second_seen) = recording();
        let mut debouncer = Debouncer::new(DebounceOptions::default(), first);

        debouncer.observe("");
        debouncer.observe(" шуруп ");
        debouncer.set_callback(second);
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert!(first_seen.lock().unwrap().is_empty());
        assert_eq!(*second_seen.lock().unwrap(), vec!["шуруп".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timer() {
        let (callback, seen) = recording();
        let mut debouncer = Debouncer::new(DebounceOptions::default(), callback);
        debouncer.observe("");
        debouncer.observe("лампа");
        assert!(debouncer.is_pending());
        drop(debouncer);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(seen.lock().unwrap().is_empty());
    }
}
