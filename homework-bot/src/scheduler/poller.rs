//! Status poller
//!
//! Runs the poll loop as a small state machine:
//! `Polling → (Succeeded | Failed) → Sleeping → Polling …`
//!
//! Each iteration fetches statuses from the current watermark, validates the
//! payload, extracts the newest homework entry and hands it to the
//! notification gate. Errors never leave the loop: they are logged and the
//! poller sleeps the fixed retry period like after any other iteration.
//!
//! The watermark only moves forward once an iteration has fully succeeded, so
//! a failed delivery or a rejected record is looked at again on the next poll.

use homework_core::domain::poll_state::PollState;
use homework_core::extract::extract;
use homework_core::validate::validate;
use homework_core::{PollError, Result, Severity};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::repository::{ChatRepository, ReviewRepository};
use crate::scheduler::timer::Timer;
use crate::service::{GateDecision, NotificationGate};

/// Where the poller is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    Polling,
    Succeeded,
    Failed,
    Sleeping,
}

/// Result of a successful iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    /// A status change was delivered to the chat
    Notified,
    /// The newest entry was already delivered
    Unchanged,
    /// The response carried no homework entries
    NothingNew,
}

/// Polls the review API and forwards status changes to the chat
pub struct StatusPoller {
    retry_period: Duration,
    review: Arc<dyn ReviewRepository>,
    gate: NotificationGate,
    timer: Arc<dyn Timer>,
    state: PollState,
    phase: PollPhase,
}

impl StatusPoller {
    /// Creates a new poller with the watermark set to now
    pub fn new(
        retry_period: Duration,
        review: Arc<dyn ReviewRepository>,
        chat: Arc<dyn ChatRepository>,
        timer: Arc<dyn Timer>,
    ) -> Self {
        Self {
            retry_period,
            review,
            gate: NotificationGate::new(chat),
            timer,
            state: PollState::starting_now(),
            phase: PollPhase::Polling,
        }
    }

    /// Overrides the starting watermark
    #[cfg(test)]
    pub fn with_state(mut self, state: PollState) -> Self {
        self.state = state;
        self
    }

    #[cfg(test)]
    pub fn state(&self) -> PollState {
        self.state
    }

    #[cfg(test)]
    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    #[cfg(test)]
    pub fn gate(&self) -> &NotificationGate {
        &self.gate
    }

    /// Starts the polling loop
    ///
    /// Never returns; stop it by dropping the future.
    pub async fn run(&mut self) {
        info!(
            "Starting status poller (interval: {:?}, from_date: {})",
            self.retry_period, self.state.timestamp
        );

        loop {
            // Failures are already logged by `tick`
            let _ = self.tick().await;
        }
    }

    /// Runs one full cycle: poll, report, sleep
    pub async fn tick(&mut self) -> Result<IterationOutcome> {
        let result = self.run_once().await;

        self.phase = PollPhase::Sleeping;
        self.timer.sleep(self.retry_period).await;
        self.phase = PollPhase::Polling;

        result
    }

    /// Polls once and logs the outcome, without sleeping afterwards
    pub async fn run_once(&mut self) -> Result<IterationOutcome> {
        let result = self.poll_once().await;

        self.phase = match &result {
            Ok(_) => PollPhase::Succeeded,
            Err(_) => PollPhase::Failed,
        };
        report(&result);

        result
    }

    /// Performs a single poll without sleeping
    #[tracing::instrument(skip(self), fields(from_date = self.state.timestamp))]
    pub async fn poll_once(&mut self) -> Result<IterationOutcome> {
        self.phase = PollPhase::Polling;

        let payload = self.review.fetch(self.state.timestamp).await?;
        let next_state = self.state.next_from(&payload);
        let homeworks = validate(&payload)?;

        if homeworks.len() > 1 {
            debug!(
                "Response carries {} homework entries, only the first is considered",
                homeworks.len()
            );
        }

        let outcome = match extract(homeworks.first()) {
            Ok(record) => match self.gate.process(&record).await? {
                GateDecision::Delivered => IterationOutcome::Notified,
                GateDecision::Unchanged => IterationOutcome::Unchanged,
            },
            Err(PollError::EmptyInput) => {
                debug!("No new status: the homework list is empty");
                IterationOutcome::NothingNew
            }
            Err(e) => return Err(e),
        };

        // Committed last: a rejected record or failed delivery is fetched again
        // next poll, at the cost of re-reporting it until it is fixed upstream
        self.state = next_state;
        Ok(outcome)
    }
}

fn report(result: &Result<IterationOutcome>) {
    let error = match result {
        Ok(outcome) => {
            debug!("Poll cycle finished: {:?}", outcome);
            return;
        }
        Err(e) => e,
    };

    let kind = match error {
        PollError::Transport(_) => "transport",
        PollError::UnexpectedStatus { .. } => "http_status",
        PollError::Shape(_) | PollError::MissingField(_) => "validation",
        PollError::UnknownStatus(_) => "unknown_status",
        PollError::EmptyInput => "empty",
        PollError::Notification { .. } => "delivery",
        PollError::Unexpected(_) => "unexpected",
    };

    match error.severity() {
        Severity::Critical => {
            error!(severity = "critical", kind, "Bot failure: {}", error)
        }
        Severity::Quiet => debug!(kind, "{}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use homework_core::domain::homework::HomeworkStatus;
    use serde_json::{Value as JsonValue, json};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    const START: i64 = 1_000;

    #[derive(Default)]
    struct ScriptedReview {
        responses: Mutex<VecDeque<Result<JsonValue>>>,
        requested: Mutex<Vec<i64>>,
    }

    impl ScriptedReview {
        fn push(&self, response: Result<JsonValue>) {
            self.responses.lock().unwrap().push_back(response);
        }

        fn requested(&self) -> Vec<i64> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReviewRepository for ScriptedReview {
        async fn fetch(&self, since: i64) -> Result<JsonValue> {
            self.requested.lock().unwrap().push(since);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(PollError::Transport("no scripted response".into())))
        }
    }

    #[derive(Default)]
    struct RecordingChat {
        sent: Mutex<Vec<String>>,
        failing: AtomicBool,
    }

    impl RecordingChat {
        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatRepository for RecordingChat {
        async fn send(&self, text: &str) -> anyhow::Result<()> {
            if self.failing.load(Ordering::SeqCst) {
                anyhow::bail!("chat unavailable");
            }
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingTimer {
        sleeps: AtomicUsize,
    }

    #[async_trait]
    impl Timer for CountingTimer {
        async fn sleep(&self, period: Duration) {
            assert_eq!(period, Duration::from_secs(600));
            self.sleeps.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct Harness {
        review: Arc<ScriptedReview>,
        chat: Arc<RecordingChat>,
        timer: Arc<CountingTimer>,
        poller: StatusPoller,
    }

    fn harness() -> Harness {
        let review = Arc::new(ScriptedReview::default());
        let chat = Arc::new(RecordingChat::default());
        let timer = Arc::new(CountingTimer::default());
        let poller = StatusPoller::new(
            Duration::from_secs(600),
            review.clone(),
            chat.clone(),
            timer.clone(),
        )
        .with_state(PollState::new(START));

        Harness {
            review,
            chat,
            timer,
            poller,
        }
    }

    fn answer(name: &str, status: &str, current_date: i64) -> Result<JsonValue> {
        Ok(json!({
            "homeworks": [{"homework_name": name, "status": status}],
            "current_date": current_date
        }))
    }

    #[tokio::test]
    async fn test_identical_polls_notify_once() {
        let mut h = harness();
        for i in 0..4 {
            h.review.push(answer("hw1", "reviewing", START + i));
        }

        let mut outcomes = Vec::new();
        for _ in 0..4 {
            outcomes.push(h.poller.tick().await.unwrap());
        }

        assert_eq!(
            outcomes,
            vec![
                IterationOutcome::Notified,
                IterationOutcome::Unchanged,
                IterationOutcome::Unchanged,
                IterationOutcome::Unchanged,
            ]
        );
        assert_eq!(h.chat.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_status_change_is_forwarded() {
        let mut h = harness();
        h.review.push(answer("hw1", "reviewing", 1_100));
        h.review.push(answer("hw1", "rejected", 1_200));

        h.poller.tick().await.unwrap();
        h.poller.tick().await.unwrap();

        let sent = h.chat.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[1].contains("hw1"));
        assert!(sent[1].contains(HomeworkStatus::Rejected.verdict()));
        assert_eq!(
            h.poller.gate().memory().last(),
            Some(("hw1", HomeworkStatus::Rejected))
        );
    }

    #[tokio::test]
    async fn test_failed_delivery_is_retried_next_poll() {
        let mut h = harness();
        h.review.push(answer("hw1", "reviewing", 1_100));
        h.review.push(answer("hw1", "rejected", 1_200));
        h.review.push(answer("hw1", "rejected", 1_200));

        h.poller.tick().await.unwrap();

        h.chat.failing.store(true, Ordering::SeqCst);
        let error = h.poller.tick().await.unwrap_err();
        assert!(matches!(error, PollError::Notification { .. }));
        assert_eq!(
            h.poller.gate().memory().last(),
            Some(("hw1", HomeworkStatus::Reviewing))
        );
        assert_eq!(h.poller.state().timestamp, 1_100);

        h.chat.failing.store(false, Ordering::SeqCst);
        assert_eq!(h.poller.tick().await.unwrap(), IterationOutcome::Notified);
        assert_eq!(
            h.poller.gate().memory().last(),
            Some(("hw1", HomeworkStatus::Rejected))
        );
        assert_eq!(h.review.requested(), vec![START, 1_100, 1_100]);
    }

    #[tokio::test]
    async fn test_empty_list_advances_watermark_quietly() {
        let mut h = harness();
        h.review
            .push(Ok(json!({"homeworks": [], "current_date": 1_500})));
        h.review
            .push(Ok(json!({"homeworks": [], "current_date": 1_600})));

        assert_eq!(h.poller.tick().await.unwrap(), IterationOutcome::NothingNew);
        assert_eq!(h.poller.phase(), PollPhase::Polling);
        assert_eq!(h.poller.state().timestamp, 1_500);

        h.poller.tick().await.unwrap();
        assert!(h.chat.sent().is_empty());
        assert_eq!(h.review.requested(), vec![START, 1_500]);
    }

    #[tokio::test]
    async fn test_unknown_status_does_not_stop_the_loop() {
        let mut h = harness();
        h.review.push(answer("hw1", "archived", 1_100));
        h.review.push(answer("hw1", "approved", 1_200));

        let error = h.poller.tick().await.unwrap_err();
        assert_eq!(error.severity(), Severity::Critical);
        assert!(matches!(error, PollError::UnknownStatus(ref s) if s == "archived"));
        assert_eq!(h.poller.state().timestamp, START);
        assert_eq!(h.poller.gate().memory().last(), None);

        assert_eq!(h.poller.tick().await.unwrap(), IterationOutcome::Notified);
        assert_eq!(h.review.requested(), vec![START, START]);
    }

    #[tokio::test]
    async fn test_shape_violations_leave_state_untouched() {
        let mut h = harness();
        h.review.push(Ok(json!([{"homework_name": "hw1"}])));
        h.review.push(Ok(json!({"homeworks": []})));

        let first = h.poller.tick().await.unwrap_err();
        assert!(matches!(first, PollError::Shape("not a mapping")));

        let second = h.poller.tick().await.unwrap_err();
        assert!(matches!(second, PollError::MissingField("current_date")));

        assert_eq!(h.poller.state().timestamp, START);
        assert_eq!(h.review.requested(), vec![START, START]);
        assert!(h.chat.sent().is_empty());
    }

    #[tokio::test]
    async fn test_non_integer_current_date_keeps_watermark() {
        let mut h = harness();
        h.review
            .push(Ok(json!({"homeworks": [], "current_date": "yesterday"})));

        assert_eq!(h.poller.tick().await.unwrap(), IterationOutcome::NothingNew);
        assert_eq!(h.poller.state().timestamp, START);
    }

    #[tokio::test]
    async fn test_only_first_homework_is_considered() {
        // Later entries in the same response are ignored, even if they changed
        let mut h = harness();
        h.review.push(Ok(json!({
            "homeworks": [
                {"homework_name": "hw2", "status": "approved"},
                {"homework_name": "hw1", "status": "rejected"}
            ],
            "current_date": 1_100
        })));

        h.poller.tick().await.unwrap();

        let sent = h.chat.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("hw2"));
        assert!(!sent[0].contains("hw1"));
    }

    #[tokio::test]
    async fn test_sleeps_after_every_iteration() {
        let mut h = harness();
        h.review.push(answer("hw1", "reviewing", 1_100));
        h.review.push(Err(PollError::UnexpectedStatus {
            status: 503,
            headers: vec![],
            body: "maintenance".to_string(),
        }));
        h.review
            .push(Err(PollError::Transport("connection reset".to_string())));

        assert!(h.poller.tick().await.is_ok());
        assert!(h.poller.tick().await.is_err());
        assert!(h.poller.tick().await.is_err());

        assert_eq!(h.timer.sleeps.load(Ordering::SeqCst), 3);
        assert_eq!(h.poller.phase(), PollPhase::Polling);
    }

    #[tokio::test]
    async fn test_run_once_records_failure_phase() {
        let mut h = harness();
        h.review.push(Ok(json!({"current_date": 1_100})));

        let error = h.poller.run_once().await.unwrap_err();
        assert!(matches!(error, PollError::MissingField("homeworks")));
        assert_eq!(h.poller.phase(), PollPhase::Failed);
        assert_eq!(h.timer.sleeps.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_poll_once_does_not_sleep() {
        let mut h = harness();
        h.review.push(answer("hw1", "reviewing", 1_100));

        h.poller.poll_once().await.unwrap();

        assert_eq!(h.timer.sleeps.load(Ordering::SeqCst), 0);
        assert_eq!(h.poller.state().timestamp, 1_100);
    }
}
