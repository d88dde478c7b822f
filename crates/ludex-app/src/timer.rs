// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::time::{Duration, Instant};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(180);
pub const MENU_FEEDBACK: Duration = Duration::from_millis(140);

/// A one-shot deferred callback slot. Scheduling again replaces the
/// previous deadline; the latest call wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    delay: Duration,
    due: Option<Instant>,
}

impl Deadline {
    pub const fn new(delay: Duration) -> Self {
        Self { delay, due: None }
    }

    pub const fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    pub fn schedule(&mut self, now: Instant) {
        self.due = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    /// Consumes the deadline if it has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

/// Holds the newest value until its deadline has passed quietly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debounced<T> {
    deadline: Deadline,
    pending: Option<T>,
}

impl<T> Debounced<T> {
    pub const fn new(delay: Duration) -> Self {
        Self {
            deadline: Deadline::new(delay),
            pending: None,
        }
    }

    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.deadline.schedule(now);
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.deadline.cancel();
        self.pending.take()
    }

    pub const fn is_pending(&self) -> bool {
        self.deadline.is_pending()
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.deadline.fire_if_due(now) {
            self.pending.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Deadline, Debounced};
    use std::time::{Duration, Instant};

    const DELAY: Duration = Duration::from_millis(180);

    #[test]
    fn deadline_fires_once() {
        let start = Instant::now();
        let mut deadline = Deadline::new(DELAY);
        assert!(!deadline.fire_if_due(start + DELAY));

        deadline.schedule(start);
        assert!(!deadline.fire_if_due(start + Duration::from_millis(179)));
        assert!(deadline.fire_if_due(start + DELAY));
        assert!(!deadline.fire_if_due(start + DELAY * 2));
    }

    #[test]
    fn cancel_drops_pending_deadline() {
        let start = Instant::now();
        let mut deadline = Deadline::new(DELAY);
        deadline.schedule(start);
        deadline.cancel();
        assert!(!deadline.is_pending());
        assert!(!deadline.fire_if_due(start + DELAY));
    }

    #[test]
    fn latest_value_wins() {
        let start = Instant::now();
        let mut search = Debounced::new(DELAY);
        search.schedule("h", start);
        search.schedule("ho", start + Duration::from_millis(100));

        // The first deadline would have passed here; the second has not.
        assert_eq!(search.poll(start + Duration::from_millis(200)), None);
        assert_eq!(search.poll(start + Duration::from_millis(280)), Some("ho"));
        assert_eq!(search.poll(start + Duration::from_millis(500)), None);
    }

    #[test]
    fn cancel_returns_pending_value() {
        let start = Instant::now();
        let mut search = Debounced::new(DELAY);
        search.schedule(String::from("golf"), start);
        assert_eq!(search.cancel(), Some(String::from("golf")));
        assert!(!search.is_pending());
        assert_eq!(search.poll(start + DELAY), None);
    }
}
