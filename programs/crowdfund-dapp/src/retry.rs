use std::fmt::Display;
use std::time::Duration;

use anchor_lang::prelude::*;

pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Blocks the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Call `op` until it succeeds or `max_attempts` calls have failed.
///
/// After failed attempt `n` the wait is `n * base_delay`. The last error is
/// returned unchanged. A `max_attempts` of zero still makes one call.
pub fn with_retry<T, E, S, F>(
    max_attempts: u32,
    base_delay: Duration,
    sleeper: &S,
    mut op: F,
) -> std::result::Result<T, E>
where
    E: Display,
    S: Sleeper + ?Sized,
    F: FnMut(u32) -> std::result::Result<T, E>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= max_attempts => {
                msg!("giving up after {} attempts: {}", attempt, err);
                return Err(err);
            }
            Err(err) => {
                msg!("attempt {}/{} failed: {}", attempt, max_attempts, err);
                sleeper.sleep(base_delay.saturating_mul(attempt));
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct RecordingSleeper {
        waits: RefCell<Vec<Duration>>,
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.waits.borrow_mut().push(duration);
        }
    }

    const BASE: Duration = Duration::from_millis(100);

    #[test]
    fn succeeds_after_two_failures() {
        let sleeper = RecordingSleeper::default();
        let mut calls = 0;

        let result = with_retry(3, BASE, &sleeper, |attempt| {
            calls += 1;
            if attempt < 3 {
                Err(format!("failure {attempt}"))
            } else {
                Ok("campaigns")
            }
        });

        assert_eq!(result, Ok("campaigns"));
        assert_eq!(calls, 3);
        assert_eq!(*sleeper.waits.borrow(), vec![BASE, BASE * 2]);
    }

    #[test]
    fn returns_last_error_when_exhausted() {
        let sleeper = RecordingSleeper::default();

        let result: std::result::Result<(), String> =
            with_retry(3, BASE, &sleeper, |attempt| Err(format!("failure {attempt}")));

        assert_eq!(result, Err("failure 3".to_string()));
        assert_eq!(*sleeper.waits.borrow(), vec![BASE, BASE * 2]);
    }

    #[test]
    fn first_success_does_not_sleep() {
        let sleeper = RecordingSleeper::default();
        let result: std::result::Result<u8, String> = with_retry(5, BASE, &sleeper, |_| Ok(1));
        assert_eq!(result, Ok(1));
        assert!(sleeper.waits.borrow().is_empty());
    }

    #[test]
    fn zero_attempts_still_calls_once() {
        let sleeper = RecordingSleeper::default();
        let mut calls = 0;
        let result: std::result::Result<(), &str> = with_retry(0, BASE, &sleeper, |_| {
            calls += 1;
            Err("down")
        });
        assert_eq!(result, Err("down"));
        assert_eq!(calls, 1);
        assert!(sleeper.waits.borrow().is_empty());
    }
}
