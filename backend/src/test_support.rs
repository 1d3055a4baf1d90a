//! Test doubles shared by unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for `cfg(test)` or with the `test-support` feature.

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{Identity, Role, UserId};

/// Clock frozen at a chosen instant until advanced.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Clock starting at 2026-01-05T08:00:00Z.
    pub fn at_fixture_epoch() -> Self {
        Self::new(fixture_epoch())
    }

    pub fn advance_minutes(&self, minutes: i64) {
        *self.lock_clock() += TimeDelta::minutes(minutes);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Fixed instant used across fixtures.
pub fn fixture_epoch() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).single() {
        Some(instant) => instant,
        None => panic!("fixture epoch is a valid timestamp"),
    }
}

/// A fresh identity with `role` and a random id.
pub fn identity(role: Role) -> Identity {
    let label = match role {
        Role::Administrator => "admin",
        Role::Employee => "employee",
        Role::Client => "client",
    };
    Identity {
        id: UserId::random(),
        role,
        name: format!("Fixture {label}"),
        email: format!("{label}@fixture.test"),
        phone: None,
    }
}
