//! Time source for date/time components.

use chrono::{Local, NaiveDateTime};

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Fills a `YYYY MM DD HH mm ss` token template. Each token is replaced
/// once, at its first occurrence. An empty template means `YYYY-MM-DD`.
pub fn format_timestamp(template: &str, at: NaiveDateTime) -> String {
    let template = if template.is_empty() {
        "YYYY-MM-DD"
    } else {
        template
    };
    template
        .replacen("YYYY", &at.format("%Y").to_string(), 1)
        .replacen("MM", &at.format("%m").to_string(), 1)
        .replacen("DD", &at.format("%d").to_string(), 1)
        .replacen("HH", &at.format("%H").to_string(), 1)
        .replacen("mm", &at.format("%M").to_string(), 1)
        .replacen("ss", &at.format("%S").to_string(), 1)
}
