//! Sources of document dates and numbers.

use chrono::{DateTime, Local, SubsecRound};
use common::Company;

/// Supplies the current time for new documents.
pub trait TimeGenerator: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Produces human-readable document numbers.
pub trait NumberGenerator: Send + Sync {
    fn generate(&self, date: &DateTime<Local>, company: &Company) -> String;
}

/// Wall clock, truncated to whole seconds (the stored precision).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeGenerator;

impl TimeGenerator for SystemTimeGenerator {
    fn now(&self) -> DateTime<Local> {
        Local::now().trunc_subsecs(0)
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeGenerator(pub DateTime<Local>);

impl TimeGenerator for FixedTimeGenerator {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// `YYYYMMDD-<company id>-<0..9999>`.
///
/// The random suffix only makes collisions unlikely; numbers are not unique.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNumberGenerator;

impl NumberGenerator for RandomNumberGenerator {
    fn generate(&self, date: &DateTime<Local>, company: &Company) -> String {
        format!(
            "{}-{}-{}",
            date.format("%Y%m%d"),
            company.id,
            fastrand::u32(..10_000)
        )
    }
}
