//! Date/time resolution for loosely formatted chat input.
//!
//! Users write dates as weekday names (`пн`, `вторник`, `fr`) or `D.M` pairs
//! and times as `H.MM`, `H:MM` or a bare hour. [`DateTimeResolver`] turns such
//! a pair into an absolute timestamp in the configured timezone. Resolution is
//! always relative to a caller-supplied reference instant, so the same input
//! and reference produce the same result.

mod date;
mod error;
mod policy;
mod resolver;
mod time;

pub use error::{ParseWeekdayPolicyError, ResolveError};
pub use policy::WeekdayPolicy;
pub use resolver::DateTimeResolver;
