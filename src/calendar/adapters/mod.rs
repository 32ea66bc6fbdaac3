//! Calendar mirror adapters.

mod disabled;
mod memory;

pub use disabled::DisabledCalendarMirror;
pub use memory::InMemoryCalendarMirror;
