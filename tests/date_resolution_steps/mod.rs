//! Step definitions for date resolution scenarios.
