//! Unit tests for chat command parsing and routing.
