//! Unit tests for the board context.

mod projection_tests;
