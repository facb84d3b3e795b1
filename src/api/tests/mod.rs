//! Unit tests for the external API context.
