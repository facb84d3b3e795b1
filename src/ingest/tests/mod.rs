//! Unit tests for the ingest context.
