//! Test modules relocated from implementation files.

#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod operator_tests;
