//! Fake third party services for local development and integration tests.

pub mod resend;
