//! Tests for the crate-root types.
//!
//! Tests are organized by domain:
//! - `status` - CallStatus parsing and display
//! - `snapshot` - SessionSnapshot defaults and serialization
//! - `format` - Elapsed time formatting
