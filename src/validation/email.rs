//! Email shape check for user identifiers.
//!
//! The gateway does not claim full email validation: the platform enforces
//! its own identifier constraints on rename. This check only rejects
//! obviously malformed input before the platform is asked to do anything.

use std::sync::LazyLock;

/// Basic `local@domain.tld` shape.
static EMAIL_SHAPE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("EMAIL_SHAPE is a valid regex pattern")
});

/// Whether the input looks like a `local@domain.tld` address.
#[must_use]
pub fn is_email_shaped(input: &str) -> bool {
    EMAIL_SHAPE.is_match(input.trim())
}
