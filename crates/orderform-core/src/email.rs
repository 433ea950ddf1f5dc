//! # Email Address Pattern
//!
//! The canonical address pattern used by the per-field strategy:
//!
//! ```text
//! local-part  = atom *("." atom) / quoted-string
//! atom        = 1*<any char except < > ( ) [ ] \ . , ; : whitespace @ ">
//! domain      = "[" ipv4-literal "]" / 1*(label ".") tld
//! label       = 1*(letter / digit / "-")
//! tld         = 2*letter
//! ```
//!
//! Matching is case-insensitive and anchored at both ends.

use once_cell::sync::Lazy;
use regex::Regex;

const EMAIL_PATTERN: &str = r#"(?i)^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-z\-0-9]+\.)+[a-z]{2,}))$"#;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Returns true if `candidate` is a syntactically acceptable email address.
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_RE.is_match(candidate)
}
