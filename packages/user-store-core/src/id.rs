//! User identifier generation and format checks.

use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

/// 8-4-4-4-12 hex groups, version nibble 1-5, variant nibble 8/9/a/b.
const USER_ID_PATTERN: &str =
    r"^(?i)[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";

static USER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(USER_ID_PATTERN).expect("valid regex"));

/// Generates a fresh identifier: a random v4 UUID in lowercase hyphenated form.
pub fn new_user_id() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

/// Returns true if `id` has the textual shape of a UUID.
///
/// This is a syntax check only. It says nothing about whether the store
/// ever issued the id.
pub fn is_valid_user_id(id: &str) -> bool {
    USER_ID_RE.is_match(id)
}
