use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::sync::LazyLock;

/// local-part@domain with at least one dot in the domain
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email regex is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// True if `value` has something besides whitespace
pub fn is_filled(value: &str) -> bool {
    !value.split_whitespace().collect::<String>().is_empty()
}

/// Reads a JSON `null` string field as empty, so it fails validation
/// like a missing one
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
