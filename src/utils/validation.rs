//! Input validation for phone numbers and passwords

use crate::config::PasswordConfig;
use regex::Regex;
use std::sync::LazyLock;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9]\d{9}$").expect("Invalid phone regex"));

/// Mainland mobile number: 11 digits starting with 13-19
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 11 && PHONE_RE.is_match(phone)
}

/// Check a password against the policy, collecting every violation
pub fn password_violations(password: &str, policy: &PasswordConfig) -> Vec<String> {
    let mut violations = Vec::new();
    let length = password.chars().count();

    if length < policy.min_length {
        violations.push(format!(
            "Password must be at least {} characters",
            policy.min_length
        ));
    }
    if length > policy.max_length {
        violations.push(format!(
            "Password must be at most {} characters",
            policy.max_length
        ));
    }

    let has_number = password.chars().any(|c| c.is_numeric());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_special = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

    if policy.require_number && !has_number {
        violations.push("Password must contain a digit".to_string());
    }
    if policy.require_lower && !has_lower {
        violations.push("Password must contain a lowercase letter".to_string());
    }
    if policy.require_upper && !has_upper {
        violations.push("Password must contain an uppercase letter".to_string());
    }
    if policy.require_special && !has_special {
        violations.push("Password must contain a special character".to_string());
    }

    violations
}

pub fn is_strong_password(password: &str, policy: &PasswordConfig) -> bool {
    password_violations(password, policy).is_empty()
}
