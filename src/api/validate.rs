//! Request shape checks shared by the class handlers.

use std::borrow::Cow;

use url::{Host, Url};

use crate::errors::AppError;

/// Schemes accepted for class links. A link typed without one is read as `http://`.
const URL_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// Fail unless `value` has at least one non-whitespace character.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Fail if an optional URL field is present but not a well-formed URL.
pub fn optional_url(field: &str, value: Option<&str>) -> Result<(), AppError> {
    match value {
        Some(url) if !is_valid_url(url) => Err(AppError::Validation(format!(
            "{} must be a URL address",
            field
        ))),
        _ => Ok(()),
    }
}

/// http, https or ftp URL (scheme optional) whose host is an IP address or a dotted domain
/// name ending in an alphabetic top-level label.
pub fn is_valid_url(s: &str) -> bool {
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        return false;
    }

    let candidate = if s.contains("://") {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(format!("http://{}", s))
    };

    let Ok(url) = Url::parse(&candidate) else {
        return false;
    };

    if !URL_SCHEMES.contains(&url.scheme()) {
        return false;
    }

    match url.host() {
        Some(Host::Domain(domain)) => is_domain_name(domain),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

fn is_domain_name(host: &str) -> bool {
    let labels: Vec<&str> = host.trim_end_matches('.').split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let valid_labels = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld = labels[labels.len() - 1];
    valid_labels
        && tld.len() >= 2
        && (tld.chars().all(|c| c.is_ascii_alphabetic()) || tld.starts_with("xn--"))
}
