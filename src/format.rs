//! Input checks applied before anything is sent to the backend.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Loose email check: something, `@`, something, `.`, something.
///
/// Deliberately permissive; the provider validates the receipt address again.
pub fn validate_email_format(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Turn a displayed price (`"$1,234.56"`, `"R$ 1.234,56"`) into a plain
/// decimal string (`"1234.56"`).
///
/// Currency symbols and whitespace are dropped. The last `.` or `,` is the
/// decimal point when one or two digits follow it; every other separator is
/// a grouping mark.
pub fn normalize_price(display: &str) -> String {
    let kept: Vec<char> = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();

    let decimal_point = kept
        .iter()
        .rposition(|c| !c.is_ascii_digit())
        .filter(|&at| (1..=2).contains(&(kept.len() - at - 1)));

    kept.iter()
        .enumerate()
        .filter_map(|(at, c)| {
            if c.is_ascii_digit() {
                Some(*c)
            } else if Some(at) == decimal_point {
                Some('.')
            } else {
                None
            }
        })
        .collect()
}
