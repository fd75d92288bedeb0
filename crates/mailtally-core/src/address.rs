//! Sender address helpers.

/// Extracts the lowercased domain of a `From` header value.
///
/// Handles both `Name <user@domain>` and bare `user@domain` forms. When the
/// value holds an angle-bracketed address, the last bracket pair wins (a
/// display name may itself contain `@`). The domain ends at the first
/// character that cannot appear in a hostname.
///
/// Internationalized domains are kept as written; only ASCII letters are
/// lowercased.
///
/// Returns `None` when no domain can be found, e.g. for `undisclosed` or
/// `user@`.
///
/// ```
/// use mailtally_core::sender_domain;
///
/// assert_eq!(sender_domain("Jane Doe <jane@example.com>").as_deref(), Some("example.com"));
/// assert_eq!(sender_domain("a@x.com").as_deref(), Some("x.com"));
/// assert_eq!(sender_domain("undisclosed-recipients"), None);
/// ```
#[must_use]
pub fn sender_domain(from: &str) -> Option<String> {
    let address = bracketed(from).unwrap_or(from).trim();
    let (_, domain) = address.rsplit_once('@')?;

    let end = domain
        .find(|c: char| !is_hostname_char(c))
        .unwrap_or(domain.len());
    let domain = domain[..end].trim_end_matches('.');
    if domain.is_empty() {
        return None;
    }

    Some(domain.to_ascii_lowercase())
}

/// Text inside the last `<...>` pair, if any.
fn bracketed(value: &str) -> Option<&str> {
    let open = value.rfind('<')?;
    let rest = &value[open + 1..];
    let close = rest.find('>').unwrap_or(rest.len());
    Some(&rest[..close])
}

fn is_hostname_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '.'
}
