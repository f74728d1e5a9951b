//! Address bar input classification.
//!
//! Turns whatever the user typed into either a page to open or a search
//! query, and produces the canonical page key used for review lookups.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::errors::NavigationError;
use crate::types::navigation::NavigationTarget;

/// `name.tld[.]`, `localhost`, IPv4 and bracketed IPv6 literals with an
/// optional port, or a single label with a mandatory port (`intranet:8080`).
static BARE_HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^
        (?:
            (?:
                localhost
                | \d{1,3}(?:\.\d{1,3}){3}
                | \[[0-9a-f:.]+\]
                | [\w-]+(?:\.[\w-]+)*\.[a-z]{2,}\.?
            )
            (?::\d{1,5})?
            | [\w-]+:\d{1,5}
        )
        (?:[/?\#].*)?$",
    )
    .expect("hostname pattern is valid")
});

static HTTP_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("scheme pattern is valid"));

/// Classifies raw address bar input.
///
/// Bare hostnames get `https://` prepended. Input with an http(s) scheme
/// becomes a [`NavigationTarget::Direct`] carrying the canonical page key when
/// that key is itself a bare hostname; anything else is a search. Classifying
/// the `url` of a `Direct` result therefore returns the same target.
///
/// # Errors
/// Returns [`NavigationError::EmptyInput`] when the input is blank.
pub fn classify(input: &str) -> Result<NavigationTarget, NavigationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(NavigationError::EmptyInput);
    }

    if trimmed.chars().any(char::is_whitespace) {
        return Ok(NavigationTarget::Search {
            query: trimmed.to_string(),
        });
    }

    let candidate = if !HTTP_SCHEME.is_match(trimmed) && looks_like_hostname(trimmed) {
        format!("https://{}", trimmed)
    } else {
        trimmed.to_string()
    };

    if HTTP_SCHEME.is_match(&candidate) {
        let url = normalize_url(&candidate);
        // Only keys that classify back to themselves become pages.
        if looks_like_hostname(&url) {
            return Ok(NavigationTarget::Direct { url });
        }
    }

    Ok(NavigationTarget::Search {
        query: trimmed.to_string(),
    })
}

/// Returns true for `host.tld[:port][/path]`, `localhost`, IP literals and
/// `label:port`; a query or fragment may follow the host directly.
pub fn looks_like_hostname(input: &str) -> bool {
    BARE_HOSTNAME.is_match(input)
}

/// Canonicalises a URL into a page key.
///
/// Strips the http(s) scheme, any `user@` prefix, a leading `www.`, the
/// trailing dot of a fully qualified host and a trailing slash, and lowercases
/// the host. Repeats until nothing changes, so the result is a
/// fixed point: `normalize_url(normalize_url(x)) == normalize_url(x)`.
pub fn normalize_url(raw: &str) -> String {
    let mut current = raw.trim().to_string();
    loop {
        let next = normalize_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn normalize_once(input: &str) -> String {
    let without_scheme = HTTP_SCHEME.replace(input, "");
    let (host, rest) = match without_scheme.find(['/', '?', '#']) {
        Some(idx) => without_scheme.split_at(idx),
        None => (&*without_scheme, ""),
    };

    let host = host.to_lowercase();
    let host = host.rsplit_once('@').map_or(host.as_str(), |(_, h)| h);
    let host = host.strip_prefix("www.").unwrap_or(host);
    let (name, port) = match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            (name, Some(port))
        }
        _ => (host, None),
    };
    let name = name.strip_suffix('.').unwrap_or(name);

    let mut url = match port {
        Some(port) => format!("{}:{}{}", name, port, rest),
        None => format!("{}{}", name, rest),
    };
    if url.ends_with('/') {
        url.pop();
    }
    url
}
