//! Property-based tests for address bar classification and page keys.
//!
//! Classifying the URL of a direct target yields the same target again, and
//! normalizing is a fixed point.

use proptest::prelude::*;
use sitelens::services::url_normalizer::{classify, normalize_url};
use sitelens::types::navigation::{NavigationTarget, PageKey};

/// Host label plus TLD, in mixed case.
fn arb_host() -> impl Strategy<Value = String> {
    (
        "[a-zA-Z][a-zA-Z0-9]{2,10}",
        prop::option::of("[a-z]{2,8}\\."),
        prop_oneof![Just("com"), Just("org"), Just("IO"), Just("dev")],
    )
        .prop_filter("www is a prefix, not a label", |(label, sub, _)| {
            !label.eq_ignore_ascii_case("www") && sub.as_deref() != Some("www.")
        })
        .prop_map(|(label, sub, tld)| format!("{}{}.{}", sub.unwrap_or_default(), label, tld))
}

/// Any host the address bar opens directly: names (optionally with the root
/// dot), IPv4 and IPv6 literals, localhost, each with an optional port.
fn arb_any_host() -> impl Strategy<Value = String> {
    let name = (arb_host(), prop::bool::ANY).prop_map(|(h, dot)| if dot { h + "." } else { h });
    let ipv4 = prop::array::uniform4(0u8..=255).prop_map(|[a, b, c, d]| format!("{}.{}.{}.{}", a, b, c, d));
    let ipv6 = prop_oneof![Just("[::1]".to_string()), Just("[2001:DB8::7]".to_string())];
    (
        prop_oneof![4 => name, 2 => ipv4, 1 => ipv6, 1 => Just("localhost".to_string())],
        prop::option::of(1u16..=65535),
    )
        .prop_map(|(host, port)| match port {
            Some(port) => format!("{}:{}", host, port),
            None => host,
        })
}

fn arb_address() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(""), Just("http://"), Just("https://"), Just("HTTPS://")],
        prop::option::of("[a-z]{1,6}(:[a-z0-9]{1,6})?@"),
        prop::bool::ANY,
        arb_any_host(),
        prop::option::of("(/[a-zA-Z0-9_-]{1,8}){1,3}"),
        prop::option::of("\\?[a-z]{1,5}=[a-z0-9]{1,5}"),
        prop::bool::ANY,
    )
        .prop_map(|(scheme, userinfo, www, host, path, query, trailing)| {
            // Without a scheme `user@host` reads as an e-mail address.
            let userinfo = if scheme.is_empty() { None } else { userinfo };
            let mut s = format!(
                "{}{}{}{}{}",
                scheme,
                userinfo.unwrap_or_default(),
                if www && host.starts_with(|c: char| c.is_ascii_alphabetic()) { "www." } else { "" },
                host,
                path.unwrap_or_default()
            );
            if trailing {
                s.push('/');
            }
            s.push_str(&query.unwrap_or_default());
            s
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn direct_targets_reclassify_to_themselves(address in arb_address()) {
        let target = classify(&address).unwrap();
        let url = match &target {
            NavigationTarget::Direct { url } => url.clone(),
            other => return Err(TestCaseError::fail(format!("{:?} classified as {:?}", address, other))),
        };
        prop_assert_eq!(classify(&url).unwrap(), target);
    }

    #[test]
    fn any_direct_result_reclassifies_to_itself(
        prefix in prop_oneof![Just(""), Just("http://"), Just("https://")],
        raw in "[!-~]{1,30}",
    ) {
        let input = format!("{}{}", prefix, raw);
        if let NavigationTarget::Direct { url } = classify(&input).unwrap() {
            prop_assert_eq!(classify(&url).unwrap(), NavigationTarget::Direct { url: url.clone() });
        }
    }

    #[test]
    fn spellings_of_one_page_share_a_key(host in arb_host(), path in "(/[a-z0-9]{1,6}){0,2}") {
        let plain = PageKey::new(&format!("{}{}", host.to_lowercase(), path));
        let decorated = PageKey::new(&format!("HTTPS://WWW.{}{}/", host.to_uppercase(), path));
        prop_assert_eq!(plain, decorated);
    }

    #[test]
    fn normalize_is_a_fixed_point(raw in "[ -~]{0,40}") {
        let once = normalize_url(&raw);
        prop_assert_eq!(normalize_url(&once), once.clone());
    }

    #[test]
    fn input_with_inner_whitespace_is_search(a in "[a-z.]{1,10}", b in "[a-z.]{1,10}") {
        let input = format!("{} {}", a, b);
        prop_assert_eq!(
            classify(&input).unwrap(),
            NavigationTarget::Search { query: input.clone() }
        );
    }
}
