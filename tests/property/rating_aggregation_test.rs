//! Property-based tests for the client-side rating aggregate.
//!
//! However many times one user re-rates a page, they contribute exactly one
//! rating, and the mean is the mean of everyone's latest value.

use proptest::prelude::*;
use sitelens::types::navigation::PageKey;
use sitelens::types::review::{Rating, WebsiteReviewData};

fn arb_stars() -> impl Strategy<Value = u8> {
    1u8..=5
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn user_counts_once_with_latest_value(
        others in prop::collection::vec(arb_stars(), 0..20),
        user_sequence in prop::collection::vec(arb_stars(), 1..10),
    ) {
        let mut data = WebsiteReviewData::empty(PageKey::new("example.com"));
        for stars in &others {
            data.rating.add(*stars);
        }

        for stars in &user_sequence {
            data.apply_user_rating(*stars);
        }

        let last = *user_sequence.last().unwrap();
        let expected_total: f64 = others.iter().map(|s| f64::from(*s)).sum::<f64>() + f64::from(last);
        let expected_count = others.len() as u32 + 1;

        prop_assert_eq!(data.rating.count, expected_count);
        prop_assert!((data.rating.mean_stars - expected_total / f64::from(expected_count)).abs() < 1e-9);
        prop_assert_eq!(data.user_rating, Some(last));
    }

    #[test]
    fn mean_stays_within_star_range(
        seq in prop::collection::vec(arb_stars(), 1..30),
    ) {
        let mut rating = Rating::default();
        for stars in &seq {
            rating.add(*stars);
        }
        prop_assert!(rating.mean_stars >= 1.0 - 1e-9);
        prop_assert!(rating.mean_stars <= 5.0 + 1e-9);
        prop_assert_eq!(rating.count as usize, seq.len());
    }
}

#[test]
fn replace_on_empty_rating_counts_as_first_contribution() {
    let mut rating = Rating::default();
    rating.replace(3, 4);
    assert_eq!(rating.count, 1);
    assert_eq!(rating.mean_stars, 4.0);
}
