use serde::{Deserialize, Serialize};

use super::navigation::PageKey;

/// Author recorded when the commenter leaves the name blank.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Highest star value a rating or comment can carry.
pub const MAX_STARS: u8 = 5;

/// A single comment left on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub text: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// 0 means the comment carries no rating.
    pub rating: u8,
}

/// Aggregated star rating for a page.
///
/// `mean_stars` is always the arithmetic mean of the contributions counted in
/// `count`, and is 0 when nothing has been counted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    pub mean_stars: f64,
    pub count: u32,
}

impl Rating {
    /// Adds one new contribution.
    pub fn add(&mut self, stars: u8) {
        let total = self.total() + f64::from(stars);
        self.count += 1;
        self.mean_stars = total / f64::from(self.count);
    }

    /// Swaps an existing contribution for a new value without changing `count`.
    pub fn replace(&mut self, previous: u8, stars: u8) {
        if self.count == 0 {
            self.add(stars);
            return;
        }
        let total = self.total() - f64::from(previous) + f64::from(stars);
        self.mean_stars = (total / f64::from(self.count)).clamp(0.0, f64::from(MAX_STARS));
    }

    fn total(&self) -> f64 {
        self.mean_stars * f64::from(self.count)
    }
}

/// Everything the review panel knows about one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsiteReviewData {
    pub page_key: PageKey,
    pub rating: Rating,
    /// Newest first.
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<u8>,
}

impl WebsiteReviewData {
    pub fn empty(page_key: PageKey) -> Self {
        Self {
            page_key,
            rating: Rating::default(),
            comments: Vec::new(),
            user_rating: None,
        }
    }

    /// Records the user's own rating, replacing any earlier one.
    pub fn apply_user_rating(&mut self, stars: u8) {
        match self.user_rating {
            Some(previous) => self.rating.replace(previous, stars),
            None => self.rating.add(stars),
        }
        self.user_rating = Some(stars);
    }
}

/// Payload for posting a comment to the review service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub page_key: PageKey,
    pub author: String,
    pub text: String,
    pub rating: u8,
}
