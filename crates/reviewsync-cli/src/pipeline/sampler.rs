//! Review filter and sampler.
//!
//! Single pass over the provider's reviews, in provider order: drop short
//! reviews, stamp the survivors with a reviewer name and a calendar date, and
//! stop at the per-product cap.

use chrono::DateTime;
use rand::Rng;

use reviewsync_core::{EnrichedReview, NamePool, RawReview};

/// Length and count limits applied to each product's reviews.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SamplingPolicy {
    pub min_words: usize,
    pub max_reviews: usize,
}

/// Number of whitespace-separated words in `text`.
pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Turns raw provider reviews into at most `policy.max_reviews` enriched ones.
///
/// Reviews with fewer than `policy.min_words` words are skipped. Reviews past
/// the cap are dropped, not deferred. Each kept review gets an independently
/// drawn name from `names`; repeats are allowed. The date is read only for
/// reviews that passed both checks: a missing timestamp, or one that cannot be
/// represented as a date, skips the review.
pub(crate) fn sample_reviews<R: Rng + ?Sized>(
    raw: Vec<RawReview>,
    part_number: &str,
    policy: SamplingPolicy,
    names: &NamePool,
    rng: &mut R,
) -> Vec<EnrichedReview> {
    let mut accepted = Vec::new();

    for review in raw {
        if accepted.len() >= policy.max_reviews {
            break;
        }
        if word_count(&review.body) < policy.min_words {
            continue;
        }
        let Some(timestamp) = review.timestamp else {
            tracing::warn!(part_number, "skipping review without timestamp");
            continue;
        };
        let Some(date) = DateTime::from_timestamp(timestamp, 0).map(|dt| dt.date_naive()) else {
            tracing::warn!(
                part_number,
                timestamp,
                "skipping review with out-of-range timestamp"
            );
            continue;
        };

        accepted.push(EnrichedReview {
            part_number: part_number.to_owned(),
            date,
            reviewer_name: names.pick(rng).to_owned(),
            title: review.title,
            body: review.body,
            rating: review.rating,
        });
    }

    accepted
}
