//! Catalog injector: writes translated reviews back to the catalog store.

use reviewsync_catalog::{CatalogClient, CatalogError, ReviewForm, WriteGate, WriteOutcome};
use reviewsync_core::{ProductId, TranslatedReview};

/// Write counts for one product.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InjectReport {
    pub created: usize,
    pub rejected: usize,
}

/// Posts each review in order, one request at a time, waiting on `gate`
/// before every write.
///
/// A rejected write is logged and the next review is attempted; it is never
/// retried.
///
/// # Errors
///
/// Returns [`CatalogError`] when a write cannot be sent at all; the remaining
/// reviews for the product are not attempted.
pub(crate) async fn inject_reviews<G: WriteGate>(
    catalog: &CatalogClient,
    gate: &mut G,
    reviews: &[TranslatedReview],
    product_id: &ProductId,
    user_id: &str,
) -> Result<InjectReport, CatalogError> {
    let mut report = InjectReport::default();

    for review in reviews {
        let form = ReviewForm::new(review, product_id, user_id);
        gate.ready().await;

        match catalog.create_review(&form).await? {
            WriteOutcome::Created => report.created += 1,
            WriteOutcome::Rejected { status, body } => {
                tracing::error!(
                    product_id = %product_id,
                    status,
                    body = %body,
                    "catalog rejected review"
                );
                report.rejected += 1;
            }
        }
    }

    Ok(report)
}
