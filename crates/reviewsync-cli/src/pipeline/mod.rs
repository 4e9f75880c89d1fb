//! Review ingestion pipeline.
//!
//! Per product, strictly in catalog order:
//! source reviews → filter and sample → translate → inject.
//! A product with nothing to inject is skipped quietly. Any error while
//! processing one product is logged with the product context and the run
//! moves on; only catalog discovery failures end the run.

mod inject;
mod sampler;

use rand::rngs::StdRng;
use rand::SeedableRng;

use reviewsync_catalog::{CatalogClient, CatalogError, MinIntervalGate, WriteGate};
use reviewsync_core::{AppConfig, NamePool, Product};
use reviewsync_provider::ReviewSourceClient;
use reviewsync_translate::Translator;

use self::inject::{inject_reviews, InjectReport};
use self::sampler::{sample_reviews, SamplingPolicy};

/// Totals for one run, logged on completion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub products: usize,
    pub skipped: usize,
    pub failed: usize,
    pub reviews_injected: usize,
    pub writes_rejected: usize,
    pub degraded_fields: usize,
}

/// Why a product ended without an injection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    NoPartNumber,
    NoReviews,
    AllFiltered,
}

enum ProductOutcome {
    Skipped(SkipReason),
    Injected {
        report: InjectReport,
        degraded_fields: usize,
    },
}

pub(crate) struct Pipeline<G: WriteGate> {
    catalog: CatalogClient,
    reviews: ReviewSourceClient,
    translator: Translator,
    names: NamePool,
    policy: SamplingPolicy,
    per_page: u32,
    user_id: String,
    gate: G,
    rng: StdRng,
}

impl Pipeline<MinIntervalGate> {
    /// Builds the production pipeline: real clients, the configured name
    /// pool, wall-clock write pacing, and an OS-seeded RNG.
    pub(crate) fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Self::with_parts(
            config,
            NamePool::from_config(config)?,
            MinIntervalGate::from_millis(config.write_interval_ms),
            StdRng::from_os_rng(),
        )
    }
}

impl<G: WriteGate> Pipeline<G> {
    pub(crate) fn with_parts(
        config: &AppConfig,
        names: NamePool,
        gate: G,
        rng: StdRng,
    ) -> anyhow::Result<Self> {
        let catalog = CatalogClient::new(
            &config.catalog_base_url,
            &config.spree_token,
            config.http_timeout_secs,
            config.proxy_url.as_deref(),
        )?;
        let reviews = ReviewSourceClient::new(
            &config.provider_base_url,
            &config.rapidapi_key,
            &config.rapidapi_host,
            config.http_timeout_secs,
        )?
        .with_filters(&config.provider_country, &config.provider_category);
        let translator = Translator::new(
            &config.translate_base_url,
            &config.google_api_key,
            &config.source_lang,
            &config.target_lang,
            config.http_timeout_secs,
        )?;

        Ok(Self {
            catalog,
            reviews,
            translator,
            names,
            policy: SamplingPolicy {
                min_words: config.min_review_words,
                max_reviews: config.max_reviews,
            },
            per_page: config.per_page,
            user_id: config.submitting_user_id.clone(),
            gate,
            rng,
        })
    }

    /// Runs one batch over every active catalog product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] only when product discovery fails. Per-product
    /// failures are logged and counted in the summary.
    pub(crate) async fn run(&mut self) -> Result<RunSummary, CatalogError> {
        tracing::info!("review ingestion started");

        let products = self.catalog.list_active_products(self.per_page).await?;
        tracing::info!(count = products.len(), "discovered catalog products");

        let mut summary = RunSummary {
            products: products.len(),
            ..RunSummary::default()
        };

        for product in &products {
            tracing::info!(
                product_id = %product.id,
                part_number = product.part_number.as_deref().unwrap_or_default(),
                "processing product"
            );

            match self.process_product(product).await {
                Ok(ProductOutcome::Skipped(reason)) => {
                    tracing::debug!(product_id = %product.id, ?reason, "nothing to inject");
                    summary.skipped += 1;
                }
                Ok(ProductOutcome::Injected {
                    report,
                    degraded_fields,
                }) => {
                    summary.reviews_injected += report.created;
                    summary.writes_rejected += report.rejected;
                    summary.degraded_fields += degraded_fields;
                }
                Err(e) => {
                    let error = format!("{e:#}");
                    tracing::error!(
                        product_id = %product.id,
                        part_number = product.part_number.as_deref().unwrap_or_default(),
                        error = %error,
                        "failed to process product; continuing with the next one"
                    );
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            products = summary.products,
            skipped = summary.skipped,
            failed = summary.failed,
            reviews_injected = summary.reviews_injected,
            writes_rejected = summary.writes_rejected,
            degraded_fields = summary.degraded_fields,
            "all done"
        );
        Ok(summary)
    }

    async fn process_product(&mut self, product: &Product) -> anyhow::Result<ProductOutcome> {
        let Some(part_number) = product.eligible_part_number() else {
            return Ok(ProductOutcome::Skipped(SkipReason::NoPartNumber));
        };

        let raw = self.reviews.find_reviews(part_number).await?;
        if raw.is_empty() {
            return Ok(ProductOutcome::Skipped(SkipReason::NoReviews));
        }

        let sampled = sample_reviews(raw, part_number, self.policy, &self.names, &mut self.rng);
        if sampled.is_empty() {
            return Ok(ProductOutcome::Skipped(SkipReason::AllFiltered));
        }

        let mut translated = Vec::with_capacity(sampled.len());
        for review in &sampled {
            translated.push(self.translator.translate_all(review).await);
        }
        let degraded_fields = translated.iter().map(|r| r.degraded_fields.len()).sum();

        let report = inject_reviews(
            &self.catalog,
            &mut self.gate,
            &translated,
            &product.id,
            &self.user_id,
        )
        .await?;

        tracing::info!(
            product_id = %product.id,
            created = report.created,
            rejected = report.rejected,
            "injected reviews"
        );

        Ok(ProductOutcome::Injected {
            report,
            degraded_fields,
        })
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
