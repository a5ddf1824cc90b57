//! Normalization from raw Hasura ads to [`adfeed_core::FeedItem`].
//!
//! Step decoding lives in [`crate::steps`]; this module applies the feed's
//! inclusion rules and builds the output links.

use adfeed_core::{FeedItem, AVAILABILITY_IN_STOCK, DEFAULT_SITE_URL, DEFAULT_STORAGE_URL};

use crate::steps::{parse_steps, Step};
use crate::types::RawAd;

/// Payment method value that makes an ad eligible for the feed.
pub const ONLINE_PAYMENT: &str = "Online Payment";

/// `type_ad` values, matched case-sensitively, that mark an auction listing.
pub const AUCTION_AD_TYPES: [&str; 4] = ["Auction", "auctions", "auction", "Auctions"];

/// Currency suffix appended to every feed price.
pub const PRICE_CURRENCY_SUFFIX: &str = " AED";

/// Width and quality the image proxy is asked to render.
const IMAGE_PROXY_PARAMS: &str = "w=3840&q=75";

/// Why an ad produced no feed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The `attributes` payload could not be decoded.
    MalformedAttributes,
    /// An `ad_type` step marks the ad as an auction.
    Auction,
    /// No `delivery_and_payment_methods` step offers online payment.
    NoOnlinePayment,
    /// The product price is the empty string.
    EmptyPrice,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MalformedAttributes => write!(f, "malformed attributes"),
            SkipReason::Auction => write!(f, "auction ad"),
            SkipReason::NoOnlinePayment => write!(f, "no online payment"),
            SkipReason::EmptyPrice => write!(f, "empty price"),
        }
    }
}

/// Hosts the product link and image URL are built against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedTemplates {
    site_url: String,
    storage_url: String,
}

impl Default for FeedTemplates {
    fn default() -> Self {
        Self::new(DEFAULT_SITE_URL, DEFAULT_STORAGE_URL)
    }
}

impl FeedTemplates {
    /// Trailing slashes on either origin are dropped.
    #[must_use]
    pub fn new(site_url: &str, storage_url: &str) -> Self {
        Self {
            site_url: site_url.trim_end_matches('/').to_owned(),
            storage_url: storage_url.trim_end_matches('/').to_owned(),
        }
    }

    /// `https://<site>/product/<ad_id>`
    #[must_use]
    pub fn product_link(&self, ad_id: &str) -> String {
        format!("{}/product/{ad_id}", self.site_url)
    }

    /// Image-proxy URL for a draft image.
    ///
    /// The inner storage URL is embedded unescaped and the proxy parameters
    /// are joined with a raw `&`; XML writers escape it on output.
    #[must_use]
    pub fn image_link(&self, draft_id: &str, image_src: &str) -> String {
        format!(
            "{}/_next/image?url={}/prod/public/drafts/{draft_id}/web/{image_src}&{IMAGE_PROXY_PARAMS}",
            self.site_url, self.storage_url
        )
    }
}

/// Per-batch tallies of how ads were handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub total: usize,
    pub emitted: usize,
    pub malformed: usize,
    pub auction: usize,
    pub no_online_payment: usize,
    pub empty_price: usize,
    /// Ads whose `product_detail` step reports an auction type. Reporting only.
    pub detail_auction: usize,
    /// Ads whose `product_detail` step reports any other type, or none.
    pub detail_other: usize,
}

impl NormalizeSummary {
    /// Tallies one evaluated ad.
    pub fn record(&mut self, outcome: &Result<FeedItem, SkipReason>) {
        self.total += 1;
        match outcome {
            Ok(_) => self.emitted += 1,
            Err(SkipReason::MalformedAttributes) => self.malformed += 1,
            Err(SkipReason::Auction) => self.auction += 1,
            Err(SkipReason::NoOnlinePayment) => self.no_online_payment += 1,
            Err(SkipReason::EmptyPrice) => self.empty_price += 1,
        }
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.total - self.emitted
    }
}

impl std::fmt::Display for NormalizeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} ads emitted (auction={} no_online_payment={} empty_price={} malformed={}; \
             product_detail ad_type auction={} other={})",
            self.emitted,
            self.total,
            self.auction,
            self.no_online_payment,
            self.empty_price,
            self.malformed,
            self.detail_auction,
            self.detail_other,
        )
    }
}

/// Output of [`normalize_ads`].
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub items: Vec<FeedItem>,
    pub summary: NormalizeSummary,
}

fn is_auction_type(value: &str) -> bool {
    AUCTION_AD_TYPES.contains(&value)
}

/// Fields picked out of the steps before the item is assembled.
#[derive(Default)]
struct Extracted<'a> {
    auction: bool,
    online_payment: bool,
    title: &'a str,
    brand: &'a str,
    price: &'a str,
    image_src: &'a str,
}

/// Scans the steps once. Later `search_product` / `product_detail` steps
/// overwrite earlier ones; the image comes from the last detail step that
/// lists any image.
fn extract(steps: &[Step]) -> Extracted<'_> {
    let mut out = Extracted::default();
    for step in steps {
        match step {
            Step::AdType { type_ad } => {
                if type_ad.as_deref().is_some_and(is_auction_type) {
                    out.auction = true;
                }
            }
            Step::DeliveryAndPayment { payment_methods } => {
                if payment_methods.iter().any(|m| m == ONLINE_PAYMENT) {
                    out.online_payment = true;
                }
            }
            Step::SearchProduct { input_search_value } => {
                out.title = input_search_value.as_deref().unwrap_or_default();
            }
            Step::ProductDetail {
                brand,
                price,
                image_srcs,
                ..
            } => {
                out.brand = brand.as_deref().unwrap_or_default();
                out.price = price.as_deref().unwrap_or_default();
                if let Some(first) = image_srcs.first() {
                    out.image_src = first.as_str();
                }
            }
            Step::Other { .. } => {}
        }
    }
    out
}

/// Returns `true` when the last `product_detail` step reports an auction type.
fn detail_reports_auction(steps: &[Step]) -> bool {
    steps
        .iter()
        .rev()
        .find_map(|step| match step {
            Step::ProductDetail { ad_type, .. } => Some(ad_type.as_deref()),
            _ => None,
        })
        .flatten()
        .is_some_and(is_auction_type)
}

fn build_item(
    ad: &RawAd,
    steps: &[Step],
    templates: &FeedTemplates,
) -> Result<FeedItem, SkipReason> {
    let fields = extract(steps);

    if fields.auction {
        return Err(SkipReason::Auction);
    }
    if !fields.online_payment {
        return Err(SkipReason::NoOnlinePayment);
    }
    if fields.price.is_empty() {
        return Err(SkipReason::EmptyPrice);
    }

    let image_link = if fields.image_src.is_empty() {
        String::new()
    } else {
        templates.image_link(ad.draft_id.as_deref().unwrap_or_default(), fields.image_src)
    };

    Ok(FeedItem {
        id: ad.id.clone(),
        title: fields.title.to_owned(),
        description: ad.description.clone().unwrap_or_default(),
        link: templates.product_link(&ad.id),
        image_link,
        brand: fields.brand.to_owned(),
        price: format!("{}{PRICE_CURRENCY_SUFFIX}", fields.price),
        availability: AVAILABILITY_IN_STOCK.to_owned(),
        code_number: ad.code_number.as_str().to_owned(),
    })
}

/// Decodes the steps and applies the feed rules.
///
/// Also reports whether the `product_detail` ad type reads as an auction;
/// `None` when the payload could not be decoded.
fn evaluate(
    ad: &RawAd,
    templates: &FeedTemplates,
) -> (Result<FeedItem, SkipReason>, Option<bool>) {
    match parse_steps(&ad.attributes) {
        Ok(steps) => (
            build_item(ad, &steps, templates),
            Some(detail_reports_auction(&steps)),
        ),
        Err(e) => {
            tracing::warn!(ad_id = %ad.id, error = %e, "skipping ad with malformed attributes");
            (Err(SkipReason::MalformedAttributes), None)
        }
    }
}

/// Applies the feed rules to one ad.
///
/// Pure apart from the warning logged for a malformed `attributes` payload:
/// the same ad and templates always give the same result.
///
/// # Errors
///
/// Returns the [`SkipReason`] when the ad must not appear in the feed. This is
/// an expected outcome, not a failure.
pub fn evaluate_ad(ad: &RawAd, templates: &FeedTemplates) -> Result<FeedItem, SkipReason> {
    evaluate(ad, templates).0
}

/// Normalizes one ad into a feed item, or `None` when it is filtered out.
#[must_use]
pub fn normalize_ad(ad: &RawAd, templates: &FeedTemplates) -> Option<FeedItem> {
    evaluate_ad(ad, templates).ok()
}

/// Normalizes a batch of ads in order, tallying every outcome.
///
/// Never fails: each ad is either emitted or counted under its skip reason.
#[must_use]
pub fn normalize_ads(ads: &[RawAd], templates: &FeedTemplates) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for ad in ads {
        let (outcome, detail_auction) = evaluate(ad, templates);

        match detail_auction {
            Some(true) => batch.summary.detail_auction += 1,
            Some(false) => batch.summary.detail_other += 1,
            None => {}
        }
        if let Err(reason) = &outcome {
            tracing::debug!(ad_id = %ad.id, %reason, "ad filtered out of feed");
        }
        batch.summary.record(&outcome);

        if let Ok(item) = outcome {
            batch.items.push(item);
        }
    }

    tracing::info!(
        total = batch.summary.total,
        emitted = batch.summary.emitted,
        auction = batch.summary.auction,
        no_online_payment = batch.summary.no_online_payment,
        empty_price = batch.summary.empty_price,
        malformed = batch.summary.malformed,
        detail_auction = batch.summary.detail_auction,
        detail_other = batch.summary.detail_other,
        "normalized ads batch"
    );

    batch
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
