pub mod client;
pub mod error;
pub mod normalize;
pub mod steps;
pub mod types;

pub use client::{AdsFilter, HasuraClient};
pub use error::HasuraError;
pub use normalize::{
    evaluate_ad, normalize_ad, normalize_ads, FeedTemplates, NormalizeSummary, NormalizedBatch,
    SkipReason,
};
pub use steps::{parse_steps, Step};
pub use types::{CodeNumber, RawAd};
