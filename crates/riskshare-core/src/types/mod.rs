//! Domain types for risk attribution.
//!
//! - [`Symbol`]: Asset identifier
//! - [`AssetIndex`]: Ordered asset list that positions every vector and matrix
//! - [`PriceSeries`]: Validated chronological closing prices
//! - [`PriceHistory`]: Prices paired with their trading dates
//! - [`ReturnSeries`]: Period-over-period returns
//! - [`WeightVector`]: Portfolio weights normalized to fractions

mod asset;
mod series;
mod weights;

pub use asset::{AssetIndex, Symbol};
pub use series::{validate_prices, PriceHistory, PriceSeries, ReturnSeries};
pub use weights::{WeightScale, WeightVector};
