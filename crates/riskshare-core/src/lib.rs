//! # riskshare Core
//!
//! Core types, errors, and configuration for the riskshare portfolio risk
//! attribution engine.
//!
//! This crate provides the foundational building blocks used throughout riskshare:
//!
//! - **Types**: `Symbol`, `AssetIndex`, `PriceSeries`, `PriceHistory`,
//!   `ReturnSeries`, `WeightVector`
//! - **Errors**: A single `RiskShareError` shared by every crate
//! - **Config**: `ComputeConfig` for optional parallel evaluation
//!
//! ## Design Philosophy
//!
//! - **Positioned, not keyed**: Numeric data is addressed by asset index
//!   position; symbols appear only at the boundary
//! - **Validated on construction**: Invalid prices and weights never reach
//!   the numeric kernels
//! - **No shared state**: Every value is created per request
//!
//! ## Example
//!
//! ```rust
//! use riskshare_core::prelude::*;
//!
//! let index = AssetIndex::new(["SPY", "TLT"]).unwrap();
//! let prices = PriceSeries::new(vec![100.0, 101.0, 99.5]).unwrap();
//! let weights = WeightVector::normalize(&[60.0, 40.0], index.len(), WeightScale::Auto).unwrap();
//! assert_eq!(prices.len(), 3);
//! assert_eq!(weights.as_slice(), &[0.6, 0.4]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod config;
pub mod error;
pub mod types;

pub use config::ComputeConfig;
pub use error::{RiskShareError, RiskShareResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::ComputeConfig;
    pub use crate::error::{RiskShareError, RiskShareResult};
    pub use crate::types::{
        AssetIndex, PriceHistory, PriceSeries, ReturnSeries, Symbol, WeightScale, WeightVector,
    };
}
