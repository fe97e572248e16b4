//! # riskshare Portfolio
//!
//! Portfolio volatility attribution.
//!
//! Answers "what fraction of total risk does each holding contribute",
//! independent of its nominal capital weight, by combining a lookback
//! window, a sample covariance estimate, and an Euler decomposition of
//! portfolio volatility.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: Every stage is stateless with explicit inputs
//! - **Index-positioned numerics**: Symbols are resolved once at the boundary
//! - **Degenerate, not failed**: A riskless portfolio returns a flagged result
//! - **Config-driven parallelism**: Optional rayon support with threshold-based switching
//!
//! ## Quick Start
//!
//! ```rust
//! use riskshare_math::compute_covariance;
//! use riskshare_portfolio::prelude::*;
//!
//! let cov = compute_covariance(&[
//!     vec![0.01, -0.02, 0.03],
//!     vec![0.02, -0.01, 0.01],
//! ]).unwrap();
//!
//! let rc = compute_risk_contributions(&[60.0, 40.0], &cov).unwrap();
//! assert!((rc.percentages[0] - 73.754_152_8).abs() < 1e-6);
//! ```
//!
//! ## Module Overview
//!
//! - [`lookback`] - Horizon labels, windows, and the minimum sample rule
//! - [`decomposition`] - Euler risk contributions
//! - [`config`] - Engine configuration and TOML loading
//! - [`pipeline`] - Symbol-level requests and calendar alignment
//! - [`report`] - Symbol-level attribution report
//!
//! ## Feature Flags
//!
//! - `parallel`: Estimate covariance cells on the rayon thread pool

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]

pub mod config;
pub mod decomposition;
pub mod lookback;
pub mod pipeline;
pub mod report;

pub use config::EngineConfig;
pub use decomposition::{
    compute_risk_contributions, compute_risk_contributions_with, DecompositionConfig,
    RiskContribution,
};
pub use lookback::{Horizon, LookbackPolicy};
pub use pipeline::{
    align_histories, attribute_risk, estimate_covariance, CovarianceEstimate, PriceData,
    RiskAttributionRequest,
};
pub use report::{AssetContribution, AttributionReport};
pub use riskshare_core::{RiskShareError, RiskShareResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::decomposition::{
        compute_risk_contributions, compute_risk_contributions_with, DecompositionConfig,
        RiskContribution,
    };
    pub use crate::lookback::{Horizon, LookbackPolicy};
    pub use crate::pipeline::{
        align_histories, attribute_risk, estimate_covariance, CovarianceEstimate, PriceData,
        RiskAttributionRequest,
    };
    pub use crate::report::{AssetContribution, AttributionReport};
    pub use riskshare_core::types::WeightScale;
    pub use riskshare_core::{RiskShareError, RiskShareResult};
}
