//! # riskshare Math
//!
//! Numeric kernels for the riskshare portfolio risk attribution engine.
//!
//! - **Returns**: Simple and log returns from ordered price series
//! - **Statistics**: Mean, sample variance and covariance kernels
//! - **Covariance**: Symmetric sample covariance matrices built on nalgebra
//! - **Parallel**: Optional rayon scheduling behind the `parallel` feature
//!
//! ## Example
//!
//! ```rust
//! use riskshare_math::prelude::*;
//!
//! let a = compute_returns(&[100.0, 101.0, 99.0, 105.0]).unwrap();
//! let b = compute_returns(&[50.0, 50.5, 50.0, 51.0]).unwrap();
//! let cov = compute_covariance(&[a, b]).unwrap();
//!
//! assert_eq!(cov.dim(), 2);
//! assert_eq!(cov.get(0, 1), cov.get(1, 0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::uninlined_format_args)]

pub mod covariance;
pub mod parallel;
pub mod returns;
pub mod stats;

pub use covariance::{compute_covariance, compute_covariance_with, CovarianceMatrix};
pub use returns::{compute_log_returns, compute_returns, returns_of, ReturnKind};
pub use riskshare_core::{RiskShareError, RiskShareResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::covariance::{compute_covariance, compute_covariance_with, CovarianceMatrix};
    pub use crate::returns::{compute_log_returns, compute_returns, returns_of, ReturnKind};
    pub use crate::stats::{mean, sample_covariance, sample_std_dev, sample_variance};
    pub use riskshare_core::{ComputeConfig, RiskShareError, RiskShareResult};
}
