//! Event cost weights for one reconciliation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =#========================================================================#=
// DTL COSTS
// =#========================================================================#=
/// Cost weights for duplication, transfer and loss events.
///
/// Speciation is free. Weights must be finite and non-negative, which
/// [`validate`](Self::validate) checks before any table is built.
///
/// # Example
/// ```
/// use dtlrec::reconcile::DtlCosts;
///
/// let costs = DtlCosts::default().with_transfer(4.0);
/// assert_eq!(costs.duplication, 2.0);
/// assert_eq!(costs.transfer, 4.0);
/// assert!(costs.validate().is_ok());
/// assert!(costs.with_loss(-1.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DtlCosts {
    /// Cost of one gene duplication
    pub duplication: f64,
    /// Cost of one horizontal gene transfer
    pub transfer: f64,
    /// Cost of one gene loss
    pub loss: f64,
}

impl Default for DtlCosts {
    fn default() -> Self {
        Self {
            duplication: 2.0,
            transfer: 1.0,
            loss: 3.0,
        }
    }
}

impl DtlCosts {
    /// Creates cost weights from explicit values (not yet validated).
    pub fn new(duplication: f64, transfer: f64, loss: f64) -> Self {
        Self {
            duplication,
            transfer,
            loss,
        }
    }

    pub fn with_duplication(mut self, duplication: f64) -> Self {
        self.duplication = duplication;
        self
    }

    pub fn with_transfer(mut self, transfer: f64) -> Self {
        self.transfer = transfer;
        self
    }

    pub fn with_loss(mut self, loss: f64) -> Self {
        self.loss = loss;
        self
    }

    /// Checks that every weight is finite and non-negative.
    ///
    /// # Returns
    /// `Ok(())` if all weights are usable, otherwise the first offending weight
    pub fn validate(&self) -> Result<(), CostError> {
        for (event, value) in [
            ("duplication", self.duplication),
            ("transfer", self.transfer),
            ("loss", self.loss),
        ] {
            if !value.is_finite() {
                return Err(CostError::NotFinite { event, value });
            }
            if value < 0.0 {
                return Err(CostError::Negative { event, value });
            }
        }
        Ok(())
    }
}

/// Invalid cost weight.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostError {
    #[error("{event} cost must be non-negative, got {value}")]
    Negative { event: &'static str, value: f64 },
    #[error("{event} cost must be finite, got {value}")]
    NotFinite { event: &'static str, value: f64 },
}
