//! Forecast request types.
//!
//! A fluent builder describing which variable, product, lead time and region
//! a briefing figure needs.
//!
//! # Examples
//!
//! ```rust
//! use briefing_common::{Domain, LeadOffset, TimeUnit};
//! use chrono::{TimeZone, Utc};
//! use forecast::ForecastRequest;
//!
//! let briefing = Utc.with_ymd_and_hms(2024, 8, 7, 0, 0, 0).unwrap();
//! let lead: LeadOffset = "036h".parse().unwrap();
//!
//! // Outgoing longwave radiation from accumulated net thermal radiation
//! let request = ForecastRequest::new("ttr", briefing, lead)
//!     .differentiate(TimeUnit::Seconds)
//!     .within_domain(Domain::Orcestra);
//!
//! assert_eq!(request.valid_time(), Utc.with_ymd_and_hms(2024, 8, 8, 12, 0, 0).unwrap());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use briefing_common::{valid_time, BoundingBox, Domain, LeadOffset, TimeUnit};

use crate::types::Product;

/// Parameters for one forecast lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    /// Catalog variable code (e.g. "tcwv", "tp", "ttr").
    pub variable: String,

    pub product: Product,

    /// Nominal time of the briefing.
    pub briefing_time: DateTime<Utc>,

    pub lead: LeadOffset,

    /// Convert the accumulated field into a rate per this unit.
    pub differentiate: Option<TimeUnit>,

    /// Restrict the result to cells inside this box.
    pub region: Option<BoundingBox>,
}

impl ForecastRequest {
    /// Create a request for the operational product.
    pub fn new(variable: impl Into<String>, briefing_time: DateTime<Utc>, lead: LeadOffset) -> Self {
        Self {
            variable: variable.into(),
            product: Product::Operational,
            briefing_time,
            lead,
            differentiate: None,
            region: None,
        }
    }

    pub fn product(mut self, product: Product) -> Self {
        self.product = product;
        self
    }

    /// Switch to the ensemble product.
    pub fn ensemble(self) -> Self {
        self.product(Product::Ensemble)
    }

    pub fn differentiate(mut self, unit: TimeUnit) -> Self {
        self.differentiate = Some(unit);
        self
    }

    pub fn within(mut self, bbox: BoundingBox) -> Self {
        self.region = Some(bbox);
        self
    }

    pub fn within_domain(self, domain: Domain) -> Self {
        self.within(domain.bbox())
    }

    /// Briefing time plus lead offset.
    pub fn valid_time(&self) -> DateTime<Utc> {
        valid_time(self.briefing_time, self.lead)
    }
}
