//! Fiscal period types.

use chrono::NaiveDate;
use contable_shared::types::{FiscalPeriodId, OrganizationId};
use serde::{Deserialize, Serialize};

/// Status of a fiscal period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Entries may be created and finalized.
    #[default]
    Open,
    /// No new entries, no finalization.
    Closed,
}

/// An accounting period (e.g. a month) owned by an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Unique identifier.
    pub id: FiscalPeriodId,
    /// Organization this period belongs to.
    pub organization_id: OrganizationId,
    /// Period name (e.g., "Marzo 2026").
    pub name: String,
    /// First day of the period.
    pub start_date: NaiveDate,
    /// Last day of the period, inclusive.
    pub end_date: NaiveDate,
    /// Current status.
    #[serde(default)]
    pub status: PeriodStatus,
}

impl FiscalPeriod {
    /// Creates an open period.
    #[must_use]
    pub fn open(
        organization_id: OrganizationId,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: FiscalPeriodId::new(),
            organization_id,
            name: name.into(),
            start_date,
            end_date,
            status: PeriodStatus::Open,
        }
    }

    /// Returns true if entries can be posted to this period.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == PeriodStatus::Open
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Marks the period closed.
    pub fn close(&mut self) {
        self.status = PeriodStatus::Closed;
    }
}
