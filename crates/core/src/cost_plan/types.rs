//! Cost plan records observed by the engine.
//!
//! These are owned by the cost plan module; the engine only reads them.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use costplan_shared::types::{
    AllocationId, Cents, CostLineId, DisciplineId, InvoiceId, ProjectId, StakeholderId, TradeId,
    VariationId,
};
use serde::{Deserialize, Serialize};

use super::error::CostPlanError;

/// The four fixed cost plan groupings, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Section {
    /// Client-side fees.
    Fees,
    /// Consultant engagements.
    Consultants,
    /// Construction trades.
    Construction,
    /// Contingency allowances.
    Contingency,
}

impl Section {
    /// Every section in display order.
    pub const ALL: [Self; 4] = [
        Self::Fees,
        Self::Consultants,
        Self::Construction,
        Self::Contingency,
    ];

    /// Returns the persisted name of the section.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fees => "FEES",
            Self::Consultants => "CONSULTANTS",
            Self::Construction => "CONSTRUCTION",
            Self::Contingency => "CONTINGENCY",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Section {
    type Err = CostPlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CostPlanError::UnknownSection(s.to_string()))
    }
}

/// Stakeholder grouping used to pick the section an evaluation tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakeholderGroup {
    /// Client or owner.
    Client,
    /// Statutory authority.
    Authority,
    /// Design consultant.
    Consultant,
    /// Building contractor.
    Contractor,
}

impl StakeholderGroup {
    /// Section whose lines are mirrored into this group's evaluations.
    #[must_use]
    pub const fn evaluated_section(self) -> Option<Section> {
        match self {
            Self::Consultant => Some(Section::Consultants),
            Self::Contractor => Some(Section::Construction),
            Self::Client | Self::Authority => None,
        }
    }
}

/// A monthly reporting period. Orders by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct ReportingPeriod {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

#[derive(Deserialize)]
struct RawPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawPeriod> for ReportingPeriod {
    type Error = CostPlanError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month)
    }
}

impl ReportingPeriod {
    /// Creates a period, rejecting months outside 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, CostPlanError> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(CostPlanError::InvalidMonth(month))
        }
    }

    /// The period containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for ReportingPeriod {
    type Err = CostPlanError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CostPlanError::InvalidPeriod(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

/// A cost plan line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostLine {
    /// Cost line ID.
    pub id: CostLineId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Section the line belongs to.
    pub section: Section,
    /// Cost code (e.g., "3.01").
    pub cost_code: String,
    /// Line description.
    pub activity: String,
    /// Budget in cents.
    pub budget_cents: Cents,
    /// Position within the section.
    pub sort_order: i32,
    /// Consultant discipline, for consultant lines.
    #[serde(default)]
    pub discipline_id: Option<DisciplineId>,
    /// Contractor trade, for construction lines.
    #[serde(default)]
    pub trade_id: Option<TradeId>,
    /// Stakeholder engaged against this line.
    #[serde(default)]
    pub stakeholder_id: Option<StakeholderId>,
    /// Soft-delete timestamp.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Contract value allocated to a cost line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    /// Allocation ID.
    pub id: AllocationId,
    /// Linked cost line.
    #[serde(default)]
    pub cost_line_id: Option<CostLineId>,
    /// Allocated amount in cents.
    pub amount_cents: Cents,
    /// Soft-delete timestamp.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Who raised a variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariationCategory {
    /// Principal-directed change.
    Principal,
    /// Contractor claim.
    Contractor,
    /// Latent site condition.
    LatentCondition,
    /// Anything else.
    Other,
}

/// Lifecycle status of a variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariationStatus {
    /// Expected but not yet approved.
    Forecast,
    /// Approved; counts at its approved amount.
    Approved,
    /// Rejected; never counts.
    Rejected,
    /// Withdrawn; never counts.
    Withdrawn,
}

/// A contract variation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variation {
    /// Variation ID.
    pub id: VariationId,
    /// Linked cost line.
    #[serde(default)]
    pub cost_line_id: Option<CostLineId>,
    /// Variation category.
    pub category: VariationCategory,
    /// Current status.
    pub status: VariationStatus,
    /// Forecast amount in cents.
    pub amount_forecast_cents: Cents,
    /// Approved amount in cents.
    pub amount_approved_cents: Cents,
    /// Soft-delete timestamp.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Payment status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Received, awaiting assessment.
    Pending,
    /// Certified for payment.
    Approved,
    /// Paid.
    Paid,
}

/// A progress claim invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice ID.
    pub id: InvoiceId,
    /// Linked cost line.
    #[serde(default)]
    pub cost_line_id: Option<CostLineId>,
    /// Period the invoice was claimed in.
    pub period: ReportingPeriod,
    /// Invoiced amount in cents.
    pub amount_cents: Cents,
    /// Payment status.
    pub status: InvoiceStatus,
    /// Soft-delete timestamp.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Records that hang off a cost line through an optional link.
pub trait CostLineChild {
    /// The linked cost line, if any.
    fn cost_line_id(&self) -> Option<CostLineId>;

    /// Whether the record has been soft-deleted.
    fn is_deleted(&self) -> bool;

    /// True when the record is live and linked to `id`.
    fn is_linked_to(&self, id: CostLineId) -> bool {
        !self.is_deleted() && self.cost_line_id() == Some(id)
    }
}

macro_rules! cost_line_child {
    ($ty:ty) => {
        impl CostLineChild for $ty {
            fn cost_line_id(&self) -> Option<CostLineId> {
                self.cost_line_id
            }

            fn is_deleted(&self) -> bool {
                self.deleted_at.is_some()
            }
        }
    };
}

cost_line_child!(Allocation);
cost_line_child!(Variation);
cost_line_child!(Invoice);
