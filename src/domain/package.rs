use std::fmt::Display;

use chrono::{Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    DurationMonths, NonEmptyString, PackageId, Percentage, TypeConstraintError,
};
use crate::domain::vip::{VipExperience, VipTier};
use crate::domain::wizard::WizardStep;

/// Approval status of a package. Only finalize moves it on the client side.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackageStatus {
    #[default]
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl PackageStatus {
    /// Human readable label used in package listings.
    pub const fn label(self) -> &'static str {
        match self {
            PackageStatus::Draft => "Draft",
            PackageStatus::Pending => "Under review",
            PackageStatus::Approved => "Approved",
            PackageStatus::Rejected => "Needs changes",
        }
    }
}

impl Display for PackageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageStatus::Draft => write!(f, "draft"),
            PackageStatus::Pending => write!(f, "pending"),
            PackageStatus::Approved => write!(f, "approved"),
            PackageStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Discount applied to every product or service of the business.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct DiscountAll {
    pub percentage: Percentage,
}

/// Discount on a specific product or service; always larger than [`DiscountAll`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SpecificDiscount {
    pub title: NonEmptyString,
    pub description: String,
    pub percentage: Percentage,
}

/// Which customer metric unlocks the elite gift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GiftThreshold {
    /// Total amount spent.
    Amount(f64),
    /// Number of purchases.
    Count(u32),
}

impl GiftThreshold {
    pub fn amount(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value > 0.0 {
            Ok(GiftThreshold::Amount(value))
        } else {
            Err(TypeConstraintError::NonPositiveThreshold)
        }
    }

    pub fn count(value: u32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(GiftThreshold::Count(value))
        } else {
            Err(TypeConstraintError::NonPositiveThreshold)
        }
    }

    pub const fn amount_value(self) -> Option<f64> {
        match self {
            GiftThreshold::Amount(value) => Some(value),
            GiftThreshold::Count(_) => None,
        }
    }

    pub const fn count_value(self) -> Option<u32> {
        match self {
            GiftThreshold::Count(value) => Some(value),
            GiftThreshold::Amount(_) => None,
        }
    }
}

/// Bonus reward for loyal customers crossing a threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct EliteGift {
    pub description: NonEmptyString,
    pub threshold: GiftThreshold,
}

/// Discount configuration sent by the first wizard step.
///
/// `remove_specific` distinguishes "drop the specific discount" from "the
/// specific discount was not part of this save".
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DiscountUpdate {
    pub discount_all: Option<DiscountAll>,
    pub specific_discount: Option<SpecificDiscount>,
    pub remove_specific: bool,
}

impl DiscountUpdate {
    #[must_use]
    pub fn save(discount_all: DiscountAll, specific_discount: Option<SpecificDiscount>) -> Self {
        Self {
            discount_all: Some(discount_all),
            specific_discount,
            remove_specific: false,
        }
    }

    #[must_use]
    pub fn remove_specific(discount_all: Option<DiscountAll>) -> Self {
        Self {
            discount_all,
            specific_discount: None,
            remove_specific: true,
        }
    }
}

/// Persisted state of a draft, as far as the wizard is concerned.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DraftStatus {
    pub status: PackageStatus,
    pub is_complete: bool,
    pub discount_all: Option<DiscountAll>,
    pub specific_discount: Option<SpecificDiscount>,
    pub elite_gift: Option<EliteGift>,
    pub vip_experiences: Vec<VipExperience>,
}

impl DraftStatus {
    /// Whether the data saved by `step` exists on the backend.
    ///
    /// There is no progress field: a step counts as done exactly when its
    /// category of data is present, independent of the other steps.
    pub fn step_completed(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Discounts => self.discount_all.is_some(),
            WizardStep::Gift => self.elite_gift.is_some(),
            WizardStep::Vip => self
                .vip_experiences
                .iter()
                .any(|experience| experience.tier == VipTier::Vip),
            WizardStep::Review => self.is_complete || self.status != PackageStatus::Draft,
        }
    }

    pub fn completed_steps(&self) -> Vec<WizardStep> {
        WizardStep::ALL
            .into_iter()
            .filter(|step| self.step_completed(*step))
            .collect()
    }
}

/// A package as shown in the management list.
#[derive(Clone, Debug, PartialEq)]
pub struct PackageSummary {
    pub id: PackageId,
    pub business_name: String,
    pub status: PackageStatus,
    pub is_active: bool,
    pub is_complete: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub modified_at: NaiveDateTime,
}

/// Start and end date of a package finalized on `start`.
///
/// Month arithmetic clamps to the last day of the month, so a package
/// started on 31 August for 6 months ends on the last day of February.
pub fn validity_window(start: NaiveDate, duration: DurationMonths) -> (NaiveDate, NaiveDate) {
    let end = start
        .checked_add_months(Months::new(duration.months()))
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}
