//! YAML description of a package, used to drive the wizard from the CLI.

use config::{Config, ConfigError, FileFormat};
use serde::Deserialize;

use crate::domain::types::{PackageId, TypeConstraintError, VipExperienceId};
use crate::forms::discounts::DiscountsForm;
use crate::forms::gift::{GiftForm, GiftType};
use crate::forms::review::ReviewForm;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SpecificDiscountDefinition {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub percentage: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GiftDefinition {
    pub description: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PackageDefinition {
    /// Continue this draft instead of creating a new one.
    #[serde(default)]
    pub resume_package_id: Option<i32>,
    pub discount_all_percentage: f64,
    #[serde(default)]
    pub specific_discount: Option<SpecificDiscountDefinition>,
    pub gift: GiftDefinition,
    #[serde(default)]
    pub vip_experience_ids: Vec<i32>,
    pub duration_months: u32,
}

impl PackageDefinition {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::new(path, FileFormat::Yaml))
            .build()?
            .try_deserialize()
    }

    pub fn resume_id(&self) -> Result<Option<PackageId>, TypeConstraintError> {
        self.resume_package_id.map(PackageId::new).transpose()
    }

    pub fn experience_ids(&self) -> Result<Vec<VipExperienceId>, TypeConstraintError> {
        self.vip_experience_ids
            .iter()
            .map(|id| VipExperienceId::new(*id))
            .collect()
    }

    pub fn discounts_form(&self) -> DiscountsForm {
        let mut form = DiscountsForm {
            discount_all_percentage: self.discount_all_percentage.to_string(),
            ..DiscountsForm::default()
        };
        if let Some(specific) = &self.specific_discount {
            form.specific_enabled = true;
            form.specific_title = specific.title.clone();
            form.specific_description = specific.description.clone();
            form.specific_percentage = specific.percentage.to_string();
        }
        form
    }

    /// A count threshold wins only when no amount is given.
    pub fn gift_form(&self) -> GiftForm {
        let gift_type = match (self.gift.amount, self.gift.count) {
            (None, Some(_)) => GiftType::Count,
            _ => GiftType::Amount,
        };
        GiftForm {
            gift_type,
            gift_description: self.gift.description.clone(),
            amount_threshold: self.gift.amount.map(|v| v.to_string()).unwrap_or_default(),
            count_threshold: self.gift.count.map(|v| v.to_string()).unwrap_or_default(),
        }
    }

    pub fn review_form(&self) -> ReviewForm {
        ReviewForm {
            duration_months: Some(self.duration_months),
        }
    }
}
