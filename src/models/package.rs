//! JSON bodies exchanged with the package endpoints.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::package::{
    DiscountAll, DiscountUpdate, DraftStatus, EliteGift, GiftThreshold, PackageStatus,
    PackageSummary, SpecificDiscount,
};
use crate::domain::types::{
    BusinessId, NonEmptyString, PackageId, Percentage, TypeConstraintError, VipExperienceId,
};
use crate::domain::vip::{VipExperience, VipTier};
use crate::models::{de_decimal, de_opt_decimal};

/// Body of the draft creation request.
#[derive(Debug, Serialize, PartialEq)]
pub struct CreatePackageRequest {
    pub business: i32,
    pub is_active: bool,
    pub is_complete: bool,
    pub status: PackageStatus,
}

impl CreatePackageRequest {
    #[must_use]
    pub fn draft(business_id: BusinessId) -> Self {
        Self {
            business: business_id.get(),
            is_active: false,
            is_complete: false,
            status: PackageStatus::Draft,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DiscountAllBody {
    pub percentage: f64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SpecificDiscountBody {
    pub title: String,
    pub description: String,
    pub percentage: f64,
}

/// Discount save; `specific_discount: null` together with the removal flag
/// drops a previously saved specific discount.
#[derive(Debug, Serialize, PartialEq)]
pub struct SaveDiscountsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_all: Option<DiscountAllBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_discount: Option<SpecificDiscountBody>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub remove_specific_discount: bool,
}

impl From<&DiscountUpdate> for SaveDiscountsRequest {
    fn from(update: &DiscountUpdate) -> Self {
        Self {
            discount_all: update.discount_all.map(|discount| DiscountAllBody {
                percentage: discount.percentage.get(),
            }),
            specific_discount: update
                .specific_discount
                .as_ref()
                .map(|specific| SpecificDiscountBody {
                    title: specific.title.as_str().to_string(),
                    description: specific.description.clone(),
                    percentage: specific.percentage.get(),
                }),
            remove_specific_discount: update.remove_specific,
        }
    }
}

impl SaveDiscountsRequest {
    /// JSON body for the request; adds the explicit `null` on removal.
    pub fn to_json(&self) -> serde_json::Value {
        let mut body = serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}));
        if self.remove_specific_discount {
            if let Some(map) = body.as_object_mut() {
                map.insert("specific_discount".into(), serde_json::Value::Null);
            }
        }
        body
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EliteGiftBody {
    pub gift: String,
    pub amount: Option<f64>,
    pub count: Option<u32>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SaveGiftRequest {
    pub elite_gift: EliteGiftBody,
}

impl From<&EliteGift> for SaveGiftRequest {
    fn from(gift: &EliteGift) -> Self {
        Self {
            elite_gift: EliteGiftBody {
                gift: gift.description.as_str().to_string(),
                amount: gift.threshold.amount_value(),
                count: gift.threshold.count_value(),
            },
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ExperienceBody {
    pub vip_experience_category_id: i32,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SaveVipRequest {
    pub experiences: Vec<ExperienceBody>,
}

impl From<&[VipExperienceId]> for SaveVipRequest {
    fn from(ids: &[VipExperienceId]) -> Self {
        Self {
            experiences: ids
                .iter()
                .map(|id| ExperienceBody {
                    vip_experience_category_id: id.get(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FinalizeRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PackageStatus,
    pub is_complete: bool,
}

/// Catalog entry as served by the VIP categories endpoint.
#[derive(Debug, Deserialize)]
pub struct VipCategoryModel {
    pub id: i32,
    pub vip_type: VipTier,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<VipCategoryModel> for VipExperience {
    type Error = TypeConstraintError;

    fn try_from(model: VipCategoryModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: VipExperienceId::new(model.id)?,
            name: model.name,
            description: model.description.filter(|text| !text.trim().is_empty()),
            tier: model.vip_type,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct DiscountAllModel {
    #[serde(deserialize_with = "de_decimal")]
    pub percentage: f64,
}

#[derive(Debug, Deserialize)]
pub struct SpecificDiscountModel {
    #[serde(deserialize_with = "de_decimal")]
    pub percentage: f64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EliteGiftModel {
    pub gift: String,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct VipExperienceModel {
    pub vip_experience_category: VipCategoryModel,
}

/// Detail view of a package.
#[derive(Debug, Deserialize)]
pub struct PackageDetailModel {
    pub id: i32,
    #[serde(default)]
    pub status: PackageStatus,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub discount_all: Option<DiscountAllModel>,
    #[serde(default)]
    pub specific_discount: Option<SpecificDiscountModel>,
    #[serde(default)]
    pub elite_gift: Option<EliteGiftModel>,
    #[serde(default)]
    pub experiences: Vec<VipExperienceModel>,
}

impl TryFrom<PackageDetailModel> for DraftStatus {
    type Error = TypeConstraintError;

    fn try_from(model: PackageDetailModel) -> Result<Self, Self::Error> {
        let discount_all = model
            .discount_all
            .map(|discount| {
                Percentage::new(discount.percentage).map(|percentage| DiscountAll { percentage })
            })
            .transpose()?;

        // A specific discount without a title cannot be edited; treat as absent.
        let specific_discount = match model.specific_discount {
            Some(specific) => match specific.title.map(NonEmptyString::new) {
                Some(Ok(title)) => Some(SpecificDiscount {
                    title,
                    description: specific.description.unwrap_or_default(),
                    percentage: Percentage::new(specific.percentage)?,
                }),
                _ => None,
            },
            None => None,
        };

        let elite_gift = match model.elite_gift {
            Some(gift) => {
                let threshold = match (gift.amount, gift.count) {
                    (Some(amount), _) => Some(GiftThreshold::amount(amount)?),
                    (None, Some(count)) => Some(GiftThreshold::count(count)?),
                    (None, None) => None,
                };
                match (NonEmptyString::new(gift.gift), threshold) {
                    (Ok(description), Some(threshold)) => Some(EliteGift {
                        description,
                        threshold,
                    }),
                    _ => None,
                }
            }
            None => None,
        };

        let vip_experiences = model
            .experiences
            .into_iter()
            .map(|experience| VipExperience::try_from(experience.vip_experience_category))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            status: model.status,
            is_complete: model.is_complete,
            discount_all,
            specific_discount,
            elite_gift,
            vip_experiences,
        })
    }
}

/// Minimal response of the draft creation endpoint.
#[derive(Debug, Deserialize)]
pub struct CreatedPackageModel {
    pub id: i32,
}

/// Row of the package list endpoint.
#[derive(Debug, Deserialize)]
pub struct PackageListModel {
    pub id: i32,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub status: PackageStatus,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(with = "backend_datetime")]
    pub created_at: NaiveDateTime,
    #[serde(with = "backend_datetime")]
    pub modified_at: NaiveDateTime,
}

impl TryFrom<PackageListModel> for PackageSummary {
    type Error = TypeConstraintError;

    fn try_from(model: PackageListModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PackageId::new(model.id)?,
            business_name: model.business_name,
            status: model.status,
            is_active: model.is_active,
            is_complete: model.is_complete,
            start_date: model.start_date,
            end_date: model.end_date,
            created_at: model.created_at,
            modified_at: model.modified_at,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ToggleActiveModel {
    pub id: i32,
    pub is_active: bool,
}

/// List endpoints answer either a bare array or a paginated page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Plain(Vec<T>),
    Paginated { results: Vec<T> },
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Plain(items) => items,
            ListResponse::Paginated { results } => results,
        }
    }
}

/// Timestamps arrive as RFC 3339 with an offset; the offset is dropped.
mod backend_datetime {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.naive_utc())
            .or_else(|_| raw.parse::<NaiveDateTime>())
            .map_err(serde::de::Error::custom)
    }
}
