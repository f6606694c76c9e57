//! Second wizard step: the elite gift.

use serde::Deserialize;
use validator::Validate;

use crate::domain::package::{EliteGift, GiftThreshold};
use crate::domain::types::NonEmptyString;
use crate::forms::{FormError, format_decimal, parse_decimal, sanitize_text};

/// Mutually exclusive choice of the gift's unlocking metric.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GiftType {
    #[default]
    Amount,
    Count,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Validate)]
/// Gift inputs as typed by the business.
pub struct GiftForm {
    #[serde(default)]
    pub gift_type: GiftType,
    #[serde(default)]
    #[validate(length(max = 255, message = "gift must be at most 255 characters"))]
    pub gift_description: String,
    /// Total purchase amount unlocking the gift.
    #[serde(default)]
    pub amount_threshold: String,
    /// Number of purchases unlocking the gift.
    #[serde(default)]
    pub count_threshold: String,
}

impl GiftForm {
    pub fn from_saved(gift: Option<&EliteGift>) -> Self {
        let Some(gift) = gift else {
            return Self::default();
        };
        match gift.threshold {
            GiftThreshold::Amount(amount) => Self {
                gift_type: GiftType::Amount,
                gift_description: gift.description.as_str().to_string(),
                amount_threshold: format_decimal(amount),
                count_threshold: String::new(),
            },
            GiftThreshold::Count(count) => Self {
                gift_type: GiftType::Count,
                gift_description: gift.description.as_str().to_string(),
                amount_threshold: String::new(),
                count_threshold: count.to_string(),
            },
        }
    }
}

impl TryFrom<&GiftForm> for EliteGift {
    type Error = FormError;

    /// Only the threshold matching `gift_type` is read; the other input is
    /// never sent.
    fn try_from(form: &GiftForm) -> Result<Self, Self::Error> {
        let description = NonEmptyString::new(sanitize_text(&form.gift_description))
            .map_err(|_| FormError::MissingGiftDescription)?;
        form.validate()?;

        let threshold = match form.gift_type {
            GiftType::Amount => match parse_decimal(&form.amount_threshold) {
                None => return Err(FormError::MissingAmountThreshold),
                Some(Err(())) => return Err(FormError::InvalidAmountThreshold),
                Some(Ok(amount)) => GiftThreshold::amount(amount)
                    .map_err(|_| FormError::InvalidAmountThreshold)?,
            },
            GiftType::Count => {
                let raw = form.count_threshold.trim();
                if raw.is_empty() {
                    return Err(FormError::MissingCountThreshold);
                }
                let count = raw
                    .parse::<u32>()
                    .map_err(|_| FormError::InvalidCountThreshold)?;
                GiftThreshold::count(count).map_err(|_| FormError::InvalidCountThreshold)?
            }
        };

        Ok(EliteGift {
            description,
            threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(gift_type: GiftType, amount: &str, count: &str) -> GiftForm {
        GiftForm {
            gift_type,
            gift_description: "Gift card".to_string(),
            amount_threshold: amount.to_string(),
            count_threshold: count.to_string(),
        }
    }

    #[test]
    fn amount_type_rejects_count_only() {
        assert_eq!(
            EliteGift::try_from(&form(GiftType::Amount, "", "5")),
            Err(FormError::MissingAmountThreshold)
        );

        let gift = EliteGift::try_from(&form(GiftType::Amount, "1000000", "")).unwrap();
        assert_eq!(gift.threshold, GiftThreshold::Amount(1_000_000.0));
    }

    #[test]
    fn count_type_requires_whole_positive_number() {
        assert_eq!(
            EliteGift::try_from(&form(GiftType::Count, "", "")),
            Err(FormError::MissingCountThreshold)
        );
        assert_eq!(
            EliteGift::try_from(&form(GiftType::Count, "", "2.5")),
            Err(FormError::InvalidCountThreshold)
        );
        assert_eq!(
            EliteGift::try_from(&form(GiftType::Count, "", "0")),
            Err(FormError::InvalidCountThreshold)
        );
        assert_eq!(
            EliteGift::try_from(&form(GiftType::Count, "", "5"))
                .unwrap()
                .threshold,
            GiftThreshold::Count(5)
        );
    }

    #[test]
    fn unselected_threshold_is_ignored() {
        let gift = EliteGift::try_from(&form(GiftType::Count, "999", "3")).unwrap();
        assert_eq!(gift.threshold.amount_value(), None);
        assert_eq!(gift.threshold.count_value(), Some(3));
    }

    #[test]
    fn description_is_required() {
        let mut blank = form(GiftType::Amount, "10", "");
        blank.gift_description = "   ".to_string();

        assert_eq!(
            EliteGift::try_from(&blank),
            Err(FormError::MissingGiftDescription)
        );
    }

    #[test]
    fn prefill_selects_saved_threshold_type() {
        let saved = EliteGift {
            description: NonEmptyString::new("Free coffee").unwrap(),
            threshold: GiftThreshold::Count(10),
        };
        let prefilled = GiftForm::from_saved(Some(&saved));

        assert_eq!(prefilled.gift_type, GiftType::Count);
        assert_eq!(prefilled.count_threshold, "10");
        assert!(prefilled.amount_threshold.is_empty());
        assert_eq!(GiftForm::from_saved(None), GiftForm::default());
    }
}
