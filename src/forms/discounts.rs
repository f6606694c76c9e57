//! First wizard step: overall and specific discounts.

use serde::Deserialize;
use validator::Validate;

use crate::domain::package::{DiscountAll, DiscountUpdate, SpecificDiscount};
use crate::domain::types::{NonEmptyString, Percentage};
use crate::forms::{FormError, format_decimal, parse_decimal, sanitize_text};

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Validate)]
/// Discount inputs as typed by the business.
pub struct DiscountsForm {
    /// Percentage applied to every product or service.
    #[serde(default)]
    pub discount_all_percentage: String,
    /// Whether the specific-discount sub-section is switched on.
    #[serde(default)]
    pub specific_enabled: bool,
    #[serde(default)]
    #[validate(length(max = 100, message = "title must be at most 100 characters"))]
    pub specific_title: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub specific_description: String,
    #[serde(default)]
    pub specific_percentage: String,
}

/// Validated discount configuration ready to be saved.
#[derive(Clone, Debug, PartialEq)]
pub struct DiscountsPayload {
    pub discount_all: DiscountAll,
    pub specific_discount: Option<SpecificDiscount>,
}

impl DiscountsForm {
    /// Pre-fills the form from previously persisted discounts.
    pub fn from_saved(
        discount_all: Option<&DiscountAll>,
        specific: Option<&SpecificDiscount>,
    ) -> Self {
        let mut form = Self {
            discount_all_percentage: discount_all
                .map(|discount| format_decimal(discount.percentage.get()))
                .unwrap_or_default(),
            ..Self::default()
        };
        if let Some(specific) = specific {
            form.specific_enabled = true;
            form.specific_title = specific.title.as_str().to_string();
            form.specific_description = specific.description.clone();
            form.specific_percentage = format_decimal(specific.percentage.get());
        }
        form
    }

    /// The overall discount if it is currently valid, ignoring the rest.
    pub fn discount_all(&self) -> Option<DiscountAll> {
        parse_percentage(&self.discount_all_percentage)
            .ok()
            .map(|percentage| DiscountAll { percentage })
    }

    /// Forgets the specific discount after the backend dropped it.
    pub fn clear_specific(&mut self) {
        self.specific_enabled = false;
        self.specific_title.clear();
        self.specific_description.clear();
        self.specific_percentage.clear();
    }

    fn has_specific(&self) -> bool {
        self.specific_enabled && !self.specific_title.trim().is_empty()
    }
}

fn parse_percentage(raw: &str) -> Result<Percentage, Option<()>> {
    match parse_decimal(raw) {
        None => Err(None),
        Some(Err(())) => Err(Some(())),
        Some(Ok(value)) => Percentage::new(value).map_err(|_| Some(())),
    }
}

impl TryFrom<&DiscountsForm> for DiscountsPayload {
    type Error = FormError;

    fn try_from(form: &DiscountsForm) -> Result<Self, Self::Error> {
        let overall = parse_percentage(&form.discount_all_percentage).map_err(|err| match err {
            None => FormError::MissingDiscountPercentage,
            Some(()) => FormError::InvalidDiscountPercentage,
        })?;

        let specific_discount = if form.has_specific() {
            form.validate()?;

            let specific =
                parse_percentage(&form.specific_percentage).map_err(|err| match err {
                    None => FormError::MissingSpecificPercentage,
                    Some(()) => FormError::InvalidSpecificPercentage,
                })?;

            if specific <= overall {
                return Err(FormError::SpecificNotGreater {
                    specific: specific.get(),
                    overall: overall.get(),
                });
            }

            // A title that is nothing but markup sanitizes to empty.
            let title = NonEmptyString::new(sanitize_text(&form.specific_title))
                .map_err(|_| FormError::MissingSpecificTitle)?;

            Some(SpecificDiscount {
                title,
                description: sanitize_text(&form.specific_description),
                percentage: specific,
            })
        } else {
            None
        };

        Ok(Self {
            discount_all: DiscountAll {
                percentage: overall,
            },
            specific_discount,
        })
    }
}

impl From<DiscountsPayload> for DiscountUpdate {
    fn from(payload: DiscountsPayload) -> Self {
        DiscountUpdate::save(payload.discount_all, payload.specific_discount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(overall: &str) -> DiscountsForm {
        DiscountsForm {
            discount_all_percentage: overall.to_string(),
            ..DiscountsForm::default()
        }
    }

    fn with_specific(overall: &str, specific: &str) -> DiscountsForm {
        DiscountsForm {
            specific_enabled: true,
            specific_title: "New arrivals".to_string(),
            specific_description: "Spring collection".to_string(),
            specific_percentage: specific.to_string(),
            ..form(overall)
        }
    }

    #[test]
    fn overall_percentage_is_required() {
        assert_eq!(
            DiscountsPayload::try_from(&form("")),
            Err(FormError::MissingDiscountPercentage)
        );
        assert_eq!(
            DiscountsPayload::try_from(&form("twenty")),
            Err(FormError::InvalidDiscountPercentage)
        );
        assert_eq!(
            DiscountsPayload::try_from(&form("120")),
            Err(FormError::InvalidDiscountPercentage)
        );
    }

    #[test]
    fn overall_only_has_no_specific_discount() {
        let payload = DiscountsPayload::try_from(&form(" 15 ")).unwrap();

        assert_eq!(payload.discount_all.percentage.get(), 15.0);
        assert!(payload.specific_discount.is_none());
    }

    #[test]
    fn specific_must_exceed_overall() {
        assert_eq!(
            DiscountsPayload::try_from(&with_specific("20", "20")),
            Err(FormError::SpecificNotGreater {
                specific: 20.0,
                overall: 20.0
            })
        );

        let payload = DiscountsPayload::try_from(&with_specific("20", "21")).unwrap();
        let specific = payload.specific_discount.unwrap();
        assert_eq!(specific.percentage.get(), 21.0);
        assert_eq!(specific.title.as_str(), "New arrivals");
    }

    #[test]
    fn specific_percentage_required_when_titled() {
        assert_eq!(
            DiscountsPayload::try_from(&with_specific("20", "")),
            Err(FormError::MissingSpecificPercentage)
        );
    }

    #[test]
    fn disabled_or_untitled_specific_is_ignored() {
        let mut disabled = with_specific("20", "5");
        disabled.specific_enabled = false;
        assert!(
            DiscountsPayload::try_from(&disabled)
                .unwrap()
                .specific_discount
                .is_none()
        );

        let mut untitled = with_specific("20", "5");
        untitled.specific_title = "  ".to_string();
        assert!(
            DiscountsPayload::try_from(&untitled)
                .unwrap()
                .specific_discount
                .is_none()
        );
    }

    #[test]
    fn markup_only_title_is_rejected() {
        let mut markup = with_specific("10", "30");
        markup.specific_title = "<script>x</script>".to_string();

        let err = DiscountsPayload::try_from(&markup).unwrap_err();

        assert_eq!(err, FormError::MissingSpecificTitle);
        assert_eq!(err.field(), Some("specific_title"));
    }

    #[test]
    fn overlong_title_fails_validation() {
        let mut long = with_specific("10", "30");
        long.specific_title = "x".repeat(101);

        assert!(matches!(
            DiscountsPayload::try_from(&long),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn prefill_round_trips_saved_values() {
        let payload = DiscountsPayload::try_from(&with_specific("12.5", "30")).unwrap();
        let prefilled = DiscountsForm::from_saved(
            Some(&payload.discount_all),
            payload.specific_discount.as_ref(),
        );

        assert_eq!(prefilled.discount_all_percentage, "12.5");
        assert!(prefilled.specific_enabled);
        assert_eq!(prefilled.specific_percentage, "30");
    }
}
