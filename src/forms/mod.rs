//! Raw wizard inputs and their validation into persistable payloads.
//!
//! Every step form keeps the values exactly as the user typed them. Turning a
//! form into its payload is the validation: the first failing rule wins and
//! is reported as a [`FormError`].

use thiserror::Error;
use validator::ValidationErrors;

pub mod discounts;
pub mod gift;
pub mod review;
pub mod vip;
pub mod wizard;

#[derive(Debug, Error, Clone, PartialEq)]
/// Errors that can occur when validating a wizard step.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("overall discount percentage is required")]
    MissingDiscountPercentage,

    #[error("overall discount percentage must be a number between 0 and 100")]
    InvalidDiscountPercentage,

    #[error("specific discount title is required")]
    MissingSpecificTitle,

    #[error("specific discount percentage is required")]
    MissingSpecificPercentage,

    #[error("specific discount percentage must be a number between 0 and 100")]
    InvalidSpecificPercentage,

    #[error(
        "specific discount ({specific}%) must be greater than the overall discount ({overall}%)"
    )]
    SpecificNotGreater { specific: f64, overall: f64 },

    #[error("gift description is required")]
    MissingGiftDescription,

    #[error("purchase amount threshold is required")]
    MissingAmountThreshold,

    #[error("purchase amount threshold must be a number greater than zero")]
    InvalidAmountThreshold,

    #[error("purchase count threshold is required")]
    MissingCountThreshold,

    #[error("purchase count threshold must be a whole number greater than zero")]
    InvalidCountThreshold,

    #[error("select at least one VIP experience")]
    MissingVipExperience,

    #[error("unknown VIP experience {0}")]
    UnknownVipExperience(i32),

    #[error("the VIP selection changed after it was saved; go back to step 3 to save it")]
    UnsavedVipSelection,

    #[error("package duration is required")]
    MissingDuration,

    #[error("package duration must be 3, 6, 9 or 12 months")]
    InvalidDuration,
}

impl FormError {
    /// Name of the input the error belongs to, `None` for step-level errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            FormError::Validation(errors) => errors
                .field_errors()
                .keys()
                .next()
                .and_then(|key| known_field(key)),
            FormError::MissingDiscountPercentage | FormError::InvalidDiscountPercentage => {
                Some("discount_all_percentage")
            }
            FormError::MissingSpecificTitle => Some("specific_title"),
            FormError::MissingSpecificPercentage
            | FormError::InvalidSpecificPercentage
            | FormError::SpecificNotGreater { .. } => Some("specific_percentage"),
            FormError::MissingGiftDescription => Some("gift_description"),
            FormError::MissingAmountThreshold | FormError::InvalidAmountThreshold => {
                Some("amount_threshold")
            }
            FormError::MissingCountThreshold | FormError::InvalidCountThreshold => {
                Some("count_threshold")
            }
            FormError::MissingVipExperience
            | FormError::UnknownVipExperience(_)
            | FormError::UnsavedVipSelection => Some("vip_experiences"),
            FormError::MissingDuration | FormError::InvalidDuration => Some("duration_months"),
        }
    }
}

/// Maps a validator field key onto the static field names used in the UI.
fn known_field(key: &str) -> Option<&'static str> {
    [
        "specific_title",
        "specific_description",
        "gift_description",
    ]
    .into_iter()
    .find(|field| *field == key)
}

/// Trims and strips markup from free text typed by the business.
pub(crate) fn sanitize_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    ammonia::clean(trimmed).trim().to_string()
}

/// Parses a decimal typed into a numeric input. `None` for blank input.
pub(crate) fn parse_decimal(raw: &str) -> Option<Result<f64, ()>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or(()),
    )
}

/// Formats a number the way it would be typed back into an input.
pub(crate) fn format_decimal(value: f64) -> String {
    format!("{value}")
}
