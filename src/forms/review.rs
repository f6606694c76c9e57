//! Fourth wizard step: validity duration.

use serde::Deserialize;

use crate::domain::types::DurationMonths;
use crate::forms::FormError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub duration_months: Option<u32>,
}

impl TryFrom<&ReviewForm> for DurationMonths {
    type Error = FormError;

    fn try_from(form: &ReviewForm) -> Result<Self, Self::Error> {
        let months = form.duration_months.ok_or(FormError::MissingDuration)?;
        DurationMonths::try_from(months).map_err(|_| FormError::InvalidDuration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_is_required_and_enumerated() {
        assert_eq!(
            DurationMonths::try_from(&ReviewForm::default()),
            Err(FormError::MissingDuration)
        );
        assert_eq!(
            DurationMonths::try_from(&ReviewForm {
                duration_months: Some(5)
            }),
            Err(FormError::InvalidDuration)
        );
        assert_eq!(
            DurationMonths::try_from(&ReviewForm {
                duration_months: Some(12)
            }),
            Ok(DurationMonths::Twelve)
        );
    }
}
