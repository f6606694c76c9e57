//! In-progress wizard state and its pure transition functions.
//!
//! [`WizardState`] is owned by exactly one wizard session. Nothing here
//! talks to the backend: the session validates a step with
//! [`WizardState::validate_step`], persists the returned payload and feeds
//! the outcome back through [`WizardState::apply_step_result`].

use std::collections::BTreeMap;

use crate::domain::package::{DiscountUpdate, DraftStatus, EliteGift, PackageStatus};
use crate::domain::types::{DurationMonths, VipExperienceId};
use crate::domain::vip::VipCatalog;
use crate::domain::wizard::WizardStep;
use crate::forms::FormError;
use crate::forms::discounts::{DiscountsForm, DiscountsPayload};
use crate::forms::gift::GiftForm;
use crate::forms::review::ReviewForm;
use crate::forms::vip::VipForm;

/// Inputs of all four steps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WizardForm {
    pub discounts: DiscountsForm,
    pub gift: GiftForm,
    pub vip: VipForm,
    pub review: ReviewForm,
}

impl WizardForm {
    /// Rebuilds the inputs from whatever the backend has persisted.
    ///
    /// Each category is restored on its own, so a draft with a saved VIP
    /// selection but no gift yields a filled VIP step and an empty gift step.
    pub fn from_draft_status(status: &DraftStatus) -> Self {
        Self {
            discounts: DiscountsForm::from_saved(
                status.discount_all.as_ref(),
                status.specific_discount.as_ref(),
            ),
            gift: GiftForm::from_saved(status.elite_gift.as_ref()),
            vip: VipForm::from_saved(&status.vip_experiences),
            review: ReviewForm::default(),
        }
    }
}

/// What a validated step asks the backend to persist.
#[derive(Clone, Debug, PartialEq)]
pub enum StepPayload {
    Discounts(DiscountUpdate),
    Gift(EliteGift),
    Vip(Vec<VipExperienceId>),
    Finalize(DurationMonths),
}

#[derive(Clone, Debug, PartialEq)]
pub struct WizardState {
    pub current_step: WizardStep,
    pub status: PackageStatus,
    pub form: WizardForm,
    pub catalog: VipCatalog,
    /// Validation messages keyed by input name.
    pub field_errors: BTreeMap<&'static str, String>,
    /// Step-level message, e.g. a rejected save.
    pub banner: Option<String>,
    /// VIP selection as the backend last stored it.
    pub saved_vip: VipForm,
}

impl WizardState {
    #[must_use]
    pub fn new(catalog: VipCatalog) -> Self {
        Self {
            current_step: WizardStep::Discounts,
            status: PackageStatus::Draft,
            form: WizardForm::default(),
            catalog,
            field_errors: BTreeMap::new(),
            banner: None,
            saved_vip: VipForm::default(),
        }
    }

    /// State for a reopened draft. Always starts on the first step.
    #[must_use]
    pub fn resumed(status: &DraftStatus, catalog: VipCatalog) -> Self {
        Self {
            status: status.status,
            form: WizardForm::from_draft_status(status),
            saved_vip: VipForm::from_saved(&status.vip_experiences),
            ..Self::new(catalog)
        }
    }

    /// Validates the inputs of `step`, returning what has to be persisted.
    pub fn validate_step(&self, step: WizardStep) -> Result<StepPayload, FormError> {
        match step {
            WizardStep::Discounts => DiscountsPayload::try_from(&self.form.discounts)
                .map(|payload| StepPayload::Discounts(payload.into())),
            WizardStep::Gift => EliteGift::try_from(&self.form.gift).map(StepPayload::Gift),
            WizardStep::Vip => self.form.vip.validate(&self.catalog).map(StepPayload::Vip),
            WizardStep::Review => {
                DurationMonths::try_from(&self.form.review).map(StepPayload::Finalize)
            }
        }
    }

    /// Shows `error` next to its input, or as a banner when it has none.
    pub fn record_validation_error(&mut self, error: &FormError) {
        self.field_errors.clear();
        self.banner = None;
        match error.field() {
            Some(field) => {
                self.field_errors.insert(field, error.to_string());
            }
            None => self.banner = Some(error.to_string()),
        }
    }

    /// Applies the outcome of persisting `step`.
    ///
    /// A success moves one step forward (or marks the package pending after
    /// the review step); a failure keeps the step and shows the message.
    pub fn apply_step_result(&mut self, step: WizardStep, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.field_errors.clear();
                self.banner = None;
                match step.next() {
                    Some(next) => self.current_step = next,
                    None => self.status = PackageStatus::Pending,
                }
            }
            Err(message) => {
                self.current_step = step;
                self.banner = Some(message);
            }
        }
    }

    /// Remembers a VIP selection the backend accepted.
    pub fn record_saved_vip(&mut self, experience_ids: &[VipExperienceId]) {
        let mut saved = VipForm::default();
        for id in experience_ids {
            if let Some(tier) = self.catalog.tier_of(*id) {
                saved.select(*id, tier);
            }
        }
        self.saved_vip = saved;
    }

    /// Checks the stored VIP selection before finalizing.
    ///
    /// The VIP inputs stay editable after step 3, so the stored selection
    /// must both be valid and match what is on screen.
    pub fn validate_saved_vip(&self) -> Result<(), FormError> {
        self.saved_vip.validate(&self.catalog)?;
        if self.saved_vip != self.form.vip {
            return Err(FormError::UnsavedVipSelection);
        }
        Ok(())
    }

    /// Applies the outcome of removing the specific discount.
    pub fn apply_specific_removal(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.form.discounts.clear_specific();
                self.banner = None;
            }
            Err(message) => self.banner = Some(message),
        }
    }

    /// Moves one step back without validating; returns the step shown.
    pub fn retreat(&mut self) -> WizardStep {
        if let Some(previous) = self.current_step.previous() {
            self.current_step = previous;
            self.field_errors.clear();
            self.banner = None;
        }
        self.current_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::package::{DiscountAll, GiftThreshold};
    use crate::domain::types::{NonEmptyString, Percentage};
    use crate::domain::vip::{VipExperience, VipTier};

    #[test]
    fn resumed_state_prefills_only_saved_categories() {
        let status = DraftStatus {
            discount_all: Some(DiscountAll {
                percentage: Percentage::new(20.0).unwrap(),
            }),
            ..DraftStatus::default()
        };

        let state = WizardState::resumed(&status, VipCatalog::default());

        assert_eq!(state.current_step, WizardStep::Discounts);
        assert_eq!(state.form.discounts.discount_all_percentage, "20");
        assert_eq!(state.form.gift, GiftForm::default());
        assert!(state.form.vip.vip.is_empty());
    }

    #[test]
    fn resumed_state_partitions_saved_vip_by_tier() {
        let status = DraftStatus {
            elite_gift: Some(EliteGift {
                description: NonEmptyString::new("Cinema ticket").unwrap(),
                threshold: GiftThreshold::Amount(500.0),
            }),
            vip_experiences: vec![
                VipExperience {
                    id: VipExperienceId::new(3).unwrap(),
                    name: "Lounge".into(),
                    description: None,
                    tier: VipTier::Vip,
                },
                VipExperience {
                    id: VipExperienceId::new(4).unwrap(),
                    name: "Chauffeur".into(),
                    description: None,
                    tier: VipTier::VipPlus,
                },
            ],
            ..DraftStatus::default()
        };

        let form = WizardForm::from_draft_status(&status);

        assert_eq!(form.gift.amount_threshold, "500");
        assert_eq!(form.vip.vip.len(), 1);
        assert_eq!(form.vip.vip_plus.len(), 1);
        assert!(form.discounts.discount_all_percentage.is_empty());
    }

    #[test]
    fn failed_save_keeps_step_and_shows_banner() {
        let mut state = WizardState::new(VipCatalog::default());
        state.apply_step_result(WizardStep::Discounts, Err("server said no".into()));

        assert_eq!(state.current_step, WizardStep::Discounts);
        assert_eq!(state.banner.as_deref(), Some("server said no"));

        state.apply_step_result(WizardStep::Discounts, Ok(()));
        assert_eq!(state.current_step, WizardStep::Gift);
        assert_eq!(state.banner, None);
    }

    #[test]
    fn successful_review_marks_pending() {
        let mut state = WizardState::new(VipCatalog::default());
        state.current_step = WizardStep::Review;
        state.apply_step_result(WizardStep::Review, Ok(()));

        assert_eq!(state.current_step, WizardStep::Review);
        assert_eq!(state.status, PackageStatus::Pending);
    }

    #[test]
    fn validation_error_lands_on_its_field() {
        let mut state = WizardState::new(VipCatalog::default());
        let error = state.validate_step(WizardStep::Discounts).unwrap_err();
        state.record_validation_error(&error);

        assert_eq!(
            state.field_errors.get("discount_all_percentage").map(String::as_str),
            Some("overall discount percentage is required")
        );
    }

    #[test]
    fn saved_vip_must_match_inputs() {
        let lounge = VipExperienceId::new(3).unwrap();
        let chauffeur = VipExperienceId::new(4).unwrap();
        let mut state = WizardState::new(VipCatalog::new(vec![
            VipExperience {
                id: lounge,
                name: "Lounge".into(),
                description: None,
                tier: VipTier::Vip,
            },
            VipExperience {
                id: chauffeur,
                name: "Chauffeur".into(),
                description: None,
                tier: VipTier::VipPlus,
            },
        ]));
        assert_eq!(
            state.validate_saved_vip(),
            Err(FormError::MissingVipExperience)
        );

        state.form.vip.select(lounge, VipTier::Vip);
        state.record_saved_vip(&[lounge]);
        assert_eq!(state.validate_saved_vip(), Ok(()));

        state.form.vip.select(chauffeur, VipTier::VipPlus);
        assert_eq!(
            state.validate_saved_vip(),
            Err(FormError::UnsavedVipSelection)
        );
    }

    #[test]
    fn retreat_stops_at_first_step() {
        let mut state = WizardState::new(VipCatalog::default());
        state.current_step = WizardStep::Vip;

        assert_eq!(state.retreat(), WizardStep::Gift);
        assert_eq!(state.retreat(), WizardStep::Discounts);
        assert_eq!(state.retreat(), WizardStep::Discounts);
    }
}
