//! DTOs rendered by the wizard's review step.

use crate::domain::types::DurationMonths;
use crate::domain::vip::{VipCatalog, VipExperience};
use crate::forms::wizard::WizardForm;

/// Summary of everything entered so far, shown before finalizing.
///
/// Built from the raw inputs, so it reflects what the user sees even when a
/// value does not validate yet. Empty entries are skipped.
#[derive(Debug, Default, PartialEq)]
pub struct ReviewSummary {
    pub lines: Vec<String>,
}

impl ReviewSummary {
    pub fn build(form: &WizardForm, catalog: &VipCatalog) -> Self {
        let mut lines = Vec::new();

        let overall = form.discounts.discount_all_percentage.trim();
        if !overall.is_empty() {
            lines.push(format!("Overall discount: {overall}%"));
        }

        let title = form.discounts.specific_title.trim();
        if form.discounts.specific_enabled && !title.is_empty() {
            lines.push(format!(
                "Specific discount: {title} ({}%)",
                form.discounts.specific_percentage.trim()
            ));
        }

        let gift = form.gift.gift_description.trim();
        if !gift.is_empty() {
            lines.push(format!("Gift: {gift}"));
        }

        let vip = joined_names(form.vip.vip.iter().filter_map(|id| catalog.get(*id)));
        if !vip.is_empty() {
            lines.push(format!("VIP experiences: {vip}"));
        }
        let vip_plus = joined_names(form.vip.vip_plus.iter().filter_map(|id| catalog.get(*id)));
        if !vip_plus.is_empty() {
            lines.push(format!("VIP+ experiences: {vip_plus}"));
        }

        if let Some(duration) = form
            .review
            .duration_months
            .and_then(|months| DurationMonths::try_from(months).ok())
        {
            lines.push(format!("Duration: {duration}"));
        }

        Self { lines }
    }
}

fn joined_names<'a>(experiences: impl Iterator<Item = &'a VipExperience>) -> String {
    experiences
        .map(|experience| experience.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
