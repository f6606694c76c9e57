//! Third wizard step: VIP and VIP+ experiences.

use std::collections::BTreeSet;

use crate::domain::types::VipExperienceId;
use crate::domain::vip::{VipCatalog, VipExperience, VipTier};
use crate::forms::FormError;

/// Selected experience ids, kept apart per catalog tier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VipForm {
    pub vip: BTreeSet<VipExperienceId>,
    pub vip_plus: BTreeSet<VipExperienceId>,
}

impl VipForm {
    pub fn from_saved(experiences: &[VipExperience]) -> Self {
        let mut form = Self::default();
        for experience in experiences {
            form.select(experience.id, experience.tier);
        }
        form
    }

    pub fn select(&mut self, id: VipExperienceId, tier: VipTier) {
        match tier {
            VipTier::Vip => self.vip.insert(id),
            VipTier::VipPlus => self.vip_plus.insert(id),
        };
    }

    pub fn deselect(&mut self, id: VipExperienceId) {
        self.vip.remove(&id);
        self.vip_plus.remove(&id);
    }

    pub fn is_selected(&self, id: VipExperienceId) -> bool {
        self.vip.contains(&id) || self.vip_plus.contains(&id)
    }

    /// All selected ids, VIP tier first.
    pub fn selected(&self) -> Vec<VipExperienceId> {
        self.vip.iter().chain(self.vip_plus.iter()).copied().collect()
    }

    /// Validates the selection and returns the ids to persist.
    ///
    /// Every id must be offered by the catalog.
    pub fn validate(&self, catalog: &VipCatalog) -> Result<Vec<VipExperienceId>, FormError> {
        if self.vip.is_empty() {
            return Err(FormError::MissingVipExperience);
        }
        if let Some(unknown) = self
            .selected()
            .into_iter()
            .find(|id| catalog.get(*id).is_none())
        {
            return Err(FormError::UnknownVipExperience(unknown.get()));
        }
        Ok(self.selected())
    }
}
