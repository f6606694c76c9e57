use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::domain::types::VipExperienceId;

/// Catalog tier of a VIP experience.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VipTier {
    #[serde(rename = "VIP")]
    Vip,
    #[serde(rename = "VIP+")]
    VipPlus,
}

impl Display for VipTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VipTier::Vip => write!(f, "VIP"),
            VipTier::VipPlus => write!(f, "VIP+"),
        }
    }
}

/// Premium perk definition a business can opt into offering.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VipExperience {
    pub id: VipExperienceId,
    pub name: String,
    pub description: Option<String>,
    pub tier: VipTier,
}

/// Selectable VIP experiences, in the order the backend returned them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VipCatalog {
    experiences: Vec<VipExperience>,
}

impl VipCatalog {
    #[must_use]
    pub fn new(experiences: Vec<VipExperience>) -> Self {
        Self { experiences }
    }

    pub fn experiences(&self) -> &[VipExperience] {
        &self.experiences
    }

    pub fn get(&self, id: VipExperienceId) -> Option<&VipExperience> {
        self.experiences.iter().find(|experience| experience.id == id)
    }

    pub fn tier_of(&self, id: VipExperienceId) -> Option<VipTier> {
        self.get(id).map(|experience| experience.tier)
    }

    pub fn by_tier(&self, tier: VipTier) -> impl Iterator<Item = &VipExperience> {
        self.experiences
            .iter()
            .filter(move |experience| experience.tier == tier)
    }

    pub fn is_empty(&self) -> bool {
        self.experiences.is_empty()
    }
}
