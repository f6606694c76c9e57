use std::fmt::Display;

/// Steps of the package wizard, in the order they are visited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WizardStep {
    #[default]
    Discounts,
    Gift,
    Vip,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Discounts,
        WizardStep::Gift,
        WizardStep::Vip,
        WizardStep::Review,
    ];

    /// One-based position of the step.
    pub const fn number(self) -> u8 {
        match self {
            WizardStep::Discounts => 1,
            WizardStep::Gift => 2,
            WizardStep::Vip => 3,
            WizardStep::Review => 4,
        }
    }

    pub const fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Discounts => Some(WizardStep::Gift),
            WizardStep::Gift => Some(WizardStep::Vip),
            WizardStep::Vip => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    pub const fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Discounts => None,
            WizardStep::Gift => Some(WizardStep::Discounts),
            WizardStep::Vip => Some(WizardStep::Gift),
            WizardStep::Review => Some(WizardStep::Vip),
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            WizardStep::Discounts => "Discount",
            WizardStep::Gift => "Gift",
            WizardStep::Vip => "VIP",
            WizardStep::Review => "Review",
        }
    }
}

impl Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "step {} ({})", self.number(), self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_linear() {
        for pair in WizardStep::ALL.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert_eq!(pair[1].previous(), Some(pair[0]));
            assert_eq!(pair[0].number() + 1, pair[1].number());
        }
        assert_eq!(WizardStep::Discounts.previous(), None);
        assert_eq!(WizardStep::Review.next(), None);
    }
}
