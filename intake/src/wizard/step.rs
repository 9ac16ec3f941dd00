// Wizard steps
// Six ordered sections; navigation never leaves 1..=6.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Identity,
    Travel,
    Health,
    Vaccination,
    Referral,
    Summary,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Identity,
        Step::Travel,
        Step::Health,
        Step::Vaccination,
        Step::Referral,
        Step::Summary,
    ];

    pub const FIRST: Step = Step::Identity;
    pub const LAST: Step = Step::Summary;

    /// 1-based step number as used by the form API (`step_reached`).
    pub fn number(self) -> u8 {
        match self {
            Step::Identity => 1,
            Step::Travel => 2,
            Step::Health => 3,
            Step::Vaccination => 4,
            Step::Referral => 5,
            Step::Summary => 6,
        }
    }

    pub fn from_number(n: u8) -> Option<Step> {
        Step::ALL.iter().copied().find(|s| s.number() == n)
    }

    /// Next step, clamped to the summary.
    pub fn next(self) -> Step {
        Step::from_number(self.number() + 1).unwrap_or(Step::LAST)
    }

    /// Previous step, clamped to identity.
    pub fn prev(self) -> Step {
        Step::from_number(self.number().saturating_sub(1)).unwrap_or(Step::FIRST)
    }

    pub fn as_id(self) -> &'static str {
        match self {
            Step::Identity => "identity",
            Step::Travel => "travel",
            Step::Health => "health",
            Step::Vaccination => "vaccination",
            Step::Referral => "referral",
            Step::Summary => "summary",
        }
    }

    pub fn from_id(id: &str) -> Option<Step> {
        let id = id.trim().to_ascii_lowercase();
        Step::ALL.iter().copied().find(|s| s.as_id() == id)
    }
}
