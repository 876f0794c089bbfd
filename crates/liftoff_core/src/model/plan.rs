//! Subscription plan catalog shown by upgrade surfaces.
//!
//! Quotas are advisory: the backend enforces them per request using the
//! tier header, core only describes them.

use crate::model::tier::Tier;

/// Daily usage allowances. `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyQuotas {
    pub note_generations: Option<u32>,
    pub note_regenerations: Option<u32>,
    pub tests: Option<u32>,
    pub flashcard_generations: Option<u32>,
    pub flowcharts: Option<u32>,
    pub flowchart_regenerations: Option<u32>,
    pub assistant_messages: Option<u32>,
}

/// Presentation data for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanDescriptor {
    pub tier: Tier,
    pub name: &'static str,
    pub emoji: &'static str,
    pub price: &'static str,
    pub period: &'static str,
    pub badge: Option<&'static str>,
    pub quotas: DailyQuotas,
}

const FREE_PLAN: PlanDescriptor = PlanDescriptor {
    tier: Tier::Free,
    name: "Free",
    emoji: "🆓",
    price: "$0",
    period: "/forever",
    badge: None,
    quotas: DailyQuotas {
        note_generations: Some(1),
        note_regenerations: Some(2),
        tests: Some(2),
        flashcard_generations: Some(3),
        flowcharts: Some(2),
        flowchart_regenerations: Some(1),
        assistant_messages: Some(10),
    },
};

const PRO_PLAN: PlanDescriptor = PlanDescriptor {
    tier: Tier::Pro,
    name: "Pro",
    emoji: "⭐",
    price: "$9.99",
    period: "/month",
    badge: Some("POPULAR"),
    quotas: DailyQuotas {
        note_generations: Some(15),
        note_regenerations: Some(50),
        tests: Some(30),
        flashcard_generations: Some(20),
        flowcharts: Some(20),
        flowchart_regenerations: Some(50),
        assistant_messages: None,
    },
};

const ULTRA_PLAN: PlanDescriptor = PlanDescriptor {
    tier: Tier::Ultra,
    name: "Ultra",
    emoji: "👑",
    price: "$19.99",
    period: "/month",
    badge: Some("BEST VALUE"),
    quotas: DailyQuotas {
        note_generations: None,
        note_regenerations: None,
        tests: None,
        flashcard_generations: None,
        flowcharts: None,
        flowchart_regenerations: None,
        assistant_messages: None,
    },
};

impl Tier {
    pub fn plan(self) -> &'static PlanDescriptor {
        match self {
            Self::Free => &FREE_PLAN,
            Self::Pro => &PRO_PLAN,
            Self::Ultra => &ULTRA_PLAN,
        }
    }
}

/// All plans in upgrade order.
pub fn plan_catalog() -> [&'static PlanDescriptor; 3] {
    [&FREE_PLAN, &PRO_PLAN, &ULTRA_PLAN]
}

#[cfg(test)]
mod tests {
    use super::plan_catalog;
    use crate::model::tier::Tier;

    #[test]
    fn catalog_is_ordered_by_tier() {
        let tiers: Vec<Tier> = plan_catalog().iter().map(|plan| plan.tier).collect();
        assert_eq!(tiers, Tier::ALL.to_vec());
    }

    #[test]
    fn ultra_has_no_quota_limits() {
        let quotas = Tier::Ultra.plan().quotas;
        assert_eq!(quotas.note_generations, None);
        assert_eq!(quotas.assistant_messages, None);
        assert_eq!(Tier::Free.plan().quotas.note_generations, Some(1));
    }
}
