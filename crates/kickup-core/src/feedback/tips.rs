use serde::{Deserialize, Serialize};

/// Upper bound on tips shown after one analysis.
pub const MAX_TIPS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipFocus {
    Balance,
    Contact,
    Height,
    Arms,
    Rhythm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachingTip {
    pub focus: TipFocus,
    /// Lower is more important.
    pub priority: u8,
    pub text: String,
}

// (priority, focus, text); kept unsorted on purpose so ordering comes from
// `generate_tips`.
const CATALOG: &[(u8, TipFocus, &str)] = &[
    (3, TipFocus::Height, "Keep touches below waist height"),
    (1, TipFocus::Balance, "Stay light on the balls of your feet"),
    (5, TipFocus::Rhythm, "Alternate feet to build a steady rhythm"),
    (2, TipFocus::Contact, "Strike with your laces, toes pointed down"),
    (4, TipFocus::Arms, "Relax your arms out wide for balance"),
];

/// Coaching tips in fixed priority order, most important first.
pub fn generate_tips() -> Vec<CoachingTip> {
    let mut tips: Vec<CoachingTip> = CATALOG
        .iter()
        .map(|&(priority, focus, text)| CoachingTip {
            focus,
            priority,
            text: text.to_string(),
        })
        .collect();
    tips.sort_by_key(|tip| tip.priority);
    tips.truncate(MAX_TIPS);
    tips
}
