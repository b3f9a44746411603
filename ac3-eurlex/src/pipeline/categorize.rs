//! Tracking category assignment.
//!
//! Categorization is an ordered list of `(predicate, outcome)` rules; the
//! first rule whose predicate holds decides the category, the tracked law and
//! the priority. The final rule always holds, so every document gets exactly
//! one category.

use crate::pipeline::scoring::{references_ai_act, ScoringInput, ScoringProfile};
use crate::types::{Category, Document, Priority};

/// Label for documents tied to the AI-literacy obligation.
pub const ARTICLE_4_LAW: &str = "EU AI Act Article 4";

/// Label for the AI Act itself.
pub const AI_ACT_LAW: &str = "EU AI Act";

/// Score at which an otherwise uncategorized document is escalated to `High`.
pub const DISCOVERY_HIGH_THRESHOLD: u8 = 80;

/// Score at which a feed document is `High` priority.
pub const FEED_HIGH_THRESHOLD: u8 = 70;

const CHANGE_MARKERS: &[&str] = &["amend", "modify", "supplement", "implementing", "delegated"];

/// Outcome of categorizing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// `None` for documents scored with the feed profile.
    pub category: Option<Category>,
    pub tracked_law: &'static str,
    pub priority: Priority,
}

struct CategoryRule {
    category: Category,
    tracked_law: &'static str,
    applies: fn(&ScoringInput<'_>) -> bool,
    priority: fn(u8) -> Priority,
}

const AMENDMENT: CategoryRule = CategoryRule {
    category: Category::Amendment,
    tracked_law: ARTICLE_4_LAW,
    applies: |input| input.has_article_4_marker() && input.contains_any(CHANGE_MARKERS),
    priority: |_| Priority::Critical,
};

const GUIDANCE: CategoryRule = CategoryRule {
    category: Category::Guidance,
    tracked_law: ARTICLE_4_LAW,
    applies: |input| input.has_article_4_marker(),
    priority: |_| Priority::High,
};

const CORE_REGULATION: CategoryRule = CategoryRule {
    category: Category::CoreRegulation,
    tracked_law: AI_ACT_LAW,
    applies: |input| references_ai_act(&input.document.identifier),
    priority: |_| Priority::High,
};

const DISCOVERY: CategoryRule = CategoryRule {
    category: Category::Discovery,
    tracked_law: "",
    applies: |_| true,
    priority: |score| {
        if score >= DISCOVERY_HIGH_THRESHOLD {
            Priority::High
        } else {
            Priority::Medium
        }
    },
};

/// Categorization rules in precedence order.
const RULES: &[CategoryRule] = &[AMENDMENT, GUIDANCE, CORE_REGULATION, DISCOVERY];

/// Categorize a document scored with the knowledge profile.
pub fn categorize(document: &Document, score: u8) -> Classification {
    let input = ScoringInput::new(document, ScoringProfile::Knowledge);
    let rule = RULES
        .iter()
        .find(|rule| (rule.applies)(&input))
        .unwrap_or(&DISCOVERY);

    Classification {
        category: Some(rule.category),
        tracked_law: rule.tracked_law,
        priority: (rule.priority)(score),
    }
}

/// Classify under `profile`. Feed documents carry a priority only.
pub fn classify(document: &Document, score: u8, profile: ScoringProfile) -> Classification {
    match profile {
        ScoringProfile::Knowledge => categorize(document, score),
        ScoringProfile::Feed => Classification {
            category: None,
            tracked_law: "",
            priority: feed_priority(score),
        },
    }
}

/// Priority for feed documents, which are not categorized.
pub fn feed_priority(score: u8) -> Priority {
    if score >= FEED_HIGH_THRESHOLD {
        Priority::High
    } else {
        Priority::Medium
    }
}
