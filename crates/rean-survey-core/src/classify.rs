use rean_survey_content::{render_template, AVOID_FAILURE_TEXT, MIXED_TEXT, SUCCESS_TEXT};
use serde::Serialize;

/// Highest score still classified as motivation to avoid failures.
pub const AVOID_FAILURE_MAX: usize = 7;
/// Lowest score classified as motivation for success.
pub const SUCCESS_MIN: usize = 14;
/// Mixed scores up to this value lean toward avoiding failure.
pub const MIXED_TOWARD_AVOID_MAX: usize = 9;
/// Mixed scores from this value lean toward success.
pub const MIXED_TOWARD_SUCCESS_MIN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AvoidFailure,
    Mixed,
    Success,
}

impl Category {
    pub const fn title(self) -> &'static str {
        match self {
            Self::AvoidFailure => "Motivation to Avoid Failures",
            Self::Mixed => "Mixed Motivation",
            Self::Success => "Motivation for Success",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AvoidFailure => "avoid_failure",
            Self::Mixed => "mixed",
            Self::Success => "success",
        }
    }

    const fn template(self) -> &'static str {
        match self {
            Self::AvoidFailure => AVOID_FAILURE_TEXT,
            Self::Mixed => MIXED_TEXT,
            Self::Success => SUCCESS_TEXT,
        }
    }
}

/// Which pole a mixed score sits closer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lean {
    TowardAvoid,
    TowardSuccess,
    #[serde(rename = "none")]
    Neutral,
}

impl Lean {
    pub const fn clause(self) -> &'static str {
        match self {
            Self::TowardAvoid => " with a slight tendency towards avoiding failure",
            Self::TowardSuccess => " with a slight tendency towards success motivation",
            Self::Neutral => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub score: usize,
    pub max_score: usize,
    pub category: Category,
    /// Set only for [`Category::Mixed`].
    pub lean: Option<Lean>,
    pub title: &'static str,
    pub display_text: String,
}

/// Maps a score onto its band. The bands `..=7`, `8..=13` and `14..`
/// partition every integer, so there is no failure case.
pub fn categorize(score: usize) -> (Category, Option<Lean>) {
    if score <= AVOID_FAILURE_MAX {
        (Category::AvoidFailure, None)
    } else if score >= SUCCESS_MIN {
        (Category::Success, None)
    } else if score <= MIXED_TOWARD_AVOID_MAX {
        (Category::Mixed, Some(Lean::TowardAvoid))
    } else if score >= MIXED_TOWARD_SUCCESS_MIN {
        (Category::Mixed, Some(Lean::TowardSuccess))
    } else {
        (Category::Mixed, Some(Lean::Neutral))
    }
}

pub fn classify(score: usize, catalog_len: usize) -> Classification {
    let (category, lean) = categorize(score);
    let clause = lean.map_or("", Lean::clause);

    Classification {
        score,
        max_score: catalog_len,
        category,
        lean,
        title: category.title(),
        display_text: render_template(category.template(), clause),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_partition_full_range() {
        for s in 0..=20 {
            let c = classify(s, 20);
            let expected = match s {
                0..=7 => Category::AvoidFailure,
                8..=13 => Category::Mixed,
                _ => Category::Success,
            };
            assert_eq!(c.category, expected, "score {s}");
            assert_eq!(c.lean.is_some(), expected == Category::Mixed, "score {s}");
        }
    }

    #[test]
    fn mixed_leans() {
        assert_eq!(categorize(8).1, Some(Lean::TowardAvoid));
        assert_eq!(categorize(9).1, Some(Lean::TowardAvoid));
        assert_eq!(categorize(10).1, Some(Lean::Neutral));
        assert_eq!(categorize(11).1, Some(Lean::Neutral));
        assert_eq!(categorize(12).1, Some(Lean::TowardSuccess));
        assert_eq!(categorize(13).1, Some(Lean::TowardSuccess));
    }

    #[test]
    fn display_text_carries_lean_clause() {
        let toward = classify(9, 20);
        assert_eq!(toward.title, "Mixed Motivation");
        assert!(toward
            .display_text
            .contains("not strongly pronounced with a slight tendency towards avoiding failure."));

        let neutral = classify(10, 20);
        assert!(neutral.display_text.contains("not strongly pronounced. You likely"));

        let success = classify(17, 20);
        assert_eq!(success.title, "Motivation for Success");
        assert!(success.display_text.starts_with("Your responses indicate a strong motivation"));
        assert_eq!(success.max_score, 20);
    }
}
