//! Parser for the end-of-session personality report.
//!
//! The server hands back the report as one block of decorated text: an
//! optional session banner (time, final scores, winner line) followed by
//! emoji-headed sections in a fixed order - persona title, style
//! breakdown, strongest/weakest traits, a summary paragraph, novelty
//! scores out of 100, and a one-line verdict. The wording varies from run
//! to run, so parsing is tolerant: headers match case-insensitively
//! through emoji and markdown noise, and anything unrecognizable degrades
//! to raw text rather than an error.

use lazy_static::lazy_static;
use regex::Regex;

/// One `label: n/max` entry from the scores section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLine {
    pub label: String,
    pub value: u32,
    pub max: u32,
}

/// A personality report split into display sections.
#[derive(Debug, Clone, Default)]
pub struct PersonaReport {
    /// Session banner lines ahead of the report proper (time, final
    /// scores, winner announcement).
    pub preamble: Vec<String>,
    /// Creative persona title, e.g. `The Trust Me Bro Tech Bro`.
    pub persona: Option<String>,
    pub style_breakdown: Vec<String>,
    pub strongest_traits: Vec<String>,
    pub weakest_traits: Vec<String>,
    pub summary: Option<String>,
    pub scores: Vec<ScoreLine>,
    pub verdict: Option<String>,
}

impl PersonaReport {
    /// True when no known section was recognized.
    pub fn is_unstructured(&self) -> bool {
        self.persona.is_none()
            && self.style_breakdown.is_empty()
            && self.strongest_traits.is_empty()
            && self.weakest_traits.is_empty()
            && self.summary.is_none()
            && self.scores.is_empty()
            && self.verdict.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Body,
    Style,
    Strongest,
    Weakest,
    Summary,
    Scores,
    Verdict,
    Trailer,
}

lazy_static! {
    static ref BANNER: Regex = Regex::new(r"(?i)PERSONALITY\s+ROAST\s+REPORT").expect("regex");
    static ref PERSONA: Regex =
        Regex::new(r#"(?i)Arguing\s+Persona:\s*"?(.+?)"?\s*$"#).expect("regex");
    static ref STYLE: Regex = Regex::new(r"(?i)ARGUING\s+STYLE\s+BREAKDOWN").expect("regex");
    static ref STRONGEST: Regex = Regex::new(r"(?i)STRONGEST\s+TRAITS").expect("regex");
    static ref WEAKEST: Regex = Regex::new(r"(?i)WEAKEST\s+TRAITS").expect("regex");
    static ref SUMMARY: Regex = Regex::new(r"(?i)PERSONALITY\s+SUMMARY").expect("regex");
    static ref SCORES: Regex = Regex::new(r"(?i)FUNNY\s+SCORES").expect("regex");
    static ref VERDICT: Regex = Regex::new(r"(?i)FINAL\s+VERDICT").expect("regex");
    static ref SCORE_LINE: Regex = Regex::new(r"(.+?):\s*(\d{1,3})\s*/\s*(\d{1,3})").expect("regex");
    static ref RULE: Regex = Regex::new(r"^[-—_=]{3,}$").expect("regex");
}

/// Parse a report string into display sections.
///
/// Never fails: a report with no recognizable structure comes back with
/// the raw text as its summary.
pub fn parse_report(raw: &str) -> PersonaReport {
    let mut report = PersonaReport::default();
    let mut section = Section::Preamble;
    let mut summary_lines: Vec<String> = Vec::new();

    for raw_line in raw.lines() {
        let line = clean(raw_line);
        if line.is_empty() || RULE.is_match(&line) {
            continue;
        }

        if BANNER.is_match(&line) {
            section = Section::Body;
            continue;
        }
        if let Some(caps) = PERSONA.captures(&line) {
            report.persona = Some(caps[1].trim().to_string());
            section = Section::Body;
            continue;
        }
        if STYLE.is_match(&line) {
            section = Section::Style;
            if let Some(rest) = remainder_after(&line, &STYLE) {
                push_bullets(&mut report.style_breakdown, &rest);
            }
            continue;
        }
        if STRONGEST.is_match(&line) {
            section = Section::Strongest;
            if let Some(rest) = remainder_after(&line, &STRONGEST) {
                push_bullets(&mut report.strongest_traits, &rest);
            }
            continue;
        }
        if WEAKEST.is_match(&line) {
            section = Section::Weakest;
            if let Some(rest) = remainder_after(&line, &WEAKEST) {
                push_bullets(&mut report.weakest_traits, &rest);
            }
            continue;
        }
        if SUMMARY.is_match(&line) {
            section = Section::Summary;
            if let Some(rest) = remainder_after(&line, &SUMMARY) {
                summary_lines.push(rest);
            }
            continue;
        }
        if SCORES.is_match(&line) {
            section = Section::Scores;
            continue;
        }
        if VERDICT.is_match(&line) {
            match remainder_after(&line, &VERDICT) {
                Some(rest) => {
                    report.verdict = Some(rest);
                    section = Section::Trailer;
                }
                None => section = Section::Verdict,
            }
            continue;
        }

        match section {
            Section::Preamble => report.preamble.push(line),
            Section::Body | Section::Trailer => {}
            Section::Style => push_bullets(&mut report.style_breakdown, &line),
            Section::Strongest => push_bullets(&mut report.strongest_traits, &line),
            Section::Weakest => push_bullets(&mut report.weakest_traits, &line),
            Section::Summary => summary_lines.push(line),
            Section::Scores => {
                if let Some(caps) = SCORE_LINE.captures(&line) {
                    let value: u32 = caps[2].parse().unwrap_or(0);
                    let max: u32 = caps[3].parse().unwrap_or(100);
                    report.scores.push(ScoreLine {
                        label: clean_label(&caps[1]),
                        value: value.min(max.max(1)),
                        max: max.max(1),
                    });
                }
            }
            // The format promises a one-sentence verdict; anything after
            // the first line is trailer chatter.
            Section::Verdict => {
                report.verdict = Some(line);
                section = Section::Trailer;
            }
        }
    }

    if !summary_lines.is_empty() {
        report.summary = Some(summary_lines.join(" "));
    }

    if report.is_unstructured() {
        let text = raw.trim();
        if !text.is_empty() {
            report.preamble.clear();
            report.summary = Some(text.to_string());
        }
    }

    report
}

/// Strip markdown decoration and surrounding whitespace.
fn clean(line: &str) -> String {
    line.replace(['*', '#', '`'], "").trim().to_string()
}

/// Content on the same line after a matched header, if any.
fn remainder_after(line: &str, re: &Regex) -> Option<String> {
    let rest = line[re.find(line)?.end()..]
        .trim_start_matches([':', ' ', '-', '('])
        .trim_start_matches("0-100)")
        .trim_start_matches([':', ' '])
        .trim()
        .to_string();
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Split a line into bullet items. Several bullets may share one line.
fn push_bullets(items: &mut Vec<String>, line: &str) {
    if line.contains('•') {
        for part in line.split('•') {
            let part = part.trim().trim_start_matches('-').trim();
            if !part.is_empty() {
                items.push(part.to_string());
            }
        }
    } else {
        let part = line.trim_start_matches(['-', '•']).trim();
        if !part.is_empty() {
            items.push(part.to_string());
        }
    }
}

/// Drop leading emoji and punctuation from a score label.
fn clean_label(label: &str) -> String {
    label
        .trim()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_REPORT: &str = r#"
🏁 **ARGUMENT SESSION COMPLETE!** 🏁

⏰ **Time:** 5 minutes of intense arguing
📊 **Final Scores:**
   • You: 3 points
   • Sassy Bot: 2 points

🎉 CONGRATULATIONS! You WON the argument!

---

🎭 PERSONALITY ROAST REPORT 🎭

👤 Arguing Persona: "The Trust Me Bro Tech Bro"

🔍 ARGUING STYLE BREAKDOWN:
• 60% Stubborn repetition • 30% Brand loyalty without evidence
• 10% Actual facts

💪 STRONGEST TRAITS:
• Unshakeable confidence
• Quick comebacks

🤪 WEAKEST TRAITS:
• Allergic to citations
• Mistakes volume for logic

🎯 PERSONALITY SUMMARY:
You argue like someone double-parked outside.
Bold, loud, and in a hurry.

⭐ FUNNY SCORES (0-100):
Word Efficiency: 95/100
Evidence Usage: 12/100
Sass Resistance: 150/100

🏆 FINAL VERDICT:
Achievement Unlocked: Master of the Two-Word Comeback

---

Thanks for playing! Want to start another argument? 😈
"#;

    #[test]
    fn test_parses_full_report() {
        let report = parse_report(FULL_REPORT);

        assert_eq!(report.persona.as_deref(), Some("The Trust Me Bro Tech Bro"));
        assert_eq!(
            report.style_breakdown,
            vec![
                "60% Stubborn repetition",
                "30% Brand loyalty without evidence",
                "10% Actual facts"
            ]
        );
        assert_eq!(
            report.strongest_traits,
            vec!["Unshakeable confidence", "Quick comebacks"]
        );
        assert_eq!(
            report.weakest_traits,
            vec!["Allergic to citations", "Mistakes volume for logic"]
        );
        assert_eq!(
            report.summary.as_deref(),
            Some("You argue like someone double-parked outside. Bold, loud, and in a hurry.")
        );
        assert_eq!(
            report.verdict.as_deref(),
            Some("Achievement Unlocked: Master of the Two-Word Comeback")
        );
    }

    #[test]
    fn test_preamble_keeps_banner_lines() {
        let report = parse_report(FULL_REPORT);
        assert!(report
            .preamble
            .iter()
            .any(|line| line.contains("You: 3 points")));
        assert!(report
            .preamble
            .iter()
            .any(|line| line.contains("CONGRATULATIONS")));
        // Trailer chatter after the verdict is dropped.
        assert!(!report
            .preamble
            .iter()
            .any(|line| line.contains("Thanks for playing")));
    }

    #[test]
    fn test_scores_parse_and_clamp() {
        let report = parse_report(FULL_REPORT);
        assert_eq!(
            report.scores[0],
            ScoreLine {
                label: "Word Efficiency".to_string(),
                value: 95,
                max: 100
            }
        );
        assert_eq!(report.scores[1].value, 12);
        // 150/100 clamps to the stated maximum.
        assert_eq!(report.scores[2].value, 100);
    }

    #[test]
    fn test_bare_report_without_banner() {
        let raw = "🎭 PERSONALITY ROAST REPORT 🎭\n\n\
                   👤 Arguing Persona: Captain One-Liner\n\n\
                   🏆 FINAL VERDICT: Brevity is your whole personality.";
        let report = parse_report(raw);
        assert_eq!(report.persona.as_deref(), Some("Captain One-Liner"));
        assert_eq!(
            report.verdict.as_deref(),
            Some("Brevity is your whole personality.")
        );
        assert!(report.preamble.is_empty());
    }

    #[test]
    fn test_headers_match_through_markdown_noise() {
        let raw = "## **STRONGEST TRAITS:**\n- Persistence\n### weakest traits\n- Spelling";
        let report = parse_report(raw);
        assert_eq!(report.strongest_traits, vec!["Persistence"]);
        assert_eq!(report.weakest_traits, vec!["Spelling"]);
    }

    #[test]
    fn test_unstructured_text_degrades_to_summary() {
        let raw = "The judge fell asleep. No report today.";
        let report = parse_report(raw);
        assert!(report.persona.is_none());
        assert!(report.scores.is_empty());
        assert_eq!(report.summary.as_deref(), Some(raw));
    }

    #[test]
    fn test_empty_report() {
        let report = parse_report("");
        assert!(report.is_unstructured());
        assert!(report.summary.is_none());
    }

    #[test]
    fn test_score_labels_lose_emoji() {
        let raw = "⭐ FUNNY SCORES (0-100):\n⭐ Sass Delivery: 88/100";
        let report = parse_report(raw);
        assert_eq!(report.scores[0].label, "Sass Delivery");
        assert_eq!(report.scores[0].value, 88);
    }
}
