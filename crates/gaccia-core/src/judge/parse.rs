//! Line-oriented parser for judge replies.
//!
//! Judges are asked for a loose schema:
//!
//! ```text
//! Score: 7.5
//! Reasoning: ...
//! Strengths:
//! - ...
//! Weaknesses: ...
//! Suggestions: ...
//! ```
//!
//! Models decorate this with markdown (`**Score:** 8/10`, `### Strengths`),
//! so labels are matched after stripping leading markup and compared
//! case-insensitively. Nothing here fails: missing pieces come back as
//! `None` / empty and the judge applies its defaults.

use crate::domain::SCORE_RANGE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Score,
    Reasoning,
    Strengths,
    Weaknesses,
    Suggestions,
}

const FIELDS: [(Field, &str); 5] = [
    (Field::Score, "score"),
    (Field::Reasoning, "reasoning"),
    (Field::Strengths, "strengths"),
    (Field::Weaknesses, "weaknesses"),
    (Field::Suggestions, "suggestions"),
];

fn is_leading_markup(c: char) -> bool {
    matches!(c, '*' | '#' | '-' | '>' | '_' | '•') || c.is_whitespace()
}

fn is_emphasis(c: char) -> bool {
    matches!(c, '*' | '_')
}

/// If `line` opens a labeled field, return the field and its inline value.
fn labeled(line: &str) -> Option<(Field, &str)> {
    let body = line.trim_start_matches(is_leading_markup);
    FIELDS.iter().find_map(|(field, name)| {
        let head = body.get(..name.len())?;
        if !head.eq_ignore_ascii_case(name) {
            return None;
        }
        let rest = body[name.len()..].trim_start_matches(is_emphasis);
        let value = match rest.strip_prefix(':') {
            Some(value) => value,
            // bare heading such as `## Strengths`
            None if rest.trim().is_empty() => "",
            None => return None,
        };
        Some((*field, value.trim_start_matches(is_emphasis).trim()))
    })
}

/// Read a numeric score from the text following `Score:`.
///
/// Accepts `8`, `7.5`, `8/10`, `**9**`. Non-finite values are rejected;
/// finite values are clamped into the score range.
fn score_value(value: &str) -> Option<f64> {
    let token = value.split_whitespace().next()?;
    let token = token.trim_matches(|c: char| matches!(c, '*' | '_' | ',' | ';' | '(' | ')' | '[' | ']'));
    let number = token.split('/').next()?;
    let score: f64 = number.parse().ok()?;
    if !score.is_finite() {
        return None;
    }
    Some(score.clamp(SCORE_RANGE.0, SCORE_RANGE.1))
}

/// First parseable score in the reply, scanning lines top to bottom.
///
/// A `Score:` line whose value does not parse is skipped, not fatal.
pub fn parse_score(reply: &str) -> Option<f64> {
    reply
        .lines()
        .filter_map(labeled)
        .filter(|(field, _)| *field == Field::Score)
        .find_map(|(_, value)| score_value(value))
}

/// Strip bullets (`-`, `*`, `•`) and ordinals (`1.`, `2)`) from a list line.
///
/// An ordinal counts only when whitespace or the end of the line follows it,
/// so `3.5x faster` keeps its number.
fn list_item(line: &str) -> Option<String> {
    let trimmed = line
        .trim()
        .trim_start_matches(|c: char| matches!(c, '-' | '*' | '•') || c.is_whitespace());
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    let trimmed = match trimmed[digits..].strip_prefix(|c: char| c == '.' || c == ')') {
        Some(rest) if digits > 0 && (rest.is_empty() || rest.starts_with(char::is_whitespace)) => {
            rest
        }
        _ => trimmed,
    };
    let item = trimmed.replace("**", "");
    let item = item.trim();
    if item.is_empty() {
        None
    } else {
        Some(item.to_string())
    }
}

/// Lists extracted from a judge reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedReply {
    pub score: Option<f64>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Parse score and the three list sections.
///
/// A section collects its inline value (split on `;`) plus the following
/// non-empty lines. It ends at the next label, or at a blank line once it
/// holds at least one item, so closing prose is not taken as an item.
pub fn parse_reply(reply: &str) -> ParsedReply {
    let mut parsed = ParsedReply {
        score: parse_score(reply),
        ..ParsedReply::default()
    };
    let mut current: Option<Field> = None;
    let mut collected = 0;

    for line in reply.lines() {
        if let Some((field, value)) = labeled(line) {
            current = Some(field);
            collected = 0;
            if let Some(list) = section_mut(&mut parsed, field) {
                let before = list.len();
                list.extend(value.split(';').filter_map(list_item));
                collected = list.len() - before;
            }
            continue;
        }
        if line.trim().is_empty() {
            if collected > 0 {
                current = None;
            }
            continue;
        }
        if let Some(list) = current.and_then(|f| section_mut(&mut parsed, f)) {
            if let Some(item) = list_item(line) {
                list.push(item);
                collected += 1;
            }
        }
    }
    parsed
}

fn section_mut(parsed: &mut ParsedReply, field: Field) -> Option<&mut Vec<String>> {
    match field {
        Field::Strengths => Some(&mut parsed.strengths),
        Field::Weaknesses => Some(&mut parsed.weaknesses),
        Field::Suggestions => Some(&mut parsed.suggestions),
        Field::Score | Field::Reasoning => None,
    }
}
