//! Rule-based slot capture from free sentences
//!
//! Used while idle when `capture_free_text` is on, so a visitor who opens with
//! "Hi, I'm Ada, my budget is about $3k" is not asked for those again.

use once_cell::sync::Lazy;
use regex::Regex;

use super::lead::{Lead, LeadField};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:my name is|i'm|im|call me|this is) ([a-z\s]+)").unwrap());

static BUSINESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:business is|shop is|company is|called) ([a-z\s]+)").unwrap()
});

static BUDGET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:\$|dollar|budget|price|rupees|cost)").unwrap());

static TIMELINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:week|month|asap|soon|year|days|tomorrow)").unwrap());

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{9,}").unwrap());

static SPOKEN_AT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+at\s+").unwrap());

static SPOKEN_DOT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+dot\s+").unwrap());

/// Longest name accepted after "my name is", in words
const MAX_NAME_WORDS: usize = 3;

/// Values found in one utterance. Service is never captured here.
pub fn capture(text: &str) -> Vec<(LeadField, String)> {
    let mut found = Vec::new();
    let lower = text.to_lowercase();

    if let Some(name) = NAME_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
    {
        if !name.is_empty() && name.split_whitespace().count() <= MAX_NAME_WORDS {
            found.push((LeadField::Name, name));
        }
    }

    if let Some(business) = BUSINESS_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
    {
        if !business.is_empty() {
            found.push((LeadField::BusinessName, business));
        }
    }

    if BUDGET_RE.is_match(&lower) {
        found.push((LeadField::Budget, text.to_string()));
    }

    if TIMELINE_RE.is_match(&lower) {
        found.push((LeadField::Timeline, text.to_string()));
    }

    if let Some(email) = email_in(text) {
        found.push((LeadField::Email, email));
    }

    if PHONE_RE.is_match(text) {
        let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
        found.push((LeadField::Phone, digits));
    }

    found
}

/// Write captured values into empty slots only. Returns what was written.
pub fn fill_empty(lead: &mut Lead, text: &str) -> Vec<(LeadField, String)> {
    let mut written = Vec::new();
    for (field, value) in capture(text) {
        if lead.is_filled(field) {
            continue;
        }
        lead.set(field, value.clone());
        written.push((field, value));
    }
    written
}

/// Email address, with spoken "at"/"dot" normalised
fn email_in(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    if !lower.contains('@') && !lower.contains("gmail") {
        return None;
    }

    // only spoken addresses ("ada at gmail dot com") need rewriting
    let normalised = if lower.contains('@') {
        text.to_string()
    } else {
        let at = SPOKEN_AT_RE.replace_all(text, "@");
        SPOKEN_DOT_RE.replace_all(&at, ".").into_owned()
    };

    normalised
        .split_whitespace()
        .find(|word| word.contains('@'))
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric() && c != '@' && c != '.')
                .trim_end_matches('.')
                .to_string()
        })
        .or_else(|| Some(normalised.trim().to_string()))
}
