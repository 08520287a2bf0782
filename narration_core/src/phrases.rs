//! Phrase tables for randomly varied utterances.
//!
//! A `*` in a phrase is replaced by the subject noun.

use rand::seq::SliceRandom;
use rand::Rng;

pub const PLACEHOLDER: char = '*';

pub const JUMP: &[&str] = &["Yahhoo!", "Wahoo", "Hop!"];

pub const STOMP: &[&str] = &["Coming through!", "Sorry about that, *!", "Make way, *!"];

pub const CAUTION_HOLE: &[&str] = &["Careful, there's * ahead!", "Watch out for *!", "Mind *!"];

pub const CAUTION_ENEMY: &[&str] = &["Look out, *!", "Here comes *.", "I see *."];

pub const CAUTION_FLYING: &[&str] = &["Heads up, * is flying in!", "*, up in the air!", "Incoming: *!"];

/// Pick a phrase uniformly and substitute the subject.
///
/// An empty table yields an empty string.
pub fn pick<R: Rng + ?Sized>(rng: &mut R, table: &[&str], subject: &str) -> String {
    let phrase = table.choose(rng).copied().unwrap_or_default();
    fill(phrase, subject)
}

/// Substitute the subject into a phrase, capitalising it when it leads.
pub fn fill(phrase: &str, subject: &str) -> String {
    if phrase.starts_with(PLACEHOLDER) {
        let mut chars = subject.chars();
        let leading: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        let rest = &phrase[PLACEHOLDER.len_utf8()..];
        return format!("{}{}", leading, rest.replace(PLACEHOLDER, subject));
    }
    phrase.replace(PLACEHOLDER, subject)
}
