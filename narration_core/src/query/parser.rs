//! Turns a line of user text into a query.
//!
//! Matching is purely by fixed keywords and phrases.

use agent_world::{ControllerToken, EventKind};
use chrono::NaiveTime;

use crate::error::{NarrationError, Result};

const WHY_PREFIX: &str = "why did you ";
const AT_SEPARATOR: &str = " at ";

/// Action phrases a "why did you ..." question may use.
const SYNONYMS: &[(&str, EventKind)] = &[
    ("bump", EventKind::Bump),
    ("bump into that", EventKind::Bump),
    ("stomp", EventKind::StompKill),
    ("stomp on that", EventKind::StompKill),
    ("roast", EventKind::FireKill),
    ("roast that", EventKind::FireKill),
    ("shell", EventKind::ShellKill),
    ("fall", EventKind::FallKill),
    ("jump", EventKind::Jump),
    ("jump up", EventKind::Jump),
    ("hop", EventKind::Jump),
    ("land", EventKind::Land),
    ("collect", EventKind::Collect),
    ("collect that", EventKind::Collect),
    ("get hurt", EventKind::Hurt),
    ("get hit", EventKind::Hurt),
    ("kick", EventKind::Kick),
    ("lose", EventKind::Lose),
    ("die", EventKind::Lose),
    ("win", EventKind::Win),
    ("warn me", EventKind::Caution),
];

/// Exact-match commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Switch(ControllerToken),
    /// Recognised but deliberately does nothing ("reset", "restart").
    Reserved,
}

/// What a line of user text asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Command(Command),
    /// "why did you <action> [at <time>]". `kind` is `None` when the action
    /// phrase is unknown; `at` holds the raw time text.
    Why {
        kind: Option<EventKind>,
        at: Option<String>,
    },
    Earlier,
    Later,
    /// A lone time like "12:01:07".
    Timestamp(NaiveTime),
    Unrecognized,
}

/// Keep letters and spaces, lower-case, and squeeze whitespace.
pub fn normalize(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Look an action phrase up in the synonym table.
pub fn action_kind(phrase: &str) -> Option<EventKind> {
    let phrase = normalize(phrase);
    SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == phrase)
        .map(|(_, kind)| *kind)
}

fn command(normalized: &str) -> Option<Command> {
    Some(match normalized {
        "stop" => Command::Switch(ControllerToken::Idle),
        "start" => Command::Switch(ControllerToken::Autonomous),
        "speedrun" => Command::Switch(ControllerToken::Speedrun),
        "user" => Command::Switch(ControllerToken::Human),
        "reset" | "restart" => Command::Reserved,
        _ => return None,
    })
}

/// Parse a literal time such as "12:01:07", "12:01" or "12:01:07.250".
pub fn parse_timestamp(text: &str) -> Result<NaiveTime> {
    let trimmed = text.trim().trim_end_matches(|c: char| !c.is_ascii_digit());
    ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| NarrationError::InvalidTimestamp(text.trim().to_string()))
}

/// Parse one line of user text.
pub fn parse(text: &str) -> Query {
    let normalized = normalize(text);
    if let Some(command) = command(&normalized) {
        return Query::Command(command);
    }

    let lowered = text.to_lowercase();
    if let Some(start) = lowered.find(WHY_PREFIX) {
        let rest = &lowered[start + WHY_PREFIX.len()..];
        let (action, at) = match rest.find(AT_SEPARATOR) {
            Some(split) => (
                &rest[..split],
                Some(rest[split + AT_SEPARATOR.len()..].trim().to_string()),
            ),
            None => (rest, None),
        };
        return Query::Why {
            kind: action_kind(action),
            at,
        };
    }

    let words: Vec<&str> = normalized.split(' ').collect();
    if words.contains(&"earlier") {
        return Query::Earlier;
    }
    if words.contains(&"later") {
        return Query::Later;
    }

    if let Some(time) = text
        .split_whitespace()
        .find_map(|token| parse_timestamp(token).ok())
    {
        return Query::Timestamp(time);
    }

    Query::Unrecognized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Why did you JUMP?! "), "why did you jump");
        assert_eq!(normalize("get   hurt"), "get hurt");
        assert_eq!(normalize("12:00"), "");
    }

    #[test]
    fn test_commands() {
        assert_eq!(
            parse("Stop"),
            Query::Command(Command::Switch(ControllerToken::Idle))
        );
        assert_eq!(
            parse("speedrun!"),
            Query::Command(Command::Switch(ControllerToken::Speedrun))
        );
        assert_eq!(parse("restart"), Query::Command(Command::Reserved));
        assert_eq!(parse("please stop"), Query::Unrecognized);
    }

    #[test]
    fn test_why_without_time() {
        assert_eq!(
            parse("Why did you jump?"),
            Query::Why {
                kind: Some(EventKind::Jump),
                at: None
            }
        );
        assert_eq!(
            parse("why did you jump up"),
            Query::Why {
                kind: Some(EventKind::Jump),
                at: None
            }
        );
        assert_eq!(
            parse("so why did you roast"),
            Query::Why {
                kind: Some(EventKind::FireKill),
                at: None
            }
        );
        assert_eq!(
            parse("why did you get hurt"),
            Query::Why {
                kind: Some(EventKind::Hurt),
                at: None
            }
        );
    }

    #[test]
    fn test_why_with_time() {
        assert_eq!(
            parse("why did you jump at 12:00:01?"),
            Query::Why {
                kind: Some(EventKind::Jump),
                at: Some("12:00:01?".to_string())
            }
        );
    }

    #[test]
    fn test_unknown_action() {
        assert_eq!(
            parse("why did you dance"),
            Query::Why {
                kind: None,
                at: None
            }
        );
    }

    #[test]
    fn test_follow_ups() {
        assert_eq!(parse("and earlier?"), Query::Earlier);
        assert_eq!(parse("What about later"), Query::Later);
        assert_eq!(parse("at 12:00:01"), Query::Timestamp(hms(12, 0, 1)));
        assert_eq!(parse("hello"), Query::Unrecognized);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(parse_timestamp("12:00:01").unwrap(), hms(12, 0, 1));
        assert_eq!(parse_timestamp(" 07:15 ").unwrap(), hms(7, 15, 0));
        assert_eq!(parse_timestamp("12:00:01?").unwrap(), hms(12, 0, 1));
        assert!(parse_timestamp("12:00:01.5").is_ok());
        assert!(matches!(
            parse_timestamp("noonish"),
            Err(NarrationError::InvalidTimestamp(_))
        ));
        assert!(parse_timestamp("25:00:00").is_err());
    }
}
