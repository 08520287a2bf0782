//! Per-tick simulation output: discrete events and the agent's control inputs.

use serde::{Deserialize, Serialize};

use crate::entities::CellCode;
use crate::error::WorldError;

/// Every kind of occurrence the narrator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    Bump,
    StompKill,
    FireKill,
    ShellKill,
    FallKill,
    Jump,
    Land,
    Collect,
    Hurt,
    Kick,
    Lose,
    Win,
    /// Raised by the narrator itself when it spots danger; never sent by the simulation.
    Caution,
}

impl EventKind {
    /// Decode the simulation's numbering (1 = bump ... 12 = win).
    pub fn from_code(code: i32) -> Result<Self, WorldError> {
        use EventKind::*;

        Ok(match code {
            1 => Bump,
            2 => StompKill,
            3 => FireKill,
            4 => ShellKill,
            5 => FallKill,
            6 => Jump,
            7 => Land,
            8 => Collect,
            9 => Hurt,
            10 => Kick,
            11 => Lose,
            12 => Win,
            other => return Err(WorldError::UnknownEventCode(other)),
        })
    }

    /// First-person past tense, e.g. "jumped".
    pub fn past_tense(&self) -> &'static str {
        match self {
            EventKind::Bump => "bumped into something",
            EventKind::StompKill => "stomped on someone",
            EventKind::FireKill => "roasted someone",
            EventKind::ShellKill => "hit someone with a shell",
            EventKind::FallKill => "knocked someone down",
            EventKind::Jump => "jumped",
            EventKind::Land => "landed",
            EventKind::Collect => "collected something",
            EventKind::Hurt => "got hurt",
            EventKind::Kick => "kicked something",
            EventKind::Lose => "lost",
            EventKind::Win => "won",
            EventKind::Caution => "warned you",
        }
    }

    /// Gerund phrase, e.g. "jumping".
    pub fn gerund(&self) -> &'static str {
        match self {
            EventKind::Bump => "bumping into anything",
            EventKind::StompKill => "stomping on anyone",
            EventKind::FireKill => "roasting anyone",
            EventKind::ShellKill => "hitting anyone with a shell",
            EventKind::FallKill => "knocking anyone down",
            EventKind::Jump => "jumping",
            EventKind::Land => "landing",
            EventKind::Collect => "collecting anything",
            EventKind::Hurt => "getting hurt",
            EventKind::Kick => "kicking anything",
            EventKind::Lose => "losing",
            EventKind::Win => "winning",
            EventKind::Caution => "warning you",
        }
    }
}

/// One occurrence reported by the simulation during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,

    /// What the event involved, e.g. the brick bumped or the enemy stomped.
    pub detail: Option<CellCode>,

    /// Small context value; for the agent this is its power-up tier (0 = small).
    pub subject_state: u8,
}

impl Event {
    /// Create an event with no detail.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            detail: None,
            subject_state: 0,
        }
    }

    /// Attach what the event involved.
    pub fn with_detail(mut self, detail: CellCode) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Record the subject's power state.
    pub fn with_subject_state(mut self, state: u8) -> Self {
        self.subject_state = state;
        self
    }

    /// Build an event from the simulation's raw (type, param, state) triple.
    ///
    /// A zero parameter means the event carries no detail.
    pub fn from_raw(code: i32, param: i32, state: i32) -> Result<Self, WorldError> {
        let mut event = Self::new(EventKind::from_code(code)?)
            .with_subject_state(state.clamp(0, u8::MAX as i32) as u8);
        if param != 0 {
            event.detail = Some(CellCode::from_raw(param));
        }
        Ok(event)
    }

    /// Whether the agent was powered up when this happened.
    pub fn empowered(&self) -> bool {
        self.subject_state > 0
    }
}

/// A control input the agent can hold during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Left,
    Right,
    Down,
    Speed,
    Jump,
}

impl Control {
    const ALL: [Control; 5] = [
        Control::Left,
        Control::Right,
        Control::Down,
        Control::Speed,
        Control::Jump,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// The set of controls held during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionRecord {
    pressed: u8,
}

impl ActionRecord {
    /// Create a record with nothing pressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pressed control.
    pub fn with(mut self, control: Control) -> Self {
        self.press(control);
        self
    }

    /// Mark a control as pressed.
    pub fn press(&mut self, control: Control) {
        self.pressed |= control.bit();
    }

    /// Check whether a control is held.
    pub fn is_pressed(&self, control: Control) -> bool {
        self.pressed & control.bit() != 0
    }

    /// Shorthand for the jump control.
    pub fn jump_pressed(&self) -> bool {
        self.is_pressed(Control::Jump)
    }

    /// Build from the simulation's boolean array, ordered left, right, down, speed, jump.
    pub fn from_flags(flags: &[bool]) -> Self {
        let mut record = Self::new();
        for (control, held) in Control::ALL.iter().zip(flags) {
            if *held {
                record.press(*control);
            }
        }
        record
    }

    /// Iterate over the pressed controls in declaration order.
    pub fn pressed(&self) -> impl Iterator<Item = Control> + '_ {
        Control::ALL.into_iter().filter(|c| self.is_pressed(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{raw, Species};

    #[test]
    fn test_event_kind_codes() {
        assert_eq!(EventKind::from_code(1), Ok(EventKind::Bump));
        assert_eq!(EventKind::from_code(6), Ok(EventKind::Jump));
        assert_eq!(EventKind::from_code(12), Ok(EventKind::Win));
        assert_eq!(
            EventKind::from_code(13),
            Err(WorldError::UnknownEventCode(13))
        );
        assert!(EventKind::from_code(0).is_err());
    }

    #[test]
    fn test_event_from_raw() {
        let event = Event::from_raw(2, raw::RED_KOOPA_WINGED, 1).unwrap();
        assert_eq!(event.kind, EventKind::StompKill);
        assert_eq!(
            event.detail,
            Some(CellCode::Enemy {
                species: Species::RedKoopa,
                winged: true
            })
        );
        assert!(event.empowered());

        let plain = Event::from_raw(9, 0, 0).unwrap();
        assert_eq!(plain.detail, None);
        assert!(!plain.empowered());
    }

    #[test]
    fn test_action_record() {
        let record = ActionRecord::new().with(Control::Right).with(Control::Jump);
        assert!(record.jump_pressed());
        assert!(record.is_pressed(Control::Right));
        assert!(!record.is_pressed(Control::Left));
        assert_eq!(record.pressed().count(), 2);
    }

    #[test]
    fn test_action_record_from_flags() {
        let record = ActionRecord::from_flags(&[false, true, false, false, true]);
        assert!(record.jump_pressed());
        assert!(record.is_pressed(Control::Right));

        let short = ActionRecord::from_flags(&[true]);
        assert!(short.is_pressed(Control::Left));
        assert!(!short.jump_pressed());
    }
}
