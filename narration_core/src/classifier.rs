//! Event classifier - turns one tick of simulation output into candidate messages.

use agent_world::{ActionRecord, CellCode, Collectible, Event, EventKind, WorldSnapshot};
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::{NarratorConfig, ScanWindow};
use crate::history::Candidate;
use crate::phrases;
use crate::scan::{Hazard, HazardScan};

/// Subject used when a stomped enemy could not be identified.
const UNKNOWN_TARGET: &str = "pal";

/// Maps events, inputs and the surrounding grid to candidate utterances.
///
/// Holds only configuration; the random source is passed in so callers can
/// seed it.
#[derive(Debug, Clone)]
pub struct EventClassifier {
    window: ScanWindow,
    min_gap_width: usize,
}

impl EventClassifier {
    /// Create a classifier scanning `window` for hazards.
    pub fn new(window: ScanWindow, min_gap_width: usize) -> Self {
        Self {
            window,
            min_gap_width,
        }
    }

    /// Create a classifier from the caution settings.
    pub fn from_config(config: &NarratorConfig) -> Self {
        Self::new(config.caution_window, config.min_gap_width)
    }

    /// Classify one tick.
    ///
    /// Event candidates come first in event order, then the jump, then
    /// warnings about what lies around the agent.
    pub fn classify<R: Rng + ?Sized>(
        &self,
        events: &[Event],
        action: &ActionRecord,
        snapshot: &Arc<WorldSnapshot>,
        rng: &mut R,
    ) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = events
            .iter()
            .filter_map(|event| describe_event(event, rng))
            .map(|(kind, text)| Candidate::new(kind, text, snapshot.clone()))
            .collect();

        if action.jump_pressed() {
            candidates.push(Candidate::new(
                EventKind::Jump,
                phrases::pick(rng, phrases::JUMP, ""),
                snapshot.clone(),
            ));
        }

        candidates.extend(
            self.cautions(snapshot, rng)
                .into_iter()
                .map(|text| Candidate::new(EventKind::Caution, text, snapshot.clone())),
        );

        candidates
    }

    /// One warning per distinct hazard near the agent.
    fn cautions<R: Rng + ?Sized>(&self, snapshot: &WorldSnapshot, rng: &mut R) -> Vec<String> {
        let scan = HazardScan::new(snapshot, self.window, self.min_gap_width);
        let mut named = HashSet::new();
        let mut warnings = Vec::new();

        for hazard in scan.hazards() {
            let name = hazard.name();
            if !named.insert(name.clone()) {
                continue;
            }
            let table = match hazard {
                Hazard::Hole => phrases::CAUTION_HOLE,
                Hazard::Enemy { winged: true, .. } => phrases::CAUTION_FLYING,
                Hazard::Enemy { winged: false, .. } => phrases::CAUTION_ENEMY,
            };
            warnings.push(phrases::pick(rng, table, &name));
        }
        warnings
    }
}

/// Text for a single simulation event, if it deserves any.
fn describe_event<R: Rng + ?Sized>(event: &Event, rng: &mut R) -> Option<(EventKind, String)> {
    let text = match event.kind {
        EventKind::Bump => match event.detail {
            Some(CellCode::Brick) if event.empowered() => "Whoops!".to_string(),
            Some(CellCode::Brick) => "Ouch!".to_string(),
            _ => return None,
        },
        EventKind::StompKill => {
            let target = event
                .detail
                .and_then(|cell| cell.enemy())
                .map(|(species, _)| species.name())
                .unwrap_or(UNKNOWN_TARGET);
            phrases::pick(rng, phrases::STOMP, target)
        }
        EventKind::FireKill => "Roasted!".to_string(),
        EventKind::ShellKill => "Strike!".to_string(),
        EventKind::Collect => match event.detail {
            Some(CellCode::Item(Collectible::FireFlower)) => "Got a fire flower!".to_string(),
            Some(CellCode::Item(Collectible::Mushroom)) => "Got a mushroom!".to_string(),
            Some(CellCode::Item(Collectible::LifeMushroom)) => "Got a 1-up!".to_string(),
            _ => return None,
        },
        EventKind::Hurt => "Ouch!!".to_string(),
        EventKind::Lose => "Mamma mia!".to_string(),
        EventKind::Win => "We did it!".to_string(),
        EventKind::FallKill
        | EventKind::Jump
        | EventKind::Land
        | EventKind::Kick
        | EventKind::Caution => return None,
    };
    Some((event.kind, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_world::{Control, Species};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn flat_ground() -> Arc<WorldSnapshot> {
        Arc::new(
            WorldSnapshot::from_level_rows(&[
                "-------",
                "-------",
                "-------",
                "XXXXXXX",
                "XXXXXXX",
            ])
            .unwrap(),
        )
    }

    fn classifier() -> EventClassifier {
        EventClassifier::new(ScanWindow::new(2, 3, 1, 1), 2)
    }

    fn texts(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_collect_fire_flower() {
        let mut rng = StdRng::seed_from_u64(0);
        let events = [Event::new(EventKind::Collect)
            .with_detail(CellCode::Item(Collectible::FireFlower))];
        let out = classifier().classify(&events, &ActionRecord::new(), &flat_ground(), &mut rng);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, EventKind::Collect);
        assert_eq!(out[0].text, "Got a fire flower!");
    }

    #[test]
    fn test_bump_depends_on_power_up() {
        let mut rng = StdRng::seed_from_u64(0);
        let brick = Event::new(EventKind::Bump).with_detail(CellCode::Brick);
        let events = [brick.with_subject_state(1), brick, Event::new(EventKind::Bump)];
        let out = classifier().classify(&events, &ActionRecord::new(), &flat_ground(), &mut rng);

        assert_eq!(texts(&out), vec!["Whoops!", "Ouch!"]);
    }

    #[test]
    fn test_stomp_names_the_species() {
        let events = [Event::new(EventKind::StompKill).with_detail(CellCode::Enemy {
            species: Species::GreenKoopa,
            winged: true,
        })];
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out =
                classifier().classify(&events, &ActionRecord::new(), &flat_ground(), &mut rng);
            assert_eq!(out.len(), 1);
            let text = &out[0].text;
            assert!(
                text == "Coming through!" || text.contains("Koopa"),
                "unexpected stomp text: {text}"
            );
            assert!(!text.contains('*'));
        }
    }

    #[test]
    fn test_jump_from_action_record() {
        let mut rng = StdRng::seed_from_u64(3);
        let action = ActionRecord::new().with(Control::Jump);
        let out = classifier().classify(&[], &action, &flat_ground(), &mut rng);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, EventKind::Jump);
        assert!(phrases::JUMP.contains(&out[0].text.as_str()));
    }

    #[test]
    fn test_silent_events() {
        let mut rng = StdRng::seed_from_u64(0);
        let events = [
            Event::new(EventKind::Land),
            Event::new(EventKind::FallKill),
            Event::new(EventKind::Collect).with_detail(CellCode::Item(Collectible::Coin)),
        ];
        let out = classifier().classify(&events, &ActionRecord::new(), &flat_ground(), &mut rng);
        assert!(out.is_empty());
    }

    #[test]
    fn test_caution_for_hole() {
        let mut rng = StdRng::seed_from_u64(0);
        let snapshot = Arc::new(
            WorldSnapshot::from_level_rows(&[
                "-------",
                "-------",
                "-------",
                "XXXX--X",
                "XXXX--X",
            ])
            .unwrap(),
        );
        let out = classifier().classify(&[], &ActionRecord::new(), &snapshot, &mut rng);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, EventKind::Caution);
        assert!(out[0].text.contains("a hole"), "{}", out[0].text);
    }

    #[test]
    fn test_caution_for_flying_enemy_uses_flying_phrases() {
        let mut rng = StdRng::seed_from_u64(0);
        let snapshot = Arc::new(
            WorldSnapshot::from_level_rows(&[
                "-------",
                "----R--",
                "-------",
                "XXXXXXX",
                "XXXXXXX",
            ])
            .unwrap(),
        );
        let out = classifier().classify(&[], &ActionRecord::new(), &snapshot, &mut rng);

        assert_eq!(out.len(), 1);
        let expected: Vec<String> = phrases::CAUTION_FLYING
            .iter()
            .map(|p| phrases::fill(p, "a Koopa"))
            .collect();
        assert!(expected.contains(&out[0].text), "{}", out[0].text);
    }

    #[test]
    fn test_one_caution_per_hazard_name() {
        let mut rng = StdRng::seed_from_u64(0);
        let snapshot = Arc::new(
            WorldSnapshot::from_level_rows(&[
                "-------",
                "-------",
                "-g--gg-",
                "XXXXXXX",
                "XXXXXXX",
            ])
            .unwrap(),
        );
        let out = classifier().classify(&[], &ActionRecord::new(), &snapshot, &mut rng);
        assert_eq!(out.len(), 1);
        assert!(out[0].text.contains("Goomba"));
    }

    #[test]
    fn test_seeded_classification_is_reproducible() {
        let events = [Event::new(EventKind::StompKill).with_detail(CellCode::Enemy {
            species: Species::Goomba,
            winged: false,
        })];
        let action = ActionRecord::new().with(Control::Jump);
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            classifier()
                .classify(&events, &action, &flat_ground(), &mut rng)
                .into_iter()
                .map(|c| c.text)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn test_candidates_share_the_tick_snapshot() {
        let mut rng = StdRng::seed_from_u64(0);
        let snapshot = flat_ground();
        let events = [Event::new(EventKind::Hurt)];
        let action = ActionRecord::new().with(Control::Jump);
        let out = classifier().classify(&events, &action, &snapshot, &mut rng);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].kind, EventKind::Hurt);
        assert_eq!(out[1].kind, EventKind::Jump);
        assert!(out.iter().all(|c| Arc::ptr_eq(&c.snapshot, &snapshot)));
    }
}
