//! Plain-text rendering of lanes and the selection carousel.

use starfighter_core::{ObstacleKind, WavePlan};
use starfighter_system_selection::SelectionView;

fn glyph(kind: ObstacleKind) -> char {
    match kind {
        ObstacleKind::Gap => '.',
        ObstacleKind::Small => 'o',
        ObstacleKind::Regular => 'O',
        ObstacleKind::Big => '#',
    }
}

/// Draws the lane occupied by a wave, one character per lane unit.
pub(crate) fn lane(plan: &WavePlan) -> String {
    plan.slots()
        .iter()
        .flat_map(|&kind| std::iter::repeat(glyph(kind)).take(kind.width() as usize))
        .collect()
}

/// Summarises a wave plan on a single line.
pub(crate) fn wave_line(plan: &WavePlan) -> String {
    format!(
        "wave {:>3}  difficulty {:.2}  speed x{:.2}  health x{:.2}  |{}|",
        plan.wave().get(),
        plan.difficulty().get(),
        plan.speed_modifier(),
        plan.health_modifier(),
        lane(plan),
    )
}

/// Draws the carousel with the centred spaceship bracketed.
pub(crate) fn carousel(view: &SelectionView<'_>) -> String {
    let Some(current) = view.current else {
        return String::from("(no spaceships)");
    };
    let previous = view.previous.map_or("", |ship| ship.name());
    let next = view.next.map_or("", |ship| ship.name());
    format!(
        "{previous} < [ {} | hp {} dmg {} speed {} ] > {next}",
        current.name(),
        current.health(),
        current.attack_damage(),
        current.speed(),
    )
}
