#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spaceship selection carousel backed by a circular cursor.

use starfighter_core::{Command, Event, Rotation, SpaceshipType};

mod cycle;

pub use cycle::{Cycle, Iter};

/// Entries visible in the carousel: the centred one and its two neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionView<'a> {
    /// Entry shown left of the centre.
    pub previous: Option<&'a SpaceshipType>,
    /// Entry shown in the centre.
    pub current: Option<&'a SpaceshipType>,
    /// Entry shown right of the centre.
    pub next: Option<&'a SpaceshipType>,
}

impl SelectionView<'_> {
    fn to_event(self) -> Event {
        Event::SelectionChanged {
            previous: self.previous.cloned(),
            current: self.current.cloned(),
            next: self.next.cloned(),
        }
    }
}

/// Pure system that rotates the spaceship carousel and confirms the pick.
#[derive(Debug, Default)]
pub struct Selection {
    roster: Cycle<SpaceshipType>,
}

impl Selection {
    /// Creates a carousel offering the provided spaceships in order.
    #[must_use]
    pub fn new<I>(roster: I) -> Self
    where
        I: IntoIterator<Item = SpaceshipType>,
    {
        Self {
            roster: roster.into_iter().collect(),
        }
    }

    /// Entries currently visible.
    #[must_use]
    pub fn view(&self) -> SelectionView<'_> {
        SelectionView {
            previous: self.roster.previous(),
            current: self.roster.current(),
            next: self.roster.next(),
        }
    }

    /// Every offered spaceship, starting at the centred one.
    #[must_use]
    pub fn roster(&self) -> &Cycle<SpaceshipType> {
        &self.roster
    }

    /// Consumes selection commands and emits carousel events.
    pub fn handle(&mut self, commands: &[Command], out_events: &mut Vec<Event>) {
        for command in commands {
            match command {
                Command::RotateSelection { rotation } => {
                    match rotation {
                        Rotation::Left => self.roster.cycle_left(),
                        Rotation::Right => self.roster.cycle_right(),
                    }
                    out_events.push(self.view().to_event());
                }
                Command::ConfirmSelection => {
                    if let Some(spaceship) = self.roster.current() {
                        tracing::debug!(spaceship = spaceship.name(), "spaceship selected");
                        out_events.push(Event::SpaceshipSelected {
                            spaceship: spaceship.clone(),
                        });
                    }
                }
                Command::ReplaceRoster { roster } => {
                    self.roster.clear();
                    self.roster.add_range(roster.iter().cloned());
                    out_events.push(self.view().to_event());
                }
                _ => {}
            }
        }
    }
}
