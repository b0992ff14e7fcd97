use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    /// Start, pause or resume depending on the current status.
    Toggle,
    /// Back to a fresh session, then straight into play.
    Reset,
    Quit,
}

/// Two-point pointer gesture in surface coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Swipe {
    pub start: (u16, u16),
    pub end: (u16, u16),
}

impl Swipe {
    /// Direction along the dominant axis of the gesture.
    ///
    /// Ties go to the vertical axis. A gesture that does not move along the
    /// chosen axis maps to nothing.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        let dx = i32::from(self.end.0) - i32::from(self.start.0);
        let dy = i32::from(self.end.1) - i32::from(self.start.1);

        if dx.abs() > dy.abs() {
            return Some(if dx > 0 {
                Direction::Right
            } else {
                Direction::Left
            });
        }

        match dy.signum() {
            1 => Some(Direction::Down),
            -1 => Some(Direction::Up),
            _ => None,
        }
    }
}

/// Translates raw terminal events into [`GameInput`]s.
///
/// Keeps the press point of an in-progress mouse drag so the release can be
/// turned into a [`Swipe`].
#[derive(Debug, Default)]
pub struct InputRouter {
    mouse_enabled: bool,
    swipe_start: Option<(u16, u16)>,
}

impl InputRouter {
    #[must_use]
    pub fn new(mouse_enabled: bool) -> Self {
        Self {
            mouse_enabled,
            swipe_start: None,
        }
    }

    /// Waits up to `timeout` for one terminal event and routes it.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let event = event::read()?;
        Ok(self.route(&event))
    }

    /// Maps one terminal event to a game input, if it means anything.
    pub fn route(&mut self, event: &Event) -> Option<GameInput> {
        match event {
            Event::Key(key) => route_key(*key),
            Event::Mouse(mouse) if self.mouse_enabled => self.route_mouse(*mouse),
            _ => None,
        }
    }

    fn route_mouse(&mut self, mouse: MouseEvent) -> Option<GameInput> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe_start = Some((mouse.column, mouse.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let start = self.swipe_start.take()?;
                let swipe = Swipe {
                    start,
                    end: (mouse.column, mouse.row),
                };
                log::debug!("swipe {swipe:?}");
                swipe.direction().map(GameInput::Direction)
            }
            _ => None,
        }
    }
}

fn route_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Char(' ' | 'p' | 'P') => GameInput::Toggle,
        KeyCode::Char('r' | 'R') => GameInput::Reset,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    };

    use super::{direction_change_is_valid, Direction, GameInput, InputRouter, Swipe};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn reversal_is_not_a_valid_change() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        let mut router = InputRouter::new(false);

        assert_eq!(
            router.route(&key(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            router.route(&key(KeyCode::Char('a'))),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(router.route(&key(KeyCode::Char(' '))), Some(GameInput::Toggle));
        assert_eq!(router.route(&key(KeyCode::Char('r'))), Some(GameInput::Reset));
        assert_eq!(router.route(&key(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(router.route(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn ctrl_c_quits_and_key_release_is_ignored() {
        let mut router = InputRouter::new(false);

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(router.route(&ctrl_c), Some(GameInput::Quit));

        let release = Event::Key(KeyEvent::new_with_kind_and_state(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        ));
        assert_eq!(router.route(&release), None);
    }

    #[test]
    fn swipe_picks_dominant_axis() {
        let horizontal = Swipe {
            start: (10, 10),
            end: (4, 8),
        };
        let vertical = Swipe {
            start: (10, 10),
            end: (12, 15),
        };
        let tie = Swipe {
            start: (10, 10),
            end: (13, 7),
        };
        let tap = Swipe {
            start: (10, 10),
            end: (10, 10),
        };

        assert_eq!(horizontal.direction(), Some(Direction::Left));
        assert_eq!(vertical.direction(), Some(Direction::Down));
        assert_eq!(tie.direction(), Some(Direction::Up));
        assert_eq!(tap.direction(), None);
    }

    #[test]
    fn mouse_drag_becomes_swipe() {
        let mut router = InputRouter::new(true);

        assert_eq!(
            router.route(&mouse(MouseEventKind::Down(MouseButton::Left), 5, 5)),
            None
        );
        assert_eq!(
            router.route(&mouse(MouseEventKind::Up(MouseButton::Left), 15, 6)),
            Some(GameInput::Direction(Direction::Right))
        );

        // A release without a matching press is ignored.
        assert_eq!(
            router.route(&mouse(MouseEventKind::Up(MouseButton::Left), 1, 1)),
            None
        );
    }

    #[test]
    fn mouse_is_ignored_when_disabled() {
        let mut router = InputRouter::new(false);

        router.route(&mouse(MouseEventKind::Down(MouseButton::Left), 5, 5));
        assert_eq!(
            router.route(&mouse(MouseEventKind::Up(MouseButton::Left), 15, 5)),
            None
        );
    }
}
