// Vector sources - joystick gestures and keyboard state to command vectors
use crate::domain::command::{COMMAND_LIMIT, CommandVector};
use serde::{Deserialize, Serialize};

/// Gap kept between the drawn handle and the joystick rim, in pixels.
pub const HANDLE_INSET: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Offset divided by radius, scaled back onto the unit circle when it falls
/// outside. Direction is preserved; magnitude never exceeds 1.
pub fn normalize(dx: f64, dy: f64, radius: f64) -> (f64, f64) {
    let (nx, ny) = (dx / radius, dy / radius);
    let m = nx.hypot(ny);
    if m > 1.0 { (nx / m, ny / m) } else { (nx, ny) }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JoystickFrame {
    pub command: CommandVector,
    /// Handle translation from the control's center, in pixels.
    pub handle: (f64, f64),
}

#[derive(Debug, Clone, Copy)]
struct Gesture {
    kind: PointerKind,
    origin: (f64, f64),
    radius: f64,
}

/// One on-screen joystick. A gesture belongs to the pointer kind that
/// started it; events from the other kind are ignored until release.
#[derive(Debug, Default)]
pub struct Joystick {
    gesture: Option<Gesture>,
}

impl Joystick {
    /// Start a gesture. The origin is taken from the control's current
    /// bounds so layout changes between gestures are picked up.
    pub fn press(&mut self, kind: PointerKind, bounds: Rect) -> bool {
        if matches!(self.gesture, Some(g) if g.kind != kind) {
            return false;
        }
        let radius = bounds.width / 2.0;
        if radius <= 0.0 {
            return false;
        }
        self.gesture = Some(Gesture {
            kind,
            origin: bounds.center(),
            radius,
        });
        true
    }

    pub fn move_to(&mut self, kind: PointerKind, x: f64, y: f64) -> Option<JoystickFrame> {
        let g = self.gesture.filter(|g| g.kind == kind)?;
        let (nx, ny) = normalize(x - g.origin.0, y - g.origin.1, g.radius);
        let reach = (g.radius - HANDLE_INSET).max(0.0);
        Some(JoystickFrame {
            command: CommandVector::from_screen_unit(nx, ny),
            handle: (nx * reach, ny * reach),
        })
    }

    /// End the gesture; yields the single zero vector that stops the vehicle.
    pub fn release(&mut self, kind: PointerKind) -> Option<CommandVector> {
        match self.gesture {
            Some(g) if g.kind == kind => {
                self.gesture = None;
                Some(CommandVector::ZERO)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// WASD (either case) and the arrow keys.
    pub fn from_key(key: &str) -> Option<Direction> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            k if k.eq_ignore_ascii_case("w") => Some(Direction::Up),
            k if k.eq_ignore_ascii_case("s") => Some(Direction::Down),
            k if k.eq_ignore_ascii_case("a") => Some(Direction::Left),
            k if k.eq_ignore_ascii_case("d") => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Held-direction state for keyboard driving.
///
/// Only edges emit: a press of an already held key (OS auto-repeat) and a
/// release of a key that is not held both return `None`.
#[derive(Debug, Default, Clone)]
pub struct KeyboardComposer {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl KeyboardComposer {
    pub fn key_down(&mut self, key: &str) -> Option<CommandVector> {
        self.set(Direction::from_key(key)?, true)
    }

    pub fn key_up(&mut self, key: &str) -> Option<CommandVector> {
        self.set(Direction::from_key(key)?, false)
    }

    pub fn vector(&self) -> CommandVector {
        let axis = |pos: bool, neg: bool| {
            let v = COMMAND_LIMIT * (pos as i32 - neg as i32);
            v.clamp(-COMMAND_LIMIT, COMMAND_LIMIT)
        };
        CommandVector::new(axis(self.right, self.left), axis(self.up, self.down))
    }

    fn set(&mut self, direction: Direction, pressed: bool) -> Option<CommandVector> {
        let slot = match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        };
        if *slot == pressed {
            return None;
        }
        *slot = pressed;
        Some(self.vector())
    }
}
