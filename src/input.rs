//! Translation of raw gestures and keys into directions
//!
//! Transport-agnostic: hosts feed in drag vectors or characters from whatever
//! event source they have. Anything ambiguous maps to `None` and should be
//! dropped, never forwarded.

use glam::Vec2;

use crate::sim::Direction;

/// Map a drag vector (screen coordinates, y down) to its dominant axis.
///
/// Drags shorter than `threshold` on both axes, or exactly diagonal ones,
/// have no dominant direction.
pub fn direction_from_drag(delta: Vec2, threshold: f32) -> Option<Direction> {
    let abs = delta.abs();
    if abs.x <= threshold && abs.y <= threshold {
        return None;
    }
    if abs.x > abs.y {
        Some(if delta.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else if abs.y > abs.x {
        Some(if delta.y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    } else {
        None
    }
}

/// WASD and vi-style letter bindings
pub fn direction_from_char(c: char) -> Option<Direction> {
    match c.to_ascii_lowercase() {
        'w' | 'k' => Some(Direction::Up),
        's' | 'j' => Some(Direction::Down),
        'a' | 'h' => Some(Direction::Left),
        'd' | 'l' => Some(Direction::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_dominant_axis() {
        assert_eq!(direction_from_drag(Vec2::new(30.0, 4.0), 10.0), Some(Direction::Right));
        assert_eq!(direction_from_drag(Vec2::new(-30.0, 12.0), 10.0), Some(Direction::Left));
        assert_eq!(direction_from_drag(Vec2::new(3.0, 25.0), 10.0), Some(Direction::Down));
        assert_eq!(direction_from_drag(Vec2::new(-11.0, -40.0), 10.0), Some(Direction::Up));
    }

    #[test]
    fn test_drag_dead_zone() {
        assert_eq!(direction_from_drag(Vec2::ZERO, 10.0), None);
        assert_eq!(direction_from_drag(Vec2::new(9.0, -9.5), 10.0), None);
        assert_eq!(direction_from_drag(Vec2::new(10.0, 0.0), 10.0), None);
    }

    #[test]
    fn test_drag_exact_diagonal_is_ignored() {
        assert_eq!(direction_from_drag(Vec2::new(20.0, -20.0), 10.0), None);
    }

    #[test]
    fn test_char_bindings() {
        assert_eq!(direction_from_char('W'), Some(Direction::Up));
        assert_eq!(direction_from_char('j'), Some(Direction::Down));
        assert_eq!(direction_from_char('a'), Some(Direction::Left));
        assert_eq!(direction_from_char('l'), Some(Direction::Right));
        assert_eq!(direction_from_char('q'), None);
    }
}
