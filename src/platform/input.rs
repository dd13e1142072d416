//! Raw input to intent decoding

use crate::sim::{GamePhase, Intent};

/// Map a `KeyboardEvent.code` to an intent
pub fn intent_for_key(code: &str) -> Option<Intent> {
    match code {
        "ArrowLeft" | "KeyA" => Some(Intent::MoveLeft),
        "ArrowRight" | "KeyD" => Some(Intent::MoveRight),
        "Space" => Some(Intent::Restart),
        _ => None,
    }
}

/// Map a touch at horizontal position `x` on a surface `width` wide.
///
/// Any touch restarts a finished run; otherwise the screen half picks the
/// direction.
pub fn intent_for_touch(x: f32, width: f32, phase: GamePhase) -> Intent {
    if phase == GamePhase::GameOver {
        Intent::Restart
    } else if x < width / 2.0 {
        Intent::MoveLeft
    } else {
        Intent::MoveRight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(intent_for_key("ArrowLeft"), Some(Intent::MoveLeft));
        assert_eq!(intent_for_key("KeyA"), Some(Intent::MoveLeft));
        assert_eq!(intent_for_key("ArrowRight"), Some(Intent::MoveRight));
        assert_eq!(intent_for_key("KeyD"), Some(Intent::MoveRight));
        assert_eq!(intent_for_key("Space"), Some(Intent::Restart));
        assert_eq!(intent_for_key("Enter"), None);
        assert_eq!(intent_for_key("keya"), None);
    }

    #[test]
    fn test_touch_halves() {
        assert_eq!(intent_for_touch(10.0, 400.0, GamePhase::Running), Intent::MoveLeft);
        assert_eq!(intent_for_touch(200.0, 400.0, GamePhase::Running), Intent::MoveRight);
        assert_eq!(intent_for_touch(390.0, 400.0, GamePhase::Running), Intent::MoveRight);
        assert_eq!(intent_for_touch(10.0, 400.0, GamePhase::GameOver), Intent::Restart);
    }
}
