//! Studio tokens to virtual controller inputs.

use movie_core::PadButtons;

/// Full stick deflection used for digital movement tokens.
pub const STICK_MAX: i16 = 32767;

/// Button token table. Movement (`R`/`L`/`U`/`D`) and the feather token
/// (`F`) are handled separately since they drive the stick.
#[must_use]
pub fn button_for(token: char) -> Option<PadButtons> {
    match token {
        'J' => Some(PadButtons::A),
        'K' => Some(PadButtons::Y),
        'X' => Some(PadButtons::X),
        'C' => Some(PadButtons::B),
        'Z' => Some(PadButtons::LB),
        'G' => Some(PadButtons::RB),
        'S' => Some(PadButtons::START),
        'Q' => Some(PadButtons::BACK),
        _ => None,
    }
}

/// Stick deflection for a feather angle: 0 degrees is up, increasing
/// clockwise.
#[must_use]
pub fn feather_stick(degrees: f64) -> (i16, i16) {
    let radians = degrees.to_radians();
    let x = (radians.sin() * f64::from(STICK_MAX)).round();
    let y = (-radians.cos() * f64::from(STICK_MAX)).round();
    (x as i16, y as i16)
}
