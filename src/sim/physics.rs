//! Bat motion and animation
//!
//! Constants are per frame: one call to [`step`] is one rendered frame.

use super::state::{Bat, RoundParams};

/// Apply gravity, then move by the new velocity
#[inline]
pub fn integrate(bat: &mut Bat, gravity: f64) {
    bat.vel += gravity;
    bat.pos.y += bat.vel;
}

/// Replace the current velocity with the flap impulse
#[inline]
pub fn flap(bat: &mut Bat, impulse: f64) {
    bat.vel = impulse;
}

/// Advance the wing-beat cycle: one frame every `ticks_per_frame` ticks
pub fn animate(bat: &mut Bat, ticks_per_frame: u32, frames: u32) {
    bat.frame_ticks = bat.frame_ticks.wrapping_add(1);
    if ticks_per_frame > 0 && bat.frame_ticks % ticks_per_frame == 0 {
        bat.frame = (bat.frame + 1) % frames.max(1);
    }
}

/// One physics tick
pub fn step(bat: &mut Bat, params: &RoundParams, ticks_per_frame: u32, frames: u32) {
    integrate(bat, params.gravity);
    animate(bat, ticks_per_frame, frames);
}
