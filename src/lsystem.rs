//! Penrose tiling L-system.
//!
//! [`PenroseLSystem`] rewrites its production string in parallel with the
//! W/X/Y/Z rules and interprets the result with a [`Turtle`]:
//!
//! | symbol | meaning |
//! |--------|---------|
//! | `F` | move forward, drawing |
//! | `+` / `-` | rotate by `+theta` / `-theta` |
//! | `0`..`9` | repeat count for the next `F`, `+` or `-` |
//! | `[` | save the turtle state |
//! | `]` | go back to the last saved state, keeping it saved |
//!
//! `W`, `X`, `Y` and `Z` are only rewritten, never drawn.

use glam::Vec2;
use log::debug;

use crate::components::turtle::Turtle;

pub const AXIOM: &str = "[X]++[X]++[X]++[X]++[X]";
pub const RULE_W: &str = "YF++ZF4-XF[-YF4-WF]++";
pub const RULE_X: &str = "+YF--ZF[3-WF--XF]+";
pub const RULE_Y: &str = "-WF++XF[+++YF++ZF]-";
pub const RULE_Z: &str = "--YF++++WF[+ZF++++XF]--XF";
/// Turning angle in degrees.
pub const THETA: f32 = 36.0;
/// Brush width used by [`PenroseLSystem::build_turtle`].
pub const BRUSH_WIDTH: f32 = 2.0;

fn rule(symbol: char) -> Option<&'static str> {
    match symbol {
        'W' => Some(RULE_W),
        'X' => Some(RULE_X),
        'Y' => Some(RULE_Y),
        'Z' => Some(RULE_Z),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PenroseLSystem {
    production: String,
    draw_length: f32,
    theta: f32,
    generations: u32,
}

impl PenroseLSystem {
    /// Start from the axiom with the given segment length.
    pub fn new(draw_length: f32) -> Self {
        Self {
            production: AXIOM.to_string(),
            draw_length,
            theta: THETA,
            generations: 0,
        }
    }

    /// Rewrite `generations` times, starting from a length scaled by
    /// `generations / max_generations` so deeper tilings keep a similar
    /// overall size.
    pub fn generate(draw_length: f32, generations: u32, max_generations: u32) -> Self {
        let scale = generations as f32 / max_generations.max(1) as f32;
        let mut system = Self::new(draw_length * scale);
        for _ in 0..generations {
            system.rewrite();
        }
        debug!(
            "Penrose L-system: {} generations, {} symbols, length {:.3}",
            generations,
            system.production.len(),
            system.draw_length
        );
        system
    }

    /// One parallel rewrite step. Drops every `F`, expands W/X/Y/Z, keeps
    /// other symbols and halves the draw length.
    pub fn rewrite(&mut self) {
        let mut next = String::with_capacity(self.production.len() * 4);
        for symbol in self.production.chars() {
            match rule(symbol) {
                Some(replacement) => next.push_str(replacement),
                None if symbol == 'F' => {}
                None => next.push(symbol),
            }
        }
        self.production = next;
        self.draw_length *= 0.5;
        self.generations += 1;
    }

    pub fn production(&self) -> &str {
        &self.production
    }

    pub fn draw_length(&self) -> f32 {
        self.draw_length
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn generations(&self) -> u32 {
        self.generations
    }

    /// Drive `turtle` through the current production.
    pub fn interpret(&self, turtle: &mut Turtle) {
        let mut repeats = 1;
        for symbol in self.production.chars() {
            match symbol {
                'F' => {
                    for _ in 0..repeats {
                        turtle.move_forward(self.draw_length);
                    }
                    repeats = 1;
                }
                '+' => {
                    for _ in 0..repeats {
                        turtle.rotate(self.theta);
                    }
                    repeats = 1;
                }
                '-' => {
                    for _ in 0..repeats {
                        turtle.rotate(-self.theta);
                    }
                    repeats = 1;
                }
                '[' => turtle.save(),
                ']' => turtle.restore_not_purge(),
                _ => {
                    if let Some(digit) = symbol.to_digit(10) {
                        repeats = digit;
                    }
                }
            }
        }
    }

    /// A turtle at `origin` that has drawn the current production.
    pub fn build_turtle(&self, origin: Vec2) -> Turtle {
        let mut turtle = Turtle::new(origin.x, origin.y);
        turtle.set_brush_width(BRUSH_WIDTH);
        self.interpret(&mut turtle);
        turtle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_rewrite_expands_every_x() {
        let mut system = PenroseLSystem::new(100.0);
        system.rewrite();
        assert_eq!(system.production(), AXIOM.replace('X', RULE_X));
        assert_eq!(system.draw_length(), 50.0);
        assert_eq!(system.generations(), 1);
    }

    #[test]
    fn rewrite_drops_forward_moves() {
        let mut system = PenroseLSystem::new(100.0);
        system.rewrite();
        system.rewrite();
        let once = AXIOM.replace('X', RULE_X);
        let expected: String = once
            .chars()
            .filter(|c| *c != 'F')
            .map(|c| rule(c).map(str::to_string).unwrap_or_else(|| c.to_string()))
            .collect();
        assert_eq!(system.production(), expected);
    }

    #[test]
    fn segment_count_matches_forward_moves() {
        let system = PenroseLSystem::generate(650.0, 1, 6);
        let turtle = system.build_turtle(Vec2::new(400.0, 225.0));
        // No digit precedes an F in the rules, so every F draws once.
        assert_eq!(
            turtle.frame_count(),
            system.production().matches('F').count()
        );
        assert_eq!(turtle.frame_count(), 20);
    }

    #[test]
    fn repeat_digit_applies_to_next_command() {
        let system = PenroseLSystem {
            production: "3F+F".to_string(),
            draw_length: 1.0,
            theta: 90.0,
            generations: 0,
        };
        let mut turtle = Turtle::new(0.0, 0.0);
        system.interpret(&mut turtle);
        assert_eq!(turtle.frame_count(), 4);
        let end = turtle.current_state().position;
        assert!((end - Vec2::new(3.0, 1.0)).length() < 1e-4);
    }

    #[test]
    fn bracket_returns_to_saved_state() {
        let system = PenroseLSystem {
            production: "[F]F".to_string(),
            draw_length: 2.0,
            theta: THETA,
            generations: 0,
        };
        let mut turtle = Turtle::new(0.0, 0.0);
        system.interpret(&mut turtle);
        assert_eq!(turtle.segments()[1].from, Vec2::ZERO);
        assert_eq!(turtle.saved_count(), 1);
    }

    #[test]
    fn generate_scales_initial_length() {
        let system = PenroseLSystem::generate(600.0, 3, 6);
        assert_eq!(system.draw_length(), 600.0 * 0.5 / 8.0);
    }
}
