//! Turtle graphics component.
//!
//! A [`Turtle`] walks a 2D plane (screen coordinates, y down) from a
//! [`TurtleState`]. Angles are in degrees; `0` faces +x and positive
//! rotation turns clockwise on screen. Every move made with the brush down
//! records a [`TurtleSegment`], so the drawing can be replayed one segment at
//! a time.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Smallest brush width reachable through [`Turtle::decrease_brush_width`].
pub const MIN_BRUSH_WIDTH: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurtleState {
    pub position: Vec2,
    /// Heading in degrees.
    pub angle: f32,
    pub brush_down: bool,
    pub brush_width: f32,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            brush_down: true,
            brush_width: MIN_BRUSH_WIDTH,
        }
    }
}

impl TurtleState {
    fn heading(&self) -> Vec2 {
        let radians = self.angle.to_radians();
        Vec2::new(radians.cos(), radians.sin())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurtleSegment {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
}

impl TurtleSegment {
    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct Turtle {
    state: TurtleState,
    saved: Vec<TurtleState>,
    segments: Vec<TurtleSegment>,
}

impl Turtle {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            state: TurtleState {
                position: Vec2::new(x, y),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn current_state(&self) -> &TurtleState {
        &self.state
    }

    pub fn move_forward(&mut self, length: f32) {
        let offset = self.state.heading() * length;
        self.walk(offset);
    }

    pub fn move_backward(&mut self, length: f32) {
        let offset = self.state.heading() * -length;
        self.walk(offset);
    }

    /// Sidestep to the turtle's left without turning.
    pub fn move_left(&mut self, length: f32) {
        let offset = self.state.heading().perp() * -length;
        self.walk(offset);
    }

    /// Sidestep to the turtle's right without turning.
    pub fn move_right(&mut self, length: f32) {
        let offset = self.state.heading().perp() * length;
        self.walk(offset);
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.state.angle = (self.state.angle + degrees).rem_euclid(360.0);
    }

    pub fn toggle_brush(&mut self) {
        self.state.brush_down = !self.state.brush_down;
    }

    pub fn set_brush_width(&mut self, width: f32) {
        self.state.brush_width = width.max(MIN_BRUSH_WIDTH);
    }

    pub fn increase_brush_width(&mut self) {
        self.set_brush_width(self.state.brush_width + 1.0);
    }

    pub fn decrease_brush_width(&mut self) {
        self.set_brush_width(self.state.brush_width - 1.0);
    }

    /// Push the current state.
    pub fn save(&mut self) {
        self.saved.push(self.state);
    }

    /// Pop the last saved state and make it current. No-op if nothing was
    /// saved.
    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    /// Make the last saved state current, keeping it saved.
    pub fn restore_not_purge(&mut self) {
        if let Some(state) = self.saved.last() {
            self.state = *state;
        }
    }

    pub fn saved_count(&self) -> usize {
        self.saved.len()
    }

    pub fn segments(&self) -> &[TurtleSegment] {
        &self.segments
    }

    /// First `steps` segments, clamped to what was recorded.
    pub fn segments_up_to(&self, steps: usize) -> &[TurtleSegment] {
        &self.segments[..steps.min(self.segments.len())]
    }

    /// Number of recorded segments.
    pub fn frame_count(&self) -> usize {
        self.segments.len()
    }

    fn walk(&mut self, offset: Vec2) {
        let from = self.state.position;
        let to = from + offset;
        self.state.position = to;
        if self.state.brush_down {
            self.segments.push(TurtleSegment {
                from,
                to,
                width: self.state.brush_width,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn forward_then_rotate() {
        let mut t = Turtle::new(0.0, 0.0);
        t.move_forward(10.0);
        t.rotate(90.0);
        t.move_forward(5.0);
        assert!(approx_eq(t.current_state().position, Vec2::new(10.0, 5.0)));
        assert_eq!(t.frame_count(), 2);
    }

    #[test]
    fn sidesteps_keep_heading() {
        let mut t = Turtle::new(0.0, 0.0);
        t.move_right(3.0);
        assert!(approx_eq(t.current_state().position, Vec2::new(0.0, 3.0)));
        t.move_left(3.0);
        t.move_backward(2.0);
        assert!(approx_eq(t.current_state().position, Vec2::new(-2.0, 0.0)));
        assert_eq!(t.current_state().angle, 0.0);
    }

    #[test]
    fn brush_up_moves_without_drawing() {
        let mut t = Turtle::new(0.0, 0.0);
        t.toggle_brush();
        t.move_forward(10.0);
        assert_eq!(t.frame_count(), 0);
        t.toggle_brush();
        t.move_forward(10.0);
        assert_eq!(t.segments()[0].from, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn restore_pops_restore_not_purge_peeks() {
        let mut t = Turtle::new(1.0, 1.0);
        t.save();
        t.move_forward(4.0);
        t.restore_not_purge();
        assert_eq!(t.current_state().position, Vec2::new(1.0, 1.0));
        assert_eq!(t.saved_count(), 1);
        t.move_forward(4.0);
        t.restore();
        assert_eq!(t.current_state().position, Vec2::new(1.0, 1.0));
        assert_eq!(t.saved_count(), 0);
        t.restore();
        assert_eq!(t.current_state().position, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn brush_width_has_floor() {
        let mut t = Turtle::default();
        t.decrease_brush_width();
        assert_eq!(t.current_state().brush_width, MIN_BRUSH_WIDTH);
        t.increase_brush_width();
        t.move_forward(1.0);
        assert_eq!(t.segments()[0].width, 2.0);
        assert_eq!(t.segments_up_to(10).len(), 1);
    }
}
