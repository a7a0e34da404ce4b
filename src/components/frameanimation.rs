//! Frame-by-frame animation component.
//!
//! A [`FrameAnimation`] cycles through a list of frames at a fixed time per
//! frame. Frames are opaque to the animation: sprite rectangles, shape
//! parameters or plain indices all work.
//!
//! The animation is advanced by
//! [`frame_animation_system`](crate::systems::frameanimation::frame_animation_system)
//! or directly through [`FrameAnimation::update`].

use bevy_ecs::prelude::Component;

/// Shortest allowed time between frames, in seconds.
pub const MIN_TIME_TO_NEXT_FRAME: f32 = 0.01;
/// Longest allowed time between frames, in seconds.
pub const MAX_TIME_TO_NEXT_FRAME: f32 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrameAnimationState {
    #[default]
    Running,
    Paused,
    /// A non-looping animation reached its last frame.
    Finished,
}

#[derive(Component, Debug, Clone)]
pub struct FrameAnimation<F: Send + Sync + 'static> {
    frames: Vec<F>,
    time_to_next_frame: f32,
    elapsed: f32,
    current: usize,
    looping: bool,
    state: FrameAnimationState,
}

impl<F: Send + Sync + 'static> FrameAnimation<F> {
    /// Create a looping animation. `time_to_next_frame` is clamped to
    /// [`MIN_TIME_TO_NEXT_FRAME`]..=[`MAX_TIME_TO_NEXT_FRAME`].
    pub fn new(time_to_next_frame: f32, frames: Vec<F>) -> Self {
        Self {
            frames,
            time_to_next_frame: clamp_frame_time(time_to_next_frame),
            elapsed: 0.0,
            current: 0,
            looping: true,
            state: FrameAnimationState::Running,
        }
    }

    /// Advance by `delta` seconds. Large deltas may step over several frames.
    pub fn update(&mut self, delta: f32) {
        if self.state != FrameAnimationState::Running || self.frames.is_empty() {
            return;
        }
        self.elapsed += delta.max(0.0);
        while self.elapsed >= self.time_to_next_frame {
            self.elapsed -= self.time_to_next_frame;
            if self.current + 1 < self.frames.len() {
                self.current += 1;
            } else if self.looping {
                self.current = 0;
            } else {
                self.elapsed = 0.0;
                self.state = FrameAnimationState::Finished;
                break;
            }
        }
    }

    pub fn pause(&mut self) {
        if self.state == FrameAnimationState::Running {
            self.state = FrameAnimationState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == FrameAnimationState::Paused {
            self.state = FrameAnimationState::Running;
        }
    }

    /// Back to the first frame, running.
    pub fn reset(&mut self) {
        self.current = 0;
        self.elapsed = 0.0;
        self.state = FrameAnimationState::Running;
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn time_to_next_frame(&self) -> f32 {
        self.time_to_next_frame
    }

    pub fn set_time_to_next_frame(&mut self, time_to_next_frame: f32) {
        self.time_to_next_frame = clamp_frame_time(time_to_next_frame);
    }

    pub fn current_frame(&self) -> Option<&F> {
        self.frames.get(self.current)
    }

    pub fn current_frame_position(&self) -> usize {
        self.current
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn state(&self) -> FrameAnimationState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == FrameAnimationState::Finished
    }
}

fn clamp_frame_time(t: f32) -> f32 {
    if t.is_nan() {
        return MAX_TIME_TO_NEXT_FRAME;
    }
    t.clamp(MIN_TIME_TO_NEXT_FRAME, MAX_TIME_TO_NEXT_FRAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames() -> FrameAnimation<char> {
        FrameAnimation::new(0.5, vec!['a', 'b', 'c'])
    }

    #[test]
    fn looping_wraps_to_first_frame() {
        let mut anim = frames();
        anim.update(0.5);
        assert_eq!(anim.current_frame(), Some(&'b'));
        anim.update(0.5);
        anim.update(0.5);
        assert_eq!(anim.current_frame_position(), 0);
        assert_eq!(anim.state(), FrameAnimationState::Running);
    }

    #[test]
    fn large_delta_skips_frames() {
        let mut anim = frames();
        anim.update(1.25);
        assert_eq!(anim.current_frame_position(), 2);
        anim.update(0.25);
        assert_eq!(anim.current_frame_position(), 0);
    }

    #[test]
    fn non_looping_stops_on_last_frame() {
        let mut anim = frames();
        anim.set_looping(false);
        anim.update(5.0);
        assert_eq!(anim.current_frame(), Some(&'c'));
        assert!(anim.is_finished());
        anim.update(5.0);
        assert_eq!(anim.current_frame_position(), 2);
    }

    #[test]
    fn paused_does_not_advance() {
        let mut anim = frames();
        anim.pause();
        anim.update(1.0);
        assert_eq!(anim.current_frame_position(), 0);
        assert_eq!(anim.state(), FrameAnimationState::Paused);
        anim.resume();
        anim.update(0.5);
        assert_eq!(anim.current_frame_position(), 1);
    }

    #[test]
    fn reset_restarts_finished_animation() {
        let mut anim = frames();
        anim.set_looping(false);
        anim.update(2.0);
        anim.reset();
        assert_eq!(anim.state(), FrameAnimationState::Running);
        assert_eq!(anim.current_frame_position(), 0);
    }

    #[test]
    fn frame_time_is_clamped() {
        let mut anim = frames();
        anim.set_time_to_next_frame(0.0);
        assert_eq!(anim.time_to_next_frame(), MIN_TIME_TO_NEXT_FRAME);
        anim.set_time_to_next_frame(3.0);
        assert_eq!(anim.time_to_next_frame(), MAX_TIME_TO_NEXT_FRAME);
    }

    #[test]
    fn empty_animation_has_no_frame() {
        let mut anim: FrameAnimation<u8> = FrameAnimation::new(0.1, Vec::new());
        anim.update(1.0);
        assert!(anim.current_frame().is_none());
    }
}
