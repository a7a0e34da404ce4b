//! Sprite key state.
//!
//! [`SpriteInput`] holds the keys the sprite controller reads this frame:
//! `left` and `right` while held, `jump` on the frame it is pressed. The
//! controller clears `jump` after reading it.
//!
//! Headless runs have no keyboard, so [`InputScript`] replays a fixed list of
//! timed steps in a loop.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpriteInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl SpriteInput {
    pub const NONE: SpriteInput = SpriteInput {
        left: false,
        right: false,
        jump: false,
    };
    pub const LEFT: SpriteInput = SpriteInput {
        left: true,
        right: false,
        jump: false,
    };
    pub const RIGHT: SpriteInput = SpriteInput {
        left: false,
        right: true,
        jump: false,
    };

    pub const fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }
}

/// One scripted step: hold `input` for `frames` frames. A jump fires on the
/// first frame of its step only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputStep {
    pub frames: u32,
    pub input: SpriteInput,
}

impl InputStep {
    pub const fn new(frames: u32, input: SpriteInput) -> Self {
        Self { frames, input }
    }
}

/// Loops over a list of [`InputStep`]s, one frame per call to
/// [`next_input`](Self::next_input).
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    steps: Vec<InputStep>,
    step: usize,
    frame: u32,
}

impl InputScript {
    /// Steps of zero frames are dropped.
    pub fn new(steps: impl IntoIterator<Item = InputStep>) -> Self {
        Self {
            steps: steps.into_iter().filter(|s| s.frames > 0).collect(),
            step: 0,
            frame: 0,
        }
    }

    /// Input for the next frame. An empty script yields no keys.
    pub fn next_input(&mut self) -> SpriteInput {
        let Some(current) = self.steps.get(self.step).copied() else {
            return SpriteInput::NONE;
        };
        let mut input = current.input;
        input.jump &= self.frame == 0;

        self.frame += 1;
        if self.frame >= current.frames {
            self.frame = 0;
            self.step = (self.step + 1) % self.steps.len();
        }
        input
    }

    /// Frames in one pass over the script.
    pub fn cycle_len(&self) -> u32 {
        self.steps.iter().map(|s| s.frames).sum()
    }

    pub fn restart(&mut self) {
        self.step = 0;
        self.frame = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_play_in_order_and_loop() {
        let mut script = InputScript::new([
            InputStep::new(2, SpriteInput::RIGHT),
            InputStep::new(0, SpriteInput::LEFT),
            InputStep::new(1, SpriteInput::NONE),
        ]);
        assert_eq!(script.cycle_len(), 3);
        let played: Vec<SpriteInput> = (0..4).map(|_| script.next_input()).collect();
        assert_eq!(
            played,
            vec![
                SpriteInput::RIGHT,
                SpriteInput::RIGHT,
                SpriteInput::NONE,
                SpriteInput::RIGHT
            ]
        );
    }

    #[test]
    fn jump_fires_once_per_step() {
        let mut script = InputScript::new([InputStep::new(3, SpriteInput::LEFT.with_jump())]);
        assert!(script.next_input().jump);
        assert!(!script.next_input().jump);
        assert!(!script.next_input().jump);
        assert!(script.next_input().jump);

        script.next_input();
        script.restart();
        assert!(script.next_input().jump);
    }

    #[test]
    fn empty_script_presses_nothing() {
        let mut script = InputScript::new(Vec::<InputStep>::new());
        assert_eq!(script.next_input(), SpriteInput::NONE);
    }
}
