use std::rc::Rc;

use thiserror::Error;

use crate::texture::sprite::Sprite;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnimationError {
    #[error("Animation has no frames")]
    Empty,
    #[error("Frame duration must be positive, got {0}")]
    InvalidFrameDuration(u32),
}

/// A tick-driven frame animation over a shared image sequence.
///
/// The frame list is reference counted so every entity playing "the same"
/// animation shares the images while keeping its own cursor.
#[derive(Debug, Clone)]
pub struct Animation {
    frames: Rc<[Sprite]>,
    frame_duration: u32,
    looping: bool,
    frame: u32,
    done: bool,
}

impl Animation {
    pub fn new(frames: impl Into<Rc<[Sprite]>>, frame_duration: u32, looping: bool) -> Result<Self, AnimationError> {
        let frames = frames.into();
        if frames.is_empty() {
            return Err(AnimationError::Empty);
        }
        if frame_duration == 0 {
            return Err(AnimationError::InvalidFrameDuration(frame_duration));
        }

        Ok(Self {
            frames,
            frame_duration,
            looping,
            frame: 0,
            done: false,
        })
    }

    /// Returns a fresh cursor over the same frames, starting from the first frame.
    pub fn instance(&self) -> Self {
        Self {
            frames: Rc::clone(&self.frames),
            frame_duration: self.frame_duration,
            looping: self.looping,
            frame: 0,
            done: false,
        }
    }

    /// Total ticks covered by one pass over the frames.
    fn span(&self) -> u32 {
        self.frame_duration * self.frames.len() as u32
    }

    /// Advances the animation by one tick.
    pub fn update(&mut self) {
        let span = self.span();
        if self.looping {
            self.frame = (self.frame + 1) % span;
        } else {
            self.frame = (self.frame + 1).min(span - 1);
            if self.frame >= span - 1 {
                self.done = true;
            }
        }
    }

    pub fn current_image(&self) -> Sprite {
        let index = (self.frame / self.frame_duration) as usize;
        self.frames[index.min(self.frames.len() - 1)]
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Jumps to a specific tick within the animation, clamped to its span.
    pub fn set_frame(&mut self, frame: u32) {
        self.frame = frame.min(self.span() - 1);
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn frame_duration(&self) -> u32 {
        self.frame_duration
    }

    pub fn frames(&self) -> &[Sprite] {
        &self.frames
    }

    /// Returns true if both animations play the same shared image sequence.
    pub fn shares_frames(&self, other: &Animation) -> bool {
        Rc::ptr_eq(&self.frames, &other.frames)
    }
}
