//! Frame-based sprite animation

use serde::{Deserialize, Serialize};

/// How a frame animation walks through its frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    /// Play once and hold the last frame
    Normal,
    /// Restart from the first frame after the last
    Loop,
    /// Play forward, then backward, repeatedly
    #[default]
    LoopPingPong,
}

/// A cycle of frames shown for a fixed duration each
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAnimation {
    frame_count: usize,
    frame_duration: f32,
    mode: PlayMode,
}

impl FrameAnimation {
    /// Creates an animation over `frame_count` frames
    ///
    /// A zero frame count is treated as a single frame.
    pub fn new(frame_count: usize, frame_duration: f32, mode: PlayMode) -> Self {
        Self {
            frame_count: frame_count.max(1),
            frame_duration,
            mode,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn frame_duration(&self) -> f32 {
        self.frame_duration
    }

    /// Returns the frame to display after `elapsed` seconds of playback
    pub fn frame_index(&self, elapsed: f32) -> usize {
        let n = self.frame_count;
        if n == 1 || self.frame_duration <= 0.0 {
            return 0;
        }

        let step = (elapsed.max(0.0) / self.frame_duration) as usize;
        match self.mode {
            PlayMode::Normal => step.min(n - 1),
            PlayMode::Loop => step % n,
            PlayMode::LoopPingPong => {
                let cycle = n * 2 - 2;
                let index = step % cycle;
                if index >= n { cycle - index } else { index }
            }
        }
    }
}
