/// One frame region on a sprite sheet, in texture pixels.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FrameRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Timer-driven sprite animation owned by one entity.
///
/// Frames advance whenever the accumulated timer crosses the per-frame
/// duration; a single large `advance` consumes as many whole frames as fit,
/// so stepping exactly `frame_count * frame_duration` seconds lands back on
/// frame 0 for a looping animation.
pub struct AnimationData {
    frames: Vec<FrameRect>,
    current_frame: usize,
    frame_duration: f32,
    frame_timer: f32,
    active: bool,
    looping: bool,
}

impl AnimationData {
    /// An inactive animation with no frames. Rendering skips it.
    pub fn empty() -> Self {
        Self {
            frames: Vec::new(),
            current_frame: 0,
            frame_duration: 0.0,
            frame_timer: 0.0,
            active: false,
            looping: false,
        }
    }

    /// Replace the active animation. The previous frame set is dropped,
    /// the index and timer reset to zero, and the animation becomes active.
    pub fn play(&mut self, frames: Vec<FrameRect>, frame_duration: f32, looping: bool) {
        self.frames = frames;
        self.frame_duration = frame_duration;
        self.looping = looping;
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.active = true;
    }

    /// Advance the frame timer by `dt` seconds, stepping through as many
    /// frames as the elapsed time covers. Looping animations wrap to frame 0;
    /// non-looping animations clamp on the last frame.
    pub fn advance(&mut self, dt: f32) {
        if !self.active || self.frames.is_empty() || self.frame_duration <= 0.0 {
            return;
        }
        self.frame_timer += dt;
        while self.frame_timer >= self.frame_duration {
            self.frame_timer -= self.frame_duration;
            if self.current_frame + 1 < self.frames.len() {
                self.current_frame += 1;
            } else if self.looping {
                self.current_frame = 0;
            } else {
                // Hold the last frame; discard any leftover time.
                self.frame_timer = 0.0;
                break;
            }
        }
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// True while the last frame of the sequence is showing.
    pub fn on_final_frame(&self) -> bool {
        !self.frames.is_empty() && self.current_frame == self.frames.len() - 1
    }

    /// The frame rectangle to draw this tick, if the animation is active.
    pub fn current_rect(&self) -> Option<FrameRect> {
        if self.active {
            self.frames.get(self.current_frame).copied()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(count: usize) -> Vec<FrameRect> {
        (0..count)
            .map(|i| FrameRect {
                x: i as f32 * 64.0,
                y: 0.0,
                w: 64.0,
                h: 64.0,
            })
            .collect()
    }

    #[test]
    fn looping_advance_wraps_exactly() {
        let mut anim = AnimationData::empty();
        anim.play(frames(6), 0.2, true);
        // 1.2s = exactly six frame durations: 0 -> 1 -> ... -> 5 -> 0
        anim.advance(1.2);
        assert_eq!(anim.current_frame(), 0);
    }

    #[test]
    fn looping_advance_steps_one_frame_per_duration() {
        let mut anim = AnimationData::empty();
        anim.play(frames(6), 0.2, true);
        for expected in [1, 2, 3, 4, 5, 0] {
            anim.advance(0.2);
            assert_eq!(anim.current_frame(), expected);
        }
    }

    #[test]
    fn non_looping_clamps_on_last_frame() {
        let mut anim = AnimationData::empty();
        anim.play(frames(6), 0.2, false);
        anim.advance(1.2);
        assert_eq!(anim.current_frame(), 5);
        // Any further elapsed time keeps it on the last frame.
        anim.advance(10.0);
        assert_eq!(anim.current_frame(), 5);
    }

    #[test]
    fn play_resets_index_and_timer() {
        let mut anim = AnimationData::empty();
        anim.play(frames(4), 0.1, true);
        anim.advance(0.25);
        assert_eq!(anim.current_frame(), 2);
        anim.play(frames(3), 0.2, true);
        assert_eq!(anim.current_frame(), 0);
        // Old partial timer must not carry into the new animation.
        anim.advance(0.1);
        assert_eq!(anim.current_frame(), 0);
    }

    #[test]
    fn inactive_animation_never_advances() {
        let mut anim = AnimationData::empty();
        anim.advance(5.0);
        assert_eq!(anim.current_frame(), 0);
        assert!(anim.current_rect().is_none());
    }
}
