//! Animation clips and per-entity playback.
//!
//! Every animated entity owns its mapping from logical state name to clip,
//! so there is no process-wide animation key registry to collide in.

use std::collections::HashMap;

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Frame rate used when a clip does not specify one.
pub const DEFAULT_FRAME_RATE: f32 = 10.0;

/// How many times a clip plays before it holds its last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationRepeat {
    /// Loop forever.
    #[default]
    Loop,
    /// Play through exactly once.
    Once,
}

/// A contiguous frame range on a sprite sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// First frame, inclusive.
    pub frame_start: u32,
    /// Last frame, inclusive.
    pub frame_end: u32,
    pub frame_rate: f32,
    pub repeat: AnimationRepeat,
    /// Bounce back and forth instead of wrapping to the start.
    pub yoyo: bool,
}

impl AnimationClip {
    /// A looping clip over `[start, end]` at the default frame rate.
    pub fn range(start: u32, end: u32) -> Self {
        Self {
            frame_start: start,
            frame_end: end,
            frame_rate: DEFAULT_FRAME_RATE,
            repeat: AnimationRepeat::Loop,
            yoyo: false,
        }
    }

    /// A single held frame.
    pub fn still(frame: u32) -> Self {
        Self::range(frame, frame)
    }

    /// A play-once clip over `[start, end]`.
    pub fn once(start: u32, end: u32) -> Self {
        Self {
            repeat: AnimationRepeat::Once,
            ..Self::range(start, end)
        }
    }

    pub fn with_frame_rate(mut self, frame_rate: f32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn with_yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    /// Number of frames in the clip.
    pub fn frame_count(&self) -> u32 {
        self.frame_end.saturating_sub(self.frame_start) + 1
    }

    /// Seconds between frame steps.
    pub fn frame_duration(&self) -> f32 {
        1.0 / self.frame_rate.max(f32::EPSILON)
    }
}

/// An entity's own name→clip mapping, populated at construction.
#[derive(Debug, Clone, Default)]
pub struct AnimationSet {
    clips: HashMap<String, AnimationClip>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, clip: AnimationClip) -> Self {
        self.clips.insert(name.into(), clip);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }
}

/// Which way the playhead is moving through the clip's frame range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayDirection {
    Forward,
    Backward,
}

/// Component driving frame playback for one sprite.
#[derive(Component, Debug)]
pub struct AnimationController {
    set: AnimationSet,
    current: Option<String>,
    /// Absolute frame index into the sprite sheet.
    frame: u32,
    frame_timer: f32,
    direction: PlayDirection,
    /// True when the active clip was started with `play_reverse`.
    reversed: bool,
    finished: bool,
    just_looped: bool,
}

impl AnimationController {
    pub fn new(set: AnimationSet) -> Self {
        Self {
            set,
            current: None,
            frame: 0,
            frame_timer: 0.0,
            direction: PlayDirection::Forward,
            reversed: false,
            finished: false,
            just_looped: false,
        }
    }

    pub fn state(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True for exactly one tick each time a looping clip wraps.
    pub fn just_looped(&self) -> bool {
        self.just_looped
    }

    /// Start a clip unless it is already the active one.
    pub fn play(&mut self, name: &str) {
        if self.current.as_deref() == Some(name) && !self.reversed {
            return;
        }
        self.start(name, false);
    }

    /// Start a clip from its last frame, stepping backward.
    pub fn play_reverse(&mut self, name: &str) {
        if self.current.as_deref() == Some(name) && self.reversed {
            return;
        }
        self.start(name, true);
    }

    /// Restart the active clip from its first frame.
    pub fn restart(&mut self) {
        if let Some(name) = self.current.clone() {
            self.start(&name, self.reversed);
        }
    }

    fn start(&mut self, name: &str, reversed: bool) {
        let Some(clip) = self.set.get(name) else {
            warn!("animation clip '{}' not in this entity's set", name);
            return;
        };
        self.frame = if reversed {
            clip.frame_end
        } else {
            clip.frame_start
        };
        self.direction = if reversed {
            PlayDirection::Backward
        } else {
            PlayDirection::Forward
        };
        self.current = Some(name.to_string());
        self.frame_timer = 0.0;
        self.reversed = reversed;
        self.finished = false;
        self.just_looped = false;
    }

    /// Advance playback by `dt` seconds. Returns true on the tick a
    /// play-once clip completes.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.just_looped = false;

        let Some(name) = self.current.as_deref() else {
            return false;
        };
        let Some(clip) = self.set.get(name).cloned() else {
            return false;
        };
        if self.finished || clip.frame_count() == 1 {
            return false;
        }

        self.frame_timer += dt;
        let mut completed = false;

        while self.frame_timer >= clip.frame_duration() {
            self.frame_timer -= clip.frame_duration();
            completed |= self.step(&clip);
        }

        completed
    }

    /// Step one frame, handling yoyo bounces, wrapping, and completion.
    fn step(&mut self, clip: &AnimationClip) -> bool {
        if self.finished {
            return false;
        }

        let at_end = self.frame >= clip.frame_end;
        let at_start = self.frame <= clip.frame_start;

        match self.direction {
            PlayDirection::Forward if at_end => {
                if clip.yoyo {
                    self.direction = PlayDirection::Backward;
                    self.frame -= 1;
                } else if clip.repeat == AnimationRepeat::Loop {
                    self.frame = clip.frame_start;
                    self.just_looped = true;
                } else if self.reversed {
                    // A reversed play-once clip running forward cannot
                    // happen; treat as complete defensively below.
                    self.finished = true;
                    return true;
                } else {
                    self.finished = true;
                    return true;
                }
            }
            PlayDirection::Backward if at_start => {
                if clip.yoyo && clip.repeat == AnimationRepeat::Loop {
                    self.direction = PlayDirection::Forward;
                    self.frame += 1;
                    self.just_looped = true;
                } else if self.reversed && clip.repeat == AnimationRepeat::Once {
                    self.finished = true;
                    return true;
                } else if clip.repeat == AnimationRepeat::Loop {
                    self.frame = clip.frame_end;
                    self.just_looped = true;
                } else {
                    self.finished = true;
                    return true;
                }
            }
            PlayDirection::Forward => self.frame += 1,
            PlayDirection::Backward => self.frame -= 1,
        }

        false
    }
}

/// Message fired when a play-once clip reaches its last frame.
#[derive(Debug)]
pub struct AnimationFinished {
    pub entity: Entity,
    pub state: String,
}

impl Message for AnimationFinished {}

/// System that steps every controller by the frame delta.
pub fn advance_animations(
    time: Res<Time>,
    mut query: Query<(Entity, &mut AnimationController)>,
    mut finished: MessageWriter<AnimationFinished>,
) {
    let dt = time.delta_secs();
    for (entity, mut controller) in &mut query {
        if controller.advance(dt) {
            if let Some(state) = controller.state() {
                finished.write(AnimationFinished {
                    entity,
                    state: state.to_string(),
                });
            }
        }
    }
}

/// System that copies the controller's frame into the sprite's atlas index.
pub fn sync_sprite_frames(mut query: Query<(&AnimationController, &mut Sprite)>) {
    for (controller, mut sprite) in &mut query {
        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            atlas.index = controller.frame() as usize;
        }
    }
}
