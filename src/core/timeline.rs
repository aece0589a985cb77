use crate::core::easing::{lerp, sanitize_dt, sanitize_unit, Ease};
use crate::core::error::ConfigError;
use glam::Vec3;

/// Objects animated by the scroll timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Track {
    Camera,
    DoorLeft,
    DoorRight,
}

impl Track {
    pub const COUNT: usize = 3;
    pub const ALL: [Track; Track::COUNT] = [Track::Camera, Track::DoorLeft, Track::DoorRight];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Track::Camera => 0,
            Track::DoorLeft => 1,
            Track::DoorRight => 2,
        }
    }
}

/// One scalar property of a transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    PosX,
    PosY,
    PosZ,
    RotX,
    RotY,
    RotZ,
}

impl Channel {
    pub const POSITION: [Channel; 3] = [Channel::PosX, Channel::PosY, Channel::PosZ];
    pub const ROTATION: [Channel; 3] = [Channel::RotX, Channel::RotY, Channel::RotZ];
}

/// Position plus Euler rotation (radians, XYZ order).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
    };

    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }

    #[inline]
    pub fn get(&self, channel: Channel) -> f32 {
        match channel {
            Channel::PosX => self.position.x,
            Channel::PosY => self.position.y,
            Channel::PosZ => self.position.z,
            Channel::RotX => self.rotation.x,
            Channel::RotY => self.rotation.y,
            Channel::RotZ => self.rotation.z,
        }
    }

    #[inline]
    pub fn set(&mut self, channel: Channel, value: f32) {
        match channel {
            Channel::PosX => self.position.x = value,
            Channel::PosY => self.position.y = value,
            Channel::PosZ => self.position.z = value,
            Channel::RotX => self.rotation.x = value,
            Channel::RotY => self.rotation.y = value,
            Channel::RotZ => self.rotation.z = value,
        }
    }
}

/// Transforms of every track at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    transforms: [Transform; Track::COUNT],
}

impl Pose {
    pub fn new(camera: Transform, door_left: Transform, door_right: Transform) -> Self {
        Self {
            transforms: [camera, door_left, door_right],
        }
    }

    #[inline]
    pub fn get(&self, track: Track) -> Transform {
        self.transforms[track.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, track: Track) -> &mut Transform {
        &mut self.transforms[track.index()]
    }

    #[inline]
    pub fn camera(&self) -> Transform {
        self.get(Track::Camera)
    }
}

/// A single authored tween of one channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub track: Track,
    pub channel: Channel,
    pub start: f32,
    pub duration: f32,
    pub to: f32,
    pub ease: Ease,
}

impl Segment {
    #[inline]
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }
}

#[derive(Clone, Copy, Debug)]
struct ResolvedSegment {
    seg: Segment,
    from: f32,
}

/// Collects segments in authoring order before resolution.
#[derive(Clone, Debug)]
pub struct TimelineBuilder {
    initial: Pose,
    segments: Vec<Segment>,
}

impl TimelineBuilder {
    pub fn to_channel(
        mut self,
        track: Track,
        channel: Channel,
        to: f32,
        start: f32,
        duration: f32,
        ease: Ease,
    ) -> Self {
        self.segments.push(Segment {
            track,
            channel,
            start,
            duration,
            to,
            ease,
        });
        self
    }

    pub fn to_position(self, track: Track, to: Vec3, start: f32, duration: f32, ease: Ease) -> Self {
        Channel::POSITION
            .iter()
            .zip(to.to_array())
            .fold(self, |b, (&ch, v)| b.to_channel(track, ch, v, start, duration, ease))
    }

    pub fn to_rotation(self, track: Track, to: Vec3, start: f32, duration: f32, ease: Ease) -> Self {
        Channel::ROTATION
            .iter()
            .zip(to.to_array())
            .fold(self, |b, (&ch, v)| b.to_channel(track, ch, v, start, duration, ease))
    }

    /// Validate segments and resolve every segment's starting value.
    pub fn build(self) -> Result<Timeline, ConfigError> {
        for (index, s) in self.segments.iter().enumerate() {
            if !(s.start.is_finite() && s.duration.is_finite()) || s.start < 0.0 || s.duration <= 0.0
            {
                return Err(ConfigError::SegmentTiming {
                    index,
                    start: s.start,
                    duration: s.duration,
                });
            }
            if !s.to.is_finite() {
                return Err(ConfigError::SegmentTarget { index });
            }
        }
        // Stable sort keeps authoring order for equal start times.
        let mut ordered = self.segments;
        ordered.sort_by(|a, b| a.start.total_cmp(&b.start));

        let mut resolved: Vec<ResolvedSegment> = Vec::with_capacity(ordered.len());
        for seg in ordered {
            let from = channel_value(&self.initial, &resolved, seg.track, seg.channel, seg.start);
            resolved.push(ResolvedSegment { seg, from });
        }
        let duration = resolved.iter().map(|r| r.seg.end()).fold(0.0_f32, f32::max);
        Ok(Timeline {
            initial: self.initial,
            segments: resolved,
            duration,
        })
    }
}

fn channel_value(
    initial: &Pose,
    resolved: &[ResolvedSegment],
    track: Track,
    channel: Channel,
    time: f32,
) -> f32 {
    let mut v = initial.get(track).get(channel);
    for r in resolved
        .iter()
        .filter(|r| r.seg.track == track && r.seg.channel == channel)
    {
        if time < r.seg.start {
            break;
        }
        let t = (time - r.seg.start) / r.seg.duration;
        v = lerp(r.from, r.seg.to, r.seg.ease.apply(t));
    }
    v
}

/// Deterministic mapping from timeline time to a [`Pose`].
///
/// Segments are applied in start order; a later segment overrides an earlier one on
/// the same channel once it has started, which is how overlapping moves blend.
#[derive(Clone, Debug)]
pub struct Timeline {
    initial: Pose,
    segments: Vec<ResolvedSegment>,
    duration: f32,
}

impl Timeline {
    pub fn builder(initial: Pose) -> TimelineBuilder {
        TimelineBuilder {
            initial,
            segments: Vec::new(),
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn initial(&self) -> Pose {
        self.initial
    }

    pub fn sample(&self, time: f32) -> Pose {
        let time = if time.is_nan() {
            0.0
        } else {
            time.clamp(0.0, self.duration)
        };
        let mut pose = self.initial;
        for r in &self.segments {
            if time < r.seg.start {
                break;
            }
            let t = (time - r.seg.start) / r.seg.duration;
            let v = lerp(r.from, r.seg.to, r.seg.ease.apply(t));
            pose.get_mut(r.seg.track).set(r.seg.channel, v);
        }
        pose
    }

    /// Sample at `progress` in [0, 1] of the full duration.
    pub fn sample_progress(&self, progress: f32) -> Pose {
        self.sample(sanitize_unit(progress) * self.duration)
    }
}

/// Lagged follower of the raw scroll progress.
///
/// The smoothed value closes roughly 95% of the gap within `scrub_sec`, independent of
/// frame rate. Large deltas (e.g. a backgrounded tab) effectively snap.
#[derive(Clone, Copy, Debug)]
pub struct ScrubDriver {
    scrub_sec: f32,
    target: f32,
    current: f32,
}

impl ScrubDriver {
    pub fn new(scrub_sec: f32) -> Self {
        Self {
            scrub_sec: scrub_sec.max(0.0),
            target: 0.0,
            current: 0.0,
        }
    }

    pub fn set_target(&mut self, progress: f32) {
        self.target = sanitize_unit(progress);
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn update(&mut self, dt_sec: f32) -> f32 {
        let dt = sanitize_dt(dt_sec);
        if self.scrub_sec <= f32::EPSILON {
            self.current = self.target;
            return self.current;
        }
        let tau = self.scrub_sec / 3.0;
        let alpha = 1.0 - (-dt / tau).exp();
        self.current += (self.target - self.current) * alpha;
        if (self.target - self.current).abs() < 1e-5 {
            self.current = self.target;
        }
        self.current
    }
}
