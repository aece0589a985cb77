use crate::core::constants::{
    EYE_HEIGHT, GRAVITY, JUMP_SPEED, LOCK_COOLDOWN_SEC, LOOK_SENSITIVITY, PITCH_LIMIT_RAD,
    SPRINT_MULTIPLIER, WALK_SPEED,
};
use crate::core::easing::sanitize_dt;
use glam::{Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
    Sprint,
}

#[inline]
pub fn move_key_for(key: &str) -> Option<MoveKey> {
    match key {
        "ArrowUp" | "w" | "W" => Some(MoveKey::Forward),
        "ArrowDown" | "s" | "S" => Some(MoveKey::Backward),
        "ArrowLeft" | "a" | "A" => Some(MoveKey::Left),
        "ArrowRight" | "d" | "D" => Some(MoveKey::Right),
        " " | "Spacebar" => Some(MoveKey::Jump),
        "Shift" => Some(MoveKey::Sprint),
        _ => None,
    }
}

#[inline]
pub fn is_exit_key(key: &str) -> bool {
    key == "Escape"
}

/// Keys currently held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub sprint: bool,
}

impl MoveIntent {
    pub fn set(&mut self, key: MoveKey, pressed: bool) {
        match key {
            MoveKey::Forward => self.forward = pressed,
            MoveKey::Backward => self.backward = pressed,
            MoveKey::Left => self.left = pressed,
            MoveKey::Right => self.right = pressed,
            MoveKey::Jump => self.jump = pressed,
            MoveKey::Sprint => self.sprint = pressed,
        }
    }

    /// Forget everything held, e.g. when the pointer lock is lost mid-stride.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// (strafe, forward) axes in {-1, 0, 1}.
    pub fn axes(&self) -> (f32, f32) {
        let axis = |pos: bool, neg: bool| (pos as i8 - neg as i8) as f32;
        (axis(self.right, self.left), axis(self.forward, self.backward))
    }
}

/// Walking camera with gravity and a flat ground plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FirstPersonController {
    /// Feet position.
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    vertical_speed: f32,
    grounded: bool,
    ground_height: f32,
    bounds: f32,
}

impl FirstPersonController {
    pub fn new(position: Vec3, ground_height: f32, bounds: f32) -> Self {
        Self {
            position: Vec3::new(position.x, position.y.max(ground_height), position.z),
            yaw: 0.0,
            pitch: 0.0,
            vertical_speed: 0.0,
            grounded: position.y <= ground_height,
            ground_height,
            bounds: bounds.abs(),
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Apply a pointer-lock movement delta in pixels.
    pub fn look(&mut self, dx: f32, dy: f32) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.yaw -= dx * LOOK_SENSITIVITY;
        self.pitch = (self.pitch - dy * LOOK_SENSITIVITY).clamp(-PITCH_LIMIT_RAD, PITCH_LIMIT_RAD);
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    pub fn eye(&self) -> Vec3 {
        self.position + Vec3::Y * EYE_HEIGHT
    }

    pub fn tick(&mut self, dt: f32, intent: &MoveIntent) {
        let dt = sanitize_dt(dt);
        let (strafe, advance) = intent.axes();
        let (sin, cos) = self.yaw.sin_cos();
        let forward = Vec3::new(-sin, 0.0, -cos);
        let right = Vec3::new(cos, 0.0, -sin);
        let wish = (forward * advance + right * strafe).normalize_or_zero();
        let speed = if intent.sprint {
            WALK_SPEED * SPRINT_MULTIPLIER
        } else {
            WALK_SPEED
        };
        self.position += wish * speed * dt;

        if intent.jump && self.grounded {
            self.vertical_speed = JUMP_SPEED;
            self.grounded = false;
        }
        if !self.grounded {
            self.vertical_speed -= GRAVITY * dt;
            self.position.y += self.vertical_speed * dt;
            if self.position.y <= self.ground_height {
                self.position.y = self.ground_height;
                self.vertical_speed = 0.0;
                self.grounded = true;
            }
        }
        if self.bounds > 0.0 {
            self.position.x = self.position.x.clamp(-self.bounds, self.bounds);
            self.position.z = self.position.z.clamp(-self.bounds, self.bounds);
        }
    }
}

/// Payload key and value of the `cursor:toggle` event; the page cursor hides while locked.
#[inline]
pub fn cursor_toggle_detail(locked: bool) -> (&'static str, bool) {
    ("hide", locked)
}

/// Debounces pointer-lock requests so a double click cannot lock and unlock at once.
///
/// The window opens when a lock is taken; releasing the lock does not restart it.
#[derive(Clone, Copy, Debug)]
pub struct LockCooldown {
    cooldown_sec: f64,
    last_lock: Option<f64>,
}

impl LockCooldown {
    pub fn new(cooldown_sec: f64) -> Self {
        Self {
            cooldown_sec,
            last_lock: None,
        }
    }

    pub fn can_request(&self, now: f64) -> bool {
        self.last_lock
            .map(|t| now - t >= self.cooldown_sec)
            .unwrap_or(true)
    }

    pub fn lock_changed(&mut self, locked: bool, now: f64) {
        if locked {
            self.last_lock = Some(now);
        }
    }
}

impl Default for LockCooldown {
    fn default() -> Self {
        Self::new(LOCK_COOLDOWN_SEC)
    }
}
