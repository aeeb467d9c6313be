//! Continuously interpolated scene parameters.
//!
//! Everything the renderer consumes that must not jump when its driving
//! input jumps lives here: camera position and look target, fog distances,
//! the scroll-driven hue, light intensities, and material scalars. Targets
//! are pure functions of the input snapshot; current values persist across
//! frames and approach their targets either by exponential smoothing
//! ([`Smoothed`]) or by a damped spring ([`Spring`]) where the motion has to
//! feel physical rather than merely filtered.
//!
//! # Usage
//!
//! ```ignore
//! let mut params = SceneParams::new(0.05);
//!
//! // Each frame:
//! params.update(input.snapshot(), clock.delta());
//! let view = params.view_matrix();
//! let color = params.base_color();
//! ```

use std::ops::{Add, Mul, Sub};

use glam::{Mat4, Vec3};

use crate::input::InputSnapshot;

/// Default per-frame smoothing factor. Smaller is slower and heavier.
pub const DEFAULT_SMOOTHING: f32 = 0.05;

/// A value that approaches its target by a fixed fraction each frame.
///
/// `current += (target - current) * factor`, exponential convergence
/// instead of an instant jump.
#[derive(Debug, Clone, Copy)]
pub struct Smoothed<T> {
    current: T,
    factor: f32,
}

impl<T> Smoothed<T>
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T>,
{
    pub fn new(initial: T, factor: f32) -> Self {
        Self {
            current: initial,
            factor,
        }
    }

    /// Move one step toward `target` and return the new current value.
    pub fn approach(&mut self, target: T) -> T {
        self.current = self.current + (target - self.current) * self.factor;
        self.current
    }

    #[inline]
    pub fn get(&self) -> T {
        self.current
    }

    /// Jump directly to a value, bypassing the smoothing.
    pub fn snap(&mut self, value: T) {
        self.current = value;
    }
}

/// Spring substep size; a stiff spring diverges under single steps at
/// display-rate deltas.
const MAX_SPRING_STEP: f32 = 0.001;

/// Longest frame delta a spring will integrate across.
const MAX_SPRING_DELTA: f32 = 0.1;

/// A damped spring follower for pointer-driven motion.
///
/// Semi-implicit Euler over millisecond substeps. The default constants
/// (stiffness 150, damping 20, mass 0.1) are tuned for magnetic
/// pointer-follow effects.
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    value: f32,
    velocity: f32,
}

impl Spring {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            value: 0.0,
            velocity: 0.0,
        }
    }

    /// Advance by `dt` seconds toward `target`; returns the new value.
    pub fn step(&mut self, target: f32, dt: f32) -> f32 {
        if !dt.is_finite() || dt <= 0.0 {
            return self.value;
        }
        let mut remaining = dt.min(MAX_SPRING_DELTA);
        let mass = self.mass.max(1e-6);
        while remaining > 0.0 {
            let h = remaining.min(MAX_SPRING_STEP);
            let accel =
                (self.stiffness * (target - self.value) - self.damping * self.velocity) / mass;
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
        self.value
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Reset position and kill velocity.
    pub fn reset(&mut self, value: f32) {
        self.value = value;
        self.velocity = 0.0;
    }
}

impl Default for Spring {
    fn default() -> Self {
        Self::new(150.0, 20.0, 0.1)
    }
}

/// Hue for a given scroll progress: cyan at the top drifting warm.
#[inline]
pub fn scroll_hue(scroll: f32) -> f32 {
    0.6 - 0.3 * scroll
}

/// HSL to RGB, hue in [0, 1].
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match (h * 6.0) as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

/// The scene's smoothed parameter bag.
///
/// The only animation state with memory beyond one frame.
pub struct SceneParams {
    camera_position: Smoothed<Vec3>,
    look_target: Smoothed<Vec3>,
    tilt_x: Spring,
    tilt_y: Spring,
    hue: Smoothed<f32>,
    fog_near: Smoothed<f32>,
    fog_far: Smoothed<f32>,
    ambient: Smoothed<f32>,
    key_intensity: Smoothed<f32>,
    rim_intensity: f32,
    metalness: Smoothed<f32>,
    roughness: Smoothed<f32>,
    emissive: Smoothed<f32>,
}

impl SceneParams {
    /// Create the bag with every value at its scroll-0 target.
    ///
    /// `smoothing` applies to the material/fog/hue values; the camera uses
    /// its own fixed 0.05 factor.
    pub fn new(smoothing: f32) -> Self {
        Self {
            camera_position: Smoothed::new(Vec3::new(0.0, 0.0, 5.0), 0.05),
            look_target: Smoothed::new(Vec3::ZERO, 0.05),
            tilt_x: Spring::default(),
            tilt_y: Spring::default(),
            hue: Smoothed::new(scroll_hue(0.0), smoothing),
            fog_near: Smoothed::new(5.0, smoothing),
            fog_far: Smoothed::new(15.0, smoothing),
            ambient: Smoothed::new(0.4, smoothing),
            key_intensity: Smoothed::new(1.0, smoothing),
            rim_intensity: 0.5,
            metalness: Smoothed::new(0.2, smoothing),
            roughness: Smoothed::new(0.4, smoothing),
            emissive: Smoothed::new(0.3, smoothing),
        }
    }

    /// Reconcile every current value with its target for this frame.
    ///
    /// Targets are pure functions of the snapshot; no error states exist
    /// here because the sampler already clamped its outputs.
    pub fn update(&mut self, input: InputSnapshot, dt: f32) {
        let s = input.scroll;

        self.camera_position
            .approach(Vec3::new(0.0, -2.0 * s, 5.0 + 3.0 * s));
        self.look_target.approach(Vec3::new(0.0, 0.5 * s, 0.0));
        self.tilt_x.step(input.pointer.x * 0.3, dt);
        self.tilt_y.step(input.pointer.y * 0.2, dt);

        self.hue.approach(scroll_hue(s));
        self.fog_near.approach(5.0 + 2.0 * s);
        self.fog_far.approach(15.0 + 5.0 * s);

        self.ambient.approach(0.4 + 0.2 * s);
        self.key_intensity.approach(1.0 + 0.5 * s);
        self.metalness.approach(0.2 + 0.5 * s);
        self.roughness.approach(0.4 - 0.2 * s);
        self.emissive.approach(0.3 + 0.3 * s);
    }

    /// Camera position including the spring-driven pointer tilt.
    pub fn camera_position(&self) -> Vec3 {
        self.camera_position.get() + Vec3::new(self.tilt_x.value(), self.tilt_y.value(), 0.0)
    }

    /// Point the camera looks at.
    #[inline]
    pub fn look_target(&self) -> Vec3 {
        self.look_target.get()
    }

    /// View matrix for the current camera state.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.camera_position(), self.look_target(), Vec3::Y)
    }

    /// Current hue in [0, 1].
    #[inline]
    pub fn hue(&self) -> f32 {
        self.hue.get()
    }

    /// The hue rendered through HSL at full saturation, half lightness.
    pub fn base_color(&self) -> Vec3 {
        hsl_to_rgb(self.hue.get(), 1.0, 0.5)
    }

    #[inline]
    pub fn fog_near(&self) -> f32 {
        self.fog_near.get()
    }

    #[inline]
    pub fn fog_far(&self) -> f32 {
        self.fog_far.get()
    }

    #[inline]
    pub fn ambient(&self) -> f32 {
        self.ambient.get()
    }

    #[inline]
    pub fn key_intensity(&self) -> f32 {
        self.key_intensity.get()
    }

    #[inline]
    pub fn rim_intensity(&self) -> f32 {
        self.rim_intensity
    }

    #[inline]
    pub fn metalness(&self) -> f32 {
        self.metalness.get()
    }

    #[inline]
    pub fn roughness(&self) -> f32 {
        self.roughness.get()
    }

    #[inline]
    pub fn emissive(&self) -> f32 {
        self.emissive.get()
    }
}

impl Default for SceneParams {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING)
    }
}
