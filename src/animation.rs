//! One interface over the two backdrop animations, plus the per-frame driver.

use rand::Rng;

use crate::config::{SiteConfig, Variant};
use crate::input::InputState;
use crate::particles::ParticleField;
use crate::surface::Surface;
use crate::wireframe::WireframeProjector;

/// A canvas backdrop that advances once per display frame.
pub trait AnimationVariant {
    fn name(&self) -> &'static str;
    /// Adopts new canvas bounds, regenerating anything sized to them.
    fn resize(&mut self, width: f64, height: f64);
    /// Picks up pointer and scroll state for the coming tick.
    fn observe(&mut self, input: &InputState);
    fn tick(&mut self);
    fn render(&self, surface: &mut dyn Surface);
}

impl<R: Rng> AnimationVariant for ParticleField<R> {
    fn name(&self) -> &'static str {
        "mesh"
    }

    fn resize(&mut self, width: f64, height: f64) {
        let count = self.particles().len();
        ParticleField::resize(self, width, height);
        self.spawn_particles(count);
    }

    fn observe(&mut self, input: &InputState) {
        self.set_pointer(input.pointer_x, input.pointer_y);
        self.set_scroll(input.scroll_y);
    }

    fn tick(&mut self) {
        ParticleField::tick(self);
    }

    fn render(&self, surface: &mut dyn Surface) {
        ParticleField::render(self, surface);
    }
}

impl AnimationVariant for WireframeProjector {
    fn name(&self) -> &'static str {
        "wireframe"
    }

    fn resize(&mut self, width: f64, height: f64) {
        WireframeProjector::resize(self, width, height);
    }

    fn observe(&mut self, input: &InputState) {
        self.on_scroll(input.scroll_y);
    }

    fn tick(&mut self) {
        WireframeProjector::tick(self);
    }

    fn render(&self, surface: &mut dyn Surface) {
        WireframeProjector::render(self, surface);
    }
}

/// Builds the variant selected in `config`, sized to `width` x `height`.
pub fn build_variant<R: Rng + 'static>(
    config: &SiteConfig,
    width: f64,
    height: f64,
    rng: R,
) -> Box<dyn AnimationVariant> {
    match config.variant {
        Variant::Mesh => Box::new(ParticleField::new(width, height, config.mesh.clone(), rng)),
        Variant::Wireframe => Box::new(WireframeProjector::new(
            width,
            height,
            config.wireframe.clone(),
        )),
    }
}

/// Owns the active variant and runs one frame at a time.
///
/// Scheduling the next frame is left to the caller.
pub struct Animator {
    variant: Box<dyn AnimationVariant>,
    size: (f64, f64),
    frames: u64,
}

impl Animator {
    pub fn new(variant: Box<dyn AnimationVariant>, width: f64, height: f64) -> Self {
        log::info!("backdrop variant `{}` at {width}x{height}", variant.name());
        Self {
            variant,
            size: (width, height),
            frames: 0,
        }
    }

    pub fn variant(&self) -> &dyn AnimationVariant {
        self.variant.as_ref()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Reads `input`, advances the simulation and redraws `surface`.
    pub fn frame(&mut self, input: &InputState, surface: &mut dyn Surface) {
        let size = (input.width, input.height);
        if size != self.size {
            self.size = size;
            self.variant.resize(size.0, size.1);
        }
        self.variant.observe(input);
        self.variant.tick();
        surface.clear_rect(0.0, 0.0, size.0, size.1);
        self.variant.render(surface);
        self.frames += 1;
    }
}
