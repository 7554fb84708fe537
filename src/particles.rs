//! Drifting particle mesh with pointer attraction and proximity links.

use rand::Rng;

use crate::config::MeshConfig;
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    /// Where the particle was seeded. Kept for reference only.
    pub spawn: (f64, f64),
}

/// Strength of the pull toward the pointer at `distance` px.
///
/// Falls linearly from `strength` at the pointer to zero at `radius`.
pub fn attraction(distance: f64, radius: f64, strength: f64) -> f64 {
    ((radius - distance) / radius).max(0.0) * strength
}

/// Stroke opacity for a link of length `distance`, or `None` when no link is drawn.
pub fn link_opacity(distance: f64, max_distance: f64, max_opacity: f64) -> Option<f64> {
    (distance < max_distance).then(|| (max_distance - distance) / max_distance * max_opacity)
}

pub struct ParticleField<R> {
    width: f64,
    height: f64,
    pointer: (f64, f64),
    scroll_y: f64,
    particles: Vec<Particle>,
    config: MeshConfig,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    /// Creates a field sized to the viewport and seeds `config.particle_count` particles.
    pub fn new(width: f64, height: f64, config: MeshConfig, rng: R) -> Self {
        let count = config.particle_count;
        let mut field = Self {
            width,
            height,
            pointer: (0.0, 0.0),
            scroll_y: 0.0,
            particles: Vec::with_capacity(count),
            config,
            rng,
        };
        field.spawn_particles(count);
        field
    }

    /// Updates the bounds. Call [`spawn_particles`](Self::spawn_particles)
    /// afterwards; existing particles are not rescaled.
    pub fn resize(&mut self, width: f64, height: f64) {
        log::debug!("particle field resized to {width}x{height}");
        self.width = width;
        self.height = height;
    }

    /// Replaces every particle with `count` freshly randomised ones.
    pub fn spawn_particles(&mut self, count: usize) {
        let speed = self.config.max_speed;
        let (min_r, max_r) = (self.config.min_radius, self.config.max_radius);
        let (w, h) = (self.width, self.height);
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| Particle {
                x: rng.gen::<f64>() * w,
                y: rng.gen::<f64>() * h,
                vx: (rng.gen::<f64>() - 0.5) * 2.0 * speed,
                vy: (rng.gen::<f64>() - 0.5) * 2.0 * speed,
                size: min_r + rng.gen::<f64>() * (max_r - min_r),
                spawn: (rng.gen::<f64>() * w, rng.gen::<f64>() * h),
            })
            .collect();
    }
}

impl<R> ParticleField<R> {
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = (x, y);
    }

    pub fn set_scroll(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[cfg(test)]
    fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }

    /// Advances every particle by one frame.
    pub fn tick(&mut self) {
        let c = &self.config;
        let (px, py) = self.pointer;
        let drift = self.scroll_y * c.parallax * c.parallax_scale;
        for p in &mut self.particles {
            let dx = px - p.x;
            let dy = py - p.y;
            let pull = attraction(dx.hypot(dy), c.attraction_radius, c.attraction_strength);

            p.x += p.vx + pull * dx * c.pull;
            p.y += p.vy + pull * dy * c.pull + drift;

            if p.x < 0.0 || p.x > self.width {
                p.vx = -p.vx;
            }
            if p.y < 0.0 || p.y > self.height {
                p.vy = -p.vy;
            }
            p.x = p.x.clamp(0.0, self.width.max(0.0));
            p.y = p.y.clamp(0.0, self.height.max(0.0));
        }
    }

    /// Draws particles then their links. Does not clear the surface.
    pub fn render(&self, surface: &mut dyn Surface) {
        let c = &self.config;
        surface.set_fill_style(&c.color);
        for p in &self.particles {
            surface.fill_circle(p.x, p.y, p.size);
        }

        surface.set_stroke_style(&c.color);
        surface.set_line_width(c.link_width);
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = (a.x - b.x).hypot(a.y - b.y);
                if let Some(opacity) = link_opacity(distance, c.link_distance, c.link_opacity) {
                    surface.set_global_alpha(opacity);
                    surface.stroke_line((a.x, a.y), (b.x, b.y));
                }
            }
        }
        surface.set_global_alpha(1.0);
    }
}
