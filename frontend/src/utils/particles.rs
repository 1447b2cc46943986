use std::f64::consts::PI;

use rand::Rng;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub const PARTICLE_COUNT: usize = 50;
/// Pairs closer than this are joined by a line.
pub const LINK_DISTANCE: f64 = 100.0;
const MAX_LINK_OPACITY: f64 = 0.3;
const PARTICLE_FILL: &str = "rgba(66, 153, 225, 0.5)";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed_x: f64,
    pub speed_y: f64,
}

/// Gives the particle a fresh random position, size and velocity.
pub fn reset_particle<R: Rng + ?Sized>(particle: &mut Particle, bounds: Bounds, rng: &mut R) {
    particle.x = rng.gen::<f64>() * bounds.width;
    particle.y = rng.gen::<f64>() * bounds.height;
    particle.size = rng.gen::<f64>() * 3.0 + 1.0;
    particle.speed_x = rng.gen::<f64>() * 3.0 - 1.5;
    particle.speed_y = rng.gen::<f64>() * 3.0 - 1.5;
}

pub fn new_particle<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Particle {
    let mut particle = Particle::default();
    reset_particle(&mut particle, bounds, rng);
    particle
}

/// Moves the particle one step. A particle leaving the bounds is reset
/// rather than bounced or clamped.
pub fn update_particle<R: Rng + ?Sized>(particle: &mut Particle, bounds: Bounds, rng: &mut R) {
    particle.x += particle.speed_x;
    particle.y += particle.speed_y;
    if !bounds.contains(particle.x, particle.y) {
        reset_particle(particle, bounds, rng);
    }
}

pub fn draw_particle(ctx: &CanvasRenderingContext2d, particle: &Particle) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(particle.x, particle.y, particle.size, 0.0, PI * 2.0)?;
    ctx.set_fill_style_str(PARTICLE_FILL);
    ctx.fill();
    Ok(())
}

/// Opacity of the line joining two particles `distance` apart, or `None`
/// when they are too far apart to be joined.
pub fn link_opacity(distance: f64) -> Option<f64> {
    if distance < LINK_DISTANCE {
        Some(MAX_LINK_OPACITY * (1.0 - distance / LINK_DISTANCE))
    } else {
        None
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub opacity: f64,
}

/// Lines between every unordered pair of particles within `LINK_DISTANCE`.
pub fn links(particles: &[Particle]) -> Vec<Link> {
    let mut links = Vec::new();
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let distance = (a.x - b.x).hypot(a.y - b.y);
            if let Some(opacity) = link_opacity(distance) {
                links.push(Link {
                    from: (a.x, a.y),
                    to: (b.x, b.y),
                    opacity,
                });
            }
        }
    }
    links
}

pub fn draw_link(ctx: &CanvasRenderingContext2d, link: &Link) {
    ctx.begin_path();
    ctx.set_stroke_style_str(&format!("rgba(66, 153, 225, {})", link.opacity));
    ctx.set_line_width(1.0);
    ctx.move_to(link.from.0, link.from.1);
    ctx.line_to(link.to.0, link.to.1);
    ctx.stroke();
}

/// The fixed set of particles behind the page.
pub struct ParticleField<R> {
    particles: Vec<Particle>,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    pub fn new(count: usize, bounds: Bounds, mut rng: R) -> Self {
        let particles = (0..count).map(|_| new_particle(bounds, &mut rng)).collect();
        Self { particles, rng }
    }

    /// Advances every particle by one frame within the current bounds.
    pub fn step(&mut self, bounds: Bounds) {
        for particle in &mut self.particles {
            update_particle(particle, bounds, &mut self.rng);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn links(&self) -> Vec<Link> {
        links(&self.particles)
    }

    pub fn draw(&self, ctx: &CanvasRenderingContext2d, bounds: Bounds) -> Result<(), JsValue> {
        ctx.clear_rect(0.0, 0.0, bounds.width, bounds.height);
        for particle in &self.particles {
            draw_particle(ctx, particle)?;
        }
        for link in self.links() {
            draw_link(ctx, &link);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    const VIEWPORT: Bounds = Bounds { width: 1280.0, height: 720.0 };

    fn at(x: f64, y: f64) -> Particle {
        Particle { x, y, size: 2.0, ..Default::default() }
    }

    #[test]
    fn reset_stays_in_documented_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let p = new_particle(VIEWPORT, &mut rng);
            assert!(VIEWPORT.contains(p.x, p.y));
            assert!((1.0..4.0).contains(&p.size));
            assert!((-1.5..1.5).contains(&p.speed_x));
            assert!((-1.5..1.5).contains(&p.speed_y));
        }
    }

    #[test]
    fn update_moves_by_velocity_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut p = Particle { x: 10.0, y: 20.0, size: 2.0, speed_x: 1.25, speed_y: -0.5 };
        update_particle(&mut p, VIEWPORT, &mut rng);
        assert_eq!((p.x, p.y), (11.25, 19.5));
        assert_eq!((p.speed_x, p.speed_y), (1.25, -0.5));
    }

    #[test]
    fn leaving_the_canvas_resets_instead_of_clamping() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = Particle { x: 0.5, y: 300.0, size: 2.0, speed_x: -1.0, speed_y: 0.0 };
        update_particle(&mut p, VIEWPORT, &mut rng);
        assert!(VIEWPORT.contains(p.x, p.y));
        assert_ne!(p.speed_x, -1.0);
    }

    #[test]
    fn particles_stay_inside_across_frames_and_resizes() {
        let mut field = ParticleField::new(PARTICLE_COUNT, VIEWPORT, StdRng::seed_from_u64(4));
        assert_eq!(field.particles().len(), PARTICLE_COUNT);

        let sizes = [VIEWPORT, Bounds { width: 320.0, height: 568.0 }, Bounds { width: 1920.0, height: 1080.0 }];
        for bounds in sizes {
            for _ in 0..500 {
                field.step(bounds);
                for p in field.particles() {
                    assert!(bounds.contains(p.x, p.y), "{:?} outside {:?}", p, bounds);
                }
            }
        }
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
    }

    #[test]
    fn link_opacity_falls_off_linearly() {
        assert_eq!(link_opacity(0.0), Some(0.3));
        let half = link_opacity(50.0).unwrap();
        assert!((half - 0.15).abs() < 1e-12);
        assert!(link_opacity(99.9).unwrap() < half);
        assert_eq!(link_opacity(100.0), None);
        assert_eq!(link_opacity(150.0), None);

        let mut previous = f64::INFINITY;
        for d in 0..100 {
            let opacity = link_opacity(d as f64).unwrap();
            assert!(opacity < previous);
            assert!(opacity > 0.0);
            previous = opacity;
        }
    }

    #[test]
    fn links_cover_each_close_pair_once() {
        // (500, 500) and (560, 580) are exactly 100px apart
        let particles = [at(0.0, 0.0), at(30.0, 40.0), at(500.0, 500.0), at(560.0, 580.0), at(520.0, 500.0)];
        let links = links(&particles);

        assert_eq!(links.len(), 3);
        assert_eq!(links[0].from, (0.0, 0.0));
        assert_eq!(links[0].to, (30.0, 40.0));
        assert!((links[0].opacity - 0.15).abs() < 1e-12);
        assert!(!links
            .iter()
            .any(|l| l.from == (500.0, 500.0) && l.to == (560.0, 580.0)));
    }

    #[test]
    fn pairs_at_the_threshold_are_not_linked() {
        let particles = [at(0.0, 0.0), at(60.0, 80.0)];
        assert!(links(&particles).is_empty());
    }
}
