use std::f32::consts::PI;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ConfettiConfig;

pub const DEFAULT_COLORS: [u32; 7] = [
    0x26ccff, 0xa25afd, 0xff5e7e, 0x88ff5a, 0xfcff42, 0xffa62d, 0xff36ff,
];

const DECAY: f32 = 0.9;
const GRAVITY: f32 = 3.0;
const SCALAR: f32 = 1.0;
const DEFAULT_TICKS: u32 = 200;

/// Where particles of an emission start, as fractions of the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Origin {
    Point { x: f32, y: f32 },
    /// Random x within the band, random y slightly above centre
    Band { x_min: f32, x_max: f32 },
}

/// One burst of particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emission {
    /// Offset from page load
    pub at: Duration,
    pub particle_count: u32,
    /// Launch direction in degrees, 90 is straight up
    pub angle: f32,
    pub spread: f32,
    pub start_velocity: f32,
    pub ticks: u32,
    pub origin: Origin,
}

impl Emission {
    fn burst(at: Duration, particle_count: u32, angle: f32, spread: f32, origin: Origin) -> Self {
        Self {
            at,
            particle_count,
            angle,
            spread,
            start_velocity: 45.0,
            ticks: DEFAULT_TICKS,
            origin,
        }
    }

    fn firework(at: Duration, particle_count: u32, x_min: f32, x_max: f32) -> Self {
        Self {
            at,
            particle_count,
            angle: 90.0,
            spread: 360.0,
            start_velocity: 30.0,
            ticks: 60,
            origin: Origin::Band { x_min, x_max },
        }
    }
}

/// Scripted bursts plus a tapering repeat, each fired exactly once
#[derive(Debug, Clone)]
pub struct BurstSequencer {
    scripted: Vec<Emission>,
    next_scripted: usize,
    start_delay: Duration,
    interval: Duration,
    duration: Duration,
    base_count: u32,
    next_repeat: u32,
    repeat_done: bool,
}

impl BurstSequencer {
    pub fn new(config: &ConfettiConfig) -> Self {
        let start_delay = Duration::from_millis(config.start_delay_ms);
        let at = |ms: u64| start_delay + Duration::from_millis(ms);
        let scripted = vec![
            Emission::burst(at(0), 100, 90.0, 70.0, Origin::Point { x: 0.5, y: 0.6 }),
            Emission::burst(at(300), 50, 60.0, 55.0, Origin::Point { x: 0.0, y: 0.6 }),
            Emission::burst(at(600), 50, 120.0, 55.0, Origin::Point { x: 1.0, y: 0.6 }),
            Emission::burst(at(2000), 150, 90.0, 100.0, Origin::Point { x: 0.5, y: 0.5 }),
        ];

        Self {
            scripted,
            next_scripted: 0,
            start_delay,
            interval: Duration::from_millis(config.repeat_interval_ms.max(1)),
            duration: Duration::from_millis(config.repeat_duration_ms),
            base_count: config.repeat_base_count,
            next_repeat: 1,
            repeat_done: config.repeat_duration_ms == 0,
        }
    }

    /// Particle count of the `k`th repeat, or `None` once the duration is used up
    pub fn repeat_count(&self, k: u32) -> Option<u32> {
        let offset = self.interval * k;
        if offset >= self.duration {
            return None;
        }
        let remaining = (self.duration - offset).as_secs_f32();
        let ratio = remaining / self.duration.as_secs_f32();
        Some((self.base_count as f32 * ratio).round() as u32)
    }

    /// Emissions due by `elapsed` (time since load) that have not fired yet
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Emission> {
        let mut due = Vec::new();

        while let Some(emission) = self.scripted.get(self.next_scripted) {
            if emission.at > elapsed {
                break;
            }
            due.push(*emission);
            self.next_scripted += 1;
        }

        while !self.repeat_done {
            let at = self.start_delay + self.interval * self.next_repeat;
            if at > elapsed {
                break;
            }
            match self.repeat_count(self.next_repeat) {
                Some(count) => {
                    if count > 0 {
                        due.push(Emission::firework(at, count, 0.1, 0.3));
                        due.push(Emission::firework(at, count, 0.7, 0.9));
                    }
                    self.next_repeat += 1;
                }
                None => self.repeat_done = true,
            }
        }

        due.sort_by_key(|e| e.at);
        due
    }

    pub fn is_finished(&self) -> bool {
        self.next_scripted == self.scripted.len() && self.repeat_done
    }
}

/// Falling, wobbling paper rectangle in logical pixels
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiParticle {
    pub x: f32,
    pub y: f32,
    pub color: u32,
    velocity: f32,
    angle: f32,
    wobble: f32,
    wobble_speed: f32,
    wobble_x: f32,
    wobble_y: f32,
    tilt_angle: f32,
    tilt_sin: f32,
    tilt_cos: f32,
    random: f32,
    tick: u32,
    total_ticks: u32,
}

impl ConfettiParticle {
    fn spawn(emission: &Emission, viewport: [f32; 2], color: u32, rng: &mut StdRng) -> Self {
        let (ox, oy) = match emission.origin {
            Origin::Point { x, y } => (x, y),
            Origin::Band { x_min, x_max } => (rng.random_range(x_min..x_max), rng.random::<f32>() - 0.2),
        };
        let rad_angle = emission.angle.to_radians();
        let rad_spread = emission.spread.to_radians();
        let x = ox * viewport[0];
        let y = oy * viewport[1];

        Self {
            x,
            y,
            color,
            velocity: emission.start_velocity * 0.5 + rng.random::<f32>() * emission.start_velocity,
            angle: -rad_angle + (0.5 * rad_spread - rng.random::<f32>() * rad_spread),
            wobble: rng.random::<f32>() * 10.0,
            wobble_speed: (rng.random::<f32>() * 0.1 + 0.05).min(0.11),
            wobble_x: x,
            wobble_y: y,
            tilt_angle: (rng.random::<f32>() * 0.5 + 0.25) * PI,
            tilt_sin: 0.0,
            tilt_cos: 0.0,
            random: rng.random::<f32>() + 2.0,
            tick: 0,
            total_ticks: emission.ticks.max(1),
        }
    }

    fn step(&mut self, rng: &mut StdRng) {
        self.x += self.angle.cos() * self.velocity;
        self.y += self.angle.sin() * self.velocity + GRAVITY;
        self.velocity *= DECAY;

        self.wobble += self.wobble_speed;
        self.wobble_x = self.x + 10.0 * SCALAR * self.wobble.cos();
        self.wobble_y = self.y + 10.0 * SCALAR * self.wobble.sin();

        self.tilt_angle += 0.1;
        self.tilt_sin = self.tilt_angle.sin();
        self.tilt_cos = self.tilt_angle.cos();
        self.random = rng.random::<f32>() + 2.0;
        self.tick += 1;
    }

    pub fn is_alive(&self) -> bool {
        self.tick < self.total_ticks
    }

    pub fn opacity(&self) -> f32 {
        1.0 - self.tick as f32 / self.total_ticks as f32
    }

    /// Quad corners for drawing
    pub fn corners(&self) -> [[f32; 2]; 4] {
        let x1 = self.x + self.random * self.tilt_cos;
        let y1 = self.y + self.random * self.tilt_sin;
        let x2 = self.wobble_x + self.random * self.tilt_cos;
        let y2 = self.wobble_y + self.random * self.tilt_sin;
        [
            [self.x.floor(), self.y.floor()],
            [self.wobble_x.floor(), y1.floor()],
            [x2.floor(), y2.floor()],
            [x1.floor(), self.wobble_y.floor()],
        ]
    }
}

/// Live particles plus the RNG that spawns them
#[derive(Debug)]
pub struct ConfettiSystem {
    particles: Vec<ConfettiParticle>,
    rng: StdRng,
}

impl ConfettiSystem {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            rng,
        }
    }

    pub fn emit(&mut self, emission: &Emission, viewport: [f32; 2]) {
        for _ in 0..emission.particle_count {
            let color = DEFAULT_COLORS[self.rng.random_range(0..DEFAULT_COLORS.len())];
            let particle = ConfettiParticle::spawn(emission, viewport, color, &mut self.rng);
            self.particles.push(particle);
        }
    }

    /// One animation tick; expired particles are dropped
    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.step(&mut self.rng);
        }
        self.particles.retain(ConfettiParticle::is_alive);
    }

    pub fn particles(&self) -> &[ConfettiParticle] {
        &self.particles
    }

    pub fn is_idle(&self) -> bool {
        self.particles.is_empty()
    }
}

impl Default for ConfettiSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Burst schedule driving a particle system
#[derive(Debug)]
pub struct ConfettiEffect {
    sequencer: BurstSequencer,
    system: ConfettiSystem,
    steps: u64,
}

impl ConfettiEffect {
    pub fn new(sequencer: BurstSequencer, system: ConfettiSystem) -> Self {
        Self {
            sequencer,
            system,
            steps: 0,
        }
    }

    /// Fire due emissions and step the particles once.
    /// Call once per rendered frame.
    pub fn advance(&mut self, elapsed: Duration, viewport: [f32; 2]) {
        for emission in self.sequencer.advance(elapsed) {
            log::debug!("Confetti burst: {} particles", emission.particle_count);
            self.system.emit(&emission, viewport);
        }
        self.system.step();
        self.steps += 1;
    }

    /// Particle ticks taken so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn particles(&self) -> &[ConfettiParticle] {
        self.system.particles()
    }

    /// Nothing left to emit or draw
    pub fn is_done(&self) -> bool {
        self.sequencer.is_finished() && self.system.is_idle()
    }
}
