use crossterm::style::Color;
use rand::prelude::SliceRandom;
use rand::Rng;

/// A single confetti particle
#[derive(Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub char: char,
    pub color: Color,
    pub lifetime: f32,
}

impl Particle {
    pub fn is_visible(&self, width: u16, height: u16) -> bool {
        self.x >= 0.0
            && self.x < width as f32
            && self.y >= 0.0
            && self.y < height as f32
            && self.lifetime > 0.0
    }
}

/// Confetti characters
const CONFETTI_CHARS: &[char] = &['*', '✦', '✧', '◆', '◇', '○', '●', '■', '□', '▲', '▽'];

/// Spawn window length, ~3 seconds at 30 FPS
const SPAWN_WINDOW_FRAMES: u32 = 90;

/// Generate a random bright color
fn random_bright_color() -> Color {
    let mut rng = rand::thread_rng();
    match rng.gen_range(0..7) {
        0 => Color::Red,
        1 => Color::Green,
        2 => Color::Yellow,
        3 => Color::Blue,
        4 => Color::Magenta,
        5 => Color::Cyan,
        _ => Color::White,
    }
}

/// Confetti burst layered over the board after a win.
///
/// Spawns from above the top edge for a few seconds; the overlay ends
/// once the last particle falls out or expires.
pub struct Celebration {
    particles: Vec<Particle>,
    frame_count: u32,
    spawning: bool,
    pub width: u16,
    pub height: u16,
}

impl Celebration {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            frame_count: 0,
            spawning: false,
            width: 80,
            height: 24,
        }
    }

    /// Begin a fresh burst
    pub fn start(&mut self) {
        self.particles.clear();
        self.frame_count = 0;
        self.spawning = true;
    }

    /// Cut the burst short and drop all particles
    pub fn stop(&mut self) {
        self.particles.clear();
        self.spawning = false;
    }

    pub fn is_active(&self) -> bool {
        self.spawning || !self.particles.is_empty()
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn update(&mut self) {
        if !self.is_active() {
            return;
        }
        self.frame_count += 1;
        if self.frame_count > SPAWN_WINDOW_FRAMES {
            self.spawning = false;
        }

        // Update particles
        self.particles.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += 0.15; // Gravity
            p.lifetime -= 0.016;
            p.lifetime > 0.0 && p.y < self.height as f32 + 5.0
        });

        if self.spawning {
            self.spawn_confetti();
        }
    }

    fn spawn_confetti(&mut self) {
        let mut rng = rand::thread_rng();
        for _ in 0..3 {
            self.particles.push(Particle {
                x: rng.gen_range(0.0..self.width as f32),
                y: -2.0,
                vx: rng.gen_range(-0.5..0.5),
                vy: rng.gen_range(0.3..1.0),
                char: *CONFETTI_CHARS.choose(&mut rng).unwrap(),
                color: random_bright_color(),
                lifetime: rng.gen_range(3.0..6.0),
            });
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}
