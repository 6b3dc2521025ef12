//! Stand-in collaborator: fish drift and wander, eating the food they touch.

use std::f32::consts::{FRAC_PI_2, TAU};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use shoal_engine::world::{Food, Organism, Simulation, WorldSnapshot};

const FISH: usize = 40;
const FOODS: usize = 60;

const SPEED_MIN: f32 = 0.0006;
const SPEED_MAX: f32 = 0.0012;
const SPEED_JITTER: f32 = 0.0001;
const TURN_JITTER: f32 = FRAC_PI_2 / 8.0;
const EAT_DISTANCE: f32 = 0.01;

struct Fish {
    x: f32,
    y: f32,
    rotation: f32,
    speed: f32,
    eaten: u32,
}

struct Pellet {
    x: f32,
    y: f32,
    color: String,
}

pub struct DriftSimulation {
    rng: SmallRng,
    fish: Vec<Fish>,
    pellets: Vec<Pellet>,
}

impl DriftSimulation {
    pub fn new(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let fish = (0..FISH)
            .map(|_| Fish {
                x: rng.gen_range(0.0..1.0),
                y: rng.gen_range(0.0..1.0),
                rotation: rng.gen_range(0.0..TAU),
                speed: rng.gen_range(SPEED_MIN..SPEED_MAX),
                eaten: 0,
            })
            .collect();
        let pellets = (0..FOODS).map(|_| random_pellet(&mut rng)).collect();
        Self { rng, fish, pellets }
    }

    pub fn eaten(&self) -> u32 {
        self.fish.iter().map(|f| f.eaten).sum()
    }

    fn eat(&mut self) {
        for fish in &mut self.fish {
            for pellet in &mut self.pellets {
                let (dx, dy) = (fish.x - pellet.x, fish.y - pellet.y);
                if (dx * dx + dy * dy).sqrt() <= EAT_DISTANCE {
                    fish.eaten += 1;
                    *pellet = random_pellet(&mut self.rng);
                }
            }
        }
    }

    fn wander(&mut self) {
        for fish in &mut self.fish {
            fish.rotation = (fish.rotation + self.rng.gen_range(-TURN_JITTER..TURN_JITTER)).rem_euclid(TAU);
            fish.speed = (fish.speed + self.rng.gen_range(-SPEED_JITTER..SPEED_JITTER)).clamp(SPEED_MIN, SPEED_MAX);
        }
    }

    fn swim(&mut self) {
        for fish in &mut self.fish {
            // Heading for rotation θ is (-sin θ, cos θ).
            let (sin, cos) = fish.rotation.sin_cos();
            fish.x = (fish.x - sin * fish.speed).rem_euclid(1.0);
            fish.y = (fish.y + cos * fish.speed).rem_euclid(1.0);
        }
    }
}

impl Simulation for DriftSimulation {
    fn step(&mut self) {
        self.eat();
        self.wander();
        self.swim();
    }

    fn world(&self) -> WorldSnapshot {
        WorldSnapshot {
            foods: self.pellets.iter().map(|p| Food::new(p.x, p.y, p.color.clone())).collect(),
            animals: self.fish.iter().map(|f| Organism::new(f.x, f.y, f.rotation)).collect(),
        }
    }
}

fn random_pellet(rng: &mut SmallRng) -> Pellet {
    let (r, g, b): (u8, u8, u8) = (rng.gen_range(0..=255), rng.gen_range(0..=255), rng.gen_range(0..=255));
    Pellet {
        x: rng.gen_range(0.0..1.0),
        y: rng.gen_range(0.0..1.0),
        color: format!("rgb({r}, {g}, {b})"),
    }
}
