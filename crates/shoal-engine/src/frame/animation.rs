use anyhow::{Context, Result};

use crate::canvas::Canvas2d;
use crate::config::{RenderConfig, StepRatio};
use crate::coords::{Axis, CoordinateMapper, FOOD_RADIUS_FACTOR, ORGANISM_SIZE_FACTOR, Viewport};
use crate::shapes::{DrawError, ShapeRenderer};
use crate::world::{Food, Organism, Simulation, Validation};

/// Outcome of one [`AnimationLoop::tick`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct TickReport {
    /// Simulation steps taken this tick.
    pub steps: u32,
    pub foods_drawn: usize,
    pub organisms_drawn: usize,
    /// Entities rejected by validation or by the canvas.
    pub skipped: usize,
}

impl TickReport {
    /// Primitives that reached the canvas.
    #[inline]
    pub fn drawn(&self) -> usize {
        self.foods_drawn + self.organisms_drawn
    }
}

/// Clears, steps the simulation, then draws the world it reports.
pub struct AnimationLoop<S> {
    simulation: S,
    renderer: ShapeRenderer,
    food_radius_factor: f32,
    organism_size_factor: f32,
    validation: Validation,
    ratio: StepRatio,
    // Pending steps scaled by `ratio.frames`.
    accumulator: u64,
    ticks: u64,
}

impl<S: Simulation> AnimationLoop<S> {
    pub fn new(simulation: S) -> Self {
        Self {
            simulation,
            renderer: ShapeRenderer::default(),
            food_radius_factor: FOOD_RADIUS_FACTOR,
            organism_size_factor: ORGANISM_SIZE_FACTOR,
            validation: Validation::default(),
            ratio: StepRatio::default(),
            accumulator: 0,
            ticks: 0,
        }
    }

    pub fn from_config(simulation: S, config: &RenderConfig) -> Result<Self> {
        config.check()?;
        let style = config.fish_style().context("invalid fish style")?;

        let mut anim = Self::new(simulation)
            .with_renderer(ShapeRenderer::new(style))
            .with_validation(config.validation)
            .with_step_ratio(config.step_ratio);
        anim.food_radius_factor = config.food_radius_factor;
        anim.organism_size_factor = config.organism_size_factor;
        Ok(anim)
    }

    pub fn with_renderer(mut self, renderer: ShapeRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    /// A zero `frames` count is treated as `1`.
    pub fn with_step_ratio(mut self, ratio: StepRatio) -> Self {
        self.ratio = StepRatio::new(ratio.steps, ratio.frames.max(1));
        self.accumulator = 0;
        self
    }

    /// Runs one frame against `canvas`, whose transform already maps logical
    /// pixels of `viewport` onto the backing buffer.
    ///
    /// Entities that fail validation or drawing are skipped and logged; the
    /// rest of the frame is still drawn.
    pub fn tick<C>(&mut self, canvas: &mut C, viewport: Viewport) -> TickReport
    where
        C: Canvas2d + ?Sized,
    {
        let mut report = TickReport::default();

        canvas.clear_rect(viewport.bounds());

        report.steps = self.steps_due();
        for _ in 0..report.steps {
            self.simulation.step();
        }

        let world = self.simulation.world();
        let mapper = CoordinateMapper::new(viewport);

        for (index, food) in world.foods.iter().enumerate() {
            match self.draw_food(canvas, &mapper, food) {
                Ok(()) => report.foods_drawn += 1,
                Err(err) => {
                    log::warn!("skipping food #{index}: {err}");
                    report.skipped += 1;
                }
            }
        }

        for (index, organism) in world.animals.iter().enumerate() {
            match self.draw_organism(canvas, &mapper, organism) {
                Ok(()) => report.organisms_drawn += 1,
                Err(err) => {
                    log::warn!("skipping organism #{index}: {err}");
                    report.skipped += 1;
                }
            }
        }

        self.ticks += 1;
        log::debug!(
            "tick {}: {} step(s), {} food, {} organisms, {} skipped",
            self.ticks,
            report.steps,
            report.foods_drawn,
            report.organisms_drawn,
            report.skipped,
        );
        report
    }

    fn draw_food<C>(&self, canvas: &mut C, mapper: &CoordinateMapper, food: &Food) -> Result<(), DrawError>
    where
        C: Canvas2d + ?Sized,
    {
        let color = food.validate(self.validation)?;
        let pos = mapper.map_position(food.x, food.y);
        let radius = mapper.map_length(self.food_radius_factor, Axis::Horizontal);
        self.renderer.draw_food(canvas, pos.x, pos.y, radius, color)?;
        Ok(())
    }

    fn draw_organism<C>(
        &self,
        canvas: &mut C,
        mapper: &CoordinateMapper,
        organism: &Organism,
    ) -> Result<(), DrawError>
    where
        C: Canvas2d + ?Sized,
    {
        organism.validate(self.validation)?;
        let pos = mapper.map_position(organism.x, organism.y);
        let size = mapper.map_length(self.organism_size_factor, Axis::Horizontal);
        self.renderer.draw_organism(canvas, pos.x, pos.y, size, organism.rotation)?;
        Ok(())
    }

    fn steps_due(&mut self) -> u32 {
        let frames = u64::from(self.ratio.frames);
        self.accumulator += u64::from(self.ratio.steps);
        let due = self.accumulator / frames;
        self.accumulator %= frames;
        u32::try_from(due).unwrap_or(u32::MAX)
    }

    /// Ticks run so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn step_ratio(&self) -> StepRatio {
        self.ratio
    }

    #[inline]
    pub fn renderer(&self) -> &ShapeRenderer {
        &self.renderer
    }

    #[inline]
    pub fn simulation(&self) -> &S {
        &self.simulation
    }

    #[inline]
    pub fn simulation_mut(&mut self) -> &mut S {
        &mut self.simulation
    }

    pub fn into_simulation(self) -> S {
        self.simulation
    }
}
