use super::WorldSnapshot;

/// External simulation driven by the animation loop.
///
/// Both calls are synchronous; `world` must be valid immediately after `step`.
pub trait Simulation {
    /// Advances the simulation by one tick.
    fn step(&mut self);

    /// Returns a fresh snapshot of the current state.
    fn world(&self) -> WorldSnapshot;
}

impl<S: Simulation + ?Sized> Simulation for Box<S> {
    fn step(&mut self) {
        (**self).step();
    }

    fn world(&self) -> WorldSnapshot {
        (**self).world()
    }
}
