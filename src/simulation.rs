use log::{debug, error, info};

use crate::{
    atomic::{PairPotential, PairPotentialTrait},
    force::{ForceEvaluator, ForceSummary},
    integrators::{Integrator, IntegratorTrait},
    utils::Vector,
    CellList, Error, NeighborList, Particles, Result, SimConfig, SimulationCell,
};

/// Observables produced by one step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    /// Number of steps completed
    pub step: usize,
    pub potential_energy: f64,
    pub virial: f64,
    /// Whether the neighbor list was rebuilt during this step
    pub rebuilt: bool,
}

/// State lent to a [`PostStepHook`] once per step
pub struct HookContext<'a, const D: usize> {
    particles: &'a mut Particles<D>,
    cell: &'a SimulationCell<D>,
    summary: ForceSummary,
    resize: Option<Vector<D>>,
}
impl<const D: usize> HookContext<'_, D> {
    pub fn particles(&self) -> &Particles<D> {
        self.particles
    }
    pub fn velocities_mut(&mut self) -> &mut [Vector<D>] {
        self.particles.velocities_mut()
    }
    pub fn simulation_cell(&self) -> &SimulationCell<D> {
        self.cell
    }
    pub fn summary(&self) -> &ForceSummary {
        &self.summary
    }
    /// Ask for new box lengths, applied once the hook returns
    pub fn request_resize(&mut self, lengths: Vector<D>) {
        self.resize = Some(lengths);
    }
}

/// Extension point run at the end of every step, e.g. a thermostat or barostat
pub trait PostStepHook<const D: usize> {
    fn after_step(&mut self, step: usize, ctx: &mut HookContext<'_, D>) -> Result<()>;
}

/// Committed state from the start of the current step
struct Checkpoint<const D: usize> {
    particles: Particles<D>,
    /// List replaced by a rebuild during the step, if any
    neighbor_list: Option<NeighborList>,
    step: usize,
    last_rebuild_step: usize,
    force_rebuild: bool,
}

/// The main simulation class in JMD: owns all state and drives the steps.
pub struct Simulation<const D: usize> {
    config: SimConfig,
    cell: SimulationCell<D>,
    particles: Particles<D>,
    potential: PairPotential,
    neighbor_list: NeighborList,
    evaluator: ForceEvaluator,
    integrator: Integrator<D>,
    hook: Option<Box<dyn PostStepHook<D>>>,
    /// Positions before the latest update, for displacement tracking
    previous_positions: Vec<Vector<D>>,
    checkpoint: Checkpoint<D>,
    summary: ForceSummary,
    step: usize,
    last_rebuild_step: usize,
    force_rebuild: bool,
    halted: bool,
}

impl<const D: usize> Simulation<D> {
    /// Validate the configuration, wrap the initial positions, build the
    /// neighbor list and compute the initial forces.
    pub fn new(
        config: SimConfig,
        mut particles: Particles<D>,
        potential: impl Into<PairPotential>,
    ) -> Result<Self> {
        config.validate::<D>()?;
        if particles.len() != config.n_particles {
            return Err(Error::config(format!(
                "configured for {} particles, found {}",
                config.n_particles,
                particles.len()
            )));
        }
        let potential = potential.into();
        if potential.cutoff_distance() > config.cutoff {
            return Err(Error::config(format!(
                "potential range {} exceeds the configured cutoff {}",
                potential.cutoff_distance(),
                config.cutoff
            )));
        }
        if let Some(i) = particles.positions().iter().position(|p| !p.is_finite()) {
            return Err(Error::config(format!("particle {} has a non-finite position", i)));
        }
        let cell = config.simulation_cell::<D>()?;
        particles.apply_boundary(&cell);

        let mut simulation = Self {
            neighbor_list: NeighborList::new(config.cutoff, config.skin, config.update_settings()),
            evaluator: ForceEvaluator::new(config.workers, config.min_separation)?,
            integrator: Integrator::new(config.integrator),
            config,
            cell,
            particles,
            potential,
            hook: None,
            previous_positions: Vec::new(),
            checkpoint: Checkpoint {
                particles: Particles::new(),
                neighbor_list: None,
                step: 0,
                last_rebuild_step: 0,
                force_rebuild: false,
            },
            summary: ForceSummary::default(),
            step: 0,
            last_rebuild_step: 0,
            force_rebuild: false,
            halted: false,
        };
        simulation.rebuild_lists()?;
        simulation.summary = simulation.compute_forces()?;
        simulation.integrator.prime(&mut simulation.particles);
        info!(
            "simulation ready: {} particles in {}D, {:?} integrator, {} force workers, {} pairs",
            simulation.particles.len(),
            D,
            simulation.integrator.kind(),
            simulation.evaluator.workers(),
            simulation.neighbor_list.pairs().len()
        );
        Ok(simulation)
    }

    pub fn with_hook(mut self, hook: impl PostStepHook<D> + 'static) -> Self {
        self.set_hook(hook);
        self
    }
    pub fn set_hook(&mut self, hook: impl PostStepHook<D> + 'static) {
        self.hook = Some(Box::new(hook));
    }

    // Getters
    pub fn config(&self) -> &SimConfig {
        &self.config
    }
    pub fn particles(&self) -> &Particles<D> {
        &self.particles
    }
    pub fn simulation_cell(&self) -> &SimulationCell<D> {
        &self.cell
    }
    pub fn neighbor_list(&self) -> &NeighborList {
        &self.neighbor_list
    }
    pub fn potential(&self) -> &PairPotential {
        &self.potential
    }
    pub fn integrator(&self) -> &Integrator<D> {
        &self.integrator
    }
    /// Potential energy and virial at the current positions
    pub fn summary(&self) -> &ForceSummary {
        &self.summary
    }
    pub fn potential_energy(&self) -> f64 {
        self.summary.potential_energy
    }
    pub fn step_count(&self) -> usize {
        self.step
    }
    pub fn timestep(&self) -> f64 {
        self.config.dt
    }
    /// Neighbor list builds so far, including the initial one
    pub fn rebuild_count(&self) -> usize {
        self.neighbor_list.num_builds()
    }
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Scale the box and every position to new edge lengths. The neighbor
    /// list is rebuilt at the start of the next force evaluation.
    pub fn resize_cell(&mut self, lengths: Vector<D>) -> Result<()> {
        if self.halted {
            return Err(Error::Halted);
        }
        self.apply_resize(lengths)
    }

    /// Advance by one time step. Any failure halts the simulation and leaves
    /// the state of the last completed step in place.
    pub fn step(&mut self) -> Result<StepReport> {
        if self.halted {
            return Err(Error::Halted);
        }
        self.save_checkpoint();
        match self.advance() {
            Ok(report) => Ok(report),
            Err(e) => {
                self.restore_checkpoint();
                error!("step {} failed, halting: {}", self.step + 1, e);
                self.halted = true;
                Err(e)
            }
        }
    }

    /// Run `num_steps` steps and return the report of the last one
    pub fn run(&mut self, num_steps: usize) -> Result<StepReport> {
        info!("running {} steps from step {}", num_steps, self.step);
        let builds = self.rebuild_count();
        let mut report = self.report(false);
        for _ in 0..num_steps {
            report = self.step()?;
        }
        info!(
            "run finished at step {}: potential energy {:.6}, {} neighbor list rebuilds",
            self.step,
            self.summary.potential_energy,
            self.rebuild_count() - builds
        );
        Ok(report)
    }

    /// Run the number of steps given in the configuration
    pub fn run_configured(&mut self) -> Result<StepReport> {
        self.run(self.config.steps)
    }

    fn advance(&mut self) -> Result<StepReport> {
        let step = self.step + 1;
        let dt = self.config.dt;

        self.previous_positions.clone_from(&self.particles.positions);
        self.integrator.pre_force(&mut self.particles, dt);
        self.finish_position_update();

        let rebuilt = self.force_rebuild
            || (self.neighbor_list.settings().check_due(step)
                && self.neighbor_list.should_rebuild(&self.particles));
        if rebuilt {
            self.checkpoint.neighbor_list = Some(self.neighbor_list.clone());
            self.rebuild_lists()?;
            debug!(
                "step {}: neighbor list rebuilt after {} steps",
                step,
                step - self.last_rebuild_step
            );
            self.last_rebuild_step = step;
        }
        self.summary = self.compute_forces()?;

        self.previous_positions.clone_from(&self.particles.positions);
        self.integrator.post_force(&mut self.particles, dt);
        self.finish_position_update();
        self.step = step;

        self.run_hook()?;
        Ok(self.report(rebuilt))
    }

    fn save_checkpoint(&mut self) {
        self.checkpoint.particles.copy_from(&self.particles);
        self.checkpoint.neighbor_list = None;
        self.checkpoint.step = self.step;
        self.checkpoint.last_rebuild_step = self.last_rebuild_step;
        self.checkpoint.force_rebuild = self.force_rebuild;
    }

    fn restore_checkpoint(&mut self) {
        self.particles.copy_from(&self.checkpoint.particles);
        if let Some(list) = self.checkpoint.neighbor_list.take() {
            self.neighbor_list = list;
        }
        self.step = self.checkpoint.step;
        self.last_rebuild_step = self.checkpoint.last_rebuild_step;
        self.force_rebuild = self.checkpoint.force_rebuild;
        self.integrator.abandon_step();
    }

    /// Apply boundary conditions and record how far each particle moved
    fn finish_position_update(&mut self) {
        self.particles.apply_boundary(&self.cell);
        self.particles
            .accumulate_displacements(&self.previous_positions, &self.cell);
    }

    fn rebuild_lists(&mut self) -> Result<()> {
        let cell_list = CellList::build(&self.particles, &self.cell, self.neighbor_list.list_distance())?;
        self.neighbor_list
            .rebuild(&mut self.particles, &cell_list, &self.cell);
        self.force_rebuild = false;
        Ok(())
    }

    fn compute_forces(&mut self) -> Result<ForceSummary> {
        self.evaluator.evaluate(
            &mut self.particles,
            &self.neighbor_list,
            &self.cell,
            self.config.cutoff,
            &self.potential,
        )
    }

    fn run_hook(&mut self) -> Result<()> {
        let Some(hook) = self.hook.as_mut() else {
            return Ok(());
        };
        let mut ctx = HookContext {
            particles: &mut self.particles,
            cell: &self.cell,
            summary: self.summary,
            resize: None,
        };
        hook.after_step(self.step, &mut ctx)?;
        match ctx.resize {
            Some(lengths) => self.apply_resize(lengths),
            None => Ok(()),
        }
    }

    fn apply_resize(&mut self, lengths: Vector<D>) -> Result<()> {
        let transform = self.cell.resize(lengths)?;
        for p in self.particles.positions.iter_mut() {
            *p = transform.mul_vec(p);
        }
        self.force_rebuild = true;
        Ok(())
    }

    fn report(&self, rebuilt: bool) -> StepReport {
        StepReport {
            step: self.step,
            potential_energy: self.summary.potential_energy,
            virial: self.summary.virial,
            rebuilt,
        }
    }
}
