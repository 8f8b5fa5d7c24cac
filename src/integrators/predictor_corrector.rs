use super::*;
use crate::utils::Vector;

// Fixed-coefficient 4th-order Adams-type predictor-corrector over the
// current and two stored accelerations, all scaled by 1/24.
const PREDICT_R: [f64; 3] = [19.0, -10.0, 3.0];
const PREDICT_V: [f64; 3] = [27.0, -22.0, 7.0];
const CORRECT_R: [f64; 3] = [3.0, 10.0, -1.0];
const CORRECT_V: [f64; 3] = [7.0, 6.0, -1.0];
const DIV: f64 = 24.0;

/// Which half of the step the integrator expects next
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Predictor,
    Corrector,
}

/// Multi-step predictor-corrector integrator
#[derive(Clone, Debug)]
pub struct PredictorCorrector<const D: usize> {
    phase: Phase,
    /// Positions and velocities at the start of the current step
    saved_positions: Vec<Vector<D>>,
    saved_velocities: Vec<Vector<D>>,
}

impl<const D: usize> PredictorCorrector<D> {
    pub fn new() -> Self {
        Self {
            phase: Phase::Predictor,
            saved_positions: Vec::new(),
            saved_velocities: Vec::new(),
        }
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
}
impl<const D: usize> Default for PredictorCorrector<D> {
    fn default() -> Self {
        Self::new()
    }
}

fn blend<const D: usize>(coeffs: &[f64; 3], a: &Vector<D>, history: &[Vector<D>; 2]) -> Vector<D> {
    *a * coeffs[0] + history[0] * coeffs[1] + history[1] * coeffs[2]
}

impl<const D: usize> IntegratorTrait<D> for PredictorCorrector<D> {
    fn prime(&mut self, particles: &mut Particles<D>) {
        for (h, a) in particles
            .history
            .iter_mut()
            .zip(particles.accelerations.iter())
        {
            *h = [*a; 2];
        }
        self.phase = Phase::Predictor;
    }

    fn pre_force(&mut self, particles: &mut Particles<D>, timestep: f64) {
        debug_assert_eq!(self.phase, Phase::Predictor, "predictor called twice");
        let wr = timestep * timestep / DIV;
        let wv = timestep / DIV;
        self.saved_positions.clone_from(&particles.positions);
        self.saved_velocities.clone_from(&particles.velocities);

        for i in 0..particles.len() {
            let a = particles.accelerations[i];
            let history = particles.history[i];
            let r0 = self.saved_positions[i];
            let r = r0 + self.saved_velocities[i] * timestep + blend(&PREDICT_R, &a, &history) * wr;
            particles.positions[i] = r;
            particles.velocities[i] = (r - r0) / timestep + blend(&PREDICT_V, &a, &history) * wv;
            particles.history[i] = [a, history[0]];
        }
        self.phase = Phase::Corrector;
    }

    fn post_force(&mut self, particles: &mut Particles<D>, timestep: f64) {
        debug_assert_eq!(self.phase, Phase::Corrector, "corrector called before predictor");
        let wr = timestep * timestep / DIV;
        let wv = timestep / DIV;

        for i in 0..particles.len() {
            let a = particles.accelerations[i];
            let history = particles.history[i];
            let r0 = self.saved_positions[i];
            let r = r0 + self.saved_velocities[i] * timestep + blend(&CORRECT_R, &a, &history) * wr;
            particles.positions[i] = r;
            particles.velocities[i] = (r - r0) / timestep + blend(&CORRECT_V, &a, &history) * wv;
        }
        self.phase = Phase::Predictor;
    }

    fn abandon_step(&mut self) {
        self.phase = Phase::Predictor;
    }
}

#[cfg(test)]
mod tests {
    use num_traits::Zero;

    use super::*;

    #[test]
    fn phases_alternate() {
        let mut p = Particles::from_positions(vec![Vector::<3>::zero()]);
        let mut pc = PredictorCorrector::new();
        pc.prime(&mut p);
        assert_eq!(pc.phase(), Phase::Predictor);
        pc.pre_force(&mut p, 0.01);
        assert_eq!(pc.phase(), Phase::Corrector);
        pc.post_force(&mut p, 0.01);
        assert_eq!(pc.phase(), Phase::Predictor);
    }

    #[test]
    fn constant_acceleration_is_exact() {
        // every coefficient row sums to half the divisor, so uniform
        // acceleration is integrated exactly
        let mut p = Particles::from_positions(vec![Vector([0.0, 0.0])]);
        p.accelerations[0] = Vector([0.0, -2.0]);
        p.velocities[0] = Vector([1.0, 0.0]);
        let mut pc = PredictorCorrector::new();
        pc.prime(&mut p);
        let dt = 0.1;
        for _ in 0..10 {
            pc.pre_force(&mut p, dt);
            pc.post_force(&mut p, dt);
        }
        assert!((p.positions()[0][0] - 1.0).abs() < 1e-12);
        assert!((p.positions()[0][1] + 1.0).abs() < 1e-12);
        assert!((p.velocities()[0][1] + 2.0).abs() < 1e-12);
    }

    #[test]
    fn history_rotates_on_predict() {
        let mut p = Particles::from_positions(vec![Vector([0.0])]);
        p.history[0] = [Vector([2.0]), Vector([3.0])];
        p.accelerations[0] = Vector([1.0]);
        let mut pc = PredictorCorrector::new();
        pc.pre_force(&mut p, 0.1);
        assert_eq!(p.history[0], [Vector([1.0]), Vector([2.0])]);
    }
}
