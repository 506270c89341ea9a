//! Two-state activation machine and the exponential decay used after a
//! perturbation.

use rand::Rng;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Activation {
    #[default]
    Idle,
    Active,
}

/// Per-tick transition chances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionChances {
    pub idle_to_active: f32,
    /// Rolled only on ticks where the active pulse completed a cycle.
    pub active_to_idle: f32,
}

impl Activation {
    #[inline]
    pub fn is_active(self) -> bool {
        self == Activation::Active
    }

    pub fn step<R: Rng + ?Sized>(
        self,
        chances: &TransitionChances,
        cycle_completed: bool,
        rng: &mut R,
    ) -> Self {
        match self {
            Activation::Idle if roll(rng, chances.idle_to_active) => Activation::Active,
            Activation::Active if cycle_completed && roll(rng, chances.active_to_idle) => {
                Activation::Idle
            }
            state => state,
        }
    }
}

#[inline]
pub fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f32) -> bool {
    chance > 0.0 && rng.gen::<f32>() < chance
}

/// One decay tick of a value perturbed away from `baseline`.
///
/// Values above baseline are multiplied by `factor` (values below divided) and
/// never cross it; once within `epsilon` they land exactly on it.
#[inline]
pub fn decay_toward(value: f32, baseline: f32, factor: f32, epsilon: f32) -> f32 {
    let next = if value > baseline {
        (value * factor).max(baseline)
    } else if value < baseline && factor > 0.0 {
        (value / factor).min(baseline)
    } else {
        baseline
    };
    if (next - baseline).abs() <= epsilon {
        baseline
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DECAY, INTENSITY_SETTLE_EPSILON, SCALE_SETTLE_EPSILON};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zero_chances_never_transition() {
        let mut rng = StdRng::seed_from_u64(1);
        let chances = TransitionChances {
            idle_to_active: 0.0,
            active_to_idle: 0.0,
        };
        for _ in 0..1000 {
            assert_eq!(Activation::Idle.step(&chances, true, &mut rng), Activation::Idle);
            assert_eq!(
                Activation::Active.step(&chances, true, &mut rng),
                Activation::Active
            );
        }
    }

    #[test]
    fn certain_chances_always_transition() {
        let mut rng = StdRng::seed_from_u64(2);
        let chances = TransitionChances {
            idle_to_active: 1.0,
            active_to_idle: 1.0,
        };
        assert_eq!(Activation::Idle.step(&chances, false, &mut rng), Activation::Active);
        assert_eq!(Activation::Active.step(&chances, true, &mut rng), Activation::Idle);
    }

    #[test]
    fn active_stays_until_cycle_completes() {
        let mut rng = StdRng::seed_from_u64(3);
        let chances = TransitionChances {
            idle_to_active: 0.0,
            active_to_idle: 1.0,
        };
        assert_eq!(
            Activation::Active.step(&chances, false, &mut rng),
            Activation::Active
        );
    }

    #[test]
    fn scale_returns_from_double_within_sixty_ticks() {
        let mut scale = 2.0;
        let mut ticks = 0;
        while scale != 1.0 {
            let next = decay_toward(scale, 1.0, DECAY, SCALE_SETTLE_EPSILON);
            assert!(next < scale, "decay must be strictly monotonic");
            assert!(next >= 1.0, "decay overshot baseline");
            scale = next;
            ticks += 1;
            assert!(ticks <= 60, "did not settle within 60 ticks");
        }
    }

    #[test]
    fn intensity_settles_to_zero() {
        let mut v = 1.0;
        let mut ticks = 0;
        while v != 0.0 {
            v = decay_toward(v, 0.0, DECAY, INTENSITY_SETTLE_EPSILON);
            ticks += 1;
            assert!(ticks <= 60);
        }
    }

    #[test]
    fn below_baseline_rises_back() {
        let v = decay_toward(0.5, 1.0, DECAY, 0.0);
        assert!(v > 0.5 && v <= 1.0);
    }
}
