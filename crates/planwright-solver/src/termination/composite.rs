//! Composite terminations over tuples of inner terminations.

use planwright_core::domain::PlanningSolution;
use planwright_scoring::ScoreDirector;

use super::Termination;
use crate::scope::{PhaseScope, SolverScope};

/// Terminates only when *all* inner terminations agree.
pub struct AndTermination<T>(pub T);

/// Terminates as soon as *any* inner termination fires.
pub struct OrTermination<T>(pub T);

macro_rules! impl_composite_termination {
    ($($name:ident : $idx:tt),+) => {
        impl<S, D, $($name),+> Termination<S, D> for AndTermination<($($name,)+)>
        where
            S: PlanningSolution,
            D: ScoreDirector<S>,
            $($name: Termination<S, D>),+
        {
            fn is_solver_terminated(&self, scope: &SolverScope<S, D>) -> bool {
                $( self.0.$idx.is_solver_terminated(scope) )&&+
            }

            fn is_phase_terminated(&self, scope: &PhaseScope<'_, S, D>) -> bool {
                $( self.0.$idx.is_phase_terminated(scope) )&&+
            }
        }

        impl<S, D, $($name),+> Termination<S, D> for OrTermination<($($name,)+)>
        where
            S: PlanningSolution,
            D: ScoreDirector<S>,
            $($name: Termination<S, D>),+
        {
            fn is_solver_terminated(&self, scope: &SolverScope<S, D>) -> bool {
                $( self.0.$idx.is_solver_terminated(scope) )||+
            }

            fn is_phase_terminated(&self, scope: &PhaseScope<'_, S, D>) -> bool {
                $( self.0.$idx.is_phase_terminated(scope) )||+
            }
        }
    };
}

impl_composite_termination!(T0: 0);
impl_composite_termination!(T0: 0, T1: 1);
impl_composite_termination!(T0: 0, T1: 1, T2: 2);
impl_composite_termination!(T0: 0, T1: 1, T2: 2, T3: 3);
