//! Builds solver components from declarative configuration.
//!
//! The move selector stays domain code; everything else (acceptor,
//! forager, terminations, seed, assertion level) can come from a
//! [`SolverConfig`] file.

use rand::rngs::StdRng;

use planwright_config::{
    AcceptorConfig, EnvironmentMode, FinalistPodiumType, ForagerConfig, LocalSearchConfig,
    PickEarlyType, SolverConfig, TerminationConfig,
};
use planwright_core::domain::PlanningSolution;
use planwright_core::error::{PlanwrightError, Result};
use planwright_core::{ParseableScore, Score};
use planwright_scoring::ScoreDirector;

use crate::heuristic::{Move, MoveSelector};
use crate::phase::localsearch::{
    AcceptedForager, Acceptor, CandidateMove, EntityRatioTabuSize, EntityTabuAcceptor,
    FinalistPodium, FixedTabuSize, HighestScorePodium, HillClimbingAcceptor,
    LateAcceptanceAcceptor, LocalSearchDecider, LocalSearchPhase, MoveTabuAcceptor, PickEarly,
    SimulatedAnnealingAcceptor, StrategicOscillationPodium, ValueTabuAcceptor,
};
use crate::scope::{LocalSearchMoveScope, LocalSearchStepScope, PhaseScope, SolverScope};
use crate::solver::Solver;
use crate::termination::{
    BestScoreTermination, StepCountTermination, Termination, TimeTermination,
    UnimprovedStepCountTermination,
};

const DEFAULT_LATE_ACCEPTANCE_SIZE: usize = 400;

/// Acceptor variant chosen by configuration.
#[derive(Debug)]
pub enum ConfiguredAcceptor<Sc, M> {
    HillClimbing(HillClimbingAcceptor),
    EntityTabu(EntityTabuAcceptor),
    ValueTabu(ValueTabuAcceptor),
    MoveTabu(MoveTabuAcceptor<M>),
    LateAcceptance(LateAcceptanceAcceptor<Sc>),
    SimulatedAnnealing(SimulatedAnnealingAcceptor),
}

impl<Sc, M> ConfiguredAcceptor<Sc, M> {
    /// Builds the acceptor a configuration describes.
    ///
    /// When several tabu sizes are set, entity tabu wins over value
    /// tabu, which wins over move tabu.
    pub fn from_config(config: &AcceptorConfig) -> Result<Self>
    where
        M: Clone + Eq + std::hash::Hash + std::fmt::Debug + Send,
    {
        match config {
            AcceptorConfig::HillClimbing => {
                Ok(ConfiguredAcceptor::HillClimbing(HillClimbingAcceptor::new()))
            }
            AcceptorConfig::TabuSearch(tabu) => {
                let fading = tabu.fading_tabu_size.unwrap_or(0);
                let aspiration = tabu.aspiration_enabled.unwrap_or(true);
                if let Some(ratio) = tabu.entity_tabu_ratio {
                    if !(ratio > 0.0) {
                        return Err(PlanwrightError::Config(
                            "entity_tabu_ratio must be positive".to_string(),
                        ));
                    }
                    let acceptor = EntityTabuAcceptor::with_strategies(
                        Box::new(EntityRatioTabuSize(ratio)),
                        Box::new(FixedTabuSize(fading)),
                    );
                    return Ok(ConfiguredAcceptor::EntityTabu(without_aspiration_if(
                        acceptor,
                        !aspiration,
                        EntityTabuAcceptor::without_aspiration,
                    )));
                }
                if let Some(size) = tabu.entity_tabu_size {
                    let acceptor = EntityTabuAcceptor::with_strategies(
                        Box::new(FixedTabuSize(size)),
                        Box::new(FixedTabuSize(fading)),
                    );
                    return Ok(ConfiguredAcceptor::EntityTabu(without_aspiration_if(
                        acceptor,
                        !aspiration,
                        EntityTabuAcceptor::without_aspiration,
                    )));
                }
                if let Some(size) = tabu.value_tabu_size {
                    let acceptor = ValueTabuAcceptor::with_strategies(
                        Box::new(FixedTabuSize(size)),
                        Box::new(FixedTabuSize(fading)),
                    );
                    return Ok(ConfiguredAcceptor::ValueTabu(without_aspiration_if(
                        acceptor,
                        !aspiration,
                        ValueTabuAcceptor::without_aspiration,
                    )));
                }
                if let Some(size) = tabu.move_tabu_size {
                    let acceptor = MoveTabuAcceptor::with_strategies(
                        Box::new(FixedTabuSize(size)),
                        Box::new(FixedTabuSize(fading)),
                    );
                    return Ok(ConfiguredAcceptor::MoveTabu(without_aspiration_if(
                        acceptor,
                        !aspiration,
                        MoveTabuAcceptor::without_aspiration,
                    )));
                }
                Err(PlanwrightError::Config(
                    "tabu_search acceptor needs an entity, value or move tabu size".to_string(),
                ))
            }
            AcceptorConfig::SimulatedAnnealing(sa) => {
                if !(sa.starting_temperature > 0.0) {
                    return Err(PlanwrightError::Config(
                        "starting_temperature must be positive".to_string(),
                    ));
                }
                if !(0.0..=1.0).contains(&sa.temperature_decay) {
                    return Err(PlanwrightError::Config(
                        "temperature_decay must be within [0, 1]".to_string(),
                    ));
                }
                Ok(ConfiguredAcceptor::SimulatedAnnealing(
                    SimulatedAnnealingAcceptor::new(sa.starting_temperature, sa.temperature_decay),
                ))
            }
            AcceptorConfig::LateAcceptance(late) => {
                let size = late
                    .late_acceptance_size
                    .unwrap_or(DEFAULT_LATE_ACCEPTANCE_SIZE);
                if size == 0 {
                    return Err(PlanwrightError::Config(
                        "late_acceptance_size must be positive".to_string(),
                    ));
                }
                Ok(ConfiguredAcceptor::LateAcceptance(
                    LateAcceptanceAcceptor::new(size),
                ))
            }
        }
    }
}

fn without_aspiration_if<A>(acceptor: A, disable: bool, f: impl FnOnce(A) -> A) -> A {
    if disable {
        f(acceptor)
    } else {
        acceptor
    }
}

impl<S, M> Acceptor<S, M> for ConfiguredAcceptor<S::Score, M>
where
    S: PlanningSolution,
    M: Move<S>,
{
    fn is_accepted(
        &mut self,
        move_scope: &LocalSearchMoveScope<'_, S, M>,
        rng: &mut StdRng,
    ) -> bool {
        match self {
            ConfiguredAcceptor::HillClimbing(a) => a.is_accepted(move_scope, rng),
            ConfiguredAcceptor::EntityTabu(a) => a.is_accepted(move_scope, rng),
            ConfiguredAcceptor::ValueTabu(a) => a.is_accepted(move_scope, rng),
            ConfiguredAcceptor::MoveTabu(a) => a.is_accepted(move_scope, rng),
            ConfiguredAcceptor::LateAcceptance(a) => a.is_accepted(move_scope, rng),
            ConfiguredAcceptor::SimulatedAnnealing(a) => a.is_accepted(move_scope, rng),
        }
    }

    fn phase_started(&mut self, initial_score: &S::Score, entity_count: usize) {
        match self {
            ConfiguredAcceptor::HillClimbing(a) => {
                Acceptor::<S, M>::phase_started(a, initial_score, entity_count)
            }
            ConfiguredAcceptor::EntityTabu(a) => {
                Acceptor::<S, M>::phase_started(a, initial_score, entity_count)
            }
            ConfiguredAcceptor::ValueTabu(a) => {
                Acceptor::<S, M>::phase_started(a, initial_score, entity_count)
            }
            ConfiguredAcceptor::MoveTabu(a) => {
                Acceptor::<S, M>::phase_started(a, initial_score, entity_count)
            }
            ConfiguredAcceptor::LateAcceptance(a) => {
                Acceptor::<S, M>::phase_started(a, initial_score, entity_count)
            }
            ConfiguredAcceptor::SimulatedAnnealing(a) => {
                Acceptor::<S, M>::phase_started(a, initial_score, entity_count)
            }
        }
    }

    fn step_started(&mut self, step_index: u64) {
        match self {
            ConfiguredAcceptor::HillClimbing(a) => Acceptor::<S, M>::step_started(a, step_index),
            ConfiguredAcceptor::EntityTabu(a) => Acceptor::<S, M>::step_started(a, step_index),
            ConfiguredAcceptor::ValueTabu(a) => Acceptor::<S, M>::step_started(a, step_index),
            ConfiguredAcceptor::MoveTabu(a) => Acceptor::<S, M>::step_started(a, step_index),
            ConfiguredAcceptor::LateAcceptance(a) => Acceptor::<S, M>::step_started(a, step_index),
            ConfiguredAcceptor::SimulatedAnnealing(a) => {
                Acceptor::<S, M>::step_started(a, step_index)
            }
        }
    }

    fn step_ended(&mut self, step_scope: &LocalSearchStepScope<S, M>) {
        match self {
            ConfiguredAcceptor::HillClimbing(a) => a.step_ended(step_scope),
            ConfiguredAcceptor::EntityTabu(a) => a.step_ended(step_scope),
            ConfiguredAcceptor::ValueTabu(a) => a.step_ended(step_scope),
            ConfiguredAcceptor::MoveTabu(a) => a.step_ended(step_scope),
            ConfiguredAcceptor::LateAcceptance(a) => a.step_ended(step_scope),
            ConfiguredAcceptor::SimulatedAnnealing(a) => a.step_ended(step_scope),
        }
    }

    fn phase_ended(&mut self) {
        match self {
            ConfiguredAcceptor::HillClimbing(a) => Acceptor::<S, M>::phase_ended(a),
            ConfiguredAcceptor::EntityTabu(a) => Acceptor::<S, M>::phase_ended(a),
            ConfiguredAcceptor::ValueTabu(a) => Acceptor::<S, M>::phase_ended(a),
            ConfiguredAcceptor::MoveTabu(a) => Acceptor::<S, M>::phase_ended(a),
            ConfiguredAcceptor::LateAcceptance(a) => Acceptor::<S, M>::phase_ended(a),
            ConfiguredAcceptor::SimulatedAnnealing(a) => Acceptor::<S, M>::phase_ended(a),
        }
    }
}

/// Finalist podium variant chosen by configuration.
#[derive(Debug)]
pub enum ConfiguredPodium<Sc: Score, M> {
    HighestScore(HighestScorePodium<Sc, M>),
    StrategicOscillation(StrategicOscillationPodium<Sc, M>),
}

impl<Sc: Score, M> ConfiguredPodium<Sc, M> {
    pub fn from_config(podium_type: FinalistPodiumType) -> Self {
        match podium_type {
            FinalistPodiumType::HighestScore => {
                ConfiguredPodium::HighestScore(HighestScorePodium::new())
            }
            FinalistPodiumType::StrategicOscillation => {
                ConfiguredPodium::StrategicOscillation(StrategicOscillationPodium::new())
            }
            FinalistPodiumType::StrategicOscillationByBestScore => {
                ConfiguredPodium::StrategicOscillation(
                    StrategicOscillationPodium::new().referencing_best_score(),
                )
            }
        }
    }
}

impl<S, M> FinalistPodium<S, M> for ConfiguredPodium<S::Score, M>
where
    S: PlanningSolution,
    M: Send,
{
    fn step_started(&mut self, last_step_score: &S::Score, best_score: &S::Score) {
        match self {
            ConfiguredPodium::HighestScore(p) => {
                FinalistPodium::<S, M>::step_started(p, last_step_score, best_score)
            }
            ConfiguredPodium::StrategicOscillation(p) => {
                FinalistPodium::<S, M>::step_started(p, last_step_score, best_score)
            }
        }
    }

    fn add_move(&mut self, candidate: CandidateMove<S::Score, M>) {
        match self {
            ConfiguredPodium::HighestScore(p) => FinalistPodium::<S, M>::add_move(p, candidate),
            ConfiguredPodium::StrategicOscillation(p) => {
                FinalistPodium::<S, M>::add_move(p, candidate)
            }
        }
    }

    fn take_finalists(&mut self) -> Vec<CandidateMove<S::Score, M>> {
        match self {
            ConfiguredPodium::HighestScore(p) => FinalistPodium::<S, M>::take_finalists(p),
            ConfiguredPodium::StrategicOscillation(p) => FinalistPodium::<S, M>::take_finalists(p),
        }
    }
}

/// Builds the forager a configuration describes.
pub fn forager_from_config<Sc: Score, M>(
    config: Option<&ForagerConfig>,
) -> Result<AcceptedForager<Sc, M, ConfiguredPodium<Sc, M>>> {
    let podium_type = config
        .and_then(|c| c.finalist_podium_type)
        .unwrap_or_default();
    let mut forager = AcceptedForager::new(ConfiguredPodium::from_config(podium_type));
    if let Some(config) = config {
        if let Some(limit) = config.accepted_count_limit {
            if limit == 0 {
                return Err(PlanwrightError::Config(
                    "accepted_count_limit must be positive".to_string(),
                ));
            }
            forager = forager.with_accepted_count_limit(limit);
        }
        let pick_early = match config.pick_early_type.unwrap_or_default() {
            PickEarlyType::Never => PickEarly::Never,
            PickEarlyType::FirstBestScoreImproving => PickEarly::FirstBestScoreImproving,
            PickEarlyType::FirstLastStepScoreImproving => PickEarly::FirstLastStepScoreImproving,
        };
        forager = forager.with_pick_early(pick_early);
    }
    Ok(forager)
}

/// Termination assembled from configuration; unset limits never fire.
#[derive(Debug, Default)]
pub struct ConfiguredTermination<Sc> {
    time: Option<TimeTermination>,
    best_score: Option<BestScoreTermination<Sc>>,
    step_count: Option<StepCountTermination>,
    unimproved_step_count: Option<UnimprovedStepCountTermination>,
}

impl<Sc: ParseableScore> ConfiguredTermination<Sc> {
    /// A termination that never fires.
    pub fn never() -> Self {
        Self::default()
    }

    pub fn from_config(config: &TerminationConfig) -> Result<Self> {
        let best_score = match &config.best_score_limit {
            Some(limit) => {
                let target = Sc::parse(limit).map_err(|e| {
                    PlanwrightError::Config(format!("Invalid best_score_limit: {}", e))
                })?;
                Some(BestScoreTermination::new(target))
            }
            None => None,
        };
        Ok(Self {
            time: config.time_limit().map(TimeTermination::new),
            best_score,
            step_count: config.step_count_limit.map(StepCountTermination::new),
            unimproved_step_count: config
                .unimproved_step_count_limit
                .map(UnimprovedStepCountTermination::new),
        })
    }
}

impl<S, D> Termination<S, D> for ConfiguredTermination<S::Score>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
{
    fn is_solver_terminated(&self, scope: &SolverScope<S, D>) -> bool {
        self.time
            .as_ref()
            .is_some_and(|t| t.is_solver_terminated(scope))
            || self
                .best_score
                .as_ref()
                .is_some_and(|t| t.is_solver_terminated(scope))
    }

    fn is_phase_terminated(&self, scope: &PhaseScope<'_, S, D>) -> bool {
        self.is_solver_terminated(scope.solver_scope())
            || self
                .step_count
                .as_ref()
                .is_some_and(|t| t.is_phase_terminated(scope))
            || self
                .unimproved_step_count
                .as_ref()
                .is_some_and(|t| t.is_phase_terminated(scope))
    }
}

/// The fully configured local search phase type.
pub type ConfiguredLocalSearchPhase<S, M, MS> = LocalSearchPhase<
    S,
    M,
    MS,
    ConfiguredAcceptor<<S as PlanningSolution>::Score, M>,
    AcceptedForager<
        <S as PlanningSolution>::Score,
        M,
        ConfiguredPodium<<S as PlanningSolution>::Score, M>,
    >,
    ConfiguredTermination<<S as PlanningSolution>::Score>,
>;

/// Builds a local search phase around a domain-provided move selector.
///
/// An absent acceptor defaults to hill climbing; an absent termination
/// never fires on its own, leaving the solver termination in charge.
pub fn local_search_phase_from_config<S, M, MS>(
    move_selector: MS,
    config: &LocalSearchConfig,
    environment_mode: EnvironmentMode,
) -> Result<ConfiguredLocalSearchPhase<S, M, MS>>
where
    S: PlanningSolution,
    S::Score: ParseableScore,
    M: Move<S>,
    MS: MoveSelector<S, M>,
{
    let acceptor = match &config.acceptor {
        Some(acceptor_config) => ConfiguredAcceptor::from_config(acceptor_config)?,
        None => ConfiguredAcceptor::HillClimbing(HillClimbingAcceptor::new()),
    };
    let forager = forager_from_config(config.forager.as_ref())?;
    let mut decider = LocalSearchDecider::new(move_selector, acceptor, forager);
    if let Some(limit) = config.forager.as_ref().and_then(|f| f.selected_count_limit) {
        if limit == 0 {
            return Err(PlanwrightError::Config(
                "selected_count_limit must be positive".to_string(),
            ));
        }
        decider = decider.with_selected_count_limit(limit);
    }
    if environment_mode == EnvironmentMode::FullAssert {
        decider = decider
            .with_move_score_assertions(true)
            .with_undo_score_assertions(true);
    }
    let termination = match &config.termination {
        Some(termination_config) => ConfiguredTermination::from_config(termination_config)?,
        None => ConfiguredTermination::never(),
    };
    Ok(LocalSearchPhase::new(decider, termination))
}

/// Builds a single-phase solver from a configuration file's contents.
pub fn solver_from_config<S, M, MS>(
    move_selector: MS,
    config: &SolverConfig,
) -> Result<
    Solver<(ConfiguredLocalSearchPhase<S, M, MS>,), ConfiguredTermination<S::Score>>,
>
where
    S: PlanningSolution,
    S::Score: ParseableScore,
    M: Move<S>,
    MS: MoveSelector<S, M>,
{
    let local_search = config.local_search.clone().unwrap_or_default();
    let phase =
        local_search_phase_from_config(move_selector, &local_search, config.environment_mode)?;
    let termination = match &config.termination {
        Some(termination_config) => ConfiguredTermination::from_config(termination_config)?,
        None => ConfiguredTermination::never(),
    };
    let mut solver = Solver::new((phase,)).with_termination(termination);
    let seed = match (config.environment_mode, config.random_seed) {
        (_, Some(seed)) => Some(seed),
        (EnvironmentMode::Reproducible | EnvironmentMode::FullAssert, None) => Some(0),
        (EnvironmentMode::NonReproducible, None) => None,
    };
    if let Some(seed) = seed {
        solver = solver.with_random_seed(seed);
    }
    Ok(solver)
}
