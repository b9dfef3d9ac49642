//! End-to-end solve: validation, matrix, assignment, split, construction,
//! improvement, and reporting.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::aco::{AcoConfig, AntColony};
use crate::alns::{Alns, AlnsConfig};
use crate::assignment::{assign_to_depots, split_assignment, Group};
use crate::constructive::{Greedy, RouteConstructor};
use crate::distance::DistanceMatrix;
use crate::error::SolveError;
use crate::evaluation::SolutionChecker;
use crate::local_search::{LocalSearch, LocalSearchConfig};
use crate::models::{Coordinate, SubProblem};
use crate::provider::{ExternalCpSolver, MatrixProvider, ProviderError, TripGeometryProvider};

use super::response::trip_metrics;
use super::{
    GroupReport, Method, SolveBudget, SolvePlan, SolveRequest, SolveResponse, VehicleTrip,
};

/// Tuning for the algorithms the orchestrator runs.
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    /// ACO parameters.
    pub aco: AcoConfig,
    /// ALNS parameters.
    pub alns: AlnsConfig,
    /// Local search pass caps.
    pub local_search: LocalSearchConfig,
    /// Wall-clock limit applied by [`Orchestrator::solve`].
    pub time_limit: Option<Duration>,
}

impl OrchestratorConfig {
    /// Sets ACO parameters.
    #[must_use]
    pub fn with_aco(mut self, aco: AcoConfig) -> Self {
        self.aco = aco;
        self
    }

    /// Sets ALNS parameters.
    #[must_use]
    pub fn with_alns(mut self, alns: AlnsConfig) -> Self {
        self.alns = alns;
        self
    }

    /// Sets local search pass caps.
    #[must_use]
    pub fn with_local_search(mut self, local_search: LocalSearchConfig) -> Self {
        self.local_search = local_search;
        self
    }

    /// Sets the wall-clock limit.
    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// Runs solve requests against a matrix provider and a trip provider.
///
/// Each call owns its working state, so one orchestrator can serve
/// concurrent requests when its providers are `Sync`.
///
/// # Examples
///
/// ```
/// use u_mdvrp::models::Coordinate;
/// use u_mdvrp::pipeline::{Method, Orchestrator, SolveRequest};
/// use u_mdvrp::provider::{EuclideanMatrixProvider, NoTrips};
///
/// let orchestrator = Orchestrator::new(EuclideanMatrixProvider::default(), NoTrips);
/// let request = SolveRequest::new(
///     vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 10.0)],
///     vec![Coordinate::new(0.0, 1.0), Coordinate::new(0.0, 9.0)],
/// )
/// .with_method(Method::Greedy);
///
/// let response = orchestrator.solve(&request).unwrap();
/// assert_eq!(response.routes, vec![vec![2], vec![3]]);
/// assert_eq!(response.makespan_matrix, 1.0);
/// assert_eq!(response.makespan_real, None);
/// ```
pub struct Orchestrator<M, T> {
    matrix_provider: M,
    trip_provider: T,
    cp_solver: Option<Box<dyn ExternalCpSolver + Send + Sync>>,
    config: OrchestratorConfig,
}

impl<M: fmt::Debug, T: fmt::Debug> fmt::Debug for Orchestrator<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("matrix_provider", &self.matrix_provider)
            .field("trip_provider", &self.trip_provider)
            .field("cp_solver", &self.cp_solver.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl<M: MatrixProvider, T: TripGeometryProvider> Orchestrator<M, T> {
    /// Creates an orchestrator with default configuration and no external
    /// backend.
    pub fn new(matrix_provider: M, trip_provider: T) -> Self {
        Self {
            matrix_provider,
            trip_provider,
            cp_solver: None,
            config: OrchestratorConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Enables [`Method::Ortools`] through `solver`.
    #[must_use]
    pub fn with_cp_solver(mut self, solver: impl ExternalCpSolver + Send + Sync + 'static) -> Self {
        self.cp_solver = Some(Box::new(solver));
        self
    }

    /// The configuration.
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Solves `request` within the configured time limit.
    ///
    /// # Errors
    ///
    /// See [`solve_with_budget`](Self::solve_with_budget).
    pub fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError> {
        let budget = match self.config.time_limit {
            Some(limit) => SolveBudget::unlimited().with_time_limit(limit),
            None => SolveBudget::unlimited(),
        };
        self.solve_with_budget(request, &budget)
    }

    /// Solves `request`, stopping early when `budget` runs out.
    ///
    /// # Errors
    ///
    /// - [`SolveError::Validation`] for malformed requests
    /// - [`SolveError::Infeasible`] when stock or capacity cannot cover a stop
    /// - [`SolveError::Provider`] when the matrix or a trip cannot be fetched
    /// - [`SolveError::BackendUnavailable`] / [`SolveError::Backend`] for
    ///   [`Method::Ortools`]
    /// - [`SolveError::Cancelled`] when the budget runs out before every
    ///   group is routed
    /// - [`SolveError::Unexpected`] for internal faults
    pub fn solve_with_budget(
        &self,
        request: &SolveRequest,
        budget: &SolveBudget,
    ) -> Result<SolveResponse, SolveError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.run(request, budget))).unwrap_or_else(
            |payload| {
                let message = panic_message(payload.as_ref());
                error!("solve panicked: {message}");
                Err(SolveError::Unexpected { message })
            },
        )
    }

    fn run(&self, request: &SolveRequest, budget: &SolveBudget) -> Result<SolveResponse, SolveError> {
        let plan = request.validate()?;
        let layout = plan.instance.layout();
        let seed = plan.seed.unwrap_or_else(rand::random);
        info!(
            "solving {} stops from {} depots with {} (improve: {:?}, seed {seed})",
            layout.stop_count(),
            layout.depot_count(),
            plan.method,
            plan.improve
        );

        let matrix = self.matrix_provider.matrix(&plan.coordinates)?;
        if matrix.size() != plan.coordinates.len() {
            return Err(ProviderError::DimensionMismatch {
                expected: plan.coordinates.len(),
                actual: matrix.size(),
            }
            .into());
        }

        let assignment = assign_to_depots(&matrix, &plan.instance)?;
        let groups = split_assignment(&matrix, &plan.instance, &assignment)?;
        debug!("{} groups after capacity split", groups.len());

        if plan.method == Method::Ortools && self.cp_solver.is_none() {
            return Err(SolveError::BackendUnavailable {
                method: Method::Ortools.as_str(),
            });
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let local_search = LocalSearch::new(self.config.local_search.clone());
        let mut routes = vec![Vec::new(); layout.depot_count()];
        let mut routed = Vec::with_capacity(groups.len());
        let mut reports = Vec::with_capacity(groups.len());
        let mut improve_accepted = false;

        for group in groups {
            if budget.is_exhausted() {
                info!("budget exhausted with {} groups routed", routed.len());
                return Err(SolveError::Cancelled);
            }
            let mut sequence = self.route_group(&plan, &matrix, &group, budget, &mut rng)?;
            if let Some(neighborhood) = plan.improve {
                let outcome = local_search.improve(
                    neighborhood,
                    std::slice::from_ref(&sequence),
                    &matrix,
                    &[group.depot],
                    budget,
                );
                improve_accepted |= outcome.improved();
                sequence = outcome.routes.into_iter().next().unwrap_or_default();
            }

            reports.push(GroupReport {
                vehicle: group.vehicle_id,
                depot: group.depot,
                stops: sequence.clone(),
                load: group.load,
                cost: matrix.path_cost(group.depot, &sequence),
            });
            routes[group.vehicle_id].extend_from_slice(&sequence);
            routed.push(Group {
                stops: sequence,
                ..group
            });
        }

        let violations = SolutionChecker::new(&plan.instance).check(&routes, &routed);
        if !violations.is_empty() {
            error!("solution failed checks: {violations:?}");
            return Err(SolveError::Unexpected {
                message: format!("solution violates {} constraint(s)", violations.len()),
            });
        }

        let vehicle_costs: Vec<f64> = plan
            .instance
            .vehicles()
            .iter()
            .map(|v| matrix.path_cost(v.depot_id(), &routes[v.id()]))
            .collect();
        let makespan_matrix = vehicle_costs.iter().copied().fold(0.0, f64::max);

        let trips = if plan.include_trips {
            self.fetch_trips(&plan, &routes)?
        } else {
            None
        };
        let (makespan_real, totals) = match &trips {
            Some(trips) => {
                let (makespan, totals) = trip_metrics(trips);
                (Some(makespan), Some(totals))
            }
            None => (None, None),
        };

        info!("solved: makespan {makespan_matrix:.3}, improvement accepted: {improve_accepted}");
        Ok(SolveResponse {
            method: plan.method,
            improve: plan.improve,
            seed,
            routes,
            groups: reports,
            assignment: assignment.as_map().clone(),
            vehicle_costs,
            makespan_matrix,
            makespan_real,
            trips: trips.unwrap_or_default(),
            totals,
            vehicle_caps: plan.instance.vehicles().iter().map(|v| v.capacity()).collect(),
            improve_accepted,
        })
    }

    fn route_group(
        &self,
        plan: &SolvePlan,
        matrix: &DistanceMatrix,
        group: &Group,
        budget: &SolveBudget,
        rng: &mut StdRng,
    ) -> Result<Vec<usize>, SolveError> {
        let depots = [group.depot];
        let problem = SubProblem::new(matrix, &depots, &group.stops);
        let solution = match plan.method {
            Method::Greedy => Greedy.construct(&problem, budget, rng),
            Method::Aco => AntColony::new(self.config.aco.clone()).construct(&problem, budget, rng),
            Method::Alns => Alns::new(self.config.alns.clone()).construct(&problem, budget, rng),
            Method::Ortools => return self.route_with_backend(plan, &problem, group),
        };
        Ok(solution.into_sequences().into_iter().next().unwrap_or_default())
    }

    fn route_with_backend(
        &self,
        plan: &SolvePlan,
        problem: &SubProblem<'_>,
        group: &Group,
    ) -> Result<Vec<usize>, SolveError> {
        let solver = self.cp_solver.as_ref().ok_or(SolveError::BackendUnavailable {
            method: Method::Ortools.as_str(),
        })?;
        let demands: Vec<f64> = group
            .stops
            .iter()
            .map(|&s| plan.instance.demand_of(s))
            .collect();
        let capacity = plan.instance.vehicles()[group.vehicle_id].capacity();
        let sequence = solver
            .solve_group(problem, &demands, capacity)
            .map_err(|e| SolveError::Backend { message: e.message })?;

        let mut expected = group.stops.clone();
        let mut actual = sequence.clone();
        expected.sort_unstable();
        actual.sort_unstable();
        if expected != actual {
            return Err(SolveError::Backend {
                message: format!(
                    "backend returned {} stops that do not match the group of {}",
                    sequence.len(),
                    group.stops.len()
                ),
            });
        }
        Ok(sequence)
    }

    /// `Ok(None)` when the trip provider does not offer trips.
    fn fetch_trips(
        &self,
        plan: &SolvePlan,
        routes: &[Vec<usize>],
    ) -> Result<Option<Vec<VehicleTrip>>, ProviderError> {
        let mut trips = Vec::new();
        for vehicle in plan.instance.vehicles() {
            let route = &routes[vehicle.id()];
            if route.is_empty() {
                continue;
            }
            let depot = plan.coordinates[vehicle.depot_id()];
            let stops: Vec<Coordinate> = route.iter().map(|&n| plan.coordinates[n]).collect();
            match self.trip_provider.trip(depot, &stops) {
                Ok(summary) => trips.push(VehicleTrip {
                    vehicle: vehicle.id(),
                    summary,
                }),
                Err(ProviderError::Unsupported) => {
                    debug!("trip provider does not support trips; skipping");
                    return Ok(None);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(Some(trips))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "solver panicked".to_string()
    }
}
