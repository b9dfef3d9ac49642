//! Property tests over random small instances.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use u_mdvrp::aco::AcoConfig;
use u_mdvrp::alns::{Alns, AlnsConfig};
use u_mdvrp::distance::DistanceMatrix;
use u_mdvrp::error::SolveError;
use u_mdvrp::local_search::{three_opt, two_opt};
use u_mdvrp::models::{Coordinate, SubProblem};
use u_mdvrp::pipeline::{
    Method, Orchestrator, OrchestratorConfig, SolveBudget, SolveRequest, SolveResponse,
};
use u_mdvrp::provider::{EuclideanMatrixProvider, NoTrips};

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (0i32..100, 0i32..100).prop_map(|(a, b)| Coordinate::new(a as f64 / 10.0, b as f64 / 10.0))
}

fn method() -> impl Strategy<Value = Method> {
    prop_oneof![Just(Method::Greedy), Just(Method::Aco), Just(Method::Alns)]
}

/// Demands in tenths, so sums pick up rounding error.
fn demand() -> impl Strategy<Value = f64> {
    (0u32..50).prop_map(|x| f64::from(x) / 10.0)
}

/// Depots, stops, and fractional demands.
fn instance() -> impl Strategy<Value = (Vec<Coordinate>, Vec<Coordinate>, Vec<f64>)> {
    (1usize..4, 0usize..12).prop_flat_map(|(d, n)| {
        (
            prop::collection::vec(coordinate(), d),
            prop::collection::vec(coordinate(), n),
            prop::collection::vec(demand(), n),
        )
    })
}

fn orchestrator() -> Orchestrator<EuclideanMatrixProvider, NoTrips> {
    let config = OrchestratorConfig::default()
        .with_aco(AcoConfig::default().with_ants(4).with_iterations(4))
        .with_alns(AlnsConfig::default().with_max_iterations(25));
    Orchestrator::new(EuclideanMatrixProvider::default(), NoTrips).with_config(config)
}

fn line(n: usize) -> DistanceMatrix {
    let rows = (0..n)
        .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs()).collect())
        .collect();
    DistanceMatrix::from_rows(rows).expect("square")
}

fn makespan(routes: &[Vec<usize>], dm: &DistanceMatrix, depots: &[usize]) -> f64 {
    depots
        .iter()
        .zip(routes)
        .map(|(&d, r)| dm.path_cost(d, r))
        .fold(0.0, f64::max)
}

fn assert_served_once(response: &SolveResponse, depots: usize, stops: usize) {
    let mut served: Vec<usize> = response.routes.iter().flatten().copied().collect();
    served.sort_unstable();
    let expected: Vec<usize> = (depots..depots + stops).collect();
    assert_eq!(served, expected);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_stop_served_once((depots, stops, demands) in instance(), method in method(), seed in any::<u64>()) {
        let (d, n) = (depots.len(), stops.len());
        let request = SolveRequest::new(depots, stops)
            .with_demands(demands)
            .with_method(method)
            .with_seed(seed);
        let response = match orchestrator().solve(&request) {
            Ok(response) => response,
            Err(err) => return Err(TestCaseError::fail(format!("default stock and caps rejected: {err}"))),
        };
        assert_served_once(&response, d, n);
        prop_assert_eq!(response.routes.len(), d);
        prop_assert_eq!(response.assignment.len(), n);
    }

    #[test]
    fn trips_respect_capacity(
        (depots, stops, demands) in instance(),
        extra in 0u32..30,
        method in method()
    ) {
        let d = depots.len();
        let max_demand = demands.iter().copied().fold(0.0, f64::max);
        let caps = vec![max_demand + f64::from(extra) / 10.0; d];
        let request = SolveRequest::new(depots, stops)
            .with_demands(demands.clone())
            .with_vehicle_caps(caps.clone())
            .with_method(method)
            .with_seed(1);
        let response = match orchestrator().solve(&request) {
            Ok(response) => response,
            Err(err) => return Err(TestCaseError::fail(format!("every stop fits a vehicle: {err}"))),
        };
        for group in &response.groups {
            let load: f64 = group.stops.iter().map(|&s| demands[s - d]).sum();
            prop_assert!(load <= caps[group.vehicle] + 1e-9);
            prop_assert!((load - group.load).abs() < 1e-9);
        }
    }

    #[test]
    fn assignment_respects_stock(
        (depots, stops, demands) in instance(),
        stock_tenths in prop::collection::vec(0u32..120, 3)
    ) {
        let d = depots.len();
        let stock: Vec<f64> = stock_tenths[..d].iter().map(|&s| f64::from(s) / 10.0).collect();
        let request = SolveRequest::new(depots, stops)
            .with_demands(demands.clone())
            .with_depot_stock(stock.clone())
            .with_method(Method::Greedy);
        match orchestrator().solve(&request) {
            Ok(response) => {
                let mut used = vec![0.0; d];
                for (&stop, &depot) in &response.assignment {
                    used[depot] += demands[stop - d];
                }
                for (u, s) in used.iter().zip(&stock) {
                    prop_assert!(*u <= *s + 1e-9);
                }
            }
            Err(SolveError::Infeasible(_)) => {}
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    #[test]
    fn two_opt_never_increases_makespan(order in Just((2..10).collect::<Vec<usize>>()).prop_shuffle(), cut in 0usize..8) {
        let dm = line(10);
        let routes = vec![order[..cut].to_vec(), order[cut..].to_vec()];
        let depots = [0, 1];
        let improved = two_opt(&routes, &dm, &depots);
        prop_assert!(makespan(&improved, &dm, &depots) <= makespan(&routes, &dm, &depots) + 1e-9);
    }

    #[test]
    fn three_opt_never_increases_makespan(order in Just((2..10).collect::<Vec<usize>>()).prop_shuffle(), cut in 0usize..8) {
        let dm = line(10);
        let routes = vec![order[..cut].to_vec(), order[cut..].to_vec()];
        let depots = [0, 1];
        let improved = three_opt(&routes, &dm, &depots);
        prop_assert!(makespan(&improved, &dm, &depots) <= makespan(&routes, &dm, &depots) + 1e-9);
        let mut all: Vec<usize> = improved.concat();
        all.sort_unstable();
        prop_assert_eq!(all, (2..10).collect::<Vec<usize>>());
    }

    #[test]
    fn alns_trace_non_increasing(n in 1usize..10, seed in any::<u64>()) {
        let dm = line(n + 2);
        let depots = [0, 1];
        let stops: Vec<usize> = (2..n + 2).collect();
        let problem = SubProblem::new(&dm, &depots, &stops);
        let alns = Alns::new(AlnsConfig::default().with_max_iterations(40));
        let result = alns.run(&problem, &SolveBudget::unlimited(), &mut StdRng::seed_from_u64(seed));
        prop_assert!(result.trace.windows(2).all(|w| w[1] <= w[0]));
        prop_assert_eq!(result.best.num_served(), n);
        prop_assert!((result.best.makespan() - result.best_cost).abs() < 1e-9);
    }
}
