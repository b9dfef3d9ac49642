//! Solve request payload and its validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::local_search::Neighborhood;
use crate::models::{Coordinate, Instance, NodeLayout};

/// Route construction method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Adaptive large neighborhood search.
    #[default]
    Alns,
    /// Nearest-depot, nearest-neighbor greedy.
    Greedy,
    /// Ant colony optimization.
    Aco,
    /// External constraint-programming backend.
    Ortools,
}

impl Method {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alns => "alns",
            Self::Greedy => "greedy",
            Self::Aco => "aco",
            Self::Ortools => "ortools",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ValidationError;

    /// Parses a method name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alns" => Ok(Self::Alns),
            "greedy" => Ok(Self::Greedy),
            "aco" => Ok(Self::Aco),
            "ortools" => Ok(Self::Ortools),
            _ => Err(ValidationError::UnknownMethod(s.to_string())),
        }
    }
}

fn default_method() -> String {
    Method::default().as_str().to_string()
}

fn default_include_trips() -> bool {
    true
}

/// A solve request as received from a caller.
///
/// Coordinates are `[lat, lon]` pairs. Empty `demands`, `depot_stock`, or
/// `vehicle_caps` select the defaults: demand `1.0` per stop, and the total
/// demand for every depot's stock and vehicle capacity.
///
/// # Examples
///
/// ```
/// use u_mdvrp::pipeline::{Method, SolveRequest};
///
/// let request = SolveRequest::from_json(r#"{
///     "depots": [[41.0, 29.0]],
///     "stops": [[41.01, 29.01], [41.02, 29.02]],
///     "method": "greedy",
///     "improve": "2opt"
/// }"#).unwrap();
///
/// let plan = request.validate().unwrap();
/// assert_eq!(plan.method, Method::Greedy);
/// assert_eq!(plan.instance.demands(), &[1.0, 1.0]);
/// assert_eq!(plan.instance.stock(), &[2.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Depot coordinates; at least one.
    #[serde(default)]
    pub depots: Vec<Coordinate>,
    /// Stop coordinates.
    #[serde(default)]
    pub stops: Vec<Coordinate>,
    /// Demand per stop.
    #[serde(default)]
    pub demands: Vec<f64>,
    /// Initial stock per depot.
    #[serde(default)]
    pub depot_stock: Vec<f64>,
    /// Vehicle capacity per depot.
    #[serde(default)]
    pub vehicle_caps: Vec<f64>,
    /// One of `alns`, `greedy`, `aco`, `ortools`.
    #[serde(default = "default_method")]
    pub method: String,
    /// Optional improvement pass: `2opt` or `3opt`.
    #[serde(default)]
    pub improve: Option<String>,
    /// Seed for stochastic methods; drawn at random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Whether to fetch real-road trips for reporting.
    #[serde(default = "default_include_trips")]
    pub include_trips: bool,
}

impl Default for SolveRequest {
    fn default() -> Self {
        Self {
            depots: Vec::new(),
            stops: Vec::new(),
            demands: Vec::new(),
            depot_stock: Vec::new(),
            vehicle_caps: Vec::new(),
            method: default_method(),
            improve: None,
            seed: None,
            include_trips: default_include_trips(),
        }
    }
}

/// A validated request, ready to solve.
#[derive(Debug, Clone)]
pub struct SolvePlan {
    /// Demands, stock, and vehicles with defaults applied.
    pub instance: Instance,
    /// Depot coordinates followed by stop coordinates, by node index.
    pub coordinates: Vec<Coordinate>,
    /// Construction method.
    pub method: Method,
    /// Improvement pass, if any.
    pub improve: Option<Neighborhood>,
    /// Requested seed.
    pub seed: Option<u64>,
    /// Whether to report trips.
    pub include_trips: bool,
}

impl SolveRequest {
    /// Creates a request for the given depots and stops with all defaults.
    pub fn new(depots: Vec<Coordinate>, stops: Vec<Coordinate>) -> Self {
        Self {
            depots,
            stops,
            ..Default::default()
        }
    }

    /// Sets per-stop demands.
    #[must_use]
    pub fn with_demands(mut self, demands: Vec<f64>) -> Self {
        self.demands = demands;
        self
    }

    /// Sets per-depot stock.
    #[must_use]
    pub fn with_depot_stock(mut self, stock: Vec<f64>) -> Self {
        self.depot_stock = stock;
        self
    }

    /// Sets per-depot vehicle capacities.
    #[must_use]
    pub fn with_vehicle_caps(mut self, caps: Vec<f64>) -> Self {
        self.vehicle_caps = caps;
        self
    }

    /// Sets the construction method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method.as_str().to_string();
        self
    }

    /// Sets the improvement pass.
    #[must_use]
    pub fn with_improve(mut self, improve: Neighborhood) -> Self {
        self.improve = Some(improve.as_str().to_string());
        self
    }

    /// Sets the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables trip reporting.
    #[must_use]
    pub fn with_trips(mut self, include: bool) -> Self {
        self.include_trips = include;
        self
    }

    /// Decodes a JSON request.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Malformed`] when the payload is not a
    /// valid request object.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json).map_err(|e| ValidationError::Malformed {
            message: e.to_string(),
        })
    }

    /// Checks the request and applies defaults.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, checking in order:
    /// depots present, coordinates, array lengths, numeric values, method,
    /// improvement mode.
    pub fn validate(&self) -> Result<SolvePlan, ValidationError> {
        if self.depots.is_empty() {
            return Err(ValidationError::NoDepots);
        }
        check_coordinates("depots", &self.depots)?;
        check_coordinates("stops", &self.stops)?;

        let depot_count = self.depots.len();
        let stop_count = self.stops.len();
        check_length("demands", &self.demands, stop_count)?;
        check_length("depot_stock", &self.depot_stock, depot_count)?;
        check_length("vehicle_caps", &self.vehicle_caps, depot_count)?;

        let demands = or_default(&self.demands, stop_count, 1.0);
        check_values("demands", &demands)?;
        let total: f64 = demands.iter().sum();
        let stock = or_default(&self.depot_stock, depot_count, total);
        check_values("depot_stock", &stock)?;
        let caps = or_default(&self.vehicle_caps, depot_count, total);
        check_values("vehicle_caps", &caps)?;

        let method: Method = self.method.parse()?;
        let improve = self
            .improve
            .as_deref()
            .map(|s| {
                s.parse::<Neighborhood>()
                    .map_err(|_| ValidationError::UnknownImprovement(s.to_string()))
            })
            .transpose()?;

        Ok(SolvePlan {
            instance: Instance::new(
                NodeLayout::new(depot_count, stop_count),
                demands,
                stock,
                caps,
            ),
            coordinates: self.depots.iter().chain(&self.stops).copied().collect(),
            method,
            improve,
            seed: self.seed,
            include_trips: self.include_trips,
        })
    }
}

fn check_coordinates(field: &'static str, coords: &[Coordinate]) -> Result<(), ValidationError> {
    match coords.iter().position(|c| !c.is_valid()) {
        Some(index) => Err(ValidationError::InvalidCoordinate { field, index }),
        None => Ok(()),
    }
}

fn check_length(field: &'static str, values: &[f64], expected: usize) -> Result<(), ValidationError> {
    if values.is_empty() || values.len() == expected {
        Ok(())
    } else {
        Err(ValidationError::LengthMismatch {
            field,
            expected,
            actual: values.len(),
        })
    }
}

fn check_values(field: &'static str, values: &[f64]) -> Result<(), ValidationError> {
    match values.iter().position(|v| !v.is_finite() || *v < 0.0) {
        Some(index) => Err(ValidationError::InvalidValue {
            field,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

fn or_default(values: &[f64], len: usize, default: f64) -> Vec<f64> {
    if values.is_empty() {
        vec![default; len]
    } else {
        values.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request() -> SolveRequest {
        SolveRequest::new(
            vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)],
            vec![Coordinate::new(0.0, 0.5), Coordinate::new(0.5, 0.5)],
        )
    }

    #[test]
    fn test_defaults_applied() {
        let plan = request().with_demands(vec![2.0, 3.0]).validate().expect("valid");
        assert_eq!(plan.instance.stock(), &[5.0, 5.0]);
        assert_eq!(plan.instance.vehicles()[1].capacity(), 5.0);
        assert_eq!(plan.method, Method::Alns);
        assert_eq!(plan.improve, None);
        assert_eq!(plan.coordinates.len(), 4);
        assert!(plan.include_trips);
    }

    #[test]
    fn test_json_defaults() {
        let req = SolveRequest::from_json(r#"{"depots": [[0, 0]]}"#).expect("decodes");
        assert_eq!(req.method, "alns");
        assert!(req.include_trips);
        assert!(req.stops.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = SolveRequest::from_json(r#"{"depots": [[0]]}"#).expect_err("pair required");
        assert!(matches!(err, ValidationError::Malformed { .. }));
    }

    #[test]
    fn test_no_depots() {
        let req = SolveRequest::new(vec![], vec![Coordinate::new(0.0, 0.0)]);
        assert_eq!(req.validate().expect_err("no depots"), ValidationError::NoDepots);
    }

    #[rstest]
    #[case(Coordinate::new(91.0, 0.0))]
    #[case(Coordinate::new(0.0, -180.5))]
    #[case(Coordinate::new(f64::NAN, 0.0))]
    fn test_invalid_stop_coordinate(#[case] bad: Coordinate) {
        let mut req = request();
        req.stops[1] = bad;
        assert_eq!(
            req.validate().expect_err("bad coordinate"),
            ValidationError::InvalidCoordinate {
                field: "stops",
                index: 1
            }
        );
    }

    #[test]
    fn test_length_mismatch() {
        let err = request()
            .with_depot_stock(vec![1.0])
            .validate()
            .expect_err("one stock for two depots");
        assert_eq!(
            err,
            ValidationError::LengthMismatch {
                field: "depot_stock",
                expected: 2,
                actual: 1
            }
        );
    }

    #[rstest]
    #[case(vec![1.0, -1.0], 1)]
    #[case(vec![f64::INFINITY, 1.0], 0)]
    fn test_invalid_demand(#[case] demands: Vec<f64>, #[case] index: usize) {
        let err = request().with_demands(demands).validate().expect_err("bad demand");
        assert!(matches!(
            err,
            ValidationError::InvalidValue { field: "demands", index: i, .. } if i == index
        ));
    }

    #[rstest]
    #[case("ALNS", Method::Alns)]
    #[case("greedy", Method::Greedy)]
    #[case("Aco", Method::Aco)]
    #[case("ortools", Method::Ortools)]
    fn test_method_case_insensitive(#[case] name: &str, #[case] expected: Method) {
        let mut req = request();
        req.method = name.to_string();
        assert_eq!(req.validate().expect("valid").method, expected);
    }

    #[test]
    fn test_unknown_method_and_improve() {
        let mut req = request();
        req.method = "tabu".to_string();
        assert_eq!(
            req.validate().expect_err("unknown"),
            ValidationError::UnknownMethod("tabu".to_string())
        );

        let mut req = request();
        req.improve = Some("or-opt".to_string());
        assert_eq!(
            req.validate().expect_err("unknown"),
            ValidationError::UnknownImprovement("or-opt".to_string())
        );
    }

    #[test]
    fn test_zero_stops_is_valid() {
        let req = SolveRequest::new(vec![Coordinate::new(0.0, 0.0)], vec![]);
        let plan = req.validate().expect("valid");
        assert_eq!(plan.instance.stock(), &[0.0]);
        assert_eq!(plan.instance.layout().stop_count(), 0);
    }
}
