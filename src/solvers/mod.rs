pub mod utils;

mod brute_force;
pub use brute_force::BruteForceSolver;

mod optimized;
pub use optimized::OptimizedSolver;

mod knapsack;
pub use knapsack::{Knapsack, KnapsackSolver};

mod custom;
pub use custom::CustomSolver;

use enum_dispatch::enum_dispatch;
use itertools::Itertools;
use log::debug;
use std::str::FromStr;

use crate::combinations::Generation;
use crate::DisplayError;
pub use crate::model::{Package, PackageSpecification, Product};

/// Closed set of interchangeable strategies. The named ones are exact and
/// agree on the value of the best package of every valid specification.
#[enum_dispatch]
#[derive(Debug, Clone)]
pub enum Solver {
    BruteForce(BruteForceSolver),
    Optimized(OptimizedSolver),
    Knapsack(KnapsackSolver),
    Custom(CustomSolver),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Methods {
    BruteForce,
    Optimized,
    Knapsack,
}

impl Methods {
    const ALL: [Methods; 3] = [Methods::BruteForce, Methods::Optimized, Methods::Knapsack];

    pub fn name(self) -> &'static str {
        match self {
            Methods::BruteForce => "brute-force",
            Methods::Optimized => "optimized",
            Methods::Knapsack => "knapsack",
        }
    }
}

impl FromStr for Methods {
    type Err = DisplayError;
    fn from_str(name: &str) -> Result<Methods, DisplayError> {
        Self::ALL
            .iter()
            .copied()
            .find(|method| method.name() == name)
            .ok_or_else(|| {
                format!(
                    "Method {:?} not found, following are valid: {}.",
                    name,
                    Self::ALL.iter().map(|method| method.name()).join(", ")
                )
                .into()
            })
    }
}

#[enum_dispatch(Solver)]
pub trait SolverTrait {
    /// Best package of a valid specification: maximal total price, then
    /// minimal total weight. `None` only when the solver cannot handle the
    /// specification at all.
    fn find_best(&self, specification: &PackageSpecification) -> Option<Package>;
}

impl Solver {
    pub fn from_method(method: Methods, generation: Generation) -> Solver {
        match method {
            Methods::BruteForce => Solver::BruteForce(BruteForceSolver()),
            Methods::Optimized => Solver::Optimized(OptimizedSolver { generation }),
            Methods::Knapsack => Solver::Knapsack(KnapsackSolver()),
        }
    }

    pub fn custom<F>(find: F) -> Solver
    where
        F: Fn(&PackageSpecification) -> Option<Package> + Send + Sync + 'static,
    {
        Solver::Custom(CustomSolver::new(find))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Solver::BruteForce(_) => Methods::BruteForce.name(),
            Solver::Optimized(_) => Methods::Optimized.name(),
            Solver::Knapsack(_) => Methods::Knapsack.name(),
            Solver::Custom(_) => "custom",
        }
    }
}

impl Default for Solver {
    fn default() -> Self {
        Solver::Optimized(OptimizedSolver::default())
    }
}

/// Runs one selection with an explicitly chosen solver.
pub fn find_best_package(
    specification: &PackageSpecification,
    solver: &Solver,
) -> Option<Package> {
    let package = solver.find_best(specification);
    debug!(
        "{} solver picked {:?} out of {} products (capacity {})",
        solver.name(),
        package.as_ref().map(Package::ids),
        specification.len(),
        specification.capacity()
    );
    package
}
