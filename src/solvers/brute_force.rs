use super::{
    utils::{best_package, exceeds_product_limit},
    Package, PackageSpecification, SolverTrait,
};
use itertools::Itertools;
use log::debug;

/// Scores every subset of the products. Reference for the other solvers.
#[derive(Debug, Clone)]
pub struct BruteForceSolver();

impl SolverTrait for BruteForceSolver {
    fn find_best(&self, specification: &PackageSpecification) -> Option<Package> {
        if exceeds_product_limit(specification, "brute force") {
            return None;
        }
        let capacity = specification.capacity();
        let mut feasible = 0usize;
        // 2^15 subsets at most, the empty one is always feasible
        let best = best_package(
            specification
                .products()
                .iter()
                .copied()
                .powerset()
                .map(Package::new)
                .filter(|package| package.total_weight() <= capacity)
                .inspect(|_| feasible += 1),
        );
        debug!(
            "brute force: {} feasible subsets of {} products",
            feasible,
            specification.len()
        );
        best
    }
}
