use super::{
    utils::{best_package, combination_totals, exceeds_product_limit},
    Package, PackageSpecification, SolverTrait,
};
use crate::combinations::{Combination, CombinationsStream, Generation};
use log::{debug, warn};

/// Enumerates only the subsets that fit: a product joins a partial subset
/// when the partial weight plus its own stays within capacity.
#[derive(Debug, Clone, Default)]
pub struct OptimizedSolver {
    pub generation: Generation,
}

impl SolverTrait for OptimizedSolver {
    fn find_best(&self, specification: &PackageSpecification) -> Option<Package> {
        if exceeds_product_limit(specification, "optimized") {
            return None;
        }
        let products = specification.products();
        if products.is_empty() {
            return Some(Package::empty());
        }
        let capacity = specification.capacity();
        let fits = |partial: Combination, index: usize| {
            combination_totals(products, partial).weight + products[index].weight <= capacity
        };
        let stream = match CombinationsStream::new(products.len(), fits) {
            Ok(stream) => stream.with_generation(self.generation),
            Err(e) => {
                warn!("optimized solver cannot enumerate: {}", e);
                return None;
            }
        };

        let mut enumerated = 0usize;
        let best = best_package(
            stream
                .iter()
                .inspect(|_| enumerated += 1)
                .map(|combination| Package::from_combination(specification, combination)),
        );
        debug!(
            "optimized ({:?}): {} feasible subsets of {} products",
            self.generation,
            enumerated,
            products.len()
        );
        best
    }
}
