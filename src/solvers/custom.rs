use super::{Package, PackageSpecification, SolverTrait};
use std::fmt;
use std::sync::Arc;

type FindFn = dyn Fn(&PackageSpecification) -> Option<Package> + Send + Sync;

/// Externally supplied strategy with the same contract as the built-in ones.
#[derive(Clone)]
pub struct CustomSolver(Arc<FindFn>);

impl CustomSolver {
    pub fn new<F>(find: F) -> CustomSolver
    where
        F: Fn(&PackageSpecification) -> Option<Package> + Send + Sync + 'static,
    {
        CustomSolver(Arc::new(find))
    }
}

impl fmt::Debug for CustomSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomSolver(..)")
    }
}

impl SolverTrait for CustomSolver {
    fn find_best(&self, specification: &PackageSpecification) -> Option<Package> {
        (self.0)(specification)
    }
}
