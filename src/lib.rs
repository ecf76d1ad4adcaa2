use derive_more::{Display, From};

pub mod combinations;
pub mod ioutils;
pub mod model;
pub mod solvers;

pub use combinations::{Combination, CombinationsError, CombinationsStream, Generation};
pub use model::{Package, PackageSpecification, Product, Totals, MAX_PRODUCTS};
pub use solvers::{find_best_package, Methods, Solver, SolverTrait};

#[derive(Display, Debug, From)]
#[display(fmt = "{}", _0)]
pub struct DisplayError(pub String);

impl std::error::Error for DisplayError {}
