use super::{utils::exceeds_product_limit, Package, PackageSpecification, SolverTrait};
use crate::combinations::Combination;
use crate::model::{Product, Totals};
use log::{debug, trace};
use ordered_float::OrderedFloat;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct KnapsackSolver();

impl SolverTrait for KnapsackSolver {
    fn find_best(&self, specification: &PackageSpecification) -> Option<Package> {
        if exceeds_product_limit(specification, "knapsack") {
            return None;
        }
        let combination =
            Knapsack::new(specification.products()).find_optimal(specification.capacity());
        Some(Package::from_combination(specification, combination))
    }
}

/// Products picked from a suffix of the specification. `totals.weight` is
/// the weight of the whole package, decided prefix included, `totals.price`
/// only counts the suffix.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Selection {
    totals: Totals,
    indexes: Combination,
}

impl Selection {
    fn nothing_more(used: f64) -> Selection {
        Selection {
            totals: Totals {
                weight: used,
                price: 0.0,
            },
            indexes: Combination::empty(),
        }
    }

    fn with(self, product: &Product, index: usize) -> Selection {
        Selection {
            totals: Totals {
                price: product.price + self.totals.price,
                ..self.totals
            },
            indexes: self.indexes.with(index),
        }
    }

    fn better_of(including: Selection, excluding: Selection) -> Selection {
        if including.totals.is_at_least_as_good(&excluding.totals) {
            including
        } else {
            excluding
        }
    }
}

/// 0/1 knapsack as a memoized recursion over (first undecided product,
/// weight used by the decided ones).
///
/// Used weight is summed from 0.0 in index order, the same way
/// `Totals::of` sums a package, so a product fits here exactly when the
/// finished package weighs no more than the capacity.
///
/// The memo is keyed on the exact used weight. That only pays off because
/// weights are short decimals and the same partial sums come back again and
/// again. Inputs with arbitrary precision would need weights rescaled to
/// integers first.
///
/// Recursion depth equals the number of products.
pub struct Knapsack<'a> {
    products: &'a [Product],
    capacity: f64,
    cache: HashMap<(usize, OrderedFloat<f64>), Selection>,
}

impl<'a> Knapsack<'a> {
    pub fn new(products: &'a [Product]) -> Knapsack<'a> {
        Knapsack {
            products,
            capacity: 0.0,
            cache: HashMap::new(),
        }
    }

    /// Indexes of the most valuable products fitting into `capacity`, the
    /// lightest such selection on equal value. The memo lives for this call only.
    pub fn find_optimal(&mut self, capacity: f64) -> Combination {
        debug_assert!(self.products.len() <= Combination::CAPACITY);
        debug!("knapsack: capacity {}, products {:?}", capacity, self.products);
        self.capacity = capacity;
        let best = self.best(0, 0.0);
        let memo = std::mem::take(&mut self.cache);
        debug!(
            "knapsack: best {} (price {}, weight {}) after {} memoized states",
            best.indexes,
            best.totals.price,
            best.totals.weight,
            memo.len()
        );
        best.indexes
    }

    pub fn memoized_states(&self) -> usize {
        self.cache.len()
    }

    fn best(&mut self, index: usize, used: f64) -> Selection {
        let key = (index, OrderedFloat(used));
        if let Some(&selection) = self.cache.get(&key) {
            return selection;
        }
        let selection = self.solve(index, used);
        self.cache.insert(key, selection);
        selection
    }

    fn solve(&mut self, index: usize, used: f64) -> Selection {
        let product = match self.products.get(index) {
            Some(&product) => product,
            None => return Selection::nothing_more(used),
        };
        let excluding = self.best(index + 1, used);
        let with_product = used + product.weight;
        if with_product > self.capacity {
            return excluding;
        }
        let including = self.best(index + 1, with_product).with(&product, index);
        let best = Selection::better_of(including, excluding);
        trace!(
            "knapsack: best({}, {}) = {} price {}",
            index,
            used,
            best.indexes,
            best.totals.price
        );
        best
    }
}
