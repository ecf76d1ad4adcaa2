use crate::combinations::Combination;
use arrayvec::ArrayVec;
use derive_more::Display;
use std::cmp::Ordering;

/// Upper bound on the products of one specification. The solvers rely on it:
/// the power set stays small and the DP recursion stays shallow.
pub const MAX_PRODUCTS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Display)]
#[display(fmt = "({},{},€{})", id, weight, price)]
pub struct Product {
    pub id: u32,
    pub weight: f64,
    pub price: f64,
}

impl Product {
    pub fn new(id: u32, weight: f64, price: f64) -> Product {
        Product { id, weight, price }
    }
}

/// Capacity and the set of candidate products of one selection problem.
///
/// Constructed from already validated data only (see `ioutils::validate`),
/// nothing here checks the bounds again.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageSpecification {
    capacity: f64,
    products: Vec<Product>,
}

impl PackageSpecification {
    pub fn new(capacity: f64, products: Vec<Product>) -> PackageSpecification {
        PackageSpecification { capacity, products }
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Products in input order; the position of a product is its index in a `Combination`.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Total weight and price of a selection, ordered by preference.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub weight: f64,
    pub price: f64,
}

impl Totals {
    pub fn of<'a>(products: impl IntoIterator<Item = &'a Product>) -> Totals {
        // folded from +0.0, float `sum()` may start from -0.0
        products.into_iter().fold(Totals::default(), |totals, product| {
            totals.add(product)
        })
    }

    pub fn add(self, product: &Product) -> Totals {
        Totals {
            weight: self.weight + product.weight,
            price: self.price + product.price,
        }
    }

    /// `Greater` means `self` is the better selection: higher price first,
    /// then lower weight.
    pub fn compare(&self, other: &Totals) -> Ordering {
        match self.price.partial_cmp(&other.price) {
            Some(Ordering::Equal) | None => other
                .weight
                .partial_cmp(&self.weight)
                .unwrap_or(Ordering::Equal),
            Some(ordering) => ordering,
        }
    }

    pub fn is_at_least_as_good(&self, other: &Totals) -> bool {
        self.compare(other) != Ordering::Less
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Package {
    products: ArrayVec<[Product; MAX_PRODUCTS]>,
}

impl Package {
    /// Panics in debug builds on more than `MAX_PRODUCTS` products.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Package {
        let mut members = ArrayVec::new();
        for product in products {
            let pushed = members.try_push(product);
            debug_assert!(
                pushed.is_ok(),
                "a package holds at most {} products",
                MAX_PRODUCTS
            );
        }
        Package { products: members }
    }

    pub fn empty() -> Package {
        Package::default()
    }

    pub fn from_combination(
        specification: &PackageSpecification,
        combination: Combination,
    ) -> Package {
        Package::new(
            combination
                .iter()
                .filter_map(|index| specification.products().get(index).copied()),
        )
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn totals(&self) -> Totals {
        Totals::of(self.products.iter())
    }

    pub fn total_weight(&self) -> f64 {
        self.totals().weight
    }

    pub fn total_price(&self) -> f64 {
        self.totals().price
    }

    pub fn ids(&self) -> Vec<u32> {
        let mut ids = self.products.iter().map(|product| product.id).collect::<Vec<_>>();
        ids.sort_unstable();
        ids
    }
}
