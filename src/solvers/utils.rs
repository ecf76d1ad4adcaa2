use super::{Package, PackageSpecification, Product};
use crate::combinations::Combination;
use crate::model::{Totals, MAX_PRODUCTS};
use log::warn;

// Ties keep the last candidate seen, any of them is an acceptable answer.
pub fn best_package(packages: impl Iterator<Item = Package>) -> Option<Package> {
    packages
        .map(|package| (package.totals(), package))
        .max_by(|(a, _), (b, _)| a.compare(b))
        .map(|(_, package)| package)
}

/// Totals of the products picked by `combination`, summed in index order.
pub fn combination_totals(products: &[Product], combination: Combination) -> Totals {
    Totals::of(combination.iter().filter_map(|index| products.get(index)))
}

/// A `Package` holds at most `MAX_PRODUCTS` products, larger
/// specifications get no answer.
pub fn exceeds_product_limit(specification: &PackageSpecification, solver: &str) -> bool {
    let exceeds = specification.len() > MAX_PRODUCTS;
    if exceeds {
        warn!(
            "{} solver cannot select from {} products, the limit is {}",
            solver,
            specification.len(),
            MAX_PRODUCTS
        );
    }
    exceeds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_package_prefers_price_then_weight() {
        let packages = vec![
            Package::new(vec![Product::new(1, 10.0, 40.0)]),
            Package::new(vec![Product::new(2, 6.0, 40.0)]),
            Package::new(vec![Product::new(3, 1.0, 39.0)]),
        ];
        assert_eq!(best_package(packages.into_iter()).unwrap().ids(), vec![2]);
        assert_eq!(best_package(Vec::new().into_iter()), None);
    }

    #[test]
    fn combination_totals_sum_selected_products() {
        let products = [
            Product::new(1, 1.5, 10.0),
            Product::new(2, 2.5, 20.0),
            Product::new(3, 3.5, 30.0),
        ];
        let totals = combination_totals(&products, Combination::empty().with(0).with(2));
        assert_eq!(totals, Totals { weight: 5.0, price: 40.0 });
        assert_eq!(
            combination_totals(&products, Combination::empty()),
            Totals::default()
        );
    }

    #[test]
    fn product_limit() {
        let products = (1..=16)
            .map(|id| Product::new(id, 1.0, 1.0))
            .collect::<Vec<_>>();
        let full = PackageSpecification::new(10.0, products[..MAX_PRODUCTS].to_vec());
        assert!(!exceeds_product_limit(&full, "test"));
        let oversized = PackageSpecification::new(10.0, products);
        assert!(exceeds_product_limit(&oversized, "test"));
    }
}
