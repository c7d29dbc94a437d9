use indexmap::IndexMap;
use indexmap::map::Entry;

use stockroom_core::{CatalogError, CatalogResult, ProductId};

use crate::product::Product;
use crate::snapshot::{CategoriesSnapshot, ProductsSnapshot};

/// In-memory catalog: the product table plus the category registry.
///
/// The registry stores product ids, not product copies, so both views always
/// agree on a product's fields. Invariants:
/// - product ids are unique within `products`;
/// - every product's id is listed exactly once under its `category`;
/// - every id listed under a category names a product of that category.
///
/// Mutation goes only through the methods in [`crate::operations`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) products: Vec<Product>,
    pub(crate) categories: IndexMap<String, Vec<ProductId>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All products, in insertion order.
    pub fn list_products(&self) -> &[Product] {
        &self.products
    }

    /// Linear scan; the first match wins.
    pub fn get_product(&self, id: &ProductId) -> CatalogResult<&Product> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.clone()))
    }

    /// Category names, in creation order.
    pub fn list_categories(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    /// Products filed under `name`. An unknown name is an error; a known empty
    /// category yields an empty list.
    pub fn get_products_by_category(&self, name: &str) -> CatalogResult<Vec<&Product>> {
        let ids = self
            .categories
            .get(name)
            .ok_or_else(|| CatalogError::CategoryNotFound(name.to_string()))?;

        Ok(ids
            .iter()
            .filter_map(|id| self.products.iter().find(|p| &p.id == id))
            .collect())
    }

    pub fn contains_product(&self, id: &ProductId) -> bool {
        self.products.iter().any(|p| &p.id == id)
    }

    pub fn contains_category(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    pub(crate) fn position(&self, id: &ProductId) -> Option<usize> {
        self.products.iter().position(|p| &p.id == id)
    }

    /// Rebuild a catalog from the two persisted structures, repairing any
    /// disagreement between them.
    ///
    /// The product snapshot is authoritative for product records. The category
    /// snapshot contributes category order, empty categories and per-category
    /// product order.
    pub fn from_snapshot(products: ProductsSnapshot, categories: CategoriesSnapshot) -> Self {
        let mut catalog = Catalog::new();

        for product in products.products {
            if catalog.contains_product(&product.id) {
                tracing::warn!(product_id = %product.id, "dropping duplicate product from snapshot");
                continue;
            }
            catalog.products.push(product);
        }

        for (name, listed) in categories.categories {
            let mut ids: Vec<ProductId> = Vec::with_capacity(listed.len());
            for entry in listed {
                let belongs = catalog
                    .products
                    .iter()
                    .any(|p| p.id == entry.id && p.category == name);
                if !belongs {
                    tracing::warn!(
                        product_id = %entry.id,
                        category = %name,
                        "dropping stale category entry from snapshot"
                    );
                    continue;
                }
                if ids.contains(&entry.id) {
                    continue;
                }
                ids.push(entry.id);
            }
            catalog.categories.insert(name, ids);
        }

        for product in &catalog.products {
            let ids = match catalog.categories.entry(product.category.clone()) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => {
                    tracing::warn!(category = %product.category, "restoring category missing from snapshot");
                    e.insert(Vec::new())
                }
            };
            if !ids.contains(&product.id) {
                tracing::warn!(
                    product_id = %product.id,
                    category = %product.category,
                    "filing product under its category"
                );
                ids.push(product.id.clone());
            }
        }

        catalog
    }

    /// Serializable copies of both structures.
    pub fn snapshot(&self) -> (ProductsSnapshot, CategoriesSnapshot) {
        (self.products_snapshot(), self.categories_snapshot())
    }

    pub fn products_snapshot(&self) -> ProductsSnapshot {
        ProductsSnapshot {
            products: self.products.clone(),
        }
    }

    pub fn categories_snapshot(&self) -> CategoriesSnapshot {
        let categories = self
            .categories
            .iter()
            .map(|(name, ids)| {
                let products = ids
                    .iter()
                    .filter_map(|id| self.products.iter().find(|p| &p.id == id).cloned())
                    .collect();
                (name.clone(), products)
            })
            .collect();
        CategoriesSnapshot { categories }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::product::Rating;

    pub(crate) fn product(id: &str, category: &str, stock: u64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("title-{id}"),
            price: 1.5,
            description: String::new(),
            category: category.to_string(),
            image: "www.imageurl.com".to_string(),
            rating: Rating { rate: 4.0, count: 1 },
            stock,
        }
    }

    /// Checks the dual-structure invariants.
    pub(crate) fn assert_consistent(catalog: &Catalog) {
        for (i, p) in catalog.products.iter().enumerate() {
            assert!(
                !catalog.products[..i].iter().any(|q| q.id == p.id),
                "duplicate id {}",
                p.id
            );
            let ids = catalog
                .categories
                .get(&p.category)
                .unwrap_or_else(|| panic!("category {} missing", p.category));
            assert_eq!(ids.iter().filter(|id| **id == p.id).count(), 1);
        }
        for (name, ids) in &catalog.categories {
            for id in ids {
                let p = catalog.get_product(id).expect("dangling category entry");
                assert_eq!(&p.category, name);
            }
        }
    }

    #[test]
    fn unknown_category_differs_from_empty_one() {
        let mut catalog = Catalog::new();
        catalog.categories.insert("yarn".into(), Vec::new());

        assert!(catalog.get_products_by_category("yarn").unwrap().is_empty());
        assert_eq!(
            catalog.get_products_by_category("wool").unwrap_err(),
            CatalogError::CategoryNotFound("wool".into())
        );
    }

    #[test]
    fn from_snapshot_repairs_both_structures() {
        let p1 = product("p1", "yarn", 3);
        let p2 = product("p2", "needles", 1);
        let ghost = product("ghost", "yarn", 9);

        let products = ProductsSnapshot {
            products: vec![p1.clone(), p2.clone(), p1.clone()],
        };
        let mut categories = CategoriesSnapshot::default();
        categories
            .categories
            .insert("yarn".into(), vec![ghost, p1.clone(), p1.clone()]);
        categories.categories.insert("empty".into(), vec![]);

        let catalog = Catalog::from_snapshot(products, categories);

        assert_eq!(catalog.list_products().len(), 2);
        assert_eq!(catalog.list_categories(), vec!["yarn", "empty", "needles"]);
        assert_eq!(
            catalog.get_products_by_category("yarn").unwrap(),
            vec![&p1]
        );
        assert_eq!(
            catalog.get_products_by_category("needles").unwrap(),
            vec![&p2]
        );
        assert!(catalog.get_products_by_category("empty").unwrap().is_empty());
        assert_consistent(&catalog);
    }

    #[test]
    fn entry_under_wrong_category_is_refiled() {
        let p1 = product("p1", "yarn", 3);
        let mut categories = CategoriesSnapshot::default();
        categories.categories.insert("wool".into(), vec![p1.clone()]);

        let catalog = Catalog::from_snapshot(
            ProductsSnapshot {
                products: vec![p1.clone()],
            },
            categories,
        );

        assert!(catalog.get_products_by_category("wool").unwrap().is_empty());
        assert_eq!(catalog.get_products_by_category("yarn").unwrap(), vec![&p1]);
        assert_consistent(&catalog);
    }

    #[test]
    fn snapshot_inlines_current_product_records() {
        let mut catalog = Catalog::new();
        catalog.products.push(product("p1", "yarn", 5));
        catalog
            .categories
            .insert("yarn".into(), vec![ProductId::new("p1")]);
        catalog.products[0].stock = 2;

        let (products, categories) = catalog.snapshot();
        assert_eq!(products.products[0].stock, 2);
        assert_eq!(categories.categories["yarn"][0].stock, 2);

        let rebuilt = Catalog::from_snapshot(products, categories);
        assert_eq!(rebuilt.list_products(), catalog.list_products());
        assert_eq!(rebuilt.list_categories(), catalog.list_categories());
    }
}
