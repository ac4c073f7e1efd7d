//! Stock counts by product name.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::render::{ListId, NullRenderer, Renderer};

/// A product and how many are on hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Name, used as the lookup and merge key.
    pub name: String,
    /// Units on hand.
    pub quantity: u32,
}

impl Product {
    /// Create a product record.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }

    /// Overwrite the quantity on hand.
    pub fn update_quantity(&mut self, new_quantity: u32) {
        self.quantity = new_quantity;
    }

    fn describe(&self) -> String {
        format!("{} - Quantity: {}", self.name, self.quantity)
    }
}

/// Parse a quantity typed into a form field.
///
/// Surrounding whitespace is ignored. Anything that is not a non-negative
/// base-10 integer is rejected.
///
/// # Errors
///
/// Returns [`Error::InvalidQuantity`] carrying the raw value.
pub fn parse_quantity(raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| Error::invalid_quantity(raw))
}

/// Products in the order they were first added.
#[derive(Debug, Default, Serialize)]
pub struct Inventory<R: Renderer = NullRenderer> {
    products: Vec<Product>,
    #[serde(skip)]
    renderer: R,
}

impl<R: Renderer> Inventory<R> {
    /// Create an empty inventory rendering through `renderer`.
    pub fn new(renderer: R) -> Self {
        Self {
            products: Vec::new(),
            renderer,
        }
    }

    /// All products in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The renderer this inventory draws into.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Add stock. A product whose name already exists absorbs the new
    /// quantity instead of being listed twice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QuantityOverflow`] if the merged count does not fit;
    /// the existing count is left untouched.
    pub fn add_product(&mut self, product: Product) -> Result<()> {
        if let Some(existing) = self
            .products
            .iter_mut()
            .find(|existing| existing.name == product.name)
        {
            let merged = existing
                .quantity
                .checked_add(product.quantity)
                .ok_or_else(|| Error::QuantityOverflow {
                    name: product.name.clone(),
                    current: existing.quantity,
                    added: product.quantity,
                })?;
            debug!(
                "Merging {} into {}: {} -> {}",
                product.quantity, existing.name, existing.quantity, merged
            );
            existing.update_quantity(merged);
        } else {
            debug!("Adding product {} ({})", product.name, product.quantity);
            self.products.push(product);
        }
        self.display_products();
        Ok(())
    }

    /// Overwrite the quantity of the product with this name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProductNotFound`] if no product has this name.
    pub fn update_product_quantity(&mut self, name: &str, new_quantity: u32) -> Result<()> {
        let Some(product) = self.products.iter_mut().find(|product| product.name == name) else {
            warn!("Product not found: {}", name);
            return Err(Error::product_not_found(name));
        };
        product.update_quantity(new_quantity);
        debug!("Set {} quantity to {}", name, new_quantity);
        self.display_products();
        Ok(())
    }

    /// First product with this exact name.
    #[must_use]
    pub fn find_product_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.name == name)
    }

    /// Render every product with its quantity.
    pub fn display_products(&mut self) {
        let items: Vec<String> = self.products.iter().map(Product::describe).collect();
        self.renderer.render_list(ListId::Inventory, &items);
    }
}
