use crate::domain::Shop;

/// Custom actions for Shop entities.
#[derive(Debug, Clone)]
pub enum ShopAction {
    /// Adds a product id to the serviceable list unless it is already there.
    ///
    /// The contains-check and the append happen in one actor turn, so
    /// concurrent attaches on the same shop cannot overwrite each other.
    AttachProduct(String),
}

/// Results from ShopActions - variants match 1:1 with ShopAction
#[derive(Debug, Clone)]
pub enum ShopActionResult {
    /// The shop after the attach, and whether its list changed.
    AttachProduct { shop: Shop, changed: bool },
}
