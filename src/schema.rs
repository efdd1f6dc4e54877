// src/schema.rs
//! Table and column identifiers for SQL that is assembled at runtime.
//! Anything that ends up interpolated into a query string must come from
//! here, never from request input.

pub const CATEGORIES: &str = "categories";
pub const CUSTOMERS: &str = "customers";
pub const ORDERS: &str = "orders";
pub const PAYMENTS: &str = "payments";
pub const PRODUCTS: &str = "products";
pub const SUPPLIERS: &str = "suppliers";
pub const USERS: &str = "users";

pub mod col {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const BARCODE: &str = "barcode";
    pub const ORDER_NUMBER: &str = "order_number";
}
