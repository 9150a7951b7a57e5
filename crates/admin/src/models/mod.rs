//! Domain models for the admin panel.

pub mod delete;
pub mod product;
pub mod product_form;
pub mod session;

pub use delete::PendingDelete;
pub use product::{AdminProduct, ProductFields};
pub use product_form::{FormError, ProductForm};
