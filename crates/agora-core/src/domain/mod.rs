//! Domain entities - the core business objects.

mod actor;
mod interaction;
mod product;

pub use actor::Actor;
pub use interaction::{Bid, Comment, Like};
pub use product::{NewProduct, Product, ProductState};
