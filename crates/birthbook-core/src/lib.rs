#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]

pub mod age;
pub mod models;
pub mod search;
pub mod store;

pub use crate::age::*;
pub use crate::models::*;
pub use crate::search::*;
pub use crate::store::*;
