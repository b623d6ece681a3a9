pub mod errors;
pub mod users;
