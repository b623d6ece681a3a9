use birthbook_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("bad_request: {0}")]
    BadRequest(&'static str),
    #[error("not_found")]
    NotFound,
    #[error("store_error: {0}")]
    Store(#[from] StoreError),
}
