//! Usecase layer.

mod result_usecase;

pub use result_usecase::{ResultResolver, ResultUsecase};
