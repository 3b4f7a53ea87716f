//! Board record data contract.
//!
//! [`Board`] and [`BoardStatus`] describe the wire shape of a board record;
//! [`BoardService`] is the boundary that turns untrusted JSON into those types.

pub mod board;
pub mod core;

pub use crate::board::service::BoardService;
pub use crate::core::error::{AppError, AppResult};
pub use crate::core::types::{Board, BoardStatus, CreateBoardRequest};
