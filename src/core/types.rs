use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::AppError;

/// Visibility of a board. Serialized as its literal, never as an ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BoardStatus {
    #[default]
    #[serde(rename = "PUBLIC")]
    Public,
    #[serde(rename = "PRIVATE")]
    Private,
}

impl BoardStatus {
    pub const ALL: [BoardStatus; 2] = [BoardStatus::Public, BoardStatus::Private];

    /// Wire literal for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardStatus::Public => "PUBLIC",
            BoardStatus::Private => "PRIVATE",
        }
    }
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoardStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoardStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::InvalidStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Board {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: BoardStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoardRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: BoardStatus,
}
