use anyhow::Result;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::info;

use crate::board::service::BoardService;
use crate::core::config::{Config, InputConfig};
use crate::core::error::{AppError, AppResult};
use crate::core::types::{Board, BoardStatus};

pub struct App {
    config: Config,
    board_service: BoardService,
}

/// Outcome of one checking pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub public: usize,
    pub private: usize,
}

impl Summary {
    fn of(boards: &[Board]) -> Self {
        let public = boards
            .iter()
            .filter(|board| board.status == BoardStatus::Public)
            .count();
        Self {
            total: boards.len(),
            public,
            private: boards.len() - public,
        }
    }
}

impl App {
    pub fn new(config: Config) -> Self {
        info!("Initializing board checker");

        Self {
            config,
            board_service: BoardService::new(),
        }
    }

    /// Read the configured input, validate it and write canonical JSON to stdout.
    pub async fn run(self) -> Result<()> {
        let input = self.read_input().await?;
        let (output, summary) = self.check(&input)?;

        let mut stdout = tokio::io::stdout();
        stdout.write_all(output.as_bytes()).await.map_err(AppError::from)?;
        stdout.write_all(b"\n").await.map_err(AppError::from)?;
        stdout.flush().await.map_err(AppError::from)?;

        info!(
            total = summary.total,
            public = summary.public,
            private = summary.private,
            "Boards validated"
        );

        Ok(())
    }

    /// Validate a document and render its canonical form.
    pub fn check(&self, input: &str) -> AppResult<(String, Summary)> {
        let boards = self.board_service.parse_boards(input)?;
        let output = self.board_service.to_json(&boards, self.config.output.pretty)?;
        Ok((output, Summary::of(&boards)))
    }

    pub async fn read_input(&self) -> AppResult<String> {
        let bytes = match &self.config.input {
            InputConfig::File(path) => {
                info!("Reading boards from {}", path.display());
                tokio::fs::read(path).await?
            }
            InputConfig::Stdin => {
                info!("Reading boards from stdin");
                let mut buf = Vec::new();
                tokio::io::stdin().read_to_end(&mut buf).await?;
                buf
            }
        };
        decode_input(bytes)
    }
}

fn decode_input(bytes: Vec<u8>) -> AppResult<String> {
    String::from_utf8(bytes)
        .map_err(|e| AppError::InvalidRequest(format!("input is not valid UTF-8: {e}")))
}
