use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::error::{AppError, AppResult};
use crate::core::types::{Board, BoardStatus, CreateBoardRequest};

/// Turns untrusted board documents into typed records and back.
#[derive(Debug, Default, Clone)]
pub struct BoardService;

impl BoardService {
    pub fn new() -> Self {
        Self
    }

    /// Parse a status literal. Matching is exact and case-sensitive.
    pub fn parse_status(&self, raw: &str) -> AppResult<BoardStatus> {
        raw.parse::<BoardStatus>().map_err(|e| {
            warn!(status = raw, "Rejected board status");
            e
        })
    }

    /// Parse a document holding exactly one board object.
    pub fn parse_board(&self, input: &str) -> AppResult<Board> {
        self.board_from_text(input, None)
    }

    /// Parse a document holding either one board object or an array of them.
    pub fn parse_boards(&self, input: &str) -> AppResult<Vec<Board>> {
        let document: Box<RawValue> = serde_json::from_str(input).map_err(|e| {
            warn!("Board document is not valid JSON: {}", e);
            e
        })?;
        let text = document.get().trim_start();

        if text.starts_with('[') {
            let records: Vec<Box<RawValue>> = serde_json::from_str(text)?;
            records
                .iter()
                .enumerate()
                .map(|(index, record)| self.board_from_text(record.get(), Some(index)))
                .collect()
        } else if text.starts_with('{') {
            Ok(vec![self.board_from_text(text, None)?])
        } else {
            let kind = kind_of(&serde_json::from_str::<Value>(text)?);
            warn!("Board document has unexpected top-level {}", kind);
            Err(AppError::InvalidRequest(format!(
                "expected a board object or an array of boards, found {kind}"
            )))
        }
    }

    /// Build a new record with a freshly generated identifier.
    pub fn create_board(&self, request: CreateBoardRequest) -> Board {
        let board = Board {
            id: Uuid::new_v4().to_string(),
            title: request.title,
            description: request.description,
            status: request.status,
        };
        debug!(id = %board.id, status = %board.status, "Created board");
        board
    }

    /// Canonical JSON for a set of boards, always in array form.
    pub fn to_json(&self, boards: &[Board], pretty: bool) -> AppResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(boards)?
        } else {
            serde_json::to_string(boards)?
        };
        Ok(json)
    }

    fn board_from_text(&self, text: &str, index: Option<usize>) -> AppResult<Board> {
        let location = match index {
            Some(i) => format!("record {i}"),
            None => "record".to_string(),
        };

        let board: Board = match serde_json::from_str(text) {
            Ok(board) => board,
            Err(e) => {
                // A well-formed but unknown status literal is a status error, not a shape error.
                if let Ok(StatusField { status }) = serde_json::from_str(text) {
                    if let Err(status_err) = status.parse::<BoardStatus>() {
                        warn!(status = %status, "{} has invalid status", location);
                        return Err(status_err);
                    }
                }
                warn!("{} rejected: {}", location, e);
                return Err(match index {
                    Some(i) => AppError::InvalidRequest(format!("record {i}: {e}")),
                    None => AppError::Serialization(e),
                });
            }
        };

        debug!(id = %board.id, status = %board.status, "Accepted board");
        Ok(board)
    }
}

#[derive(Deserialize)]
struct StatusField {
    status: String,
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPRINT_PLAN: &str =
        r#"{"id": "b1", "title": "Sprint Plan", "description": "Q1 tasks", "status": "PUBLIC"}"#;

    #[test]
    fn test_parse_example_board() {
        let service = BoardService::new();
        let board = service.parse_board(SPRINT_PLAN).unwrap();

        assert_eq!(board.id, "b1");
        assert_eq!(board.title, "Sprint Plan");
        assert_eq!(board.description, "Q1 tasks");
        assert_eq!(board.status, BoardStatus::Public);

        let json = service.to_json(&[board], false).unwrap();
        assert!(json.contains(r#""status":"PUBLIC""#));
    }

    #[test]
    fn test_unknown_status_is_status_error() {
        let service = BoardService::new();
        let err = service
            .parse_board(r#"{"id": "b1", "title": "t", "description": "d", "status": "PRUVATE"}"#)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidStatus(ref s) if s == "PRUVATE"));
    }

    #[test]
    fn test_repeated_status_key_is_rejected() {
        let service = BoardService::new();
        let input = r#"{"id":"b1","title":"t","description":"d","status":"HIDDEN","status":"PUBLIC"}"#;

        assert!(service.parse_board(input).is_err());

        let err = service.parse_boards(&format!("[{input}]")).unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(ref msg) if msg.starts_with("record 0:")));
    }

    #[test]
    fn test_repeated_id_key_is_rejected() {
        let service = BoardService::new();
        let input = r#"{"id":"b1","id":"b2","title":"t","description":"d","status":"PUBLIC"}"#;

        let err = service.parse_board(input).unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)));
        assert!(err.to_string().contains("duplicate field `id`"), "{err}");
        assert!(service.parse_boards(input).is_err());
    }

    #[test]
    fn test_bad_status_in_array_is_status_error() {
        let service = BoardService::new();
        let input = format!(
            r#"[{SPRINT_PLAN}, {{"id": "b2", "title": "t", "description": "d", "status": "Private"}}]"#
        );
        let err = service.parse_boards(&input).unwrap_err();
        assert!(matches!(err, AppError::InvalidStatus(ref s) if s == "Private"));
    }

    #[test]
    fn test_non_string_status_is_rejected() {
        let service = BoardService::new();
        let err = service
            .parse_board(r#"{"id": "b1", "title": "t", "description": "d", "status": 1}"#)
            .unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)));
    }

    #[test]
    fn test_missing_field_in_array_reports_index() {
        let service = BoardService::new();
        let input = format!(r#"[{SPRINT_PLAN}, {{"id": "b2", "title": "t", "status": "PRIVATE"}}]"#);
        let err = service.parse_boards(&input).unwrap_err();
        match err {
            AppError::InvalidRequest(msg) => {
                assert!(msg.starts_with("record 1:"), "{msg}");
                assert!(msg.contains("description"), "{msg}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_boards_accepts_object_or_array() {
        let service = BoardService::new();
        assert_eq!(service.parse_boards(SPRINT_PLAN).unwrap().len(), 1);

        let input = format!(
            r#"[{SPRINT_PLAN}, {{"id": "b2", "title": "", "description": "", "status": "PRIVATE"}}]"#
        );
        let boards = service.parse_boards(&input).unwrap();
        assert_eq!(boards.len(), 2);
        assert_eq!(boards[1].status, BoardStatus::Private);
        assert!(boards[1].title.is_empty());

        assert!(service.parse_boards("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_boards_rejects_scalars() {
        let service = BoardService::new();
        assert!(matches!(service.parse_boards("42"), Err(AppError::InvalidRequest(_))));
        assert!(matches!(service.parse_boards("[1]"), Err(AppError::InvalidRequest(_))));
        assert!(matches!(service.parse_boards("not json"), Err(AppError::Serialization(_))));
    }

    #[test]
    fn test_parse_status() {
        let service = BoardService::new();
        assert_eq!(service.parse_status("PRIVATE").unwrap(), BoardStatus::Private);
        assert!(matches!(service.parse_status(""), Err(AppError::InvalidStatus(_))));
        assert!(matches!(service.parse_status("private"), Err(AppError::InvalidStatus(_))));
    }

    #[test]
    fn test_create_board_assigns_distinct_ids() {
        let service = BoardService::new();
        let request = CreateBoardRequest {
            title: "Retro".to_string(),
            description: "What went well".to_string(),
            status: BoardStatus::Private,
        };

        let first = service.create_board(request.clone());
        let second = service.create_board(request);

        assert_ne!(first.id, second.id);
        assert!(Uuid::parse_str(&first.id).is_ok());
        assert_eq!(first.title, "Retro");
        assert_eq!(first.status, BoardStatus::Private);
    }

    #[test]
    fn test_round_trip_through_service() {
        let service = BoardService::new();
        let boards = vec![
            service.parse_board(SPRINT_PLAN).unwrap(),
            Board {
                id: "b2".to_string(),
                title: "Ünïcode \"quoted\"".to_string(),
                description: "line\nbreak".to_string(),
                status: BoardStatus::Private,
            },
        ];

        for pretty in [true, false] {
            let json = service.to_json(&boards, pretty).unwrap();
            assert_eq!(service.parse_boards(&json).unwrap(), boards);
        }
    }
}
