//! JSON プロトコル
//!
//! 1 リクエスト 1 オブジェクト。`cmd` でコマンドを選ぶ。
//!
//! ```json
//! {"cmd":"new_match"}
//! {"cmd":"move","match_id":1,"player":"black","from":"B6","to":"A5"}
//! ```
//!
//! レスポンスは成功時 `{"ok":true,"kind":...}`、失敗時
//! `{"ok":false,"kind":"error","status":400,"error":"..."}`。

use rdraughts_core::Color;
use rdraughts_core::types::json::BoardStateJson;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::registry::{MatchId, MatchSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Request {
    NewMatch,
    List,
    Board {
        match_id: MatchId,
    },
    Move {
        match_id: MatchId,
        player: String,
        from: String,
        to: String,
    },
    Info {
        match_id: MatchId,
        piece: String,
    },
    Reset {
        match_id: MatchId,
    },
    Close {
        match_id: MatchId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseBody {
    Created {
        match_id: MatchId,
        current_player: Color,
    },
    Matches {
        matches: Vec<MatchSummary>,
    },
    Board {
        match_id: MatchId,
        #[serde(flatten)]
        state: BoardStateJson,
    },
    Moved {
        match_id: MatchId,
        message: String,
        captured: Option<String>,
        promoted: bool,
        current_player: Color,
        game_over: bool,
        winner: Option<Color>,
    },
    Info {
        match_id: MatchId,
        position: String,
        color: Color,
        is_king: bool,
        possible_moves: Vec<String>,
    },
    Reset {
        match_id: MatchId,
        message: String,
        current_player: Color,
    },
    Closed {
        match_id: MatchId,
    },
    Error {
        status: u16,
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub ok: bool,
    #[serde(flatten)]
    pub body: ResponseBody,
}

impl Response {
    pub fn ok(body: ResponseBody) -> Self {
        Response { ok: true, body }
    }

    pub fn error(err: &ApiError) -> Self {
        Response {
            ok: false,
            body: ResponseBody::Error {
                status: err.status(),
                error: err.to_string(),
            },
        }
    }

    /// 1 行分の JSON（末尾改行なし）
    pub fn to_line(&self) -> String {
        // 全フィールドが文字列キーのマップ / 数値 / 文字列のみのため失敗しない
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"ok":false,"kind":"error","status":500,"error":"serialize: {e}"}}"#)
        })
    }
}
