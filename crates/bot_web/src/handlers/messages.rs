use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::models::{MessageRequest, MessageResponse};
use crate::SharedService;

/// ターンエラー時にユーザーへ送る固定の謝罪メッセージ
const APOLOGY_MESSAGES: [&str; 2] = [
    "The bot encountered an error or bug.",
    "To continue to run this bot, please fix the bot source code.",
];

/// POST /api/messages - 受信メッセージを1ターンとして処理
///
/// ターン処理中のあらゆる未処理エラーはここが最上位ハンドラ。
/// エラーをログと診断トレースに残し、固定の謝罪メッセージを返す。
/// 失敗したターンの状態は保存されない（保存は本処理完了後のため）。
#[axum::debug_handler]
pub async fn messages(
    State(service): State<SharedService>,
    Json(req): Json<MessageRequest>,
) -> impl IntoResponse {
    tracing::info!(
        target: "web::messages",
        conversation = %req.conversation_id,
        "Received message"
    );

    match service.handle_message(&req.conversation_id, &req.text).await {
        Ok(reply) => Json(MessageResponse { replies: vec![reply] }).into_response(),
        Err(e) => {
            tracing::error!(target: "web::messages", error = ?e, "[onTurnError] unhandled error");

            let mut replies = vec![format!("OnTurnError Trace: {e}")];
            replies.extend(APOLOGY_MESSAGES.iter().map(|s| s.to_string()));
            (StatusCode::OK, Json(MessageResponse { replies })).into_response()
        }
    }
}

/// GET /health - 死活監視
pub async fn health() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
