//! リクエスト/レスポンスDTO

use serde::{Deserialize, Serialize};

/// POST /api/messages のリクエストボディ
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    /// 会話識別子
    pub conversation_id: String,
    /// ユーザーの自由テキスト入力
    pub text: String,
}

/// POST /api/messages のレスポンスボディ。
/// 通常は1件、ターンエラー時は診断トレース + 謝罪メッセージの複数件。
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub replies: Vec<String>,
}
