//! Output Document Module
//!
//! 標準出力に書き出すJSON文書（成功形またはエラー形）を表すモジュール。

use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::ConvertError;
use crate::types::JsonTable;

/// 出力文書
///
/// - 成功時: `{"columns": [...], "data": [[...], ...]}`
/// - 失敗時: `{"error": "<message>"}`
///
/// 呼び出し側はトップレベルのキーで成功と失敗を区別します。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputDocument {
    /// 変換済みテーブル
    Table(JsonTable),

    /// 変換失敗
    Error {
        /// 人が読めるエラーメッセージ
        error: String,
    },
}

impl OutputDocument {
    /// エラー文書を生成
    pub fn error(message: impl Into<String>) -> Self {
        OutputDocument::Error {
            error: message.into(),
        }
    }

    /// エラー文書かどうか
    pub fn is_error(&self) -> bool {
        matches!(self, OutputDocument::Error { .. })
    }

    /// 1行のJSON文字列に変換する（非ASCII文字はエスケープしない）
    ///
    /// 成功文書のシリアライズに失敗した場合は、その理由を持つエラー文書を返すため、
    /// この関数は失敗しません。
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            serde_json::json!({ "error": ConvertError::from(e).to_string() }).to_string()
        })
    }

    /// 文書を1行で書き出し、改行で終える
    pub fn render<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "{}", self.to_json_line())?;
        writer.flush()
    }
}

impl From<Result<JsonTable, ConvertError>> for OutputDocument {
    fn from(result: Result<JsonTable, ConvertError>) -> Self {
        match result {
            Ok(table) => OutputDocument::Table(table),
            Err(e) => OutputDocument::error(e.to_string()),
        }
    }
}
