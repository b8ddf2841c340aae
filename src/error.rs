//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。
//!
//! 利用者から見たエラーは1種類（「変換失敗」）であり、`Display`で得られる
//! メッセージがそのままエラー文書 `{"error": "..."}` に埋め込まれます。

use std::path::PathBuf;

use thiserror::Error;

/// xlsxjsonクレート全体で使用するエラー型
///
/// スプレッドシートの読み込み、解析、正規化、シリアライズ中に発生する
/// すべてのエラーを統一的に扱うために使用されます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxjson::ConvertError;
/// use std::fs::File;
///
/// fn read_sheet(path: &str) -> Result<(), ConvertError> {
///     let _file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum ConvertError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 入力ファイルを開けなかったエラー
    ///
    /// パスを含めてメッセージを組み立てるため、`Io`とは別に保持します。
    #[error("Failed to open '{}': {source}", .path.display())]
    Open {
        /// 開こうとしたパス
        path: PathBuf,
        /// 元のI/Oエラー
        #[source]
        source: std::io::Error,
    },

    /// スプレッドシートの解析中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイル、サポートされていない形式などが
    /// 原因となります。`#[from]`属性により、`calamine::Error`から自動的に変換されます。
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// JSONシリアライズ中に発生したエラー
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// 不正な日付書式、存在しないシート名、範囲外のシートインデックスなど。
    ///
    /// ```rust,no_run
    /// use xlsxjson::{ConverterBuilder, ConvertError, DateFormat};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Q".to_string()))
    ///     .build();
    ///
    /// if let Err(ConvertError::Config(msg)) = result {
    ///     println!("設定エラー: {}", msg);
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限を超えた場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}
