//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 日付・時刻の出力形式
///
/// スプレッドシートの日付セルをJSON文字列に変換する際の形式を指定します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DateFormat {
    /// 日付と時刻を空白で区切った形式（デフォルト）
    ///
    /// 例: `2024-01-05 00:00:00`
    #[default]
    DateTime,

    /// ISO 8601形式（`T`区切り）
    ///
    /// 例: `2024-01-05T00:00:00`
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// # フォーマット指定子（主要なもの）
    ///
    /// - `%Y`: 4桁の年（例: 2024）
    /// - `%m`: 2桁の月（01-12）
    /// - `%d`: 2桁の日（01-31）
    /// - `%H`: 24時間形式の時（00-23）
    /// - `%M`: 分（00-59）
    /// - `%S`: 秒（00-59）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxjson::{ConverterBuilder, DateFormat};
    ///
    /// # fn main() -> Result<(), xlsxjson::ConvertError> {
    /// let converter = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y年%m月%d日".to_string()))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Custom(String),
}

impl DateFormat {
    /// chrono互換のフォーマット文字列を返す
    pub fn pattern(&self) -> &str {
        match self {
            DateFormat::DateTime => "%Y-%m-%d %H:%M:%S",
            DateFormat::Iso8601 => "%Y-%m-%dT%H:%M:%S",
            DateFormat::Custom(pattern) => pattern,
        }
    }
}

/// シート選択方式
///
/// 変換対象のシートを1つ選択する方法を指定します。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSelector {
    /// インデックス指定（0始まり、デフォルトは最初のシート）
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Sheet1".to_string())`
    Name(String),
}

impl Default for SheetSelector {
    fn default() -> Self {
        SheetSelector::Index(0)
    }
}
