//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::api::{DateFormat, SheetSelector};
use crate::error::ConvertError;
use crate::normalizer::{CellNormalizer, DateFormatter};
use crate::output::OutputDocument;
use crate::parser::WorkbookParser;
use crate::security::SecurityConfig;
use crate::types::{JsonTable, Table};

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 日付形式
    pub date_format: DateFormat,

    /// 見出し行（空行を除いた0始まりの行番号、Noneの場合は見出しなし）
    pub header_row: Option<usize>,

    /// セキュリティ制限
    pub security: SecurityConfig,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::default(),
            date_format: DateFormat::default(),
            header_row: Some(0),
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxjson::{ConverterBuilder, SheetSelector, DateFormat};
///
/// # fn main() -> Result<(), xlsxjson::ConvertError> {
/// let converter = ConverterBuilder::new()
///     .with_sheet_selector(SheetSelector::Name("売上".to_string()))
///     .with_date_format(DateFormat::Iso8601)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: 最初のシート
    /// - 日付形式: `%Y-%m-%d %H:%M:%S`
    /// - 見出し行: 最初の空でない行
    pub fn new() -> Self {
        Self::default()
    }

    /// 変換対象のシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 日付の出力形式を指定する
    ///
    /// ```rust,no_run
    /// use xlsxjson::{ConverterBuilder, DateFormat};
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y/%m/%d".to_string()));
    /// ```
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// 見出し行を指定する
    ///
    /// # 引数
    ///
    /// * `header_row: Option<usize>`:
    ///   * `Some(n)`: 空行を除いたn番目（0始まり）の行を見出しとし、それより前の行は捨てる
    ///   * `None`: 見出しなし。列名は`"0"`, `"1"`, ...となる
    pub fn with_header_row(mut self, header_row: Option<usize>) -> Self {
        self.config.header_row = header_row;
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `ConvertError::Config(String)`: カスタム日付形式が空、不正な指定子を含む、
    ///   またはタイムゾーンを要求する（`%z`など）場合
    pub fn build(self) -> Result<Converter, ConvertError> {
        if let DateFormat::Custom(ref format_str) = self.config.date_format {
            if format_str.is_empty() {
                return Err(ConvertError::Config(
                    "Invalid date format string: ''".to_string(),
                ));
            }

            // 不正な指定子はフォーマット時にパニックするため、ここで弾く
            if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) {
                return Err(ConvertError::Config(format!(
                    "Invalid date format string: '{}'",
                    format_str
                )));
            }

            // テスト用の日時で実際にフォーマットを試行
            let sample = NaiveDate::from_ymd_opt(2025, 1, 1)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .ok_or_else(|| ConvertError::Config("Failed to create test date".to_string()))?;
            if DateFormatter.try_format(&sample, format_str).is_err() {
                return Err(ConvertError::Config(format!(
                    "Invalid date format string: '{}' (time zone specifiers are not supported)",
                    format_str
                )));
            }
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// スプレッドシートを読み込み、正規化済みのJSONテーブルを生成します。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxjson::ConverterBuilder;
///
/// # fn main() -> Result<(), xlsxjson::ConvertError> {
/// let converter = ConverterBuilder::new().build()?;
/// let table = converter.convert_path("public/data.xlsx")?;
/// println!("{}", serde_json::to_string(&table)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// セルノーマライザー
    normalizer: CellNormalizer,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            normalizer: CellNormalizer::new(),
            config,
        }
    }

    /// スプレッドシートを読み込み、正規化前の`Table`を返す
    ///
    /// # 処理フロー
    ///
    /// 1. 入力をサイズ制限付きでメモリに読み込む
    /// 2. 形式を自動判別してワークブックを開く
    /// 3. シート選択
    /// 4. 見出し行とデータ行の抽出
    pub fn read_table<R: Read>(&self, input: R) -> Result<Table, ConvertError> {
        let buffer = self.config.security.read_bounded(input)?;
        debug!(bytes = buffer.len(), "input loaded");

        let mut parser = WorkbookParser::from_bytes(buffer)?;
        let sheet_name = parser.select_sheet(&self.config.sheet_selector)?;
        debug!(sheet = %sheet_name, "sheet selected");

        parser.read_table(&sheet_name, &self.config)
    }

    /// スプレッドシートを正規化済みのJSONテーブルに変換する
    ///
    /// ```rust,no_run
    /// use std::io::Cursor;
    /// use xlsxjson::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), xlsxjson::ConvertError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let excel_data: Vec<u8> = vec![]; // スプレッドシートのバイト列
    /// let table = converter.convert(Cursor::new(excel_data))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert<R: Read>(&self, input: R) -> Result<JsonTable, ConvertError> {
        let table = self.read_table(input)?;
        let json = self
            .normalizer
            .normalize_table(table, &self.config.date_format);

        info!(
            columns = json.columns.len(),
            rows = json.data.len(),
            "conversion finished"
        );
        Ok(json)
    }

    /// パスを指定してスプレッドシートを変換する
    pub fn convert_path<P: AsRef<Path>>(&self, path: P) -> Result<JsonTable, ConvertError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConvertError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.convert(file)
    }

    /// パスを指定して変換し、結果を必ず出力文書として返す
    ///
    /// 失敗は`OutputDocument::Error`に変換されるため、呼び出し側は
    /// 常に1つの文書を出力できます。
    pub fn convert_path_to_document<P: AsRef<Path>>(&self, path: P) -> OutputDocument {
        self.convert_path(path).into()
    }
}
