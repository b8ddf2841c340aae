//! xlsxjson - Pure-Rust spreadsheet to JSON converter
//!
//! スプレッドシート（xlsx, xlsm, xlsb, xls, ods）の1シートを読み込み、
//! 列名と行データからなるJSON文書に変換します。
//!
//! - 日付・時刻セルは文字列に変換されます（デフォルト: `2024-01-05 00:00:00`）
//! - 空セルは空文字列`""`になります
//! - 非ASCII文字はエスケープされません
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xlsxjson::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!     let table = converter.convert_path("example.xlsx")?;
//!
//!     // {"columns":[...],"data":[[...],...]}
//!     println!("{}", serde_json::to_string(&table)?);
//!     Ok(())
//! }
//! ```
//!
//! # エラーを文書として扱う
//!
//! 失敗時も1つのJSON文書（`{"error": "..."}`）を出力したい場合は
//! `convert_path_to_document`を使用します。
//!
//! ```rust,no_run
//! use xlsxjson::ConverterBuilder;
//!
//! # fn main() -> Result<(), xlsxjson::ConvertError> {
//! let converter = ConverterBuilder::new().build()?;
//! let document = converter.convert_path_to_document("missing.xlsx");
//! println!("{}", document.to_json_line());
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod error;
mod normalizer;
mod output;
mod parser;
mod security;
mod types;

// 公開API
pub use api::{DateFormat, SheetSelector};
pub use builder::{Converter, ConverterBuilder};
pub use error::ConvertError;
pub use output::OutputDocument;
pub use types::{CellValue, JsonTable, NormalizedValue, Table};
