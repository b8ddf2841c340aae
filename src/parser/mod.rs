//! Parser Module
//!
//! calamineを使用したスプレッドシート解析の実装。
//! 選択した1シートを、見出しとデータ行からなる`Table`に変換します。

mod workbook;

pub(crate) use workbook::WorkbookParser;
