//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// パーサーから抽出された生のセル値
///
/// 1つの列に異なる型の値が混在してもよいように、セル単位のタグ付き共用体として表現します。
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 文字列
    Text(String),

    /// 整数（xls形式などで整数として格納された値）
    Int(i64),

    /// 浮動小数点数
    Float(f64),

    /// 論理値
    Bool(bool),

    /// 日付・時刻
    DateTime(NaiveDateTime),

    /// 経過時間（`[h]:mm:ss`などの書式を持つセル）
    Duration(Duration),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 値が欠損しているかどうかを判定
    ///
    /// エラー値も欠損として扱います。
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Empty | CellValue::Error(_))
    }
}

/// 正規化後のセル値
///
/// 日付・時刻を保持するバリアントを持たないため、正規化後のデータに
/// 生の日付値が残ることは型レベルで起こり得ません。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl NormalizedValue {
    /// 欠損値を表す空文字列
    pub fn missing() -> Self {
        NormalizedValue::Text(String::new())
    }
}

impl From<&str> for NormalizedValue {
    fn from(s: &str) -> Self {
        NormalizedValue::Text(s.to_string())
    }
}

/// 解析直後のテーブル
///
/// 列名と行データを保持します。すべての行は列数と同じ長さを持ちます。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// 列名（元の順序、重複を許す）
    pub columns: Vec<String>,

    /// 行データ（元の順序）
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// 列数
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// データ行数（ヘッダー行を含まない）
    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// 正規化済みテーブル（成功時の出力文書の本体）
///
/// `{"columns": [...], "data": [[...], ...]}`としてシリアライズされます。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JsonTable {
    pub columns: Vec<String>,
    pub data: Vec<Vec<NormalizedValue>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_cell_value_is_missing() {
        assert!(CellValue::Empty.is_missing());
        assert!(CellValue::Error("#DIV/0!".to_string()).is_missing());
        assert!(!CellValue::Float(0.0).is_missing());
        assert!(!CellValue::Text(String::new()).is_missing());
        assert!(!CellValue::Bool(false).is_missing());

        let date = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(!CellValue::DateTime(date).is_missing());
    }

    #[test]
    fn test_normalized_value_serializes_untagged() {
        let row = vec![
            NormalizedValue::from("Alice"),
            NormalizedValue::Integer(3),
            NormalizedValue::Float(2.5),
            NormalizedValue::Bool(true),
            NormalizedValue::missing(),
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"["Alice",3,2.5,true,""]"#);
    }

    #[test]
    fn test_json_table_field_order() {
        let table = JsonTable {
            columns: vec!["名前".to_string()],
            data: vec![vec![NormalizedValue::from("東京")]],
        };
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"columns":["名前"],"data":[["東京"]]}"#);
    }

    #[test]
    fn test_table_dimensions() {
        let table = Table {
            columns: vec!["A".to_string(), "B".to_string()],
            rows: vec![
                vec![CellValue::Int(1), CellValue::Empty],
                vec![CellValue::Int(2), CellValue::Empty],
                vec![CellValue::Int(3), CellValue::Empty],
            ],
        };
        assert_eq!(table.width(), 2);
        assert_eq!(table.height(), 3);
        assert_eq!(Table::default().width(), 0);
    }
}
