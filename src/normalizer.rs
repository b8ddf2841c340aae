//! Normalizer Module
//!
//! 解析済みテーブルをJSON出力用に正規化するモジュール。
//!
//! - 日付・時刻セルは`DateFormat`に従って文字列化する
//! - 経過時間セルは`D days HH:MM:SS`形式の文字列にする
//! - 欠損セル（空セル・エラー値）は空文字列にする
//! - 小数部を持たない浮動小数点数は整数として出力する

use chrono::{Duration, NaiveDateTime};
use std::fmt::Write;
use tracing::warn;

use crate::api::DateFormat;
use crate::types::{CellValue, JsonTable, NormalizedValue, Table};

/// f64で誤差なく表現できる整数の上限（2^53）
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// セルノーマライザー
///
/// 正規化処理のファサードとして機能します。
#[derive(Debug, Default)]
pub(crate) struct CellNormalizer {
    /// 日付フォーマッター
    date_formatter: DateFormatter,

    /// 数値ノーマライザー
    number_normalizer: NumberNormalizer,
}

impl CellNormalizer {
    /// 新しいCellNormalizerインスタンスを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// テーブル全体を正規化する
    ///
    /// 列名と行の順序はそのまま保持されます。
    pub fn normalize_table(&self, table: Table, date_format: &DateFormat) -> JsonTable {
        let data = table
            .rows
            .into_iter()
            .map(|row| {
                row.iter()
                    .map(|cell| self.normalize_cell(cell, date_format))
                    .collect()
            })
            .collect();

        JsonTable {
            columns: table.columns,
            data,
        }
    }

    /// セル値を正規化する
    pub fn normalize_cell(&self, cell: &CellValue, date_format: &DateFormat) -> NormalizedValue {
        match cell {
            CellValue::Text(s) => NormalizedValue::Text(s.clone()),
            CellValue::Int(i) => NormalizedValue::Integer(*i),
            CellValue::Float(f) => self.number_normalizer.normalize(*f),
            CellValue::Bool(b) => NormalizedValue::Bool(*b),
            CellValue::DateTime(dt) => {
                NormalizedValue::Text(self.date_formatter.format(dt, date_format))
            }
            CellValue::Duration(d) => {
                NormalizedValue::Text(self.date_formatter.format_duration(d))
            }
            CellValue::Error(_) | CellValue::Empty => NormalizedValue::missing(),
        }
    }
}

/// 列名を決定する
///
/// 空の見出しセルは`Unnamed: <index>`になります。
pub(crate) fn column_name(cell: &CellValue, index: usize, date_format: &DateFormat) -> String {
    let normalizer = CellNormalizer::new();
    match normalizer.normalize_cell(cell, date_format) {
        NormalizedValue::Text(s) if s.is_empty() => format!("Unnamed: {}", index),
        NormalizedValue::Text(s) => s,
        NormalizedValue::Integer(i) => i.to_string(),
        NormalizedValue::Float(f) => f.to_string(),
        NormalizedValue::Bool(b) => if b { "TRUE" } else { "FALSE" }.to_string(),
    }
}

/// 日付フォーマッター
///
/// 日付・時刻と経過時間を文字列に変換します。
#[derive(Debug, Default)]
pub(crate) struct DateFormatter;

impl DateFormatter {
    /// 日付・時刻をフォーマット
    ///
    /// 書式がタイムゾーンを要求する場合（`%z`など）、`NaiveDateTime`では
    /// フォーマットできないため、デフォルト書式にフォールバックします。
    pub fn format(&self, value: &NaiveDateTime, date_format: &DateFormat) -> String {
        self.try_format(value, date_format.pattern())
            .unwrap_or_else(|_| {
                warn!(
                    pattern = date_format.pattern(),
                    "date format not applicable, using the default"
                );
                value.format(DateFormat::DateTime.pattern()).to_string()
            })
    }

    /// 日付・時刻をフォーマット（失敗を`fmt::Error`として返す）
    pub fn try_format(
        &self,
        value: &NaiveDateTime,
        pattern: &str,
    ) -> Result<String, std::fmt::Error> {
        let mut formatted = String::new();
        write!(formatted, "{}", value.format(pattern))?;
        Ok(formatted)
    }

    /// 経過時間をフォーマット
    ///
    /// 負の値は日数のみ負になり、時刻部分は常に正の値で表されます。
    /// ミリ秒は0でない場合のみ出力します。
    ///
    /// - 1時間30分: `0 days 01:30:00`
    /// - -1時間: `-1 days +23:00:00`
    /// - -0.5秒: `-1 days +23:59:59.500`
    pub fn format_duration(&self, value: &Duration) -> String {
        let total = value.num_milliseconds();
        let days = total.div_euclid(86_400_000);
        let rem = total.rem_euclid(86_400_000);
        let millis = rem % 1000;
        let secs = rem / 1000;
        let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

        let sign = if days < 0 { "+" } else { "" };
        let mut formatted = format!(
            "{} days {}{:02}:{:02}:{:02}",
            days, sign, hours, minutes, seconds
        );
        if millis != 0 {
            formatted.push_str(&format!(".{:03}", millis));
        }
        formatted
    }
}

/// 数値ノーマライザー
#[derive(Debug, Default)]
pub(crate) struct NumberNormalizer;

impl NumberNormalizer {
    /// 浮動小数点数を正規化
    ///
    /// 小数部が0で安全な整数範囲に収まる値は整数に、非有限値は欠損値にします。
    pub fn normalize(&self, value: f64) -> NormalizedValue {
        if !value.is_finite() {
            warn!(value, "non-finite number replaced with an empty string");
            return NormalizedValue::missing();
        }

        if value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
            NormalizedValue::Integer(value as i64)
        } else {
            NormalizedValue::Float(value)
        }
    }
}
