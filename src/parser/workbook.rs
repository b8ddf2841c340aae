//! Workbook Parser
//!
//! calamineのラッパーとして、ワークブックを開き、選択したシートを
//! `Table`に変換します。

use calamine::{open_workbook_auto_from_rs, Data, ExcelDateTime, Reader, Sheets};
use chrono::{NaiveDate, NaiveDateTime};
use std::io::{Cursor, Read, Seek};
use std::ops::RangeInclusive;
use tracing::{debug, warn};

use crate::api::SheetSelector;
use crate::builder::ConversionConfig;
use crate::error::ConvertError;
use crate::normalizer::column_name;
use crate::types::{CellValue, Table};

/// 日付・経過時間として扱うシリアル値の範囲（Excelの上限9999-12-31まで）
///
/// 範囲外の値をcalamineで変換するとオーバーフローでパニックすることがあります。
const EXCEL_SERIAL_RANGE: RangeInclusive<f64> = -2_958_466.0..=2_958_466.0;

/// ワークブックパーサー
///
/// calamineの`Sheets`を保持し、形式（xlsx, xlsm, xlsb, xls, ods）は自動判別します。
pub(crate) struct WorkbookParser<RS: Read + Seek> {
    workbook: Sheets<RS>,
}

impl WorkbookParser<Cursor<Vec<u8>>> {
    /// メモリ上のバイト列からワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(ConvertError::Parse)` - 形式を判別できない、または破損している場合
    pub fn from_bytes(buffer: Vec<u8>) -> Result<Self, ConvertError> {
        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { workbook })
    }
}

impl<RS: Read + Seek> WorkbookParser<RS> {
    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// シート選択方式に基づいてシートを1つ選択
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(ConvertError::Config)` - シートが見つからない、またはインデックスが範囲外の場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, ConvertError> {
        let all_sheet_names = self.sheet_names();

        match selector {
            SheetSelector::Index(index) => {
                all_sheet_names.get(*index).cloned().ok_or_else(|| {
                    ConvertError::Config(format!(
                        "Sheet index {} is out of range (total: {})",
                        index,
                        all_sheet_names.len()
                    ))
                })
            }

            SheetSelector::Name(name) => {
                if !all_sheet_names.contains(name) {
                    return Err(ConvertError::Config(format!("Sheet '{}' not found", name)));
                }
                Ok(name.clone())
            }
        }
    }

    /// シートを読み込み、見出し行とデータ行からなる`Table`を構築する
    ///
    /// # 処理内容
    ///
    /// 1. 使用範囲の取得（先頭の空列はA列から埋め直す）
    /// 2. 完全に空の行を除外
    /// 3. 見出し行の決定（`header_row`より前の行は捨てる）
    /// 4. 残りの行をデータ行とする
    pub fn read_table(
        &mut self,
        sheet_name: &str,
        config: &ConversionConfig,
    ) -> Result<Table, ConvertError> {
        let range = self.workbook.worksheet_range(sheet_name)?;

        if range.is_empty() {
            debug!(sheet = sheet_name, "sheet has no used cells");
            return Ok(Table::default());
        }

        // 使用範囲がB列以降から始まる場合でも、列はA列から数える
        let leading_cols = range.start().map(|(_, col)| col as usize).unwrap_or(0);
        let width = leading_cols + range.width();

        let mut rows: Vec<Vec<CellValue>> = range
            .rows()
            .filter(|row| !row.iter().all(|cell| matches!(cell, Data::Empty)))
            .map(|row| {
                let mut cells = vec![CellValue::Empty; leading_cols];
                cells.extend(row.iter().map(convert_cell));
                cells
            })
            .collect();

        if rows.is_empty() {
            return Ok(Table::default());
        }

        let columns = match config.header_row {
            Some(header_row) => {
                if header_row >= rows.len() {
                    return Err(ConvertError::Config(format!(
                        "Header row {} is out of range (non-blank rows: {})",
                        header_row,
                        rows.len()
                    )));
                }
                let header: Vec<CellValue> = rows.drain(..=header_row).last().unwrap_or_default();
                header
                    .iter()
                    .enumerate()
                    .map(|(index, cell)| column_name(cell, index, &config.date_format))
                    .collect()
            }
            None => (0..width).map(|index| index.to_string()).collect(),
        };

        debug!(
            sheet = sheet_name,
            columns = width,
            rows = rows.len(),
            "sheet loaded"
        );

        Ok(Table { columns, rows })
    }
}

/// calamineのセル値を`CellValue`に変換する
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => convert_excel_datetime(dt),
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

/// 日付書式のセルを変換する
///
/// 表現できないシリアル値は日付セルを数値として出力しないよう、
/// シリアル値の文字列にします。
fn convert_excel_datetime(dt: &ExcelDateTime) -> CellValue {
    let serial = dt.as_f64();
    let converted = if !EXCEL_SERIAL_RANGE.contains(&serial) {
        None
    } else if dt.is_duration() {
        dt.as_duration().map(CellValue::Duration)
    } else {
        dt.as_datetime().map(CellValue::DateTime)
    };

    converted.unwrap_or_else(|| {
        warn!(serial, "date value out of range, keeping the serial as text");
        CellValue::Text(serial.to_string())
    })
}

/// ISO 8601形式の日付・日時文字列を解析する（ods形式で使用される）
fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

// シート単位の読み込みは実際のファイルが必要なため、統合テスト（tests/）で検証します。
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_cell_scalars() {
        assert_eq!(convert_cell(&Data::Int(5)), CellValue::Int(5));
        assert_eq!(convert_cell(&Data::Float(2.5)), CellValue::Float(2.5));
        assert_eq!(
            convert_cell(&Data::String("表".to_string())),
            CellValue::Text("表".to_string())
        );
        assert_eq!(convert_cell(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(convert_cell(&Data::Empty), CellValue::Empty);
    }

    #[test]
    fn test_convert_cell_error_is_missing() {
        let cell = convert_cell(&Data::Error(calamine::CellErrorType::Div0));
        assert!(cell.is_missing());
    }

    #[test]
    fn test_convert_cell_excel_dates() {
        use calamine::ExcelDateTimeType;

        let date = Data::DateTime(ExcelDateTime::new(45_296.0, ExcelDateTimeType::DateTime, false));
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(convert_cell(&date), CellValue::DateTime(expected));

        let elapsed = Data::DateTime(ExcelDateTime::new(0.0625, ExcelDateTimeType::TimeDelta, false));
        assert_eq!(
            convert_cell(&elapsed),
            CellValue::Duration(chrono::Duration::minutes(90))
        );
    }

    #[test]
    fn test_convert_cell_out_of_range_serial_becomes_text() {
        use calamine::ExcelDateTimeType;

        for kind in [ExcelDateTimeType::DateTime, ExcelDateTimeType::TimeDelta] {
            for serial in [1e20, -1e300, 2_958_467.0, f64::NAN] {
                let cell = convert_cell(&Data::DateTime(ExcelDateTime::new(serial, kind, false)));
                assert_eq!(cell, CellValue::Text(serial.to_string()));
            }
        }
    }

    #[test]
    fn test_convert_cell_iso_strings() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(
            convert_cell(&Data::DateTimeIso("2024-01-05T10:30:00".to_string())),
            CellValue::DateTime(expected)
        );

        let midnight = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            convert_cell(&Data::DateTimeIso("2024-01-05".to_string())),
            CellValue::DateTime(midnight)
        );

        // 解析できない文字列はそのまま
        assert_eq!(
            convert_cell(&Data::DateTimeIso("10:30:00".to_string())),
            CellValue::Text("10:30:00".to_string())
        );
        assert_eq!(
            convert_cell(&Data::DurationIso("PT1H30M".to_string())),
            CellValue::Text("PT1H30M".to_string())
        );
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(WorkbookParser::from_bytes(Vec::new()).is_err());
        assert!(WorkbookParser::from_bytes(b"not a spreadsheet".to_vec()).is_err());
    }
}
