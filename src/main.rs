//! xlsxjson CLI
//!
//! スプレッドシートを読み込み、1行のJSON文書を標準出力に書き出します。
//! 失敗時も`{"error": "..."}`を出力し、終了コードは常に0です。
//! ログは標準エラー出力に書き出されます（`RUST_LOG`で制御、デフォルトは`warn`）。

use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error};
use tracing_subscriber::{fmt, EnvFilter};
use xlsxjson::{ConvertError, ConverterBuilder, DateFormat, OutputDocument, SheetSelector};

/// 入力パスを省略した場合に読み込むファイル
const DEFAULT_INPUT: &str = "public/酒店智能体深度运营情况表.xlsx";

#[derive(Parser, Debug)]
#[command(
    name = "xlsxjson",
    version,
    about = "Convert a spreadsheet sheet to a single-line JSON document"
)]
struct Args {
    /// Spreadsheet to read (xlsx, xlsm, xlsb, xls, ods)
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Select the sheet by name
    #[arg(long, conflicts_with = "sheet_index")]
    sheet: Option<String>,

    /// Select the sheet by 0-based index
    #[arg(long)]
    sheet_index: Option<usize>,

    /// 0-based index of the header row, counting non-blank rows only
    #[arg(long, default_value_t = 0, conflicts_with = "no_header")]
    header_row: usize,

    /// Treat every row as data and name columns "0", "1", ...
    #[arg(long)]
    no_header: bool,

    /// chrono format string used for date/time cells
    #[arg(long)]
    date_format: Option<String>,
}

impl Args {
    fn into_builder(self) -> (PathBuf, ConverterBuilder) {
        let selector = match (self.sheet, self.sheet_index) {
            (Some(name), _) => SheetSelector::Name(name),
            (None, Some(index)) => SheetSelector::Index(index),
            (None, None) => SheetSelector::default(),
        };
        let date_format = self
            .date_format
            .map(DateFormat::Custom)
            .unwrap_or_default();
        let header_row = if self.no_header {
            None
        } else {
            Some(self.header_row)
        };

        let builder = ConverterBuilder::new()
            .with_sheet_selector(selector)
            .with_date_format(date_format)
            .with_header_row(header_row);
        (self.input, builder)
    }
}

fn run(args: Args) -> OutputDocument {
    let (input, builder) = args.into_builder();
    debug!(input = %input.display(), "converting");

    match builder.build() {
        Ok(converter) => converter.convert_path_to_document(&input),
        Err(e) => OutputDocument::error(e.to_string()),
    }
}

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let document = match Args::try_parse() {
        Ok(args) => run(args),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let rendered = e.to_string();
            let message = rendered.lines().next().unwrap_or_default();
            let message = message.trim_start_matches("error: ").to_string();
            OutputDocument::error(ConvertError::Config(message).to_string())
        }
    };

    if let OutputDocument::Error { error: message } = &document {
        error!(%message, "conversion failed");
    }

    if let Err(e) = document.render(&mut std::io::stdout().lock()) {
        error!(error = %e, "failed to write output");
    }
}
