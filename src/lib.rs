//! スクリーンショットOCR - トリビア問題を Google スプレッドシートへ転記するツール
//!
//! # 機能
//! - ダウンロードフォルダからトリビアのスクリーンショットを検出
//! - Tesseract でテキスト抽出
//! - OCRテキストから問題番号・配点・問題文を解析（誤認識文字の補正付き）
//! - 撮影日のシートの該当セルへ問題文と配点を書き込み

pub mod app;
pub mod cli;
pub mod config;
pub mod ocr;
pub mod parser;
pub mod paths;
pub mod sheets;

pub use app::{App, RunSummary};
pub use config::AppArgs;
pub use parser::{ParsedQuestion, ScreenshotCandidate};
pub use sheets::{CellAddress, QuestionCells, locate};
