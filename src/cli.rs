//! コマンドライン引数

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Extract trivia questions from screenshots and write them to a Google Docs spreadsheet
#[derive(Parser, Debug)]
#[command(name = "screenshot-ocr", version)]
pub struct Cli {
    /// The Google Docs spreadsheet id
    #[arg(value_name = "SPREADSHEET_ID", env = "SCREENSHOT_OCR_SPREADSHEET_ID")]
    pub spreadsheet_id: String,

    /// Path to the folder containing the input images
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Path to the folder that will contain processed images and text files
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Path to the Tesseract executable file
    #[arg(long)]
    pub tesseract_exe: Option<PathBuf>,

    /// Path to the Tesseract data directory
    #[arg(long)]
    pub tesseract_data: Option<PathBuf>,

    /// Move image files to the output directory (default)
    #[arg(long, overrides_with = "no_move_images")]
    pub move_images: bool,

    /// Leave image files in the input directory
    #[arg(long, overrides_with = "move_images")]
    pub no_move_images: bool,

    /// Path to the Google service account credentials json file
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    pub google_credentials: Option<PathBuf>,

    /// The log level
    #[arg(long, value_enum, default_value_t = LogLevel::Debug, ignore_case = true)]
    pub log_level: LogLevel,
}

impl Cli {
    /// `--no-move-images` が無ければ移動する
    pub fn should_move_images(&self) -> bool {
        !self.no_move_images
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `EnvFilter` 用の指定
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
