//! スクリーンショットOCR - メインエントリポイント

use clap::Parser;
use screenshot_ocr::cli::Cli;
use screenshot_ocr::ocr::Tesseract;
use screenshot_ocr::paths::DefaultPaths;
use screenshot_ocr::sheets::SheetsClient;
use screenshot_ocr::{App, AppArgs};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // 環境変数の読み込み
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // ロギング初期化
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_filter())),
        )
        .init();

    let args = match AppArgs::from_cli(cli, &DefaultPaths::discover(false)) {
        Ok(args) => args,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };

    let sheets = match SheetsClient::new(&args.google_credentials) {
        Ok(client) => client,
        Err(e) => {
            error!("Sheets クライアントの初期化に失敗: {:#}", e);
            return ExitCode::from(1);
        }
    };
    let ocr = Tesseract::new(&args.tesseract_exe, &args.tesseract_data);

    match App::new(ocr, sheets).run(&args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}
