//! 実行設定

use crate::cli::Cli;
use crate::paths::DefaultPaths;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} を指定してください")]
    Missing(&'static str),
}

/// アプリケーションの実行引数
#[derive(Debug, Clone)]
pub struct AppArgs {
    /// Google スプレッドシートID
    pub spreadsheet_id: String,
    /// 入力画像のディレクトリ
    pub input_dir: PathBuf,
    /// 画像とテキストの出力先
    pub output_dir: PathBuf,
    pub tesseract_exe: PathBuf,
    pub tesseract_data: PathBuf,
    /// 処理した画像を出力先へ移動するか
    pub move_images: bool,
    /// サービスアカウントの認証ファイル
    pub google_credentials: PathBuf,
}

impl AppArgs {
    /// 引数を既定パスで補完
    pub fn from_cli(cli: Cli, defaults: &DefaultPaths) -> Result<Self, ConfigError> {
        let move_images = cli.should_move_images();

        let input_dir = cli.input_dir.or_else(|| defaults.downloads_dir.clone());
        let output_dir = cli.output_dir.or_else(|| defaults.documents_dir.clone());
        let tesseract_exe = cli
            .tesseract_exe
            .or_else(|| defaults.tesseract_exe_file.clone());
        let tesseract_data = cli
            .tesseract_data
            .or_else(|| defaults.tesseract_data_dir.clone());
        let google_credentials = cli
            .google_credentials
            .or_else(|| defaults.google_credentials_file.clone());

        for (name, value) in [
            ("input directory", &input_dir),
            ("output directory", &output_dir),
            ("Tesseract executable", &tesseract_exe),
            ("Tesseract data", &tesseract_data),
            ("Google credentials", &google_credentials),
        ] {
            if let Some(path) = value {
                info!(name, path = %path.display(), "使用するパス");
            }
        }

        let spreadsheet_id = cli.spreadsheet_id.trim().to_string();
        if spreadsheet_id.is_empty() {
            return Err(ConfigError::Missing("spreadsheet_id"));
        }

        Ok(Self {
            spreadsheet_id,
            input_dir: input_dir.ok_or(ConfigError::Missing("input_dir"))?,
            output_dir: output_dir.ok_or(ConfigError::Missing("output_dir"))?,
            tesseract_exe: tesseract_exe.ok_or(ConfigError::Missing("tesseract_exe"))?,
            tesseract_data: tesseract_data.ok_or(ConfigError::Missing("tesseract_data"))?,
            move_images,
            google_credentials: google_credentials
                .ok_or(ConfigError::Missing("google_credentials"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn defaults() -> DefaultPaths {
        DefaultPaths {
            downloads_dir: Some("/home/u/Downloads".into()),
            documents_dir: Some("/home/u/Documents".into()),
            google_credentials_file: Some("/home/u/.config/screenshot-ocr/credentials.json".into()),
            tesseract_exe_file: Some("/usr/bin/tesseract".into()),
            tesseract_data_dir: Some("/usr/share/tesseract-ocr/5/tessdata".into()),
        }
    }

    #[test]
    fn fills_missing_options_from_defaults() {
        let cli = Cli::try_parse_from([
            "screenshot-ocr",
            "--input-dir",
            "/data/in",
            "--no-move-images",
            "sheet",
        ])
        .unwrap();
        let args = AppArgs::from_cli(cli, &defaults()).unwrap();

        assert_eq!(args.spreadsheet_id, "sheet");
        assert_eq!(args.input_dir, PathBuf::from("/data/in"));
        assert_eq!(args.output_dir, PathBuf::from("/home/u/Documents"));
        assert_eq!(args.tesseract_exe, PathBuf::from("/usr/bin/tesseract"));
        assert!(!args.move_images);
    }

    #[test]
    fn unresolved_path_is_an_error() {
        let cli = Cli::try_parse_from([
            "screenshot-ocr",
            "--google-credentials",
            "/creds.json",
            "sheet",
        ])
        .unwrap();
        let paths = DefaultPaths {
            tesseract_data_dir: None,
            ..defaults()
        };
        assert_eq!(
            AppArgs::from_cli(cli, &paths).unwrap_err(),
            ConfigError::Missing("tesseract_data")
        );
    }

    #[test]
    fn blank_spreadsheet_id_is_an_error() {
        let cli = Cli::try_parse_from(["screenshot-ocr", "  "]).unwrap();
        assert_eq!(
            AppArgs::from_cli(cli, &defaults()).unwrap_err(),
            ConfigError::Missing("spreadsheet_id")
        );
    }
}
