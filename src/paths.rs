//! 既定のディレクトリ・ファイルの探索

use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 設定ディレクトリ内のアプリ名
pub const APP_DIR_NAME: &str = "screenshot-ocr";

/// サービスアカウントの認証ファイル名
pub const CREDENTIALS_FILE_NAME: &str = "credentials.json";

#[cfg(windows)]
const TESSERACT_EXE_NAME: &str = "tesseract.exe";
#[cfg(not(windows))]
const TESSERACT_EXE_NAME: &str = "tesseract";

/// 既定パス
#[derive(Debug, Clone, Default)]
pub struct DefaultPaths {
    pub downloads_dir: Option<PathBuf>,
    pub documents_dir: Option<PathBuf>,
    pub google_credentials_file: Option<PathBuf>,
    pub tesseract_exe_file: Option<PathBuf>,
    pub tesseract_data_dir: Option<PathBuf>,
}

impl DefaultPaths {
    /// プラットフォームの既定パスを探索
    /// `allow_not_exist` が false の場合、存在しないパスは使わない
    pub fn discover(allow_not_exist: bool) -> Self {
        let config_dir = dirs::config_dir().map(|d| d.join(APP_DIR_NAME));
        let (tesseract_exe_file, tesseract_data_dir) = find_tesseract();

        Self {
            downloads_dir: checked(
                "Downloads directory",
                dirs::download_dir(),
                allow_not_exist,
            ),
            documents_dir: checked(
                "Documents directory",
                dirs::document_dir(),
                allow_not_exist,
            ),
            google_credentials_file: checked(
                "Google credentials file",
                config_dir.map(|d| d.join(CREDENTIALS_FILE_NAME)),
                allow_not_exist,
            ),
            tesseract_exe_file,
            tesseract_data_dir,
        }
    }
}

fn checked(name: &str, path: Option<PathBuf>, allow_not_exist: bool) -> Option<PathBuf> {
    let path = path?;
    if !allow_not_exist && !path.exists() {
        debug!(name, path = %path.display(), "既定パスが見つかりません");
        return None;
    }
    debug!(name, path = %path.display(), "既定パスを使用");
    Some(path)
}

/// PATH から実行ファイルを探す
pub fn find_in_path(exe_name: &str, path_var: Option<&std::ffi::OsStr>) -> Option<PathBuf> {
    let path_var = path_var?;
    env::split_paths(path_var)
        .map(|dir| dir.join(exe_name))
        .find(|candidate| candidate.is_file())
}

fn first_existing(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|p| p.exists())
}

/// Tesseract の実行ファイルとデータディレクトリ
fn find_tesseract() -> (Option<PathBuf>, Option<PathBuf>) {
    let from_path = find_in_path(TESSERACT_EXE_NAME, env::var_os("PATH").as_deref());
    if let Some(ref exe) = from_path {
        debug!(path = %exe.display(), "PATH から Tesseract を検出");
    }

    let (default_exe, data_dir) = platform_tesseract();
    let exe = from_path.or(default_exe);

    if let Some(ref data) = data_dir {
        debug!(path = %data.display(), "Tesseract データディレクトリを検出");
    }
    (exe, data_dir)
}

#[cfg(windows)]
fn platform_tesseract() -> (Option<PathBuf>, Option<PathBuf>) {
    let install_dir = first_existing(
        ["PROGRAMFILES", "PROGRAMFILES(X86)"]
            .into_iter()
            .filter_map(env::var_os)
            .map(|dir| Path::new(&dir).join("Tesseract-OCR")),
    );

    let Some(install_dir) = install_dir else {
        return (None, None);
    };
    debug!(path = %install_dir.display(), "Tesseract インストール先を検出");

    (
        first_existing([install_dir.join(TESSERACT_EXE_NAME)]),
        first_existing([install_dir.join("tessdata")]),
    )
}

#[cfg(not(windows))]
fn platform_tesseract() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        first_existing([Path::new("/usr/bin").join(TESSERACT_EXE_NAME)]),
        first_existing([
            PathBuf::from("/usr/share/tesseract-ocr/5/tessdata"),
            PathBuf::from("/usr/share/tesseract-ocr/4.00/tessdata"),
            PathBuf::from("/usr/share/tessdata"),
        ]),
    )
}
