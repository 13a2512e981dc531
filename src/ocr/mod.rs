//! OCR処理モジュール - Tesseract によるテキスト抽出

#[cfg(windows)]
use std::os::windows::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Tesseractの実行に失敗: {exe:?}: {source}")]
    Spawn {
        exe: PathBuf,
        source: std::io::Error,
    },
    #[error("Tesseractがエラー終了 ({status}): {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("OCR結果がUTF-8ではありません: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// 画像からテキストを取り出す
pub trait TextExtractor {
    fn extract_text(&self, image_path: &Path) -> anyhow::Result<String>;
}

/// Tesseract 実行ファイルとデータディレクトリ
#[derive(Debug, Clone)]
pub struct Tesseract {
    exe: PathBuf,
    data_dir: PathBuf,
}

impl Tesseract {
    pub fn new(exe: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            exe: exe.into(),
            data_dir: data_dir.into(),
        }
    }

    /// `tesseract --tessdata-dir <data> <image> stdout`
    fn command(&self, image_path: &Path) -> Command {
        let mut command = Command::new(&self.exe);
        command
            .arg("--tessdata-dir")
            .arg(&self.data_dir)
            .arg(image_path)
            .arg("stdout");

        #[cfg(windows)]
        command.creation_flags(0x08000000); // CREATE_NO_WINDOW

        command
    }

    /// 画像を読み取って標準出力のテキストを返す
    pub fn run(&self, image_path: &Path) -> Result<String, OcrError> {
        let output = self
            .command(image_path)
            .output()
            .map_err(|source| OcrError::Spawn {
                exe: self.exe.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(OcrError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}

impl TextExtractor for Tesseract {
    fn extract_text(&self, image_path: &Path) -> anyhow::Result<String> {
        Ok(self.run(image_path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn builds_tesseract_arguments() {
        let tesseract = Tesseract::new("/usr/bin/tesseract", "/usr/share/tessdata");
        let command = tesseract.command(Path::new("/tmp/Screenshot Facebook.png"));

        assert_eq!(command.get_program(), OsStr::new("/usr/bin/tesseract"));
        let args: Vec<&OsStr> = command.get_args().collect();
        assert_eq!(
            args,
            [
                OsStr::new("--tessdata-dir"),
                OsStr::new("/usr/share/tessdata"),
                OsStr::new("/tmp/Screenshot Facebook.png"),
                OsStr::new("stdout"),
            ]
        );
    }

    #[test]
    fn missing_executable_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let tesseract = Tesseract::new(dir.path().join("no-such-tesseract"), dir.path());
        let err = tesseract.run(&dir.path().join("image.png")).unwrap_err();
        assert!(matches!(err, OcrError::Spawn { .. }));
    }
}
