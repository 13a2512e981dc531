//! スクリーンショットファイル名の判定モジュール

use chrono::NaiveDate;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// 対象とする画像拡張子
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpeg", "jpg"];

/// ファイル名の先頭
const SCREENSHOT_PREFIX: &str = "Screenshot ";

/// 撮影元サイトを示す文字列（いずれかを含むこと）
const SOURCE_MARKERS: &[&str] = &["Facebook", "Isolation Trivia"];

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("日付の正規表現が不正"));

/// 処理対象のスクリーンショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotCandidate {
    pub path: PathBuf,
    /// ファイル名に含まれる撮影日 (UTC)
    pub captured_date: Option<NaiveDate>,
}

impl ScreenshotCandidate {
    /// ファイル名から対象スクリーンショットか判定
    pub fn classify(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        let extension = path.extension().and_then(|e| e.to_str())?;
        if !IMAGE_EXTENSIONS
            .iter()
            .any(|ext| extension.eq_ignore_ascii_case(ext))
        {
            return None;
        }

        let stem = path.file_stem().and_then(|s| s.to_str())?;
        if !stem.starts_with(SCREENSHOT_PREFIX) {
            return None;
        }

        if !SOURCE_MARKERS.iter().any(|marker| stem.contains(marker)) {
            return None;
        }

        Some(Self {
            path: path.to_path_buf(),
            captured_date: extract_captured_date(stem),
        })
    }

    /// ファイル名（表示用）
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// 最初の YYYY-MM-DD を日付として読む（不正な日付は無し扱い）
fn extract_captured_date(stem: &str) -> Option<NaiveDate> {
    let m = DATE_RE.find(stem)?;
    NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok()
}
