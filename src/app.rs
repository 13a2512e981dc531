//! メイン処理 - スクリーンショットの読み取りとスプレッドシート更新

use crate::config::AppArgs;
use crate::ocr::TextExtractor;
use crate::parser::{ParsedQuestion, ScreenshotCandidate};
use crate::sheets::{CellWriter, locate};
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// 実行結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// 対象スクリーンショット数
    pub found: usize,
    /// エラー無く処理できた数
    pub processed: usize,
    /// スプレッドシートを更新できた数
    pub updated: usize,
}

/// アプリケーション
pub struct App<O, W> {
    ocr: O,
    sheets: W,
}

impl<O: TextExtractor, W: CellWriter> App<O, W> {
    pub fn new(ocr: O, sheets: W) -> Self {
        Self { ocr, sheets }
    }

    /// 入力ディレクトリのスクリーンショットを1枚ずつ処理
    pub async fn run(&self, args: &AppArgs) -> Result<RunSummary> {
        info!("Screenshot OCR を開始");

        std::fs::create_dir_all(&args.output_dir)
            .with_context(|| format!("出力ディレクトリの作成に失敗: {:?}", args.output_dir))?;

        let candidates = find_screenshot_images(&args.input_dir)?;
        let mut summary = RunSummary {
            found: candidates.len(),
            ..RunSummary::default()
        };

        for candidate in candidates {
            match self.process_image(args, &candidate).await {
                Ok(updated) => {
                    summary.processed += 1;
                    if updated {
                        summary.updated += 1;
                    } else {
                        warn!(file = %candidate.file_name(), "スプレッドシートを更新できませんでした");
                    }
                }
                Err(e) => {
                    error!(file = %candidate.file_name(), error = %format!("{e:#}"), "画像の処理に失敗");
                }
            }
        }

        info!(
            processed = summary.processed,
            updated = summary.updated,
            "完了: {} 件の画像を処理",
            summary.processed
        );
        Ok(summary)
    }

    /// 1枚の画像を処理し、スプレッドシートを更新できたかを返す
    async fn process_image(&self, args: &AppArgs, candidate: &ScreenshotCandidate) -> Result<bool> {
        let file_name = candidate.file_name();

        let text = self
            .ocr
            .extract_text(&candidate.path)
            .with_context(|| format!("テキスト抽出に失敗: {file_name}"))?;

        if args.move_images {
            let target = args.output_dir.join(&file_name);
            move_file(&candidate.path, &target)?;
        }

        let text_file = text_file_path(&args.output_dir, &candidate.path);
        std::fs::write(&text_file, &text)
            .with_context(|| format!("テキストファイルの書き込みに失敗: {:?}", text_file))?;

        let question = ParsedQuestion::parse(&text);
        info!(
            file = %file_name,
            number = ?question.number,
            points = question.points,
            "\"{}\": Q{}) ({} points) \"{}\"",
            file_name,
            question.number.map_or_else(|| "?".to_string(), |n| n.to_string()),
            question.points,
            question.text
        );

        let reference_date = candidate
            .captured_date
            .unwrap_or_else(|| Utc::now().date_naive());

        self.update_trivia_cells(&args.spreadsheet_id, &question, reference_date)
            .await
    }

    /// 問題文と配点のセルを更新（両方成功で true）
    pub async fn update_trivia_cells(
        &self,
        spreadsheet_id: &str,
        question: &ParsedQuestion,
        reference_date: NaiveDate,
    ) -> Result<bool> {
        let Some(number) = question.number.filter(|_| question.is_complete()) else {
            return Ok(false);
        };

        let cells = match locate(number, Some(question.points), reference_date) {
            Ok(cells) => cells,
            Err(e) => {
                warn!(number, "{}", e);
                return Ok(false);
            }
        };

        let text_updated = self
            .sheets
            .update_cell(spreadsheet_id, &cells.text, &question.text)
            .await?;

        let points_updated = match cells.points {
            Some(ref cell) => {
                self.sheets
                    .update_cell(spreadsheet_id, cell, &question.points.to_string())
                    .await?
            }
            None => true,
        };

        Ok(text_updated && points_updated)
    }
}

/// 対象スクリーンショットを列挙（順序は保証しない）
pub fn find_screenshot_images(image_dir: &Path) -> Result<Vec<ScreenshotCandidate>> {
    info!(dir = %image_dir.display(), "スクリーンショット画像を検索");

    let entries = std::fs::read_dir(image_dir)
        .with_context(|| format!("入力ディレクトリの読み込みに失敗: {:?}", image_dir))?;

    let found = collect_candidates(
        image_dir,
        entries.map(|entry| entry.map(|e| e.path())),
    );

    info!(count = found.len(), "{} 件のスクリーンショットが見つかりました", found.len());
    Ok(found)
}

/// 読めないエントリは警告してスキップ
fn collect_candidates(
    image_dir: &Path,
    entries: impl IntoIterator<Item = std::io::Result<PathBuf>>,
) -> Vec<ScreenshotCandidate> {
    let mut found = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!(dir = %image_dir.display(), error = %e, "エントリを読み込めないためスキップ");
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        if let Some(candidate) = ScreenshotCandidate::classify(&path) {
            found.push(candidate);
        }
    }
    found
}

/// 画像と同名の .txt
fn text_file_path(output_dir: &Path, image_path: &Path) -> PathBuf {
    let mut name = image_path
        .file_stem()
        .unwrap_or(image_path.as_os_str())
        .to_os_string();
    name.push(".txt");
    output_dir.join(name)
}

/// ファイルを移動（別ドライブの場合はコピーして削除）
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    std::fs::copy(from, to).with_context(|| format!("画像のコピーに失敗: {:?} -> {:?}", from, to))?;
    std::fs::remove_file(from).with_context(|| format!("画像の削除に失敗: {:?}", from))?;
    Ok(())
}
