//! テキスト解析モジュール - OCRテキストからトリビア問題を抽出

mod filename;
mod number;
mod points;

pub use filename::ScreenshotCandidate;

use number::MarkerLine;

/// 配点が見つからない場合の既定値
pub const DEFAULT_POINTS: u32 = 1;

/// 行区切りとみなす文字
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// OCRテキストから抽出された問題
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuestion {
    /// 問題番号
    pub number: Option<u32>,
    /// 配点 (ONE〜FIVE POINTS)
    pub points: u32,
    /// 問題文（空白は1つに詰める）
    pub text: String,
}

impl ParsedQuestion {
    /// OCRテキストから問題番号・配点・問題文を解析
    pub fn parse(raw_text: &str) -> Self {
        let mut number = None;
        let mut points = None;
        let mut words: Vec<&str> = Vec::new();

        for line in raw_text.split(LINE_BREAKS) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let line_lower = line.to_lowercase();

            // 番号が見つかるまで "question" を含む行を順に試す
            if number.is_none() {
                match number::read_marker_line(&line_lower) {
                    MarkerLine::Number(0) | MarkerLine::Overflow => continue,
                    MarkerLine::Number(n) => {
                        number = Some(n);
                        continue;
                    }
                    MarkerLine::Unclean | MarkerLine::NotMarker => {}
                }
            }

            if points.is_none() {
                points = points::extract_points(&line_lower);
            }

            words.extend(line.split_whitespace());
        }

        Self {
            number,
            points: points.unwrap_or(DEFAULT_POINTS),
            text: words.join(" "),
        }
    }

    /// スプレッドシートに書き込める内容か
    pub fn is_complete(&self) -> bool {
        self.number.is_some() && !self.text.is_empty()
    }
}
