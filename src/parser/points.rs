//! 配点抽出モジュール

use regex::Regex;
use std::sync::LazyLock;

/// 配点を表す英単語
const POINT_WORDS: &[(&str, u32)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
];

static POINTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?P<num>one|two|three|four|five)\s+points?\b")
        .expect("配点の正規表現が不正")
});

/// 小文字化済みの1行から配点を抽出
/// "THREE POINTS" -> 3
pub fn extract_points(line_lower: &str) -> Option<u32> {
    let caps = POINTS_RE.captures(line_lower)?;
    let word = caps.name("num")?.as_str();

    POINT_WORDS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, value)| *value)
}
