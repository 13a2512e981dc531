//! 問題番号抽出モジュール

/// 問題番号の目印となるキーワード（小文字化済みの行と比較）
pub const QUESTION_KEYWORD: &str = "question";

/// OCRで数字と誤認識されやすい文字の置換表
const OCR_DIGIT_FIXES: &[(char, char)] = &[
    ('i', '1'),
    ('l', '1'),
    ('o', '0'),
];

/// 番号行の解析結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerLine {
    /// "question" を含まない行
    NotMarker,
    /// "question" の後ろが数字だけではない（本文として扱う）
    Unclean,
    /// 番号行として消費する行（0 は番号として採用しない）
    Number(u32),
    /// 数字だけだが u32 に収まらない（消費するが番号にはしない）
    Overflow,
}

/// 小文字化済みの1行から問題番号を読み取る
pub fn read_marker_line(line_lower: &str) -> MarkerLine {
    let Some(index) = line_lower.find(QUESTION_KEYWORD) else {
        return MarkerLine::NotMarker;
    };

    let raw = line_lower[index + QUESTION_KEYWORD.len()..].trim();
    let digits = fix_ocr_digits(raw);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return MarkerLine::Unclean;
    }

    match digits.parse::<u32>() {
        Ok(number) => MarkerLine::Number(number),
        Err(_) => MarkerLine::Overflow,
    }
}

/// 誤認識文字を数字に置換
pub fn fix_ocr_digits(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            OCR_DIGIT_FIXES
                .iter()
                .find(|(from, _)| *from == c)
                .map_or(c, |(_, to)| *to)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_plain_number() {
        assert_eq!(read_marker_line("question 4"), MarkerLine::Number(4));
        assert_eq!(read_marker_line("jeaffeal] question 22"), MarkerLine::Number(22));
    }

    #[test]
    fn fixes_confusable_characters() {
        assert_eq!(fix_ocr_digits("li"), "11");
        assert_eq!(fix_ocr_digits("3o"), "30");
        assert_eq!(read_marker_line("question 3o"), MarkerLine::Number(30));
        assert_eq!(read_marker_line("question i"), MarkerLine::Number(1));
    }

    #[test]
    fn trailing_words_are_not_a_number() {
        assert_eq!(read_marker_line("question about biology"), MarkerLine::Unclean);
        assert_eq!(read_marker_line("to this question:"), MarkerLine::Unclean);
        assert_eq!(read_marker_line("question"), MarkerLine::Unclean);
        assert_eq!(read_marker_line("question 12 a"), MarkerLine::Unclean);
    }

    #[test]
    fn overflow_is_consumed_without_number() {
        assert_eq!(
            read_marker_line("question 99999999999999999999"),
            MarkerLine::Overflow
        );
        assert_eq!(read_marker_line("question 4294967296"), MarkerLine::Overflow);
        assert_eq!(read_marker_line("question 4294967295"), MarkerLine::Number(u32::MAX));
    }

    #[test]
    fn lines_without_keyword() {
        assert_eq!(read_marker_line("three points"), MarkerLine::NotMarker);
    }

    #[test]
    fn any_digit_string_round_trips() {
        for s in ["1", "07", "io", "l0", "123", "oil"] {
            let expected: u32 = fix_ocr_digits(s).parse().unwrap();
            assert_eq!(
                read_marker_line(&format!("question {s}")),
                MarkerLine::Number(expected)
            );
        }
    }
}
