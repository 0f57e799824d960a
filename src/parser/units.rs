//! 单元/套题状态机
//!
//! 逐行消费单份试卷的文本，产出 单元 → {setA, setB} → 题目列表。
//! 状态显式装在 `UnitSetParser` 里，每行一步，结束时隐式定稿一次。
//!
//! 每行按固定优先级匹配（先命中者生效，命中即先定稿挂起题目）：
//! 1. 单元标记 - 重置活跃套题为 A
//! 2. 显式套题标记
//! 3. 独立 "OR" 行 - A 翻转到 B（B 不再翻转，不存在 Set C）
//! 4. 题目起始编号 - 开启新的挂起题目
//! 5. 续行 - 追加到挂起题目
//! 6. 其余行丢弃（页眉等样板文本）

use crate::models::{PaperUnits, Question, SetLabel, UnitSets};
use crate::parser::markers;

/// 无标注题目的默认分值
const DEFAULT_QUESTION_MARKS: u32 = 5;

/// 定稿时丢弃的最短题干长度（字符数，含以下）
const MIN_QUESTION_CHARS: usize = 5;

/// 单元/套题解析状态机
#[derive(Debug, Default)]
pub struct UnitSetParser {
    units: PaperUnits,
    /// 当前单元号（归一化后的 token），未见单元标记时为 None
    current_unit: Option<String>,
    current_set: SetLabel,
    /// 挂起题目的文本累积器
    pending_text: String,
    pending_marks: u32,
}

impl UnitSetParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// 消费一行
    pub fn feed(&mut self, line: &str) {
        // 1. 单元标记：行本身不贡献文本，活跃套题重置为 A
        if let Some(caps) = markers::UNIT.captures(line) {
            self.finalize_pending();
            self.current_unit = Some(markers::normalize_unit_token(&caps[1]));
            self.current_set = SetLabel::A;
            return;
        }

        // 2. 显式套题标记
        if let Some(caps) = markers::SET.captures(line) {
            self.finalize_pending();
            let letter = caps[1].chars().next().unwrap_or('A');
            self.current_set = SetLabel::from_letter(letter);
            return;
        }

        // 3. 独立 OR 行：A → B，从 B 出发不再翻转
        if markers::OR_LINE.is_match(line) {
            self.finalize_pending();
            if self.current_set == SetLabel::A {
                self.current_set = SetLabel::B;
            }
            return;
        }

        // 4. 题目起始：编号 token 去掉，余下部分去除分值标注后作为题干开头
        if let Some(m) = markers::QUESTION_START.find(line) {
            self.finalize_pending();
            self.pending_marks = markers::last_marks(line);
            self.pending_text = markers::strip_marks(&line[m.end()..]);
            return;
        }

        // 5. 续行：只有存在挂起题目时才追加；
        //    分值写在后续行时，挂起题目尚无分值才采纳
        if !self.pending_text.is_empty() {
            let line_marks = markers::last_marks(line);
            if line_marks > 0 && self.pending_marks == 0 {
                self.pending_marks = line_marks;
            }
            let clean = markers::strip_marks(line);
            if !clean.is_empty() {
                self.pending_text.push(' ');
                self.pending_text.push_str(&clean);
            }
        }
        // 6. 无挂起题目的未匹配行丢弃
    }

    /// 结束输入，定稿最后一个挂起题目并产出结果
    pub fn finish(mut self) -> PaperUnits {
        self.finalize_pending();
        self.units
    }

    /// 定稿挂起题目
    ///
    /// 题干修剪后超过最短长度才保留；分值缺失时用默认值；
    /// 尚未见到单元标记时归入 unit1。定稿后累积器无条件清空
    fn finalize_pending(&mut self) {
        let text = self.pending_text.trim();
        if text.chars().count() > MIN_QUESTION_CHARS {
            let marks = if self.pending_marks > 0 {
                self.pending_marks
            } else {
                DEFAULT_QUESTION_MARKS
            };
            let unit_key = match &self.current_unit {
                Some(unit) => format!("unit{}", unit),
                None => "unit1".to_string(),
            };
            let entry = self
                .units
                .entry(unit_key)
                .or_insert_with(UnitSets::default);
            let bucket = match self.current_set {
                SetLabel::A => &mut entry.set_a,
                SetLabel::B => &mut entry.set_b,
            };
            bucket.push(Question {
                text: text.to_string(),
                marks,
            });
        }
        self.pending_text.clear();
        self.pending_marks = 0;
    }
}

/// 解析单份试卷的全部行
pub fn parse_units(lines: &[String]) -> PaperUnits {
    let mut parser = UnitSetParser::new();
    for line in lines {
        parser.feed(line);
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &[&str]) -> PaperUnits {
        let lines: Vec<String> = text.iter().map(|s| s.to_string()).collect();
        parse_units(&lines)
    }

    #[test]
    fn test_or_flips_set_a_to_b() {
        let units = parse(&[
            "UNIT - 1",
            "1) Explain X in detail (10)",
            "2) Explain Y in detail (10)",
            "OR",
            "3) Explain Z in detail (10)",
        ]);
        let unit1 = &units["unit1"];
        assert_eq!(unit1.set_a.len(), 2);
        assert_eq!(unit1.set_b.len(), 1);
        assert_eq!(unit1.set_a[0].marks, 10);
        assert_eq!(unit1.set_b[0].marks, 10);
    }

    #[test]
    fn test_or_from_b_is_noop() {
        let units = parse(&[
            "UNIT - 1",
            "1) First question text (10)",
            "OR",
            "2) Second question text (10)",
            "OR",
            "3) Third question text (10)",
        ]);
        let unit1 = &units["unit1"];
        assert_eq!(unit1.set_a.len(), 1);
        assert_eq!(unit1.set_b.len(), 2);
    }

    #[test]
    fn test_multiline_question_marks_on_second_line() {
        let units = parse(&[
            "UNIT - 1",
            "1) Explain the architecture of",
            "a compiler. (10)",
        ]);
        let question = &units["unit1"].set_a[0];
        assert_eq!(question.text, "Explain the architecture of a compiler.");
        assert_eq!(question.marks, 10);
    }

    #[test]
    fn test_continuation_marks_do_not_overwrite() {
        let units = parse(&[
            "UNIT - 1",
            "1) Explain the pipeline (10)",
            "with a neat diagram (5)",
        ]);
        // 题目行已带分值，续行的分值不覆盖
        assert_eq!(units["unit1"].set_a[0].marks, 10);
    }

    #[test]
    fn test_roman_unit_token_mapped() {
        let units = parse(&["UNIT III", "1) Explain something useful (10)"]);
        assert!(units.contains_key("unit3"));
    }

    #[test]
    fn test_explicit_set_marker() {
        let units = parse(&[
            "UNIT - 2",
            "Set A",
            "1) First question text here (10)",
            "Set B",
            "2) Second question text here (10)",
        ]);
        let unit2 = &units["unit2"];
        assert_eq!(unit2.set_a.len(), 1);
        assert_eq!(unit2.set_b.len(), 1);
    }

    #[test]
    fn test_unit_marker_resets_set_to_a() {
        let units = parse(&[
            "UNIT - 1",
            "1) Question one text here (10)",
            "OR",
            "2) Question two text here (10)",
            "UNIT - 2",
            "3) Question three text here (10)",
        ]);
        assert_eq!(units["unit2"].set_a.len(), 1);
        assert!(units["unit2"].set_b.is_empty());
    }

    #[test]
    fn test_set_beyond_b_collapses_to_b() {
        let units = parse(&["UNIT - 1", "Set C", "1) Question text goes here (10)"]);
        assert_eq!(units["unit1"].set_b.len(), 1);
        assert!(units["unit1"].set_a.is_empty());
    }

    #[test]
    fn test_short_pending_text_discarded() {
        let units = parse(&["UNIT - 1", "1) Hi (10)"]);
        assert!(units.get("unit1").is_none());
    }

    #[test]
    fn test_default_marks_when_annotation_missing() {
        let units = parse(&["UNIT - 1", "1) Explain the fundamental concept"]);
        assert_eq!(units["unit1"].set_a[0].marks, 5);
    }

    #[test]
    fn test_no_unit_marker_defaults_to_unit1() {
        let units = parse(&["1) Explain the fundamental concept (10)"]);
        assert_eq!(units["unit1"].set_a.len(), 1);
    }

    #[test]
    fn test_numbering_token_stripped_from_text() {
        let units = parse(&["UNIT - 1", "2a. Define context free grammars (5)"]);
        assert_eq!(units["unit1"].set_a[0].text, "Define context free grammars");
    }

    #[test]
    fn test_boilerplate_without_pending_discarded() {
        let units = parse(&[
            "Answer all questions",
            "UNIT - 1",
            "1) Explain the fundamental concept (10)",
        ]);
        assert_eq!(units.len(), 1);
        assert_eq!(units["unit1"].set_a.len(), 1);
    }

    #[test]
    fn test_embedded_marks_stripped_from_text() {
        let units = parse(&["UNIT - 1", "1) Explain X (5) and also Y (10)"]);
        let question = &units["unit1"].set_a[0];
        assert_eq!(question.marks, 10);
        assert!(!question.text.contains("(5)"));
        assert!(!question.text.contains("(10)"));
    }

    #[test]
    fn test_units_keep_first_appearance_order() {
        let units = parse(&[
            "UNIT - 3",
            "1) Question text number one (10)",
            "UNIT - 1",
            "2) Question text number two (10)",
        ]);
        let keys: Vec<&String> = units.keys().collect();
        assert_eq!(keys, vec!["unit3", "unit1"]);
    }
}
