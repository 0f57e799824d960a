//! 结构标记匹配器
//!
//! 试卷文本里所有需要识别的标记模式，全部集中在这里。
//! `units` 状态机按固定优先级求值：单元 → 套题 → OR → 题目起始 → 续行，
//! 这个顺序是解析语义的一部分，不要为了风格调整。

use once_cell::sync::Lazy;
use phf::phf_map;
use regex::Regex;

/// 院校标记，出现在每份试卷抬头，作为切分边界（子串匹配，不区分大小写）
pub const INSTITUTION_MARKER: &str = "REVA UNIVERSITY";

/// "科目名 [课程代码]" 行，如 "Compiler Design [B20CS0501]"
pub static SUBJECT_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.*?)\s*\[([A-Z0-9]+)\]").unwrap());

/// "Semester: N" 行，覆盖从课程代码推导出的学期号
pub static SEMESTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Semester\s*:\s*(\d+)").unwrap());

/// 单元标记："UNIT - 1"、"UNIT I" 等，连字符可省略。
/// 两端词边界防止 "UNIVERSITY" 误触发
pub static UNIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bUNIT\b\s*-?\s*([A-Z0-9]+)").unwrap());

/// 显式套题标记："Set A"、"Set B:"。
/// 尾部词边界防止 "settings" 这类普通词误触发
pub static SET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bSet\s*([A-Z])\b").unwrap());

/// 独立 "OR" 行，整行只有 OR（允许两侧空白）
pub static OR_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*OR\s*$").unwrap());

/// 题目起始编号：1)、2a.、Q3)、(a)、b) 等
pub static QUESTION_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:Q?\d+[a-z]?[.)]|\([a-z]\)|[a-z]\))\s+").unwrap());

/// 分值标注：(10)、[5M]、(5 Marks) 等，行内任意位置
pub static MARKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[(\[]\s*(\d+)\s*(?:M|Marks?)?\s*[)\]]").unwrap());

/// 罗马数字单元号到阿拉伯数字的映射（I..V）
static ROMAN_UNITS: phf::Map<&'static str, &'static str> = phf_map! {
    "I" => "1",
    "II" => "2",
    "III" => "3",
    "IV" => "4",
    "V" => "5",
};

/// 归一化单元号 token：罗马数字映射为 1..5，其余取大写原样
pub fn normalize_unit_token(token: &str) -> String {
    let upper = token.to_uppercase();
    match ROMAN_UNITS.get(upper.as_str()) {
        Some(mapped) => (*mapped).to_string(),
        None => upper,
    }
}

/// 提取行内最后一个分值标注，没有则返回 0
pub fn last_marks(line: &str) -> u32 {
    MARKS
        .captures_iter(line)
        .last()
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

/// 去掉行内所有分值标注并修剪空白
pub fn strip_marks(line: &str) -> String {
    MARKS.replace_all(line, "").trim().to_string()
}

/// 清洗科目名：只保留字母数字、空格、连字符和下划线
pub fn clean_subject(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
        .collect::<String>()
        .trim()
        .to_string()
}

/// 从课程代码推导学期号：取代码中第一个数字，没有则为 0
pub fn semester_from_course_code(code: &str) -> u32 {
    code.chars()
        .find(|c| c.is_ascii_digit())
        .and_then(|c| c.to_digit(10))
        .unwrap_or(0)
}
