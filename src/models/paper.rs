//! 试卷解析数据模型
//!
//! 从 PDF 文本切分/解析出来的中间结构，最终以 units.json 落盘

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 单个题目
///
/// 文本已去除编号和分值标注，分值为正整数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub marks: u32,
}

/// 一个单元内的两套平行题目（内部选做）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSets {
    #[serde(rename = "setA")]
    pub set_a: Vec<Question>,
    #[serde(rename = "setB")]
    pub set_b: Vec<Question>,
}

/// 单元键（"unit1".."unitN"）到两套题目的有序映射
///
/// 键的顺序是文本中首次出现的顺序，不保证按数字排序
pub type PaperUnits = IndexMap<String, UnitSets>;

/// 当前活跃的套题标签
///
/// "OR" 行只会从 A 翻转到 B，不存在 Set C
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SetLabel {
    #[default]
    A,
    B,
}

impl SetLabel {
    /// 从显式标记字母解析；A 以外的字母一律归入 B
    pub fn from_letter(letter: char) -> Self {
        if letter.to_ascii_uppercase() == 'A' {
            SetLabel::A
        } else {
            SetLabel::B
        }
    }
}

/// 切分出的单份试卷原始数据
///
/// 在识别到院校标记（或首个科目行）时创建，
/// 下一个边界出现或输入结束时定稿
#[derive(Debug, Clone, Default)]
pub struct RawPaper {
    pub subject_name: String,
    pub course_code: String,
    pub semester: u32,
    pub lines: Vec<String>,
}

impl RawPaper {
    /// 科目名是否已经提取到
    ///
    /// 提不出科目名的试卷仍然保留，由调用方过滤
    pub fn has_subject(&self) -> bool {
        !self.subject_name.is_empty()
    }
}

/// 单个（科目, 学期）的解析结果，即 units.json 的内容
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectUnits {
    pub subject: String,
    pub semester: String,
    pub units: PaperUnits,
}

impl SubjectUnits {
    /// 模型键："<subject>_<semester>"
    pub fn key(&self) -> String {
        format!("{}_{}", self.subject, self.semester)
    }
}
