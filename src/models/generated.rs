//! 生成结果数据模型
//!
//! generate 命令最终输出到 stdout 的 JSON 文档结构

use serde::{Deserialize, Serialize};

/// 生成的单个题目
///
/// "OR" 分隔行也是一个 text == "OR"、marks == 0 的题目条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub text: String,
    #[serde(default)]
    pub marks: u32,
}

/// 生成试卷中的一个章节（对应一个单元）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub questions: Vec<GeneratedQuestion>,
}

/// LLM 返回的 JSON 主体，只含 sections 数组
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedSections {
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// 完整的生成试卷文档
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPaper {
    pub id: String,
    pub university: String,
    pub subject: String,
    pub course: String,
    pub semester: String,
    pub student_name: String,
    pub date: String,
    pub time_allowed: String,
    pub max_marks: u32,
    pub sections: Vec<Section>,
}
