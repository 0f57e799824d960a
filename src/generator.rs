//! 试卷生成流程
//!
//! 加载模式模型 → 提取笔记文本 → 构建带结构约束的提示词 →
//! 调用 LLM → 校验返回的 JSON → 计算总分并补齐元数据

use std::path::PathBuf;

use anyhow::Result;
use indexmap::IndexMap;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::models::generated::{GeneratedPaper, Section};
use crate::models::pattern::{UnitMarks, DEFAULT_MARKS};
use crate::pattern::PatternStore;
use crate::services::{pdf_service, LlmService};

/// 笔记文本上限，超出部分截断后附截断标记
const NOTES_CHAR_LIMIT: usize = 150_000;

/// 截断标记
const TRUNCATION_NOTE: &str = "\n...[Content Truncated]...";

/// 总分兜底值
const FALLBACK_MAX_MARKS: u32 = 100;

/// 生成一份新试卷
///
/// # 参数
/// - `config`: 配置（模型目录、LLM 凭证）
/// - `subject`: 科目名
/// - `semester`: 学期
/// - `notes_paths`: 学生笔记 PDF 路径（至少一个）
pub async fn generate_paper(
    config: &Config,
    subject: &str,
    semester: &str,
    notes_paths: &[PathBuf],
) -> Result<GeneratedPaper> {
    // 凭证缺失在做任何工作之前报出
    if config.gemini_api_key.is_empty() {
        return Err(AppError::missing_credential("GEMINI_API_KEY").into());
    }

    // 1. 加载模式模型并查找该（科目, 学期）的单元模式
    let store = PatternStore::new(&config.models_dir);
    let model = store.load();
    let pattern_units = PatternStore::resolve(&model, subject, semester);
    info!("📐 使用 {} 个单元的分值模式", pattern_units.len());

    // 2. 提取学生笔记文本
    let notes_text = pdf_service::extract_notes_text(notes_paths).await?;
    info!("📝 笔记文本共 {} 字符", notes_text.len());

    // 3. 构建提示词
    let prompt = build_prompt(subject, semester, &pattern_units, &notes_text);

    // 4. 调用生成模型并校验返回结构
    let llm = LlmService::new(config);
    let sections = llm.generate_sections(&prompt).await?;
    info!("✅ 生成了 {} 个单元章节", sections.len());

    // 5. 计算总分并补齐元数据
    let max_marks = compute_max_marks(&sections);
    Ok(assemble_paper(subject, semester, max_marks, sections))
}

/// 构建带结构约束的提示词
///
/// 逐单元列出两套题必须匹配的分值序列；笔记超限时截断
fn build_prompt(
    subject: &str,
    semester: &str,
    pattern_units: &IndexMap<String, UnitMarks>,
    notes_text: &str,
) -> String {
    let mut structure_rules = String::new();
    let unit_count = if pattern_units.is_empty() {
        4
    } else {
        pattern_units.len()
    };

    for (unit_name, sets) in pattern_units {
        // "unit1" → "UNIT 1"
        let display_name = unit_name.to_uppercase().replace("UNIT", "UNIT ");

        let set_a = marks_list(&sets.set_a);
        let set_b = marks_list(&sets.set_b);

        structure_rules.push_str(&format!(
            "\n- {}:\n  \
             - MUST contain exactly two parallel sets (Set A OR Set B).\n  \
             - Set A must contain questions worth exactly: {}.\n  \
             - Set B must contain questions worth exactly: {}.\n",
            display_name, set_a, set_b
        ));
    }

    let notes = truncate_notes(notes_text);

    format!(
        r#"Act as a full-stack software engineer and expert university professor. Generate a REVA University question paper for subject {subject}, semester {semester}, based on these notes and exam pattern.

CRITICAL REQUIREMENT: UNIT-WISE PARALLEL SETS
The generated question paper MUST strictly follow a unit-wise pattern, where each unit has two sets of parallel questions (an internal choice).
You MUST NOT generate any generic "SECTION A" or "SECTION B" headers. You MUST only generate UNIT 1, UNIT 2, UNIT 3, UNIT 4, etc.
Even if the provided notes are short or missing topics for certain units, YOU MUST generate questions for ALL {unit_count} REQUIRED UNITS by extrapolating generic academic knowledge for {subject}.

REQUIRED EXAM STRUCTURE / WEIGHTAGE GUIDELINES:
{structure_rules}

Instructions for output:
1. Ensure the questions test different cognitive levels (Knowledge, Comprehension, Application, Analysis).
2. ONLY output valid JSON. No markdown backticks, no introduction.
3. You MUST use EXACTLY this JSON schema structure so the frontend can parse it. ALL required UNITS must be present.

{{
  "sections": [
    {{
      "name": "UNIT 1",
      "instructions": "Answer ONE full set (Set A OR Set B)",
      "questions": [
        {{ "text": "Set A: 1) question text goes here.", "marks": 10 }},
        {{ "text": "Set A: 2) question text goes here.", "marks": 10 }},
        {{ "text": "Set A: 3) question text goes here.", "marks": 5 }},
        {{ "text": "OR", "marks": 0 }},
        {{ "text": "Set B: 4) question text goes here.", "marks": 10 }},
        {{ "text": "Set B: 5) question text goes here.", "marks": 10 }},
        {{ "text": "Set B: 6) question text goes here.", "marks": 5 }}
      ]
    }}
  ]
}}

Student Notes Material (Compiled from Multiple PDFs):
-------------------------
{notes}
-------------------------
"#
    )
}

/// [10, 10, 5] → "10M, 10M, 5M"
fn marks_list(marks: &[u32]) -> String {
    let marks = if marks.is_empty() {
        &DEFAULT_MARKS[..]
    } else {
        marks
    };
    marks
        .iter()
        .map(|m| format!("{}M", m))
        .collect::<Vec<_>>()
        .join(", ")
}

/// 笔记截断（按字符边界）
fn truncate_notes(notes_text: &str) -> String {
    if notes_text.chars().count() <= NOTES_CHAR_LIMIT {
        return notes_text.to_string();
    }
    let truncated: String = notes_text.chars().take(NOTES_CHAR_LIMIT).collect();
    truncated + TRUNCATION_NOTE
}

/// 计算试卷总分
///
/// 每个章节只累计第一个 "OR" 题目之前的分值（即 Set A 的总分，
/// 两套平行等价），跨章节求和；结果为 0 时用兜底值
pub fn compute_max_marks(sections: &[Section]) -> u32 {
    let mut max_marks = 0;
    for section in sections {
        for question in &section.questions {
            if question.text.trim().eq_ignore_ascii_case("OR") {
                break;
            }
            max_marks += question.marks;
        }
    }
    if max_marks > 0 {
        max_marks
    } else {
        FALLBACK_MAX_MARKS
    }
}

/// 补齐前端需要的标准元数据
fn assemble_paper(
    subject: &str,
    semester: &str,
    max_marks: u32,
    sections: Vec<Section>,
) -> GeneratedPaper {
    GeneratedPaper {
        id: format!(
            "GEN-{}-{}",
            subject.replace(' ', "").to_uppercase(),
            semester
        ),
        university: "REVA UNIVERSITY".to_string(),
        subject: subject.to_string(),
        course: "B.Tech".to_string(),
        semester: semester.to_string(),
        student_name: "Student".to_string(),
        date: "TBD".to_string(),
        time_allowed: "3 Hours".to_string(),
        max_marks,
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::generated::GeneratedQuestion;

    fn question(text: &str, marks: u32) -> GeneratedQuestion {
        GeneratedQuestion {
            text: text.to_string(),
            marks,
        }
    }

    fn section(questions: Vec<GeneratedQuestion>) -> Section {
        Section {
            name: "UNIT 1".to_string(),
            instructions: "Answer ONE full set (Set A OR Set B)".to_string(),
            questions,
        }
    }

    #[test]
    fn test_max_marks_counts_only_before_or() {
        let sections = vec![section(vec![
            question("Set A: 1) Explain parsing.", 10),
            question("Set A: 2) Explain scanning.", 10),
            question("Set A: 3) Define tokens.", 5),
            question("OR", 0),
            question("Set B: 4) Explain codegen.", 10),
            question("Set B: 5) Explain linking.", 10),
            question("Set B: 6) Define IR.", 5),
        ])];
        assert_eq!(compute_max_marks(&sections), 25);
    }

    #[test]
    fn test_max_marks_sums_across_sections() {
        let sections = vec![
            section(vec![question("Set A: 1) Q.", 10), question("OR", 0)]),
            section(vec![question("Set A: 2) Q.", 15), question("OR", 0)]),
        ];
        assert_eq!(compute_max_marks(&sections), 25);
    }

    #[test]
    fn test_max_marks_or_match_is_case_insensitive() {
        let sections = vec![section(vec![
            question("Set A: 1) Q.", 10),
            question("  or  ", 0),
            question("Set B: 2) Q.", 10),
        ])];
        assert_eq!(compute_max_marks(&sections), 10);
    }

    #[test]
    fn test_max_marks_zero_falls_back() {
        assert_eq!(compute_max_marks(&[]), FALLBACK_MAX_MARKS);
        let sections = vec![section(vec![question("OR", 0)])];
        assert_eq!(compute_max_marks(&sections), FALLBACK_MAX_MARKS);
    }

    #[test]
    fn test_prompt_contains_structure_rules() {
        let mut units = IndexMap::new();
        units.insert(
            "unit1".to_string(),
            UnitMarks {
                set_a: vec![10, 10, 5],
                set_b: vec![8, 12],
            },
        );
        let prompt = build_prompt("Compiler Design", "5", &units, "some notes");
        assert!(prompt.contains("UNIT 1"));
        assert!(prompt.contains("10M, 10M, 5M"));
        assert!(prompt.contains("8M, 12M"));
        assert!(prompt.contains("Compiler Design"));
        assert!(prompt.contains("some notes"));
    }

    #[test]
    fn test_prompt_truncates_long_notes() {
        let units = IndexMap::new();
        let notes = "x".repeat(NOTES_CHAR_LIMIT + 100);
        let prompt = build_prompt("CD", "5", &units, &notes);
        assert!(prompt.contains(TRUNCATION_NOTE.trim()));
    }

    #[test]
    fn test_assemble_paper_metadata() {
        let paper = assemble_paper("Compiler Design", "5", 100, vec![]);
        assert_eq!(paper.id, "GEN-COMPILERDESIGN-5");
        assert_eq!(paper.university, "REVA UNIVERSITY");
        assert_eq!(paper.course, "B.Tech");
        assert_eq!(paper.time_allowed, "3 Hours");
        assert_eq!(paper.max_marks, 100);
    }
}
