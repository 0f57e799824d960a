//! 试卷切分
//!
//! 把一份大 PDF 导出的连续行流切分成单份试卷记录，
//! 同时顺带提取科目名、课程代码和学期号

use tracing::debug;

use crate::models::RawPaper;
use crate::parser::markers;

/// 把行流切分为单份试卷
///
/// 切分规则：
/// - 包含院校标记的行开启新试卷（标记行本身不计入试卷内容）
/// - 标记尚未出现时，首个匹配 "科目 [代码]" 的行隐式开启试卷
/// - 空行完全跳过；其余非空行都追加到当前试卷
/// - 输入结束时冲刷未关闭的试卷
///
/// 提不出科目名的试卷也会保留（subject_name 为空），由调用方过滤
pub fn segment(lines: &[String]) -> Vec<RawPaper> {
    let mut papers = Vec::new();
    let mut current: Option<RawPaper> = None;

    for line in lines {
        let line_clean = line.trim();
        if line_clean.is_empty() {
            continue;
        }

        if line_clean
            .to_uppercase()
            .contains(markers::INSTITUTION_MARKER)
        {
            if let Some(paper) = current.take() {
                papers.push(paper);
            }
            current = Some(RawPaper::default());
            continue;
        }

        match current.as_mut() {
            Some(paper) => {
                if paper.subject_name.is_empty() {
                    if let Some(caps) = markers::SUBJECT_CODE.captures(line_clean) {
                        apply_subject_match(paper, &caps[1], &caps[2]);
                    }
                }

                // 学期号显式声明优先于课程代码推导
                if let Some(caps) = markers::SEMESTER.captures(line_clean) {
                    if let Ok(sem) = caps[1].parse() {
                        paper.semester = sem;
                    }
                }

                paper.lines.push(line_clean.to_string());
            }
            None => {
                // 语料缺少院校标记时的隐式开启
                if let Some(caps) = markers::SUBJECT_CODE.captures(line_clean) {
                    let mut paper = RawPaper::default();
                    apply_subject_match(&mut paper, &caps[1], &caps[2]);
                    paper.lines.push(line_clean.to_string());
                    current = Some(paper);
                }
            }
        }
    }

    if let Some(paper) = current.take() {
        papers.push(paper);
    }

    debug!("切分出 {} 份试卷", papers.len());
    papers
}

/// 把 "科目 [代码]" 的捕获结果写入试卷元数据
fn apply_subject_match(paper: &mut RawPaper, subject: &str, code: &str) {
    paper.subject_name = markers::clean_subject(subject);
    paper.course_code = code.trim().to_string();
    paper.semester = markers::semester_from_course_code(&paper.course_code);
}
