//! PDF 文本提取服务 - 业务能力层
//!
//! 只负责"从 PDF 拿到文本行"能力，不关心流程。
//! 提取本身是阻塞操作，统一包在 spawn_blocking 里

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, warn};

use crate::error::{AppError, PdfError};

/// 提取单个 PDF 的全部文本行
///
/// 行顺序与页面线性化顺序一致，不做任何过滤；
/// 空行的跳过由切分器负责
pub async fn extract_lines(path: &Path) -> Result<Vec<String>> {
    let text = extract_text(path).await?;
    Ok(text.lines().map(|line| line.to_string()).collect())
}

/// 提取多个笔记 PDF 并拼接为一段文本
///
/// 单个 PDF 读取失败只记录警告并跳过；
/// 所有输入都没有产出文本时升级为致命错误
pub async fn extract_notes_text(paths: &[PathBuf]) -> Result<String> {
    let mut text = String::new();

    for path in paths {
        match extract_text(path).await {
            Ok(extracted) => {
                text.push_str(&extracted);
                text.push('\n');
            }
            Err(e) => {
                warn!("跳过无法读取的笔记PDF {}: {}", path.display(), e);
            }
        }
    }

    if text.trim().is_empty() {
        return Err(AppError::Pdf(PdfError::NoContentExtracted).into());
    }

    Ok(text)
}

/// 底层提取：整个文档的线性化文本
async fn extract_text(path: &Path) -> Result<String> {
    debug!("正在读取PDF: {}", path.display());

    let path_buf = path.to_path_buf();
    let result = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path_buf))
        .await
        .map_err(|e| AppError::Other(format!("PDF提取任务失败: {}", e)))?;

    result.map_err(|e| AppError::pdf_unreadable(path.display().to_string(), e).into())
}
