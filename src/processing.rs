//! 核心业务处理模块
//!
//! 训练侧的两个流程：
//! - 数据集处理：input_pdfs 中的试卷 PDF → data/<科目>/sem<N>/units.json
//! - 模型训练：data 下的全部 units.json → 聚合 → 模式模型落盘

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::models::{RawPaper, SubjectUnits};
use crate::parser;
use crate::pattern::{aggregate, PatternStore};
use crate::services::pdf_service;

/// 数据集处理统计
#[derive(Debug, Default)]
pub struct ProcessingStats {
    /// 成功读取的 PDF 数
    pub pdfs_processed: usize,
    /// 读取失败被跳过的 PDF 数
    pub pdfs_failed: usize,
    /// 切分出的试卷总数
    pub papers_detected: usize,
    /// 成功落盘的（科目, 学期）数据集数
    pub datasets_saved: usize,
}

/// 处理训练数据集：扫描 PDF 目录，解析并落盘结构化 JSON
pub async fn process_dataset(config: &Config) -> Result<ProcessingStats> {
    let mut stats = ProcessingStats::default();

    let pdf_files = collect_pdf_files(&config.input_pdfs_dir).await?;
    if pdf_files.is_empty() {
        warn!(
            "⚠️ 在 {}/ 中没有找到任何PDF，请放入试卷后重新运行",
            config.input_pdfs_dir
        );
        return Ok(stats);
    }

    info!("✓ 找到 {} 个待处理的PDF", pdf_files.len());

    for pdf_path in &pdf_files {
        // 单个 PDF 读取失败不影响整批
        let lines = match pdf_service::extract_lines(pdf_path).await {
            Ok(lines) => lines,
            Err(e) => {
                warn!("跳过无法读取的PDF {}: {}", pdf_path.display(), e);
                stats.pdfs_failed += 1;
                continue;
            }
        };

        if lines.iter().all(|line| line.trim().is_empty()) {
            warn!("⚠️ PDF {} 没有提取出任何文本，跳过", pdf_path.display());
            stats.pdfs_failed += 1;
            continue;
        }

        stats.pdfs_processed += 1;

        let papers = parser::segment(&lines);
        info!(
            "📄 {} 中识别出 {} 份试卷",
            pdf_path.display(),
            papers.len()
        );
        stats.papers_detected += papers.len();

        for paper in papers.iter().filter(|p| p.has_subject()) {
            if save_paper_dataset(config, paper).await? {
                stats.datasets_saved += 1;
            }
        }
    }

    Ok(stats)
}

/// 解析单份试卷并写出 units.json
///
/// 单元提取为空时跳过（返回 false）
async fn save_paper_dataset(config: &Config, paper: &RawPaper) -> Result<bool> {
    let units = parser::parse_units(&paper.lines);
    if units.is_empty() {
        warn!(
            "⚠️ {} (学期 {}) 没有提取出任何单元，跳过",
            paper.subject_name, paper.semester
        );
        return Ok(false);
    }

    info!(
        "✅ 已解析 [{} | 学期 {}]: {} 个单元",
        paper.subject_name,
        paper.semester,
        units.len()
    );

    let dataset = SubjectUnits {
        subject: paper.subject_name.clone(),
        semester: paper.semester.to_string(),
        units,
    };

    let save_dir = Path::new(&config.data_dir)
        .join(&dataset.subject)
        .join(format!("sem{}", dataset.semester));
    tokio::fs::create_dir_all(&save_dir)
        .await
        .with_context(|| format!("无法创建目录: {}", save_dir.display()))?;

    let json_path = save_dir.join("units.json");
    let json = serde_json::to_string_pretty(&dataset)?;
    tokio::fs::write(&json_path, json)
        .await
        .with_context(|| format!("无法写入数据集文件: {}", json_path.display()))?;

    Ok(true)
}

/// 训练模式模型：加载全部数据集，聚合后落盘
pub async fn train_model(config: &Config) -> Result<()> {
    info!("📁 正在加载已解析的数据集...");
    let mut datasets = load_all_datasets(&config.data_dir).await?;

    if datasets.is_empty() {
        warn!("⚠️ data/ 中没有找到 units.json，模型将只含兜底模式");
        warn!("💡 请先把PDF放入 input_pdfs/ 并运行 process");
        // 按需求仍然产出模型文件：注入合成的 Generic 兜底模式
        datasets.push(SubjectUnits {
            subject: "Generic".to_string(),
            semester: "0".to_string(),
            units: Default::default(),
        });
    }

    info!("✅ 加载了 {} 个（科目, 学期）数据集", datasets.len());

    let model = aggregate(&datasets);

    let store = PatternStore::new(&config.models_dir);
    store.save(&model)?;

    info!("✅ 模式模型已保存至 {}/", config.models_dir);
    Ok(())
}

/// 收集目录下所有 .pdf 文件
async fn collect_pdf_files(dir: &str) -> Result<Vec<PathBuf>> {
    let folder = PathBuf::from(dir);
    if !folder.exists() {
        tokio::fs::create_dir_all(&folder)
            .await
            .with_context(|| format!("无法创建目录: {}", folder.display()))?;
        return Ok(Vec::new());
    }

    let mut pdf_files = Vec::new();
    let mut entries = tokio::fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", dir))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_pdf = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf {
            pdf_files.push(path);
        }
    }

    pdf_files.sort();
    Ok(pdf_files)
}

/// 加载 data 目录下全部数据集文件
///
/// 目录布局：data/<科目>/sem<N>/units.json；
/// units.json 缺失时回退到该目录下第一个 .json 文件。
/// 单个文件解析失败只记录警告并跳过
pub async fn load_all_datasets(data_dir: &str) -> Result<Vec<SubjectUnits>> {
    let mut datasets = Vec::new();

    let root = PathBuf::from(data_dir);
    if !root.exists() {
        return Ok(datasets);
    }

    let mut subjects = tokio::fs::read_dir(&root)
        .await
        .with_context(|| format!("无法读取文件夹: {}", data_dir))?;

    while let Some(subject_entry) = subjects.next_entry().await? {
        if !subject_entry.file_type().await?.is_dir() {
            continue;
        }

        let mut sems = tokio::fs::read_dir(subject_entry.path()).await?;
        while let Some(sem_entry) = sems.next_entry().await? {
            if !sem_entry.file_type().await?.is_dir() {
                continue;
            }

            if let Some(json_path) = find_dataset_file(&sem_entry.path()).await? {
                match load_dataset_file(&json_path).await {
                    Ok(dataset) => datasets.push(dataset),
                    Err(e) => {
                        warn!("加载数据集失败 {}: {}", json_path.display(), e);
                    }
                }
            }
        }
    }

    Ok(datasets)
}

/// 在 sem 目录下定位数据集文件
async fn find_dataset_file(sem_dir: &Path) -> Result<Option<PathBuf>> {
    let preferred = sem_dir.join("units.json");
    if preferred.exists() {
        return Ok(Some(preferred));
    }

    // 文件名有出入时的回退：目录下第一个 .json
    let mut entries = tokio::fs::read_dir(sem_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            return Ok(Some(path));
        }
    }

    Ok(None)
}

async fn load_dataset_file(path: &Path) -> Result<SubjectUnits> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取数据集文件: {}", path.display()))?;
    let dataset: SubjectUnits = serde_json::from_str(&content)
        .with_context(|| format!("无法解析数据集文件: {}", path.display()))?;
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pattern::DEFAULT_MARKS;
    use crate::pattern::aggregate;

    #[tokio::test]
    async fn test_load_all_datasets_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let sem_dir = dir.path().join("Compiler Design").join("sem5");
        tokio::fs::create_dir_all(&sem_dir).await.unwrap();

        let json = r#"{
            "subject": "Compiler Design",
            "semester": "5",
            "units": {
                "unit1": {
                    "setA": [{"text": "Explain parsing", "marks": 10}],
                    "setB": [{"text": "Explain scanning", "marks": 10}]
                }
            }
        }"#;
        tokio::fs::write(sem_dir.join("units.json"), json).await.unwrap();

        let datasets = load_all_datasets(dir.path().to_str().unwrap()).await.unwrap();
        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].subject, "Compiler Design");
        assert_eq!(datasets[0].units["unit1"].set_a[0].marks, 10);
    }

    #[tokio::test]
    async fn test_load_all_datasets_fallback_to_any_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let sem_dir = dir.path().join("OS").join("sem4");
        tokio::fs::create_dir_all(&sem_dir).await.unwrap();

        let json = r#"{"subject": "OS", "semester": "4", "units": {}}"#;
        tokio::fs::write(sem_dir.join("questions_os.json"), json)
            .await
            .unwrap();

        let datasets = load_all_datasets(dir.path().to_str().unwrap()).await.unwrap();
        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].subject, "OS");
    }

    #[tokio::test]
    async fn test_load_all_datasets_skips_malformed_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let sem_dir = dir.path().join("OS").join("sem4");
        tokio::fs::create_dir_all(&sem_dir).await.unwrap();
        tokio::fs::write(sem_dir.join("units.json"), "not json")
            .await
            .unwrap();

        let datasets = load_all_datasets(dir.path().to_str().unwrap()).await.unwrap();
        assert!(datasets.is_empty());
    }

    #[test]
    fn test_generic_fallback_dataset_aggregates_to_default() {
        let fallback = SubjectUnits {
            subject: "Generic".to_string(),
            semester: "0".to_string(),
            units: Default::default(),
        };
        let model = aggregate(&[fallback]);
        let units = &model["Generic_0"].units;
        assert_eq!(units.len(), 4);
        assert_eq!(units["unit1"].set_a, DEFAULT_MARKS.to_vec());
    }
}
