//! 应用编排层
//!
//! 把 CLI 子命令分发到对应流程，并负责启动/收尾日志

use anyhow::Result;
use std::fs;
use tracing::info;

use crate::cli::Commands;
use crate::config::Config;
use crate::generator;
use crate::processing::{self, ProcessingStats};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config)?;
        Ok(Self { config })
    }

    /// 运行指定的子命令
    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Process => {
                log_startup("试卷数据集解析");
                let stats = processing::process_dataset(&self.config).await?;
                print_processing_stats(&stats, &self.config);
            }
            Commands::Train => {
                log_startup("模式模型训练");
                processing::train_model(&self.config).await?;
                info!("🎉 训练流程完成");
            }
            Commands::Generate {
                subject,
                semester,
                notes,
            } => {
                log_startup("试卷生成");
                let paper =
                    generator::generate_paper(&self.config, &subject, &semester, &notes).await?;
                info!("🎉 试卷生成完成: {}", paper.id);

                // 结果是唯一写到 stdout 的内容，供上游程序直接读取
                println!("{}", serde_json::to_string(&paper)?);
            }
        }
        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn init_log_file(config: &Config) -> Result<()> {
    let log_header = format!(
        "{}\n试卷处理日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(&config.output_log_file, log_header)?;
    Ok(())
}

fn log_startup(mode: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - {}", mode);
    info!("{}", "=".repeat(60));
}

fn print_processing_stats(stats: &ProcessingStats, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 数据集处理统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功读取PDF: {}", stats.pdfs_processed);
    info!("❌ 读取失败PDF: {}", stats.pdfs_failed);
    info!("📄 识别出试卷: {}", stats.papers_detected);
    info!("💾 落盘数据集: {}", stats.datasets_saved);
    info!("{}", "=".repeat(60));
    info!("\n结构化JSON已保存至 {}/ 子目录", config.data_dir);
}
