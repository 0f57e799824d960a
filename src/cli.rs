//! 命令行定义
//!
//! 三个子命令对应三个流程：process（解析数据集）、
//! train（训练模式模型）、generate（生成新试卷）

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "question_paper_gen", about = "试卷结构模式解析与生成工具")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 解析 input_pdfs 中的试卷PDF，输出结构化 units.json
    Process,

    /// 聚合已解析数据集，训练分值分布模式模型
    Train,

    /// 根据模式模型与学生笔记生成新试卷（JSON 输出到 stdout）
    Generate {
        /// 科目名
        #[arg(long)]
        subject: String,

        /// 学期
        #[arg(long)]
        semester: String,

        /// 学生笔记PDF路径，可指定多个
        #[arg(long = "notes", num_args = 1.., required = true)]
        notes: Vec<PathBuf>,
    },
}
