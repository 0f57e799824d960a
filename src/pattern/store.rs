//! 模式模型持久化
//!
//! 二进制主文件（MessagePack）加一份人类可读的 JSON 镜像。
//! 加载失败永远不向上抛：缺文件或文件损坏都退回固定默认模型

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::{AppError, ModelError};
use crate::models::pattern::{default_model, default_units, PatternModel, UnitMarks};

/// 二进制模型文件名
const MODEL_FILE: &str = "pattern_model.mpk";
/// JSON 镜像文件名
const MIRROR_FILE: &str = "pattern_model.json";

/// 模式模型存储
///
/// 持有模型目录；保存写出二进制 + JSON 镜像，加载只读二进制
#[derive(Debug)]
pub struct PatternStore {
    dir: PathBuf,
}

impl PatternStore {
    /// 创建存储，目录不存在时自动创建
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    fn mirror_path(&self) -> PathBuf {
        self.dir.join(MIRROR_FILE)
    }

    /// 保存模型：二进制主文件 + JSON 镜像
    pub fn save(&self, model: &PatternModel) -> Result<()> {
        let bytes = rmp_serde::to_vec_named(model).map_err(|e| {
            AppError::Model(ModelError::SerializeFailed {
                source: Box::new(e),
            })
        })?;
        let path = self.model_path();
        fs::write(&path, bytes)
            .with_context(|| format!("无法写入模型文件: {}", path.display()))?;

        let json = serde_json::to_string_pretty(model)?;
        let mirror = self.mirror_path();
        fs::write(&mirror, json)
            .with_context(|| format!("无法写入JSON镜像: {}", mirror.display()))?;

        debug!("模型已保存至 {} 与 {}", path.display(), mirror.display());
        Ok(())
    }

    /// 加载模型
    ///
    /// 文件缺失或反序列化失败时记录警告并返回固定默认模型，不报错
    pub fn load(&self) -> PatternModel {
        let path = self.model_path();
        if !path.exists() {
            warn!("模型文件不存在 ({})，使用固定默认模式", path.display());
            return default_model();
        }

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("读取模型文件失败 ({}): {}，使用固定默认模式", path.display(), e);
                return default_model();
            }
        };

        match rmp_serde::from_slice(&bytes) {
            Ok(model) => model,
            Err(e) => {
                // 损坏的模型文件只降级，不向上抛
                let err = AppError::Model(ModelError::Malformed {
                    path: path.display().to_string(),
                    source: Box::new(e),
                });
                warn!("{}，使用固定默认模式", err);
                default_model()
            }
        }
    }

    /// 查找（科目, 学期）对应的单元模式，逐级降级：
    /// 1. 精确键 "<subject>_<semester>"
    /// 2. 科目名不区分大小写匹配的第一条
    /// 3. 模型中的第一条
    /// 4. 固定默认模式
    pub fn resolve(
        model: &PatternModel,
        subject: &str,
        semester: &str,
    ) -> IndexMap<String, UnitMarks> {
        let key = format!("{}_{}", subject, semester);
        if let Some(pattern) = model.get(&key) {
            return pattern.units.clone();
        }

        if let Some(pattern) = model
            .values()
            .find(|p| p.subject.eq_ignore_ascii_case(subject))
        {
            debug!("精确键 {} 未命中，按科目名回退到 {}", key, pattern.subject);
            return pattern.units.clone();
        }

        if let Some(pattern) = model.values().next() {
            debug!("科目 {} 未见于训练数据，回退到首条模式", subject);
            return pattern.units.clone();
        }

        default_units()
    }
}
