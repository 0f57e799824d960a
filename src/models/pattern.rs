//! 分值分布模式模型
//!
//! 聚合多份试卷后得到的每（科目, 学期）代表性分值模式

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 固定默认分值序列
pub const DEFAULT_MARKS: [u32; 3] = [10, 10, 5];

/// 默认单元数量（unit1..unit4）
pub const DEFAULT_UNIT_COUNT: usize = 4;

/// 一个单元两套题的分值序列
///
/// 空向量表示该套缺失；聚合收尾后两套都保证非空
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitMarks {
    #[serde(rename = "setA")]
    pub set_a: Vec<u32>,
    #[serde(rename = "setB")]
    pub set_b: Vec<u32>,
}

impl UnitMarks {
    /// 镜像补齐缺失的一侧，保证平行选做对称
    ///
    /// 两侧都缺失时填入固定默认序列
    pub fn mirror_missing(&mut self) {
        if self.set_a.is_empty() && !self.set_b.is_empty() {
            self.set_a = self.set_b.clone();
        } else if self.set_b.is_empty() && !self.set_a.is_empty() {
            self.set_b = self.set_a.clone();
        } else if self.set_a.is_empty() && self.set_b.is_empty() {
            self.set_a = DEFAULT_MARKS.to_vec();
            self.set_b = DEFAULT_MARKS.to_vec();
        }
    }
}

/// 单个（科目, 学期）的分值模式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectPattern {
    pub subject: String,
    pub semester: String,
    pub units: IndexMap<String, UnitMarks>,
}

/// 模式模型："<subject>_<semester>" → 模式
///
/// 训练时一次性构建并落盘，生成时只读
pub type PatternModel = IndexMap<String, SubjectPattern>;

/// 固定默认单元模式：unit1..unit4，每套 [10, 10, 5]
pub fn default_units() -> IndexMap<String, UnitMarks> {
    let mut units = IndexMap::new();
    for i in 1..=DEFAULT_UNIT_COUNT {
        units.insert(
            format!("unit{}", i),
            UnitMarks {
                set_a: DEFAULT_MARKS.to_vec(),
                set_b: DEFAULT_MARKS.to_vec(),
            },
        );
    }
    units
}

/// 模型文件缺失/损坏时的兜底模型
///
/// 单条 Generic_0 记录，单元结构为固定默认
pub fn default_model() -> PatternModel {
    let mut model = PatternModel::new();
    model.insert(
        "Generic_0".to_string(),
        SubjectPattern {
            subject: "Generic".to_string(),
            semester: "0".to_string(),
            units: default_units(),
        },
    );
    model
}
