//! 模式聚合
//!
//! 把多份 SubjectUnits 折叠成一个 PatternModel。
//! 同键的后来者按（单元, 套题）粒度覆盖先到者，不做统计合并。
//! 未来的扩展点：对观测到的分值序列取众数代替末次覆盖

use indexmap::IndexMap;
use tracing::debug;

use crate::models::pattern::{default_units, PatternModel, SubjectPattern, UnitMarks};
use crate::models::SubjectUnits;

/// 聚合解析结果为模式模型
///
/// 每个（单元, 套题）取题目分值的有序序列（剔除非正分值），
/// 非空才写入。折叠完成后：
/// - units 为空的键填入固定默认模式
/// - 每个单元缺失的一侧镜像补齐，保证两套都存在且非空
pub fn aggregate(datasets: &[SubjectUnits]) -> PatternModel {
    let mut model = PatternModel::new();

    for dataset in datasets {
        let key = dataset.key();
        let pattern = model.entry(key).or_insert_with(|| SubjectPattern {
            subject: dataset.subject.clone(),
            semester: dataset.semester.clone(),
            units: IndexMap::new(),
        });

        for (unit_name, sets) in &dataset.units {
            let unit = pattern
                .units
                .entry(unit_name.clone())
                .or_insert_with(UnitMarks::default);

            let marks_a: Vec<u32> = sets.set_a.iter().map(|q| q.marks).filter(|m| *m > 0).collect();
            if !marks_a.is_empty() {
                unit.set_a = marks_a;
            }
            let marks_b: Vec<u32> = sets.set_b.iter().map(|q| q.marks).filter(|m| *m > 0).collect();
            if !marks_b.is_empty() {
                unit.set_b = marks_b;
            }
        }
    }

    // 收尾：补默认模式、镜像补齐
    for pattern in model.values_mut() {
        if pattern.units.is_empty() {
            pattern.units = default_units();
            continue;
        }
        for unit in pattern.units.values_mut() {
            unit.mirror_missing();
        }
    }

    debug!("聚合出 {} 个（科目, 学期）模式", model.len());
    model
}
