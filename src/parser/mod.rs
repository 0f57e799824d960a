//! 文本到结构的核心解析器
//!
//! 两个阶段：
//! - `segmenter` - 把多份试卷的连续行流切分成单份试卷
//! - `units` - 在单份试卷内识别单元/套题/OR/题目边界的状态机
//!
//! 所有标记匹配器集中在 `markers`，按固定优先级求值

pub mod markers;
pub mod segmenter;
pub mod units;

pub use segmenter::segment;
pub use units::{parse_units, UnitSetParser};
