pub mod generated;
pub mod paper;
pub mod pattern;

pub use generated::{GeneratedPaper, GeneratedQuestion, Section};
pub use paper::{PaperUnits, Question, RawPaper, SetLabel, SubjectUnits, UnitSets};
pub use pattern::{PatternModel, SubjectPattern, UnitMarks};
