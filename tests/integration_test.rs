//! 端到端集成测试：原始文本 → 切分 → 单元解析 → 聚合 → 持久化 → 查找

use question_paper_gen::parser::{parse_units, segment};
use question_paper_gen::pattern::{aggregate, PatternStore};
use question_paper_gen::SubjectUnits;

/// 模拟一份双试卷 PDF 导出的线性化文本
fn corpus_lines() -> Vec<String> {
    let text = r#"
REVA UNIVERSITY
School of Computing and Information Technology
Compiler Design [B20CS0501]
Semester: 5
Time: 3 Hours Max Marks: 100
Answer ONE full set from each unit

UNIT - 1
1) Explain the phases of a compiler with a neat diagram. (10)
2) Construct the transition diagram for relational operators
and explain its working. (10)
3) Define tokens, patterns and lexemes. (5)
OR
4) Explain input buffering with sentinels. (10)
5) Write the regular definitions for unsigned numbers. (10)
6) List the cousins of the compiler. (5)

UNIT - II
1) Construct the predictive parsing table for the given grammar. (10)
2) Explain recursive descent parsing with an example. (10)
3) Define left recursion and left factoring. (5)
OR
4) Explain the working of an LR parser. [10M]
5) Construct the SLR parsing table for the grammar. (10)
6) Define handle and handle pruning. (5)

REVA UNIVERSITY
School of Computing and Information Technology
Operating Systems [B20CS0402]
Semester: 4

UNIT - 1
Set A
1) Explain process states with a transition diagram. (10)
2) Describe the services of an operating system. (10)
Set B
3) Explain the layered structure of an operating system. (10)
4) Compare monolithic and microkernel designs. (10)
"#;
    text.lines().map(|line| line.to_string()).collect()
}

#[test]
fn test_full_pipeline_text_to_pattern_model() {
    let lines = corpus_lines();

    // 切分：两份试卷，元数据齐全
    let papers = segment(&lines);
    assert_eq!(papers.len(), 2);
    assert_eq!(papers[0].subject_name, "Compiler Design");
    assert_eq!(papers[0].course_code, "B20CS0501");
    assert_eq!(papers[0].semester, 5);
    assert_eq!(papers[1].subject_name, "Operating Systems");
    assert_eq!(papers[1].semester, 4);

    // 单元解析：第一份试卷两个单元，OR 切换套题
    let cd_units = parse_units(&papers[0].lines);
    assert_eq!(cd_units.len(), 2);
    let unit1 = &cd_units["unit1"];
    assert_eq!(unit1.set_a.len(), 3);
    assert_eq!(unit1.set_b.len(), 3);
    // 跨行题目拼接，分值来自第二行
    assert!(unit1.set_a[1].text.contains("transition diagram"));
    assert!(unit1.set_a[1].text.contains("its working"));
    assert_eq!(unit1.set_a[1].marks, 10);
    // 罗马数字单元号归一化
    assert!(cd_units.contains_key("unit2"));
    // [10M] 形式的分值标注
    assert_eq!(cd_units["unit2"].set_b[0].marks, 10);

    // 显式 Set A / Set B 标记
    let os_units = parse_units(&papers[1].lines);
    assert_eq!(os_units["unit1"].set_a.len(), 2);
    assert_eq!(os_units["unit1"].set_b.len(), 2);

    // 聚合：每个（科目, 学期）一个模式，分值序列保序
    let datasets: Vec<SubjectUnits> = papers
        .iter()
        .map(|paper| SubjectUnits {
            subject: paper.subject_name.clone(),
            semester: paper.semester.to_string(),
            units: parse_units(&paper.lines),
        })
        .collect();
    let model = aggregate(&datasets);
    assert_eq!(model.len(), 2);
    assert_eq!(
        model["Compiler Design_5"].units["unit1"].set_a,
        vec![10, 10, 5]
    );
    assert_eq!(
        model["Compiler Design_5"].units["unit1"].set_b,
        vec![10, 10, 5]
    );
    assert_eq!(model["Operating Systems_4"].units["unit1"].set_a, vec![10, 10]);

    // 持久化往返 + 查找
    let dir = tempfile::TempDir::new().unwrap();
    let store = PatternStore::new(dir.path());
    store.save(&model).unwrap();
    let loaded = store.load();
    assert_eq!(loaded, model);

    let resolved = PatternStore::resolve(&loaded, "compiler design", "9");
    assert_eq!(resolved["unit1"].set_a, vec![10, 10, 5]);

    // 未见过的科目也绝不报错
    let fallback = PatternStore::resolve(&loaded, "Quantum Computing", "1");
    assert!(!fallback.is_empty());
}

#[test]
fn test_corpus_without_institution_marker() {
    let lines: Vec<String> = r#"
Data Structures [B20CS0301]
UNIT - 1
1) Explain the operations of a stack. (10)
OR
2) Explain the operations of a queue. (10)
"#
    .lines()
    .map(|line| line.to_string())
    .collect();

    let papers = segment(&lines);
    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].subject_name, "Data Structures");

    let units = parse_units(&papers[0].lines);
    assert_eq!(units["unit1"].set_a.len(), 1);
    assert_eq!(units["unit1"].set_b.len(), 1);
}
