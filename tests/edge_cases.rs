use gradefile::{evaluate_expression, parse, GradeValue, Outcome};

fn outcome(content: &str) -> Outcome {
    parse(content).unwrap().summary().unwrap().outcome().clone()
}

#[test]
fn empty_file_scores_zero_and_fails() {
    let summary = parse("").unwrap().summary().unwrap();
    assert!(summary.rows().is_empty());
    assert_eq!(
        summary.outcome(),
        &Outcome::Score {
            value: 0.0,
            passed: false,
        }
    );
}

#[test]
fn empty_sections_behave_like_empty_file() {
    let summary = parse("[breakdown]\n[grades]\n[config]\n")
        .unwrap()
        .summary()
        .unwrap();
    assert_eq!(
        summary.outcome(),
        &Outcome::Score {
            value: 0.0,
            passed: false,
        }
    );
}

#[test]
fn all_zero_weights_produce_nan_score() {
    // The normalizing denominator is zero; nothing guards the division.
    let content = "[breakdown]\nexams: 0\nhw: 0\n[grades]\nexams: 80%\nhw: 20%\n";
    let Outcome::Score { value, passed } = outcome(content) else {
        panic!("expected score outcome");
    };
    assert!(value.is_nan());
    assert!(!passed);
}

#[test]
fn duplicate_breakdown_category_keeps_both_rows() {
    let content = "[breakdown]\nhw: 0.2\nexams: 0.5\nhw: 0.3\n[grades]\nhw: 100%\nexams: 0%\n";
    let summary = parse(content).unwrap().summary().unwrap();
    // both declarations show up in the report
    let names: Vec<&str> = summary.rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["hw", "exams", "hw"]);
    // the math uses the last weight once: 0.3 / (0.3 + 0.5)
    let Outcome::Score { value, .. } = summary.outcome() else {
        panic!("expected score outcome");
    };
    assert!((value - 0.375).abs() < 1e-12);
}

#[test]
fn off_scheme_grades_do_not_affect_the_score() {
    let content = "[breakdown]\nexams: 1.0\n[grades]\nexams: 80%\nextra credit: 100%\n";
    assert_eq!(
        outcome(content),
        Outcome::Score {
            value: 0.8,
            passed: true,
        }
    );
}

#[test]
fn unknown_with_passing_knowns_needs_zero() {
    let content = "[breakdown]\nexams: 0.9\nhw: 0.1\n[grades]\nexams: 100%\nhw: unknown\n";
    assert_eq!(
        outcome(content),
        Outcome::MinimumNeeded {
            unknowns: vec!["hw".to_owned()],
            minimum: Some(0),
        }
    );
}

#[test]
fn perfect_score_cannot_strictly_exceed_full_passing_grade() {
    let content =
        "[breakdown]\nexams: 1.0\n[grades]\nexams: unknown\n[config]\npassing_grade: 100%\n";
    assert_eq!(
        outcome(content),
        Outcome::MinimumNeeded {
            unknowns: vec!["exams".to_owned()],
            minimum: None,
        }
    );
}

#[test]
fn several_unknowns_are_reported_together() {
    let content = "[breakdown]\nexams: 0.5\nhw: 0.25\nquizzes: 0.25\n\
                   [grades]\nexams: 0%\nhw: unknown\nquizzes: unknown\n\
                   [config]\npassing_grade: 0.25\n";
    assert_eq!(
        outcome(content),
        Outcome::MinimumNeeded {
            unknowns: vec!["hw".to_owned(), "quizzes".to_owned()],
            minimum: Some(51),
        }
    );
}

#[test]
fn repeated_passing_grade_last_write_wins() {
    let content = "[breakdown]\nexams: 1.0\n[grades]\nexams: 65%\n\
                   [config]\npassing_grade: 0.9\npassing_grade: 0.6\n";
    let summary = parse(content).unwrap().summary().unwrap();
    assert_eq!(summary.passing_grade(), 0.6);
    assert!(matches!(
        summary.outcome(),
        Outcome::Score { passed: true, .. }
    ));
}

#[test]
fn name_with_trailing_space_is_a_different_category() {
    // `exams ` in the breakdown does not match `exams` in the grades.
    let content = "[breakdown]\nexams : 1.0\n[grades]\nexams: 80%\n";
    let err = parse(content).unwrap().summary().unwrap_err();
    assert_eq!(err.to_string(), "Missing grade entry for \"exams \"");
}

#[test]
fn sections_can_be_revisited() {
    let content = "[breakdown]\nexams: 0.5\n[grades]\nexams: 80%\n\
                   [breakdown]\nhw: 0.5\n[grades]\nhw: 40%\n";
    let summary = parse(content).unwrap().summary().unwrap();
    let names: Vec<&str> = summary.rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["exams", "hw"]);
    let Outcome::Score { value, .. } = summary.outcome() else {
        panic!("expected score outcome");
    };
    assert!((value - 0.6).abs() < 1e-12);
}

#[test]
fn expression_weights_are_evaluated() {
    let content = "[breakdown]\nexams: percent(60)\nhw: percent(40)\n\
                   [grades]\nexams: 50%\nhw: 50%\n";
    let Outcome::Score { value, .. } = outcome(content) else {
        panic!("expected score outcome");
    };
    assert!((value - 0.5).abs() < 1e-12);
}

#[test]
fn arithmetic_over_builtins() {
    let value = evaluate_expression("percent(150) - percent(50)").unwrap();
    assert_eq!(value, GradeValue::Known(1.0));
}

#[test]
fn use_best_zero_keeps_nothing() {
    let value = evaluate_expression("grade_multiple([80, 90], 100, use_best=0)").unwrap();
    assert_eq!(value, GradeValue::Known(0.0));
}

#[test]
fn scores_above_one_are_not_clamped() {
    // extra credit can push a category past 100%
    let content = "[breakdown]\nexams: 1.0\n[grades]\nexams: 110%\n";
    let Outcome::Score { value, passed } = outcome(content) else {
        panic!("expected score outcome");
    };
    assert!((value - 1.1).abs() < 1e-12);
    assert!(passed);
}
