use rusqlite::Connection;
use trivia_core::db::open_db_in_memory;
use trivia_core::{
    seed_default_categories, ErrorKind, NewQuestion, QuestionRepository, QuizPick, QuizRequest,
    QuizSelector, ServiceError, SqliteCategoryRepository, SqliteQuestionRepository,
};

fn seeded_conn() -> Connection {
    let conn = open_db_in_memory().unwrap();
    seed_default_categories(&SqliteCategoryRepository::new(&conn)).unwrap();
    conn
}

fn insert(conn: &Connection, category: i64) -> i64 {
    SqliteQuestionRepository::new(conn)
        .create_question(&NewQuestion::new("prompt", "answer", category))
        .unwrap()
}

fn pick(conn: &Connection, request: &QuizRequest) -> QuizPick {
    QuizSelector::new(SqliteQuestionRepository::new(conn))
        .next_question(request)
        .unwrap()
}

#[test]
fn any_category_with_no_history_returns_lowest_id() {
    let conn = seeded_conn();
    let first = insert(&conn, 3);
    insert(&conn, 1);

    match pick(&conn, &QuizRequest::new(0, [])) {
        QuizPick::Next(question) => assert_eq!(question.id, first),
        QuizPick::Exhausted => panic!("store has questions"),
    }
}

#[test]
fn specific_category_only_returns_that_category() {
    let conn = seeded_conn();
    insert(&conn, 1);
    let art = insert(&conn, 2);

    match pick(&conn, &QuizRequest::new(2, [])) {
        QuizPick::Next(question) => {
            assert_eq!(question.id, art);
            assert_eq!(question.category, 2);
        }
        QuizPick::Exhausted => panic!("category 2 has a question"),
    }
}

#[test]
fn empty_category_is_exhausted_not_error() {
    let conn = seeded_conn();
    insert(&conn, 1);

    assert_eq!(pick(&conn, &QuizRequest::new(3, [])), QuizPick::Exhausted);
}

#[test]
fn full_quiz_walk_never_repeats_and_ends_exhausted() {
    let conn = seeded_conn();
    let mut expected = (0..5).map(|n| insert(&conn, 1 + n % 2)).collect::<Vec<_>>();
    expected.sort_unstable();

    let mut asked = Vec::new();
    loop {
        let request = QuizRequest::new(0, asked.iter().copied());
        match pick(&conn, &request) {
            QuizPick::Next(question) => {
                assert!(!asked.contains(&question.id));
                asked.push(question.id);
            }
            QuizPick::Exhausted => break,
        }
    }
    assert_eq!(asked, expected);
}

#[test]
fn exclusions_apply_within_category() {
    let conn = seeded_conn();
    let first = insert(&conn, 4);
    insert(&conn, 5);
    let second = insert(&conn, 4);

    match pick(&conn, &QuizRequest::new(4, [first])) {
        QuizPick::Next(question) => assert_eq!(question.id, second),
        QuizPick::Exhausted => panic!("second history question remains"),
    }
    assert_eq!(
        pick(&conn, &QuizRequest::new(4, [first, second])),
        QuizPick::Exhausted
    );
}

#[test]
fn unknown_ids_in_history_are_ignored() {
    let conn = seeded_conn();
    let only = insert(&conn, 6);

    match pick(&conn, &QuizRequest::new(0, [9_999, -1])) {
        QuizPick::Next(question) => assert_eq!(question.id, only),
        QuizPick::Exhausted => panic!("unknown history ids must not exclude anything"),
    }
}

#[test]
fn history_larger_than_sqlite_variable_limit_still_selects() {
    let conn = seeded_conn();
    let first = insert(&conn, 2);
    let second = insert(&conn, 2);

    let history = (1_000_000..1_040_000).chain([first]);
    match pick(&conn, &QuizRequest::new(0, history)) {
        QuizPick::Next(question) => assert_eq!(question.id, second),
        QuizPick::Exhausted => panic!("only unknown ids and `first` were excluded"),
    }

    let everything = (1..=40_000).chain([first, second]);
    assert_eq!(
        pick(&conn, &QuizRequest::new(2, everything)),
        QuizPick::Exhausted
    );
}

#[test]
fn missing_category_is_validation_failure() {
    let conn = seeded_conn();
    insert(&conn, 1);

    let err = QuizSelector::new(SqliteQuestionRepository::new(&conn))
        .next_question(&QuizRequest::default())
        .unwrap_err();
    assert!(matches!(err, ServiceError::MissingQuizCategory));
    assert_eq!(err.kind(), ErrorKind::Validation);
}
