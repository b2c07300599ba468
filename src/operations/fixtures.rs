//! In-memory index shared by the operation tests.

use crate::db::Database;
use crate::models::entity::{
    ClassRecord, FileEntities, FunctionRecord, VariableRecord, VariableScope,
};
use crate::models::file::FileRecord;

pub fn function(name: &str, start: u32, end: u32, class: Option<&str>) -> FunctionRecord {
    FunctionRecord {
        id: 0,
        file_id: 0,
        name: name.into(),
        start_line: start,
        end_line: end,
        args: if class.is_some() {
            vec!["self".into()]
        } else {
            vec![]
        },
        is_method: class.is_some(),
        class_name: class.map(String::from),
        is_async: false,
        decorators: vec![],
        docstring: None,
    }
}

pub fn class(name: &str, start: u32, end: u32) -> ClassRecord {
    ClassRecord {
        id: 0,
        file_id: 0,
        name: name.into(),
        start_line: start,
        end_line: end,
        base_classes: vec![],
        decorators: vec![],
        docstring: None,
    }
}

/// `pkg/mod.py`: class `Foo` on 1-10 with method `bar` on 3-6,
/// class attribute `limit` on line 2, module variable `VALUE` on line 12.
/// `pkg/other.py`: a free function `bar` and a second `Foo` with `baz`.
pub fn scenario_db() -> Database {
    let db = Database::open_in_memory().unwrap();

    let mod_source: String = (1..=14).map(|i| format!("line {i}\n")).collect();
    let mod_id = db
        .insert_file(&FileRecord::text("pkg/mod.py", mod_source, "h1".into()))
        .unwrap();
    let entities = FileEntities {
        classes: vec![class("Foo", 1, 10)],
        functions: vec![function("bar", 3, 6, Some("Foo"))],
        variables: vec![
            VariableRecord::new(
                "limit".into(),
                2,
                "5".into(),
                VariableScope::Class,
                Some("Foo".into()),
            ),
            VariableRecord::new("VALUE".into(), 12, "3".into(), VariableScope::Module, None),
        ],
    };
    db.insert_entities(mod_id, &entities).unwrap();

    let other_source: String = (1..=8).map(|i| format!("line {i}\n")).collect();
    let other_id = db
        .insert_file(&FileRecord::text("pkg/other.py", other_source, "h2".into()))
        .unwrap();
    let entities = FileEntities {
        classes: vec![class("Foo", 4, 8)],
        functions: vec![
            function("bar", 1, 2, None),
            function("baz", 5, 8, Some("Foo")),
        ],
        variables: vec![],
    };
    db.insert_entities(other_id, &entities).unwrap();

    db
}
