//! Line containment lookup shared between CLI and MCP.

use crate::db::Database;
use crate::error::Result;
use crate::models::entity::CodeEntity;
use crate::operations::files::get_file_by_path;

/// The most specific entity covering `line` in the file at `path`.
///
/// Resolution order, first match wins:
/// 1. the function with the smallest span containing the line,
/// 2. the class with the smallest span containing the line,
/// 3. a variable declared exactly on the line.
///
/// Unknown paths and uncovered lines yield `None`.
pub fn entity_at_line(db: &Database, path: &str, line: i64) -> Result<Option<CodeEntity>> {
    let line = match u32::try_from(line) {
        Ok(line) if line >= 1 => line,
        _ => return Ok(None),
    };
    let Some(file) = get_file_by_path(db, path, false)? else {
        return Ok(None);
    };

    if let Some(f) = db.innermost_function_at(file.id, line)? {
        return Ok(Some(CodeEntity::from_function(f, file.path)));
    }
    if let Some(c) = db.innermost_class_at(file.id, line)? {
        return Ok(Some(CodeEntity::from_class(c, file.path)));
    }
    Ok(db
        .variable_on_line(file.id, line)?
        .map(|v| CodeEntity::from_variable(v, file.path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entity::{EntityDetail, FileEntities};
    use crate::models::file::FileRecord;
    use crate::operations::fixtures::{class, function, scenario_db};

    #[test]
    fn method_wins_over_enclosing_class() {
        let db = scenario_db();
        let entity = entity_at_line(&db, "pkg/mod.py", 4).unwrap().unwrap();
        assert_eq!(entity.name, "bar");
        assert_eq!(entity.kind(), "function");
        assert_eq!(entity.parent_name.as_deref(), Some("Foo"));
        assert_eq!(entity.file_path, "pkg/mod.py");
        assert!(matches!(
            entity.detail,
            EntityDetail::Function { is_method: true, .. }
        ));
    }

    #[test]
    fn class_when_no_function_covers_line() {
        let db = scenario_db();
        let entity = entity_at_line(&db, "pkg/mod.py", 9).unwrap().unwrap();
        assert_eq!(entity.name, "Foo");
        assert_eq!(entity.kind(), "class");
        assert_eq!(entity.end_line, Some(10));
    }

    #[test]
    fn class_span_shadows_class_attribute() {
        let db = scenario_db();
        let entity = entity_at_line(&db, "pkg/mod.py", 2).unwrap().unwrap();
        assert_eq!(entity.kind(), "class");
    }

    #[test]
    fn exact_variable_line_outside_spans() {
        let db = scenario_db();
        let entity = entity_at_line(&db, "pkg/mod.py", 12).unwrap().unwrap();
        assert_eq!(entity.name, "VALUE");
        assert_eq!(entity.kind(), "variable");
        assert_eq!(entity.end_line, None);
    }

    #[test]
    fn nothing_matches() {
        let db = scenario_db();
        assert!(entity_at_line(&db, "pkg/mod.py", 20).unwrap().is_none());
        assert!(entity_at_line(&db, "pkg/mod.py", 11).unwrap().is_none());
        assert!(entity_at_line(&db, "pkg/missing.py", 4).unwrap().is_none());
    }

    #[test]
    fn lines_outside_any_file_match_nothing() {
        let db = scenario_db();
        assert!(entity_at_line(&db, "pkg/mod.py", 0).unwrap().is_none());
        assert!(entity_at_line(&db, "pkg/mod.py", -3).unwrap().is_none());
        assert!(entity_at_line(&db, "pkg/mod.py", i64::from(u32::MAX) + 1).unwrap().is_none());
    }

    #[test]
    fn innermost_of_nested_functions() {
        let db = Database::open_in_memory().unwrap();
        let source: String = (1..=20).map(|i| format!("{i}\n")).collect();
        let id = db
            .insert_file(&FileRecord::text("n.py", source, "h".into()))
            .unwrap();
        let entities = FileEntities {
            classes: vec![class("Outer", 1, 20)],
            functions: vec![
                function("outer", 2, 15, None),
                function("inner", 5, 10, None),
                function("deepest", 6, 7, None),
            ],
            variables: vec![],
        };
        db.insert_entities(id, &entities).unwrap();

        let at = |line| entity_at_line(&db, "n.py", line).unwrap().unwrap().name;
        assert_eq!(at(6), "deepest");
        assert_eq!(at(9), "inner");
        assert_eq!(at(3), "outer");
        assert_eq!(at(18), "Outer");
    }

    #[test]
    fn repeated_queries_are_stable() {
        let db = scenario_db();
        let first = entity_at_line(&db, "pkg/mod.py", 5).unwrap();
        for _ in 0..5 {
            assert_eq!(entity_at_line(&db, "pkg/mod.py", 5).unwrap(), first);
        }
    }
}
