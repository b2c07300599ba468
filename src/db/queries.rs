use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use serde::Serialize;

use crate::error::Result;
use crate::models::entity::{
    ClassRecord, FileEntities, FunctionRecord, Located, VariableRecord, VariableScope,
};
use crate::models::file::{join_path, FileInfo, FileRecord};

use super::Database;

const FUNCTION_COLUMNS: &str = "f.id, f.file_id, f.name, f.start_line, f.end_line, f.args, f.is_method, \
     f.class_name, f.is_async, f.decorators, f.docstring";
const CLASS_COLUMNS: &str =
    "c.id, c.file_id, c.name, c.start_line, c.end_line, c.base_classes, c.decorators, c.docstring";
const VARIABLE_COLUMNS: &str =
    "v.id, v.file_id, v.name, v.line, v.value_repr, v.is_module_level, v.scope, v.class_name";

/// A text file queued for structural extraction.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub id: i64,
    pub path: String,
    pub content: String,
}

/// Row counts written for one file's entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertedCounts {
    pub functions: usize,
    pub classes: usize,
    pub variables: usize,
}

impl Database {
    // ─── File operations ───

    /// Insert a file record. Returns the row ID.
    pub fn insert_file(&self, file: &FileRecord) -> Result<i64> {
        self.conn().execute(
            "INSERT INTO files (relative_folder, file_name, extension, content, is_binary, line_count, hash)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                file.relative_folder,
                file.file_name,
                file.extension,
                file.content,
                file.is_binary,
                file.line_count,
                file.hash,
            ],
        )?;
        Ok(self.conn().last_insert_rowid())
    }

    /// Distinct folders, alphabetically.
    pub fn list_folders(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT DISTINCT relative_folder FROM files ORDER BY relative_folder")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut folders = Vec::new();
        for r in rows {
            folders.push(r?);
        }
        Ok(folders)
    }

    /// Files directly inside `folder`, by name. Content is not loaded.
    pub fn files_in_folder(&self, folder: &str) -> Result<Vec<FileInfo>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, relative_folder, file_name, extension, line_count, is_binary
             FROM files WHERE relative_folder = ?1 ORDER BY file_name",
        )?;
        Self::map_file_infos(&mut stmt, params![folder])
    }

    /// Files with the given extension, by folder then name. Content is not loaded.
    pub fn files_by_extension(&self, extension: &str) -> Result<Vec<FileInfo>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, relative_folder, file_name, extension, line_count, is_binary
             FROM files WHERE extension = ?1 ORDER BY relative_folder, file_name",
        )?;
        Self::map_file_infos(&mut stmt, params![extension])
    }

    /// Look a file up by folder and name, optionally loading its content.
    pub fn get_file(
        &self,
        folder: &str,
        file_name: &str,
        with_content: bool,
    ) -> Result<Option<FileInfo>> {
        let info = self
            .conn()
            .query_row(
                "SELECT id, relative_folder, file_name, extension, line_count, is_binary, content
                 FROM files WHERE relative_folder = ?1 AND file_name = ?2
                 ORDER BY id LIMIT 1",
                params![folder, file_name],
                |row| {
                    let mut info = Self::file_info_from_row(row)?;
                    if with_content {
                        info.content = Some(row.get(6)?);
                    }
                    Ok(info)
                },
            )
            .optional()?;
        Ok(info)
    }

    /// IDs of text files whose extension passes `is_source`, in insertion order.
    pub fn source_file_ids(&self, is_source: impl Fn(&str) -> bool) -> Result<Vec<i64>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, extension FROM files WHERE is_binary = 0 ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut ids = Vec::new();
        for r in rows {
            let (id, ext) = r?;
            if is_source(&ext) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    /// Load path and content for each ID, preserving order.
    pub fn load_sources(&self, ids: &[i64]) -> Result<Vec<SourceFile>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT relative_folder, file_name, content FROM files WHERE id = ?1")?;
        let mut sources = Vec::with_capacity(ids.len());
        for &id in ids {
            let source = stmt
                .query_row(params![id], |row| {
                    let folder: String = row.get(0)?;
                    let name: String = row.get(1)?;
                    Ok(SourceFile {
                        id,
                        path: join_path(&folder, &name),
                        content: row.get(2)?,
                    })
                })
                .optional()?;
            if let Some(s) = source {
                sources.push(s);
            }
        }
        Ok(sources)
    }

    fn file_info_from_row(row: &Row) -> rusqlite::Result<FileInfo> {
        let relative_folder: String = row.get(1)?;
        let file_name: String = row.get(2)?;
        Ok(FileInfo {
            id: row.get(0)?,
            path: join_path(&relative_folder, &file_name),
            relative_folder,
            file_name,
            extension: row.get(3)?,
            line_count: row.get(4)?,
            is_binary: row.get(5)?,
            content: None,
        })
    }

    fn map_file_infos(
        stmt: &mut rusqlite::Statement,
        params: impl rusqlite::Params,
    ) -> Result<Vec<FileInfo>> {
        let rows = stmt.query_map(params, Self::file_info_from_row)?;
        let mut files = Vec::new();
        for r in rows {
            files.push(r?);
        }
        Ok(files)
    }

    // ─── Entity writes ───

    pub fn insert_function(&self, f: &FunctionRecord) -> Result<i64> {
        self.conn().execute(
            "INSERT INTO functions (file_id, name, start_line, end_line, args, is_method, class_name, is_async, decorators, docstring)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                f.file_id,
                f.name,
                f.start_line,
                f.end_line,
                serde_json::to_string(&f.args)?,
                f.is_method,
                f.class_name,
                f.is_async,
                serde_json::to_string(&f.decorators)?,
                f.docstring,
            ],
        )?;
        Ok(self.conn().last_insert_rowid())
    }

    pub fn insert_class(&self, c: &ClassRecord) -> Result<i64> {
        self.conn().execute(
            "INSERT INTO classes (file_id, name, start_line, end_line, base_classes, decorators, docstring)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                c.file_id,
                c.name,
                c.start_line,
                c.end_line,
                serde_json::to_string(&c.base_classes)?,
                serde_json::to_string(&c.decorators)?,
                c.docstring,
            ],
        )?;
        Ok(self.conn().last_insert_rowid())
    }

    pub fn insert_variable(&self, v: &VariableRecord) -> Result<i64> {
        self.conn().execute(
            "INSERT INTO variables (file_id, name, line, value_repr, is_module_level, scope, class_name)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                v.file_id,
                v.name,
                v.line,
                v.value_repr,
                v.is_module_level,
                v.scope.as_str(),
                v.class_name,
            ],
        )?;
        Ok(self.conn().last_insert_rowid())
    }

    /// Persist every record of one file under `file_id`.
    pub fn insert_entities(&self, file_id: i64, entities: &FileEntities) -> Result<InsertedCounts> {
        let mut entities = entities.clone();
        entities.assign_file_id(file_id);
        for c in &entities.classes {
            self.insert_class(c)?;
        }
        for f in &entities.functions {
            self.insert_function(f)?;
        }
        for v in &entities.variables {
            self.insert_variable(v)?;
        }
        Ok(InsertedCounts {
            functions: entities.functions.len(),
            classes: entities.classes.len(),
            variables: entities.variables.len(),
        })
    }

    // ─── Containment queries ───

    /// Smallest function span in `file_id` containing `line`.
    pub fn innermost_function_at(&self, file_id: i64, line: u32) -> Result<Option<FunctionRecord>> {
        let sql = format!(
            "SELECT {FUNCTION_COLUMNS} FROM functions f
             WHERE f.file_id = ?1 AND ?2 BETWEEN f.start_line AND f.end_line
             ORDER BY (f.end_line - f.start_line) ASC, f.start_line DESC, f.id ASC
             LIMIT 1"
        );
        Ok(self
            .conn()
            .query_row(&sql, params![file_id, line], Self::function_from_row)
            .optional()?)
    }

    /// Smallest class span in `file_id` containing `line`.
    pub fn innermost_class_at(&self, file_id: i64, line: u32) -> Result<Option<ClassRecord>> {
        let sql = format!(
            "SELECT {CLASS_COLUMNS} FROM classes c
             WHERE c.file_id = ?1 AND ?2 BETWEEN c.start_line AND c.end_line
             ORDER BY (c.end_line - c.start_line) ASC, c.start_line DESC, c.id ASC
             LIMIT 1"
        );
        Ok(self
            .conn()
            .query_row(&sql, params![file_id, line], Self::class_from_row)
            .optional()?)
    }

    /// First variable declared exactly on `line`.
    pub fn variable_on_line(&self, file_id: i64, line: u32) -> Result<Option<VariableRecord>> {
        let sql = format!(
            "SELECT {VARIABLE_COLUMNS} FROM variables v
             WHERE v.file_id = ?1 AND v.line = ?2
             ORDER BY v.id ASC LIMIT 1"
        );
        Ok(self
            .conn()
            .query_row(&sql, params![file_id, line], Self::variable_from_row)
            .optional()?)
    }

    // ─── Name lookups ───

    /// Functions named `name`, optionally restricted to a class and/or a file.
    pub fn find_functions(
        &self,
        name: &str,
        class_name: Option<&str>,
        file_id: Option<i64>,
    ) -> Result<Vec<Located<FunctionRecord>>> {
        let sql = format!(
            "SELECT {FUNCTION_COLUMNS}, r.relative_folder, r.file_name
             FROM functions f JOIN files r ON f.file_id = r.id
             WHERE f.name = ?1
               AND (?2 IS NULL OR f.class_name = ?2)
               AND (?3 IS NULL OR f.file_id = ?3)
             ORDER BY r.relative_folder, r.file_name, f.start_line, f.id"
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map(params![name, class_name, file_id], |row| {
            Ok(Located {
                file_path: join_path(&row.get::<_, String>(11)?, &row.get::<_, String>(12)?),
                item: Self::function_from_row(row)?,
            })
        })?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Classes named `name`, optionally restricted to a file.
    pub fn find_classes(&self, name: &str, file_id: Option<i64>) -> Result<Vec<Located<ClassRecord>>> {
        let sql = format!(
            "SELECT {CLASS_COLUMNS}, r.relative_folder, r.file_name
             FROM classes c JOIN files r ON c.file_id = r.id
             WHERE c.name = ?1 AND (?2 IS NULL OR c.file_id = ?2)
             ORDER BY r.relative_folder, r.file_name, c.start_line, c.id"
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map(params![name, file_id], |row| {
            Ok(Located {
                file_path: join_path(&row.get::<_, String>(8)?, &row.get::<_, String>(9)?),
                item: Self::class_from_row(row)?,
            })
        })?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Methods whose enclosing class is `class_name`.
    pub fn class_methods(
        &self,
        class_name: &str,
        file_id: Option<i64>,
    ) -> Result<Vec<Located<FunctionRecord>>> {
        let sql = format!(
            "SELECT {FUNCTION_COLUMNS}, r.relative_folder, r.file_name
             FROM functions f JOIN files r ON f.file_id = r.id
             WHERE f.class_name = ?1 AND f.is_method = 1
               AND (?2 IS NULL OR f.file_id = ?2)
             ORDER BY r.relative_folder, r.file_name, f.start_line, f.id"
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map(params![class_name, file_id], |row| {
            Ok(Located {
                file_path: join_path(&row.get::<_, String>(11)?, &row.get::<_, String>(12)?),
                item: Self::function_from_row(row)?,
            })
        })?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    // ─── Per-file dumps ───

    pub fn functions_for_file(&self, file_id: i64) -> Result<Vec<FunctionRecord>> {
        let sql = format!(
            "SELECT {FUNCTION_COLUMNS} FROM functions f WHERE f.file_id = ?1 ORDER BY f.start_line, f.id"
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map(params![file_id], Self::function_from_row)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn classes_for_file(&self, file_id: i64) -> Result<Vec<ClassRecord>> {
        let sql = format!(
            "SELECT {CLASS_COLUMNS} FROM classes c WHERE c.file_id = ?1 ORDER BY c.start_line, c.id"
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map(params![file_id], Self::class_from_row)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn variables_for_file(&self, file_id: i64) -> Result<Vec<VariableRecord>> {
        let sql = format!(
            "SELECT {VARIABLE_COLUMNS} FROM variables v WHERE v.file_id = ?1 ORDER BY v.line, v.id"
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map(params![file_id], Self::variable_from_row)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn function_from_row(row: &Row) -> rusqlite::Result<FunctionRecord> {
        Ok(FunctionRecord {
            id: row.get(0)?,
            file_id: row.get(1)?,
            name: row.get(2)?,
            start_line: row.get(3)?,
            end_line: row.get(4)?,
            args: json_list(row, 5)?,
            is_method: row.get(6)?,
            class_name: row.get(7)?,
            is_async: row.get(8)?,
            decorators: json_list(row, 9)?,
            docstring: row.get(10)?,
        })
    }

    fn class_from_row(row: &Row) -> rusqlite::Result<ClassRecord> {
        Ok(ClassRecord {
            id: row.get(0)?,
            file_id: row.get(1)?,
            name: row.get(2)?,
            start_line: row.get(3)?,
            end_line: row.get(4)?,
            base_classes: json_list(row, 5)?,
            decorators: json_list(row, 6)?,
            docstring: row.get(7)?,
        })
    }

    fn variable_from_row(row: &Row) -> rusqlite::Result<VariableRecord> {
        Ok(VariableRecord {
            id: row.get(0)?,
            file_id: row.get(1)?,
            name: row.get(2)?,
            line: row.get(3)?,
            value_repr: row.get(4)?,
            is_module_level: row.get(5)?,
            scope: VariableScope::parse(&row.get::<_, String>(6)?),
            class_name: row.get(7)?,
        })
    }

    // ─── Statistics ───

    /// Get index statistics.
    pub fn stats(&self) -> Result<IndexStats> {
        let count = |sql: &str| -> Result<u64> {
            let n: i64 = self.conn().query_row(sql, [], |r| r.get(0))?;
            Ok(n as u64)
        };

        let mut stmt = self.conn().prepare(
            "SELECT extension, COUNT(*) FROM files GROUP BY extension ORDER BY COUNT(*) DESC, extension",
        )?;
        let ext_rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
        })?;
        let mut extensions = Vec::new();
        for r in ext_rows {
            extensions.push(r?);
        }

        Ok(IndexStats {
            file_count: count("SELECT COUNT(*) FROM files")?,
            binary_count: count("SELECT COUNT(*) FROM files WHERE is_binary = 1")?,
            function_count: count("SELECT COUNT(*) FROM functions")?,
            method_count: count("SELECT COUNT(*) FROM functions WHERE is_method = 1")?,
            class_count: count("SELECT COUNT(*) FROM classes")?,
            variable_count: count("SELECT COUNT(*) FROM variables")?,
            extensions,
        })
    }
}

/// Decode a JSON array column.
fn json_list(row: &Row, idx: usize) -> rusqlite::Result<Vec<String>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Index statistics.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub file_count: u64,
    pub binary_count: u64,
    pub function_count: u64,
    pub method_count: u64,
    pub class_count: u64,
    pub variable_count: u64,
    /// `(extension, file count)`, most common first.
    pub extensions: Vec<(String, u64)>,
}
