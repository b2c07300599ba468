use serde::Serialize;

/// A function or method definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRecord {
    /// Database row ID (0 if not yet persisted).
    pub id: i64,
    pub file_id: i64,
    pub name: String,
    pub start_line: u32,
    pub end_line: u32,
    /// Parameter names in declaration order.
    pub args: Vec<String>,
    pub is_method: bool,
    pub class_name: Option<String>,
    pub is_async: bool,
    pub decorators: Vec<String>,
    pub docstring: Option<String>,
}

/// A class definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRecord {
    pub id: i64,
    pub file_id: i64,
    pub name: String,
    pub start_line: u32,
    pub end_line: u32,
    /// Bases written as a bare or dotted name.
    pub base_classes: Vec<String>,
    pub decorators: Vec<String>,
    pub docstring: Option<String>,
}

/// Where a variable declaration sits lexically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableScope {
    Module,
    Class,
    Local,
}

impl VariableScope {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableScope::Module => "module",
            VariableScope::Class => "class",
            VariableScope::Local => "local",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "class" => VariableScope::Class,
            "local" => VariableScope::Local,
            _ => VariableScope::Module,
        }
    }
}

/// A name bound by a plain or annotated assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableRecord {
    pub id: i64,
    pub file_id: i64,
    pub name: String,
    pub line: u32,
    /// Lossy summary of the assigned value.
    pub value_repr: String,
    pub is_module_level: bool,
    pub scope: VariableScope,
    /// Enclosing class when declared directly in a class body.
    pub class_name: Option<String>,
}

impl VariableRecord {
    #[must_use]
    pub fn new(
        name: String,
        line: u32,
        value_repr: String,
        scope: VariableScope,
        class_name: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            file_id: 0,
            name,
            line,
            value_repr,
            is_module_level: scope == VariableScope::Module,
            scope,
            class_name,
        }
    }
}

/// Everything extracted from one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileEntities {
    pub classes: Vec<ClassRecord>,
    pub functions: Vec<FunctionRecord>,
    pub variables: Vec<VariableRecord>,
}

impl FileEntities {
    #[must_use]
    pub fn total(&self) -> usize {
        self.classes.len() + self.functions.len() + self.variables.len()
    }

    /// Point every record at the persisted file row.
    pub fn assign_file_id(&mut self, file_id: i64) {
        for c in &mut self.classes {
            c.file_id = file_id;
        }
        for f in &mut self.functions {
            f.file_id = file_id;
        }
        for v in &mut self.variables {
            v.file_id = file_id;
        }
    }
}

/// A stored record paired with its file's relative path.
#[derive(Debug, Clone, Serialize)]
pub struct Located<T> {
    pub file_path: String,
    #[serde(flatten)]
    pub item: T,
}

/// Kind-specific payload of a [`CodeEntity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityDetail {
    Function {
        args: Vec<String>,
        is_method: bool,
        is_async: bool,
        decorators: Vec<String>,
    },
    Class {
        base_classes: Vec<String>,
        decorators: Vec<String>,
    },
    Variable {
        value_repr: String,
        is_module_level: bool,
        scope: VariableScope,
    },
}

/// Uniform view over a function, class or variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeEntity {
    pub id: i64,
    pub name: String,
    pub file_id: i64,
    pub file_path: String,
    pub start_line: u32,
    /// Absent for variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
    /// Enclosing class, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    #[serde(flatten)]
    pub detail: EntityDetail,
}

impl CodeEntity {
    #[must_use]
    pub fn from_function(f: FunctionRecord, file_path: String) -> Self {
        Self {
            id: f.id,
            name: f.name,
            file_id: f.file_id,
            file_path,
            start_line: f.start_line,
            end_line: Some(f.end_line),
            docstring: f.docstring,
            parent_name: f.class_name,
            detail: EntityDetail::Function {
                args: f.args,
                is_method: f.is_method,
                is_async: f.is_async,
                decorators: f.decorators,
            },
        }
    }

    #[must_use]
    pub fn from_class(c: ClassRecord, file_path: String) -> Self {
        Self {
            id: c.id,
            name: c.name,
            file_id: c.file_id,
            file_path,
            start_line: c.start_line,
            end_line: Some(c.end_line),
            docstring: c.docstring,
            parent_name: None,
            detail: EntityDetail::Class {
                base_classes: c.base_classes,
                decorators: c.decorators,
            },
        }
    }

    #[must_use]
    pub fn from_variable(v: VariableRecord, file_path: String) -> Self {
        Self {
            id: v.id,
            name: v.name,
            file_id: v.file_id,
            file_path,
            start_line: v.line,
            end_line: None,
            docstring: None,
            parent_name: v.class_name,
            detail: EntityDetail::Variable {
                value_repr: v.value_repr,
                is_module_level: v.is_module_level,
                scope: v.scope,
            },
        }
    }

    /// "function", "class" or "variable".
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self.detail {
            EntityDetail::Function { .. } => "function",
            EntityDetail::Class { .. } => "class",
            EntityDetail::Variable { .. } => "variable",
        }
    }
}
