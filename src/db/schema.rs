/// SQL statements for creating the atlas schema.
pub const CREATE_SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS files (
    id INTEGER PRIMARY KEY,
    relative_folder TEXT NOT NULL,
    file_name TEXT NOT NULL,
    extension TEXT NOT NULL,
    content TEXT NOT NULL,
    is_binary INTEGER NOT NULL DEFAULT 0,
    line_count INTEGER NOT NULL,
    hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS functions (
    id INTEGER PRIMARY KEY,
    file_id INTEGER NOT NULL REFERENCES files(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    start_line INTEGER NOT NULL,
    end_line INTEGER NOT NULL,
    args TEXT NOT NULL DEFAULT '[]',
    is_method INTEGER NOT NULL DEFAULT 0,
    class_name TEXT,
    is_async INTEGER NOT NULL DEFAULT 0,
    decorators TEXT NOT NULL DEFAULT '[]',
    docstring TEXT,
    CHECK (start_line <= end_line)
);

CREATE TABLE IF NOT EXISTS classes (
    id INTEGER PRIMARY KEY,
    file_id INTEGER NOT NULL REFERENCES files(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    start_line INTEGER NOT NULL,
    end_line INTEGER NOT NULL,
    base_classes TEXT NOT NULL DEFAULT '[]',
    decorators TEXT NOT NULL DEFAULT '[]',
    docstring TEXT,
    CHECK (start_line <= end_line)
);

CREATE TABLE IF NOT EXISTS variables (
    id INTEGER PRIMARY KEY,
    file_id INTEGER NOT NULL REFERENCES files(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    line INTEGER NOT NULL,
    value_repr TEXT NOT NULL DEFAULT '',
    is_module_level INTEGER NOT NULL DEFAULT 1,
    scope TEXT NOT NULL DEFAULT 'module',
    class_name TEXT
);

CREATE INDEX IF NOT EXISTS idx_files_folder_name ON files(relative_folder, file_name);
CREATE INDEX IF NOT EXISTS idx_files_extension ON files(extension);
CREATE INDEX IF NOT EXISTS idx_functions_file_id ON functions(file_id);
CREATE INDEX IF NOT EXISTS idx_functions_name ON functions(name);
CREATE INDEX IF NOT EXISTS idx_functions_class_name ON functions(class_name);
CREATE INDEX IF NOT EXISTS idx_classes_file_id ON classes(file_id);
CREATE INDEX IF NOT EXISTS idx_classes_name ON classes(name);
CREATE INDEX IF NOT EXISTS idx_variables_file_line ON variables(file_id, line);
";
