//! Python structural extraction on tree-sitter.
//!
//! The walk threads an explicit scope stack through the descent: entering a
//! class pushes a class frame, entering a function pushes a function frame,
//! and both are popped on the way out. Method-ness and variable scope come
//! from the innermost frame only.

use tree_sitter::{Language, Node, Parser};

use crate::ingest::code::{find_error_lines, FileOutcome, ParseFailure, StructureExtractor};
use crate::models::entity::{
    ClassRecord, FileEntities, FunctionRecord, VariableRecord, VariableScope,
};

const UNKNOWN_DECORATOR: &str = "unknown_decorator";
const UNKNOWN_SEGMENT: &str = "unknown";

/// Statement containers the walk descends into. Expressions are never
/// entered, so deeply nested expressions cannot exhaust the stack.
const CONTAINER_KINDS: &[&str] = &[
    "module",
    "block",
    "decorated_definition",
    "if_statement",
    "elif_clause",
    "else_clause",
    "for_statement",
    "while_statement",
    "try_statement",
    "except_clause",
    "except_group_clause",
    "finally_clause",
    "with_statement",
    "match_statement",
    "case_clause",
];

#[derive(Debug, Clone)]
enum Scope {
    Class(String),
    Function,
}

pub struct PythonExtractor {
    language: Language,
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PythonExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn make_parser(&self) -> Result<Parser, String> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| format!("failed to set Python language: {e}"))?;
        Ok(parser)
    }
}

impl StructureExtractor for PythonExtractor {
    fn language(&self) -> &'static str {
        "python"
    }

    fn extract(&self, path: &str, source: &str) -> FileOutcome {
        let fail = |detail: String, error_lines: Vec<u32>| {
            FileOutcome::Failed(ParseFailure {
                path: path.to_string(),
                detail,
                error_lines,
            })
        };

        let mut parser = match self.make_parser() {
            Ok(p) => p,
            Err(detail) => return fail(detail, vec![]),
        };
        let Some(tree) = parser.parse(source, None) else {
            return fail("tree-sitter parse returned None".into(), vec![]);
        };
        let root = tree.root_node();
        if root.has_error() {
            let lines = find_error_lines(root);
            let detail = if lines.is_empty() {
                "syntax error".to_string()
            } else {
                let listed: Vec<String> = lines.iter().map(u32::to_string).collect();
                format!("syntax error at line(s) {}", listed.join(", "))
            };
            return fail(detail, lines);
        }

        let mut walker = Walker {
            source: source.as_bytes(),
            scopes: Vec::new(),
            out: FileEntities::default(),
        };
        walker.visit_children(root);
        FileOutcome::Parsed(walker.out)
    }
}

struct Walker<'a> {
    source: &'a [u8],
    scopes: Vec<Scope>,
    out: FileEntities,
}

impl Walker<'_> {
    fn visit_children(&mut self, node: Node) {
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        for child in children {
            self.visit(child);
        }
    }

    fn visit(&mut self, node: Node) {
        match node.kind() {
            "function_definition" => self.visit_function(node),
            "class_definition" => self.visit_class(node),
            "expression_statement" => self.visit_expression_statement(node),
            kind if CONTAINER_KINDS.contains(&kind) => self.visit_children(node),
            _ => {}
        }
    }

    fn innermost_class(&self) -> Option<&str> {
        match self.scopes.last() {
            Some(Scope::Class(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    fn visit_function(&mut self, node: Node) {
        let Some(name) = self.field_text(node, "name") else {
            return;
        };
        let class_name = self.innermost_class().map(str::to_string);
        let body = node.child_by_field_name("body");

        self.out.functions.push(FunctionRecord {
            id: 0,
            file_id: 0,
            name,
            start_line: start_line(node),
            end_line: end_line(node),
            args: node
                .child_by_field_name("parameters")
                .map(|p| self.parameter_names(p))
                .unwrap_or_default(),
            is_method: class_name.is_some(),
            class_name,
            is_async: is_async(node),
            decorators: self.decorators(node),
            docstring: body.and_then(|b| self.docstring(b)),
        });

        if let Some(body) = body {
            self.scopes.push(Scope::Function);
            self.visit_children(body);
            self.scopes.pop();
        }
    }

    fn visit_class(&mut self, node: Node) {
        let Some(name) = self.field_text(node, "name") else {
            return;
        };
        let body = node.child_by_field_name("body");

        self.out.classes.push(ClassRecord {
            id: 0,
            file_id: 0,
            name: name.clone(),
            start_line: start_line(node),
            end_line: end_line(node),
            base_classes: node
                .child_by_field_name("superclasses")
                .map(|s| self.base_classes(s))
                .unwrap_or_default(),
            decorators: self.decorators(node),
            docstring: body.and_then(|b| self.docstring(b)),
        });

        if let Some(body) = body {
            self.scopes.push(Scope::Class(name));
            self.visit_children(body);
            self.scopes.pop();
        }
    }

    fn visit_expression_statement(&mut self, node: Node) {
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        for child in children {
            if child.kind() == "assignment" {
                self.visit_assignment(child, start_line(node));
            }
        }
    }

    /// Record every plain-name target of a (possibly chained or annotated) assignment.
    fn visit_assignment(&mut self, node: Node, line: u32) {
        let mut targets = Vec::new();
        let mut current = node;
        let value = loop {
            if let Some(left) = current.child_by_field_name("left") {
                targets.push(left);
            }
            match current.child_by_field_name("right") {
                Some(right) if right.kind() == "assignment" => current = right,
                other => break other,
            }
        };

        let value_repr = value.map(|v| self.value_repr(v)).unwrap_or_default();
        let (scope, class_name) = match self.scopes.last() {
            None => (VariableScope::Module, None),
            Some(Scope::Class(name)) => (VariableScope::Class, Some(name.clone())),
            Some(Scope::Function) => (VariableScope::Local, None),
        };

        for target in targets {
            if target.kind() != "identifier" {
                continue;
            }
            self.out.variables.push(VariableRecord::new(
                self.text(target).to_string(),
                line,
                value_repr.clone(),
                scope,
                class_name.clone(),
            ));
        }
    }

    fn parameter_names(&self, params: Node) -> Vec<String> {
        let mut cursor = params.walk();
        params
            .named_children(&mut cursor)
            .filter_map(|p| match p.kind() {
                "identifier" | "list_splat_pattern" | "dictionary_splat_pattern" => {
                    Some(self.text(p).to_string())
                }
                "typed_parameter" => p.named_child(0).map(|n| self.text(n).to_string()),
                "default_parameter" | "typed_default_parameter" => self.field_text(p, "name"),
                _ => None,
            })
            .collect()
    }

    fn decorators(&self, definition: Node) -> Vec<String> {
        let Some(parent) = definition.parent() else {
            return Vec::new();
        };
        if parent.kind() != "decorated_definition" {
            return Vec::new();
        }
        let mut cursor = parent.walk();
        parent
            .named_children(&mut cursor)
            .filter(|c| c.kind() == "decorator")
            .map(|d| self.decorator_name(d))
            .collect()
    }

    fn decorator_name(&self, decorator: Node) -> String {
        let mut cursor = decorator.walk();
        let expr = decorator
            .named_children(&mut cursor)
            .find(|c| c.kind() != "comment");
        let Some(expr) = expr else {
            return UNKNOWN_DECORATOR.to_string();
        };
        match expr.kind() {
            "identifier" => self.text(expr).to_string(),
            "attribute" => self.dotted_name(expr),
            "call" => match expr.child_by_field_name("function") {
                Some(f) if f.kind() == "identifier" => self.text(f).to_string(),
                Some(f) if f.kind() == "attribute" => self.dotted_name(f),
                _ => UNKNOWN_DECORATOR.to_string(),
            },
            _ => UNKNOWN_DECORATOR.to_string(),
        }
    }

    fn base_classes(&self, superclasses: Node) -> Vec<String> {
        let mut cursor = superclasses.walk();
        superclasses
            .named_children(&mut cursor)
            .filter_map(|b| match b.kind() {
                "identifier" => Some(self.text(b).to_string()),
                "attribute" => Some(self.dotted_name(b)),
                _ => None,
            })
            .collect()
    }

    /// `a.b.c` for an attribute chain; non-name roots become `unknown`.
    fn dotted_name(&self, node: Node) -> String {
        match node.kind() {
            "identifier" => self.text(node).to_string(),
            "attribute" => {
                let object = node
                    .child_by_field_name("object")
                    .map_or_else(|| UNKNOWN_SEGMENT.to_string(), |o| self.dotted_name(o));
                let attr = self.field_text(node, "attribute").unwrap_or_default();
                format!("{object}.{attr}")
            }
            _ => UNKNOWN_SEGMENT.to_string(),
        }
    }

    fn value_repr(&self, node: Node) -> String {
        match node.kind() {
            "integer" => int_repr(self.text(node)),
            "float" => float_repr(self.text(node)),
            "true" => "True".into(),
            "false" => "False".into(),
            "none" => "None".into(),
            "ellipsis" => "Ellipsis".into(),
            "string" => self.string_repr(node).unwrap_or_else(|| "...".into()),
            "concatenated_string" => self.concatenated_repr(node).unwrap_or_else(|| "...".into()),
            "identifier" => self.text(node).to_string(),
            "list" => "[...]".into(),
            "dictionary" | "set" => "{...}".into(),
            "tuple" | "expression_list" => "(...)".into(),
            "call" => match node.child_by_field_name("function") {
                Some(f) if f.kind() == "identifier" => format!("{}(...)", self.text(f)),
                Some(f) if f.kind() == "attribute" => format!("{}(...)", self.dotted_name(f)),
                _ => "...".into(),
            },
            "parenthesized_expression" => node
                .named_child(0)
                .filter(|inner| inner.kind() != "comment")
                .map_or_else(|| "...".into(), |inner| self.value_repr(inner)),
            _ => "...".into(),
        }
    }

    /// Split a string literal into `(prefix, raw body)`. Interpolated strings yield `None`.
    fn string_parts(&self, node: Node) -> Option<(String, String)> {
        let start = node.child(0)?;
        let end = node.child(node.child_count().checked_sub(1)? as u32)?;
        if start.kind() != "string_start" || end.kind() != "string_end" {
            return None;
        }
        let opener = self.text(start);
        let prefix: String = opener
            .chars()
            .take_while(|c| *c != '"' && *c != '\'')
            .collect::<String>()
            .to_ascii_lowercase();
        if prefix.contains('f') || prefix.contains('t') {
            return None;
        }
        let body = std::str::from_utf8(&self.source[start.end_byte()..end.start_byte()]).ok()?;
        Some((prefix, body.to_string()))
    }

    fn string_repr(&self, node: Node) -> Option<String> {
        let (prefix, body) = self.string_parts(node)?;
        let b = if prefix.contains('b') { "b" } else { "" };
        Some(format!("{b}{}", quote_like_repr(&body)))
    }

    fn concatenated_repr(&self, node: Node) -> Option<String> {
        let mut cursor = node.walk();
        let mut joined = String::new();
        let mut bytes = false;
        for part in node.named_children(&mut cursor) {
            if part.kind() != "string" {
                continue;
            }
            let (prefix, body) = self.string_parts(part)?;
            bytes |= prefix.contains('b');
            joined.push_str(&body);
        }
        let b = if bytes { "b" } else { "" };
        Some(format!("{b}{}", quote_like_repr(&joined)))
    }

    /// First statement of a body when it is a plain string literal, cleaned like `inspect.cleandoc`.
    fn docstring(&self, body: Node) -> Option<String> {
        let mut cursor = body.walk();
        let first = body
            .named_children(&mut cursor)
            .find(|c| c.kind() != "comment")?;
        if first.kind() != "expression_statement" || first.named_child_count() != 1 {
            return None;
        }
        let literal = first.named_child(0)?;
        if literal.kind() != "string" {
            return None;
        }
        let (prefix, body) = self.string_parts(literal)?;
        if prefix.contains('b') {
            return None;
        }
        Some(clean_doc(&body))
    }

    fn field_text(&self, node: Node, field: &str) -> Option<String> {
        node.child_by_field_name(field)
            .map(|n| self.text(n).to_string())
    }

    fn text(&self, node: Node) -> &str {
        node.utf8_text(self.source).unwrap_or("")
    }
}

fn start_line(node: Node) -> u32 {
    node.start_position().row as u32 + 1
}

/// Last line holding code of `node`. Trailing comments are not code: the
/// end is taken from the last non-comment child, descending until a leaf.
fn end_line(node: Node) -> u32 {
    let mut current = node;
    loop {
        let last = {
            let mut cursor = current.walk();
            current
                .children(&mut cursor)
                .filter(|c| c.kind() != "comment")
                .last()
        };
        match last {
            Some(child) => current = child,
            None => break,
        }
    }
    // An end position at column 0 belongs to the previous line.
    let start = node.start_position().row;
    let end = current.end_position();
    let row = if end.column == 0 && end.row > start {
        end.row - 1
    } else {
        end.row
    };
    row as u32 + 1
}

fn is_async(node: Node) -> bool {
    node.child(0).is_some_and(|c| c.kind() == "async")
}

fn int_repr(text: &str) -> String {
    let cleaned = text.replace('_', "");
    let lower = cleaned.to_ascii_lowercase();
    let parsed = if let Some(hex) = lower.strip_prefix("0x") {
        i128::from_str_radix(hex, 16).ok()
    } else if let Some(oct) = lower.strip_prefix("0o") {
        i128::from_str_radix(oct, 8).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        i128::from_str_radix(bin, 2).ok()
    } else {
        lower.parse::<i128>().ok()
    };
    parsed.map_or(cleaned, |n| n.to_string())
}

fn float_repr(text: &str) -> String {
    let cleaned = text.replace('_', "");
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => format!("{v:?}"),
        Ok(_) => "inf".into(),
        Err(_) => cleaned,
    }
}

/// Quote a raw literal body the way Python's `repr` picks quotes.
fn quote_like_repr(body: &str) -> String {
    let body = body.replace('\n', "\\n").replace('\r', "\\r").replace('\t', "\\t");
    if !body.contains('\'') {
        format!("'{body}'")
    } else if !body.contains('"') {
        format!("\"{body}\"")
    } else {
        format!("'{}'", body.replace('\'', "\\'"))
    }
}

/// Dedent a docstring and trim blank leading and trailing lines.
fn clean_doc(raw: &str) -> String {
    let expanded = raw.replace('\t', "        ");
    let lines: Vec<&str> = expanded.lines().collect();
    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            cleaned.push(line.trim_start().to_string());
        } else {
            cleaned.push(line.get(margin..).unwrap_or("").trim_end().to_string());
        }
    }
    while cleaned.first().is_some_and(|l| l.trim().is_empty()) {
        cleaned.remove(0);
    }
    while cleaned.last().is_some_and(|l| l.trim().is_empty()) {
        cleaned.pop();
    }
    cleaned.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(source: &str) -> FileEntities {
        match PythonExtractor::new().extract("test.py", source) {
            FileOutcome::Parsed(entities) => entities,
            FileOutcome::Failed(f) => panic!("unexpected parse failure: {}", f.detail),
        }
    }

    #[test]
    fn class_with_method_spans() {
        let source = "class Foo:\n    \"\"\"A foo.\"\"\"\n    def bar(self, x):\n        y = x\n        return y\n\n    LIMIT = 3\n\n\n\n";
        let e = extract(source);

        let foo = &e.classes[0];
        assert_eq!(foo.name, "Foo");
        assert_eq!(foo.start_line, 1);
        assert_eq!(foo.end_line, 7);
        assert_eq!(foo.docstring.as_deref(), Some("A foo."));

        let bar = &e.functions[0];
        assert_eq!(bar.name, "bar");
        assert_eq!((bar.start_line, bar.end_line), (3, 5));
        assert!(bar.is_method);
        assert_eq!(bar.class_name.as_deref(), Some("Foo"));
        assert_eq!(bar.args, vec!["self", "x"]);
    }

    #[test]
    fn variable_scopes_follow_innermost_frame() {
        let source = r#"
TOP = 1

class Config:
    name: str = "x"

    def load(self):
        local = []
        self.cache = {}

def helper():
    inner = None
"#;
        let e = extract(source);
        let by_name = |n: &str| e.variables.iter().find(|v| v.name == n).unwrap();

        let top = by_name("TOP");
        assert_eq!(top.scope, VariableScope::Module);
        assert!(top.is_module_level);
        assert_eq!(top.value_repr, "1");

        let name = by_name("name");
        assert_eq!(name.scope, VariableScope::Class);
        assert_eq!(name.class_name.as_deref(), Some("Config"));
        assert_eq!(name.value_repr, "'x'");

        let local = by_name("local");
        assert_eq!(local.scope, VariableScope::Local);
        assert!(!local.is_module_level);
        assert!(local.class_name.is_none());
        assert_eq!(local.value_repr, "[...]");

        assert_eq!(by_name("inner").scope, VariableScope::Local);
        assert!(e.variables.iter().all(|v| v.name != "cache"));
    }

    #[test]
    fn nested_classes_restore_context() {
        let source = "class Outer:\n    class Inner:\n        def a(self):\n            pass\n    def b(self):\n        pass\n";
        let e = extract(source);
        let a = e.functions.iter().find(|f| f.name == "a").unwrap();
        let b = e.functions.iter().find(|f| f.name == "b").unwrap();
        assert_eq!(a.class_name.as_deref(), Some("Inner"));
        assert_eq!(b.class_name.as_deref(), Some("Outer"));
    }

    #[test]
    fn function_nested_in_method_is_not_a_method() {
        let source = "class A:\n    def m(self):\n        def helper():\n            return 1\n        return helper()\n";
        let e = extract(source);
        let helper = e.functions.iter().find(|f| f.name == "helper").unwrap();
        assert!(!helper.is_method);
        assert!(helper.class_name.is_none());
    }

    #[test]
    fn decorators_and_async() {
        let source = r#"
@app.route("/x")
@staticmethod
@functools.lru_cache(maxsize=None)
@(lambda f: f)
async def handler(request, *args, key=None, **kwargs):
    pass
"#;
        let e = extract(source);
        let h = &e.functions[0];
        assert!(h.is_async);
        assert_eq!(
            h.decorators,
            vec!["app.route", "staticmethod", "functools.lru_cache", "unknown_decorator"]
        );
        assert_eq!(h.args, vec!["request", "*args", "key", "**kwargs"]);
        assert_eq!(h.start_line, 6);
    }

    #[test]
    fn parameter_kinds_skip_separators() {
        let source = "def f(a, b: int, /, c=1, *, d: str = 'x', **rest):\n    pass\n";
        let e = extract(source);
        assert_eq!(e.functions[0].args, vec!["a", "b", "c", "d", "**rest"]);
    }

    #[test]
    fn base_classes_keep_only_names() {
        let source = "class A(Base, pkg.mod.Mixin, make_base(), metaclass=Meta):\n    pass\n";
        let e = extract(source);
        assert_eq!(e.classes[0].base_classes, vec!["Base", "pkg.mod.Mixin"]);
    }

    #[test]
    fn value_shapes() {
        let source = r#"
a = 42
b = 0x10
c = 1.50
d = True
e = None
f = other
g = {"k": 1}
h = (1, 2)
i = {1, 2}
j = 1, 2
k = factory()
l = os.path.join("a", "b")
m = x + y
n: int
o = f"hi {a}"
p = "it's"
q = b'raw'
r = (7)
"#;
        let e = extract(source);
        let repr = |n: &str| {
            e.variables
                .iter()
                .find(|v| v.name == n)
                .unwrap()
                .value_repr
                .clone()
        };
        assert_eq!(repr("a"), "42");
        assert_eq!(repr("b"), "16");
        assert_eq!(repr("c"), "1.5");
        assert_eq!(repr("d"), "True");
        assert_eq!(repr("e"), "None");
        assert_eq!(repr("f"), "other");
        assert_eq!(repr("g"), "{...}");
        assert_eq!(repr("h"), "(...)");
        assert_eq!(repr("i"), "{...}");
        assert_eq!(repr("j"), "(...)");
        assert_eq!(repr("k"), "factory(...)");
        assert_eq!(repr("l"), "os.path.join(...)");
        assert_eq!(repr("m"), "...");
        assert_eq!(repr("n"), "");
        assert_eq!(repr("o"), "...");
        assert_eq!(repr("p"), "\"it's\"");
        assert_eq!(repr("q"), "b'raw'");
        assert_eq!(repr("r"), "7");
    }

    #[test]
    fn chained_assignment_records_each_name() {
        let e = extract("a = b = 0\nx.y = z = 1\n(p, q) = 1, 2\n");
        let names: Vec<&str> = e.variables.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "z"]);
        assert!(e.variables.iter().all(|v| v.line == 1 || v.name == "z"));
        assert_eq!(e.variables[2].line, 2);
    }

    #[test]
    fn augmented_assignment_is_ignored() {
        let e = extract("total = 0\ntotal += 1\n");
        assert_eq!(e.variables.len(), 1);
    }

    #[test]
    fn assignments_inside_blocks_keep_module_scope() {
        let source = "if True:\n    FLAG = 1\nelse:\n    FLAG = 2\ntry:\n    import x\nexcept ImportError:\n    x = None\n";
        let e = extract(source);
        assert_eq!(e.variables.len(), 3);
        assert!(e
            .variables
            .iter()
            .all(|v| v.scope == VariableScope::Module));
    }

    #[test]
    fn docstring_is_dedented() {
        let source = "def f():\n    \"\"\"\n    Summary.\n\n        Indented detail.\n    \"\"\"\n    return 1\n";
        let e = extract(source);
        assert_eq!(
            e.functions[0].docstring.as_deref(),
            Some("Summary.\n\n    Indented detail.")
        );
    }

    #[test]
    fn non_string_first_statement_has_no_docstring() {
        let e = extract("def f():\n    x = 'not a doc'\n");
        assert!(e.functions[0].docstring.is_none());
    }

    #[test]
    fn spans_stay_inside_file() {
        let source = "class A:\n    def m(self):\n        pass\n";
        let e = extract(source);
        let line_count = crate::models::file::count_lines(source);
        for f in &e.functions {
            assert!(f.start_line <= f.end_line && f.end_line <= line_count);
        }
        for c in &e.classes {
            assert!(c.start_line <= c.end_line && c.end_line <= line_count);
        }
    }

    #[test]
    fn trailing_comments_are_outside_spans() {
        let source = "def f():\n    pass\n    # trailing\n# top-level comment\n\nx = 1\n";
        let e = extract(source);
        assert_eq!((e.functions[0].start_line, e.functions[0].end_line), (1, 2));

        let source = "class A:\n    def m(self):\n        return 1\n        # after return\n    # end of class\n";
        let e = extract(source);
        assert_eq!(e.classes[0].end_line, 3);
        assert_eq!(e.functions[0].end_line, 3);
    }

    #[test]
    fn closing_bracket_line_ends_the_span() {
        let source = "def f():\n    return g(\n        1,  # one\n    )\n";
        let e = extract(source);
        assert_eq!(e.functions[0].end_line, 4);
    }

    #[test]
    fn syntax_error_is_a_failure() {
        let outcome = PythonExtractor::new().extract("bad.py", "def broken(:\n    pass\n");
        match outcome {
            FileOutcome::Failed(f) => {
                assert_eq!(f.path, "bad.py");
                assert!(f.detail.starts_with("syntax error"));
            }
            FileOutcome::Parsed(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn empty_source_parses_to_nothing() {
        assert_eq!(extract(""), FileEntities::default());
    }

    #[test]
    fn int_and_float_reprs() {
        assert_eq!(int_repr("1_000"), "1000");
        assert_eq!(int_repr("0b101"), "5");
        assert_eq!(float_repr("1.0"), "1.0");
        assert_eq!(float_repr("2.50"), "2.5");
    }
}
