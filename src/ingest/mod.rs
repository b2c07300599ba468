pub mod code;
pub mod scanner;

pub use code::python::PythonExtractor;
pub use code::{FileOutcome, ParseFailure, StructureExtractor};
pub use scanner::{IngestStats, Scanner};
