pub mod entity;
pub mod file;

pub use entity::{
    ClassRecord, CodeEntity, EntityDetail, FileEntities, FunctionRecord, Located, VariableRecord,
    VariableScope,
};
pub use file::{FileInfo, FileRecord, BINARY_SENTINEL};
