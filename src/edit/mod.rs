//! Plain-text editing utilities: unified diffs, line patches and block context.

pub mod context;
pub mod diff;
pub mod patch;

pub use context::{extract_method_context, MethodContext};
pub use diff::{apply_unified_diff, generate_diff};
pub use patch::{apply_patch_ops, PatchOp};
