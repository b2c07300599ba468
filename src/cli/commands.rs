use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "atlas",
    version,
    about = "Structural index of a repository: files, functions, classes and variables",
    after_help = "Query commands read .atlas/index.db under the current directory and build \
                  it on first use. Run 'atlas index' again after the tree changes; every run \
                  rebuilds the index from scratch."
)]
pub struct Cli {
    /// Use this database file instead of .atlas/index.db
    #[arg(long, global = true)]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rebuild the index for a project root.
    ///
    /// Every regular file is recorded (VCS directories and .atlas are skipped).
    /// Python sources are parsed for functions, classes and variables; files
    /// that fail to parse keep their file record and are listed by `atlas failures`.
    Index {
        /// Project root directory (default: current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Write the default settings to .atlas/config.toml
    Init,

    /// List every folder holding indexed files
    Folders,

    /// List files in a folder, or every file with an extension
    Files {
        /// Folder (project-relative, "" or omitted for the root)
        folder: Option<String>,
        /// List files with this extension instead (e.g. "py")
        #[arg(short, long, conflicts_with = "folder")]
        ext: Option<String>,
    },

    /// Show one file's metadata
    File {
        /// File path (project-relative)
        path: String,
        /// Include the stored content
        #[arg(short, long)]
        content: bool,
    },

    /// Print a file's stored content
    Cat {
        /// File path (project-relative)
        path: String,
    },

    /// The innermost function, class or variable at a line
    At {
        /// File path (project-relative)
        path: String,
        /// Line number (1-based)
        line: u32,
    },

    /// Find functions and methods by exact name
    Function {
        /// Function name
        name: String,
        /// Only methods of this class
        #[arg(short, long)]
        class: Option<String>,
        /// Only in this file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Find classes by exact name
    Class {
        /// Class name
        name: String,
        /// Only in this file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// List the methods of a class
    Methods {
        /// Class name
        class: String,
        /// Only in this file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Classes, functions and variables of a file in source order
    Structure {
        /// File path (project-relative)
        path: String,
    },

    /// Print lines START..=END of a file
    Segment {
        /// File path (project-relative)
        path: String,
        /// First line (1-based)
        start: u32,
        /// Last line (inclusive, clamped to the file)
        end: u32,
    },

    /// Show index statistics
    Stats,

    /// List files that failed to parse during the last index run
    Failures {
        /// Only paths starting with this prefix
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Unified diff between two files on disk
    Diff {
        /// Original file
        original: String,
        /// Modified file
        modified: String,
        /// Path label for the a/ and b/ headers (default: ORIGINAL)
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Apply line operations or a unified diff to a file on disk
    Patch {
        /// File to patch
        path: String,
        /// JSON array of {"operation": "replace"|"insert"|"delete", "start_line", "end_line", "content"}
        #[arg(long, conflicts_with = "diff", required_unless_present = "diff")]
        ops: Option<String>,
        /// Unified diff file to apply
        #[arg(long)]
        diff: Option<String>,
        /// Write the result back instead of printing it
        #[arg(short, long)]
        write: bool,
    },

    /// Locate code in an indexed file related to an issue description
    Issues {
        /// File path (project-relative)
        path: String,
        /// Issue text
        #[arg(short, long, conflicts_with = "issue_file", required_unless_present = "issue_file")]
        issue: Option<String>,
        /// Read the issue text from a file
        #[arg(long)]
        issue_file: Option<String>,
    },

    /// A def/class block of an indexed file with surrounding lines
    Context {
        /// File path (project-relative)
        path: String,
        /// Function or class name
        name: String,
    },

    /// Start the tool server (stdio transport)
    Serve,
}
