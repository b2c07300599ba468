// Inherit lint configuration from lib.rs for consistency
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::items_after_statements,
    clippy::too_many_lines,
    clippy::similar_names,
    clippy::fn_params_excessive_bools,
    clippy::unnecessary_wraps,
    clippy::match_same_arms
)]

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use atlas::cli::commands::{Cli, Command};
use atlas::cli::output::{self, OutputFormat};
use atlas::config::Config;
use atlas::db::Database;
use atlas::edit::{self, PatchOp};
use atlas::indexer;
use atlas::operations;

fn main() {
    let cli = Cli::parse();

    // The tool server talks over stdout, so logs always go to stderr.
    let default_level = if matches!(cli.command, Command::Serve) {
        "info"
    } else {
        "warn"
    };
    init_tracing(default_level);

    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("atlas={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::fmt::Display>> {
    let db = cli.db.as_deref();
    match cli.command {
        Command::Index { path } => cmd_index(&path, db),
        Command::Init => cmd_init(db),
        Command::Folders => cmd_folders(db),
        Command::Files { folder, ext } => cmd_files(folder.as_deref(), ext.as_deref(), db),
        Command::File { path, content } => cmd_file(&path, content, db),
        Command::Cat { path } => cmd_cat(&path, db),
        Command::At { path, line } => cmd_at(&path, line, db),
        Command::Function { name, class, path } => {
            cmd_function(&name, class.as_deref(), path.as_deref(), db)
        }
        Command::Class { name, path } => cmd_class(&name, path.as_deref(), db),
        Command::Methods { class, path } => cmd_methods(&class, path.as_deref(), db),
        Command::Structure { path } => cmd_structure(&path, db),
        Command::Segment { path, start, end } => cmd_segment(&path, start, end, db),
        Command::Stats => cmd_stats(db),
        Command::Failures { prefix } => cmd_failures(prefix.as_deref(), db),
        Command::Diff {
            original,
            modified,
            label,
        } => cmd_diff(&original, &modified, label.as_deref()),
        Command::Patch {
            path,
            ops,
            diff,
            write,
        } => cmd_patch(&path, ops.as_deref(), diff.as_deref(), write),
        Command::Issues {
            path,
            issue,
            issue_file,
        } => cmd_issues(&path, issue.as_deref(), issue_file.as_deref(), db),
        Command::Context { path, name } => cmd_context(&path, &name, db),
        Command::Serve => cmd_serve(db),
    }
}

type CmdResult = Result<(), Box<dyn std::fmt::Display>>;

fn map_err(e: impl std::fmt::Display + 'static) -> Box<dyn std::fmt::Display> {
    Box::new(e.to_string())
}

fn get_config(db: Option<&str>) -> Result<Config, Box<dyn std::fmt::Display>> {
    let config = Config::from_cwd().map_err(map_err)?;
    Ok(match db {
        Some(path) => config.with_db_path(path),
        None => config,
    })
}

fn get_db(config: &Config) -> Result<Database, Box<dyn std::fmt::Display>> {
    indexer::ensure_index(config).map_err(map_err)
}

fn print<T: Serialize>(config: &Config, value: &T) {
    let format = OutputFormat::from_setting(&config.settings.output.format);
    println!("{}", output::format_as(value, format));
}

fn cmd_index(path: &str, db: Option<&str>) -> CmdResult {
    let mut config = if path == "." {
        get_config(None)?
    } else {
        Config::new(path)
    };
    if let Some(db) = db {
        config = config.with_db_path(db);
    }

    let result = indexer::run_index(&config).map_err(map_err)?;
    let output: operations::IndexOutput = result.into();
    print(&config, &output);
    Ok(())
}

fn cmd_init(db: Option<&str>) -> CmdResult {
    let config = get_config(db)?;
    config.save_settings().map_err(map_err)?;

    #[derive(Serialize)]
    struct InitOutput {
        config: String,
    }
    print(
        &config,
        &InitOutput {
            config: config.config_path.display().to_string(),
        },
    );
    Ok(())
}

fn cmd_folders(db: Option<&str>) -> CmdResult {
    let config = get_config(db)?;
    let db = get_db(&config)?;
    let folders = operations::list_folders(&db).map_err(map_err)?;
    print(&config, &folders);
    Ok(())
}

fn cmd_files(folder: Option<&str>, ext: Option<&str>, db: Option<&str>) -> CmdResult {
    let config = get_config(db)?;
    let db = get_db(&config)?;
    let result = match ext {
        Some(ext) => operations::list_files_by_extension(&db, ext),
        None => operations::list_files_in_folder(&db, folder.unwrap_or_default()),
    }
    .map_err(map_err)?;
    print(&config, &result);
    Ok(())
}

fn cmd_file(path: &str, content: bool, db: Option<&str>) -> CmdResult {
    let config = get_config(db)?;
    let db = get_db(&config)?;
    let file = operations::get_file_by_path(&db, path, content).map_err(map_err)?;
    print(&config, &file);
    Ok(())
}

fn cmd_cat(path: &str, db: Option<&str>) -> CmdResult {
    let config = get_config(db)?;
    let db = get_db(&config)?;
    let content = operations::get_file_content(&db, path).map_err(map_err)?;

    #[derive(Serialize)]
    struct CatOutput<'a> {
        path: &'a str,
        content: Option<String>,
    }
    print(&config, &CatOutput { path, content });
    Ok(())
}

fn cmd_at(path: &str, line: u32, db: Option<&str>) -> CmdResult {
    let config = get_config(db)?;
    let db = get_db(&config)?;
    let entity = operations::entity_at_line(&db, path, line.into()).map_err(map_err)?;
    print(&config, &entity);
    Ok(())
}

fn cmd_function(
    name: &str,
    class: Option<&str>,
    path: Option<&str>,
    db: Option<&str>,
) -> CmdResult {
    let config = get_config(db)?;
    let db = get_db(&config)?;
    let result = operations::find_function(&db, name, class, path).map_err(map_err)?;
    print(&config, &result);
    Ok(())
}

fn cmd_class(name: &str, path: Option<&str>, db: Option<&str>) -> CmdResult {
    let config = get_config(db)?;
    let db = get_db(&config)?;
    let result = operations::find_class(&db, name, path).map_err(map_err)?;
    print(&config, &result);
    Ok(())
}

fn cmd_methods(class: &str, path: Option<&str>, db: Option<&str>) -> CmdResult {
    let config = get_config(db)?;
    let db = get_db(&config)?;
    let result = operations::list_class_methods(&db, class, path).map_err(map_err)?;
    print(&config, &result);
    Ok(())
}

fn cmd_structure(path: &str, db: Option<&str>) -> CmdResult {
    let config = get_config(db)?;
    let db = get_db(&config)?;
    let result = operations::get_file_structure(&db, path).map_err(map_err)?;
    print(&config, &result);
    Ok(())
}

fn cmd_segment(path: &str, start: u32, end: u32, db: Option<&str>) -> CmdResult {
    let config = get_config(db)?;
    let db = get_db(&config)?;
    let segment = operations::get_code_segment(&db, path, start.into(), end.into()).map_err(map_err)?;

    #[derive(Serialize)]
    struct SegmentOutput<'a> {
        path: &'a str,
        start: u32,
        end: u32,
        content: String,
    }
    print(
        &config,
        &SegmentOutput {
            path,
            start,
            end,
            content: segment,
        },
    );
    Ok(())
}

fn cmd_stats(db: Option<&str>) -> CmdResult {
    let config = get_config(db)?;
    let db = get_db(&config)?;
    let result = operations::get_stats(&db).map_err(map_err)?;
    print(&config, &result);
    Ok(())
}

fn cmd_failures(prefix: Option<&str>, db: Option<&str>) -> CmdResult {
    let config = get_config(db)?;
    let result = operations::list_failures(&config, prefix).map_err(map_err)?;
    print(&config, &result);
    Ok(())
}

fn cmd_diff(original: &str, modified: &str, label: Option<&str>) -> CmdResult {
    let config = get_config(None)?;
    let old = std::fs::read_to_string(original).map_err(map_err)?;
    let new = std::fs::read_to_string(modified).map_err(map_err)?;
    let label = label.unwrap_or(original);
    let diff = edit::generate_diff(&old, &new, label);

    #[derive(Serialize)]
    struct DiffOutput<'a> {
        path: &'a str,
        changed: bool,
        diff: String,
    }
    print(
        &config,
        &DiffOutput {
            path: label,
            changed: !diff.is_empty(),
            diff,
        },
    );
    Ok(())
}

fn cmd_patch(path: &str, ops: Option<&str>, diff: Option<&str>, write: bool) -> CmdResult {
    let config = get_config(None)?;
    let original = std::fs::read_to_string(path).map_err(map_err)?;

    let patched = match (ops, diff) {
        (Some(ops), _) => {
            let ops: Vec<PatchOp> = serde_json::from_str(ops).map_err(map_err)?;
            edit::apply_patch_ops(&original, &ops)
        }
        (None, Some(diff_path)) => {
            let diff = std::fs::read_to_string(diff_path).map_err(map_err)?;
            edit::apply_unified_diff(&original, &diff).map_err(map_err)?
        }
        (None, None) => return Err(map_err("either --ops or --diff is required")),
    };

    #[derive(Serialize)]
    struct PatchOutput<'a> {
        path: &'a str,
        written: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    }
    if write {
        std::fs::write(path, &patched).map_err(map_err)?;
        print(
            &config,
            &PatchOutput {
                path,
                written: true,
                content: None,
            },
        );
    } else {
        print(
            &config,
            &PatchOutput {
                path,
                written: false,
                content: Some(patched),
            },
        );
    }
    Ok(())
}

fn cmd_issues(
    path: &str,
    issue: Option<&str>,
    issue_file: Option<&str>,
    db: Option<&str>,
) -> CmdResult {
    let config = get_config(db)?;
    let issue_text = match (issue, issue_file) {
        (Some(text), _) => text.to_string(),
        (None, Some(file)) => std::fs::read_to_string(file).map_err(map_err)?,
        (None, None) => return Err(map_err("either --issue or --issue-file is required")),
    };

    let db = get_db(&config)?;
    let content = operations::get_file_content(&db, path)
        .map_err(map_err)?
        .ok_or_else(|| map_err(format!("file not found: {path}")))?;
    let report = operations::identify_issue_patterns(&content, &issue_text).map_err(map_err)?;
    print(&config, &report);
    Ok(())
}

fn cmd_context(path: &str, name: &str, db: Option<&str>) -> CmdResult {
    let config = get_config(db)?;
    let db = get_db(&config)?;
    let result = operations::get_method_context(&db, path, name).map_err(map_err)?;
    print(&config, &result);
    Ok(())
}

fn cmd_serve(db: Option<&str>) -> CmdResult {
    let config = get_config(db)?;
    let rt = tokio::runtime::Runtime::new().map_err(map_err)?;
    rt.block_on(async {
        atlas::mcp::server::start_mcp_server(config)
            .await
            .map_err(map_err)
    })
}
