use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use zplay::kernel::services::adapters::{
    collect_folder_uploads, ensure_settings_file, ensure_storage_dir, load_settings,
    ChannelNotifier, DirStorage,
};
use zplay::kernel::services::ports::{Notice, Settings};
use zplay::kernel::{FileStore, Persistence, UploadError};
use zplay::models::{FileId, FileRecord};

mod logging;

type CliResult<T> = Result<T, Box<dyn Error>>;

const USAGE: &str = "\
usage: zplay [--data-dir DIR] [-v] <command> [args]

commands:
  ls                      list files (* marks the open file)
  tree                    show files grouped by folder
  cat NAME                print a file
  new NAME [CONTENT]      create a file and open it
  write NAME CONTENT      replace a file's content
  mkdir NAME              create an empty folder
  rename NAME NEW_NAME    rename a file (NEW_NAME may include folders)
  mv NAME FOLDER|/        move a file into a folder, or to the root
  cp NAME                 duplicate a file
  rm NAME                 delete a file
  rmdir NAME              delete a folder and everything in it
  mvdir NAME NEW_NAME     rename a folder
  open NAME               make a file current
  recent                  list recently opened files
  clear-recent            forget recently opened files
  search QUERY            rank files by name
  upload DIR              import a folder from disk
  paths                   print storage and log locations";

struct Args {
    data_dir: Option<PathBuf>,
    verbose: bool,
    command: Vec<String>,
}

/// 全局选项只在命令名之前识别，之后的参数原样交给命令。
fn parse_args(args: impl IntoIterator<Item = String>) -> CliResult<Args> {
    let mut data_dir = None;
    let mut verbose = false;
    let mut command = Vec::new();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data-dir" if command.is_empty() => {
                let dir = args.next().ok_or("--data-dir needs a value")?;
                data_dir = Some(PathBuf::from(dir));
            }
            "-v" | "--verbose" if command.is_empty() => verbose = true,
            "-h" | "--help" if command.is_empty() => {}
            _ => command.push(arg),
        }
    }
    Ok(Args {
        data_dir,
        verbose,
        command,
    })
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    if args.command.is_empty() {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    if args.data_dir.is_none() {
        if let Err(e) = ensure_settings_file() {
            eprintln!("warning: cannot create settings file: {e}");
        }
    }
    let settings = load_settings().unwrap_or_default();
    let log_guard = logging::init(&settings.log, args.verbose);

    let (notice_tx, notice_rx) = mpsc::channel::<Notice>();
    let result = run(&args, &settings, notice_tx, log_guard.as_ref());

    for notice in notice_rx.try_iter() {
        eprintln!("{notice}");
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::warn!(error = %e, command = ?args.command, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn open_store(
    args: &Args,
    settings: &Settings,
    notices: mpsc::Sender<Notice>,
) -> CliResult<FileStore> {
    let dir = match args.data_dir.clone().or_else(|| settings.storage.data_dir.clone()) {
        Some(dir) => dir,
        None => ensure_storage_dir()?,
    };
    let persistence = Persistence::new(
        Box::new(DirStorage::new(dir)),
        Box::new(ChannelNotifier::new(notices)),
        &settings.storage.namespace,
    );
    Ok(FileStore::open(persistence, settings.recent.limit))
}

fn require<'a>(rest: &'a [String], index: usize, what: &str) -> CliResult<&'a str> {
    rest.get(index)
        .map(String::as_str)
        .ok_or_else(|| format!("missing {what}").into())
}

fn id_of(store: &FileStore, name: &str) -> CliResult<FileId> {
    store
        .find_by_name(name)
        .map(|record| record.id)
        .ok_or_else(|| format!("no file named {name:?}").into())
}

fn run(
    args: &Args,
    settings: &Settings,
    notices: mpsc::Sender<Notice>,
    log_guard: Option<&logging::LoggingGuard>,
) -> CliResult<()> {
    let (command, rest) = args
        .command
        .split_first()
        .ok_or("missing command")?;

    if command == "paths" {
        let storage = args
            .data_dir
            .clone()
            .or_else(|| settings.storage.data_dir.clone())
            .or_else(zplay::kernel::services::adapters::get_storage_dir);
        match storage {
            Some(dir) => println!("storage: {}", dir.display()),
            None => println!("storage: (unknown)"),
        }
        if let Some(guard) = log_guard {
            println!("logs: {}", guard.log_dir().display());
        }
        return Ok(());
    }

    let mut store = open_store(args, settings, notices)?;

    match command.as_str() {
        "ls" => {
            let current = store.current().map(|record| record.id);
            for record in store.files().iter().filter(|r| !r.is_placeholder()) {
                let marker = if Some(record.id) == current { '*' } else { ' ' };
                println!("{marker} {}\t{}", record.name, record.kind);
            }
        }
        "tree" => print_tree(&store),
        "cat" => {
            let id = id_of(&store, require(rest, 0, "NAME")?)?;
            if let Some(record) = store.get(id) {
                print!("{}", record.content);
            }
        }
        "new" => {
            let name = require(rest, 0, "NAME")?;
            let content = rest.get(1).cloned().unwrap_or_default();
            store.create_file(name, content)?;
            println!("created {name}");
        }
        "write" => {
            let id = id_of(&store, require(rest, 0, "NAME")?)?;
            store.update_content(id, require(rest, 1, "CONTENT")?)?;
        }
        "mkdir" => {
            let name = require(rest, 0, "NAME")?;
            store.create_folder(name)?;
            println!("created {name}/");
        }
        "rename" => {
            let id = id_of(&store, require(rest, 0, "NAME")?)?;
            store.rename(id, require(rest, 1, "NEW_NAME")?)?;
        }
        "mv" => {
            let id = id_of(&store, require(rest, 0, "NAME")?)?;
            let target = require(rest, 1, "FOLDER")?;
            let target = (target != "/").then_some(target);
            store.move_file(id, target)?;
        }
        "cp" => {
            let id = id_of(&store, require(rest, 0, "NAME")?)?;
            let copy = store.duplicate_file(id)?;
            if let Some(record) = store.get(copy) {
                println!("created {}", record.name);
            }
        }
        "rm" => {
            let id = id_of(&store, require(rest, 0, "NAME")?)?;
            let removed = store.delete_file(id)?;
            println!("deleted {}", removed.name);
        }
        "rmdir" => {
            let name = require(rest, 0, "NAME")?;
            let count = store.delete_folder(name)?;
            println!("deleted {name}/ ({count} files)");
        }
        "mvdir" => {
            let count = store.rename_folder(require(rest, 0, "NAME")?, require(rest, 1, "NEW_NAME")?)?;
            println!("renamed {count} files");
        }
        "open" => {
            let id = id_of(&store, require(rest, 0, "NAME")?)?;
            store.set_current_by_id(id)?;
        }
        "recent" => {
            for entry in store.recent_files() {
                match store.resolve_recent(entry) {
                    Some(record) if record.name != entry.cached_name => {
                        println!("{} (now {})", entry.cached_name, record.name)
                    }
                    Some(_) => println!("{}", entry.cached_name),
                    None => println!("{} (deleted)", entry.cached_name),
                }
            }
        }
        "clear-recent" => store.clear_recent(),
        "search" => {
            let query = require(rest, 0, "QUERY")?;
            for hit in store.search(query) {
                println!("{:>4}  {}", hit.score, hit.record.name);
            }
        }
        "upload" => upload(&mut store, require(rest, 0, "DIR")?)?,
        other => return Err(format!("unknown command {other:?}\n\n{USAGE}").into()),
    }

    if !store.is_storage_in_sync() {
        return Err("changes were not saved".into());
    }
    Ok(())
}

fn print_tree(store: &FileStore) {
    let view = store.group_by_folder();
    let current = store.current().map(|record| record.id);
    let mark = |record: &FileRecord| if Some(record.id) == current { "*" } else { " " };
    for record in &view.root_files {
        println!("{} {}", mark(*record), record.name);
    }
    for folder in &view.folders {
        println!("  {}/", folder.name);
        for entry in &folder.entries {
            println!("{}   {}", mark(entry.record), entry.relative_path);
        }
    }
}

fn upload(store: &mut FileStore, dir: &str) -> CliResult<()> {
    let uploads = collect_folder_uploads(std::path::Path::new(dir))?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .or_else(|e| {
            tracing::error!(
                error = %e,
                "Failed to create multi-thread tokio runtime, falling back to current-thread"
            );
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
        })?;

    let report = match runtime.block_on(store.upload_folder(uploads)) {
        Ok(report) => report,
        Err(UploadError::NothingImported(report)) => {
            for failed in &report.failed_files {
                eprintln!("failed {}: {}", failed.path, failed.reason);
            }
            return Err(UploadError::NothingImported(report).into());
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "imported {} files ({} failed, {} skipped)",
        report.succeeded(),
        report.failed_count(),
        report.skipped.len()
    );
    for failed in &report.failed_files {
        eprintln!("failed {}: {}", failed.path, failed.reason);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/cli_args.rs"]
mod tests;
