//! # CLI Layer
//!
//! One possible UI client for bookvault. This is the only place that knows
//! about stdout, stderr and the data directory on disk.
//!
//! - `run()`: dispatch (called by `main.rs`)
//! - `init_context()`: resolves the data directory and opens the store
//! - `handle_*()`: per-command handlers that call the API and print results

use super::print::{
    print_full_records, print_messages, print_records, print_settings, print_stats, Highlight,
};
use super::setup::{Cli, Commands};
use bookvault::api::{ConfigAction, ListQuery, VaultApi};
use bookvault::error::{Result, VaultError};
use bookvault::model::{NewRecord, RecordUpdate};
use bookvault::search::{SearchOptions, SortDirection, SortField};
use bookvault::store::fs_backend::FsBackend;
use bookvault::store::RecordStore;
use chrono::Local;
use directories::ProjectDirs;
use std::path::PathBuf;

/// Overrides the default data directory.
pub const DATA_DIR_ENV: &str = "BOOKVAULT_DATA";

struct AppContext {
    api: VaultApi<FsBackend>,
}

pub fn run(cli: Cli) -> Result<()> {
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List {
            search,
            case_sensitive,
            regex,
            sort,
            desc,
        }) => handle_list(&ctx, search, case_sensitive, regex, sort, desc),
        Some(Commands::Add {
            title,
            author,
            pages,
            tag,
            date,
        }) => handle_add(&mut ctx, title, author, pages, tag, date),
        Some(Commands::View { ids }) => handle_view(&ctx, ids),
        Some(Commands::Edit {
            id,
            title,
            author,
            pages,
            tag,
            date,
        }) => {
            let update = RecordUpdate {
                title,
                author,
                tag,
                pages,
                date_added: date,
                ..Default::default()
            };
            handle_edit(&mut ctx, id, update)
        }
        Some(Commands::Delete { ids }) => handle_delete(&mut ctx, ids),
        Some(Commands::Log { id, pages, note }) => handle_log(&mut ctx, id, pages, note),
        Some(Commands::Stats) => handle_stats(&ctx),
        Some(Commands::Export { output }) => handle_export(&ctx, output),
        Some(Commands::Import { file }) => handle_import(&mut ctx, file),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx, None, false, false, None, false),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    log::debug!("Using data directory {}", data_dir.display());

    let store = RecordStore::open(FsBackend::new(data_dir));
    Ok(AppContext {
        api: VaultApi::new(store),
    })
}

/// `--data-dir`, then `$BOOKVAULT_DATA`, then the OS data directory.
fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "bookvault", "bookvault")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| VaultError::Store("Could not determine a data directory".to_string()))
}

fn handle_list(
    ctx: &AppContext,
    search: Option<String>,
    case_sensitive: bool,
    regex: bool,
    sort: Option<SortField>,
    desc: bool,
) -> Result<()> {
    let query = ListQuery {
        search,
        options: SearchOptions {
            case_sensitive,
            advanced: regex,
        },
        sort: sort.map(|field| {
            let direction = if desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            (field, direction)
        }),
    };
    let result = ctx.api.list_records(&query)?;

    let highlight = query.search.as_deref().map(|q| Highlight {
        query: q,
        options: query.options,
    });
    print_records(&result.listed_records, highlight.as_ref());
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(
    ctx: &mut AppContext,
    title: String,
    author: String,
    pages: u32,
    tag: String,
    date: Option<String>,
) -> Result<()> {
    if title.trim().is_empty() {
        return Err(VaultError::Api("Title cannot be empty".into()));
    }
    let new = NewRecord {
        title,
        author,
        tag,
        pages,
        date_added: date.unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string()),
    };
    let result = ctx.api.add_record(new)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, ids: Vec<String>) -> Result<()> {
    let result = ctx.api.view_records(ids.as_slice())?;
    print_full_records(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, id: String, update: RecordUpdate) -> Result<()> {
    let result = ctx.api.update_record(&id, update)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, ids: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_records(ids.as_slice())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_log(ctx: &mut AppContext, id: String, pages: i64, note: String) -> Result<()> {
    let result = ctx.api.log_progress(&id, pages, &note)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.stats()?;
    if let Some(stats) = &result.stats {
        print_stats(stats, result.settings.as_ref());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, output: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export_records(output.as_deref())?;
    if let Some(json) = &result.export {
        println!("{}", json);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: PathBuf) -> Result<()> {
    let result = ctx.api.import_records(&file)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(settings) = &result.settings {
            print_settings(settings);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
