use std::path::PathBuf;

use regex::Regex;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{read_config, resolve_data_dir};
use crate::io::storage::{self, FileStore, THEME_KEY};
use crate::io::todo_io::{NO_VALID_TASKS, export_todos, read_todos_file};
use crate::logging::{LogTarget, init_tracing, level_for_verbosity};
use crate::model::{AppConfig, ThemeMode, parse_date_input};
use crate::ops::todos::{NewTask, TaskUpdate, TodoError, TodoStore};
use crate::ops::view::{ViewCriteria, derive_view};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Everything a subcommand needs: the opened store and the loaded config
struct Context {
    kv: FileStore,
    store: TodoStore,
    config: AppConfig,
    json: bool,
}

impl Context {
    fn save(&mut self) -> Result<(), storage::StorageError> {
        self.store.save(&mut self.kv)
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let Some(command) = cli.command else {
        return Ok(());
    };
    let data_dir = resolve_data_dir(cli.data_dir.as_deref());
    // A broken config file is an error here; the TUI falls back instead
    let config = read_config(&data_dir)?;
    init_tracing(
        LogTarget::Stderr,
        &level_for_verbosity(&config.log.level, cli.verbose),
    )?;

    let kv = FileStore::open(&data_dir)?;
    let store = TodoStore::load(&kv);
    let mut ctx = Context {
        kv,
        store,
        config,
        json: cli.json,
    };

    match command {
        // Read commands
        Commands::List(args) => cmd_list(&ctx, args),

        // Write commands
        Commands::Add(args) => cmd_add(&mut ctx, args),
        Commands::Toggle(args) => cmd_toggle(&mut ctx, args),
        Commands::Edit(args) => cmd_edit(&mut ctx, args),
        Commands::Rm(args) => cmd_rm(&mut ctx, args),
        Commands::ClearCompleted => cmd_clear_completed(&mut ctx),
        Commands::DoneAll => cmd_done_all(&mut ctx),

        // Files
        Commands::Export(args) => cmd_export(&ctx, args),
        Commands::Import(args) => cmd_import(&mut ctx, args),

        // Preferences
        Commands::Theme(args) => cmd_theme(&mut ctx, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the task by id in the current output mode
fn print_task(ctx: &Context, id: &str) -> CmdResult {
    let Some(task) = ctx.store.get(id) else {
        return Err(TodoError::NotFound(id.to_string()).into());
    };
    if ctx.json {
        print_json(task)
    } else {
        println!("{}", format_task_line(task));
        Ok(())
    }
}

fn print_count(ctx: &Context, count: usize, what: &str) -> CmdResult {
    if ctx.json {
        print_json(&CountJson { count })
    } else {
        println!("{} {} tasks", what, count);
        Ok(())
    }
}

fn parse_due(input: &str) -> Result<Option<chrono::NaiveDate>, Box<dyn std::error::Error>> {
    Ok(parse_date_input(input)?)
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context, args: ListArgs) -> CmdResult {
    let criteria = ViewCriteria {
        filter: args.filter,
        sort_by_due: args.sort_due,
        search: args.search.unwrap_or_default(),
    };
    let tasks = derive_view(ctx.store.tasks(), &criteria);
    let remaining = ctx.store.remaining_count();
    let done = ctx.store.done_count();

    if ctx.json {
        return print_json(&ListJson {
            remaining,
            done,
            tasks,
        });
    }
    let highlight = search_regex(&criteria.search);
    for line in format_listing(&tasks, remaining, done) {
        match &highlight {
            Some(re) => println!("{}", re.replace_all(&line, "*$0*")),
            None => println!("{}", line),
        }
    }
    Ok(())
}

/// Case-insensitive literal match for marking search hits in text output
fn search_regex(query: &str) -> Option<Regex> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(query))).ok()
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &mut Context, args: AddArgs) -> CmdResult {
    let due_date = match args.due.as_deref() {
        Some(d) => parse_due(d)?,
        None => None,
    };
    let payload = NewTask {
        title: args.title,
        importance: Some(args.importance.unwrap_or(ctx.config.defaults.importance)),
        due_date,
        notes: args.notes,
        project: Some(
            args.project
                .unwrap_or_else(|| ctx.config.defaults.project.clone()),
        ),
        tags: args.tags,
        recurrence: args.recurrence,
        attachments: Vec::new(),
    };
    let id = ctx.store.add(payload).ok_or(TodoError::EmptyTitle)?;
    ctx.save()?;
    print_task(ctx, &id)
}

fn cmd_toggle(ctx: &mut Context, args: IdArg) -> CmdResult {
    let id = ctx.store.resolve_id(&args.id)?;
    ctx.store.toggle(&id);
    ctx.save()?;
    print_task(ctx, &id)
}

fn cmd_edit(ctx: &mut Context, args: EditArgs) -> CmdResult {
    let id = ctx.store.resolve_id(&args.id)?;
    let due_date = if args.no_due {
        Some(None)
    } else {
        match args.due.as_deref() {
            Some(d) => Some(parse_due(d)?),
            None => None,
        }
    };
    let title = match args.title {
        Some(t) if t.trim().is_empty() => return Err(TodoError::EmptyTitle.into()),
        Some(t) => Some(t.trim().to_string()),
        None => None,
    };
    let update = TaskUpdate {
        title,
        notes: args.notes,
        importance: args.importance,
        due_date,
        project: args.project,
        tags: (!args.tags.is_empty()).then_some(args.tags),
        recurrence: args.recurrence,
        ..Default::default()
    };
    if update.is_empty() {
        return Err("nothing to change (see tl edit --help)".into());
    }
    ctx.store.edit(&id, update);
    ctx.save()?;
    print_task(ctx, &id)
}

fn cmd_rm(ctx: &mut Context, args: IdArg) -> CmdResult {
    let id = ctx.store.resolve_id(&args.id)?;
    let title = ctx
        .store
        .get(&id)
        .map(|t| t.title.clone())
        .unwrap_or_default();
    ctx.store.remove(&id);
    ctx.save()?;
    if ctx.json {
        print_json(&serde_json::json!({ "removed": id }))
    } else {
        println!("Removed {} {}", short_id(&id), title);
        Ok(())
    }
}

fn cmd_clear_completed(ctx: &mut Context) -> CmdResult {
    let count = ctx.store.clear_completed();
    ctx.save()?;
    print_count(ctx, count, "Cleared")
}

fn cmd_done_all(ctx: &mut Context) -> CmdResult {
    let count = ctx.store.remaining_count();
    ctx.store.mark_all_done();
    ctx.save()?;
    print_count(ctx, count, "Completed")
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

fn export_dir(ctx: &Context, explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| ctx.config.export.dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn cmd_export(ctx: &Context, args: ExportArgs) -> CmdResult {
    let dir = export_dir(ctx, args.dir);
    let path = export_todos(ctx.store.tasks(), &dir)?;
    if ctx.json {
        print_json(&serde_json::json!({ "path": path, "count": ctx.store.len() }))
    } else {
        println!("Exported {} tasks to {}", ctx.store.len(), path.display());
        Ok(())
    }
}

fn cmd_import(ctx: &mut Context, args: ImportArgs) -> CmdResult {
    let batch = read_todos_file(&args.file)?;
    if batch.tasks.is_empty() {
        return Err(NO_VALID_TASKS.into());
    }
    let skipped = batch.rejected.len();
    for rejection in &batch.rejected {
        tracing::debug!(%rejection, "skipped import entry");
    }
    let imported = ctx.store.import_batch(batch.tasks);
    ctx.save()?;
    if ctx.json {
        print_json(&ImportJson { imported, skipped })
    } else if skipped > 0 {
        println!("Imported {} tasks ({} skipped).", imported, skipped);
        Ok(())
    } else {
        println!("Imported {} tasks.", imported);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

fn cmd_theme(ctx: &mut Context, args: ThemeArgs) -> CmdResult {
    let mode = match args.mode {
        Some(mode) => {
            storage::save(&mut ctx.kv, THEME_KEY, &mode)?;
            mode
        }
        None => storage::load_or(&ctx.kv, THEME_KEY, ThemeMode::default()),
    };
    if ctx.json {
        print_json(&mode)
    } else {
        println!("{}", mode);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_regex_escapes_input() {
        let re = search_regex("a+b").unwrap();
        assert!(re.is_match("A+B"));
        assert!(!re.is_match("aab"));
        assert!(search_regex("  ").is_none());
    }
}
