//! ht structured task command implementations.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::TaskStore;
use crate::task::{Priority, Task, TaskFilters, TaskStats};

pub struct AddOptions {
    pub text: String,
    pub priority: Option<String>,
    pub deadline: Option<String>,
    pub store: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub completed: bool,
    pub pending: bool,
    pub priority: Option<String>,
    pub store: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct DoneOptions {
    pub id: String,
    pub store: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct DeleteOptions {
    pub id: String,
    pub store: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EditOptions {
    pub id: String,
    pub text: Option<String>,
    pub priority: Option<String>,
    pub deadline: Option<String>,
    pub no_deadline: bool,
    pub store: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct StatsOptions {
    pub store: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

struct TaskContext {
    config: Config,
    store: TaskStore,
}

fn load_context(store_flag: Option<PathBuf>) -> Result<TaskContext> {
    let config = Config::load_default()?;
    let path = config.store_path(store_flag)?;
    let store = TaskStore::open(path);
    Ok(TaskContext { config, store })
}

fn parse_priority(value: &str) -> Result<Priority> {
    value
        .parse::<Priority>()
        .map_err(Error::InvalidArgument)
}

fn parse_deadline(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| Error::InvalidArgument(format!("invalid deadline (want YYYY-MM-DD): {value}")))
}

fn find_task(store: &TaskStore, prefix: &str) -> Result<Task> {
    // An empty prefix would match the first task via starts_with("").
    if prefix.trim().is_empty() {
        return Err(Error::InvalidArgument("id cannot be empty".to_string()));
    }
    store
        .find_by_prefix(prefix)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(prefix.to_string()))
}

fn describe(task: &Task) -> String {
    let mut line = format!(
        "{} | [{}] {} {}",
        task.short_id(),
        task.priority.tag(),
        if task.completed { '✓' } else { '○' },
        task.text
    );
    if let Some(deadline) = task.deadline {
        line.push_str(&format!(" (due {})", deadline.format("%Y-%m-%d")));
    }
    line
}

#[derive(serde::Serialize)]
struct TaskOutput<'a> {
    task: &'a Task,
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let mut ctx = load_context(options.store)?;

    let text = options.text.trim();
    if text.is_empty() {
        return Err(Error::InvalidArgument("text cannot be empty".to_string()));
    }

    let priority = match options.priority.as_deref() {
        Some(value) => parse_priority(value)?,
        None => ctx.config.default_priority,
    };
    let deadline = options
        .deadline
        .as_deref()
        .map(parse_deadline)
        .transpose()?;

    let task = ctx.store.add(text, priority, deadline)?.clone();

    let mut human = HumanOutput::new("Task added");
    human.push_summary("ID", task.short_id());
    human.push_summary("Text", &task.text);
    human.push_summary("Priority", task.priority.as_str());
    if let Some(deadline) = task.deadline {
        human.push_summary("Deadline", deadline.format("%Y-%m-%d").to_string());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "add",
        &TaskOutput { task: &task },
        Some(&human),
    )
}

#[derive(serde::Serialize)]
struct TaskListOutput {
    total: usize,
    tasks: Vec<Task>,
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = load_context(options.store)?;

    let priority = options.priority.as_deref().map(parse_priority).transpose()?;
    let filters = TaskFilters {
        // --completed implies showing only completed, handled below;
        // otherwise the config decides whether completed tasks appear.
        show_completed: ctx.config.show_completed || options.completed,
        priority,
    };

    let tasks: Vec<Task> = ctx
        .store
        .tasks()
        .iter()
        .filter(|task| filters.matches(task))
        .filter(|task| {
            if options.completed {
                task.completed
            } else if options.pending {
                !task.completed
            } else {
                true
            }
        })
        .cloned()
        .collect();

    let mut human = HumanOutput::new("Tasks");
    human.push_summary("Total", tasks.len().to_string());
    for task in &tasks {
        human.push_detail(describe(task));
    }
    if tasks.is_empty() {
        human.push_detail("No tasks found.".to_string());
    }

    let output = TaskListOutput {
        total: tasks.len(),
        tasks,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &output,
        Some(&human),
    )
}

#[derive(serde::Serialize)]
struct ToggleOutput<'a> {
    task: &'a Task,
    completed: bool,
}

pub fn run_done(options: DoneOptions) -> Result<()> {
    let mut ctx = load_context(options.store)?;

    let task = find_task(&ctx.store, &options.id)?;
    let completed = ctx
        .store
        .toggle_complete(&task.id)?
        .unwrap_or(task.completed);
    let task = find_task(&ctx.store, &task.id)?;

    let header = if completed {
        "Task completed"
    } else {
        "Task reopened"
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("ID", task.short_id());
    human.push_summary("Text", &task.text);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "done",
        &ToggleOutput {
            task: &task,
            completed,
        },
        Some(&human),
    )
}

#[derive(serde::Serialize)]
struct DeleteOutput {
    id: String,
    text: String,
}

pub fn run_delete(options: DeleteOptions) -> Result<()> {
    let mut ctx = load_context(options.store)?;

    let task = find_task(&ctx.store, &options.id)?;
    ctx.store.delete(&task.id)?;

    let mut human = HumanOutput::new("Task deleted");
    human.push_summary("ID", task.short_id());
    human.push_summary("Text", &task.text);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "delete",
        &DeleteOutput {
            id: task.id,
            text: task.text,
        },
        Some(&human),
    )
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let mut ctx = load_context(options.store)?;

    if options.text.is_none()
        && options.priority.is_none()
        && options.deadline.is_none()
        && !options.no_deadline
    {
        return Err(Error::InvalidArgument(
            "nothing to edit: pass --text, --priority, --deadline, or --no-deadline".to_string(),
        ));
    }

    let mut task = find_task(&ctx.store, &options.id)?;

    if let Some(text) = options.text {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::InvalidArgument("text cannot be empty".to_string()));
        }
        task.text = text.to_string();
    }
    if let Some(priority) = options.priority.as_deref() {
        task.priority = parse_priority(priority)?;
    }
    if let Some(deadline) = options.deadline.as_deref() {
        task.deadline = Some(parse_deadline(deadline)?);
    }
    if options.no_deadline {
        task.deadline = None;
    }

    ctx.store.update(task.clone())?;

    let mut human = HumanOutput::new("Task updated");
    human.push_summary("ID", task.short_id());
    human.push_detail(describe(&task));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "edit",
        &TaskOutput { task: &task },
        Some(&human),
    )
}

pub fn run_stats(options: StatsOptions) -> Result<()> {
    let ctx = load_context(options.store)?;
    let stats: TaskStats = ctx.store.stats();

    let mut human = HumanOutput::new("Tasks");
    human.push_summary("Total", stats.total.to_string());
    human.push_summary("Pending", stats.pending.to_string());
    human.push_summary("Completed", stats.completed.to_string());
    human.push_summary("Overdue", stats.overdue.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "stats",
        &stats,
        Some(&human),
    )
}
