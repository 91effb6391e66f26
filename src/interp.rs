//! The embedded command interpreter.
//!
//! One line of text in, one human-readable result out. Failures are part
//! of the result string (`✗ ...`), never an `Err`: the surrounding
//! surfaces (command bar, `ht exec`, `ht shell`) print whatever comes
//! back and move on.
//!
//! Grammar, selected by the first whitespace-delimited token
//! (case-insensitive):
//!
//! ```text
//! add "task description" [high|medium|low] [YYYY-MM-DD]
//! delete <task_id>
//! complete <task_id>
//! list [completed|pending]
//! clear
//! help
//! ```
//!
//! Task ids are matched by prefix; on a prefix collision the first match
//! in collection order wins.

use chrono::NaiveDate;

use crate::store::TaskStore;
use crate::task::Priority;

const HELP_TEXT: &str = r#"Available commands:
> add "task description" [high|medium|low] [YYYY-MM-DD]
> delete <task_id>
> complete <task_id>
> list [completed|pending]
> clear
> help"#;

const ADD_SYNTAX_ERROR: &str =
    "✗ Invalid syntax. Use: add \"task description\" [priority] [YYYY-MM-DD]";

/// Execute one command line against the store.
pub fn execute(line: &str, store: &mut TaskStore) -> String {
    let trimmed = line.trim();
    let cmd = match trimmed.split_whitespace().next() {
        Some(token) => token.to_ascii_lowercase(),
        None => return String::new(),
    };

    match cmd.as_str() {
        "help" => HELP_TEXT.to_string(),
        "add" => run_add(trimmed, store),
        "delete" => run_delete(trimmed, store),
        "complete" => run_complete(trimmed, store),
        "list" => run_list(trimmed, store),
        // No collection-level effect; the caller clears its displayed
        // history when it sees an empty result.
        "clear" => String::new(),
        _ => format!("✗ Unknown command: {cmd}. Type \"help\" for available commands."),
    }
}

/// Parsed form of an `add` line.
#[derive(Debug, PartialEq)]
struct AddArgs {
    text: String,
    priority: Priority,
    deadline: Option<NaiveDate>,
}

/// Parse everything after the `add` keyword.
///
/// The description must sit in double quotes. After it, at most two
/// tokens: an optional priority and an optional date, in that order.
/// Anything that doesn't fit is a syntax error, not a panic.
fn parse_add(line: &str) -> Option<AddArgs> {
    // The caller already matched the `add` keyword case-insensitively;
    // strip it length-wise so `ADD` works too.
    if line.len() < 3 || !line[..3].eq_ignore_ascii_case("add") {
        return None;
    }
    let rest = &line[3..];

    let open = rest.find('"')?;
    let after_open = &rest[open + 1..];
    let close = after_open.find('"')?;

    let text = after_open[..close].trim();
    if text.is_empty() {
        return None;
    }
    // Only whitespace may separate `add` from the opening quote.
    if !rest[..open].trim().is_empty() {
        return None;
    }

    let mut priority = Priority::Medium;
    let mut deadline = None;
    let mut saw_priority = false;

    for token in after_open[close + 1..].split_whitespace() {
        if !saw_priority && deadline.is_none() {
            if let Ok(parsed) = token.parse::<Priority>() {
                priority = parsed;
                saw_priority = true;
                continue;
            }
        }
        if deadline.is_none() {
            if let Ok(date) = NaiveDate::parse_from_str(token, "%Y-%m-%d") {
                deadline = Some(date);
                continue;
            }
        }
        return None;
    }

    Some(AddArgs {
        text: text.to_string(),
        priority,
        deadline,
    })
}

fn run_add(line: &str, store: &mut TaskStore) -> String {
    let args = match parse_add(line) {
        Some(args) => args,
        None => return ADD_SYNTAX_ERROR.to_string(),
    };

    match store.add(args.text.clone(), args.priority, args.deadline) {
        Ok(task) => {
            let due = task
                .deadline
                .map(|d| format!(" due {}", d.format("%Y-%m-%d")))
                .unwrap_or_default();
            format!(
                "✓ Task added: \"{}\" [{}]{}",
                task.text,
                task.priority.tag(),
                due
            )
        }
        Err(err) => format!("✗ Failed to save tasks: {err}"),
    }
}

fn run_delete(line: &str, store: &mut TaskStore) -> String {
    let prefix = match line.split_whitespace().nth(1) {
        Some(prefix) => prefix,
        None => return "✗ Usage: delete <task_id>".to_string(),
    };

    let (id, text) = match store.find_by_prefix(prefix) {
        Some(task) => (task.id.clone(), task.text.clone()),
        None => return format!("✗ Task not found: {prefix}"),
    };

    match store.delete(&id) {
        Ok(()) => format!("✓ Task deleted: \"{text}\""),
        Err(err) => format!("✗ Failed to save tasks: {err}"),
    }
}

fn run_complete(line: &str, store: &mut TaskStore) -> String {
    let prefix = match line.split_whitespace().nth(1) {
        Some(prefix) => prefix,
        None => return "✗ Usage: complete <task_id>".to_string(),
    };

    let (id, text) = match store.find_by_prefix(prefix) {
        Some(task) => (task.id.clone(), task.text.clone()),
        None => return format!("✗ Task not found: {prefix}"),
    };

    match store.toggle_complete(&id) {
        Ok(Some(true)) => format!("✓ Task completed: \"{text}\""),
        Ok(Some(false)) => format!("✓ Task uncompleted: \"{text}\""),
        // The lookup above found the task, so this arm is unreachable in
        // practice; keep the not-found message for symmetry.
        Ok(None) => format!("✗ Task not found: {prefix}"),
        Err(err) => format!("✗ Failed to save tasks: {err}"),
    }
}

fn run_list(line: &str, store: &TaskStore) -> String {
    let filter = line.split_whitespace().nth(1);

    let lines: Vec<String> = store
        .tasks()
        .iter()
        .filter(|task| match filter {
            Some("completed") => task.completed,
            Some("pending") => !task.completed,
            _ => true,
        })
        .map(|task| {
            format!(
                "{} | [{}] {} {}",
                task.short_id(),
                task.priority.tag(),
                if task.completed { '✓' } else { '○' },
                task.text
            )
        })
        .collect();

    if lines.is_empty() {
        "No tasks found.".to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskStore;
    use tempfile::TempDir;

    fn empty_store() -> (TempDir, TaskStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::open(dir.path().join("tasks.json"));
        (dir, store)
    }

    #[test]
    fn add_with_all_fields_prepends_one_task() {
        let (_dir, mut store) = empty_store();

        let result = execute("add \"write report\" high 2030-01-15", &mut store);
        assert_eq!(
            result,
            "✓ Task added: \"write report\" [HIGH] due 2030-01-15"
        );

        assert_eq!(store.len(), 1);
        let task = &store.tasks()[0];
        assert_eq!(task.text, "write report");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(
            task.deadline,
            Some(NaiveDate::from_ymd_opt(2030, 1, 15).unwrap())
        );
        assert!(!task.completed);
    }

    #[test]
    fn add_defaults_to_medium_without_priority_or_date() {
        let (_dir, mut store) = empty_store();

        let result = execute("add \"just text\"", &mut store);
        assert_eq!(result, "✓ Task added: \"just text\" [MEDIUM]");
        assert_eq!(store.tasks()[0].priority, Priority::Medium);
        assert_eq!(store.tasks()[0].deadline, None);
    }

    #[test]
    fn add_accepts_date_without_priority() {
        let (_dir, mut store) = empty_store();

        let result = execute("add \"dated\" 2030-06-01", &mut store);
        assert_eq!(result, "✓ Task added: \"dated\" [MEDIUM] due 2030-06-01");
        assert_eq!(store.tasks()[0].priority, Priority::Medium);
        assert!(store.tasks()[0].deadline.is_some());
    }

    #[test]
    fn add_newest_first() {
        let (_dir, mut store) = empty_store();
        execute("add \"one\"", &mut store);
        execute("add \"two\"", &mut store);

        assert_eq!(store.tasks()[0].text, "two");
        assert_eq!(store.tasks()[1].text, "one");
    }

    #[test]
    fn add_without_quotes_is_a_syntax_error() {
        let (_dir, mut store) = empty_store();

        assert_eq!(execute("add no quotes here", &mut store), ADD_SYNTAX_ERROR);
        assert_eq!(execute("add \"unclosed", &mut store), ADD_SYNTAX_ERROR);
        assert_eq!(execute("add", &mut store), ADD_SYNTAX_ERROR);
        assert_eq!(execute("add \"\"", &mut store), ADD_SYNTAX_ERROR);
        assert!(store.is_empty());
    }

    #[test]
    fn add_rejects_unknown_priority_and_bad_date() {
        let (_dir, mut store) = empty_store();

        assert_eq!(execute("add \"x\" urgent", &mut store), ADD_SYNTAX_ERROR);
        assert_eq!(
            execute("add \"x\" high 2030-13-99", &mut store),
            ADD_SYNTAX_ERROR
        );
        assert_eq!(
            execute("add \"x\" high 2030-01-01 extra", &mut store),
            ADD_SYNTAX_ERROR
        );
        assert!(store.is_empty());
    }

    #[test]
    fn commands_are_case_insensitive() {
        let (_dir, mut store) = empty_store();

        let result = execute("ADD \"shouty\" LOW", &mut store);
        assert_eq!(result, "✓ Task added: \"shouty\" [LOW]");
        assert!(execute("LIST", &mut store).contains("shouty"));
    }

    #[test]
    fn delete_by_prefix_removes_the_task() {
        let (_dir, mut store) = empty_store();
        execute("add \"victim\"", &mut store);
        let prefix = store.tasks()[0].short_id().to_string();

        let result = execute(&format!("delete {prefix}"), &mut store);
        assert_eq!(result, "✓ Task deleted: \"victim\"");
        assert!(store.is_empty());
    }

    #[test]
    fn delete_reports_missing_argument_and_unknown_prefix() {
        let (_dir, mut store) = empty_store();
        execute("add \"stays\"", &mut store);

        assert_eq!(execute("delete", &mut store), "✗ Usage: delete <task_id>");
        assert_eq!(
            execute("delete zz999", &mut store),
            "✗ Task not found: zz999"
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn complete_toggles_and_reports_new_state() {
        let (_dir, mut store) = empty_store();
        execute("add \"flip\"", &mut store);
        let prefix = store.tasks()[0].short_id().to_string();

        assert_eq!(
            execute(&format!("complete {prefix}"), &mut store),
            "✓ Task completed: \"flip\""
        );
        assert!(store.tasks()[0].completed);

        assert_eq!(
            execute(&format!("complete {prefix}"), &mut store),
            "✓ Task uncompleted: \"flip\""
        );
        assert!(!store.tasks()[0].completed);
    }

    #[test]
    fn complete_reports_missing_argument_and_unknown_prefix() {
        let (_dir, mut store) = empty_store();

        assert_eq!(
            execute("complete", &mut store),
            "✗ Usage: complete <task_id>"
        );
        assert_eq!(
            execute("complete nope", &mut store),
            "✗ Task not found: nope"
        );
    }

    #[test]
    fn list_filters_by_completion_state() {
        let (_dir, mut store) = empty_store();
        execute("add \"open one\"", &mut store);
        execute("add \"done one\"", &mut store);
        let prefix = store.tasks()[0].short_id().to_string();
        execute(&format!("complete {prefix}"), &mut store);

        let all = execute("list", &mut store);
        assert!(all.contains("open one"));
        assert!(all.contains("done one"));

        let pending = execute("list pending", &mut store);
        assert!(pending.contains("open one"));
        assert!(!pending.contains("done one"));
        assert!(pending.contains('○'));

        let completed = execute("list completed", &mut store);
        assert!(completed.contains("done one"));
        assert!(!completed.contains("open one"));
        assert!(completed.contains('✓'));
    }

    #[test]
    fn list_line_format_shows_short_id_and_priority_tag() {
        let (_dir, mut store) = empty_store();
        execute("add \"fmt check\" high", &mut store);

        let listing = execute("list", &mut store);
        let task = &store.tasks()[0];
        assert_eq!(
            listing,
            format!("{} | [HIGH] ○ fmt check", task.short_id())
        );
        assert_eq!(task.short_id().len(), 8);
    }

    #[test]
    fn list_empty_says_no_tasks_found() {
        let (_dir, mut store) = empty_store();
        assert_eq!(execute("list", &mut store), "No tasks found.");
        assert_eq!(execute("list completed", &mut store), "No tasks found.");
    }

    #[test]
    fn clear_returns_empty_and_keeps_tasks() {
        let (_dir, mut store) = empty_store();
        execute("add \"survivor\"", &mut store);

        assert_eq!(execute("clear", &mut store), "");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unknown_command_names_the_command() {
        let (_dir, mut store) = empty_store();
        assert_eq!(
            execute("frobnicate now", &mut store),
            "✗ Unknown command: frobnicate. Type \"help\" for available commands."
        );
    }

    #[test]
    fn blank_input_yields_empty_result() {
        let (_dir, mut store) = empty_store();
        assert_eq!(execute("   ", &mut store), "");
    }

    #[test]
    fn help_lists_every_command() {
        let (_dir, mut store) = empty_store();
        let help = execute("help", &mut store);
        for cmd in ["add", "delete", "complete", "list", "clear", "help"] {
            assert!(help.contains(cmd), "help should mention {cmd}");
        }
    }
}
