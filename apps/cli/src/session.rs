//! Line-driven browse session over one `TableController`.

use std::{
    io::{self, Write as _},
    str::FromStr,
};

use anyhow::Result;
use client_core::{ArtworkSource, PageOutcome, TableController};
use shared::domain::ArtworkId;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

const HELP: &str = "\
commands:
  next | prev | page <n>       navigate
  toggle <id>                  flip a row on this page
  select <id> | unselect <id>  set a row on this page
  all | none                   select or unselect every row on this page
  deselect <id>                drop an id from the selection, any page
  clear                        drop the whole selection
  selected                     list selected ids
  show                         redraw the table
  help | quit
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Next,
    Prev,
    Page(u32),
    Toggle(ArtworkId),
    Select(ArtworkId),
    Unselect(ArtworkId),
    SelectPage,
    UnselectPage,
    Deselect(ArtworkId),
    Clear,
    Selected,
    Show,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(format!("too many arguments for '{verb}'"));
        }

        let command = match (verb.as_str(), arg) {
            ("next" | "n", None) => Self::Next,
            ("prev" | "p", None) => Self::Prev,
            ("page", Some(raw)) => Self::Page(parse_page(raw)?),
            ("toggle" | "t", Some(raw)) => Self::Toggle(parse_id(raw)?),
            ("select", Some(raw)) => Self::Select(parse_id(raw)?),
            ("unselect", Some(raw)) => Self::Unselect(parse_id(raw)?),
            ("all", None) => Self::SelectPage,
            ("none", None) => Self::UnselectPage,
            ("deselect" | "rm", Some(raw)) => Self::Deselect(parse_id(raw)?),
            ("clear", None) => Self::Clear,
            ("selected" | "ls", None) => Self::Selected,
            ("show", None) => Self::Show,
            ("help" | "?", None) => Self::Help,
            ("quit" | "exit" | "q", None) => Self::Quit,
            ("", _) => return Err("empty command".to_string()),
            (
                "page" | "toggle" | "t" | "select" | "unselect" | "deselect" | "rm",
                None,
            ) => return Err(format!("'{verb}' needs an argument")),
            (_, Some(_)) if is_known_verb(&verb) => {
                return Err(format!("'{verb}' takes no argument"))
            }
            _ => return Err(format!("unknown command '{verb}'; try 'help'")),
        };
        Ok(command)
    }
}

fn is_known_verb(verb: &str) -> bool {
    matches!(
        verb,
        "next" | "n" | "prev" | "p" | "all" | "none" | "clear" | "selected" | "ls" | "show"
            | "help" | "?" | "quit" | "exit" | "q"
    )
}

fn parse_page(raw: &str) -> Result<u32, String> {
    match raw.parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(format!("'{raw}' is not a page number")),
    }
}

fn parse_id(raw: &str) -> Result<ArtworkId, String> {
    let digits = raw.strip_prefix('#').unwrap_or(raw);
    match digits.parse::<i64>() {
        Ok(id) if id > 0 => Ok(ArtworkId(id)),
        _ => Err(format!("'{raw}' is not an artwork id")),
    }
}

pub async fn run(source: &dyn ArtworkSource, page_size: u32, first_page: u32) -> Result<()> {
    let mut controller = TableController::new(page_size);
    let outcome = controller.load_page(source, first_page).await;
    print!("{}{}", describe_outcome(&controller, outcome), render_view(&controller));
    println!("type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            prompt()?;
            continue;
        }
        match line.parse::<SessionCommand>() {
            Ok(SessionCommand::Quit) => break,
            Ok(command) => {
                tracing::debug!(?command, "session command");
                print!("{}", apply(&mut controller, source, command).await);
            }
            Err(err) => println!("{err}"),
        }
        prompt()?;
    }
    Ok(())
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

/// Runs one command and returns what the session should print.
pub async fn apply(
    controller: &mut TableController,
    source: &dyn ArtworkSource,
    command: SessionCommand,
) -> String {
    let page_count = controller.paginator().page_count();
    match command {
        SessionCommand::Next => {
            if controller.current_page() >= page_count {
                return "already on the last page\n".to_string();
            }
            let page = controller.current_page() + 1;
            navigate(controller, source, page).await
        }
        SessionCommand::Prev => {
            if controller.current_page() <= 1 {
                return "already on the first page\n".to_string();
            }
            let page = controller.current_page() - 1;
            navigate(controller, source, page).await
        }
        SessionCommand::Page(page) => {
            if controller.total_records() > 0 && page > page_count {
                return format!("page {page} is past the last page ({page_count})\n");
            }
            navigate(controller, source, page).await
        }
        SessionCommand::Toggle(id) => {
            let checked = !controller.is_row_selected(id);
            set_row(controller, id, checked)
        }
        SessionCommand::Select(id) => set_row(controller, id, true),
        SessionCommand::Unselect(id) => set_row(controller, id, false),
        SessionCommand::SelectPage => {
            controller.toggle_page(true);
            render_view(controller)
        }
        SessionCommand::UnselectPage => {
            controller.toggle_page(false);
            render_view(controller)
        }
        SessionCommand::Deselect(id) => {
            if !controller.is_row_selected(id) {
                return format!("#{id} is not selected\n");
            }
            controller.deselect(id);
            selection_summary(controller)
        }
        SessionCommand::Clear => {
            controller.clear_all();
            selection_summary(controller)
        }
        SessionCommand::Selected => selection_summary(controller),
        SessionCommand::Show => render_view(controller),
        SessionCommand::Help => HELP.to_string(),
        SessionCommand::Quit => String::new(),
    }
}

async fn navigate(
    controller: &mut TableController,
    source: &dyn ArtworkSource,
    page: u32,
) -> String {
    let outcome = controller.load_page(source, page).await;
    format!("{}{}", describe_outcome(controller, outcome), render_view(controller))
}

fn set_row(controller: &mut TableController, id: ArtworkId, checked: bool) -> String {
    if !controller.rows().iter().any(|row| row.id == id) {
        return format!(
            "#{id} is not on this page; use 'deselect' to drop it from the selection\n"
        );
    }
    controller.toggle_row(id, checked);
    render_view(controller)
}

fn describe_outcome(controller: &TableController, outcome: PageOutcome) -> String {
    match outcome {
        PageOutcome::Failed(err) => {
            format!("failed to load page {}: {err}\n", controller.current_page())
        }
        PageOutcome::Applied | PageOutcome::Stale => String::new(),
    }
}

pub fn render_view(controller: &TableController) -> String {
    let mut out = render::page_table(controller.rows(), |id| {
        Some(controller.is_row_selected(id))
    });
    let paginator = controller.paginator();
    let shown = controller.rows().len() as u64;
    let first = if shown == 0 { 0 } else { paginator.first_index + 1 };
    out.push_str(&format!(
        "{} all on page | page {} of {} | showing {}-{} of {}\n",
        render::checkbox(controller.all_on_page_selected()),
        controller.current_page(),
        paginator.page_count(),
        first,
        paginator.first_index + shown,
        paginator.total_records,
    ));
    out.push_str(&selection_summary(controller));
    out
}

fn selection_summary(controller: &TableController) -> String {
    let ids = controller.selected_ids();
    if ids.is_empty() {
        return "selected: 0 (no selections yet)\n".to_string();
    }
    let listed: Vec<String> = ids.iter().map(|id| format!("#{id}")).collect();
    format!("selected: {} {}\n", ids.len(), listed.join(" "))
}
