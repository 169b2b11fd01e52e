//! The interactive shell: renders the tracker's visible list and maps
//! typed commands onto its handlers.
//!
//! Rows are addressed by their position in the last rendered list, so the
//! shell keeps a parallel vec of ids per render.

use std::io::{self, BufRead as _, Write as _};

use anyhow::Context as _;
use tracing::warn;
use walkin_core::{
  enquiry::{EnquiryDraft, EnquiryId},
  format,
  session::Tracker,
  store::{KeyValueStore as _, THEME_KEY},
};
use walkin_store_sqlite::SqliteStore;

type Lines = dyn Iterator<Item = io::Result<String>>;

pub async fn run(
  mut tracker: Tracker<SqliteStore>,
  store: SqliteStore,
) -> anyhow::Result<()> {
  println!("walkin — type 'help' for commands");

  let mut view: Vec<EnquiryId> = Vec::new();
  render_list(&tracker, &mut view);

  let mut lines = io::stdin().lock().lines();
  loop {
    print!("> ");
    io::stdout().flush().ok();

    let Some(line) = lines.next() else { break };
    let line = line.context("failed to read stdin")?;
    let line = line.trim();
    let (cmd, rest) = match line.split_once(' ') {
      Some((c, r)) => (c, r.trim()),
      None => (line, ""),
    };

    match cmd {
      "" => {}
      "help" => print_help(),
      "list" | "ls" => render_list(&tracker, &mut view),
      "search" => {
        tracker.set_search_term(rest);
        render_list(&tracker, &mut view);
      }
      "add" => {
        run_form(&mut tracker, &mut lines, None).await?;
        render_list(&tracker, &mut view);
      }
      "edit" => match resolve(&view, rest) {
        Some(id) => {
          run_form(&mut tracker, &mut lines, Some(id)).await?;
          render_list(&tracker, &mut view);
        }
        None => println!("usage: edit <n> (run 'list' first)"),
      },
      "done" => match resolve(&view, rest) {
        Some(id) => {
          tracker.complete(id).await;
          render_list(&tracker, &mut view);
        }
        None => println!("usage: done <n>"),
      },
      "undo" => match resolve(&view, rest) {
        Some(id) => {
          tracker.undo(id).await;
          render_list(&tracker, &mut view);
        }
        None => println!("usage: undo <n>"),
      },
      "rm" | "delete" => match resolve(&view, rest) {
        Some(id) => {
          tracker.request_delete(id);
          if confirm(&mut lines, "delete this enquiry? [y/N] ")? {
            tracker.confirm_delete().await;
            println!("deleted");
          } else {
            tracker.cancel_delete();
          }
          render_list(&tracker, &mut view);
        }
        None => println!("usage: rm <n>"),
      },
      "theme" => toggle_theme(&store).await,
      "quit" | "exit" | "q" => break,
      other => println!("unknown command: {other} (try 'help')"),
    }
  }

  Ok(())
}

// ─── Rendering ───────────────────────────────────────────────────────────────

fn render_list(tracker: &Tracker<SqliteStore>, view: &mut Vec<EnquiryId>) {
  view.clear();

  println!(
    "{} pending • {} completed",
    tracker.pending_count(),
    tracker.completed_count()
  );
  if !tracker.search_term().is_empty() {
    println!("filter: {:?}", tracker.search_term());
  }

  let visible = tracker.visible();
  if visible.is_empty() {
    println!("  no enquiries");
    return;
  }

  for (i, e) in visible.iter().enumerate() {
    view.push(e.id);
    let status = if e.completed { "x" } else { " " };
    println!(
      "{:>3}. [{status}] {:<20} {:<12} {:>9} {:>8}",
      i + 1,
      e.name,
      e.number,
      format::format_date(&e.date),
      format::format_time(&e.time),
    );
    if let Some(note) = &e.note {
      println!("         {note}");
    }
  }
}

fn print_help() {
  println!("commands:");
  println!("  list             show enquiries (pending first)");
  println!("  search [term]    filter by name or phone; no term clears");
  println!("  add              log a new enquiry");
  println!("  edit <n>         edit row n of the last list");
  println!("  done <n>         mark row n completed");
  println!("  undo <n>         put row n back to pending");
  println!("  rm <n>           delete row n (asks for confirmation)");
  println!("  theme            toggle the saved dark/light preference");
  println!("  quit             exit");
}

// ─── Form flow ───────────────────────────────────────────────────────────────

/// Drive the add/edit form. On validation failure the form stays open and
/// the operator may retry or cancel.
async fn run_form(
  tracker: &mut Tracker<SqliteStore>,
  lines: &mut Lines,
  editing: Option<EnquiryId>,
) -> anyhow::Result<()> {
  let mut draft = match editing {
    Some(id) => match tracker.open_edit_form(id) {
      Some(prefilled) => prefilled,
      None => {
        println!("no such enquiry");
        return Ok(());
      }
    },
    None => {
      tracker.open_add_form();
      EnquiryDraft::default()
    }
  };

  loop {
    draft.name = prompt_field(lines, "name", &draft.name)?;
    draft.number = prompt_field(lines, "phone", &draft.number)?;
    draft.date = prompt_field(lines, "date (YYYY-MM-DD)", &draft.date)?;
    draft.time = prompt_field(lines, "time (HH:MM)", &draft.time)?;
    let note = prompt_field(lines, "note", draft.note.as_deref().unwrap_or(""))?;
    draft.note = if note.is_empty() { None } else { Some(note) };

    match tracker.submit(draft.clone()).await {
      Ok(enquiry) => {
        println!("saved #{}", enquiry.id);
        return Ok(());
      }
      Err(e) => {
        println!("{e}");
        if confirm(lines, "try again? [y/N] ")? {
          continue;
        }
        tracker.cancel_form();
        return Ok(());
      }
    }
  }
}

/// Prompt for one field; an empty entry keeps the current value.
fn prompt_field(lines: &mut Lines, label: &str, current: &str) -> anyhow::Result<String> {
  if current.is_empty() {
    print!("{label}: ");
  } else {
    print!("{label} [{current}]: ");
  }
  io::stdout().flush().ok();

  let entered = match lines.next() {
    Some(line) => line.context("failed to read stdin")?,
    None => String::new(),
  };
  let entered = entered.trim();

  Ok(if entered.is_empty() {
    current.to_owned()
  } else {
    entered.to_owned()
  })
}

fn confirm(lines: &mut Lines, prompt: &str) -> anyhow::Result<bool> {
  print!("{prompt}");
  io::stdout().flush().ok();

  let Some(line) = lines.next() else {
    return Ok(false);
  };
  let line = line.context("failed to read stdin")?;
  Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

// ─── Indices & theme ─────────────────────────────────────────────────────────

/// Map a 1-based row number from the last render back to an enquiry id.
fn resolve(view: &[EnquiryId], arg: &str) -> Option<EnquiryId> {
  let n: usize = arg.parse().ok()?;
  view.get(n.checked_sub(1)?).copied()
}

/// Flip the `pg-theme` preference. Host-owned; the tracker core never
/// touches this key.
async fn toggle_theme(store: &SqliteStore) {
  let current = match store.get(THEME_KEY).await {
    Ok(value) => value,
    Err(e) => {
      warn!(error = %e, "failed to read theme preference");
      None
    }
  };

  // The original app defaults to dark, so an unset preference flips to light.
  let next = match current.as_deref() {
    Some("light") => "dark",
    _ => "light",
  };

  if let Err(e) = store.set(THEME_KEY, next).await {
    warn!(error = %e, "failed to save theme preference");
  }
  println!("theme: {next}");
}
