//! `suppliers` — terminal client for the supplier directory.
//!
//! # Usage
//!
//! ```
//! suppliers --url http://localhost:5000
//! suppliers list --search apex --category Electronics
//! suppliers add --name "Apex Electronics" --category Electronics --rating 4.5
//! suppliers contact 1 --method whatsapp --message "Need a quote"
//! ```
//!
//! Without a subcommand the interactive browser starts.

mod app;
mod client;
mod ui;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use directory_core::{
  message::ContactInput,
  query::SupplierQuery,
  supplier::{SupplierId, SupplierInput},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::{Deserialize, Serialize};

const DEFAULT_URL: &str = "http://localhost:5000";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "suppliers", about = "Terminal client for the supplier directory")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the directory server (default: http://localhost:5000).
  #[arg(long, env = "DIRECTORY_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List suppliers, best rated first.
  List {
    /// Case-insensitive substring of name, products or location.
    #[arg(short, long)]
    search:   Option<String>,
    /// Exact category; "All" disables the filter.
    #[arg(short, long)]
    category: Option<String>,
  },
  /// Show one supplier.
  Show { id: SupplierId },
  /// Create a supplier.
  Add(SupplierArgs),
  /// Change a supplier. Fields not given keep their current value.
  Edit {
    id:     SupplierId,
    #[command(flatten)]
    fields: SupplierArgs,
  },
  /// Delete a supplier and its messages.
  Delete { id: SupplierId },
  /// Record a contact message for a supplier.
  Contact {
    id:      SupplierId,
    /// Channel label, e.g. email or whatsapp.
    #[arg(short, long)]
    method:  Option<String>,
    #[arg(short = 'M', long)]
    message: Option<String>,
  },
  /// List the messages recorded for a supplier, newest first.
  Messages { id: SupplierId },
}

/// Supplier fields accepted by `add` and `edit`.
#[derive(clap::Args, Debug)]
struct SupplierArgs {
  #[arg(long)]
  name:     Option<String>,
  #[arg(long)]
  category: Option<String>,
  #[arg(long)]
  email:    Option<String>,
  #[arg(long)]
  phone:    Option<String>,
  #[arg(long)]
  whatsapp: Option<String>,
  #[arg(long)]
  location: Option<String>,
  #[arg(long)]
  rating:   Option<f64>,
  #[arg(long)]
  products: Option<String>,
  #[arg(long)]
  notes:    Option<String>,
}

impl SupplierArgs {
  /// Overlay the given flags onto `base`.
  fn apply(self, base: SupplierInput) -> SupplierInput {
    SupplierInput {
      name:     self.name.or(base.name),
      category: self.category.or(base.category),
      email:    self.email.or(base.email),
      phone:    self.phone.or(base.phone),
      whatsapp: self.whatsapp.or(base.whatsapp),
      location: self.location.or(base.location),
      rating:   self.rating.or(base.rating),
      products: self.products.or(base.products),
      notes:    self.notes.or(base.notes),
    }
  }
}

impl From<SupplierArgs> for SupplierInput {
  fn from(a: SupplierArgs) -> Self {
    Self {
      name:     a.name,
      category: a.category,
      email:    a.email,
      phone:    a.phone,
      whatsapp: a.whatsapp,
      location: a.location,
      rating:   a.rating,
      products: a.products,
      notes:    a.notes,
    }
  }
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_string()),
  };

  let client = ApiClient::new(api_config)?;

  match args.command {
    Some(command) => run_command(&client, command).await,
    None => run_tui(client).await,
  }
}

// ─── One-shot commands ────────────────────────────────────────────────────────

fn print_json<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

async fn run_command(client: &ApiClient, command: Command) -> Result<()> {
  match command {
    Command::List { search, category } => {
      print_json(&client.list_suppliers(&SupplierQuery::new(search, category)).await?)
    }
    Command::Show { id } => print_json(&client.get_supplier(id).await?),
    Command::Add(fields) => print_json(&client.create_supplier(&fields.into()).await?),
    Command::Edit { id, fields } => {
      // The API replaces every field, so start from the stored record.
      let current = client.get_supplier(id).await?;
      let input = fields.apply(current.into());
      print_json(&client.update_supplier(id, &input).await?)
    }
    Command::Delete { id } => {
      client.delete_supplier(id).await?;
      println!("Deleted supplier {id}");
      Ok(())
    }
    Command::Contact { id, method, message } => {
      print_json(&client.contact(id, &ContactInput { method, message }).await?)
    }
    Command::Messages { id } => print_json(&client.list_messages(id).await?),
  }
}

// ─── Interactive browser ──────────────────────────────────────────────────────

async fn run_tui(client: ApiClient) -> Result<()> {
  let mut app = App::new(client);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Load initial data; the event loop only starts if the server answered.
  let load_result = app.refresh().await;

  let run_result = if load_result.is_ok() {
    run_event_loop(&mut terminal, &mut app).await
  } else {
    load_result
  };

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event {
      if !app.handle_key(key).await? {
        break;
      }
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn add_flags_become_supplier_input() {
    let args = Args::parse_from([
      "suppliers",
      "add",
      "--name",
      "Apex",
      "--rating",
      "4.5",
      "--category",
      "Electronics",
    ]);
    let Some(Command::Add(fields)) = args.command else {
      panic!("expected add");
    };
    let input: SupplierInput = fields.into();
    assert_eq!(input.name.as_deref(), Some("Apex"));
    assert_eq!(input.rating, Some(4.5));
    assert_eq!(input.category.as_deref(), Some("Electronics"));
    assert_eq!(input.email, None);
  }

  #[test]
  fn edit_flags_overlay_current_values() {
    let args = Args::parse_from(["suppliers", "edit", "3", "--notes", "Net 30"]);
    let Some(Command::Edit { id, fields }) = args.command else {
      panic!("expected edit");
    };
    assert_eq!(id, 3);
    let base = SupplierInput {
      name: Some("MetalWorks".into()),
      notes: Some("Bulk discounts".into()),
      rating: Some(4.0),
      ..Default::default()
    };
    let input = fields.apply(base);
    assert_eq!(input.name.as_deref(), Some("MetalWorks"));
    assert_eq!(input.notes.as_deref(), Some("Net 30"));
    assert_eq!(input.rating, Some(4.0));
  }

  #[test]
  fn contact_takes_method_and_message() {
    let args =
      Args::parse_from(["suppliers", "contact", "7", "-m", "whatsapp", "-M", "hello"]);
    let Some(Command::Contact { id, method, message }) = args.command else {
      panic!("expected contact");
    };
    assert_eq!(id, 7);
    assert_eq!(method.as_deref(), Some("whatsapp"));
    assert_eq!(message.as_deref(), Some("hello"));
  }

  #[test]
  fn no_subcommand_starts_browser() {
    assert!(Args::parse_from(["suppliers"]).command.is_none());
  }
}
