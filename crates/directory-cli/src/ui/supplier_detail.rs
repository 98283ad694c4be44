//! Supplier detail pane — right panel.

use directory_core::supplier::Supplier;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, Mode};

// ─── Link helpers ─────────────────────────────────────────────────────────────

/// `mailto:` link for an email address.
pub fn mailto_link(email: &str) -> String { format!("mailto:{}", email.trim()) }

/// `wa.me` link for a phone number; everything but digits is dropped.
pub fn whatsapp_link(number: &str) -> Option<String> {
  let digits: String = number.chars().filter(char::is_ascii_digit).collect();
  (!digits.is_empty()).then(|| format!("https://wa.me/{digits}"))
}

// ─── Public entry ─────────────────────────────────────────────────────────────

/// Render the detail pane into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(supplier) = app.selected() else {
    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("Select a supplier.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  let prompt_height = match app.mode {
    Mode::Contact | Mode::ConfirmDelete => 4,
    _ => 0,
  };
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(12),
      Constraint::Min(0),
      Constraint::Length(prompt_height),
    ])
    .split(area);

  draw_fields(f, rows[0], supplier);
  draw_messages(f, rows[1], app);
  match app.mode {
    Mode::Contact => draw_contact_prompt(f, rows[2], app),
    Mode::ConfirmDelete => draw_delete_prompt(f, rows[2], supplier),
    _ => {}
  }
}

// ─── Fields ───────────────────────────────────────────────────────────────────

fn field<'a>(label: &'a str, value: String, extra: Option<String>) -> Line<'a> {
  let mut spans = vec![
    Span::styled(
      format!("{label:<10}"),
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    Span::raw(value),
  ];
  if let Some(extra) = extra {
    spans.push(Span::styled(
      format!("  {extra}"),
      Style::default().fg(Color::DarkGray),
    ));
  }
  Line::from(spans)
}

fn draw_fields(f: &mut Frame, area: Rect, s: &Supplier) {
  let block = Block::default()
    .title(format!(" {} ", s.name))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".into());

  let lines = vec![
    field("Category", opt(&s.category), None),
    field("Rating", format!("{:.1}", s.rating), None),
    field("Location", opt(&s.location), None),
    field("Email", opt(&s.email), s.email.as_deref().map(mailto_link)),
    field("Phone", opt(&s.phone), None),
    field(
      "WhatsApp",
      opt(&s.whatsapp),
      s.whatsapp.as_deref().and_then(whatsapp_link),
    ),
    field("Products", s.products.clone(), None),
    field("Notes", s.notes.clone(), None),
    field(
      "Added",
      s.created_at.format("%Y-%m-%d %H:%M").to_string(),
      None,
    ),
  ];

  f.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
    area,
  );
}

// ─── Messages ─────────────────────────────────────────────────────────────────

fn draw_messages(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(format!(" Messages ({}) ", app.messages.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if app.messages.is_empty() {
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("No messages recorded.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let lines: Vec<Line> = app
    .messages
    .iter()
    .map(|m| {
      Line::from(vec![
        Span::styled(
          m.created_at.format("%Y-%m-%d %H:%M  ").to_string(),
          Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("{:<9}", m.method), Style::default().fg(Color::Yellow)),
        Span::raw(m.message.clone()),
      ])
    })
    .collect();

  f.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
    area,
  );
}

// ─── Prompts ──────────────────────────────────────────────────────────────────

fn draw_contact_prompt(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(format!(" Contact via {} ", app.draft.method()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Yellow));

  f.render_widget(
    Paragraph::new(format!("{}_", app.draft.message))
      .block(block)
      .wrap(Wrap { trim: false }),
    area,
  );
}

fn draw_delete_prompt(f: &mut Frame, area: Rect, s: &Supplier) {
  let block = Block::default()
    .title(" Delete ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));

  f.render_widget(
    Paragraph::new(format!("Delete {} and all its messages? (y/N)", s.name)).block(block),
    area,
  );
}
