//! TUI rendering — orchestrates all panes.

pub mod supplier_detail;
pub mod supplier_form;
pub mod supplier_list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Mode};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(1), // filters
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0]);
  draw_filters(f, rows[1], app);
  draw_body(f, rows[2], app);
  draw_status(f, rows[3], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " Supplier Directory",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  let pad = area
    .width
    .saturating_sub(left.content.len() as u16)
    .saturating_sub(right.content.len() as u16);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Filters ──────────────────────────────────────────────────────────────────

fn draw_filters(f: &mut Frame, area: Rect, app: &App) {
  let search_style = if app.mode == Mode::Search {
    Style::default().fg(Color::Yellow)
  } else {
    Style::default()
  };
  let cursor = if app.mode == Mode::Search { "_" } else { "" };

  let line = Line::from(vec![
    Span::styled(" Search: ", Style::default().fg(Color::DarkGray)),
    Span::styled(format!("{}{cursor}", app.search), search_style),
    Span::styled("   Category: ", Style::default().fg(Color::DarkGray)),
    Span::styled(
      app.category_name(),
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
  ]);
  f.render_widget(Paragraph::new(line), area);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
    .split(area);

  supplier_list::draw(f, cols[0], app);
  if app.mode == Mode::Form {
    supplier_form::draw(f, cols[1], app);
  } else {
    supplier_detail::draw(f, cols[1], app);
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.mode {
    Mode::Normal => (
      "NORMAL",
      "↑↓/jk navigate  / search  Tab category  a add  e edit  m contact  d delete  r reload  q quit",
    ),
    Mode::Search => ("SEARCH", "Type to filter  Enter done  Esc clear"),
    Mode::ConfirmDelete => ("DELETE", "Press y to delete, any other key to cancel"),
    Mode::Contact => ("CONTACT", "Type a message  Tab method  Enter record  Esc cancel"),
    Mode::Form => ("FORM", "Tab/↑↓ field  Enter save  Esc cancel"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let line = Line::from(vec![
    Span::styled(
      format!(" {mode_label} "),
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    Span::styled(format!("  {status}"), Style::default().fg(Color::Gray)),
  ]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
