//! Add/edit supplier form — replaces the detail pane while open.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, FORM_FIELDS};

/// Render the form into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let title = match app.form.editing {
    Some(id) => format!(" Edit supplier #{id} "),
    None => " New supplier ".to_string(),
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Yellow));

  let lines: Vec<Line> = FORM_FIELDS
    .iter()
    .zip(app.form.values.iter())
    .enumerate()
    .map(|(i, (label, value))| {
      let focused = i == app.form.field;
      let label_style = if focused {
        Style::default()
          .fg(Color::Yellow)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Cyan)
      };
      let cursor = if focused { "_" } else { "" };
      Line::from(vec![
        Span::styled(format!("{label:<10}"), label_style),
        Span::raw(format!("{value}{cursor}")),
      ])
    })
    .collect();

  f.render_widget(Paragraph::new(lines).block(block), area);
}
