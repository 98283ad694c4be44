//! Supplier list pane — left panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::app::App;

/// Render the supplier list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(format!(" Suppliers ({}) ", app.suppliers.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if app.suppliers.is_empty() {
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      ratatui::widgets::Paragraph::new("No suppliers found.")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = app
    .suppliers
    .iter()
    .map(|s| {
      ListItem::new(Line::from(vec![
        Span::styled(format!("{:>4.1} ", s.rating), Style::default().fg(Color::Yellow)),
        Span::raw(s.name.clone()),
        Span::styled(
          s.category
            .as_deref()
            .map(|c| format!("  {c}"))
            .unwrap_or_default(),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.cursor));

  f.render_stateful_widget(
    List::new(items).block(block).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    area,
    &mut state,
  );
}
