//! Application state machine and event dispatcher.
//!
//! The app keeps no derived state of its own: after every mutation it
//! re-fetches the list with the current search and category. A failed call
//! leaves the previous list in place and reports in the status bar.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use directory_core::{
  message::{ContactInput, Message},
  query::{ALL_CATEGORIES, SupplierQuery},
  supplier::{Supplier, SupplierId, SupplierInput},
};

use crate::client::ApiClient;

/// Categories offered by the selector. The first entry disables filtering.
pub const CATEGORIES: [&str; 7] = [
  ALL_CATEGORIES,
  "Electronics",
  "Textiles",
  "Metals",
  "Food & Beverage",
  "Packaging",
  "Other",
];

/// Contact methods offered in the contact prompt.
pub const METHODS: [&str; 2] = ["email", "whatsapp"];

// ─── Mode ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// Browsing the list.
  Normal,
  /// Typing into the search box; the list refreshes on every keystroke.
  Search,
  /// Waiting for `y` to delete the supplier under the cursor.
  ConfirmDelete,
  /// Composing a contact message for the supplier under the cursor.
  Contact,
  /// Filling in the add/edit supplier form.
  Form,
}

/// The contact message being composed.
#[derive(Debug, Default, Clone)]
pub struct ContactDraft {
  /// Index into [`METHODS`].
  pub method:  usize,
  pub message: String,
}

impl ContactDraft {
  pub fn method(&self) -> &'static str { METHODS[self.method % METHODS.len()] }
}

// ─── Supplier form ────────────────────────────────────────────────────────────

/// Labels of the form fields, in display and `Tab` order.
pub const FORM_FIELDS: [&str; 9] = [
  "Name", "Category", "Email", "Phone", "WhatsApp", "Location", "Rating", "Products",
  "Notes",
];

const RATING_FIELD: usize = 6;

/// The add/edit form. Every field is edited as text; empty fields are sent
/// as absent so the server applies its defaults.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SupplierForm {
  /// `Some` when editing an existing supplier, `None` when adding.
  pub editing: Option<SupplierId>,
  /// Index into [`FORM_FIELDS`] of the focused field.
  pub field:   usize,
  pub values:  [String; 9],
}

impl SupplierForm {
  /// An empty form, with the category preset when one is selected.
  pub fn add(category: Option<&str>) -> Self {
    let mut form = Self::default();
    if let Some(category) = category {
      form.values[1] = category.to_owned();
    }
    form
  }

  /// A form pre-filled from an existing supplier.
  pub fn edit(supplier: &Supplier) -> Self {
    let input = SupplierInput::from(supplier.clone());
    Self {
      editing: Some(supplier.id),
      field:   0,
      values:  [
        input.name.unwrap_or_default(),
        input.category.unwrap_or_default(),
        input.email.unwrap_or_default(),
        input.phone.unwrap_or_default(),
        input.whatsapp.unwrap_or_default(),
        input.location.unwrap_or_default(),
        input.rating.map(|r| r.to_string()).unwrap_or_default(),
        input.products.unwrap_or_default(),
        input.notes.unwrap_or_default(),
      ],
    }
  }

  pub fn next_field(&mut self) { self.field = (self.field + 1) % FORM_FIELDS.len(); }

  pub fn prev_field(&mut self) {
    self.field = (self.field + FORM_FIELDS.len() - 1) % FORM_FIELDS.len();
  }

  pub fn focused_mut(&mut self) -> &mut String { &mut self.values[self.field] }

  /// Build the request payload. Fails only on a rating that is not a number.
  pub fn to_input(&self) -> Result<SupplierInput, String> {
    let text = |i: usize| {
      let v = self.values[i].trim();
      (!v.is_empty()).then(|| v.to_owned())
    };
    let rating = match text(RATING_FIELD) {
      Some(r) => Some(
        r.parse::<f64>()
          .map_err(|_| format!("Rating must be a number, got {r:?}"))?,
      ),
      None => None,
    };
    Ok(SupplierInput {
      name: text(0),
      category: text(1),
      email: text(2),
      phone: text(3),
      whatsapp: text(4),
      location: text(5),
      rating,
      products: text(7),
      notes: text(8),
    })
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub mode: Mode,

  /// Suppliers as last returned by the API for the current filters.
  pub suppliers: Vec<Supplier>,

  /// Free-text search sent as `?search=`.
  pub search: String,

  /// Index into [`CATEGORIES`].
  pub category: usize,

  /// Cursor position within `suppliers`.
  pub cursor: usize,

  /// Recorded messages for the supplier under the cursor.
  pub messages: Vec<Message>,

  pub draft: ContactDraft,

  pub form: SupplierForm,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      mode: Mode::Normal,
      suppliers: Vec::new(),
      search: String::new(),
      category: 0,
      cursor: 0,
      messages: Vec::new(),
      draft: ContactDraft::default(),
      form: SupplierForm::default(),
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  pub fn category_name(&self) -> &'static str { CATEGORIES[self.category % CATEGORIES.len()] }

  /// The list query for the current search box and category selector.
  pub fn query(&self) -> SupplierQuery {
    let search = (!self.search.is_empty()).then(|| self.search.clone());
    let category = (self.category_name() != ALL_CATEGORIES)
      .then(|| self.category_name().to_owned());
    SupplierQuery::new(search, category)
  }

  pub fn selected(&self) -> Option<&Supplier> { self.suppliers.get(self.cursor) }

  fn cycle_category(&mut self, forward: bool) {
    let n = CATEGORIES.len();
    self.category = if forward {
      (self.category + 1) % n
    } else {
      (self.category + n - 1) % n
    };
  }

  /// Move the cursor onto `id` if it is in the current list.
  fn select_id(&mut self, id: SupplierId) {
    if let Some(pos) = self.suppliers.iter().position(|s| s.id == id) {
      self.cursor = pos;
    }
  }

  fn clamp_cursor(&mut self) {
    self.cursor = self.cursor.min(self.suppliers.len().saturating_sub(1));
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Re-fetch the list for the current filters.
  pub async fn refresh(&mut self) -> anyhow::Result<()> {
    match self.client.list_suppliers(&self.query()).await {
      Ok(suppliers) => {
        self.suppliers = suppliers;
        self.clamp_cursor();
        self.load_messages().await;
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  /// Refresh without propagating failure; the status bar already shows it.
  async fn refresh_quietly(&mut self) { let _ = self.refresh().await; }

  /// Load messages for the supplier under the cursor.
  async fn load_messages(&mut self) {
    let Some(id) = self.selected().map(|s| s.id) else {
      self.messages.clear();
      return;
    };
    match self.client.list_messages(id).await {
      Ok(messages) => self.messages = messages,
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    match self.mode {
      Mode::Normal => self.handle_normal_key(key).await,
      Mode::Search => {
        self.handle_search_key(key).await;
        Ok(true)
      }
      Mode::ConfirmDelete => {
        self.handle_confirm_key(key).await;
        Ok(true)
      }
      Mode::Contact => {
        self.handle_contact_key(key).await;
        Ok(true)
      }
      Mode::Form => {
        self.handle_form_key(key).await;
        Ok(true)
      }
    }
  }

  async fn handle_normal_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.suppliers.len() {
          self.cursor += 1;
          self.load_messages().await;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.cursor > 0 {
          self.cursor -= 1;
          self.load_messages().await;
        }
      }

      KeyCode::Char('/') => {
        self.mode = Mode::Search;
        self.status_msg.clear();
      }
      KeyCode::Tab | KeyCode::Char('c') => {
        self.cycle_category(true);
        self.cursor = 0;
        self.refresh_quietly().await;
      }
      KeyCode::BackTab | KeyCode::Char('C') => {
        self.cycle_category(false);
        self.cursor = 0;
        self.refresh_quietly().await;
      }
      KeyCode::Char('r') => {
        self.status_msg.clear();
        self.refresh_quietly().await;
      }

      KeyCode::Char('d') if self.selected().is_some() => {
        self.mode = Mode::ConfirmDelete;
      }
      KeyCode::Char('a') => {
        let category = (self.category_name() != ALL_CATEGORIES).then(|| self.category_name());
        self.form = SupplierForm::add(category);
        self.status_msg.clear();
        self.mode = Mode::Form;
      }
      KeyCode::Char('e') if self.selected().is_some() => {
        if let Some(supplier) = self.selected() {
          self.form = SupplierForm::edit(supplier);
        }
        self.status_msg.clear();
        self.mode = Mode::Form;
      }
      KeyCode::Char('m') if self.selected().is_some() => {
        self.draft = ContactDraft::default();
        self.mode = Mode::Contact;
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.mode = Mode::Normal;
        self.search.clear();
        self.cursor = 0;
        self.refresh_quietly().await;
      }
      KeyCode::Enter => self.mode = Mode::Normal,
      KeyCode::Backspace => {
        self.search.pop();
        self.cursor = 0;
        self.refresh_quietly().await;
      }
      KeyCode::Char(c) => {
        self.search.push(c);
        self.cursor = 0;
        self.refresh_quietly().await;
      }
      _ => {}
    }
  }

  async fn handle_confirm_key(&mut self, key: KeyEvent) {
    self.mode = Mode::Normal;
    let Some((id, name)) = self.selected().map(|s| (s.id, s.name.clone())) else {
      return;
    };
    if !matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
      self.status_msg = "Delete cancelled".into();
      return;
    }
    match self.client.delete_supplier(id).await {
      Ok(()) => {
        self.status_msg = format!("Deleted {name}");
        self.refresh_quietly().await;
      }
      Err(e) => self.status_msg = format!("Failed to delete supplier: {e}"),
    }
  }

  async fn handle_contact_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.mode = Mode::Normal,
      KeyCode::Tab => self.draft.method = (self.draft.method + 1) % METHODS.len(),
      KeyCode::Backspace => {
        self.draft.message.pop();
      }
      KeyCode::Char(c) => self.draft.message.push(c),
      KeyCode::Enter => {
        self.mode = Mode::Normal;
        let Some(id) = self.selected().map(|s| s.id) else { return };
        let input = ContactInput {
          method:  Some(self.draft.method().to_owned()),
          message: Some(std::mem::take(&mut self.draft.message)),
        };
        match self.client.contact(id, &input).await {
          Ok(receipt) => {
            self.status_msg = format!("Message recorded via {}", receipt.message.method);
            self.refresh_quietly().await;
          }
          Err(e) => self.status_msg = format!("Failed to send message: {e}"),
        }
      }
      _ => {}
    }
  }

  async fn handle_form_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.mode = Mode::Normal;
        self.status_msg = "Cancelled".into();
      }
      KeyCode::Tab | KeyCode::Down => self.form.next_field(),
      KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
      KeyCode::Backspace => {
        self.form.focused_mut().pop();
      }
      KeyCode::Char(c) => self.form.focused_mut().push(c),
      KeyCode::Enter => self.submit_form().await,
      _ => {}
    }
  }

  /// Send the form. On success the list is re-fetched with the current
  /// filters; on failure the form stays open with its contents.
  pub async fn submit_form(&mut self) {
    let input = match self.form.to_input() {
      Ok(input) => input,
      Err(e) => {
        self.status_msg = e;
        return;
      }
    };

    let result = match self.form.editing {
      Some(id) => self.client.update_supplier(id, &input).await,
      None => self.client.create_supplier(&input).await,
    };

    match result {
      Ok(saved) => {
        self.mode = Mode::Normal;
        self.status_msg = match self.form.editing {
          Some(_) => format!("Saved {}", saved.name),
          None => format!("Added {}", saved.name),
        };
        self.refresh_quietly().await;
        self.select_id(saved.id);
        self.load_messages().await;
      }
      Err(e) => self.status_msg = format!("Failed to save supplier: {e}"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::client::ApiConfig;

  fn app() -> App {
    let client = ApiClient::new(ApiConfig { base_url: "http://127.0.0.1:9".into() }).unwrap();
    App::new(client)
  }

  #[test]
  fn initial_query_is_unfiltered() {
    assert_eq!(app().query(), SupplierQuery::default());
  }

  #[test]
  fn query_reflects_search_and_category() {
    let mut a = app();
    a.search = "tex".into();
    a.category = 2;
    assert_eq!(
      a.query(),
      SupplierQuery::new(Some("tex".into()), Some("Textiles".into()))
    );
  }

  #[test]
  fn category_cycles_both_ways() {
    let mut a = app();
    a.cycle_category(false);
    assert_eq!(a.category_name(), "Other");
    a.cycle_category(true);
    assert_eq!(a.category_name(), ALL_CATEGORIES);
    a.cycle_category(true);
    assert_eq!(a.category_name(), "Electronics");
  }

  #[test]
  fn draft_method_toggles() {
    let mut draft = ContactDraft::default();
    assert_eq!(draft.method(), "email");
    draft.method += 1;
    assert_eq!(draft.method(), "whatsapp");
  }

  fn kept() -> Supplier {
    Supplier {
      id:         1,
      name:       "Kept".into(),
      category:   None,
      email:      None,
      phone:      None,
      whatsapp:   None,
      location:   None,
      rating:     4.0,
      products:   String::new(),
      notes:      String::new(),
      created_at: chrono::Utc::now(),
    }
  }

  fn press(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  #[tokio::test]
  async fn failed_refresh_keeps_previous_list() {
    let mut a = app();
    a.suppliers = vec![kept()];

    assert!(a.refresh().await.is_err());
    assert_eq!(a.suppliers.len(), 1);
    assert!(a.status_msg.starts_with("Error:"));
  }

  #[test]
  fn edit_form_is_prefilled_and_round_trips() {
    let mut s = kept();
    s.id = 5;
    s.category = Some("Metals".into());
    s.rating = 4.5;

    let form = SupplierForm::edit(&s);
    assert_eq!(form.editing, Some(5));
    assert_eq!(form.values[0], "Kept");
    assert_eq!(form.values[RATING_FIELD], "4.5");

    let input = form.to_input().unwrap();
    assert_eq!(input.name.as_deref(), Some("Kept"));
    assert_eq!(input.category.as_deref(), Some("Metals"));
    assert_eq!(input.rating, Some(4.5));
    assert_eq!(input.email, None);
    assert_eq!(input.products, None);
  }

  #[test]
  fn add_form_presets_selected_category() {
    let mut a = app();
    a.category = 3;
    let category = (a.category_name() != ALL_CATEGORIES).then(|| a.category_name());
    let form = SupplierForm::add(category);
    assert_eq!(form.editing, None);
    assert_eq!(form.values[1], "Metals");
  }

  #[test]
  fn form_fields_cycle() {
    let mut form = SupplierForm::default();
    form.prev_field();
    assert_eq!(FORM_FIELDS[form.field], "Notes");
    form.next_field();
    form.next_field();
    assert_eq!(FORM_FIELDS[form.field], "Category");
  }

  #[tokio::test]
  async fn typing_in_form_fills_focused_field() {
    let mut a = app();
    a.handle_key(press(KeyCode::Char('a'))).await.unwrap();
    assert_eq!(a.mode, Mode::Form);

    for c in "Acme".chars() {
      a.handle_key(press(KeyCode::Char(c))).await.unwrap();
    }
    a.handle_key(press(KeyCode::Tab)).await.unwrap();
    a.handle_key(press(KeyCode::Char('x'))).await.unwrap();
    a.handle_key(press(KeyCode::Backspace)).await.unwrap();

    assert_eq!(a.form.values[0], "Acme");
    assert_eq!(a.form.values[1], "");
    assert_eq!(a.form.field, 1);
  }

  #[tokio::test]
  async fn bad_rating_keeps_form_open_without_request() {
    let mut a = app();
    a.mode = Mode::Form;
    a.form.values[0] = "Acme".into();
    a.form.values[RATING_FIELD] = "great".into();

    a.submit_form().await;
    assert_eq!(a.mode, Mode::Form);
    assert!(a.status_msg.starts_with("Rating must be a number"));
  }

  #[tokio::test]
  async fn failed_save_keeps_form_and_previous_list() {
    let mut a = app();
    a.suppliers = vec![kept()];
    a.handle_key(press(KeyCode::Char('e'))).await.unwrap();
    assert_eq!(a.mode, Mode::Form);
    assert_eq!(a.form.editing, Some(1));

    a.handle_key(press(KeyCode::Enter)).await.unwrap();
    assert_eq!(a.mode, Mode::Form);
    assert_eq!(a.form.values[0], "Kept");
    assert_eq!(a.suppliers.len(), 1);
    assert!(a.status_msg.starts_with("Failed to save supplier:"));
  }

  #[tokio::test]
  async fn escape_leaves_form() {
    let mut a = app();
    a.handle_key(press(KeyCode::Char('a'))).await.unwrap();
    a.handle_key(press(KeyCode::Esc)).await.unwrap();
    assert_eq!(a.mode, Mode::Normal);
  }
}
