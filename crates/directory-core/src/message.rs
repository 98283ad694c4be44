//! Message — a recorded intent to contact a supplier.
//!
//! Nothing is ever sent. `method` is descriptive metadata only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::supplier::SupplierId;

/// Store-assigned message identifier.
pub type MessageId = i64;

/// Contact method recorded when the payload omits one.
pub const DEFAULT_METHOD: &str = "email";

/// A persisted message. Owned by exactly one supplier and deleted with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
  pub id:          MessageId,
  pub supplier_id: SupplierId,
  pub method:      String,
  pub message:     String,
  pub created_at:  DateTime<Utc>,
}

/// A message ready to be inserted for an existing supplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
  pub supplier_id: SupplierId,
  pub method:      String,
  pub message:     String,
}

/// Body of `POST /suppliers/{id}/contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
  pub method:  Option<String>,
  pub message: Option<String>,
}

impl ContactInput {
  /// Attach the payload to `supplier_id`, defaulting `method` to
  /// [`DEFAULT_METHOD`] and the body to an empty string.
  pub fn for_supplier(self, supplier_id: SupplierId) -> NewMessage {
    NewMessage {
      supplier_id,
      method: self.method.unwrap_or_else(|| DEFAULT_METHOD.to_owned()),
      message: self.message.unwrap_or_default(),
    }
  }
}

/// Response to a successful contact request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReceipt {
  pub success: bool,
  pub msg:     String,
  pub message: Message,
}

impl ContactReceipt {
  pub fn saved(message: Message) -> Self {
    Self { success: true, msg: "Message saved".to_owned(), message }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_payload_defaults_to_email() {
    let new = ContactInput::default().for_supplier(7);
    assert_eq!(new.supplier_id, 7);
    assert_eq!(new.method, "email");
    assert_eq!(new.message, "");
  }

  #[test]
  fn explicit_method_is_kept_verbatim() {
    let new = ContactInput {
      method:  Some("whatsapp".into()),
      message: Some("hi".into()),
    }
    .for_supplier(1);
    assert_eq!(new.method, "whatsapp");
    assert_eq!(new.message, "hi");
  }
}
