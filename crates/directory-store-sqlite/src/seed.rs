//! Sample suppliers inserted into a fresh directory.

use directory_core::supplier::NewSupplier;

/// Three sample suppliers, one per common category.
pub fn sample_suppliers() -> Vec<NewSupplier> {
  vec![
    NewSupplier {
      name:     "Apex Electronics".into(),
      category: Some("Electronics".into()),
      email:    Some("apex@example.com".into()),
      phone:    Some("+919900000001".into()),
      whatsapp: Some("919900000001".into()),
      location: Some("Mumbai, India".into()),
      rating:   4.5,
      products: "Resistors, Capacitors".into(),
      notes:    "Reliable supplier".into(),
    },
    NewSupplier {
      name:     "Textile House".into(),
      category: Some("Textiles".into()),
      email:    Some("textile@example.com".into()),
      phone:    Some("+919900000002".into()),
      whatsapp: Some("919900000002".into()),
      location: Some("Delhi, India".into()),
      rating:   4.2,
      products: "Cotton Fabric, Threads".into(),
      notes:    "Fast delivery".into(),
    },
    NewSupplier {
      name:     "MetalWorks".into(),
      category: Some("Metals".into()),
      email:    Some("metal@example.com".into()),
      phone:    Some("+919900000003".into()),
      whatsapp: Some("919900000003".into()),
      location: Some("Pune, India".into()),
      rating:   4.0,
      products: "Steel Sheets, Rods".into(),
      notes:    "Bulk discounts".into(),
    },
  ]
}
