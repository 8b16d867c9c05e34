// shop/src/forms.rs

//! urlencoded form payloads and their validation.

use crate::models::NewBooking;
use serde::Deserialize;

/// Upper bound for each free-text booking field.
pub const MAX_FIELD_LEN: usize = 200;

/// Raw booking form as posted. Absent fields deserialize as empty strings so
/// an incomplete submission reaches validation instead of failing extraction.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct BookingFormPayload {
  pub name: String,
  pub email: String,
  pub phone: String,
  pub address: String,
  #[serde(alias = "amount")] // Field name used by older clients
  pub product: String,
  pub feedback: String,
}

/// Why a booking submission was rejected. Only logged; the form is re-rendered blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingFormError {
  Missing(&'static str),
  TooLong(&'static str),
  InvalidProduct,
}

impl BookingFormPayload {
  /// Checks field presence and lengths. Whether the product exists is a
  /// storage question and is checked by the handler.
  pub fn validate(&self) -> Result<NewBooking, BookingFormError> {
    let name = required("name", &self.name)?;
    let email = required("email", &self.email)?;
    let phone = required("phone", &self.phone)?;
    let address = required("address", &self.address)?;
    let feedback = self.feedback.trim();
    if feedback.chars().count() > MAX_FIELD_LEN {
      return Err(BookingFormError::TooLong("feedback"));
    }
    let product_id = self
      .product
      .trim()
      .parse::<i64>()
      .map_err(|_| BookingFormError::InvalidProduct)?;

    Ok(NewBooking {
      name,
      email,
      phone,
      address,
      product_id,
      feedback: feedback.to_string(),
    })
  }
}

fn required(field: &'static str, value: &str) -> Result<String, BookingFormError> {
  let value = value.trim();
  if value.is_empty() {
    return Err(BookingFormError::Missing(field));
  }
  if value.chars().count() > MAX_FIELD_LEN {
    return Err(BookingFormError::TooLong(field));
  }
  Ok(value.to_string())
}

/// Username/password pair used by both login and registration.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct CredentialsPayload {
  pub username: String,
  pub password: String,
}
