//! # Order Payload
//!
//! The structured order handed to the [`crate::OrderSink`] once every field
//! is valid. Serialized with camelCase keys:
//!
//! ```json
//! { "firstName": "Bob", "lastName": "Johnson", "email": "bob@johnson.com",
//!   "color": "blue", "quantity": 5 }
//! ```

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// A validated order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub color: Color,
    /// Number of masks, coerced from the numeric control's text.
    pub quantity: i64,
}
