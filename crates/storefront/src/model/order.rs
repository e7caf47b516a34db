//! Orders and their status lifecycle.

use crate::error::ValidationError;
use crate::model::{record_id, CustomerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

record_id!(
    /// Identifier of an [`Order`].
    OrderId,
    "order"
);

/// Where an order is in fulfilment.
///
/// ```text
/// Pending -> Processing -> Shipped -> Delivered
///    \            \           \
///     +------------+-----------+--> Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether `next` is a forward step in the fulfilment graph.
    ///
    /// Administrators may still set any status; this only tells the workflow which moves
    /// are worth a warning.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Processing, Shipped)
                | (Shipped, Delivered)
                | (Pending | Processing | Shipped, Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}

/// A placed order. Area and product are copied in as text so the order stays readable
/// after either is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    pub mobile: String,
    pub address: String,
    #[serde(rename = "area")]
    pub area_name: String,
    #[serde(rename = "product")]
    pub product_name: String,
    pub quantity: u32,
    /// `None` for guest checkout.
    pub customer_id: Option<CustomerId>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating an order. There is no status field: every order starts
/// [`OrderStatus::Pending`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreate {
    pub name: String,
    pub mobile: String,
    pub address: String,
    pub area_name: String,
    pub product_name: String,
    pub quantity: u32,
    pub customer_id: Option<CustomerId>,
}

/// Custom operations on an order.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Any status may be set from any other; see [`OrderStatus::can_transition_to`].
    SetStatus(OrderStatus),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_only_the_five_values() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert_eq!(
            "Bogus".parse::<OrderStatus>(),
            Err(ValidationError::InvalidStatus("Bogus".into()))
        );
        assert!("pending".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_forward_graph() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Shipped.can_transition_to(Delivered));
        assert!(Processing.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Delivered));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(Delivered.is_terminal() && Cancelled.is_terminal());
    }

    #[test]
    fn test_order_json_shape() {
        let order = Order {
            id: OrderId(1),
            name: "A".into(),
            mobile: "123".into(),
            address: "X".into(),
            area_name: "Kidwai Nagar".into(),
            product_name: "Almond".into(),
            quantity: 2,
            customer_id: Some(CustomerId(4)),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["id"], "order_1");
        assert_eq!(json["area"], "Kidwai Nagar");
        assert_eq!(json["product"], "Almond");
        assert_eq!(json["customerId"], "customer_4");
        assert_eq!(json["status"], "Pending");
        assert!(json.get("createdAt").is_some());
    }
}
