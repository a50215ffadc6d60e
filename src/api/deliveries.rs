//! Assigned-deliveries endpoints
//!
//! Wire types and typed wrappers for the driver's delivery list and
//! detail views. Both calls carry the driver's bearer token and are
//! refresh-protected by [`ApiClient::execute`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::transport::OutgoingRequest;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One row of the driver's assigned-deliveries list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySummary {
    pub id: String,
    pub order_number: String,
    pub client_name: String,
    pub address_line1: String,
    pub scheduled_for: DateTime<Utc>,
    pub status: String,
    pub item_count: u32,
}

/// A single line item within a delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryItem {
    pub name: String,
    pub qty: u32,
    pub vendor_name: String,
}

/// Full detail for a single delivery, including its status history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetail {
    pub id: String,
    pub order_number: String,
    pub client_name: String,
    pub address_line1: String,
    pub scheduled_for: DateTime<Utc>,
    pub status: String,
    pub item_count: u32,
    pub full_address: String,
    pub phone: String,
    pub notes: String,
    pub items: Vec<DeliveryItem>,
    pub total_cents: Option<i64>,
    pub vendor_name: Option<String>,
    pub picked_up_at: Option<DateTime<Utc>>,
    pub in_transit_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub exception_at: Option<DateTime<Utc>>,
    pub exception_reason: Option<String>,
}

/// Optional filters for the deliveries list.
#[derive(Debug, Clone, Default)]
pub struct DeliveryFilter {
    /// Restrict to deliveries scheduled on this date (YYYY-MM-DD).
    pub date: Option<String>,
    /// Restrict to deliveries in this status.
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Endpoint wrappers
// ---------------------------------------------------------------------------

/// Fetches the driver's assigned deliveries, optionally filtered.
pub async fn list_deliveries(
    client: &ApiClient,
    filter: &DeliveryFilter,
) -> Result<Vec<DeliverySummary>> {
    let mut request = OutgoingRequest::get(client.routes().deliveries.clone());
    if let Some(date) = &filter.date {
        request = request.with_query("date", date);
    }
    if let Some(status) = &filter.status {
        request = request.with_query("status", status);
    }
    let response = client.execute(request).await?;
    response.json()
}

/// Fetches full detail for one delivery.
pub async fn delivery_detail(client: &ApiClient, id: &str) -> Result<DeliveryDetail> {
    let path = format!("{}/{}", client.routes().deliveries, id);
    let response = client.execute(OutgoingRequest::get(path)).await?;
    response.json()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_decodes_camel_case() {
        let json = r#"{
            "id": "del-1",
            "orderNumber": "ORD-1001",
            "clientName": "Cafe Luna",
            "addressLine1": "12 Vine St",
            "scheduledFor": "2026-08-06T14:30:00Z",
            "status": "pending",
            "itemCount": 3
        }"#;
        let summary: DeliverySummary = serde_json::from_str(json).expect("decode");
        assert_eq!(summary.order_number, "ORD-1001");
        assert_eq!(summary.item_count, 3);
    }

    #[test]
    fn test_detail_decodes_nullable_fields() {
        let json = r#"{
            "id": "del-2",
            "orderNumber": "ORD-1002",
            "clientName": "Bakery 9",
            "addressLine1": "80 Mill Rd",
            "scheduledFor": "2026-08-06T09:00:00Z",
            "status": "in_transit",
            "itemCount": 1,
            "fullAddress": "80 Mill Rd, Springfield",
            "phone": "+1 555 0100",
            "notes": "Ring twice",
            "items": [{"name": "Flour", "qty": 4, "vendorName": "MillCo"}],
            "totalCents": null,
            "vendorName": null,
            "pickedUpAt": "2026-08-06T08:15:00Z",
            "inTransitAt": "2026-08-06T08:20:00Z",
            "deliveredAt": null,
            "exceptionAt": null,
            "exceptionReason": null
        }"#;
        let detail: DeliveryDetail = serde_json::from_str(json).expect("decode");
        assert_eq!(detail.items.len(), 1);
        assert_eq!(detail.items[0].vendor_name, "MillCo");
        assert!(detail.total_cents.is_none());
        assert!(detail.picked_up_at.is_some());
        assert!(detail.delivered_at.is_none());
    }
}
