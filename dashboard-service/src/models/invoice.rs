use chrono::NaiveDate;
use serde::Serialize;
use service_core::error::AppError;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

/// An invoice to seed. Amounts are in cents.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: InvoiceStatus,
    /// ISO-8601 calendar date (`YYYY-MM-DD`).
    pub date: String,
}

impl NewInvoice {
    pub fn issued_on(&self) -> Result<NaiveDate, AppError> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|e| {
            AppError::BadRequest(anyhow::anyhow!(
                "Invalid date '{}' on invoice {}: {}",
                self.date,
                self.id,
                e
            ))
        })
    }
}

/// One row of the invoice amount lookup: the amount and who it was billed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct InvoiceAmount {
    pub amount: i32,
    pub name: String,
}
