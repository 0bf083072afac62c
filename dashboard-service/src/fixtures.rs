//! Placeholder rows used to populate a development database.

use crate::models::{Customer, InvoiceStatus, NewInvoice, NewUser, Revenue};
use crate::utils::Password;
use uuid::{uuid, Uuid};

/// Everything one seed run inserts.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub users: Vec<NewUser>,
    pub customers: Vec<Customer>,
    pub invoices: Vec<NewInvoice>,
    pub revenue: Vec<Revenue>,
}

const EVIL_RABBIT: Uuid = uuid!("d6e15727-9fe1-4961-8c5b-ea44a9bd81aa");
const DELBA_DE_OLIVEIRA: Uuid = uuid!("3958dc9e-712f-4377-85e9-fec4b6a6442a");
const LEE_ROBINSON: Uuid = uuid!("3958dc9e-742f-4377-85e9-fec4b6a6442a");
const MICHAEL_NOVOTNY: Uuid = uuid!("76d65c26-f784-44a2-ac19-586678f7c2f2");
const AMY_BURNS: Uuid = uuid!("cc27c14a-0acf-4f4a-a6c9-d45682c144b9");
const BALAZS_ORBAN: Uuid = uuid!("13d07535-c59e-4157-a011-f8d2ef4e0cbb");

impl Fixtures {
    /// The sample dashboard data set.
    pub fn placeholder() -> Self {
        Self {
            users: vec![NewUser {
                id: uuid!("410544b2-4001-4271-9855-fec4b6a6442a"),
                name: "User".to_string(),
                email: "user@nextmail.com".to_string(),
                password: Password::new("123456"),
            }],
            customers: vec![
                customer(EVIL_RABBIT, "Evil Rabbit", "evil@rabbit.com", "evil-rabbit"),
                customer(
                    DELBA_DE_OLIVEIRA,
                    "Delba de Oliveira",
                    "delba@oliveira.com",
                    "delba-de-oliveira",
                ),
                customer(LEE_ROBINSON, "Lee Robinson", "lee@robinson.com", "lee-robinson"),
                customer(
                    MICHAEL_NOVOTNY,
                    "Michael Novotny",
                    "michael@novotny.com",
                    "michael-novotny",
                ),
                customer(AMY_BURNS, "Amy Burns", "amy@burns.com", "amy-burns"),
                customer(BALAZS_ORBAN, "Balazs Orban", "balazs@orban.com", "balazs-orban"),
            ],
            // Invoice ids are fixed so a second seed run hits ON CONFLICT.
            invoices: vec![
                invoice(
                    uuid!("7a1c2d4e-0001-4c1e-9a3b-5f6a7b8c9d01"),
                    EVIL_RABBIT,
                    15795,
                    InvoiceStatus::Pending,
                    "2022-12-06",
                ),
                invoice(
                    uuid!("7a1c2d4e-0002-4c1e-9a3b-5f6a7b8c9d02"),
                    DELBA_DE_OLIVEIRA,
                    20348,
                    InvoiceStatus::Pending,
                    "2022-11-14",
                ),
                invoice(
                    uuid!("7a1c2d4e-0003-4c1e-9a3b-5f6a7b8c9d03"),
                    AMY_BURNS,
                    3040,
                    InvoiceStatus::Paid,
                    "2022-10-29",
                ),
                invoice(
                    uuid!("7a1c2d4e-0004-4c1e-9a3b-5f6a7b8c9d04"),
                    MICHAEL_NOVOTNY,
                    44800,
                    InvoiceStatus::Paid,
                    "2023-09-10",
                ),
                invoice(
                    uuid!("7a1c2d4e-0005-4c1e-9a3b-5f6a7b8c9d05"),
                    BALAZS_ORBAN,
                    34577,
                    InvoiceStatus::Pending,
                    "2023-08-05",
                ),
                invoice(
                    uuid!("7a1c2d4e-0006-4c1e-9a3b-5f6a7b8c9d06"),
                    LEE_ROBINSON,
                    54246,
                    InvoiceStatus::Pending,
                    "2023-07-16",
                ),
                invoice(
                    uuid!("7a1c2d4e-0007-4c1e-9a3b-5f6a7b8c9d07"),
                    EVIL_RABBIT,
                    666,
                    InvoiceStatus::Pending,
                    "2023-06-27",
                ),
                invoice(
                    uuid!("7a1c2d4e-0008-4c1e-9a3b-5f6a7b8c9d08"),
                    MICHAEL_NOVOTNY,
                    32545,
                    InvoiceStatus::Paid,
                    "2023-06-09",
                ),
                invoice(
                    uuid!("7a1c2d4e-0009-4c1e-9a3b-5f6a7b8c9d09"),
                    AMY_BURNS,
                    1250,
                    InvoiceStatus::Paid,
                    "2023-06-17",
                ),
                invoice(
                    uuid!("7a1c2d4e-0010-4c1e-9a3b-5f6a7b8c9d10"),
                    BALAZS_ORBAN,
                    8546,
                    InvoiceStatus::Paid,
                    "2023-06-07",
                ),
                invoice(
                    uuid!("7a1c2d4e-0011-4c1e-9a3b-5f6a7b8c9d11"),
                    DELBA_DE_OLIVEIRA,
                    500,
                    InvoiceStatus::Paid,
                    "2023-08-19",
                ),
                invoice(
                    uuid!("7a1c2d4e-0012-4c1e-9a3b-5f6a7b8c9d12"),
                    BALAZS_ORBAN,
                    8945,
                    InvoiceStatus::Paid,
                    "2023-06-03",
                ),
                invoice(
                    uuid!("7a1c2d4e-0013-4c1e-9a3b-5f6a7b8c9d13"),
                    LEE_ROBINSON,
                    1000,
                    InvoiceStatus::Paid,
                    "2022-06-05",
                ),
            ],
            revenue: [
                ("Jan", 2000),
                ("Feb", 1800),
                ("Mar", 2200),
                ("Apr", 2500),
                ("May", 2300),
                ("Jun", 3200),
                ("Jul", 3500),
                ("Aug", 3700),
                ("Sep", 2500),
                ("Oct", 2800),
                ("Nov", 3000),
                ("Dec", 4800),
            ]
            .into_iter()
            .map(|(month, revenue)| Revenue {
                month: month.to_string(),
                revenue,
            })
            .collect(),
        }
    }
}

fn customer(id: Uuid, name: &str, email: &str, image: &str) -> Customer {
    Customer {
        id,
        name: name.to_string(),
        email: email.to_string(),
        image_url: format!("/customers/{}.png", image),
    }
}

fn invoice(id: Uuid, customer_id: Uuid, amount: i32, status: InvoiceStatus, date: &str) -> NewInvoice {
    NewInvoice {
        id,
        customer_id,
        amount,
        status,
        date: date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_invoice_references_a_known_customer() {
        let fixtures = Fixtures::placeholder();
        let customers: HashSet<Uuid> = fixtures.customers.iter().map(|c| c.id).collect();

        for invoice in &fixtures.invoices {
            assert!(
                customers.contains(&invoice.customer_id),
                "invoice {} has unknown customer {}",
                invoice.id,
                invoice.customer_id
            );
        }
    }

    #[test]
    fn invoice_ids_are_unique_and_dates_parse() {
        let fixtures = Fixtures::placeholder();
        let ids: HashSet<Uuid> = fixtures.invoices.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), fixtures.invoices.len());

        for invoice in &fixtures.invoices {
            assert!(invoice.issued_on().is_ok(), "bad date on {}", invoice.id);
        }
    }

    #[test]
    fn exactly_one_invoice_at_the_lookup_amount() {
        let fixtures = Fixtures::placeholder();
        let matching: Vec<_> = fixtures
            .invoices
            .iter()
            .filter(|i| i.amount == 666)
            .collect();

        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].customer_id, EVIL_RABBIT);
    }

    #[test]
    fn revenue_months_fit_the_column_width() {
        let fixtures = Fixtures::placeholder();
        assert_eq!(fixtures.revenue.len(), 12);
        assert!(fixtures.revenue.iter().all(|r| r.month.len() <= 4));
    }
}
