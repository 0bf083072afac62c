//! Database service for dashboard-service.

use crate::fixtures::Fixtures;
use crate::models::{Customer, FieldDescription, InvoiceAmount, NewInvoice, NewUser, QueryResult, Revenue};
use crate::services::metrics::{record_seeded_rows, DB_QUERY_DURATION};
use crate::utils::PasswordHashString;
use chrono::NaiveDate;
use service_core::error::AppError;
use sqlx::postgres::{PgConnection, PgPool, PgPoolOptions, PgRow};
use sqlx::{Connection, Executor, FromRow, Postgres, QueryBuilder, Statement};
use std::time::Duration;
use tracing::{info, instrument, warn};

const LIST_INVOICES_SQL: &str = r#"
    SELECT invoices.amount, customers.name
    FROM invoices
    JOIN customers ON invoices.customer_id = customers.id
    WHERE invoices.amount = 666
"#;

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID DEFAULT gen_random_uuid() PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL
    )
"#;

const CREATE_CUSTOMERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS customers (
        id UUID DEFAULT gen_random_uuid() PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        image_url VARCHAR(255) NOT NULL
    )
"#;

const CREATE_INVOICES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS invoices (
        id UUID DEFAULT gen_random_uuid() PRIMARY KEY,
        customer_id UUID NOT NULL REFERENCES customers (id),
        amount INT NOT NULL,
        status VARCHAR(255) NOT NULL,
        date DATE NOT NULL
    )
"#;

const CREATE_REVENUE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS revenue (
        month VARCHAR(4) NOT NULL UNIQUE,
        revenue INT NOT NULL
    )
"#;

/// Rows inserted per table by one seed run. Rows skipped by
/// `ON CONFLICT DO NOTHING` are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: u64,
    pub customers: u64,
    pub invoices: u64,
    pub revenue: u64,
}

impl SeedReport {
    pub fn total(&self) -> u64 {
        self.users + self.customers + self.invoices + self.revenue
    }
}

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

/// Wrap a driver error, keeping it recoverable through `AppError::database_error`.
fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::DatabaseError(anyhow::Error::new(e).context(context))
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "dashboard-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(db_error("Failed to connect"))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["health_check"])
            .start_timer();

        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_error("Health check failed"))?;

        timer.observe_duration();
        Ok(())
    }

    // =========================================================================
    // Invoice lookup
    // =========================================================================

    /// Invoices billed at exactly 666, with the customer's name.
    #[instrument(skip(self))]
    pub async fn list_invoices(&self) -> Result<QueryResult<InvoiceAmount>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_invoices"])
            .start_timer();

        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_error("Failed to acquire connection"))?;

        // Column descriptions come from the prepared statement so they are
        // reported even when nothing matches.
        let statement = (&mut *conn)
            .prepare(LIST_INVOICES_SQL)
            .await
            .map_err(db_error("Failed to list invoices"))?;

        let fields: Vec<FieldDescription> = statement
            .columns()
            .iter()
            .map(FieldDescription::from)
            .collect();

        let rows: Vec<PgRow> = statement
            .query()
            .fetch_all(&mut *conn)
            .await
            .map_err(db_error("Failed to list invoices"))?;

        let invoices = rows
            .iter()
            .map(InvoiceAmount::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_error("Failed to decode invoice row"))?;

        timer.observe_duration();

        Ok(QueryResult::select(invoices, fields))
    }

    // =========================================================================
    // Seeding
    // =========================================================================

    /// Create the dashboard tables and insert `fixtures` in one transaction.
    ///
    /// `password_hashes[i]` is stored for `fixtures.users[i]`. Tables are
    /// seeded in dependency order; any failure rolls back every table.
    #[instrument(
        skip_all,
        fields(
            users = fixtures.users.len(),
            customers = fixtures.customers.len(),
            invoices = fixtures.invoices.len(),
            revenue = fixtures.revenue.len()
        )
    )]
    pub async fn seed(
        &self,
        fixtures: &Fixtures,
        password_hashes: &[PasswordHashString],
    ) -> Result<SeedReport, AppError> {
        let timer = DB_QUERY_DURATION.with_label_values(&["seed"]).start_timer();

        if password_hashes.len() != fixtures.users.len() {
            return Err(AppError::InternalError(anyhow::anyhow!(
                "Got {} password hashes for {} users",
                password_hashes.len(),
                fixtures.users.len()
            )));
        }

        let invoice_dates = fixtures
            .invoices
            .iter()
            .map(NewInvoice::issued_on)
            .collect::<Result<Vec<_>, _>>()?;

        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_error("Failed to acquire connection"))?;

        let mut tx = conn
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        match seed_tables(&mut tx, fixtures, password_hashes, &invoice_dates).await {
            Ok(report) => {
                tx.commit()
                    .await
                    .map_err(db_error("Failed to commit seed transaction"))?;

                timer.observe_duration();
                record_seeded_rows("users", report.users);
                record_seeded_rows("customers", report.customers);
                record_seeded_rows("invoices", report.invoices);
                record_seeded_rows("revenue", report.revenue);
                info!(
                    users = report.users,
                    customers = report.customers,
                    invoices = report.invoices,
                    revenue = report.revenue,
                    "Database seeded"
                );

                Ok(report)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Failed to roll back seed transaction");
                }
                Err(e)
            }
        }
    }
}

async fn seed_tables(
    conn: &mut PgConnection,
    fixtures: &Fixtures,
    password_hashes: &[PasswordHashString],
    invoice_dates: &[NaiveDate],
) -> Result<SeedReport, AppError> {
    let users = seed_users(conn, &fixtures.users, password_hashes).await?;
    let customers = seed_customers(conn, &fixtures.customers).await?;
    let invoices = seed_invoices(conn, &fixtures.invoices, invoice_dates).await?;
    let revenue = seed_revenue(conn, &fixtures.revenue).await?;

    Ok(SeedReport {
        users,
        customers,
        invoices,
        revenue,
    })
}

async fn seed_users(
    conn: &mut PgConnection,
    users: &[NewUser],
    password_hashes: &[PasswordHashString],
) -> Result<u64, AppError> {
    sqlx::query(CREATE_USERS_TABLE)
        .execute(&mut *conn)
        .await
        .map_err(db_error("Failed to create users table"))?;

    if users.is_empty() {
        return Ok(0);
    }

    let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO users (id, name, email, password) ");
    builder.push_values(users.iter().zip(password_hashes), |mut row, (user, hash)| {
        row.push_bind(user.id)
            .push_bind(user.name.as_str())
            .push_bind(user.email.as_str())
            .push_bind(hash.as_str());
    });
    builder.push(" ON CONFLICT (id) DO NOTHING");

    let result = builder
        .build()
        .execute(&mut *conn)
        .await
        .map_err(db_error("Failed to insert users"))?;

    Ok(result.rows_affected())
}

async fn seed_customers(conn: &mut PgConnection, customers: &[Customer]) -> Result<u64, AppError> {
    sqlx::query(CREATE_CUSTOMERS_TABLE)
        .execute(&mut *conn)
        .await
        .map_err(db_error("Failed to create customers table"))?;

    if customers.is_empty() {
        return Ok(0);
    }

    let mut builder =
        QueryBuilder::<Postgres>::new("INSERT INTO customers (id, name, email, image_url) ");
    builder.push_values(customers, |mut row, customer| {
        row.push_bind(customer.id)
            .push_bind(customer.name.as_str())
            .push_bind(customer.email.as_str())
            .push_bind(customer.image_url.as_str());
    });
    builder.push(" ON CONFLICT (id) DO NOTHING");

    let result = builder
        .build()
        .execute(&mut *conn)
        .await
        .map_err(db_error("Failed to insert customers"))?;

    Ok(result.rows_affected())
}

async fn seed_invoices(
    conn: &mut PgConnection,
    invoices: &[NewInvoice],
    invoice_dates: &[NaiveDate],
) -> Result<u64, AppError> {
    sqlx::query(CREATE_INVOICES_TABLE)
        .execute(&mut *conn)
        .await
        .map_err(db_error("Failed to create invoices table"))?;

    if invoices.is_empty() {
        return Ok(0);
    }

    let mut builder = QueryBuilder::<Postgres>::new(
        "INSERT INTO invoices (id, customer_id, amount, status, date) ",
    );
    builder.push_values(invoices.iter().zip(invoice_dates), |mut row, (invoice, date)| {
        row.push_bind(invoice.id)
            .push_bind(invoice.customer_id)
            .push_bind(invoice.amount)
            .push_bind(invoice.status.as_str())
            .push_bind(*date);
    });
    builder.push(" ON CONFLICT (id) DO NOTHING");

    let result = builder
        .build()
        .execute(&mut *conn)
        .await
        .map_err(db_error("Failed to insert invoices"))?;

    Ok(result.rows_affected())
}

async fn seed_revenue(conn: &mut PgConnection, revenue: &[Revenue]) -> Result<u64, AppError> {
    sqlx::query(CREATE_REVENUE_TABLE)
        .execute(&mut *conn)
        .await
        .map_err(db_error("Failed to create revenue table"))?;

    if revenue.is_empty() {
        return Ok(0);
    }

    let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO revenue (month, revenue) ");
    builder.push_values(revenue, |mut row, month| {
        row.push_bind(month.month.as_str()).push_bind(month.revenue);
    });
    builder.push(" ON CONFLICT (month) DO NOTHING");

    let result = builder
        .build()
        .execute(&mut *conn)
        .await
        .map_err(db_error("Failed to insert revenue"))?;

    Ok(result.rows_affected())
}
