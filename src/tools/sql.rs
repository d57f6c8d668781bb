use std::fmt;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, Column, PgPool, Row};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Error: {0}")]
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    PostgreSQL,
    MySQL,
    SQLite,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::PostgreSQL => write!(f, "postgresql"),
            Dialect::MySQL => write!(f, "mysql"),
            Dialect::SQLite => write!(f, "sqlite"),
        }
    }
}

/// A relational data source the SQL chain can introspect.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Runs `query` and returns the column names and the stringified rows.
    async fn query(&self, query: &str) -> Result<(Vec<String>, Vec<Vec<String>>), DatabaseError>;

    async fn table_names(&self) -> Result<Vec<String>, DatabaseError>;

    /// DDL-shaped description of a single table.
    async fn table_info(&self, table: &str) -> Result<String, DatabaseError>;

    fn dialect(&self) -> Dialect;
}

impl<E> From<E> for Box<dyn Engine>
where
    E: 'static + Engine,
{
    fn from(engine: E) -> Self {
        Box::new(engine)
    }
}

pub struct SQLDatabaseBuilder {
    engine: Box<dyn Engine>,
    sample_rows_number: usize,
    tables: Vec<String>,
}

impl SQLDatabaseBuilder {
    pub fn new(engine: impl Into<Box<dyn Engine>>) -> Self {
        Self {
            engine: engine.into(),
            sample_rows_number: 3,
            tables: Vec::new(),
        }
    }

    pub fn with_sample_rows_number(mut self, sample_rows_number: usize) -> Self {
        self.sample_rows_number = sample_rows_number;
        self
    }

    /// Restricts the database view to the given tables. Empty means all tables.
    pub fn with_tables(mut self, tables: Vec<String>) -> Self {
        self.tables = tables;
        self
    }

    pub async fn build(self) -> Result<SQLDatabase, DatabaseError> {
        let available = self.engine.table_names().await?;

        let all_tables = if self.tables.is_empty() {
            available
        } else {
            for table in &self.tables {
                if !available.contains(table) {
                    return Err(DatabaseError::TableNotFound(table.clone()));
                }
            }
            self.tables
        };

        let dialect = self.engine.dialect();

        Ok(SQLDatabase {
            engine: self.engine,
            dialect,
            sample_rows_number: self.sample_rows_number,
            all_tables,
        })
    }
}

pub struct SQLDatabase {
    engine: Box<dyn Engine>,
    dialect: Dialect,
    sample_rows_number: usize,
    all_tables: Vec<String>,
}

impl SQLDatabase {
    pub fn builder(engine: impl Into<Box<dyn Engine>>) -> SQLDatabaseBuilder {
        SQLDatabaseBuilder::new(engine)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn table_names(&self) -> &[String] {
        &self.all_tables
    }

    /// Schema descriptions for the given tables, or for every known table when
    /// `tables` is empty. Each description carries a sample-row section unless
    /// sampling is disabled.
    pub async fn table_info(&self, tables: &[String]) -> Result<String, DatabaseError> {
        let targets: Vec<&String> = if tables.is_empty() {
            self.all_tables.iter().collect()
        } else {
            for table in tables {
                if !self.all_tables.contains(table) {
                    return Err(DatabaseError::TableNotFound(table.clone()));
                }
            }
            tables.iter().collect()
        };

        let mut sections = Vec::with_capacity(targets.len());
        for table in targets {
            let mut info = self.engine.table_info(table).await?;

            if self.sample_rows_number > 0 {
                match self.sample_rows(table).await {
                    Ok(sample) => info.push_str(&sample),
                    Err(e) => log::warn!("Failed to sample rows from {table}: {e}"),
                }
            }

            sections.push(info);
        }

        Ok(sections.join("\n\n"))
    }

    /// Runs `query` and renders the result as tab-separated text.
    pub async fn query(&self, query: &str) -> Result<String, DatabaseError> {
        let (columns, rows) = self.engine.query(query).await?;

        let mut out = columns.join("\t");
        for row in rows {
            out.push('\n');
            out.push_str(&row.join("\t"));
        }

        Ok(out)
    }

    async fn sample_rows(&self, table: &str) -> Result<String, DatabaseError> {
        let query = format!("SELECT * FROM {table} LIMIT {}", self.sample_rows_number);
        let rendered = self.query(&query).await?;

        Ok(format!(
            "\n\n/*\n{} rows from {table} table:\n{rendered}\n*/",
            self.sample_rows_number
        ))
    }
}

/// Renders a decoded column value for text output. SQL NULL becomes `"NULL"`;
/// a value that cannot be decoded as text is rendered the same way, with a
/// warning, so one bad column does not sink the whole result set.
fn render_column(value: Result<Option<String>, sqlx::Error>, column: &str) -> String {
    match value {
        Ok(Some(value)) => value,
        Ok(None) => "NULL".to_string(),
        Err(e) => {
            log::warn!("Failed to decode column {column} as text: {e}");
            "NULL".to_string()
        }
    }
}

pub struct PostgreSQLEngine {
    pool: PgPool,
}

impl PostgreSQLEngine {
    pub async fn new(database_url: &str) -> Result<Self, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Engine for PostgreSQLEngine {
    async fn query(&self, query: &str) -> Result<(Vec<String>, Vec<Vec<String>>), DatabaseError> {
        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let columns = rows
            .first()
            .map(|row| {
                row.columns()
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut values = Vec::with_capacity(row.len());
            for i in 0..row.len() {
                let name = row.columns()[i].name();
                values.push(render_column(row.try_get_unchecked(i), name));
            }
            out.push(values);
        }

        Ok((columns, out))
    }

    async fn table_names(&self) -> Result<Vec<String>, DatabaseError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = 'public' AND table_type = 'BASE TABLE' \
             ORDER BY table_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    async fn table_info(&self, table: &str) -> Result<String, DatabaseError> {
        let columns = sqlx::query_as::<_, (String, String, String)>(
            "SELECT column_name, data_type, is_nullable FROM information_schema.columns \
             WHERE table_schema = 'public' AND table_name = $1 \
             ORDER BY ordinal_position",
        )
        .bind(table)
        .fetch_all(&self.pool)
        .await?;

        if columns.is_empty() {
            return Err(DatabaseError::TableNotFound(table.to_string()));
        }

        let definitions = columns
            .iter()
            .map(|(name, data_type, is_nullable)| {
                let not_null = if is_nullable == "NO" { " NOT NULL" } else { "" };
                format!("\t{name} {data_type}{not_null}")
            })
            .collect::<Vec<_>>()
            .join(",\n");

        Ok(format!("CREATE TABLE {table} (\n{definitions}\n)"))
    }

    fn dialect(&self) -> Dialect {
        Dialect::PostgreSQL
    }
}
