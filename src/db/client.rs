use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_postgres::{Client, Config, Connection, NoTls};

use crate::db::models::{collect_foreign_keys, column_from_row, foreign_key_from_row};
use crate::schema::{ColumnRecord, ForeignKeyRecord};

const COLUMNS_QUERY: &str = "SELECT
        c.table_name::text AS table_name,
        c.column_name::text AS column_name,
        c.is_nullable::text AS is_nullable,
        c.data_type::text AS data_type,
        c.udt_name::text AS udt_name
     FROM information_schema.columns c
     WHERE c.table_schema = $1
     ORDER BY c.table_name, c.ordinal_position";

// pg_constraint is keyed by oid rather than by (schema, name), and unlike
// information_schema.constraint_column_usage it is visible to non-owners.
const FOREIGN_KEYS_QUERY: &str = "SELECT
        src.relname::text AS table_name,
        src_att.attname::text AS column_name,
        ref.relname::text AS referenced_table_name,
        ref_att.attname::text AS referenced_column_name
     FROM pg_catalog.pg_constraint con
     JOIN pg_catalog.pg_class src ON src.oid = con.conrelid
     JOIN pg_catalog.pg_namespace ns ON ns.oid = src.relnamespace
     JOIN pg_catalog.pg_class ref ON ref.oid = con.confrelid
     CROSS JOIN LATERAL unnest(con.conkey, con.confkey) AS k(src_attnum, ref_attnum)
     JOIN pg_catalog.pg_attribute src_att
         ON src_att.attrelid = con.conrelid
         AND src_att.attnum = k.src_attnum
     JOIN pg_catalog.pg_attribute ref_att
         ON ref_att.attrelid = con.confrelid
         AND ref_att.attnum = k.ref_attnum
     WHERE con.contype = 'f'
         AND ns.nspname = $1
     ORDER BY src.relname, src_att.attname, con.conname";

pub struct Database {
    client: Client,
}

// Keep connection alive in background task
fn spawn_connection<S, T>(connection: Connection<S, T>)
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    T: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("database connection error: {}", e);
        }
    });
}

impl Database {
    pub async fn connect(connection_string: &str, tls: bool) -> Result<Self> {
        let config: Config = connection_string
            .parse()
            .context("invalid connection string")?;
        Self::connect_with(&config, tls).await
    }

    pub async fn connect_with(config: &Config, tls: bool) -> Result<Self> {
        let client = if tls {
            let connector =
                native_tls::TlsConnector::new().context("failed to build TLS connector")?;
            let connector = postgres_native_tls::MakeTlsConnector::new(connector);
            let (client, connection) = config
                .connect(connector)
                .await
                .context("failed to connect to database")?;
            spawn_connection(connection);
            client
        } else {
            let (client, connection) = config
                .connect(NoTls)
                .await
                .context("failed to connect to database")?;
            spawn_connection(connection);
            client
        };

        tracing::info!(tls, "connected to database");
        Ok(Database { client })
    }

    pub async fn fetch_columns(&self, schema: &str) -> Result<Vec<ColumnRecord>> {
        let rows = self
            .client
            .query(COLUMNS_QUERY, &[&schema])
            .await
            .with_context(|| format!("failed to query columns of schema '{}'", schema))?;

        tracing::info!(schema, rows = rows.len(), "fetched column metadata");
        Ok(rows.iter().map(column_from_row).collect())
    }

    pub async fn fetch_foreign_keys(&self, schema: &str) -> Result<Vec<ForeignKeyRecord>> {
        let rows = self
            .client
            .query(FOREIGN_KEYS_QUERY, &[&schema])
            .await
            .with_context(|| format!("failed to query foreign keys of schema '{}'", schema))?;

        tracing::info!(schema, rows = rows.len(), "fetched foreign keys");
        Ok(collect_foreign_keys(rows.iter().map(foreign_key_from_row)))
    }

    /// Both metadata sets for one schema, queried one after the other.
    pub async fn fetch_metadata(
        &self,
        schema: &str,
    ) -> Result<(Vec<ColumnRecord>, Vec<ForeignKeyRecord>)> {
        let columns = self.fetch_columns(schema).await?;
        let foreign_keys = self.fetch_foreign_keys(schema).await?;
        Ok((columns, foreign_keys))
    }
}
