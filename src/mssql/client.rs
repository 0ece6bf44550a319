use std::net::ToSocketAddrs;

use tiberius::{Client, SqlBrowser};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

use super::config::{MssqlOptions, build_tiberius_config};
use crate::error::SqlDaoError;

/// Type alias for SQL Server client
pub type MssqlClient = Client<Compat<TcpStream>>;

/// Open a new SQL Server client.
///
/// A named instance is located through the SQL Browser; otherwise the client
/// connects straight to `server:port`.
///
/// # Errors
/// Returns `SqlDaoError::ConnectionError` if the address cannot be resolved or the
/// TCP/TDS handshake fails.
pub async fn create_mssql_client(opts: &MssqlOptions) -> Result<MssqlClient, SqlDaoError> {
    let config = build_tiberius_config(opts);

    let tcp = if opts.uses_sql_browser() {
        // Named instances listen on a dynamic port that only the SQL Browser knows.
        TcpStream::connect_named(&config).await.map_err(|e| {
            SqlDaoError::ConnectionError(format!("SQL Browser lookup failed: {e}"))
        })?
    } else {
        let server_addr = (opts.server.as_str(), opts.port_or_default())
            .to_socket_addrs()
            .map_err(|e| {
                SqlDaoError::ConnectionError(format!("Failed to resolve server address: {e}"))
            })?
            .next()
            .ok_or_else(|| {
                SqlDaoError::ConnectionError(format!("No valid address found for {}", opts.server))
            })?;
        TcpStream::connect(server_addr)
            .await
            .map_err(|e| SqlDaoError::ConnectionError(format!("TCP connection error: {e}")))?
    };
    tcp.set_nodelay(true)
        .map_err(|e| SqlDaoError::ConnectionError(format!("TCP configuration error: {e}")))?;

    Client::connect(config, tcp.compat_write())
        .await
        .map_err(|e| SqlDaoError::ConnectionError(format!("SQL Server connection error: {e}")))
}
