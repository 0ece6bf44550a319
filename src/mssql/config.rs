use serde::{Deserialize, Serialize};
use tiberius::{AuthMethod, Config as TiberiusConfig};

use crate::config::StoreConfig;

/// Options for connecting to SQL Server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MssqlOptions {
    pub server: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub port: Option<u16>,
    pub instance_name: Option<String>,
    /// Accept the server certificate without validation.
    pub trust_cert: bool,
}

impl MssqlOptions {
    #[must_use]
    pub fn new(server: String, database: String, user: String, password: String) -> Self {
        Self {
            server,
            database,
            user,
            password,
            port: None,
            instance_name: None,
            trust_cert: false,
        }
    }

    #[must_use]
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(1433)
    }

    /// Whether the instance must be found through the SQL Browser service.
    #[must_use]
    pub fn uses_sql_browser(&self) -> bool {
        self.instance_name.as_deref().is_some_and(|name| !name.is_empty())
    }
}

/// Fluent builder for MSSQL options.
#[derive(Debug, Clone)]
pub struct MssqlOptionsBuilder {
    opts: MssqlOptions,
}

impl MssqlOptionsBuilder {
    #[must_use]
    pub fn new(server: String, database: String, user: String, password: String) -> Self {
        Self {
            opts: MssqlOptions::new(server, database, user, password),
        }
    }

    #[must_use]
    pub fn port(mut self, port: Option<u16>) -> Self {
        self.opts.port = port;
        self
    }

    #[must_use]
    pub fn instance_name(mut self, instance_name: Option<String>) -> Self {
        self.opts.instance_name = instance_name;
        self
    }

    #[must_use]
    pub fn trust_cert(mut self, trust_cert: bool) -> Self {
        self.opts.trust_cert = trust_cert;
        self
    }

    #[must_use]
    pub fn finish(self) -> MssqlOptions {
        self.opts
    }

    /// Wrap the options in a [`StoreConfig`].
    #[must_use]
    pub fn build(self) -> StoreConfig {
        StoreConfig::Mssql(self.finish())
    }
}

pub(crate) fn build_tiberius_config(opts: &MssqlOptions) -> TiberiusConfig {
    let mut config = TiberiusConfig::new();
    config.host(&opts.server);
    config.database(&opts.database);
    config.port(opts.port_or_default());
    config.authentication(AuthMethod::sql_server(&opts.user, &opts.password));
    if opts.uses_sql_browser() {
        if let Some(instance) = &opts.instance_name {
            config.instance_name(instance);
        }
    }
    if opts.trust_cert {
        config.trust_cert();
    }
    config
}
