//! Gazetteer connection pool.

use deadpool_postgres::{Config as PgConfig, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime, Timeouts};
use native_tls::{Certificate, TlsConnector};
use postgres_native_tls::MakeTlsConnector;
use std::io;
use std::time::Duration;
use std::{env, fs};
use tokio_postgres::NoTls;

use crate::config::Config;

const POOL_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) fn create_pool(cfg: &Config) -> io::Result<Pool> {
    let pg_config: tokio_postgres::Config = cfg
        .database_url
        .parse()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("invalid DATABASE_URL: {e}")))?;

    let mut pool_cfg = PgConfig::new();
    if let Some(host) = pg_config.get_hosts().first() {
        pool_cfg.host = Some(match host {
            tokio_postgres::config::Host::Tcp(h) => h.clone(),
            #[cfg(unix)]
            tokio_postgres::config::Host::Unix(p) => p.to_string_lossy().into(),
        });
    }
    pool_cfg.port = pg_config.get_ports().first().copied();
    pool_cfg.user = pg_config.get_user().map(Into::into);
    pool_cfg.password = pg_config
        .get_password()
        .map(|pw| String::from_utf8_lossy(pw).into());
    pool_cfg.dbname = pg_config.get_dbname().map(Into::into);

    pool_cfg.manager = Some(ManagerConfig { recycling_method: RecyclingMethod::Fast });
    let mut pool_config = PoolConfig::new(cfg.pool_size);
    pool_config.timeouts = Timeouts {
        wait: Some(POOL_TIMEOUT),
        create: Some(POOL_TIMEOUT),
        recycle: Some(POOL_TIMEOUT),
    };
    pool_cfg.pool = Some(pool_config);

    let ssl_mode = SslMode::from_database_url(&cfg.database_url);
    let pool = if ssl_mode == SslMode::Disable {
        log::warn!("Gazetteer TLS mode: disabled");
        pool_cfg.create_pool(Some(Runtime::Tokio1), NoTls)
    } else {
        let mut tls_builder = TlsConnector::builder();
        if matches!(ssl_mode, SslMode::Require | SslMode::Prefer) {
            // libpq `sslmode=require` semantics: encrypted, unverified.
            tls_builder.danger_accept_invalid_certs(true);
            tls_builder.danger_accept_invalid_hostnames(true);
        }
        add_root_cert(&cfg.database_url, &mut tls_builder);

        let connector = tls_builder.build().map_err(io::Error::other)?;
        log::info!("Gazetteer TLS mode: {}", ssl_mode.as_str());
        pool_cfg.create_pool(Some(Runtime::Tokio1), MakeTlsConnector::new(connector))
    };
    pool.map_err(io::Error::other)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SslMode {
    Disable,
    Prefer,
    Require,
    VerifyCa,
    VerifyFull,
}

impl SslMode {
    fn from_database_url(database_url: &str) -> Self {
        match query_param(database_url, "sslmode")
            .map(|v| v.to_ascii_lowercase())
            .as_deref()
        {
            Some("verify-ca") => Self::VerifyCa,
            Some("verify-full") => Self::VerifyFull,
            Some("require") => Self::Require,
            Some("prefer") => Self::Prefer,
            _ => Self::Disable,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Disable => "disabled",
            Self::Prefer => "prefer (unverified)",
            Self::Require => "require (unverified)",
            Self::VerifyCa => "verify-ca",
            Self::VerifyFull => "verify-full",
        }
    }
}

fn query_param(url: &str, key: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, value)| value.to_string())
}

fn add_root_cert(database_url: &str, tls_builder: &mut native_tls::TlsConnectorBuilder) {
    let Some(cert_path) = query_param(database_url, "sslrootcert")
        .or_else(|| env::var("PGSSLROOTCERT").ok())
    else {
        return;
    };

    let cert = fs::read(&cert_path)
        .map_err(|e| e.to_string())
        .and_then(|bytes| Certificate::from_pem(&bytes).map_err(|e| e.to_string()));
    match cert {
        Ok(cert) => {
            tls_builder.add_root_certificate(cert);
            log::info!("Loaded gazetteer root certificate from {cert_path}");
        }
        Err(err) => log::warn!("Ignoring root certificate at {cert_path}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssl_mode_from_url() {
        let base = "postgres://u:p@db:5432/geonames";
        assert_eq!(SslMode::from_database_url(base), SslMode::Disable);
        assert_eq!(
            SslMode::from_database_url(&format!("{base}?sslmode=REQUIRE")),
            SslMode::Require
        );
        assert_eq!(
            SslMode::from_database_url(&format!("{base}?application_name=cw&sslmode=verify-full")),
            SslMode::VerifyFull
        );
        assert_eq!(
            SslMode::from_database_url(&format!("{base}?sslmode=bogus")),
            SslMode::Disable
        );
    }

    #[test]
    fn query_param_lookup() {
        let url = "postgres://h/db?SSLRootCert=/etc/ca.pem&x=1";
        assert_eq!(query_param(url, "sslrootcert").as_deref(), Some("/etc/ca.pem"));
        assert_eq!(query_param(url, "missing"), None);
        assert_eq!(query_param("postgres://h/db", "x"), None);
    }

    #[test]
    fn rejects_malformed_url() {
        let cfg = Config {
            database_url: "not a url at all ===".into(),
            host: "127.0.0.1".into(),
            port: 0,
            pool_size: 1,
            engine_url: "http://localhost".into(),
            engine_timeout: Duration::from_secs(1),
        };
        assert!(create_pool(&cfg).is_err());
    }
}
