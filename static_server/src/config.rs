//! Settings read from the environment (and `.env`, loaded in `main`).
//!
//! | variable          | default                      |
//! |-------------------|------------------------------|
//! | `STATIC_ADDR`     | `0.0.0.0:8444`               |
//! | `STATIC_DIST`     | `../frontend/dist`           |
//! | `STATIC_TLS_CERT` | unset, plain HTTP            |
//! | `STATIC_TLS_KEY`  | unset, plain HTTP            |

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const DEFAULT_ADDR: &str = "0.0.0.0:8444";

#[derive(Debug, Clone, PartialEq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub dist: PathBuf,
    pub tls: Option<TlsPaths>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit source, blank
    /// values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let raw_addr = get("STATIC_ADDR").unwrap_or_else(|| DEFAULT_ADDR.into());
        let addr = raw_addr
            .parse()
            .with_context(|| format!("STATIC_ADDR is not a socket address: {raw_addr}"))?;

        let dist = get("STATIC_DIST")
            .map(PathBuf::from)
            .unwrap_or_else(default_dist);

        let tls = match (get("STATIC_TLS_CERT"), get("STATIC_TLS_KEY")) {
            (Some(cert), Some(key)) => Some(TlsPaths { cert: cert.into(), key: key.into() }),
            (None, None) => None,
            _ => bail!("STATIC_TLS_CERT and STATIC_TLS_KEY must be set together"),
        };

        Ok(Self { addr, dist, tls })
    }

    pub fn index(&self) -> PathBuf {
        self.dist.join("index.html")
    }
}

/// `trunk build` output next to this crate.
fn default_dist() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../frontend/dist")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_serve_plain_http_from_frontend_dist() {
        let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.addr, "0.0.0.0:8444".parse().unwrap());
        assert!(cfg.dist.ends_with("frontend/dist"));
        assert_eq!(cfg.tls, None);
        assert!(cfg.index().ends_with("index.html"));
    }

    #[test]
    fn tls_needs_both_paths() {
        let both = ServerConfig::from_lookup(lookup(&[
            ("STATIC_TLS_CERT", "certs/cert.pem"),
            ("STATIC_TLS_KEY", "certs/key.pem"),
        ]))
        .unwrap();
        assert_eq!(both.tls.unwrap().key, PathBuf::from("certs/key.pem"));

        assert!(ServerConfig::from_lookup(lookup(&[("STATIC_TLS_CERT", "certs/cert.pem")])).is_err());
    }

    #[test]
    fn bad_address_is_an_error_and_blank_is_default() {
        assert!(ServerConfig::from_lookup(lookup(&[("STATIC_ADDR", "localhost")])).is_err());
        let blank = ServerConfig::from_lookup(lookup(&[("STATIC_ADDR", "  ")])).unwrap();
        assert_eq!(blank.addr.port(), 8444);
    }

    #[test]
    fn custom_dist() {
        let cfg = ServerConfig::from_lookup(lookup(&[("STATIC_DIST", "/srv/app")])).unwrap();
        assert_eq!(cfg.index(), PathBuf::from("/srv/app/index.html"));
    }
}
