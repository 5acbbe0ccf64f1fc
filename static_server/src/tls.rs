use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::server::ServerConfig;
use rustls_pemfile::{certs, pkcs8_private_keys};

use crate::config::TlsPaths;

/// PEM certificate chain + PKCS#8 key → rustls config, no client auth.
pub fn rustls_config(paths: &TlsPaths) -> Result<ServerConfig> {
    let chain = read_chain(&paths.cert)?;
    let key = read_key(&paths.key)?;

    ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(chain, key)
        .context("certificate and key do not match")
}

fn read_chain(path: &Path) -> Result<Vec<CertificateDer<'static>>> {
    let pem = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let chain: Vec<_> = certs(&mut &*pem)
        .collect::<Result<_, _>>()
        .with_context(|| format!("parsing {}", path.display()))?;
    if chain.is_empty() {
        return Err(anyhow!("no certificate in {}", path.display()));
    }
    Ok(chain)
}

fn read_key(path: &Path) -> Result<PrivateKeyDer<'static>> {
    let pem = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let key = pkcs8_private_keys(&mut &*pem)
        .next()
        .ok_or_else(|| anyhow!("no PKCS#8 key in {}", path.display()))?
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(PrivateKeyDer::Pkcs8(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_files_are_reported() {
        let paths = TlsPaths {
            cert: PathBuf::from("does/not/exist/cert.pem"),
            key: PathBuf::from("does/not/exist/key.pem"),
        };
        let err = rustls_config(&paths).unwrap_err();
        assert!(err.to_string().contains("cert.pem"));
    }
}
