//! Certificate handling for engine connections

use crate::error::{EngineError, Result};
use rustls::pki_types::CertificateDer;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub mod tls;

pub use tls::TlsConfig;

/// Load every PEM certificate from a CA bundle.
///
/// Fails when the file cannot be opened, is not valid PEM, or contains no
/// certificates at all.
pub fn load_certificates(path: &Path) -> Result<Vec<CertificateDer<'static>>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| {
            EngineError::Certificate(format!("Invalid certificate in {}: {e}", path.display()))
        })?;

    if certs.is_empty() {
        return Err(EngineError::Certificate(format!(
            "No certificates found in {}",
            path.display()
        )));
    }

    Ok(certs)
}
