//! TLS client configuration for engine connections

use crate::error::Result;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{ring, verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};
use std::path::Path;
use std::sync::Arc;

/// Certificate verifier that accepts any server certificate and host name.
///
/// Handshake signatures are still checked so the session keys belong to
/// whoever presented the certificate.
#[derive(Debug)]
struct AcceptAnyServerCert {
    provider: Arc<CryptoProvider>,
}

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}

/// TLS configuration for engine connections
#[derive(Debug, Clone)]
pub struct TlsConfig {
    client_config: Arc<ClientConfig>,
    insecure: bool,
}

impl TlsConfig {
    /// Build the client configuration.
    ///
    /// With `ca_file` the server must chain to one of its certificates;
    /// without it the bundled web PKI roots are trusted. `insecure` skips
    /// certificate and host name verification and ignores `ca_file`.
    pub fn new(ca_file: Option<&Path>, insecure: bool) -> Result<Self> {
        let provider = Arc::new(ring::default_provider());
        let builder = ClientConfig::builder_with_provider(provider.clone())
            .with_safe_default_protocol_versions()?;

        let client_config = if insecure {
            builder
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert { provider }))
                .with_no_client_auth()
        } else {
            builder
                .with_root_certificates(root_store(ca_file)?)
                .with_no_client_auth()
        };

        Ok(Self {
            client_config: Arc::new(client_config),
            insecure,
        })
    }

    /// Get the client configuration
    pub fn client_config(&self) -> Arc<ClientConfig> {
        self.client_config.clone()
    }

    /// Whether server verification is disabled
    pub fn is_insecure(&self) -> bool {
        self.insecure
    }
}

fn root_store(ca_file: Option<&Path>) -> Result<RootCertStore> {
    let mut root_store = RootCertStore::empty();
    match ca_file {
        Some(path) => {
            for cert in super::load_certificates(path)? {
                root_store.add(cert)?;
            }
        }
        None => root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned()),
    }
    Ok(root_store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roots() {
        let tls = TlsConfig::new(None, false).expect("tls config");
        assert!(!tls.is_insecure());
    }

    #[test]
    fn test_insecure_ignores_ca_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let tls = TlsConfig::new(Some(&dir.path().join("missing.pem")), true)
            .expect("insecure config does not read the CA file");
        assert!(tls.is_insecure());
    }

    #[test]
    fn test_missing_ca_file_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(TlsConfig::new(Some(&dir.path().join("missing.pem")), false).is_err());
    }
}
