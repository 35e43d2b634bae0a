use tokio_native_tls::TlsConnector;

use crate::error::HttpError;

/// Connector plus the server name presented during every handshake.
#[derive(Clone)]
pub(crate) struct TlsSettings {
    pub(crate) connector: TlsConnector,
    pub(crate) domain: String,
}

/// Builds the shared client connector. Without `verify`, certificate and
/// hostname checks are skipped.
pub(crate) fn build_tls_connector(verify: bool) -> Result<TlsConnector, HttpError> {
    let mut builder = native_tls::TlsConnector::builder();
    if !verify {
        builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }
    let connector = builder
        .build()
        .map_err(|source| HttpError::BuildTlsConnector { source })?;
    Ok(TlsConnector::from(connector))
}
