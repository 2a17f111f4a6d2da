//! Server options

use std::net::SocketAddr;
use std::path::PathBuf;

use tradedocs::ReferenceSchema;

/// Options for serving the document forms
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Interface to bind (default: 127.0.0.1)
    pub host: String,
    /// Port to listen on (default: 8501)
    pub port: u16,
    /// Directory offered as the list of local workbooks (default: current directory)
    pub data_dir: PathBuf,
    /// Sheet/column layout of the reference workbook
    pub schema: ReferenceSchema,
    /// Maximum upload size in bytes (default: 20 MiB)
    pub body_limit: usize,
    /// Rows shown in the sheet preview (default: 50)
    pub preview_rows: usize,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            data_dir: PathBuf::from("."),
            schema: ReferenceSchema::default(),
            body_limit: 20 * 1024 * 1024,
            preview_rows: 50,
        }
    }
}

impl ServeOptions {
    /// Socket address to bind
    pub fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_addr() {
        let addr = ServeOptions::default().addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8501");
    }

    #[test]
    fn test_bad_host() {
        let options = ServeOptions {
            host: "not a host".into(),
            ..Default::default()
        };
        assert!(options.addr().is_err());
    }
}
