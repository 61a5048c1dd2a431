use std::fmt::Write;

use reqauth_core::Result;

use crate::constants::{HAWK_HEADER_VERSION, HAWK_SCHEME};

/// Every value that goes into a hawk mac.
///
/// A server verifying a request rebuilds the same artifacts from the request
/// it received plus the `ts`, `nonce`, `hash`, `ext` and `app` attributes of
/// the header, then compares macs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Unix timestamp in seconds.
    pub ts: i64,
    /// Single use random value.
    pub nonce: String,
    /// HTTP method, upper case.
    pub method: String,
    /// Raw path plus `?query` if present.
    pub resource: String,
    /// Host of the request uri.
    pub host: String,
    /// Port of the request uri, default ports included.
    pub port: u16,
    /// Payload hash, if payload verification applied.
    pub hash: Option<String>,
    /// Application specific extension data.
    pub ext: Option<String>,
    /// Static key id, only set when a delegated access token is the identity.
    pub app: Option<String>,
}

impl Artifacts {
    /// Build the canonical string covered by the mac.
    ///
    /// ## Format
    ///
    /// ```text
    /// "hawk.1.header" + "\n" +
    /// ts + "\n" +
    /// nonce + "\n" +
    /// method + "\n" +
    /// path [+ "?" + query] + "\n" +
    /// host + "\n" +
    /// port + "\n" +
    /// [hash] + "\n" +
    /// [ext] + "\n" +
    /// [app + "\n"]
    /// ```
    pub fn canonical_string(&self) -> Result<String> {
        let mut s = String::with_capacity(128);
        writeln!(s, "{HAWK_HEADER_VERSION}")?;
        writeln!(s, "{}", self.ts)?;
        writeln!(s, "{}", self.nonce)?;
        writeln!(s, "{}", self.method)?;
        writeln!(s, "{}", self.resource)?;
        writeln!(s, "{}", self.host)?;
        writeln!(s, "{}", self.port)?;
        writeln!(s, "{}", self.hash.as_deref().unwrap_or_default())?;
        writeln!(s, "{}", self.ext.as_deref().unwrap_or_default())?;
        if let Some(app) = &self.app {
            writeln!(s, "{app}")?;
        }

        Ok(s)
    }

    /// Render the `Authorization` header value for identity `id` and `mac`.
    ///
    /// The `ext` attribute is followed by an extra comma. Existing verifiers
    /// expect it, so it must be kept.
    pub fn header_value(&self, id: &str, mac: &str) -> Result<String> {
        let mut s = String::with_capacity(128);
        write!(
            s,
            "{HAWK_SCHEME} id=\"{id}\", ts=\"{}\", nonce=\"{}\"",
            self.ts, self.nonce
        )?;
        if let Some(hash) = &self.hash {
            write!(s, ", hash=\"{hash}\"")?;
        }
        if let Some(ext) = &self.ext {
            write!(s, ", ext=\"{ext}\",")?;
        }
        write!(s, ", mac=\"{mac}\"")?;
        if let Some(app) = &self.app {
            write!(s, ", app=\"{app}\"")?;
        }

        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn artifacts() -> Artifacts {
        Artifacts {
            ts: 1_000_000_000,
            nonce: "abc123".to_string(),
            method: "GET".to_string(),
            resource: "/foo?bar=1".to_string(),
            host: "example.com".to_string(),
            port: 80,
            hash: None,
            ext: None,
            app: None,
        }
    }

    #[test]
    fn test_canonical_string_keeps_empty_fields() -> Result<()> {
        assert_eq!(
            artifacts().canonical_string()?,
            "hawk.1.header\n1000000000\nabc123\nGET\n/foo?bar=1\nexample.com\n80\n\n\n"
        );
        Ok(())
    }

    #[test]
    fn test_canonical_string_with_all_fields() -> Result<()> {
        let a = Artifacts {
            hash: Some("h".to_string()),
            ext: Some("e".to_string()),
            app: Some("dh37fgj492je".to_string()),
            ..artifacts()
        };
        assert_eq!(
            a.canonical_string()?,
            "hawk.1.header\n1000000000\nabc123\nGET\n/foo?bar=1\nexample.com\n80\nh\ne\ndh37fgj492je\n"
        );
        Ok(())
    }

    #[test]
    fn test_field_boundaries_do_not_collide() -> Result<()> {
        let a = Artifacts {
            resource: "/a".to_string(),
            host: "bexample.com".to_string(),
            ..artifacts()
        };
        let b = Artifacts {
            resource: "/ab".to_string(),
            host: "example.com".to_string(),
            ..artifacts()
        };
        assert_ne!(a.canonical_string()?, b.canonical_string()?);
        Ok(())
    }

    #[test]
    fn test_header_value() -> Result<()> {
        assert_eq!(
            artifacts().header_value("dh37fgj492je", "m")?,
            r#"Hawk id="dh37fgj492je", ts="1000000000", nonce="abc123", mac="m""#
        );

        let a = Artifacts {
            hash: Some("h".to_string()),
            ext: Some("e".to_string()),
            app: Some("dh37fgj492je".to_string()),
            ..artifacts()
        };
        assert_eq!(
            a.header_value("token", "m")?,
            r#"Hawk id="token", ts="1000000000", nonce="abc123", hash="h", ext="e",, mac="m", app="dh37fgj492je""#
        );
        Ok(())
    }
}
