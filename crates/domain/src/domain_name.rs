use crate::DomainError;
use std::fmt;
use std::sync::Arc;

/// Maximum length of a single label in octets (RFC 1035 §2.3.4).
pub const MAX_LABEL_LEN: usize = 63;

/// Maximum length of a name in wire format, including length octets and
/// the terminating root label (RFC 1035 §2.3.4).
pub const MAX_WIRE_LEN: usize = 255;

/// Absolute domain name.
///
/// Always ends with the root label (`"google"` is stored as `"google."`).
/// Uses `Arc<str>` so per-iteration clones across the dispatch tasks stay cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainName {
    fqdn: Arc<str>,
}

impl DomainName {
    /// Parse and normalize a domain name.
    ///
    /// A relative name gets the root label appended. Fails when the text is
    /// empty, contains control characters or empty labels, has an ASCII label
    /// longer than 63 octets, or (when fully ASCII) encodes to more than 255
    /// octets on the wire. Internationalized labels are length-checked by the
    /// query builder once encoded.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let fqdn = Self::normalize(name)?;
        Ok(Self { fqdn: fqdn.into() })
    }

    /// Normalize a name to its absolute textual form.
    ///
    /// `normalize(normalize(n)) == normalize(n)` for every accepted `n`.
    pub fn normalize(name: &str) -> Result<String, DomainError> {
        if name.is_empty() {
            return Err(DomainError::InvalidDomainName(
                "domain name is empty".to_string(),
            ));
        }

        if let Some(c) = name.chars().find(|c| c.is_control()) {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' contains control character {:?}",
                name.escape_debug(),
                c
            )));
        }

        if name == "." {
            return Ok(".".to_string());
        }

        let relative = name.strip_suffix('.').unwrap_or(name);
        let mut wire_len = 1; // root label
        let mut needs_idna = false;

        for label in relative.split('.') {
            if label.is_empty() {
                return Err(DomainError::InvalidDomainName(format!(
                    "'{}' contains an empty label",
                    name
                )));
            }
            // Non-ASCII labels are only measurable after IDNA encoding.
            if !label.is_ascii() {
                needs_idna = true;
                continue;
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(DomainError::InvalidDomainName(format!(
                    "label '{}' exceeds {} octets",
                    label, MAX_LABEL_LEN
                )));
            }
            wire_len += 1 + label.len();
        }

        if !needs_idna && wire_len > MAX_WIRE_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' is {} octets on the wire (max {})",
                name, wire_len, MAX_WIRE_LEN
            )));
        }

        let mut fqdn = String::with_capacity(relative.len() + 1);
        fqdn.push_str(relative);
        fqdn.push('.');
        Ok(fqdn)
    }

    pub fn as_str(&self) -> &str {
        &self.fqdn
    }

    pub fn is_root(&self) -> bool {
        &*self.fqdn == "."
    }

    /// Labels without the root label.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fqdn
            .strip_suffix('.')
            .unwrap_or_default()
            .split('.')
            .filter(|l| !l.is_empty())
    }

    /// Length of the name in wire format (uncompressed). Exact for ASCII
    /// names; internationalized labels count their UTF-8 length.
    pub fn wire_len(&self) -> usize {
        self.labels().map(|l| l.len() + 1).sum::<usize>() + 1
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fqdn)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.fqdn
    }
}
