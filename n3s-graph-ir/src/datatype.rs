//! RDF datatype representation
//!
//! Datatypes are always explicit in this IR - there is no "untyped" literal.
//! Plain strings default to `xsd:string`, and language-tagged strings use
//! `rdf:langString`.

use std::sync::Arc;

/// Common XSD and RDF datatype IRIs (re-exported from vocab crate)
pub mod iri {
    pub use n3s_vocab::rdf::LANG_STRING as RDF_LANG_STRING;
    pub use n3s_vocab::xsd::{
        BOOLEAN as XSD_BOOLEAN, DECIMAL as XSD_DECIMAL, DOUBLE as XSD_DOUBLE,
        INTEGER as XSD_INTEGER, STRING as XSD_STRING,
    };
}

/// RDF literal datatype, always an expanded IRI.
///
/// Use `Datatype::xsd_string()` for plain strings and
/// `Datatype::rdf_lang_string()` for language-tagged strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Datatype(Arc<str>);

impl Datatype {
    /// Create a datatype from an expanded IRI
    pub fn from_iri(iri: impl AsRef<str>) -> Self {
        Datatype(Arc::from(iri.as_ref()))
    }

    /// xsd:string - default for plain string literals
    pub fn xsd_string() -> Self {
        Self::from_iri(iri::XSD_STRING)
    }

    /// xsd:boolean
    pub fn xsd_boolean() -> Self {
        Self::from_iri(iri::XSD_BOOLEAN)
    }

    /// xsd:integer
    pub fn xsd_integer() -> Self {
        Self::from_iri(iri::XSD_INTEGER)
    }

    /// xsd:decimal
    pub fn xsd_decimal() -> Self {
        Self::from_iri(iri::XSD_DECIMAL)
    }

    /// xsd:double
    pub fn xsd_double() -> Self {
        Self::from_iri(iri::XSD_DOUBLE)
    }

    /// rdf:langString - for language-tagged literals
    pub fn rdf_lang_string() -> Self {
        Self::from_iri(iri::RDF_LANG_STRING)
    }

    /// Get the IRI representation of this datatype
    pub fn as_iri(&self) -> &str {
        &self.0
    }

    /// Check if this is the xsd:string datatype
    pub fn is_xsd_string(&self) -> bool {
        self.as_iri() == iri::XSD_STRING
    }

    /// Check if this is the xsd:integer datatype
    pub fn is_xsd_integer(&self) -> bool {
        self.as_iri() == iri::XSD_INTEGER
    }

    /// Check if this is the xsd:boolean datatype
    pub fn is_xsd_boolean(&self) -> bool {
        self.as_iri() == iri::XSD_BOOLEAN
    }

    /// Check if this is the rdf:langString datatype
    pub fn is_lang_string(&self) -> bool {
        self.as_iri() == iri::RDF_LANG_STRING
    }

    /// Whether values of this type are written bare (unquoted) in the compact form
    pub fn is_bare(&self) -> bool {
        self.is_xsd_integer() || self.is_xsd_boolean()
    }
}

impl std::fmt::Display for Datatype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_iri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datatype_constructors() {
        assert_eq!(Datatype::xsd_string().as_iri(), iri::XSD_STRING);
        assert_eq!(Datatype::xsd_boolean().as_iri(), iri::XSD_BOOLEAN);
        assert_eq!(Datatype::xsd_integer().as_iri(), iri::XSD_INTEGER);
        assert_eq!(Datatype::xsd_decimal().as_iri(), iri::XSD_DECIMAL);
        assert_eq!(Datatype::xsd_double().as_iri(), iri::XSD_DOUBLE);
        assert_eq!(Datatype::rdf_lang_string().as_iri(), iri::RDF_LANG_STRING);
    }

    #[test]
    fn test_is_checks() {
        assert!(Datatype::xsd_string().is_xsd_string());
        assert!(!Datatype::xsd_integer().is_xsd_string());
        assert!(Datatype::rdf_lang_string().is_lang_string());

        assert!(Datatype::xsd_integer().is_bare());
        assert!(Datatype::xsd_boolean().is_bare());
        assert!(!Datatype::xsd_decimal().is_bare());
        assert!(!Datatype::from_iri("http://www.w3.org/2001/XMLSchema#float").is_bare());
    }

    #[test]
    fn test_datatype_equality() {
        assert_eq!(
            Datatype::from_iri(iri::XSD_INTEGER),
            Datatype::xsd_integer()
        );
        assert_ne!(Datatype::xsd_string(), Datatype::xsd_integer());
    }
}
