//! RDF vocabulary constants for the n3s crates
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)
//! - `log` - N3 log vocabulary (http://www.w3.org/2000/10/swap/log#)
//! - `owl` - OWL vocabulary (http://www.w3.org/2002/07/owl#)

/// RDF vocabulary constants
pub mod rdf {
    /// RDF namespace
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

    /// rdf:first IRI (RDF list head)
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";

    /// rdf:rest IRI (RDF list tail)
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";

    /// rdf:nil IRI (RDF list terminator)
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
}

/// XSD vocabulary constants
pub mod xsd {
    /// XSD namespace
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:decimal IRI
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:float IRI
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
}

/// N3 log vocabulary constants
pub mod log {
    /// log namespace
    pub const NS: &str = "http://www.w3.org/2000/10/swap/log#";

    /// log:implies IRI (`=>` and `<=` in N3)
    pub const IMPLIES: &str = "http://www.w3.org/2000/10/swap/log#implies";
}

/// OWL vocabulary constants
pub mod owl {
    /// owl:sameAs IRI (`=` in N3)
    pub const SAME_AS: &str = "http://www.w3.org/2002/07/owl#sameAs";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_terms_share_rdf_namespace() {
        for iri in [rdf::FIRST, rdf::REST, rdf::NIL] {
            assert!(iri.starts_with(rdf::NS));
        }
    }

    #[test]
    fn test_xsd_terms_share_xsd_namespace() {
        for iri in [xsd::STRING, xsd::BOOLEAN, xsd::INTEGER, xsd::DECIMAL, xsd::DOUBLE] {
            assert!(iri.starts_with(xsd::NS));
        }
    }
}
