//! The Siwar endpoint table.
//!
//! Paths are service-relative and keyed by access type and operation. The
//! lexicon listing only exists on the public side.

use std::fmt;

/// Visibility scope of a lexicon or operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Access {
    #[default]
    Public,
    Private,
}

impl Access {
    pub fn as_str(self) -> &'static str {
        match self {
            Access::Public => "public",
            Access::Private => "private",
        }
    }

    pub fn is_private(self) -> bool {
        self == Access::Private
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logical Siwar operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Search,
    Lexicons,
    Senses,
    Examples,
    Synonyms,
    Opposites,
    Pos,
    Root,
    Pattern,
    Conjugations,
}

impl Endpoint {
    pub const ALL: [Endpoint; 10] = [
        Endpoint::Search,
        Endpoint::Lexicons,
        Endpoint::Senses,
        Endpoint::Examples,
        Endpoint::Synonyms,
        Endpoint::Opposites,
        Endpoint::Pos,
        Endpoint::Root,
        Endpoint::Pattern,
        Endpoint::Conjugations,
    ];

    /// Last path segment of the endpoint.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Search => "search",
            Endpoint::Lexicons => "lexicons",
            Endpoint::Senses => "senses",
            Endpoint::Examples => "examples",
            Endpoint::Synonyms => "synonyms",
            Endpoint::Opposites => "opposites",
            Endpoint::Pos => "pos",
            Endpoint::Root => "root",
            Endpoint::Pattern => "pattern",
            Endpoint::Conjugations => "conjugations",
        }
    }

    /// Service-relative path, or `None` if the operation has no variant for
    /// this access type.
    pub fn path(self, access: Access) -> Option<&'static str> {
        use Access::*;
        use Endpoint::*;

        let path = match (access, self) {
            (Public, Search) => "/api/v1/external/public/search",
            (Private, Search) => "/api/v1/external/private/search",
            (Public, Lexicons) => "/api/v1/external/public/lexicons",
            (Private, Lexicons) => return None,
            (Public, Senses) => "/api/v1/external/public/senses",
            (Private, Senses) => "/api/v1/external/private/senses",
            (Public, Examples) => "/api/v1/external/public/examples",
            (Private, Examples) => "/api/v1/external/private/examples",
            (Public, Synonyms) => "/api/v1/external/public/synonyms",
            (Private, Synonyms) => "/api/v1/external/private/synonyms",
            (Public, Opposites) => "/api/v1/external/public/opposites",
            (Private, Opposites) => "/api/v1/external/private/opposites",
            (Public, Pos) => "/api/v1/external/public/pos",
            (Private, Pos) => "/api/v1/external/private/pos",
            (Public, Root) => "/api/v1/external/public/root",
            (Private, Root) => "/api/v1/external/private/root",
            (Public, Pattern) => "/api/v1/external/public/pattern",
            (Private, Pattern) => "/api/v1/external/private/pattern",
            (Public, Conjugations) => "/api/v1/external/public/conjugations",
            (Private, Conjugations) => "/api/v1/external/private/conjugations",
        };
        Some(path)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
