//! Item roles

/// Role of a switcher item: what a query asks for, and what an element is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Link,
    Content,
    Both,
}

impl ItemKind {
    /// Role of an element from the marker attributes it carries
    pub fn from_markers(is_link: bool, is_content: bool) -> Option<Self> {
        match (is_link, is_content) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::Link),
            (false, true) => Some(Self::Content),
            (false, false) => None,
        }
    }

    #[inline]
    pub fn includes_links(self) -> bool {
        matches!(self, Self::Link | Self::Both)
    }

    #[inline]
    pub fn includes_contents(self) -> bool {
        matches!(self, Self::Content | Self::Both)
    }

    /// Whether the two role sets share a role
    pub fn overlaps(self, other: ItemKind) -> bool {
        (self.includes_links() && other.includes_links())
            || (self.includes_contents() && other.includes_contents())
    }
}
