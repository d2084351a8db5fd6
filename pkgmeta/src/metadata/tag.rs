//! Recognized child tags of `<package>`.

/// A tag with structured meaning in format 3 metadata.
///
/// Any tag not listed here is either kept as generic metadata (leaf
/// elements) or left in the document tree only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Name,
    Version,
    Description,
    Maintainer,
    License,
    Url,
    Author,
    Depend,
    Conflict,
    Replace,
}

impl TagKind {
    pub const ALL: [TagKind; 10] = [
        TagKind::Name,
        TagKind::Version,
        TagKind::Description,
        TagKind::Maintainer,
        TagKind::License,
        TagKind::Url,
        TagKind::Author,
        TagKind::Depend,
        TagKind::Conflict,
        TagKind::Replace,
    ];

    /// Look up a tag by its exact, case-sensitive name.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TagKind::Name => "name",
            TagKind::Version => "version",
            TagKind::Description => "description",
            TagKind::Maintainer => "maintainer",
            TagKind::License => "license",
            TagKind::Url => "url",
            TagKind::Author => "author",
            TagKind::Depend => "depend",
            TagKind::Conflict => "conflict",
            TagKind::Replace => "replace",
        }
    }
}
