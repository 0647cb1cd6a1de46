//! Avatar Utilities
//!
//! URL formatting for user avatars served from the provider CDN.

/// CDN base for avatar images.
const AVATAR_BASE_URL: &str = "https://avatars.yandex.net/get-yapic";

/// Known avatar size tokens.
///
/// The formatting function does not validate its `size` argument; an
/// unknown token is passed through unchanged. This enumeration covers the
/// documented sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AvatarSize {
    /// 28x28.
    IslandsSmall,
    /// 34x34.
    Islands34,
    /// 42x42.
    IslandsMiddle,
    /// 50x50.
    Islands50,
    /// 56x56.
    IslandsRetinaSmall,
    /// 68x68.
    Islands68,
    /// 75x75.
    Islands75,
    /// 84x84.
    IslandsRetinaMiddle,
    /// 100x100.
    IslandsRetina50,
    /// 200x200.
    #[default]
    Islands200,
}

impl AvatarSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IslandsSmall => "islands-small",
            Self::Islands34 => "islands-34",
            Self::IslandsMiddle => "islands-middle",
            Self::Islands50 => "islands-50",
            Self::IslandsRetinaSmall => "islands-retina-small",
            Self::Islands68 => "islands-68",
            Self::Islands75 => "islands-75",
            Self::IslandsRetinaMiddle => "islands-retina-middle",
            Self::IslandsRetina50 => "islands-retina-50",
            Self::Islands200 => "islands-200",
        }
    }
}

impl std::fmt::Display for AvatarSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format an avatar URL for the given avatar ID and size token.
pub fn avatar_url(avatar_id: &str, size: &str) -> String {
    format!("{AVATAR_BASE_URL}/{avatar_id}/{size}")
}
