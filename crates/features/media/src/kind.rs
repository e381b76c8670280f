/// Which allow-list an upload endpoint enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// Pictures for sliders, promotions, banners and logos.
    Image,
    /// Favicons.
    Icon,
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];
const ICON_EXTENSIONS: &[&str] = &["ico", "png", "svg"];

impl UploadKind {
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Image => IMAGE_EXTENSIONS,
            Self::Icon => ICON_EXTENSIONS,
        }
    }

    #[must_use]
    pub fn allows(self, extension: &str) -> bool {
        self.extensions().contains(&extension)
    }
}

/// Lowercased extension of `file_name`, if it has one.
pub(crate) fn extension(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let (stem, ext) = base.rsplit_once('.')?;
    (!stem.is_empty() && !ext.is_empty()).then(|| ext.to_ascii_lowercase())
}

pub(crate) fn content_type(extension: &str) -> &'static str {
    match extension {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_lowercased() {
        assert_eq!(extension("Banner.JPG").as_deref(), Some("jpg"));
        assert_eq!(extension("C:\\pics\\logo.final.Png").as_deref(), Some("png"));
    }

    #[test]
    fn names_without_extension_are_rejected() {
        assert_eq!(extension("README"), None);
        assert_eq!(extension(".png"), None);
        assert_eq!(extension("image."), None);
    }

    #[test]
    fn allow_lists_differ_per_kind() {
        assert!(UploadKind::Image.allows("webp"));
        assert!(!UploadKind::Image.allows("ico"));
        assert!(UploadKind::Icon.allows("ico"));
        assert!(!UploadKind::Icon.allows("gif"));
        assert_eq!(content_type("svg"), "image/svg+xml");
    }
}
