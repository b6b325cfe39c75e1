//! Text and path helpers shared by the assembler and the CLI.

use std::path::{Component, Path, PathBuf};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left unescaped in the path of a `file://` URI.
const URI_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Replace typographic apostrophes, collapse whitespace, and trim.
pub fn sanitize_text(text: &str) -> String {
    text.replace('\u{2019}', "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Capitalize each whitespace-separated word and lowercase the rest of it.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// `file://` URI for an absolute path.
pub fn file_uri(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    let text = if text.starts_with('/') {
        text
    } else {
        format!("/{text}")
    };
    format!("file://{}", utf8_percent_encode(&text, URI_PATH))
}

/// Make `path` absolute against the current directory and drop `.`/`..`
/// components lexically.
pub fn absolutize(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// The user's home and Documents folders, which anchor the relative paths
/// stored alongside media URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPaths {
    pub home: PathBuf,
    pub documents: PathBuf,
}

impl UserPaths {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let documents = home.join("Documents");
        Self { home, documents }
    }

    /// Paths of the current user, if a home directory can be determined.
    pub fn detect() -> Option<Self> {
        let dirs = directories::UserDirs::new()?;
        let home = dirs.home_dir().to_path_buf();
        let documents = dirs
            .document_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| home.join("Documents"));
        Some(Self { home, documents })
    }

    /// Expand a leading `~` or `~/`.
    pub fn expand_tilde(&self, raw: &str) -> PathBuf {
        if raw == "~" {
            self.home.clone()
        } else if let Some(rest) = raw.strip_prefix("~/") {
            self.home.join(rest)
        } else {
            PathBuf::from(raw)
        }
    }

    /// `path` relative to the Documents folder, slash-separated.
    pub fn documents_relative(&self, path: &Path) -> Option<String> {
        relative_slash_path(path, &self.documents)
    }

    /// `path` relative to the home folder, slash-separated.
    pub fn home_relative(&self, path: &Path) -> Option<String> {
        relative_slash_path(path, &self.home)
    }
}

fn relative_slash_path(path: &Path, root: &Path) -> Option<String> {
    let rest = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rest
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("  It\u{2019}s   a \t new day "), "It's a new day");
        assert_eq!(sanitize_text("   "), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("verse 2a"), "Verse 2a");
        assert_eq!(title_case("PRE  chorus"), "Pre Chorus");
    }

    #[test]
    fn test_file_uri_escapes_spaces() {
        let uri = file_uri(Path::new("/Users/me/Media/Slow Waves #2.mov"));
        assert_eq!(uri, "file:///Users/me/Media/Slow%20Waves%20%232.mov");
    }

    #[test]
    fn test_user_paths_relative() {
        let paths = UserPaths::new("/Users/me");
        let media = Path::new("/Users/me/Documents/ProPresenter/Media/loop.mp4");
        assert_eq!(
            paths.documents_relative(media).as_deref(),
            Some("ProPresenter/Media/loop.mp4")
        );
        assert_eq!(paths.documents_relative(Path::new("/tmp/loop.mp4")), None);
        assert_eq!(
            paths.home_relative(Path::new("/Users/me/Movies/loop.mp4")).as_deref(),
            Some("Movies/loop.mp4")
        );
    }

    #[test]
    fn test_expand_tilde() {
        let paths = UserPaths::new("/Users/me");
        assert_eq!(paths.expand_tilde("~/a.mov"), PathBuf::from("/Users/me/a.mov"));
        assert_eq!(paths.expand_tilde("/abs/a.mov"), PathBuf::from("/abs/a.mov"));
    }

    #[test]
    fn test_absolutize_drops_dot_segments() {
        assert_eq!(absolutize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
    }
}
