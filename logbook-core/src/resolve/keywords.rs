//! Keyword extraction from project paths
//!
//! The log directory name is a lossy encoding of the project path (path
//! separators and non-alphanumerics collapse to `-`). We cannot invert it,
//! so a project path is reduced to ASCII keyword tokens plus a required
//! name prefix, and directories are matched against those.

/// Path syntax convention of the running platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    /// Drive letter and backslashes; directory names start with `{DRIVE}--`
    Windows,
    /// Leading slash; directory names start with `-`
    Posix,
}

impl PathStyle {
    /// Style of the platform this binary runs on.
    pub fn native() -> Self {
        if cfg!(windows) {
            PathStyle::Windows
        } else {
            PathStyle::Posix
        }
    }
}

/// Matching input derived from one project path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathKeywords {
    pub style: PathStyle,
    /// Lowercased prefix every candidate name must start with, if any
    pub prefix: Option<String>,
    /// Keyword tokens in path order
    pub tokens: Vec<String>,
    /// Number of matchable segments (drive letter excluded)
    pub segment_count: usize,
}

impl PathKeywords {
    pub fn from_path(project_path: &str, style: PathStyle) -> Self {
        let normalized = project_path.replace('\\', "/");
        let mut raw = normalized.split('/').filter(|s| !s.is_empty()).peekable();

        let prefix = match style {
            PathStyle::Posix => Some("-".to_string()),
            PathStyle::Windows => match raw.peek().and_then(|s| drive_letter(s)) {
                Some(drive) => {
                    raw.next();
                    Some(format!("{}--", drive.to_ascii_lowercase()))
                }
                None => None,
            },
        };

        // Lexical normalization; `..` never climbs above the root or drive.
        let mut segments: Vec<&str> = Vec::new();
        for segment in raw {
            match segment {
                "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }

        let tokens = segments.iter().filter_map(|s| keyword_token(s)).collect();

        Self {
            style,
            prefix,
            tokens,
            segment_count: segments.len(),
        }
    }

    /// Whether a lowercased directory name satisfies the prefix check.
    pub fn accepts_prefix(&self, name_lower: &str) -> bool {
        self.prefix
            .as_deref()
            .map_or(true, |prefix| name_lower.starts_with(prefix))
    }

    /// Hyphen count expected in the directory name, for the depth fallback.
    pub fn expected_hyphens(&self) -> usize {
        match self.style {
            PathStyle::Windows => self.segment_count * 2,
            PathStyle::Posix => self.segment_count,
        }
    }
}

/// `C:` style drive segment.
fn drive_letter(segment: &str) -> Option<char> {
    let mut chars = segment.chars();
    let letter = chars.next().filter(|c| c.is_ascii_alphabetic())?;
    (chars.next() == Some(':') && chars.next().is_none()).then_some(letter)
}

/// Reduce one path segment to a keyword token.
///
/// Spaces and underscores become hyphens, ASCII alphanumerics are
/// lowercased, everything else is dropped. Returns `None` when no ASCII
/// alphanumeric survives.
pub fn keyword_token(segment: &str) -> Option<String> {
    let token: String = segment
        .chars()
        .filter_map(|c| match c {
            ' ' | '_' | '-' => Some('-'),
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            _ => None,
        })
        .collect();

    token
        .chars()
        .any(|c| c.is_ascii_alphanumeric())
        .then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_paths_keep_every_segment() {
        let kw = PathKeywords::from_path("/home/dev/My_Project", PathStyle::Posix);
        assert_eq!(kw.tokens, vec!["home", "dev", "my-project"]);
        assert_eq!(kw.prefix.as_deref(), Some("-"));
        assert_eq!(kw.segment_count, 3);
        assert_eq!(kw.expected_hyphens(), 3);
    }

    #[test]
    fn windows_paths_strip_the_drive() {
        let kw = PathKeywords::from_path(r"D:\Work\side project", PathStyle::Windows);
        assert_eq!(kw.tokens, vec!["work", "side-project"]);
        assert_eq!(kw.prefix.as_deref(), Some("d--"));
        assert_eq!(kw.segment_count, 2);
        assert_eq!(kw.expected_hyphens(), 4);
    }

    #[test]
    fn windows_without_drive_has_no_prefix() {
        let kw = PathKeywords::from_path("//server/share", PathStyle::Windows);
        assert_eq!(kw.prefix, None);
        assert!(kw.accepts_prefix("anything"));
        assert_eq!(kw.tokens, vec!["server", "share"]);
    }

    #[test]
    fn non_ascii_segments_are_dropped() {
        let kw = PathKeywords::from_path("/home/用户/项目abc", PathStyle::Posix);
        assert_eq!(kw.tokens, vec!["home", "abc"]);
        assert_eq!(kw.segment_count, 3);
    }

    #[test]
    fn fully_non_ascii_path_has_no_tokens() {
        let kw = PathKeywords::from_path("/文档/项目", PathStyle::Posix);
        assert!(kw.tokens.is_empty());
        assert_eq!(kw.expected_hyphens(), 2);
    }

    #[test]
    fn dot_segments_are_normalized() {
        let kw = PathKeywords::from_path("/home/dev/app/..", PathStyle::Posix);
        assert_eq!(kw.tokens, vec!["home", "dev"]);
        assert_eq!(kw.segment_count, 2);

        let kw = PathKeywords::from_path("/文档/.", PathStyle::Posix);
        assert_eq!(kw.segment_count, 1);
        assert_eq!(kw.expected_hyphens(), 1);

        let kw = PathKeywords::from_path("/home/./dev/x/../app", PathStyle::Posix);
        assert_eq!(kw.tokens, vec!["home", "dev", "app"]);
    }

    #[test]
    fn parent_segments_stop_at_the_drive() {
        let kw = PathKeywords::from_path(r"C:\..\..\work", PathStyle::Windows);
        assert_eq!(kw.prefix.as_deref(), Some("c--"));
        assert_eq!(kw.tokens, vec!["work"]);
        assert_eq!(kw.segment_count, 1);
    }

    #[test]
    fn token_cleaning_rules() {
        assert_eq!(keyword_token("Hello World"), Some("hello-world".to_string()));
        assert_eq!(keyword_token("a.b+c"), Some("abc".to_string()));
        assert_eq!(keyword_token("中文 文档"), None);
        assert_eq!(keyword_token("v2-final"), Some("v2-final".to_string()));
    }

    #[test]
    fn drive_letters() {
        assert_eq!(drive_letter("c:"), Some('c'));
        assert_eq!(drive_letter("C:x"), None);
        assert_eq!(drive_letter("1:"), None);
        assert_eq!(drive_letter("home"), None);
    }
}
