//! Commit payload assembly.

use super::oid::Oid;

/// A signature for an author or committer.
///
/// Name, email, timestamp and timezone are caller-supplied values; the
/// library never reads ambient process state, so commit assembly stays pure
/// and testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// The name of the person.
    name: String,
    /// The email address.
    email: String,
    /// Unix timestamp (seconds since epoch).
    timestamp: i64,
    /// Timezone offset in minutes (e.g., +0900 = 540, -0500 = -300).
    tz_offset: i32,
}

impl Signature {
    /// Creates a new Signature.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the person.
    /// * `email` - The email address.
    /// * `timestamp` - Unix timestamp (seconds since epoch).
    /// * `tz_offset` - Timezone offset in minutes.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        timestamp: i64,
        tz_offset: i32,
    ) -> Self {
        Signature {
            name: name.into(),
            email: email.into(),
            timestamp,
            tz_offset,
        }
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the Unix timestamp.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Returns the timezone offset in minutes.
    pub fn tz_offset(&self) -> i32 {
        self.tz_offset
    }

    /// Formats the timezone offset as `<sign><HH><MM>`.
    pub fn format_tz(&self) -> String {
        let (sign, offset) = if self.tz_offset < 0 {
            ('-', -self.tz_offset)
        } else {
            ('+', self.tz_offset)
        };
        format!("{}{:02}{:02}", sign, offset / 60, offset % 60)
    }

    /// Formats the full signature line value:
    /// `<name> <<email>> <timestamp> <tz>`.
    pub fn format(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp,
            self.format_tz()
        )
    }
}

/// Assembles a commit payload from its parts.
///
/// Produces the UTF-8 text block:
///
/// ```text
/// tree <hex>
/// parent <hex>        (only when a parent is supplied)
/// author <signature>
/// committer <signature>
///
/// <message>
/// ```
///
/// The message is treated as opaque UTF-8; a trailing newline is always
/// appended here, never required of the caller. Persisting the result is one
/// `ObjectStore::put` of a commit object.
pub fn format_commit(
    tree: &Oid,
    parent: Option<&Oid>,
    author: &Signature,
    committer: &Signature,
    message: &str,
) -> Vec<u8> {
    let mut content = String::new();

    content.push_str(&format!("tree {}\n", tree.to_hex()));

    // Root commits omit the parent line
    if let Some(parent) = parent {
        content.push_str(&format!("parent {}\n", parent.to_hex()));
    }

    content.push_str(&format!("author {}\n", author.format()));
    content.push_str(&format!("committer {}\n", committer.format()));

    content.push('\n');
    content.push_str(message);
    content.push('\n');

    content.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";
    const PARENT: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";

    fn sig() -> Signature {
        Signature::new("Jane Doe", "jane@example.com", 1234567890, 540)
    }

    // CM-001: Timezone formatting covers positive, negative and zero offsets
    #[test]
    fn test_format_tz() {
        assert_eq!(Signature::new("a", "b", 0, 540).format_tz(), "+0900");
        assert_eq!(Signature::new("a", "b", 0, 330).format_tz(), "+0530");
        assert_eq!(Signature::new("a", "b", 0, -330).format_tz(), "-0530");
        assert_eq!(Signature::new("a", "b", 0, 0).format_tz(), "+0000");
    }

    // CM-002: Signature line value layout
    #[test]
    fn test_format_signature() {
        assert_eq!(
            sig().format(),
            "Jane Doe <jane@example.com> 1234567890 +0900"
        );
    }

    // CM-003: Root commit payload omits the parent line
    #[test]
    fn test_format_commit_root() {
        let tree = Oid::from_hex(TREE).unwrap();
        let payload = format_commit(&tree, None, &sig(), &sig(), "init");

        let expected = format!(
            "tree {}\nauthor {}\ncommitter {}\n\ninit\n",
            TREE,
            sig().format(),
            sig().format()
        );
        assert_eq!(payload, expected.as_bytes());
    }

    // CM-004: The parent line is emitted when a parent is supplied
    #[test]
    fn test_format_commit_with_parent() {
        let tree = Oid::from_hex(TREE).unwrap();
        let parent = Oid::from_hex(PARENT).unwrap();
        let payload = format_commit(&tree, Some(&parent), &sig(), &sig(), "second");

        let text = String::from_utf8(payload).unwrap();
        assert!(text.contains(&format!("parent {}\n", PARENT)));
        assert!(text.starts_with(&format!("tree {}\n", TREE)));
    }

    // CM-005: The trailing newline is always appended
    #[test]
    fn test_trailing_newline() {
        let tree = Oid::from_hex(TREE).unwrap();
        let payload = format_commit(&tree, None, &sig(), &sig(), "no newline here");
        assert_eq!(payload.last(), Some(&b'\n'));
    }

    // CM-006: Multi-line messages are carried verbatim
    #[test]
    fn test_multiline_message() {
        let tree = Oid::from_hex(TREE).unwrap();
        let message = "subject\n\nbody line one\nbody line two";
        let payload = format_commit(&tree, None, &sig(), &sig(), message);

        let text = String::from_utf8(payload).unwrap();
        assert!(text.ends_with("\n\nsubject\n\nbody line one\nbody line two\n"));
    }

    // CM-007: Author and committer may differ
    #[test]
    fn test_distinct_author_committer() {
        let tree = Oid::from_hex(TREE).unwrap();
        let author = Signature::new("Author", "a@example.com", 1000, 0);
        let committer = Signature::new("Committer", "c@example.com", 2000, 60);
        let payload = format_commit(&tree, None, &author, &committer, "msg");

        let text = String::from_utf8(payload).unwrap();
        assert!(text.contains("author Author <a@example.com> 1000 +0000\n"));
        assert!(text.contains("committer Committer <c@example.com> 2000 +0100\n"));
    }
}
