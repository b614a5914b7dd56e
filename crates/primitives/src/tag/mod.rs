//! Hierarchical dotted identifiers.
//!
//! A [`Tag`] such as `Character.Health.Max` is a non-empty sequence of
//! segments. Its ancestors are derived by dropping trailing segments, so
//! `Character.Health.Max` -> `Character.Health` -> `Character`.

use std::sync::Arc;

use smallvec::SmallVec;


/// Why a piece of text was rejected as a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTagReason {
	/// The text was empty or only whitespace.
	#[error("tag is empty")]
	Empty,
	/// A segment between dots was empty (leading, trailing or doubled dot).
	#[error("segment {index} is empty")]
	EmptySegment { index: usize },
	/// A segment contained whitespace or a control character.
	#[error("segment {index} contains invalid character {ch:?}")]
	InvalidCharacter { index: usize, ch: char },
}

/// Error returned when text cannot be parsed into a [`Tag`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid tag {input:?}: {reason}")]
pub struct InvalidTag {
	input: Box<str>,
	reason: InvalidTagReason,
}

impl InvalidTag {
	fn new(input: &str, reason: InvalidTagReason) -> Self {
		Self {
			input: input.into(),
			reason,
		}
	}

	/// The text that failed to parse.
	pub fn input(&self) -> &str {
		&self.input
	}

	/// The reason the text was rejected.
	pub fn reason(&self) -> InvalidTagReason {
		self.reason
	}
}

/// An immutable, hierarchical, dot-separated identifier.
///
/// Equality, ordering and hashing follow the normalized text, which is the
/// same as comparing the segment sequence exactly. Cloning is cheap.
#[derive(Clone)]
pub struct Tag {
	text: Arc<str>,
	/// Byte offset one past the end of each segment.
	ends: SmallVec<[usize; 4]>,
}

impl Tag {
	/// Parses and normalizes `text` into a tag.
	///
	/// Surrounding whitespace is trimmed. Empty text, empty segments and
	/// segments containing whitespace or control characters are rejected.
	pub fn parse(text: &str) -> Result<Self, InvalidTag> {
		let trimmed = text.trim();
		if trimmed.is_empty() {
			return Err(InvalidTag::new(text, InvalidTagReason::Empty));
		}

		let mut ends = SmallVec::new();
		let mut offset = 0;
		for (index, segment) in trimmed.split('.').enumerate() {
			if segment.is_empty() {
				return Err(InvalidTag::new(text, InvalidTagReason::EmptySegment { index }));
			}
			if let Some(ch) = segment.chars().find(|c| c.is_whitespace() || c.is_control()) {
				return Err(InvalidTag::new(text, InvalidTagReason::InvalidCharacter { index, ch }));
			}
			offset += segment.len();
			ends.push(offset);
			offset += 1;
		}

		Ok(Self {
			text: Arc::from(trimmed),
			ends,
		})
	}

	/// Returns the normalized dotted text.
	#[inline]
	pub fn as_str(&self) -> &str {
		&self.text
	}

	/// Number of segments (a root tag has depth 1).
	#[inline]
	pub fn depth(&self) -> usize {
		self.ends.len()
	}

	/// Returns true if the tag has a single segment.
	#[inline]
	pub fn is_root(&self) -> bool {
		self.ends.len() == 1
	}

	/// Iterates the segments from root to leaf.
	pub fn segments(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
		self.text.split('.')
	}

	/// Returns the last segment.
	pub fn leaf(&self) -> &str {
		let start = match self.ends.len() {
			0 | 1 => 0,
			n => self.ends[n - 2] + 1,
		};
		&self.text[start..]
	}

	/// Returns the tag with its last segment removed, or `None` for a root tag.
	pub fn parent(&self) -> Option<Tag> {
		let depth = self.depth();
		(depth > 1).then(|| self.truncated(depth - 1))
	}

	/// Iterates this tag followed by each ancestor up to the root.
	pub fn ancestors(&self) -> Ancestors<'_> {
		Ancestors {
			tag: self,
			remaining: self.depth(),
		}
	}

	/// Returns true if `self` lies strictly below `other`.
	pub fn is_descendant_of(&self, other: &Tag) -> bool {
		self.depth() > other.depth()
			&& self.text.starts_with(other.as_str())
			&& self.text.as_bytes()[other.text.len()] == b'.'
	}

	/// Returns true if `self` equals `other` or lies below it.
	pub fn matches(&self, other: &Tag) -> bool {
		self == other || self.is_descendant_of(other)
	}

	/// Keeps the first `depth` segments. `depth` must be in `1..=self.depth()`.
	fn truncated(&self, depth: usize) -> Tag {
		if depth == self.depth() {
			return self.clone();
		}
		let end = self.ends[depth - 1];
		Tag {
			text: Arc::from(&self.text[..end]),
			ends: self.ends[..depth].iter().copied().collect(),
		}
	}
}

/// Iterator over a tag and its ancestors, most specific first.
///
/// Created by [`Tag::ancestors`].
pub struct Ancestors<'a> {
	tag: &'a Tag,
	remaining: usize,
}

impl Iterator for Ancestors<'_> {
	type Item = Tag;

	fn next(&mut self) -> Option<Tag> {
		if self.remaining == 0 {
			return None;
		}
		let tag = self.tag.truncated(self.remaining);
		self.remaining -= 1;
		Some(tag)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl ExactSizeIterator for Ancestors<'_> {}

impl PartialEq for Tag {
	fn eq(&self, other: &Self) -> bool {
		self.text == other.text
	}
}

impl Eq for Tag {}

impl PartialOrd for Tag {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Tag {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.text.cmp(&other.text)
	}
}

impl std::hash::Hash for Tag {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.text.hash(state);
	}
}

impl core::fmt::Debug for Tag {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_tuple("Tag").field(&&*self.text).finish()
	}
}

impl core::fmt::Display for Tag {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(&self.text)
	}
}

impl AsRef<str> for Tag {
	fn as_ref(&self) -> &str {
		&self.text
	}
}

impl std::str::FromStr for Tag {
	type Err = InvalidTag;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Tag::parse(s)
	}
}

impl TryFrom<&str> for Tag {
	type Error = InvalidTag;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		Tag::parse(value)
	}
}

impl TryFrom<String> for Tag {
	type Error = InvalidTag;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Tag::parse(&value)
	}
}

impl serde::Serialize for Tag {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.text)
	}
}

impl<'de> serde::Deserialize<'de> for Tag {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
		Tag::parse(&text).map_err(serde::de::Error::custom)
	}
}
