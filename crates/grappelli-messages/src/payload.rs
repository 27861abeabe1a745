//! Input accepted by [`FlashStore::add`](crate::store::FlashStore::add)

use indexmap::IndexMap;

/// A single message or a collection of messages to stage.
///
/// The list form keeps positional (indexed) keys, the map form keeps its
/// string keys; both shapes end up in the same entry collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
	Text(String),
	List(Vec<String>),
	Map(IndexMap<String, String>),
}

impl From<&str> for Payload {
	fn from(text: &str) -> Self {
		Payload::Text(text.to_string())
	}
}

impl From<String> for Payload {
	fn from(text: String) -> Self {
		Payload::Text(text)
	}
}

impl From<Vec<String>> for Payload {
	fn from(list: Vec<String>) -> Self {
		Payload::List(list)
	}
}

impl From<Vec<&str>> for Payload {
	fn from(list: Vec<&str>) -> Self {
		Payload::List(list.into_iter().map(str::to_string).collect())
	}
}

impl<const N: usize> From<[&str; N]> for Payload {
	fn from(list: [&str; N]) -> Self {
		Payload::List(list.iter().map(|text| text.to_string()).collect())
	}
}

impl From<IndexMap<String, String>> for Payload {
	fn from(map: IndexMap<String, String>) -> Self {
		Payload::Map(map)
	}
}

impl<const N: usize> From<[(&str, &str); N]> for Payload {
	fn from(pairs: [(&str, &str); N]) -> Self {
		Payload::Map(
			pairs
				.iter()
				.map(|(key, value)| (key.to_string(), value.to_string()))
				.collect(),
		)
	}
}
