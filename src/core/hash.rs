//! Content-based dataset fingerprinting

use xxhash_rust::xxh3::xxh3_64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetHash(String);

impl DatasetHash {
	pub fn of_bytes(bytes: &[u8]) -> Self {
		Self(format!("{:016x}", xxh3_64(bytes)))
	}

	pub fn from_hex(hex: impl Into<String>) -> Self {
		Self(hex.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn short(&self) -> &str {
		self.0.get(..8).unwrap_or(&self.0)
	}
}

impl std::fmt::Display for DatasetHash {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hash_is_stable_hex() {
		let a = DatasetHash::of_bytes(b"rows");
		let b = DatasetHash::of_bytes(b"rows");
		assert_eq!(a, b);
		assert_eq!(a.as_str().len(), 16);
		assert_eq!(a.short().len(), 8);
		assert_ne!(a, DatasetHash::of_bytes(b"rows2"));
		assert_eq!(DatasetHash::from_hex(a.as_str()), a);
	}
}
