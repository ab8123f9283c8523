//! Useful macros for implementing Camino types

#[macro_export]
/// Implement `serde::Serialize` and `serde::Deserialize` by passing through to the hex
/// `ByteFormat` encoding.
macro_rules! impl_hex_serde {
    ($item:ty) => {
        impl serde::Serialize for $item {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                let s = $crate::ser::ByteFormat::serialize_hex(self)
                    .map_err(|e| serde::ser::Error::custom(e.to_string()))?;
                serializer.serialize_str(&format!("0x{}", s))
            }
        }

        impl<'de> serde::Deserialize<'de> for $item {
            fn deserialize<D>(deserializer: D) -> Result<$item, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s: String = serde::Deserialize::deserialize(deserializer)?;
                <$item as $crate::ser::ByteFormat>::deserialize_hex(&s)
                    .map_err(|e| serde::de::Error::custom(e.to_string()))
            }
        }
    };
}

#[macro_export]
/// Implement `serde::Serialize` and `serde::Deserialize` by passing through to `Display` and
/// `FromStr`.
macro_rules! impl_string_serde {
    ($item:ty) => {
        impl serde::Serialize for $item {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $item {
            fn deserialize<D>(deserializer: D) -> Result<$item, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s: String = serde::Deserialize::deserialize(deserializer)?;
                s.parse::<$item>()
                    .map_err(|e| serde::de::Error::custom(e.to_string()))
            }
        }
    };
}

#[macro_export]
/// Make a new fixed-length byte identifier, serialized raw (no length prefix) by the codec.
macro_rules! mark_bytes {
    (
        $(#[$outer:meta])*
        $name:ident, $len:expr
    ) => {
        $(#[$outer])*
        #[derive(Copy, Clone, Default, Hash, Eq, PartialEq, PartialOrd, Ord)]
        pub struct $name([u8; $len]);

        impl $name {
            /// The byte-length of this identifier
            pub const LEN: usize = $len;

            /// Wrap raw bytes
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Return a reference to the underlying bytes
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Copy the identifier out of a slice of exactly `LEN` bytes.
            pub fn from_slice(v: &[u8]) -> $crate::enc::EncodingResult<Self> {
                if v.len() != $len {
                    return Err($crate::enc::EncodingError::InvalidSize {
                        expected: $len,
                        got: v.len(),
                    });
                }
                let mut buf = [0u8; $len];
                buf.copy_from_slice(v);
                Ok(Self(buf))
            }

            /// True if every byte is zero
            pub fn is_empty(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl From<$name> for [u8; $len] {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0[..]
            }
        }

        impl $crate::ser::ByteFormat for $name {
            type Error = $crate::ser::SerError;

            fn serialized_length(&self) -> usize {
                $len
            }

            fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
            where
                R: std::io::Read,
            {
                Ok(Self($crate::ser::read_array(reader)?))
            }

            fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
            where
                W: std::io::Write,
            {
                writer.write_all(&self.0)?;
                Ok($len)
            }
        }
    };
}

#[macro_export]
/// Give a `mark_bytes!` identifier a cb58 `Display`, `Debug` and `FromStr`, and string serde.
macro_rules! impl_cb58_text {
    ($name:ident) => {
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::enc::encode_cb58(&self.0))
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::enc::EncodingError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_slice(&$crate::enc::decode_cb58(s)?)
            }
        }

        $crate::impl_string_serde!($name);
    };
}
