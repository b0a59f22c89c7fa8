use std::fmt;
use std::str::FromStr;

use crate::error::CryptoError;

macro_rules! content_id {
    ($name:ident) => {
        #[doc = concat!(
            "A 16-byte ",
            stringify!($name),
            " as used throughout the CASC read path.\n\n",
            "The all-zero value is used by several on-disk formats as a\n",
            "sentinel for \"absent\"; [`",
            stringify!($name),
            "::is_zero`] exposes that without callers re-deriving it."
        )]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; 16]);

        impl $name {
            /// Number of bytes a full key occupies on disk.
            pub const LEN: usize = 16;

            /// Wrap raw bytes without any validation.
            #[must_use]
            pub const fn from_bytes(bytes: [u8; 16]) -> Self {
                Self(bytes)
            }

            /// Borrow the underlying bytes.
            #[must_use]
            pub const fn as_bytes(&self) -> &[u8; 16] {
                &self.0
            }

            /// Truncate to the 9-byte prefix used by `.idx` lookups.
            #[must_use]
            pub fn as_prefix9(&self) -> [u8; 9] {
                let mut out = [0u8; 9];
                out.copy_from_slice(&self.0[..9]);
                out
            }

            /// Whether this key is the all-zero sentinel value.
            #[must_use]
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|&b| b == 0)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = CryptoError;

            fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
                if value.len() != Self::LEN {
                    return Err(CryptoError::InvalidLength {
                        expected: Self::LEN,
                        actual: value.len(),
                    });
                }
                let mut bytes = [0u8; 16];
                bytes.copy_from_slice(value);
                Ok(Self(bytes))
            }
        }

        impl FromStr for $name {
            type Err = CryptoError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let decoded = hex::decode(s)?;
                Self::try_from(decoded.as_slice())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(self.0))
            }
        }
    };
}

content_id!(ContentHash);
content_id!(ContentKey);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_malformed_hex_length() {
        let err = "00112233445566778899aabbccddeeff0011"
            .parse::<ContentKey>()
            .unwrap_err();
        assert!(matches!(err, CryptoError::InvalidLength { expected: 16, .. }));
    }

    #[test]
    fn parses_valid_hex() {
        let hex_str = "00112233445566778899aabbccddeeff";
        let key: ContentKey = hex_str.parse().unwrap();
        assert_eq!(key.to_string(), hex_str);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = ContentHash::try_from([0u8; 4].as_slice()).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidLength { expected: 16, actual: 4 }));
    }

    #[test]
    fn zero_key_is_zero() {
        assert!(ContentKey::from_bytes([0u8; 16]).is_zero());
        assert!(!ContentKey::from_bytes([1u8; 16]).is_zero());
    }

    #[test]
    fn prefix9_takes_leading_bytes() {
        let mut bytes = [0u8; 16];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        let key = ContentKey::from_bytes(bytes);
        assert_eq!(key.as_prefix9(), [0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn ordering_is_bytewise() {
        let a = ContentKey::from_bytes([0u8; 16]);
        let mut high = [0u8; 16];
        high[0] = 1;
        let b = ContentKey::from_bytes(high);
        assert!(a < b);
    }
}
