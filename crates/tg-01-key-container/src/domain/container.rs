//! # OpenSSH Ed25519 Containers
//!
//! Extracts raw key bytes from the `openssh-key-v1` private key container and
//! from the public key blob, for unencrypted Ed25519 keys only.
//!
//! ## Private container layout
//!
//! ```text
//! "openssh-key-v1\0"
//! string  cipher            "none"
//! string  kdf               "none"
//! string  kdf options       ""
//! u32     key count         1
//! string  public key blob
//! string  private section:
//!     u32 checkint, u32 checkint
//!     string key type       "ssh-ed25519"
//!     string public key     32 bytes
//!     string private key    64 bytes (seed || public)
//!     string comment
//!     padding
//! ```

use tracing::debug;
use zeroize::Zeroizing;

use super::errors::KeyContainerError;
use super::wire::WireReader;

/// Container magic preamble, NUL included.
pub const OPENSSH_MAGIC: &[u8; 15] = b"openssh-key-v1\0";

/// The only supported key type.
pub const ED25519_KEY_TYPE: &str = "ssh-ed25519";

/// Raw Ed25519 public key length.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Raw Ed25519 private key length (seed followed by public key).
pub const PRIVATE_KEY_SIZE: usize = 64;

const NO_ENCRYPTION: &[u8] = b"none";

/// Everything recovered from an unencrypted private container.
pub struct PrivateContainer {
    /// Public key from the container header.
    pub public_key: [u8; PUBLIC_KEY_SIZE],
    /// Seed followed by public key.
    pub private_key: Zeroizing<[u8; PRIVATE_KEY_SIZE]>,
    /// Free-form comment, empty when absent.
    pub comment: String,
    /// Whether the two check integers agree.
    ///
    /// Diagnostic only. A mismatch normally means a wrong passphrase on an
    /// encrypted key; unencrypted keys are accepted either way.
    pub checkints_match: bool,
}

impl std::fmt::Debug for PrivateContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateContainer")
            .field("public_key", &self.public_key)
            .field("comment", &self.comment)
            .field("checkints_match", &self.checkints_match)
            .finish_non_exhaustive()
    }
}

/// Parse a public key blob into the raw 32-byte key.
pub fn parse_public_key(blob: &[u8]) -> Result<[u8; PUBLIC_KEY_SIZE], KeyContainerError> {
    let mut reader = WireReader::new(blob);
    let key_type = reader.read_string("public key type")?;
    expect_ed25519(key_type)?;
    let key = reader.read_string("public key")?;
    to_public_key(key)
}

/// Parse an unencrypted private container into the raw 64-byte key.
pub fn parse_private_key(
    container: &[u8],
) -> Result<Zeroizing<[u8; PRIVATE_KEY_SIZE]>, KeyContainerError> {
    parse_private_container(container).map(|parsed| parsed.private_key)
}

/// Parse an unencrypted private container, keeping the metadata.
pub fn parse_private_container(container: &[u8]) -> Result<PrivateContainer, KeyContainerError> {
    let mut reader = WireReader::new(container);

    let magic = reader
        .read_bytes(OPENSSH_MAGIC.len(), "magic")
        .map_err(|_| KeyContainerError::UnsupportedKeyFormat("missing openssh-key-v1 magic".into()))?;
    if magic != OPENSSH_MAGIC {
        return Err(KeyContainerError::UnsupportedKeyFormat(
            "missing openssh-key-v1 magic".into(),
        ));
    }

    let cipher = reader.read_string("cipher name")?;
    let kdf = reader.read_string("kdf name")?;
    if cipher != NO_ENCRYPTION || kdf != NO_ENCRYPTION {
        return Err(KeyContainerError::EncryptedKeyUnsupported {
            cipher: String::from_utf8_lossy(cipher).into_owned(),
            kdf: String::from_utf8_lossy(kdf).into_owned(),
        });
    }
    let _kdf_options = reader.read_string("kdf options")?;

    let key_count = reader.read_u32("key count")?;
    if key_count != 1 {
        return Err(KeyContainerError::UnsupportedKeyFormat(format!(
            "expected exactly one key, found {}",
            key_count
        )));
    }

    let public_key = parse_public_key(reader.read_string("public key blob")?)?;

    let mut private = reader.read_section("private section")?;
    let check1 = private.read_u32("checkint")?;
    let check2 = private.read_u32("checkint")?;

    expect_ed25519(private.read_string("private key type")?)?;

    let public_again = to_public_key(private.read_string("private public key")?)?;
    if public_again != public_key {
        return Err(KeyContainerError::PublicKeyMismatch);
    }

    let raw = private.read_string("private key")?;
    if raw.len() != PRIVATE_KEY_SIZE {
        return Err(KeyContainerError::UnexpectedKeySize {
            expected: PRIVATE_KEY_SIZE,
            actual: raw.len(),
        });
    }
    if raw[PUBLIC_KEY_SIZE..] != public_key {
        return Err(KeyContainerError::PublicKeyMismatch);
    }
    let mut private_key = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
    private_key.copy_from_slice(raw);

    let comment = private
        .read_string("comment")
        .map(|c| String::from_utf8_lossy(c).into_owned())
        .unwrap_or_default();

    debug!(
        comment = %comment,
        checkints_match = check1 == check2,
        "Parsed openssh private key container"
    );

    Ok(PrivateContainer {
        public_key,
        private_key,
        comment,
        checkints_match: check1 == check2,
    })
}

fn expect_ed25519(key_type: &[u8]) -> Result<(), KeyContainerError> {
    if key_type != ED25519_KEY_TYPE.as_bytes() {
        return Err(KeyContainerError::UnsupportedKeyFormat(format!(
            "key type {}",
            String::from_utf8_lossy(key_type)
        )));
    }
    Ok(())
}

fn to_public_key(bytes: &[u8]) -> Result<[u8; PUBLIC_KEY_SIZE], KeyContainerError> {
    bytes
        .try_into()
        .map_err(|_| KeyContainerError::UnexpectedKeySize {
            expected: PUBLIC_KEY_SIZE,
            actual: bytes.len(),
        })
}
