use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};

use crate::error::StoreError;

/// Length of every generated short code.
pub const CODE_LEN: usize = 6;

/// Source of candidate short codes. The store only asks for candidates and
/// checks them for collisions itself.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> Result<String, StoreError>;
}

/// Draws 6 bytes from the OS CSPRNG, encodes them with the URL-safe base64
/// alphabet (`A-Z a-z 0-9 - _`) and keeps the first 6 characters.
///
/// Six encoded characters carry 36 of the 48 random bits; the code space is
/// 64^6.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodes;

impl CodeGenerator for RandomCodes {
    fn generate(&self) -> Result<String, StoreError> {
        let mut buf = [0u8; CODE_LEN];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| StoreError::Exhausted(format!("randomness source failed: {e}")))?;

        let mut code = URL_SAFE_NO_PAD.encode(buf);
        code.truncate(CODE_LEN);
        Ok(code)
    }
}

/// Returns `true` if `code` has the shape of a generated short code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LEN
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn random_codes_have_expected_shape() {
        for _ in 0..1000 {
            let code = RandomCodes.generate().unwrap();
            assert!(is_valid_code(&code), "bad code: {code}");
        }
    }

    #[test]
    fn random_codes_rarely_repeat() {
        let codes: HashSet<String> = (0..1000)
            .map(|_| RandomCodes.generate().unwrap())
            .collect();
        assert!(codes.len() > 995);
    }

    #[test]
    fn code_shape_check() {
        assert!(is_valid_code("aZ09-_"));
        assert!(!is_valid_code("abcde"));
        assert!(!is_valid_code("abcdefg"));
        assert!(!is_valid_code("abc+/="));
        assert!(!is_valid_code("abcdé"));
    }
}
