//! Integration tests for the Ecrin handle engine.
//!
//! These exercise the public surface end to end: standard known-answer
//! vectors, chaining across calls, handle lifecycle, and leak freedom on
//! error paths.

// Allow unwrap() in tests - panics are acceptable for test assertions
#![allow(clippy::disallowed_methods)]

#[cfg(test)]
mod tests {
    use ecrin_engine::consts::{
        CIPHER_AES128, CIPHER_AES192, CIPHER_AES256, CIPHER_MODE_CBC, MD_FLAG_HMAC, MD_SHA256,
    };
    use ecrin_engine::{constants, init, Cipher, Error, Hash};

    fn cipher_with(algo: u32, key: &[u8], iv: &[u8]) -> Cipher {
        let mut cipher = Cipher::open(algo, CIPHER_MODE_CBC).unwrap();
        cipher.set_key(key).unwrap();
        cipher.set_iv(iv).unwrap();
        cipher
    }

    // ========================================================================
    // Initialization
    // ========================================================================

    // The provider init flag is process-wide; this is the only test in this
    // binary that calls init().
    #[test]
    fn test_init_once_semantics() {
        init().unwrap();
        assert!(ecrin_provider::is_initialized());
        assert!(!ecrin_provider::secure_memory_enabled());

        let second = init();
        assert!(matches!(second, Err(Error::Usage(_))));

        // Handles still construct normally after initialization.
        let mut hash = Hash::open(MD_SHA256, 0).unwrap();
        hash.write(b"post-init").unwrap();
        assert_eq!(hash.read().unwrap().len(), 32);
    }

    #[test]
    fn test_exported_constant_table() {
        let names: Vec<&str> = constants().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec![
                "CIPHER_AES128",
                "CIPHER_AES192",
                "CIPHER_AES256",
                "CIPHER_MODE_CBC",
                "MD_FLAG_HMAC",
                "MD_SHA256",
            ]
        );
    }

    // ========================================================================
    // Cipher known-answer vectors
    // ========================================================================

    // All-zero key/IV/plaintext block under AES-256-CBC.
    #[test]
    fn test_aes256_cbc_zero_vector_roundtrip() {
        let mut enc = cipher_with(CIPHER_AES256, &[0u8; 32], &[0u8; 16]);
        let ciphertext = enc.encrypt(&[0u8; 16]).unwrap();
        assert_eq!(hex::encode(&ciphertext), "dc95c078a2408989ad48a21492842087");

        let mut dec = cipher_with(CIPHER_AES256, &[0u8; 32], &[0u8; 16]);
        assert_eq!(dec.decrypt(&ciphertext).unwrap(), [0u8; 16]);
    }

    // NIST SP 800-38A F.2.1 (CBC-AES128), blocks 1 and 2, fed through two
    // separate encrypt calls to prove the chain survives call boundaries.
    #[test]
    fn test_aes128_cbc_nist_vectors_chained() {
        let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
        let iv = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let block1 = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();
        let block2 = hex::decode("ae2d8a571e03ac9c9eb76fac45af8e51").unwrap();

        let mut cipher = cipher_with(CIPHER_AES128, &key, &iv);
        let ct1 = cipher.encrypt(&block1).unwrap();
        let ct2 = cipher.encrypt(&block2).unwrap();

        assert_eq!(hex::encode(ct1), "7649abac8119b246cee98e9b12e9197d");
        assert_eq!(hex::encode(ct2), "5086cb9b507219ee95db113a917678b2");
    }

    // NIST SP 800-38A F.2.3 (CBC-AES192), block 1.
    #[test]
    fn test_aes192_cbc_nist_vector() {
        let key =
            hex::decode("8e73b0f7da0e6452c810f32b809079e562f8ead2522c6b7b").unwrap();
        let iv = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let plaintext = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();

        let mut cipher = cipher_with(CIPHER_AES192, &key, &iv);
        let ciphertext = cipher.encrypt(&plaintext).unwrap();
        assert_eq!(hex::encode(ciphertext), "4f021db243bc633d7178183a9fa071e8");
    }

    #[test]
    fn test_roundtrip_all_key_sizes() {
        let plaintext: Vec<u8> = (0u8..96).collect();
        for (algo, key_len) in [
            (CIPHER_AES128, 16),
            (CIPHER_AES192, 24),
            (CIPHER_AES256, 32),
        ] {
            let key = vec![0x6bu8; key_len];
            let iv = [0x1fu8; 16];

            let mut enc = cipher_with(algo, &key, &iv);
            let ciphertext = enc.encrypt(&plaintext).unwrap();
            assert_eq!(ciphertext.len(), plaintext.len());

            let mut dec = cipher_with(algo, &key, &iv);
            assert_eq!(dec.decrypt(&ciphertext).unwrap(), plaintext);
        }
    }

    // ========================================================================
    // Cipher lifecycle and error paths
    // ========================================================================

    #[test]
    fn test_open_then_drop_every_combination() {
        for algo in [CIPHER_AES128, CIPHER_AES192, CIPHER_AES256] {
            let cipher = Cipher::open(algo, CIPHER_MODE_CBC).unwrap();
            drop(cipher);
        }
    }

    #[test]
    fn test_double_close_is_noop() {
        let mut cipher = cipher_with(CIPHER_AES128, &[0u8; 16], &[0u8; 16]);
        cipher.close();
        cipher.close();
        assert!(cipher.is_closed());

        let mut hash = Hash::open(MD_SHA256, 0).unwrap();
        hash.close();
        hash.close();
        assert!(hash.is_closed());
    }

    #[test]
    fn test_failed_encrypt_leaves_handle_usable_and_clean() {
        let mut cipher = cipher_with(CIPHER_AES128, &[1u8; 16], &[2u8; 16]);

        let result = cipher.encrypt(b"thirteen byte");
        assert!(matches!(result, Err(Error::Provider(_))));
        assert_eq!(cipher.pending_len(), None);

        let ciphertext = cipher.encrypt(&[0u8; 16]).unwrap();
        assert_eq!(ciphertext.len(), 16);
        assert_eq!(cipher.pending_len(), None);
    }

    #[test]
    fn test_reset_then_setiv_equals_fresh_handle() {
        let key = [0x77u8; 32];
        let iv = [0x12u8; 16];
        let message = [0xc3u8; 64];

        let mut fresh = cipher_with(CIPHER_AES256, &key, &iv);
        let expected = fresh.encrypt(&message).unwrap();

        let mut reused = cipher_with(CIPHER_AES256, &key, &iv);
        let _ = reused.encrypt(&[0u8; 32]).unwrap();
        let _ = reused.encrypt(&[9u8; 16]).unwrap();
        reused.reset().unwrap();
        reused.set_iv(&iv).unwrap();
        assert_eq!(reused.encrypt(&message).unwrap(), expected);
    }

    // ========================================================================
    // Digest known-answer vectors
    // ========================================================================

    #[test]
    fn test_sha256_standard_vectors() {
        let cases: &[(&[u8], &str)] = &[
            (
                b"abc",
                "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
            ),
            (
                b"",
                "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            ),
            (
                b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
                "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1",
            ),
        ];
        for (input, expected) in cases {
            let mut hash = Hash::open(MD_SHA256, 0).unwrap();
            hash.write(input).unwrap();
            assert_eq!(hex::encode(hash.read().unwrap()), *expected);
        }
    }

    #[test]
    fn test_digest_determinism_any_chunking() {
        let data: Vec<u8> = (0..=255).collect();
        let mut reference = Hash::open(MD_SHA256, 0).unwrap();
        reference.write(&data).unwrap();
        let expected = reference.read().unwrap();

        for chunk_size in [1, 3, 16, 64, 256] {
            let mut hash = Hash::open(MD_SHA256, 0).unwrap();
            for chunk in data.chunks(chunk_size) {
                hash.write(chunk).unwrap();
            }
            assert_eq!(hash.read().unwrap(), expected);
        }
    }

    // RFC 4231 test case 1.
    #[test]
    fn test_hmac_sha256_rfc4231_case1() {
        let key = [0x0bu8; 20];
        let mut hash = Hash::open(MD_SHA256, MD_FLAG_HMAC).unwrap();
        hash.set_key(&key).unwrap();
        hash.write(b"Hi There").unwrap();
        assert_eq!(
            hex::encode(hash.read().unwrap()),
            "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7"
        );
    }

    #[test]
    fn test_hmac_requires_key_then_differs_from_plain() {
        let mut keyed = Hash::open(MD_SHA256, MD_FLAG_HMAC).unwrap();
        keyed.write(b"payload").unwrap();
        assert!(keyed.read().is_err());

        keyed.set_key(b"secret").unwrap();
        let mac = keyed.read().unwrap();

        let mut plain = Hash::open(MD_SHA256, 0).unwrap();
        plain.write(b"payload").unwrap();
        assert_ne!(mac, plain.read().unwrap());
    }

    // ========================================================================
    // Full workflow
    // ========================================================================

    #[test]
    fn test_encrypt_then_authenticate_workflow() {
        let key = [0x42u8; 32];
        let iv = [0x07u8; 16];
        let message = [0x99u8; 48];

        let mut cipher = cipher_with(CIPHER_AES256, &key, &iv);
        let ciphertext = cipher.encrypt(&message).unwrap();

        let mut mac = Hash::open(MD_SHA256, MD_FLAG_HMAC).unwrap();
        mac.set_key(b"auth-key").unwrap();
        mac.write(&ciphertext).unwrap();
        let tag = mac.read().unwrap();
        assert_eq!(tag.len(), 32);

        // Receiver side: verify the tag, then decrypt.
        let mut verify = Hash::open(MD_SHA256, MD_FLAG_HMAC).unwrap();
        verify.set_key(b"auth-key").unwrap();
        verify.write(&ciphertext).unwrap();
        assert_eq!(verify.read().unwrap(), tag);

        let mut dec = cipher_with(CIPHER_AES256, &key, &iv);
        assert_eq!(dec.decrypt(&ciphertext).unwrap(), message);
    }
}
