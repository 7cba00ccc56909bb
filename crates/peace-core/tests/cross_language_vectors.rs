//! # Cross-Language Codec Vectors
//!
//! The browser client computes the public field elements and the message id
//! with the same codec. These vectors were produced by that pipeline
//! (`TextEncoder` + `crypto.subtle.digest("SHA-256")` + `BigInt % P`, and
//! `JSON.stringify` for the message record); if any of them change, commitments
//! created in the browser stop verifying here.

use peace_core::{
    address_to_bytes, hash_to_field, sha256_digest, text_to_field, timestamp_bucket,
    uint_to_bytes, CanonicalBytes, FieldElement,
};
use serde::Serialize;

const CONTRACT: &str = "0x1234567890123456789012345678901234567890";

#[test]
fn text_hash_of_hello() {
    assert_eq!(
        text_to_field("Hello").to_hex(),
        "0x185f8db32271fe25f561a6fc938b2e264306ec304eda518007d1764826381969"
    );
}

#[test]
fn byte_order_mark_is_trimmed() {
    // `"\uFEFFHello\uFEFF".trim()` is `"Hello"` in JavaScript.
    assert_eq!(
        text_to_field("\u{feff}Hello\u{feff}").to_hex(),
        "0x185f8db32271fe25f561a6fc938b2e264306ec304eda518007d1764826381969"
    );
}

#[test]
fn next_line_is_kept() {
    // `"\u0085Hello".trim()` keeps U+0085 in JavaScript.
    assert_eq!(
        text_to_field("\u{85}Hello").to_hex(),
        "0xbc3ad5646ca53a6ad0f474328e2cac6571c4191c9b098c2e4c390cd9af3194b"
    );
}

#[test]
fn secret_field_of_secret() {
    assert_eq!(
        text_to_field("secret").to_hex(),
        "0x2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
    );
}

#[test]
fn chain_id_word() {
    let bytes = uint_to_bytes(8453, 32).unwrap();
    assert_eq!(
        hash_to_field(&bytes).to_hex(),
        "0x21a3985e023f694761a78576271add54843c994bbdab2e22e207d71cce71b30f"
    );
}

#[test]
fn contract_word() {
    let bytes = address_to_bytes(CONTRACT).unwrap();
    assert_eq!(
        hash_to_field(&bytes).to_hex(),
        "0x375257011ecf7819f26cb40aeb86456facd442c67ed2ddcb764a83c7755095a"
    );
}

#[test]
fn timestamp_bucket_word() {
    let bucket = timestamp_bucket(1_700_000_000);
    let bytes = uint_to_bytes(u128::from(bucket), 8).unwrap();
    assert_eq!(
        hash_to_field(&bytes).to_hex(),
        "0x2fa491ce5dd75c3a695bb0c6e6579818450985944a22d1ffc384b55d01945a35"
    );
}

#[derive(Serialize)]
struct MessageRecord<'a> {
    text: &'a str,
    h: &'a str,
    ts: u64,
    scheme: u32,
}

#[test]
fn message_record_digest() {
    let record = MessageRecord {
        text: "Hello",
        h: "0x1118081fad0c4bc26957336ed347ac1a2cdc29195bc5052d867847de39b468b8",
        ts: 1_700_000_000,
        scheme: 1,
    };
    let cb = CanonicalBytes::new(&record).unwrap();
    assert_eq!(
        std::str::from_utf8(cb.as_bytes()).unwrap(),
        r#"{"text":"Hello","h":"0x1118081fad0c4bc26957336ed347ac1a2cdc29195bc5052d867847de39b468b8","ts":1700000000,"scheme":1}"#
    );
    let id = FieldElement::from_be_bytes_mod_order(&sha256_digest(&cb));
    assert_eq!(
        id.to_hex(),
        "0x7861729906481f8fe4112c55569eb7234e94fe5b0e0d9c3458f002817164e92"
    );
}
